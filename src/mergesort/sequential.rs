use std::mem::MaybeUninit;

use super::merge::merge;

/// Plain top-down merge sort. Splits at `len / 2`, the extra element of odd lengths goes right.
///
/// `scratch` must be at least as long as `v`, the halves of `v` recurse with the matching halves
/// of `scratch`.
pub(crate) fn merge_sort<T, F>(v: &mut [T], scratch: &mut [MaybeUninit<T>], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    if len < 2 {
        // These inputs are always sorted.
        return;
    }

    let mid = len / 2;
    {
        let (left, right) = v.split_at_mut(mid);
        let (scratch_left, scratch_right) = scratch.split_at_mut(mid);

        merge_sort(left, scratch_left, is_less);
        merge_sort(right, scratch_right, is_less);
    }

    merge(v, mid, scratch, is_less);
}
