use std::mem::MaybeUninit;
use std::ptr;

/// Merges the non-decreasing runs `v[..mid]` and `v[mid..]` into one sorted run, in place.
///
/// `scratch` is index aligned with `v`: the left run is staged in `scratch[..mid]` while the right
/// run is read where it is. Ties take the left element, which keeps the merge stable. If the right
/// run is consumed first, the rest of the left run is drained into the gap that is left. If the
/// left run is consumed first, the rest of the right run already sits in its final place.
///
/// # Panics
///
/// Panics if `mid > v.len()` or `scratch` is shorter than `mid`.
pub(crate) fn merge<T, F>(
    v: &mut [T],
    mid: usize,
    scratch: &mut [MaybeUninit<T>],
    is_less: &mut F,
) where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    assert!(mid <= len && scratch.len() >= mid);

    if mid == 0 || mid == len {
        return;
    }

    let arr_ptr = v.as_mut_ptr();
    let buf = scratch.as_mut_ptr().cast::<T>();

    // Intermediate state of the process is always tracked by `hole`, which serves two purposes:
    // 1. Protects integrity of `v` from panics in `is_less`.
    // 2. Fills the remaining gap in `v` if the right run gets consumed first.
    //
    // Panic safety:
    //
    // `hole.dest` never passes `right`, and the distance between them is exactly the number of
    // unconsumed left elements. So if `is_less` panics, dropping `hole` copies the unconsumed
    // left elements into that gap and `v` holds every element it initially held exactly once.
    //
    // Comparisons only ever see the element that ends up in `v`, the staged left copy is the one
    // that is written back. Mutations done by `is_less` through interior mutability are therefore
    // never lost.
    //
    // SAFETY: `mid < len`, `scratch` holds at least `mid` slots and does not alias `v`. All
    // pointers stay within `v` and `scratch[..mid]`, `T` is moved bitwise and every value ends up
    // in `v` exactly once.
    unsafe {
        ptr::copy_nonoverlapping(arr_ptr, buf, mid);
        let mut hole = MergeHole {
            start: buf,
            end: buf.add(mid),
            dest: arr_ptr,
        };

        let mut right = arr_ptr.add(mid);
        let v_end = arr_ptr.add(len);

        while hole.start < hole.end && right < v_end {
            // Consume the lesser side.
            // If equal, prefer the left run to maintain stability.
            let to_copy = if is_less(&*right, &*hole.start) {
                get_and_increment(&mut right)
            } else {
                get_and_increment(&mut hole.start)
            };
            ptr::copy_nonoverlapping(to_copy, get_and_increment(&mut hole.dest), 1);
        }
    }
    // Finally, `hole` gets dropped. If the left run was not fully consumed, whatever remains of it
    // will now be copied into the gap in `v`.

    unsafe fn get_and_increment<T>(ptr: &mut *mut T) -> *mut T {
        let old = *ptr;
        *ptr = unsafe { ptr.add(1) };
        old
    }

    // When dropped, copies the range `start..end` into `dest..`.
    struct MergeHole<T> {
        start: *mut T,
        end: *mut T,
        dest: *mut T,
    }

    impl<T> Drop for MergeHole<T> {
        fn drop(&mut self) {
            // `T` is not a zero-sized type, and these are pointers into a slice's elements.
            unsafe {
                let len = self.end.offset_from(self.start) as usize;
                ptr::copy_nonoverlapping(self.start, self.dest, len);
            }
        }
    }
}
