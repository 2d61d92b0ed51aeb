//! v3: like v2, but only the left half is spawned and the right one runs on the calling thread.

use std::cmp::Ordering;

use crate::variant::Variant;

sort_impl!("mergesort_fork_one_stable");

pub fn sort<T>(v: &mut [T])
where
    T: Ord + Send,
{
    Variant::ForkOne.sorter(None).sort(v);
}

pub fn sort_by<T, F>(v: &mut [T], compare: F)
where
    T: Send,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    Variant::ForkOne.sorter(None).sort_by(v, compare);
}
