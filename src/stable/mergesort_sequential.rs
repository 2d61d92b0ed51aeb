//! The recursion without any forking, the reference for the parallel variants.

use std::cmp::Ordering;

use crate::variant::Variant;

sort_impl!("mergesort_sequential_stable");

pub fn sort<T>(v: &mut [T])
where
    T: Ord + Send,
{
    Variant::Sequential.sorter(None).sort(v);
}

pub fn sort_by<T, F>(v: &mut [T], compare: F)
where
    T: Send,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    Variant::Sequential.sorter(None).sort_by(v, compare);
}
