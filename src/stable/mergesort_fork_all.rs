//! v1: every range of two or more elements is split into two spawned tasks.

use std::cmp::Ordering;

use crate::variant::Variant;

sort_impl!("mergesort_fork_all_stable");

pub fn sort<T>(v: &mut [T])
where
    T: Ord + Send,
{
    Variant::ForkAll.sorter(None).sort(v);
}

pub fn sort_by<T, F>(v: &mut [T], compare: F)
where
    T: Send,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    Variant::ForkAll.sorter(None).sort_by(v, compare);
}
