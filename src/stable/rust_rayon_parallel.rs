use std::cmp::Ordering;

use rayon::slice::ParallelSliceMut;

sort_impl!("rust_rayon_parallel_stable");

pub fn sort<T>(v: &mut [T])
where
    T: Ord + Send,
{
    v.par_sort();
}

pub fn sort_by<T, F>(v: &mut [T], compare: F)
where
    T: Send,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    v.par_sort_by(compare);
}
