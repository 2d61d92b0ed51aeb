//! Stable sorts sharing the `sort` / `sort_by` / `SortImpl` surface.
//!
//! The `mergesort_*` modules are configurations of [`crate::MergeSort`], the rest are baselines.

pub mod mergesort_fork_all;
pub mod mergesort_fork_both;
pub mod mergesort_fork_one;
pub mod mergesort_sequential;
pub mod rust_rayon_parallel;
pub mod rust_std;
