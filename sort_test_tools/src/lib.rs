use std::cmp::Ordering;

/// Common interface of every sort implementation that is tested or benchmarked.
///
/// The bounds are those of a fork-join sort: elements move between worker threads, and the
/// comparison is shared by all of them.
pub trait Sort {
    fn name() -> String;

    fn sort<T>(arr: &mut [T])
    where
        T: Ord + Send;

    fn sort_by<T, F>(arr: &mut [T], compare: F)
    where
        T: Send,
        F: Fn(&T, &T) -> Ordering + Sync;
}

pub mod patterns;
