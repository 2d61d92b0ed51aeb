//! Stable parallel merge sort built on rayon's fork-join primitives.
//!
//! Ranges at or above the crossover length are split at their midpoint and both halves are sorted
//! concurrently, shorter ranges fall back to a plain sequential recursion. Every merge stages its
//! left run in a private, index aligned part of one scratch allocation made per sort call.

use std::cmp::Ordering;
use std::mem;
use std::sync::Arc;

use rayon::ThreadPool;

use crate::observer::{NoopObserver, SortObserver};

mod fork_join;
mod merge;
mod sequential;

/// Ranges shorter than this are sorted without forking.
pub const DEFAULT_CROSSOVER: usize = 2048;

/// How a range at or above the crossover hands its halves to the pool.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ForkStrategy {
    /// Both halves become tasks and the caller waits for both.
    SpawnBoth,
    /// The left half becomes a task, the right half runs on the calling thread.
    #[default]
    SpawnOne,
}

/// A configured merge sort.
///
/// ```ignore
/// let sorter = MergeSort::new().crossover(4096).strategy(ForkStrategy::SpawnBoth);
/// sorter.sort(&mut v);
/// ```
#[derive(Clone, Debug)]
pub struct MergeSort<O = NoopObserver> {
    crossover: usize,
    strategy: ForkStrategy,
    pool: Option<Arc<ThreadPool>>,
    observer: O,
}

impl MergeSort {
    /// Crossover [`DEFAULT_CROSSOVER`], [`ForkStrategy::SpawnOne`], global rayon pool and no
    /// observer.
    pub fn new() -> Self {
        Self {
            crossover: DEFAULT_CROSSOVER,
            strategy: ForkStrategy::default(),
            pool: None,
            observer: NoopObserver,
        }
    }
}

impl Default for MergeSort {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: SortObserver> MergeSort<O> {
    /// Ranges shorter than `crossover` are sorted sequentially. `0`, `1` and `2` make every range
    /// of two or more elements fork.
    pub fn crossover(mut self, crossover: usize) -> Self {
        self.crossover = crossover;
        self
    }

    pub fn strategy(mut self, strategy: ForkStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Runs every sort inside `pool` instead of the global pool.
    pub fn thread_pool(mut self, pool: Arc<ThreadPool>) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn observer<P: SortObserver>(self, observer: P) -> MergeSort<P> {
        MergeSort {
            crossover: self.crossover,
            strategy: self.strategy,
            pool: self.pool,
            observer,
        }
    }

    pub fn observer_ref(&self) -> &O {
        &self.observer
    }

    pub fn crossover_len(&self) -> usize {
        self.crossover
    }

    pub fn fork_strategy(&self) -> ForkStrategy {
        self.strategy
    }

    pub fn sort<T>(&self, v: &mut [T])
    where
        T: Ord + Send,
    {
        self.stable_sort(v, T::lt);
    }

    pub fn sort_by<T, F>(&self, v: &mut [T], compare: F)
    where
        T: Send,
        F: Fn(&T, &T) -> Ordering + Sync,
    {
        self.stable_sort(v, |a, b| compare(a, b) == Ordering::Less);
    }

    pub fn sort_by_key<T, K, F>(&self, v: &mut [T], f: F)
    where
        T: Send,
        K: Ord,
        F: Fn(&T) -> K + Sync,
    {
        self.stable_sort(v, |a, b| f(a).lt(&f(b)));
    }

    fn stable_sort<T, F>(&self, v: &mut [T], is_less: F)
    where
        T: Send,
        F: Fn(&T, &T) -> bool + Sync,
    {
        let len = v.len();
        if mem::size_of::<T>() == 0 || len < 2 {
            // Sorting has no meaningful behavior on zero-sized types, and shorter slices are
            // always sorted.
            return;
        }

        let mut buf = Vec::<T>::with_capacity(len);
        let scratch = &mut buf.spare_capacity_mut()[..len];

        let driver = fork_join::Driver {
            is_less: &is_less,
            observer: &self.observer,
            crossover: self.crossover,
            strategy: self.strategy,
        };

        match &self.pool {
            Some(pool) => pool.install(|| driver.sort(v, scratch, 0, 0)),
            None => driver.sort(v, scratch, 0, 0),
        }
    }
}
