//! Fork-join merge sort testbed.
//!
//! `mergesort` holds the one parameterized implementation, `stable` exposes its historical
//! configurations next to the baselines they are measured against.

macro_rules! sort_impl {
    ($name:expr) => {
        pub struct SortImpl;

        impl sort_test_tools::Sort for SortImpl {
            fn name() -> String {
                $name.into()
            }

            #[inline]
            fn sort<T>(arr: &mut [T])
            where
                T: Ord + Send,
            {
                sort(arr);
            }

            #[inline]
            fn sort_by<T, F>(arr: &mut [T], compare: F)
            where
                T: Send,
                F: Fn(&T, &T) -> Ordering + Sync,
            {
                sort_by(arr, compare);
            }
        }
    };
}

pub mod error;
pub mod harness;
pub mod mergesort;
pub mod observer;
pub mod stable;
pub mod variant;

pub use error::{Error, Result};
pub use mergesort::{ForkStrategy, MergeSort, DEFAULT_CROSSOVER};
pub use observer::{SortObserver, Task, TaskKind};
pub use sort_test_tools::Sort;
pub use variant::Variant;
