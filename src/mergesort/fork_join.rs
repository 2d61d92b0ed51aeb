use std::mem::{self, MaybeUninit};

use crate::observer::{SortObserver, Task, TaskKind};

use super::merge::merge;
use super::sequential::merge_sort;
use super::ForkStrategy;

/// Recursive fork-join driver. Shared by reference between all tasks of one sort call.
pub(crate) struct Driver<'a, F, O> {
    pub(crate) is_less: &'a F,
    pub(crate) observer: &'a O,
    pub(crate) crossover: usize,
    pub(crate) strategy: ForkStrategy,
}

impl<F, O> Driver<'_, F, O>
where
    O: SortObserver,
{
    /// Sorts `v`, which starts at `offset` in the caller's slice, using the index aligned
    /// `scratch` range for its merges.
    pub(crate) fn sort<T>(
        &self,
        v: &mut [T],
        scratch: &mut [MaybeUninit<T>],
        offset: usize,
        depth: usize,
    ) where
        T: Send,
        F: Fn(&T, &T) -> bool + Sync,
    {
        let len = v.len();
        if len < 2 {
            return;
        }

        if len < self.crossover {
            let task = Task {
                kind: TaskKind::Sequential,
                depth,
                offset,
                len,
            };
            let guard = TaskGuard::start(self.observer, task);
            let mut is_less = self.is_less;
            merge_sort(v, scratch, &mut is_less);
            guard.finish();
            return;
        }

        let fork = Task {
            kind: TaskKind::Fork,
            depth,
            offset,
            len,
        };
        let fork_guard = TaskGuard::start(self.observer, fork);

        let mid = len / 2;
        {
            let (left, right) = v.split_at_mut(mid);
            let (scratch_left, scratch_right) = scratch.split_at_mut(mid);
            let right_offset = offset + mid;

            match self.strategy {
                ForkStrategy::SpawnBoth => rayon::scope(|s| {
                    s.spawn(move |_| self.sort(left, scratch_left, offset, depth + 1));
                    s.spawn(move |_| self.sort(right, scratch_right, right_offset, depth + 1));
                }),
                ForkStrategy::SpawnOne => {
                    // The first closure runs on this thread, the second one can be stolen.
                    rayon::join(
                        || self.sort(right, scratch_right, right_offset, depth + 1),
                        || self.sort(left, scratch_left, offset, depth + 1),
                    );
                }
            }
        }

        let merge_task = Task {
            kind: TaskKind::Merge,
            ..fork
        };
        let merge_guard = TaskGuard::start(self.observer, merge_task);
        let mut is_less = self.is_less;
        merge(v, mid, scratch, &mut is_less);
        merge_guard.finish();

        fork_guard.finish();
    }
}

/// Reports `task_finished` when the task completes, or `task_aborted` if it unwinds first.
struct TaskGuard<'a, O: SortObserver> {
    observer: &'a O,
    task: Task,
}

impl<'a, O: SortObserver> TaskGuard<'a, O> {
    fn start(observer: &'a O, task: Task) -> Self {
        observer.task_started(&task);
        Self { observer, task }
    }

    fn finish(self) {
        self.observer.task_finished(&self.task);
        mem::forget(self);
    }
}

impl<O: SortObserver> Drop for TaskGuard<'_, O> {
    fn drop(&mut self) {
        self.observer.task_aborted(&self.task);
    }
}
