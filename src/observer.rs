//! Instrumentation hooks for the fork-join sort.
//!
//! The sort reports each unit of work to a [`SortObserver`] when it starts and when it finishes or
//! unwinds.
//! The observer is handed in by the caller, the algorithm itself knows nothing about counting,
//! logging or timing.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// A range at or above the crossover, split into two concurrently sorted halves. Finishes
    /// after its merge.
    Fork,
    /// A range below the crossover, sorted by plain recursion on the current thread.
    Sequential,
    /// The merge of a forked range, after both halves completed.
    Merge,
}

/// One unit of work, identified by where it sits in the caller's slice.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Task {
    pub kind: TaskKind,
    pub depth: usize,
    /// Index of the first element of the range inside the slice handed to the sort.
    pub offset: usize,
    pub len: usize,
}

/// Receives task notifications from the sort.
///
/// Notifications for one task arrive on the thread that runs it. Every started task ends with
/// exactly one of `task_finished` or, if its work panicked, `task_aborted`, reported while the
/// panic unwinds. Implementations are shared by all worker threads.
pub trait SortObserver: Sync {
    fn task_started(&self, _task: &Task) {}

    fn task_finished(&self, _task: &Task) {}

    fn task_aborted(&self, _task: &Task) {}
}

#[derive(Copy, Clone, Debug, Default)]
pub struct NoopObserver;

impl SortObserver for NoopObserver {}

impl<O: SortObserver + ?Sized> SortObserver for &O {
    fn task_started(&self, task: &Task) {
        (**self).task_started(task);
    }

    fn task_finished(&self, task: &Task) {
        (**self).task_finished(task);
    }

    fn task_aborted(&self, task: &Task) {
        (**self).task_aborted(task);
    }
}

impl<O: SortObserver> SortObserver for Option<O> {
    fn task_started(&self, task: &Task) {
        if let Some(observer) = self {
            observer.task_started(task);
        }
    }

    fn task_finished(&self, task: &Task) {
        if let Some(observer) = self {
            observer.task_finished(task);
        }
    }

    fn task_aborted(&self, task: &Task) {
        if let Some(observer) = self {
            observer.task_aborted(task);
        }
    }
}

impl<A: SortObserver, B: SortObserver> SortObserver for (A, B) {
    fn task_started(&self, task: &Task) {
        self.0.task_started(task);
        self.1.task_started(task);
    }

    fn task_finished(&self, task: &Task) {
        // Reverse order, so nested instrumentation unwinds cleanly.
        self.1.task_finished(task);
        self.0.task_finished(task);
    }

    fn task_aborted(&self, task: &Task) {
        self.1.task_aborted(task);
        self.0.task_aborted(task);
    }
}

/// Counts the finished tasks by kind, and the aborted ones of any kind.
#[derive(Debug, Default)]
pub struct CountingObserver {
    forks: AtomicUsize,
    sequential: AtomicUsize,
    merges: AtomicUsize,
    aborted: AtomicUsize,
    max_depth: AtomicUsize,
}

impl CountingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn forks(&self) -> usize {
        self.forks.load(Ordering::Relaxed)
    }

    pub fn sequential_runs(&self) -> usize {
        self.sequential.load(Ordering::Relaxed)
    }

    pub fn merges(&self) -> usize {
        self.merges.load(Ordering::Relaxed)
    }

    pub fn aborted(&self) -> usize {
        self.aborted.load(Ordering::Relaxed)
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth.load(Ordering::Relaxed)
    }
}

impl SortObserver for CountingObserver {
    fn task_started(&self, task: &Task) {
        self.max_depth.fetch_max(task.depth, Ordering::Relaxed);
    }

    fn task_finished(&self, task: &Task) {
        let counter = match task.kind {
            TaskKind::Fork => &self.forks,
            TaskKind::Sequential => &self.sequential,
            TaskKind::Merge => &self.merges,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn task_aborted(&self, _task: &Task) {
        self.aborted.fetch_add(1, Ordering::Relaxed);
    }
}

thread_local! {
    static ENTERED_SPANS: RefCell<Vec<tracing::span::EnteredSpan>> =
        const { RefCell::new(Vec::new()) };
}

/// Opens a `tracing` span per task, entered on the thread that runs the task.
///
/// Work stealing only ever runs a stolen task to completion while the thief waits at its own join
/// point, so the spans of one thread always close in reverse order of opening.
#[derive(Copy, Clone, Debug, Default)]
pub struct TracingObserver;

impl SortObserver for TracingObserver {
    fn task_started(&self, task: &Task) {
        let span = tracing::trace_span!(
            "sort_task",
            kind = ?task.kind,
            depth = task.depth,
            offset = task.offset,
            len = task.len
        );
        ENTERED_SPANS.with(|spans| spans.borrow_mut().push(span.entered()));
    }

    fn task_finished(&self, task: &Task) {
        tracing::trace!(kind = ?task.kind, offset = task.offset, len = task.len, "task done");
        ENTERED_SPANS.with(|spans| drop(spans.borrow_mut().pop()));
    }

    fn task_aborted(&self, task: &Task) {
        tracing::debug!(kind = ?task.kind, offset = task.offset, len = task.len, "task aborted");
        ENTERED_SPANS.with(|spans| drop(spans.borrow_mut().pop()));
    }
}

/// A finished task with its timing, relative to the creation of the [`SpanRecorder`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SpanRecord {
    #[serde(flatten)]
    pub task: Task,
    /// Index of the rayon worker that ran the task, `None` outside of a pool.
    pub thread: Option<usize>,
    pub start_ns: u64,
    pub duration_ns: u64,
}

#[derive(Debug)]
struct RecorderState {
    open: HashMap<Task, Instant>,
    finished: Vec<SpanRecord>,
}

/// Records a timed span for every task, the rendition of a scheduler trace.
#[derive(Debug)]
pub struct SpanRecorder {
    origin: Instant,
    state: Mutex<RecorderState>,
}

impl SpanRecorder {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            state: Mutex::new(RecorderState {
                open: HashMap::new(),
                finished: Vec::new(),
            }),
        }
    }

    /// Removes and returns all spans finished so far, ordered by start time.
    pub fn take_records(&self) -> Vec<SpanRecord> {
        let mut records = std::mem::take(&mut self.lock_state().finished);
        records.sort_by_key(|record| record.start_ns);
        records
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, RecorderState> {
        // The state stays consistent even if a holder panicked, every update is a single insert
        // or remove.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SpanRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl SortObserver for SpanRecorder {
    fn task_started(&self, task: &Task) {
        let now = Instant::now();
        self.lock_state().open.insert(*task, now);
    }

    fn task_finished(&self, task: &Task) {
        let end = Instant::now();
        let mut state = self.lock_state();

        if let Some(start) = state.open.remove(task) {
            let start_ns = start.duration_since(self.origin).as_nanos() as u64;
            let duration_ns = end.duration_since(start).as_nanos() as u64;

            state.finished.push(SpanRecord {
                task: *task,
                thread: rayon::current_thread_index(),
                start_ns,
                duration_ns,
            });
        }
    }

    fn task_aborted(&self, task: &Task) {
        self.lock_state().open.remove(task);
    }
}
