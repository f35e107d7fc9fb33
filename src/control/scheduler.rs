//! Deferred task scheduling.
//!
//! Some work must not run inside the call that produced it. The memoizer
//! flushes its waiters this way, so that one waiter's continuation cannot
//! re-enter the flush loop and so that long waiter lists do not grow the
//! call stack. [`Schedule`] is the seam for that; [`Scheduler`] is an
//! explicit FIFO task queue drained by the caller, and `LocalSpawner`
//! (feature `async`) hands tasks to the current tokio `LocalSet`.
//!
//! # Examples
//!
//! ```rust
//! use functools::control::{Schedule, Scheduler};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let scheduler = Scheduler::new();
//! let log = Rc::new(RefCell::new(Vec::new()));
//!
//! for index in 0..3 {
//!     let log = Rc::clone(&log);
//!     scheduler.defer(Box::new(move || log.borrow_mut().push(index)));
//! }
//! assert!(log.borrow().is_empty());
//!
//! assert_eq!(scheduler.run_until_idle(), 3);
//! assert_eq!(*log.borrow(), vec![0, 1, 2]);
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

/// A unit of deferred work.
pub type Task = Box<dyn FnOnce() + 'static>;

/// Posts tasks to run after the current execution unwinds.
///
/// Implementations must run tasks in the order they were deferred.
pub trait Schedule {
    /// Posts `task` to run later. Never runs it inline.
    fn defer(&self, task: Task);
}

impl<S: Schedule + ?Sized> Schedule for Rc<S> {
    fn defer(&self, task: Task) {
        (**self).defer(task);
    }
}

/// A single-threaded FIFO task queue.
///
/// Cloning yields another handle to the same queue. Nothing runs until the
/// owner calls [`run_next`](Self::run_next) or
/// [`run_until_idle`](Self::run_until_idle).
#[derive(Clone, Default)]
pub struct Scheduler {
    queue: Rc<RefCell<VecDeque<Task>>>,
}

impl Scheduler {
    /// Creates an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the oldest pending task. Returns `false` when the queue was empty.
    pub fn run_next(&self) -> bool {
        let Some(task) = self.queue.borrow_mut().pop_front() else {
            return false;
        };
        task();
        true
    }

    /// Runs tasks until the queue is empty, including tasks deferred while
    /// draining. Returns how many tasks ran.
    pub fn run_until_idle(&self) -> usize {
        let mut executed = 0;
        while self.run_next() {
            executed += 1;
        }
        tracing::trace!(executed, "scheduler drained");
        executed
    }

    /// Number of tasks waiting to run.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Returns `true` when no task is waiting.
    pub fn is_idle(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

impl Schedule for Scheduler {
    fn defer(&self, task: Task) {
        self.queue.borrow_mut().push_back(task);
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Scheduler")
            .field("pending", &self.pending())
            .finish()
    }
}

/// Hands deferred tasks to [`tokio::task::spawn_local`].
///
/// Tasks are spawned in deferral order onto the current `LocalSet`, which
/// polls them in that order.
///
/// # Panics
///
/// [`Schedule::defer`] panics when called outside a `tokio::task::LocalSet`.
#[cfg(feature = "async")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSpawner;

#[cfg(feature = "async")]
impl Schedule for LocalSpawner {
    fn defer(&self, task: Task) {
        drop(tokio::task::spawn_local(async move { task() }));
    }
}
