//! Continuations, deferred scheduling, and the sequential driver.
//!
//! This module provides the plumbing every asynchronous combinator runs on:
//!
//! - [`Continuation`]: one-shot callback a step resumes exactly once
//! - [`Outcome`]: success, or failure with an optional partial value
//! - [`Schedule`] / [`Scheduler`]: explicit deferred task queue
//! - `LocalSpawner`, `callback_future`, `continuation_future`, `spawn_step`:
//!   tokio and futures interop (feature `async`)
//!
//! # Examples
//!
//! ## A Deferred Step
//!
//! ```rust
//! use functools::control::{Continuation, Outcome, Schedule, Scheduler};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let scheduler = Scheduler::new();
//! let result = Rc::new(RefCell::new(None));
//!
//! let sink = Rc::clone(&result);
//! let continuation: Continuation<i32, String> =
//!     Continuation::new(move |outcome| *sink.borrow_mut() = Some(outcome));
//!
//! // The step decides to answer later.
//! scheduler.defer(Box::new(move || continuation.succeed(42)));
//! assert!(result.borrow().is_none());
//!
//! scheduler.run_until_idle();
//! assert_eq!(*result.borrow(), Some(Outcome::Success(42)));
//! ```

mod continuation;
#[cfg(feature = "combinator")]
pub(crate) mod driver;
#[cfg(feature = "async")]
mod future;
mod scheduler;

pub use continuation::{Continuation, Outcome};
#[cfg(feature = "async")]
pub use future::{ContinuationDropped, callback_future, continuation_future, spawn_step};
#[cfg(feature = "async")]
pub use scheduler::LocalSpawner;
pub use scheduler::{Schedule, Scheduler, Task};
