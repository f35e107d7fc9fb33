//! Sequential combinators over lists and string-keyed maps.
//!
//! The asynchronous combinators take a step function that reports back
//! through a [`Continuation`](crate::control::Continuation), and an outer
//! callback invoked exactly once with the aggregate result:
//!
//! - [`each_async`] / [`each_async_detached`]: runs a step per element for
//!   its effects, with or without an outer callback
//! - [`map_async`]: transforms every element, preserving shape
//! - [`filter_async`]: keeps elements an asynchronous predicate accepts
//! - [`fold_async`] / [`reduce_async`]: threads an accumulator through
//! - [`Pipeline`] ([`compose_async!`](crate::compose_async)): chains steps
//! - [`JuxtAsync`] ([`juxt_async!`](crate::juxt_async)): applies many
//!   functions to the same arguments
//!
//! [`each`], [`map`], [`filter`], [`fold`], [`reduce`] and [`juxt`] are their
//! synchronous counterparts.
//!
//! Steps run one at a time, in visit order. A step may resume its
//! continuation before returning or at any later point; long chains of
//! synchronous resumes run in constant stack.
//!
//! # Examples
//!
//! ```rust
//! use functools::combinator::map_async;
//! use functools::control::{Continuation, Schedule, Scheduler};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let scheduler = Scheduler::new();
//! let squares = Rc::new(RefCell::new(None));
//!
//! let deferred = scheduler.clone();
//! let sink = Rc::clone(&squares);
//! map_async(
//!     move |value: i32, continuation: Continuation<i32, String>| {
//!         deferred.defer(Box::new(move || continuation.succeed(value * value)));
//!     },
//!     vec![3, 1, 4],
//!     move |result| *sink.borrow_mut() = Some(result),
//! );
//!
//! scheduler.run_until_idle();
//! assert_eq!(*squares.borrow(), Some(Ok(vec![9, 1, 16])));
//! ```

mod eager;
mod halted;
mod macros;
mod pipeline;
mod sequential;

pub use eager::{EntriesView, each, filter, fold, juxt, map, reduce};
pub use halted::{Halted, Slot};
pub use pipeline::{AsyncFn, JuxtAsync, JuxtResult, Pipeline, async_fn};
pub use sequential::{
    FoldResult, MapResult, each_async, each_async_detached, filter_async, fold_async, map_async,
    reduce_async,
};
