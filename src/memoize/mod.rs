//! Result caching for synchronous and continuation-style functions.
//!
//! - [`Memoize`]: caches the return value of a synchronous function
//! - [`MemoizeAsync`]: caches the successful result of an asynchronous
//!   function and coalesces concurrent calls for the same key into a single
//!   invocation
//!
//! Both cache forever. Keys default to a clone of the argument; `with_key`
//! derives them with a custom function instead.
//!
//! # Hashing
//!
//! Cache and waiter maps use [`CacheHasher`]: the standard library's
//! `RandomState` by default, `rustc_hash::FxBuildHasher` with feature
//! `fxhash`, `ahash::RandomState` with feature `ahash` (which wins when both
//! are enabled).
//!
//! # Examples
//!
//! ```rust
//! use functools::control::{Continuation, Scheduler};
//! use functools::memoize::MemoizeAsync;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let scheduler = Scheduler::new();
//! let invocations = Rc::new(Cell::new(0));
//!
//! let counter = Rc::clone(&invocations);
//! let lookup = MemoizeAsync::new(
//!     move |name: String, continuation: Continuation<usize, String>| {
//!         counter.set(counter.get() + 1);
//!         continuation.succeed(name.len());
//!     },
//!     scheduler.clone(),
//! );
//!
//! lookup.call("alpha".to_string(), Continuation::new(|outcome| assert!(outcome.is_success())));
//! scheduler.run_until_idle();
//!
//! // Served from the cache.
//! lookup.call("alpha".to_string(), Continuation::new(|outcome| assert!(outcome.is_success())));
//! assert_eq!(invocations.get(), 1);
//! ```

mod coalesce;
mod memo;

pub use coalesce::MemoizeAsync;
pub use memo::Memoize;

/// Hash builder used by the memoizers' internal maps.
#[cfg(feature = "ahash")]
pub type CacheHasher = ahash::RandomState;

/// Hash builder used by the memoizers' internal maps.
#[cfg(all(feature = "fxhash", not(feature = "ahash")))]
pub type CacheHasher = rustc_hash::FxBuildHasher;

/// Hash builder used by the memoizers' internal maps.
#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub type CacheHasher = std::collections::hash_map::RandomState;
