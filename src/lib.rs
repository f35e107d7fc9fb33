//! # functools
//!
//! Sequential combinators for continuation-style asynchronous functions, and
//! a memoizer that coalesces concurrent calls.
//!
//! ## Overview
//!
//! An asynchronous step here is a function that receives a value and a
//! one-shot [`Continuation`](control::Continuation), and resumes it with a
//! result now or later. The crate provides:
//!
//! - **Traversal**: a `Traverse` trait so lists and string-keyed maps are
//!   walked in a stable order and rebuilt in the same shape
//! - **Control**: continuations, outcomes, deferred task scheduling, and a
//!   stack-safe sequential driver
//! - **Combinators**: `each_async`, `map_async`, `filter_async`,
//!   `fold_async`, `reduce_async`, `Pipeline` (`compose_async!`) and
//!   `JuxtAsync` (`juxt_async!`), with synchronous counterparts
//! - **Memoization**: `Memoize`, and `MemoizeAsync`, which runs a function
//!   at most once per key while the call is in flight
//!
//! ## Feature Flags
//!
//! - `traverse`: the `Traverse` trait and its collection impls
//! - `control`: continuations and schedulers
//! - `combinator`: sequential combinators (implies `traverse`, `control`)
//! - `memoize`: memoizers (implies `control`)
//! - `async`: tokio and futures interop
//! - `serde`: `Serialize`/`Deserialize` for outcomes and partial results
//! - `fxhash` / `ahash`: alternative hashers for memoizer caches
//! - `full`: everything except the alternative hashers
//!
//! ## Example
//!
//! ```rust
//! use functools::prelude::*;
//!
//! let product = |accumulator: i32, value: i32, continuation: Continuation<i32, String>| {
//!     continuation.succeed(accumulator * value);
//! };
//!
//! reduce_async(product, vec![3, 1, 4, 1, 5, 9], |result| assert_eq!(result, Ok(540)));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the public surface of every enabled module.
///
/// # Usage
///
/// ```rust
/// use functools::prelude::*;
/// ```
pub mod prelude {

    #[cfg(feature = "traverse")]
    pub use crate::traverse::*;

    #[cfg(feature = "control")]
    pub use crate::control::*;

    #[cfg(feature = "combinator")]
    pub use crate::combinator::*;

    #[cfg(feature = "memoize")]
    pub use crate::memoize::*;
}

#[cfg(feature = "traverse")]
pub mod traverse;

#[cfg(feature = "control")]
pub mod control;

#[cfg(feature = "combinator")]
pub mod combinator;

#[cfg(feature = "memoize")]
pub mod memoize;
