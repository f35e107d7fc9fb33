//! Bridges between continuation-style calls and futures.
//!
//! The combinators in this crate report through callbacks. Inside async
//! code it is often easier to await them:
//!
//! - [`callback_future`]: awaits a plain outer callback (`FnOnce(T)`)
//! - [`continuation_future`]: awaits a [`Continuation`]'s [`Outcome`]
//! - [`spawn_step`]: resumes a continuation from a future on the current
//!   `LocalSet`, turning an `async` computation into a step
//!
//! # Examples
//!
//! ```rust
//! use functools::combinator::map_async;
//! use functools::control::{Continuation, callback_future, spawn_step};
//!
//! # let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
//! # let local = tokio::task::LocalSet::new();
//! # local.block_on(&runtime, async {
//! let squares = callback_future(|done| {
//!     map_async(
//!         |value: i32, continuation: Continuation<i32, String>| {
//!             spawn_step(async move { Ok(value * value) }, continuation);
//!         },
//!         vec![3, 1, 4],
//!         done,
//!     );
//! })
//! .await
//! .unwrap();
//!
//! assert_eq!(squares.unwrap(), vec![9, 1, 16]);
//! # });
//! ```

use std::fmt;
use std::future::Future;

use futures::channel::oneshot;

use super::{Continuation, Outcome};

/// Returned when a callback or continuation is dropped before it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContinuationDropped;

impl fmt::Display for ContinuationDropped {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "continuation dropped before it was resumed")
    }
}

impl std::error::Error for ContinuationDropped {}

/// Awaits the value a callback-style call hands to its callback.
///
/// `start` runs on first poll and receives the callback to pass along.
///
/// # Errors
///
/// Returns [`ContinuationDropped`] if the callback is dropped without being
/// called.
pub fn callback_future<T, F>(start: F) -> impl Future<Output = Result<T, ContinuationDropped>>
where
    T: 'static,
    F: FnOnce(Box<dyn FnOnce(T)>),
{
    async move {
        let (sender, receiver) = oneshot::channel();
        start(Box::new(move |value| {
            let _ = sender.send(value);
        }));
        receiver.await.map_err(|_| ContinuationDropped)
    }
}

/// Awaits the [`Outcome`] delivered to a continuation.
///
/// # Errors
///
/// Returns [`ContinuationDropped`] if the continuation is dropped without
/// being resumed.
pub fn continuation_future<T, E, F>(
    start: F,
) -> impl Future<Output = Result<Outcome<T, E>, ContinuationDropped>>
where
    T: 'static,
    E: 'static,
    F: FnOnce(Continuation<T, E>),
{
    async move {
        let (sender, receiver) = oneshot::channel();
        start(Continuation::new(move |outcome| {
            let _ = sender.send(outcome);
        }));
        receiver.await.map_err(|_| ContinuationDropped)
    }
}

/// Spawns `future` on the current `LocalSet` and resumes `continuation`
/// with its result.
///
/// # Panics
///
/// Panics when called outside a `tokio::task::LocalSet`.
pub fn spawn_step<T, E, F>(future: F, continuation: Continuation<T, E>)
where
    T: 'static,
    E: 'static,
    F: Future<Output = Result<T, E>> + 'static,
{
    drop(tokio::task::spawn_local(async move {
        continuation.complete(future.await);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn continuation_dropped_display() {
        assert_eq!(
            ContinuationDropped.to_string(),
            "continuation dropped before it was resumed"
        );
    }

    #[tokio::test]
    async fn callback_future_resolves_with_the_value() {
        let value = callback_future(|done| done(7)).await;
        assert_eq!(value, Ok(7));
    }

    #[tokio::test]
    async fn dropped_continuation_is_reported() {
        let outcome =
            continuation_future(|continuation: Continuation<i32, String>| drop(continuation)).await;
        assert_eq!(outcome, Err(ContinuationDropped));
    }
}
