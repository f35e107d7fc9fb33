//! One-shot continuations for callback-driven asynchronous steps.
//!
//! An asynchronous step reports completion by resuming the [`Continuation`]
//! it was handed. The payload is an [`Outcome`]: either a success value, or
//! an error that may still carry a value produced before the failure.
//!
//! A continuation may be resumed synchronously, before the step that
//! received it returns, or later from any deferred context (a
//! [`Scheduler`](super::Scheduler) task, a tokio task, a timer). Resuming
//! consumes it, so it can never fire twice.
//!
//! # Examples
//!
//! ```rust
//! use functools::control::{Continuation, Outcome};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let seen = Rc::new(RefCell::new(None));
//! let sink = Rc::clone(&seen);
//! let continuation: Continuation<i32, String> =
//!     Continuation::new(move |outcome| *sink.borrow_mut() = Some(outcome));
//!
//! continuation.succeed(42);
//! assert_eq!(*seen.borrow(), Some(Outcome::Success(42)));
//! ```

use std::convert::Infallible;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The payload a step delivers through its continuation.
///
/// `Failure` optionally carries a value. Traversal combinators still record
/// that value at the failing position before halting.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Outcome<T, E> {
    /// The step completed and produced a value.
    Success(T),
    /// The step failed, possibly after producing a value.
    Failure {
        /// The error reported by the step.
        error: E,
        /// A value produced alongside the error, if any.
        value: Option<T>,
    },
}

impl<T, E> Outcome<T, E> {
    /// Creates a failure carrying no value.
    #[inline]
    pub const fn failure(error: E) -> Self {
        Self::Failure { error, value: None }
    }

    /// Creates a failure carrying a value produced before the error.
    #[inline]
    pub const fn failure_with(error: E, value: T) -> Self {
        Self::Failure {
            error,
            value: Some(value),
        }
    }

    /// Returns `true` for [`Outcome::Success`].
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns the error, if this is a failure.
    #[inline]
    pub const fn error(&self) -> Option<&E> {
        match self {
            Self::Success(_) => None,
            Self::Failure { error, .. } => Some(error),
        }
    }

    /// Returns the carried value, whether the step succeeded or not.
    ///
    /// ```rust
    /// use functools::control::Outcome;
    ///
    /// assert_eq!(Outcome::<i32, &str>::Success(1).value(), Some(1));
    /// assert_eq!(Outcome::<i32, &str>::failure_with("boom", 9).value(), Some(9));
    /// assert_eq!(Outcome::<i32, &str>::failure("boom").value(), None);
    /// ```
    #[inline]
    pub fn value(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure { value, .. } => value,
        }
    }

    /// Converts into a `Result`, dropping any value carried by a failure.
    #[inline]
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure { error, .. } => Err(error),
        }
    }

    /// Maps the carried value, leaving the error untouched.
    pub fn map<U, F>(self, function: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Success(value) => Outcome::Success(function(value)),
            Self::Failure { error, value } => Outcome::Failure {
                error,
                value: value.map(function),
            },
        }
    }
}

impl<T> Outcome<T, Infallible> {
    /// Extracts the value of an outcome that cannot fail.
    #[inline]
    pub fn into_value(self) -> T {
        match self {
            Self::Success(value) => value,
            Self::Failure { error, .. } => match error {},
        }
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(error) => Self::failure(error),
        }
    }
}

type Resumption<T, E> = Box<dyn FnOnce(Outcome<T, E>)>;

/// A one-shot callback that receives a step's [`Outcome`].
///
/// # Type Parameters
///
/// * `T` - The value the step produces
/// * `E` - The error the step may report (defaults to [`Infallible`] for
///   steps with no error channel, such as filter predicates)
///
/// # Contract
///
/// Every continuation handed to a step must be resumed exactly once. The
/// type system rules out resuming twice. Dropping one without resuming it
/// leaves whatever waits on it pending forever; this is logged at `warn`.
pub struct Continuation<T, E = Infallible> {
    resumption: Option<Resumption<T, E>>,
}

impl<T, E> Continuation<T, E> {
    /// Wraps a callback as a continuation.
    pub fn new<F>(callback: F) -> Self
    where
        F: FnOnce(Outcome<T, E>) + 'static,
    {
        Self {
            resumption: Some(Box::new(callback)),
        }
    }

    /// Resumes with the given outcome.
    pub fn resume(mut self, outcome: Outcome<T, E>) {
        if let Some(resumption) = self.resumption.take() {
            resumption(outcome);
        }
    }

    /// Resumes with a success value.
    #[inline]
    pub fn succeed(self, value: T) {
        self.resume(Outcome::Success(value));
    }

    /// Resumes with an error and no value.
    #[inline]
    pub fn fail(self, error: E) {
        self.resume(Outcome::failure(error));
    }

    /// Resumes with an error and the value produced before it.
    #[inline]
    pub fn fail_with(self, error: E, value: T) {
        self.resume(Outcome::failure_with(error, value));
    }

    /// Resumes from a `Result`.
    #[inline]
    pub fn complete(self, result: Result<T, E>) {
        self.resume(result.into());
    }
}

impl<T, E> Drop for Continuation<T, E> {
    fn drop(&mut self) {
        if self.resumption.is_some() {
            tracing::warn!(
                "continuation dropped without being resumed; its waiter will never complete"
            );
        }
    }
}

impl<T, E> fmt::Debug for Continuation<T, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Continuation")
            .field("resumed", &self.resumption.is_none())
            .finish()
    }
}
