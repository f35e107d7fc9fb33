//! Asynchronous composition and juxtaposition.
//!
//! - [`Pipeline`]: chains asynchronous unary steps; the output of step `i`
//!   is the input of step `i + 1`
//! - [`JuxtAsync`]: applies every function of a list or string-keyed map to
//!   the same arguments and collects the results in the same shape
//!
//! Both reuse the sequential traversals: a pipeline folds over its steps
//! like [`fold_async`](super::fold_async), and a juxtaposition is
//! [`map_async`] over its functions. The
//! functions are therefore invoked one at a time, in order.

use std::fmt;
use std::rc::Rc;

use super::sequential::{OnFailure, fold_values};
use super::{FoldResult, Halted, MapResult, map_async};
use crate::control::Continuation;
use crate::traverse::Traverse;

/// A shared asynchronous function taking `A` and resuming with `R` or `E`.
pub type AsyncFn<A, R, E> = Rc<dyn Fn(A, Continuation<R, E>)>;

/// Wraps a closure as an [`AsyncFn`].
///
/// ```rust
/// use functools::combinator::{AsyncFn, async_fn};
/// use functools::control::Continuation;
///
/// let double: AsyncFn<i32, i32, String> =
///     async_fn(|value: i32, continuation: Continuation<i32, String>| {
///         continuation.succeed(value * 2);
///     });
/// ```
pub fn async_fn<A, R, E, F>(function: F) -> AsyncFn<A, R, E>
where
    F: Fn(A, Continuation<R, E>) + 'static,
{
    Rc::new(function)
}

// =============================================================================
// Pipeline
// =============================================================================

/// Asynchronous left-to-right composition of unary steps.
///
/// # Halting
///
/// The first failing step stops the chain; later steps never run. The
/// callback receives the error and the value at the failure: the one the
/// failing step supplied, or else the one it was given.
///
/// # Examples
///
/// ```rust
/// use functools::combinator::Pipeline;
/// use functools::control::Continuation;
///
/// fn increment(amount: i32) -> impl Fn(i32, Continuation<i32, String>) {
///     move |value, continuation| continuation.succeed(value + amount)
/// }
///
/// let pipeline = Pipeline::new().then(increment(1)).then(increment(2)).then(increment(3));
/// pipeline.call(10, |result| assert_eq!(result, Ok(16)));
/// ```
pub struct Pipeline<T, E> {
    steps: Vec<AsyncFn<T, T, E>>,
}

impl<T, E> Pipeline<T, E>
where
    T: Clone + 'static,
    E: 'static,
{
    /// Creates an empty pipeline, which resolves with its input.
    #[must_use]
    pub const fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Appends a step.
    #[must_use]
    pub fn then<F>(mut self, step: F) -> Self
    where
        F: Fn(T, Continuation<T, E>) + 'static,
    {
        self.steps.push(Rc::new(step));
        self
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` if the pipeline has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Feeds `input` through every step and hands the final value to
    /// `callback`.
    pub fn call<D>(&self, input: T, callback: D)
    where
        D: FnOnce(FoldResult<T, E>) + 'static,
    {
        fold_values(
            |value: T, step: AsyncFn<T, T, E>, continuation: Continuation<T, E>| {
                (*step)(value, continuation);
            },
            self.steps.clone().into_iter(),
            input,
            OnFailure::KeepFailingValue,
            callback,
        );
    }
}

impl<T, E> Default for Pipeline<T, E>
where
    T: Clone + 'static,
    E: 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> Clone for Pipeline<T, E> {
    fn clone(&self) -> Self {
        Self {
            steps: self.steps.clone(),
        }
    }
}

impl<T, E> fmt::Debug for Pipeline<T, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Pipeline")
            .field("steps", &self.steps.len())
            .finish()
    }
}

// =============================================================================
// JuxtAsync
// =============================================================================

/// What [`JuxtAsync::call`] hands to its callback.
///
/// On failure, `partial` holds `Some(result)` for every function that
/// produced one (including a failing function that supplied a value) and
/// `None` elsewhere.
pub type JuxtResult<C, R, E> =
    Result<<C as Traverse>::Shape<R>, Halted<E, <C as Traverse>::Shape<Option<R>>>>;

/// Applies a collection of asynchronous functions to the same arguments.
///
/// The collection is a list (`Vec<AsyncFn<..>>`) or a string-keyed map
/// (`HashMap<String, AsyncFn<..>>`, `BTreeMap<String, AsyncFn<..>>`); the
/// result has the same shape.
///
/// # Examples
///
/// ```rust
/// use functools::combinator::{JuxtAsync, async_fn};
/// use functools::control::Continuation;
/// use std::collections::BTreeMap;
///
/// let stats = JuxtAsync::new(BTreeMap::from([
///     ("cube".to_string(), async_fn(|x: i32, k: Continuation<i32, String>| k.succeed(x * x * x))),
///     ("sum".to_string(), async_fn(|x: i32, k: Continuation<i32, String>| k.succeed(x + x))),
/// ]));
///
/// stats.call(2, |result| {
///     let result = result.unwrap();
///     assert_eq!(result["cube"], 8);
///     assert_eq!(result["sum"], 4);
/// });
/// ```
#[derive(Clone)]
pub struct JuxtAsync<C> {
    functions: C,
}

impl<C> JuxtAsync<C> {
    /// Wraps a list or map of asynchronous functions.
    pub const fn new(functions: C) -> Self {
        Self { functions }
    }

    /// Calls every function with a clone of `args`, one after another, and
    /// hands the collected results to `callback`.
    pub fn call<A, R, E, D>(&self, args: A, callback: D)
    where
        C: Traverse<Item = AsyncFn<A, R, E>> + Clone + 'static,
        A: Clone + 'static,
        R: 'static,
        E: 'static,
        D: FnOnce(JuxtResult<C, R, E>) + 'static,
    {
        map_async(
            move |function: AsyncFn<A, R, E>, continuation: Continuation<R, E>| {
                (*function)(args.clone(), continuation);
            },
            self.functions.clone(),
            move |result: MapResult<C, R, E>| {
                callback(result.map_err(|halted| {
                    halted.map_partial(|partial| {
                        C::assemble(
                            partial
                                .into_entries()
                                .into_iter()
                                .map(|(key, slot)| (key, slot.mapped()))
                                .collect(),
                        )
                    })
                }));
            },
        );
    }
}

impl<C> fmt::Debug for JuxtAsync<C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("JuxtAsync").finish_non_exhaustive()
    }
}
