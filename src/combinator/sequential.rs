//! Sequential asynchronous traversals.
//!
//! Each combinator here is the sequential driver specialized with its own
//! accumulation policy. All of them:
//!
//! - invoke the step once per element, in [`Traverse`] order
//! - never start the next step before the current one has resumed
//! - accept steps that resume synchronously or later
//! - call the outer callback exactly once
//!
//! Every combinator except [`filter_async`] is fail-fast. The first failure
//! stops the traversal, and the callback receives the error together with
//! the output accumulated so far.

use std::collections::VecDeque;
use std::convert::Infallible;
use std::marker::PhantomData;
use std::ops::ControlFlow;

use super::{Halted, Slot};
use crate::control::driver::{Policy, drive};
use crate::control::{Continuation, Outcome};
use crate::traverse::Traverse;

/// What [`map_async`] hands to its callback.
///
/// On success, the mapped container. On failure, the error and a container
/// of [`Slot`]s: mapped up to the failing position, original after it.
pub type MapResult<C, U, E> = Result<
    <C as Traverse>::Shape<U>,
    Halted<E, <C as Traverse>::Shape<Slot<<C as Traverse>::Item, U>>>,
>;

/// What [`fold_async`], [`reduce_async`] and pipelines hand to their callback.
pub type FoldResult<A, E> = Result<A, Halted<E, A>>;

type Entries<C> = VecDeque<(<C as Traverse>::Key, <C as Traverse>::Item)>;

fn values<C: Traverse>(target: C) -> std::vec::IntoIter<C::Item> {
    target
        .into_entries()
        .into_iter()
        .map(|(_, value)| value)
        .collect::<Vec<_>>()
        .into_iter()
}

// =============================================================================
// each_async
// =============================================================================

struct EachPolicy<T, E> {
    pending: std::vec::IntoIter<T>,
    _error: PhantomData<fn() -> E>,
}

impl<T: 'static, E: 'static> Policy for EachPolicy<T, E> {
    type Input = T;
    type Output = ();
    type Error = E;
    type Finished = Result<(), E>;

    fn next(&mut self) -> Option<T> {
        self.pending.next()
    }

    fn record(&mut self, outcome: Outcome<(), E>) -> ControlFlow<E> {
        match outcome {
            Outcome::Success(()) => ControlFlow::Continue(()),
            Outcome::Failure { error, .. } => ControlFlow::Break(error),
        }
    }

    fn finish(self, halt: Option<E>) -> Result<(), E> {
        halt.map_or(Ok(()), Err)
    }
}

/// Runs `step` once per element, for its effects only.
///
/// # Examples
///
/// ```rust
/// use functools::combinator::each_async;
/// use functools::control::Continuation;
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&seen);
/// each_async(
///     move |value: i32, continuation: Continuation<(), String>| {
///         sink.borrow_mut().push(value);
///         continuation.succeed(());
///     },
///     vec![3, 1, 4],
///     |result| assert_eq!(result, Ok(())),
/// );
/// assert_eq!(*seen.borrow(), vec![3, 1, 4]);
/// ```
pub fn each_async<C, E, S, D>(step: S, target: C, callback: D)
where
    C: Traverse,
    C::Item: 'static,
    E: 'static,
    S: FnMut(C::Item, Continuation<(), E>) + 'static,
    D: FnOnce(Result<(), E>) + 'static,
{
    let policy = EachPolicy {
        pending: values(target),
        _error: PhantomData,
    };
    drive(policy, step, callback);
}

/// Runs `step` once per element without an outer callback.
///
/// Same traversal as [`each_async`]: one step at a time, stopping at the
/// first failure. The outcome itself is dropped; it is only logged.
///
/// # Examples
///
/// ```rust
/// use functools::combinator::each_async_detached;
/// use functools::control::Continuation;
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&seen);
/// each_async_detached(
///     move |value: i32, continuation: Continuation<(), String>| {
///         sink.borrow_mut().push(value);
///         continuation.succeed(());
///     },
///     vec![3, 1, 4],
/// );
/// assert_eq!(*seen.borrow(), vec![3, 1, 4]);
/// ```
pub fn each_async_detached<C, E, S>(step: S, target: C)
where
    C: Traverse,
    C::Item: 'static,
    E: 'static,
    S: FnMut(C::Item, Continuation<(), E>) + 'static,
{
    each_async(step, target, |result: Result<(), E>| {
        tracing::debug!(halted = result.is_err(), "detached traversal finished");
    });
}

// =============================================================================
// map_async
// =============================================================================

struct MapPolicy<C: Traverse, U, E> {
    pending: Entries<C>,
    current: Option<(C::Key, C::Item)>,
    settled: Vec<(C::Key, U)>,
    failed: Option<(C::Key, Slot<C::Item, U>)>,
    _error: PhantomData<fn() -> E>,
}

impl<C, U, E> Policy for MapPolicy<C, U, E>
where
    C: Traverse + 'static,
    C::Item: Clone + 'static,
    U: 'static,
    E: 'static,
{
    type Input = C::Item;
    type Output = U;
    type Error = E;
    type Finished = MapResult<C, U, E>;

    fn next(&mut self) -> Option<C::Item> {
        let (key, original) = self.pending.pop_front()?;
        let input = original.clone();
        self.current = Some((key, original));
        Some(input)
    }

    fn record(&mut self, outcome: Outcome<U, E>) -> ControlFlow<E> {
        let Some((key, original)) = self.current.take() else {
            return ControlFlow::Continue(());
        };
        match outcome {
            Outcome::Success(mapped) => {
                self.settled.push((key, mapped));
                ControlFlow::Continue(())
            }
            Outcome::Failure { error, value } => {
                let slot = value.map_or(Slot::Original(original), Slot::Mapped);
                self.failed = Some((key, slot));
                ControlFlow::Break(error)
            }
        }
    }

    fn finish(self, halt: Option<E>) -> MapResult<C, U, E> {
        let Some(error) = halt else {
            return Ok(C::assemble(self.settled));
        };
        let mut entries: Vec<(C::Key, Slot<C::Item, U>)> = self
            .settled
            .into_iter()
            .map(|(key, mapped)| (key, Slot::Mapped(mapped)))
            .collect();
        entries.extend(self.failed);
        entries.extend(
            self.pending
                .into_iter()
                .map(|(key, original)| (key, Slot::Original(original))),
        );
        Err(Halted {
            error,
            partial: C::assemble(entries),
        })
    }
}

/// Maps every element through an asynchronous step into a container of the
/// same shape.
///
/// Each step receives a clone of its element; the original is kept so a
/// halted traversal can report it.
///
/// # Halting
///
/// If the step at position `k` fails, no later step runs and the callback
/// receives `Err(Halted { error, partial })` where `partial` holds:
///
/// - `Slot::Mapped` for every position before `k`
/// - `Slot::Mapped(value)` at `k` if the failing step supplied a value,
///   `Slot::Original` otherwise
/// - `Slot::Original` for every position after `k`
///
/// # Examples
///
/// ```rust
/// use functools::combinator::{Halted, Slot, map_async};
/// use functools::control::Continuation;
///
/// map_async(
///     |value: i32, continuation: Continuation<i32, &'static str>| {
///         continuation.succeed(value * value);
///     },
///     vec![3, 1, 4],
///     |result| assert_eq!(result, Ok(vec![9, 1, 16])),
/// );
///
/// map_async(
///     |_: i32, continuation: Continuation<i32, &'static str>| continuation.fail_with("foobar", 9),
///     vec![3, 1, 4],
///     |result| {
///         assert_eq!(
///             result,
///             Err(Halted {
///                 error: "foobar",
///                 partial: vec![Slot::Mapped(9), Slot::Original(1), Slot::Original(4)],
///             })
///         );
///     },
/// );
/// ```
pub fn map_async<C, U, E, S, D>(step: S, target: C, callback: D)
where
    C: Traverse + 'static,
    C::Item: Clone + 'static,
    U: 'static,
    E: 'static,
    S: FnMut(C::Item, Continuation<U, E>) + 'static,
    D: FnOnce(MapResult<C, U, E>) + 'static,
{
    let policy = MapPolicy::<C, U, E> {
        pending: target.into_entries().into(),
        current: None,
        settled: Vec::new(),
        failed: None,
        _error: PhantomData,
    };
    drive(policy, step, callback);
}

// =============================================================================
// filter_async
// =============================================================================

struct FilterPolicy<C: Traverse> {
    pending: Entries<C>,
    current: Option<(C::Key, C::Item)>,
    kept: Vec<(C::Key, C::Item)>,
}

impl<C> Policy for FilterPolicy<C>
where
    C: Traverse + 'static,
    C::Item: Clone + 'static,
{
    type Input = C::Item;
    type Output = bool;
    type Error = Infallible;
    type Finished = C::Shape<C::Item>;

    fn next(&mut self) -> Option<C::Item> {
        let (key, original) = self.pending.pop_front()?;
        let input = original.clone();
        self.current = Some((key, original));
        Some(input)
    }

    fn record(&mut self, outcome: Outcome<bool, Infallible>) -> ControlFlow<Infallible> {
        let keep = outcome.into_value();
        if let Some(entry) = self.current.take().filter(|_| keep) {
            self.kept.push(entry);
        }
        ControlFlow::Continue(())
    }

    fn finish(self, _halt: Option<Infallible>) -> C::Shape<C::Item> {
        C::assemble(self.kept)
    }
}

/// Keeps the elements whose asynchronous predicate resumes with `true`.
///
/// The predicate has no error channel. Kept elements stay in their original
/// relative order. A sequence yields a dense sequence; a mapping yields a
/// mapping of the kept entries.
///
/// # Examples
///
/// ```rust
/// use functools::combinator::filter_async;
/// use functools::control::Continuation;
///
/// filter_async(
///     |value: i32, continuation: Continuation<bool>| continuation.succeed(value % 2 == 0),
///     vec![3, 1, 4, 1, 5, 9],
///     |evens| assert_eq!(evens, vec![4]),
/// );
/// ```
pub fn filter_async<C, S, D>(step: S, target: C, callback: D)
where
    C: Traverse + 'static,
    C::Item: Clone + 'static,
    S: FnMut(C::Item, Continuation<bool>) + 'static,
    D: FnOnce(C::Shape<C::Item>) + 'static,
{
    let policy = FilterPolicy::<C> {
        pending: target.into_entries().into(),
        current: None,
        kept: Vec::new(),
    };
    drive(policy, step, callback);
}

// =============================================================================
// fold_async / reduce_async
// =============================================================================

/// What a fold reports when a step fails with a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum OnFailure {
    /// Report the last accumulator a step produced successfully.
    KeepLastSuccess,
    /// Report the failing step's value when it supplied one.
    KeepFailingValue,
}

struct FoldPolicy<T, A, E> {
    pending: std::vec::IntoIter<T>,
    accumulator: A,
    on_failure: OnFailure,
    _error: PhantomData<fn() -> E>,
}

impl<T, A, E> Policy for FoldPolicy<T, A, E>
where
    T: 'static,
    A: Clone + 'static,
    E: 'static,
{
    type Input = (A, T);
    type Output = A;
    type Error = E;
    type Finished = FoldResult<A, E>;

    fn next(&mut self) -> Option<(A, T)> {
        let value = self.pending.next()?;
        Some((self.accumulator.clone(), value))
    }

    fn record(&mut self, outcome: Outcome<A, E>) -> ControlFlow<E> {
        match outcome {
            Outcome::Success(accumulator) => {
                self.accumulator = accumulator;
                ControlFlow::Continue(())
            }
            Outcome::Failure { error, value } => {
                if let (OnFailure::KeepFailingValue, Some(accumulator)) = (self.on_failure, value) {
                    self.accumulator = accumulator;
                }
                ControlFlow::Break(error)
            }
        }
    }

    fn finish(self, halt: Option<E>) -> FoldResult<A, E> {
        match halt {
            None => Ok(self.accumulator),
            Some(error) => Err(Halted {
                error,
                partial: self.accumulator,
            }),
        }
    }
}

pub(super) fn fold_values<T, A, E, S, D>(
    mut step: S,
    pending: std::vec::IntoIter<T>,
    seed: A,
    on_failure: OnFailure,
    callback: D,
) where
    T: 'static,
    A: Clone + 'static,
    E: 'static,
    S: FnMut(A, T, Continuation<A, E>) + 'static,
    D: FnOnce(FoldResult<A, E>) + 'static,
{
    let policy = FoldPolicy {
        pending,
        accumulator: seed,
        on_failure,
        _error: PhantomData,
    };
    drive(
        policy,
        move |(accumulator, value): (A, T), continuation: Continuation<A, E>| {
            step(accumulator, value, continuation);
        },
        callback,
    );
}

/// Folds the elements into an accumulator, starting from `seed`.
///
/// An empty target resolves with `seed` without calling the step.
///
/// # Halting
///
/// On failure the callback receives the error and the last accumulator a
/// step produced successfully, or `seed` if none did. A value the failing
/// step supplied alongside its error is discarded.
///
/// # Examples
///
/// ```rust
/// use functools::combinator::fold_async;
/// use functools::control::Continuation;
///
/// fold_async(
///     |total: i32, value: i32, continuation: Continuation<i32, String>| {
///         continuation.succeed(total + value);
///     },
///     vec![3, 1, 4],
///     10,
///     |result| assert_eq!(result, Ok(18)),
/// );
/// ```
pub fn fold_async<C, A, E, S, D>(step: S, target: C, seed: A, callback: D)
where
    C: Traverse,
    C::Item: 'static,
    A: Clone + 'static,
    E: 'static,
    S: FnMut(A, C::Item, Continuation<A, E>) + 'static,
    D: FnOnce(FoldResult<A, E>) + 'static,
{
    fold_values(step, values(target), seed, OnFailure::KeepLastSuccess, callback);
}

/// Folds the elements using the first one as the initial accumulator.
///
/// The step is first called with the first and second elements.
///
/// # Halting
///
/// Same as [`fold_async`]: the callback receives the error and the last
/// accumulator produced successfully, which is the first element if the very
/// first fold step fails.
///
/// # Panics
///
/// Panics if `target` is empty. Use [`fold_async`] with an explicit seed
/// when the target may be empty.
///
/// # Examples
///
/// ```rust
/// use functools::combinator::reduce_async;
/// use functools::control::Continuation;
///
/// reduce_async(
///     |product: i32, value: i32, continuation: Continuation<i32, String>| {
///         continuation.succeed(product * value);
///     },
///     vec![3, 1, 4, 1, 5, 9],
///     |result| assert_eq!(result, Ok(540)),
/// );
/// ```
pub fn reduce_async<C, E, S, D>(step: S, target: C, callback: D)
where
    C: Traverse,
    C::Item: Clone + 'static,
    E: 'static,
    S: FnMut(C::Item, C::Item, Continuation<C::Item, E>) + 'static,
    D: FnOnce(FoldResult<C::Item, E>) + 'static,
{
    let mut pending = values(target);
    let Some(seed) = pending.next() else {
        panic!("reduce_async requires a non-empty target");
    };
    fold_values(step, pending, seed, OnFailure::KeepLastSuccess, callback);
}
