//! Memoization with call coalescing for continuation-style functions.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use smallvec::{SmallVec, smallvec};

use super::CacheHasher;
use crate::control::{Continuation, Outcome, Schedule};

type Waiters<R, E> = SmallVec<[Continuation<R, E>; 2]>;

struct Registry<K, R, E> {
    cache: HashMap<K, R, CacheHasher>,
    pending: HashMap<K, Waiters<R, E>, CacheHasher>,
}

struct Shared<A, R, E, K> {
    function: Box<dyn Fn(A, Continuation<R, E>)>,
    key: Box<dyn Fn(&A) -> K>,
    scheduler: Rc<dyn Schedule>,
    registry: RefCell<Registry<K, R, E>>,
}

impl<A, R, E, K> Shared<A, R, E, K>
where
    K: Eq + Hash,
    R: Clone + 'static,
    E: Clone + 'static,
{
    /// Caches a success, then hands a copy of `outcome` to every waiter of
    /// `key` through the scheduler.
    fn settle(&self, key: &K, outcome: Outcome<R, E>)
    where
        K: Clone,
    {
        let waiters = {
            let mut registry = self.registry.borrow_mut();
            if let Outcome::Success(value) = &outcome {
                registry
                    .cache
                    .entry(key.clone())
                    .or_insert_with(|| value.clone());
            }
            registry.pending.remove(key).unwrap_or_default()
        };

        tracing::debug!(
            waiters = waiters.len(),
            success = outcome.is_success(),
            "flushing memoized call"
        );
        for waiter in waiters {
            let outcome = outcome.clone();
            self.scheduler
                .defer(Box::new(move || waiter.resume(outcome)));
        }
    }
}

/// An asynchronous function whose successful results are cached by key,
/// with concurrent calls for the same key coalesced.
///
/// # Behavior
///
/// - A cached key resumes the caller's continuation immediately, before
///   [`call`](Self::call) returns
/// - A key whose first call is still running queues the continuation; the
///   wrapped function is not invoked again
/// - Any other key invokes the wrapped function once
///
/// When the invocation resumes, a success is cached and every queued
/// continuation is resumed, in registration order, from a task posted to the
/// scheduler. Failures are relayed to the waiters but never cached, so the
/// next call for that key invokes the function again.
///
/// `call` has the wrapped function's calling convention, so a clone of the
/// memoizer can serve as a step for the traversal combinators.
///
/// # Examples
///
/// ```rust
/// use functools::control::{Continuation, Outcome, Schedule, Scheduler};
/// use functools::memoize::MemoizeAsync;
/// use std::cell::{Cell, RefCell};
/// use std::rc::Rc;
///
/// let scheduler = Scheduler::new();
/// let invocations = Rc::new(Cell::new(0));
///
/// let counter = Rc::clone(&invocations);
/// let deferred = scheduler.clone();
/// let fetch = MemoizeAsync::new(
///     move |id: u32, continuation: Continuation<String, String>| {
///         counter.set(counter.get() + 1);
///         deferred.defer(Box::new(move || continuation.succeed(format!("user-{id}"))));
///     },
///     scheduler.clone(),
/// );
///
/// let received = Rc::new(RefCell::new(Vec::new()));
/// for _ in 0..3 {
///     let sink = Rc::clone(&received);
///     fetch.call(7, Continuation::new(move |outcome| sink.borrow_mut().push(outcome)));
/// }
///
/// scheduler.run_until_idle();
/// assert_eq!(invocations.get(), 1);
/// assert_eq!(received.borrow().len(), 3);
/// assert_eq!(received.borrow()[0], Outcome::Success("user-7".to_string()));
/// ```
pub struct MemoizeAsync<A, R, E, K = A> {
    shared: Rc<Shared<A, R, E, K>>,
}

impl<A, R, E> MemoizeAsync<A, R, E, A>
where
    A: Clone + Eq + Hash + 'static,
    R: Clone + 'static,
    E: Clone + 'static,
{
    /// Wraps `function`, keying the cache by a clone of the argument and
    /// posting waiter resumptions to `scheduler`.
    pub fn new<F, S>(function: F, scheduler: S) -> Self
    where
        F: Fn(A, Continuation<R, E>) + 'static,
        S: Schedule + 'static,
    {
        Self::with_key(function, A::clone, scheduler)
    }
}

impl<A, R, E, K> MemoizeAsync<A, R, E, K>
where
    A: 'static,
    K: Clone + Eq + Hash + 'static,
    R: Clone + 'static,
    E: Clone + 'static,
{
    /// Wraps `function`, keying the cache by `key(&args)`.
    pub fn with_key<F, G, S>(function: F, key: G, scheduler: S) -> Self
    where
        F: Fn(A, Continuation<R, E>) + 'static,
        G: Fn(&A) -> K + 'static,
        S: Schedule + 'static,
    {
        Self {
            shared: Rc::new(Shared {
                function: Box::new(function),
                key: Box::new(key),
                scheduler: Rc::new(scheduler),
                registry: RefCell::new(Registry {
                    cache: HashMap::with_hasher(CacheHasher::default()),
                    pending: HashMap::with_hasher(CacheHasher::default()),
                }),
            }),
        }
    }

    /// Resolves `continuation` with the result for `args`.
    pub fn call(&self, args: A, continuation: Continuation<R, E>) {
        let key = (self.shared.key)(&args);
        let mut registry = self.shared.registry.borrow_mut();

        if let Some(value) = registry.cache.get(&key) {
            let value = value.clone();
            drop(registry);
            tracing::debug!("memoized result served from cache");
            continuation.succeed(value);
            return;
        }

        if let Some(waiters) = registry.pending.get_mut(&key) {
            waiters.push(continuation);
            tracing::debug!(waiters = waiters.len(), "joined in-flight memoized call");
            return;
        }

        registry.pending.insert(key.clone(), smallvec![continuation]);
        drop(registry);

        tracing::debug!("invoking memoized function");
        let shared = Rc::clone(&self.shared);
        (self.shared.function)(
            args,
            Continuation::new(move |outcome| shared.settle(&key, outcome)),
        );
    }

    /// Number of cached results.
    pub fn len(&self) -> usize {
        self.shared.registry.borrow().cache.len()
    }

    /// Returns `true` if nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.shared.registry.borrow().cache.is_empty()
    }

    /// Returns `true` if a result is cached under `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.shared.registry.borrow().cache.contains_key(key)
    }

    /// Returns `true` while an invocation for `key` has not resumed.
    pub fn is_pending(&self, key: &K) -> bool {
        self.shared.registry.borrow().pending.contains_key(key)
    }
}

impl<A, R, E, K> Clone for MemoizeAsync<A, R, E, K> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<A, R, E, K> fmt::Debug for MemoizeAsync<A, R, E, K> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.shared.registry.borrow();
        formatter
            .debug_struct("MemoizeAsync")
            .field("cached", &registry.cache.len())
            .field("pending", &registry.pending.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::Scheduler;
    use rstest::{fixture, rstest};
    use std::cell::Cell;

    type Received = Rc<RefCell<Vec<(usize, Outcome<i32, String>)>>>;

    #[fixture]
    fn scheduler() -> Scheduler {
        Scheduler::new()
    }

    fn record(received: &Received, caller: usize) -> Continuation<i32, String> {
        let sink = Rc::clone(received);
        Continuation::new(move |outcome| sink.borrow_mut().push((caller, outcome)))
    }

    #[rstest]
    fn synchronous_function_still_defers_waiters(scheduler: Scheduler) {
        let memo = MemoizeAsync::new(
            |x: i32, continuation: Continuation<i32, String>| continuation.succeed(x + 1),
            scheduler.clone(),
        );
        let received = Received::default();

        memo.call(1, record(&received, 0));
        assert!(received.borrow().is_empty());
        assert!(memo.contains_key(&1));
        assert!(!memo.is_pending(&1));

        assert_eq!(scheduler.run_until_idle(), 1);
        assert_eq!(*received.borrow(), vec![(0, Outcome::Success(2))]);
    }

    #[rstest]
    fn cache_hit_resumes_before_call_returns(scheduler: Scheduler) {
        let memo = MemoizeAsync::new(
            |x: i32, continuation: Continuation<i32, String>| continuation.succeed(x * 10),
            scheduler.clone(),
        );
        let received = Received::default();
        memo.call(3, record(&received, 0));
        scheduler.run_until_idle();

        memo.call(3, record(&received, 1));
        assert_eq!(received.borrow().last(), Some(&(1, Outcome::Success(30))));
        assert!(scheduler.is_idle());
    }

    #[rstest]
    fn waiters_resume_in_registration_order(scheduler: Scheduler) {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let deferred = scheduler.clone();
        let memo = MemoizeAsync::new(
            move |x: i32, continuation: Continuation<i32, String>| {
                counter.set(counter.get() + 1);
                deferred.defer(Box::new(move || continuation.succeed(x)));
            },
            scheduler.clone(),
        );
        let received = Received::default();

        for caller in 0..4 {
            memo.call(5, record(&received, caller));
        }
        assert!(memo.is_pending(&5));

        scheduler.run_until_idle();
        let order: Vec<usize> = received.borrow().iter().map(|(caller, _)| *caller).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
        assert_eq!(calls.get(), 1);
    }

    #[rstest]
    fn failure_is_relayed_with_its_value_and_not_cached(scheduler: Scheduler) {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let memo = MemoizeAsync::new(
            move |x: i32, continuation: Continuation<i32, String>| {
                counter.set(counter.get() + 1);
                continuation.fail_with("flaky".to_string(), x);
            },
            scheduler.clone(),
        );
        let received = Received::default();

        memo.call(9, record(&received, 0));
        scheduler.run_until_idle();
        memo.call(9, record(&received, 1));
        scheduler.run_until_idle();

        assert_eq!(calls.get(), 2);
        assert!(memo.is_empty());
        assert_eq!(
            received.borrow()[1],
            (1, Outcome::failure_with("flaky".to_string(), 9))
        );
    }
}
