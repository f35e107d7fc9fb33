//! Synchronous memoization.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use super::CacheHasher;

/// A synchronous function whose results are cached by key.
///
/// The cache is not borrowed while the wrapped function runs, so the
/// function may call back into the memoizer. If it does so for the key
/// being computed, the first value stored wins.
///
/// # Examples
///
/// ```rust
/// use functools::memoize::Memoize;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let calls = Rc::new(Cell::new(0));
/// let counter = Rc::clone(&calls);
/// let square = Memoize::new(move |x: u64| {
///     counter.set(counter.get() + 1);
///     x * x
/// });
///
/// assert_eq!(square.call(12), 144);
/// assert_eq!(square.call(12), 144);
/// assert_eq!(calls.get(), 1);
/// ```
///
/// ## Custom keys
///
/// ```rust
/// use functools::memoize::Memoize;
///
/// let length = Memoize::with_key(|word: String| word.len(), |word: &String| word.to_lowercase());
///
/// assert_eq!(length.call("Hello".to_string()), 5);
/// assert!(length.contains_key(&"hello".to_string()));
/// ```
pub struct Memoize<A, R, K = A> {
    function: Box<dyn Fn(A) -> R>,
    key: Box<dyn Fn(&A) -> K>,
    cache: RefCell<HashMap<K, R, CacheHasher>>,
}

impl<A, R> Memoize<A, R, A>
where
    A: Clone + Eq + Hash + 'static,
    R: Clone,
{
    /// Wraps `function`, keying the cache by a clone of the argument.
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(A) -> R + 'static,
    {
        Self::with_key(function, A::clone)
    }
}

impl<A, R, K> Memoize<A, R, K>
where
    K: Eq + Hash,
    R: Clone,
{
    /// Wraps `function`, keying the cache by `key(&args)`.
    pub fn with_key<F, G>(function: F, key: G) -> Self
    where
        F: Fn(A) -> R + 'static,
        G: Fn(&A) -> K + 'static,
    {
        Self {
            function: Box::new(function),
            key: Box::new(key),
            cache: RefCell::new(HashMap::with_hasher(CacheHasher::default())),
        }
    }

    /// Returns the cached result for `args`, computing and storing it on a
    /// miss.
    pub fn call(&self, args: A) -> R {
        let key = (self.key)(&args);
        let cached = self.cache.borrow().get(&key).cloned();
        if let Some(value) = cached {
            return value;
        }

        let value = (self.function)(args);
        self.cache.borrow_mut().entry(key).or_insert(value).clone()
    }

    /// Number of cached results.
    pub fn len(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Returns `true` if nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.cache.borrow().is_empty()
    }

    /// Returns `true` if a result is cached under `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.cache.borrow().contains_key(key)
    }
}

impl<A, R, K> fmt::Debug for Memoize<A, R, K> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Memoize")
            .field("cached", &self.cache.borrow().len())
            .finish_non_exhaustive()
    }
}
