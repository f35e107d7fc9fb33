//! Uniform enumeration over sequences and string-keyed mappings.
//!
//! Every combinator in this crate accepts either an ordered sequence or a
//! string-keyed mapping and must hand back a container of the same kind.
//! [`Traverse`] captures the two capabilities that requires:
//!
//! - [`Traverse::into_entries`]: the `(key, value)` pairs in a stable visit order
//! - [`Traverse::assemble`]: a freshly built container of the same shape
//!
//! # Visit Order
//!
//! | Target | Key | Order |
//! |--------|-----|-------|
//! | `Vec<T>`, `VecDeque<T>` | `usize` | ascending index |
//! | `BTreeMap<String, T>` | `String` | ascending key |
//! | `HashMap<String, T>` | `String` | the map's own iteration order |
//!
//! # Examples
//!
//! ```rust
//! use functools::traverse::Traverse;
//! use std::collections::BTreeMap;
//!
//! let entries = vec![3, 1, 4].into_entries();
//! assert_eq!(entries, vec![(0, 3), (1, 1), (2, 4)]);
//!
//! let squares: Vec<i32> = Vec::<i32>::assemble(
//!     entries.into_iter().map(|(key, value)| (key, value * value)).collect(),
//! );
//! assert_eq!(squares, vec![9, 1, 16]);
//!
//! let mapping = BTreeMap::from([("a".to_string(), 3), ("b".to_string(), 1)]);
//! let doubled = BTreeMap::<String, i32>::assemble(
//!     mapping.into_entries().into_iter().map(|(key, value)| (key, value * 2)).collect(),
//! );
//! assert_eq!(doubled["a"], 6);
//! ```

mod mapping;
mod sequence;

use std::fmt::Debug;

/// A traversal target that can be enumerated and rebuilt with the same shape.
///
/// Implementations take the container by value, so a combinator never
/// mutates the caller's container in place. Callers who want to keep the
/// input clone it before handing it over.
///
/// # Laws
///
/// - **Stable order**: `into_entries` yields each key exactly once, in the
///   order documented by the implementation.
/// - **Round trip**: `Self::assemble(target.into_entries())` equals `target`.
/// - **Shape**: `assemble` always produces the same kind of container
///   (sequence in, sequence out; mapping in, mapping out).
pub trait Traverse: Sized {
    /// The key identifying a position in the container.
    type Key: Clone + Debug + 'static;

    /// The element type.
    type Item;

    /// The same container kind holding elements of type `U`.
    type Shape<U>: Traverse<Key = Self::Key, Item = U>;

    /// Consumes the container, returning its entries in visit order.
    fn into_entries(self) -> Vec<(Self::Key, Self::Item)>;

    /// Builds a container of the same shape from entries.
    ///
    /// Sequences are rebuilt in entry order, so a subset of a sequence's
    /// entries becomes a dense sequence preserving relative order.
    /// Mappings are rebuilt by key.
    fn assemble<U>(entries: Vec<(Self::Key, U)>) -> Self::Shape<U>;
}
