//! Partial results of fail-fast traversals.

use std::error::Error;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A traversal stopped by a step error, together with the output
/// accumulated up to and including the failing position.
///
/// # Examples
///
/// ```rust
/// use functools::combinator::Halted;
///
/// let halted = Halted { error: "disk full", partial: vec![1, 2] };
/// assert_eq!(halted.to_string(), "traversal halted: disk full");
///
/// let counted = halted.map_partial(|partial| partial.len());
/// assert_eq!(counted.partial, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Halted<E, P> {
    /// The error reported by the failing step, forwarded verbatim.
    pub error: E,
    /// The output accumulated before the traversal halted.
    pub partial: P,
}

impl<E, P> Halted<E, P> {
    /// Transforms the partial output.
    pub fn map_partial<Q, F>(self, function: F) -> Halted<E, Q>
    where
        F: FnOnce(P) -> Q,
    {
        Halted {
            error: self.error,
            partial: function(self.partial),
        }
    }

    /// Discards the partial output.
    pub fn into_error(self) -> E {
        self.error
    }
}

impl<E: fmt::Display, P> fmt::Display for Halted<E, P> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "traversal halted: {}", self.error)
    }
}

impl<E, P> Error for Halted<E, P>
where
    E: Error + 'static,
    P: fmt::Debug,
{
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}

/// One position of a partially mapped container.
///
/// Positions visited before the failure are `Mapped`. So is the failing
/// position when its step supplied a value. Every other position keeps its
/// `Original` input value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Slot<T, U> {
    /// The input value, untouched.
    Original(T),
    /// The value the step produced.
    Mapped(U),
}

impl<T, U> Slot<T, U> {
    /// Returns `true` for [`Slot::Mapped`].
    #[inline]
    pub const fn is_mapped(&self) -> bool {
        matches!(self, Self::Mapped(_))
    }

    /// Returns the mapped value, if any.
    #[inline]
    pub fn mapped(self) -> Option<U> {
        match self {
            Self::Original(_) => None,
            Self::Mapped(value) => Some(value),
        }
    }

    /// Returns the original value, if the position was never mapped.
    #[inline]
    pub fn original(self) -> Option<T> {
        match self {
            Self::Original(value) => Some(value),
            Self::Mapped(_) => None,
        }
    }
}

impl<T> Slot<T, T> {
    /// Returns the held value regardless of which side it is on.
    #[inline]
    pub fn into_inner(self) -> T {
        match self {
            Self::Original(value) | Self::Mapped(value) => value,
        }
    }
}
