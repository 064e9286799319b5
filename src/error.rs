//! Error types shared by every monadic wrapper.
//!
//! A single [`Error`] enum covers construction errors, access errors and
//! errors raised by caller-supplied functions. It is `Clone + Eq + Hash` so
//! that it can travel inside a [`Value::Error`](crate::value::Value::Error)
//! payload and be held by a [`FTry::Failure`](crate::monad::FTry::Failure).

use crate::value::Key;

/// Errors produced by the monadic wrappers, the match engine and collections.
///
/// # Examples
///
/// ```rust
/// use monadic::Error;
///
/// let error = Error::raised("boom");
/// assert_eq!(format!("{error}"), "boom");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
pub enum Error {
    /// The value of an empty variant (`None`) was read.
    #[error("None has no value")]
    ValueAccess,

    /// A `Success` was constructed from an error value.
    #[error("cannot construct Success with an error value")]
    SuccessFromError,

    /// A collection element does not satisfy the collection's type tag.
    #[error("value {key} is not a {expected}")]
    TypeMismatch {
        /// Key of the offending element.
        key: Key,
        /// Name of the expected type tag.
        expected: String,
    },

    /// A collection with no non-null element was created without a type tag.
    #[error("cannot infer the element type of a collection without a non-null value")]
    UntypedCollection,

    /// An explicit collection type tag could not be resolved.
    #[error("unknown type tag: {0}")]
    UnknownTypeTag(String),

    /// No integer key follows the largest one present.
    #[error("cannot append: the next integer key overflows")]
    KeyOverflow,

    /// A `Map` was given a non-string key.
    #[error("value is not a hashed array: key {key} is not a string")]
    NonStringKey {
        /// The offending key.
        key: Key,
    },

    /// A value cannot be turned into a collection key.
    #[error("value at {key} cannot be used as a key")]
    NotAKey {
        /// Key of the offending element.
        key: Key,
    },

    /// A function was invoked with fewer arguments than it declares.
    #[error("function expects {expected} argument(s), {actual} given")]
    Arity {
        /// Declared arity.
        expected: usize,
        /// Number of arguments supplied.
        actual: usize,
    },

    /// An error raised by caller-supplied code.
    #[error("{0}")]
    Raised(String),
}

impl Error {
    /// Creates an [`Error::Raised`] from any message.
    ///
    /// This is what handler functions return to signal a failure.
    pub fn raised(message: impl Into<String>) -> Self {
        Self::Raised(message.into())
    }
}
