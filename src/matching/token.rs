//! Type-identity tokens.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::monad::{FOption, FTry, Monad};
use crate::value::Value;

/// A named type-identity predicate.
///
/// Tokens stand in for class names: [`TypeToken::of`] builds one for any
/// host type wrapped in an [`Object`](crate::value::Object), and the
/// associated constants identify the crate's own wrappers. Family tokens
/// such as [`TypeToken::OPTION`] or [`TypeToken::COLLECTION`] accept every
/// member of the family.
///
/// Tokens compare and hash by name.
///
/// # Examples
///
/// ```rust
/// use monadic::prelude::*;
///
/// struct Point;
///
/// let point = Value::object(Point);
/// assert!(TypeToken::of::<Point>().matches(&point));
/// assert!(TypeToken::OPTION.matches(&Value::from(FOption::None)));
/// assert!(!TypeToken::SOME.matches(&Value::from(FOption::None)));
/// ```
#[derive(Clone, Copy)]
pub struct TypeToken {
    name: &'static str,
    test: fn(&Value) -> bool,
}

impl TypeToken {
    /// Any monadic entity.
    pub const MONADIC: Self = Self::new("monadic::Monadic", is_monadic);
    /// [`Identity`](crate::monad::Identity).
    pub const IDENTITY: Self = Self::new("monadic::Identity", is_identity);
    /// Either [`FOption`] variant.
    pub const OPTION: Self = Self::new("monadic::FOption", is_option);
    /// [`FOption::Some`].
    pub const SOME: Self = Self::new("monadic::Some", is_some);
    /// [`FOption::None`].
    pub const NONE: Self = Self::new("monadic::None", is_none);
    /// Either [`FTry`] variant.
    pub const TRY: Self = Self::new("monadic::FTry", is_try);
    /// [`FTry::Success`].
    pub const SUCCESS: Self = Self::new("monadic::Success", is_success);
    /// [`FTry::Failure`].
    pub const FAILURE: Self = Self::new("monadic::Failure", is_failure);
    /// Every collection variant.
    pub const COLLECTION: Self = Self::new("monadic::Collection", is_collection);
    /// [`Set`](crate::collection::Set).
    pub const SET: Self = Self::new("monadic::Set", is_set);
    /// [`Map`](crate::collection::Map).
    pub const MAP: Self = Self::new("monadic::Map", is_map);
    /// [`MutableCollection`](crate::collection::MutableCollection).
    pub const MUTABLE_COLLECTION: Self =
        Self::new("monadic::MutableCollection", is_mutable_collection);
    /// [`Match`](crate::matching::Match).
    pub const MATCH: Self = Self::new("monadic::Match", is_match);
    /// An error value.
    pub const ERROR: Self = Self::new("monadic::Error", is_error);

    /// Every token of the crate's own types.
    pub const BUILTIN: [Self; 14] = [
        Self::MONADIC,
        Self::IDENTITY,
        Self::OPTION,
        Self::SOME,
        Self::NONE,
        Self::TRY,
        Self::SUCCESS,
        Self::FAILURE,
        Self::COLLECTION,
        Self::SET,
        Self::MAP,
        Self::MUTABLE_COLLECTION,
        Self::MATCH,
        Self::ERROR,
    ];

    /// Creates a token from a name and a predicate.
    pub const fn new(name: &'static str, test: fn(&Value) -> bool) -> Self {
        Self { name, test }
    }

    /// Creates the token of a host type wrapped in an `Object`.
    pub fn of<T: Any>() -> Self {
        Self::new(std::any::type_name::<T>(), is_object_of::<T>)
    }

    /// Returns the fully qualified name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if `value` is an instance of this type.
    pub fn matches(&self, value: &Value) -> bool {
        (self.test)(value)
    }
}

impl PartialEq for TypeToken {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for TypeToken {}

impl Hash for TypeToken {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Debug for TypeToken {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_tuple("TypeToken").field(&self.name).finish()
    }
}

impl fmt::Display for TypeToken {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name)
    }
}

fn is_object_of<T: Any>(value: &Value) -> bool {
    value.as_object().is_some_and(|object| object.is::<T>())
}

fn monad_matches(value: &Value, test: impl FnOnce(&Monad) -> bool) -> bool {
    value.as_monad().is_some_and(test)
}

fn is_monadic(value: &Value) -> bool {
    monad_matches(value, |_| true)
}

fn is_identity(value: &Value) -> bool {
    monad_matches(value, |monad| matches!(monad, Monad::Identity(_)))
}

fn is_option(value: &Value) -> bool {
    monad_matches(value, |monad| matches!(monad, Monad::Option(_)))
}

fn is_some(value: &Value) -> bool {
    monad_matches(value, |monad| matches!(monad, Monad::Option(FOption::Some(_))))
}

fn is_none(value: &Value) -> bool {
    monad_matches(value, |monad| matches!(monad, Monad::Option(FOption::None)))
}

fn is_try(value: &Value) -> bool {
    monad_matches(value, |monad| matches!(monad, Monad::Try(_)))
}

fn is_success(value: &Value) -> bool {
    monad_matches(value, |monad| matches!(monad, Monad::Try(FTry::Success(_))))
}

fn is_failure(value: &Value) -> bool {
    monad_matches(value, |monad| matches!(monad, Monad::Try(FTry::Failure(_))))
}

fn is_collection(value: &Value) -> bool {
    monad_matches(value, |monad| monad.as_collection().is_some())
}

fn is_set(value: &Value) -> bool {
    monad_matches(value, |monad| matches!(monad, Monad::Set(_)))
}

fn is_map(value: &Value) -> bool {
    monad_matches(value, |monad| matches!(monad, Monad::Map(_)))
}

fn is_mutable_collection(value: &Value) -> bool {
    monad_matches(value, |monad| matches!(monad, Monad::MutableCollection(_)))
}

fn is_match(value: &Value) -> bool {
    monad_matches(value, |monad| matches!(monad, Monad::Match(_)))
}

fn is_error(value: &Value) -> bool {
    matches!(value, Value::Error(_))
}
