//! The dynamic value model.
//!
//! Every monadic wrapper in this crate holds a [`Value`]. A `Value` is a
//! dynamically typed payload: a scalar, an ordered array, a callable
//! [`Function`], an opaque host [`Object`], an open [`Resource`], an
//! [`Error`] value, or a nested [`Monad`].
//!
//! # Equality
//!
//! Equality is *strict*: values of different variants are never equal
//! (`Int(1) != Float(1.0)`), arrays compare entry by entry in order, and
//! functions, objects and resources compare by identity. Floats compare by
//! value with `0.0 == -0.0` and `NaN == NaN`, which keeps `Eq` and `Hash`
//! consistent so that values can be used as set members.
//!
//! # Examples
//!
//! ```rust
//! use monadic::value::{Key, Value};
//!
//! let list = Value::list(["a", "b"]);
//! let array = list.as_array().unwrap();
//! assert_eq!(array.get(&Key::Int(1)), Some(&Value::from("b")));
//! assert_eq!(Value::from(1), Value::Int(1));
//! assert_ne!(Value::from(1), Value::from(1.0));
//! ```

mod function;
mod object;

pub use function::{Function, NativeFn};
pub use object::{Object, Resource};

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use indexmap::IndexMap;

use crate::collection::{Collection, Map, MutableCollection, Set};
use crate::error::Error;
use crate::matching::Match;
use crate::monad::{FOption, FTry, Identity, Monad};

/// An ordered mapping from [`Key`] to [`Value`].
pub type Array = IndexMap<Key, Value>;

/// A key of an [`Array`] or a collection: an integer or a string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    /// An integer key.
    Int(i64),
    /// A string key.
    Str(String),
}

impl Key {
    /// Converts a value into a key, if it is an integer or a string.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(number) => Some(Self::Int(*number)),
            Value::Str(text) => Some(Self::Str(text.clone())),
            _ => None,
        }
    }

    /// Returns `true` for string keys.
    pub const fn is_str(&self) -> bool {
        matches!(self, Self::Str(_))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(number) => write!(formatter, "{number}"),
            Self::Str(text) => write!(formatter, "{text}"),
        }
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Int(number) => Self::Int(number),
            Key::Str(text) => Self::Str(text),
        }
    }
}

/// A dynamically typed value.
#[derive(Clone, Default)]
pub enum Value {
    /// The absence of a value.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    Str(String),
    /// An ordered key/value array.
    Array(Array),
    /// A callable. A function of arity zero is a deferred computation.
    Function(Function),
    /// An opaque host object.
    Object(Object),
    /// An open handle.
    Resource(Resource),
    /// An error value.
    Error(Error),
    /// A nested monadic entity.
    Monad(Arc<Monad>),
}

impl Value {
    /// Builds an array value with integer keys `0..n`.
    pub fn list<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Self>,
    {
        Self::Array(indexed(values))
    }

    /// Builds an array value from key/value pairs, in order.
    pub fn map<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Key>,
        V: Into<Self>,
    {
        Self::Array(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Wraps a host object.
    pub fn object<T>(value: T) -> Self
    where
        T: std::any::Any + Send + Sync,
    {
        Self::Object(Object::new(value))
    }

    /// Returns the name of this value's variant, as used in messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Array(_) => "array",
            Self::Function(_) => "callable",
            Self::Object(_) => "object",
            Self::Resource(_) => "resource",
            Self::Error(_) => "error",
            Self::Monad(_) => "monad",
        }
    }

    /// Returns `true` if this is [`Value::Null`].
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if this is a function of arity zero.
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Function(function) if function.is_deferred())
    }

    /// Returns the boolean payload, if any.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Returns the integer payload, if any.
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(number) => Some(*number),
            _ => None,
        }
    }

    /// Returns the float payload, if any.
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(number) => Some(*number),
            _ => None,
        }
    }

    /// Returns the string payload, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the array payload, if any.
    pub const fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Returns the function payload, if any.
    pub const fn as_function(&self) -> Option<&Function> {
        match self {
            Self::Function(function) => Some(function),
            _ => None,
        }
    }

    /// Returns the object payload, if any.
    pub const fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Returns the error payload, if any.
    pub const fn as_error(&self) -> Option<&Error> {
        match self {
            Self::Error(error) => Some(error),
            _ => None,
        }
    }

    /// Returns the nested monad, if any.
    pub fn as_monad(&self) -> Option<&Monad> {
        match self {
            Self::Monad(monad) => Some(monad),
            _ => None,
        }
    }
}

/// Builds an array with integer keys `0..n`.
pub(crate) fn indexed<I, V>(values: I) -> Array
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    (0_i64..)
        .zip(values)
        .map(|(index, value)| (Key::Int(index), value.into()))
        .collect()
}

/// Order-sensitive array equality.
pub(crate) fn arrays_identical(left: &Array, right: &Array) -> bool {
    left.len() == right.len() && left.iter().eq(right.iter())
}

/// Order-sensitive array hashing, consistent with [`arrays_identical`].
pub(crate) fn hash_array<H: Hasher>(array: &Array, state: &mut H) {
    array.len().hash(state);
    for (key, value) in array {
        key.hash(state);
        value.hash(state);
    }
}

fn float_bits(number: f64) -> u64 {
    if number == 0.0 {
        0.0_f64.to_bits()
    } else if number.is_nan() {
        f64::NAN.to_bits()
    } else {
        number.to_bits()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(left), Self::Bool(right)) => left == right,
            (Self::Int(left), Self::Int(right)) => left == right,
            (Self::Float(left), Self::Float(right)) => float_bits(*left) == float_bits(*right),
            (Self::Str(left), Self::Str(right)) => left == right,
            (Self::Array(left), Self::Array(right)) => arrays_identical(left, right),
            (Self::Function(left), Self::Function(right)) => left.ptr_eq(right),
            (Self::Object(left), Self::Object(right)) => left.ptr_eq(right),
            (Self::Resource(left), Self::Resource(right)) => left.ptr_eq(right),
            (Self::Error(left), Self::Error(right)) => left == right,
            (Self::Monad(left), Self::Monad(right)) => left == right,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Null => {}
            Self::Bool(flag) => flag.hash(state),
            Self::Int(number) => number.hash(state),
            Self::Float(number) => float_bits(*number).hash(state),
            Self::Str(text) => text.hash(state),
            Self::Array(array) => hash_array(array, state),
            Self::Function(function) => function.address().hash(state),
            Self::Object(object) => object.address().hash(state),
            Self::Resource(resource) => resource.address().hash(state),
            Self::Error(error) => error.hash(state),
            Self::Monad(monad) => monad.hash(state),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => formatter.write_str("Null"),
            Self::Bool(flag) => formatter.debug_tuple("Bool").field(flag).finish(),
            Self::Int(number) => formatter.debug_tuple("Int").field(number).finish(),
            Self::Float(number) => formatter.debug_tuple("Float").field(number).finish(),
            Self::Str(text) => formatter.debug_tuple("Str").field(text).finish(),
            Self::Array(array) => formatter.debug_map().entries(array.iter()).finish(),
            Self::Function(function) => fmt::Debug::fmt(function, formatter),
            Self::Object(object) => fmt::Debug::fmt(object, formatter),
            Self::Resource(resource) => fmt::Debug::fmt(resource, formatter),
            Self::Error(error) => formatter.debug_tuple("Error").field(error).finish(),
            Self::Monad(monad) => fmt::Debug::fmt(monad, formatter),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Self::Array(value)
    }
}

impl From<Function> for Value {
    fn from(value: Function) -> Self {
        Self::Function(value)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Self::Object(value)
    }
}

impl From<Resource> for Value {
    fn from(value: Resource) -> Self {
        Self::Resource(value)
    }
}

impl From<Error> for Value {
    fn from(value: Error) -> Self {
        Self::Error(value)
    }
}

impl From<Monad> for Value {
    fn from(value: Monad) -> Self {
        Self::Monad(Arc::new(value))
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

macro_rules! monad_into_value {
    ($($wrapper:ident),* $(,)?) => {
        $(
            impl From<$wrapper> for Value {
                fn from(value: $wrapper) -> Self {
                    Self::Monad(Arc::new(Monad::from(value)))
                }
            }
        )*
    };
}

monad_into_value!(Identity, FOption, FTry, Collection, Set, Map, MutableCollection, Match);

static_assertions::assert_impl_all!(Value: Send, Sync, Clone, Eq, Hash);
static_assertions::assert_impl_all!(Key: Send, Sync, Clone, Ord, Hash);
