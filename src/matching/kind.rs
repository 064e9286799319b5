//! Native-kind predicates.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use super::Unresolvable;
use crate::value::Value;

/// The closed vocabulary of native kinds a value can be tested against.
///
/// Tags are parsed case-insensitively and several aliases map to the same
/// kind (`int`, `integer` and `long` are all [`NativeKind::Integer`]).
///
/// # Examples
///
/// ```rust
/// use monadic::matching::NativeKind;
/// use monadic::value::Value;
///
/// assert_eq!("Bool".parse(), Ok(NativeKind::Boolean));
/// assert!(NativeKind::Numeric.matches(&Value::from("123")));
/// assert!(!NativeKind::Integer.matches(&Value::from(1.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeKind {
    /// `string`
    String,
    /// `integer`, `int`, `long`
    Integer,
    /// `float`, `double`, `real`
    Float,
    /// `null`
    Null,
    /// `array`
    Array,
    /// `boolean`, `bool`
    Boolean,
    /// `callable`, `function`, `closure`
    Callable,
    /// `file`: a string naming an existing regular file.
    File,
    /// `dir`, `directory`: a string naming an existing directory.
    Directory,
    /// `object`: host objects, errors, functions and monadic entities.
    Object,
    /// `scalar`: booleans, integers, floats and strings.
    Scalar,
    /// `numeric`: integers, floats and numeric strings.
    Numeric,
    /// `resource`: an open handle.
    Resource,
}

impl NativeKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 13] = [
        Self::String,
        Self::Integer,
        Self::Float,
        Self::Null,
        Self::Array,
        Self::Boolean,
        Self::Callable,
        Self::File,
        Self::Directory,
        Self::Object,
        Self::Scalar,
        Self::Numeric,
        Self::Resource,
    ];

    /// Parses a tag, ignoring ASCII case.
    pub fn parse(tag: &str) -> Option<Self> {
        Some(match tag.to_ascii_lowercase().as_str() {
            "string" => Self::String,
            "integer" | "int" | "long" => Self::Integer,
            "float" | "double" | "real" => Self::Float,
            "null" => Self::Null,
            "array" => Self::Array,
            "boolean" | "bool" => Self::Boolean,
            "callable" | "function" | "closure" => Self::Callable,
            "file" => Self::File,
            "dir" | "directory" => Self::Directory,
            "object" => Self::Object,
            "scalar" => Self::Scalar,
            "numeric" => Self::Numeric,
            "resource" => Self::Resource,
            _ => return None,
        })
    }

    /// Returns the canonical tag.
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Null => "null",
            Self::Array => "array",
            Self::Boolean => "boolean",
            Self::Callable => "callable",
            Self::File => "file",
            Self::Directory => "directory",
            Self::Object => "object",
            Self::Scalar => "scalar",
            Self::Numeric => "numeric",
            Self::Resource => "resource",
        }
    }

    /// Tests `value` against this kind.
    ///
    /// `File` and `Directory` consult the filesystem; every other kind is a
    /// pure function of the value.
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => matches!(value, Value::Str(_)),
            Self::Integer => matches!(value, Value::Int(_)),
            Self::Float => matches!(value, Value::Float(_)),
            Self::Null => value.is_null(),
            Self::Array => matches!(value, Value::Array(_)),
            Self::Boolean => matches!(value, Value::Bool(_)),
            Self::Callable => matches!(value, Value::Function(_)),
            Self::File => value.as_str().is_some_and(|path| Path::new(path).is_file()),
            Self::Directory => value.as_str().is_some_and(|path| Path::new(path).is_dir()),
            Self::Object => matches!(
                value,
                Value::Object(_) | Value::Error(_) | Value::Function(_) | Value::Monad(_)
            ),
            Self::Scalar => matches!(
                value,
                Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Str(_)
            ),
            Self::Numeric => match value {
                Value::Int(_) | Value::Float(_) => true,
                Value::Str(text) => is_numeric_text(text),
                _ => false,
            },
            Self::Resource => matches!(value, Value::Resource(_)),
        }
    }

    /// Returns the most specific kind describing `value`, used to infer a
    /// collection's element type. Values whose identity is a type (objects,
    /// errors, monads) and `Null` have no native kind.
    pub const fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(_) => Some(Self::Boolean),
            Value::Int(_) => Some(Self::Integer),
            Value::Float(_) => Some(Self::Float),
            Value::Str(_) => Some(Self::String),
            Value::Array(_) => Some(Self::Array),
            Value::Function(_) => Some(Self::Callable),
            Value::Resource(_) => Some(Self::Resource),
            Value::Null | Value::Object(_) | Value::Error(_) | Value::Monad(_) => None,
        }
    }
}

/// Decimal or exponent notation, optionally signed and surrounded by
/// whitespace. `inf` and `nan` spellings are not numeric.
fn is_numeric_text(text: &str) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty()
        && trimmed
            .bytes()
            .all(|byte| byte.is_ascii_digit() || matches!(byte, b'+' | b'-' | b'.' | b'e' | b'E'))
        && trimmed.parse::<f64>().is_ok()
}

impl fmt::Display for NativeKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

impl FromStr for NativeKind {
    type Err = Unresolvable;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::parse(tag).ok_or_else(|| Unresolvable::new(tag))
    }
}
