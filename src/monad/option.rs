//! The option monad: `Some` value or `None`.

use super::{ApplicationTarget, Monad, Monadic, apply_function};
use crate::error::Error;
use crate::value::{Function, Value};

/// An optional value.
///
/// `None` is absorbing: binding on it never calls the function. Reading the
/// value of `None` fails with [`Error::ValueAccess`].
///
/// # Examples
///
/// ```rust
/// use monadic::prelude::*;
///
/// assert_eq!(FOption::create(Value::Null), FOption::None);
/// assert_eq!(FOption::create(5).value(), Ok(Value::from(5)));
/// assert_eq!(FOption::None.value(), Err(Error::ValueAccess));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FOption {
    /// Holds a value.
    Some(Value),
    /// Holds nothing.
    None,
}

impl FOption {
    /// Creates `None` for [`Value::Null`], `Some` otherwise.
    ///
    /// An existing `FOption` is returned unchanged.
    pub fn create(value: impl Into<Value>) -> Self {
        Self::create_with_sentinel(value, &Value::Null)
    }

    /// Creates `None` when `value` strictly equals `sentinel`, `Some`
    /// otherwise. An existing `FOption` is returned unchanged.
    pub fn create_with_sentinel(value: impl Into<Value>, sentinel: &Value) -> Self {
        let value = value.into();
        if let Value::Monad(monad) = &value
            && let Monad::Option(option) = monad.as_ref()
        {
            return option.clone();
        }
        if value == *sentinel {
            Self::None
        } else {
            Self::Some(value)
        }
    }

    /// Binds `function`, mapping a result equal to `sentinel` to `None`.
    ///
    /// # Errors
    ///
    /// Errors raised by `function` propagate.
    pub fn bind_or_none(
        &self,
        function: &Function,
        args: &[Value],
        sentinel: &Value,
    ) -> Result<Self, Error> {
        match self {
            Self::Some(value) => {
                let result = apply_function(function, ApplicationTarget::classify(value), args)?;
                Ok(Self::create_with_sentinel(result, sentinel))
            }
            Self::None => Ok(Self::None),
        }
    }

    /// Returns `true` for `Some`.
    pub const fn is_some(&self) -> bool {
        matches!(self, Self::Some(_))
    }

    /// Returns `true` for `None`.
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the held value, or `default` for `None`.
    pub fn get_or_else(&self, default: impl Into<Value>) -> Value {
        match self {
            Self::Some(value) => value.clone(),
            Self::None => default.into(),
        }
    }
}

impl Monadic for FOption {
    fn value(&self) -> Result<Value, Error> {
        match self {
            Self::Some(value) => Ok(value.clone()),
            Self::None => Err(Error::ValueAccess),
        }
    }

    fn bind(&self, function: &Function, args: &[Value]) -> Result<Self, Error> {
        self.bind_or_none(function, args, &Value::Null)
    }
}
