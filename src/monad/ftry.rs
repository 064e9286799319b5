//! The try monad: `Success` value or `Failure` error.

use super::{ApplicationTarget, Monad, Monadic, apply_function, flatten_value};
use crate::error::Error;
use crate::value::{Function, Value};

/// The outcome of a computation that may fail.
///
/// This is the only family that recovers from errors: [`bind`](Monadic::bind)
/// on a `Success` turns any error raised by the function, or any error the
/// result resolves to, into a `Failure`. `Failure` is absorbing and keeps the
/// first error.
///
/// # Examples
///
/// ```rust
/// use monadic::prelude::*;
///
/// let success = FTry::success("x")?;
/// let failed = success.bind(&Function::unary(|_| Err(Error::raised("boom"))), &[])?;
/// assert_eq!(failed, FTry::Failure(Error::raised("boom")));
///
/// let still_failed = failed.bind(&Function::lift(|_| 1), &[])?;
/// assert_eq!(still_failed.value()?, Value::Error(Error::raised("boom")));
/// # Ok::<(), monadic::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FTry {
    /// A value that is not an error.
    Success(Value),
    /// The first error raised.
    Failure(Error),
}

impl FTry {
    /// Creates a `Success`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SuccessFromError`] when `value` is an error value.
    pub fn success(value: impl Into<Value>) -> Result<Self, Error> {
        match value.into() {
            Value::Error(_) => Err(Error::SuccessFromError),
            other => Ok(Self::Success(other)),
        }
    }

    /// Creates a `Failure` holding `error`.
    pub const fn failure(error: Error) -> Self {
        Self::Failure(error)
    }

    /// Creates a `Failure` from any value. A payload that is not an error
    /// value is replaced by a generic raised error.
    pub fn failure_from(value: impl Into<Value>) -> Self {
        match value.into() {
            Value::Error(error) => Self::Failure(error),
            _ => Self::Failure(Error::raised("Creating Failure with no error")),
        }
    }

    /// Classifies a raw value.
    ///
    /// An error value, a deferred computation that fails or yields an
    /// error, or an entity that flattens to an error becomes a `Failure`;
    /// anything else becomes a `Success` holding `value` unchanged. An
    /// existing `FTry` is returned as is.
    pub fn create(value: impl Into<Value>) -> Self {
        let value = value.into();
        if let Value::Monad(monad) = &value
            && let Monad::Try(attempt) = monad.as_ref()
        {
            return attempt.clone();
        }
        match classify(&value) {
            Ok(()) => Self::Success(value),
            Err(error) => {
                tracing::debug!(%error, "value classified as failure");
                Self::Failure(error)
            }
        }
    }

    /// Alias of [`create`](Self::create).
    pub fn with(value: impl Into<Value>) -> Self {
        Self::create(value)
    }

    /// Returns `true` for `Success`.
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns the held error of a `Failure`.
    pub const fn error(&self) -> Option<&Error> {
        match self {
            Self::Success(_) => None,
            Self::Failure(error) => Some(error),
        }
    }

    /// Returns the held value, or `default` for a `Failure`.
    pub fn get_or_else(&self, default: impl Into<Value>) -> Value {
        match self {
            Self::Success(value) => value.clone(),
            Self::Failure(_) => default.into(),
        }
    }

    /// Surfaces the held error.
    ///
    /// # Errors
    ///
    /// A `Failure` returns its error.
    pub fn pass(&self) -> Result<(), Error> {
        match self {
            Self::Success(_) => Ok(()),
            Self::Failure(error) => Err(error.clone()),
        }
    }
}

/// Succeeds when `value` does not resolve to an error.
fn classify(value: &Value) -> Result<(), Error> {
    match value {
        Value::Error(error) => Err(error.clone()),
        Value::Function(function) if function.is_deferred() => {
            classify_resolved(flatten_value(function.call(&[])?)?)
        }
        Value::Monad(_) => classify_resolved(flatten_value(value.clone())?),
        _ => Ok(()),
    }
}

fn classify_resolved(resolved: Value) -> Result<(), Error> {
    match resolved {
        Value::Error(error) => Err(error),
        _ => Ok(()),
    }
}

impl Monadic for FTry {
    fn value(&self) -> Result<Value, Error> {
        match self {
            Self::Success(value) => Ok(value.clone()),
            Self::Failure(error) => Ok(Value::Error(error.clone())),
        }
    }

    fn bind(&self, function: &Function, args: &[Value]) -> Result<Self, Error> {
        match self {
            Self::Success(value) => {
                Ok(
                    match apply_function(function, ApplicationTarget::classify(value), args) {
                        Ok(result) => Self::create(result),
                        Err(error) => {
                            tracing::debug!(%error, "bind raised, converting to failure");
                            Self::Failure(error)
                        }
                    },
                )
            }
            Self::Failure(error) => Ok(Self::Failure(error.clone())),
        }
    }
}
