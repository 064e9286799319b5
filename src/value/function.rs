//! Callable values.

use std::fmt;
use std::sync::Arc;

use super::Value;
use crate::error::Error;

/// The signature of every callable held by a [`Function`].
pub type NativeFn = dyn Fn(&[Value]) -> Result<Value, Error> + Send + Sync;

/// A shared, callable value with a declared arity.
///
/// A function of arity zero is a *deferred computation*: wherever a wrapper
/// resolves its payload (`flatten`, or applying a handler to it), a deferred
/// function is invoked and replaced by its result.
///
/// Calls may pass more arguments than the declared arity; surplus arguments
/// are ignored by convention. Passing fewer fails with [`Error::Arity`].
///
/// # Examples
///
/// ```rust
/// use monadic::value::{Function, Value};
///
/// let double = Function::lift(|value| Value::from(value.as_int().unwrap_or(0) * 2));
/// assert_eq!(double.call(&[Value::from(21)]), Ok(Value::from(42)));
///
/// let deferred = Function::deferred(|| Ok(Value::from("later")));
/// assert!(deferred.is_deferred());
/// ```
#[derive(Clone)]
pub struct Function {
    arity: usize,
    body: Arc<NativeFn>,
}

impl Function {
    /// Creates a function taking at least `arity` arguments.
    pub fn new<F>(arity: usize, body: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, Error> + Send + Sync + 'static,
    {
        Self {
            arity,
            body: Arc::new(body),
        }
    }

    /// Creates a deferred computation (arity zero).
    pub fn deferred<F>(body: F) -> Self
    where
        F: Fn() -> Result<Value, Error> + Send + Sync + 'static,
    {
        Self::new(0, move |_| body())
    }

    /// Creates a fallible function of one argument.
    pub fn unary<F>(body: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, Error> + Send + Sync + 'static,
    {
        Self::new(1, move |arguments| body(&arguments[0]))
    }

    /// Creates a fallible function of two arguments.
    pub fn binary<F>(body: F) -> Self
    where
        F: Fn(&Value, &Value) -> Result<Value, Error> + Send + Sync + 'static,
    {
        Self::new(2, move |arguments| body(&arguments[0], &arguments[1]))
    }

    /// Creates an infallible function of one argument.
    pub fn lift<F, R>(body: F) -> Self
    where
        F: Fn(&Value) -> R + Send + Sync + 'static,
        R: Into<Value>,
    {
        Self::new(1, move |arguments| Ok(body(&arguments[0]).into()))
    }

    /// Returns the declared arity.
    pub const fn arity(&self) -> usize {
        self.arity
    }

    /// Returns `true` if this function takes no arguments.
    pub const fn is_deferred(&self) -> bool {
        self.arity == 0
    }

    /// Invokes the function.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Arity`] when fewer than [`arity`](Self::arity)
    /// arguments are supplied, or whatever error the body raises.
    pub fn call(&self, arguments: &[Value]) -> Result<Value, Error> {
        if arguments.len() < self.arity {
            return Err(Error::Arity {
                expected: self.arity,
                actual: arguments.len(),
            });
        }
        (self.body)(arguments)
    }

    /// Returns `true` if both handles share the same body.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.address() == other.address()
    }

    pub(crate) fn address(&self) -> usize {
        Arc::as_ptr(&self.body).cast::<()>() as usize
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Function")
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn call_with_too_few_arguments_fails() {
        let add = Function::binary(|left, right| {
            Ok(Value::from(left.as_int().unwrap_or(0) + right.as_int().unwrap_or(0)))
        });
        assert_eq!(
            add.call(&[Value::from(1)]),
            Err(Error::Arity {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(add.call(&[Value::from(1), Value::from(2)]), Ok(Value::from(3)));
    }

    #[rstest]
    fn surplus_arguments_are_ignored() {
        let constant = Function::deferred(|| Ok(Value::from("foo")));
        assert_eq!(constant.call(&[Value::from(true)]), Ok(Value::from("foo")));
    }

    #[rstest]
    fn clones_share_identity() {
        let function = Function::lift(|value| value.clone());
        assert!(function.ptr_eq(&function.clone()));
        assert!(!function.ptr_eq(&Function::lift(|value| value.clone())));
    }

    #[rstest]
    fn errors_from_the_body_propagate() {
        let failing = Function::unary(|_| Err(Error::raised("nope")));
        assert_eq!(failing.call(&[Value::Null]), Err(Error::raised("nope")));
    }
}
