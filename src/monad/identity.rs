//! The identity monad.

use super::{ApplicationTarget, Monad, Monadic, apply_function};
use crate::error::Error;
use crate::value::{Function, Value};

/// Wraps exactly one value. Binding always succeeds.
///
/// # Examples
///
/// ```rust
/// use monadic::prelude::*;
///
/// let identity = Identity::new("foo");
/// let suffixed = identity.bind(
///     &Function::lift(|value| format!("{}bar", value.as_str().unwrap_or_default())),
///     &[],
/// )?;
/// assert_eq!(suffixed.value()?, Value::from("foobar"));
/// # Ok::<(), monadic::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity(Value);

impl Identity {
    /// Wraps `value`, even if it already is an `Identity`.
    pub fn new(value: impl Into<Value>) -> Self {
        Self(value.into())
    }

    /// Wraps `value`, returning it unchanged if it already is an `Identity`.
    pub fn create(value: impl Into<Value>) -> Self {
        match value.into() {
            Value::Monad(monad) => match monad.as_ref() {
                Monad::Identity(identity) => identity.clone(),
                _ => Self(Value::Monad(monad)),
            },
            other => Self(other),
        }
    }

    /// Borrows the payload.
    pub const fn as_inner(&self) -> &Value {
        &self.0
    }

    /// Consumes the wrapper and returns the payload.
    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl Monadic for Identity {
    fn value(&self) -> Result<Value, Error> {
        Ok(self.0.clone())
    }

    fn bind(&self, function: &Function, args: &[Value]) -> Result<Self, Error> {
        apply_function(function, ApplicationTarget::classify(&self.0), args).map(Self::create)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn foo() -> Identity {
        Identity::new("foo")
    }

    fn append(suffix: &'static str) -> Function {
        Function::lift(move |value| format!("{}{suffix}", value.as_str().unwrap_or_default()))
    }

    fn concat() -> Function {
        Function::binary(|value, fudge| {
            Ok(Value::from(format!(
                "{}{}",
                value.as_str().unwrap_or_default(),
                fudge.as_str().unwrap_or_default()
            )))
        })
    }

    #[rstest]
    fn create_returns_existing_identity(foo: Identity) {
        assert_eq!(Identity::create(Value::from(foo.clone())), foo);
    }

    #[rstest]
    fn new_always_wraps(foo: Identity) {
        let wrapped = Identity::new(Value::from(foo.clone()));
        assert_eq!(wrapped.as_inner(), &Value::from(foo));
    }

    #[rstest]
    fn bind_applies_function(foo: Identity) {
        assert_eq!(
            foo.bind(&append("bar"), &[]).unwrap().value(),
            Ok(Value::from("foobar"))
        );
    }

    #[rstest]
    fn bind_on_nested_identity_delegates(foo: Identity) {
        let nested = Identity::new(Value::from(foo));
        assert_eq!(
            nested.bind(&append("bar"), &[]).unwrap().value(),
            Ok(Value::from("foobar"))
        );
    }

    #[rstest]
    fn bind_forwards_extra_arguments(foo: Identity) {
        assert_eq!(
            foo.bind(&concat(), &[Value::from("bar")]).unwrap().value(),
            Ok(Value::from("foobar"))
        );
        let nested = Identity::new(Value::from(foo));
        assert_eq!(
            nested.bind(&concat(), &[Value::from("bar")]).unwrap().value(),
            Ok(Value::from("foobar"))
        );
    }

    #[rstest]
    fn bind_chains() {
        let result = Identity::new(10)
            .bind(&Function::lift(|value| value.as_int().unwrap_or(0) * 10), &[])
            .and_then(|identity| {
                identity.bind(
                    &Function::binary(|value, by| {
                        Ok(Value::from(value.as_int().unwrap_or(0) - by.as_int().unwrap_or(0)))
                    }),
                    &[Value::from(2)],
                )
            })
            .unwrap();
        assert_eq!(result.value(), Ok(Value::from(98)));
    }

    #[rstest]
    fn bind_resolves_deferred_payload() {
        let deferred = Identity::new(Function::deferred(|| Ok(Value::from("foo"))));
        let bound = deferred.bind(&append("bar"), &[]).unwrap();
        assert_eq!(bound.value(), Ok(Value::from("foobar")));
        assert_eq!(bound.flatten(), Ok(Value::from("foobar")));
    }

    #[rstest]
    fn flatten_invokes_deferred_payload() {
        let deferred = Identity::new(Function::deferred(|| Ok(Value::from("foo"))));
        assert_eq!(deferred.flatten(), Ok(Value::from("foo")));
    }

    #[rstest]
    fn bind_propagates_handler_errors(foo: Identity) {
        let failing = Function::unary(|_| Err(Error::raised("boom")));
        assert_eq!(foo.bind(&failing, &[]), Err(Error::raised("boom")));
    }
}
