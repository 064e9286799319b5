//! Function application shared by every `bind`.

use std::sync::Arc;

use super::Monad;
use crate::error::Error;
use crate::value::{Function, Value};

/// How a value is presented to a function being applied to it.
///
/// The classification is explicit so that a collection binding on itself is
/// never mistaken for a foreign wrapper to delegate to.
#[derive(Debug, Clone)]
pub enum ApplicationTarget {
    /// A member of the caller's own family. Passed to the function as is.
    Own(Value),
    /// A monadic entity of another family. The application is delegated to
    /// that entity's `bind`.
    Foreign(Arc<Monad>),
    /// Any other value. Deferred computations are resolved first.
    Plain(Value),
}

impl ApplicationTarget {
    /// Classifies `value`: every nested entity is foreign.
    pub fn classify(value: &Value) -> Self {
        match value {
            Value::Monad(monad) => Self::Foreign(Arc::clone(monad)),
            other => Self::Plain(other.clone()),
        }
    }

    /// Classifies `value` from inside the collection family: collections are
    /// passed as plain values, other entities are foreign.
    pub fn within_collection(value: &Value) -> Self {
        match value {
            Value::Monad(monad) if monad.as_collection().is_some() => Self::Own(value.clone()),
            other => Self::classify(other),
        }
    }
}

/// Applies `function` to `target` with `args` appended.
///
/// Returns the raw result; callers wrap it back into their own family.
///
/// # Errors
///
/// Nothing is caught here: errors raised by `function`, by a deferred
/// target or by a delegated `bind` propagate unchanged.
///
/// # Examples
///
/// ```rust
/// use monadic::monad::{ApplicationTarget, apply_function};
/// use monadic::value::{Function, Value};
///
/// let concat = Function::binary(|value, suffix| {
///     Ok(Value::from(format!(
///         "{}{}",
///         value.as_str().unwrap_or_default(),
///         suffix.as_str().unwrap_or_default()
///     )))
/// });
/// let deferred = Value::from(Function::deferred(|| Ok(Value::from("foo"))));
/// let result = apply_function(
///     &concat,
///     ApplicationTarget::classify(&deferred),
///     &[Value::from("bar")],
/// );
/// assert_eq!(result, Ok(Value::from("foobar")));
/// ```
pub fn apply_function(
    function: &Function,
    target: ApplicationTarget,
    args: &[Value],
) -> Result<Value, Error> {
    match target {
        ApplicationTarget::Foreign(monad) => {
            tracing::trace!(token = monad.type_token().name(), "delegating application to nested bind");
            monad.bind(function, args).map(Value::from)
        }
        ApplicationTarget::Own(value) => invoke(function, value, args),
        ApplicationTarget::Plain(value) => invoke(function, resolve_deferred(value)?, args),
    }
}

fn resolve_deferred(value: Value) -> Result<Value, Error> {
    match value {
        Value::Function(function) if function.is_deferred() => function.call(&[]),
        other => Ok(other),
    }
}

fn invoke(function: &Function, first: Value, args: &[Value]) -> Result<Value, Error> {
    let mut arguments = Vec::with_capacity(args.len() + 1);
    arguments.push(first);
    arguments.extend_from_slice(args);
    function.call(&arguments)
}
