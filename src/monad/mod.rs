//! The monadic binding protocol.
//!
//! Every wrapper in this crate implements [`Monadic`]:
//!
//! - [`value`](Monadic::value): the held payload, verbatim
//! - [`flatten`](Monadic::flatten): the fully resolved base value
//! - [`bind`](Monadic::bind): apply a [`Function`] and re-wrap the result
//!
//! The wrappers are collected in the [`Monad`] tagged union so that a
//! monadic entity can itself be carried as a [`Value::Monad`] payload.
//!
//! # Examples
//!
//! ```rust
//! use monadic::prelude::*;
//!
//! let identity = Identity::new(10)
//!     .bind(&Function::lift(|value| value.as_int().unwrap_or(0) * 10), &[])?
//!     .bind(
//!         &Function::binary(|value, by| {
//!             Ok(Value::from(value.as_int().unwrap_or(0) - by.as_int().unwrap_or(0)))
//!         }),
//!         &[Value::from(2)],
//!     )?;
//! assert_eq!(identity.value()?, Value::from(98));
//! # Ok::<(), monadic::Error>(())
//! ```

mod apply;
mod ftry;
mod identity;
mod option;

pub use apply::{ApplicationTarget, apply_function};
pub use ftry::FTry;
pub use identity::Identity;
pub use option::FOption;

use crate::collection::{Collection, CollectionLike, Map, MutableCollection, Set};
use crate::error::Error;
use crate::matching::{Match, TypeToken};
use crate::value::{Function, Value};

/// The capability set shared by every monadic entity.
pub trait Monadic: Clone + Into<Monad> {
    /// Returns the held payload verbatim.
    ///
    /// # Errors
    ///
    /// Only empty variants fail, with [`Error::ValueAccess`].
    fn value(&self) -> Result<Value, Error>;

    /// Resolves the payload to a concrete, non-deferred, non-monadic value.
    ///
    /// # Errors
    ///
    /// Propagates errors raised by deferred computations and access errors
    /// from nested empty variants.
    fn flatten(&self) -> Result<Value, Error> {
        flatten_value(self.value()?)
    }

    /// Applies `function` to the payload with `args` appended and wraps the
    /// result in a new entity of the same family.
    ///
    /// # Errors
    ///
    /// Errors raised by `function` propagate, except for the `FTry` family
    /// which turns them into a `Failure`.
    fn bind(&self, function: &Function, args: &[Value]) -> Result<Self, Error>;
}

/// Any monadic entity, as carried by [`Value::Monad`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Monad {
    /// An [`Identity`].
    Identity(Identity),
    /// An [`FOption`].
    Option(FOption),
    /// An [`FTry`].
    Try(FTry),
    /// A [`Collection`].
    Collection(Collection),
    /// A [`Set`].
    Set(Set),
    /// A [`Map`].
    Map(Map),
    /// A [`MutableCollection`].
    MutableCollection(MutableCollection),
    /// A [`Match`].
    Match(Match),
}

/// One step of flattening a nested entity.
enum Layer {
    /// The entity's payload, which may need further resolution.
    Wrapped(Value),
    /// A terminal result (collections flatten element-wise).
    Resolved(Value),
}

impl Monad {
    /// Returns the held payload of the wrapped entity.
    ///
    /// # Errors
    ///
    /// See [`Monadic::value`].
    pub fn value(&self) -> Result<Value, Error> {
        match self {
            Self::Identity(identity) => identity.value(),
            Self::Option(option) => option.value(),
            Self::Try(attempt) => attempt.value(),
            Self::Collection(collection) => collection.value(),
            Self::Set(set) => set.value(),
            Self::Map(map) => map.value(),
            Self::MutableCollection(collection) => collection.value(),
            Self::Match(matcher) => matcher.value(),
        }
    }

    /// Flattens the wrapped entity.
    ///
    /// # Errors
    ///
    /// See [`Monadic::flatten`].
    pub fn flatten(&self) -> Result<Value, Error> {
        match self.layer()? {
            Layer::Wrapped(value) => flatten_value(value),
            Layer::Resolved(value) => Ok(value),
        }
    }

    /// Binds `function` on the wrapped entity, keeping its family.
    ///
    /// # Errors
    ///
    /// See [`Monadic::bind`].
    pub fn bind(&self, function: &Function, args: &[Value]) -> Result<Self, Error> {
        Ok(match self {
            Self::Identity(identity) => Self::Identity(identity.bind(function, args)?),
            Self::Option(option) => Self::Option(option.bind(function, args)?),
            Self::Try(attempt) => Self::Try(attempt.bind(function, args)?),
            Self::Collection(collection) => Self::Collection(collection.bind(function, args)?),
            Self::Set(set) => Self::Set(set.bind(function, args)?),
            Self::Map(map) => Self::Map(map.bind(function, args)?),
            Self::MutableCollection(collection) => {
                Self::MutableCollection(collection.bind(function, args)?)
            }
            Self::Match(matcher) => Self::Match(matcher.bind(function, args)?),
        })
    }

    /// Returns the token of the concrete wrapper type.
    pub fn type_token(&self) -> TypeToken {
        match self {
            Self::Identity(_) => TypeToken::IDENTITY,
            Self::Option(FOption::Some(_)) => TypeToken::SOME,
            Self::Option(FOption::None) => TypeToken::NONE,
            Self::Try(FTry::Success(_)) => TypeToken::SUCCESS,
            Self::Try(FTry::Failure(_)) => TypeToken::FAILURE,
            Self::Collection(_) => TypeToken::COLLECTION,
            Self::Set(_) => TypeToken::SET,
            Self::Map(_) => TypeToken::MAP,
            Self::MutableCollection(_) => TypeToken::MUTABLE_COLLECTION,
            Self::Match(_) => TypeToken::MATCH,
        }
    }

    /// Returns the underlying collection for every collection variant.
    pub fn as_collection(&self) -> Option<&Collection> {
        match self {
            Self::Collection(collection) => Some(collection),
            Self::Set(set) => Some(set.as_collection()),
            Self::Map(map) => Some(map.as_collection()),
            Self::MutableCollection(collection) => Some(collection.as_collection()),
            _ => None,
        }
    }

    fn layer(&self) -> Result<Layer, Error> {
        match self {
            Self::Collection(collection) => collection.flatten().map(Layer::Resolved),
            Self::Set(set) => set.flatten().map(Layer::Resolved),
            Self::Map(map) => map.flatten().map(Layer::Resolved),
            Self::MutableCollection(collection) => collection.flatten().map(Layer::Resolved),
            other => other.value().map(Layer::Wrapped),
        }
    }
}

/// Resolves `value` until it is neither deferred nor monadic.
///
/// Deferred computations are invoked, nested entities are unwrapped one
/// layer at a time. The loop is iterative, so nesting depth is bounded only
/// by the input.
///
/// # Errors
///
/// Propagates errors raised by deferred computations and access errors from
/// empty variants.
pub fn flatten_value(value: Value) -> Result<Value, Error> {
    let mut current = value;
    loop {
        current = match current {
            Value::Function(function) if function.is_deferred() => function.call(&[])?,
            Value::Monad(monad) => match monad.layer()? {
                Layer::Wrapped(inner) => inner,
                Layer::Resolved(resolved) => return Ok(resolved),
            },
            resolved => return Ok(resolved),
        };
    }
}

macro_rules! monad_variant {
    ($($wrapper:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$wrapper> for Monad {
                fn from(value: $wrapper) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

monad_variant!(
    Identity => Identity,
    FOption => Option,
    FTry => Try,
    Collection => Collection,
    Set => Set,
    Map => Map,
    MutableCollection => MutableCollection,
    Match => Match,
);

static_assertions::assert_impl_all!(Monad: Send, Sync, Clone, Eq, std::hash::Hash);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn nest(value: Value, depth: usize) -> Value {
        (0..depth).fold(value, |inner, _| Value::from(Identity::new(inner)))
    }

    #[rstest]
    fn flatten_invokes_deferred_values() {
        let deferred = Value::from(Function::deferred(|| Ok(Value::from("foo"))));
        assert_eq!(flatten_value(deferred), Ok(Value::from("foo")));
    }

    #[rstest]
    fn flatten_resolves_deferred_returning_monad() {
        let deferred = Value::from(Function::deferred(|| Ok(Value::from(Identity::new(3)))));
        assert_eq!(flatten_value(deferred), Ok(Value::from(3)));
    }

    #[rstest]
    fn flatten_unwraps_deep_nesting_iteratively() {
        let nested = nest(Value::from(7), 1_000);
        assert_eq!(flatten_value(nested), Ok(Value::from(7)));
    }

    #[rstest]
    fn flatten_of_none_is_an_access_error() {
        assert_eq!(
            flatten_value(Value::from(FOption::None)),
            Err(Error::ValueAccess)
        );
    }

    #[rstest]
    fn flatten_keeps_non_deferred_functions() {
        let function = Function::lift(|value| value.clone());
        assert_eq!(
            flatten_value(Value::from(function.clone())),
            Ok(Value::from(function))
        );
    }

    #[rstest]
    fn monad_bind_keeps_family() {
        let monad = Monad::from(Identity::new(2));
        let bound = monad
            .bind(&Function::lift(|value| value.as_int().unwrap_or(0) + 1), &[])
            .unwrap();
        assert_eq!(bound, Monad::Identity(Identity::new(3)));
    }

    #[rstest]
    fn type_token_reports_variant() {
        assert_eq!(Monad::from(FOption::None).type_token(), TypeToken::NONE);
        assert_eq!(
            Monad::from(FTry::failure(Error::raised("x"))).type_token(),
            TypeToken::FAILURE
        );
    }
}
