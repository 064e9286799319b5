//! The fluent pattern-matching engine.
//!
//! [`Match`] holds a value and a matched flag. Each chained test either
//! passes through unchanged, once something has matched, or evaluates a
//! predicate against the held value and, on success, marks the chain
//! matched and optionally replaces the value through a [`Handler`]. The
//! first matching test wins and at most one handler runs per chain.
//!
//! Predicates come in three explicit forms:
//!
//! - [`NativeKind`]: a closed vocabulary of runtime kinds, with a fluent
//!   shortcut per alias (`.string()`, `.int()`, `.bool_with(..)`, ...)
//! - [`TypeToken`]: a type-identity test
//! - a textual tag ([`Match::tag`]): a native kind if the tag names one,
//!   otherwise a type name resolved through the chain's [`TypeResolver`].
//!   An unresolvable name simply does not match.
//!
//! # Examples
//!
//! ```rust
//! use monadic::prelude::*;
//!
//! let result = Match::on(true)
//!     .string()
//!     .int()
//!     .bool_with(Function::deferred(|| Ok(Value::from("foo"))))?
//!     .current()
//!     .clone();
//! assert_eq!(result, Value::from("foo"));
//!
//! let unmatched = Match::on(42).tag("monadic_Identity");
//! assert!(!unmatched.is_matched());
//! assert!(unmatched.any().is_matched());
//! # Ok::<(), monadic::Error>(())
//! ```

mod kind;
mod resolver;
mod token;

pub use kind::NativeKind;
pub use resolver::{
    NAMESPACE_PLACEHOLDER, NAMESPACE_SEPARATOR, TypeRegistry, TypeResolver, Unresolvable, qualify,
};
pub use token::TypeToken;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::error::Error;
use crate::monad::{ApplicationTarget, Monad, Monadic, apply_function};
use crate::value::{Function, Value};

/// What a successful test does to the held value.
#[derive(Debug, Clone, Default)]
pub enum Handler {
    /// Keep the held value.
    #[default]
    Keep,
    /// Replace the held value with a literal.
    Replace(Value),
    /// Replace the held value with the result of applying a function to it,
    /// with `args` appended.
    Apply {
        /// The function to apply.
        function: Function,
        /// Extra arguments passed after the held value.
        args: Vec<Value>,
    },
}

impl Handler {
    /// A literal replacement.
    pub fn replace(value: impl Into<Value>) -> Self {
        Self::Replace(value.into())
    }

    /// Applies `function` with extra `args`.
    pub const fn apply_with(function: Function, args: Vec<Value>) -> Self {
        Self::Apply { function, args }
    }
}

impl From<Function> for Handler {
    fn from(function: Function) -> Self {
        Self::apply_with(function, Vec::new())
    }
}

/// A function value is applied; any other value is a literal replacement.
impl From<Value> for Handler {
    fn from(value: Value) -> Self {
        match value {
            Value::Function(function) => Self::from(function),
            other => Self::Replace(other),
        }
    }
}

/// A fluent, first-match-wins dispatcher over a [`Value`].
///
/// Every method returns a new `Match`; the receiver is consumed, and can be
/// cloned beforehand to branch a chain.
#[derive(Clone)]
pub struct Match {
    value: Value,
    matched: bool,
    resolver: Arc<dyn TypeResolver>,
}

/// The same engine under its alternate name.
pub type FMatch = Match;

impl Match {
    /// Starts an unmatched chain on `value`, resolving type tags through the
    /// [shared builtin registry](TypeRegistry::shared).
    pub fn on(value: impl Into<Value>) -> Self {
        Self::on_with_resolver(value, TypeRegistry::shared())
    }

    /// Starts an unmatched chain on `value` with an injected resolver.
    pub fn on_with_resolver(value: impl Into<Value>, resolver: Arc<dyn TypeResolver>) -> Self {
        Self {
            value: value.into(),
            matched: false,
            resolver,
        }
    }

    /// Starts a chain on `value`, returning it unchanged if it already is a
    /// `Match`.
    pub fn create(value: impl Into<Value>) -> Self {
        match value.into() {
            Value::Monad(monad) => match monad.as_ref() {
                Monad::Match(matcher) => matcher.clone(),
                _ => Self::on(Value::Monad(monad)),
            },
            other => Self::on(other),
        }
    }

    /// Returns `true` once a test has matched.
    pub const fn is_matched(&self) -> bool {
        self.matched
    }

    /// Borrows the held value.
    pub const fn current(&self) -> &Value {
        &self.value
    }

    /// Consumes the chain and returns the held value.
    pub fn into_current(self) -> Value {
        self.value
    }

    /// Tests the held value against a native kind.
    pub fn kind(self, kind: NativeKind) -> Self {
        self.probe(|value| kind.matches(value))
    }

    /// Tests the held value against a native kind, running `handler` on a
    /// match.
    ///
    /// # Errors
    ///
    /// Errors raised by the handler propagate.
    pub fn kind_with(self, kind: NativeKind, handler: impl Into<Handler>) -> Result<Self, Error> {
        self.dispatch(|value| kind.matches(value), handler.into())
    }

    /// Tests whether the held value is an instance of `token`.
    pub fn instance_of(self, token: &TypeToken) -> Self {
        self.probe(|value| token.matches(value))
    }

    /// Tests whether the held value is an instance of `token`, running
    /// `handler` on a match.
    ///
    /// # Errors
    ///
    /// Errors raised by the handler propagate.
    pub fn instance_of_with(
        self,
        token: &TypeToken,
        handler: impl Into<Handler>,
    ) -> Result<Self, Error> {
        self.dispatch(|value| token.matches(value), handler.into())
    }

    /// Tests the held value against a textual tag.
    ///
    /// A native-kind tag is tried first; any other tag is resolved as a type
    /// name, verbatim and then with the namespace placeholder translated.
    /// A tag that resolves to nothing does not match.
    pub fn tag(self, tag: &str) -> Self {
        let resolver = Arc::clone(&self.resolver);
        self.probe(|value| tag_matches(resolver.as_ref(), tag, value))
    }

    /// Tests the held value against a textual tag, running `handler` on a
    /// match.
    ///
    /// # Errors
    ///
    /// Errors raised by the handler propagate.
    pub fn tag_with(self, tag: &str, handler: impl Into<Handler>) -> Result<Self, Error> {
        let resolver = Arc::clone(&self.resolver);
        self.dispatch(|value| tag_matches(resolver.as_ref(), tag, value), handler.into())
    }

    /// Tests the held value for strict equality with `literal`.
    pub fn test(self, literal: impl Into<Value>) -> Self {
        let literal = literal.into();
        self.probe(|value| *value == literal)
    }

    /// Tests the held value for strict equality with `literal`, running
    /// `handler` on a match.
    ///
    /// # Errors
    ///
    /// Errors raised by the handler propagate.
    pub fn test_with(
        self,
        literal: impl Into<Value>,
        handler: impl Into<Handler>,
    ) -> Result<Self, Error> {
        let literal = literal.into();
        self.dispatch(|value| *value == literal, handler.into())
    }

    /// Matches anything not matched before.
    pub fn any(self) -> Self {
        self.probe(|_| true)
    }

    /// Matches anything not matched before, running `handler`.
    ///
    /// # Errors
    ///
    /// Errors raised by the handler propagate.
    pub fn any_with(self, handler: impl Into<Handler>) -> Result<Self, Error> {
        self.dispatch(|_| true, handler.into())
    }

    fn probe(self, predicate: impl FnOnce(&Value) -> bool) -> Self {
        if self.matched || !predicate(&self.value) {
            return self;
        }
        tracing::trace!(value = ?self.value, "match engine test matched");
        Self {
            matched: true,
            ..self
        }
    }

    fn dispatch(
        self,
        predicate: impl FnOnce(&Value) -> bool,
        handler: Handler,
    ) -> Result<Self, Error> {
        if self.matched || !predicate(&self.value) {
            return Ok(self);
        }
        tracing::trace!(value = ?self.value, "match engine test matched, running handler");
        let value = match handler {
            Handler::Keep => self.value,
            Handler::Replace(literal) => literal,
            Handler::Apply { function, args } => {
                apply_function(&function, ApplicationTarget::classify(&self.value), &args)?
            }
        };
        Ok(Self {
            value,
            matched: true,
            resolver: self.resolver,
        })
    }
}

fn tag_matches(resolver: &dyn TypeResolver, tag: &str, value: &Value) -> bool {
    if let Some(kind) = NativeKind::parse(tag) {
        return kind.matches(value);
    }
    resolver
        .resolve(tag)
        .or_else(|_| resolver.resolve(&qualify(tag)))
        .is_ok_and(|token| token.matches(value))
}

macro_rules! native_kind_shortcuts {
    ($($name:ident => $kind:ident),* $(,)?) => {
        paste::paste! {
            impl Match {
                $(
                    #[doc = concat!("Tests the held value against [`NativeKind::", stringify!($kind), "`].")]
                    pub fn $name(self) -> Self {
                        self.kind(NativeKind::$kind)
                    }

                    #[doc = concat!(
                        "Tests the held value against [`NativeKind::",
                        stringify!($kind),
                        "`], running `handler` on a match.\n\n# Errors\n\nErrors raised by the handler propagate."
                    )]
                    pub fn [<$name _with>](self, handler: impl Into<Handler>) -> Result<Self, Error> {
                        self.kind_with(NativeKind::$kind, handler)
                    }
                )*
            }
        }
    };
}

native_kind_shortcuts!(
    string => String,
    integer => Integer,
    int => Integer,
    long => Integer,
    float => Float,
    double => Float,
    real => Float,
    null => Null,
    array => Array,
    boolean => Boolean,
    bool => Boolean,
    callable => Callable,
    function => Callable,
    closure => Callable,
    file => File,
    dir => Directory,
    directory => Directory,
    object => Object,
    scalar => Scalar,
    numeric => Numeric,
    resource => Resource,
);

impl Monadic for Match {
    fn value(&self) -> Result<Value, Error> {
        Ok(self.value.clone())
    }

    /// Applies `function` whatever the match state; the matched flag is
    /// carried over.
    fn bind(&self, function: &Function, args: &[Value]) -> Result<Self, Error> {
        let value = apply_function(function, ApplicationTarget::classify(&self.value), args)?;
        Ok(Self {
            value,
            matched: self.matched,
            resolver: Arc::clone(&self.resolver),
        })
    }
}

impl PartialEq for Match {
    fn eq(&self, other: &Self) -> bool {
        self.matched == other.matched && self.value == other.value
    }
}

impl Eq for Match {}

impl Hash for Match {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.matched.hash(state);
        self.value.hash(state);
    }
}

impl fmt::Debug for Match {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Match")
            .field("value", &self.value)
            .field("matched", &self.matched)
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(Match: Send, Sync, Clone);
