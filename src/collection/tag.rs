//! Element type tags of typed collections.

use std::fmt;

use crate::error::Error;
use crate::matching::{NativeKind, TypeResolver, TypeToken, qualify};
use crate::value::Value;

/// The declared element type of a collection.
///
/// `Null` is only admitted by the `null` kind.
///
/// # Examples
///
/// ```rust
/// use monadic::collection::TypeTag;
/// use monadic::matching::{NativeKind, TypeRegistry};
/// use monadic::value::Value;
///
/// let tag = TypeTag::parse("int", TypeRegistry::shared().as_ref())?;
/// assert_eq!(tag, TypeTag::Native(NativeKind::Integer));
/// assert!(tag.admits(&Value::from(3)));
/// assert!(!tag.admits(&Value::Null));
/// assert!(!tag.admits(&Value::from("3")));
/// # Ok::<(), monadic::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// A native kind.
    Native(NativeKind),
    /// A type identity.
    Instance(TypeToken),
}

impl TypeTag {
    /// Parses a textual tag: a native kind if it names one, otherwise a type
    /// name resolved through `resolver` (verbatim, then with the namespace
    /// placeholder translated).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTypeTag`] when the name resolves to nothing.
    pub fn parse(tag: &str, resolver: &dyn TypeResolver) -> Result<Self, Error> {
        if let Some(kind) = NativeKind::parse(tag) {
            return Ok(Self::Native(kind));
        }
        resolver
            .resolve(tag)
            .or_else(|_| resolver.resolve(&qualify(tag)))
            .map(Self::Instance)
            .map_err(|_| Error::UnknownTypeTag(tag.to_owned()))
    }

    /// Infers the tag of a single element. `Null` has none.
    pub fn infer(value: &Value) -> Option<Self> {
        if let Some(kind) = NativeKind::of(value) {
            return Some(Self::Native(kind));
        }
        match value {
            Value::Object(object) => Some(Self::Instance(object.type_token())),
            Value::Monad(monad) => Some(Self::Instance(monad.type_token())),
            Value::Error(_) => Some(Self::Instance(TypeToken::ERROR)),
            _ => None,
        }
    }

    /// Returns `true` if `value` may be stored under this tag.
    pub fn admits(&self, value: &Value) -> bool {
        match self {
            Self::Native(kind) => kind.matches(value),
            Self::Instance(token) => token.matches(value),
        }
    }

    /// Returns the tag's name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Native(kind) => kind.name(),
            Self::Instance(token) => token.name(),
        }
    }
}

impl From<NativeKind> for TypeTag {
    fn from(kind: NativeKind) -> Self {
        Self::Native(kind)
    }
}

impl From<TypeToken> for TypeTag {
    fn from(token: TypeToken) -> Self {
        Self::Instance(token)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::{TypeRegistry, TypeResolver};
    use crate::monad::{FOption, Identity};
    use rstest::rstest;

    struct Ticket;

    #[rstest]
    #[case(Value::from("a"), TypeTag::Native(NativeKind::String))]
    #[case(Value::from(1), TypeTag::Native(NativeKind::Integer))]
    #[case(Value::from(1.5), TypeTag::Native(NativeKind::Float))]
    #[case(Value::from(false), TypeTag::Native(NativeKind::Boolean))]
    #[case(Value::from(Identity::new(1)), TypeTag::Instance(TypeToken::IDENTITY))]
    #[case(Value::from(FOption::None), TypeTag::Instance(TypeToken::NONE))]
    fn infer_by_element(#[case] value: Value, #[case] expected: TypeTag) {
        assert_eq!(TypeTag::infer(&value), Some(expected));
    }

    #[rstest]
    fn null_has_no_tag() {
        assert_eq!(TypeTag::infer(&Value::Null), None);
    }

    #[rstest]
    #[case(TypeTag::Native(NativeKind::Integer), false)]
    #[case(TypeTag::Native(NativeKind::String), false)]
    #[case(TypeTag::Instance(TypeToken::IDENTITY), false)]
    #[case(TypeTag::Native(NativeKind::Null), true)]
    fn null_is_admitted_only_by_the_null_kind(#[case] tag: TypeTag, #[case] expected: bool) {
        assert_eq!(tag.admits(&Value::Null), expected);
    }

    #[rstest]
    fn host_objects_infer_their_token() {
        assert_eq!(
            TypeTag::infer(&Value::object(Ticket)),
            Some(TypeTag::Instance(TypeToken::of::<Ticket>()))
        );
    }

    #[rstest]
    fn parse_resolves_type_names() {
        let resolver = TypeRegistry::builtin();
        assert_eq!(
            TypeTag::parse("monadic_Identity", &resolver),
            Ok(TypeTag::Instance(TypeToken::IDENTITY))
        );
        assert_eq!(
            TypeTag::parse("Nowhere", &resolver),
            Err(Error::UnknownTypeTag("Nowhere".to_owned()))
        );
    }

    #[rstest]
    fn parse_uses_the_injected_resolver() {
        let mut registry = TypeRegistry::new();
        registry.register_as::<Ticket>("desk::Ticket");
        let resolver: &dyn TypeResolver = &registry;
        let tag = TypeTag::parse("desk_Ticket", resolver).unwrap();
        assert!(tag.admits(&Value::object(Ticket)));
        assert!(tag.to_string().ends_with("Ticket"));
    }
}
