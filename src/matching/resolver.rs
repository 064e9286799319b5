//! Resolution of type names to [`TypeToken`]s.
//!
//! Resolving a name is an injectable capability: the match engine and typed
//! collections ask a [`TypeResolver`], and an unknown name is reported as
//! [`Unresolvable`] rather than as a failure of the caller.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use super::TypeToken;

/// The separator used in fully qualified type names.
pub const NAMESPACE_SEPARATOR: &str = "::";

/// The placeholder accepted in tags in place of [`NAMESPACE_SEPARATOR`].
pub const NAMESPACE_PLACEHOLDER: char = '_';

/// A name that no type is registered under.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unresolvable type tag: {tag}")]
pub struct Unresolvable {
    /// The tag as given.
    pub tag: String,
}

impl Unresolvable {
    /// Creates the error for `tag`.
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }
}

/// Decides which type a name denotes.
pub trait TypeResolver: Send + Sync {
    /// Resolves a fully qualified type name.
    ///
    /// # Errors
    ///
    /// Returns [`Unresolvable`] when no type is known under `name`.
    fn resolve(&self, name: &str) -> Result<TypeToken, Unresolvable>;
}

/// Translates the namespace placeholder of a tag into the real separator,
/// e.g. `monadic_Identity` into `monadic::Identity`.
pub fn qualify(tag: &str) -> String {
    tag.replace(NAMESPACE_PLACEHOLDER, NAMESPACE_SEPARATOR)
}

/// A name-keyed table of [`TypeToken`]s. Lookups ignore ASCII case.
///
/// # Examples
///
/// ```rust
/// use monadic::matching::{TypeRegistry, TypeResolver, TypeToken};
///
/// struct Invoice;
///
/// let mut registry = TypeRegistry::builtin();
/// registry.register_as::<Invoice>("billing::Invoice");
///
/// assert_eq!(registry.resolve("billing::invoice"), Ok(TypeToken::of::<Invoice>()));
/// assert_eq!(registry.resolve("monadic::Some"), Ok(TypeToken::SOME));
/// assert!(registry.resolve("billing::Receipt").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: HashMap<String, TypeToken>,
}

static SHARED: LazyLock<Arc<TypeRegistry>> = LazyLock::new(|| Arc::new(TypeRegistry::builtin()));

impl TypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry knowing the crate's own types.
    ///
    /// [`Match`](super::Match) is also registered as `monadic::FMatch`.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for token in TypeToken::BUILTIN {
            registry.register_token(token.name(), token);
        }
        registry.register_token("monadic::FMatch", TypeToken::MATCH);
        registry
    }

    /// Returns the process-wide builtin registry used by default.
    pub fn shared() -> Arc<dyn TypeResolver> {
        Arc::clone(&*SHARED) as Arc<dyn TypeResolver>
    }

    /// Registers `T` under its Rust type path.
    pub fn register<T: Any>(&mut self) -> &mut Self {
        let token = TypeToken::of::<T>();
        self.register_token(token.name(), token)
    }

    /// Registers `T` under `name`.
    pub fn register_as<T: Any>(&mut self, name: &str) -> &mut Self {
        self.register_token(name, TypeToken::of::<T>())
    }

    /// Registers an arbitrary token under `name`, replacing any previous one.
    pub fn register_token(&mut self, name: &str, token: TypeToken) -> &mut Self {
        self.types.insert(name.to_ascii_lowercase(), token);
        self
    }

    /// Returns the number of registered names.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeResolver for TypeRegistry {
    fn resolve(&self, name: &str) -> Result<TypeToken, Unresolvable> {
        self.types
            .get(&name.to_ascii_lowercase())
            .copied()
            .ok_or_else(|| Unresolvable::new(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct Ledger;

    #[rstest]
    #[case("monadic_Identity", "monadic::Identity")]
    #[case("monadic_collection_Set", "monadic::collection::Set")]
    #[case("Plain", "Plain")]
    fn qualify_translates_placeholder(#[case] tag: &str, #[case] expected: &str) {
        assert_eq!(qualify(tag), expected);
    }

    #[rstest]
    fn builtin_registry_resolves_every_builtin_token() {
        let registry = TypeRegistry::builtin();
        for token in TypeToken::BUILTIN {
            assert_eq!(registry.resolve(token.name()), Ok(token));
        }
        assert_eq!(registry.resolve("monadic::FMatch"), Ok(TypeToken::MATCH));
    }

    #[rstest]
    fn lookups_ignore_case() {
        let registry = TypeRegistry::builtin();
        assert_eq!(registry.resolve("MONADIC::identity"), Ok(TypeToken::IDENTITY));
    }

    #[rstest]
    fn unknown_names_are_unresolvable() {
        assert_eq!(
            TypeRegistry::new().resolve("monadic::Identity"),
            Err(Unresolvable::new("monadic::Identity"))
        );
    }

    #[rstest]
    fn register_uses_the_type_path() {
        let mut registry = TypeRegistry::new();
        registry.register::<Ledger>();
        assert_eq!(
            registry.resolve(std::any::type_name::<Ledger>()),
            Ok(TypeToken::of::<Ledger>())
        );
        assert_eq!(registry.len(), 1);
    }

    #[rstest]
    fn shared_registry_is_builtin() {
        assert_eq!(
            TypeRegistry::shared().resolve("monadic::None"),
            Ok(TypeToken::NONE)
        );
    }
}
