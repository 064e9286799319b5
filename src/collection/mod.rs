//! Typed, immutable collections.
//!
//! A [`Collection`] is an ordered mapping from [`Key`] to [`Value`] whose
//! elements all satisfy a [`TypeTag`], either declared or inferred from the
//! first non-null element. Three variants share its representation:
//!
//! - [`Set`]: values are unique, keys are `0..n`
//! - [`Map`]: keys are all strings
//! - [`MutableCollection`]: supports type-checked in-place `set`/`unset`
//!
//! The shared surface lives on [`CollectionLike`]. The array algebra is split
//! in two traits so that unsupported operations do not exist at all:
//! [`ValueAlgebra`] is not implemented by `Map` and [`KeyAlgebra`] is not
//! implemented by `Set`.
//!
//! # Examples
//!
//! ```rust
//! use monadic::prelude::*;
//!
//! let numbers = Collection::from_values([1, 2, 3])?;
//! let doubled = numbers.each(&Function::lift(|value| value.as_int().unwrap_or(0) * 2), &[])?;
//! assert_eq!(doubled.to_array(), Collection::from_values([2, 4, 6])?.to_array());
//!
//! let sum = numbers.reduce(
//!     &Function::binary(|carry, value| {
//!         Ok(Value::from(carry.as_int().unwrap_or(0) + value.as_int().unwrap_or(0)))
//!     }),
//!     0,
//! )?;
//! assert_eq!(sum, Value::from(6));
//!
//! assert!(Collection::from_values([Value::from(1), Value::from("two")]).is_err());
//! # Ok::<(), monadic::Error>(())
//! ```

/// Generates the constructors every collection variant shares.
macro_rules! collection_constructors {
    ($variant:ident) => {
        impl $variant {
            /// Creates a collection, inferring the element type from the
            /// first non-null element.
            ///
            /// # Errors
            ///
            /// Returns [`Error::UntypedCollection`] when no element is
            /// non-null, [`Error::TypeMismatch`] when an element does not
            /// match the inferred type, or the variant's own construction
            /// error.
            pub fn new(entries: Array) -> Result<Self, Error> {
                <Self as $crate::collection::sealed::Variant>::from_collection(
                    Collection::inferred(entries)?,
                )
            }

            /// Creates a collection with a declared element type.
            ///
            /// # Errors
            ///
            /// Returns [`Error::TypeMismatch`] naming the first offending
            /// key, or the variant's own construction error.
            pub fn typed(entries: Array, tag: impl Into<TypeTag>) -> Result<Self, Error> {
                <Self as $crate::collection::sealed::Variant>::from_collection(
                    Collection::build(entries, tag.into())?,
                )
            }

            /// Creates a collection with an element type given as text,
            /// resolved through `resolver`.
            ///
            /// # Errors
            ///
            /// Returns [`Error::UnknownTypeTag`] for an unresolvable tag,
            /// otherwise as [`typed`](Self::typed).
            pub fn with_tag(
                entries: Array,
                tag: &str,
                resolver: &dyn TypeResolver,
            ) -> Result<Self, Error> {
                Self::typed(entries, TypeTag::parse(tag, resolver)?)
            }

            /// Creates a collection of `values` keyed `0..n`.
            ///
            /// # Errors
            ///
            /// As [`new`](Self::new).
            pub fn from_values<I, V>(values: I) -> Result<Self, Error>
            where
                I: IntoIterator<Item = V>,
                V: Into<Value>,
            {
                Self::new($crate::value::indexed(values))
            }

            /// Creates a collection from key/value pairs, in order.
            ///
            /// # Errors
            ///
            /// As [`new`](Self::new).
            pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, Error>
            where
                I: IntoIterator<Item = (K, V)>,
                K: Into<Key>,
                V: Into<Value>,
            {
                Self::new(
                    pairs
                        .into_iter()
                        .map(|(key, value)| (key.into(), value.into()))
                        .collect(),
                )
            }

            /// Creates a collection from any value: an array becomes the
            /// entries, another collection variant is converted, anything
            /// else becomes a single element. A value that already is this
            /// variant is returned unchanged.
            ///
            /// # Errors
            ///
            /// As [`new`](Self::new).
            pub fn create(value: impl Into<Value>) -> Result<Self, Error> {
                match value.into() {
                    Value::Monad(monad) => {
                        if let Some(existing) =
                            <Self as $crate::collection::sealed::Variant>::from_monad(&monad)
                        {
                            return Ok(existing.clone());
                        }
                        match monad.as_collection() {
                            Some(collection) => {
                                <Self as $crate::collection::sealed::Variant>::from_collection(
                                    collection.clone(),
                                )
                            }
                            None => Self::from_values([Value::Monad(monad)]),
                        }
                    }
                    Value::Array(entries) => Self::new(entries),
                    other => Self::from_values([other]),
                }
            }
        }
    };
}

mod map;
mod mutable;
mod set;
mod tag;

pub use map::Map;
pub use mutable::MutableCollection;
pub use set::Set;
pub use tag::TypeTag;

use std::hash::{Hash, Hasher};

use crate::error::Error;
use crate::matching::TypeResolver;
use crate::monad::{ApplicationTarget, Monad, Monadic, apply_function, flatten_value};
use crate::value::{Array, Function, Key, Value, arrays_identical, hash_array, indexed};

#[cfg(feature = "fxhash")]
type Seen<'a> = rustc_hash::FxHashSet<&'a Value>;

#[cfg(not(feature = "fxhash"))]
type Seen<'a> = std::collections::HashSet<&'a Value>;

/// An immutable, typed, ordered collection.
///
/// Equality is strict: two collections are equal when their tags match and
/// their entries are identical in order.
#[derive(Debug, Clone)]
pub struct Collection {
    entries: Array,
    tag: TypeTag,
}

impl Collection {
    fn inferred(entries: Array) -> Result<Self, Error> {
        let Some(tag) = entries.values().find_map(TypeTag::infer) else {
            tracing::debug!("rejected collection without a non-null element");
            return Err(Error::UntypedCollection);
        };
        Self::build(entries, tag)
    }

    fn build(entries: Array, tag: TypeTag) -> Result<Self, Error> {
        if let Some((key, _)) = entries.iter().find(|(_, value)| !tag.admits(value)) {
            tracing::debug!(%key, %tag, "rejected collection element");
            return Err(Error::TypeMismatch {
                key: key.clone(),
                expected: tag.to_string(),
            });
        }
        Ok(Self { entries, tag })
    }
}

collection_constructors!(Collection);

mod sealed {
    use super::Collection;
    use crate::error::Error;
    use crate::monad::Monad;

    pub trait Variant: Sized {
        /// Converts a validated collection into this variant, enforcing the
        /// variant's own invariant.
        fn from_collection(collection: Collection) -> Result<Self, Error>;

        /// Borrows this variant out of a monadic entity.
        fn from_monad(monad: &Monad) -> Option<&Self>;
    }

    impl Variant for Collection {
        fn from_collection(collection: Collection) -> Result<Self, Error> {
            Ok(collection)
        }

        fn from_monad(monad: &Monad) -> Option<&Self> {
            match monad {
                Monad::Collection(collection) => Some(collection),
                _ => None,
            }
        }
    }
}

/// The surface shared by every collection variant.
///
/// Operations that derive a new collection keep the receiver's element type
/// and variant, and fail if the derived entries violate either.
pub trait CollectionLike: Monadic + sealed::Variant {
    /// Borrows the underlying collection.
    fn as_collection(&self) -> &Collection;

    /// Returns the element type.
    fn tag(&self) -> TypeTag {
        self.as_collection().tag
    }

    /// Copies the entries out.
    fn to_array(&self) -> Array {
        self.as_collection().entries.clone()
    }

    /// Looks up an element.
    fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        self.as_collection().entries.get(&key.into())
    }

    /// Returns `true` if `key` is present.
    fn contains_key(&self, key: impl Into<Key>) -> bool {
        self.as_collection().entries.contains_key(&key.into())
    }

    /// Returns the number of elements.
    fn len(&self) -> usize {
        self.as_collection().entries.len()
    }

    /// Returns `true` if there are no elements.
    fn is_empty(&self) -> bool {
        self.as_collection().entries.is_empty()
    }

    /// Iterates over the entries in order.
    fn iter(&self) -> indexmap::map::Iter<'_, Key, Value> {
        self.as_collection().entries.iter()
    }

    /// Applies `function` to every element, keeping keys.
    ///
    /// Elements that are monadic entities of another family delegate to
    /// their own `bind`. The receiver's element type is kept when every
    /// result satisfies it, otherwise it is re-inferred from the results.
    ///
    /// # Errors
    ///
    /// Errors raised by `function` propagate, as do construction errors of
    /// the result.
    fn each(&self, function: &Function, args: &[Value]) -> Result<Self, Error> {
        let entries = self
            .iter()
            .map(|(key, value)| {
                apply_function(function, ApplicationTarget::within_collection(value), args)
                    .map(|result| (key.clone(), result))
            })
            .collect::<Result<Array, Error>>()?;
        let current = self.tag();
        let tag = if entries.values().all(|value| current.admits(value)) {
            current
        } else {
            entries
                .values()
                .find_map(TypeTag::infer)
                .unwrap_or(current)
        };
        Self::from_collection(Collection::build(entries, tag)?)
    }

    /// Folds the elements with a binary `function(carry, element)`.
    ///
    /// # Errors
    ///
    /// Errors raised by `function` propagate.
    fn reduce(&self, function: &Function, initial: impl Into<Value>) -> Result<Value, Error> {
        self.iter()
            .try_fold(initial.into(), |carry, (_, value)| {
                function.call(&[carry, value.clone()])
            })
    }

    /// Keeps the elements satisfying `predicate`, with their keys.
    ///
    /// # Errors
    ///
    /// Construction errors of the result.
    fn filter(&self, mut predicate: impl FnMut(&Value) -> bool) -> Result<Self, Error> {
        let entries = self
            .iter()
            .filter(|&(_, value)| predicate(value))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        rebuild(self, entries)
    }

    /// Returns the first element. Integer keys are renumbered.
    ///
    /// # Errors
    ///
    /// Construction errors of the result.
    fn head(&self) -> Result<Self, Error> {
        rebuild(self, renumber(self.iter().take(1)))
    }

    /// Returns every element but the first. Integer keys are renumbered.
    ///
    /// # Errors
    ///
    /// Construction errors of the result.
    fn tail(&self) -> Result<Self, Error> {
        rebuild(self, renumber(self.iter().skip(1)))
    }

    /// Appends the elements of `other`. Integer keys are renumbered and
    /// later string keys overwrite earlier ones in place.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] when an element of `other` does not match the
    /// receiver's element type.
    fn append(&self, other: &impl CollectionLike) -> Result<Self, Error> {
        rebuild(self, renumber(self.iter().chain(other.iter())))
    }

    /// Swaps keys and values. Later duplicates overwrite earlier ones.
    ///
    /// # Errors
    ///
    /// [`Error::NotAKey`] when a value is neither an integer nor a string,
    /// [`Error::TypeMismatch`] when the former keys mix integers and
    /// strings.
    fn flip(&self) -> Result<Collection, Error> {
        let entries = self
            .iter()
            .map(|(key, value)| {
                Key::from_value(value)
                    .map(|flipped| (flipped, Value::from(key.clone())))
                    .ok_or_else(|| Error::NotAKey { key: key.clone() })
            })
            .collect::<Result<Array, Error>>()?;
        Collection::inferred(entries)
    }
}

/// Set algebra on element values. Keys of the receiver are preserved.
pub trait ValueAlgebra: CollectionLike {
    /// Keeps the elements whose value does not occur in `other`.
    ///
    /// # Errors
    ///
    /// Construction errors of the result.
    fn v_diff(&self, other: &impl CollectionLike) -> Result<Self, Error> {
        let excluded: Seen<'_> = other.iter().map(|(_, value)| value).collect();
        retain(self, |_, value| !excluded.contains(value))
    }

    /// Keeps the elements for which no element of `other` is `equal`.
    ///
    /// # Errors
    ///
    /// Construction errors of the result.
    fn v_diff_by(
        &self,
        other: &impl CollectionLike,
        equal: impl Fn(&Value, &Value) -> bool,
    ) -> Result<Self, Error> {
        retain(self, |_, value| {
            !other.iter().any(|(_, candidate)| equal(value, candidate))
        })
    }

    /// Keeps the elements whose value occurs in `other`.
    ///
    /// # Errors
    ///
    /// Construction errors of the result.
    fn v_intersect(&self, other: &impl CollectionLike) -> Result<Self, Error> {
        let included: Seen<'_> = other.iter().map(|(_, value)| value).collect();
        retain(self, |_, value| included.contains(value))
    }

    /// Keeps the elements for which some element of `other` is `equal`.
    ///
    /// # Errors
    ///
    /// Construction errors of the result.
    fn v_intersect_by(
        &self,
        other: &impl CollectionLike,
        equal: impl Fn(&Value, &Value) -> bool,
    ) -> Result<Self, Error> {
        retain(self, |_, value| {
            other.iter().any(|(_, candidate)| equal(value, candidate))
        })
    }

    /// Appends `other`, then drops repeated values keeping the first
    /// occurrence and its key.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] when an element of `other` does not match the
    /// receiver's element type.
    fn v_union(&self, other: &impl CollectionLike) -> Result<Self, Error> {
        let merged = renumber(self.iter().chain(other.iter()));
        let mut seen = Seen::default();
        let entries = merged
            .iter()
            .filter(|(_, value)| seen.insert(*value))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        rebuild(self, entries)
    }
}

/// Set algebra on keys.
pub trait KeyAlgebra: CollectionLike {
    /// Keeps the elements whose key is absent from `other`.
    ///
    /// # Errors
    ///
    /// Construction errors of the result.
    fn k_diff(&self, other: &impl CollectionLike) -> Result<Self, Error> {
        let keys = &other.as_collection().entries;
        retain(self, |key, _| !keys.contains_key(key))
    }

    /// Keeps the elements whose key is present in `other`.
    ///
    /// # Errors
    ///
    /// Construction errors of the result.
    fn k_intersect(&self, other: &impl CollectionLike) -> Result<Self, Error> {
        let keys = &other.as_collection().entries;
        retain(self, |key, _| keys.contains_key(key))
    }

    /// Adds the elements of `other` whose key is not already present.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] when an added element does not match the
    /// receiver's element type.
    fn k_union(&self, other: &impl CollectionLike) -> Result<Self, Error> {
        let mut entries = self.to_array();
        for (key, value) in other.iter() {
            entries
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
        rebuild(self, entries)
    }
}

fn rebuild<C: CollectionLike>(source: &C, entries: Array) -> Result<C, Error> {
    C::from_collection(Collection::build(entries, source.tag())?)
}

fn retain<C: CollectionLike>(
    source: &C,
    mut keep: impl FnMut(&Key, &Value) -> bool,
) -> Result<C, Error> {
    let entries = source
        .iter()
        .filter(|&(key, value)| keep(key, value))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    rebuild(source, entries)
}

/// Renumbers integer keys from zero in order; string keys are kept and a
/// repeated string key overwrites in place.
fn renumber<'a>(entries: impl Iterator<Item = (&'a Key, &'a Value)>) -> Array {
    let mut next = 0_i64;
    let mut renumbered = Array::new();
    for (key, value) in entries {
        let key = match key {
            Key::Int(_) => {
                let key = Key::Int(next);
                next += 1;
                key
            }
            Key::Str(_) => key.clone(),
        };
        renumbered.insert(key, value.clone());
    }
    renumbered
}

fn flatten_entries(collection: &Collection) -> Result<Array, Error> {
    collection
        .entries
        .iter()
        .map(|(key, value)| flatten_value(value.clone()).map(|flat| (key.clone(), flat)))
        .collect()
}

/// Applies `function` to the whole collection and wraps the result back
/// into the receiver's variant.
fn bind_family<C: CollectionLike>(
    source: &C,
    function: &Function,
    args: &[Value],
) -> Result<C, Error> {
    let own: Monad = source.clone().into();
    let result = apply_function(function, ApplicationTarget::Own(Value::from(own)), args)?;
    let collection = match result {
        Value::Monad(monad) => {
            if let Some(same) = C::from_monad(&monad) {
                return Ok(same.clone());
            }
            match monad.as_collection() {
                Some(collection) => collection.clone(),
                None => Collection::inferred(indexed([Value::Monad(monad)]))?,
            }
        }
        Value::Array(entries) => Collection::inferred(entries)?,
        other => Collection::inferred(indexed([other]))?,
    };
    C::from_collection(collection)
}

macro_rules! collection_monadic {
    ($($variant:ident),* $(,)?) => {
        $(
            impl Monadic for $variant {
                /// Returns the collection itself.
                fn value(&self) -> Result<Value, Error> {
                    Ok(Value::from(self.clone()))
                }

                /// Flattens every element, keeping keys, into a plain array.
                fn flatten(&self) -> Result<Value, Error> {
                    flatten_entries(self.as_collection()).map(Value::Array)
                }

                /// Applies `function` to the collection as one value. A
                /// collection result is converted to this variant, an array
                /// becomes the entries of a new collection and any other
                /// result becomes a single element.
                fn bind(&self, function: &Function, args: &[Value]) -> Result<Self, Error> {
                    bind_family(self, function, args)
                }
            }
        )*
    };
}

collection_monadic!(Collection, Set, Map, MutableCollection);

impl CollectionLike for Collection {
    fn as_collection(&self) -> &Collection {
        self
    }
}

impl ValueAlgebra for Collection {}

impl KeyAlgebra for Collection {}

impl PartialEq for Collection {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag && arrays_identical(&self.entries, &other.entries)
    }
}

impl Eq for Collection {}

impl Hash for Collection {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tag.hash(state);
        hash_array(&self.entries, state);
    }
}

static_assertions::assert_impl_all!(Collection: Send, Sync, Clone, Eq, Hash);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::{NativeKind, TypeRegistry, TypeToken};
    use crate::monad::{FOption, Identity};
    use rstest::{fixture, rstest};

    #[fixture]
    fn letters() -> Collection {
        Collection::from_values(["a", "b", "c"]).unwrap()
    }

    fn int(value: &Value) -> i64 {
        value.as_int().unwrap_or_default()
    }

    // =========================================================================
    // Construction
    // =========================================================================

    #[rstest]
    fn infers_tag_from_first_non_null_element() {
        let collection = Collection::from_pairs([("a", 1), ("b", 2)]).unwrap();
        assert_eq!(collection.tag(), TypeTag::Native(NativeKind::Integer));
        assert_eq!(collection.len(), 2);
    }

    #[rstest]
    #[case(vec![Value::Null, Value::from(1)], Key::Int(0))]
    #[case(vec![Value::from(1), Value::Null], Key::Int(1))]
    #[case(vec![Value::from(1), Value::from(2), Value::Null, Value::Null], Key::Int(2))]
    fn rejects_null_elements_under_inferred_tag(#[case] values: Vec<Value>, #[case] key: Key) {
        assert_eq!(
            Collection::from_values(values),
            Err(Error::TypeMismatch {
                key,
                expected: "integer".to_owned(),
            })
        );
    }

    #[rstest]
    fn rejects_null_elements_under_declared_tag() {
        let entries = indexed([Value::from("a"), Value::Null]);
        assert_eq!(
            Collection::typed(entries, NativeKind::String),
            Err(Error::TypeMismatch {
                key: Key::Int(1),
                expected: "string".to_owned(),
            })
        );
    }

    #[rstest]
    fn null_kind_collection_holds_nulls() {
        let nulls = Collection::typed(indexed([Value::Null, Value::Null]), NativeKind::Null).unwrap();
        assert_eq!(nulls.len(), 2);
    }

    #[rstest]
    fn rejects_mismatching_element_naming_key() {
        let result = Collection::from_pairs([("a", Value::from(1)), ("b", Value::from("x"))]);
        assert_eq!(
            result,
            Err(Error::TypeMismatch {
                key: Key::from("b"),
                expected: "integer".to_owned(),
            })
        );
    }

    #[rstest]
    #[case(Vec::new())]
    #[case(vec![Value::Null, Value::Null])]
    fn untyped_without_non_null_element(#[case] values: Vec<Value>) {
        assert_eq!(Collection::from_values(values), Err(Error::UntypedCollection));
    }

    #[rstest]
    fn empty_collection_with_declared_tag() {
        let empty = Collection::typed(Array::new(), NativeKind::String).unwrap();
        assert!(empty.is_empty());
    }

    #[rstest]
    fn with_tag_resolves_type_names() {
        let registry = TypeRegistry::builtin();
        let identities = Collection::with_tag(
            indexed([Identity::new(1), Identity::new(2)]),
            "monadic_Identity",
            &registry,
        )
        .unwrap();
        assert_eq!(identities.tag(), TypeTag::Instance(TypeToken::IDENTITY));

        assert_eq!(
            Collection::with_tag(indexed([1]), "nowhere", &registry),
            Err(Error::UnknownTypeTag("nowhere".to_owned()))
        );
    }

    #[rstest]
    fn create_is_idempotent(letters: Collection) {
        assert_eq!(Collection::create(letters.clone()), Ok(letters));
    }

    #[rstest]
    fn create_wraps_scalars_and_arrays() {
        assert_eq!(Collection::create("a").unwrap().len(), 1);
        assert_eq!(Collection::create(Value::list([1, 2])).unwrap().len(), 2);
    }

    // =========================================================================
    // Monadic protocol
    // =========================================================================

    #[rstest]
    fn value_is_the_collection_itself(letters: Collection) {
        assert_eq!(letters.value(), Ok(Value::from(letters.clone())));
    }

    #[rstest]
    fn flatten_resolves_every_element() {
        let collection = Collection::from_values([
            Value::from(Identity::new(1)),
            Value::from(Identity::new(Identity::new(2))),
        ])
        .unwrap();
        assert_eq!(collection.flatten(), Ok(Value::list([1, 2])));
    }

    #[rstest]
    fn flatten_invokes_deferred_elements() {
        let collection =
            Collection::from_values([Function::deferred(|| Ok(Value::from("x")))]).unwrap();
        assert_eq!(collection.flatten(), Ok(Value::list(["x"])));
    }

    #[rstest]
    fn bind_applies_to_the_whole_collection(letters: Collection) {
        let count = Function::unary(|value| {
            let size = value
                .as_monad()
                .and_then(Monad::as_collection)
                .map_or(0, CollectionLike::len);
            Ok(Value::from(i64::try_from(size).unwrap_or_default()))
        });
        let bound = letters.bind(&count, &[]).unwrap();
        assert_eq!(bound.to_array(), indexed([3]));
    }

    #[rstest]
    fn bind_returning_array_builds_new_collection(letters: Collection) {
        let reverse = Function::unary(|value| {
            let collection = value.as_monad().and_then(Monad::as_collection);
            Ok(Value::list(
                collection
                    .map(|collection| {
                        collection
                            .iter()
                            .rev()
                            .map(|(_, item)| item.clone())
                            .collect::<Vec<Value>>()
                    })
                    .unwrap_or_else(Vec::new),
            ))
        });
        let bound = letters.bind(&reverse, &[]).unwrap();
        assert_eq!(bound, Collection::from_values(["c", "b", "a"]).unwrap());
    }

    #[rstest]
    fn bind_returning_collection_keeps_it(letters: Collection) {
        let other = Collection::from_values([9]).unwrap();
        let replacement = other.clone();
        let bound = letters
            .bind(&Function::unary(move |_| Ok(Value::from(replacement.clone()))), &[])
            .unwrap();
        assert_eq!(bound, other);
    }

    // =========================================================================
    // Element operations
    // =========================================================================

    #[rstest]
    fn each_applies_per_element_keeping_keys() {
        let collection = Collection::from_pairs([("a", 1), ("b", 2)]).unwrap();
        let squared = collection
            .each(&Function::lift(|value| int(value) * int(value)), &[])
            .unwrap();
        assert_eq!(squared.get("b"), Some(&Value::from(4)));
    }

    #[rstest]
    fn each_reinfers_element_type() {
        let collection = Collection::from_values([1, 2]).unwrap();
        let texts = collection
            .each(&Function::lift(|value| format!("#{}", int(value))), &[])
            .unwrap();
        assert_eq!(texts.tag(), TypeTag::Native(NativeKind::String));
    }

    #[rstest]
    fn each_delegates_to_foreign_elements() {
        let options = Collection::typed(
            indexed([FOption::Some(Value::from(1)), FOption::None]),
            TypeToken::OPTION,
        )
        .unwrap();
        let incremented = options
            .each(&Function::lift(|value| int(value) + 1), &[])
            .unwrap();
        assert_eq!(
            incremented.to_array(),
            indexed([FOption::Some(Value::from(2)), FOption::None])
        );
    }

    #[rstest]
    fn each_errors_propagate(letters: Collection) {
        let failing = Function::unary(|_| Err(Error::raised("boom")));
        assert_eq!(letters.each(&failing, &[]), Err(Error::raised("boom")));
    }

    #[rstest]
    fn filter_keeps_keys() {
        let collection = Collection::from_values([1, 2, 3, 4]).unwrap();
        let even = collection.filter(|value| int(value) % 2 == 0).unwrap();
        assert_eq!(
            even.iter().map(|(key, _)| key.clone()).collect::<Vec<_>>(),
            vec![Key::Int(1), Key::Int(3)]
        );
    }

    #[rstest]
    fn head_and_tail_renumber(letters: Collection) {
        assert_eq!(letters.head().unwrap().to_array(), indexed(["a"]));
        assert_eq!(letters.tail().unwrap().to_array(), indexed(["b", "c"]));
        let empty = letters.head().unwrap().tail().unwrap();
        assert!(empty.is_empty());
    }

    #[rstest]
    fn append_renumbers_and_overwrites_string_keys() {
        let left = Collection::from_pairs([(Key::from(5), "a"), (Key::from("k"), "b")]).unwrap();
        let right = Collection::from_pairs([(Key::from("k"), "c"), (Key::from(9), "d")]).unwrap();
        let merged = left.append(&right).unwrap();
        assert_eq!(
            merged.to_array(),
            Value::map([(Key::from(0), "a"), (Key::from("k"), "c"), (Key::from(1), "d")])
                .as_array()
                .cloned()
                .unwrap()
        );
    }

    #[rstest]
    fn append_enforces_the_element_type(letters: Collection) {
        let numbers = Collection::from_values([1]).unwrap();
        assert!(matches!(
            letters.append(&numbers),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[rstest]
    fn flip_swaps_keys_and_values(letters: Collection) {
        let flipped = letters.flip().unwrap();
        assert_eq!(flipped.get("b"), Some(&Value::from(1)));
        assert_eq!(flipped.tag(), TypeTag::Native(NativeKind::Integer));
    }

    #[rstest]
    fn flip_rejects_non_key_values() {
        let floats = Collection::from_values([1.5]).unwrap();
        assert_eq!(floats.flip(), Err(Error::NotAKey { key: Key::Int(0) }));
    }

    // =========================================================================
    // Algebra
    // =========================================================================

    #[rstest]
    fn value_algebra(letters: Collection) {
        let other = Collection::from_values(["b", "z"]).unwrap();
        assert_eq!(
            letters.v_diff(&other).unwrap().to_array(),
            Value::map([(0, "a"), (2, "c")]).as_array().cloned().unwrap()
        );
        assert_eq!(
            letters.v_intersect(&other).unwrap().to_array(),
            Value::map([(1, "b")]).as_array().cloned().unwrap()
        );
        assert_eq!(
            letters.v_union(&other).unwrap().to_array(),
            Value::map([(0, "a"), (1, "b"), (2, "c"), (4, "z")])
                .as_array()
                .cloned()
                .unwrap()
        );
    }

    #[rstest]
    fn value_algebra_with_custom_equality(letters: Collection) {
        let other = Collection::from_values(["B"]).unwrap();
        let same_letter = |left: &Value, right: &Value| {
            left.as_str().map(str::to_lowercase) == right.as_str().map(str::to_lowercase)
        };
        assert_eq!(letters.v_diff_by(&other, same_letter).unwrap().len(), 2);
        assert_eq!(letters.v_intersect_by(&other, same_letter).unwrap().len(), 1);
    }

    #[rstest]
    fn key_algebra() {
        let left = Collection::from_pairs([("a", 1), ("b", 2)]).unwrap();
        let right = Collection::from_pairs([("b", 20), ("c", 30)]).unwrap();
        assert_eq!(left.k_diff(&right).unwrap().to_array().len(), 1);
        assert_eq!(left.k_intersect(&right).unwrap().get("b"), Some(&Value::from(2)));
        let union = left.k_union(&right).unwrap();
        assert_eq!(union.get("b"), Some(&Value::from(2)));
        assert_eq!(union.get("c"), Some(&Value::from(30)));
        assert_eq!(union.len(), 3);
    }

    #[rstest]
    fn reduce_folds_in_order(letters: Collection) {
        let concat = Function::binary(|carry, value| {
            Ok(Value::from(format!(
                "{}{}",
                carry.as_str().unwrap_or_default(),
                value.as_str().unwrap_or_default()
            )))
        });
        assert_eq!(letters.reduce(&concat, ""), Ok(Value::from("abc")));
    }

    #[rstest]
    fn equality_is_order_sensitive() {
        let forward = Collection::from_values([1, 2]).unwrap();
        let backward = Collection::from_pairs([(1, 2), (0, 1)]).unwrap();
        assert_ne!(forward, backward);
    }
}
