//! Collections of unique values.

use super::sealed::Variant;
use super::{Collection, CollectionLike, Seen, TypeTag, ValueAlgebra};
use crate::error::Error;
use crate::matching::TypeResolver;
use crate::monad::Monad;
use crate::value::{Array, Key, Value, indexed};

/// A [`Collection`] whose values are unique.
///
/// Repeated values are dropped on construction, keeping the first
/// occurrence, and keys are renumbered `0..n`. Uniqueness is strict value
/// equality; host objects are unique by identity. A `Set` has value algebra
/// but no key algebra.
///
/// # Examples
///
/// ```rust
/// use monadic::prelude::*;
///
/// let set = Set::from_values(["a", "b", "a", "c", "b"])?;
/// assert_eq!(set.to_array(), Set::from_values(["a", "b", "c"])?.to_array());
///
/// let other = Set::from_values(["b", "d"])?;
/// assert_eq!(set.v_union(&other)?.len(), 4);
/// assert_eq!(set.v_intersect(&other)?.len(), 1);
/// # Ok::<(), monadic::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Set(Collection);

collection_constructors!(Set);

impl Variant for Set {
    fn from_collection(collection: Collection) -> Result<Self, Error> {
        let mut seen = Seen::default();
        let entries = indexed(
            collection
                .entries
                .values()
                .filter(|value| seen.insert(*value))
                .cloned(),
        );
        Ok(Self(Collection {
            entries,
            tag: collection.tag,
        }))
    }

    fn from_monad(monad: &Monad) -> Option<&Self> {
        match monad {
            Monad::Set(set) => Some(set),
            _ => None,
        }
    }
}

impl CollectionLike for Set {
    fn as_collection(&self) -> &Collection {
        &self.0
    }
}

impl ValueAlgebra for Set {}

impl From<Set> for Collection {
    fn from(set: Set) -> Self {
        set.0
    }
}
