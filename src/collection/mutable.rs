//! The mutable collection variant.

use super::sealed::Variant;
use super::{Collection, CollectionLike, KeyAlgebra, TypeTag, ValueAlgebra};
use crate::error::Error;
use crate::matching::TypeResolver;
use crate::monad::Monad;
use crate::value::{Array, Key, Value};

/// A [`Collection`] that can be changed in place.
///
/// Writes are checked against the element type like construction is.
///
/// # Examples
///
/// ```rust
/// use monadic::prelude::*;
///
/// let mut scores = MutableCollection::from_pairs([("ann", 3)])?;
/// scores.set("bob", 5)?;
/// assert!(scores.set("eve", "high").is_err());
/// assert_eq!(scores.unset("ann"), Some(Value::from(3)));
///
/// let frozen: Collection = scores.freeze();
/// assert_eq!(frozen.len(), 1);
/// # Ok::<(), monadic::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MutableCollection(Collection);

collection_constructors!(MutableCollection);

impl MutableCollection {
    /// Stores `value` under `key`, returning the value it replaces.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] when `value` does not match the element type;
    /// the collection is left unchanged.
    pub fn set(
        &mut self,
        key: impl Into<Key>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>, Error> {
        let key = key.into();
        let value = value.into();
        self.check(&key, &value)?;
        Ok(self.0.entries.insert(key, value))
    }

    /// Appends `value` under the next integer key, one past the largest
    /// integer key present (zero if there is none).
    ///
    /// # Errors
    ///
    /// [`Error::KeyOverflow`] when the largest integer key is `i64::MAX`,
    /// otherwise as [`set`](Self::set).
    pub fn push(&mut self, value: impl Into<Value>) -> Result<Key, Error> {
        let last = self
            .0
            .entries
            .keys()
            .filter_map(|key| match key {
                Key::Int(index) => Some(*index),
                Key::Str(_) => None,
            })
            .max();
        let next = match last {
            Some(index) => index.checked_add(1).ok_or(Error::KeyOverflow)?,
            None => 0,
        };
        let key = Key::Int(next);
        self.set(key.clone(), value)?;
        Ok(key)
    }

    /// Removes `key`, preserving the order of the remaining elements.
    pub fn unset(&mut self, key: impl Into<Key>) -> Option<Value> {
        self.0.entries.shift_remove(&key.into())
    }

    /// Converts into an immutable [`Collection`].
    pub fn freeze(self) -> Collection {
        self.0
    }

    fn check(&self, key: &Key, value: &Value) -> Result<(), Error> {
        if self.0.tag.admits(value) {
            Ok(())
        } else {
            Err(Error::TypeMismatch {
                key: key.clone(),
                expected: self.0.tag.to_string(),
            })
        }
    }
}

impl Variant for MutableCollection {
    fn from_collection(collection: Collection) -> Result<Self, Error> {
        Ok(Self(collection))
    }

    fn from_monad(monad: &Monad) -> Option<&Self> {
        match monad {
            Monad::MutableCollection(collection) => Some(collection),
            _ => None,
        }
    }
}

impl CollectionLike for MutableCollection {
    fn as_collection(&self) -> &Collection {
        &self.0
    }
}

impl ValueAlgebra for MutableCollection {}

impl KeyAlgebra for MutableCollection {}

impl From<Collection> for MutableCollection {
    fn from(collection: Collection) -> Self {
        Self(collection)
    }
}

impl From<MutableCollection> for Collection {
    fn from(collection: MutableCollection) -> Self {
        collection.freeze()
    }
}
