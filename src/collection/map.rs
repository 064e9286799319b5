//! Collections keyed by strings.

use super::sealed::Variant;
use super::{Collection, CollectionLike, KeyAlgebra, TypeTag};
use crate::error::Error;
use crate::matching::TypeResolver;
use crate::monad::Monad;
use crate::value::{Array, Key, Value};

/// A [`Collection`] whose keys are all strings.
///
/// A `Map` has key algebra and [`append`](CollectionLike::append) but no
/// value algebra.
///
/// # Examples
///
/// ```rust
/// use monadic::prelude::*;
///
/// let map = Map::from_pairs([("a", 1), ("b", 2)])?;
/// assert_eq!(map.get("b"), Some(&Value::from(2)));
///
/// assert!(matches!(
///     Map::from_values([1, 2]),
///     Err(Error::NonStringKey { .. })
/// ));
/// # Ok::<(), monadic::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Map(Collection);

collection_constructors!(Map);

impl Variant for Map {
    fn from_collection(collection: Collection) -> Result<Self, Error> {
        if let Some(key) = collection.entries.keys().find(|key| !key.is_str()) {
            tracing::debug!(%key, "rejected map with a non-string key");
            return Err(Error::NonStringKey { key: key.clone() });
        }
        Ok(Self(collection))
    }

    fn from_monad(monad: &Monad) -> Option<&Self> {
        match monad {
            Monad::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl CollectionLike for Map {
    fn as_collection(&self) -> &Collection {
        &self.0
    }
}

impl KeyAlgebra for Map {}

impl From<Map> for Collection {
    fn from(map: Map) -> Self {
        map.0
    }
}
