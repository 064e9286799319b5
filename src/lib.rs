//! # monadic
//!
//! Monadic value wrappers and a fluent pattern-matching engine over a
//! dynamically typed [`Value`](value::Value).
//!
//! ## Overview
//!
//! - **Value model**: [`Value`](value::Value) with strict equality, plus
//!   callable [`Function`](value::Function)s, host objects and resources
//! - **Monads**: [`Identity`](monad::Identity), [`FOption`](monad::FOption)
//!   and [`FTry`](monad::FTry), all sharing the [`Monadic`](monad::Monadic)
//!   `value` / `flatten` / `bind` protocol
//! - **Collections**: typed, immutable [`Collection`](collection::Collection)
//!   with [`Set`](collection::Set), [`Map`](collection::Map) and
//!   [`MutableCollection`](collection::MutableCollection) variants
//! - **Matching**: [`Match`](matching::Match), a first-match-wins dispatcher
//!   on native kinds, type tokens, textual tags and literals
//!
//! ## Feature Flags
//!
//! - `fxhash` (default): use `rustc-hash` for `Set` uniqueness checks
//!
//! ## Example
//!
//! ```rust
//! use monadic::prelude::*;
//!
//! let lookup = |key: &str| {
//!     Match::on(key)
//!         .test_with("foo", Function::lift(|value| FOption::Some(value.clone())))?
//!         .any_with(Function::deferred(|| Ok(Value::from(FOption::None))))
//! };
//!
//! assert_eq!(lookup("foo")?.flatten(), Ok(Value::from("foo")));
//! assert_eq!(lookup("bar")?.flatten(), Err(Error::ValueAccess));
//! # Ok::<(), monadic::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the wrapper types, the traits their methods live on and the
/// value model.
///
/// # Usage
///
/// ```rust
/// use monadic::prelude::*;
/// ```
pub mod prelude {
    pub use crate::collection::{
        Collection, CollectionLike, KeyAlgebra, Map, MutableCollection, Set, TypeTag,
        ValueAlgebra,
    };
    pub use crate::error::Error;
    pub use crate::matching::{
        FMatch, Handler, Match, NativeKind, TypeRegistry, TypeResolver, TypeToken,
    };
    pub use crate::monad::{FOption, FTry, Identity, Monad, Monadic};
    pub use crate::value::{Array, Function, Key, Object, Resource, Value};
}

pub mod collection;
pub mod error;
pub mod matching;
pub mod monad;
pub mod value;

pub use error::Error;
