//! Opaque host objects and open resources.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::matching::TypeToken;

/// An opaque host object tagged with its [`TypeToken`].
///
/// Objects compare by identity: two `Object`s are equal only when they are
/// clones of the same allocation.
///
/// # Examples
///
/// ```rust
/// use monadic::value::Object;
///
/// struct Account {
///     balance: i64,
/// }
///
/// let object = Object::new(Account { balance: 10 });
/// assert!(object.is::<Account>());
/// assert_eq!(object.downcast_ref::<Account>().map(|account| account.balance), Some(10));
/// ```
#[derive(Clone)]
pub struct Object {
    inner: Arc<dyn Any + Send + Sync>,
    token: TypeToken,
}

impl Object {
    /// Wraps a host value.
    pub fn new<T>(value: T) -> Self
    where
        T: Any + Send + Sync,
    {
        Self {
            inner: Arc::new(value),
            token: TypeToken::of::<T>(),
        }
    }

    /// Returns `true` if the wrapped value is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// Borrows the wrapped value as a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Returns the token identifying the wrapped type.
    pub const fn type_token(&self) -> TypeToken {
        self.token
    }

    /// Returns `true` if both handles share the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.address() == other.address()
    }

    pub(crate) fn address(&self) -> usize {
        Arc::as_ptr(&self.inner).cast::<()>() as usize
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_tuple("Object")
            .field(&self.token.name())
            .finish()
    }
}

/// An open handle, such as a file or a socket.
///
/// The crate never reads from or writes to a resource; it only recognises
/// one for the `resource` native kind.
#[derive(Clone)]
pub struct Resource {
    kind: &'static str,
    handle: Arc<dyn Any + Send + Sync>,
}

impl Resource {
    /// Wraps a handle under a descriptive kind, e.g. `"stream"`.
    pub fn new<T>(kind: &'static str, handle: T) -> Self
    where
        T: Any + Send + Sync,
    {
        Self {
            kind,
            handle: Arc::new(handle),
        }
    }

    /// Returns the descriptive kind.
    pub const fn kind(&self) -> &'static str {
        self.kind
    }

    /// Borrows the handle as a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.handle.downcast_ref::<T>()
    }

    /// Returns `true` if both handles share the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.address() == other.address()
    }

    pub(crate) fn address(&self) -> usize {
        Arc::as_ptr(&self.handle).cast::<()>() as usize
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_tuple("Resource").field(&self.kind).finish()
    }
}
