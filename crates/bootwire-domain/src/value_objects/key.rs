//! Binding keys
//!
//! A [`Key`] names the bound type. Values that share an underlying Rust type
//! but mean different things get a newtype of their own, the way
//! [`Parameters`](super::Parameters) wraps the invocation arguments, so one
//! can never satisfy a lookup meant for the other.

use std::any::{TypeId, type_name};
use std::fmt;

/// Identity of one binding in a graph
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    type_id: TypeId,
    type_name: &'static str,
}

impl Key {
    /// Key for `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
        }
    }

    /// `TypeId` of the bound type
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Rust name of the bound type (diagnostics only)
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// True if this key binds `T`
    pub fn is_type<T: ?Sized + 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}
