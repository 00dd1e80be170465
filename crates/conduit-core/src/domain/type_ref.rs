//! TypeRef - 関数シグネチャに現れる型の識別子
//!
//! Rust has no runtime reflection over closure signatures, so a `TypeRef` is
//! captured statically when a function is registered. When nothing is known
//! about a side of a function, the `unknown` sentinel is used instead.

use std::any::{TypeId, type_name};
use std::fmt;

use serde::{Serialize, Serializer};

/// Name rendered for the unknown sentinel.
const UNKNOWN_NAME: &str = "object";

/// Identity of a Rust type as seen by the function catalog.
///
/// Equality is by `TypeId`, so two refs to the same type compare equal no
/// matter where they were captured. The sentinel only equals itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeRef {
    id: Option<TypeId>,
    name: &'static str,
}

impl TypeRef {
    /// Capture the type `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: Some(TypeId::of::<T>()),
            name: type_name::<T>(),
        }
    }

    /// The "unknown/object" sentinel.
    pub const fn unknown() -> Self {
        Self {
            id: None,
            name: UNKNOWN_NAME,
        }
    }

    /// The missing side of a supplier (input) or consumer (output).
    pub fn void() -> Self {
        Self::of::<()>()
    }

    pub fn is_unknown(&self) -> bool {
        self.id.is_none()
    }

    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == Some(TypeId::of::<T>())
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Default for TypeRef {
    fn default() -> Self {
        Self::unknown()
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

// Only the name goes on the wire; TypeId is process-local.
impl Serialize for TypeRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name)
    }
}
