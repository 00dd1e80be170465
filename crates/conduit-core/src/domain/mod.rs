//! Domain model: type references, descriptors, messages, ids, errors.
//!
//! どの host にも依存しない値だけをここに置く。

pub mod descriptor;
pub mod errors;
pub mod ids;
pub mod message;
pub mod type_ref;

pub use self::descriptor::{Arity, TypeDescriptor, TypeDescriptorBuilder};
pub use self::errors::{BoxError, CodecError, InvocationError};
pub use self::ids::InvocationId;
pub use self::message::{Headers, Message};
pub use self::type_ref::TypeRef;
