//! Shape - 入出力が plain value か Message かを型で判定する
//!
//! `FunctionInput<M>` / `FunctionOutput<M>` are implemented twice: once for
//! any serde type (marker [`Plain`]) and once for `Message<T>` (marker
//! [`Enveloped`]). Since `Message` is not itself a serde type, exactly one
//! impl applies to any concrete type and the marker is inferred.
//!
//! This is the only place where the envelope boundary is crossed: plain
//! inputs drop the headers, plain outputs get empty headers.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::{CodecError, Message, TypeRef};

/// Marker for plain value shapes.
pub enum Plain {}

/// Marker for `Message<T>` shapes.
pub enum Enveloped {}

/// A type a function can accept as its input.
pub trait FunctionInput<M>: Sized + Send + 'static {
    const IS_MESSAGE: bool;

    /// Type of the payload (`T` for both `T` and `Message<T>`).
    fn payload_type() -> TypeRef;

    /// Declared type (`T` or `Message<T>`).
    fn wrapper_type() -> TypeRef;

    fn from_message(message: Message<Value>) -> Result<Self, CodecError>;
}

/// A type a function can return as its output.
pub trait FunctionOutput<M>: Send + 'static {
    const IS_MESSAGE: bool;

    fn payload_type() -> TypeRef;

    fn wrapper_type() -> TypeRef;

    fn into_message(self) -> Result<Message<Value>, CodecError>;
}

impl<T> FunctionInput<Plain> for T
where
    T: DeserializeOwned + Send + 'static,
{
    const IS_MESSAGE: bool = false;

    fn payload_type() -> TypeRef {
        TypeRef::of::<T>()
    }

    fn wrapper_type() -> TypeRef {
        TypeRef::of::<T>()
    }

    fn from_message(message: Message<Value>) -> Result<Self, CodecError> {
        serde_json::from_value(message.into_payload()).map_err(CodecError::Decode)
    }
}

impl<T> FunctionInput<Enveloped> for Message<T>
where
    T: DeserializeOwned + Send + 'static,
{
    const IS_MESSAGE: bool = true;

    fn payload_type() -> TypeRef {
        TypeRef::of::<T>()
    }

    fn wrapper_type() -> TypeRef {
        TypeRef::of::<Message<T>>()
    }

    fn from_message(message: Message<Value>) -> Result<Self, CodecError> {
        message.try_map(|payload| serde_json::from_value(payload).map_err(CodecError::Decode))
    }
}

impl<T> FunctionOutput<Plain> for T
where
    T: Serialize + Send + 'static,
{
    const IS_MESSAGE: bool = false;

    fn payload_type() -> TypeRef {
        TypeRef::of::<T>()
    }

    fn wrapper_type() -> TypeRef {
        TypeRef::of::<T>()
    }

    fn into_message(self) -> Result<Message<Value>, CodecError> {
        serde_json::to_value(&self)
            .map(Message::new)
            .map_err(CodecError::Encode)
    }
}

impl<T> FunctionOutput<Enveloped> for Message<T>
where
    T: Serialize + Send + 'static,
{
    const IS_MESSAGE: bool = true;

    fn payload_type() -> TypeRef {
        TypeRef::of::<T>()
    }

    fn wrapper_type() -> TypeRef {
        TypeRef::of::<Message<T>>()
    }

    fn into_message(self) -> Result<Message<Value>, CodecError> {
        self.try_map(|payload| serde_json::to_value(&payload).map_err(CodecError::Encode))
    }
}
