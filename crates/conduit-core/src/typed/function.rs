//! DynFunction - supplier / function / consumer を一つの呼び出し形に揃える
//!
//! # 二層構造
//! - **表層（Typed）**: user closures over concrete types (`Fn() -> O`,
//!   `Fn(I) -> O`, `Fn(I)`), plain or `Message<T>`
//! - **内部（Dyn）**: [`DynFunction`], object-safe, works on `Message<Value>`
//!
//! Each adapter owns the input/output conversion for its arity, so the
//! envelope boundary is crossed exactly once per call.

use std::marker::PhantomData;

use async_trait::async_trait;
use serde_json::Value;

use super::shape::{FunctionInput, FunctionOutput};
use crate::domain::{Arity, BoxError, InvocationError, Message, TypeDescriptor, TypeRef};

/// Object-safe view of a registered function.
///
/// `input` is `None` when the host had nothing to pass. The result is `None`
/// only for consumers.
#[async_trait]
pub trait DynFunction: Send + Sync {
    async fn call(
        &self,
        input: Option<Message<Value>>,
    ) -> Result<Option<Message<Value>>, InvocationError>;

    fn descriptor(&self) -> TypeDescriptor;
}

fn function_error<E: Into<BoxError>>(err: E) -> InvocationError {
    InvocationError::Function(err.into())
}

/// No input, one output. Any provided input is ignored.
pub struct SupplierFn<F, O, M, E> {
    f: F,
    _marker: PhantomData<fn() -> (O, M, E)>,
}

impl<F, O, M, E> SupplierFn<F, O, M, E>
where
    F: Fn() -> Result<O, E> + Send + Sync + 'static,
    O: FunctionOutput<M>,
    E: Into<BoxError> + 'static,
    M: 'static,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<F, O, M, E> DynFunction for SupplierFn<F, O, M, E>
where
    F: Fn() -> Result<O, E> + Send + Sync + 'static,
    O: FunctionOutput<M>,
    E: Into<BoxError> + 'static,
    M: 'static,
{
    async fn call(
        &self,
        _input: Option<Message<Value>>,
    ) -> Result<Option<Message<Value>>, InvocationError> {
        let output = (self.f)().map_err(function_error)?;
        output
            .into_message()
            .map(Some)
            .map_err(InvocationError::Output)
    }

    fn descriptor(&self) -> TypeDescriptor {
        TypeDescriptor::builder(Arity::Supplier)
            .output(O::payload_type(), O::wrapper_type(), O::IS_MESSAGE)
            .build()
    }
}

/// One input, one output.
pub struct FunctionFn<F, I, O, MI, MO, E> {
    f: F,
    _marker: PhantomData<fn(I) -> (O, MI, MO, E)>,
}

impl<F, I, O, MI, MO, E> FunctionFn<F, I, O, MI, MO, E>
where
    F: Fn(I) -> Result<O, E> + Send + Sync + 'static,
    I: FunctionInput<MI>,
    O: FunctionOutput<MO>,
    E: Into<BoxError> + 'static,
    MI: 'static,
    MO: 'static,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<F, I, O, MI, MO, E> DynFunction for FunctionFn<F, I, O, MI, MO, E>
where
    F: Fn(I) -> Result<O, E> + Send + Sync + 'static,
    I: FunctionInput<MI>,
    O: FunctionOutput<MO>,
    E: Into<BoxError> + 'static,
    MI: 'static,
    MO: 'static,
{
    async fn call(
        &self,
        input: Option<Message<Value>>,
    ) -> Result<Option<Message<Value>>, InvocationError> {
        let message = input.ok_or(InvocationError::MissingInput)?;
        let input = I::from_message(message).map_err(InvocationError::Input)?;
        let output = (self.f)(input).map_err(function_error)?;
        output
            .into_message()
            .map(Some)
            .map_err(InvocationError::Output)
    }

    fn descriptor(&self) -> TypeDescriptor {
        TypeDescriptor::builder(Arity::Function)
            .input(I::payload_type(), I::wrapper_type(), I::IS_MESSAGE)
            .output(O::payload_type(), O::wrapper_type(), O::IS_MESSAGE)
            .build()
    }
}

/// One input, no output.
pub struct ConsumerFn<F, I, M, E> {
    f: F,
    _marker: PhantomData<fn(I) -> (M, E)>,
}

impl<F, I, M, E> ConsumerFn<F, I, M, E>
where
    F: Fn(I) -> Result<(), E> + Send + Sync + 'static,
    I: FunctionInput<M>,
    E: Into<BoxError> + 'static,
    M: 'static,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<F, I, M, E> DynFunction for ConsumerFn<F, I, M, E>
where
    F: Fn(I) -> Result<(), E> + Send + Sync + 'static,
    I: FunctionInput<M>,
    E: Into<BoxError> + 'static,
    M: 'static,
{
    async fn call(
        &self,
        input: Option<Message<Value>>,
    ) -> Result<Option<Message<Value>>, InvocationError> {
        let message = input.ok_or(InvocationError::MissingInput)?;
        let input = I::from_message(message).map_err(InvocationError::Input)?;
        (self.f)(input).map_err(function_error)?;
        Ok(None)
    }

    fn descriptor(&self) -> TypeDescriptor {
        TypeDescriptor::builder(Arity::Consumer)
            .input(I::payload_type(), I::wrapper_type(), I::IS_MESSAGE)
            .output(TypeRef::void(), TypeRef::void(), false)
            .build()
    }
}
