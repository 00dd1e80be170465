//! FunctionInspector - 登録情報からのメタデータ参照
//!
//! An inspector only has to answer one question: which registration does a
//! handle belong to. Everything else is derived by [`FunctionInspectorExt`],
//! which every inspector gets for free.
//!
//! Misses are never errors: unknown handles report the `unknown` sentinel,
//! `false`, or `None`.

use super::handle::{AsFunctionHandle, FunctionHandle};
use super::registration::FunctionRegistration;
use crate::domain::{TypeDescriptor, TypeRef};

pub trait FunctionInspector {
    /// The registration `function` was created from, if it is known here.
    fn registration(&self, function: &FunctionHandle) -> Option<&FunctionRegistration>;
}

/// Queries derived from [`FunctionInspector::registration`].
///
/// Accepts handles and anything that wraps one (`AsFunctionHandle`).
pub trait FunctionInspectorExt: FunctionInspector {
    fn get_registration<H>(&self, function: &H) -> Option<&FunctionRegistration>
    where
        H: AsFunctionHandle + ?Sized,
    {
        self.registration(function.function_handle())
    }

    /// Shape of `function`, or [`TypeDescriptor::unknown`].
    fn describe<H>(&self, function: &H) -> TypeDescriptor
    where
        H: AsFunctionHandle + ?Sized,
    {
        self.get_registration(function)
            .map(|registration| *registration.descriptor())
            .unwrap_or_default()
    }

    /// Whether `function` should be handed whole messages.
    ///
    /// Routers always report `true`: they need the headers to pick a target.
    fn is_message<H>(&self, function: &H) -> bool
    where
        H: AsFunctionHandle + ?Sized,
    {
        match self.get_registration(function) {
            Some(registration) if registration.handle().is_routing() => true,
            Some(registration) => registration.descriptor().is_message(),
            None => false,
        }
    }

    fn input_type<H>(&self, function: &H) -> TypeRef
    where
        H: AsFunctionHandle + ?Sized,
    {
        self.describe(function).input_type()
    }

    fn output_type<H>(&self, function: &H) -> TypeRef
    where
        H: AsFunctionHandle + ?Sized,
    {
        self.describe(function).output_type()
    }

    fn input_wrapper<H>(&self, function: &H) -> TypeRef
    where
        H: AsFunctionHandle + ?Sized,
    {
        self.describe(function).input_wrapper()
    }

    fn output_wrapper<H>(&self, function: &H) -> TypeRef
    where
        H: AsFunctionHandle + ?Sized,
    {
        self.describe(function).output_wrapper()
    }

    /// One of the names `function` was registered under.
    ///
    /// Always the lexically smallest name, so repeated calls agree.
    fn name<H>(&self, function: &H) -> Option<&str>
    where
        H: AsFunctionHandle + ?Sized,
    {
        self.get_registration(function)?
            .names()
            .iter()
            .next()
            .map(String::as_str)
    }
}

impl<T: FunctionInspector + ?Sized> FunctionInspectorExt for T {}
