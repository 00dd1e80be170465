//! FunctionRegistration - 関数・名前・シェイプの組
//!
//! The descriptor is derived from the closure's Rust types when the
//! registration is built, so nothing has to be inspected at runtime.
//!
//! # 使用例
//! ```ignore
//! let uppercase = FunctionRegistration::function(|s: String| s.to_uppercase())
//!     .with_name("uppercase");
//! let greet = FunctionRegistration::supplier(|| "Hello World!".to_string())
//!     .with_names(["greet", "hello"]);
//! ```

use std::collections::BTreeSet;
use std::convert::Infallible;

use serde_json::Value;

use super::handle::{FunctionHandle, FunctionTarget};
use super::routing::{ROUTER_NAME, RoutingFunction};
use crate::domain::{Arity, BoxError, Message, TypeDescriptor, TypeRef};
use crate::typed::{ConsumerFn, DynFunction, FunctionFn, FunctionInput, FunctionOutput, SupplierFn};

/// A registered callable together with its names and shape.
#[derive(Debug, Clone)]
pub struct FunctionRegistration {
    handle: FunctionHandle,
    names: BTreeSet<String>,
    descriptor: TypeDescriptor,
}

impl FunctionRegistration {
    /// Register an already type-erased function.
    pub fn from_dyn(function: impl DynFunction + 'static) -> Self {
        let descriptor = function.descriptor();
        Self {
            handle: FunctionHandle::new(FunctionTarget::Function(Box::new(function))),
            names: BTreeSet::new(),
            descriptor,
        }
    }

    pub fn supplier<F, O, M>(f: F) -> Self
    where
        F: Fn() -> O + Send + Sync + 'static,
        O: FunctionOutput<M>,
        M: 'static,
    {
        Self::try_supplier::<_, O, M, Infallible>(move || Ok::<_, Infallible>(f()))
    }

    pub fn try_supplier<F, O, M, E>(f: F) -> Self
    where
        F: Fn() -> Result<O, E> + Send + Sync + 'static,
        O: FunctionOutput<M>,
        E: Into<BoxError> + 'static,
        M: 'static,
    {
        Self::from_dyn(SupplierFn::new(f))
    }

    pub fn function<F, I, O, MI, MO>(f: F) -> Self
    where
        F: Fn(I) -> O + Send + Sync + 'static,
        I: FunctionInput<MI>,
        O: FunctionOutput<MO>,
        MI: 'static,
        MO: 'static,
    {
        Self::try_function::<_, I, O, MI, MO, Infallible>(move |input: I| {
            Ok::<_, Infallible>(f(input))
        })
    }

    pub fn try_function<F, I, O, MI, MO, E>(f: F) -> Self
    where
        F: Fn(I) -> Result<O, E> + Send + Sync + 'static,
        I: FunctionInput<MI>,
        O: FunctionOutput<MO>,
        E: Into<BoxError> + 'static,
        MI: 'static,
        MO: 'static,
    {
        Self::from_dyn(FunctionFn::new(f))
    }

    pub fn consumer<F, I, M>(f: F) -> Self
    where
        F: Fn(I) + Send + Sync + 'static,
        I: FunctionInput<M>,
        M: 'static,
    {
        Self::try_consumer::<_, I, M, Infallible>(move |input: I| {
            f(input);
            Ok::<_, Infallible>(())
        })
    }

    pub fn try_consumer<F, I, M, E>(f: F) -> Self
    where
        F: Fn(I) -> Result<(), E> + Send + Sync + 'static,
        I: FunctionInput<M>,
        E: Into<BoxError> + 'static,
        M: 'static,
    {
        Self::from_dyn(ConsumerFn::new(f))
    }

    /// Register a router under [`ROUTER_NAME`].
    ///
    /// A router takes and returns whole messages, whatever the selected
    /// function declares.
    pub fn routing(router: RoutingFunction) -> Self {
        let envelope = TypeRef::of::<Message<Value>>();
        let descriptor = TypeDescriptor::builder(Arity::Function)
            .input(TypeRef::of::<Value>(), envelope, true)
            .output(TypeRef::of::<Value>(), envelope, true)
            .build();
        Self {
            handle: FunctionHandle::new(FunctionTarget::Routing(router)),
            names: BTreeSet::new(),
            descriptor,
        }
        .with_name(ROUTER_NAME)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.names.insert(name.into());
        self
    }

    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn handle(&self) -> &FunctionHandle {
        &self.handle
    }

    pub fn target(&self) -> &FunctionTarget {
        self.handle.target()
    }

    /// Registered names in lexical order.
    pub fn names(&self) -> &BTreeSet<String> {
        &self.names
    }

    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }
}
