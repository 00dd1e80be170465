//! FunctionInvocation - カタログに束縛された呼び出し可能な関数
//!
//! Wraps a [`FunctionHandle`] together with the catalog it came from. The
//! wrapper resolves to the same registration as the bare handle (see
//! [`AsFunctionHandle`]), so inspectors treat both alike.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::catalog::{
    AsFunctionHandle, FunctionCatalog, FunctionHandle, FunctionInspectorExt, FunctionTarget,
    RoutingFunction,
};
use crate::domain::{InvocationError, Message, TypeDescriptor};

/// FunctionInvocation は handle とカタログの組
///
/// # 学習ポイント
/// - `AsFunctionHandle` 経由で inspector にそのまま渡せる
/// - routing は catalog を引けるこの層で解決する
///
/// # 使用例
/// ```ignore
/// let upper = catalog.lookup("uppercase").expect("registered");
/// let out = upper.invoke(Some(Message::new(json!("abc")))).await?;
/// ```
#[derive(Clone)]
pub struct FunctionInvocation {
    catalog: Arc<FunctionCatalog>,
    handle: FunctionHandle,
    name: Option<String>,
}

impl FunctionInvocation {
    pub(crate) fn new(catalog: Arc<FunctionCatalog>, handle: FunctionHandle) -> Self {
        let name = catalog.name(&handle).map(str::to_string);
        Self {
            catalog,
            handle,
            name,
        }
    }

    /// Canonical registered name (the smallest one).
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn descriptor(&self) -> TypeDescriptor {
        self.catalog.describe(&self.handle)
    }

    pub fn is_message(&self) -> bool {
        self.catalog.is_message(&self.handle)
    }

    pub fn is_routing(&self) -> bool {
        self.handle.is_routing()
    }

    pub fn catalog(&self) -> &Arc<FunctionCatalog> {
        &self.catalog
    }

    /// Call the function.
    ///
    /// Routers pick their target from the input message and forward the
    /// whole message to it. Only one level of routing is followed.
    pub async fn invoke(
        &self,
        input: Option<Message<Value>>,
    ) -> Result<Option<Message<Value>>, InvocationError> {
        match self.handle.target() {
            FunctionTarget::Function(function) => function.call(input).await,
            FunctionTarget::Routing(router) => self.route(router, input).await,
        }
    }

    async fn route(
        &self,
        router: &RoutingFunction,
        input: Option<Message<Value>>,
    ) -> Result<Option<Message<Value>>, InvocationError> {
        let message = input.ok_or_else(|| {
            InvocationError::Routing("router invoked without an input message".to_string())
        })?;
        let name = router.select(&message)?;
        let registration = self
            .catalog
            .find(&name)
            .ok_or_else(|| InvocationError::Routing(format!("no function named '{name}'")))?;

        match registration.target() {
            FunctionTarget::Function(function) => {
                debug!(target_function = %name, "routing message");
                function.call(Some(message)).await
            }
            FunctionTarget::Routing(_) => Err(InvocationError::Routing(format!(
                "'{name}' is a router and cannot be a routing target"
            ))),
        }
    }
}

impl AsFunctionHandle for FunctionInvocation {
    fn function_handle(&self) -> &FunctionHandle {
        &self.handle
    }
}

impl fmt::Debug for FunctionInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionInvocation")
            .field("name", &self.name)
            .field("handle", &self.handle)
            .finish()
    }
}
