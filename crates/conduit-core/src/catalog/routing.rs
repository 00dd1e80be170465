//! RoutingFunction - メッセージごとに呼び出し先を選ぶ間接層
//!
//! A router is registered like any other function, but its target is chosen
//! per message by a [`DispatchStrategy`]. Inspectors always report routers as
//! message-shaped so the router receives headers.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::config::InvokerConfig;
use crate::domain::{InvocationError, Message};
use crate::impls::HeaderDispatch;
use crate::ports::DispatchStrategy;

/// Name the router is registered under by default.
pub const ROUTER_NAME: &str = "function_router";

/// RoutingFunction はメッセージから呼び出し先を選ぶ
///
/// # 使用例
/// ```ignore
/// let router = RoutingFunction::new(HeaderDispatch::default().with_fallback("echo"));
/// builder.register(FunctionRegistration::routing(router))?;
/// ```
#[derive(Clone)]
pub struct RoutingFunction {
    strategy: Arc<dyn DispatchStrategy>,
}

impl RoutingFunction {
    pub fn new(strategy: impl DispatchStrategy + 'static) -> Self {
        Self {
            strategy: Arc::new(strategy),
        }
    }

    /// Router reading the target from the configured routing header.
    pub fn from_config(config: &InvokerConfig) -> Self {
        Self::new(HeaderDispatch::new(config.routing_header.clone()))
    }

    /// Pick the function name for `message`.
    pub fn select(&self, message: &Message<Value>) -> Result<String, InvocationError> {
        self.strategy
            .select_function(message)
            .ok_or_else(|| InvocationError::Routing("no target function selected".to_string()))
    }
}

impl fmt::Debug for RoutingFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutingFunction").finish_non_exhaustive()
    }
}
