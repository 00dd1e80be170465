//! DispatchStrategy port - message から呼び出す関数名を選ぶ
//!
//! Used by the routing indirection (`catalog::RoutingFunction`).

use serde_json::Value;

use crate::domain::Message;

/// DispatchStrategy picks the name of the function a routed message goes to.
///
/// Returning `None` means no target could be chosen; the router reports that
/// as a routing failure.
pub trait DispatchStrategy: Send + Sync {
    fn select_function(&self, message: &Message<Value>) -> Option<String>;
}
