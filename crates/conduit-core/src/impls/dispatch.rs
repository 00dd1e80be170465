//! DispatchStrategy implementations.
//!
//! - **DirectDispatch**: always the same function
//! - **HeaderDispatch**: function name taken from a message header

use serde_json::Value;

use crate::domain::Message;
use crate::ports::DispatchStrategy;

/// Header consulted by [`HeaderDispatch::default`].
pub const DEFAULT_ROUTING_HEADER: &str = "conduit.function.definition";

/// Routes every message to one fixed function.
#[derive(Debug, Clone)]
pub struct DirectDispatch {
    function: String,
}

impl DirectDispatch {
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
        }
    }
}

impl DispatchStrategy for DirectDispatch {
    fn select_function(&self, _message: &Message<Value>) -> Option<String> {
        Some(self.function.clone())
    }
}

/// Routes by reading the target name from a header.
///
/// Blank or non-string header values are treated as missing, in which case
/// the fallback (if any) is used.
#[derive(Debug, Clone)]
pub struct HeaderDispatch {
    header: String,
    fallback: Option<String>,
}

impl HeaderDispatch {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, function: impl Into<String>) -> Self {
        self.fallback = Some(function.into());
        self
    }

    pub fn header(&self) -> &str {
        &self.header
    }
}

impl Default for HeaderDispatch {
    fn default() -> Self {
        Self::new(DEFAULT_ROUTING_HEADER)
    }
}

impl DispatchStrategy for HeaderDispatch {
    fn select_function(&self, message: &Message<Value>) -> Option<String> {
        message
            .header_str(&self.header)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .or_else(|| self.fallback.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn direct_dispatch_ignores_message() {
        let dispatcher = DirectDispatch::new("uppercase");
        let msg = Message::new(json!({})).with_header(DEFAULT_ROUTING_HEADER, "other");
        assert_eq!(dispatcher.select_function(&msg).as_deref(), Some("uppercase"));
    }

    #[test]
    fn header_dispatch_reads_header() {
        let dispatcher = HeaderDispatch::default();
        let msg = Message::new(json!(1)).with_header(DEFAULT_ROUTING_HEADER, " echo ");
        assert_eq!(dispatcher.select_function(&msg).as_deref(), Some("echo"));
    }

    #[test]
    fn header_dispatch_falls_back_when_header_missing_or_blank() {
        let dispatcher = HeaderDispatch::new("route").with_fallback("echo");
        let missing = Message::new(json!(1));
        let blank = Message::new(json!(1)).with_header("route", "  ");
        assert_eq!(dispatcher.select_function(&missing).as_deref(), Some("echo"));
        assert_eq!(dispatcher.select_function(&blank).as_deref(), Some("echo"));
    }

    #[test]
    fn header_dispatch_without_fallback_yields_none() {
        let dispatcher = HeaderDispatch::new("route");
        let msg = Message::new(json!(1)).with_header("route", 42);
        assert_eq!(dispatcher.select_function(&msg), None);
    }
}
