//! Host-neutral HTTP request and response values.
//!
//! The invoker does not run a server; a host adapter converts its own
//! request type into [`HttpRequest`] and writes [`HttpResponse`] back.

use std::borrow::Cow;
use std::collections::BTreeMap;

/// An HTTP request as seen by the invoker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// HTTP method (typically POST for functions).
    pub method: String,
    /// The request path.
    pub path: String,
    /// Request headers. Each one becomes a message header.
    pub headers: BTreeMap<String, String>,
    /// Raw body. Empty means the function gets no input.
    pub body: Vec<u8>,
}

impl HttpRequest {
    /// POST request with the given body.
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self {
            method: "POST".to_string(),
            path: "/".to_string(),
            headers: BTreeMap::new(),
            body: body.into(),
        }
    }

    /// GET request without a body.
    pub fn empty() -> Self {
        Self {
            method: "GET".to_string(),
            ..Self::new(Vec::new())
        }
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }
}

/// The response written back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub const CONTENT_TYPE: &'static str = "content-type";

    pub fn ok(body: Vec<u8>) -> Self {
        Self::with_status(200, body)
    }

    pub fn with_status(status: u16, body: Vec<u8>) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body,
        }
    }

    /// JSON `{"error": message}` body with the given status.
    pub fn error(status: u16, message: &str) -> Self {
        let body = serde_json::to_vec(&serde_json::json!({ "error": message }))
            .unwrap_or_else(|_| b"{}".to_vec());
        Self::with_status(status, body).with_header(Self::CONTENT_TYPE, "application/json")
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as UTF-8 text (lossy).
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults() {
        let req = HttpRequest::new("{}").with_header("x-trace", "abc");
        assert_eq!(req.method, "POST");
        assert_eq!(req.path, "/");
        assert_eq!(req.headers.get("x-trace").map(String::as_str), Some("abc"));

        let empty = HttpRequest::empty();
        assert_eq!(empty.method, "GET");
        assert!(empty.body.is_empty());
    }

    #[test]
    fn error_body_is_json() {
        let resp = HttpResponse::error(400, "bad \"input\"");
        assert_eq!(resp.status, 400);
        assert!(!resp.is_success());
        let body: serde_json::Value = serde_json::from_slice(&resp.body).unwrap();
        assert_eq!(body["error"], "bad \"input\"");
        assert_eq!(resp.header(HttpResponse::CONTENT_TYPE), Some("application/json"));
    }

    #[test]
    fn ok_text() {
        let resp = HttpResponse::ok(b"\"hi\"".to_vec());
        assert!(resp.is_success());
        assert_eq!(resp.text(), "\"hi\"");
    }
}
