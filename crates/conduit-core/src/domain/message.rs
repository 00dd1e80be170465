//! Message - payload とヘッダーの組（envelope）
//!
//! A function that declares `Message<T>` as its input or output gets access to
//! headers. Functions over plain values never see this type.
//!
//! `Message` deliberately implements neither `Serialize` nor `Deserialize`:
//! the typed layer relies on that to tell enveloped shapes from plain ones.

use std::collections::BTreeMap;

use serde_json::Value;

/// Header map carried by a [`Message`].
pub type Headers = BTreeMap<String, Value>;

/// Standard header names stamped by the invoker.
pub mod headers {
    /// Unique id of the invocation that produced the message.
    pub const ID: &str = "id";
    /// Epoch milliseconds at which the invocation started.
    pub const TIMESTAMP: &str = "timestamp";
}

/// A payload together with its headers.
#[derive(Debug, Clone, PartialEq)]
pub struct Message<T> {
    payload: T,
    headers: Headers,
}

impl<T> Message<T> {
    pub fn new(payload: T) -> Self {
        Self {
            payload,
            headers: Headers::new(),
        }
    }

    pub fn from_parts(payload: T, headers: Headers) -> Self {
        Self { payload, headers }
    }

    /// Set one header, replacing any previous value.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Merge headers; existing keys are overwritten.
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn header(&self, key: &str) -> Option<&Value> {
        self.headers.get(key)
    }

    /// Header value as a string slice, if it is a JSON string.
    pub fn header_str(&self, key: &str) -> Option<&str> {
        self.headers.get(key).and_then(Value::as_str)
    }

    pub fn into_payload(self) -> T {
        self.payload
    }

    pub fn into_parts(self) -> (T, Headers) {
        (self.payload, self.headers)
    }

    /// Replace the payload, keeping the headers.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Message<U> {
        Message {
            payload: f(self.payload),
            headers: self.headers,
        }
    }

    /// Fallible [`Message::map`].
    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<Message<U>, E> {
        Ok(Message {
            payload: f(self.payload)?,
            headers: self.headers,
        })
    }
}
