//! PayloadCodec - host の bytes と JSON value の相互変換
//!
//! The invoker works on `serde_json::Value` internally; a codec sits at the
//! host boundary only.

use serde_json::Value;

use crate::domain::CodecError;

/// Converts host bytes to values and back.
pub trait PayloadCodec: Send + Sync {
    /// Decode a body. Empty or whitespace-only input means "no input".
    fn decode(&self, bytes: &[u8]) -> Result<Option<Value>, CodecError>;

    fn encode(&self, value: &Value) -> Result<Vec<u8>, CodecError>;

    /// Media type of encoded bodies.
    fn content_type(&self) -> &'static str;
}

/// JSON codec backed by `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    pub fn new() -> Self {
        Self
    }
}

impl PayloadCodec for JsonCodec {
    fn decode(&self, bytes: &[u8]) -> Result<Option<Value>, CodecError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        serde_json::from_slice(bytes)
            .map(Some)
            .map_err(CodecError::Decode)
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(value).map_err(CodecError::Encode)
    }

    fn content_type(&self) -> &'static str {
        "application/json"
    }
}
