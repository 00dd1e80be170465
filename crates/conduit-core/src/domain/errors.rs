//! Errors - コーデックと関数呼び出しのエラー
//!
//! Lookup misses are never errors (see `catalog::FunctionInspectorExt`); the
//! types here only cover decoding, encoding, and invoking.

use thiserror::Error;

/// Boxed error returned by user functions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure to turn bytes or JSON values into typed payloads (or back).
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("decode failed: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("encode failed: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Failure of a single invocation.
#[derive(Debug, Error)]
pub enum InvocationError {
    /// The input could not be converted to the function's declared type.
    #[error("input conversion failed: {0}")]
    Input(#[source] CodecError),

    /// The output could not be converted to a JSON value.
    #[error("output conversion failed: {0}")]
    Output(#[source] CodecError),

    /// A function that takes an input was invoked without one.
    #[error("function requires an input but none was provided")]
    MissingInput,

    /// A routing indirection could not pick a target.
    #[error("routing failed: {0}")]
    Routing(String),

    /// The user function itself returned an error.
    #[error("function failed: {0}")]
    Function(#[source] BoxError),
}

impl InvocationError {
    /// True for errors caused by the caller's input rather than the function.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            InvocationError::Input(_) | InvocationError::MissingInput
        )
    }
}
