//! FunctionInvoker - host から見た単一関数の入口
//!
//! # 二つの呼び出しモード
//! - **HTTP** ([`FunctionInvoker::service`]): request body → function →
//!   response body. Output message headers are copied onto the response.
//! - **Background** ([`FunctionInvoker::accept`]): event payload → function.
//!   Any result is logged and dropped, since nobody is waiting for it.
//!
//! Every invocation gets an `id` and `timestamp` header and runs inside a
//! tracing span carrying the invocation id.

use std::sync::Arc;

use serde_json::Value;
use tracing::{Instrument, debug, error, info, info_span, warn};

use super::event::EventContext;
use super::http::{HttpRequest, HttpResponse};
use super::invocation::FunctionInvocation;
use crate::catalog::FunctionCatalog;
use crate::config::InvokerConfig;
use crate::domain::message::headers;
use crate::domain::{Headers, InvocationError, InvocationId, Message};
use crate::ports::{Clock, IdGenerator, SystemClock, UlidGenerator};
use crate::typed::{JsonCodec, PayloadCodec};

/// Prefix of the log line emitted for a discarded background result.
pub const DROPPED_RESULT_PREFIX: &str = "Dropping background function result: ";

/// Errors raised while binding an invoker to a function.
#[derive(Debug, thiserror::Error)]
pub enum InvokerError {
    #[error("no functions are registered")]
    NoFunctions,

    #[error("several functions are registered, set a definition to pick one of {0:?}")]
    AmbiguousFunction(Vec<String>),

    #[error("function '{0}' is not registered")]
    FunctionNotFound(String),
}

/// FunctionInvoker は一つの関数を host に公開する
///
/// # 学習ポイント
/// - 起動時に関数を一つに確定（曖昧なら InvokerError）
/// - codec / clock / id 生成は差し替え可能（テストで固定できる）
/// - ログと span は tracing に任せ、subscriber は host 側で設定
///
/// # 使用例
/// ```ignore
/// let invoker = FunctionInvoker::new(catalog, &InvokerConfig::load()?)?;
/// let response = invoker.service(HttpRequest::new(body)).await;
/// invoker.accept(&payload, Some(&context)).await?;
/// ```
pub struct FunctionInvoker {
    function: FunctionInvocation,
    codec: Arc<dyn PayloadCodec>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl FunctionInvoker {
    /// Bind to the function named by `config.definition`, or to the only
    /// non-routing function when no definition is set.
    pub fn new(catalog: Arc<FunctionCatalog>, config: &InvokerConfig) -> Result<Self, InvokerError> {
        let function = select_function(&catalog, config)?;
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        info!(
            function = function.name().unwrap_or("<unnamed>"),
            arity = ?function.descriptor().arity(),
            "function invoker ready"
        );
        Ok(Self {
            function,
            codec: Arc::new(JsonCodec::new()),
            ids: Arc::new(UlidGenerator::new(Arc::clone(&clock))),
            clock,
        })
    }

    pub fn with_codec(mut self, codec: impl PayloadCodec + 'static) -> Self {
        self.codec = Arc::new(codec);
        self
    }

    /// Replace the clock. Invocation ids are derived from it as well.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(clock);
        self.ids = Arc::new(UlidGenerator::new(Arc::clone(&clock)));
        self.clock = clock;
        self
    }

    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Arc::new(ids);
        self
    }

    pub fn function(&self) -> &FunctionInvocation {
        &self.function
    }

    pub fn function_name(&self) -> Option<&str> {
        self.function.name()
    }

    /// Synchronous HTTP mode.
    ///
    /// - empty body: the function gets no input (a router still sees the headers)
    /// - request headers become message headers
    /// - undecodable body or missing input: 400
    /// - any other failure: 500
    pub async fn service(&self, request: HttpRequest) -> HttpResponse {
        let mut headers: Headers = request
            .headers
            .iter()
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect();
        let id = self.stamp(&mut headers);
        let span = info_span!(
            "service",
            invocation_id = %id,
            function = self.function_label(),
            method = %request.method,
            path = %request.path,
        );

        async move {
            let input = match self.codec.decode(&request.body) {
                Ok(payload) => self.input(payload, headers),
                Err(err) => {
                    warn!(error = %err, "rejecting undecodable request body");
                    return HttpResponse::error(400, &InvocationError::Input(err).to_string());
                }
            };

            match self.function.invoke(input).await {
                Ok(Some(output)) => self.respond(output),
                Ok(None) => {
                    debug!("function produced no output");
                    HttpResponse::ok(Vec::new())
                }
                Err(err) if err.is_client_error() => {
                    warn!(error = %err, "invocation rejected");
                    HttpResponse::error(400, &err.to_string())
                }
                Err(err) => {
                    error!(error = %err, "invocation failed");
                    HttpResponse::error(500, &err.to_string())
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Fire-and-forget mode.
    ///
    /// The event context (if any) is exposed as `event.*` message headers.
    /// A produced result is encoded, logged with [`DROPPED_RESULT_PREFIX`],
    /// and discarded.
    pub async fn accept(
        &self,
        payload: &[u8],
        context: Option<&EventContext>,
    ) -> Result<(), InvocationError> {
        let mut headers = context.map(EventContext::to_headers).unwrap_or_default();
        let id = self.stamp(&mut headers);
        let span = info_span!(
            "accept",
            invocation_id = %id,
            function = self.function_label(),
        );

        async move {
            let payload = self.codec.decode(payload).map_err(InvocationError::Input)?;
            let input = self.input(payload, headers);

            match self.function.invoke(input).await {
                Ok(Some(output)) => {
                    let encoded = self
                        .codec
                        .encode(output.payload())
                        .map_err(InvocationError::Output)?;
                    info!(
                        "{}{}",
                        DROPPED_RESULT_PREFIX,
                        String::from_utf8_lossy(&encoded)
                    );
                    Ok(())
                }
                Ok(None) => Ok(()),
                Err(err) => {
                    error!(error = %err, "background invocation failed");
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }

    fn respond(&self, output: Message<Value>) -> HttpResponse {
        let (payload, output_headers) = output.into_parts();
        let body = match self.codec.encode(&payload) {
            Ok(body) => body,
            Err(err) => {
                error!(error = %err, "failed to encode function output");
                return HttpResponse::error(500, &InvocationError::Output(err).to_string());
            }
        };

        let mut response = HttpResponse::ok(body);
        for (key, value) in output_headers {
            if key.eq_ignore_ascii_case(HttpResponse::CONTENT_TYPE) {
                continue;
            }
            response = response.with_header(key, header_text(value));
        }
        response.with_header(HttpResponse::CONTENT_TYPE, self.codec.content_type())
    }

    /// Message handed to the function for a decoded body.
    ///
    /// A router still gets the headers when there is no body, since the
    /// target is picked from them; the payload is then `null`.
    fn input(&self, payload: Option<Value>, headers: Headers) -> Option<Message<Value>> {
        match payload {
            Some(payload) => Some(Message::from_parts(payload, headers)),
            None if self.function.is_routing() => Some(Message::from_parts(Value::Null, headers)),
            None => None,
        }
    }

    fn stamp(&self, headers: &mut Headers) -> InvocationId {
        let id = self.ids.generate_invocation_id();
        headers.insert(headers::ID.to_string(), Value::String(id.to_string()));
        headers.insert(
            headers::TIMESTAMP.to_string(),
            Value::from(self.clock.now().timestamp_millis()),
        );
        id
    }

    fn function_label(&self) -> &str {
        self.function.name().unwrap_or("<unnamed>")
    }
}

impl Drop for FunctionInvoker {
    fn drop(&mut self) {
        debug!(function = self.function_label(), "releasing function invoker");
    }
}

fn select_function(
    catalog: &Arc<FunctionCatalog>,
    config: &InvokerConfig,
) -> Result<FunctionInvocation, InvokerError> {
    if let Some(name) = config.definition() {
        return catalog
            .lookup(name)
            .ok_or_else(|| InvokerError::FunctionNotFound(name.to_string()));
    }

    let candidates: Vec<_> = catalog
        .registrations()
        .filter(|registration| !registration.handle().is_routing())
        .collect();
    match candidates.as_slice() {
        [] => Err(InvokerError::NoFunctions),
        [only] => catalog
            .invocation(only.handle())
            .ok_or(InvokerError::NoFunctions),
        several => Err(InvokerError::AmbiguousFunction(
            several
                .iter()
                .filter_map(|registration| registration.names().iter().next().cloned())
                .collect(),
        )),
    }
}

fn header_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}
