use std::io;
use std::sync::{Arc, Mutex};

use conduit_core::app::{
    CatalogBuilder, DROPPED_RESULT_PREFIX, EventContext, FunctionInvoker, HttpRequest,
    PubSubMessage,
};
use conduit_core::catalog::{FunctionRegistration, ROUTER_NAME, RoutingFunction};
use conduit_core::config::InvokerConfig;
use conduit_core::domain::Message;
use conduit_core::impls::DEFAULT_ROUTING_HEADER;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Debug, Serialize, Deserialize)]
struct IncomingRequest {
    message: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct OutgoingResponse {
    message: String,
}

const THANKS: &str = "Thank you for sending the message: hello";

/// Collects formatted log output for assertions.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn capture_logs() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
    let logs = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}

/// Exactly one dropped-result line, carrying `expected`.
fn assert_dropped_once(logs: &LogBuffer, expected: &str) {
    let output = logs.contents();
    assert_eq!(output.matches(DROPPED_RESULT_PREFIX).count(), 1, "{output}");
    assert!(output.contains(expected), "{output}");
}

fn invoker(registration: FunctionRegistration) -> FunctionInvoker {
    let catalog = CatalogBuilder::new()
        .register(registration)
        .unwrap()
        .build()
        .unwrap();
    FunctionInvoker::new(catalog, &InvokerConfig::default()).unwrap()
}

fn hello_world_supplier() -> FunctionRegistration {
    FunctionRegistration::supplier(|| "Hello World!".to_string()).with_name("supplier")
}

fn json_input_function() -> FunctionRegistration {
    FunctionRegistration::function(|req: IncomingRequest| {
        format!("Thank you for sending the message: {}", req.message)
    })
    .with_name("function")
}

fn json_input_output_function() -> FunctionRegistration {
    FunctionRegistration::function(|req: IncomingRequest| {
        Message::new(OutgoingResponse {
            message: format!("Thank you for sending the message: {}", req.message),
        })
        .with_header("foo", "bar")
    })
    .with_name("function")
}

fn json_input_consumer() -> FunctionRegistration {
    FunctionRegistration::consumer(|req: IncomingRequest| {
        tracing::info!("Thank you for sending the message: {}", req.message);
    })
    .with_name("function")
}

fn pubsub_consumer() -> FunctionRegistration {
    FunctionRegistration::consumer(|msg: PubSubMessage| {
        tracing::info!("Thank you for sending the message: {}", msg.data);
    })
    .with_name("consumer")
}

fn hello_body() -> Vec<u8> {
    serde_json::to_vec(&IncomingRequest {
        message: "hello".to_string(),
    })
    .unwrap()
}

// --- HTTP ---

#[tokio::test]
async fn http_supplier() {
    let response = invoker(hello_world_supplier())
        .service(HttpRequest::empty())
        .await;

    assert_eq!(response.status, 200);
    assert_eq!(response.text(), "\"Hello World!\"");
    assert_eq!(response.header("content-type"), Some("application/json"));
}

#[tokio::test]
async fn http_json_input_function() {
    let response = invoker(json_input_function())
        .service(HttpRequest::new(hello_body()))
        .await;

    assert_eq!(response.status, 200);
    assert_eq!(response.body, serde_json::to_vec(THANKS).unwrap());
}

#[tokio::test]
async fn http_message_output_copies_headers() {
    let response = invoker(json_input_output_function())
        .service(HttpRequest::new(hello_body()))
        .await;

    assert_eq!(response.status, 200);
    let body: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
    assert_eq!(body, json!({ "message": THANKS }));
    assert_eq!(response.header("foo"), Some("bar"));
}

#[tokio::test]
async fn http_consumer_returns_empty_body() {
    let (logs, _guard) = capture_logs();

    let response = invoker(json_input_consumer())
        .service(HttpRequest::new(hello_body()))
        .await;

    assert_eq!(response.status, 200);
    assert!(response.body.is_empty());
    assert!(logs.contents().contains(THANKS));
}

#[tokio::test]
async fn http_message_input_sees_request_headers() {
    let registration = FunctionRegistration::function(|req: Message<IncomingRequest>| {
        let trace = req.header_str("x-trace").unwrap_or("missing").to_string();
        let has_id = req.header_str("id").is_some();
        format!("{} {} {}", req.payload().message, trace, has_id)
    });

    let response = invoker(registration)
        .service(HttpRequest::new(hello_body()).with_header("x-trace", "abc"))
        .await;

    assert_eq!(response.text(), "\"hello abc true\"");
}

#[tokio::test]
async fn http_routing_by_header() {
    let config = InvokerConfig::default().with_definition(ROUTER_NAME);
    let catalog = CatalogBuilder::new()
        .register(
            FunctionRegistration::function(|s: String| s.to_uppercase()).with_name("uppercase"),
        )
        .unwrap()
        .register(
            FunctionRegistration::function(|s: String| s.chars().rev().collect::<String>())
                .with_name("reverse"),
        )
        .unwrap()
        .register(FunctionRegistration::routing(RoutingFunction::from_config(
            &config,
        )))
        .unwrap()
        .expect_functions(&["uppercase", "reverse", ROUTER_NAME])
        .build()
        .unwrap();
    let invoker = FunctionInvoker::new(catalog, &config).unwrap();

    let upper = invoker
        .service(HttpRequest::new("\"abc\"").with_header(DEFAULT_ROUTING_HEADER, "uppercase"))
        .await;
    let reversed = invoker
        .service(HttpRequest::new("\"abc\"").with_header(DEFAULT_ROUTING_HEADER, "reverse"))
        .await;
    let unrouted = invoker.service(HttpRequest::new("\"abc\"")).await;

    assert_eq!(upper.text(), "\"ABC\"");
    assert_eq!(reversed.text(), "\"cba\"");
    assert_eq!(unrouted.status, 500);
}

// --- Background ---

#[tokio::test]
async fn background_supplier_result_is_dropped() {
    let (logs, _guard) = capture_logs();

    invoker(hello_world_supplier())
        .accept(b"null", None)
        .await
        .unwrap();

    let expected = format!("{DROPPED_RESULT_PREFIX}\"Hello World!\"");
    assert_dropped_once(&logs, &expected);
}

#[tokio::test]
async fn background_function_result_is_dropped() {
    let (logs, _guard) = capture_logs();

    invoker(json_input_function())
        .accept(&hello_body(), None)
        .await
        .unwrap();

    let expected = format!(
        "{DROPPED_RESULT_PREFIX}{}",
        serde_json::to_string(THANKS).unwrap()
    );
    assert_dropped_once(&logs, &expected);
}

#[tokio::test]
async fn background_message_output_drops_payload_only() {
    let (logs, _guard) = capture_logs();

    invoker(json_input_output_function())
        .accept(&hello_body(), None)
        .await
        .unwrap();

    let expected = format!(
        "{DROPPED_RESULT_PREFIX}{}",
        serde_json::to_string(&OutgoingResponse {
            message: THANKS.to_string()
        })
        .unwrap()
    );
    assert_dropped_once(&logs, &expected);
}

#[tokio::test]
async fn background_consumer_logs_nothing_dropped() {
    let (logs, _guard) = capture_logs();

    invoker(json_input_consumer())
        .accept(&hello_body(), None)
        .await
        .unwrap();

    let output = logs.contents();
    assert!(output.contains(THANKS));
    assert!(!output.contains(DROPPED_RESULT_PREFIX));
}

#[tokio::test]
async fn background_pubsub_consumer() {
    let (logs, _guard) = capture_logs();

    let payload = serde_json::to_vec(&json!({ "data": "hello" })).unwrap();
    let context = EventContext::new()
        .with_event_id("1234")
        .with_event_type("google.pubsub.topic.publish");
    invoker(pubsub_consumer())
        .accept(&payload, Some(&context))
        .await
        .unwrap();

    let output = logs.contents();
    assert!(output.contains(THANKS));
    assert!(!output.contains(DROPPED_RESULT_PREFIX));
}

#[tokio::test]
async fn background_failure_is_returned() {
    let registration = FunctionRegistration::try_consumer(|_: IncomingRequest| {
        Err::<(), _>(io::Error::other("disk full"))
    });

    let err = invoker(registration)
        .accept(&hello_body(), None)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("disk full"));
}
