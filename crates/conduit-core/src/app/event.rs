//! Background event types.
//!
//! [`EventContext`] is the metadata a host attaches to a background event.
//! [`PubSubMessage`] is the payload shape of a Pub/Sub push; register a
//! consumer of `PubSubMessage` to receive one.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::Headers;

/// Metadata of a background event. Every field becomes a message header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventContext {
    pub event_id: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    pub event_type: Option<String>,
    pub resource: Option<String>,
    pub attributes: BTreeMap<String, String>,
}

impl EventContext {
    pub const EVENT_ID: &'static str = "event.id";
    pub const EVENT_TIMESTAMP: &'static str = "event.timestamp";
    pub const EVENT_TYPE: &'static str = "event.type";
    pub const EVENT_RESOURCE: &'static str = "event.resource";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_event_id(mut self, id: impl Into<String>) -> Self {
        self.event_id = Some(id.into());
        self
    }

    pub fn with_timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.timestamp = Some(at);
        self
    }

    pub fn with_event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = Some(event_type.into());
        self
    }

    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Message headers for this context. Attributes are copied as-is and
    /// never override the `event.*` keys.
    pub fn to_headers(&self) -> Headers {
        let mut headers: Headers = self
            .attributes
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();

        let fields = [
            (Self::EVENT_ID, self.event_id.clone()),
            (
                Self::EVENT_TIMESTAMP,
                self.timestamp
                    .map(|at| at.to_rfc3339_opts(SecondsFormat::Millis, true)),
            ),
            (Self::EVENT_TYPE, self.event_type.clone()),
            (Self::EVENT_RESOURCE, self.resource.clone()),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                headers.insert(key.to_string(), Value::String(value));
            }
        }
        headers
    }
}

/// A Pub/Sub push payload.
///
/// Missing fields default, so `{"data": "hello"}` is a valid message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PubSubMessage {
    pub data: String,
    pub attributes: BTreeMap<String, String>,
    pub message_id: Option<String>,
    pub publish_time: Option<DateTime<Utc>>,
}

impl PubSubMessage {
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn context_headers() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
        let ctx = EventContext::new()
            .with_event_id("evt-1")
            .with_timestamp(at)
            .with_event_type("google.pubsub.topic.publish")
            .with_attribute("origin", "test")
            .with_attribute(EventContext::EVENT_ID, "spoofed");

        let headers = ctx.to_headers();
        assert_eq!(headers[EventContext::EVENT_ID], json!("evt-1"));
        assert_eq!(
            headers[EventContext::EVENT_TIMESTAMP],
            json!("2024-05-01T08:30:00.000Z")
        );
        assert_eq!(headers["origin"], json!("test"));
        assert!(!headers.contains_key(EventContext::EVENT_RESOURCE));
    }

    #[test]
    fn pubsub_accepts_partial_json() {
        let msg: PubSubMessage = serde_json::from_value(json!({"data": "hello"})).unwrap();
        assert_eq!(msg, PubSubMessage::new("hello"));
    }

    #[test]
    fn pubsub_uses_camel_case() {
        let msg: PubSubMessage = serde_json::from_value(json!({
            "data": "aGVsbG8=",
            "attributes": {"k": "v"},
            "messageId": "42",
            "publishTime": "2024-05-01T08:30:00Z"
        }))
        .unwrap();
        assert_eq!(msg.message_id.as_deref(), Some("42"));
        assert_eq!(msg.attributes["k"], "v");
        assert!(msg.publish_time.is_some());

        let back = serde_json::to_value(&msg).unwrap();
        assert!(back.get("messageId").is_some());
    }
}
