//! WebSocket message envelope and client commands.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::CacheEvent;

/// Top-level WebSocket message envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WsMessage {
    /// Client-provided ID for commands and their responses; server-generated
    /// for events.
    #[serde(default)]
    pub id: String,
    /// Message type discriminator.
    #[serde(rename = "type")]
    pub msg_type: WsMessageType,
    /// ISO-8601 timestamp. Optional on client commands.
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    /// Variant-specific payload.
    #[serde(default)]
    pub payload: Value,
}

/// Discriminator for WebSocket message types.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WsMessageType {
    /// Client → Server command.
    Command,
    /// Server → Client response to a command.
    Response,
    /// Server → Client cache event.
    Event,
    /// Server → Client error.
    Error,
}

impl WsMessage {
    /// Response to the command with `id`.
    #[must_use]
    pub fn response(id: String, payload: Value) -> Self {
        Self {
            id,
            msg_type: WsMessageType::Response,
            timestamp: Utc::now(),
            payload,
        }
    }

    /// Broadcast of a cache event.
    #[must_use]
    pub fn event(event: &CacheEvent) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            msg_type: WsMessageType::Event,
            timestamp: Utc::now(),
            payload: serde_json::to_value(event).unwrap_or_default(),
        }
    }

    /// Error reply; `id` is empty when the command could not be read.
    #[must_use]
    pub fn error(id: String, code: u16, message: impl Into<String>) -> Self {
        Self {
            id,
            msg_type: WsMessageType::Error,
            timestamp: Utc::now(),
            payload: serde_json::json!({
                "code": code,
                "message": message.into(),
            }),
        }
    }

    /// Serializes the message for the wire.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Commands a client can send in a `command` message payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum WsCommand {
    /// Start receiving events for resources. `"*"` subscribes to all.
    Subscribe {
        /// Resource names, e.g. `["withdrawals", "networks"]`.
        resources: Vec<String>,
    },
    /// Stop receiving events for resources. `"*"` clears everything.
    Unsubscribe {
        /// Resource names.
        resources: Vec<String>,
    },
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn command_without_timestamp_parses() {
        let text = r#"{"id":"c-1","type":"command","payload":{"command":"subscribe","resources":["*"]}}"#;
        let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
            panic!("command should parse");
        };
        assert_eq!(msg.msg_type, WsMessageType::Command);
        let Ok(command) = serde_json::from_value::<WsCommand>(msg.payload) else {
            panic!("payload should parse");
        };
        assert_eq!(
            command,
            WsCommand::Subscribe {
                resources: vec!["*".to_string()]
            }
        );
    }

    #[test]
    fn error_payload_carries_code() {
        let msg = WsMessage::error(String::new(), 400, "malformed JSON");
        assert_eq!(msg.payload.get("code"), Some(&serde_json::json!(400)));
        assert_eq!(
            msg.payload.get("message").and_then(Value::as_str),
            Some("malformed JSON")
        );
    }
}
