use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogLineError {
    /// Template bytes are not valid JSON, or not a JSON object
    #[error("Template parse failed: {0}")]
    TemplateParse(String),
}

/// Outcome of the single parse attempt made on a raw log message.
#[derive(Debug, Clone, PartialEq)]
pub enum MessagePayload {
    /// Message is a JSON object; its fields are merged into the template
    Object(Map<String, Value>),
    /// Anything else (plain text, numbers, arrays, malformed JSON)
    PlainText(String),
}

impl MessagePayload {
    pub fn parse(message: &str) -> Self {
        match serde_json::from_str::<Value>(message) {
            Ok(Value::Object(fields)) => MessagePayload::Object(fields),
            _ => MessagePayload::PlainText(message.to_string()),
        }
    }

    pub fn kind(&self) -> MessageKind {
        match self {
            MessagePayload::Object(_) => MessageKind::Object,
            MessagePayload::PlainText(_) => MessageKind::PlainText,
        }
    }
}

/// Which merge branch a message took, without its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Object,
    PlainText,
}

/// A single log line observed on a container, before templating.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    pub timestamp: DateTime<Utc>,
    pub container_id: String,
    pub container_name: String,
    pub message: String,
}

impl LogEvent {
    pub fn new(
        container_id: impl Into<String>,
        container_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            container_id: container_id.into(),
            container_name: container_name.into(),
            message: message.into(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
