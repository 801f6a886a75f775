//! Template — render the per-event JSON skeleton handed to the builder.

use std::fmt::Write;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::warn;

use super::build::MESSAGE_KEY;
use super::model::LogEvent;
use crate::conf::TemplateConfig;

/// Render `event` into a JSON object template.
///
/// The raw message goes in as a placeholder string; the builder decides
/// whether it stays a string or is merged as an object.
pub fn render_template(event: &LogEvent, config: &TemplateConfig) -> Bytes {
    let mut fields = Map::new();

    fields.insert(
        config.timestamp_key.clone(),
        Value::String(format_timestamp(&event.timestamp, &config.timestamp_format)),
    );
    fields.insert(
        config.container_name_key.clone(),
        Value::String(event.container_name.clone()),
    );
    if !config.container_id_key.is_empty() {
        fields.insert(
            config.container_id_key.clone(),
            Value::String(event.container_id.clone()),
        );
    }
    fields.insert(MESSAGE_KEY.to_string(), Value::String(event.message.clone()));

    Bytes::from(Value::Object(fields).to_string())
}

/// Format with a strftime layout, falling back to RFC 3339 if it is invalid.
fn format_timestamp(timestamp: &DateTime<Utc>, layout: &str) -> String {
    let mut formatted = String::new();
    if write!(formatted, "{}", timestamp.format(layout)).is_err() {
        warn!("Invalid timestamp layout '{}', using RFC 3339", layout);
        return timestamp.to_rfc3339();
    }
    formatted
}
