use bytes::Bytes;
use serde_json::{Map, Value};

use super::model::{LogLineError, MessageKind, MessagePayload};

/// Key holding the log message in both the template and the merged line.
pub const MESSAGE_KEY: &str = "message";

/// Merge `message` into the JSON `template` and serialize the result.
///
/// A message that parses as a JSON object has each of its top-level fields
/// written over the template's (message wins). Any other message becomes the
/// literal string value of `message`. Only a bad template is an error.
pub fn build_json_log_line(template: &[u8], message: &str) -> Result<Bytes, LogLineError> {
    build_log_line(template, message).map(|line| line.payload)
}

/// A merged log line and the branch its message took.
#[derive(Debug, Clone)]
pub struct BuiltLine {
    pub payload: Bytes,
    pub kind: MessageKind,
}

/// Same merge as [`build_json_log_line`], also reporting the message kind.
pub fn build_log_line(template: &[u8], message: &str) -> Result<BuiltLine, LogLineError> {
    let mut line = parse_template(template)?;

    let payload = MessagePayload::parse(message);
    let kind = payload.kind();
    match payload {
        MessagePayload::Object(fields) => merge_fields(&mut line, fields),
        MessagePayload::PlainText(text) => {
            line.insert(MESSAGE_KEY.to_string(), Value::String(text));
        }
    }

    Ok(BuiltLine {
        payload: Bytes::from(Value::Object(line).to_string()),
        kind,
    })
}

/// Parse template bytes into a JSON object.
pub fn parse_template(template: &[u8]) -> Result<Map<String, Value>, LogLineError> {
    let value: Value = serde_json::from_slice(template)
        .map_err(|e| LogLineError::TemplateParse(format!("Invalid JSON: {}", e)))?;

    match value {
        Value::Object(fields) => Ok(fields),
        other => Err(LogLineError::TemplateParse(format!(
            "JSON is not an object (found {})",
            json_kind(&other)
        ))),
    }
}

fn merge_fields(line: &mut Map<String, Value>, fields: Map<String, Value>) {
    for (key, value) in fields {
        line.insert(key, value);
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
