//! Log line module — merge a raw container message into a JSON record.
//!
//! - `model.rs`: `LogEvent`, the `MessagePayload` parse outcome, `LogLineError`
//! - `build.rs`: the template/message merge producing publishable bytes
//! - `template.rs`: per-event template rendering from a `LogEvent`

pub mod model;
pub mod build;
pub mod template;

pub use model::{LogEvent, LogLineError, MessageKind, MessagePayload};
pub use build::{build_json_log_line, build_log_line, parse_template, BuiltLine, MESSAGE_KEY};
pub use template::render_template;
