//! Model — AdapterConfig and related structs.

use std::collections::HashMap;
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::logline::MESSAGE_KEY;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// `host:port[,host:port...][/topic]`
    pub route: String,
    /// Route options; `topic` is used when the route has no `/topic`
    pub options: HashMap<String, String>,
    pub template: TemplateConfig,
    pub source: SourceConfig,
    /// Bounded capacity of the event channel feeding the forwarder
    pub channel_capacity: usize,
}

/// Field names and timestamp layout of the rendered log template
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub timestamp_key: String,
    pub container_name_key: String,
    /// Empty string leaves the container id out of the template
    pub container_id_key: String,
    /// chrono strftime layout
    pub timestamp_format: String,
}

/// Identity stamped on events read from stdin
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub container_id: String,
    pub container_name: String,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            route: "localhost:9092".to_string(),
            options: HashMap::new(),
            template: TemplateConfig::default(),
            source: SourceConfig::default(),
            channel_capacity: 1024,
        }
    }
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            timestamp_key: "timestamp".to_string(),
            container_name_key: "container_name".to_string(),
            container_id_key: "container_id".to_string(),
            timestamp_format: "%Y-%m-%d %H:%M:%S UTC".to_string(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            container_id: "".to_string(),
            container_name: "stdin".to_string(),
        }
    }
}

impl AdapterConfig {
    /// Validate configuration values.
    ///
    /// An empty route is accepted; it resolves to a single empty broker token.
    pub fn validate(&self) -> Result<(), String> {
        if self.channel_capacity == 0 {
            return Err("channel_capacity must be > 0".to_string());
        }
        self.template.validate()
    }
}

impl TemplateConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.timestamp_key.is_empty() {
            return Err("template.timestamp_key must not be empty".to_string());
        }
        if self.container_name_key.is_empty() {
            return Err("template.container_name_key must not be empty".to_string());
        }

        let mut keys = vec![&self.timestamp_key, &self.container_name_key];
        if !self.container_id_key.is_empty() {
            keys.push(&self.container_id_key);
        }
        for (i, key) in keys.iter().enumerate() {
            if key.as_str() == MESSAGE_KEY {
                return Err(format!("template key '{}' is reserved", MESSAGE_KEY));
            }
            if keys[..i].contains(key) {
                return Err(format!("template key '{}' is used more than once", key));
            }
        }

        if StrftimeItems::new(&self.timestamp_format).any(|item| matches!(item, Item::Error)) {
            return Err(format!(
                "template.timestamp_format '{}' is not a valid strftime layout",
                self.timestamp_format
            ));
        }
        Ok(())
    }
}
