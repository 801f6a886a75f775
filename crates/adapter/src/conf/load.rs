//! Load — config loading from file and environment variables.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::model::{AdapterConfig, SourceConfig, TemplateConfig};
use crate::route::TOPIC_OPTION;

impl AdapterConfig {
    /// Load configuration from file or environment variables
    /// Priority: Environment Variables > Config File > Defaults
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = std::env::var("ADAPTER_CONFIG_FILE")
            .unwrap_or_else(|_| "/etc/adapter/adapter.toml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            tracing::info!("Loading configuration from: {}", config_path);
            Self::from_file(&config_path)?
        } else {
            tracing::info!("Config file not found at {}, using environment variables", config_path);
            Self::from_env()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: AdapterConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from environment variables with sensible defaults
    pub fn from_env() -> Self {
        let mut options = HashMap::new();
        if let Ok(topic) = std::env::var("ADAPTER_TOPIC") {
            options.insert(TOPIC_OPTION.to_string(), topic);
        }

        Self {
            route: std::env::var("ADAPTER_ROUTE")
                .unwrap_or_else(|_| "localhost:9092".to_string()),
            options,
            template: TemplateConfig::from_env(),
            source: SourceConfig::from_env(),
            channel_capacity: std::env::var("ADAPTER_CHANNEL_CAPACITY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1024),
        }
    }

    /// Environment variables override file config for routing and identity
    fn apply_env_overrides(&mut self) {
        if let Ok(route) = std::env::var("ADAPTER_ROUTE") {
            self.route = route;
        }
        if let Ok(topic) = std::env::var("ADAPTER_TOPIC") {
            self.options.insert(TOPIC_OPTION.to_string(), topic);
        }
        if let Ok(name) = std::env::var("ADAPTER_CONTAINER_NAME") {
            self.source.container_name = name;
        }
        if let Ok(id) = std::env::var("ADAPTER_CONTAINER_ID") {
            self.source.container_id = id;
        }
    }
}

impl TemplateConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            timestamp_key: std::env::var("ADAPTER_TIMESTAMP_KEY")
                .unwrap_or(defaults.timestamp_key),
            container_name_key: std::env::var("ADAPTER_CONTAINER_NAME_KEY")
                .unwrap_or(defaults.container_name_key),
            container_id_key: std::env::var("ADAPTER_CONTAINER_ID_KEY")
                .unwrap_or(defaults.container_id_key),
            timestamp_format: std::env::var("ADAPTER_TIMESTAMP_FORMAT")
                .unwrap_or(defaults.timestamp_format),
        }
    }
}

impl SourceConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            container_id: std::env::var("ADAPTER_CONTAINER_ID")
                .unwrap_or(defaults.container_id),
            container_name: std::env::var("ADAPTER_CONTAINER_NAME")
                .unwrap_or(defaults.container_name),
        }
    }
}
