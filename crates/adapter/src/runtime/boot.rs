//! Boot — logging init, config load, route resolution.

use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::conf::AdapterConfig;
use crate::route::ResolvedRoute;

/// Initialise the tracing / logging subsystem.
///
/// Logs go to stderr; stdout carries published records.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "adapter=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Load and validate config, then resolve the route once for the process.
pub fn boot() -> Result<(AdapterConfig, ResolvedRoute), Box<dyn std::error::Error>> {
    info!("Starting adapter v{}", env!("CARGO_PKG_VERSION"));

    let config = AdapterConfig::load()?;
    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    let route = ResolvedRoute::resolve(&config.route, &config.options);
    info!("Resolved route: brokers={:?}, topic={:?}", route.brokers, route.topic);

    if !route.has_topic() {
        warn!("No topic in route '{}' or options; publishing to the empty topic", config.route);
    }
    if route.brokers.iter().any(|b| b.is_empty()) {
        warn!("Route '{}' contains an empty broker address", config.route);
    }

    Ok((config, route))
}
