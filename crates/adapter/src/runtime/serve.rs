//! Serve — wire stdin, the forwarder, and the stdout publisher together.

use std::sync::Arc;

use tokio::io::BufReader;
use tokio::sync::mpsc;
use tracing::{error, info};

use super::forward::Forwarder;
use super::pipe::pump_lines;
use super::stop::shutdown_signal;
use crate::conf::AdapterConfig;
use crate::publish::StdoutPublisher;
use crate::route::ResolvedRoute;

/// Forward stdin lines until EOF or a shutdown signal.
pub async fn serve(
    config: AdapterConfig,
    route: ResolvedRoute,
) -> Result<(), Box<dyn std::error::Error>> {
    let (tx, rx) = mpsc::channel(config.channel_capacity);
    let publisher = Arc::new(StdoutPublisher::stdout());
    let forwarder = Forwarder::new(route, config.template.clone(), publisher);

    let source = config.source.clone();
    let pump = tokio::spawn(async move {
        let stdin = BufReader::new(tokio::io::stdin());
        tokio::select! {
            result = pump_lines(stdin, &source, tx) => match result {
                Ok(sent) => info!("Input closed after {} events", sent),
                Err(e) => error!("Failed reading input: {}", e),
            },
            _ = shutdown_signal() => {}
        }
    });

    // The pump drops its sender on exit, which ends the run once drained
    let snapshot = forwarder.run(rx).await;
    pump.await?;

    info!("Final metrics: {}", serde_json::to_string(&snapshot)?);
    Ok(())
}
