//! Forward — per-event build-and-publish loop.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::metrics::{ForwardMetrics, MetricsSnapshot};
use crate::conf::TemplateConfig;
use crate::logline::{build_log_line, render_template, LogEvent};
use crate::publish::{PublishError, Publisher, Record};
use crate::route::ResolvedRoute;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardOutcome {
    Published,
    /// Template was not a JSON object; nothing was published
    Skipped,
}

#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("Publish to topic '{topic}' failed: {source}")]
    Publish {
        topic: String,
        #[source]
        source: PublishError,
    },
}

/// Turns log events into merged JSON records on the resolved topic.
pub struct Forwarder {
    route: ResolvedRoute,
    template: TemplateConfig,
    publisher: Arc<dyn Publisher>,
    metrics: Arc<ForwardMetrics>,
}

impl Forwarder {
    pub fn new(
        route: ResolvedRoute,
        template: TemplateConfig,
        publisher: Arc<dyn Publisher>,
    ) -> Self {
        Self {
            route,
            template,
            publisher,
            metrics: Arc::new(ForwardMetrics::new()),
        }
    }

    pub fn route(&self) -> &ResolvedRoute {
        &self.route
    }

    pub fn metrics(&self) -> Arc<ForwardMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Merge `message` into `template` and publish the result.
    ///
    /// A template that is not a JSON object is logged and skipped rather than
    /// published as a default record.
    pub async fn forward_line(
        &self,
        template: &[u8],
        message: &str,
    ) -> Result<ForwardOutcome, ForwardError> {
        let payload = match build_log_line(template, message) {
            Ok(line) => {
                self.metrics.record_message_kind(line.kind);
                line.payload
            }
            Err(e) => {
                warn!(error = %e, "Skipping log event with unusable template");
                self.metrics.record_skipped_template();
                return Ok(ForwardOutcome::Skipped);
            }
        };

        let size = payload.len();
        let record = Record::new(self.route.topic.clone(), payload);
        self.publisher.publish(record).await.map_err(|source| {
            self.metrics.record_publish_failure();
            ForwardError::Publish {
                topic: self.route.topic.clone(),
                source,
            }
        })?;

        self.metrics.record_published(size);
        Ok(ForwardOutcome::Published)
    }

    /// Render the event's template, then forward it.
    pub async fn forward_event(&self, event: &LogEvent) -> Result<ForwardOutcome, ForwardError> {
        let template = render_template(event, &self.template);
        self.forward_line(&template, &event.message).await
    }

    /// Drain `rx` until every sender is dropped.
    ///
    /// Publish failures are logged and counted; they never stop the loop.
    pub async fn run(&self, mut rx: mpsc::Receiver<LogEvent>) -> MetricsSnapshot {
        info!(
            publisher = self.publisher.name(),
            topic = %self.route.topic,
            brokers = ?self.route.brokers,
            "Forwarder started"
        );

        while let Some(event) = rx.recv().await {
            match self.forward_event(&event).await {
                Ok(outcome) => {
                    debug!(container = %event.container_name, ?outcome, "Forwarded log event")
                }
                Err(e) => error!(container = %event.container_name, "{}", e),
            }
        }

        let snapshot = self.metrics.snapshot();
        info!(
            published = snapshot.published,
            skipped = snapshot.skipped_templates,
            failed = snapshot.publish_failures,
            "Forwarder stopped"
        );
        snapshot
    }
}
