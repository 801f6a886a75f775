//! Fake — test double for the broker publisher.
//!
//! Provides a deterministic [`FakePublisher`] that implements [`Publisher`]
//! using in-memory state, so the forwarder can be exercised without a
//! running broker.

use std::future::Future;
use std::pin::Pin;

use tokio::sync::Mutex;

use super::{PublishError, Publisher, Record};

/// Mutable inner state protected by a mutex.
#[derive(Default)]
struct Inner {
    records: Vec<Record>,
    /// Topics whose records are refused with `PublishError::Rejected`
    rejected_topics: Vec<String>,
}

/// A fake publisher for deterministic testing.
pub struct FakePublisher {
    inner: Mutex<Inner>,
}

impl FakePublisher {
    /// Create an empty fake publisher.
    pub fn new() -> Self {
        Self { inner: Mutex::new(Inner::default()) }
    }

    /// Refuse every record addressed to `topic`.
    pub async fn reject_topic(&self, topic: impl Into<String>) {
        self.inner.lock().await.rejected_topics.push(topic.into());
    }

    /// Snapshot of accepted records, in publish order.
    pub async fn records(&self) -> Vec<Record> {
        self.inner.lock().await.records.clone()
    }

    pub async fn record_count(&self) -> usize {
        self.inner.lock().await.records.len()
    }
}

impl Default for FakePublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl Publisher for FakePublisher {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn publish(
        &self,
        record: Record,
    ) -> Pin<Box<dyn Future<Output = Result<(), PublishError>> + Send + '_>> {
        Box::pin(async move {
            let mut state = self.inner.lock().await;
            if state.rejected_topics.iter().any(|t| *t == record.topic) {
                return Err(PublishError::Rejected(format!("topic '{}' refused", record.topic)));
            }
            state.records.push(record);
            Ok(())
        })
    }
}
