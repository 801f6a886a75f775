//! Publish — abstract interface to the broker client.
//!
//! The forwarder hands every merged log line to a [`Publisher`].
//! `stdout.rs` provides the dry-run writer used by the binary.
//! `fake.rs` provides an in-memory test double.

pub mod fake;
pub mod stdout;

use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use thiserror::Error;

pub use fake::FakePublisher;
pub use stdout::{StdoutPublisher, WriterPublisher};

/// One merged log line addressed to a topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub topic: String,
    pub payload: Bytes,
}

impl Record {
    pub fn new(topic: impl Into<String>, payload: Bytes) -> Self {
        Self { topic: topic.into(), payload }
    }
}

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Record rejected: {0}")]
    Rejected(String),

    #[error("Publisher I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Async sink for merged log lines.
///
/// Object-safe thanks to `Pin<Box<…>>` returns, so the forwarder can hold
/// an `Arc<dyn Publisher>`.
pub trait Publisher: Send + Sync {
    /// Short name for logging
    fn name(&self) -> &'static str;

    fn publish(
        &self,
        record: Record,
    ) -> Pin<Box<dyn Future<Output = Result<(), PublishError>> + Send + '_>>;
}
