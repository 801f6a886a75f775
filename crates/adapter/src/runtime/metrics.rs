use std::sync::atomic::{AtomicU64, Ordering};
use serde::Serialize;

use crate::logline::MessageKind;

/// Counters for the forwarding loop.
///
/// All operations use `Ordering::Relaxed`; `snapshot()` is not transactional
/// across fields, which is fine for observability.
#[derive(Debug, Default)]
pub struct ForwardMetrics {
    published: AtomicU64,
    published_bytes: AtomicU64,
    skipped_templates: AtomicU64,
    publish_failures: AtomicU64,
    object_messages: AtomicU64,
    plain_text_messages: AtomicU64,
}

impl ForwardMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_published(&self, bytes: usize) {
        self.published.fetch_add(1, Ordering::Relaxed);
        self.published_bytes.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    /// Which merge branch a built line took, published or not
    #[inline]
    pub fn record_message_kind(&self, kind: MessageKind) {
        match kind {
            MessageKind::Object => self.object_messages.fetch_add(1, Ordering::Relaxed),
            MessageKind::PlainText => self.plain_text_messages.fetch_add(1, Ordering::Relaxed),
        };
    }

    /// Event dropped because its template was not a JSON object
    #[inline]
    pub fn record_skipped_template(&self) {
        self.skipped_templates.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_publish_failure(&self) {
        self.publish_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            published: self.published.load(Ordering::Relaxed),
            published_bytes: self.published_bytes.load(Ordering::Relaxed),
            skipped_templates: self.skipped_templates.load(Ordering::Relaxed),
            publish_failures: self.publish_failures.load(Ordering::Relaxed),
            object_messages: self.object_messages.load(Ordering::Relaxed),
            plain_text_messages: self.plain_text_messages.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub published: u64,
    pub published_bytes: u64,
    pub skipped_templates: u64,
    pub publish_failures: u64,
    pub object_messages: u64,
    pub plain_text_messages: u64,
}

impl MetricsSnapshot {
    /// Events seen by the forwarder, whatever their outcome
    pub fn total(&self) -> u64 {
        self.published + self.skipped_templates + self.publish_failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_snapshot_starts_at_zero() {
        assert_eq!(ForwardMetrics::new().snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn test_record_and_total() {
        let metrics = ForwardMetrics::new();
        metrics.record_published(10);
        metrics.record_published(5);
        metrics.record_skipped_template();
        metrics.record_publish_failure();

        let snap = metrics.snapshot();
        assert_eq!(snap.published, 2);
        assert_eq!(snap.published_bytes, 15);
        assert_eq!(snap.skipped_templates, 1);
        assert_eq!(snap.publish_failures, 1);
        assert_eq!(snap.total(), 4);
    }

    #[test]
    fn test_record_message_kind() {
        let metrics = ForwardMetrics::new();
        metrics.record_message_kind(MessageKind::Object);
        metrics.record_message_kind(MessageKind::PlainText);
        metrics.record_message_kind(MessageKind::PlainText);

        let snap = metrics.snapshot();
        assert_eq!(snap.object_messages, 1);
        assert_eq!(snap.plain_text_messages, 2);
        // Kinds classify events, they are not extra events
        assert_eq!(snap.total(), 0);
    }

    #[test]
    fn test_concurrent_updates() {
        let metrics = Arc::new(ForwardMetrics::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let m = Arc::clone(&metrics);
                thread::spawn(move || {
                    for _ in 0..1000 {
                        m.record_published(1);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(metrics.snapshot().published, 4000);
    }

    #[test]
    fn test_snapshot_serializes() {
        let json = serde_json::to_value(ForwardMetrics::new().snapshot()).unwrap();
        assert_eq!(json["published"], 0);
        assert_eq!(json["skipped_templates"], 0);
        assert_eq!(json["object_messages"], 0);
        assert_eq!(json["plain_text_messages"], 0);
    }
}
