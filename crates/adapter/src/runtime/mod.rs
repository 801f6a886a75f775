//! Runtime module — process lifecycle: boot, forward loop, input pipe, shutdown.

pub mod boot;
pub mod forward;
pub mod metrics;
pub mod pipe;
pub mod serve;
pub mod stop;

pub use forward::{ForwardError, ForwardOutcome, Forwarder};
pub use metrics::{ForwardMetrics, MetricsSnapshot};
