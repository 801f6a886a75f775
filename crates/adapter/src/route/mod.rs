//! Route module — broker endpoints and destination topic from a route spec.

pub mod resolve;

pub use resolve::{read_brokers, read_topic, ResolvedRoute, TOPIC_OPTION};
