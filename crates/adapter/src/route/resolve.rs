//! Resolve — split `host:port[,host:port...][/topic]` into brokers and a topic.

use std::collections::HashMap;
use serde::Serialize;

/// Option key consulted when the route carries no `/topic` segment.
pub const TOPIC_OPTION: &str = "topic";

const TOPIC_SEPARATOR: char = '/';
const BROKER_SEPARATOR: char = ',';

/// Broker endpoints and destination topic, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRoute {
    /// Verbatim `host:port` tokens in route order.
    pub brokers: Vec<String>,
    /// Destination topic, possibly empty.
    pub topic: String,
}

impl ResolvedRoute {
    pub fn resolve(route: &str, options: &HashMap<String, String>) -> Self {
        Self {
            brokers: read_brokers(route),
            topic: read_topic(route, options),
        }
    }

    pub fn has_topic(&self) -> bool {
        !self.topic.is_empty()
    }
}

/// Broker tokens from the part of `route` before the first `/`.
///
/// Tokens are not validated; an empty route yields a single empty token and
/// malformed endpoints are left for the network layer to reject.
pub fn read_brokers(route: &str) -> Vec<String> {
    let addresses = match route.split_once(TOPIC_SEPARATOR) {
        Some((addresses, _)) => addresses,
        None => route,
    };

    addresses
        .split(BROKER_SEPARATOR)
        .map(str::to_string)
        .collect()
}

/// Topic embedded after the first `/` of `route`, else the `topic` option.
///
/// An embedded topic always wins, even when it is empty (`"broker/"`).
pub fn read_topic(route: &str, options: &HashMap<String, String>) -> String {
    if let Some((_, topic)) = route.split_once(TOPIC_SEPARATOR) {
        return topic.to_string();
    }

    options.get(TOPIC_OPTION).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn opts(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    // ── read_brokers ─────────────────────────────────────────────

    #[test]
    fn test_read_route_address() {
        let brokers = read_brokers("broker1:9092,broker2:9092");
        assert_eq!(brokers, vec!["broker1:9092", "broker2:9092"]);
    }

    #[test]
    fn test_read_route_address_with_a_slash_topic() {
        let brokers = read_brokers("broker/hello");
        assert_eq!(brokers, vec!["broker"]);
        assert_eq!(read_topic("broker/hello", &HashMap::new()), "hello");
    }

    #[test]
    fn test_read_brokers_preserves_order_and_tokens() {
        let tokens = ["kafka-3:9094", "10.0.0.1:9092", "kafka-1:9092", "[::1]:9093"];
        let route = tokens.join(",");

        let brokers = read_brokers(&route);
        assert_eq!(brokers.len(), tokens.len());
        assert_eq!(brokers, tokens);
    }

    #[test]
    fn test_read_brokers_multiple_with_topic() {
        let brokers = read_brokers("a:1,b:2/logs");
        assert_eq!(brokers, vec!["a:1", "b:2"]);
    }

    #[test]
    fn test_read_brokers_empty_route_yields_single_empty_token() {
        assert_eq!(read_brokers(""), vec![""]);
    }

    #[test]
    fn test_read_brokers_does_not_validate_tokens() {
        // Missing port and empty host are passed through untouched
        let brokers = read_brokers("broker,:9092,,");
        assert_eq!(brokers, vec!["broker", ":9092", "", ""]);
    }

    #[test]
    fn test_read_brokers_only_first_slash_splits() {
        let brokers = read_brokers("broker:9092/a/b");
        assert_eq!(brokers, vec!["broker:9092"]);
    }

    proptest! {
        #[test]
        fn prop_broker_tokens_round_trip_in_order(
            tokens in prop::collection::vec("[a-z0-9.-]{1,16}:[0-9]{1,5}", 1..8)
        ) {
            let route = tokens.join(",");
            prop_assert_eq!(read_brokers(&route), tokens.clone());

            let with_topic = format!("{}/logs", route);
            prop_assert_eq!(read_brokers(&with_topic), tokens);
            prop_assert_eq!(read_topic(&with_topic, &opts(&[("topic", "other")])), "logs");
        }
    }

    // ── read_topic ───────────────────────────────────────────────

    #[test]
    fn test_read_topic_option() {
        let topic = read_topic("", &opts(&[("topic", "hello")]));
        assert_eq!(topic, "hello");
    }

    #[test]
    fn test_read_route_address_with_a_slash_topic_trumps_a_topic_option() {
        let topic = read_topic("broker/hello", &opts(&[("topic", "trumped")]));
        assert_eq!(topic, "hello");
    }

    #[test]
    fn test_read_topic_missing_everywhere_is_empty() {
        assert_eq!(read_topic("broker:9092", &HashMap::new()), "");
    }

    #[test]
    fn test_read_topic_ignores_other_options() {
        let topic = read_topic("broker:9092", &opts(&[("compression", "gzip")]));
        assert_eq!(topic, "");
    }

    #[test]
    fn test_read_topic_keeps_everything_after_first_slash() {
        assert_eq!(read_topic("broker:9092/a/b", &HashMap::new()), "a/b");
    }

    #[test]
    fn test_read_topic_empty_embedded_topic_still_wins() {
        let topic = read_topic("broker:9092/", &opts(&[("topic", "fallback")]));
        assert_eq!(topic, "");
    }

    // ── ResolvedRoute ────────────────────────────────────────────

    #[test]
    fn test_resolve_combines_brokers_and_topic() {
        let route = ResolvedRoute::resolve("k1:9092,k2:9092", &opts(&[("topic", "containers")]));
        assert_eq!(route.brokers, vec!["k1:9092", "k2:9092"]);
        assert_eq!(route.topic, "containers");
        assert!(route.has_topic());
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let options = opts(&[("topic", "x")]);
        let a = ResolvedRoute::resolve("k1:9092/logs", &options);
        let b = ResolvedRoute::resolve("k1:9092/logs", &options);
        assert_eq!(a, b);
        assert_eq!(a.topic, "logs");
    }

    #[test]
    fn test_resolve_without_topic() {
        let route = ResolvedRoute::resolve("k1:9092", &HashMap::new());
        assert!(!route.has_topic());
    }
}
