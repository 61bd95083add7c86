//! Configuration types for the search engine client.

use std::time::Duration;

/// Default per-request timeout for engine calls.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for connecting to the search engine.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Engine host addresses. The first entry is used for the connection
    /// pool; the list is read once at startup and never reloaded.
    pub hosts: Vec<String>,
    /// Explicit timeout applied to every engine call, so a slow or
    /// unavailable engine cannot stall event processing indefinitely.
    pub request_timeout: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            hosts: vec!["http://localhost:9200".to_string()],
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl SearchConfig {
    /// Create a config for the given hosts, keeping the default timeout.
    pub fn with_hosts(hosts: Vec<String>) -> Self {
        Self {
            hosts,
            ..Self::default()
        }
    }

    /// Set the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
