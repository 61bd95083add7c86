//! Search query and result types.

use serde_json::{json, Value};

/// Result of a search call against one index.
///
/// The body is the engine-native response document, passed through verbatim.
/// When the engine was unreachable or rejected the query, the result degrades
/// to an empty body with `degraded` set, so in-process callers can tell "no
/// results" apart from "engine unavailable" even though the outward HTTP
/// response stays a plain 200 in both cases.
#[derive(Debug, Clone)]
pub struct QueryResult {
    /// Engine-native response body.
    pub body: Value,
    /// True when the engine call failed and the result degraded to empty.
    pub degraded: bool,
}

impl QueryResult {
    /// A successful result carrying the engine's response verbatim.
    pub fn new(body: Value) -> Self {
        Self {
            body,
            degraded: false,
        }
    }

    /// The degraded empty result returned when the engine call failed.
    pub fn degraded() -> Self {
        Self {
            body: json!({}),
            degraded: true,
        }
    }
}
