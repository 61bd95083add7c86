//! Search engine client trait definition.
//!
//! This module defines the abstract interface for search engine operations,
//! allowing for different backend implementations (OpenSearch, mock, etc.).

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::SearchError;

/// Abstract interface for search engine operations, each scoped to one index.
///
/// The client owns the connection to the engine and must be `Send + Sync`:
/// it is the only shared resource between concurrently-processing change
/// events and search requests.
///
/// Errors are reported truthfully by every method; the best-effort degrade
/// policy for the read path lives in the layer above, not here.
#[async_trait]
pub trait SearchEngineClient: Send + Sync {
    /// Execute an engine-native query document against the index.
    ///
    /// Returns the engine-native response document verbatim.
    async fn search(&self, index: &str, query: &Value) -> Result<Value, SearchError>;

    /// Create or overwrite the document stored under `record_id`.
    ///
    /// Uses the engine's immediate-visibility write mode, so a subsequent
    /// `search` observes the mutation. Repeated calls with the same id
    /// overwrite rather than duplicate.
    async fn upsert(&self, index: &str, record_id: &str, body: &Value)
        -> Result<(), SearchError>;

    /// Delete the document stored under `record_id`.
    ///
    /// Uses the engine's immediate-visibility write mode. Deleting a missing
    /// document (or from a missing index) is a success, not an error.
    async fn delete(&self, index: &str, record_id: &str) -> Result<(), SearchError>;

    /// Ensure the index exists, creating it with default settings if absent.
    async fn ensure_index(&self, index: &str) -> Result<(), SearchError>;

    /// Check if the search engine is healthy and reachable.
    async fn health_check(&self) -> Result<bool, SearchError>;
}
