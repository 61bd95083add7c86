//! Error types for the synchronization core.

use record_search_repository::{NamingError, SearchError};
use thiserror::Error;

/// Errors that can occur while mirroring records into the search index.
///
/// All variants are scoped to a single request or a single impacted record;
/// none are fatal to the process, and none ever propagate back to the
/// primary-store mutation that triggered them.
#[derive(Error, Debug)]
pub enum IndexerError {
    /// The locator cannot be mapped to an index name.
    #[error(transparent)]
    InvalidLocator(#[from] NamingError),

    /// The record lacks the configured identifying field.
    #[error("Record is missing identifying field {field:?}")]
    MissingIdField { field: String },

    /// The engine rejected or failed an upsert/delete.
    #[error("Index write error: {0}")]
    IndexWrite(#[from] SearchError),
}

impl IndexerError {
    /// Create a missing-id-field error for the given field name.
    pub fn missing_id_field(field: impl Into<String>) -> Self {
        Self::MissingIdField {
            field: field.into(),
        }
    }
}
