//! Index naming error types.

use thiserror::Error;

/// Errors that can occur when deriving an index name from a locator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NamingError {
    /// The locator has an empty or unusable container/collection identifier.
    #[error("Invalid locator: {0}")]
    InvalidLocator(String),
}

impl NamingError {
    /// Create an invalid locator error.
    pub fn invalid_locator(msg: impl Into<String>) -> Self {
        Self::InvalidLocator(msg.into())
    }
}
