//! Error types for the record search repository.

mod naming_error;
mod search_error;

pub use naming_error::NamingError;
pub use search_error::SearchError;
