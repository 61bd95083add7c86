//! # Record Search Repository
//!
//! This crate provides traits and implementations for interacting with the
//! search engine. It includes definitions for errors, the client interface,
//! per-locator index naming, and a concrete implementation for OpenSearch.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod naming;
pub mod opensearch;

pub use config::SearchConfig;
pub use errors::{NamingError, SearchError};
pub use interfaces::SearchEngineClient;
pub use naming::index_name;
pub use opensearch::OpenSearchClient;
