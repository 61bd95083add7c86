//! Abstract interfaces for search engine access.

mod search_engine_client;

pub use search_engine_client::SearchEngineClient;
