//! Dependency initialization and wiring for the record search indexer.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::IndexingError;
use record_search_api::ApiState;
use record_search_repository::{OpenSearchClient, SearchConfig, SearchEngineClient};
use record_search_sync::{
    EventDispatcher, Indexer, RecordChangeSubscriber, RESOURCE_CHANGED,
};

/// Default search engine host.
const DEFAULT_SEARCH_HOSTS: &str = "http://localhost:9200";

/// Default per-request engine timeout in milliseconds.
const DEFAULT_SEARCH_TIMEOUT_MS: u64 = 10_000;

/// Default identifying field on records.
const DEFAULT_RECORD_ID_FIELD: &str = "id";

/// Default resource kind the subscriber reacts to.
const DEFAULT_RESOURCE_KIND: &str = "record";

/// Default HTTP listen address.
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8514";

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// State for the HTTP surface (indexer + dispatcher).
    pub api_state: ApiState,
    /// Address the search endpoint listens on.
    pub bind_addr: SocketAddr,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// Configuration is read once here and never reloaded.
    ///
    /// # Environment Variables
    ///
    /// - `SEARCH_HOSTS`: comma-separated engine URLs (default: http://localhost:9200)
    /// - `SEARCH_TIMEOUT_MS`: per-request engine timeout (default: 10000)
    /// - `RECORD_ID_FIELD`: identifying field on records (default: id)
    /// - `RESOURCE_KIND`: resource kind to subscribe to (default: record)
    /// - `BIND_ADDR`: HTTP listen address (default: 0.0.0.0:8514)
    pub async fn new() -> Result<Self, IndexingError> {
        let hosts: Vec<String> = env::var("SEARCH_HOSTS")
            .unwrap_or_else(|_| DEFAULT_SEARCH_HOSTS.to_string())
            .split(',')
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .collect();

        let timeout_ms = match env::var("SEARCH_TIMEOUT_MS") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                IndexingError::config(format!("Invalid SEARCH_TIMEOUT_MS: {}", raw))
            })?,
            Err(_) => DEFAULT_SEARCH_TIMEOUT_MS,
        };

        let id_field =
            env::var("RECORD_ID_FIELD").unwrap_or_else(|_| DEFAULT_RECORD_ID_FIELD.to_string());
        let resource_kind =
            env::var("RESOURCE_KIND").unwrap_or_else(|_| DEFAULT_RESOURCE_KIND.to_string());

        let bind_addr: SocketAddr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .map_err(|e| IndexingError::config(format!("Invalid BIND_ADDR: {}", e)))?;

        info!(
            hosts = ?hosts,
            timeout_ms = timeout_ms,
            id_field = %id_field,
            resource_kind = %resource_kind,
            bind_addr = %bind_addr,
            "Initializing dependencies"
        );

        let search_config = SearchConfig::with_hosts(hosts)
            .with_request_timeout(Duration::from_millis(timeout_ms));

        let client = OpenSearchClient::new(&search_config)?;

        // Verify the engine is reachable before serving anything.
        let healthy = client.health_check().await?;

        if !healthy {
            return Err(IndexingError::config("Search engine cluster is unhealthy"));
        }

        info!("Search engine connection verified");

        // Explicit wiring: the indexer is built once and handed to both the
        // subscriber and the HTTP state, with no ambient registry.
        let indexer = Arc::new(Indexer::new(Arc::new(client), id_field));

        let subscriber = RecordChangeSubscriber::new(indexer.clone(), resource_kind);

        let mut dispatcher = EventDispatcher::new();
        dispatcher.register(RESOURCE_CHANGED, Arc::new(subscriber));

        Ok(Self {
            api_state: ApiState {
                indexer,
                dispatcher: Arc::new(dispatcher),
            },
            bind_addr,
        })
    }
}
