//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchEngineClient`
//! using the OpenSearch Rust client.

use std::time::Duration;

use async_trait::async_trait;
use opensearch::{
    cluster::ClusterHealthParts,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesExistsParts},
    params::Refresh,
    DeleteParts, IndexParts, OpenSearch, SearchParts,
};
use serde_json::Value;
use tracing::{debug, error, info};
use url::Url;

use crate::config::SearchConfig;
use crate::errors::SearchError;
use crate::interfaces::SearchEngineClient;

/// OpenSearch client implementation.
///
/// Holds a single engine connection safe for concurrent use by multiple
/// simultaneously-processing events and search requests. Every call carries
/// an explicit request timeout from [`SearchConfig`].
///
/// # Example
///
/// ```ignore
/// let config = SearchConfig::with_hosts(vec!["http://localhost:9200".to_string()]);
/// let client = OpenSearchClient::new(&config)?;
///
/// client.upsert("default-articles", "r1", &json!({"id": "r1"})).await?;
/// let hits = client.search("default-articles", &json!({"query": {"match_all": {}}})).await?;
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
    request_timeout: Duration,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client from the given configuration.
    ///
    /// The first configured host backs the connection pool.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        let host = config
            .hosts
            .first()
            .ok_or_else(|| SearchError::connection("no search hosts configured"))?;

        let parsed_url =
            Url::parse(host).map_err(|e| SearchError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            host = %host,
            timeout_ms = config.request_timeout.as_millis() as u64,
            "Created OpenSearch client"
        );

        Ok(Self {
            client,
            request_timeout: config.request_timeout,
        })
    }
}

#[async_trait]
impl SearchEngineClient for OpenSearchClient {
    async fn search(&self, index: &str, query: &Value) -> Result<Value, SearchError> {
        let response = self
            .client
            .search(SearchParts::Index(&[index]))
            .body(query.clone())
            .request_timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(SearchError::query(format!(
                "Search failed with status {}: {}",
                status, error_body
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))
    }

    /// Create or overwrite a document with `refresh=true`, so the change is
    /// visible to the next search before the call returns. This trades write
    /// throughput for read-after-write consistency, acceptable because record
    /// mutation is low-frequency relative to search reads.
    async fn upsert(
        &self,
        index: &str,
        record_id: &str,
        body: &Value,
    ) -> Result<(), SearchError> {
        let response = self
            .client
            .index(IndexParts::IndexId(index, record_id))
            .body(body.clone())
            .refresh(Refresh::True)
            .request_timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| SearchError::upsert(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Upsert request failed");
            return Err(SearchError::upsert(format!(
                "Upsert failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(index = %index, record_id = %record_id, "Document upserted");
        Ok(())
    }

    async fn delete(&self, index: &str, record_id: &str) -> Result<(), SearchError> {
        let response = self
            .client
            .delete(DeleteParts::IndexId(index, record_id))
            .refresh(Refresh::True)
            .request_timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| SearchError::delete(e.to_string()))?;

        let status = response.status_code();

        // 404 is acceptable: the document (or the whole index) may not exist.
        if !status.is_success() && status.as_u16() != 404 {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Delete request failed");
            return Err(SearchError::delete(format!(
                "Delete failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(index = %index, record_id = %record_id, "Document deleted");
        Ok(())
    }

    async fn ensure_index(&self, index: &str) -> Result<(), SearchError> {
        let exists = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .request_timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        if exists.status_code().is_success() {
            return Ok(());
        }

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .request_timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| SearchError::index_creation(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            // A concurrent creator winning the race is fine.
            if error_body.contains("resource_already_exists_exception") {
                return Ok(());
            }
            return Err(SearchError::index_creation(format!(
                "Index creation failed with status {}: {}",
                status, error_body
            )));
        }

        info!(index = %index, "Created search index");
        Ok(())
    }

    async fn health_check(&self) -> Result<bool, SearchError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .request_timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        if !response.status_code().is_success() {
            return Ok(false);
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        let status = body["status"].as_str().unwrap_or("red");
        Ok(status != "red")
    }
}
