//! Indexer module: record-level operations against the search index.
//!
//! The indexer orchestrates index naming and the search engine client to
//! provide `search`, `index_record` and `unindex_record`, plus the
//! `reindex_all` operational backfill.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use record_search_repository::{index_name, SearchEngineClient};
use record_search_shared::{record_key, QueryResult, Record, RecordLocator};

use crate::errors::IndexerError;

/// One record that could not be reindexed during a backfill.
#[derive(Debug, Clone)]
pub struct ReindexFailure {
    /// The record key, or a positional placeholder when the key itself was
    /// the problem.
    pub key: String,
    /// Description of what went wrong.
    pub error: String,
}

/// Outcome of a [`Indexer::reindex_all`] backfill.
#[derive(Debug, Clone)]
pub struct ReindexSummary {
    /// Number of records submitted.
    pub total: usize,
    /// Number of records successfully upserted.
    pub succeeded: usize,
    /// Number of records that failed.
    pub failed: usize,
    /// Details for each failed record.
    pub failures: Vec<ReindexFailure>,
}

/// Synchronization core between the primary record store and the search
/// engine.
///
/// Holds the shared engine client and the name of the identifying field that
/// every record is expected to carry. Constructed once at process start and
/// passed explicitly to the subscriber and the HTTP endpoint; there is no
/// ambient registry.
pub struct Indexer {
    client: Arc<dyn SearchEngineClient>,
    id_field: String,
}

impl Indexer {
    /// Create a new indexer using `id_field` as the record key field.
    pub fn new(client: Arc<dyn SearchEngineClient>, id_field: impl Into<String>) -> Self {
        Self {
            client,
            id_field: id_field.into(),
        }
    }

    /// The configured identifying field name.
    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    /// Run an engine-native query against the locator's index.
    ///
    /// Search is best-effort and must never break the read path: engine
    /// failures (timeout, malformed query, missing index) degrade to an
    /// empty result instead of an error. The degraded case is marked on the
    /// returned [`QueryResult`] so in-process callers can still tell it apart
    /// from a genuine empty result.
    ///
    /// The only error is an invalid locator, which the HTTP layer surfaces
    /// as a client error.
    #[instrument(skip(self, query), fields(locator = %locator))]
    pub async fn search(
        &self,
        locator: &RecordLocator,
        query: &Value,
    ) -> Result<QueryResult, IndexerError> {
        let index = index_name(locator)?;

        match self.client.search(&index, query).await {
            Ok(body) => Ok(QueryResult::new(body)),
            Err(e) => {
                warn!(
                    index = %index,
                    error = %e,
                    "Search engine unavailable, degrading to empty result"
                );
                Ok(QueryResult::degraded())
            }
        }
    }

    /// Mirror a record into the locator's index.
    ///
    /// Idempotent: repeated calls with the same record key overwrite rather
    /// than duplicate. Does not retry; failures are returned to the caller.
    #[instrument(skip(self, record), fields(locator = %locator))]
    pub async fn index_record(
        &self,
        locator: &RecordLocator,
        record: &Record,
    ) -> Result<(), IndexerError> {
        let key = self.key_of(record)?;
        let index = index_name(locator)?;

        self.client
            .upsert(&index, &key, &Value::Object(record.clone()))
            .await?;

        debug!(index = %index, key = %key, "Record indexed");
        Ok(())
    }

    /// Remove a record's mirror from the locator's index.
    ///
    /// Idempotent: deleting an already-absent key succeeds silently (the
    /// engine's delete-of-missing response is normalized by the client).
    #[instrument(skip(self, record), fields(locator = %locator))]
    pub async fn unindex_record(
        &self,
        locator: &RecordLocator,
        record: &Record,
    ) -> Result<(), IndexerError> {
        let key = self.key_of(record)?;
        let index = index_name(locator)?;

        self.client.delete(&index, &key).await?;

        debug!(index = %index, key = %key, "Record unindexed");
        Ok(())
    }

    /// Rebuild the locator's index from a full record set.
    ///
    /// Operational companion for divergence after repeated write failures:
    /// ensures the index exists, then upserts every record, continuing past
    /// per-record failures and reporting them in the summary.
    #[instrument(skip(self, records), fields(locator = %locator, record_count = records.len()))]
    pub async fn reindex_all(
        &self,
        locator: &RecordLocator,
        records: &[Record],
    ) -> Result<ReindexSummary, IndexerError> {
        let index = index_name(locator)?;
        self.client.ensure_index(&index).await?;

        let mut succeeded = 0;
        let mut failures = Vec::new();

        for (position, record) in records.iter().enumerate() {
            let key = match self.key_of(record) {
                Ok(key) => key,
                Err(e) => {
                    failures.push(ReindexFailure {
                        key: format!("#{}", position),
                        error: e.to_string(),
                    });
                    continue;
                }
            };

            match self
                .client
                .upsert(&index, &key, &Value::Object(record.clone()))
                .await
            {
                Ok(()) => succeeded += 1,
                Err(e) => failures.push(ReindexFailure {
                    key,
                    error: e.to_string(),
                }),
            }
        }

        let summary = ReindexSummary {
            total: records.len(),
            succeeded,
            failed: failures.len(),
            failures,
        };

        info!(
            index = %index,
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Reindex completed"
        );

        Ok(summary)
    }

    /// Extract the record key, validating the identifying field at this
    /// boundary rather than assuming it.
    fn key_of(&self, record: &Record) -> Result<String, IndexerError> {
        record_key(record, &self.id_field)
            .ok_or_else(|| IndexerError::missing_id_field(&self.id_field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use record_search_repository::SearchError;
    use serde_json::json;
    use std::collections::{BTreeMap, HashMap};
    use std::sync::Mutex;

    /// In-memory engine mock: stores documents per index and answers
    /// single-clause `match` / `match_all` queries.
    struct InMemoryEngine {
        indexes: Mutex<HashMap<String, BTreeMap<String, Value>>>,
        fail_key: Option<String>,
        fail_searches: bool,
    }

    impl InMemoryEngine {
        fn new() -> Self {
            Self {
                indexes: Mutex::new(HashMap::new()),
                fail_key: None,
                fail_searches: false,
            }
        }

        fn failing_writes_for(key: &str) -> Self {
            Self {
                fail_key: Some(key.to_string()),
                ..Self::new()
            }
        }

        fn unreachable() -> Self {
            Self {
                fail_searches: true,
                ..Self::new()
            }
        }

        fn doc_count(&self, index: &str) -> usize {
            self.indexes
                .lock()
                .unwrap()
                .get(index)
                .map(|docs| docs.len())
                .unwrap_or(0)
        }
    }

    #[async_trait]
    impl SearchEngineClient for InMemoryEngine {
        async fn search(&self, index: &str, query: &Value) -> Result<Value, SearchError> {
            if self.fail_searches {
                return Err(SearchError::connection("connection refused"));
            }

            let indexes = self.indexes.lock().unwrap();
            let docs = indexes.get(index).cloned().unwrap_or_default();

            let matches: Vec<(String, Value)> = if let Some(clause) =
                query["query"]["match"].as_object()
            {
                let (field, expected) = clause.iter().next().unwrap();
                docs.into_iter()
                    .filter(|(_, doc)| doc[field] == *expected)
                    .collect()
            } else {
                docs.into_iter().collect()
            };

            let hits: Vec<Value> = matches
                .into_iter()
                .map(|(id, doc)| json!({"_id": id, "_source": doc}))
                .collect();

            Ok(json!({"hits": {"total": {"value": hits.len()}, "hits": hits}}))
        }

        async fn upsert(
            &self,
            index: &str,
            record_id: &str,
            body: &Value,
        ) -> Result<(), SearchError> {
            if self.fail_key.as_deref() == Some(record_id) {
                return Err(SearchError::upsert("simulated engine rejection"));
            }
            self.indexes
                .lock()
                .unwrap()
                .entry(index.to_string())
                .or_default()
                .insert(record_id.to_string(), body.clone());
            Ok(())
        }

        async fn delete(&self, index: &str, record_id: &str) -> Result<(), SearchError> {
            // Missing document or index is a success, matching the real client.
            if let Some(docs) = self.indexes.lock().unwrap().get_mut(index) {
                docs.remove(record_id);
            }
            Ok(())
        }

        async fn ensure_index(&self, index: &str) -> Result<(), SearchError> {
            self.indexes
                .lock()
                .unwrap()
                .entry(index.to_string())
                .or_default();
            Ok(())
        }

        async fn health_check(&self) -> Result<bool, SearchError> {
            Ok(!self.fail_searches)
        }
    }

    fn record(value: Value) -> Record {
        value.as_object().unwrap().clone()
    }

    fn indexer(engine: Arc<InMemoryEngine>) -> Indexer {
        Indexer::new(engine, "id")
    }

    #[tokio::test]
    async fn test_index_then_search_finds_record() {
        let engine = Arc::new(InMemoryEngine::new());
        let indexer = indexer(engine.clone());
        let locator = RecordLocator::new("default", "articles");

        indexer
            .index_record(&locator, &record(json!({"id": "r1", "note": "kinto"})))
            .await
            .unwrap();

        assert_eq!(engine.doc_count("default-articles"), 1);

        let result = indexer
            .search(&locator, &json!({"query": {"match": {"note": "kinto"}}}))
            .await
            .unwrap();

        assert!(!result.degraded);
        assert_eq!(result.body["hits"]["total"]["value"], 1);
        assert_eq!(result.body["hits"]["hits"][0]["_id"], "r1");
    }

    #[tokio::test]
    async fn test_reindex_overwrites_not_duplicates() {
        let engine = Arc::new(InMemoryEngine::new());
        let indexer = indexer(engine.clone());
        let locator = RecordLocator::new("default", "articles");

        indexer
            .index_record(&locator, &record(json!({"id": "r1", "note": "v1"})))
            .await
            .unwrap();
        indexer
            .index_record(&locator, &record(json!({"id": "r1", "note": "v2"})))
            .await
            .unwrap();

        assert_eq!(engine.doc_count("default-articles"), 1);

        let result = indexer
            .search(&locator, &json!({"query": {"match": {"note": "v2"}}}))
            .await
            .unwrap();
        assert_eq!(result.body["hits"]["total"]["value"], 1);
    }

    #[tokio::test]
    async fn test_unindex_removes_record() {
        let engine = Arc::new(InMemoryEngine::new());
        let indexer = indexer(engine.clone());
        let locator = RecordLocator::new("default", "articles");
        let rec = record(json!({"id": "r1", "note": "kinto"}));

        indexer.index_record(&locator, &rec).await.unwrap();
        indexer.unindex_record(&locator, &rec).await.unwrap();

        let result = indexer
            .search(&locator, &json!({"query": {"match": {"note": "kinto"}}}))
            .await
            .unwrap();
        assert_eq!(result.body["hits"]["total"]["value"], 0);
    }

    #[tokio::test]
    async fn test_unindex_twice_is_idempotent() {
        let engine = Arc::new(InMemoryEngine::new());
        let indexer = indexer(engine);
        let locator = RecordLocator::new("default", "articles");
        let rec = record(json!({"id": "r1"}));

        indexer.unindex_record(&locator, &rec).await.unwrap();
        indexer.unindex_record(&locator, &rec).await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_id_field() {
        let engine = Arc::new(InMemoryEngine::new());
        let indexer = indexer(engine);
        let locator = RecordLocator::new("default", "articles");

        let result = indexer
            .index_record(&locator, &record(json!({"note": "no id here"})))
            .await;

        assert!(matches!(
            result,
            Err(IndexerError::MissingIdField { ref field }) if field == "id"
        ));
    }

    #[tokio::test]
    async fn test_invalid_locator() {
        let engine = Arc::new(InMemoryEngine::new());
        let indexer = indexer(engine);
        let locator = RecordLocator::new("", "articles");

        let result = indexer.search(&locator, &json!({})).await;
        assert!(matches!(result, Err(IndexerError::InvalidLocator(_))));
    }

    #[tokio::test]
    async fn test_search_degrades_on_engine_failure() {
        let engine = Arc::new(InMemoryEngine::unreachable());
        let indexer = indexer(engine);
        let locator = RecordLocator::new("default", "articles");

        let result = indexer
            .search(&locator, &json!({"query": {"match_all": {}}}))
            .await
            .unwrap();

        assert!(result.degraded);
        assert_eq!(result.body, json!({}));
    }

    #[tokio::test]
    async fn test_write_errors_propagate() {
        let engine = Arc::new(InMemoryEngine::failing_writes_for("r1"));
        let indexer = indexer(engine);
        let locator = RecordLocator::new("default", "articles");

        let result = indexer
            .index_record(&locator, &record(json!({"id": "r1"})))
            .await;

        assert!(matches!(result, Err(IndexerError::IndexWrite(_))));
    }

    #[tokio::test]
    async fn test_reindex_all_continues_past_failures() {
        let engine = Arc::new(InMemoryEngine::failing_writes_for("r2"));
        let indexer = indexer(engine.clone());
        let locator = RecordLocator::new("default", "articles");

        let records = vec![
            record(json!({"id": "r1"})),
            record(json!({"id": "r2"})),
            record(json!({"note": "keyless"})),
            record(json!({"id": "r3"})),
        ];

        let summary = indexer.reindex_all(&locator, &records).await.unwrap();

        assert_eq!(summary.total, 4);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 2);
        assert_eq!(engine.doc_count("default-articles"), 2);

        let keys: Vec<&str> = summary.failures.iter().map(|f| f.key.as_str()).collect();
        assert!(keys.contains(&"r2"));
        assert!(keys.contains(&"#2"));
    }
}
