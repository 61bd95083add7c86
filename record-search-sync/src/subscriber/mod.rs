//! Change subscriber: reacts to host change notifications.
//!
//! Filters events for the configured resource kind and drives the indexer
//! for each impacted record, containing per-record failures so one bad
//! record never blocks the rest of a batch.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, instrument, warn};

use record_search_shared::{ChangeAction, ChangeEvent, ImpactedRecord, RecordLocator};

use crate::dispatch::ChangeHandler;
use crate::indexer::Indexer;

/// Subscriber mirroring record mutations into the search index.
///
/// Stateless reaction: each event is processed synchronously, impacted
/// records in host-supplied order, with at-least-once best-effort semantics.
/// A transient engine outage degrades the index without blocking the primary
/// mutation that already succeeded.
pub struct RecordChangeSubscriber {
    indexer: Arc<Indexer>,
    resource_kind: String,
}

impl RecordChangeSubscriber {
    /// Create a subscriber reacting to events for `resource_kind`.
    pub fn new(indexer: Arc<Indexer>, resource_kind: impl Into<String>) -> Self {
        Self {
            indexer,
            resource_kind: resource_kind.into(),
        }
    }

    /// Mirror one impacted record, picking the state the action calls for.
    ///
    /// Create/update index the post-change state (`new`); indexing the prior
    /// state would leave the index permanently one version behind.
    async fn apply(&self, locator: &RecordLocator, action: ChangeAction, entry: &ImpactedRecord) {
        let result = match action {
            ChangeAction::Delete => match &entry.old {
                Some(old) => self.indexer.unindex_record(locator, old).await,
                None => {
                    warn!(locator = %locator, "Delete event without prior state, skipping");
                    return;
                }
            },
            ChangeAction::Create | ChangeAction::Update => match &entry.new {
                Some(new) => self.indexer.index_record(locator, new).await,
                None => {
                    warn!(locator = %locator, "Change event without post-change state, skipping");
                    return;
                }
            },
        };

        if let Err(e) = result {
            // Contained per record: the next impacted record still runs.
            error!(
                locator = %locator,
                error = %e,
                "Failed to mirror record change, continuing with batch"
            );
        }
    }
}

#[async_trait]
impl ChangeHandler for RecordChangeSubscriber {
    #[instrument(skip(self, event), fields(locator = %event.locator, impacted = event.impacted.len()))]
    async fn handle(&self, event: &ChangeEvent) {
        if event.resource_kind != self.resource_kind {
            debug!(
                resource_kind = %event.resource_kind,
                "Ignoring event for unrelated resource kind"
            );
            return;
        }

        for entry in &event.impacted {
            self.apply(&event.locator, event.action, entry).await;
        }
    }
}
