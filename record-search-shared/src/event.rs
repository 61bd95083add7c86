//! Change event types.
//!
//! Defines the notification structures the host storage API emits after every
//! successful mutation of the primary record store.

use serde::{Deserialize, Serialize};

use crate::locator::RecordLocator;
use crate::record::Record;

/// The kind of mutation the host applied to the primary store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeAction {
    /// A record was created.
    Create,
    /// An existing record was overwritten.
    Update,
    /// A record was removed.
    Delete,
}

/// One record affected by a change event, carrying its prior and/or new state.
///
/// `old` is absent on create; `new` is absent on delete. The post-change
/// state (`new`) is the one to mirror into the index for create/update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactedRecord {
    /// The record's state before the mutation, if it existed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old: Option<Record>,
    /// The record's state after the mutation, if it still exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new: Option<Record>,
}

impl ImpactedRecord {
    /// An impacted record for a create: only the post-change state exists.
    pub fn created(new: Record) -> Self {
        Self {
            old: None,
            new: Some(new),
        }
    }

    /// An impacted record for an update, carrying both states.
    pub fn updated(old: Record, new: Record) -> Self {
        Self {
            old: Some(old),
            new: Some(new),
        }
    }

    /// An impacted record for a delete: only the prior state exists.
    pub fn deleted(old: Record) -> Self {
        Self {
            old: Some(old),
            new: None,
        }
    }
}

/// A change notification emitted by the host after a successful mutation.
///
/// Transient and fire-and-forget: the host expects no acknowledgment, and the
/// event is discarded after subscriber dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// The kind of resource that changed (e.g. `"record"`).
    pub resource_kind: String,
    /// The partition the impacted records live in.
    pub locator: RecordLocator,
    /// The mutation the host applied.
    pub action: ChangeAction,
    /// The records affected by the mutation, in host-supplied order.
    pub impacted: Vec<ImpactedRecord>,
}
