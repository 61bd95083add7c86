//! Record locator type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies the logical partition of records within the host storage API.
///
/// Both identifiers are opaque strings assigned by the host. The pair maps
/// deterministically to exactly one search index name; two distinct locators
/// must never share an index, since that would silently merge two namespaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordLocator {
    /// The containing bucket/namespace identifier.
    pub container_id: String,
    /// The collection identifier within the container.
    pub collection_id: String,
}

impl RecordLocator {
    /// Create a new locator from container and collection identifiers.
    pub fn new(container_id: impl Into<String>, collection_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
            collection_id: collection_id.into(),
        }
    }
}

impl fmt::Display for RecordLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.container_id, self.collection_id)
    }
}
