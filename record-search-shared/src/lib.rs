//! # Record Search Shared
//!
//! Shared types and data structures for the record search indexer system:
//! record locators, schema-less record payloads, change events emitted by the
//! host storage API, and search query/result types.

pub mod event;
pub mod locator;
pub mod query;
pub mod record;

pub use event::{ChangeAction, ChangeEvent, ImpactedRecord};
pub use locator::RecordLocator;
pub use query::QueryResult;
pub use record::{record_key, Record};
