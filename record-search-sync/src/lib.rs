//! # Record Search Sync
//!
//! This crate provides the synchronization core that keeps the search index
//! consistent with the primary record store.
//!
//! ## Architecture
//!
//! The core follows a Subscriber-Indexer-Client layering:
//!
//! 1. **Dispatch**: Routes host change notifications to registered handlers
//! 2. **Subscriber**: Filters events and drives the indexer per record
//! 3. **Indexer**: Maps locators to index names and mirrors records into the
//!    search engine
//!
//! The search engine is reached through the `SearchEngineClient` trait from
//! `record-search-repository`; the primary store is never touched.

pub mod dispatch;
pub mod errors;
pub mod indexer;
pub mod subscriber;

pub use dispatch::{ChangeHandler, EventDispatcher, RESOURCE_CHANGED};
pub use errors::IndexerError;
pub use indexer::{Indexer, ReindexFailure, ReindexSummary};
pub use subscriber::RecordChangeSubscriber;
