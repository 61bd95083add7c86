//! # Record Search API
//!
//! HTTP surface for the record search indexer:
//!
//! - `POST /{container_kind}/{container_id}/{collection_kind}/{collection_id}/search`
//!   runs an engine-native query against the locator's index and returns the
//!   engine-native result verbatim (an empty document when the engine is
//!   unavailable, per the best-effort read policy).
//! - `POST /changes` accepts a host change notification and hands it to the
//!   event dispatcher, fire-and-forget.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{error, info};

use record_search_shared::{ChangeEvent, RecordLocator};
use record_search_sync::{EventDispatcher, Indexer, IndexerError, RESOURCE_CHANGED};

/// Shared state injected into every handler.
///
/// Both fields are constructed once at process start and passed in
/// explicitly; handlers never reach for ambient state.
#[derive(Clone)]
pub struct ApiState {
    /// The synchronization core serving searches.
    pub indexer: Arc<Indexer>,
    /// Dispatch table receiving host change notifications.
    pub dispatcher: Arc<EventDispatcher>,
}

/// Build the API router with the given state.
pub fn router(state: ApiState) -> Router {
    Router::new()
        .route(
            "/:container_kind/:container_id/:collection_kind/:collection_id/search",
            post(search_records),
        )
        .route("/changes", post(notify_change))
        .with_state(state)
}

/// Bind and serve the API until the shutdown future resolves.
pub async fn serve(
    addr: SocketAddr,
    state: ApiState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "Search endpoint listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Search handler: delegate the query body to the indexer.
///
/// The kind segments route the request but carry no meaning here; the
/// locator is the `(container_id, collection_id)` pair.
async fn search_records(
    State(state): State<ApiState>,
    Path((_container_kind, container_id, _collection_kind, collection_id)): Path<(
        String,
        String,
        String,
        String,
    )>,
    Json(query): Json<Value>,
) -> Response {
    let locator = RecordLocator::new(container_id, collection_id);

    match state.indexer.search(&locator, &query).await {
        Ok(result) => (StatusCode::OK, Json(result.body)).into_response(),
        Err(IndexerError::InvalidLocator(e)) => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": e.to_string()})),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Unexpected search failure");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Change notification inlet for hosts running out of process.
///
/// Always answers 202: the primary mutation has already committed, so
/// indexing failures are contained downstream and never reported back.
async fn notify_change(State(state): State<ApiState>, Json(event): Json<ChangeEvent>) -> StatusCode {
    state.dispatcher.dispatch(RESOURCE_CHANGED, &event).await;
    StatusCode::ACCEPTED
}
