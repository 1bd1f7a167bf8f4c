use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::RwLock;
use serde::Serialize;
use tidepool_crdt::LwwSet;
use tidepool_sync::{Coordinator, HttpTransport, StaticPeerDirectory};
use tower_http::trace::TraceLayer;

/// The coordinator wiring used by the node binary.
pub type NodeCoordinator = Coordinator<StaticPeerDirectory, HttpTransport>;

#[derive(Clone)]
/// The state shared by every handler.
///
/// The set is the node's single authoritative copy, guarded by a lock that
/// is only ever held for short, await-free critical sections. Handlers that
/// read-modify-write go through the write half so concurrent requests
/// cannot lose updates.
pub struct AppState {
    set: Arc<RwLock<LwwSet>>,
    coordinator: Arc<NodeCoordinator>,
}

impl AppState {
    pub fn new(coordinator: NodeCoordinator) -> Self {
        Self {
            set: Arc::new(RwLock::new(LwwSet::default())),
            coordinator: Arc::new(coordinator),
        }
    }
}

/// Builds the node's HTTP surface.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/set/list", get(list))
        .route("/set/values", get(values))
        .route("/set/lookup/:value", get(lookup))
        .route("/set/add/:value", post(add))
        .route("/set/remove/:value", post(remove))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> &'static str {
    "Tidepool set node\n"
}

/// Runs one anti-entropy round and folds the result back into the shared
/// set.
///
/// Degrades to serving local state whenever there is nothing to sync with:
/// peer failures are already skipped inside the round, and the write-back
/// merges into the *current* set under the write lock, so a local mutation
/// racing the round is never lost.
async fn sync_shared(state: &AppState) {
    if !state.coordinator.has_peers() {
        return;
    }

    let local = state.set.read().clone();
    match state.coordinator.sync(local).await {
        Ok(outcome) => state.set.write().merge(outcome.set),
        Err(error) => debug!(error = %error, "sync round skipped"),
    }
}

/// `GET /set/list` - sync with peers, then list the current members.
async fn list(State(state): State<AppState>) -> Json<Vec<String>> {
    sync_shared(&state).await;

    let values = state.set.write().list();
    debug!(values = ?values, "listed set");

    Json(values)
}

/// `GET /set/values` - the local snapshot, without syncing first.
///
/// This is exactly the payload peers fetch from each other during a sync
/// round.
async fn values(State(state): State<AppState>) -> Json<LwwSet> {
    let snapshot = state.set.read().clone();
    Json(snapshot)
}

#[derive(Debug, Serialize)]
struct IsPresent {
    present: bool,
}

/// `GET /set/lookup/:value` - sync with peers, then check membership.
async fn lookup(
    Path(value): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<IsPresent>, StatusCode> {
    sync_shared(&state).await;

    let present = state.set.write().lookup(&value).map_err(|error| {
        error!(error = %error, "failed to look up value");
        StatusCode::BAD_REQUEST
    })?;

    debug!(value = %value, present = present, "looked up value");

    Ok(Json(IsPresent { present }))
}

/// `POST /set/add/:value` - record a local addition.
async fn add(
    Path(value): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, StatusCode> {
    state.set.write().add(&value).map_err(|error| {
        error!(error = %error, "failed to add value");
        StatusCode::BAD_REQUEST
    })?;

    debug!(value = %value, "added value");

    Ok(StatusCode::OK)
}

/// `POST /set/remove/:value` - record a local removal.
async fn remove(
    Path(value): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, StatusCode> {
    state.set.write().remove(&value).map_err(|error| {
        error!(error = %error, "failed to remove value");
        StatusCode::BAD_REQUEST
    })?;

    debug!(value = %value, "removed value");

    Ok(StatusCode::OK)
}
