// src/handlers/snapshot.rs
use axum::{extract::State, Json};
use tracing::instrument;
use crate::models::snapshot::SnapshotRow;
use crate::state::AppState;

// GET /data - Full snapshot as an array of row objects
#[instrument(skip(state))]
pub async fn get_data(State(state): State<AppState>) -> Json<Vec<SnapshotRow>> {
    Json(state.snapshot.as_ref().clone())
}
