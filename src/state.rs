// src/state.rs
use std::sync::Arc;
use crate::models::snapshot::SnapshotRow;
use crate::store::KpiStore;

/// Shared by every request. The store is re-read per request; the snapshot is loaded once at startup.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn KpiStore>,
    pub snapshot: Arc<Vec<SnapshotRow>>,
}

impl AppState {
    pub fn new(store: Arc<dyn KpiStore>, snapshot: Vec<SnapshotRow>) -> Self {
        Self { store, snapshot: Arc::new(snapshot) }
    }
}
