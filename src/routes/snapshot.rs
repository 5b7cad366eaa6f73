use axum::{routing::get, Router};
use crate::handlers::snapshot::get_data;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/data", get(get_data))
}
