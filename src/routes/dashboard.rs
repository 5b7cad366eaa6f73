use axum::{routing::get, Router};
use crate::handlers::dashboard::{dashboard_options, dashboard_page, kpi_figure};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard_page))
        .route("/dashboard/options", get(dashboard_options))
        .route("/dashboard/figure", get(kpi_figure))
}
