// src/handlers/dashboard.rs
use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use chrono::NaiveDate;
use tracing::{debug, instrument};
use crate::chart::Figure;
use crate::dtos::dashboard::{DashboardOptionsResponse, FigureQuery, KpiOption};
use crate::error::AppError;
use crate::filter::{date_bounds, filter_kpis, DateWindow, KpiSelection};
use crate::handlers::page::DASHBOARD_HTML;
use crate::models::kpi::Kpi;
use crate::state::AppState;

// Date pickers may send "2023-01-01T00:00:00"; only the day matters.
fn parse_query_date(field: &str, raw: &str) -> Result<NaiveDate, AppError> {
    let day = raw.trim().split(['T', ' ']).next().unwrap_or_default();
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid {field}: '{raw}' (expected YYYY-MM-DD)")))
}

// GET /dashboard - Interactive page
pub async fn dashboard_page() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

// GET /dashboard/options - Picker bounds and KPI choices
#[instrument(skip(state))]
pub async fn dashboard_options(
    State(state): State<AppState>,
) -> Result<Json<DashboardOptionsResponse>, AppError> {
    let rows = state.store.fetch_all().await?;
    let bounds = date_bounds(&rows);

    Ok(Json(DashboardOptionsResponse {
        min_date: bounds.map(|b| b.start),
        max_date: bounds.map(|b| b.end),
        kpis: Kpi::ALL.into_iter().map(KpiOption::from).collect(),
        default_kpis: Kpi::DEFAULT_SELECTION.iter().map(|k| k.column()).collect(),
    }))
}

// GET /dashboard/figure - Fetch, filter and render one chart
#[instrument(skip(state))]
pub async fn kpi_figure(
    State(state): State<AppState>,
    Query(params): Query<FigureQuery>,
) -> Result<Json<Figure>, AppError> {
    // A cleared picker sends an empty value; treat it like an absent one.
    let present = |v: &Option<String>| v.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);
    let start = present(&params.start_date).map(|s| parse_query_date("start_date", &s)).transpose()?;
    let end = present(&params.end_date).map(|s| parse_query_date("end_date", &s)).transpose()?;
    let selection = params
        .kpis
        .as_deref()
        .map(KpiSelection::parse_list)
        .unwrap_or_default();

    let rows = state.store.fetch_all().await?;

    // Open ends default to the table's own bounds; an empty table matches nothing either way.
    let window = match date_bounds(&rows) {
        Some(bounds) => DateWindow::new(start.unwrap_or(bounds.start), end.unwrap_or(bounds.end)),
        None => DateWindow::new(
            start.unwrap_or(NaiveDate::MIN),
            end.unwrap_or(NaiveDate::MAX),
        ),
    };

    let outcome = filter_kpis(&rows, window, &selection);
    let figure = Figure::from_outcome(&outcome);
    debug!(traces = figure.data.len(), title = figure.title(), "Rendered figure");

    Ok(Json(figure))
}
