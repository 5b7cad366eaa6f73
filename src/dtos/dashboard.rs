// src/dtos/dashboard.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::models::kpi::Kpi;

#[derive(Debug, Deserialize)]
pub struct FigureQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub kpis: Option<String>, // comma-separated, e.g. "revenue,profit"
}

#[derive(Debug, Serialize)]
pub struct KpiOption {
    pub label: &'static str,
    pub value: &'static str,
}

impl From<Kpi> for KpiOption {
    fn from(kpi: Kpi) -> Self {
        Self { label: kpi.label(), value: kpi.column() }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardOptionsResponse {
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub kpis: Vec<KpiOption>,
    pub default_kpis: Vec<&'static str>,
}
