// src/bin/plot.rs
//! Plots revenue against expenses straight from a CSV snapshot, without touching the database.
//! The chart page is written to stdout.
//!
//! Usage: kpi-plot [snapshot.csv] > plot.html
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use dotenvy::dotenv;
use kpi_dashboard::chart::{render_page, Figure};
use kpi_dashboard::config::DEFAULT_SNAPSHOT_PATH;
use kpi_dashboard::error::AppError;
use kpi_dashboard::snapshot::load_snapshot;

fn run() -> Result<(), AppError> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("SNAPSHOT_PATH").ok())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_PATH));

    let rows = load_snapshot(&path)?;
    let figure = Figure::revenue_vs_expenses(&rows);
    let page = render_page(&figure)
        .map_err(|e| AppError::internal(format!("Failed to encode figure: {e}")))?;

    let write_err = |e: std::io::Error| AppError::internal(format!("Failed to write chart: {e}"));
    let mut out = std::io::stdout().lock();
    out.write_all(page.as_bytes()).map_err(write_err)?;
    out.flush().map_err(write_err)
}

fn main() -> ExitCode {
    dotenv().ok();
    kpi_dashboard::init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Plot failed");
            ExitCode::FAILURE
        }
    }
}
