// src/bin/seed.rs
//! Regenerates the synthetic KPI table. Destructive: the existing table is dropped.
//!
//! Usage: kpi-seed [--csv <path>]
use std::path::PathBuf;
use std::process::ExitCode;
use dotenvy::dotenv;
use kpi_dashboard::config::Config;
use kpi_dashboard::error::AppError;
use kpi_dashboard::generator::{seed_store, GeneratorConfig};
use kpi_dashboard::store::PgKpiStore;
use kpi_dashboard::{database, snapshot};

fn csv_arg() -> Result<Option<PathBuf>, AppError> {
    let mut args = std::env::args().skip(1);
    let mut csv = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--csv" => {
                let path = args
                    .next()
                    .ok_or_else(|| AppError::validation("--csv requires a path"))?;
                csv = Some(PathBuf::from(path));
            }
            other => return Err(AppError::validation(format!("Unknown argument: {other}"))),
        }
    }
    Ok(csv)
}

async fn run() -> Result<(), AppError> {
    let csv = csv_arg()?;
    let config = Config::from_env()?;
    let generator = GeneratorConfig::from_env()?;

    let pool = database::create_pool(&config.database_url, 1).await?;
    let store = PgKpiStore::new(pool, config.table.clone())?;
    let rows = seed_store(&store, &generator).await?;
    tracing::info!(table = store.table(), rows = rows.len(), "Successfully inserted KPI data");

    if let Some(path) = csv {
        snapshot::write_snapshot(&path, &rows)?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    kpi_dashboard::init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Seeding failed");
            ExitCode::FAILURE
        }
    }
}
