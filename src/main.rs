// src/main.rs
use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use kpi_dashboard::config::Config;
use kpi_dashboard::error::AppError;
use kpi_dashboard::state::AppState;
use kpi_dashboard::store::PgKpiStore;
use kpi_dashboard::{database, routes, snapshot};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables first so RUST_LOG from .env applies
    dotenv().ok();
    kpi_dashboard::init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), AppError> {
    let config = Config::from_env()?;

    // Create database pool
    let db_pool = database::create_pool(&config.database_url, config.max_connections).await?;
    let store = PgKpiStore::new(db_pool, config.table.clone())?;

    // Snapshot backs /data; a missing or malformed file stops startup
    let snapshot_rows = snapshot::load_snapshot(&config.snapshot_path)?;

    let app_state = AppState::new(Arc::new(store), snapshot_rows);
    let app = routes::build_app(app_state);

    // Try port..port+20 to avoid crash when address is in use
    let listener = {
        let mut bound = None;
        for offset in 0u16..=20 {
            let port = config.port.saturating_add(offset);
            let addr = SocketAddr::from((config.host, port));
            match TcpListener::bind(addr).await {
                Ok(l) => { bound = Some((l, addr)); break; }
                Err(e) => {
                    if offset == 0 { tracing::warn!(%addr, error=%e, "Port in use, trying next"); }
                }
            }
        }
        match bound {
            Some((l, addr)) => {
                tracing::info!("Server running on {}", addr);
                l
            }
            None => {
                return Err(AppError::internal(format!(
                    "Failed to bind to any port starting at {} on {}",
                    config.port, config.host
                )));
            }
        }
    };

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))
}
