// src/config.rs
use std::net::IpAddr;
use std::path::PathBuf;
use crate::error::AppError;

pub const DEFAULT_TABLE: &str = "kpi_data";
pub const DEFAULT_SNAPSHOT_PATH: &str = "business_kpi.csv";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub table: String,
    pub snapshot_path: PathBuf,
    pub max_connections: u32,
}

impl Config {
    /// Reads settings from the process environment. Call `dotenvy::dotenv()` first
    /// so a local `.env` file is honoured.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| AppError::validation("DATABASE_URL must be set"))?;

        let host = lookup("HOST")
            .and_then(|h| h.parse::<IpAddr>().ok())
            .unwrap_or(IpAddr::from([127, 0, 0, 1]));
        let port = lookup("PORT").and_then(|p| p.parse::<u16>().ok()).unwrap_or(3000);
        let table = lookup("KPI_TABLE").unwrap_or_else(|| DEFAULT_TABLE.to_string());
        let snapshot_path = lookup("SNAPSHOT_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_PATH));
        let max_connections = lookup("DB_MAX_CONNECTIONS")
            .and_then(|n| n.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(5);

        Ok(Self { database_url, host, port, table, snapshot_path, max_connections })
    }
}
