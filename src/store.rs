// src/store.rs
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tokio::sync::RwLock;
use tracing::{error, info, instrument};
use crate::error::AppError;
use crate::models::kpi::KpiRecord;

// Five binds per row keeps each statement well under Postgres' 65535 parameter cap.
const INSERT_CHUNK: usize = 1000;

/// Whole-table access to the KPI rows. Every call goes to the backing store, nothing is cached.
#[async_trait]
pub trait KpiStore: Send + Sync {
    /// All rows, ascending by date.
    async fn fetch_all(&self) -> Result<Vec<KpiRecord>, AppError>;

    /// Drops whatever the store held and writes `records` in its place.
    async fn replace_all(&self, records: &[KpiRecord]) -> Result<(), AppError>;
}

pub struct PgKpiStore {
    pool: PgPool,
    table: String,
}

impl PgKpiStore {
    pub fn new(pool: PgPool, table: impl Into<String>) -> Result<Self, AppError> {
        let table = table.into();
        if !is_identifier(&table) {
            return Err(AppError::validation(format!("Invalid table name: {table}")));
        }
        Ok(Self { pool, table })
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}

// Casts coerce tables written by other tools (TIMESTAMP dates, INTEGER amounts) into the row types.
fn select_all_sql(table: &str) -> String {
    format!(
        "SELECT date::date AS date,
                revenue::bigint AS revenue,
                expenses::bigint AS expenses,
                profit::bigint AS profit,
                customer_count::bigint AS customer_count
         FROM {table} ORDER BY date ASC"
    )
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[async_trait]
impl KpiStore for PgKpiStore {
    #[instrument(skip(self), fields(table = %self.table))]
    async fn fetch_all(&self) -> Result<Vec<KpiRecord>, AppError> {
        let sql = select_all_sql(&self.table);
        match sqlx::query_as::<_, KpiRecord>(&sql).fetch_all(&self.pool).await {
            Ok(rows) => Ok(rows),
            Err(e) => {
                error!(?e, "Failed to fetch KPI rows");
                Err(e.into())
            }
        }
    }

    #[instrument(skip(self, records), fields(table = %self.table, rows = records.len()))]
    async fn replace_all(&self, records: &[KpiRecord]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(&format!("DROP TABLE IF EXISTS {}", self.table))
            .execute(&mut *tx)
            .await?;
        sqlx::query(&format!(
            "CREATE TABLE {} (
                date DATE PRIMARY KEY,
                revenue BIGINT NOT NULL,
                expenses BIGINT NOT NULL,
                profit BIGINT NOT NULL,
                customer_count BIGINT NOT NULL
            )",
            self.table
        ))
        .execute(&mut *tx)
        .await?;

        for chunk in records.chunks(INSERT_CHUNK) {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
                "INSERT INTO {} (date, revenue, expenses, profit, customer_count) ",
                self.table
            ));
            builder.push_values(chunk, |mut row, record| {
                row.push_bind(record.date)
                    .push_bind(record.revenue)
                    .push_bind(record.expenses)
                    .push_bind(record.profit)
                    .push_bind(record.customer_count);
            });
            builder.build().execute(&mut *tx).await?;
        }

        tx.commit().await?;
        info!("Replaced KPI table contents");
        Ok(())
    }
}

/// Process-local store. Ordering is applied on read, same as the database query.
#[derive(Default)]
pub struct MemoryKpiStore {
    rows: RwLock<Vec<KpiRecord>>,
}

impl MemoryKpiStore {
    pub fn new(rows: Vec<KpiRecord>) -> Self {
        Self { rows: RwLock::new(rows) }
    }
}

#[async_trait]
impl KpiStore for MemoryKpiStore {
    async fn fetch_all(&self) -> Result<Vec<KpiRecord>, AppError> {
        let mut rows = self.rows.read().await.clone();
        rows.sort_by_key(|r| r.date);
        Ok(rows)
    }

    async fn replace_all(&self, records: &[KpiRecord]) -> Result<(), AppError> {
        *self.rows.write().await = records.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(day: u32, revenue: i64) -> KpiRecord {
        KpiRecord {
            date: NaiveDate::from_ymd_opt(2023, 1, day).unwrap(),
            revenue,
            expenses: 0,
            profit: 0,
            customer_count: 0,
        }
    }

    #[tokio::test]
    async fn memory_store_reads_in_date_order() {
        let store = MemoryKpiStore::new(vec![record(3, 30), record(1, 10), record(2, 20)]);
        let rows = store.fetch_all().await.unwrap();
        let days: Vec<i64> = rows.iter().map(|r| r.revenue).collect();
        assert_eq!(days, vec![10, 20, 30]);
    }

    #[tokio::test]
    async fn memory_store_replace_discards_previous_rows() {
        let store = MemoryKpiStore::new(vec![record(1, 10), record(2, 20)]);
        store.replace_all(&[record(5, 50)]).await.unwrap();
        let rows = store.fetch_all().await.unwrap();
        assert_eq!(rows, vec![record(5, 50)]);
    }

    #[test]
    fn read_query_coerces_column_types() {
        let sql = select_all_sql("kpi_data");
        assert!(sql.contains("date::date AS date"));
        for col in ["revenue", "expenses", "profit", "customer_count"] {
            assert!(sql.contains(&format!("{col}::bigint AS {col}")), "{col}");
        }
        assert!(sql.contains("FROM kpi_data ORDER BY date ASC"));
    }

    #[test]
    fn table_names_must_be_plain_identifiers() {
        assert!(is_identifier("kpi_data"));
        assert!(is_identifier("_kpi2"));
        assert!(!is_identifier("2kpi"));
        assert!(!is_identifier("kpi; DROP TABLE users"));
        assert!(!is_identifier(""));
    }
}
