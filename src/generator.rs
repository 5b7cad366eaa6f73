// src/generator.rs
use chrono::{Days, NaiveDate};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::info;
use crate::error::AppError;
use crate::models::kpi::KpiRecord;
use crate::store::KpiStore;

pub const REVENUE_RANGE: std::ops::Range<i64> = 5000..20000;
pub const EXPENSES_RANGE: std::ops::Range<i64> = 2000..15000;
pub const PROFIT_RANGE: std::ops::Range<i64> = 1000..10000;
pub const CUSTOMER_COUNT_RANGE: std::ops::Range<i64> = 100..1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub start: NaiveDate,
    pub days: u32,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or(NaiveDate::MIN),
            days: 365,
            seed: 42,
        }
    }
}

impl GeneratorConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(start) = lookup("KPI_START_DATE") {
            config.start = NaiveDate::parse_from_str(start.trim(), "%Y-%m-%d")
                .map_err(|e| AppError::validation(format!("KPI_START_DATE '{start}': {e}")))?;
        }
        if let Some(days) = lookup("KPI_DAYS") {
            config.days = days
                .trim()
                .parse()
                .map_err(|e| AppError::validation(format!("KPI_DAYS '{days}': {e}")))?;
        }
        if let Some(seed) = lookup("KPI_SEED") {
            config.seed = seed
                .trim()
                .parse()
                .map_err(|e| AppError::validation(format!("KPI_SEED '{seed}': {e}")))?;
        }
        Ok(config)
    }
}

/// Builds `days` consecutive daily rows from `start`. Each column is drawn in full
/// before the next one, in field order, from a single seeded generator.
pub fn generate(config: &GeneratorConfig) -> Result<Vec<KpiRecord>, AppError> {
    let past_end = || {
        AppError::validation(format!(
            "{} days from {} runs past the last representable date",
            config.days, config.start
        ))
    };
    if config.days > 0 {
        config.start.checked_add_days(Days::new(u64::from(config.days) - 1)).ok_or_else(past_end)?;
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let n = config.days as usize;

    let mut column = |range: std::ops::Range<i64>| -> Vec<i64> {
        (0..n).map(|_| rng.gen_range(range.clone())).collect()
    };
    let revenue = column(REVENUE_RANGE);
    let expenses = column(EXPENSES_RANGE);
    let profit = column(PROFIT_RANGE);
    let customer_count = column(CUSTOMER_COUNT_RANGE);

    let mut records = Vec::with_capacity(n);
    for i in 0..n {
        let date = config.start.checked_add_days(Days::new(i as u64)).ok_or_else(past_end)?;
        records.push(KpiRecord {
            date,
            revenue: revenue[i],
            expenses: expenses[i],
            profit: profit[i],
            customer_count: customer_count[i],
        });
    }
    Ok(records)
}

/// Regenerates the dataset and overwrites the store with it.
pub async fn seed_store(store: &dyn KpiStore, config: &GeneratorConfig) -> Result<Vec<KpiRecord>, AppError> {
    let records = generate(config)?;
    store.replace_all(&records).await?;
    info!(rows = records.len(), start = %config.start, seed = config.seed, "Seeded KPI data");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryKpiStore;
    use chrono::Duration;

    #[test]
    fn default_config_yields_one_year_of_consecutive_days() {
        let rows = generate(&GeneratorConfig::default()).unwrap();
        assert_eq!(rows.len(), 365);
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(rows[364].date, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        for pair in rows.windows(2) {
            assert_eq!(pair[1].date - pair[0].date, Duration::days(1));
        }
    }

    #[test]
    fn values_stay_inside_their_ranges() {
        for row in generate(&GeneratorConfig::default()).unwrap() {
            assert!(REVENUE_RANGE.contains(&row.revenue));
            assert!(EXPENSES_RANGE.contains(&row.expenses));
            assert!(PROFIT_RANGE.contains(&row.profit));
            assert!(CUSTOMER_COUNT_RANGE.contains(&row.customer_count));
        }
    }

    #[test]
    fn same_seed_reproduces_identical_columns() {
        let config = GeneratorConfig::default();
        assert_eq!(generate(&config).unwrap(), generate(&config).unwrap());
    }

    #[test]
    fn different_seed_changes_values() {
        let a = generate(&GeneratorConfig::default()).unwrap();
        let b = generate(&GeneratorConfig { seed: 7, ..GeneratorConfig::default() }).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn zero_days_is_empty() {
        let rows = generate(&GeneratorConfig { days: 0, ..GeneratorConfig::default() }).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn env_overrides_are_parsed() {
        let config = GeneratorConfig::from_lookup(|key| match key {
            "KPI_START_DATE" => Some("2024-02-01".to_string()),
            "KPI_DAYS" => Some("30".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.start, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(config.days, 30);
        assert_eq!(config.seed, 42);

        let err = GeneratorConfig::from_lookup(|key| (key == "KPI_SEED").then(|| "x".to_string()));
        assert!(matches!(err, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn range_past_the_calendar_end_is_rejected() {
        let config = GeneratorConfig {
            start: NaiveDate::from_ymd_opt(9999, 1, 1).unwrap(),
            days: 95_000_000,
            seed: 42,
        };
        assert!(matches!(generate(&config), Err(AppError::ValidationError(_))));

        let last_day = GeneratorConfig { start: NaiveDate::MAX, days: 1, seed: 42 };
        assert_eq!(generate(&last_day).unwrap()[0].date, NaiveDate::MAX);
    }

    #[tokio::test]
    async fn reseeding_replaces_previous_contents() {
        let store = MemoryKpiStore::default();
        seed_store(&store, &GeneratorConfig { days: 10, ..GeneratorConfig::default() })
            .await
            .unwrap();
        seed_store(&store, &GeneratorConfig { days: 3, ..GeneratorConfig::default() })
            .await
            .unwrap();
        assert_eq!(store.fetch_all().await.unwrap().len(), 3);
    }
}
