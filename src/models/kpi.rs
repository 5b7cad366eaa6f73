use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One day of business KPIs. Rows are unique by `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct KpiRecord {
    pub date: NaiveDate,
    pub revenue: i64,
    pub expenses: i64,
    pub profit: i64,
    pub customer_count: i64,
}

impl KpiRecord {
    pub fn value(&self, kpi: Kpi) -> i64 {
        match kpi {
            Kpi::Revenue => self.revenue,
            Kpi::Expenses => self.expenses,
            Kpi::Profit => self.profit,
            Kpi::CustomerCount => self.customer_count,
        }
    }
}

/// The fixed set of tracked metrics, one per numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kpi {
    Revenue,
    Expenses,
    Profit,
    CustomerCount,
}

impl Kpi {
    pub const ALL: [Kpi; 4] = [Kpi::Revenue, Kpi::Expenses, Kpi::Profit, Kpi::CustomerCount];

    pub const DEFAULT_SELECTION: [Kpi; 3] = [Kpi::Revenue, Kpi::Expenses, Kpi::Profit];

    pub fn column(self) -> &'static str {
        match self {
            Kpi::Revenue => "revenue",
            Kpi::Expenses => "expenses",
            Kpi::Profit => "profit",
            Kpi::CustomerCount => "customer_count",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Kpi::Revenue => "Revenue",
            Kpi::Expenses => "Expenses",
            Kpi::Profit => "Profit",
            Kpi::CustomerCount => "Customer Count",
        }
    }

    // Exact match on the column name
    pub fn from_column(name: &str) -> Option<Kpi> {
        Kpi::ALL.into_iter().find(|kpi| kpi.column() == name)
    }
}
