use chrono::NaiveDate;
use serde::Serialize;
use crate::models::kpi::KpiRecord;

/// One row of a CSV snapshot. Columns the file does not carry stay `None` and are
/// left out of the serialized object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotRow {
    pub date: NaiveDate,
    pub revenue: i64,
    pub expenses: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_count: Option<i64>,
}

impl From<&KpiRecord> for SnapshotRow {
    fn from(record: &KpiRecord) -> Self {
        Self {
            date: record.date,
            revenue: record.revenue,
            expenses: record.expenses,
            profit: Some(record.profit),
            customer_count: Some(record.customer_count),
        }
    }
}
