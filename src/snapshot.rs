// src/snapshot.rs
//! CSV snapshot of the KPI table, read independently of the database.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tracing::info;
use crate::error::AppError;
use crate::models::kpi::KpiRecord;
use crate::models::snapshot::SnapshotRow;

pub const HEADER: [&str; 5] = ["date", "revenue", "expenses", "profit", "customer_count"];

struct Columns {
    date: usize,
    revenue: usize,
    expenses: usize,
    profit: Option<usize>,
    customer_count: Option<usize>,
}

// "Customer Count" -> "customer_count"
fn normalize(name: &str) -> String {
    name.trim().trim_matches('"').to_lowercase().replace(' ', "_")
}

fn locate(header: &str) -> Result<Columns, AppError> {
    let names: Vec<String> = header.split(',').map(normalize).collect();
    let find = |col: &str| names.iter().position(|n| n == col);
    let require = |col: &str| {
        find(col).ok_or_else(|| AppError::snapshot(format!("missing required column '{col}'")))
    };
    Ok(Columns {
        date: require("date")?,
        revenue: require("revenue")?,
        expenses: require("expenses")?,
        profit: find("profit"),
        customer_count: find("customer_count"),
    })
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.split([' ', 'T']).next()?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

fn parse_row(line_no: usize, line: &str, cols: &Columns) -> Result<SnapshotRow, AppError> {
    let fields: Vec<&str> = line.split(',').map(|f| f.trim().trim_matches('"').trim()).collect();
    let field = |idx: usize, name: &str| {
        fields
            .get(idx)
            .copied()
            .ok_or_else(|| AppError::snapshot(format!("line {line_no}: missing {name}")))
    };
    let int = |idx: usize, name: &str| -> Result<i64, AppError> {
        let raw = field(idx, name)?;
        raw.parse::<i64>()
            .map_err(|_| AppError::snapshot(format!("line {line_no}: bad {name} '{raw}'")))
    };
    let optional = |idx: Option<usize>, name: &str| match idx {
        Some(idx) => int(idx, name).map(Some),
        None => Ok(None),
    };

    let raw_date = field(cols.date, "date")?;
    let date = parse_date(raw_date)
        .ok_or_else(|| AppError::snapshot(format!("line {line_no}: bad date '{raw_date}'")))?;

    Ok(SnapshotRow {
        date,
        revenue: int(cols.revenue, "revenue")?,
        expenses: int(cols.expenses, "expenses")?,
        profit: optional(cols.profit, "profit")?,
        customer_count: optional(cols.customer_count, "customer_count")?,
    })
}

pub fn parse_snapshot(contents: &str) -> Result<Vec<SnapshotRow>, AppError> {
    let contents = contents.strip_prefix('\u{feff}').unwrap_or(contents);
    let mut lines = contents
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l))
        .filter(|(_, l)| !l.trim().is_empty());

    let (_, header) = lines.next().ok_or_else(|| AppError::snapshot("empty snapshot file"))?;
    let cols = locate(header)?;

    lines.map(|(line_no, line)| parse_row(line_no, line, &cols)).collect()
}

/// Loads the snapshot at `path`. Any unreadable or malformed content is an error.
pub fn load_snapshot(path: &Path) -> Result<Vec<SnapshotRow>, AppError> {
    let contents = fs::read_to_string(path)
        .map_err(|e| AppError::snapshot(format!("{}: {e}", path.display())))?;
    let rows = parse_snapshot(&contents)
        .map_err(|e| match e {
            AppError::SnapshotError(msg) => AppError::snapshot(format!("{}: {msg}", path.display())),
            other => other,
        })?;
    info!(path = %path.display(), rows = rows.len(), "Loaded snapshot");
    Ok(rows)
}

pub fn write_snapshot(path: &Path, rows: &[KpiRecord]) -> Result<(), AppError> {
    let mut out = HEADER.join(",");
    out.push('\n');
    for r in rows {
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            r.date.format("%Y-%m-%d"),
            r.revenue,
            r.expenses,
            r.profit,
            r.customer_count
        ));
    }
    fs::write(path, out)?;
    info!(path = %path.display(), rows = rows.len(), "Wrote snapshot");
    Ok(())
}
