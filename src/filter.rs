// src/filter.rs
//! Date-window and column selection over an already-fetched KPI table.
//!
//! Nothing in here touches the store; callers fetch the rows and hand them in.

use chrono::NaiveDate;
use tracing::debug;
use crate::models::kpi::{Kpi, KpiRecord};

/// Requested KPI column names, always a collection. Wrap a lone name with [`KpiSelection::single`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KpiSelection(pub Vec<String>);

impl KpiSelection {
    pub fn single(name: impl Into<String>) -> Self {
        Self(vec![name.into()])
    }

    /// Comma-separated form used on the query string. Blank items are skipped.
    pub fn parse_list(raw: &str) -> Self {
        Self(
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    /// Known columns in request order, first occurrence only.
    pub fn resolve(&self) -> Vec<Kpi> {
        let mut selected = Vec::new();
        for name in &self.0 {
            match Kpi::from_column(name) {
                Some(kpi) if !selected.contains(&kpi) => selected.push(kpi),
                Some(_) => {}
                None => debug!(kpi = %name, "Dropping unknown KPI"),
            }
        }
        selected
    }
}

impl Default for KpiSelection {
    fn default() -> Self {
        Self(Kpi::DEFAULT_SELECTION.iter().map(|k| k.column().to_string()).collect())
    }
}

/// Inclusive on both ends. An inverted window simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KpiColumn {
    pub kpi: Kpi,
    pub values: Vec<i64>,
}

/// The date column plus the selected KPI columns, row-aligned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredTable {
    pub dates: Vec<NaiveDate>,
    pub columns: Vec<KpiColumn>,
}

impl FilteredTable {
    pub fn row_count(&self) -> usize {
        self.dates.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    Table(FilteredTable),
    /// None of the requested names is a known KPI.
    NoData,
}

pub fn filter_kpis(rows: &[KpiRecord], window: DateWindow, selection: &KpiSelection) -> FilterOutcome {
    let kpis = selection.resolve();
    if kpis.is_empty() {
        debug!(requested = ?selection.0, "No valid KPIs selected");
        return FilterOutcome::NoData;
    }

    let in_window: Vec<&KpiRecord> = rows.iter().filter(|r| window.contains(r.date)).collect();

    let dates = in_window.iter().map(|r| r.date).collect();
    let columns = kpis
        .into_iter()
        .map(|kpi| KpiColumn {
            kpi,
            values: in_window.iter().map(|r| r.value(kpi)).collect(),
        })
        .collect();

    FilterOutcome::Table(FilteredTable { dates, columns })
}

/// Earliest and latest dates present, or `None` for an empty table.
pub fn date_bounds(rows: &[KpiRecord]) -> Option<DateWindow> {
    let start = rows.iter().map(|r| r.date).min()?;
    let end = rows.iter().map(|r| r.date).max()?;
    Some(DateWindow { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{generate, GeneratorConfig};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn year() -> Vec<KpiRecord> {
        generate(&GeneratorConfig::default()).unwrap()
    }

    fn table(outcome: FilterOutcome) -> FilteredTable {
        match outcome {
            FilterOutcome::Table(t) => t,
            FilterOutcome::NoData => panic!("expected a table"),
        }
    }

    #[test]
    fn first_week_of_revenue() {
        let rows = year();
        let window = DateWindow::new(ymd(2023, 1, 1), ymd(2023, 1, 7));
        let t = table(filter_kpis(&rows, window, &KpiSelection::single("revenue")));
        assert_eq!(t.row_count(), 7);
        assert_eq!(t.columns.len(), 1);
        assert_eq!(t.columns[0].kpi, Kpi::Revenue);
        let expected: Vec<i64> = rows[..7].iter().map(|r| r.revenue).collect();
        assert_eq!(t.columns[0].values, expected);
    }

    #[test]
    fn window_is_inclusive_and_ordered() {
        let rows = year();
        let window = DateWindow::new(ymd(2023, 3, 10), ymd(2023, 3, 20));
        let t = table(filter_kpis(&rows, window, &KpiSelection::default()));
        assert_eq!(t.dates.first(), Some(&ymd(2023, 3, 10)));
        assert_eq!(t.dates.last(), Some(&ymd(2023, 3, 20)));
        assert_eq!(t.row_count(), 11);
        assert!(t.dates.windows(2).all(|w| w[0] < w[1]));
        assert!(t.columns.iter().all(|c| c.values.len() == 11));
    }

    #[test]
    fn inverted_window_is_empty_not_an_error() {
        let rows = year();
        let window = DateWindow::new(ymd(2023, 6, 1), ymd(2023, 5, 1));
        let t = table(filter_kpis(&rows, window, &KpiSelection::single("profit")));
        assert_eq!(t.row_count(), 0);
        assert_eq!(t.columns.len(), 1);
        assert!(t.columns[0].values.is_empty());
    }

    #[test]
    fn unknown_names_are_dropped_and_order_is_kept() {
        let rows = year();
        let window = DateWindow::new(ymd(2023, 1, 1), ymd(2023, 1, 2));
        let selection = KpiSelection(vec![
            "customer_count".into(),
            "bogus".into(),
            "revenue".into(),
            "date".into(),
            "customer_count".into(),
        ]);
        let t = table(filter_kpis(&rows, window, &selection));
        let kpis: Vec<Kpi> = t.columns.iter().map(|c| c.kpi).collect();
        assert_eq!(kpis, vec![Kpi::CustomerCount, Kpi::Revenue]);
    }

    #[test]
    fn bogus_or_empty_selection_is_no_data() {
        let rows = year();
        let full = DateWindow::new(ymd(2023, 1, 1), ymd(2023, 12, 31));
        let inverted = DateWindow::new(ymd(2023, 12, 31), ymd(2023, 1, 1));
        for window in [full, inverted] {
            assert_eq!(filter_kpis(&rows, window, &KpiSelection::single("bogus")), FilterOutcome::NoData);
            assert_eq!(filter_kpis(&rows, window, &KpiSelection(Vec::new())), FilterOutcome::NoData);
        }
    }

    #[test]
    fn filtering_is_repeatable_and_leaves_input_alone() {
        let rows = year();
        let before = rows.clone();
        let window = DateWindow::new(ymd(2023, 2, 1), ymd(2023, 2, 28));
        let selection = KpiSelection::default();
        let first = filter_kpis(&rows, window, &selection);
        let second = filter_kpis(&rows, window, &selection);
        assert_eq!(first, second);
        assert_eq!(rows, before);
    }

    #[test]
    fn parse_list_trims_and_skips_blanks() {
        assert_eq!(
            KpiSelection::parse_list(" revenue, ,profit,"),
            KpiSelection(vec!["revenue".into(), "profit".into()])
        );
        assert!(KpiSelection::parse_list("").0.is_empty());
    }

    #[test]
    fn bounds_span_the_table() {
        let rows = year();
        assert_eq!(
            date_bounds(&rows),
            Some(DateWindow::new(ymd(2023, 1, 1), ymd(2023, 12, 31)))
        );
        assert_eq!(date_bounds(&[]), None);
    }
}
