// src/chart.rs
//! Plotly-compatible figure documents. Rendering only; rows arrive already filtered.

use chrono::NaiveDate;
use serde::Serialize;
use crate::filter::FilterOutcome;
use crate::models::kpi::Kpi;
use crate::models::snapshot::SnapshotRow;

pub const KPI_TITLE: &str = "Business KPIs Over Time";
pub const NO_DATA_TITLE: &str = "No data available";
pub const REVENUE_VS_EXPENSES_TITLE: &str = "Revenue vs Expenses Over Time";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub mode: &'static str,
    pub name: String,
    pub x: Vec<NaiveDate>,
    pub y: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Text,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub paper_bgcolor: &'static str,
    pub plot_bgcolor: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Text,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Text {
    pub text: String,
}

impl Text {
    fn new(text: &str) -> Self {
        Self { text: text.to_string() }
    }
}

fn layout(title: &str, x_title: &str, y_title: &str) -> Layout {
    Layout {
        title: Text::new(title),
        xaxis: Axis { title: Text::new(x_title) },
        yaxis: Axis { title: Text::new(y_title) },
        paper_bgcolor: "#ffffff",
        plot_bgcolor: "#ffffff",
    }
}

impl Figure {
    /// Empty but renderable chart for a selection with no known KPIs.
    pub fn placeholder() -> Self {
        Self { data: Vec::new(), layout: layout(NO_DATA_TITLE, "", "") }
    }

    pub fn from_outcome(outcome: &FilterOutcome) -> Self {
        let table = match outcome {
            FilterOutcome::Table(table) => table,
            FilterOutcome::NoData => return Self::placeholder(),
        };

        let data = table
            .columns
            .iter()
            .map(|column| Trace {
                kind: "scatter",
                mode: "lines",
                name: column.kpi.column().to_string(),
                x: table.dates.clone(),
                y: column.values.clone(),
            })
            .collect();

        Self { data, layout: layout(KPI_TITLE, "date", "value") }
    }

    pub fn revenue_vs_expenses(rows: &[SnapshotRow]) -> Self {
        let dates: Vec<NaiveDate> = rows.iter().map(|r| r.date).collect();
        let series = |kpi: Kpi, y: Vec<i64>| Trace {
            kind: "scatter",
            mode: "lines+markers",
            name: kpi.label().to_string(),
            x: dates.clone(),
            y,
        };
        let data = vec![
            series(Kpi::Revenue, rows.iter().map(|r| r.revenue).collect()),
            series(Kpi::Expenses, rows.iter().map(|r| r.expenses).collect()),
        ];

        Self { data, layout: layout(REVENUE_VS_EXPENSES_TITLE, "Date", "Amount ($)") }
    }

    pub fn title(&self) -> &str {
        &self.layout.title.text
    }
}

/// Standalone HTML document that draws `figure` with plotly.js.
pub fn render_page(figure: &Figure) -> Result<String, serde_json::Error> {
    // `</` would close the script element early
    let json = serde_json::to_string(figure)?.replace("</", "<\\/");
    Ok(format!(
        r#"<!doctype html>
<html>
  <head>
    <meta charset="utf-8" />
    <title>{title}</title>
    <script src="https://cdn.plot.ly/plotly-2.35.2.min.js"></script>
  </head>
  <body style="margin:0;font-family:'Inter',sans-serif">
    <div id="chart" style="width:100vw;height:100vh"></div>
    <script>
      const figure = {json};
      Plotly.newPlot("chart", figure.data, figure.layout, {{ responsive: true }});
    </script>
  </body>
</html>
"#,
        title = escape_html(figure.title()),
    ))
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{filter_kpis, DateWindow, KpiSelection};
    use crate::generator::{generate, GeneratorConfig};

    fn ymd(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, m, d).unwrap()
    }

    #[test]
    fn one_trace_per_selected_column() {
        let rows = generate(&GeneratorConfig::default()).unwrap();
        let outcome = filter_kpis(&rows, DateWindow::new(ymd(1, 1), ymd(1, 31)), &KpiSelection::default());
        let figure = Figure::from_outcome(&outcome);
        assert_eq!(figure.title(), KPI_TITLE);
        let names: Vec<&str> = figure.data.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["revenue", "expenses", "profit"]);
        assert!(figure.data.iter().all(|t| t.x.len() == 31 && t.y.len() == 31));
    }

    #[test]
    fn no_data_renders_placeholder() {
        let figure = Figure::from_outcome(&FilterOutcome::NoData);
        assert!(figure.data.is_empty());
        assert_eq!(figure.title(), NO_DATA_TITLE);

        let json = serde_json::to_value(&figure).unwrap();
        assert_eq!(json["data"], serde_json::json!([]));
        assert_eq!(json["layout"]["title"]["text"], NO_DATA_TITLE);
    }

    #[test]
    fn trace_serializes_dates_as_iso_strings() {
        let rows: Vec<SnapshotRow> = generate(&GeneratorConfig { days: 2, ..GeneratorConfig::default() })
            .unwrap()
            .iter()
            .map(SnapshotRow::from)
            .collect();
        let json = serde_json::to_value(Figure::revenue_vs_expenses(&rows)).unwrap();
        assert_eq!(json["data"][0]["type"], "scatter");
        assert_eq!(json["data"][0]["name"], "Revenue");
        assert_eq!(json["data"][1]["name"], "Expenses");
        assert_eq!(json["data"][0]["x"][1], "2023-01-02");
        assert_eq!(json["layout"]["yaxis"]["title"]["text"], "Amount ($)");
    }

    #[test]
    fn page_embeds_figure_json() {
        let page = render_page(&Figure::placeholder()).unwrap();
        assert!(page.contains("<title>No data available</title>"));
        assert!(page.contains("Plotly.newPlot"));
        assert!(page.contains("\"data\":[]"));
    }
}
