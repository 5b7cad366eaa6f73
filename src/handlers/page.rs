// src/handlers/page.rs
pub const DASHBOARD_HTML: &str = r#"<!doctype html>
<html>
  <head>
    <meta charset="utf-8" />
    <title>Business Insights</title>
    <link rel="stylesheet" href="https://fonts.googleapis.com/css2?family=Inter:wght@300;400;600&display=swap" />
    <script src="https://cdn.plot.ly/plotly-2.35.2.min.js"></script>
    <style>
      body { font-family: "Inter", sans-serif; margin: 0; background: #f4f5f7; color: #1a1a1a; }
      nav { background: #1a1a1a; color: #fff; padding: 10px 24px; font-size: 24px; font-weight: bold; }
      .hero { text-align: center; padding: 20px 0; }
      .hero h1 { margin: 0 0 10px; }
      .hero p { margin: 0 0 20px; color: #555; }
      .filters { display: grid; grid-template-columns: 1fr 1fr; gap: 16px; padding: 0 24px; margin-bottom: 8px; }
      .card { background: #fff; border-radius: 12px; box-shadow: 0 4px 12px rgba(0,0,0,0.08); padding: 12px 16px; }
      .card label { font-weight: bold; display: block; margin-bottom: 8px; }
      .kpis label { display: inline-flex; gap: 6px; margin-right: 16px; font-weight: normal; }
      .chart-card { margin: 8px 24px 24px; }
      #kpi-graph { height: 480px; }
    </style>
  </head>
  <body>
    <nav>Business Insights</nav>
    <div class="hero">
      <h1>Gain Deeper Insights</h1>
      <p>Discover trends in revenue, expenses, and profits with interactive visualizations.</p>
    </div>
    <div class="filters">
      <div class="card">
        <label>Select date range:</label>
        <input type="date" id="start-date" /> &ndash; <input type="date" id="end-date" />
      </div>
      <div class="card">
        <label>Select KPI to display:</label>
        <div class="kpis" id="kpi-select"></div>
      </div>
    </div>
    <div class="card chart-card">
      <h4>Business KPIs Over Time</h4>
      <div id="kpi-graph"></div>
    </div>
    <script>
      const startInput = document.getElementById("start-date");
      const endInput = document.getElementById("end-date");
      const kpiBox = document.getElementById("kpi-select");

      function selectedKpis() {
        return Array.from(kpiBox.querySelectorAll("input:checked")).map((el) => el.value);
      }

      async function refresh() {
        const params = new URLSearchParams();
        if (startInput.value) params.set("start_date", startInput.value);
        if (endInput.value) params.set("end_date", endInput.value);
        params.set("kpis", selectedKpis().join(","));
        const res = await fetch("/dashboard/figure?" + params.toString());
        if (!res.ok) return;
        const figure = await res.json();
        Plotly.react("kpi-graph", figure.data, figure.layout, { responsive: true });
      }

      async function init() {
        const res = await fetch("/dashboard/options");
        const options = await res.json();
        for (const input of [startInput, endInput]) {
          if (options.min_date) input.min = options.min_date;
          if (options.max_date) input.max = options.max_date;
        }
        if (options.min_date) startInput.value = options.min_date;
        if (options.max_date) endInput.value = options.max_date;
        for (const kpi of options.kpis) {
          const label = document.createElement("label");
          const box = document.createElement("input");
          box.type = "checkbox";
          box.value = kpi.value;
          box.checked = options.default_kpis.includes(kpi.value);
          box.addEventListener("change", refresh);
          label.append(box, kpi.label);
          kpiBox.append(label);
        }
        startInput.addEventListener("change", refresh);
        endInput.addEventListener("change", refresh);
        await refresh();
      }

      init();
    </script>
  </body>
</html>
"#;
