use dwh_sim::predictor::Estimate;
use dwh_sim::report::{Kpis, PerformanceRow, QualityRow, ScorecardRow};

use crate::{cost_chart, palette, rayleigh_chart, scorecard_chart, severity_chart};

const PLOTLY_JS: &str = "https://cdn.plot.ly/plotly-2.12.1.min.js";

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8" />
<title>{title}</title>
<script src="{PLOTLY_JS}"></script>
<style>
  body {{ font-family: sans-serif; margin: 2rem; color: {navy}; }}
  h1 {{ font-weight: 800; margin-bottom: 0; }}
  .subtitle {{ color: {cyan}; font-weight: 600; margin-top: 0; }}
  .kpis {{ display: flex; gap: 1rem; margin: 1.5rem 0; }}
  .kpi {{ background: {navy}; border-left: 5px solid {cyan}; color: white; padding: 1rem; border-radius: 8px; flex: 1; }}
  .kpi .label {{ color: #E0E0E0; font-size: 0.9em; }}
  .kpi .value {{ font-size: 1.8em; font-weight: 700; }}
  .result {{ text-align: center; padding: 2rem; background: {cyan}; border-radius: 10px; color: white; }}
  .result .count {{ font-size: 70px; font-weight: 800; margin: 0; }}
</style>
</head>
<body>
<h1>Software Delivery</h1>
<p class="subtitle">Business Intelligence</p>
{body}
</body>
</html>
"#,
        navy = palette::NAVY,
        cyan = palette::CYAN,
    )
}

fn kpi_card(label: &str, value: &str) -> String {
    format!(r#"<div class="kpi"><div class="label">{label}</div><div class="value">{value}</div></div>"#)
}

/// Full dashboard: KPI cards followed by the quality, finance and scorecard charts.
pub fn dashboard_page(
    kpis: &Kpis,
    quality: &[QualityRow],
    performance: &[PerformanceRow],
    scorecard: &[ScorecardRow],
) -> String {
    let mttr = kpis
        .mean_resolution_hours
        .map(|hours| format!("{hours:.1} h"))
        .unwrap_or_else(|| "n/a".to_string());

    let body = format!(
        r#"<div class="kpis">{}{}{}{}</div>
{}
{}
{}"#,
        kpi_card("Total Defects", &kpis.total_defects.to_string()),
        kpi_card("Mean MTTR", &mttr),
        kpi_card("Actual Cost", &format!("${:.0}", kpis.total_cost)),
        kpi_card("Active Projects", &kpis.active_projects.to_string()),
        severity_chart(quality).to_inline_html(Some("severity-chart")),
        cost_chart(performance).to_inline_html(Some("cost-chart")),
        scorecard_chart(scorecard).to_inline_html(Some("scorecard-chart")),
    );

    page("Software Delivery BI", &body)
}

/// Result card and Rayleigh curve for one interactive estimate.
pub fn estimate_page(estimate: &Estimate, project_name: &str) -> String {
    let body = format!(
        r#"<div class="result">
<h2>Estimated Defects</h2>
<p class="count">{}</p>
<p>Project: {} &middot; {} hours &middot; maturity level {}</p>
</div>
{}"#,
        estimate.expected_defects,
        ammonia::clean_text(project_name),
        estimate.effort_hours.value(),
        estimate.maturity_level,
        rayleigh_chart(estimate).to_inline_html(Some("rayleigh-chart")),
    );

    page("Defect Estimate", &body)
}

#[cfg(test)]
mod tests {
    use dwh_sim::predictor;
    use dwh_sim::report;

    use super::*;

    #[test]
    fn dashboard_shows_kpis_and_all_charts() {
        let kpis = Kpis::summarize(&[], &[]);
        let html = dashboard_page(&kpis, &[], &[], &report::scorecard());

        assert!(html.contains("Total Defects"));
        assert!(html.contains("n/a"));
        assert!(html.contains("severity-chart"));
        assert!(html.contains("cost-chart"));
        assert!(html.contains("scorecard-chart"));
        assert!(html.contains(PLOTLY_JS));
    }

    #[test]
    fn estimate_page_escapes_the_project_name() {
        let estimate = predictor::estimate_raw(1500.0, 4).unwrap();
        let html = estimate_page(&estimate, "<script>alert(1)</script>");

        assert!(html.contains(r#"<p class="count">7</p>"#));
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("rayleigh-chart"));
    }
}
