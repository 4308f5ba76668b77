use dwh_sim::domain::Severity;
use dwh_sim::predictor::Estimate;
use dwh_sim::report::{FinancialStatus, PerformanceRow, QualityRow, ScorecardRow};
use itertools::Itertools;
use plotly::common::{Fill, Line, Marker, Mode, Title};
use plotly::layout::{Axis, BarMode};
use plotly::{Bar, Layout, Plot, Scatter};
use strum::IntoEnumIterator;

use crate::palette;

fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Blocker => palette::NAVY,
        Severity::Major => palette::CYAN,
        Severity::Minor => palette::SLATE,
        Severity::Trivial => palette::MIST,
    }
}

fn status_color(status: FinancialStatus) -> &'static str {
    match status {
        FinancialStatus::WithinBudget => palette::CYAN,
        FinancialStatus::OverBudget => palette::ALERT,
    }
}

/// Total defects per severity, one bar trace per severity so each keeps its colour.
pub fn severity_chart(rows: &[QualityRow]) -> Plot {
    let totals = rows
        .iter()
        .into_group_map_by(|row| row.severity)
        .into_iter()
        .map(|(severity, group)| {
            let total: u32 = group.iter().map(|row| row.total_defects).sum();
            (severity, total)
        })
        .collect::<std::collections::HashMap<_, _>>();

    let mut plot = Plot::new();
    for severity in Severity::iter() {
        let Some(total) = totals.get(&severity) else {
            continue;
        };
        let trace = Bar::new(vec![severity.to_string()], vec![*total])
            .name(severity.as_ref())
            .marker(Marker::new().color(severity_color(severity)));
        plot.add_trace(trace);
    }

    plot.set_layout(
        Layout::new()
            .title(Title::new("Defects by Severity"))
            .y_axis(Axis::new().title(Title::new("Defects"))),
    );
    plot
}

/// Realised cost per project, stacked by financial status.
pub fn cost_chart(rows: &[PerformanceRow]) -> Plot {
    let by_status = rows.iter().into_group_map_by(|row| row.financial_status);

    let mut plot = Plot::new();
    for status in [FinancialStatus::WithinBudget, FinancialStatus::OverBudget] {
        let Some(group) = by_status.get(&status) else {
            continue;
        };
        let names = group.iter().map(|row| row.project_name.clone()).collect_vec();
        let costs = group.iter().map(|row| row.actual_cost).collect_vec();
        let trace = Bar::new(names, costs)
            .name(status.as_ref())
            .marker(Marker::new().color(status_color(status)));
        plot.add_trace(trace);
    }

    plot.set_layout(
        Layout::new()
            .title(Title::new("Actual Cost per Project"))
            .bar_mode(BarMode::Stack)
            .x_axis(Axis::new().title(Title::new("Project")))
            .y_axis(Axis::new().title(Title::new("Cost"))),
    );
    plot
}

/// Scorecard compliance as percentage bars.
pub fn scorecard_chart(rows: &[ScorecardRow]) -> Plot {
    let labels = rows
        .iter()
        .map(|row| format!("{}: {}", row.perspective, row.kpi))
        .collect_vec();
    let values = rows.iter().map(|row| row.value).collect_vec();

    let mut plot = Plot::new();
    plot.add_trace(
        Bar::new(labels, values)
            .name("Compliance %")
            .marker(Marker::new().color(palette::NAVY)),
    );
    plot.set_layout(
        Layout::new()
            .title(Title::new("Balanced Scorecard"))
            .y_axis(Axis::new().title(Title::new("%")).range(vec![0.0, 100.0])),
    );
    plot
}

/// Failure-intensity area chart for an interactive estimate.
pub fn rayleigh_chart(estimate: &Estimate) -> Plot {
    let t = estimate.curve.iter().map(|p| p.t).collect_vec();
    let intensity = estimate.curve.iter().map(|p| p.intensity).collect_vec();

    let mut plot = Plot::new();
    plot.add_trace(
        Scatter::new(t, intensity)
            .name("Failure intensity")
            .mode(Mode::Lines)
            .fill(Fill::ToZeroY)
            .fill_color(palette::NAVY_FILL)
            .line(Line::new().color(palette::NAVY)),
    );
    plot.set_layout(
        Layout::new()
            .title(Title::new("Failure Probability Curve (Rayleigh)"))
            .x_axis(Axis::new().title(Title::new("Time / Effort (hours)")))
            .y_axis(Axis::new().title(Title::new("Probability"))),
    );
    plot
}
