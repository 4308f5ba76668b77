//! Row shapes of the aggregate views and the KPI summary built from them.

use serde::Serialize;
use strum::{AsRefStr, Display, EnumString};

use crate::domain::{ProjectStatus, Severity};

/// Defect count and mean resolution time per project, maturity and severity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityRow {
    pub project_name: String,
    pub maturity_level: u8,
    pub severity: Severity,
    pub total_defects: u32,
    pub mean_resolution_hours: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, AsRefStr)]
pub enum FinancialStatus {
    #[strum(serialize = "Within Budget")]
    #[serde(rename = "Within Budget")]
    WithinBudget,
    #[strum(serialize = "Over Budget")]
    #[serde(rename = "Over Budget")]
    OverBudget,
}

impl FinancialStatus {
    pub fn classify(actual_cost: f64, budget: f64) -> Self {
        if actual_cost > budget {
            FinancialStatus::OverBudget
        } else {
            FinancialStatus::WithinBudget
        }
    }
}

/// Realised cost against budget per project.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRow {
    pub project_name: String,
    pub status: ProjectStatus,
    pub client_name: String,
    pub budget: f64,
    pub actual_cost: f64,
    pub financial_status: FinancialStatus,
}

/// One line of the balanced scorecard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorecardRow {
    pub perspective: String,
    pub kpi: String,
    pub value: f64,
}

/// The fixed illustrative scorecard: (perspective, KPI, percentage).
pub const SCORECARD: [(&str, &str, f64); 4] = [
    ("Financial", "Profitability", 85.0),
    ("Customer", "Satisfaction", 90.0),
    ("Internal Processes", "MTTR Efficiency", 78.5),
    ("Learning & Growth", "Training", 65.0),
];

pub fn scorecard() -> Vec<ScorecardRow> {
    SCORECARD
        .iter()
        .map(|(perspective, kpi, value)| ScorecardRow {
            perspective: perspective.to_string(),
            kpi: kpi.to_string(),
            value: *value,
        })
        .collect()
}

/// Headline numbers shown above the dashboard charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpis {
    pub total_defects: u64,
    /// Mean over quality rows; `None` when there are no defects.
    pub mean_resolution_hours: Option<f64>,
    pub total_cost: f64,
    pub active_projects: usize,
}

impl Kpis {
    pub fn summarize(quality: &[QualityRow], performance: &[PerformanceRow]) -> Self {
        let total_defects = quality.iter().map(|row| row.total_defects as u64).sum();
        let mean_resolution_hours = if quality.is_empty() {
            None
        } else {
            Some(
                quality.iter().map(|row| row.mean_resolution_hours).sum::<f64>()
                    / quality.len() as f64,
            )
        };

        Self {
            total_defects,
            mean_resolution_hours,
            total_cost: performance.iter().map(|row| row.actual_cost).sum(),
            active_projects: performance
                .iter()
                .filter(|row| row.status == ProjectStatus::Active)
                .count(),
        }
    }
}
