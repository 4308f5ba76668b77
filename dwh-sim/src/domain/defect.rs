use serde::Serialize;
use strum::{AsRefStr, Display, EnumIter, EnumString};

use super::DateKey;

/// Defect severity, most severe first.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
pub enum Severity {
    Blocker,
    Major,
    Minor,
    Trivial,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Defect {
    pub id: u32,
    pub project_id: u32,
    pub reported_key: DateKey,
    pub closed_key: DateKey,
    pub responsible_employee_id: u32,
    pub process_id: u32,
    pub severity: Severity,
    pub resolution_hours: f64,
    pub schedule_variance_days: i64,
}
