use serde::Serialize;

use super::DateKey;

/// Hours an employee logged against a project on one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffortRecord {
    pub id: u32,
    pub project_id: u32,
    pub date_key: DateKey,
    pub employee_id: u32,
    pub process_id: u32,
    pub hours: f64,
    pub cost: f64,
}
