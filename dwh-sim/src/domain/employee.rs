use serde::Serialize;
use strum::{AsRefStr, Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, AsRefStr)]
pub enum Role {
    #[strum(serialize = "Project Lead")]
    #[serde(rename = "Project Lead")]
    ProjectLead,
    #[strum(serialize = "Senior Developer")]
    #[serde(rename = "Senior Developer")]
    SeniorDeveloper,
    #[strum(serialize = "Mid Developer")]
    #[serde(rename = "Mid Developer")]
    MidDeveloper,
    #[strum(serialize = "Junior Developer")]
    #[serde(rename = "Junior Developer")]
    JuniorDeveloper,
    #[strum(serialize = "QA Tester")]
    #[serde(rename = "QA Tester")]
    QaTester,
}

impl Role {
    /// Leads report and close defects but are never assigned to fix them.
    pub fn is_lead(&self) -> bool {
        matches!(self, Role::ProjectLead)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, AsRefStr)]
pub enum Seniority {
    Senior,
    Mid,
    Junior,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, AsRefStr)]
pub enum Team {
    Alpha,
    Beta,
    Gamma,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Employee {
    pub id: u32,
    pub name: String,
    pub role: Role,
    pub seniority: Seniority,
    pub hourly_cost: f64,
    pub team: Team,
}
