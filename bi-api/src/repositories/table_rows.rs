//! Column lists and bind order for every warehouse table.

use dwh_sim::domain::{Client, Defect, EffortRecord, Employee, InternalProcess, Project, TimeRow};
use sqlx::query_builder::Separated;
use sqlx::Sqlite;

use super::schema::*;

pub(super) type Values<'qb, 'args> = Separated<'qb, 'args, Sqlite, &'static str>;

/// A row that can be appended to a multi-row INSERT into its table.
pub(super) trait TableRow: Sync {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];

    /// Bind one value per entry of [`Self::COLUMNS`], in the same order.
    fn push_values<'args>(&'args self, values: Values<'_, 'args>);
}

impl TableRow for TimeRow {
    const TABLE: &'static str = TIME_TABLE;
    const COLUMNS: &'static [&'static str] = &[
        "date_key",
        "weekday",
        "iso_week",
        "month_abbrev",
        "quarter",
        "year",
        "is_business_day",
    ];

    fn push_values<'args>(&'args self, mut values: Values<'_, 'args>) {
        values
            .push_bind(i64::from(self.date_key.as_u32()))
            .push_bind(self.weekday.as_str())
            .push_bind(i64::from(self.iso_week))
            .push_bind(self.month_abbrev.as_str())
            .push_bind(i64::from(self.quarter))
            .push_bind(i64::from(self.year))
            .push_bind(self.is_business_day);
    }
}

impl TableRow for Client {
    const TABLE: &'static str = CLIENT_TABLE;
    const COLUMNS: &'static [&'static str] =
        &["client_id", "client_name", "sector", "contract_type"];

    fn push_values<'args>(&'args self, mut values: Values<'_, 'args>) {
        values
            .push_bind(i64::from(self.id))
            .push_bind(self.name.as_str())
            .push_bind(self.sector.to_string())
            .push_bind(self.contract_type.to_string());
    }
}

impl TableRow for Employee {
    const TABLE: &'static str = EMPLOYEE_TABLE;
    const COLUMNS: &'static [&'static str] = &[
        "employee_id",
        "full_name",
        "role",
        "seniority",
        "hourly_cost",
        "team",
    ];

    fn push_values<'args>(&'args self, mut values: Values<'_, 'args>) {
        values
            .push_bind(i64::from(self.id))
            .push_bind(self.name.as_str())
            .push_bind(self.role.to_string())
            .push_bind(self.seniority.to_string())
            .push_bind(self.hourly_cost)
            .push_bind(self.team.to_string());
    }
}

impl TableRow for InternalProcess {
    const TABLE: &'static str = PROCESS_TABLE;
    const COLUMNS: &'static [&'static str] = &[
        "process_id",
        "process_name",
        "sdlc_phase",
        "is_mandatory",
        "documentation_link",
    ];

    fn push_values<'args>(&'args self, mut values: Values<'_, 'args>) {
        values
            .push_bind(i64::from(self.id))
            .push_bind(self.name.as_str())
            .push_bind(self.phase.to_string())
            .push_bind(self.is_mandatory)
            .push_bind(self.documentation_link.as_str());
    }
}

impl TableRow for Project {
    const TABLE: &'static str = PROJECT_TABLE;
    const COLUMNS: &'static [&'static str] = &[
        "project_id",
        "client_id",
        "project_name",
        "status",
        "estimated_effort_hours",
        "budget",
        "development_type",
        "maturity_level",
    ];

    fn push_values<'args>(&'args self, mut values: Values<'_, 'args>) {
        values
            .push_bind(i64::from(self.id))
            .push_bind(i64::from(self.client_id))
            .push_bind(self.name.as_str())
            .push_bind(self.status.to_string())
            .push_bind(i64::from(self.estimated_effort_hours))
            .push_bind(self.budget)
            .push_bind(self.development_type.to_string())
            .push_bind(i64::from(self.maturity_level));
    }
}

impl TableRow for EffortRecord {
    const TABLE: &'static str = EFFORT_TABLE;
    const COLUMNS: &'static [&'static str] = &[
        "record_id",
        "project_id",
        "date_key",
        "employee_id",
        "process_id",
        "hours",
        "cost",
    ];

    fn push_values<'args>(&'args self, mut values: Values<'_, 'args>) {
        values
            .push_bind(i64::from(self.id))
            .push_bind(i64::from(self.project_id))
            .push_bind(i64::from(self.date_key.as_u32()))
            .push_bind(i64::from(self.employee_id))
            .push_bind(i64::from(self.process_id))
            .push_bind(self.hours)
            .push_bind(self.cost);
    }
}

impl TableRow for Defect {
    const TABLE: &'static str = DEFECT_TABLE;
    const COLUMNS: &'static [&'static str] = &[
        "defect_id",
        "project_id",
        "reported_key",
        "closed_key",
        "responsible_employee_id",
        "process_id",
        "severity",
        "resolution_hours",
        "schedule_variance_days",
    ];

    fn push_values<'args>(&'args self, mut values: Values<'_, 'args>) {
        values
            .push_bind(i64::from(self.id))
            .push_bind(i64::from(self.project_id))
            .push_bind(i64::from(self.reported_key.as_u32()))
            .push_bind(i64::from(self.closed_key.as_u32()))
            .push_bind(i64::from(self.responsible_employee_id))
            .push_bind(i64::from(self.process_id))
            .push_bind(self.severity.to_string())
            .push_bind(self.resolution_hours)
            .push_bind(self.schedule_variance_days);
    }
}
