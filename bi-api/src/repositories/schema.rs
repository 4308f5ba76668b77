//! DDL for the warehouse tables and the aggregate views built on top of them.

use dwh_sim::report::SCORECARD;

pub const TIME_TABLE: &str = "dim_time";
pub const CLIENT_TABLE: &str = "dim_client";
pub const EMPLOYEE_TABLE: &str = "dim_employee";
pub const PROCESS_TABLE: &str = "dim_internal_process";
pub const PROJECT_TABLE: &str = "dim_project";
pub const EFFORT_TABLE: &str = "fact_effort";
pub const DEFECT_TABLE: &str = "fact_defect";

pub const QUALITY_VIEW: &str = "quality_defects_view";
pub const PERFORMANCE_VIEW: &str = "project_performance_view";
pub const SCORECARD_VIEW: &str = "balanced_scorecard_view";

/// Dependents first, so drops never violate a foreign key.
pub const DROP_STATEMENTS: [&str; 10] = [
    "DROP VIEW IF EXISTS quality_defects_view",
    "DROP VIEW IF EXISTS project_performance_view",
    "DROP VIEW IF EXISTS balanced_scorecard_view",
    "DROP TABLE IF EXISTS fact_defect",
    "DROP TABLE IF EXISTS fact_effort",
    "DROP TABLE IF EXISTS dim_project",
    "DROP TABLE IF EXISTS dim_internal_process",
    "DROP TABLE IF EXISTS dim_employee",
    "DROP TABLE IF EXISTS dim_client",
    "DROP TABLE IF EXISTS dim_time",
];

pub const CREATE_TABLES: [&str; 7] = [
    r#"
    CREATE TABLE dim_time (
        date_key INTEGER PRIMARY KEY,
        weekday TEXT NOT NULL,
        iso_week INTEGER NOT NULL,
        month_abbrev TEXT NOT NULL,
        quarter INTEGER NOT NULL,
        year INTEGER NOT NULL,
        is_business_day INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE dim_client (
        client_id INTEGER PRIMARY KEY,
        client_name TEXT NOT NULL,
        sector TEXT NOT NULL,
        contract_type TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE dim_employee (
        employee_id INTEGER PRIMARY KEY,
        full_name TEXT NOT NULL,
        role TEXT NOT NULL,
        seniority TEXT NOT NULL,
        hourly_cost REAL NOT NULL,
        team TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE dim_internal_process (
        process_id INTEGER PRIMARY KEY,
        process_name TEXT NOT NULL,
        sdlc_phase TEXT NOT NULL,
        is_mandatory INTEGER NOT NULL,
        documentation_link TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE dim_project (
        project_id INTEGER PRIMARY KEY,
        client_id INTEGER NOT NULL REFERENCES dim_client (client_id),
        project_name TEXT NOT NULL,
        status TEXT NOT NULL,
        estimated_effort_hours INTEGER NOT NULL,
        budget REAL NOT NULL,
        development_type TEXT NOT NULL,
        maturity_level INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE fact_effort (
        record_id INTEGER PRIMARY KEY,
        project_id INTEGER NOT NULL REFERENCES dim_project (project_id),
        date_key INTEGER NOT NULL REFERENCES dim_time (date_key),
        employee_id INTEGER NOT NULL REFERENCES dim_employee (employee_id),
        process_id INTEGER NOT NULL REFERENCES dim_internal_process (process_id),
        hours REAL NOT NULL,
        cost REAL NOT NULL
    )
    "#,
    r#"
    CREATE TABLE fact_defect (
        defect_id INTEGER PRIMARY KEY,
        project_id INTEGER NOT NULL REFERENCES dim_project (project_id),
        reported_key INTEGER NOT NULL REFERENCES dim_time (date_key),
        closed_key INTEGER NOT NULL REFERENCES dim_time (date_key),
        responsible_employee_id INTEGER NOT NULL REFERENCES dim_employee (employee_id),
        process_id INTEGER NOT NULL REFERENCES dim_internal_process (process_id),
        severity TEXT NOT NULL,
        resolution_hours REAL NOT NULL,
        schedule_variance_days INTEGER NOT NULL,
        CHECK (closed_key >= reported_key),
        CHECK (resolution_hours > 0)
    )
    "#,
];

pub const CREATE_QUALITY_VIEW: &str = r#"
    CREATE VIEW quality_defects_view AS
    SELECT
        p.project_name,
        p.maturity_level,
        d.severity,
        COUNT(d.defect_id) AS total_defects,
        AVG(d.resolution_hours) AS mean_resolution_hours
    FROM fact_defect d
    JOIN dim_project p ON d.project_id = p.project_id
    GROUP BY p.project_name, p.maturity_level, d.severity
"#;

pub const CREATE_PERFORMANCE_VIEW: &str = r#"
    CREATE VIEW project_performance_view AS
    SELECT
        p.project_name,
        p.status,
        c.client_name,
        p.budget,
        SUM(e.cost) AS actual_cost,
        CASE WHEN SUM(e.cost) > p.budget THEN 'Over Budget' ELSE 'Within Budget' END
            AS financial_status
    FROM dim_project p
    JOIN fact_effort e ON p.project_id = e.project_id
    JOIN dim_client c ON p.client_id = c.client_id
    GROUP BY p.project_id, p.project_name, p.status, c.client_name, p.budget
"#;

/// The scorecard view is static; its rows come from [`SCORECARD`].
pub fn create_scorecard_view() -> String {
    let selects = SCORECARD
        .iter()
        .map(|(perspective, kpi, value)| {
            format!(
                "SELECT '{}' AS perspective, '{}' AS kpi, {:.1} AS value",
                perspective.replace('\'', "''"),
                kpi.replace('\'', "''"),
                value
            )
        })
        .collect::<Vec<_>>()
        .join(" UNION ALL ");

    format!("CREATE VIEW balanced_scorecard_view AS {selects}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scorecard_view_selects_every_row() {
        let sql = create_scorecard_view();
        assert_eq!(sql.matches("SELECT").count(), SCORECARD.len());
        assert!(sql.contains("'Learning & Growth' AS perspective"));
        assert!(sql.contains("78.5 AS value"));
    }

    #[test]
    fn every_table_is_dropped() {
        for table in [
            TIME_TABLE,
            CLIENT_TABLE,
            EMPLOYEE_TABLE,
            PROCESS_TABLE,
            PROJECT_TABLE,
            EFFORT_TABLE,
            DEFECT_TABLE,
        ] {
            assert!(DROP_STATEMENTS
                .iter()
                .any(|stmt| stmt.ends_with(&format!("TABLE IF EXISTS {table}"))));
        }
    }
}
