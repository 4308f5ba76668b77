use std::str::FromStr;

use async_trait::async_trait;
use dwh_sim::domain::{ProjectStatus, Severity};
use dwh_sim::report::{FinancialStatus, PerformanceRow, QualityRow, ScorecardRow};
use dwh_sim::Warehouse;
use serde::Serialize;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

use super::repo_error::RepositoryError;
use super::schema::{self, *};
use super::table_rows::TableRow;

/// Rows per multi-row INSERT, well below SQLite's bind-variable limit.
const INSERT_BATCH_ROWS: usize = 500;

#[async_trait]
pub trait WarehouseRepository: Send + Sync {
    /// Drop and recreate every table and view, then load `warehouse`.
    /// Either everything is replaced or nothing changes.
    async fn replace_warehouse(
        &self,
        warehouse: &Warehouse,
    ) -> Result<Vec<TableCount>, RepositoryError>;
    async fn quality_view(&self) -> Result<Vec<QualityRow>, RepositoryError>;
    async fn performance_view(&self) -> Result<Vec<PerformanceRow>, RepositoryError>;
    async fn scorecard_view(&self) -> Result<Vec<ScorecardRow>, RepositoryError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableCount {
    pub table: &'static str,
    pub rows: usize,
}

pub struct SqliteWarehouseRepository {
    pool: SqlitePool,
}

impl SqliteWarehouseRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// First of `names` that is neither a table nor a view.
    async fn ensure_present(&self, names: &[&str]) -> Result<(), RepositoryError> {
        for name in names {
            let found: Option<String> = sqlx::query_scalar(
                "SELECT name FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?",
            )
            .bind(*name)
            .fetch_optional(&self.pool)
            .await?;

            if found.is_none() {
                return Err(RepositoryError::MissingArtifact(name.to_string()));
            }
        }
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct QualityRecord {
    project_name: String,
    maturity_level: i64,
    severity: String,
    total_defects: i64,
    mean_resolution_hours: f64,
}

#[derive(sqlx::FromRow)]
struct PerformanceRecord {
    project_name: String,
    status: String,
    client_name: String,
    budget: f64,
    actual_cost: f64,
    financial_status: String,
}

#[derive(sqlx::FromRow)]
struct ScorecardRecord {
    perspective: String,
    kpi: String,
    value: f64,
}

fn parse_label<T: FromStr>(column: &'static str, value: String) -> Result<T, RepositoryError> {
    T::from_str(&value).map_err(|_| RepositoryError::InvalidValue { column, value })
}

impl TryFrom<QualityRecord> for QualityRow {
    type Error = RepositoryError;

    fn try_from(record: QualityRecord) -> Result<Self, Self::Error> {
        Ok(QualityRow {
            project_name: record.project_name,
            maturity_level: u8::try_from(record.maturity_level).map_err(|_| {
                RepositoryError::InvalidValue {
                    column: "maturity_level",
                    value: record.maturity_level.to_string(),
                }
            })?,
            severity: parse_label::<Severity>("severity", record.severity)?,
            total_defects: record.total_defects.max(0) as u32,
            mean_resolution_hours: record.mean_resolution_hours,
        })
    }
}

impl TryFrom<PerformanceRecord> for PerformanceRow {
    type Error = RepositoryError;

    fn try_from(record: PerformanceRecord) -> Result<Self, Self::Error> {
        Ok(PerformanceRow {
            project_name: record.project_name,
            status: parse_label::<ProjectStatus>("status", record.status)?,
            client_name: record.client_name,
            budget: record.budget,
            actual_cost: record.actual_cost,
            financial_status: parse_label::<FinancialStatus>(
                "financial_status",
                record.financial_status,
            )?,
        })
    }
}

async fn insert_all<T: TableRow>(
    conn: &mut SqliteConnection,
    rows: &[T],
) -> Result<TableCount, RepositoryError> {
    for chunk in rows.chunks(INSERT_BATCH_ROWS) {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "INSERT INTO {} ({}) ",
            T::TABLE,
            T::COLUMNS.join(", ")
        ));
        builder.push_values(chunk, |values, row| row.push_values(values));
        builder.build().execute(&mut *conn).await?;
    }

    Ok(TableCount {
        table: T::TABLE,
        rows: rows.len(),
    })
}

#[async_trait]
impl WarehouseRepository for SqliteWarehouseRepository {
    async fn replace_warehouse(
        &self,
        warehouse: &Warehouse,
    ) -> Result<Vec<TableCount>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        for statement in DROP_STATEMENTS.iter().chain(CREATE_TABLES.iter()) {
            sqlx::query(statement).execute(&mut *tx).await?;
        }

        let counts = vec![
            insert_all(&mut tx, &warehouse.time).await?,
            insert_all(&mut tx, &warehouse.clients).await?,
            insert_all(&mut tx, &warehouse.employees).await?,
            insert_all(&mut tx, &warehouse.processes).await?,
            insert_all(&mut tx, &warehouse.projects).await?,
            insert_all(&mut tx, &warehouse.effort).await?,
            insert_all(&mut tx, &warehouse.defects).await?,
        ];

        sqlx::query(CREATE_QUALITY_VIEW).execute(&mut *tx).await?;
        sqlx::query(CREATE_PERFORMANCE_VIEW)
            .execute(&mut *tx)
            .await?;
        sqlx::query(&schema::create_scorecard_view())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        for count in &counts {
            tracing::info!(table = count.table, rows = count.rows, "Loaded table");
        }
        Ok(counts)
    }

    async fn quality_view(&self) -> Result<Vec<QualityRow>, RepositoryError> {
        self.ensure_present(&[DEFECT_TABLE, PROJECT_TABLE, QUALITY_VIEW])
            .await?;

        let records = sqlx::query_as::<_, QualityRecord>(
            r#"
            SELECT project_name, maturity_level, severity, total_defects, mean_resolution_hours
            FROM quality_defects_view
            ORDER BY project_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut rows = records
            .into_iter()
            .map(QualityRow::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        rows.sort_by(|a, b| {
            a.project_name
                .cmp(&b.project_name)
                .then(a.severity.cmp(&b.severity))
        });
        Ok(rows)
    }

    async fn performance_view(&self) -> Result<Vec<PerformanceRow>, RepositoryError> {
        self.ensure_present(&[PROJECT_TABLE, EFFORT_TABLE, CLIENT_TABLE, PERFORMANCE_VIEW])
            .await?;

        let records = sqlx::query_as::<_, PerformanceRecord>(
            r#"
            SELECT project_name, status, client_name, budget, actual_cost, financial_status
            FROM project_performance_view
            ORDER BY project_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        records.into_iter().map(PerformanceRow::try_from).collect()
    }

    async fn scorecard_view(&self) -> Result<Vec<ScorecardRow>, RepositoryError> {
        self.ensure_present(&[SCORECARD_VIEW]).await?;

        let records = sqlx::query_as::<_, ScorecardRecord>(
            "SELECT perspective, kpi, value FROM balanced_scorecard_view",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records
            .into_iter()
            .map(|record| ScorecardRow {
                perspective: record.perspective,
                kpi: record.kpi,
                value: record.value,
            })
            .collect())
    }
}
