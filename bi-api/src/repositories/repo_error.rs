use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
    #[error("Missing table or view: {0}")]
    MissingArtifact(String),
    #[error("Unexpected value in {column}: {value}")]
    InvalidValue { column: &'static str, value: String },
}
