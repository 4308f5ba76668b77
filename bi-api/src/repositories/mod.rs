mod repo_error;
mod schema;
mod table_rows;
mod warehouse_repo;

pub use repo_error::RepositoryError;
pub use warehouse_repo::{SqliteWarehouseRepository, TableCount, WarehouseRepository};

#[cfg(test)]
pub(crate) use warehouse_repo::tests::{in_memory_repository, small_warehouse};
