use std::sync::Arc;

use crate::repositories::WarehouseRepository;

#[derive(Clone)]
pub struct AppState {
    pub warehouse_repo: Arc<dyn WarehouseRepository>,
}

impl AppState {
    pub fn new(warehouse_repo: Arc<dyn WarehouseRepository>) -> Self {
        Self { warehouse_repo }
    }
}
