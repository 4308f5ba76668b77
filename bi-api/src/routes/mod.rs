pub(crate) mod dashboard;
pub(crate) mod error;
pub(crate) mod predictions;
pub(crate) mod views;

pub(crate) use error::ApiError;
