//! Maintenance service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MaintenanceServiceError {
    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}
