//! Scheduled Maintenance

pub mod data;
pub mod errors;
pub(crate) mod repository;
pub mod scheduler;
pub mod service;

pub use data::{Sweep, TickReport};
pub use errors::MaintenanceServiceError;
pub use scheduler::MaintenanceScheduler;
pub use service::*;
