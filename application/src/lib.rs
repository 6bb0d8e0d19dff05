pub mod admin_service;
pub mod error;
pub mod ordering_service;
pub mod scheduler;

pub use admin_service::{AdminService, DashboardSnapshot, RefreshOutcome};
pub use error::AppError;
pub use ordering_service::{Action, OrderingService};
pub use scheduler::RefreshScheduler;
