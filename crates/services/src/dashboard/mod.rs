mod service;
mod view;

// Public API of the dashboard subsystem.
pub use crate::error::DashboardError;
pub use service::DashboardService;
pub use view::{LastSessionView, QuickStats, StudyProgress};
