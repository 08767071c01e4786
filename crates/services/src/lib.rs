#![forbid(unsafe_code)]

pub mod app_services;
pub mod dashboard;
pub mod error;
pub mod group_service;
pub mod study_service;
pub mod word_service;

pub use vocab_core::Clock;

pub use app_services::AppServices;
pub use dashboard::{DashboardService, LastSessionView, QuickStats, StudyProgress};
pub use error::{
    AppServicesError, DashboardError, GroupServiceError, StudyServiceError, WordServiceError,
};
pub use group_service::GroupService;
pub use study_service::StudyService;
pub use word_service::WordService;
