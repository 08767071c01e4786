//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `WordService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WordServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `GroupService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GroupServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `StudyService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StudyServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `DashboardService`.
///
/// The aggregator raises nothing of its own: empty data degrades to
/// zero-valued defaults, and only failed repository reads surface here.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DashboardError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
