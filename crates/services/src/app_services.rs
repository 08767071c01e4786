use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::dashboard::DashboardService;
use crate::error::AppServicesError;
use crate::group_service::GroupService;
use crate::study_service::StudyService;
use crate::word_service::WordService;

/// Assembles app-facing services over a shared storage backend.
#[derive(Clone)]
pub struct AppServices {
    words: Arc<WordService>,
    groups: Arc<GroupService>,
    study: Arc<StudyService>,
    dashboard: Arc<DashboardService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(storage, clock))
    }

    /// Build services backed by in-memory storage, for tests and
    /// prototyping.
    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::from_storage(Storage::in_memory(), clock)
    }

    #[must_use]
    pub fn from_storage(storage: Storage, clock: Clock) -> Self {
        let words = Arc::new(WordService::new(Arc::clone(&storage.words)));
        let groups = Arc::new(GroupService::new(Arc::clone(&storage.groups)));
        let study = Arc::new(StudyService::new(
            clock,
            Arc::clone(&storage.sessions),
            Arc::clone(&storage.reviews),
            Arc::clone(&storage.maintenance),
        ));
        let dashboard = Arc::new(DashboardService::new(clock, storage));

        Self {
            words,
            groups,
            study,
            dashboard,
        }
    }

    #[must_use]
    pub fn words(&self) -> Arc<WordService> {
        Arc::clone(&self.words)
    }

    #[must_use]
    pub fn groups(&self) -> Arc<GroupService> {
        Arc::clone(&self.groups)
    }

    #[must_use]
    pub fn study(&self) -> Arc<StudyService> {
        Arc::clone(&self.study)
    }

    #[must_use]
    pub fn dashboard(&self) -> Arc<DashboardService> {
        Arc::clone(&self.dashboard)
    }
}
