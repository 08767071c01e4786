use std::sync::Arc;

use storage::repository::{MaintenanceRepository, ReviewRepository, SessionRepository};
use vocab_core::model::{GroupId, SessionId, StudySession, WordId, WordReviewItem};

use crate::Clock;
use crate::error::StudyServiceError;

/// Orchestrates study activity: sessions, review outcomes, and history
/// resets. Creation timestamps come from the injected clock.
#[derive(Clone)]
pub struct StudyService {
    clock: Clock,
    sessions: Arc<dyn SessionRepository>,
    reviews: Arc<dyn ReviewRepository>,
    maintenance: Arc<dyn MaintenanceRepository>,
}

impl StudyService {
    #[must_use]
    pub fn new(
        clock: Clock,
        sessions: Arc<dyn SessionRepository>,
        reviews: Arc<dyn ReviewRepository>,
        maintenance: Arc<dyn MaintenanceRepository>,
    ) -> Self {
        Self {
            clock,
            sessions,
            reviews,
            maintenance,
        }
    }

    /// Start a study session, optionally against a group.
    ///
    /// The session is stamped with the clock's current time; that timestamp
    /// is immutable and defines session ordering everywhere else.
    ///
    /// # Errors
    ///
    /// Returns `StudyServiceError::Storage` if persistence fails.
    pub async fn start_session(
        &self,
        group_id: Option<GroupId>,
    ) -> Result<StudySession, StudyServiceError> {
        let now = self.clock.now();
        let session = self.sessions.insert_session(group_id, now).await?;
        Ok(session)
    }

    /// Fetch a session by id.
    ///
    /// Returns `Ok(None)` when the session does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StudyServiceError::Storage` if repository access fails.
    pub async fn get_session(
        &self,
        id: SessionId,
    ) -> Result<Option<StudySession>, StudyServiceError> {
        let session = self.sessions.get_session(id).await?;
        Ok(session)
    }

    /// List every session, in no guaranteed order.
    ///
    /// # Errors
    ///
    /// Returns `StudyServiceError::Storage` if repository access fails.
    pub async fn list_sessions(&self) -> Result<Vec<StudySession>, StudyServiceError> {
        let sessions = self.sessions.list_sessions().await?;
        Ok(sessions)
    }

    /// Record one correctness outcome for a word within a session.
    ///
    /// # Errors
    ///
    /// Returns `StudyServiceError::Storage` with `StorageError::NotFound`
    /// when the word or session does not exist.
    pub async fn record_review(
        &self,
        word_id: WordId,
        session_id: SessionId,
        correct: bool,
    ) -> Result<WordReviewItem, StudyServiceError> {
        let now = self.clock.now();
        let review = self
            .reviews
            .insert_review(word_id, session_id, correct, now)
            .await?;
        Ok(review)
    }

    /// List the review items recorded for one session.
    ///
    /// # Errors
    ///
    /// Returns `StudyServiceError::Storage` if repository access fails.
    pub async fn session_reviews(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<WordReviewItem>, StudyServiceError> {
        let reviews = self.reviews.reviews_for_session(session_id).await?;
        Ok(reviews)
    }

    /// Delete all sessions and reviews, keeping the word/group catalog.
    ///
    /// # Errors
    ///
    /// Returns `StudyServiceError::Storage` if repository access fails.
    pub async fn reset_history(&self) -> Result<(), StudyServiceError> {
        self.maintenance.reset_history().await?;
        Ok(())
    }

    /// Delete everything: history, words, groups, and memberships.
    ///
    /// # Errors
    ///
    /// Returns `StudyServiceError::Storage` if repository access fails.
    pub async fn reset_all(&self) -> Result<(), StudyServiceError> {
        self.maintenance.reset_all().await?;
        Ok(())
    }
}
