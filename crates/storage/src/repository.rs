use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use vocab_core::model::{
    Group, GroupDraft, GroupId, ReviewId, SessionId, StudySession, Word, WordDraft, WordId,
    WordReviewItem, WordStats,
};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for the word catalog.
#[async_trait]
pub trait WordRepository: Send + Sync {
    /// Persist a new word, assigning its id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the word cannot be stored.
    async fn insert_word(&self, draft: WordDraft) -> Result<Word, StorageError>;

    /// Fetch a word by id. Returns `Ok(None)` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if repository access fails.
    async fn get_word(&self, id: WordId) -> Result<Option<Word>, StorageError>;

    /// List every word in the catalog. Ordering is not guaranteed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if repository access fails.
    async fn list_words(&self) -> Result<Vec<Word>, StorageError>;

    /// Lifetime correct/incorrect counts for one word.
    ///
    /// A word with no reviews yields zeroed counts, not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if repository access fails.
    async fn word_stats(&self, id: WordId) -> Result<WordStats, StorageError>;
}

/// Repository contract for groups and their word membership.
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Persist a new group, assigning its id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the group cannot be stored.
    async fn insert_group(&self, draft: GroupDraft) -> Result<Group, StorageError>;

    /// Fetch a group by id. Returns `Ok(None)` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if repository access fails.
    async fn get_group(&self, id: GroupId) -> Result<Option<Group>, StorageError>;

    /// List every group. Ordering is not guaranteed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if repository access fails.
    async fn list_groups(&self) -> Result<Vec<Group>, StorageError>;

    /// Add a word to a group's membership.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if either side is missing, or other
    /// storage errors.
    async fn add_word_to_group(
        &self,
        word_id: WordId,
        group_id: GroupId,
    ) -> Result<(), StorageError>;

    /// List the words belonging to a group.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if repository access fails.
    async fn list_group_words(&self, group_id: GroupId) -> Result<Vec<Word>, StorageError>;

    /// Delete a group, detaching any sessions that referenced it.
    ///
    /// Sessions keep running with an unresolvable group reference; the
    /// dashboard resolves those to an absent group name.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if repository access fails.
    async fn delete_group(&self, id: GroupId) -> Result<(), StorageError>;
}

/// Repository contract for study sessions.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persist a new session, assigning its id. The caller supplies
    /// `created_at` from its clock; it is immutable thereafter.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the session cannot be stored.
    async fn insert_session(
        &self,
        group_id: Option<GroupId>,
        created_at: DateTime<Utc>,
    ) -> Result<StudySession, StorageError>;

    /// Fetch a session by id. Returns `Ok(None)` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if repository access fails.
    async fn get_session(&self, id: SessionId) -> Result<Option<StudySession>, StorageError>;

    /// List every session. Ordering is not guaranteed; callers must sort by
    /// `created_at` when order matters.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if repository access fails.
    async fn list_sessions(&self) -> Result<Vec<StudySession>, StorageError>;
}

/// Repository contract for the append-only review history.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Record one correctness outcome for a word within a session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the word or session is missing
    /// (referential integrity is enforced here, not by callers), or other
    /// storage errors.
    async fn insert_review(
        &self,
        word_id: WordId,
        session_id: SessionId,
        correct: bool,
        created_at: DateTime<Utc>,
    ) -> Result<WordReviewItem, StorageError>;

    /// List the review items recorded for one session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if repository access fails.
    async fn reviews_for_session(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<WordReviewItem>, StorageError>;
}

/// Bulk reset operations.
#[async_trait]
pub trait MaintenanceRepository: Send + Sync {
    /// Delete all sessions and reviews, keeping words and groups.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if repository access fails.
    async fn reset_history(&self) -> Result<(), StorageError>;

    /// Delete everything: history, words, groups, and memberships.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if repository access fails.
    async fn reset_all(&self) -> Result<(), StorageError>;
}

#[derive(Default)]
struct MemState {
    words: HashMap<WordId, Word>,
    groups: HashMap<GroupId, Group>,
    memberships: Vec<(WordId, GroupId)>,
    sessions: HashMap<SessionId, StudySession>,
    reviews: HashMap<ReviewId, WordReviewItem>,
    next_word: u64,
    next_group: u64,
    next_session: u64,
    next_review: u64,
}

impl MemState {
    fn next_word_id(&mut self) -> WordId {
        self.next_word += 1;
        WordId::new(self.next_word)
    }

    fn next_group_id(&mut self) -> GroupId {
        self.next_group += 1;
        GroupId::new(self.next_group)
    }

    fn next_session_id(&mut self) -> SessionId {
        self.next_session += 1;
        SessionId::new(self.next_session)
    }

    fn next_review_id(&mut self) -> ReviewId {
        self.next_review += 1;
        ReviewId::new(self.next_review)
    }
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<MemState>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> Result<MutexGuard<'_, MemState>, StorageError> {
        self.state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

#[async_trait]
impl WordRepository for InMemoryRepository {
    async fn insert_word(&self, draft: WordDraft) -> Result<Word, StorageError> {
        let mut state = self.state()?;
        let id = state.next_word_id();
        let word = draft.assign_id(id);
        state.words.insert(id, word.clone());
        Ok(word)
    }

    async fn get_word(&self, id: WordId) -> Result<Option<Word>, StorageError> {
        let state = self.state()?;
        Ok(state.words.get(&id).cloned())
    }

    async fn list_words(&self) -> Result<Vec<Word>, StorageError> {
        let state = self.state()?;
        Ok(state.words.values().cloned().collect())
    }

    async fn word_stats(&self, id: WordId) -> Result<WordStats, StorageError> {
        let state = self.state()?;
        let mut stats = WordStats::default();
        for review in state.reviews.values().filter(|r| r.word_id() == id) {
            if review.correct() {
                stats.correct += 1;
            } else {
                stats.incorrect += 1;
            }
        }
        Ok(stats)
    }
}

#[async_trait]
impl GroupRepository for InMemoryRepository {
    async fn insert_group(&self, draft: GroupDraft) -> Result<Group, StorageError> {
        let mut state = self.state()?;
        let id = state.next_group_id();
        let group = draft.assign_id(id);
        state.groups.insert(id, group.clone());
        Ok(group)
    }

    async fn get_group(&self, id: GroupId) -> Result<Option<Group>, StorageError> {
        let state = self.state()?;
        Ok(state.groups.get(&id).cloned())
    }

    async fn list_groups(&self) -> Result<Vec<Group>, StorageError> {
        let state = self.state()?;
        Ok(state.groups.values().cloned().collect())
    }

    async fn add_word_to_group(
        &self,
        word_id: WordId,
        group_id: GroupId,
    ) -> Result<(), StorageError> {
        let mut state = self.state()?;
        if !state.words.contains_key(&word_id) || !state.groups.contains_key(&group_id) {
            return Err(StorageError::NotFound);
        }
        if !state.memberships.contains(&(word_id, group_id)) {
            state.memberships.push((word_id, group_id));
        }
        Ok(())
    }

    async fn list_group_words(&self, group_id: GroupId) -> Result<Vec<Word>, StorageError> {
        let state = self.state()?;
        let words = state
            .memberships
            .iter()
            .filter(|(_, g)| *g == group_id)
            .filter_map(|(w, _)| state.words.get(w).cloned())
            .collect();
        Ok(words)
    }

    async fn delete_group(&self, id: GroupId) -> Result<(), StorageError> {
        let mut state = self.state()?;
        state.groups.remove(&id);
        state.memberships.retain(|(_, g)| *g != id);
        Ok(())
    }
}

#[async_trait]
impl SessionRepository for InMemoryRepository {
    async fn insert_session(
        &self,
        group_id: Option<GroupId>,
        created_at: DateTime<Utc>,
    ) -> Result<StudySession, StorageError> {
        let mut state = self.state()?;
        let id = state.next_session_id();
        let session = StudySession::new(id, group_id, created_at);
        state.sessions.insert(id, session);
        Ok(session)
    }

    async fn get_session(&self, id: SessionId) -> Result<Option<StudySession>, StorageError> {
        let state = self.state()?;
        Ok(state.sessions.get(&id).copied())
    }

    async fn list_sessions(&self) -> Result<Vec<StudySession>, StorageError> {
        let state = self.state()?;
        Ok(state.sessions.values().copied().collect())
    }
}

#[async_trait]
impl ReviewRepository for InMemoryRepository {
    async fn insert_review(
        &self,
        word_id: WordId,
        session_id: SessionId,
        correct: bool,
        created_at: DateTime<Utc>,
    ) -> Result<WordReviewItem, StorageError> {
        let mut state = self.state()?;
        if !state.words.contains_key(&word_id) || !state.sessions.contains_key(&session_id) {
            return Err(StorageError::NotFound);
        }
        let id = state.next_review_id();
        let review = WordReviewItem::new(id, word_id, session_id, correct, created_at);
        state.reviews.insert(id, review);
        Ok(review)
    }

    async fn reviews_for_session(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<WordReviewItem>, StorageError> {
        let state = self.state()?;
        Ok(state
            .reviews
            .values()
            .filter(|r| r.session_id() == session_id)
            .copied()
            .collect())
    }
}

#[async_trait]
impl MaintenanceRepository for InMemoryRepository {
    async fn reset_history(&self) -> Result<(), StorageError> {
        let mut state = self.state()?;
        state.sessions.clear();
        state.reviews.clear();
        state.next_session = 0;
        state.next_review = 0;
        Ok(())
    }

    async fn reset_all(&self) -> Result<(), StorageError> {
        let mut state = self.state()?;
        *state = MemState::default();
        Ok(())
    }
}

/// Aggregates the entity repositories behind trait objects for easy backend
/// swapping.
#[derive(Clone)]
pub struct Storage {
    pub words: Arc<dyn WordRepository>,
    pub groups: Arc<dyn GroupRepository>,
    pub sessions: Arc<dyn SessionRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub maintenance: Arc<dyn MaintenanceRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        Self {
            words: Arc::new(repo.clone()),
            groups: Arc::new(repo.clone()),
            sessions: Arc::new(repo.clone()),
            reviews: Arc::new(repo.clone()),
            maintenance: Arc::new(repo),
        }
    }
}
