use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{ReviewId, SessionId, WordId};

/// One correctness outcome for a word within a study session.
///
/// Review items are append-only: they are never mutated or individually
/// deleted, only cleared wholesale by a history reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordReviewItem {
    id: ReviewId,
    word_id: WordId,
    session_id: SessionId,
    correct: bool,
    created_at: DateTime<Utc>,
}

impl WordReviewItem {
    #[must_use]
    pub fn new(
        id: ReviewId,
        word_id: WordId,
        session_id: SessionId,
        correct: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            word_id,
            session_id,
            correct,
            created_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> ReviewId {
        self.id
    }

    #[must_use]
    pub fn word_id(&self) -> WordId {
        self.word_id
    }

    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    #[must_use]
    pub fn correct(&self) -> bool {
        self.correct
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Lifetime correctness counts for a single word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordStats {
    pub correct: u32,
    pub incorrect: u32,
}

impl WordStats {
    #[must_use]
    pub fn new(correct: u32, incorrect: u32) -> Self {
        Self { correct, incorrect }
    }

    /// Total number of reviews recorded for the word.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.correct.saturating_add(self.incorrect)
    }

    /// True when the word has been reviewed at least once, regardless of
    /// outcome.
    #[must_use]
    pub fn is_studied(&self) -> bool {
        self.total() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_total_sums_both_outcomes() {
        let stats = WordStats::new(3, 2);
        assert_eq!(stats.total(), 5);
        assert!(stats.is_studied());
    }

    #[test]
    fn unreviewed_word_is_not_studied() {
        let stats = WordStats::default();
        assert_eq!(stats.total(), 0);
        assert!(!stats.is_studied());
    }

    #[test]
    fn all_incorrect_still_counts_as_studied() {
        let stats = WordStats::new(0, 4);
        assert!(stats.is_studied());
    }
}
