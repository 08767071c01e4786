use std::sync::Arc;

use storage::repository::WordRepository;
use vocab_core::model::{Word, WordDraft, WordId, WordStats};

use crate::error::WordServiceError;

/// Orchestrates the word catalog.
#[derive(Clone)]
pub struct WordService {
    words: Arc<dyn WordRepository>,
}

impl WordService {
    #[must_use]
    pub fn new(words: Arc<dyn WordRepository>) -> Self {
        Self { words }
    }

    /// Create a new word and persist it.
    ///
    /// # Errors
    ///
    /// Returns `WordServiceError::Storage` if persistence fails.
    pub async fn create_word(&self, draft: WordDraft) -> Result<Word, WordServiceError> {
        let word = self.words.insert_word(draft).await?;
        Ok(word)
    }

    /// Fetch a word by id.
    ///
    /// Returns `Ok(None)` when the word does not exist.
    ///
    /// # Errors
    ///
    /// Returns `WordServiceError::Storage` if repository access fails.
    pub async fn get_word(&self, id: WordId) -> Result<Option<Word>, WordServiceError> {
        let word = self.words.get_word(id).await?;
        Ok(word)
    }

    /// List every word in the catalog.
    ///
    /// # Errors
    ///
    /// Returns `WordServiceError::Storage` if repository access fails.
    pub async fn list_words(&self) -> Result<Vec<Word>, WordServiceError> {
        let words = self.words.list_words().await?;
        Ok(words)
    }

    /// Lifetime review statistics for one word.
    ///
    /// # Errors
    ///
    /// Returns `WordServiceError::Storage` if repository access fails.
    pub async fn word_stats(&self, id: WordId) -> Result<WordStats, WordServiceError> {
        let stats = self.words.word_stats(id).await?;
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use storage::repository::InMemoryRepository;

    #[tokio::test]
    async fn create_then_get_word() {
        let service = WordService::new(Arc::new(InMemoryRepository::new()));

        let word = service
            .create_word(WordDraft::new("salaam", "hello", "sa-laam", "Salaam!"))
            .await
            .unwrap();

        let fetched = service.get_word(word.id).await.unwrap();
        assert_eq!(fetched, Some(word));
    }

    #[tokio::test]
    async fn stats_for_unreviewed_word_are_zero() {
        let service = WordService::new(Arc::new(InMemoryRepository::new()));
        let word = service
            .create_word(WordDraft::new("kitab", "book", "ki-taab", "Een kitab ast."))
            .await
            .unwrap();

        let stats = service.word_stats(word.id).await.unwrap();
        assert_eq!(stats, WordStats::default());
    }
}
