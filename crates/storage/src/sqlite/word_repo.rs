use sqlx::Row;
use vocab_core::model::{Word, WordDraft, WordId, WordStats};

use super::{
    SqliteRepository,
    mapping::{id_i64, map_word_row, ser, word_id_from_i64},
};
use crate::repository::{StorageError, WordRepository};

#[async_trait::async_trait]
impl WordRepository for SqliteRepository {
    async fn insert_word(&self, draft: WordDraft) -> Result<Word, StorageError> {
        let res = sqlx::query(
            r"
                INSERT INTO words (text, translation, pronunciation, example)
                VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(&draft.text)
        .bind(&draft.translation)
        .bind(&draft.pronunciation)
        .bind(&draft.example)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let id = word_id_from_i64(res.last_insert_rowid())?;
        Ok(draft.assign_id(id))
    }

    async fn get_word(&self, id: WordId) -> Result<Option<Word>, StorageError> {
        let row = sqlx::query(
            r"
                SELECT id, text, translation, pronunciation, example
                FROM words
                WHERE id = ?1
            ",
        )
        .bind(id_i64("word_id", id.value())?)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        row.map(|r| map_word_row(&r)).transpose()
    }

    async fn list_words(&self) -> Result<Vec<Word>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT id, text, translation, pronunciation, example
                FROM words
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(map_word_row(&row)?);
        }
        Ok(out)
    }

    async fn word_stats(&self, id: WordId) -> Result<WordStats, StorageError> {
        let row = sqlx::query(
            r"
                SELECT
                    COALESCE(SUM(CASE WHEN correct = 1 THEN 1 ELSE 0 END), 0) AS correct,
                    COALESCE(SUM(CASE WHEN correct = 1 THEN 0 ELSE 1 END), 0) AS incorrect
                FROM word_review_items
                WHERE word_id = ?1
            ",
        )
        .bind(id_i64("word_id", id.value())?)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let correct: i64 = row.try_get("correct").map_err(ser)?;
        let incorrect: i64 = row.try_get("incorrect").map_err(ser)?;
        Ok(WordStats::new(
            u32::try_from(correct).map_err(ser)?,
            u32::try_from(incorrect).map_err(ser)?,
        ))
    }
}
