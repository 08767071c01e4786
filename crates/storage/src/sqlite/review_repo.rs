use chrono::{DateTime, Utc};
use vocab_core::model::{SessionId, WordId, WordReviewItem};

use super::{
    SqliteRepository,
    mapping::{id_i64, map_review_row, review_id_from_i64},
};
use crate::repository::{MaintenanceRepository, ReviewRepository, StorageError};

#[async_trait::async_trait]
impl ReviewRepository for SqliteRepository {
    async fn insert_review(
        &self,
        word_id: WordId,
        session_id: SessionId,
        correct: bool,
        created_at: DateTime<Utc>,
    ) -> Result<WordReviewItem, StorageError> {
        let res = sqlx::query(
            r"
                INSERT INTO word_review_items (word_id, session_id, correct, created_at)
                VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(id_i64("word_id", word_id.value())?)
        .bind(id_i64("session_id", session_id.value())?)
        .bind(correct)
        .bind(created_at)
        .execute(&self.pool)
        .await;

        let res = match res {
            Ok(res) => res,
            Err(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => {
                return Err(StorageError::NotFound);
            }
            Err(e) => return Err(StorageError::Connection(e.to_string())),
        };

        let id = review_id_from_i64(res.last_insert_rowid())?;
        Ok(WordReviewItem::new(
            id, word_id, session_id, correct, created_at,
        ))
    }

    async fn reviews_for_session(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<WordReviewItem>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT id, word_id, session_id, correct, created_at
                FROM word_review_items
                WHERE session_id = ?1
                ORDER BY created_at ASC, id ASC
            ",
        )
        .bind(id_i64("session_id", session_id.value())?)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(map_review_row(&row)?);
        }
        Ok(out)
    }
}

#[async_trait::async_trait]
impl MaintenanceRepository for SqliteRepository {
    async fn reset_history(&self) -> Result<(), StorageError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        // Reviews first so the session FK is never dangling mid-transaction.
        sqlx::query("DELETE FROM word_review_items")
            .execute(&mut *tx)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        sqlx::query("DELETE FROM study_sessions")
            .execute(&mut *tx)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(())
    }

    async fn reset_all(&self) -> Result<(), StorageError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        for table in [
            "word_review_items",
            "study_sessions",
            "words_to_groups",
            "words",
            "word_groups",
        ] {
            sqlx::query(&format!("DELETE FROM {table}"))
                .execute(&mut *tx)
                .await
                .map_err(|e| StorageError::Connection(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(())
    }
}
