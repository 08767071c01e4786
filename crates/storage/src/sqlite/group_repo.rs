use vocab_core::model::{Group, GroupDraft, GroupId, Word, WordId};

use super::{
    SqliteRepository,
    mapping::{group_id_from_i64, id_i64, map_group_row, map_word_row},
};
use crate::repository::{GroupRepository, StorageError};

#[async_trait::async_trait]
impl GroupRepository for SqliteRepository {
    async fn insert_group(&self, draft: GroupDraft) -> Result<Group, StorageError> {
        let res = sqlx::query("INSERT INTO word_groups (name) VALUES (?1)")
            .bind(&draft.name)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let id = group_id_from_i64(res.last_insert_rowid())?;
        Ok(draft.assign_id(id))
    }

    async fn get_group(&self, id: GroupId) -> Result<Option<Group>, StorageError> {
        let row = sqlx::query("SELECT id, name FROM word_groups WHERE id = ?1")
            .bind(id_i64("group_id", id.value())?)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        row.map(|r| map_group_row(&r)).transpose()
    }

    async fn list_groups(&self) -> Result<Vec<Group>, StorageError> {
        let rows = sqlx::query("SELECT id, name FROM word_groups")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(map_group_row(&row)?);
        }
        Ok(out)
    }

    async fn add_word_to_group(
        &self,
        word_id: WordId,
        group_id: GroupId,
    ) -> Result<(), StorageError> {
        let res = sqlx::query(
            r"
                INSERT INTO words_to_groups (word_id, group_id)
                VALUES (?1, ?2)
                ON CONFLICT(word_id, group_id) DO NOTHING
            ",
        )
        .bind(id_i64("word_id", word_id.value())?)
        .bind(id_i64("group_id", group_id.value())?)
        .execute(&self.pool)
        .await;

        match res {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => {
                Err(StorageError::NotFound)
            }
            Err(e) => Err(StorageError::Connection(e.to_string())),
        }
    }

    async fn list_group_words(&self, group_id: GroupId) -> Result<Vec<Word>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT w.id, w.text, w.translation, w.pronunciation, w.example
                FROM words w
                JOIN words_to_groups wg ON wg.word_id = w.id
                WHERE wg.group_id = ?1
            ",
        )
        .bind(id_i64("group_id", group_id.value())?)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(map_word_row(&row)?);
        }
        Ok(out)
    }

    async fn delete_group(&self, id: GroupId) -> Result<(), StorageError> {
        // Memberships cascade; referencing sessions get group_id set to NULL.
        sqlx::query("DELETE FROM word_groups WHERE id = ?1")
            .bind(id_i64("group_id", id.value())?)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(())
    }
}
