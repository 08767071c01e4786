use chrono::{DateTime, Utc};
use vocab_core::model::{GroupId, SessionId, StudySession};

use super::{
    SqliteRepository,
    mapping::{id_i64, map_session_row, session_id_from_i64},
};
use crate::repository::{SessionRepository, StorageError};

fn group_id_to_i64(group_id: Option<GroupId>) -> Result<Option<i64>, StorageError> {
    group_id
        .map(|g| id_i64("group_id", g.value()))
        .transpose()
}

#[async_trait::async_trait]
impl SessionRepository for SqliteRepository {
    async fn insert_session(
        &self,
        group_id: Option<GroupId>,
        created_at: DateTime<Utc>,
    ) -> Result<StudySession, StorageError> {
        let res = sqlx::query(
            r"
                INSERT INTO study_sessions (group_id, created_at)
                VALUES (?1, ?2)
            ",
        )
        .bind(group_id_to_i64(group_id)?)
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

        let id = session_id_from_i64(res.last_insert_rowid())?;
        Ok(StudySession::new(id, group_id, created_at))
    }

    async fn get_session(&self, id: SessionId) -> Result<Option<StudySession>, StorageError> {
        let row = sqlx::query(
            r"
                SELECT id, group_id, created_at
                FROM study_sessions
                WHERE id = ?1
            ",
        )
        .bind(id_i64("session_id", id.value())?)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        row.map(|r| map_session_row(&r)).transpose()
    }

    async fn list_sessions(&self) -> Result<Vec<StudySession>, StorageError> {
        let rows = sqlx::query("SELECT id, group_id, created_at FROM study_sessions")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(map_session_row(&row)?);
        }
        Ok(out)
    }
}
