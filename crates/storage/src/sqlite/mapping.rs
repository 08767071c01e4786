use sqlx::Row;
use vocab_core::model::{
    Group, GroupId, ReviewId, SessionId, StudySession, Word, WordId, WordReviewItem,
};

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn i64_to_u64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

pub(crate) fn id_i64(field: &'static str, v: u64) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

pub(crate) fn word_id_from_i64(v: i64) -> Result<WordId, StorageError> {
    Ok(WordId::new(i64_to_u64("word_id", v)?))
}

pub(crate) fn group_id_from_i64(v: i64) -> Result<GroupId, StorageError> {
    Ok(GroupId::new(i64_to_u64("group_id", v)?))
}

pub(crate) fn session_id_from_i64(v: i64) -> Result<SessionId, StorageError> {
    Ok(SessionId::new(i64_to_u64("session_id", v)?))
}

pub(crate) fn review_id_from_i64(v: i64) -> Result<ReviewId, StorageError> {
    Ok(ReviewId::new(i64_to_u64("review_id", v)?))
}

pub(crate) fn map_word_row(row: &sqlx::sqlite::SqliteRow) -> Result<Word, StorageError> {
    Ok(Word {
        id: word_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        text: row.try_get("text").map_err(ser)?,
        translation: row.try_get("translation").map_err(ser)?,
        pronunciation: row.try_get("pronunciation").map_err(ser)?,
        example: row.try_get("example").map_err(ser)?,
    })
}

pub(crate) fn map_group_row(row: &sqlx::sqlite::SqliteRow) -> Result<Group, StorageError> {
    Ok(Group {
        id: group_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        name: row.try_get("name").map_err(ser)?,
    })
}

pub(crate) fn map_session_row(row: &sqlx::sqlite::SqliteRow) -> Result<StudySession, StorageError> {
    let group_id = row
        .try_get::<Option<i64>, _>("group_id")
        .map_err(ser)?
        .map(group_id_from_i64)
        .transpose()?;

    Ok(StudySession::new(
        session_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        group_id,
        row.try_get("created_at").map_err(ser)?,
    ))
}

pub(crate) fn map_review_row(row: &sqlx::sqlite::SqliteRow) -> Result<WordReviewItem, StorageError> {
    Ok(WordReviewItem::new(
        review_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        word_id_from_i64(row.try_get::<i64, _>("word_id").map_err(ser)?)?,
        session_id_from_i64(row.try_get::<i64, _>("session_id").map_err(ser)?)?,
        row.try_get("correct").map_err(ser)?,
        row.try_get("created_at").map_err(ser)?,
    ))
}
