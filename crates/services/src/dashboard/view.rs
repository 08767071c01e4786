use chrono::{DateTime, Utc};
use serde::Serialize;

/// Summary of the most recently created study session.
///
/// `group_name` is absent when the session had no group or the group has
/// since been deleted. Serialized field names follow the JSON contract of
/// the dashboard endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LastSessionView {
    pub group_name: Option<String>,
    pub date: DateTime<Utc>,
    pub correct: u32,
    pub total: u32,
}

/// Catalog-wide study progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyProgress {
    pub total_words: u32,
    /// Words reviewed at least once, regardless of outcome.
    pub total_studied: u32,
    /// Correct share of all lifetime reviews, as a whole percentage.
    pub mastery: u32,
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickStats {
    /// Correct share of all reviews across every session, as a whole
    /// percentage.
    pub success_rate: u32,
    pub total_sessions: u32,
    /// Label only: this is the total group count, no activity filter.
    pub active_groups: u32,
    /// Consecutive calendar days with at least one session.
    pub streak: u32,
}
