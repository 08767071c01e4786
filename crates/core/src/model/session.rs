use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{GroupId, SessionId};

/// A single study session.
///
/// The group reference is soft: the group may be deleted after the session
/// was recorded, in which case lookups resolve to `None` rather than an
/// error. `created_at` is assigned once at creation and never changes;
/// session ordering is always derived from it, not from fetch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySession {
    id: SessionId,
    group_id: Option<GroupId>,
    created_at: DateTime<Utc>,
}

impl StudySession {
    #[must_use]
    pub fn new(id: SessionId, group_id: Option<GroupId>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            group_id,
            created_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn group_id(&self) -> Option<GroupId> {
        self.group_id
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
