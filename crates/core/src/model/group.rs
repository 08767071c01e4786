use serde::{Deserialize, Serialize};

use crate::model::ids::GroupId;

/// A named grouping of words.
///
/// Membership is a many-to-many relation kept in the persistence layer;
/// the entity itself only carries identity and a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
}

/// Input shape for creating a group; storage assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDraft {
    pub name: String,
}

impl GroupDraft {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Attach a storage-assigned id, producing a full `Group`.
    #[must_use]
    pub fn assign_id(self, id: GroupId) -> Group {
        Group {
            id,
            name: self.name,
        }
    }
}
