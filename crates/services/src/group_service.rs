use std::sync::Arc;

use storage::repository::GroupRepository;
use vocab_core::model::{Group, GroupDraft, GroupId, Word, WordId};

use crate::error::GroupServiceError;

/// Orchestrates groups and their word membership.
#[derive(Clone)]
pub struct GroupService {
    groups: Arc<dyn GroupRepository>,
}

impl GroupService {
    #[must_use]
    pub fn new(groups: Arc<dyn GroupRepository>) -> Self {
        Self { groups }
    }

    /// Create a new group and persist it.
    ///
    /// # Errors
    ///
    /// Returns `GroupServiceError::Storage` if persistence fails.
    pub async fn create_group(&self, draft: GroupDraft) -> Result<Group, GroupServiceError> {
        let group = self.groups.insert_group(draft).await?;
        Ok(group)
    }

    /// Fetch a group by id.
    ///
    /// Returns `Ok(None)` when the group does not exist.
    ///
    /// # Errors
    ///
    /// Returns `GroupServiceError::Storage` if repository access fails.
    pub async fn get_group(&self, id: GroupId) -> Result<Option<Group>, GroupServiceError> {
        let group = self.groups.get_group(id).await?;
        Ok(group)
    }

    /// List every group.
    ///
    /// # Errors
    ///
    /// Returns `GroupServiceError::Storage` if repository access fails.
    pub async fn list_groups(&self) -> Result<Vec<Group>, GroupServiceError> {
        let groups = self.groups.list_groups().await?;
        Ok(groups)
    }

    /// Add a word to a group.
    ///
    /// # Errors
    ///
    /// Returns `GroupServiceError::Storage` with `StorageError::NotFound`
    /// when either side is missing.
    pub async fn add_word(
        &self,
        word_id: WordId,
        group_id: GroupId,
    ) -> Result<(), GroupServiceError> {
        self.groups.add_word_to_group(word_id, group_id).await?;
        Ok(())
    }

    /// List the words belonging to a group.
    ///
    /// # Errors
    ///
    /// Returns `GroupServiceError::Storage` if repository access fails.
    pub async fn list_group_words(&self, group_id: GroupId) -> Result<Vec<Word>, GroupServiceError> {
        let words = self.groups.list_group_words(group_id).await?;
        Ok(words)
    }

    /// Delete a group, leaving referencing sessions with a dangling (None)
    /// group reference.
    ///
    /// # Errors
    ///
    /// Returns `GroupServiceError::Storage` if repository access fails.
    pub async fn delete_group(&self, id: GroupId) -> Result<(), GroupServiceError> {
        self.groups.delete_group(id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use storage::repository::{InMemoryRepository, WordRepository};
    use vocab_core::model::WordDraft;

    #[tokio::test]
    async fn membership_round_trip() {
        let repo = InMemoryRepository::new();
        let word = repo
            .insert_word(WordDraft::new("naan", "bread", "naan", "Naan taaza ast."))
            .await
            .unwrap();

        let service = GroupService::new(Arc::new(repo));
        let group = service.create_group(GroupDraft::new("Food")).await.unwrap();
        service.add_word(word.id, group.id).await.unwrap();

        let members = service.list_group_words(group.id).await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].id, word.id);
    }

    #[tokio::test]
    async fn missing_group_is_none() {
        let service = GroupService::new(Arc::new(InMemoryRepository::new()));
        assert_eq!(service.get_group(GroupId::new(5)).await.unwrap(), None);
    }
}
