use serde::{Deserialize, Serialize};

use crate::model::ids::WordId;

/// A vocabulary entry in the catalog.
///
/// Fields are required by construction; there is no runtime validation
/// beyond what the type system already guarantees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub id: WordId,
    /// The word as written in the language being studied.
    pub text: String,
    pub translation: String,
    pub pronunciation: String,
    /// Example sentence illustrating usage.
    pub example: String,
}

/// Input shape for creating a word; storage assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordDraft {
    pub text: String,
    pub translation: String,
    pub pronunciation: String,
    pub example: String,
}

impl WordDraft {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        translation: impl Into<String>,
        pronunciation: impl Into<String>,
        example: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            translation: translation.into(),
            pronunciation: pronunciation.into(),
            example: example.into(),
        }
    }

    /// Attach a storage-assigned id, producing a full `Word`.
    #[must_use]
    pub fn assign_id(self, id: WordId) -> Word {
        Word {
            id,
            text: self.text,
            translation: self.translation,
            pronunciation: self.pronunciation,
            example: self.example,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_assigns_id() {
        let word = WordDraft::new("salaam", "hello", "sa-laam", "Salaam, chetor asti?")
            .assign_id(WordId::new(7));
        assert_eq!(word.id, WordId::new(7));
        assert_eq!(word.text, "salaam");
        assert_eq!(word.translation, "hello");
    }
}
