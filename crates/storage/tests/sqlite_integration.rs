use chrono::Duration;
use storage::repository::{
    GroupRepository, MaintenanceRepository, ReviewRepository, SessionRepository, StorageError,
    WordRepository,
};
use storage::sqlite::SqliteRepository;
use vocab_core::model::{GroupDraft, SessionId, WordDraft, WordId, WordStats};
use vocab_core::time::fixed_now;

fn sample_word(text: &str, translation: &str) -> WordDraft {
    WordDraft::new(text, translation, "pron", "Example sentence.")
}

#[tokio::test]
async fn sqlite_roundtrip_words_and_groups() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_words?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let word = repo
        .insert_word(sample_word("salaam", "hello"))
        .await
        .unwrap();
    let fetched = repo.get_word(word.id).await.unwrap();
    assert_eq!(fetched, Some(word.clone()));

    let group = repo.insert_group(GroupDraft::new("Basics")).await.unwrap();
    repo.add_word_to_group(word.id, group.id).await.unwrap();
    // idempotent membership
    repo.add_word_to_group(word.id, group.id).await.unwrap();

    let members = repo.list_group_words(group.id).await.unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].id, word.id);

    let err = repo
        .add_word_to_group(WordId::new(999), group.id)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}

#[tokio::test]
async fn sqlite_sessions_and_review_stats() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_reviews?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let word = repo
        .insert_word(sample_word("kitab", "book"))
        .await
        .unwrap();
    let group = repo.insert_group(GroupDraft::new("Nouns")).await.unwrap();

    let now = fixed_now();
    let session = repo.insert_session(Some(group.id), now).await.unwrap();
    assert_eq!(session.group_id(), Some(group.id));
    assert_eq!(session.created_at(), now);

    let fetched = repo.get_session(session.id()).await.unwrap().unwrap();
    assert_eq!(fetched, session);

    repo.insert_review(word.id, session.id(), true, now)
        .await
        .unwrap();
    repo.insert_review(word.id, session.id(), false, now + Duration::minutes(1))
        .await
        .unwrap();

    let reviews = repo.reviews_for_session(session.id()).await.unwrap();
    assert_eq!(reviews.len(), 2);
    assert!(reviews[0].correct());
    assert!(!reviews[1].correct());

    let stats = repo.word_stats(word.id).await.unwrap();
    assert_eq!(stats, WordStats::new(1, 1));

    // a word with no reviews yields zeros, not an error
    let fresh = repo.insert_word(sample_word("aab", "water")).await.unwrap();
    assert_eq!(repo.word_stats(fresh.id).await.unwrap(), WordStats::default());
}

#[tokio::test]
async fn sqlite_review_enforces_referential_integrity() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_fk?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let err = repo
        .insert_review(WordId::new(1), SessionId::new(1), true, fixed_now())
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}

#[tokio::test]
async fn sqlite_deleting_group_nulls_session_reference() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_softref?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let group = repo.insert_group(GroupDraft::new("Doomed")).await.unwrap();
    let session = repo
        .insert_session(Some(group.id), fixed_now())
        .await
        .unwrap();

    repo.delete_group(group.id).await.unwrap();

    assert_eq!(repo.get_group(group.id).await.unwrap(), None);
    let fetched = repo.get_session(session.id()).await.unwrap().unwrap();
    assert_eq!(fetched.group_id(), None);
}

#[tokio::test]
async fn sqlite_resets_scope_correctly() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_resets?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let word = repo
        .insert_word(sample_word("naan", "bread"))
        .await
        .unwrap();
    let group = repo.insert_group(GroupDraft::new("Food")).await.unwrap();
    repo.add_word_to_group(word.id, group.id).await.unwrap();
    let session = repo
        .insert_session(Some(group.id), fixed_now())
        .await
        .unwrap();
    repo.insert_review(word.id, session.id(), true, fixed_now())
        .await
        .unwrap();

    repo.reset_history().await.unwrap();

    assert_eq!(repo.list_sessions().await.unwrap().len(), 0);
    assert_eq!(
        repo.reviews_for_session(session.id()).await.unwrap().len(),
        0
    );
    assert_eq!(repo.list_words().await.unwrap().len(), 1);
    assert_eq!(repo.list_groups().await.unwrap().len(), 1);
    assert_eq!(repo.list_group_words(group.id).await.unwrap().len(), 1);

    repo.reset_all().await.unwrap();

    assert_eq!(repo.list_words().await.unwrap().len(), 0);
    assert_eq!(repo.list_groups().await.unwrap().len(), 0);
    assert_eq!(repo.list_group_words(group.id).await.unwrap().len(), 0);
}
