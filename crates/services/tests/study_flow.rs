use chrono::Duration;
use services::{AppServices, Clock};
use storage::repository::Storage;
use vocab_core::model::{GroupDraft, WordDraft};
use vocab_core::time::fixed_now;

fn sample_word(text: &str, translation: &str) -> WordDraft {
    WordDraft::new(text, translation, "pron", "Example sentence.")
}

#[tokio::test]
async fn one_session_scenario_drives_all_three_views() {
    let app = AppServices::in_memory(Clock::fixed(fixed_now()));

    let word = app
        .words()
        .create_word(sample_word("salaam", "hello"))
        .await
        .unwrap();
    let group = app
        .groups()
        .create_group(GroupDraft::new("Basics"))
        .await
        .unwrap();
    app.groups().add_word(word.id, group.id).await.unwrap();

    let session = app.study().start_session(Some(group.id)).await.unwrap();
    app.study()
        .record_review(word.id, session.id(), true)
        .await
        .unwrap();
    app.study()
        .record_review(word.id, session.id(), false)
        .await
        .unwrap();

    let last = app.dashboard().last_session().await.unwrap().unwrap();
    assert_eq!(last.group_name.as_deref(), Some("Basics"));
    assert_eq!(last.date, fixed_now());
    assert_eq!(last.correct, 1);
    assert_eq!(last.total, 2);

    let progress = app.dashboard().study_progress().await.unwrap();
    assert_eq!(progress.total_words, 1);
    assert_eq!(progress.total_studied, 1);
    assert_eq!(progress.mastery, 50);

    let stats = app.dashboard().quick_stats().await.unwrap();
    assert_eq!(stats.success_rate, 50);
    assert_eq!(stats.total_sessions, 1);
    assert_eq!(stats.active_groups, 1);
    assert_eq!(stats.streak, 1);
}

#[tokio::test]
async fn streak_accumulates_across_days_sharing_one_store() {
    let storage = Storage::in_memory();
    let now = fixed_now();

    // separate clocks over the same store simulate studying on past days
    let two_days_ago = AppServices::from_storage(storage.clone(), Clock::fixed(now - Duration::days(2)));
    let yesterday = AppServices::from_storage(storage.clone(), Clock::fixed(now - Duration::days(1)));
    let today = AppServices::from_storage(storage.clone(), Clock::fixed(now));

    two_days_ago.study().start_session(None).await.unwrap();
    yesterday.study().start_session(None).await.unwrap();

    // no session today yet: yesterday anchors the streak
    let stats = today.dashboard().quick_stats().await.unwrap();
    assert_eq!(stats.streak, 2);

    today.study().start_session(None).await.unwrap();
    let stats = today.dashboard().quick_stats().await.unwrap();
    assert_eq!(stats.streak, 3);
    assert_eq!(stats.total_sessions, 3);
}

#[tokio::test]
async fn stale_history_has_no_streak() {
    let storage = Storage::in_memory();
    let now = fixed_now();

    let past = AppServices::from_storage(storage.clone(), Clock::fixed(now - Duration::days(2)));
    past.study().start_session(None).await.unwrap();

    let today = AppServices::from_storage(storage, Clock::fixed(now));
    let stats = today.dashboard().quick_stats().await.unwrap();
    assert_eq!(stats.total_sessions, 1);
    assert_eq!(stats.streak, 0);
}

#[tokio::test]
async fn reset_history_returns_aggregates_to_defaults() {
    let app = AppServices::in_memory(Clock::fixed(fixed_now()));

    let word = app
        .words()
        .create_word(sample_word("kitab", "book"))
        .await
        .unwrap();
    let group = app
        .groups()
        .create_group(GroupDraft::new("Nouns"))
        .await
        .unwrap();
    let session = app.study().start_session(Some(group.id)).await.unwrap();
    app.study()
        .record_review(word.id, session.id(), true)
        .await
        .unwrap();

    app.study().reset_history().await.unwrap();

    assert_eq!(app.dashboard().last_session().await.unwrap(), None);

    let progress = app.dashboard().study_progress().await.unwrap();
    assert_eq!(progress.total_words, 1);
    assert_eq!(progress.total_studied, 0);
    assert_eq!(progress.mastery, 0);

    let stats = app.dashboard().quick_stats().await.unwrap();
    assert_eq!(stats.success_rate, 0);
    assert_eq!(stats.total_sessions, 0);
    assert_eq!(stats.streak, 0);
    // the catalog survives a history reset
    assert_eq!(stats.active_groups, 1);
    assert_eq!(app.words().list_words().await.unwrap().len(), 1);
}

#[tokio::test]
async fn deleted_group_resolves_to_absent_name() {
    let app = AppServices::in_memory(Clock::fixed(fixed_now()));

    let group = app
        .groups()
        .create_group(GroupDraft::new("Doomed"))
        .await
        .unwrap();
    app.study().start_session(Some(group.id)).await.unwrap();
    app.groups().delete_group(group.id).await.unwrap();

    let last = app.dashboard().last_session().await.unwrap().unwrap();
    assert_eq!(last.group_name, None);
}

#[tokio::test]
async fn progress_invariants_hold_with_partial_study() {
    let app = AppServices::in_memory(Clock::fixed(fixed_now()));

    let studied = app
        .words()
        .create_word(sample_word("naan", "bread"))
        .await
        .unwrap();
    for text in ["aab", "chai", "sib"] {
        app.words()
            .create_word(sample_word(text, "untranslated"))
            .await
            .unwrap();
    }

    let session = app.study().start_session(None).await.unwrap();
    app.study()
        .record_review(studied.id, session.id(), false)
        .await
        .unwrap();
    app.study()
        .record_review(studied.id, session.id(), false)
        .await
        .unwrap();

    let progress = app.dashboard().study_progress().await.unwrap();
    assert!(progress.total_studied <= progress.total_words);
    assert_eq!(progress.total_words, 4);
    // studied means reviewed at least once, regardless of outcome
    assert_eq!(progress.total_studied, 1);
    assert_eq!(progress.mastery, 0);
    assert!(progress.mastery <= 100);

    let stats = app.dashboard().quick_stats().await.unwrap();
    assert_eq!(stats.success_rate, 0);
    assert!(stats.success_rate <= 100);
}
