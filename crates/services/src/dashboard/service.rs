use std::collections::HashSet;

use chrono::NaiveDate;
use futures::future::try_join_all;

use storage::repository::Storage;

use super::view::{LastSessionView, QuickStats, StudyProgress};
use crate::Clock;
use crate::error::DashboardError;

/// Derives the dashboard read models from the full study history.
///
/// Stateless: every call recomputes from current data, so the three
/// operations are pure reads and safe to call concurrently. Empty history
/// degrades to zero-valued defaults; only repository failures error, and a
/// single failed read aborts the whole computation.
#[derive(Clone)]
pub struct DashboardService {
    clock: Clock,
    storage: Storage,
}

fn count_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Whole-number percentage of `part` in `whole`, rounding half up.
/// Zero when `whole` is zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percentage(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    (f64::from(part) / f64::from(whole) * 100.0).round() as u32
}

/// Consecutive-day study streak over the set of calendar days with at least
/// one session.
///
/// Counts the run of consecutive days ending at yesterday, plus one when
/// today has a session. A session today is not required to keep a streak
/// alive, but neither today nor yesterday present means no streak at all.
fn streak_days(session_days: &HashSet<NaiveDate>, today: NaiveDate) -> u32 {
    let Some(yesterday) = today.pred_opt() else {
        return 0;
    };

    let mut run = 0_u32;
    let mut day = yesterday;
    while session_days.contains(&day) {
        run += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }

    let today_active = u32::from(session_days.contains(&today));
    if today_active == 0 && run == 0 {
        0
    } else {
        today_active + run
    }
}

impl DashboardService {
    #[must_use]
    pub fn new(clock: Clock, storage: Storage) -> Self {
        Self { clock, storage }
    }

    /// Summary of the most recently created session, or `None` when no
    /// session exists.
    ///
    /// "Last" means maximum creation timestamp (ties broken by id), never
    /// the incidental order the repository returned.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Storage` if any repository read fails.
    pub async fn last_session(&self) -> Result<Option<LastSessionView>, DashboardError> {
        let sessions = self.storage.sessions.list_sessions().await?;
        let Some(last) = sessions
            .into_iter()
            .max_by_key(|s| (s.created_at(), s.id()))
        else {
            return Ok(None);
        };

        let group_name = match last.group_id() {
            Some(group_id) => self
                .storage
                .groups
                .get_group(group_id)
                .await?
                .map(|g| g.name),
            None => None,
        };

        let reviews = self.storage.reviews.reviews_for_session(last.id()).await?;
        let correct = reviews.iter().filter(|r| r.correct()).count();

        Ok(Some(LastSessionView {
            group_name,
            date: last.created_at(),
            correct: count_u32(correct),
            total: count_u32(reviews.len()),
        }))
    }

    /// Catalog-wide study progress.
    ///
    /// Per-word statistics are independent reads: they fan out and join
    /// before the reduction, rather than accumulating in a sequential loop.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Storage` if any repository read fails.
    pub async fn study_progress(&self) -> Result<StudyProgress, DashboardError> {
        let words = self.storage.words.list_words().await?;
        let stats = try_join_all(words.iter().map(|w| self.storage.words.word_stats(w.id)))
            .await?;

        let total_studied = stats.iter().filter(|s| s.is_studied()).count();
        let total_reviews = stats.iter().fold(0_u32, |acc, s| acc.saturating_add(s.total()));
        let correct_reviews = stats
            .iter()
            .fold(0_u32, |acc, s| acc.saturating_add(s.correct));

        Ok(StudyProgress {
            total_words: count_u32(words.len()),
            total_studied: count_u32(total_studied),
            mastery: percentage(correct_reviews, total_reviews),
        })
    }

    /// Headline numbers: success rate, session count, group count, and the
    /// consecutive-day streak.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Storage` if any repository read fails.
    pub async fn quick_stats(&self) -> Result<QuickStats, DashboardError> {
        let sessions = self.storage.sessions.list_sessions().await?;
        let groups = self.storage.groups.list_groups().await?;

        let per_session = try_join_all(
            sessions
                .iter()
                .map(|s| self.storage.reviews.reviews_for_session(s.id())),
        )
        .await?;

        let mut total_correct = 0_u32;
        let mut total_reviews = 0_u32;
        for reviews in &per_session {
            let correct = reviews.iter().filter(|r| r.correct()).count();
            total_correct = total_correct.saturating_add(count_u32(correct));
            total_reviews = total_reviews.saturating_add(count_u32(reviews.len()));
        }

        let session_days: HashSet<NaiveDate> = sessions
            .iter()
            .map(|s| s.created_at().date_naive())
            .collect();
        let today = self.clock.now().date_naive();

        Ok(QuickStats {
            success_rate: percentage(total_correct, total_reviews),
            total_sessions: count_u32(sessions.len()),
            // "active" is presentation wording; no activity filter applies
            active_groups: count_u32(groups.len()),
            streak: streak_days(&session_days, today),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Duration;
    use storage::repository::{
        InMemoryRepository, ReviewRepository, SessionRepository, WordRepository,
    };
    use vocab_core::model::WordDraft;
    use vocab_core::time::{fixed_clock, fixed_now};

    fn days(offsets: &[i64]) -> HashSet<NaiveDate> {
        let today = fixed_now().date_naive();
        offsets
            .iter()
            .map(|off| today - chrono::Days::new(u64::try_from(*off).unwrap()))
            .collect()
    }

    #[test]
    fn streak_is_zero_without_today_or_yesterday() {
        let today = fixed_now().date_naive();
        assert_eq!(streak_days(&days(&[2]), today), 0);
        assert_eq!(streak_days(&HashSet::new(), today), 0);
    }

    #[test]
    fn streak_counts_today_alone() {
        let today = fixed_now().date_naive();
        assert_eq!(streak_days(&days(&[0]), today), 1);
    }

    #[test]
    fn streak_survives_a_missed_today() {
        let today = fixed_now().date_naive();
        assert_eq!(streak_days(&days(&[1, 2]), today), 2);
    }

    #[test]
    fn streak_walks_back_to_first_gap() {
        let today = fixed_now().date_naive();
        assert_eq!(streak_days(&days(&[0, 1, 2]), today), 3);
        // gap at day-2 stops the walk
        assert_eq!(streak_days(&days(&[0, 1, 3]), today), 2);
    }

    #[test]
    fn percentage_guards_division_by_zero() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(1, 2), 50);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(3, 3), 100);
    }

    fn dashboard(repo: InMemoryRepository) -> DashboardService {
        let storage = Storage {
            words: std::sync::Arc::new(repo.clone()),
            groups: std::sync::Arc::new(repo.clone()),
            sessions: std::sync::Arc::new(repo.clone()),
            reviews: std::sync::Arc::new(repo.clone()),
            maintenance: std::sync::Arc::new(repo),
        };
        DashboardService::new(fixed_clock(), storage)
    }

    #[tokio::test]
    async fn empty_store_degrades_to_defaults() {
        let service = dashboard(InMemoryRepository::new());

        assert_eq!(service.last_session().await.unwrap(), None);

        let progress = service.study_progress().await.unwrap();
        assert_eq!(progress.total_words, 0);
        assert_eq!(progress.total_studied, 0);
        assert_eq!(progress.mastery, 0);

        let stats = service.quick_stats().await.unwrap();
        assert_eq!(stats.success_rate, 0);
        assert_eq!(stats.total_sessions, 0);
        assert_eq!(stats.active_groups, 0);
        assert_eq!(stats.streak, 0);
    }

    #[tokio::test]
    async fn last_session_picks_max_created_at_not_fetch_order() {
        let repo = InMemoryRepository::new();
        let now = fixed_now();
        // insert newest first so any fetch-order assumption would fail
        repo.insert_session(None, now).await.unwrap();
        repo.insert_session(None, now - Duration::days(1))
            .await
            .unwrap();
        repo.insert_session(None, now - Duration::days(2))
            .await
            .unwrap();

        let service = dashboard(repo);
        let last = service.last_session().await.unwrap().unwrap();
        assert_eq!(last.date, now);
        assert_eq!(last.total, 0);
        assert_eq!(last.group_name, None);
    }

    #[tokio::test]
    async fn aggregates_are_idempotent_without_writes() {
        let repo = InMemoryRepository::new();
        let word = repo
            .insert_word(WordDraft::new("salaam", "hello", "sa-laam", "Salaam!"))
            .await
            .unwrap();
        let session = repo.insert_session(None, fixed_now()).await.unwrap();
        repo.insert_review(word.id, session.id(), true, fixed_now())
            .await
            .unwrap();

        let service = dashboard(repo);
        let first = (
            service.last_session().await.unwrap(),
            service.study_progress().await.unwrap(),
            service.quick_stats().await.unwrap(),
        );
        let second = (
            service.last_session().await.unwrap(),
            service.study_progress().await.unwrap(),
            service.quick_stats().await.unwrap(),
        );
        assert_eq!(first, second);
    }
}
