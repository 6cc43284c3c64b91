// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Consecutive-day streak tracking.
//!
//! Each tracked activity event compares today's calendar date against the
//! user's stored reference date and classifies the transition. Comparison is
//! whole-day: both timestamps normalize to a UTC calendar date before
//! differencing, so two events on the same date are "same day" no matter
//! how many hours apart they land.
//!
//! The read-then-write here is not atomic; two near-simultaneous events for
//! one user can race through the window. A single user issuing concurrent
//! requests is not a supported pattern, so the miscount risk is accepted.

use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;

use crate::error::Result;
use crate::store::StreakStore;

/// How an activity event relates to the user's streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakOutcome {
    /// First tracked activity ever
    Started,
    /// Already recorded today; nothing written
    SameDay,
    /// Exactly one calendar day after the last activity
    Extended,
    /// Gap of two or more days; reference date reset
    Broken,
}

impl StreakOutcome {
    /// Whether the streak survives this event. Only a gap breaks it.
    pub fn continued(&self) -> bool {
        !matches!(self, StreakOutcome::Broken)
    }

    /// Whether this event extended the streak to a new day. This is the
    /// transition that earns the daily bonus; same-day repeats do not.
    pub fn extended(&self) -> bool {
        matches!(self, StreakOutcome::Extended)
    }
}

/// Decides streak transitions and persists the new reference date.
#[derive(Clone)]
pub struct StreakTracker {
    store: Arc<dyn StreakStore>,
}

impl StreakTracker {
    pub fn new(store: Arc<dyn StreakStore>) -> Self {
        Self { store }
    }

    /// Record an activity event at `now` and classify the transition.
    ///
    /// Every write refreshes the record's time-to-live, so an active user's
    /// reference date never expires mid-streak.
    pub async fn record_activity(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<StreakOutcome> {
        let today = now.date_naive();

        let Some(last) = self.store.last_activity(user_id).await? else {
            self.store.set_last_activity(user_id, today).await?;
            tracing::debug!(user_id, %today, "Streak started");
            return Ok(StreakOutcome::Started);
        };

        // Calendar-date subtraction, never a raw millisecond delta: elapsed
        // seconds divided by 86,400 misclassifies events that straddle
        // midnight at different times of day.
        let days_diff = today.signed_duration_since(last).num_days();

        let outcome = match days_diff {
            // Already current; a skewed clock (negative diff) is treated the
            // same and leaves the stored date alone.
            d if d <= 0 => StreakOutcome::SameDay,
            1 => {
                self.store.set_last_activity(user_id, today).await?;
                StreakOutcome::Extended
            }
            _ => {
                self.store.set_last_activity(user_id, today).await?;
                tracing::debug!(user_id, days_diff, "Streak broken");
                StreakOutcome::Broken
            }
        };

        Ok(outcome)
    }

    /// The user's last recorded activity date, if still retained.
    pub async fn last_activity(&self, user_id: &str) -> Result<Option<NaiveDate>> {
        self.store.last_activity(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStreakStore;
    use chrono::TimeZone;

    fn tracker() -> StreakTracker {
        StreakTracker::new(Arc::new(MemoryStreakStore::new()))
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_first_activity_starts_streak() {
        let streaks = tracker();

        let outcome = streaks
            .record_activity("u1", at(2024, 3, 10, 9))
            .await
            .unwrap();

        assert_eq!(outcome, StreakOutcome::Started);
        assert!(outcome.continued());
        assert!(!outcome.extended());
    }

    #[tokio::test]
    async fn test_same_calendar_day_any_hours_apart() {
        let streaks = tracker();
        streaks
            .record_activity("u1", at(2024, 3, 10, 0))
            .await
            .unwrap();

        // Same date must be "same day" regardless of time of day.
        for hour in [1, 6, 12, 18, 23] {
            let outcome = streaks
                .record_activity("u1", at(2024, 3, 10, hour))
                .await
                .unwrap();
            assert_eq!(outcome, StreakOutcome::SameDay);
            assert!(outcome.continued());
        }
    }

    #[tokio::test]
    async fn test_next_day_extends_even_when_far_apart_in_hours() {
        let streaks = tracker();
        // 23:00 on day 0 to 01:00 on day 1 is only 2 hours of wall clock;
        // 01:00 on day 0 to 23:00 on day 1 is 46. Both are one calendar day.
        streaks
            .record_activity("u1", at(2024, 3, 10, 23))
            .await
            .unwrap();
        let outcome = streaks
            .record_activity("u1", at(2024, 3, 11, 1))
            .await
            .unwrap();
        assert_eq!(outcome, StreakOutcome::Extended);

        streaks
            .record_activity("u2", at(2024, 3, 10, 1))
            .await
            .unwrap();
        let outcome = streaks
            .record_activity("u2", at(2024, 3, 11, 23))
            .await
            .unwrap();
        assert_eq!(outcome, StreakOutcome::Extended);
    }

    #[tokio::test]
    async fn test_gap_breaks_streak_and_resets_reference() {
        let streaks = tracker();
        streaks
            .record_activity("u1", at(2024, 3, 10, 9))
            .await
            .unwrap();

        let outcome = streaks
            .record_activity("u1", at(2024, 3, 13, 9))
            .await
            .unwrap();
        assert_eq!(outcome, StreakOutcome::Broken);
        assert!(!outcome.continued());

        // The reset reference date makes the following day an extension.
        let outcome = streaks
            .record_activity("u1", at(2024, 3, 14, 9))
            .await
            .unwrap();
        assert_eq!(outcome, StreakOutcome::Extended);
    }

    #[tokio::test]
    async fn test_month_and_year_boundaries_extend() {
        let streaks = tracker();

        streaks
            .record_activity("u1", at(2024, 2, 29, 12))
            .await
            .unwrap();
        assert_eq!(
            streaks
                .record_activity("u1", at(2024, 3, 1, 12))
                .await
                .unwrap(),
            StreakOutcome::Extended
        );

        streaks
            .record_activity("u2", at(2023, 12, 31, 12))
            .await
            .unwrap();
        assert_eq!(
            streaks
                .record_activity("u2", at(2024, 1, 1, 12))
                .await
                .unwrap(),
            StreakOutcome::Extended
        );
    }

    #[tokio::test]
    async fn test_earlier_timestamp_leaves_streak_alone() {
        let streaks = tracker();
        streaks
            .record_activity("u1", at(2024, 3, 10, 9))
            .await
            .unwrap();

        let outcome = streaks
            .record_activity("u1", at(2024, 3, 8, 9))
            .await
            .unwrap();

        assert_eq!(outcome, StreakOutcome::SameDay);
        // Stored reference date is untouched.
        assert_eq!(
            streaks.last_activity("u1").await.unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 10)
        );
    }
}
