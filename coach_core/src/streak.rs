//! Daily workout streak.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Consecutive days with a completed workout
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Streak {
    pub count: u32,
    pub last: Option<NaiveDate>,
}

impl Streak {
    /// Record a workout on `today` and return the new count
    ///
    /// Same day: unchanged, but never below 1. Day after `last`: extends.
    /// Anything else: restarts at 1.
    pub fn record(&mut self, today: NaiveDate) -> u32 {
        match self.last {
            // A hand-edited or reset file can hold today with no count
            Some(last) if last == today => self.count = self.count.max(1),
            Some(last) if last.succ_opt() == Some(today) => {
                self.count += 1;
                self.last = Some(today);
            }
            _ => {
                self.count = 1;
                self.last = Some(today);
            }
        }
        self.count
    }

    /// Streak as it should be shown on `today`: zero once a day has been missed
    pub fn current(&self, today: NaiveDate) -> u32 {
        match self.last {
            Some(last) if last == today || last.succ_opt() == Some(today) => self.count,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_first_workout_starts_streak() {
        let mut streak = Streak::default();
        assert_eq!(streak.record(day(1)), 1);
        assert_eq!(streak.last, Some(day(1)));
    }

    #[test]
    fn test_same_day_is_noop() {
        let mut streak = Streak::default();
        streak.record(day(1));
        assert_eq!(streak.record(day(1)), 1);
    }

    #[test]
    fn test_same_day_with_zero_count_starts_at_one() {
        let mut streak = Streak {
            count: 0,
            last: Some(day(4)),
        };
        assert_eq!(streak.record(day(4)), 1);
        assert_eq!(streak.current(day(4)), 1);
    }

    #[test]
    fn test_consecutive_days_extend() {
        let mut streak = Streak::default();
        streak.record(day(1));
        streak.record(day(2));
        assert_eq!(streak.record(day(3)), 3);
    }

    #[test]
    fn test_gap_resets() {
        let mut streak = Streak::default();
        streak.record(day(1));
        streak.record(day(2));
        assert_eq!(streak.record(day(5)), 1);
    }

    #[test]
    fn test_extends_across_month_boundary() {
        let mut streak = Streak {
            count: 4,
            last: NaiveDate::from_ymd_opt(2024, 2, 29),
        };
        assert_eq!(streak.record(day(1)), 5);
    }

    #[test]
    fn test_current_drops_after_missed_day() {
        let mut streak = Streak::default();
        streak.record(day(1));
        streak.record(day(2));

        assert_eq!(streak.current(day(3)), 2);
        assert_eq!(streak.current(day(4)), 0);
    }
}
