//! Storage penalty as a derived read.
//!
//! Nothing here mutates the box. The accrued penalty is recomputed from
//! `free_period_end`, `penalty_start_date`, `daily_penalty` and the supplied
//! time on every call, so it can never drift from the clock. Once a box is
//! closed the evaluation time is pinned to `closed_at`.
//!
//! A started day counts as a full day: any instant past the deadline costs one
//! day's penalty. The deadline instant itself is still free.

use crate::domain::model::{BoxConsolidation, StorageStatus};
use crate::utils::error::{ConsolidationError, Result};
use chrono::{DateTime, Duration, Utc};

const DAY_SECS: i64 = 24 * 60 * 60;

impl BoxConsolidation {
    /// `now`, or `closed_at` if the box was closed earlier than that.
    pub fn penalty_evaluation_time(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self.closed_at {
            Some(closed_at) if closed_at < now => closed_at,
            _ => now,
        }
    }

    /// Recorded penalty start, or `free_period_end` once it has lapsed.
    pub fn effective_penalty_start(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        if let Some(start) = self.penalty_start_date {
            return Some(start);
        }
        let at = self.penalty_evaluation_time(now);
        self.free_period_end.filter(|end| at > *end)
    }

    pub fn overdue_days(&self, now: DateTime<Utc>) -> i64 {
        let at = self.penalty_evaluation_time(now);
        match self.effective_penalty_start(now) {
            Some(start) if at > start => ceil_days(at - start),
            _ => 0,
        }
    }

    pub fn current_penalty(&self, now: DateTime<Utc>) -> Result<i64> {
        self.penalty_for_days(self.overdue_days(now))
    }

    /// Started days left before the penalty begins; `None` for an empty box.
    pub fn free_days_remaining(&self, now: DateTime<Utc>) -> Option<i64> {
        let end = self.free_period_end?;
        if now >= end {
            return Some(0);
        }
        Some(ceil_days(end - now))
    }

    pub fn storage_status(&self, now: DateTime<Utc>) -> Result<StorageStatus> {
        if self.free_period_end.is_none() {
            return Ok(StorageStatus::Empty);
        }
        if !self.is_open() {
            return Ok(StorageStatus::Settled {
                penalty: self.current_penalty(now)?,
            });
        }
        Ok(match self.overdue_days(now) {
            0 => StorageStatus::FreePeriod {
                days_remaining: self.free_days_remaining(now).unwrap_or(0),
            },
            days => StorageStatus::Overdue {
                days,
                penalty: self.penalty_for_days(days)?,
            },
        })
    }

    fn penalty_for_days(&self, days: i64) -> Result<i64> {
        days.checked_mul(self.daily_penalty).ok_or_else(|| {
            ConsolidationError::invalid_argument(
                "daily_penalty",
                self.daily_penalty,
                format!("Penalty for {} days overflows", days),
            )
        })
    }
}

// Whole days, rounding any remainder (down to a nanosecond) up.
fn ceil_days(elapsed: Duration) -> i64 {
    if elapsed <= Duration::zero() {
        return 0;
    }
    let secs = elapsed.num_seconds();
    let days = secs / DAY_SECS;
    if secs % DAY_SECS != 0 || elapsed.subsec_nanos() > 0 {
        days + 1
    } else {
        days
    }
}

#[cfg(test)]
mod tests {
    use crate::core::lifecycle::ConsolidationLifecycle;
    use crate::domain::model::{BoxConsolidation, ItemReceived, StorageStatus};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    // Free period of 14 days ending 2025-01-10T23:59:59Z, 50 PHP per day.
    fn box_with_deadline() -> (ConsolidationLifecycle, BoxConsolidation) {
        let lifecycle = ConsolidationLifecycle::default().with_storage_policy(14, 50);
        let mut b = lifecycle.create_box("BX-1", "cust-7", 1, at(2024, 12, 20, 0, 0, 0));
        lifecycle
            .receive_item(&mut b, ItemReceived::new(at(2024, 12, 27, 23, 59, 59), 2.0, 0.02))
            .unwrap();
        assert_eq!(b.free_period_end, Some(at(2025, 1, 10, 23, 59, 59)));
        (lifecycle, b)
    }

    #[test]
    fn test_penalty_ceiling_days() {
        let (_, b) = box_with_deadline();
        assert_eq!(b.current_penalty(at(2025, 1, 10, 23, 59, 59)).unwrap(), 0);
        assert_eq!(b.current_penalty(at(2025, 1, 11, 0, 0, 1)).unwrap(), 50);
        assert_eq!(b.current_penalty(at(2025, 1, 13, 0, 0, 0)).unwrap(), 150);
    }

    #[test]
    fn test_penalty_read_does_not_mutate() {
        let (_, b) = box_with_deadline();
        let before = b.clone();
        let _ = b.current_penalty(at(2025, 3, 1, 0, 0, 0)).unwrap();
        let _ = b.storage_status(at(2025, 3, 1, 0, 0, 0)).unwrap();
        assert_eq!(b, before);
        assert!(b.penalty_start_date.is_none());
    }

    #[test]
    fn test_empty_box_has_no_penalty() {
        let lifecycle = ConsolidationLifecycle::default();
        let b = lifecycle.create_box("BX-2", "cust-7", 2, at(2025, 1, 1, 0, 0, 0));
        assert_eq!(b.current_penalty(at(2030, 1, 1, 0, 0, 0)).unwrap(), 0);
        assert_eq!(b.storage_status(at(2030, 1, 1, 0, 0, 0)).unwrap(), StorageStatus::Empty);
        assert_eq!(b.free_days_remaining(at(2030, 1, 1, 0, 0, 0)), None);
    }

    #[test]
    fn test_penalty_frozen_at_close() {
        let (lifecycle, mut b) = box_with_deadline();
        lifecycle
            .close_box(&mut b, Default::default(), at(2025, 1, 12, 12, 0, 0))
            .unwrap();
        // 1 day 12h 1s past the deadline -> 2 days
        assert_eq!(b.current_penalty(at(2025, 1, 12, 12, 0, 0)).unwrap(), 100);
        assert_eq!(b.current_penalty(at(2025, 6, 1, 0, 0, 0)).unwrap(), 100);
        assert_eq!(
            b.storage_status(at(2025, 6, 1, 0, 0, 0)).unwrap(),
            StorageStatus::Settled { penalty: 100 }
        );
    }

    #[test]
    fn test_storage_status_transitions() {
        let (_, b) = box_with_deadline();
        assert_eq!(
            b.storage_status(at(2025, 1, 8, 0, 0, 0)).unwrap(),
            StorageStatus::FreePeriod { days_remaining: 3 }
        );
        assert_eq!(
            b.storage_status(at(2025, 1, 10, 23, 59, 59)).unwrap(),
            StorageStatus::FreePeriod { days_remaining: 0 }
        );
        assert_eq!(
            b.storage_status(at(2025, 1, 12, 0, 0, 0)).unwrap(),
            StorageStatus::Overdue { days: 2, penalty: 100 }
        );
    }

    #[test]
    fn test_sub_second_overrun_counts_as_a_day() {
        let (_, b) = box_with_deadline();
        let just_after = at(2025, 1, 10, 23, 59, 59) + Duration::milliseconds(1);
        assert_eq!(b.overdue_days(just_after), 1);
    }

    #[test]
    fn test_sub_millisecond_overrun_is_charged() {
        let (_, b) = box_with_deadline();
        let just_after = at(2025, 1, 10, 23, 59, 59) + Duration::microseconds(500);
        assert_eq!(b.current_penalty(just_after).unwrap(), 50);
        assert_eq!(
            b.storage_status(just_after).unwrap(),
            StorageStatus::Overdue { days: 1, penalty: 50 }
        );
        assert_eq!(b.free_days_remaining(just_after), Some(0));
    }
}
