use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::entity::FineAmount;

/// Pure overdue-fine policy. Deterministic for a given `(due, as_of)` pair
/// and monotonic non-decreasing in `as_of`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinePolicy {
    daily_rate: f64,
    max_fine: f64,
    grace_days: i64,
}

impl FinePolicy {
    pub fn new(daily_rate: f64, max_fine: f64, grace_days: i64) -> Self {
        Self {
            daily_rate,
            max_fine,
            grace_days,
        }
    }

    /// Days counted against the member. Partial days round up: any time past
    /// the due date is a full chargeable day.
    pub fn days_overdue(&self, due: OffsetDateTime, as_of: OffsetDateTime) -> i64 {
        let overdue = as_of - due;
        if overdue <= Duration::ZERO {
            return 0;
        }
        let mut days = overdue.whole_days();
        if overdue > Duration::days(days) {
            days += 1;
        }
        (days - self.grace_days).max(0)
    }

    pub fn amount_for(&self, days_overdue: i64) -> FineAmount {
        FineAmount::new((days_overdue as f64 * self.daily_rate).min(self.max_fine))
    }

    pub fn assess(&self, due: OffsetDateTime, as_of: OffsetDateTime) -> (i64, FineAmount) {
        let days = self.days_overdue(due, as_of);
        (days, self.amount_for(days))
    }
}

impl Default for FinePolicy {
    fn default() -> Self {
        Self {
            daily_rate: 1.0,
            max_fine: 50.0,
            grace_days: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LendingPolicy {
    loan_period_days: i64,
    reservation_ttl_days: i64,
    fine: FinePolicy,
}

impl LendingPolicy {
    pub fn new(loan_period_days: i64, reservation_ttl_days: i64, fine: FinePolicy) -> Self {
        Self {
            loan_period_days,
            reservation_ttl_days,
            fine,
        }
    }

    pub fn due_date(&self, borrowed_at: OffsetDateTime) -> OffsetDateTime {
        borrowed_at + Duration::days(self.loan_period_days)
    }

    pub fn reservation_expiry(&self, reserved_at: OffsetDateTime) -> OffsetDateTime {
        reserved_at + Duration::days(self.reservation_ttl_days)
    }

    pub fn fine(&self) -> &FinePolicy {
        &self.fine
    }
}

impl Default for LendingPolicy {
    fn default() -> Self {
        Self {
            loan_period_days: 14,
            reservation_ttl_days: 30,
            fine: FinePolicy::default(),
        }
    }
}

pub trait DependOnLendingPolicy: 'static + Sync + Send {
    fn lending_policy(&self) -> &LendingPolicy;
}

#[cfg(test)]
mod test {
    use time::macros::datetime;

    use super::FinePolicy;

    #[test]
    fn three_whole_days_late_costs_three_units() {
        let policy = FinePolicy::default();
        let due = datetime!(2024-02-05 00:00 UTC);
        let returned = datetime!(2024-02-08 00:00 UTC);
        let (days, amount) = policy.assess(due, returned);
        assert_eq!(days, 3);
        assert_eq!(amount.get(), 3.0);
    }

    #[test]
    fn on_time_return_owes_nothing() {
        let policy = FinePolicy::default();
        let due = datetime!(2024-02-05 00:00 UTC);
        let (days, amount) = policy.assess(due, due);
        assert_eq!(days, 0);
        assert_eq!(amount.get(), 0.0);
    }

    #[test]
    fn partial_day_counts_as_a_whole_day() {
        let policy = FinePolicy::default();
        let due = datetime!(2024-02-05 00:00 UTC);
        assert_eq!(policy.days_overdue(due, datetime!(2024-02-05 01:00 UTC)), 1);
        assert_eq!(policy.days_overdue(due, datetime!(2024-02-06 00:00:01 UTC)), 2);
    }

    #[test]
    fn fine_is_capped() {
        let policy = FinePolicy::default();
        assert_eq!(policy.amount_for(60).get(), 50.0);
    }

    #[test]
    fn grace_period_shifts_the_clock() {
        let policy = FinePolicy::new(1.0, 50.0, 2);
        let due = datetime!(2024-02-05 00:00 UTC);
        assert_eq!(policy.days_overdue(due, datetime!(2024-02-06 00:00 UTC)), 0);
        assert_eq!(policy.days_overdue(due, datetime!(2024-02-08 00:00 UTC)), 1);
    }

    #[test]
    fn later_as_of_never_decreases_the_fine() {
        let policy = FinePolicy::default();
        let due = datetime!(2024-02-05 00:00 UTC);
        let mut previous = 0.0;
        for hours in 0..200 {
            let as_of = due + time::Duration::hours(hours);
            let (_, amount) = policy.assess(due, as_of);
            assert!(amount.get() >= previous);
            previous = amount.get();
        }
    }
}
