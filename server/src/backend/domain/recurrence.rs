//! Next-due-date calculation for recurring chores.
//!
//! A chore recurs only when it has both a positive `recur_amount` and a
//! `recur_unit`. Its next due date is the last completion plus
//! `amount × unit` calendar days, or "now" when it has never been done.
//! The value is derived on every read and never persisted.

use chrono::{DateTime, Days, Utc};
use shared::RecurUnit;
use std::cmp::Ordering;
use std::sync::Arc;

use crate::backend::domain::clock::Clock;

/// Anything that records when a chore was performed
pub trait Completion {
    fn done_at(&self) -> DateTime<Utc>;
}

impl Completion for DateTime<Utc> {
    fn done_at(&self) -> DateTime<Utc> {
        *self
    }
}

impl<T: Completion> Completion for &T {
    fn done_at(&self) -> DateTime<Utc> {
        (*self).done_at()
    }
}

/// Compute the next due date against an explicit `now`.
///
/// `logs` must already be in completion order; only the last element is
/// consulted. Returns `None` for chores that do not recur.
pub fn next_due_date_at<L: Completion>(
    recur_amount: Option<u32>,
    recur_unit: Option<RecurUnit>,
    logs: &[L],
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    let (amount, unit) = match (recur_amount, recur_unit) {
        (Some(amount), Some(unit)) if amount > 0 => (amount, unit),
        _ => return None,
    };

    let last_done_at = match logs.last() {
        Some(log) => log.done_at(),
        None => return Some(now),
    };

    let days = u64::from(amount) * unit.days();
    Some(
        last_done_at
            .checked_add_days(Days::new(days))
            .unwrap_or(DateTime::<Utc>::MAX_UTC),
    )
}

/// Next-due-date calculator bound to a clock
#[derive(Clone)]
pub struct RecurrenceCalculator {
    clock: Arc<dyn Clock>,
}

impl RecurrenceCalculator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn next_due_date<L: Completion>(
        &self,
        recur_amount: Option<u32>,
        recur_unit: Option<RecurUnit>,
        logs: &[L],
    ) -> Option<DateTime<Utc>> {
        next_due_date_at(recur_amount, recur_unit, logs, self.clock.now())
    }
}

/// Ordering used by every chore listing: earliest due first, undated last,
/// ties broken by newest creation first.
pub fn compare_by_next_due(
    a_next: Option<DateTime<Utc>>,
    a_created: DateTime<Utc>,
    b_next: Option<DateTime<Utc>>,
    b_created: DateTime<Utc>,
) -> Ordering {
    let by_due = match (a_next, b_next) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_due.then_with(|| b_created.cmp(&a_created))
}
