//! Reporting window resolution.
//!
//! The report always covers month-to-date. Cost Explorer refuses an empty
//! interval, so on the first day of a month the window falls back to the
//! whole previous month.

use chrono::{Datelike, Days, NaiveDate, Utc};
use chrono_tz::Tz;

use super::models::BillingPeriod;
use crate::errors::BillingError;

/// Source of "today" for the resolver.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Wall clock evaluated in a fixed time zone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    #[must_use]
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new(Tz::UTC)
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.tz).date_naive()
    }
}

/// Clock pinned to a single date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[must_use]
pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

/// Resolves the month-to-date window ending (exclusively) today.
///
/// # Errors
///
/// Only fails if the computed window is empty, which cannot happen for
/// any representable date.
pub fn resolve_period(clock: &impl Clock) -> Result<BillingPeriod, BillingError> {
    let today = clock.today();
    let start = first_day_of_month(today);
    if start == today {
        let previous_month = first_day_of_month(today - Days::new(1));
        return BillingPeriod::new(previous_month, today);
    }
    BillingPeriod::new(start, today)
}
