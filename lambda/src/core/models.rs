use chrono::{Days, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::errors::BillingError;

/// Date format used by Cost Explorer for `TimePeriod` boundaries.
pub const API_DATE_FORMAT: &str = "%Y-%m-%d";

/// Half-open date interval `[start, end)` a cost query covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillingPeriod {
    start: NaiveDate,
    end: NaiveDate,
}

impl BillingPeriod {
    /// # Errors
    ///
    /// Returns `InvalidPeriod` unless `start < end`. Cost Explorer rejects
    /// intervals whose boundaries are equal.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, BillingError> {
        if start >= end {
            return Err(BillingError::InvalidPeriod(format!(
                "start {start} must be before end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Parses `YYYY-MM-DD` boundaries as echoed back by Cost Explorer.
    ///
    /// # Errors
    ///
    /// Returns `MalformedResponse` when either date does not parse, or
    /// `InvalidPeriod` when the interval is empty.
    pub fn parse(start: &str, end: &str) -> Result<Self, BillingError> {
        let parse = |value: &str| {
            NaiveDate::parse_from_str(value, API_DATE_FORMAT).map_err(|e| {
                BillingError::MalformedResponse(format!("invalid date '{value}': {e}"))
            })
        };
        Self::new(parse(start)?, parse(end)?)
    }

    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Exclusive upper bound.
    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// The last calendar day the period actually covers.
    #[must_use]
    pub fn last_day(&self) -> NaiveDate {
        self.end.checked_sub_days(Days::new(1)).unwrap_or(self.start)
    }

    #[must_use]
    pub fn start_param(&self) -> String {
        self.start.format(API_DATE_FORMAT).to_string()
    }

    #[must_use]
    pub fn end_param(&self) -> String {
        self.end.format(API_DATE_FORMAT).to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalBilling {
    pub period: BillingPeriod,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceBilling {
    pub service_name: String,
    pub amount: Decimal,
}

impl ServiceBilling {
    pub fn new(service_name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            service_name: service_name.into(),
            amount,
        }
    }

    /// Amount in whole cents, or `None` when it rounds to zero.
    #[must_use]
    pub fn billed_amount(&self) -> Option<Decimal> {
        let rounded = round_cents(self.amount);
        (!rounded.is_zero()).then_some(rounded)
    }
}

/// Rounds to two decimal places, midpoints away from zero.
#[must_use]
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Renders an amount as `12.30 USD`.
#[must_use]
pub fn format_usd(amount: Decimal) -> String {
    let mut rounded = round_cents(amount);
    // -0.001 rounds to a negative zero
    if rounded.is_zero() {
        rounded = Decimal::ZERO;
    }
    rounded.rescale(2);
    format!("{rounded} USD")
}
