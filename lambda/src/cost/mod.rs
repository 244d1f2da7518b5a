//! Cost Explorer queries.
//!
//! Both queries use MONTHLY granularity and the `AmortizedCost` metric.
//! Failures here are never swallowed.

pub mod client;
pub mod parsing;

use async_trait::async_trait;

use crate::core::models::{BillingPeriod, ServiceBilling, TotalBilling};
use crate::errors::BillingError;

pub use client::CostExplorerClient;

/// Metric requested from Cost Explorer.
pub const AMORTIZED_COST: &str = "AmortizedCost";

/// Cost Explorer dimension used for the per-service breakdown.
pub const SERVICE_DIMENSION: &str = "SERVICE";

/// Read-only access to month-to-date billing figures.
#[async_trait]
pub trait CostSource: Send + Sync {
    /// Aggregate cost for `period`. The returned period is the one the API
    /// reports, which may differ from the requested one.
    async fn total_billing(&self, period: &BillingPeriod) -> Result<TotalBilling, BillingError>;

    /// Per-service costs in the order the API returns them.
    async fn service_billings(
        &self,
        period: &BillingPeriod,
    ) -> Result<Vec<ServiceBilling>, BillingError>;
}
