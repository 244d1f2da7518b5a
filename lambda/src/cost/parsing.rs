//! Extraction of billing figures from `GetCostAndUsage` responses.

use std::collections::HashMap;
use std::str::FromStr;

use anyhow::Context;
use aws_sdk_costexplorer::operation::get_cost_and_usage::GetCostAndUsageOutput;
use aws_sdk_costexplorer::types::{MetricValue, ResultByTime};
use rust_decimal::Decimal;

use super::AMORTIZED_COST;
use crate::core::models::{BillingPeriod, ServiceBilling, TotalBilling};
use crate::errors::BillingError;

/// Parses a Cost Explorer amount. Very small values come back in
/// scientific notation (`1.2E-7`).
///
/// # Errors
///
/// Returns an error when the value is neither plain nor scientific decimal.
pub fn parse_amount(raw: &str) -> anyhow::Result<Decimal> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .with_context(|| format!("invalid amount '{raw}'"))
}

fn first_result(output: &GetCostAndUsageOutput) -> anyhow::Result<&ResultByTime> {
    output
        .results_by_time()
        .first()
        .context("response contains no ResultsByTime entry")
}

fn amortized_amount(metrics: Option<&HashMap<String, MetricValue>>) -> anyhow::Result<Decimal> {
    let raw = metrics
        .and_then(|m| m.get(AMORTIZED_COST))
        .and_then(MetricValue::amount)
        .with_context(|| format!("{AMORTIZED_COST} amount missing"))?;
    parse_amount(raw)
}

/// # Errors
///
/// Returns `MalformedResponse` when the period or total is missing or unparseable.
pub fn parse_total(output: &GetCostAndUsageOutput) -> Result<TotalBilling, BillingError> {
    let result = first_result(output)?;
    let interval = result
        .time_period()
        .context("ResultsByTime entry has no TimePeriod")?;
    let period = BillingPeriod::parse(interval.start(), interval.end())?;
    let amount = amortized_amount(result.total()).context("total")?;
    Ok(TotalBilling { period, amount })
}

/// Groups of the first result, in response order.
///
/// # Errors
///
/// Returns `MalformedResponse` when a group lacks its service key or amount.
pub fn parse_service_billings(
    output: &GetCostAndUsageOutput,
) -> Result<Vec<ServiceBilling>, BillingError> {
    let result = first_result(output)?;
    let mut billings = Vec::with_capacity(result.groups().len());
    for group in result.groups() {
        let service_name = group.keys().first().context("group has no keys")?;
        let amount = amortized_amount(group.metrics())
            .with_context(|| format!("service '{service_name}'"))?;
        billings.push(ServiceBilling::new(service_name.as_str(), amount));
    }
    Ok(billings)
}
