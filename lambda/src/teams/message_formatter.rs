//! Plain-text rendering of a billing report.

use crate::core::models::{ServiceBilling, TotalBilling, format_usd};

/// Date format for period boundaries in the title.
const DISPLAY_DATE_FORMAT: &str = "%m/%d";

/// Builds the report title, e.g. `06/01～06/30の請求額は、123.46 USDです。`
///
/// The end shown is the last day covered, one day before the exclusive
/// boundary Cost Explorer returns.
#[must_use]
pub fn format_title(total: &TotalBilling) -> String {
    let start = total.period.start().format(DISPLAY_DATE_FORMAT);
    let end = total.period.last_day().format(DISPLAY_DATE_FORMAT);
    format!(
        "{start}～{end}の請求額は、{}です。",
        format_usd(total.amount)
    )
}

/// One line per billed service, in input order. Services that round to
/// zero cents are left out.
#[must_use]
pub fn format_detail(service_billings: &[ServiceBilling]) -> String {
    service_billings
        .iter()
        .filter_map(|billing| {
            billing.billed_amount().map(|amount| {
                format!("　・{}: {}", billing.service_name, format_usd(amount))
            })
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Title and detail text together.
#[must_use]
pub fn format_message(
    total: &TotalBilling,
    service_billings: &[ServiceBilling],
) -> (String, String) {
    (format_title(total), format_detail(service_billings))
}
