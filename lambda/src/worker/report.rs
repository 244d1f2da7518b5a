use tracing::info;

use crate::core::models::{BillingPeriod, ServiceBilling, TotalBilling};
use crate::core::period::{Clock, resolve_period};
use crate::cost::CostSource;
use crate::errors::BillingError;
use crate::teams::message_formatter::format_message;
use crate::teams::{DeliveryOutcome, MessageCard, TeamsNotifier, build_message_card};

/// Everything one run produced.
#[derive(Debug, Clone)]
pub struct BillingReport {
    /// Window that was requested, before Cost Explorer adjusted it.
    pub requested_period: BillingPeriod,
    pub total: TotalBilling,
    pub service_billings: Vec<ServiceBilling>,
    pub title: String,
    pub detail: String,
    pub card: MessageCard,
    pub delivery: DeliveryOutcome,
}

/// Owns the pieces of one billing notification run.
pub struct BillingReporter<C, S> {
    clock: C,
    cost_source: S,
    notifier: TeamsNotifier,
}

impl<C, S> BillingReporter<C, S>
where
    C: Clock,
    S: CostSource,
{
    pub fn new(clock: C, cost_source: S, notifier: TeamsNotifier) -> Self {
        Self {
            clock,
            cost_source,
            notifier,
        }
    }

    /// Resolves the window, queries costs, and posts the card.
    ///
    /// # Errors
    ///
    /// Any Cost Explorer failure aborts the run before anything is posted.
    /// Webhook failures are reported in [`BillingReport::delivery`] instead.
    pub async fn run(&self) -> Result<BillingReport, BillingError> {
        let requested_period = resolve_period(&self.clock)?;
        info!(
            "Reporting billing for {}..{}",
            requested_period.start_param(),
            requested_period.end_param()
        );

        let total = self.cost_source.total_billing(&requested_period).await?;
        let service_billings = self.cost_source.service_billings(&requested_period).await?;

        let (title, detail) = format_message(&total, &service_billings);
        info!("title: {}", title);
        info!("detail: {}", detail);

        let card = build_message_card(&title, &service_billings);
        let delivery = self.notifier.post_card(&card).await;

        Ok(BillingReport {
            requested_period,
            total,
            service_billings,
            title,
            detail,
            card,
            delivery,
        })
    }
}
