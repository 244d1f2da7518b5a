#![allow(clippy::missing_errors_doc)]
use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info};

use super::report::BillingReporter;
use crate::core::period::Clock;
use crate::cost::CostSource;
use crate::teams::DeliveryOutcome;

/// Lambda handler for the scheduled trigger. The event body is ignored.
pub async fn function_handler<C, S>(
    reporter: &BillingReporter<C, S>,
    event: LambdaEvent<Value>,
) -> Result<(), Error>
where
    C: Clock,
    S: CostSource,
{
    info!(
        "Billing notifier invoked (request_id={})",
        event.context.request_id
    );

    let report = reporter.run().await.map_err(|e| {
        error!("Billing report failed: {}", e);
        Error::from(e)
    })?;

    match report.delivery {
        DeliveryOutcome::Delivered(status) => info!(
            "Billing report for {} finished (webhook status {})",
            report.total.period.start_param(),
            status.as_u16()
        ),
        DeliveryOutcome::TransportFailed(_) => info!(
            "Billing report for {} finished without delivery",
            report.total.period.start_param()
        ),
    }

    Ok(())
}

pub use self::function_handler as handler;
