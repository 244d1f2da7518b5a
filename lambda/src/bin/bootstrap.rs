// This is the Lambda bootstrap entry point for the billing notifier

use billing_notifier::core::config::AppConfig;
use billing_notifier::core::period::SystemClock;
use billing_notifier::cost::CostExplorerClient;
use billing_notifier::teams::TeamsNotifier;
use billing_notifier::worker::{self, BillingReporter};
use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use serde_json::Value;
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    billing_notifier::setup_logging();

    // Config is validated once per cold start
    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;

    let cost_source = CostExplorerClient::from_config(&config).await;
    let notifier = TeamsNotifier::from_config(&config)?;
    let reporter = BillingReporter::new(
        SystemClock::new(config.report_timezone),
        cost_source,
        notifier,
    );

    let reporter = &reporter;
    run(service_fn(move |event: LambdaEvent<Value>| async move {
        worker::handler(reporter, event).await
    }))
    .await
}
