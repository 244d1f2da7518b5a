/// Billing notifier - posts the month-to-date AWS bill to a Microsoft Teams channel.
///
/// A scheduled Lambda runs one linear pipeline per invocation:
/// 1. Resolve the reporting window (month-to-date, or the whole previous
///    month on the 1st)
/// 2. Query Cost Explorer for the total and the per-service breakdown
/// 3. Format a title, a detail text and a `MessageCard`
/// 4. POST the card to a Teams incoming webhook
///
/// # Architecture
///
/// The system uses:
/// - AWS Lambda for scheduled execution
/// - aws-sdk-costexplorer for `GetCostAndUsage`
/// - reqwest for the webhook POST
/// - rust_decimal for exact money arithmetic
/// - Tokio for async runtime
///
/// # Example
///
/// ```no_run
/// use billing_notifier::core::config::AppConfig;
/// use billing_notifier::core::period::SystemClock;
/// use billing_notifier::cost::CostExplorerClient;
/// use billing_notifier::teams::TeamsNotifier;
/// use billing_notifier::worker::BillingReporter;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     billing_notifier::setup_logging();
///
///     let config = AppConfig::from_env()?;
///     let reporter = BillingReporter::new(
///         SystemClock::new(config.report_timezone),
///         CostExplorerClient::from_config(&config).await,
///         TeamsNotifier::from_config(&config)?,
///     );
///
///     let report = reporter.run().await?;
///     println!("{}\n{}", report.title, report.detail);
///     Ok(())
/// }
/// ```
// Module declarations
pub mod core;
pub mod cost;
pub mod errors;
pub mod teams;
pub mod worker;

/// Installs the global JSON log subscriber for the billing run.
///
/// Each event is one JSON line in `CloudWatch`, tagged with its target.
/// Verbosity follows `RUST_LOG` (e.g. `billing_notifier=debug`); when unset or
/// unparseable every target logs at `info`. A warm container that calls this
/// again keeps its existing subscriber.
///
/// ```
/// billing_notifier::setup_logging();
/// tracing::info!("cold start");
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    if let Err(e) = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
    {
        eprintln!("billing-notifier: log subscriber not installed: {e}");
    }
}
