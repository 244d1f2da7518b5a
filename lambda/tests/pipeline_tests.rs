use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use billing_notifier::core::models::{BillingPeriod, ServiceBilling, TotalBilling};
use billing_notifier::core::period::FixedClock;
use billing_notifier::cost::CostSource;
use billing_notifier::errors::BillingError;
use billing_notifier::teams::{DeliveryOutcome, TeamsNotifier};
use billing_notifier::worker::BillingReporter;
use chrono::NaiveDate;
use mockito::Matcher;
use reqwest::StatusCode;
use rust_decimal_macros::dec;
use serde_json::json;
use url::Url;

/// End-to-end runs of the fetch → format → post pipeline against an
/// in-memory cost source and a local webhook.

struct InMemoryCostSource {
    total: TotalBilling,
    services: Vec<ServiceBilling>,
    requested: Arc<Mutex<Vec<BillingPeriod>>>,
}

impl InMemoryCostSource {
    fn new(start: &str, end: &str, amount: rust_decimal::Decimal, services: Vec<ServiceBilling>) -> Self {
        Self {
            total: TotalBilling {
                period: BillingPeriod::parse(start, end).unwrap(),
                amount,
            },
            services,
            requested: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl CostSource for InMemoryCostSource {
    async fn total_billing(&self, period: &BillingPeriod) -> Result<TotalBilling, BillingError> {
        self.requested.lock().unwrap().push(*period);
        Ok(self.total.clone())
    }

    async fn service_billings(
        &self,
        period: &BillingPeriod,
    ) -> Result<Vec<ServiceBilling>, BillingError> {
        self.requested.lock().unwrap().push(*period);
        Ok(self.services.clone())
    }
}

struct FailingCostSource;

#[async_trait]
impl CostSource for FailingCostSource {
    async fn total_billing(&self, _: &BillingPeriod) -> Result<TotalBilling, BillingError> {
        Err(BillingError::AwsError("ThrottlingException".to_string()))
    }

    async fn service_billings(&self, _: &BillingPeriod) -> Result<Vec<ServiceBilling>, BillingError> {
        Err(BillingError::AwsError("ThrottlingException".to_string()))
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn notifier_for(server: &mockito::ServerGuard) -> TeamsNotifier {
    TeamsNotifier::new(Url::parse(&format!("{}/hook", server.url())).unwrap()).unwrap()
}

#[tokio::test]
async fn test_month_to_date_report_is_posted() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/hook")
        .match_body(Matcher::PartialJson(json!({
            "summary": "06/01～06/14の請求額は、15.01 USDです。",
            "sections": [{
                "activityTitle": "06/01～06/14の請求額は、15.01 USDです。",
                "facts": [
                    {"name": "10.00 USD", "value": "EC2"},
                    {"name": "5.01 USD", "value": "RDS"}
                ]
            }]
        })))
        .with_status(200)
        .create_async()
        .await;

    let source = InMemoryCostSource::new(
        "2023-06-01",
        "2023-06-15",
        dec!(15.009),
        vec![
            ServiceBilling::new("RDS", dec!(5.005)),
            ServiceBilling::new("S3", dec!(0.0)),
            ServiceBilling::new("EC2", dec!(10.004)),
        ],
    );
    let reporter = BillingReporter::new(FixedClock(date(2023, 6, 15)), source, notifier_for(&server));

    let report = reporter.run().await.unwrap();

    mock.assert_async().await;
    assert_eq!(report.title, "06/01～06/14の請求額は、15.01 USDです。");
    // Detail keeps API order while facts are ranked
    assert_eq!(report.detail, "　・RDS: 5.01 USD\n　・EC2: 10.00 USD");
    assert_eq!(report.delivery, DeliveryOutcome::Delivered(StatusCode::OK));
    assert_eq!(report.requested_period.start(), date(2023, 6, 1));
    assert_eq!(report.requested_period.end(), date(2023, 6, 15));
}

#[tokio::test]
async fn test_first_of_month_queries_previous_month() {
    let mut server = mockito::Server::new_async().await;
    let mock = server.mock("POST", "/hook").with_status(200).create_async().await;

    let source = InMemoryCostSource::new("2023-06-01", "2023-07-01", dec!(123.456), vec![]);
    let reporter = BillingReporter::new(FixedClock(date(2023, 7, 1)), source, notifier_for(&server));

    let report = reporter.run().await.unwrap();

    mock.assert_async().await;
    assert_eq!(report.requested_period.start(), date(2023, 6, 1));
    assert_eq!(report.requested_period.end(), date(2023, 7, 1));
    assert_eq!(report.title, "06/01～06/30の請求額は、123.46 USDです。");
    assert_eq!(report.detail, "");
}

#[tokio::test]
async fn test_title_uses_period_returned_by_api() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server.mock("POST", "/hook").with_status(200).create_async().await;

    // The API clamps the end even though the clock asked for the 20th
    let source = InMemoryCostSource::new("2023-06-01", "2023-06-18", dec!(1), vec![]);
    let reporter = BillingReporter::new(FixedClock(date(2023, 6, 20)), source, notifier_for(&server));

    let report = reporter.run().await.unwrap();
    assert_eq!(report.title, "06/01～06/17の請求額は、1.00 USDです。");
}

#[tokio::test]
async fn test_both_queries_use_resolved_period() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server.mock("POST", "/hook").with_status(200).create_async().await;

    let source = InMemoryCostSource::new("2023-06-01", "2023-06-10", dec!(1), vec![]);
    let requested = Arc::clone(&source.requested);
    let reporter = BillingReporter::new(FixedClock(date(2023, 6, 10)), source, notifier_for(&server));
    let report = reporter.run().await.unwrap();

    let expected = BillingPeriod::new(date(2023, 6, 1), date(2023, 6, 10)).unwrap();
    assert_eq!(report.requested_period, expected);
    assert_eq!(*requested.lock().unwrap(), vec![expected, expected]);
}

#[tokio::test]
async fn test_billing_failure_aborts_before_posting() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/hook")
        .with_status(200)
        .expect(0)
        .create_async()
        .await;

    let reporter = BillingReporter::new(
        FixedClock(date(2023, 6, 15)),
        FailingCostSource,
        notifier_for(&server),
    );

    let err = reporter.run().await.unwrap_err();
    assert!(matches!(err, BillingError::AwsError(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_webhook_failure_does_not_fail_the_run() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server.mock("POST", "/hook").with_status(500).create_async().await;

    let source = InMemoryCostSource::new(
        "2023-06-01",
        "2023-06-15",
        dec!(2),
        vec![ServiceBilling::new("EC2", dec!(2))],
    );
    let reporter = BillingReporter::new(FixedClock(date(2023, 6, 15)), source, notifier_for(&server));

    let report = reporter.run().await.unwrap();
    assert_eq!(
        report.delivery,
        DeliveryOutcome::Delivered(StatusCode::INTERNAL_SERVER_ERROR)
    );
}
