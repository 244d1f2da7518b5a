//! Cost Explorer backed [`CostSource`].

use async_trait::async_trait;
use aws_sdk_costexplorer::Client;
use aws_sdk_costexplorer::config::Region;
use aws_sdk_costexplorer::types::{DateInterval, GroupDefinition, GroupDefinitionType, Granularity};
use tracing::info;

use super::{AMORTIZED_COST, CostSource, SERVICE_DIMENSION, parsing};
use crate::core::config::AppConfig;
use crate::core::models::{BillingPeriod, ServiceBilling, TotalBilling};
use crate::errors::BillingError;

#[derive(Debug, Clone)]
pub struct CostExplorerClient {
    client: Client,
}

impl CostExplorerClient {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Loads AWS credentials from the environment and targets the configured region.
    pub async fn from_config(config: &AppConfig) -> Self {
        let shared = aws_config::from_env()
            .region(Region::new(config.cost_explorer_region.clone()))
            .load()
            .await;
        Self::new(Client::new(&shared))
    }
}

fn date_interval(period: &BillingPeriod) -> Result<DateInterval, BillingError> {
    DateInterval::builder()
        .start(period.start_param())
        .end(period.end_param())
        .build()
        .map_err(|e| BillingError::InvalidPeriod(e.to_string()))
}

fn service_group() -> GroupDefinition {
    GroupDefinition::builder()
        .r#type(GroupDefinitionType::Dimension)
        .key(SERVICE_DIMENSION)
        .build()
}

#[async_trait]
impl CostSource for CostExplorerClient {
    async fn total_billing(&self, period: &BillingPeriod) -> Result<TotalBilling, BillingError> {
        info!(
            "Querying total cost for {}..{}",
            period.start_param(),
            period.end_param()
        );
        let output = self
            .client
            .get_cost_and_usage()
            .time_period(date_interval(period)?)
            .granularity(Granularity::Monthly)
            .metrics(AMORTIZED_COST)
            .send()
            .await?;
        parsing::parse_total(&output)
    }

    async fn service_billings(
        &self,
        period: &BillingPeriod,
    ) -> Result<Vec<ServiceBilling>, BillingError> {
        info!(
            "Querying per-service cost for {}..{}",
            period.start_param(),
            period.end_param()
        );
        let mut billings = Vec::new();
        let mut next_page_token: Option<String> = None;
        loop {
            let output = self
                .client
                .get_cost_and_usage()
                .time_period(date_interval(period)?)
                .granularity(Granularity::Monthly)
                .metrics(AMORTIZED_COST)
                .group_by(service_group())
                .set_next_page_token(next_page_token.take())
                .send()
                .await?;
            billings.extend(parsing::parse_service_billings(&output)?);

            match output.next_page_token() {
                Some(token) if !token.is_empty() => next_page_token = Some(token.to_string()),
                _ => break,
            }
        }
        Ok(billings)
    }
}
