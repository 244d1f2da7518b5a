//! Teams incoming-webhook client.
//!
//! Delivery is best effort. Nothing here returns an error once the client
//! exists.

use reqwest::{Client, StatusCode};
use tracing::{error, info};
use url::Url;

use super::card_builder::MessageCard;
use crate::core::config::AppConfig;
use crate::errors::BillingError;

const USER_AGENT: &str = concat!("billing-notifier/", env!("CARGO_PKG_VERSION"));

/// What happened to a webhook POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The webhook answered. The status is not interpreted.
    Delivered(StatusCode),
    /// The request never got a response.
    TransportFailed(String),
}

#[derive(Debug, Clone)]
pub struct TeamsNotifier {
    http: Client,
    webhook_url: Url,
}

impl TeamsNotifier {
    /// # Errors
    ///
    /// Returns `HttpError` if the HTTP client cannot be built.
    pub fn new(webhook_url: Url) -> Result<Self, BillingError> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { http, webhook_url })
    }

    /// # Errors
    ///
    /// Same as [`TeamsNotifier::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, BillingError> {
        Self::new(config.teams_webhook_url.clone())
    }

    /// POSTs the card as JSON and logs the outcome.
    pub async fn post_card(&self, card: &MessageCard) -> DeliveryOutcome {
        match self
            .http
            .post(self.webhook_url.clone())
            .json(card)
            .send()
            .await
        {
            Ok(resp) => {
                let status = resp.status();
                info!("Teams webhook responded with status {}", status.as_u16());
                DeliveryOutcome::Delivered(status)
            }
            Err(e) => {
                error!("Failed to post to Teams webhook: {}", e);
                DeliveryOutcome::TransportFailed(e.to_string())
            }
        }
    }
}
