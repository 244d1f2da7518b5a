use std::env;

use chrono_tz::Tz;
use url::Url;

use crate::errors::BillingError;

pub const DEFAULT_COST_EXPLORER_REGION: &str = "ap-northeast-1";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub teams_webhook_url: Url,
    pub cost_explorer_region: String,
    pub report_timezone: Tz,
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns `ConfigError` when `TEAMS_WEBHOOK_URL` is missing or invalid,
    /// or `REPORT_TIMEZONE` is not a known IANA zone.
    pub fn from_env() -> Result<Self, BillingError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BillingError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let raw_url = non_blank("TEAMS_WEBHOOK_URL")
            .ok_or_else(|| BillingError::ConfigError("TEAMS_WEBHOOK_URL is not set".to_string()))?;
        let teams_webhook_url = parse_webhook_url(raw_url.trim())?;

        let cost_explorer_region = non_blank("COST_EXPLORER_REGION")
            .map_or_else(|| DEFAULT_COST_EXPLORER_REGION.to_string(), |v| v.trim().to_string());

        let report_timezone = match non_blank("REPORT_TIMEZONE") {
            Some(name) => name.trim().parse::<Tz>().map_err(|e| {
                BillingError::ConfigError(format!("REPORT_TIMEZONE: {e}"))
            })?,
            None => Tz::UTC,
        };

        Ok(Self {
            teams_webhook_url,
            cost_explorer_region,
            report_timezone,
        })
    }
}

fn parse_webhook_url(raw: &str) -> Result<Url, BillingError> {
    let url = Url::parse(raw)
        .map_err(|e| BillingError::ConfigError(format!("TEAMS_WEBHOOK_URL: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(BillingError::ConfigError(format!(
            "TEAMS_WEBHOOK_URL: unsupported scheme '{other}'"
        ))),
    }
}
