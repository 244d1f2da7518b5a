use aws_sdk_costexplorer::error::SdkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BillingError {
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Invalid billing period: {0}")]
    InvalidPeriod(String),

    #[error("Failed to query Cost Explorer: {0}")]
    AwsError(String),

    #[error("Unexpected Cost Explorer response: {0}")]
    MalformedResponse(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),
}

impl From<reqwest::Error> for BillingError {
    fn from(error: reqwest::Error) -> Self {
        BillingError::HttpError(error.to_string())
    }
}

impl From<anyhow::Error> for BillingError {
    fn from(error: anyhow::Error) -> Self {
        BillingError::MalformedResponse(format!("{error:#}"))
    }
}

// Generic implementation for AWS SDK errors
impl<E, R> From<SdkError<E, R>> for BillingError
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug,
{
    fn from(error: SdkError<E, R>) -> Self {
        BillingError::AwsError(aws_sdk_costexplorer::error::DisplayErrorContext(&error).to_string())
    }
}
