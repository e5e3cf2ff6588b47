//! Error handling for SafeSend
//!
//! This module defines the error types used throughout the crate.

use thiserror::Error;

/// SafeSend error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SafeSendError {
    #[error("Token catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Balance query failed: {0}")]
    BalanceQueryFailed(String),

    #[error("Invalid recipient: {0}")]
    InvalidRecipient(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("No tokens selected")]
    EmptySelection,

    #[error("Submission failed: {0}")]
    SubmissionFailed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SafeSendError {
    /// Create a catalog unavailable error
    pub fn catalog_unavailable(message: impl Into<String>) -> Self {
        Self::CatalogUnavailable(message.into())
    }

    /// Create a balance query error
    pub fn balance_query_failed(message: impl Into<String>) -> Self {
        Self::BalanceQueryFailed(message.into())
    }

    /// Create an invalid recipient error
    pub fn invalid_recipient(message: impl Into<String>) -> Self {
        Self::InvalidRecipient(message.into())
    }

    /// Create an invalid amount error
    pub fn invalid_amount(message: impl Into<String>) -> Self {
        Self::InvalidAmount(message.into())
    }

    /// Create a submission error
    pub fn submission_failed(message: impl Into<String>) -> Self {
        Self::SubmissionFailed(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Message shown to the user when this error blocks progression.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::CatalogUnavailable(_) => "Failed to load tokens. Please refresh the page.",
            Self::EmptySelection => "Please select at least one token and enter a recipient address",
            Self::InvalidRecipient(_) => "Invalid recipient address",
            Self::InvalidAmount(_) => "Invalid token amount",
            Self::SubmissionFailed(_) => "Failed to submit transaction",
            Self::BalanceQueryFailed(_) | Self::Network(_) => "Network request failed",
            Self::Config(_) | Self::Internal(_) => "Unexpected error",
        }
    }
}

// Standard library error conversions
impl From<serde_json::Error> for SafeSendError {
    fn from(err: serde_json::Error) -> Self {
        Self::catalog_unavailable(format!("JSON error: {}", err))
    }
}

impl From<reqwest::Error> for SafeSendError {
    fn from(err: reqwest::Error) -> Self {
        Self::network(format!("HTTP error: {}", err))
    }
}

impl From<config::ConfigError> for SafeSendError {
    fn from(err: config::ConfigError) -> Self {
        Self::config(err.to_string())
    }
}

impl From<tokio::task::JoinError> for SafeSendError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::internal(format!("Task join error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let amount_error = SafeSendError::invalid_amount("too many decimals");
        let recipient_error = SafeSendError::invalid_recipient("0x12");
        let config_error = SafeSendError::config("missing rpc url");

        assert!(matches!(amount_error, SafeSendError::InvalidAmount(_)));
        assert!(matches!(recipient_error, SafeSendError::InvalidRecipient(_)));
        assert!(matches!(config_error, SafeSendError::Config(_)));
    }

    #[test]
    fn test_error_conversions() {
        let json_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error: SafeSendError = json_error.into();

        assert!(matches!(error, SafeSendError::CatalogUnavailable(_)));
    }

    #[test]
    fn test_error_display() {
        let error = SafeSendError::submission_failed("rejected by owner");
        let display = format!("{}", error);

        assert!(display.contains("Submission failed"));
        assert!(display.contains("rejected by owner"));
        assert_eq!(SafeSendError::EmptySelection.to_string(), "No tokens selected");
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            SafeSendError::invalid_recipient("x").user_message(),
            "Invalid recipient address"
        );
        assert_eq!(
            SafeSendError::submission_failed("x").user_message(),
            "Failed to submit transaction"
        );
        assert_eq!(
            SafeSendError::catalog_unavailable("x").user_message(),
            "Failed to load tokens. Please refresh the page."
        );
    }
}
