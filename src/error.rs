use crate::domain::ports::DispatchFailure;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("A payment request is already in progress")]
    RequestInProgress,
    #[error("Failed to start payment intent: {0}")]
    Dispatch(#[from] DispatchFailure),
    #[error("Payment request timed out after {0:?}")]
    Timeout(Duration),
    #[error("Payment request was cancelled")]
    Cancelled,
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BridgeError {
    /// Stable error code reported to the UI shell.
    pub fn code(&self) -> &'static str {
        match self {
            BridgeError::InvalidArgument(_) => "INVALID_ARGUMENT",
            BridgeError::RequestInProgress => "REQUEST_IN_PROGRESS",
            BridgeError::Dispatch(_) => "INTENT_ERROR",
            BridgeError::Timeout(_) => "TIMEOUT",
            BridgeError::Cancelled => "CANCELLED",
            BridgeError::Config(_) => "CONFIG_ERROR",
            BridgeError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
