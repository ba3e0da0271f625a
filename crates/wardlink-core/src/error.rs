//! Error types for Wardlink Core

use crate::transport::TransportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Transport failure: {0}")]
    Transport(#[from] TransportError),

    #[error("Remote declined to certify data{}", reason.as_ref().map(|r| format!(": {}", r)).unwrap_or_default())]
    NonCompliant { reason: Option<String> },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, RetrievalError>;
