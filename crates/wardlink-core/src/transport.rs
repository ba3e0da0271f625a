//! Transport capability trait and transport-level errors

use crate::retrieval::{RetrievalRequest, RetrievalResponse};
use thiserror::Error;

/// Errors a transport can report while completing an exchange
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Request timeout after {0}s")]
    Timeout(u64),

    #[error("Bridge returned {status_code}: {message}")]
    Status { status_code: u16, message: String },

    #[error("Rate limit exceeded{}", retry_after_secs.map(|s| format!(": retry after {}s", s)).unwrap_or_default())]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Send a retrieval request and return the raw response.
    ///
    /// Implementations own retry and timeout policy. The `compliant` flag on
    /// the returned response must reflect the remote-side compliance
    /// evaluation exactly; a well-formed non-compliant response is a
    /// successful exchange, not an error.
    async fn send(&self, request: RetrievalRequest) -> Result<RetrievalResponse, TransportError>;
}
