//! Shared HTTP client utilities

use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::{debug, warn};
use wardlink_core::{RetrievalError, TransportError};

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Maximum number of idle connections per host
    pub pool_max_idle_per_host: usize,

    /// Maximum number of retries for transient errors
    pub max_retries: u32,

    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            // A retrieval exchange is a single small JSON round trip; anything
            // slower than this is a stuck bridge, not a slow payload.
            timeout_secs: 30,
            connect_timeout_secs: 10,
            pool_max_idle_per_host: 8,
            max_retries: 3,
            user_agent: format!("Wardlink/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Create a configured HTTP client with connection pooling
pub fn create_client(config: &HttpClientConfig) -> wardlink_core::Result<Client> {
    ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        // Expire idle connections before the bridge closes them server-side,
        // otherwise reused dead connections hang the next request.
        .pool_idle_timeout(Duration::from_secs(90))
        .user_agent(&config.user_agent)
        // Use rustls for TLS (no openssl dependency)
        .use_rustls_tls()
        .tcp_keepalive(Duration::from_secs(60))
        .build()
        .map_err(|e| RetrievalError::Config(format!("Failed to create HTTP client: {}", e)))
}

/// Retry policy for transient transport errors
pub async fn with_retry<F, Fut, T>(max_retries: u32, operation: F) -> Result<T, TransportError>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T, TransportError>>,
{
    let mut last_error = None;

    for attempt in 0..=max_retries {
        if attempt > 0 {
            let backoff_ms = 2u64.pow(attempt - 1) * 100; // Exponential backoff: 100ms, 200ms, 400ms
            debug!(
                "Retrying request after {}ms (attempt {}/{})",
                backoff_ms, attempt, max_retries
            );
            tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
        }

        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                let should_retry = match &e {
                    TransportError::Connection(_) | TransportError::Timeout(_) => true,
                    TransportError::Status { status_code, .. } => {
                        matches!(status_code, 500 | 502 | 503 | 504)
                    }
                    TransportError::RateLimited { .. } => true,
                    TransportError::Decode(_) => false,
                };

                if should_retry && attempt < max_retries {
                    warn!(
                        "Request failed (attempt {}/{}): {:?}",
                        attempt + 1,
                        max_retries,
                        e
                    );
                    last_error = Some(e);
                } else {
                    return Err(e);
                }
            }
        }
    }

    Err(last_error.unwrap_or_else(|| {
        TransportError::Connection("Retry loop exited unexpectedly".to_string())
    }))
}
