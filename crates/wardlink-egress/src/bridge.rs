//! Bridge connector
//!
//! Speaks the compliance bridge's JSON retrieval endpoint and maps HTTP
//! failures into transport errors. Compliance is not interpreted here: a
//! well-formed non-compliant response is a successful exchange that the
//! retriever gates downstream.

use crate::{
    client::{HttpClientConfig, create_client, with_retry},
    retry_after::parse_retry_after,
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};
use wardlink_core::{
    Transport, TransportError,
    retrieval::{RetrievalRequest, RetrievalResponse},
};

/// Bridge connector configuration
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// API key for authentication; empty disables the auth header
    pub api_key: String,

    /// Base URL for the bridge
    pub base_url: String,

    /// HTTP client configuration
    pub client_config: HttpClientConfig,
}

impl BridgeConfig {
    /// Create a new bridge configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api_key: String::new(),
            base_url: base_url.into(),
            client_config: HttpClientConfig::default(),
        }
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Set the HTTP client configuration
    pub fn with_client_config(mut self, client_config: HttpClientConfig) -> Self {
        self.client_config = client_config;
        self
    }
}

/// Bridge connector
pub struct BridgeConnector {
    config: BridgeConfig,
    client: Client,
}

impl BridgeConnector {
    /// Create a new bridge connector
    pub fn new(config: BridgeConfig) -> wardlink_core::Result<Self> {
        let client = create_client(&config.client_config)?;
        Ok(Self { config, client })
    }

    /// One attempt: POST the request and decode the outcome
    async fn dispatch(
        &self,
        request: &RetrievalRequest,
    ) -> Result<RetrievalResponse, TransportError> {
        debug!(
            "Bridge request body: {}",
            serde_json::to_string_pretty(request)
                .unwrap_or_else(|_| "Failed to serialize".to_string())
        );

        let mut request_builder = self
            .client
            .post(format!("{}/v1/retrieval", self.config.base_url))
            .header("Content-Type", "application/json");

        if !self.config.api_key.is_empty() {
            request_builder = request_builder.header("x-api-key", &self.config.api_key);
        }

        let response = request_builder
            .json(request)
            .send()
            .await
            .map_err(|e| self.classify_send_error(e))?;

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(parse_retry_after);
            return Err(TransportError::RateLimited { retry_after_secs });
        }

        if !status.is_success() {
            let status_code = status.as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            return Err(TransportError::Status {
                status_code,
                message,
            });
        }

        response
            .json::<RetrievalResponse>()
            .await
            .map_err(|e| TransportError::Decode(format!("Failed to parse bridge response: {}", e)))
    }

    fn classify_send_error(&self, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout(self.config.client_config.timeout_secs)
        } else {
            TransportError::Connection(error.to_string())
        }
    }
}

#[async_trait]
impl Transport for BridgeConnector {
    #[instrument(skip(self, request), fields(request_id = %request.request_id, action = ?request.action))]
    async fn send(&self, request: RetrievalRequest) -> Result<RetrievalResponse, TransportError> {
        debug!("Sending retrieval request to bridge");

        with_retry(self.config.client_config.max_retries, || {
            self.dispatch(&request)
        })
        .await
    }
}
