//! Wardlink Egress Connector
//!
//! This crate provides the production transport to the remote compliance
//! bridge:
//! - Bridge connector (HTTP, rustls)
//! - Shared HTTP client utilities and retry policy

pub mod bridge;
pub mod client;
pub mod retry_after;

pub use bridge::{BridgeConfig, BridgeConnector};
pub use retry_after::parse_retry_after;
