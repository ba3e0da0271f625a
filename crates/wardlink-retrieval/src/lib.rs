//! Wardlink Retrieval
//!
//! This crate provides the compliance gate between callers and the transport:
//! - `ComplianceGatedRetriever`, the typed fetch surface
//! - `RetrievalPolicy`, optional local screening applied after the remote gate

pub mod policy;
pub mod retriever;

pub use policy::{PolicyViolation, RetrievalPolicy, Screen};
pub use retriever::ComplianceGatedRetriever;
