//! Retrieval request/response types and payload structures

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which remote query a request performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestAction {
    HostSnapshot,
    CorridorEnvelope,
}

/// A single retrieval request
///
/// Built through the action-specific constructors and immutable afterwards.
/// The target is a host ID or a session ID, selected by the action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalRequest {
    /// Correlation ID stamped per call
    pub request_id: Uuid,

    /// Which remote query to perform
    pub action: RequestAction,

    /// Host ID or session ID, mutually exclusive by action
    pub target_id: String,
}

impl RetrievalRequest {
    /// Build a host snapshot request
    pub fn host_snapshot(host_id: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            action: RequestAction::HostSnapshot,
            target_id: host_id.into(),
        }
    }

    /// Build a corridor envelope request
    pub fn corridor_envelope(session_id: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            action: RequestAction::CorridorEnvelope,
            target_id: session_id.into(),
        }
    }
}

/// Raw response as reported by the transport
///
/// At most one payload field is populated, matching the request's action,
/// and only when `compliant` is true. Payload fields on a non-compliant
/// response are ignored by the gate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetrievalResponse {
    /// Remote-side compliance verdict for this exchange
    pub compliant: bool,

    /// Populated for HostSnapshot requests when compliant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_snapshot: Option<HostSnapshot>,

    /// Populated for CorridorEnvelope requests when compliant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_envelope: Option<SessionEnvelope>,

    /// Remote-side explanation for a non-compliant verdict
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Host telemetry snapshot payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostSnapshot {
    pub host_id: String,

    /// Heart-rate variability, milliseconds
    pub hrv_ms: f32,

    /// Skin temperature, degrees Celsius
    pub thermo_c: f32,

    /// Fraction of the duty cycle in use
    pub duty_fraction: f32,

    pub fps: f32,

    /// Field of view, degrees
    pub fov_deg: f32,

    /// Signal-to-noise ratio, decibels
    pub snr_db: f32,
}

/// Session corridor envelope payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEnvelope {
    pub session_id: String,

    /// Minimum acceptable signal-to-noise ratio, decibels
    pub snr_min_db: f32,

    /// Energy budget ceiling, joules
    pub e_max_j: f64,

    /// Duty fraction ceiling
    pub duty_max: f32,

    /// Latency ceiling, milliseconds
    pub latency_max_ms: f32,
}
