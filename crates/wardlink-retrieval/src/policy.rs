//! Local screening policy for already-compliant payloads
//!
//! The remote compliance verdict is the primary gate. Operators can tighten
//! it with local thresholds: payloads that clear the remote gate are still
//! withheld when they fall outside the configured corridor. All thresholds
//! are optional and the default policy is fully permissive.

use serde::{Deserialize, Serialize};
use wardlink_core::retrieval::{HostSnapshot, SessionEnvelope};

/// Threshold violation found while screening a payload
#[derive(Debug, Clone, thiserror::Error)]
#[error("{field} outside policy corridor: limit {limit}, observed {observed}")]
pub struct PolicyViolation {
    pub field: &'static str,
    pub limit: f64,
    pub observed: f64,
}

/// Operator-configured screening thresholds
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetrievalPolicy {
    /// Minimum acceptable signal-to-noise ratio, decibels
    #[serde(default)]
    pub snr_floor_db: Option<f32>,

    /// Maximum acceptable skin temperature, degrees Celsius
    #[serde(default)]
    pub thermo_ceiling_c: Option<f32>,

    /// Maximum acceptable duty fraction
    #[serde(default)]
    pub duty_ceiling: Option<f32>,

    /// Maximum acceptable corridor latency, milliseconds
    #[serde(default)]
    pub latency_ceiling_ms: Option<f32>,
}

impl RetrievalPolicy {
    /// A policy with no thresholds; remote compliance alone decides
    pub fn permissive() -> Self {
        Self::default()
    }

    /// Set the SNR floor
    pub fn with_snr_floor_db(mut self, floor: f32) -> Self {
        self.snr_floor_db = Some(floor);
        self
    }

    /// Set the thermal ceiling
    pub fn with_thermo_ceiling_c(mut self, ceiling: f32) -> Self {
        self.thermo_ceiling_c = Some(ceiling);
        self
    }

    /// Set the duty ceiling
    pub fn with_duty_ceiling(mut self, ceiling: f32) -> Self {
        self.duty_ceiling = Some(ceiling);
        self
    }

    /// Set the latency ceiling
    pub fn with_latency_ceiling_ms(mut self, ceiling: f32) -> Self {
        self.latency_ceiling_ms = Some(ceiling);
        self
    }
}

fn require_floor(field: &'static str, floor: Option<f32>, observed: f32) -> Result<(), PolicyViolation> {
    match floor {
        Some(floor) if observed < floor => Err(PolicyViolation {
            field,
            limit: floor as f64,
            observed: observed as f64,
        }),
        _ => Ok(()),
    }
}

fn require_ceiling(field: &'static str, ceiling: Option<f32>, observed: f32) -> Result<(), PolicyViolation> {
    match ceiling {
        Some(ceiling) if observed > ceiling => Err(PolicyViolation {
            field,
            limit: ceiling as f64,
            observed: observed as f64,
        }),
        _ => Ok(()),
    }
}

/// Screening hook for payload types that pass through the compliance gate
pub trait Screen {
    /// Check this payload against the policy; first violation wins
    fn screen(&self, policy: &RetrievalPolicy) -> Result<(), PolicyViolation>;
}

impl Screen for HostSnapshot {
    fn screen(&self, policy: &RetrievalPolicy) -> Result<(), PolicyViolation> {
        require_floor("snr_db", policy.snr_floor_db, self.snr_db)?;
        require_ceiling("thermo_c", policy.thermo_ceiling_c, self.thermo_c)?;
        require_ceiling("duty_fraction", policy.duty_ceiling, self.duty_fraction)?;
        Ok(())
    }
}

impl Screen for SessionEnvelope {
    fn screen(&self, policy: &RetrievalPolicy) -> Result<(), PolicyViolation> {
        // An envelope promising less than the local floor is itself unsafe
        require_floor("snr_min_db", policy.snr_floor_db, self.snr_min_db)?;
        require_ceiling("duty_max", policy.duty_ceiling, self.duty_max)?;
        require_ceiling("latency_max_ms", policy.latency_ceiling_ms, self.latency_max_ms)?;
        Ok(())
    }
}
