//! Compliance-gated retriever
//!
//! Translates a typed retrieval intent into a transport call, enforces the
//! compliance gate and hands back validated data. Both fetch operations
//! funnel through one private helper so the gate policy cannot drift
//! between call sites. Callers that need a degraded-mode fallback branch on
//! `RetrievalError::NonCompliant`; this component never substitutes data.

use crate::policy::{RetrievalPolicy, Screen};
use tracing::{debug, error, warn};
use wardlink_core::{
    Result, RetrievalError, Transport,
    retrieval::{HostSnapshot, RetrievalRequest, RetrievalResponse, SessionEnvelope},
};

pub struct ComplianceGatedRetriever<T> {
    transport: T,
    policy: RetrievalPolicy,
}

impl<T: Transport> ComplianceGatedRetriever<T> {
    /// Create a retriever with a fully permissive local policy
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            policy: RetrievalPolicy::permissive(),
        }
    }

    /// Replace the local screening policy
    pub fn with_policy(mut self, policy: RetrievalPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Pull the telemetry snapshot for a host
    pub async fn fetch_host_snapshot(&self, host_id: &str) -> Result<HostSnapshot> {
        let request = validated(host_id, "host_id", RetrievalRequest::host_snapshot)?;
        self.retrieve(request, |response| response.host_snapshot).await
    }

    /// Pull the corridor envelope for a session
    pub async fn fetch_corridor_envelope(&self, session_id: &str) -> Result<SessionEnvelope> {
        let request = validated(session_id, "session_id", RetrievalRequest::corridor_envelope)?;
        self.retrieve(request, |response| response.session_envelope).await
    }

    /// The gate funnel shared by both fetch operations.
    ///
    /// Order matters: transport outcome, remote compliance verdict, payload
    /// presence for the requested action, local screening. A response built
    /// for the other action extracts to `None` and fails as malformed.
    async fn retrieve<P>(
        &self,
        request: RetrievalRequest,
        extract: impl FnOnce(RetrievalResponse) -> Option<P>,
    ) -> Result<P>
    where
        P: Screen,
    {
        let request_id = request.request_id;
        let action = request.action;
        debug!(%request_id, ?action, target_id = %request.target_id, "Dispatching retrieval request");

        let response = self.transport.send(request).await?;

        if !response.compliant {
            warn!(
                %request_id,
                ?action,
                reason = response.reason.as_deref().unwrap_or("unspecified"),
                "Remote withheld data; caller may fall back to degraded mode"
            );
            return Err(RetrievalError::NonCompliant {
                reason: response.reason,
            });
        }

        let Some(payload) = extract(response) else {
            error!(%request_id, ?action, "Compliant response is missing the payload for the requested action");
            return Err(RetrievalError::MalformedResponse(format!(
                "compliant response missing payload for {:?}",
                action
            )));
        };

        if let Err(violation) = payload.screen(&self.policy) {
            warn!(%request_id, ?action, %violation, "Payload rejected by local screening policy");
            return Err(RetrievalError::NonCompliant {
                reason: Some(violation.to_string()),
            });
        }

        debug!(%request_id, ?action, "Retrieval complete");
        Ok(payload)
    }
}

fn validated(
    id: &str,
    label: &str,
    build: impl FnOnce(String) -> RetrievalRequest,
) -> Result<RetrievalRequest> {
    // Whitespace-only identifiers can never address a host or session
    if id.trim().is_empty() {
        return Err(RetrievalError::InvalidInput(format!(
            "{} must be non-empty",
            label
        )));
    }
    Ok(build(id.to_string()))
}
