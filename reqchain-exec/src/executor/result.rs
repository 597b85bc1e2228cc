use reqchain_core::ReferenceError;

use crate::executor::transport::TransportError;

/// Per-request outcome of one run. Produced fresh each run; templates are
/// never mutated to record results.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionResult {
    pub id: String,
    /// None when the call never produced a status (reference or transport
    /// failure).
    pub status_code: Option<u16>,
    pub state: RequestState,
    /// Raw response body; empty when no response was received.
    pub body: String,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestState {
    Executed,
    Failed(FailureReason),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FailureReason {
    #[error("reference resolution failed: {0}")]
    Reference(#[from] ReferenceError),
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),
    #[error("http status {0}")]
    HttpStatus(u16),
}

impl ExecutionResult {
    pub fn is_executed(&self) -> bool {
        matches!(self.state, RequestState::Executed)
    }

    pub fn failure(&self) -> Option<&FailureReason> {
        match &self.state {
            RequestState::Executed => None,
            RequestState::Failed(reason) => Some(reason),
        }
    }

    /// Presentation label: `Executed` or `Error`.
    pub fn state_label(&self) -> &'static str {
        match self.state {
            RequestState::Executed => "Executed",
            RequestState::Failed(_) => "Error",
        }
    }

    /// A reference failure means later requests in the flow may depend on an
    /// id that will never resolve, so the flow cannot meaningfully continue.
    pub fn aborts_flow(&self) -> bool {
        matches!(
            self.state,
            RequestState::Failed(FailureReason::Reference(_))
        )
    }
}
