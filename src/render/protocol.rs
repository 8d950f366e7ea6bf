//! Protocol definitions shared between the render coordinator and the query worker.

use crate::error::NavigatorError;

/// Identifier attached to cross-task requests so responses can be correlated.
pub type RequestId = u64;

/// Commands sent from the render coordinator to the query worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryCommand {
    Submit { request_id: RequestId, query: String },
    Shutdown,
}

/// Responses emitted by the query worker back to the coordinator.
#[derive(Debug)]
pub enum QueryResponse {
    /// The service answered; `display` is already normalized.
    Completed {
        request_id: RequestId,
        display: String,
    },
    Failed {
        request_id: RequestId,
        error: NavigatorError,
    },
}

impl QueryResponse {
    pub fn request_id(&self) -> RequestId {
        match self {
            QueryResponse::Completed { request_id, .. }
            | QueryResponse::Failed { request_id, .. } => *request_id,
        }
    }
}
