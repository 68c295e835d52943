//! Wire types of the registry protocol.

use serde::{Deserialize, Serialize};
use ztools_core::RequestStatus;

/// Body of `POST /requests`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRequest {
    /// Package identifier, passed through untouched.
    pub package: String,
}

/// Response of `POST /requests`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    /// Request id to poll.
    pub id: String,
}

/// Response of `GET /requests/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum StatusResponse {
    Pending,
    Success {
        /// Resolved package id, e.g. `com.unity.cinemachine@3.1.2`.
        package_id: String,
    },
    Failure {
        #[serde(default)]
        error: Option<String>,
    },
}

impl From<StatusResponse> for RequestStatus {
    fn from(status: StatusResponse) -> Self {
        match status {
            StatusResponse::Pending => RequestStatus::Pending,
            StatusResponse::Success { package_id } => RequestStatus::Success { package_id },
            StatusResponse::Failure { error } => RequestStatus::Failure {
                message: error.unwrap_or_else(|| "no error message provided".to_string()),
            },
        }
    }
}
