// ABOUTME: Serializable reply shapes for the caller-facing layer.
// ABOUTME: Success bodies per operation and the `{error}` body with its HTTP status.

use crate::engine::{ContainerDetail, InstanceInfo};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerList {
    pub containers: Vec<InstanceInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Created {
    pub success: bool,
    pub instance: InstanceInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Inspected {
    pub container: ContainerDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Done {
    pub success: bool,
}

impl Done {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Logs {
    pub logs: String,
}

/// Failure reply. Only `error` is serialized; `status` is the HTTP status to send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{error}")]
pub struct ApiError {
    #[serde(skip)]
    pub status: u16,
    pub error: String,
}

impl ApiError {
    pub fn new(status: u16, error: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
        }
    }

    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::new(400, error)
    }
}
