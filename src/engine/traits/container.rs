// ABOUTME: Container lifecycle operations for engine backends.
// ABOUTME: List, create, start, stop, remove, and inspect containers.

use crate::engine::error::BackendError;
use crate::engine::types::{CreateOptions, InstanceInfo, RemoveOptions};
use async_trait::async_trait;
use serde_json::Value;

/// Container lifecycle operations.
///
/// Calls are independent: nothing here serializes operations on the same id.
#[async_trait]
pub trait ContainerOps: Send + Sync {
    /// List containers; stopped ones are included when `all` is set.
    async fn list_containers(&self, all: bool) -> Result<Vec<InstanceInfo>, BackendError>;

    /// Create a container. The returned name and image echo `options`.
    async fn create_container(&self, options: &CreateOptions)
    -> Result<InstanceInfo, BackendError>;

    async fn start_container(&self, id: &str) -> Result<(), BackendError>;

    /// Stop a container, letting the engine wait `timeout_seconds` before killing it.
    async fn stop_container(
        &self,
        id: &str,
        timeout_seconds: Option<u32>,
    ) -> Result<(), BackendError>;

    async fn remove_container(&self, id: &str, options: RemoveOptions)
    -> Result<(), BackendError>;

    /// Raw inspect document. Only guaranteed to be a JSON object; see
    /// [`normalize_inspect`](crate::engine::normalize_inspect) for a stable shape.
    async fn inspect_container(&self, id: &str) -> Result<Value, BackendError>;
}
