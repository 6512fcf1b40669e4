// ABOUTME: Engine-level operations that are not tied to a container.
// ABOUTME: Connectivity check.

use crate::engine::error::BackendError;
use async_trait::async_trait;

#[async_trait]
pub trait SystemOps: Send + Sync {
    /// Check that the engine answers.
    async fn ping(&self) -> Result<(), BackendError>;
}
