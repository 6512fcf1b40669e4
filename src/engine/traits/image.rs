// ABOUTME: Image operations for engine backends.
// ABOUTME: Pull images by reference.

use crate::engine::error::BackendError;
use async_trait::async_trait;

#[async_trait]
pub trait ImageOps: Send + Sync {
    /// Ask the engine to pull `image`. Succeeds on any non-error status.
    async fn pull_image(&self, image: &str) -> Result<(), BackendError>;
}
