// ABOUTME: Log retrieval for engine backends.
// ABOUTME: Returns the engine's log output as raw text.

use crate::engine::error::BackendError;
use crate::engine::types::LogsOptions;
use async_trait::async_trait;

#[async_trait]
pub trait LogOps: Send + Sync {
    /// Fetch logs without following; the body is returned undecoded.
    async fn container_logs(&self, id: &str, options: &LogsOptions)
    -> Result<String, BackendError>;
}
