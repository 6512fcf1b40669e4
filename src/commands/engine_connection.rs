// ABOUTME: Shared helper for building the engine client from CLI flags.
// ABOUTME: Resolves config file, environment, and detection into one EngineConfig.

use dockhand::config::{self, ConfigFile, EngineConfig, Overrides};
use dockhand::engine::DockerClient;
use dockhand::error::Result;
use std::path::Path;
use std::time::Duration;

/// Resolve the engine configuration and build a client for it.
///
/// An explicit `--config` path must exist; otherwise the working directory
/// is searched and a missing file is fine.
pub fn connect_to_engine(
    config_path: Option<&Path>,
    socket: Option<&Path>,
    timeout_ms: Option<u64>,
) -> Result<DockerClient> {
    let file = match config_path {
        Some(path) => Some(ConfigFile::load(path)?),
        None => ConfigFile::discover(&std::env::current_dir()?)?,
    };

    let overrides = Overrides {
        socket: socket.map(Path::to_path_buf),
        timeout: timeout_ms.map(Duration::from_millis),
    };
    let engine: EngineConfig = config::resolve(&overrides, file.as_ref())?;

    tracing::debug!(
        socket = %engine.socket_path.display(),
        timeout_ms = engine.timeout.as_millis() as u64,
        "engine configuration"
    );

    Ok(DockerClient::new(&engine))
}
