// ABOUTME: Engine connection configuration and its sources.
// ABOUTME: Layers CLI overrides, environment, config file, and socket detection.

mod error;
mod file;

pub use error::ConfigError;
pub use file::{CONFIG_FILENAME, CONFIG_FILENAME_ALT, CONFIG_FILENAME_DIR, ConfigFile};

use crate::engine::detection::{DOCKER_SOCKET, detect_local, socket_from_docker_host};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

pub const ENV_SOCKET: &str = "DOCKHAND_SOCKET";
pub const ENV_TIMEOUT_MS: &str = "DOCKHAND_TIMEOUT_MS";
pub const ENV_DOCKER_HOST: &str = "DOCKER_HOST";

/// Where and how long to talk to the engine.
///
/// Built once at startup and handed to the client; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub socket_path: PathBuf,
    pub timeout: Duration,
}

impl EngineConfig {
    pub fn new(socket_path: impl Into<PathBuf>) -> Self {
        Self {
            socket_path: socket_path.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(DOCKER_SOCKET)
    }
}

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub socket: Option<PathBuf>,
    pub timeout: Option<Duration>,
}

/// Resolve the engine configuration.
///
/// Precedence per field: overrides, environment, config file. The socket
/// falls back to local detection and then to the Docker default.
pub fn resolve(
    overrides: &Overrides,
    file: Option<&ConfigFile>,
) -> Result<EngineConfig, ConfigError> {
    let socket_path = match overrides
        .socket
        .clone()
        .or_else(socket_from_env)
        .or_else(|| file.and_then(|f| f.socket.clone()))
    {
        Some(path) => path,
        None => match detect_local() {
            Ok(detected) => {
                tracing::debug!(
                    engine = %detected.kind,
                    socket = %detected.socket_path.display(),
                    "detected local engine"
                );
                detected.socket_path
            }
            Err(e) => {
                tracing::debug!("{}, using {}", e, DOCKER_SOCKET);
                PathBuf::from(DOCKER_SOCKET)
            }
        },
    };

    let timeout = match overrides.timeout {
        Some(timeout) => timeout,
        None => match timeout_from_env()? {
            Some(timeout) => timeout,
            None => file.and_then(|f| f.timeout).unwrap_or(DEFAULT_TIMEOUT),
        },
    };

    Ok(EngineConfig {
        socket_path,
        timeout,
    })
}

fn socket_from_env() -> Option<PathBuf> {
    std::env::var_os(ENV_SOCKET)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var(ENV_DOCKER_HOST)
                .ok()
                .and_then(|host| socket_from_docker_host(&host))
        })
}

fn timeout_from_env() -> Result<Option<Duration>, ConfigError> {
    match std::env::var(ENV_TIMEOUT_MS) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse::<u64>()
            .map(|ms| Some(Duration::from_millis(ms)))
            .map_err(|_| ConfigError::InvalidEnv {
                var: ENV_TIMEOUT_MS.to_string(),
                value,
            }),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_docker_socket_with_thirty_seconds() {
        let config = EngineConfig::default();
        assert_eq!(config.socket_path, PathBuf::from("/var/run/docker.sock"));
        assert_eq!(config.timeout, Duration::from_millis(30_000));
    }

    #[test]
    fn overrides_beat_environment_and_file() {
        let file = ConfigFile {
            socket: Some(PathBuf::from("/from/file.sock")),
            timeout: Some(Duration::from_secs(9)),
        };
        let overrides = Overrides {
            socket: Some(PathBuf::from("/from/flag.sock")),
            timeout: Some(Duration::from_millis(1500)),
        };

        temp_env::with_vars(
            [
                (ENV_SOCKET, Some("/from/env.sock")),
                (ENV_TIMEOUT_MS, Some("700")),
            ],
            || {
                let config = resolve(&overrides, Some(&file)).unwrap();
                assert_eq!(config.socket_path, PathBuf::from("/from/flag.sock"));
                assert_eq!(config.timeout, Duration::from_millis(1500));
            },
        );
    }

    #[test]
    fn environment_beats_file() {
        let file = ConfigFile {
            socket: Some(PathBuf::from("/from/file.sock")),
            timeout: Some(Duration::from_secs(9)),
        };

        temp_env::with_vars(
            [
                (ENV_SOCKET, Some("/from/env.sock")),
                (ENV_TIMEOUT_MS, Some("700")),
            ],
            || {
                let config = resolve(&Overrides::default(), Some(&file)).unwrap();
                assert_eq!(config.socket_path, PathBuf::from("/from/env.sock"));
                assert_eq!(config.timeout, Duration::from_millis(700));
            },
        );
    }

    #[test]
    fn docker_host_unix_scheme_is_honoured() {
        temp_env::with_vars(
            [
                (ENV_SOCKET, None),
                (ENV_DOCKER_HOST, Some("unix:///tmp/engine.sock")),
            ],
            || {
                let config = resolve(&Overrides::default(), None).unwrap();
                assert_eq!(config.socket_path, PathBuf::from("/tmp/engine.sock"));
            },
        );
    }

    #[test]
    fn file_values_apply_without_overrides() {
        let file = ConfigFile {
            socket: Some(PathBuf::from("/from/file.sock")),
            timeout: Some(Duration::from_secs(9)),
        };

        temp_env::with_vars(
            [
                (ENV_SOCKET, None::<&str>),
                (ENV_TIMEOUT_MS, None),
                (ENV_DOCKER_HOST, None),
            ],
            || {
                let config = resolve(&Overrides::default(), Some(&file)).unwrap();
                assert_eq!(config.socket_path, PathBuf::from("/from/file.sock"));
                assert_eq!(config.timeout, Duration::from_secs(9));
            },
        );
    }

    #[test]
    fn invalid_timeout_env_is_an_error() {
        temp_env::with_var(ENV_TIMEOUT_MS, Some("soon"), || {
            let err = resolve(&Overrides::default(), None).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidEnv { .. }));
        });
    }
}
