// ABOUTME: Local engine socket discovery for Docker and Podman.
// ABOUTME: Probes well-known socket paths and parses unix:// DOCKER_HOST values.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DOCKER_SOCKET: &str = "/var/run/docker.sock";
const ROOTFUL_PODMAN: &str = "/run/podman/podman.sock";

/// Which engine a socket belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    Docker,
    Podman,
}

impl std::fmt::Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineKind::Docker => write!(f, "docker"),
            EngineKind::Podman => write!(f, "podman"),
        }
    }
}

/// A socket found on this host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedEngine {
    pub kind: EngineKind,
    pub socket_path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("no engine socket found (checked Podman and Docker sockets)")]
    NoEngineFound,
}

/// Detect an engine socket on the local system.
///
/// Detection order:
/// 1. Rootless Podman socket (`/run/user/$UID/podman/podman.sock`)
/// 2. Rootful Podman socket (`/run/podman/podman.sock`)
/// 3. Docker socket (`/var/run/docker.sock`)
pub fn detect_local() -> Result<DetectedEngine, DetectionError> {
    let rootless = current_uid().map(|uid| rootless_podman_socket(&uid));
    let candidates = rootless
        .into_iter()
        .map(|path| (EngineKind::Podman, path))
        .chain([
            (EngineKind::Podman, PathBuf::from(ROOTFUL_PODMAN)),
            (EngineKind::Docker, PathBuf::from(DOCKER_SOCKET)),
        ]);

    first_existing(candidates).ok_or(DetectionError::NoEngineFound)
}

fn first_existing(
    candidates: impl IntoIterator<Item = (EngineKind, PathBuf)>,
) -> Option<DetectedEngine> {
    candidates
        .into_iter()
        .find(|(_, path)| Path::new(path).exists())
        .map(|(kind, socket_path)| DetectedEngine { kind, socket_path })
}

fn rootless_podman_socket(uid: &str) -> PathBuf {
    PathBuf::from(format!("/run/user/{}/podman/podman.sock", uid))
}

fn current_uid() -> Option<String> {
    std::env::var("UID").ok().or_else(|| {
        std::fs::read_to_string("/proc/self/status")
            .ok()
            .and_then(|status| {
                status
                    .lines()
                    .find(|l| l.starts_with("Uid:"))
                    .and_then(|l| l.split_whitespace().nth(1))
                    .map(str::to_string)
            })
    })
}

/// Extract the socket path from a `DOCKER_HOST` value.
///
/// Only the `unix://` scheme names a domain socket; TCP and SSH hosts yield `None`.
pub fn socket_from_docker_host(host: &str) -> Option<PathBuf> {
    host.trim()
        .strip_prefix("unix://")
        .filter(|path| !path.is_empty())
        .map(PathBuf::from)
}
