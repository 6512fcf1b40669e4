// ABOUTME: Container engine access over the local Unix socket.
// ABOUTME: Transport, typed operations, normalization, and the error taxonomy.

mod client;
pub mod detection;
mod error;
mod normalize;
pub mod parse;
pub mod traits;
mod transport;
mod types;

pub use client::{DockerClient, bind_string, create_body, env_entries};
pub use detection::{DetectedEngine, DetectionError, EngineKind, detect_local};
pub use error::{
    BackendError, ErrorDetails, STATUS_MALFORMED, STATUS_TIMEOUT, STATUS_UNAVAILABLE,
};
pub use normalize::{normalize_inspect, summary_to_instance};
pub use traits::{ContainerOps, EngineBackend, ImageOps, LogOps, SystemOps};
pub use transport::{EngineRequest, EngineResponse, Transport, USER_AGENT, merge_headers};
pub use types::{
    Command, ContainerDetail, CreateOptions, Environment, InstanceInfo, LogsOptions, MountRecord,
    PortRecord, RemoveOptions, Tail, VolumeBind,
};
