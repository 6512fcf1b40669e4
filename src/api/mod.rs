// ABOUTME: Caller-facing reply layer over any engine backend.
// ABOUTME: Validates input, runs the operation, and shapes `{...}` / `{error}` replies.

mod reply;

pub use reply::{ApiError, ContainerList, Created, Done, Inspected, Logs};

use crate::engine::{
    BackendError, ContainerOps, CreateOptions, ImageOps, LogOps, LogsOptions, RemoveOptions,
    normalize_inspect,
};
use serde_json::Value;

pub const CONTAINER_NOT_FOUND: &str = "Container not found";

pub async fn list_containers<B>(backend: &B, all: bool) -> Result<ContainerList, ApiError>
where
    B: ContainerOps + ?Sized,
{
    let containers = backend.list_containers(all).await.map_err(ApiError::from)?;
    Ok(ContainerList { containers })
}

/// Create from an untrusted JSON request body.
///
/// Input problems are rejected with 400 before the engine is contacted.
pub async fn create_container_from_json<B>(backend: &B, body: &[u8]) -> Result<Created, ApiError>
where
    B: ContainerOps + ?Sized,
{
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::bad_request(format!("invalid request body: {}", e)))?;
    if !value.is_object() {
        return Err(ApiError::bad_request("request body must be a JSON object"));
    }
    match value.get("image") {
        Some(Value::String(image)) if !image.trim().is_empty() => {}
        _ => return Err(ApiError::bad_request("image is required")),
    }
    let options: CreateOptions = serde_json::from_value(value)
        .map_err(|e| ApiError::bad_request(format!("invalid request body: {}", e)))?;

    create_container(backend, &options).await
}

pub async fn create_container<B>(backend: &B, options: &CreateOptions) -> Result<Created, ApiError>
where
    B: ContainerOps + ?Sized,
{
    if options.image.trim().is_empty() {
        return Err(ApiError::bad_request("image is required"));
    }
    let instance = backend
        .create_container(options)
        .await
        .map_err(ApiError::from)?;
    Ok(Created {
        success: true,
        instance,
    })
}

pub async fn start_container<B>(backend: &B, id: &str) -> Result<Done, ApiError>
where
    B: ContainerOps + ?Sized,
{
    require_id(id)?;
    backend.start_container(id).await.map_err(ApiError::from)?;
    Ok(Done::ok())
}

pub async fn stop_container<B>(
    backend: &B,
    id: &str,
    timeout_seconds: Option<u32>,
) -> Result<Done, ApiError>
where
    B: ContainerOps + ?Sized,
{
    require_id(id)?;
    backend
        .stop_container(id, timeout_seconds)
        .await
        .map_err(ApiError::from)?;
    Ok(Done::ok())
}

pub async fn remove_container<B>(
    backend: &B,
    id: &str,
    options: RemoveOptions,
) -> Result<Done, ApiError>
where
    B: ContainerOps + ?Sized,
{
    require_id(id)?;
    backend
        .remove_container(id, options)
        .await
        .map_err(ApiError::from)?;
    Ok(Done::ok())
}

/// Inspect and normalize. A 404 from the engine becomes "Container not found".
pub async fn inspect_container<B>(backend: &B, id: &str) -> Result<Inspected, ApiError>
where
    B: ContainerOps + ?Sized,
{
    require_id(id)?;
    let raw = backend
        .inspect_container(id)
        .await
        .map_err(|e| {
            if e.is_not_found() {
                ApiError::new(404, CONTAINER_NOT_FOUND)
            } else {
                ApiError::from(e)
            }
        })?;
    Ok(Inspected {
        container: normalize_inspect(raw, id),
    })
}

pub async fn container_logs<B>(
    backend: &B,
    id: &str,
    options: &LogsOptions,
) -> Result<Logs, ApiError>
where
    B: LogOps + ?Sized,
{
    require_id(id)?;
    let logs = backend
        .container_logs(id, options)
        .await
        .map_err(ApiError::from)?;
    Ok(Logs { logs })
}

pub async fn pull_image<B>(backend: &B, image: &str) -> Result<Done, ApiError>
where
    B: ImageOps + ?Sized,
{
    if image.trim().is_empty() {
        return Err(ApiError::bad_request("image is required"));
    }
    backend.pull_image(image).await.map_err(ApiError::from)?;
    Ok(Done::ok())
}

fn require_id(id: &str) -> Result<(), ApiError> {
    if id.trim().is_empty() {
        Err(ApiError::bad_request("container id is required"))
    } else {
        Ok(())
    }
}

impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        ApiError::new(err.status_code().unwrap_or(500), err.message())
    }
}
