// ABOUTME: Docker-compatible engine client over the Unix socket transport.
// ABOUTME: Encodes each lifecycle operation into a request and decodes the reply.

use super::error::BackendError;
use super::normalize::summary_to_instance;
use super::transport::{EngineRequest, EngineResponse, Transport};
use super::traits::{ContainerOps, ImageOps, LogOps, SystemOps};
use super::types::{
    CreateOptions, Environment, InstanceInfo, LogsOptions, RemoveOptions, VolumeBind,
};
use crate::config::EngineConfig;
use async_trait::async_trait;
use serde_json::{Map, Value, json};

// =============================================================================
// Request encoding
// =============================================================================

/// `source:target`, with `:ro` appended for read-only binds.
pub fn bind_string(bind: &VolumeBind) -> String {
    if bind.read_only {
        format!("{}:{}:ro", bind.source, bind.target)
    } else {
        format!("{}:{}", bind.source, bind.target)
    }
}

/// `KEY=VALUE` entries in caller order.
pub fn env_entries(environment: &Environment) -> Vec<String> {
    environment
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect()
}

/// Engine body for `POST /containers/create`.
pub fn create_body(options: &CreateOptions) -> Value {
    let mut body = Map::new();
    body.insert("Image".to_string(), json!(options.image));
    if let Some(command) = &options.command {
        body.insert("Cmd".to_string(), json!(command));
    }
    if let Some(environment) = &options.environment {
        body.insert("Env".to_string(), json!(env_entries(environment)));
    }
    if let Some(dir) = &options.working_directory {
        body.insert("WorkingDir".to_string(), json!(dir));
    }
    if !options.volumes.is_empty() {
        let binds: Vec<String> = options.volumes.iter().map(bind_string).collect();
        body.insert("HostConfig".to_string(), json!({ "Binds": binds }));
    }
    Value::Object(body)
}

fn container_path(id: &str, suffix: &str) -> String {
    format!("/containers/{}{}", urlencoding::encode(id), suffix)
}

fn flag(on: bool) -> u8 {
    u8::from(on)
}

fn list_path(all: bool) -> String {
    format!("/containers/json?all={}", flag(all))
}

fn create_path(name: Option<&str>) -> String {
    match name {
        Some(name) => format!("/containers/create?name={}", urlencoding::encode(name)),
        None => "/containers/create".to_string(),
    }
}

fn stop_path(id: &str, timeout_seconds: Option<u32>) -> String {
    match timeout_seconds {
        Some(t) => container_path(id, &format!("/stop?t={}", t)),
        None => container_path(id, "/stop"),
    }
}

fn remove_path(id: &str, options: RemoveOptions) -> String {
    let mut query = Vec::new();
    if options.force {
        query.push("force=1");
    }
    if options.remove_volumes {
        query.push("v=1");
    }
    if query.is_empty() {
        container_path(id, "")
    } else {
        container_path(id, &format!("?{}", query.join("&")))
    }
}

fn logs_path(id: &str, options: &LogsOptions) -> String {
    let mut query = format!(
        "stdout={}&stderr={}&timestamps=0&follow=0",
        flag(options.stdout != Some(false)),
        flag(options.stderr != Some(false)),
    );
    if let Some(since) = &options.since {
        query.push_str(&format!("&since={}", urlencoding::encode(since)));
    }
    if let Some(tail) = options.tail {
        query.push_str(&format!("&tail={}", tail));
    }
    container_path(id, &format!("/logs?{}", query))
}

fn pull_path(image: &str) -> String {
    format!("/images/create?fromImage={}", urlencoding::encode(image))
}

// =============================================================================
// DockerClient
// =============================================================================

/// Engine client speaking the Docker-compatible API (Docker or Podman).
///
/// Holds only its configuration; every call opens its own connection.
#[derive(Debug, Clone)]
pub struct DockerClient {
    transport: Transport,
}

impl DockerClient {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            transport: Transport::new(config),
        }
    }

    async fn send(&self, request: EngineRequest) -> Result<EngineResponse, BackendError> {
        self.transport.execute(request).await
    }
}

#[async_trait]
impl ContainerOps for DockerClient {
    async fn list_containers(&self, all: bool) -> Result<Vec<InstanceInfo>, BackendError> {
        let response = self.send(EngineRequest::get(list_path(all))).await?;
        let document = response.json()?;
        let Some(entries) = document.as_array() else {
            return Err(BackendError::malformed(
                "container list is not an array",
                response.text(),
            ));
        };

        Ok(entries.iter().filter_map(summary_to_instance).collect())
    }

    async fn create_container(
        &self,
        options: &CreateOptions,
    ) -> Result<InstanceInfo, BackendError> {
        let request =
            EngineRequest::post(create_path(options.name.as_deref())).json(create_body(options));
        let response = self.send(request).await?;
        let document = response.json()?;

        let Some(id) = document.get("Id").and_then(Value::as_str) else {
            return Err(BackendError::malformed(
                "create response has no Id",
                response.text(),
            ));
        };

        if let Some(warnings) = document.get("Warnings").and_then(Value::as_array) {
            for warning in warnings.iter().filter_map(Value::as_str) {
                tracing::warn!(container = %id, "engine warning: {}", warning);
            }
        }

        Ok(InstanceInfo {
            id: id.to_string(),
            name: options.name.clone(),
            image: Some(options.image.clone()),
            ..Default::default()
        })
    }

    async fn start_container(&self, id: &str) -> Result<(), BackendError> {
        self.send(EngineRequest::post(container_path(id, "/start")))
            .await
            .map(drop)
    }

    async fn stop_container(
        &self,
        id: &str,
        timeout_seconds: Option<u32>,
    ) -> Result<(), BackendError> {
        self.send(EngineRequest::post(stop_path(id, timeout_seconds)))
            .await
            .map(drop)
    }

    async fn remove_container(&self, id: &str, options: RemoveOptions) -> Result<(), BackendError> {
        self.send(EngineRequest::delete(remove_path(id, options)))
            .await
            .map(drop)
    }

    async fn inspect_container(&self, id: &str) -> Result<Value, BackendError> {
        let response = self
            .send(EngineRequest::get(container_path(id, "/json")))
            .await?;
        let document = response.json()?;
        if !document.is_object() {
            return Err(BackendError::malformed(
                "inspect document is not an object",
                response.text(),
            ));
        }
        Ok(document)
    }
}

#[async_trait]
impl LogOps for DockerClient {
    async fn container_logs(
        &self,
        id: &str,
        options: &LogsOptions,
    ) -> Result<String, BackendError> {
        let request = EngineRequest::get(logs_path(id, options)).header("Accept", "text/plain");
        Ok(self.send(request).await?.text())
    }
}

#[async_trait]
impl ImageOps for DockerClient {
    async fn pull_image(&self, image: &str) -> Result<(), BackendError> {
        let response = self.send(EngineRequest::post(pull_path(image))).await?;

        // Progress is a stream of JSON objects; failures can arrive inside a 200.
        for line in response.text().lines() {
            if let Ok(progress) = serde_json::from_str::<Value>(line)
                && let Some(error) = progress.get("error").and_then(Value::as_str)
            {
                tracing::warn!(image = %image, "engine reported pull error: {}", error);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl SystemOps for DockerClient {
    async fn ping(&self) -> Result<(), BackendError> {
        self.send(EngineRequest::get("/_ping").header("Accept", "text/plain"))
            .await
            .map(drop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::Tail;

    fn bind(source: &str, target: &str, read_only: bool) -> VolumeBind {
        VolumeBind {
            source: source.to_string(),
            target: target.to_string(),
            read_only,
        }
    }

    #[test]
    fn create_body_matches_engine_shape() {
        let options = CreateOptions {
            image: "node:18".to_string(),
            name: Some("x".to_string()),
            command: Some(vec!["node".to_string(), "app.js".to_string()]),
            environment: Some([("NODE_ENV", "production")].into_iter().collect()),
            volumes: vec![bind("/data", "/app/data", false)],
            working_directory: None,
        };

        assert_eq!(
            create_body(&options),
            json!({
                "Image": "node:18",
                "Cmd": ["node", "app.js"],
                "Env": ["NODE_ENV=production"],
                "HostConfig": {"Binds": ["/data:/app/data"]}
            })
        );
    }

    #[test]
    fn create_body_omits_empty_volumes_and_keeps_workdir() {
        let mut options = CreateOptions::new("alpine");
        options.working_directory = Some("/srv".to_string());
        assert_eq!(
            create_body(&options),
            json!({"Image": "alpine", "WorkingDir": "/srv"})
        );
    }

    #[test]
    fn env_entries_keep_caller_order() {
        let env: Environment = [("ZED", "1"), ("ALPHA", "2")].into_iter().collect();
        assert_eq!(env_entries(&env), vec!["ZED=1", "ALPHA=2"]);
    }

    #[test]
    fn read_only_bind_gets_suffix() {
        assert_eq!(bind_string(&bind("/a", "/b", true)), "/a:/b:ro");
        assert_eq!(bind_string(&bind("/a", "/b", false)), "/a:/b");
    }

    #[test]
    fn ids_are_percent_encoded() {
        assert_eq!(
            container_path("my app/1", "/start"),
            "/containers/my%20app%2F1/start"
        );
    }

    #[test]
    fn list_path_flags() {
        assert_eq!(list_path(true), "/containers/json?all=1");
        assert_eq!(list_path(false), "/containers/json?all=0");
    }

    #[test]
    fn create_path_encodes_name() {
        assert_eq!(create_path(None), "/containers/create");
        assert_eq!(create_path(Some("a b")), "/containers/create?name=a%20b");
    }

    #[test]
    fn stop_path_forwards_timeout() {
        assert_eq!(stop_path("abc", None), "/containers/abc/stop");
        assert_eq!(stop_path("abc", Some(0)), "/containers/abc/stop?t=0");
        assert_eq!(stop_path("abc", Some(15)), "/containers/abc/stop?t=15");
    }

    #[test]
    fn remove_path_flags_only_when_set() {
        assert_eq!(
            remove_path("abc", RemoveOptions::default()),
            "/containers/abc"
        );
        assert_eq!(
            remove_path(
                "abc",
                RemoveOptions {
                    force: true,
                    remove_volumes: false
                }
            ),
            "/containers/abc?force=1"
        );
        assert_eq!(
            remove_path(
                "abc",
                RemoveOptions {
                    force: false,
                    remove_volumes: true
                }
            ),
            "/containers/abc?v=1"
        );
        assert_eq!(
            remove_path(
                "abc",
                RemoveOptions {
                    force: true,
                    remove_volumes: true
                }
            ),
            "/containers/abc?force=1&v=1"
        );
    }

    #[test]
    fn logs_path_defaults_to_both_streams() {
        assert_eq!(
            logs_path("abc", &LogsOptions::default()),
            "/containers/abc/logs?stdout=1&stderr=1&timestamps=0&follow=0"
        );
    }

    #[test]
    fn logs_path_with_options() {
        let options = LogsOptions {
            stdout: Some(true),
            stderr: Some(false),
            since: Some("1700000000".to_string()),
            tail: Some(Tail::Lines(50)),
        };
        assert_eq!(
            logs_path("abc", &options),
            "/containers/abc/logs?stdout=1&stderr=0&timestamps=0&follow=0&since=1700000000&tail=50"
        );

        let options = LogsOptions {
            tail: Some(Tail::All),
            ..Default::default()
        };
        assert!(logs_path("abc", &options).ends_with("&tail=all"));
    }

    #[test]
    fn pull_path_encodes_reference() {
        assert_eq!(
            pull_path("ghcr.io/org/app:v1"),
            "/images/create?fromImage=ghcr.io%2Forg%2Fapp%3Av1"
        );
    }
}
