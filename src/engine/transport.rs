// ABOUTME: HTTP/1.1 transport to the engine over a Unix domain socket.
// ABOUTME: One connection per request, full body buffering, timeout and status classification.

use super::error::{BackendError, ErrorDetails};
use crate::config::EngineConfig;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use hyper::{Method, Request, StatusCode};
use hyper_util::rt::TokioIo;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use tokio::net::UnixStream;

pub const USER_AGENT: &str = concat!("dockhand/", env!("CARGO_PKG_VERSION"));

/// A single request to the engine.
#[derive(Debug, Clone)]
pub struct EngineRequest {
    pub method: Method,
    /// Path and query, already percent-encoded.
    pub path: String,
    pub body: Option<Value>,
    /// Caller headers. A `None` value removes the header entirely.
    pub headers: Vec<(String, Option<String>)>,
}

impl EngineRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            headers: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.header_opt(name, Some(value.into()))
    }

    pub fn header_opt(mut self, name: impl Into<String>, value: Option<String>) -> Self {
        self.headers.push((name.into(), value));
        self
    }
}

/// A fully buffered engine response with a non-error status.
#[derive(Debug, Clone)]
pub struct EngineResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl EngineResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the body as JSON, rejecting empty or invalid bodies.
    pub fn json(&self) -> Result<Value, BackendError> {
        if self.body.is_empty() {
            return Err(BackendError::malformed("expected JSON, got empty body", ""));
        }
        serde_json::from_slice(&self.body).map_err(|e| BackendError::malformed(e, self.text()))
    }
}

/// Issues requests against the engine socket.
#[derive(Debug, Clone)]
pub struct Transport {
    socket_path: PathBuf,
    timeout: Duration,
}

impl Transport {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            socket_path: config.socket_path.clone(),
            timeout: config.timeout,
        }
    }

    /// Send `request` and buffer the whole response.
    ///
    /// Statuses >= 400 become [`BackendError::Request`] with the engine's
    /// status; connection failures map to 503 and timeouts to 504.
    pub async fn execute(&self, request: EngineRequest) -> Result<EngineResponse, BackendError> {
        tracing::debug!(method = %request.method, path = %request.path, "engine request");

        let response = match tokio::time::timeout(self.timeout, self.round_trip(request)).await {
            Ok(result) => result?,
            Err(_) => return Err(BackendError::timeout(self.timeout)),
        };

        tracing::debug!(status = response.status.as_u16(), "engine response");

        if response.status.as_u16() >= 400 {
            return Err(error_from_response(
                response.status,
                &response.headers,
                &response.body,
            ));
        }

        Ok(response)
    }

    async fn round_trip(&self, request: EngineRequest) -> Result<EngineResponse, BackendError> {
        let body = match &request.body {
            Some(value) => Bytes::from(serde_json::to_vec(value).map_err(|e| {
                BackendError::backend(format!("failed to encode request body: {}", e))
            })?),
            None => Bytes::new(),
        };
        let body_len = request.body.as_ref().map(|_| body.len());
        let headers = merge_headers(body_len, &request.headers);

        let mut builder = Request::builder()
            .method(request.method.clone())
            .uri(request.path.as_str());
        for (name, value) in &headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| BackendError::backend(format!("invalid header {}: {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| BackendError::backend(format!("invalid value for {}: {}", name, e)))?;
            builder = builder.header(name, value);
        }
        let req = builder
            .body(Full::new(body))
            .map_err(|e| BackendError::backend(format!("failed to build request: {}", e)))?;

        let stream = UnixStream::connect(&self.socket_path)
            .await
            .map_err(|e| self.unavailable(e))?;

        let (mut sender, conn) = hyper::client::conn::http1::handshake(TokioIo::new(stream))
            .await
            .map_err(|e| self.unavailable(e))?;

        tokio::spawn(async move {
            if let Err(e) = conn.await {
                tracing::warn!("engine connection error: {}", e);
            }
        });

        let resp = sender
            .send_request(req)
            .await
            .map_err(|e| self.unavailable(e))?;

        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp
            .into_body()
            .collect()
            .await
            .map_err(|e| self.unavailable(e))?
            .to_bytes();

        Ok(EngineResponse {
            status,
            headers,
            body,
        })
    }

    fn unavailable(&self, cause: impl std::fmt::Display) -> BackendError {
        BackendError::unavailable(self.socket_path.display(), cause)
    }
}

/// Combine default headers with caller headers.
///
/// Caller values win on a case-insensitive name match. `Content-Type` is
/// only defaulted when a body is present and the caller did not set one.
pub fn merge_headers(
    body_len: Option<usize>,
    caller: &[(String, Option<String>)],
) -> Vec<(String, String)> {
    let mut merged: Vec<(String, Option<String>)> = vec![
        ("Host".to_string(), Some("localhost".to_string())),
        ("Accept".to_string(), Some("application/json".to_string())),
        ("User-Agent".to_string(), Some(USER_AGENT.to_string())),
    ];

    if let Some(len) = body_len {
        let caller_sets_type = caller
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case("content-type"));
        if !caller_sets_type {
            merged.push((
                "Content-Type".to_string(),
                Some("application/json".to_string()),
            ));
        }
        merged.push(("Content-Length".to_string(), Some(len.to_string())));
    }

    for (name, value) in caller {
        match merged
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            Some(slot) => slot.1 = value.clone(),
            None => merged.push((name.clone(), value.clone())),
        }
    }

    merged
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
}

/// Build the request error for an engine status >= 400.
fn error_from_response(status: StatusCode, headers: &HeaderMap, body: &[u8]) -> BackendError {
    let text = String::from_utf8_lossy(body).into_owned();
    let is_json = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"));

    if is_json && let Ok(value) = serde_json::from_str::<Value>(&text) {
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| fallback_message(status, &text));
        return BackendError::request(message, status.as_u16(), ErrorDetails::Json(value));
    }

    let message = fallback_message(status, &text);
    let details = if text.is_empty() {
        ErrorDetails::None
    } else {
        ErrorDetails::Text(text)
    };
    BackendError::request(message, status.as_u16(), details)
}

fn fallback_message(status: StatusCode, text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        format!(
            "engine returned HTTP {} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("")
        )
        .trim_end()
        .to_string()
    } else {
        trimmed.to_string()
    }
}
