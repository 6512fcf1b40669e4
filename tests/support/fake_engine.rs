// ABOUTME: Minimal HTTP/1.1 engine stand-in listening on a temporary Unix socket.
// ABOUTME: Records every request and answers with canned responses per method and path.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{UnixListener, UnixStream};
use tokio::task::JoinHandle;

/// A request as the fake engine received it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    /// Header names lowercased.
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

#[derive(Debug, Clone)]
pub struct CannedResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
    /// Sleep before answering.
    pub delay: Option<Duration>,
    /// Close the connection instead of answering.
    pub hang_up: bool,
    /// Advertised `Content-Length` when it should differ from the body.
    pub content_length: Option<usize>,
}

impl CannedResponse {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            content_type: Some("application/json".to_string()),
            body: serde_json::to_vec(&body).unwrap(),
            delay: None,
            hang_up: false,
            content_length: None,
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: Some("text/plain".to_string()),
            body: body.as_bytes().to_vec(),
            delay: None,
            hang_up: false,
            content_length: None,
        }
    }

    pub fn empty(status: u16) -> Self {
        Self {
            status,
            content_type: None,
            body: Vec::new(),
            delay: None,
            hang_up: false,
            content_length: None,
        }
    }

    /// Read the request, then drop the connection without a response.
    pub fn hang_up() -> Self {
        Self {
            hang_up: true,
            ..Self::empty(200)
        }
    }

    /// Advertise a longer body than is sent, then close.
    pub fn truncated(status: u16, body: &str) -> Self {
        Self {
            content_length: Some(body.len() + 64),
            ..Self::text(status, body)
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Default)]
struct State {
    routes: HashMap<(String, String), CannedResponse>,
    requests: Vec<RecordedRequest>,
}

/// Fake engine bound to `<tempdir>/engine.sock`.
///
/// Unrouted requests get a 404 JSON body like the real engine's.
pub struct FakeEngine {
    _dir: TempDir,
    socket_path: PathBuf,
    state: Arc<Mutex<State>>,
    accept_task: JoinHandle<()>,
}

impl FakeEngine {
    pub async fn start() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let socket_path = dir.path().join("engine.sock");
        let listener = UnixListener::bind(&socket_path).unwrap();
        let state = Arc::new(Mutex::new(State::default()));

        let accept_state = Arc::clone(&state);
        let accept_task = tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let state = Arc::clone(&accept_state);
                tokio::spawn(async move {
                    let _ = serve(stream, state).await;
                });
            }
        });

        Self {
            _dir: dir,
            socket_path,
            state,
            accept_task,
        }
    }

    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    /// Answer `method path` (path includes the query string) with `response`.
    pub fn route(&self, method: &str, path: &str, response: CannedResponse) {
        self.state
            .lock()
            .routes
            .insert((method.to_string(), path.to_string()), response);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().requests.clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("no request was recorded")
    }
}

impl Drop for FakeEngine {
    fn drop(&mut self) {
        self.accept_task.abort();
    }
}

async fn serve(mut stream: UnixStream, state: Arc<Mutex<State>>) -> std::io::Result<()> {
    let mut buf = Vec::new();
    let header_end = loop {
        let mut chunk = [0u8; 4096];
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default();
    let mut parts = request_line.split(' ');
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let headers: HashMap<String, String> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.trim().to_ascii_lowercase(), value.trim().to_string()))
        .collect();

    let content_length: usize = headers
        .get("content-length")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    let mut body = buf[header_end + 4..].to_vec();
    while body.len() < content_length {
        let mut chunk = [0u8; 4096];
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }

    let response = {
        let mut state = state.lock();
        state.requests.push(RecordedRequest {
            method: method.clone(),
            path: path.clone(),
            headers,
            body,
        });
        state
            .routes
            .get(&(method, path))
            .cloned()
            .unwrap_or_else(|| {
                CannedResponse::json(404, serde_json::json!({"message": "page not found"}))
            })
    };

    if let Some(delay) = response.delay {
        tokio::time::sleep(delay).await;
    }

    if response.hang_up {
        return Ok(());
    }

    let mut head = format!("HTTP/1.1 {} {}\r\n", response.status, reason(response.status));
    if let Some(content_type) = &response.content_type {
        head.push_str(&format!("Content-Type: {}\r\n", content_type));
    }
    head.push_str(&format!(
        "Content-Length: {}\r\nConnection: close\r\n\r\n",
        response.content_length.unwrap_or(response.body.len())
    ));

    stream.write_all(head.as_bytes()).await?;
    stream.write_all(&response.body).await?;
    stream.shutdown().await
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        304 => "Not Modified",
        400 => "Bad Request",
        404 => "Not Found",
        409 => "Conflict",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}
