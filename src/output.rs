// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Normal tables, quiet (ids only), and JSON reply bodies.

use crate::engine::{ContainerDetail, InstanceInfo};
use crate::error::Error;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write as _;
use std::time::Instant;

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    Normal,
    /// Minimal output for scripts (ids and raw text only)
    Quiet,
    /// Reply bodies as JSON
    Json,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
    start_time: Option<Instant>,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            start_time: None,
        }
    }

    /// Start timing an operation.
    pub fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Get elapsed time since timer started.
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    /// Print a progress message (suppressed in quiet/json mode).
    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            eprintln!("{message}");
        }
    }

    /// Print a reply: the JSON body in JSON mode, otherwise the given text.
    pub fn reply<T: Serialize>(&self, body: &T, normal: &str, quiet: &str) {
        match self.mode {
            OutputMode::Json => match serde_json::to_string(body) {
                Ok(json) => println!("{json}"),
                Err(e) => eprintln!("Error: failed to encode reply: {e}"),
            },
            OutputMode::Normal => {
                let elapsed = self.elapsed_secs();
                if elapsed > 0.0 {
                    println!("{normal} ({:.1}s)", elapsed);
                } else {
                    println!("{normal}");
                }
            }
            OutputMode::Quiet => {
                if !quiet.is_empty() {
                    println!("{quiet}");
                }
            }
        }
    }

    /// Print an error message.
    pub fn error(&self, err: &Error) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                eprintln!("Error: {err}");
            }
            OutputMode::Json => {
                let event = ErrorEvent {
                    error: err.to_string(),
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    println!("{json}");
                }
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorEvent {
    error: String,
}

/// Short form of an engine id.
pub fn short_id(id: &str) -> &str {
    id.get(..12).unwrap_or(id)
}

pub fn format_epoch(secs: i64) -> String {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| secs.to_string())
}

/// Render a container list as an aligned table.
pub fn render_instances(instances: &[InstanceInfo]) -> String {
    let rows: Vec<[String; 6]> = instances
        .iter()
        .map(|i| {
            [
                short_id(&i.id).to_string(),
                i.name.clone().unwrap_or_default(),
                i.image.clone().unwrap_or_default(),
                i.state.clone().unwrap_or_default(),
                i.status.clone().unwrap_or_default(),
                i.created_at.map(format_epoch).unwrap_or_default(),
            ]
        })
        .collect();

    let header = ["ID", "NAME", "IMAGE", "STATE", "STATUS", "CREATED"].map(str::to_string);
    let mut widths = header.clone().map(|h| h.len());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in std::iter::once(&header).chain(&rows) {
        let line: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        let _ = writeln!(out, "{}", line.join("  ").trim_end());
    }
    out.trim_end().to_string()
}

/// Render normalized inspect output as `key: value` lines.
pub fn render_detail(detail: &ContainerDetail) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ID: {}", detail.id);
    let fields = [
        ("Name", detail.name.as_deref()),
        ("Image", detail.image.as_deref()),
        ("State", detail.state.as_deref()),
        ("Health", detail.health_status.as_deref()),
        ("Created", detail.created.as_deref()),
        ("Started", detail.started_at.as_deref()),
        ("Finished", detail.finished_at.as_deref()),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            let _ = writeln!(out, "{label}: {value}");
        }
    }
    if let Some(count) = detail.restart_count {
        let _ = writeln!(out, "Restarts: {count}");
    }
    if let Some(command) = &detail.command {
        let rendered = match command {
            crate::engine::Command::Argv(argv) => argv.join(" "),
            crate::engine::Command::Shell(shell) => shell.clone(),
        };
        let _ = writeln!(out, "Command: {rendered}");
    }
    if let Some(ports) = &detail.ports {
        let _ = writeln!(out, "Ports:");
        for port in ports {
            match (&port.host_ip, &port.host_port) {
                (ip, Some(host_port)) => {
                    let _ = writeln!(
                        out,
                        "  {}:{} -> {}",
                        ip.as_deref().unwrap_or(""),
                        host_port,
                        port.container_port
                    );
                }
                _ => {
                    let _ = writeln!(out, "  {}", port.container_port);
                }
            }
        }
    }
    if let Some(mounts) = &detail.mounts {
        let _ = writeln!(out, "Mounts:");
        for mount in mounts {
            let _ = writeln!(
                out,
                "  {} -> {} ({})",
                mount.source.as_deref().unwrap_or("?"),
                mount.destination.as_deref().unwrap_or("?"),
                if mount.rw { "rw" } else { "ro" }
            );
        }
    }
    if let Some(labels) = &detail.labels {
        let _ = writeln!(out, "Labels:");
        for (key, value) in labels {
            let _ = writeln!(out, "  {key}={value}");
        }
    }
    if let Some(env) = &detail.environment {
        let _ = writeln!(out, "Environment:");
        for entry in env {
            let _ = writeln!(out, "  {entry}");
        }
    }
    out.trim_end().to_string()
}
