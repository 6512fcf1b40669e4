// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Global connection flags plus one subcommand per lifecycle operation.

use clap::{Args, Parser, Subcommand};
use dockhand::engine::{Tail, VolumeBind};
use dockhand::output::OutputMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dockhand")]
#[command(about = "Manage containers through the local Docker or Podman socket")]
#[command(version)]
pub struct Cli {
    /// Engine socket path (default: detected, then /var/run/docker.sock)
    #[arg(long, global = true, value_name = "PATH")]
    pub socket: Option<PathBuf>,

    /// Per-request timeout in milliseconds (default: 30000)
    #[arg(long, global = true, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Config file (default: dockhand.yml in the current directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print reply bodies as JSON
    #[arg(long, global = true, conflicts_with = "quiet")]
    pub json: bool,

    /// Only print ids and raw output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Normal
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List containers
    Ps {
        /// Include stopped containers
        #[arg(short, long)]
        all: bool,
    },

    /// Create a container
    Create(CreateArgs),

    /// Start a container
    Start { id: String },

    /// Stop a container
    Stop {
        id: String,
        /// Seconds to wait before killing the container
        #[arg(short, long, value_name = "SECONDS")]
        time: Option<u32>,
    },

    /// Remove a container
    Rm {
        id: String,
        /// Remove even if running
        #[arg(short, long)]
        force: bool,
        /// Also remove anonymous volumes
        #[arg(long)]
        volumes: bool,
    },

    /// Show normalized container details
    Inspect {
        id: String,
        /// Print the engine's document instead of the normalized one
        #[arg(long)]
        raw: bool,
    },

    /// Fetch container logs
    Logs {
        id: String,
        /// Leave out stdout
        #[arg(long)]
        no_stdout: bool,
        /// Leave out stderr
        #[arg(long)]
        no_stderr: bool,
        /// Only logs since this time (epoch seconds or timestamp)
        #[arg(long)]
        since: Option<String>,
        /// Number of trailing lines, or "all"
        #[arg(long)]
        tail: Option<Tail>,
    },

    /// Pull an image
    Pull { image: String },

    /// Check that the engine answers
    Ping,
}

#[derive(Args)]
pub struct CreateArgs {
    /// Image to run
    #[arg(long, required_unless_present = "from_file")]
    pub image: Option<String>,

    /// Container name
    #[arg(long)]
    pub name: Option<String>,

    /// Environment variable (KEY=VALUE), repeatable
    #[arg(short, long = "env", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub env: Vec<(String, String)>,

    /// Bind mount (SOURCE:TARGET[:ro]), repeatable
    #[arg(long = "volume", value_name = "SOURCE:TARGET[:ro]")]
    pub volumes: Vec<VolumeBind>,

    /// Working directory inside the container
    #[arg(short, long = "workdir")]
    pub workdir: Option<String>,

    /// Read the create request as JSON from a file ("-" for stdin)
    #[arg(long, value_name = "PATH", conflicts_with_all = ["image", "name", "env", "volumes", "workdir", "command"])]
    pub from_file: Option<PathBuf>,

    /// Command and arguments
    #[arg(last = true)]
    pub command: Vec<String>,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("invalid KEY=VALUE: {s:?}")),
    }
}
