// ABOUTME: Command module aggregator for the dockhand CLI.
// ABOUTME: Dispatches parsed subcommands to their handlers.

mod containers;
mod engine_connection;
mod images;
mod logs;

pub use engine_connection::connect_to_engine;

use crate::cli::Commands;
use dockhand::engine::{EngineBackend, LogsOptions, RemoveOptions};
use dockhand::error::Result;
use dockhand::output::Output;

pub async fn dispatch(
    command: Commands,
    backend: &impl EngineBackend,
    output: &mut Output,
) -> Result<()> {
    match command {
        Commands::Ps { all } => containers::list(backend, all, output).await,
        Commands::Create(args) => containers::create(backend, args, output).await,
        Commands::Start { id } => containers::start(backend, &id, output).await,
        Commands::Stop { id, time } => containers::stop(backend, &id, time, output).await,
        Commands::Rm { id, force, volumes } => {
            let options = RemoveOptions {
                force,
                remove_volumes: volumes,
            };
            containers::remove(backend, &id, options, output).await
        }
        Commands::Inspect { id, raw } => containers::inspect(backend, &id, raw, output).await,
        Commands::Logs {
            id,
            no_stdout,
            no_stderr,
            since,
            tail,
        } => {
            let options = LogsOptions {
                stdout: Some(!no_stdout),
                stderr: Some(!no_stderr),
                since,
                tail,
            };
            logs::logs(backend, &id, options, output).await
        }
        Commands::Pull { image } => images::pull(backend, &image, output).await,
        Commands::Ping => images::ping(backend, output).await,
    }
}
