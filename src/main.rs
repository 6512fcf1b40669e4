// ABOUTME: Entry point for the dockhand CLI application.
// ABOUTME: Parses arguments, connects to the engine, and dispatches commands.

mod cli;
mod commands;

use clap::Parser;
use cli::Cli;
use dockhand::error::Result;
use dockhand::output::Output;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("dockhand=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mut output = Output::new(cli.output_mode());

    if let Err(e) = run(cli, &mut output).await {
        output.error(&e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: &mut Output) -> Result<()> {
    let client = commands::connect_to_engine(
        cli.config.as_deref(),
        cli.socket.as_deref(),
        cli.timeout_ms,
    )?;
    commands::dispatch(cli.command, &client, output).await
}
