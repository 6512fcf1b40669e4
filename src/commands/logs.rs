// ABOUTME: Logs command implementation.
// ABOUTME: Fetches a container's log text and prints it unchanged.

use dockhand::api;
use dockhand::engine::{LogOps, LogsOptions};
use dockhand::error::Result;
use dockhand::output::Output;

pub async fn logs(
    backend: &impl LogOps,
    id: &str,
    options: LogsOptions,
    output: &Output,
) -> Result<()> {
    let reply = api::container_logs(backend, id, &options).await?;
    let text = reply.logs.trim_end();
    output.reply(&reply, text, text);
    Ok(())
}
