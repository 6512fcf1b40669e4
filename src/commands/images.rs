// ABOUTME: Image and engine-level command implementations.
// ABOUTME: pull and ping.

use dockhand::api::{self, ApiError, Done};
use dockhand::engine::{ImageOps, SystemOps};
use dockhand::error::Result;
use dockhand::output::Output;

pub async fn pull(backend: &impl ImageOps, image: &str, output: &mut Output) -> Result<()> {
    output.progress(&format!("Pulling {}...", image));
    output.start_timer();
    let reply = api::pull_image(backend, image).await?;
    output.reply(&reply, &format!("Pulled {}", image), image);
    Ok(())
}

pub async fn ping(backend: &impl SystemOps, output: &Output) -> Result<()> {
    backend.ping().await.map_err(ApiError::from)?;
    output.reply(&Done::ok(), "Engine is reachable", "");
    Ok(())
}
