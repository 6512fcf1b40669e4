// ABOUTME: Container lifecycle command implementations.
// ABOUTME: ps, create, start, stop, rm, and inspect.

use crate::cli::CreateArgs;
use dockhand::api;
use dockhand::engine::{ContainerOps, CreateOptions, Environment, RemoveOptions};
use dockhand::error::{Error, Result};
use dockhand::output::{Output, render_detail, render_instances, short_id};
use std::io::Read;

pub async fn list(backend: &impl ContainerOps, all: bool, output: &Output) -> Result<()> {
    let reply = api::list_containers(backend, all).await?;
    let ids: Vec<&str> = reply.containers.iter().map(|c| c.id.as_str()).collect();
    output.reply(&reply, &render_instances(&reply.containers), &ids.join("\n"));
    Ok(())
}

pub async fn create(backend: &impl ContainerOps, args: CreateArgs, output: &Output) -> Result<()> {
    let reply = match args.from_file {
        Some(path) => {
            let body = read_request(&path)?;
            api::create_container_from_json(backend, &body).await?
        }
        None => {
            let options = create_options(args)?;
            api::create_container(backend, &options).await?
        }
    };

    let id = reply.instance.id.as_str();
    output.reply(&reply, &format!("Created {}", short_id(id)), id);
    Ok(())
}

fn read_request(path: &std::path::Path) -> Result<Vec<u8>> {
    if path == std::path::Path::new("-") {
        let mut body = Vec::new();
        std::io::stdin().read_to_end(&mut body)?;
        Ok(body)
    } else {
        Ok(std::fs::read(path)?)
    }
}

fn create_options(args: CreateArgs) -> Result<CreateOptions> {
    let image = args
        .image
        .ok_or_else(|| Error::InvalidArgument("--image is required".to_string()))?;

    Ok(CreateOptions {
        image,
        name: args.name,
        command: (!args.command.is_empty()).then_some(args.command),
        environment: (!args.env.is_empty()).then(|| args.env.into_iter().collect::<Environment>()),
        volumes: args.volumes,
        working_directory: args.workdir,
    })
}

pub async fn start(backend: &impl ContainerOps, id: &str, output: &Output) -> Result<()> {
    let reply = api::start_container(backend, id).await?;
    output.reply(&reply, &format!("Started {}", id), id);
    Ok(())
}

pub async fn stop(
    backend: &impl ContainerOps,
    id: &str,
    time: Option<u32>,
    output: &Output,
) -> Result<()> {
    let reply = api::stop_container(backend, id, time).await?;
    output.reply(&reply, &format!("Stopped {}", id), id);
    Ok(())
}

pub async fn remove(
    backend: &impl ContainerOps,
    id: &str,
    options: RemoveOptions,
    output: &Output,
) -> Result<()> {
    let reply = api::remove_container(backend, id, options).await?;
    output.reply(&reply, &format!("Removed {}", id), id);
    Ok(())
}

pub async fn inspect(
    backend: &impl ContainerOps,
    id: &str,
    raw: bool,
    output: &Output,
) -> Result<()> {
    let reply = api::inspect_container(backend, id).await?;
    if raw {
        let pretty = serde_json::to_string_pretty(&reply.container.raw)?;
        output.reply(&reply.container.raw, &pretty, &pretty);
    } else {
        output.reply(&reply, &render_detail(&reply.container), &reply.container.id);
    }
    Ok(())
}
