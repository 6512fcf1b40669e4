// ABOUTME: Maps raw engine JSON into stable caller-facing shapes.
// ABOUTME: Each field is extracted independently and defaults to absent on mismatch.

use super::parse::{
    array_field, as_str, bool_field, display_name, i64_field, non_empty_map, non_empty_vec,
    object_field, str_field, string_list, string_map,
};
use super::types::{Command, ContainerDetail, InstanceInfo, MountRecord, PortRecord};
use serde_json::Value;

/// Convert one entry of the engine's container list.
///
/// Returns `None` only when the entry has no string `Id`.
pub fn summary_to_instance(raw: &Value) -> Option<InstanceInfo> {
    let id = str_field(raw, "Id")?;
    let name = array_field(raw, "Names")
        .and_then(|names| names.first())
        .and_then(as_str)
        .map(display_name);

    Some(InstanceInfo {
        id,
        name,
        image: str_field(raw, "Image"),
        state: str_field(raw, "State"),
        status: str_field(raw, "Status"),
        created_at: i64_field(raw, "Created"),
    })
}

/// Normalize an inspect document.
///
/// `requested_id` stands in when the document carries no `Id`.
pub fn normalize_inspect(raw: Value, requested_id: &str) -> ContainerDetail {
    let config = raw.get("Config").filter(|v| v.is_object());
    let state = raw.get("State").filter(|v| v.is_object());

    let id = str_field(&raw, "Id").unwrap_or_else(|| requested_id.to_string());
    let name = str_field(&raw, "Name").map(|n| display_name(&n));
    let image = config.and_then(|c| str_field(c, "Image"));
    let command = config.and_then(command);
    let environment = config.and_then(|c| string_list(c, "Env"));
    let labels = config
        .and_then(|c| string_map(c, "Labels"))
        .and_then(non_empty_map);

    let started_at = state.and_then(|s| str_field(s, "StartedAt"));
    let finished_at = state.and_then(|s| str_field(s, "FinishedAt"));
    let restart_count = state
        .and_then(|s| i64_field(s, "RestartCount"))
        .or_else(|| i64_field(&raw, "RestartCount"));
    let health_status = state
        .and_then(|s| s.get("Health"))
        .and_then(|h| str_field(h, "Status"));
    let state = state.and_then(|s| str_field(s, "Status"));

    let created = str_field(&raw, "Created");
    let ports = non_empty_vec(ports(&raw));
    let mounts = non_empty_vec(mounts(&raw));

    ContainerDetail {
        id,
        name,
        image,
        command,
        created,
        started_at,
        finished_at,
        restart_count,
        state,
        health_status,
        environment,
        labels,
        ports,
        mounts,
        raw,
    }
}

fn command(config: &Value) -> Option<Command> {
    match config.get("Cmd")? {
        Value::String(shell) => Some(Command::Shell(shell.clone())),
        Value::Array(_) => string_list(config, "Cmd").map(Command::Argv),
        _ => None,
    }
}

/// One record per host binding; a port with no bindings still yields a record.
fn ports(raw: &Value) -> Vec<PortRecord> {
    let Some(port_map) = raw
        .get("NetworkSettings")
        .and_then(|ns| object_field(ns, "Ports"))
    else {
        return Vec::new();
    };

    let mut records = Vec::new();
    for (container_port, bindings) in port_map {
        let bindings = bindings.as_array().filter(|b| !b.is_empty());
        match bindings {
            Some(bindings) => {
                records.extend(bindings.iter().map(|binding| PortRecord {
                    container_port: container_port.clone(),
                    host_ip: str_field(binding, "HostIp"),
                    host_port: str_field(binding, "HostPort"),
                }));
            }
            None => records.push(PortRecord {
                container_port: container_port.clone(),
                host_ip: None,
                host_port: None,
            }),
        }
    }
    records
}

fn mounts(raw: &Value) -> Vec<MountRecord> {
    array_field(raw, "Mounts")
        .map(|entries| {
            entries
                .iter()
                .filter(|entry| entry.is_object())
                .map(|entry| MountRecord {
                    source: str_field(entry, "Source"),
                    destination: str_field(entry, "Destination"),
                    mode: str_field(entry, "Mode"),
                    kind: str_field(entry, "Type"),
                    rw: bool_field(entry, "RW") == Some(true),
                })
                .collect()
        })
        .unwrap_or_default()
}
