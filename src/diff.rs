//! Structural comparison between a local declaration and its remote monitor

use serde_json::{Map, Value};

use crate::monitor::Monitor;

/// Fields the remote service manages. They never appear in local
/// declarations, so they say nothing about whether an update is needed.
const RUNTIME_FIELDS: [&str; 6] = [
    "id",
    "response_time",
    "created_at",
    "updated_at",
    "paused",
    "status",
];

/// One field-level difference, identified by its dotted path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// Field present only in the local record.
    LocalOnly(String),
    /// Field present only in the remote record.
    RemoteOnly(String),
    /// Field present on both sides with different values.
    Changed(String),
}

impl Change {
    pub fn path(&self) -> &str {
        match self {
            Change::LocalOnly(path) | Change::RemoteOnly(path) | Change::Changed(path) => path,
        }
    }
}

/// Compares a local declaration with its remote counterpart, ignoring
/// runtime fields and optional fields the declaration leaves unset.
/// An empty result means the records are identical under the ignore rules.
pub fn monitor_diff(local: &Monitor, remote: &Monitor) -> Vec<Change> {
    let mut ignored: Vec<&str> = RUNTIME_FIELDS.to_vec();
    if local.get("project_id").is_none_or(Value::is_null) {
        ignored.push("project_id");
    }
    if local
        .get("request")
        .and_then(|request| request.get("keyword"))
        .is_none_or(Value::is_null)
    {
        ignored.push("request.keyword");
    }

    let mut changes = Vec::new();
    diff_objects("", local.fields(), remote.fields(), &mut changes);
    changes.retain(|change| !ignored.contains(&change.path()));
    changes
}

fn diff_objects(
    prefix: &str,
    local: &Map<String, Value>,
    remote: &Map<String, Value>,
    out: &mut Vec<Change>,
) {
    for (key, local_value) in local {
        let path = join_path(prefix, key);
        match remote.get(key) {
            Some(remote_value) => diff_values(&path, local_value, remote_value, out),
            None => out.push(Change::LocalOnly(path)),
        }
    }
    for key in remote.keys() {
        if !local.contains_key(key) {
            out.push(Change::RemoteOnly(join_path(prefix, key)));
        }
    }
}

fn diff_values(path: &str, local: &Value, remote: &Value, out: &mut Vec<Change>) {
    match (local, remote) {
        (Value::Object(local), Value::Object(remote)) => diff_objects(path, local, remote, out),
        _ if local == remote => {}
        _ => out.push(Change::Changed(path.to_string())),
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}
