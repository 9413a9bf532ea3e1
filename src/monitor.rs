//! Monitor records and local declaration loading

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single uptime monitor configuration, kept as the raw field mapping the
/// phare.io API speaks. Local declarations omit server-assigned fields such
/// as `id`; records fetched from the API include them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Monitor(Map<String, Value>);

impl Monitor {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(Value::as_str)
    }

    /// Server-assigned identifier. Absent on local declarations.
    pub fn id(&self) -> Option<u64> {
        self.get("id").and_then(Value::as_u64)
    }

    pub fn is_paused(&self) -> bool {
        self.get("paused").and_then(Value::as_bool).unwrap_or(false)
    }
}

/// Monitors keyed by name. Names are unique within a collection and are the
/// join key between local declarations and remote state.
pub type MonitorSet = BTreeMap<String, Monitor>;

/// Loads the declaration file: a JSON object mapping monitor name to monitor
/// record. Record keys are written camelCase in the file and renamed to the
/// snake_case the API expects; the outer name keys are left untouched.
pub fn load_declarations(path: &Path) -> Result<MonitorSet> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read monitor file {}", path.display()))?;
    let raw: BTreeMap<String, Map<String, Value>> = serde_json::from_str(&content)
        .with_context(|| format!("malformed monitor file {}", path.display()))?;

    Ok(raw
        .into_iter()
        .map(|(name, record)| (name, Monitor::new(snake_case_keys(record))))
        .collect())
}

/// Renames the top-level keys of one record from camelCase to snake_case.
/// Nested objects (the `request` sub-object in particular) keep their keys.
pub fn snake_case_keys(record: Map<String, Value>) -> Map<String, Value> {
    record
        .into_iter()
        .map(|(key, value)| (camel_to_snake(&key), value))
        .collect()
}

pub fn camel_to_snake(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for (i, ch) in input.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Map<String, Value> {
        value.as_object().expect("test record is an object").clone()
    }

    #[test]
    fn camel_to_snake_word_boundaries() {
        assert_eq!(camel_to_snake("projectId"), "project_id");
        assert_eq!(camel_to_snake("incidentConfirmations"), "incident_confirmations");
        assert_eq!(camel_to_snake("name"), "name");
        assert_eq!(camel_to_snake("ProjectId"), "project_id");
        assert_eq!(camel_to_snake(""), "");
    }

    #[test]
    fn snake_cases_top_level_keys_only() {
        let normalized = snake_case_keys(record(json!({
            "name": "Ping Home",
            "projectId": 3,
            "request": { "url": "https://x", "method": "GET", "followRedirects": true }
        })));

        assert!(normalized.contains_key("project_id"));
        assert!(!normalized.contains_key("projectId"));
        // Nested keys are left alone.
        let request = normalized["request"].as_object().unwrap();
        assert!(request.contains_key("followRedirects"));
    }

    #[test]
    fn accessors_read_the_usual_fields() {
        let monitor = Monitor::new(record(json!({
            "name": "Ping Home",
            "id": 7,
            "paused": true
        })));

        assert_eq!(monitor.name(), Some("Ping Home"));
        assert_eq!(monitor.id(), Some(7));
        assert!(monitor.is_paused());
    }

    #[test]
    fn missing_fields_have_sensible_defaults() {
        let monitor = Monitor::new(record(json!({ "name": "Ping Home" })));

        assert_eq!(monitor.id(), None);
        assert!(!monitor.is_paused());
    }

    #[test]
    fn loads_declarations_keyed_by_name() -> Result<()> {
        let dir = tempfile::TempDir::new()?;
        let path = dir.path().join("monitors.json");
        fs::write(
            &path,
            serde_json::to_string_pretty(&json!({
                "Ping Home": {
                    "name": "Ping Home",
                    "projectId": 3,
                    "request": { "url": "https://x", "method": "GET" }
                }
            }))?,
        )?;

        let declarations = load_declarations(&path)?;
        let monitor = &declarations["Ping Home"];
        assert_eq!(monitor.name(), Some("Ping Home"));
        assert_eq!(monitor.get("project_id"), Some(&json!(3)));
        assert_eq!(monitor.get("projectId"), None);
        Ok(())
    }

    #[test]
    fn missing_declaration_file_is_an_error() {
        let result = load_declarations(Path::new("/nonexistent/monitors.json"));
        assert!(result.is_err());
    }

    #[test]
    fn malformed_declaration_file_is_an_error() -> Result<()> {
        let dir = tempfile::TempDir::new()?;
        let path = dir.path().join("monitors.json");
        fs::write(&path, "not json")?;

        assert!(load_declarations(&path).is_err());
        Ok(())
    }
}
