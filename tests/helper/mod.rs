//! Shared helpers for end-to-end command tests

use serde_json::Value;
use tempfile::TempDir;

use http_resource::commands::{self, Command};
use http_resource::config::Request;
use http_resource::error::ResourceError;

/// Parses `input` like stdin would be and runs the command, returning the JSON output
pub async fn run_command(command: Command, input: Value) -> Result<Value, ResourceError> {
    let request = Request::from_json(&input.to_string())?;
    let output = commands::run(&command, request).await?;
    Ok(serde_json::to_value(output).unwrap())
}

/// Creates a directory holding the given files, each containing its own name
pub fn dir_with_files(names: &[&str]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for name in names {
        std::fs::write(temp_dir.path().join(name), name.as_bytes()).unwrap();
    }
    temp_dir
}

/// Returns true when `metadata` holds a `{name, value}` entry
pub fn has_metadata(output: &Value, name: &str, value: &str) -> bool {
    output["metadata"]
        .as_array()
        .is_some_and(|entries| {
            entries
                .iter()
                .any(|entry| entry["name"] == name && entry["value"] == value)
        })
}
