use std::path::PathBuf;

use serde::Deserialize;

use crate::error::ResourceError;
use crate::version::types::{Version, deserialize_optional_version};

/// Environment variable that switches on verbose logging
pub const DEBUG_ENV_VAR: &str = "RESOURCE_DEBUG";

/// File name of the version marker written by `in`
pub const VERSION_FILE_NAME: &str = "version";

/// The JSON document read from standard input
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Request {
    pub source: Source,
    #[serde(deserialize_with = "deserialize_optional_version")]
    pub version: Option<Version>,
    pub params: Params,
}

impl Request {
    pub fn from_json(input: &str) -> Result<Self, ResourceError> {
        serde_json::from_str(input)
            .map_err(|e| ResourceError::Config(format!("Failed to parse request: {}", e)))
    }
}

/// Where the remote resource lives and how to reach it
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Source {
    pub index: Option<String>,
    pub regex: Option<String>,
    pub uri_template: Option<String>,
    pub filename: Option<String>,
    pub ssl_verify: bool,
    pub debug: bool,
}

impl Default for Source {
    fn default() -> Self {
        Self {
            index: None,
            regex: None,
            uri_template: None,
            filename: None,
            ssl_verify: true,
            debug: false,
        }
    }
}

impl Source {
    pub fn index(&self) -> Result<&str, ResourceError> {
        required(&self.index, "index")
    }

    pub fn regex(&self) -> Result<&str, ResourceError> {
        required(&self.regex, "regex")
    }

    pub fn uri_template(&self) -> Result<&str, ResourceError> {
        required(&self.uri_template, "uri_template")
    }
}

fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, ResourceError> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ResourceError::missing_field(field))
}

/// Per-step parameters for `out`
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Params {
    pub file: Option<String>,
}

/// Logging setup handed to the entry point
#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    /// Verbose output on stderr
    pub debug: bool,
    /// Where the full debug log goes when `debug` is off
    pub log_file: Option<PathBuf>,
}

impl LogConfig {
    /// Builds the logging setup from the debug env var and the request's source
    pub fn new(debug_env: Option<String>, source: &Source) -> Self {
        let debug = source.debug || debug_env.is_some_and(|v| !v.is_empty());
        Self {
            debug,
            log_file: (!debug).then(log_path),
        }
    }
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("http-resource.log")
}
