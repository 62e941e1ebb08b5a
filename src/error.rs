use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Template {template:?} references unknown field {placeholder:?}")]
    Template {
        template: String,
        placeholder: String,
    },

    #[error("Malformed template {template:?}: {reason}")]
    MalformedTemplate { template: String, reason: String },

    #[error("Failed to fetch index {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Transfer failed for {url}: {source}")]
    Transfer {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("No versions matched the regex in the index")]
    EmptyIndex,

    #[error("Version {0:?} not found in index")]
    UnknownVersion(String),

    #[error("Not exactly one file matched the glob pattern {pattern}. Matched files: {matched:?}")]
    AmbiguousMatch {
        pattern: String,
        matched: Vec<PathBuf>,
    },

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ResourceError {
    pub(crate) fn missing_field(field: &str) -> Self {
        Self::Config(format!("source.{field} is required"))
    }
}
