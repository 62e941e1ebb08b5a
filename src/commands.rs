//! Routes a parsed request to check, in or out

use std::path::PathBuf;

use clap::Subcommand;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{Request, Source};
use crate::error::ResourceError;
use crate::transfer::{UploadTarget, download, upload};
use crate::version::index::{HttpIndexFetcher, IndexFetcher, IndexScanner};
use crate::version::selector::select_new_versions;
use crate::version::types::{ResourceResponse, Version};

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print versions newer than the given one (or the latest) as JSON
    Check,
    /// Download the requested version into DIR
    In {
        #[arg(value_name = "DIR")]
        target_dir: PathBuf,
    },
    /// Upload a file from DIR
    Out {
        #[arg(value_name = "DIR")]
        source_dir: PathBuf,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Check => "check",
            Command::In { .. } => "in",
            Command::Out { .. } => "out",
        }
    }
}

/// JSON document written to stdout
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Output {
    Versions(Vec<Version>),
    Resource(ResourceResponse),
}

pub async fn run(command: &Command, request: Request) -> Result<Output, ResourceError> {
    debug!("command: {:?}", command);
    debug!("source: {:?}", request.source);
    debug!("version: {:?}", request.version);
    debug!("params: {:?}", request.params);

    match command {
        Command::Check => {
            let fetcher = HttpIndexFetcher::new(request.source.ssl_verify)?;
            check(fetcher, &request.source, request.version.as_ref())
                .await
                .map(Output::Versions)
        }
        Command::In { target_dir } => {
            let version = request.version.ok_or_else(|| {
                ResourceError::Config("a version is required for in".to_string())
            })?;
            download(target_dir, &request.source, &version)
                .await
                .map(Output::Resource)
        }
        Command::Out { source_dir } => {
            let file = request
                .params
                .file
                .as_deref()
                .filter(|f| !f.is_empty())
                .ok_or_else(|| ResourceError::Config("params.file is required".to_string()))?;
            let target = UploadTarget::new(file, request.version);
            upload(source_dir, &request.source, target)
                .await
                .map(Output::Resource)
        }
    }
}

/// Lists the versions `check` reports, in ascending order
pub async fn check<F: IndexFetcher>(
    fetcher: F,
    source: &Source,
    current: Option<&Version>,
) -> Result<Vec<Version>, ResourceError> {
    let index = source.index()?;
    let pattern = source.regex()?;

    let versions = IndexScanner::new(fetcher).scan(index, pattern).await?;
    let selected = select_new_versions(&versions, current.map(|v| v.version.as_str()))?;

    info!(
        "{} of {} indexed versions are new",
        selected.len(),
        versions.len()
    );
    Ok(selected)
}
