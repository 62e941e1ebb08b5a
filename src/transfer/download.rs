//! `in`: fetch one version's file into a directory

use std::path::Path;

use futures::StreamExt;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::config::{Source, VERSION_FILE_NAME};
use crate::error::ResourceError;
use crate::http::{build_client, collect_metadata};
use crate::version::template::render;
use crate::version::types::{ResourceResponse, Version};

/// Downloads `version` into `target_dir` and writes the version marker file.
///
/// Existing files are overwritten. A failed transfer may leave a partial file behind.
pub async fn download(
    target_dir: &Path,
    source: &Source,
    version: &Version,
) -> Result<ResourceResponse, ResourceError> {
    let uri = render(source.uri_template()?, version)?;
    let file_name = match source.filename.as_deref().filter(|f| !f.is_empty()) {
        Some(template) => render(template, version)?,
        None => file_name_from_uri(&uri)?,
    };

    let transfer_error = |source: reqwest::Error| ResourceError::Transfer {
        url: uri.clone(),
        source,
    };

    let client = build_client(source.ssl_verify)?;
    info!("Downloading {}", uri);
    let response = client
        .get(&uri)
        .send()
        .await
        .map_err(transfer_error)?
        .error_for_status()
        .map_err(transfer_error)?;

    let metadata = collect_metadata(response.headers(), &uri);

    let file_path = target_dir.join(&file_name);
    let mut file = File::create(&file_path).await?;
    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(transfer_error)?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }

    file.flush().await?;
    debug!("Wrote {} bytes to {:?}", written, file_path);

    tokio::fs::write(target_dir.join(VERSION_FILE_NAME), version.version.as_bytes()).await?;

    Ok(ResourceResponse {
        version: version.clone(),
        metadata,
    })
}

/// Last path segment of the URI, query string included
fn file_name_from_uri(uri: &str) -> Result<String, ResourceError> {
    uri.rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            ResourceError::Config(format!(
                "Cannot derive a file name from {}; set source.filename",
                uri
            ))
        })
}
