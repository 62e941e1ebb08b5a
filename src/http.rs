//! Shared HTTP client setup and response metadata helpers

use reqwest::header::HeaderMap;

use crate::error::ResourceError;
use crate::version::types::MetadataEntry;

const USER_AGENT: &str = concat!("http-resource/", env!("CARGO_PKG_VERSION"));

/// Builds the client used for every request of an invocation.
///
/// No timeout is configured; callers wrap the process if they need one.
pub fn build_client(ssl_verify: bool) -> Result<reqwest::Client, ResourceError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .danger_accept_invalid_certs(!ssl_verify)
        .build()
        .map_err(|e| ResourceError::Config(format!("Failed to create HTTP client: {}", e)))
}

/// Converts response headers to metadata and appends the resolved url last.
pub fn collect_metadata(headers: &HeaderMap, url: &str) -> Vec<MetadataEntry> {
    headers
        .iter()
        .map(|(name, value)| {
            MetadataEntry::new(
                canonical_header_name(name.as_str()),
                String::from_utf8_lossy(value.as_bytes()),
            )
        })
        .chain(std::iter::once(MetadataEntry::new("url", url)))
        .collect()
}

/// `content-type` -> `Content-Type`
fn canonical_header_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}
