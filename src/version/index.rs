//! Scrapes candidate versions out of an index page

#[cfg(test)]
use mockall::automock;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::ResourceError;
use crate::http::build_client;
use crate::version::compare::sort_versions;

/// Trait for fetching the raw text of an index page
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait IndexFetcher: Send + Sync {
    /// Fetches the index body
    ///
    /// # Returns
    /// * `Ok(String)` - The full response body
    /// * `Err(ResourceError::Fetch)` - On connection, TLS or 4xx/5xx failures
    async fn fetch_index(&self, url: &str) -> Result<String, ResourceError>;
}

/// Fetches index pages over HTTP(S)
pub struct HttpIndexFetcher {
    client: reqwest::Client,
}

impl HttpIndexFetcher {
    pub fn new(ssl_verify: bool) -> Result<Self, ResourceError> {
        Ok(Self {
            client: build_client(ssl_verify)?,
        })
    }
}

#[async_trait::async_trait]
impl IndexFetcher for HttpIndexFetcher {
    async fn fetch_index(&self, url: &str) -> Result<String, ResourceError> {
        let fetch_error = |source: reqwest::Error| ResourceError::Fetch {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(fetch_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!("Index returned status {}: {}", status, url);
        }

        response
            .error_for_status()
            .map_err(fetch_error)?
            .text()
            .await
            .map_err(fetch_error)
    }
}

/// Lists the versions an index page advertises
pub struct IndexScanner<F> {
    fetcher: F,
}

impl<F: IndexFetcher> IndexScanner<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Returns every regex match in the index, sorted ascending, duplicates kept.
    ///
    /// The pattern is compiled before any request is made.
    pub async fn scan(&self, index: &str, pattern: &str) -> Result<Vec<String>, ResourceError> {
        let regex = Regex::new(pattern)
            .map_err(|e| ResourceError::Config(format!("Invalid regex {:?}: {}", pattern, e)))?;

        let body = self.fetcher.fetch_index(index).await?;
        let mut versions = extract_versions(&regex, &body);
        debug!("Found {} candidate versions in {}", versions.len(), index);

        sort_versions(&mut versions);
        Ok(versions)
    }
}

/// Collects matches in order of appearance.
///
/// When the pattern has capture groups the first group is the version,
/// otherwise the whole match is.
fn extract_versions(regex: &Regex, body: &str) -> Vec<String> {
    if regex.captures_len() > 1 {
        regex
            .captures_iter(body)
            .map(|caps| {
                caps.get(1)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default()
            })
            .collect()
    } else {
        regex
            .find_iter(body)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}
