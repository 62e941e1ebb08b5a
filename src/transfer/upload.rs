//! `out`: publish a local file to a version-templated URI

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use reqwest::header::CONTENT_LENGTH;
use tokio::fs::File;
use tracing::{debug, info};

use crate::config::Source;
use crate::error::ResourceError;
use crate::http::{build_client, collect_metadata};
use crate::version::template::render;
use crate::version::types::{ResourceResponse, Version};

/// Which local file to publish, and how its version is known
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadTarget {
    /// A path relative to the source directory, published as the given version
    Literal { path: String, version: Version },
    /// A glob relative to the source directory that must match exactly one
    /// entry; its file name becomes the version
    Pattern(String),
}

impl UploadTarget {
    /// Chooses literal mode when the caller supplied a version, pattern mode otherwise
    pub fn new(file: &str, version: Option<Version>) -> Self {
        match version {
            Some(version) => Self::Literal {
                path: file.to_string(),
                version,
            },
            None => Self::Pattern(file.to_string()),
        }
    }

    /// Resolves the target to a local file and the version to publish it as
    pub fn resolve(self, source_dir: &Path) -> Result<(PathBuf, Version), ResourceError> {
        match self {
            Self::Literal { path, version } => {
                let path = source_dir.join(path);
                if !path.is_file() {
                    return Err(ResourceError::FileNotFound(path));
                }
                Ok((path, version))
            }
            Self::Pattern(pattern) => {
                let path = match_single(source_dir, &pattern)?;
                if !path.is_file() {
                    return Err(ResourceError::FileNotFound(path));
                }
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .ok_or_else(|| ResourceError::FileNotFound(path.clone()))?;
                Ok((path, Version::new(name)))
            }
        }
    }
}

fn match_single(source_dir: &Path, pattern: &str) -> Result<PathBuf, ResourceError> {
    let full_pattern = if Path::new(pattern).is_absolute() {
        pattern.to_string()
    } else {
        format!(
            "{}/{}",
            Pattern::escape(&source_dir.to_string_lossy()),
            pattern
        )
    };

    // Hidden entries only match when the pattern names the leading dot.
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };

    let mut matched = glob::glob_with(&full_pattern, options)
        .map_err(|e| ResourceError::Config(format!("Invalid glob {:?}: {}", pattern, e)))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ResourceError::Io(e.into_error()))?;

    debug!("Glob {} matched {:?}", full_pattern, matched);

    if matched.len() != 1 {
        matched.sort();
        return Err(ResourceError::AmbiguousMatch {
            pattern: pattern.to_string(),
            matched,
        });
    }

    Ok(matched.remove(0))
}

/// Uploads the resolved file with a streamed PUT.
pub async fn upload(
    source_dir: &Path,
    source: &Source,
    target: UploadTarget,
) -> Result<ResourceResponse, ResourceError> {
    let uri_template = source.uri_template()?;
    let (path, version) = target.resolve(source_dir)?;
    let uri = render(uri_template, &version)?;

    let transfer_error = |source: reqwest::Error| ResourceError::Transfer {
        url: uri.clone(),
        source,
    };

    let file = File::open(&path).await?;
    let length = file.metadata().await?.len();

    let client = build_client(source.ssl_verify)?;
    info!("Uploading {:?} ({} bytes) to {}", path, length, uri);
    let response = client
        .put(&uri)
        .header(CONTENT_LENGTH, length)
        .body(file)
        .send()
        .await
        .map_err(transfer_error)?
        .error_for_status()
        .map_err(transfer_error)?;

    Ok(ResourceResponse {
        metadata: collect_metadata(response.headers(), &uri),
        version,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::types::MetadataEntry;
    use rstest::rstest;
    use tempfile::TempDir;

    fn dir_with_files(names: &[&str]) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        for name in names {
            std::fs::write(temp_dir.path().join(name), name.as_bytes()).unwrap();
        }
        temp_dir
    }

    #[test]
    fn new_picks_mode_from_version_presence() {
        assert_eq!(
            UploadTarget::new("*.txt", None),
            UploadTarget::Pattern("*.txt".to_string())
        );
        assert_eq!(
            UploadTarget::new("9.txt", Some(Version::new("9"))),
            UploadTarget::Literal {
                path: "9.txt".to_string(),
                version: Version::new("9"),
            }
        );
    }

    #[test]
    fn literal_target_keeps_given_version() {
        let temp_dir = dir_with_files(&["9.txt"]);

        let (path, version) = UploadTarget::new("9.txt", Some(Version::new("1.0")))
            .resolve(temp_dir.path())
            .unwrap();

        assert_eq!(path, temp_dir.path().join("9.txt"));
        assert_eq!(version, Version::new("1.0"));
    }

    #[test]
    fn literal_target_is_not_globbed() {
        let temp_dir = dir_with_files(&["9.txt"]);

        let result = UploadTarget::new("*.txt", Some(Version::new("1.0"))).resolve(temp_dir.path());

        assert!(matches!(result, Err(ResourceError::FileNotFound(_))));
    }

    #[test]
    fn pattern_target_derives_version_from_single_match() {
        let temp_dir = dir_with_files(&["9.txt", "notes.md"]);

        let (path, version) = UploadTarget::new("*.txt", None)
            .resolve(temp_dir.path())
            .unwrap();

        assert_eq!(path, temp_dir.path().join("9.txt"));
        assert_eq!(version, Version::new("9.txt"));
    }

    #[rstest]
    #[case(&["9.txt", ".9.txt"], "*.txt", "9.txt")]
    #[case(&["9.txt", ".9.txt.swp"], "*", "9.txt")]
    #[case(&["9.txt", ".9.txt"], ".*.txt", ".9.txt")]
    fn pattern_target_skips_hidden_files_unless_named(
        #[case] files: &[&str],
        #[case] pattern: &str,
        #[case] expected: &str,
    ) {
        let temp_dir = dir_with_files(files);

        let (path, version) = UploadTarget::new(pattern, None)
            .resolve(temp_dir.path())
            .unwrap();

        assert_eq!(path, temp_dir.path().join(expected));
        assert_eq!(version, Version::new(expected));
    }

    #[test]
    fn pattern_target_rejects_single_directory_match() {
        let temp_dir = dir_with_files(&[]);
        std::fs::create_dir(temp_dir.path().join("build")).unwrap();

        let result = UploadTarget::new("build*", None).resolve(temp_dir.path());

        assert!(matches!(result, Err(ResourceError::FileNotFound(_))));
    }

    #[test]
    fn pattern_target_fails_on_multiple_matches() {
        let temp_dir = dir_with_files(&["9.txt", "10.txt"]);

        let result = UploadTarget::new("*.txt", None).resolve(temp_dir.path());

        match result {
            Err(ResourceError::AmbiguousMatch { pattern, matched }) => {
                assert_eq!(pattern, "*.txt");
                assert_eq!(matched.len(), 2);
            }
            other => panic!("expected AmbiguousMatch, got {:?}", other),
        }
    }

    #[test]
    fn pattern_target_fails_on_no_match() {
        let temp_dir = dir_with_files(&[]);

        let result = UploadTarget::new("*.txt", None).resolve(temp_dir.path());

        assert!(matches!(
            result,
            Err(ResourceError::AmbiguousMatch { matched, .. }) if matched.is_empty()
        ));
    }

    #[test]
    fn pattern_target_rejects_invalid_glob() {
        let temp_dir = dir_with_files(&[]);

        let result = UploadTarget::new("[", None).resolve(temp_dir.path());

        assert!(matches!(result, Err(ResourceError::Config(_))));
    }

    #[tokio::test]
    async fn upload_puts_file_contents() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/upload/9.txt")
            .match_body("9.txt")
            .with_status(201)
            .with_header("etag", "\"abc\"")
            .create_async()
            .await;

        let temp_dir = dir_with_files(&["9.txt"]);
        let source = Source {
            uri_template: Some(format!("{}/upload/{{version}}", server.url())),
            ..Source::default()
        };

        let response = upload(temp_dir.path(), &source, UploadTarget::new("9.txt", None))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.version, Version::new("9.txt"));
        assert!(
            response
                .metadata
                .contains(&MetadataEntry::new("Etag", "\"abc\""))
        );
        assert_eq!(
            response.metadata.last().map(|m| m.value.clone()),
            Some(format!("{}/upload/9.txt", server.url()))
        );
    }

    #[tokio::test]
    async fn upload_fails_on_error_status() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/put")
            .with_status(403)
            .create_async()
            .await;

        let temp_dir = dir_with_files(&["9.txt"]);
        let source = Source {
            uri_template: Some(format!("{}/put", server.url())),
            ..Source::default()
        };

        let result = upload(temp_dir.path(), &source, UploadTarget::new("9.txt", None)).await;

        mock.assert_async().await;
        assert!(matches!(result, Err(ResourceError::Transfer { .. })));
    }

    #[tokio::test]
    async fn upload_fails_on_unknown_placeholder_without_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let temp_dir = dir_with_files(&["9.txt"]);
        let source = Source {
            uri_template: Some(format!("{}/builds/{{build}}/{{version}}", server.url())),
            ..Source::default()
        };

        let result = upload(temp_dir.path(), &source, UploadTarget::new("*.txt", None)).await;

        mock.assert_async().await;
        assert!(matches!(
            result,
            Err(ResourceError::Template { placeholder, .. }) if placeholder == "build"
        ));
    }

    #[tokio::test]
    async fn upload_fails_when_server_is_unreachable() {
        let temp_dir = dir_with_files(&["9.txt"]);
        let source = Source {
            uri_template: Some("http://127.0.0.1:9/{version}".to_string()),
            ..Source::default()
        };

        let result = upload(temp_dir.path(), &source, UploadTarget::new("9.txt", None)).await;

        assert!(matches!(result, Err(ResourceError::Transfer { .. })));
    }
}
