//! Picks the versions `check` reports relative to the caller's current version

use crate::error::ResourceError;
use crate::version::types::Version;

/// Selects new versions from an ascending list.
///
/// Without a current version only the greatest one is returned. With a
/// current version, every version after its position is returned; an empty
/// list means the caller is already up to date.
pub fn select_new_versions(
    sorted_versions: &[String],
    current_version: Option<&str>,
) -> Result<Vec<Version>, ResourceError> {
    let current = current_version.filter(|v| !v.is_empty());

    let Some(current) = current else {
        return sorted_versions
            .last()
            .map(|latest| vec![Version::new(latest.as_str())])
            .ok_or(ResourceError::EmptyIndex);
    };

    let position = sorted_versions
        .iter()
        .position(|v| v == current)
        .ok_or_else(|| ResourceError::UnknownVersion(current.to_string()))?;

    Ok(sorted_versions[position + 1..]
        .iter()
        .map(|v| Version::new(v.as_str()))
        .collect())
}
