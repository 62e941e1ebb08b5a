//! Common types shared by check, in and out

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// A single version of the remote resource.
///
/// Identity is the `version` string. Any extra string fields given by the
/// caller are kept in order so they can be used as template placeholders
/// and echoed back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub version: String,
    #[serde(flatten)]
    pub extra: IndexMap<String, String>,
}

impl Version {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            extra: IndexMap::new(),
        }
    }

    /// Looks up a template field by name
    pub fn field(&self, name: &str) -> Option<&str> {
        if name == "version" {
            Some(&self.version)
        } else {
            self.extra.get(name).map(String::as_str)
        }
    }
}

/// One `{name, value}` pair reported back to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataEntry {
    pub name: String,
    pub value: String,
}

impl MetadataEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Result of `in` and `out`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceResponse {
    pub version: Version,
    pub metadata: Vec<MetadataEntry>,
}

/// Deserializes an optional version where `null` and `{}` both mean "none".
pub(crate) fn deserialize_optional_version<'de, D>(
    deserializer: D,
) -> Result<Option<Version>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;

    match value {
        None => Ok(None),
        Some(serde_json::Value::Object(map)) if map.is_empty() => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
