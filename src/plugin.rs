//! Plugin identity: a validated `name:version` pair with an optional
//! download URL.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{PluginError, Result};

/// Regex for plugin names: ASCII letters, digits, hyphens, underscores.
pub static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-zA-Z\-_]+$").expect("name regex must compile"));

/// Regex for plugin versions: name characters plus `+`, `.` and `\`.
pub static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-zA-Z\-_+\\.]+$").expect("version regex must compile"));

/// Regex for download URLs (unanchored; the URL must contain a match).
pub static DOWNLOAD_URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"https?:\/\/(www\.)?[-a-zA-Z0-9@:%._\+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b([-a-zA-Z0-9()@:%_\+.~#?&//=]*)",
    )
    .expect("download URL regex must compile")
});

/// A plugin identified by name and version.
///
/// Fields are only reachable through accessors, so a `Plugin` that exists
/// has always passed validation. Equality and hashing cover all three fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPlugin")]
pub struct Plugin {
    name: String,
    version: String,
    #[serde(rename = "downloadURL", skip_serializing_if = "String::is_empty")]
    download_url: String,
}

/// Unvalidated wire form of [`Plugin`].
#[derive(Deserialize)]
struct RawPlugin {
    name: String,
    version: String,
    #[serde(rename = "downloadURL", default)]
    download_url: String,
}

impl TryFrom<RawPlugin> for Plugin {
    type Error = PluginError;

    fn try_from(raw: RawPlugin) -> Result<Self> {
        Plugin::new(raw.name, raw.version, raw.download_url)
    }
}

impl Plugin {
    /// Create a plugin from discrete fields.
    ///
    /// Checks run in order (name, version, then download URL when non-empty)
    /// and the first failure is returned. Values are stored exactly as given.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        download_url: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        let version = version.into();
        let download_url = download_url.into();
        validate_plugin(&name, &version, &download_url)?;
        Ok(Self {
            name,
            version,
            download_url,
        })
    }

    /// Create a plugin from a combined string such as `"workflow-job:2.33"`.
    ///
    /// Splits on the first colon only; anything after it is the version.
    pub fn parse(name_with_version: &str) -> Result<Self> {
        let Some((name, version)) = name_with_version.split_once(':') else {
            return Err(PluginError::format(format!(
                "invalid plugin format '{name_with_version}'"
            )));
        };
        Self::new(name, version, "")
    }

    /// Plugin name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Plugin version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Download URL, empty when none was given.
    #[must_use]
    pub fn download_url(&self) -> &str {
        &self.download_url
    }
}

impl FromStr for Plugin {
    type Err = PluginError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Formats as `name:version`; the download URL is not included.
impl fmt::Display for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.version)
    }
}

fn validate_plugin(name: &str, version: &str, download_url: &str) -> Result<()> {
    if !NAME_PATTERN.is_match(name) {
        return Err(PluginError::format(format!(
            "invalid plugin name '{name}:{version}', must follow pattern '{}'",
            NAME_PATTERN.as_str()
        )));
    }
    if !VERSION_PATTERN.is_match(version) {
        return Err(PluginError::format(format!(
            "invalid plugin version '{name}:{version}', must follow pattern '{}'",
            VERSION_PATTERN.as_str()
        )));
    }
    if !download_url.is_empty() && !DOWNLOAD_URL_PATTERN.is_match(download_url) {
        return Err(PluginError::format(format!(
            "invalid download URL '{download_url}' for plugin name {name}:{version}, must follow pattern '{}'",
            DOWNLOAD_URL_PATTERN.as_str()
        )));
    }
    Ok(())
}

/// Unwrap a construction result, panicking on error.
///
/// Only for inputs known to be valid when the code is written, such as
/// literals in tables or tests. Never pass user-supplied strings through it.
///
/// # Panics
///
/// Panics with the error message if `result` is an error.
#[must_use]
pub fn must(result: Result<Plugin>) -> Plugin {
    match result {
        Ok(plugin) => plugin,
        Err(e) => panic!("{e}"),
    }
}
