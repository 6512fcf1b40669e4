// ABOUTME: On-disk configuration file for dockhand.
// ABOUTME: YAML with an optional socket path and a humantime request timeout.

use super::error::{ConfigError, ParseSnafu, ReadSnafu};
use serde::Deserialize;
use snafu::ResultExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "dockhand.yml";
pub const CONFIG_FILENAME_ALT: &str = "dockhand.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".dockhand/config.yml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Engine socket path.
    #[serde(default)]
    pub socket: Option<PathBuf>,

    /// Per-request timeout, e.g. `30s` or `1500ms`.
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,
}

impl ConfigFile {
    pub fn from_yaml(yaml: &str, origin: &Path) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not a map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).context(ParseSnafu { path: origin })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).context(ReadSnafu { path })?;
        Self::from_yaml(&content, path)
    }

    /// Look for a config file in `dir`. Absence is not an error.
    pub fn discover(dir: &Path) -> Result<Option<Self>, ConfigError> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                tracing::debug!(path = %path.display(), "loading config file");
                return Self::load(path).map(Some);
            }
        }

        Ok(None)
    }
}
