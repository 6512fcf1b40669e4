// ABOUTME: Configuration error types with SNAFU context selectors.
// ABOUTME: Covers unreadable files, invalid YAML, and bad environment overrides.

use snafu::Snafu;
use std::path::PathBuf;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ConfigError {
    #[snafu(display("failed to read config file {}: {source}", path.display()))]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("invalid config file {}: {source}", path.display()))]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[snafu(display("invalid value for {var}: {value:?}"))]
    InvalidEnv { var: String, value: String },
}
