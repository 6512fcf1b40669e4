// ABOUTME: Application-wide error type for the dockhand binary.
// ABOUTME: Wraps configuration, reply-layer, encoding, argument, and I/O failures.

use crate::api::ApiError;
use crate::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_failures_convert_with_question_mark() {
        fn encode() -> Result<String> {
            let tuple_keys = std::collections::BTreeMap::from([((1, 2), 3)]);
            Ok(serde_json::to_string(&tuple_keys)?)
        }

        let err = encode().unwrap_err();
        assert!(matches!(err, Error::Json(_)));
        assert!(err.to_string().starts_with("failed to encode output"));
    }

    #[test]
    fn api_errors_display_their_message() {
        let err = Error::from(ApiError::new(404, "Container not found"));
        assert_eq!(err.to_string(), "Container not found");
    }
}
