//! Error types for wrapchain

use std::io;

use thiserror::Error;

/// Result type alias for wrapchain
pub type Result<T> = std::result::Result<T, Error>;

/// wrapchain errors
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A transformer reference or parameter was absent or invalid
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A transformer rejected its target
    #[error("Transformer '{transformer}' failed: {message}")]
    Transform {
        /// Name of the failing transformer
        transformer: String,
        /// What went wrong
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Create a transformer failure
    pub fn transform(transformer: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transform {
            transformer: transformer.into(),
            message: message.into(),
        }
    }

    /// Create an invalid-argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Name of the failing transformer, if this is a transformer failure
    #[must_use]
    pub fn transformer(&self) -> Option<&str> {
        match self {
            Self::Transform { transformer, .. } => Some(transformer),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_error_names_the_transformer() {
        let err = Error::transform("require", "missing path 'id'");
        assert_eq!(err.transformer(), Some("require"));
        assert_eq!(
            err.to_string(),
            "Transformer 'require' failed: missing path 'id'"
        );
    }

    #[test]
    fn non_transform_errors_have_no_transformer() {
        assert_eq!(Error::invalid_argument("empty name").transformer(), None);
        assert_eq!(Error::Config("x".into()).transformer(), None);
    }
}
