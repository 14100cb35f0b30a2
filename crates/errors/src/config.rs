//! Configuration error types

use crate::UserFacingError;
use std::borrow::Cow;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read config file {path}: {message}")]
    ReadFailed { path: String, message: String },

    #[error("invalid config file {path}: {message}")]
    ParseFailed { path: String, message: String },

    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

impl UserFacingError for ConfigError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::ReadFailed { .. } => "config.read_failed",
            Self::ParseFailed { .. } => "config.parse_failed",
            Self::InvalidValue { .. } => "config.invalid_value",
        };
        Some(code)
    }
}
