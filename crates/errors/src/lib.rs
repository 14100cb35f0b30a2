#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

//! Error types for the df2b translation pipeline
//!
//! This crate provides fine-grained error types organized by domain.
//! All error types implement Clone for easier handling across the
//! stage-at-a-time processing loop.

use std::borrow::Cow;

use thiserror::Error;

pub mod config;
pub mod parse;
pub mod translate;

// Re-export all error types at the root
pub use config::ConfigError;
pub use parse::ParseError;
pub use translate::TranslateError;

/// Generic error type for cross-crate boundaries
#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("translate error: {0}")]
    Translate(#[from] TranslateError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("I/O error: {message}")]
    Io { message: String },
}

impl Error {
    /// Create an internal error with a message
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON error: {err}"))
    }
}

/// Result type alias for df2b operations
pub type Result<T> = std::result::Result<T, Error>;

/// Minimal interface for rendering user-facing error information without
/// requiring heavyweight envelopes.
pub trait UserFacingError {
    /// Short message suitable for CLI output.
    fn user_message(&self) -> Cow<'_, str>;

    /// Optional remediation hint.
    fn user_hint(&self) -> Option<&'static str> {
        None
    }

    /// Stable error code for structured reporting.
    fn user_code(&self) -> Option<&'static str> {
        None
    }
}

impl UserFacingError for Error {
    fn user_message(&self) -> Cow<'_, str> {
        match self {
            Error::Parse(err) => err.user_message(),
            Error::Translate(err) => err.user_message(),
            Error::Io { message } => Cow::Owned(message.clone()),
            _ => Cow::Owned(self.to_string()),
        }
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Error::Parse(err) => err.user_hint(),
            Error::Translate(err) => err.user_hint(),
            Error::Config(_) => Some("Check your df2b configuration file."),
            _ => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        match self {
            Error::Parse(err) => err.user_code(),
            Error::Translate(err) => err.user_code(),
            Error::Config(err) => err.user_code(),
            Error::Internal(_) => Some("error.internal"),
            Error::Io { .. } => Some("error.io"),
        }
    }
}
