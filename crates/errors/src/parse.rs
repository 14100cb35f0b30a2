//! Dockerfile frontend error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum ParseError {
    #[error("line {line}: unterminated quote in {directive} arguments")]
    UnterminatedQuote { directive: String, line: usize },

    #[error("line {line}: malformed JSON array: {message}")]
    MalformedJsonArray { message: String, line: usize },

    #[error("line {line}: {directive} requires at least {required} argument(s)")]
    MissingArgument {
        directive: String,
        required: usize,
        line: usize,
    },

    #[error("line {line}: invalid key=value pair {pair:?}")]
    InvalidKeyValue { pair: String, line: usize },

    #[error("line {line}: invalid duration {value:?}")]
    InvalidDuration { value: String, line: usize },

    #[error("line {line}: invalid number {value:?}")]
    InvalidNumber { value: String, line: usize },

    #[error("line {line}: unknown option {option} for {directive}")]
    UnknownOption {
        directive: String,
        option: String,
        line: usize,
    },

    #[error("line {line}: {directive} arguments must be a JSON array of strings")]
    JsonArrayRequired { directive: String, line: usize },

    #[error("line {line}: unexpected continuation at end of input")]
    DanglingContinuation { line: usize },

    #[error("invalid escape directive {value:?}")]
    InvalidEscapeDirective { value: String },
}

impl UserFacingError for ParseError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::UnterminatedQuote { .. } | Self::InvalidKeyValue { .. } => {
                Some("Check quoting in the directive arguments.")
            }
            Self::MalformedJsonArray { .. } | Self::JsonArrayRequired { .. } => {
                Some("Exec-form arguments must be a JSON array of strings.")
            }
            Self::InvalidEscapeDirective { .. } => {
                Some("The escape directive accepts only \\ or `.")
            }
            _ => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::UnterminatedQuote { .. } => "parse.unterminated_quote",
            Self::MalformedJsonArray { .. } => "parse.malformed_json_array",
            Self::MissingArgument { .. } => "parse.missing_argument",
            Self::InvalidKeyValue { .. } => "parse.invalid_key_value",
            Self::InvalidDuration { .. } => "parse.invalid_duration",
            Self::InvalidNumber { .. } => "parse.invalid_number",
            Self::UnknownOption { .. } => "parse.unknown_option",
            Self::JsonArrayRequired { .. } => "parse.json_array_required",
            Self::DanglingContinuation { .. } => "parse.dangling_continuation",
            Self::InvalidEscapeDirective { .. } => "parse.invalid_escape_directive",
        };
        Some(code)
    }
}
