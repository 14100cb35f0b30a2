//! Translation engine error types
//!
//! Every variant carries the stage identifier so a failed instruction can
//! be reported without aborting the surrounding record stream.

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum TranslateError {
    #[error("stage {stage}: unknown instruction kind {kind:?}")]
    UnknownInstruction { stage: String, kind: String },

    #[error("stage {stage}: healthcheck test vector is empty")]
    EmptyHealthcheck { stage: String },

    #[error("stage {stage}: {kind} requires at least one source and a destination")]
    MissingPaths { stage: String, kind: String },
}

impl TranslateError {
    /// Stage identifier the failed instruction belonged to.
    #[must_use]
    pub fn stage(&self) -> &str {
        match self {
            Self::UnknownInstruction { stage, .. }
            | Self::EmptyHealthcheck { stage }
            | Self::MissingPaths { stage, .. } => stage,
        }
    }

    /// Instruction kind that failed to translate.
    #[must_use]
    pub fn instruction_kind(&self) -> &str {
        match self {
            Self::UnknownInstruction { kind, .. } | Self::MissingPaths { kind, .. } => kind,
            Self::EmptyHealthcheck { .. } => "HEALTHCHECK",
        }
    }
}

impl UserFacingError for TranslateError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::UnknownInstruction { .. } => {
                Some("The upstream parser produced an instruction df2b does not translate.")
            }
            Self::EmptyHealthcheck { .. } => {
                Some("Declare a HEALTHCHECK test (NONE, CMD, or CMD-SHELL).")
            }
            Self::MissingPaths { .. } => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::UnknownInstruction { .. } => "translate.unknown_instruction",
            Self::EmptyHealthcheck { .. } => "translate.empty_healthcheck",
            Self::MissingPaths { .. } => "translate.missing_paths",
        };
        Some(code)
    }
}
