//! Translation output unit

use serde::{Deserialize, Serialize};
use std::fmt;

/// One emitted text line, in source instruction order.
///
/// `Command` lines are suitable for execution by the container-building
/// tool; `Diagnostic` lines are informational (the stage declaration
/// rendering, skipped-instruction notes). `Display` prints the inner
/// text without any marker so both kinds stream cleanly to stdout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranslationLine {
    Command(String),
    Diagnostic(String),
}

impl TranslationLine {
    pub fn command(text: impl Into<String>) -> Self {
        Self::Command(text.into())
    }

    pub fn diagnostic(text: impl Into<String>) -> Self {
        Self::Diagnostic(text.into())
    }

    /// The line text, regardless of kind.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Command(text) | Self::Diagnostic(text) => text,
        }
    }

    #[must_use]
    pub fn is_command(&self) -> bool {
        matches!(self, Self::Command(_))
    }
}

impl fmt::Display for TranslationLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
