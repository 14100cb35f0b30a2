//! Structured build-file instructions
//!
//! One variant per directive kind, carrying exactly the fields its
//! translation rule consumes. Field semantics worth calling out:
//!
//! - `Stage::alias` is the empty string when the stage is unnamed; the
//!   translator compares against `""`, never against an option.
//! - `Arg::default` is tri-state: `None` (no default declared) versus
//!   `Some(String::new())` (explicit empty default) render differently.
//! - `Cmd`/`Entrypoint` token lists are optional; an absent list is
//!   normalized to empty at translation time, never rendered as `null`.
//! - `Add::chown`, `Copy::chown` and `Copy::from` use the empty string
//!   for "not given"; their option flags are omitted entirely when
//!   empty.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// A single key/value pair, preserving source order within its list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// One directive parsed from build-file text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Instruction {
    /// Stage declaration (`FROM base [AS alias]`).
    Stage { base: String, alias: String },
    /// Environment assignments, in source order.
    Env { pairs: Vec<KeyValue> },
    /// Working directory for subsequent instructions.
    Workdir { path: String },
    /// Exposed ports, kept as strings (`"80"`, `"53/udp"`).
    Expose { ports: Vec<String> },
    /// Signal used to stop the container.
    StopSignal { signal: String },
    /// User subsequent instructions run as.
    User { user: String },
    /// Declared volume mount points.
    Volume { paths: Vec<String> },
    /// Build argument declaration with a tri-state default.
    Arg {
        name: String,
        default: Option<String>,
    },
    /// Deferred trigger expression, verbatim.
    OnBuild { expression: String },
    /// Add files into the image, with optional ownership.
    Add {
        sources: Vec<String>,
        dest: String,
        chown: String,
    },
    /// Copy files into the image, optionally from another stage.
    Copy {
        sources: Vec<String>,
        dest: String,
        from: String,
        chown: String,
    },
    /// Container health probe. `test[0]` selects the mode (`NONE`,
    /// `CMD`, `CMD-SHELL`); the remaining elements are the command
    /// text. Zero durations and a zero retry count mean "not set".
    Healthcheck {
        test: Vec<String>,
        interval: Duration,
        timeout: Duration,
        start_period: Duration,
        retries: u32,
    },
    /// Build-time command, shell form or exec form.
    Run { shell: bool, tokens: Vec<String> },
    /// Image labels, in source order.
    Label { pairs: Vec<KeyValue> },
    /// Legacy maintainer metadata.
    Maintainer { name: String },
    /// Shell override for subsequent shell-form instructions.
    Shell { tokens: Vec<String> },
    /// Default command. `tokens: None` is the absent/null list.
    Cmd {
        shell: bool,
        tokens: Option<Vec<String>>,
    },
    /// Entrypoint, same two-form encoding as `Cmd`.
    Entrypoint {
        shell: bool,
        tokens: Option<Vec<String>>,
    },
    /// Generic fallback for directives outside the closed set.
    Other { name: String, arguments: String },
}

impl Instruction {
    /// Directive name as it appears in build-file text, for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::Stage { .. } => "FROM",
            Self::Env { .. } => "ENV",
            Self::Workdir { .. } => "WORKDIR",
            Self::Expose { .. } => "EXPOSE",
            Self::StopSignal { .. } => "STOPSIGNAL",
            Self::User { .. } => "USER",
            Self::Volume { .. } => "VOLUME",
            Self::Arg { .. } => "ARG",
            Self::OnBuild { .. } => "ONBUILD",
            Self::Add { .. } => "ADD",
            Self::Copy { .. } => "COPY",
            Self::Healthcheck { .. } => "HEALTHCHECK",
            Self::Run { .. } => "RUN",
            Self::Label { .. } => "LABEL",
            Self::Maintainer { .. } => "MAINTAINER",
            Self::Shell { .. } => "SHELL",
            Self::Cmd { .. } => "CMD",
            Self::Entrypoint { .. } => "ENTRYPOINT",
            Self::Other { name, .. } => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_value_display() {
        let kv = KeyValue::new("PATH", "/usr/bin");
        assert_eq!(kv.to_string(), "PATH=/usr/bin");
    }

    #[test]
    fn test_instruction_kind() {
        let ins = Instruction::Env {
            pairs: vec![KeyValue::new("A", "1")],
        };
        assert_eq!(ins.kind(), "ENV");

        let ins = Instruction::Other {
            name: "CROSS_BUILD".to_string(),
            arguments: String::new(),
        };
        assert_eq!(ins.kind(), "CROSS_BUILD");
    }
}
