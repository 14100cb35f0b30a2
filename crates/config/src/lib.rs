#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

//! Configuration management for df2b
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (`config.toml`)
//! - Environment variables (`DF2B_*`)
//! - CLI flags (applied by the binary, highest precedence)

use serde::{Deserialize, Serialize};
use std::path::Path;

use df2b_errors::{ConfigError, Error};
use df2b_types::Tooling;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub translate: TranslateConfig,
}

/// Translation target configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateConfig {
    /// Container-building tool name interpolated into every command.
    #[serde(default = "default_tool")]
    pub tool: String,
    /// Placeholder for the working-container argument.
    #[serde(default = "default_container")]
    pub container: String,
    /// Shell used to wrap shell-form RUN commands.
    #[serde(default = "default_shell")]
    pub shell: String,
}

fn default_tool() -> String {
    "buildah".to_string()
}

fn default_container() -> String {
    "<container>".to_string()
}

fn default_shell() -> String {
    "/bin/sh".to_string()
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            tool: default_tool(),
            container: default_container(),
            shell: default_shell(),
        }
    }
}

impl Config {
    /// Load configuration from the given file, or fall back to defaults
    /// when no path is given or the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when an explicitly given file cannot be
    /// read or does not parse as TOML.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config: Self = toml::from_str(&raw).map_err(|e| ConfigError::ParseFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Merge `DF2B_*` environment variables over file values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when an override is present but empty.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        for (var, slot) in [
            ("DF2B_TOOL", &mut self.translate.tool),
            ("DF2B_CONTAINER", &mut self.translate.container),
            ("DF2B_SHELL", &mut self.translate.shell),
        ] {
            if let Ok(value) = std::env::var(var) {
                if value.trim().is_empty() {
                    return Err(ConfigError::InvalidValue {
                        key: var.to_string(),
                        message: "must not be empty".to_string(),
                    }
                    .into());
                }
                *slot = value;
            }
        }
        Ok(())
    }

    /// Tooling parameters consumed by the translation rules.
    pub fn tooling(&self) -> Tooling {
        Tooling {
            tool: self.translate.tool.clone(),
            container: self.translate.container.clone(),
            shell: self.translate.shell.clone(),
        }
    }

    fn validate(&self) -> Result<(), Error> {
        for (key, value) in [
            ("translate.tool", &self.translate.tool),
            ("translate.container", &self.translate.container),
            ("translate.shell", &self.translate.shell),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "must not be empty".to_string(),
                }
                .into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_tooling_defaults() {
        let config = Config::default();
        assert_eq!(config.tooling(), Tooling::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str("[translate]\ntool = \"podman\"\n").unwrap();
        assert_eq!(config.translate.tool, "podman");
        assert_eq!(config.translate.container, "<container>");
        assert_eq!(config.translate.shell, "/bin/sh");
    }

    #[test]
    fn test_empty_tool_rejected() {
        let config: Config = toml::from_str("[translate]\ntool = \"  \"\n").unwrap();
        assert!(config.validate().is_err());
    }
}
