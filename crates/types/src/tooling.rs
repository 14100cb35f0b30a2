//! Target-tool parameters for the translation rules

use serde::{Deserialize, Serialize};

/// Names the translator interpolates into every emitted command.
///
/// `container` is a placeholder token, not a real container id; the
/// emitted commands are meant to be reviewed or templated, not piped
/// straight into a shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tooling {
    /// Container-building tool the commands target.
    pub tool: String,
    /// Placeholder for the working-container argument.
    pub container: String,
    /// Shell used to wrap shell-form commands.
    pub shell: String,
}

impl Default for Tooling {
    fn default() -> Self {
        Self {
            tool: "buildah".to_string(),
            container: "<container>".to_string(),
            shell: "/bin/sh".to_string(),
        }
    }
}
