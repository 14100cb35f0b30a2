//! Stage identity carried through diagnostics

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies the build stage currently being translated.
///
/// Created once per input record and discarded after that record's
/// instructions are translated. The identifier is opaque and only ever
/// appears in diagnostics and error values; it has no effect on
/// translation output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageContext {
    pub id: String,
}

impl StageContext {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl fmt::Display for StageContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}
