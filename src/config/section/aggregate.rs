//! `[aggregate]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [aggregate]
//! enable = true       # explicit override; omit to follow `debug`
//! debug = false       # development mode disables aggregation by default
//! release = "2024.06" # part of every cache key, appended as ?release=
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregateSectionConfig {
    /// Explicit aggregation switch. `None` means "enabled unless debug".
    pub enable: Option<bool>,

    /// Development mode.
    pub debug: bool,

    /// Release identifier.
    pub release: String,
}

impl AggregateSectionConfig {
    pub const RELEASE: FieldPath = FieldPath::new("aggregate.release");

    /// Whether blocks are compiled and cached, or rendered verbatim.
    pub fn is_enabled(&self) -> bool {
        self.enable.unwrap_or(!self.debug)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.is_enabled() && self.release.is_empty() {
            diag.hint(
                Self::RELEASE,
                "release is empty; cached files only change when block markup changes",
            );
        }
    }
}
