//! `[build]` section configuration.
//!
//! Used by `aggregate build`, which rewrites every page below `input`.
//!
//! ```toml
//! [build]
//! input = "templates"
//! output = "public"
//! extensions = ["html", "htm"]
//! minify_js = false
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Directory scanned for pages.
    pub input: PathBuf,

    /// Directory receiving rewritten pages.
    pub output: PathBuf,

    /// Page file extensions (without dot).
    pub extensions: Vec<String>,

    /// Minify aggregated scripts with oxc.
    pub minify_js: bool,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            input: "templates".into(),
            output: "public".into(),
            extensions: vec!["html".into()],
            minify_js: false,
        }
    }
}

impl BuildSectionConfig {
    pub const INPUT: FieldPath = FieldPath::new("build.input");
    pub const OUTPUT: FieldPath = FieldPath::new("build.output");
    pub const EXTENSIONS: FieldPath = FieldPath::new("build.extensions");

    /// Check whether `path` has one of the configured page extensions.
    pub fn is_page(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.input == self.output {
            diag.error(
                Self::OUTPUT,
                format!("{} must differ from {}", Self::OUTPUT, Self::INPUT),
            );
        }
        if self.extensions.is_empty() {
            diag.error(Self::EXTENSIONS, "at least one page extension is required");
        }
    }
}
