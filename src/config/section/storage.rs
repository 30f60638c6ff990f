//! `[storage]` section configuration.
//!
//! Compiled bundles are written below `root` and served from `url`:
//!
//! ```toml
//! [storage]
//! root = "media"      # <root>/cache/{js,css}/<key>.{js,css}
//! url = "/media/"     # public prefix replacing `root` in emitted markup
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Storage root directory (relative to the config file).
    pub root: PathBuf,

    /// Public URL prefix of the storage root.
    pub url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: "media".into(),
            url: "/media/".into(),
        }
    }
}

impl StorageConfig {
    pub const ROOT: FieldPath = FieldPath::new("storage.root");
    pub const URL: FieldPath = FieldPath::new("storage.url");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.root.as_os_str().is_empty() {
            diag.error(Self::ROOT, "storage root must not be empty");
        } else if self.root.is_file() {
            diag.error(
                Self::ROOT,
                format!("{} is a file: {}", Self::ROOT, self.root.display()),
            );
        }

        if self.url.trim().is_empty() {
            diag.error_with_hint(
                Self::URL,
                "public URL prefix must not be empty",
                "use \"/\" to serve the storage root at the site root",
            );
        }
    }
}
