//! `[static]` section configuration.
//!
//! Asset references inside aggregation blocks are looked up in two phases:
//! first in `dirs`, then in the `static/` directory of every entry in `apps`.
//!
//! ```toml
//! [static]
//! url = "/static/"            # stripped from locators, substituted for {{ STATIC_URL }}
//! dirs = ["static"]
//! apps = ["apps/blog", "apps/shop"]
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticConfig {
    /// Public URL prefix of static files.
    pub url: String,

    /// Filesystem lookup roots (phase one).
    pub dirs: Vec<PathBuf>,

    /// Application directories whose `static/` subdirectory is searched (phase two).
    pub apps: Vec<PathBuf>,
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            url: "/static/".into(),
            dirs: vec!["static".into()],
            apps: Vec::new(),
        }
    }
}

impl StaticConfig {
    pub const URL: FieldPath = FieldPath::new("static.url");
    pub const DIRS: FieldPath = FieldPath::new("static.dirs");
    pub const APPS: FieldPath = FieldPath::new("static.apps");

    /// App static directories (`<app>/static`).
    pub fn app_static_dirs(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.apps.iter().map(|app| app.join("static"))
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for dir in &self.dirs {
            if !dir.is_dir() {
                diag.hint(
                    Self::DIRS,
                    format!("lookup directory not found: {}", dir.display()),
                );
            }
        }
        for dir in self.app_static_dirs() {
            if !dir.is_dir() {
                diag.hint(
                    Self::APPS,
                    format!("app has no static directory: {}", dir.display()),
                );
            }
        }
        if self.url.is_empty() {
            diag.hint(Self::URL, "static URL is empty; locators are used as-is");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.statics.url, "/static/");
        assert_eq!(config.statics.dirs, vec![PathBuf::from("static")]);
        assert!(config.statics.apps.is_empty());
    }

    #[test]
    fn test_app_static_dirs() {
        let config = test_parse_config("[static]\napps = [\"apps/blog\", \"apps/shop\"]");
        let dirs: Vec<_> = config.statics.app_static_dirs().collect();
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("apps/blog/static"),
                PathBuf::from("apps/shop/static")
            ]
        );
    }

    #[test]
    fn test_missing_dirs_are_hints() {
        let statics = StaticConfig {
            dirs: vec![PathBuf::from("/nonexistent/static")],
            ..StaticConfig::default()
        };
        let mut diag = ConfigDiagnostics::new();
        statics.validate(&mut diag);
        assert!(!diag.has_errors());
        assert_eq!(diag.hints().count(), 1);
    }
}
