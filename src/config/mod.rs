//! Configuration management for `aggregate.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── aggregate  # [aggregate]
//! │   ├── build      # [build]
//! │   ├── fetch      # [fetch]
//! │   ├── statics    # [static]
//! │   └── storage    # [storage]
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! ├── util.rs        # config file discovery
//! └── mod.rs         # AggregateConfig (this file)
//! ```
//!
//! All components receive the configuration explicitly; there is no global
//! configuration handle.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{
    AggregateSectionConfig, BuildSectionConfig, FetchConfig, StaticConfig, StorageConfig,
};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::cli::{AggregateArgs, Cli};
use crate::log;
use crate::utils::path::{expand_path, normalize_path};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing `aggregate.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregateConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Aggregation switch, debug mode and release identifier
    #[serde(default)]
    pub aggregate: AggregateSectionConfig,

    /// Cache storage location
    #[serde(default)]
    pub storage: StorageConfig,

    /// Static file lookup
    #[serde(default, rename = "static")]
    pub statics: StaticConfig,

    /// Remote stylesheet fetching
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Page build settings
    #[serde(default)]
    pub build: BuildSectionConfig,
}

impl AggregateConfig {
    /// Load configuration for a CLI invocation.
    ///
    /// Searches upward from cwd to find the config file. The project root is
    /// the config file's parent directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let Some(config_path) = find_config_file(&cli.config) else {
            bail!(ConfigError::NotFound(cli.config.clone()));
        };

        let mut config = Self::from_path(&config_path)?;
        config.config_path = normalize_path(&config_path);

        let root = config
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        config.set_root(&root);
        config.normalize_paths();
        config.apply_args(cli.command.args());

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
            if !Self::prompt_continue()? {
                bail!("Aborted due to unknown config fields");
            }
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        eprintln!();
        log!("warning"; "unknown fields in {}:", display_path);
        log!("warning"; "ignoring:");
        for field in fields {
            eprintln!("- {}", field);
        }
        eprintln!();
    }

    /// Prompt user to continue. Returns true only if user explicitly confirms.
    fn prompt_continue() -> Result<bool> {
        use std::io::{self, Write};

        eprint!("Continue? [y/N] ");
        io::stderr().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        let input = input.trim().to_lowercase();
        Ok(input == "y" || input == "yes")
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.root = path.to_path_buf();
    }

    /// Get path relative to the project root
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply shared command arguments. CLI values win over the file.
    fn apply_args(&mut self, args: &AggregateArgs) {
        crate::logger::set_verbose(args.verbose);

        Self::update_option(&mut self.aggregate.release, args.release.as_ref());
        Self::update_option(&mut self.aggregate.debug, args.debug.as_ref());
        if args.enable.is_some() {
            self.aggregate.enable = args.enable;
        }
        Self::update_option(&mut self.fetch.enable, args.fetch.as_ref());
        Self::update_option(&mut self.build.minify_js, args.minify_js.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    /// Normalize all paths relative to root directory.
    fn normalize_paths(&mut self) {
        let root = normalize_path(&self.root);
        self.set_root(&root);

        self.storage.root = expand_path(&self.storage.root, &root);
        self.statics.dirs = self
            .statics
            .dirs
            .iter()
            .map(|dir| expand_path(dir, &root))
            .collect();
        self.statics.apps = self
            .statics
            .apps
            .iter()
            .map(|app| expand_path(app, &root))
            .collect();
        self.build.input = expand_path(&self.build.input, &root);
        self.build.output = expand_path(&self.build.output, &root);
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.aggregate.validate(&mut diag);
        self.storage.validate(&mut diag);
        self.statics.validate(&mut diag);
        self.fetch.validate(&mut diag);
        self.build.validate(&mut diag);

        diag.print_hints();

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config from TOML.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> AggregateConfig {
    let (parsed, ignored) = AggregateConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

/// Config rooted at `root` with all lookup paths below it.
#[cfg(test)]
pub fn test_config_at(root: &Path, extra: &str) -> AggregateConfig {
    let mut config = test_parse_config(extra);
    config.set_root(root);
    config.normalize_paths();
    config
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_str_invalid_toml() {
        let result = AggregateConfig::from_str("[aggregate\nrelease = \"v1\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_default_config() {
        let config = AggregateConfig::default();
        assert_eq!(config.config_path, PathBuf::new());
        assert_eq!(config.get_root(), Path::new(""));
        assert!(config.aggregate.is_enabled());
        assert_eq!(config.statics.url, "/static/");
    }

    #[test]
    fn test_static_section_renamed() {
        let config = test_parse_config("[static]\nurl = \"/assets/\"");
        assert_eq!(config.statics.url, "/assets/");
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[aggregate]\nrelease = \"v1\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = AggregateConfig::parse_with_ignored(content).unwrap();

        assert_eq!(config.aggregate.release, "v1");
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_normalize_paths_relative_to_root() {
        let dir = TempDir::new().unwrap();
        let config = test_config_at(
            dir.path(),
            "[storage]\nroot = \"media\"\n[static]\ndirs = [\"static\"]\napps = [\"apps/blog\"]",
        );
        let root = normalize_path(dir.path());

        assert_eq!(config.storage.root, root.join("media"));
        assert_eq!(config.statics.dirs, vec![root.join("static")]);
        assert_eq!(config.statics.apps, vec![root.join("apps/blog")]);
        assert_eq!(config.build.output, root.join("public"));
    }

    #[test]
    fn test_apply_args_override() {
        let mut config = test_parse_config("[aggregate]\nrelease = \"v1\"\ndebug = true");
        let args = AggregateArgs {
            release: Some("v2".into()),
            debug: None,
            enable: Some(true),
            fetch: Some(false),
            minify_js: None,
            verbose: false,
        };
        config.apply_args(&args);

        assert_eq!(config.aggregate.release, "v2");
        assert!(config.aggregate.debug);
        assert!(config.aggregate.is_enabled());
        assert!(!config.fetch.enable);
    }

    #[test]
    fn test_root_relative() {
        let mut config = AggregateConfig::default();
        config.set_root(Path::new("/srv/site"));
        assert_eq!(
            config.root_relative("/srv/site/templates/index.html"),
            PathBuf::from("templates/index.html")
        );
        assert_eq!(config.root_relative("/elsewhere"), PathBuf::from("/elsewhere"));
    }
}
