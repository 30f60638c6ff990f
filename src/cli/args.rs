//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::asset::AssetKind;

/// Bundle and cache the scripts and stylesheets referenced by page templates
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: aggregate.toml)
    #[arg(short = 'C', long, default_value = "aggregate.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Render every page under `build.input` into `build.output`
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        args: AggregateArgs,
    },

    /// Render a single page and print it to stdout
    #[command(visible_alias = "r")]
    Render {
        /// Page to render, or `-` for stdin
        #[arg(value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
        path: PathBuf,

        #[command(flatten)]
        args: AggregateArgs,
    },

    /// Print the cache key and storage path for a raw block
    #[command(visible_alias = "k")]
    Key {
        /// Block contents, or `-` for stdin
        #[arg(value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
        path: PathBuf,

        /// Block kind (js or css)
        #[arg(short, long, value_parser = parse_kind)]
        kind: AssetKind,

        #[command(flatten)]
        args: AggregateArgs,
    },
}

impl Commands {
    /// Arguments shared by every command.
    pub const fn args(&self) -> &AggregateArgs {
        match self {
            Self::Build { args } | Self::Render { args, .. } | Self::Key { args, .. } => args,
        }
    }
}

/// Overrides for the `[aggregate]`, `[fetch]` and `[build]` sections
#[derive(clap::Args, Debug, Clone, Default)]
pub struct AggregateArgs {
    /// Release identifier mixed into cache keys and URLs
    #[arg(short, long)]
    pub release: Option<String>,

    /// Debug mode: blocks pass through unless aggregation is enabled explicitly
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub debug: Option<bool>,

    /// Force aggregation on or off, regardless of debug mode
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub enable: Option<bool>,

    /// Allow fetching remote stylesheets
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub fetch: Option<bool>,

    /// Minify compiled scripts
    #[arg(short = 'J', long = "minify-js", action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify_js: Option<bool>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

fn parse_kind(value: &str) -> Result<AssetKind, String> {
    AssetKind::from_ext(value).ok_or_else(|| format!("unknown kind `{value}` (expected js or css)"))
}

#[allow(unused)]
impl Cli {
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build { .. })
    }
    pub const fn is_render(&self) -> bool {
        matches!(self.command, Commands::Render { .. })
    }
    pub const fn is_key(&self) -> bool {
        matches!(self.command, Commands::Key { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_overrides() {
        let cli = Cli::try_parse_from(["aggregate", "build", "-r", "v2", "--debug", "--fetch", "false"]).unwrap();
        let args = cli.command.args();

        assert!(cli.is_build());
        assert_eq!(args.release.as_deref(), Some("v2"));
        assert_eq!(args.debug, Some(true));
        assert_eq!(args.fetch, Some(false));
        assert_eq!(args.enable, None);
        assert_eq!(cli.config, PathBuf::from("aggregate.toml"));
    }

    #[test]
    fn test_parse_key_kind() {
        let cli = Cli::try_parse_from(["aggregate", "-C", "site.toml", "key", "-", "--kind", "css"]).unwrap();
        match cli.command {
            Commands::Key { path, kind, .. } => {
                assert_eq!(path, PathBuf::from("-"));
                assert_eq!(kind, AssetKind::Style);
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(cli.config, PathBuf::from("site.toml"));
    }

    #[test]
    fn test_parse_key_rejects_unknown_kind() {
        assert!(Cli::try_parse_from(["aggregate", "key", "-", "--kind", "html"]).is_err());
    }
}
