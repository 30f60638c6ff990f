//! Asset resolution: locator → text.
//!
//! Missing assets never abort a compile. They are replaced by a one-line
//! comment naming the locator, so the gap is visible in the bundle.

use std::fs;

use super::finder::StaticFinder;
use super::reference::is_remote;
use super::remote::RemoteRewriter;
use crate::log;

/// Outcome of resolving one locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Found on disk.
    Local(String),
    /// Fetched over HTTP and rewritten.
    Remote(String),
    /// Not found anywhere.
    Missing,
}

impl Resolution {
    /// Text to inline, with the placeholder standing in for a missing asset.
    pub fn into_text(self, locator: &str) -> String {
        match self {
            Self::Local(text) | Self::Remote(text) => text,
            Self::Missing => placeholder(locator),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// Comment inlined in place of an unresolved asset.
///
/// Valid in both JavaScript and CSS so a gap never turns into a parse error.
pub fn placeholder(locator: &str) -> String {
    format!("/* FILE NOT FOUND: {} */\n", locator.replace("*/", "* /"))
}

/// Resolves locators via static lookup and, for styles, remote fetching.
pub struct AssetResolver {
    finder: Box<dyn StaticFinder>,
    rewriter: Option<RemoteRewriter>,
}

impl AssetResolver {
    pub fn new(finder: Box<dyn StaticFinder>) -> Self {
        Self {
            finder,
            rewriter: None,
        }
    }

    /// Enable remote fetching for [`Self::resolve_remote`].
    pub fn with_rewriter(mut self, rewriter: RemoteRewriter) -> Self {
        self.rewriter = Some(rewriter);
        self
    }

    /// Read a local asset as UTF-8 (lossy) with a trailing newline.
    pub fn read_local(&self, logical: &str) -> Option<String> {
        let path = self.finder.find(logical)?;
        match fs::read(&path) {
            Ok(bytes) => {
                let mut text = String::from_utf8_lossy(&bytes).into_owned();
                text.push('\n');
                Some(text)
            }
            Err(err) => {
                log!("warning"; "failed to read {}: {}", path.display(), err);
                None
            }
        }
    }

    /// Local lookup only (scripts).
    pub fn resolve_local(&self, logical: &str) -> Resolution {
        match self.read_local(logical) {
            Some(text) => Resolution::Local(text),
            None => {
                log!("warning"; "asset not found: {}", logical);
                Resolution::Missing
            }
        }
    }

    /// Local lookup, then fetch-and-rewrite for HTTP(S) locators (styles).
    pub fn resolve_remote(&self, logical: &str) -> Resolution {
        if let Some(text) = self.read_local(logical) {
            return Resolution::Local(text);
        }

        if is_remote(logical)
            && let Some(rewriter) = &self.rewriter
        {
            match rewriter.fetch_and_rewrite(logical) {
                Ok(mut text) => {
                    if !text.ends_with('\n') {
                        text.push('\n');
                    }
                    return Resolution::Remote(text);
                }
                Err(err) => log!("warning"; "{}", err),
            }
        }

        log!("warning"; "asset not found: {}", logical);
        Resolution::Missing
    }
}
