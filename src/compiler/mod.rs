//! Block compilers.
//!
//! A compiler turns the raw markup of one aggregation block into a single
//! payload, transforms it for caching, and formats the tag that replaces the
//! block on the page.
//!
//! ```text
//! raw markup ──compile──▶ payload ──transform──▶ cached text
//!                                                   │
//!                         <script src=...> ◀──markup┘
//! ```

mod line;
mod script;
mod style;

pub use script::ScriptCompiler;
pub use style::StyleCompiler;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::asset::{MinifyError, placeholder};

/// Characters escaped in the `release` query parameter.
const RELEASE_QUERY: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// Block contents with every reference inlined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledPayload {
    pub text: String,
    /// Locators that could not be resolved, in block order.
    pub missing: Vec<String>,
}

impl CompiledPayload {
    /// Append resolved (or placeholder) text, recording `locator` if missing.
    fn push_resolved(&mut self, locator: &str, text: &str, missing: bool) {
        if missing {
            self.missing.push(locator.to_string());
        }
        self.text.push_str(text);
    }

    fn push_line(&mut self, line: &str) {
        self.text.push_str(line);
        self.text.push('\n');
    }
}

/// Compile, transform and format one kind of aggregation block.
pub trait Compiler: Send + Sync {
    /// Inline every referenced asset; literal lines pass through in order.
    fn compile(&self, markup: &str) -> CompiledPayload;

    /// Post-compile transform. An error aborts the render.
    fn transform(&self, payload: CompiledPayload) -> Result<String, MinifyError>;

    /// Tag referencing the cached artifact at `url`.
    fn markup(&self, url: &str, release: &str) -> String;
}

/// `?release=<release>` suffix with the release percent-encoded.
pub fn release_query(release: &str) -> String {
    format!("?release={}", utf8_percent_encode(release, RELEASE_QUERY))
}

/// Prefix minified output with one placeholder per unresolved locator.
///
/// Minifiers drop comments, so placeholders inlined during compilation do
/// not survive the transform; this puts them back at the top of the file.
fn with_missing_header(missing: &[String], minified: String) -> String {
    if missing.is_empty() {
        return minified;
    }
    let mut out: String = missing.iter().map(|locator| placeholder(locator)).collect();
    out.push_str(&minified);
    out
}

/// Block lines without line terminators.
fn block_lines(markup: &str) -> impl Iterator<Item = &str> {
    markup
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_query_plain() {
        assert_eq!(release_query("v1"), "?release=v1");
        assert_eq!(release_query("2024.01-rc_1"), "?release=2024.01-rc_1");
    }

    #[test]
    fn test_release_query_encodes() {
        assert_eq!(release_query("v1 beta&x"), "?release=v1%20beta%26x");
        assert_eq!(release_query("a/b"), "?release=a/b");
    }

    #[test]
    fn test_missing_header() {
        let missing = vec!["a.css".to_string(), "b.css".to_string()];
        assert_eq!(
            with_missing_header(&missing, "p{margin:0}".into()),
            "/* FILE NOT FOUND: a.css */\n/* FILE NOT FOUND: b.css */\np{margin:0}"
        );
        assert_eq!(with_missing_header(&[], "p{}".into()), "p{}");
    }

    #[test]
    fn test_block_lines_strips_cr() {
        let lines: Vec<_> = block_lines("a\r\nb\n").collect();
        assert_eq!(lines, vec!["a", "b", ""]);
    }
}
