//! Line classification for aggregation blocks.
//!
//! Blocks are compiled one line at a time. Each classifier looks at a single
//! line in isolation; the only state carried between lines is whether a style
//! block is inside an HTML comment ([`CommentState`]).
//!
//! ```text
//! <script src="/static/a.js"></script>   → References([a.js])
//! <script>                               → Wrapper
//! var inline = 1;                        → Literal
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::asset::AssetReference;

static SCRIPT_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<script\b[^>]*").unwrap());
static LINK_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<link\b[^>]*").unwrap());
static SCRIPT_WRAPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?script\b").unwrap());
static STYLE_WRAPPER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</?style\b").unwrap());
static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\s([a-z-]+)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#).unwrap()
});

const COMMENT_OPEN: &str = "<!--";
const COMMENT_CLOSE: &str = "-->";

/// How a single block line is compiled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// Tag(s) naming external assets, in source order.
    References(Vec<AssetReference>),
    /// Opening or closing wrapper tag; dropped.
    Wrapper,
    /// Anything else; copied through.
    Literal(&'a str),
}

/// Classify a line of a script block.
pub fn classify_script(line: &str) -> Line<'_> {
    let references = script_references(line);
    if !references.is_empty() {
        Line::References(references)
    } else if is_script_wrapper(line) {
        Line::Wrapper
    } else {
        Line::Literal(line)
    }
}

/// Classify a line of a style block.
pub fn classify_style(line: &str) -> Line<'_> {
    let references = link_references(line);
    if !references.is_empty() {
        Line::References(references)
    } else if is_style_wrapper(line) {
        Line::Wrapper
    } else {
        Line::Literal(line)
    }
}

/// `src` of every `<script>` tag on the line.
pub fn script_references(line: &str) -> Vec<AssetReference> {
    SCRIPT_TAG
        .find_iter(line)
        .filter_map(|tag| attribute(tag.as_str(), "src"))
        .map(AssetReference::new)
        .collect()
}

/// `href` (and `media`) of every `<link>` tag on the line.
pub fn link_references(line: &str) -> Vec<AssetReference> {
    LINK_TAG
        .find_iter(line)
        .filter_map(|tag| {
            let tag = tag.as_str();
            let reference = AssetReference::new(attribute(tag, "href")?);
            Some(match attribute(tag, "media") {
                Some(media) => reference.with_media(media),
                None => reference,
            })
        })
        .collect()
}

pub fn is_script_wrapper(line: &str) -> bool {
    SCRIPT_WRAPPER.is_match(line)
}

pub fn is_style_wrapper(line: &str) -> bool {
    STYLE_WRAPPER.is_match(line)
}

/// Value of attribute `name` inside a tag, quoted or bare.
fn attribute<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    ATTRIBUTE
        .captures_iter(tag)
        .find(|caps| caps[1].eq_ignore_ascii_case(name))
        .and_then(|caps| caps.get(2).or(caps.get(3)).or(caps.get(4)))
        .map(|value| value.as_str().trim())
        .filter(|value| !value.is_empty())
}

/// Tracks HTML comment regions across the lines of a style block.
///
/// A region runs from the line containing `<!--` through the line containing
/// `-->`, both inclusive.
#[derive(Debug, Default)]
pub struct CommentState {
    inside: bool,
}

impl CommentState {
    /// Returns `true` if `line` belongs to a comment region.
    pub fn skip(&mut self, line: &str) -> bool {
        let rest = if self.inside {
            line
        } else if let Some(start) = line.find(COMMENT_OPEN) {
            self.inside = true;
            &line[start + COMMENT_OPEN.len()..]
        } else {
            return false;
        };

        if rest.contains(COMMENT_CLOSE) {
            self.inside = false;
        }
        true
    }
}
