//! Aggregation block scanner.
//!
//! ```text
//! <head>
//! {% aggregate_css %}                         ┐
//! <link href="/static/site.css">              │ Block(Style)
//! {% endaggregate_css %}                      ┘
//! </head>                                       Text
//! ```

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::asset::AssetKind;
use crate::cache::CacheError;
use crate::node::AggregationBlock;

static BLOCK_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{%\s*(end)?aggregate_(js|css)\s*%\}").unwrap());

#[derive(Debug, Error)]
pub enum PageError {
    #[error("line {line}: `aggregate_{kind}` block is never closed")]
    Unterminated { kind: AssetKind, line: usize },

    #[error("line {line}: `{found}` inside an open `aggregate_{open}` block")]
    Mismatched {
        open: AssetKind,
        found: String,
        line: usize,
    },

    #[error("line {line}: `{found}` without a matching opening tag")]
    Unopened { found: String, line: usize },

    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// A piece of a page.
#[derive(Debug, Clone, Copy)]
pub enum Segment<'a> {
    /// Copied verbatim.
    Text(&'a str),
    /// Contents between an opening and closing tag.
    Block(AggregationBlock<'a>),
}

/// Split `page` into text and aggregation blocks, in order.
pub fn scan(page: &str) -> Result<Vec<Segment<'_>>, PageError> {
    let mut segments = Vec::new();
    let mut cursor = 0;
    // (kind, body start, tag start)
    let mut open: Option<(AssetKind, usize, usize)> = None;

    for caps in BLOCK_TAG.captures_iter(page) {
        let Some(tag) = caps.get(0) else { continue };
        let kind = if &caps[2] == "js" {
            AssetKind::Script
        } else {
            AssetKind::Style
        };
        let closing = caps.get(1).is_some();

        match open {
            None if !closing => {
                if tag.start() > cursor {
                    segments.push(Segment::Text(&page[cursor..tag.start()]));
                }
                open = Some((kind, tag.end(), tag.start()));
            }
            None => {
                return Err(PageError::Unopened {
                    found: tag.as_str().to_string(),
                    line: line_of(page, tag.start()),
                });
            }
            Some((open_kind, body, _)) if closing && open_kind == kind => {
                let raw = &page[body..tag.start()];
                segments.push(Segment::Block(AggregationBlock::new(kind, raw)));
                cursor = tag.end();
                open = None;
            }
            Some((open_kind, ..)) => {
                return Err(PageError::Mismatched {
                    open: open_kind,
                    found: tag.as_str().to_string(),
                    line: line_of(page, tag.start()),
                });
            }
        }
    }

    if let Some((kind, _, start)) = open {
        return Err(PageError::Unterminated {
            kind,
            line: line_of(page, start),
        });
    }

    if cursor < page.len() {
        segments.push(Segment::Text(&page[cursor..]));
    }
    Ok(segments)
}

/// 1-based line number of byte offset `pos`.
fn line_of(page: &str, pos: usize) -> usize {
    page[..pos].matches('\n').count() + 1
}
