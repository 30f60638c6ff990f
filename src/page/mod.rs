//! Page processing: every aggregation block in a page is rendered through
//! the [`AggregationNode`] and spliced back in place.

mod scan;

pub use scan::{PageError, Segment, scan};

use crate::node::AggregationNode;

/// A page with its aggregation blocks rendered.
#[derive(Debug, Clone, Default)]
pub struct RenderedPage {
    pub html: String,
    /// Blocks rendered.
    pub blocks: usize,
    /// Cache entries written while rendering.
    pub written: usize,
}

/// Render all aggregation blocks in `page`.
///
/// Blocks are rendered in page order on the calling thread.
pub fn render_page(node: &AggregationNode, page: &str) -> Result<RenderedPage, PageError> {
    let mut rendered = RenderedPage {
        html: String::with_capacity(page.len()),
        ..Default::default()
    };

    for segment in scan(page)? {
        match segment {
            Segment::Text(text) => rendered.html.push_str(text),
            Segment::Block(block) => {
                let out = node.render(block)?;
                rendered.blocks += 1;
                if out.written() {
                    rendered.written += 1;
                }
                rendered.html.push_str(&out.html);
            }
        }
    }

    Ok(rendered)
}
