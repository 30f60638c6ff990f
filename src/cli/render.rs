//! `render` command: render one page to stdout.

use std::io::{Write, stdout};
use std::path::Path;

use anyhow::{Context, Result};

use super::common::read_input;
use crate::config::AggregateConfig;
use crate::debug;
use crate::node::AggregationNode;
use crate::page::render_page;
use crate::utils::plural_count;

pub fn render_file(config: &AggregateConfig, path: &Path) -> Result<()> {
    let source = read_input(path)?;
    let node = AggregationNode::new(config);
    let rendered = render_page(&node, &source)
        .with_context(|| format!("failed to render {}", path.display()))?;

    debug!(
        "render";
        "{}, {} written",
        plural_count(rendered.blocks, "block"),
        rendered.written
    );

    let mut stdout = stdout().lock();
    stdout.write_all(rendered.html.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
