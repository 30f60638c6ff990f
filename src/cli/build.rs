//! `build` command: render every page under `build.input`.
//!
//! Pages are processed in parallel; blocks within a page are rendered in
//! order on the page's thread.
//!
//! ```text
//! templates/blog/post.html ──render_page──▶ public/blog/post.html
//!                                   └──────▶ media/cache/{js,css}/<key>.*
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use rayon::prelude::*;

use super::common::collect_pages;
use crate::config::AggregateConfig;
use crate::logger::ProgressLine;
use crate::node::AggregationNode;
use crate::page::render_page;
use crate::utils::plural_count;
use crate::{debug, log};

/// Totals for one build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub pages: usize,
    pub blocks: usize,
    pub written: usize,
}

impl BuildSummary {
    fn merge(self, other: Self) -> Self {
        Self {
            pages: self.pages + other.pages,
            blocks: self.blocks + other.blocks,
            written: self.written + other.written,
        }
    }
}

/// Build all pages. Returns the totals, or an error if any page failed.
pub fn build_pages(config: &AggregateConfig, quiet: bool) -> Result<BuildSummary> {
    let node = AggregationNode::new(config);
    let pages = collect_pages(&config.build);
    debug!("build"; "{} under {}", plural_count(pages.len(), "page"), config.build.input.display());

    let progress = (!quiet).then(|| ProgressLine::new(&[("pages", pages.len())]));

    let results: Vec<_> = pages
        .par_iter()
        .map(|path| {
            let result = build_page(config, &node, path);
            if let Some(progress) = &progress {
                progress.inc("pages");
            }
            result.with_context(|| format!("failed to build {}", config.root_relative(path).display()))
        })
        .collect();

    if let Some(progress) = progress {
        progress.finish();
    }

    let mut summary = BuildSummary::default();
    let mut failed = 0;
    for result in results {
        match result {
            Ok(page) => summary = summary.merge(page),
            Err(err) => {
                failed += 1;
                log!("error"; "{:#}", err);
            }
        }
    }

    if failed > 0 {
        bail!("{} failed", plural_count(failed, "page"));
    }

    if !quiet {
        log!(
            "build";
            "{}, {} ({} written)",
            plural_count(summary.pages, "page"),
            plural_count(summary.blocks, "block"),
            summary.written
        );
    }
    Ok(summary)
}

/// Render one page and write it to the mirrored path under `build.output`.
fn build_page(config: &AggregateConfig, node: &AggregationNode, path: &Path) -> Result<BuildSummary> {
    let source = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let rendered = render_page(node, &source)?;

    let relative = path.strip_prefix(&config.build.input).unwrap_or(path);
    let output = config.build.output.join(relative);
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent).with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&output, &rendered.html).with_context(|| format!("failed to write {}", output.display()))?;

    Ok(BuildSummary {
        pages: 1,
        blocks: rendered.blocks,
        written: rendered.written,
    })
}
