//! Aggregation node: one rendered block in, one tag out.
//!
//! ```text
//! enabled?  ── no ──▶ block verbatim
//!    │
//!   yes ──▶ cache.get_or_create(kind, release, raw, transform(compile(raw)))
//!                │
//!                └──▶ <script src="…/cache/js/<key>.js?release=…">
//! ```

use std::sync::Arc;

use crate::asset::{AssetKind, AssetResolver, FinderChain, HttpFetcher, RemoteRewriter};
use crate::cache::{CacheError, CacheStore, Cached};
use crate::compiler::{Compiler, ScriptCompiler, StyleCompiler};
use crate::config::AggregateConfig;

/// The rendered contents of one aggregation block.
#[derive(Debug, Clone, Copy)]
pub struct AggregationBlock<'a> {
    pub kind: AssetKind,
    pub raw: &'a str,
}

impl<'a> AggregationBlock<'a> {
    pub fn new(kind: AssetKind, raw: &'a str) -> Self {
        Self { kind, raw }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Emit the block unchanged.
    PassThrough,
    /// Compile, cache and emit a single reference.
    Compiled,
}

/// Output of rendering one block.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub html: String,
    /// Cache entry used, `None` in pass-through mode.
    pub cached: Option<Cached>,
}

impl Rendered {
    pub fn written(&self) -> bool {
        self.cached.as_ref().is_some_and(|c| c.written)
    }
}

pub struct AggregationNode {
    mode: Mode,
    release: String,
    store: CacheStore,
    scripts: ScriptCompiler,
    styles: StyleCompiler,
}

impl AggregationNode {
    /// Wire the resolver, compilers and cache store from configuration.
    pub fn new(config: &AggregateConfig) -> Self {
        let mut resolver = AssetResolver::new(Box::new(FinderChain::from_config(&config.statics)));
        if config.fetch.enable {
            let fetcher = HttpFetcher::new(config.fetch.timeout());
            resolver = resolver.with_rewriter(RemoteRewriter::new(Box::new(fetcher)));
        }
        let resolver = Arc::new(resolver);
        let static_url = config.statics.url.as_str();

        let mode = if config.aggregate.is_enabled() {
            Mode::Compiled
        } else {
            Mode::PassThrough
        };

        Self {
            mode,
            release: config.aggregate.release.clone(),
            store: CacheStore::new(&config.storage.root, config.storage.url.as_str()),
            scripts: ScriptCompiler::new(Arc::clone(&resolver), static_url)
                .with_minify(config.build.minify_js),
            styles: StyleCompiler::new(resolver, static_url),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn compiler(&self, kind: AssetKind) -> &dyn Compiler {
        match kind {
            AssetKind::Script => &self.scripts,
            AssetKind::Style => &self.styles,
        }
    }

    /// Render one block. Only a failed transform or cache write is an error.
    pub fn render(&self, block: AggregationBlock<'_>) -> Result<Rendered, CacheError> {
        if self.mode == Mode::PassThrough {
            return Ok(Rendered {
                html: block.raw.to_string(),
                cached: None,
            });
        }

        let compiler = self.compiler(block.kind);
        let cached = self
            .store
            .get_or_create(block.kind, &self.release, block.raw, || {
                compiler.transform(compiler.compile(block.raw))
            })?;

        Ok(Rendered {
            html: compiler.markup(&cached.url, &self.release),
            cached: Some(cached),
        })
    }
}
