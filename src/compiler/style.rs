//! Style block compiler.

use std::sync::Arc;

use super::line::{CommentState, Line, classify_style};
use super::{CompiledPayload, Compiler, block_lines, release_query, with_missing_header};
use crate::asset::{AssetResolver, MinifyError, Transform};

/// Token in stylesheets replaced by the static URL prefix.
pub const STATIC_URL_TOKEN: &str = "{{ STATIC_URL }}";

/// Compiles `<link>`/`<style>` blocks into one minified stylesheet.
///
/// - lines inside `<!-- ... -->` are skipped, references included
/// - print-only stylesheets are left out
/// - remote stylesheets are fetched with their `url(...)` made absolute
pub struct StyleCompiler {
    resolver: Arc<AssetResolver>,
    static_url: String,
}

impl StyleCompiler {
    pub fn new(resolver: Arc<AssetResolver>, static_url: impl Into<String>) -> Self {
        Self {
            resolver,
            static_url: static_url.into(),
        }
    }
}

impl Compiler for StyleCompiler {
    fn compile(&self, markup: &str) -> CompiledPayload {
        let mut out = CompiledPayload::default();
        let mut comment = CommentState::default();

        for line in block_lines(markup) {
            if comment.skip(line) {
                continue;
            }

            match classify_style(line) {
                Line::References(references) => {
                    for reference in references.iter().filter(|r| !r.is_print()) {
                        let logical = reference.logical_path(&self.static_url);
                        let resolution = self.resolver.resolve_remote(logical);
                        let missing = resolution.is_missing();
                        let text = resolution
                            .into_text(&reference.locator)
                            .replace(STATIC_URL_TOKEN, &self.static_url);
                        out.push_resolved(&reference.locator, &text, missing);
                    }
                }
                Line::Wrapper => {}
                Line::Literal(text) => out.push_line(text),
            }
        }

        out
    }

    fn transform(&self, payload: CompiledPayload) -> Result<String, MinifyError> {
        let minified = Transform::MinifyStyle.apply(payload.text)?;
        Ok(with_missing_header(&payload.missing, minified))
    }

    fn markup(&self, url: &str, release: &str) -> String {
        format!(
            r#"<link rel="stylesheet" href="{}{}" type="text/css" />"#,
            url,
            release_query(release)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::remote::tests::MockFetcher;
    use crate::asset::{DirFinder, RemoteRewriter};
    use std::fs;
    use tempfile::TempDir;

    fn resolver(dir: &TempDir) -> AssetResolver {
        AssetResolver::new(Box::new(DirFinder::new([dir.path().to_path_buf()])))
    }

    fn compiler(dir: &TempDir) -> StyleCompiler {
        StyleCompiler::new(Arc::new(resolver(dir)), "/static/")
    }

    #[test]
    fn test_print_media_excluded() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.css"), "body{color:red}").unwrap();
        fs::write(dir.path().join("b.css"), "body{color:black}").unwrap();

        let raw = "<link href=\"/static/a.css\">\n<link href=\"/static/b.css\" media=\"print\">";
        let compiled = compiler(&dir).compile(raw);

        assert_eq!(compiled.text, "body{color:red}\n");
        assert!(!compiled.text.contains("black"));
    }

    #[test]
    fn test_print_media_query_excluded() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("p.css"), "body{color:black}").unwrap();
        fs::write(dir.path().join("q.css"), "i{color:gray}").unwrap();

        let raw = concat!(
            "<link href=\"/static/p.css\" media=\"print and (color)\">\n",
            "<link href=\"/static/q.css\" media='print, projection'>",
        );
        let compiled = compiler(&dir).compile(raw);

        assert_eq!(compiled.text, "");
        assert!(compiled.missing.is_empty());
    }

    #[test]
    fn test_comment_region_skipped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.css"), "a{}").unwrap();
        fs::write(dir.path().join("ie.css"), ".ie{}").unwrap();

        let raw = concat!(
            "<link href=\"/static/a.css\">\n",
            "<!--[if IE]>\n",
            "<link href=\"/static/ie.css\">\n",
            "<![endif]-->\n",
            "<style>\n",
            "p{margin:0}\n",
            "</style>",
        );
        let compiled = compiler(&dir).compile(raw);

        assert_eq!(compiled.text, "a{}\np{margin:0}\n");
    }

    #[test]
    fn test_static_url_token_replaced() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("bg.css"),
            "a{background:url({{ STATIC_URL }}img/bg.png)}",
        )
        .unwrap();

        let compiled = compiler(&dir).compile("<link href=\"/static/bg.css\">");
        assert_eq!(compiled.text, "a{background:url(/static/img/bg.png)}\n");
    }

    #[test]
    fn test_remote_stylesheet_rewritten() {
        let dir = TempDir::new().unwrap();
        let url = "http://cdn.example.com/css/base.css";
        let resolver = resolver(&dir).with_rewriter(RemoteRewriter::new(Box::new(
            MockFetcher::with(url, "i{background:url(foo.png)}"),
        )));
        let compiler = StyleCompiler::new(Arc::new(resolver), "/static/");

        let compiled = compiler.compile(&format!("<link rel=\"stylesheet\" href=\"{url}\">"));
        assert_eq!(
            compiled.text,
            "i{background:url('http://cdn.example.com/css/foo.png')}\n"
        );
    }

    #[test]
    fn test_missing_stylesheet_survives_minification() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.css"), "a { color: red }").unwrap();
        let compiler = compiler(&dir);

        let compiled = compiler.compile("<link href=\"/static/a.css\">\n<link href=\"/static/gone.css\">");
        assert_eq!(compiled.missing, vec!["/static/gone.css"]);

        let out = compiler.transform(compiled).unwrap();
        assert_eq!(out, "/* FILE NOT FOUND: /static/gone.css */\na{color:red}");
    }

    #[test]
    fn test_transform_minifies() {
        let dir = TempDir::new().unwrap();
        let compiler = compiler(&dir);
        let out = compiler
            .transform(compiler.compile("<style>\nbody {\n  color: red;\n}\n</style>"))
            .unwrap();
        assert_eq!(out, "body{color:red}");
    }

    #[test]
    fn test_transform_failure() {
        let dir = TempDir::new().unwrap();
        let compiler = compiler(&dir);
        assert!(compiler.transform(compiler.compile("..broken { color: red; }")).is_err());
    }

    #[test]
    fn test_markup() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            compiler(&dir).markup("/media/cache/css/abc.css", "v 1"),
            r#"<link rel="stylesheet" href="/media/cache/css/abc.css?release=v%201" type="text/css" />"#
        );
    }
}
