//! Script block compiler.

use std::sync::Arc;

use super::line::{Line, classify_script};
use super::{CompiledPayload, Compiler, block_lines, release_query, with_missing_header};
use crate::asset::{AssetResolver, MinifyError, Transform};

/// Compiles `<script>` blocks into one JavaScript payload.
///
/// References are resolved from local static files only; a remote `src`
/// becomes a placeholder.
pub struct ScriptCompiler {
    resolver: Arc<AssetResolver>,
    static_url: String,
    transform: Transform,
}

impl ScriptCompiler {
    pub fn new(resolver: Arc<AssetResolver>, static_url: impl Into<String>) -> Self {
        Self {
            resolver,
            static_url: static_url.into(),
            transform: Transform::Identity,
        }
    }

    /// Minify compiled scripts instead of passing them through.
    pub fn with_minify(mut self, minify: bool) -> Self {
        self.transform = if minify {
            Transform::MinifyScript
        } else {
            Transform::Identity
        };
        self
    }
}

impl Compiler for ScriptCompiler {
    fn compile(&self, markup: &str) -> CompiledPayload {
        let mut out = CompiledPayload::default();

        for line in block_lines(markup) {
            match classify_script(line) {
                Line::References(references) => {
                    for reference in references {
                        let logical = reference.logical_path(&self.static_url);
                        let resolution = self.resolver.resolve_local(logical);
                        let missing = resolution.is_missing();
                        let text = resolution.into_text(&reference.locator);
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
        match self.transform {
            // placeholders are still inline
            Transform::Identity => Ok(payload.text),
            transform => {
                let minified = transform.apply(payload.text)?;
                Ok(with_missing_header(&payload.missing, minified))
            }
        }
    }

    fn markup(&self, url: &str, release: &str) -> String {
        format!(
            r#"<script src="{}{}"></script>"#,
            url,
            release_query(release)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::DirFinder;
    use std::fs;
    use tempfile::TempDir;

    fn compiler(dir: &TempDir) -> ScriptCompiler {
        let finder = DirFinder::new([dir.path().to_path_buf()]);
        ScriptCompiler::new(Arc::new(AssetResolver::new(Box::new(finder))), "/static/")
    }

    #[test]
    fn test_compile_preserves_order() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("js")).unwrap();
        fs::write(dir.path().join("js/a.js"), "var a = 1;").unwrap();
        fs::write(dir.path().join("js/b.js"), "var b = 2;").unwrap();

        let raw = concat!(
            "<script src=\"/static/js/a.js\"></script>\n",
            "<script>\n",
            "var between = 0;\n",
            "</script>\n",
            "<script src=\"/static/js/b.js\"></script>",
        );
        let compiled = compiler(&dir).compile(raw);

        assert!(compiled.missing.is_empty());
        assert_eq!(compiled.text, "var a = 1;\nvar between = 0;\nvar b = 2;\n");
    }

    #[test]
    fn test_compile_does_not_deduplicate() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.js"), "a();").unwrap();

        let raw = "<script src=\"a.js\"></script>\n<script src=\"a.js\"></script>";
        assert_eq!(compiler(&dir).compile(raw).text, "a();\na();\n");
    }

    #[test]
    fn test_missing_script_placeholder_keeps_locator() {
        let dir = TempDir::new().unwrap();
        let compiled = compiler(&dir).compile("<script src=\"/static/js/gone.js\"></script>");
        assert_eq!(compiled.text, "/* FILE NOT FOUND: /static/js/gone.js */\n");
        assert_eq!(compiled.missing, vec!["/static/js/gone.js"]);
    }

    #[test]
    fn test_remote_script_is_not_fetched() {
        let dir = TempDir::new().unwrap();
        let compiled = compiler(&dir).compile("<script src=\"https://cdn.example.com/x.js\"></script>");
        assert!(compiled.text.starts_with("/* FILE NOT FOUND: https://cdn.example.com/x.js"));
    }

    #[test]
    fn test_transform_identity_by_default() {
        let dir = TempDir::new().unwrap();
        let compiler = compiler(&dir);
        let payload = compiler.compile("var  a = 1; // note");
        assert_eq!(compiler.transform(payload).unwrap(), "var  a = 1; // note\n");
    }

    #[test]
    fn test_transform_minify_when_enabled() {
        let dir = TempDir::new().unwrap();
        let compiler = compiler(&dir).with_minify(true);
        let out = compiler
            .transform(compiler.compile("var answer = 40 + 2;"))
            .unwrap();
        assert!(!out.contains("answer = 40 + 2"));
    }

    #[test]
    fn test_minified_script_keeps_missing_locator() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.js"), "var answer = 40 + 2;").unwrap();
        let compiler = compiler(&dir).with_minify(true);

        let payload = compiler
            .compile("<script src=\"/static/a.js\"></script>\n<script src=\"/static/gone.js\"></script>");
        let out = compiler.transform(payload).unwrap();

        assert!(out.starts_with("/* FILE NOT FOUND: /static/gone.js */\n"));
        assert_eq!(out.matches("FILE NOT FOUND").count(), 1);
    }

    #[test]
    fn test_markup() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            compiler(&dir).markup("/media/cache/js/abc.js", "v1"),
            r#"<script src="/media/cache/js/abc.js?release=v1"></script>"#
        );
    }
}
