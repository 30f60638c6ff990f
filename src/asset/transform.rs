//! Payload transforms applied after compilation, before caching.

use super::minify::{MinifyError, minify_css, minify_js};

/// Content transform for a compiled payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Pass-through.
    Identity,
    /// Whitespace/comment-stripping CSS minifier.
    MinifyStyle,
    /// oxc JavaScript minifier (opt-in via `build.minify_js`).
    MinifyScript,
}

impl Transform {
    pub fn apply(self, text: String) -> Result<String, MinifyError> {
        match self {
            Self::Identity => Ok(text),
            Self::MinifyStyle => minify_css(&text),
            Self::MinifyScript => minify_js(&text),
        }
    }
}
