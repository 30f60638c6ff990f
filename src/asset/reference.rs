//! References to external assets extracted from block markup.

/// A single `src`/`href` reference found in an aggregation block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetReference {
    /// Local logical path or absolute URL, as written in the markup.
    pub locator: String,
    /// Value of the `media` attribute, if any.
    pub media: Option<String>,
}

impl AssetReference {
    pub fn new(locator: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
            media: None,
        }
    }

    pub fn with_media(mut self, media: impl Into<String>) -> Self {
        self.media = Some(media.into());
        self
    }

    /// Print stylesheets are never bundled.
    ///
    /// A media list counts as print when its first query starts with the
    /// `print` media type (`print`, `print and (color)`, `print, screen`).
    pub fn is_print(&self) -> bool {
        self.media.as_deref().is_some_and(|media| {
            media
                .split(',')
                .next()
                .and_then(|query| query.split_whitespace().next())
                .is_some_and(|media_type| media_type.eq_ignore_ascii_case("print"))
        })
    }

    /// Locator with the static URL prefix removed (`/static/css/a.css` -> `css/a.css`).
    pub fn logical_path<'a>(&'a self, static_url: &str) -> &'a str {
        if static_url.is_empty() {
            return &self.locator;
        }
        self.locator
            .strip_prefix(static_url)
            .unwrap_or(&self.locator)
    }
}

/// Check whether a locator is an absolute HTTP(S) URL.
pub fn is_remote(locator: &str) -> bool {
    let lower = locator.get(..8).unwrap_or(locator).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_print() {
        assert!(AssetReference::new("a.css").with_media("print").is_print());
        assert!(AssetReference::new("a.css").with_media(" PRINT ").is_print());
        assert!(!AssetReference::new("a.css").with_media("screen").is_print());
        assert!(!AssetReference::new("a.css").with_media("screen, print").is_print());
        assert!(!AssetReference::new("a.css").with_media("printer").is_print());
        assert!(!AssetReference::new("a.css").is_print());
    }

    #[test]
    fn test_is_print_media_queries() {
        let print = |media: &str| AssetReference::new("p.css").with_media(media).is_print();
        assert!(print("print and (color)"));
        assert!(print("print,screen"));
        assert!(print("Print and (orientation: landscape)"));
        assert!(!print(""));
    }

    #[test]
    fn test_logical_path_strips_prefix() {
        let reference = AssetReference::new("/static/css/site.css");
        assert_eq!(reference.logical_path("/static/"), "css/site.css");
        assert_eq!(reference.logical_path(""), "/static/css/site.css");
    }

    #[test]
    fn test_logical_path_only_strips_leading_prefix() {
        let reference = AssetReference::new("https://cdn.example.com/static/a.css");
        assert_eq!(
            reference.logical_path("/static/"),
            "https://cdn.example.com/static/a.css"
        );
    }

    #[test]
    fn test_is_remote() {
        assert!(is_remote("http://cdn.example.com/a.css"));
        assert!(is_remote("HTTPS://cdn.example.com/a.css"));
        assert!(!is_remote("/static/a.css"));
        assert!(!is_remote("httpdocs/a.css"));
        assert!(!is_remote("ftp://example.com/a.css"));
    }
}
