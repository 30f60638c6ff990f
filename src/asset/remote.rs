//! Remote stylesheet fetching and `url(...)` rewriting.
//!
//! A stylesheet downloaded from a CDN refers to its images and fonts
//! relative to its own location. Once inlined into a bundle served from a
//! different origin those references break, so every `url(...)` is made
//! absolute against the fetch URL before the text is handed back.

use std::io::Read;
use std::sync::LazyLock;
use std::time::Duration;

use regex::{Captures, Regex};
use thiserror::Error;
use url::Url;

/// Upper bound for a fetched body.
const MAX_BODY_BYTES: u64 = 16 * 1024 * 1024;

/// Errors from fetching a remote asset.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL `{0}`")]
    InvalidUrl(String, #[source] url::ParseError),

    #[error("`{url}` responded with status {status}")]
    Status { url: String, status: u16 },

    #[error("request to `{url}` failed: {message}")]
    Transport { url: String, message: String },

    #[error("failed to read body of `{0}`")]
    Body(String, #[source] std::io::Error),

    #[error("`{0}` is not valid UTF-8")]
    Decode(String, #[source] std::string::FromUtf8Error),
}

/// Resolves a URL to its body.
pub trait Fetch: Send + Sync {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Blocking HTTP client.
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout_read(timeout)
            .build();
        Self { agent }
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = match self.agent.get(url).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(status, _)) => {
                return Err(FetchError::Status {
                    url: url.to_string(),
                    status,
                });
            }
            Err(ureq::Error::Transport(err)) => {
                return Err(FetchError::Transport {
                    url: url.to_string(),
                    message: err.to_string(),
                });
            }
        };

        let mut body = Vec::new();
        response
            .into_reader()
            .take(MAX_BODY_BYTES)
            .read_to_end(&mut body)
            .map_err(|err| FetchError::Body(url.to_string(), err))?;
        Ok(body)
    }
}

/// Fetches remote stylesheets and makes their references absolute.
pub struct RemoteRewriter {
    fetcher: Box<dyn Fetch>,
}

impl RemoteRewriter {
    pub fn new(fetcher: Box<dyn Fetch>) -> Self {
        Self { fetcher }
    }

    /// Fetch `url`, decode it as UTF-8 and rewrite its `url(...)` references.
    pub fn fetch_and_rewrite(&self, url: &str) -> Result<String, FetchError> {
        let base = Url::parse(url).map_err(|err| FetchError::InvalidUrl(url.to_string(), err))?;
        let body = self.fetcher.fetch(url)?;
        let css = String::from_utf8(body).map_err(|err| FetchError::Decode(url.to_string(), err))?;
        Ok(rewrite_urls(&css, &base))
    }
}

/// Rewrite every `url(...)` in `css` to an absolute URL resolved against `base`.
///
/// Quotes are optional; the result always uses single quotes. `data:` URIs
/// and fragment-only references are left untouched.
pub fn rewrite_urls(css: &str, base: &Url) -> String {
    static RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r#"url\(\s*["']?([^"')]*?)["']?\s*\)"#).unwrap());

    RE.replace_all(css, |caps: &Captures| match absolutize(base, &caps[1]) {
        Some(absolute) => format!("url('{absolute}')"),
        None => caps[0].to_string(),
    })
    .into_owned()
}

/// Resolve a stylesheet reference against the stylesheet's own URL.
fn absolutize(base: &Url, target: &str) -> Option<String> {
    let target = target.trim();
    let is_data = target
        .get(..5)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:"));
    if target.is_empty() || target.starts_with('#') || is_data {
        return None;
    }
    base.join(target).ok().map(String::from)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::HashMap;

    /// In-memory fetcher recording every request.
    #[derive(Default)]
    pub struct MockFetcher {
        pub bodies: HashMap<String, Vec<u8>>,
        pub requests: Mutex<Vec<String>>,
    }

    impl MockFetcher {
        pub fn with(url: &str, body: &str) -> Self {
            let mut fetcher = Self::default();
            fetcher.bodies.insert(url.to_string(), body.as_bytes().to_vec());
            fetcher
        }
    }

    impl Fetch for MockFetcher {
        fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            self.requests.lock().push(url.to_string());
            self.bodies
                .get(url)
                .cloned()
                .ok_or_else(|| FetchError::Status {
                    url: url.to_string(),
                    status: 404,
                })
        }
    }

    fn base() -> Url {
        Url::parse("http://cdn.example.com/css/base.css").unwrap()
    }

    #[test]
    fn test_rewrite_relative_reference() {
        let out = rewrite_urls("a{background:url(foo.png)}", &base());
        assert_eq!(out, "a{background:url('http://cdn.example.com/css/foo.png')}");
    }

    #[test]
    fn test_rewrite_quoted_references() {
        let css = r#"a{b:url("img/x.png")} c{d:url('../fonts/f.woff')}"#;
        let out = rewrite_urls(css, &base());
        assert_eq!(
            out,
            "a{b:url('http://cdn.example.com/css/img/x.png')} c{d:url('http://cdn.example.com/fonts/f.woff')}"
        );
    }

    #[test]
    fn test_rewrite_normalizes_dot_segments() {
        let out = rewrite_urls("a{b:url( ./img/../x.png )}", &base());
        assert_eq!(out, "a{b:url('http://cdn.example.com/css/x.png')}");
    }

    #[test]
    fn test_rewrite_root_relative_and_absolute() {
        let out = rewrite_urls("a{b:url(/img/x.png)}", &base());
        assert_eq!(out, "a{b:url('http://cdn.example.com/img/x.png')}");

        let out = rewrite_urls("a{b:url(https://other.example.com/y.png)}", &base());
        assert_eq!(out, "a{b:url('https://other.example.com/y.png')}");
    }

    #[test]
    fn test_rewrite_keeps_port() {
        let base = Url::parse("http://localhost:8080/static/site.css").unwrap();
        let out = rewrite_urls("a{b:url(bg.png)}", &base);
        assert_eq!(out, "a{b:url('http://localhost:8080/static/bg.png')}");
    }

    #[test]
    fn test_rewrite_skips_data_uris() {
        let css = "a{b:url(data:image/png;base64,AAAA)}";
        assert_eq!(rewrite_urls(css, &base()), css);
    }

    #[test]
    fn test_fetch_and_rewrite() {
        let fetcher = MockFetcher::with(
            "http://cdn.example.com/css/base.css",
            "body{background:url(foo.png)}",
        );
        let rewriter = RemoteRewriter::new(Box::new(fetcher));
        let css = rewriter
            .fetch_and_rewrite("http://cdn.example.com/css/base.css")
            .unwrap();
        assert_eq!(css, "body{background:url('http://cdn.example.com/css/foo.png')}");
    }

    #[test]
    fn test_fetch_and_rewrite_propagates_failures() {
        let rewriter = RemoteRewriter::new(Box::new(MockFetcher::default()));
        let err = rewriter
            .fetch_and_rewrite("http://cdn.example.com/missing.css")
            .unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));

        let err = rewriter.fetch_and_rewrite("not a url").unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(..)));
    }

    #[test]
    fn test_fetch_and_rewrite_rejects_invalid_utf8() {
        let mut fetcher = MockFetcher::default();
        fetcher
            .bodies
            .insert("http://cdn.example.com/a.css".into(), vec![0xff, 0xfe, 0x00]);
        let rewriter = RemoteRewriter::new(Box::new(fetcher));
        let err = rewriter
            .fetch_and_rewrite("http://cdn.example.com/a.css")
            .unwrap_err();
        assert!(matches!(err, FetchError::Decode(..)));
    }
}
