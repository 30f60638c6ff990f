//! On-disk artifact store.
//!
//! ```text
//! <storage.root>/cache/js/<key>.js    ← served as <storage.url>/cache/js/<key>.js
//! <storage.root>/cache/css/<key>.css
//! ```
//!
//! Entries are created on first miss and never rewritten. Concurrent misses
//! on the same key may both compile and both write; each write lands through
//! a rename, so readers only ever see complete files.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use super::key::CacheKey;
use crate::asset::{AssetKind, MinifyError};
use crate::debug;

/// Cache subdirectory under the storage root.
pub const CACHE_DIR: &str = "cache";

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("failed to write cache entry `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Compile(#[from] MinifyError),
}

impl CacheError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A cache entry after lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cached {
    pub key: CacheKey,
    pub path: PathBuf,
    /// Public URL of the artifact.
    pub url: String,
    /// `true` if this call compiled and wrote the entry.
    pub written: bool,
}

/// Content-addressed artifact store under `<root>/cache/`.
#[derive(Debug, Clone)]
pub struct CacheStore {
    root: PathBuf,
    public_url: String,
}

impl CacheStore {
    pub fn new(root: impl Into<PathBuf>, public_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_url: public_url.into(),
        }
    }

    /// Storage path for `key`.
    pub fn path_for(&self, kind: AssetKind, key: &CacheKey) -> PathBuf {
        self.root
            .join(CACHE_DIR)
            .join(kind.ext())
            .join(format!("{}.{}", key, kind.ext()))
    }

    /// Public URL for `key`: the storage path with the root swapped for the URL prefix.
    pub fn url_for(&self, kind: AssetKind, key: &CacheKey) -> String {
        format!(
            "{}/{}/{}/{}.{}",
            self.public_url.trim_end_matches('/'),
            CACHE_DIR,
            kind.ext(),
            key,
            kind.ext()
        )
    }

    /// Return the entry for `(release, raw)`, running `compile` only on a miss.
    ///
    /// A `compile` error leaves the store untouched.
    pub fn get_or_create<F>(
        &self,
        kind: AssetKind,
        release: &str,
        raw: &str,
        compile: F,
    ) -> Result<Cached, CacheError>
    where
        F: FnOnce() -> Result<String, MinifyError>,
    {
        let key = CacheKey::new(release, raw);
        let path = self.path_for(kind, &key);
        let url = self.url_for(kind, &key);

        if path.is_file() {
            debug!("cache"; "hit {}", path.display());
            return Ok(Cached {
                key,
                path,
                url,
                written: false,
            });
        }

        let text = compile()?;
        write_atomic(&path, text.as_bytes())?;
        debug!("cache"; "wrote {} ({} bytes)", path.display(), text.len());

        Ok(Cached {
            key,
            path,
            url,
            written: true,
        })
    }
}

/// Write through a sibling temp file and rename into place.
fn write_atomic(path: &Path, content: &[u8]) -> Result<(), CacheError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    // create_dir_all already treats a concurrently created directory as success
    fs::create_dir_all(dir).map_err(|err| CacheError::io(dir, err))?;

    let mut file = NamedTempFile::new_in(dir).map_err(|err| CacheError::io(dir, err))?;
    file.write_all(content)
        .map_err(|err| CacheError::io(path, err))?;
    file.persist(path)
        .map_err(|err| CacheError::io(path, err.error))?;
    Ok(())
}
