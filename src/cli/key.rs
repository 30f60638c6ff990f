//! `key` command: show where a raw block would be cached.

use std::path::Path;

use anyhow::Result;

use super::common::read_input;
use crate::asset::AssetKind;
use crate::cache::{CacheKey, CacheStore};
use crate::config::AggregateConfig;

/// Cache key, storage path and public URL for `raw`.
pub fn describe(config: &AggregateConfig, kind: AssetKind, raw: &str) -> (CacheKey, String, String) {
    let store = CacheStore::new(&config.storage.root, config.storage.url.as_str());
    let key = CacheKey::new(&config.aggregate.release, raw);
    let path = store.path_for(kind, &key).display().to_string();
    let url = store.url_for(kind, &key);
    (key, path, url)
}

pub fn print_key(config: &AggregateConfig, kind: AssetKind, path: &Path) -> Result<()> {
    let raw = read_input(path)?;
    let (key, path, url) = describe(config, kind, &raw);
    println!("{key}");
    println!("{path}");
    println!("{url}");
    Ok(())
}
