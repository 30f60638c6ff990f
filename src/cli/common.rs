//! Common utilities shared across CLI commands.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use jwalk::WalkDir;

use crate::config::BuildSectionConfig;

/// Files never treated as pages
const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// Read a file, or stdin when the path is `-`.
pub fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("failed to read stdin")?;
        return Ok(input);
    }

    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Collect all pages below `build.input`, skipping the output directory.
pub fn collect_pages(build: &BuildSectionConfig) -> Vec<PathBuf> {
    let mut pages: Vec<_> = WalkDir::new(&build.input)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .map(|e| e.path())
        .filter(|path| build.is_page(path) && !path.starts_with(&build.output))
        .collect();
    pages.sort();
    pages
}
