//! Static file lookup.
//!
//! Logical asset paths are resolved in two phases: the configured static
//! directories first, then each application's bundled `static/` directory.

use std::path::PathBuf;

use crate::config::StaticConfig;
use crate::utils::path::join_within;

/// Maps a logical asset path to a file on disk.
pub trait StaticFinder: Send + Sync {
    fn find(&self, logical: &str) -> Option<PathBuf>;
}

/// Searches a list of root directories in order.
#[derive(Debug, Clone, Default)]
pub struct DirFinder {
    roots: Vec<PathBuf>,
}

impl DirFinder {
    pub fn new(roots: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            roots: roots.into_iter().collect(),
        }
    }
}

impl StaticFinder for DirFinder {
    fn find(&self, logical: &str) -> Option<PathBuf> {
        self.roots
            .iter()
            .filter_map(|root| join_within(root, logical))
            .find(|candidate| candidate.is_file())
    }
}

/// Tries each finder in order, first hit wins.
pub struct FinderChain {
    phases: Vec<Box<dyn StaticFinder>>,
}

impl FinderChain {
    pub fn new(phases: Vec<Box<dyn StaticFinder>>) -> Self {
        Self { phases }
    }

    /// Directory phase, then app phase.
    pub fn from_config(statics: &StaticConfig) -> Self {
        Self::new(vec![
            Box::new(DirFinder::new(statics.dirs.iter().cloned())),
            Box::new(DirFinder::new(statics.app_static_dirs())),
        ])
    }
}

impl StaticFinder for FinderChain {
    fn find(&self, logical: &str) -> Option<PathBuf> {
        self.phases.iter().find_map(|phase| phase.find(logical))
    }
}
