//! Path normalization utilities.
//!
//! Provides consistent path handling across the codebase:
//! - `normalize_path` - file system paths (canonicalize + fallback)
//! - `expand_path` - tilde expansion, then resolve against a root
//! - `join_within` - join a logical asset path under a lookup root

use std::path::{Component, Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Return as-is if already absolute
/// - Join with current directory if relative
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Expand `~` and resolve a configured path relative to `root`.
pub fn expand_path(path: &Path, root: &Path) -> PathBuf {
    let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
    let path = PathBuf::from(expanded);
    let full_path = if path.is_relative() {
        root.join(&path)
    } else {
        path
    };
    normalize_path(&full_path)
}

/// Join a logical asset path (e.g. `css/site.css` or `/css/site.css`) under `root`.
///
/// Returns `None` when the logical path would leave `root` (`..` components,
/// drive prefixes) or is empty.
pub fn join_within(root: &Path, logical: &str) -> Option<PathBuf> {
    let mut joined = root.to_path_buf();
    let mut pushed = false;

    for component in Path::new(logical.trim_start_matches('/')).components() {
        match component {
            Component::Normal(part) => {
                joined.push(part);
                pushed = true;
            }
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    pushed.then_some(joined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_absolute() {
        let path = Path::new("/absolute/path/file.txt");
        let normalized = normalize_path(path);
        assert!(normalized.is_absolute());
    }

    #[test]
    fn test_normalize_path_relative() {
        let path = Path::new("relative/path/file.txt");
        let normalized = normalize_path(path);
        assert!(normalized.is_absolute());
    }

    #[test]
    fn test_expand_path_relative_to_root() {
        let expanded = expand_path(Path::new("media"), Path::new("/srv/site"));
        assert_eq!(expanded, PathBuf::from("/srv/site/media"));
    }

    #[test]
    fn test_expand_path_absolute_untouched() {
        let expanded = expand_path(Path::new("/var/cache/app"), Path::new("/srv/site"));
        assert_eq!(expanded, PathBuf::from("/var/cache/app"));
    }

    #[test]
    fn test_join_within() {
        let root = Path::new("/srv/static");
        assert_eq!(
            join_within(root, "css/site.css"),
            Some(PathBuf::from("/srv/static/css/site.css"))
        );
        assert_eq!(
            join_within(root, "/js/./app.js"),
            Some(PathBuf::from("/srv/static/js/app.js"))
        );
    }

    #[test]
    fn test_join_within_rejects_escape() {
        let root = Path::new("/srv/static");
        assert_eq!(join_within(root, "../secret.txt"), None);
        assert_eq!(join_within(root, "css/../../etc/passwd"), None);
        assert_eq!(join_within(root, ""), None);
        assert_eq!(join_within(root, "/"), None);
    }
}
