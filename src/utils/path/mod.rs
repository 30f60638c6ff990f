//! Path utilities.
//!
//! Pure functions for path manipulation. No side effects.
//!
//! - [`fs`]: Filesystem path normalization (`normalize_path`, `join_within`, `expand_path`)

pub mod fs;

pub use fs::{expand_path, join_within, normalize_path};
