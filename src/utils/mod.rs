//! Shared helpers with no domain knowledge.
//!
//! - [`path`]: filesystem path normalization and rooted joins
//! - [`plural`]: count formatting for log lines

pub mod path;
mod plural;

pub use plural::plural_count;
