//! Command-line interface module.

mod args;
pub mod build;
mod common;
pub mod key;
pub mod render;

pub use args::{AggregateArgs, Cli, Commands};
