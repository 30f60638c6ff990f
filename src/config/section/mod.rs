//! Configuration section definitions.
//!
//! Each module corresponds to a section in `aggregate.toml`:
//!
//! | Module      | TOML Section   | Purpose                                   |
//! |-------------|----------------|-------------------------------------------|
//! | `aggregate` | `[aggregate]`  | Enable switch, debug mode, release id     |
//! | `storage`   | `[storage]`    | Cache storage root and its public URL     |
//! | `statics`   | `[static]`     | Static URL prefix and lookup directories  |
//! | `fetch`     | `[fetch]`      | Remote stylesheet fetching                |
//! | `build`     | `[build]`      | Page input/output for the build command   |

mod aggregate;
mod build;
mod fetch;
mod statics;
mod storage;

pub use aggregate::AggregateSectionConfig;
pub use build::BuildSectionConfig;
pub use fetch::FetchConfig;
pub use statics::StaticConfig;
pub use storage::StorageConfig;
