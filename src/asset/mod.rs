//! Asset resolution, remote rewriting and payload transforms.

mod finder;
mod kind;
pub mod minify;
mod reference;
pub mod remote;
mod resolve;
mod transform;

// Types
pub use kind::AssetKind;
pub use reference::{AssetReference, is_remote};

// Lookup
pub use finder::{DirFinder, FinderChain, StaticFinder};
pub use remote::{Fetch, FetchError, HttpFetcher, RemoteRewriter, rewrite_urls};
pub use resolve::{AssetResolver, Resolution, placeholder};

// Transforms
pub use minify::MinifyError;
pub use transform::Transform;
