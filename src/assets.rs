//! Asset lookup.
//!
//! ```rust
//! use pagecraft::assets::{AssetResolver, FileSystemAssetSource};
//!
//! let resolver = AssetResolver::new().with_source(FileSystemAssetSource::new("templates"));
//! assert_eq!(resolver.len(), 1);
//! ```

pub use pagecraft_assets::*;
