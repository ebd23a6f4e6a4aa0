//! # Pagecraft Assets
//!
//! Named asset lookup across an ordered list of backends.
//!
//! An [`AssetResolver`] asks each configured [`AssetSource`] in turn for a
//! logical name and returns the bytes of the first one that answers. Later
//! sources are never consulted once an earlier one succeeds, and the failures
//! of the sources that were skipped are not aggregated.
//!
//! ## Example
//!
//! ```rust
//! use pagecraft_assets::{AssetResolver, EmbeddedAssetSource};
//!
//! static TEMPLATES: &[(&str, &[u8])] = &[("index.html", b"<h1>{{ title }}</h1>")];
//!
//! let resolver = AssetResolver::new()
//!     .with_source(EmbeddedAssetSource::from_entries(TEMPLATES.iter().copied()));
//!
//! let bytes = resolver.get("index.html").unwrap();
//! assert_eq!(&bytes[..], b"<h1>{{ title }}</h1>");
//! ```

pub mod embedded;
pub mod error;
pub mod fs_source;
pub mod resolver;

pub use embedded::EmbeddedAssetSource;
pub use error::{AssetError, AssetResult};
pub use fs_source::FileSystemAssetSource;
pub use resolver::AssetResolver;

use bytes::Bytes;
use std::sync::Arc;

/// A single retrieval strategy for assets.
///
/// Implementors answer one question: the bytes stored under `name`, or a
/// failure. Sources are immutable once registered with a resolver and may be
/// queried from several threads at once.
pub trait AssetSource: Send + Sync {
	/// Look up the raw bytes stored under `name`.
	fn get(&self, name: &str) -> AssetResult<Bytes>;
}

impl<S: AssetSource + ?Sized> AssetSource for Arc<S> {
	fn get(&self, name: &str) -> AssetResult<Bytes> {
		(**self).get(name)
	}
}

impl<S: AssetSource + ?Sized> AssetSource for Box<S> {
	fn get(&self, name: &str) -> AssetResult<Bytes> {
		(**self).get(name)
	}
}
