//! Embedded asset source
//!
//! Serves assets compiled into the binary, typically through `include_bytes!`
//! or a generated lookup function.

use crate::{AssetError, AssetResult, AssetSource};
use bytes::Bytes;
use std::collections::HashMap;
use std::fmt;

type LookupFn = dyn Fn(&str) -> Option<Bytes> + Send + Sync;

/// Asset source delegating to a caller-supplied `name -> bytes` function.
pub struct EmbeddedAssetSource {
	lookup: Box<LookupFn>,
}

impl EmbeddedAssetSource {
	/// Wrap a lookup function. Returning `None` means "not found".
	///
	/// # Examples
	///
	/// ```
	/// use bytes::Bytes;
	/// use pagecraft_assets::{AssetSource, EmbeddedAssetSource};
	///
	/// let source = EmbeddedAssetSource::new(|name| match name {
	///     "hello.html" => Some(Bytes::from_static(b"Hello!")),
	///     _ => None,
	/// });
	/// assert_eq!(&source.get("hello.html").unwrap()[..], b"Hello!");
	/// assert!(source.get("other.html").is_err());
	/// ```
	pub fn new<F>(lookup: F) -> Self
	where
		F: Fn(&str) -> Option<Bytes> + Send + Sync + 'static,
	{
		Self {
			lookup: Box::new(lookup),
		}
	}

	/// Build a source from a static `(name, bytes)` table.
	///
	/// When a name appears more than once, the last entry is kept.
	pub fn from_entries<I>(entries: I) -> Self
	where
		I: IntoIterator<Item = (&'static str, &'static [u8])>,
	{
		let table: HashMap<&'static str, &'static [u8]> = entries.into_iter().collect();
		Self::new(move |name| table.get(name).map(|data| Bytes::from_static(*data)))
	}
}

impl AssetSource for EmbeddedAssetSource {
	fn get(&self, name: &str) -> AssetResult<Bytes> {
		(self.lookup)(name).ok_or_else(|| AssetError::not_found(name))
	}
}

impl fmt::Debug for EmbeddedAssetSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("EmbeddedAssetSource").finish_non_exhaustive()
	}
}
