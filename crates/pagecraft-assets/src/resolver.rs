//! Ordered multi-source asset resolution.

use crate::{AssetError, AssetResult, AssetSource};
use bytes::Bytes;
use std::fmt;

/// Resolves asset names against an ordered list of sources.
///
/// The first source that returns bytes for a name wins, even if a later
/// source would return something different. The list is fixed once the
/// resolver is built; lookups take `&self` and are safe to run concurrently.
#[derive(Default)]
pub struct AssetResolver {
	sources: Vec<Box<dyn AssetSource>>,
}

impl AssetResolver {
	/// Create a resolver without any sources.
	///
	/// Every lookup on an empty resolver fails with [`AssetError::NoSources`].
	pub fn new() -> Self {
		Self {
			sources: Vec::new(),
		}
	}

	/// Create a resolver from an already ordered list of sources.
	pub fn from_sources(sources: Vec<Box<dyn AssetSource>>) -> Self {
		Self { sources }
	}

	/// Append a source. Sources added first are consulted first.
	///
	/// # Examples
	///
	/// ```
	/// use pagecraft_assets::{AssetResolver, FileSystemAssetSource};
	///
	/// let resolver = AssetResolver::new()
	///     .with_source(FileSystemAssetSource::new("./templates"))
	///     .with_source(FileSystemAssetSource::new("./fallback"));
	/// assert_eq!(resolver.len(), 2);
	/// ```
	pub fn with_source<S>(mut self, source: S) -> Self
	where
		S: AssetSource + 'static,
	{
		self.sources.push(Box::new(source));
		self
	}

	/// Number of configured sources.
	pub fn len(&self) -> usize {
		self.sources.len()
	}

	/// Returns true when no source is configured.
	pub fn is_empty(&self) -> bool {
		self.sources.is_empty()
	}

	/// Look up `name` in every source, in order.
	///
	/// # Errors
	///
	/// - [`AssetError::NoSources`] if the resolver has no sources
	/// - [`AssetError::NotFound`] if every source failed for `name`
	pub fn get(&self, name: &str) -> AssetResult<Bytes> {
		if self.sources.is_empty() {
			return Err(AssetError::NoSources {
				name: name.to_string(),
			});
		}

		for (index, source) in self.sources.iter().enumerate() {
			match source.get(name) {
				Ok(bytes) => return Ok(bytes),
				Err(e) => {
					tracing::debug!(asset = name, source = index, error = %e, "asset source miss");
				}
			}
		}

		Err(AssetError::not_found(name))
	}
}

impl AssetSource for AssetResolver {
	fn get(&self, name: &str) -> AssetResult<Bytes> {
		AssetResolver::get(self, name)
	}
}

impl fmt::Debug for AssetResolver {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AssetResolver")
			.field("sources", &self.sources.len())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::EmbeddedAssetSource;
	use rstest::rstest;
	use std::sync::Arc;
	use std::sync::atomic::{AtomicUsize, Ordering};

	struct Fixed(&'static str, &'static [u8]);

	impl AssetSource for Fixed {
		fn get(&self, name: &str) -> AssetResult<Bytes> {
			if name == self.0 {
				Ok(Bytes::from_static(self.1))
			} else {
				Err(AssetError::not_found(name))
			}
		}
	}

	struct Counting(Arc<AtomicUsize>);

	impl AssetSource for Counting {
		fn get(&self, _name: &str) -> AssetResult<Bytes> {
			self.0.fetch_add(1, Ordering::SeqCst);
			Ok(Bytes::from_static(b"late"))
		}
	}

	#[rstest]
	#[case("a.html")]
	#[case("nested/b.html")]
	#[case("")]
	fn test_empty_resolver_reports_no_sources(#[case] name: &str) {
		let resolver = AssetResolver::new();

		let err = resolver.get(name).unwrap_err();
		assert!(matches!(err, AssetError::NoSources { .. }));
		assert_eq!(err.to_string(), format!("no sources defined searching for {}", name));
	}

	#[rstest]
	fn test_first_success_wins() {
		let calls = Arc::new(AtomicUsize::new(0));
		let resolver = AssetResolver::new()
			.with_source(Fixed("page.html", b"first"))
			.with_source(Fixed("page.html", b"second"))
			.with_source(Counting(calls.clone()));

		let bytes = resolver.get("page.html").unwrap();
		assert_eq!(&bytes[..], b"first");
		assert_eq!(calls.load(Ordering::SeqCst), 0);
	}

	#[rstest]
	fn test_falls_through_to_later_source() {
		let resolver = AssetResolver::new()
			.with_source(Fixed("other.html", b"nope"))
			.with_source(Fixed("page.html", b"second"));

		assert_eq!(&resolver.get("page.html").unwrap()[..], b"second");
	}

	#[rstest]
	fn test_all_sources_fail_names_the_asset() {
		let resolver = AssetResolver::new()
			.with_source(Fixed("a.html", b"a"))
			.with_source(EmbeddedAssetSource::new(|_| None));

		let err = resolver.get("missing.html").unwrap_err();
		assert!(matches!(err, AssetError::NotFound { ref name } if name == "missing.html"));
		assert_eq!(err.to_string(), "asset not found: missing.html");
	}

	#[rstest]
	fn test_from_sources_keeps_order() {
		let sources: Vec<Box<dyn AssetSource>> =
			vec![Box::new(Fixed("x", b"one")), Box::new(Fixed("x", b"two"))];
		let resolver = AssetResolver::from_sources(sources);

		assert_eq!(resolver.len(), 2);
		assert_eq!(&resolver.get("x").unwrap()[..], b"one");
	}
}
