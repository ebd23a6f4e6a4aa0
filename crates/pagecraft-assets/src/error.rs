//! Asset lookup error types.

use thiserror::Error;

/// Result type for asset lookups.
pub type AssetResult<T> = Result<T, AssetError>;

/// Asset lookup errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AssetError {
	/// The resolver was asked for an asset without any configured source.
	#[error("no sources defined searching for {name}")]
	NoSources {
		/// Requested asset name.
		name: String,
	},

	/// No source could provide the asset.
	#[error("asset not found: {name}")]
	NotFound {
		/// Requested asset name.
		name: String,
	},

	/// The asset name would escape the backend root.
	#[error("invalid asset path {name}: {reason}")]
	InvalidPath {
		/// Requested asset name.
		name: String,
		/// Why the name was rejected.
		reason: &'static str,
	},

	/// The backend failed while reading the asset.
	#[error("failed to read asset {name}: {source}")]
	Io {
		/// Requested asset name.
		name: String,
		/// Underlying I/O failure.
		#[source]
		source: std::io::Error,
	},
}

impl AssetError {
	/// Shortcut for a backend that simply does not hold `name`.
	pub fn not_found(name: impl Into<String>) -> Self {
		Self::NotFound { name: name.into() }
	}

	/// Returns true for the "not found" class of failures.
	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::NotFound { .. } | Self::NoSources { .. })
	}
}
