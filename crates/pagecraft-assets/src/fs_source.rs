//! File system asset source
//!
//! Reads assets from a root directory, refusing names that would leave it.

use crate::{AssetError, AssetResult, AssetSource};
use bytes::Bytes;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Asset source backed by a directory on disk.
///
/// The requested name is joined onto the root directory. Names with `..`
/// components are rejected, and a leading `/` is ignored, so lookups never
/// resolve outside the root.
#[derive(Debug, Clone)]
pub struct FileSystemAssetSource {
	root: PathBuf,
}

impl FileSystemAssetSource {
	/// Create a source rooted at `root`.
	///
	/// # Example
	///
	/// ```rust,no_run
	/// use pagecraft_assets::{AssetSource, FileSystemAssetSource};
	///
	/// let source = FileSystemAssetSource::new("/app/templates");
	/// let index = source.get("index.html");
	/// ```
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	/// The directory this source reads from.
	pub fn root(&self) -> &Path {
		&self.root
	}

	fn resolve_path(&self, name: &str) -> AssetResult<PathBuf> {
		let normalized = name.trim_start_matches('/');

		for component in Path::new(normalized).components() {
			match component {
				Component::ParentDir => {
					return Err(AssetError::InvalidPath {
						name: name.to_string(),
						reason: "parent directory components are not allowed",
					});
				}
				Component::RootDir | Component::Prefix(_) => {
					return Err(AssetError::InvalidPath {
						name: name.to_string(),
						reason: "absolute paths are not allowed",
					});
				}
				_ => {}
			}
		}

		Ok(self.root.join(normalized))
	}
}

impl AssetSource for FileSystemAssetSource {
	fn get(&self, name: &str) -> AssetResult<Bytes> {
		let path = self.resolve_path(name)?;

		if path.is_dir() {
			return Err(AssetError::not_found(name));
		}

		match fs::read(&path) {
			Ok(data) => Ok(Bytes::from(data)),
			Err(e) if e.kind() == io::ErrorKind::NotFound => Err(AssetError::not_found(name)),
			Err(source) => Err(AssetError::Io {
				name: name.to_string(),
				source,
			}),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use tempfile::TempDir;

	fn write_asset(dir: &Path, name: &str, content: &str) {
		let path = dir.join(name);
		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent).unwrap();
		}
		fs::write(path, content).unwrap();
	}

	#[rstest]
	fn test_reads_file_relative_to_root() {
		let temp_dir = TempDir::new().unwrap();
		write_asset(temp_dir.path(), "index.html", "Hello {{ name }}!");

		let source = FileSystemAssetSource::new(temp_dir.path());

		assert_eq!(&source.get("index.html").unwrap()[..], b"Hello {{ name }}!");
	}

	#[rstest]
	fn test_reads_from_subdirectory_and_strips_leading_slash() {
		let temp_dir = TempDir::new().unwrap();
		write_asset(temp_dir.path(), "layouts/base.html", "base");

		let source = FileSystemAssetSource::new(temp_dir.path());

		assert_eq!(&source.get("layouts/base.html").unwrap()[..], b"base");
		assert_eq!(&source.get("/layouts/base.html").unwrap()[..], b"base");
	}

	#[rstest]
	fn test_missing_file_is_not_found() {
		let temp_dir = TempDir::new().unwrap();
		let source = FileSystemAssetSource::new(temp_dir.path());

		let err = source.get("nope.html").unwrap_err();
		assert!(err.is_not_found());
	}

	#[rstest]
	fn test_directory_is_not_an_asset() {
		let temp_dir = TempDir::new().unwrap();
		fs::create_dir_all(temp_dir.path().join("partials")).unwrap();
		let source = FileSystemAssetSource::new(temp_dir.path());

		assert!(source.get("partials").unwrap_err().is_not_found());
	}

	#[rstest]
	#[case("../etc/passwd")]
	#[case("../../secret.txt")]
	#[case("./../../secrets/key.txt")]
	#[case("partials/../../escape.html")]
	fn test_directory_traversal_is_rejected(#[case] name: &str) {
		let temp_dir = TempDir::new().unwrap();
		let source = FileSystemAssetSource::new(temp_dir.path());

		let err = source.get(name).unwrap_err();
		assert!(matches!(err, AssetError::InvalidPath { .. }));
	}
}
