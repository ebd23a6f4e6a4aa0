//! Template error types.

use pagecraft_assets::AssetError;
use thiserror::Error;

/// Result type for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Coarse classification of a [`TemplateError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// The template source could not be located.
	Resolution,
	/// The template source is not a valid template.
	Compile,
	/// The template failed while producing output for a data value.
	Execution,
}

/// Template compilation and execution errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TemplateError {
	/// The template source could not be resolved.
	#[error(transparent)]
	Resolution(#[from] AssetError),

	/// The template source is not UTF-8 text.
	#[error("compile error in template {name}: source is not valid UTF-8")]
	InvalidUtf8 {
		/// Template name.
		name: String,
	},

	/// A custom opening delimiter has no matching closing delimiter.
	#[error("compile error in template {name}: unclosed delimiter {open:?} at byte {offset}")]
	UnclosedDelimiter {
		/// Template name.
		name: String,
		/// The opening marker that was left open.
		open: String,
		/// Byte offset of the opening marker in the source.
		offset: usize,
	},

	/// The template source failed to parse.
	#[error("compile error in template {name}: {}", error_chain(.source))]
	Compile {
		/// Template name.
		name: String,
		/// Parser failure.
		#[source]
		source: tera::Error,
	},

	/// The data value could not be turned into a template context.
	#[error("cannot use data for template {name}: {}", error_chain(.source))]
	Context {
		/// Template name.
		name: String,
		/// Conversion failure.
		#[source]
		source: tera::Error,
	},

	/// The template failed while rendering.
	#[error("execution error in template {name}: {}", error_chain(.source))]
	Execution {
		/// Template name.
		name: String,
		/// Render failure.
		#[source]
		source: tera::Error,
	},
}

impl TemplateError {
	/// Classify this error.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::Resolution(_) => ErrorKind::Resolution,
			Self::InvalidUtf8 { .. } | Self::UnclosedDelimiter { .. } | Self::Compile { .. } => {
				ErrorKind::Compile
			}
			Self::Context { .. } | Self::Execution { .. } => ErrorKind::Execution,
		}
	}
}

/// Tera nests the useful part of a failure in its source chain.
fn error_chain(error: &tera::Error) -> String {
	let mut message = error.to_string();
	let mut current = std::error::Error::source(error);
	while let Some(cause) = current {
		message.push_str(": ");
		message.push_str(&cause.to_string());
		current = cause.source();
	}
	message
}
