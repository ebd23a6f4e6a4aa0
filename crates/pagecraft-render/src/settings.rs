//! Declarative renderer configuration
//!
//! ```
//! use pagecraft_assets::AssetResolver;
//! use pagecraft_render::RenderSettings;
//!
//! let settings: RenderSettings = serde_json::from_str(r#"{
//!     "template_dir": "templates",
//!     "left_delimiter": "[[",
//!     "right_delimiter": "]]",
//!     "error_templates": { "404": "errors/404.html" }
//! }"#).unwrap();
//!
//! let renderer = settings.into_renderer(AssetResolver::new()).unwrap();
//! assert_eq!(renderer.delimiters().left(), "[[");
//! ```

use crate::{FatalStatusPolicy, Renderer};
use pagecraft_assets::AssetResolver;
use pagecraft_http::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for settings validation.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Invalid renderer settings.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsError {
	/// A configured number is not a valid HTTP status code.
	#[error("invalid status code {code} in {field}")]
	InvalidStatusCode {
		/// The rejected number.
		code: u16,
		/// The setting it appeared in.
		field: &'static str,
	},
}

/// Renderer settings, loadable from any serde format.
///
/// Every field is optional and defaults to "not configured".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
	/// Where templates live (informational).
	pub template_dir: PathBuf,

	/// Where error templates live (informational).
	pub error_template_dir: PathBuf,

	/// Custom opening delimiter; empty keeps `{{`.
	pub left_delimiter: String,

	/// Custom closing delimiter; empty keeps `}}`.
	pub right_delimiter: String,

	/// Error page template per status code.
	pub error_templates: BTreeMap<u16, String>,

	/// Status codes reported as fatal.
	pub fatal_statuses: Vec<u16>,
}

impl RenderSettings {
	/// Build a renderer over `resolver`.
	///
	/// The fatal policy gets no hook; install one afterwards with
	/// [`Renderer::set_fatal_policy`] if needed.
	///
	/// # Errors
	///
	/// Returns [`SettingsError::InvalidStatusCode`] for any number outside
	/// the valid status code range.
	pub fn into_renderer(self, resolver: AssetResolver) -> SettingsResult<Renderer> {
		let fatal_statuses = self
			.fatal_statuses
			.iter()
			.map(|&code| status_code(code, "fatal_statuses"))
			.collect::<SettingsResult<Vec<_>>>()?;

		let mut renderer = Renderer::new(resolver)
			.with_template_dir(self.template_dir)
			.with_error_template_dir(self.error_template_dir);
		renderer.set_delimiters(self.left_delimiter, self.right_delimiter);
		for (code, name) in self.error_templates {
			renderer.set_error_template(status_code(code, "error_templates")?, name);
		}
		renderer.set_fatal_policy(FatalStatusPolicy::new(fatal_statuses));

		Ok(renderer)
	}
}

fn status_code(code: u16, field: &'static str) -> SettingsResult<StatusCode> {
	StatusCode::from_u16(code).map_err(|_| SettingsError::InvalidStatusCode { code, field })
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::path::Path;

	#[rstest]
	fn test_defaults() {
		let settings: RenderSettings = serde_json::from_str("{}").unwrap();
		assert_eq!(settings, RenderSettings::default());

		let renderer = settings.into_renderer(AssetResolver::new()).unwrap();
		assert!(!renderer.delimiters().is_custom());
		assert!(!renderer.fatal_policy().is_fatal(StatusCode::INTERNAL_SERVER_ERROR));
		assert_eq!(renderer.error_template(StatusCode::NOT_FOUND), None);
	}

	#[rstest]
	fn test_full_settings() {
		let settings: RenderSettings = serde_json::from_value(serde_json::json!({
			"template_dir": "web/templates",
			"error_template_dir": "web/errors",
			"left_delimiter": "<<",
			"error_templates": {"404": "404.html", "500": "500.html"},
			"fatal_statuses": [503],
		}))
		.unwrap();

		let renderer = settings.into_renderer(AssetResolver::new()).unwrap();

		assert_eq!(renderer.template_dir(), Path::new("web/templates"));
		assert_eq!(renderer.error_template_dir(), Path::new("web/errors"));
		assert_eq!(renderer.delimiters().left(), "<<");
		assert_eq!(renderer.delimiters().right(), "}}");
		assert_eq!(renderer.error_template(StatusCode::NOT_FOUND), Some("404.html"));
		assert_eq!(
			renderer.error_template(StatusCode::INTERNAL_SERVER_ERROR),
			Some("500.html")
		);
		assert!(renderer.fatal_policy().is_fatal(StatusCode::SERVICE_UNAVAILABLE));
	}

	#[rstest]
	#[case(r#"{"fatal_statuses": [42]}"#, 42, "fatal_statuses")]
	#[case(r#"{"error_templates": {"1000": "x.html"}}"#, 1000, "error_templates")]
	fn test_invalid_status_code(#[case] json: &str, #[case] bad: u16, #[case] setting: &str) {
		let settings: RenderSettings = serde_json::from_str(json).unwrap();

		match settings.into_renderer(AssetResolver::new()).unwrap_err() {
			SettingsError::InvalidStatusCode { code, field } => {
				assert_eq!(code, bad);
				assert_eq!(field, setting);
			}
		}
	}
}
