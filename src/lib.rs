//! # Pagecraft
//!
//! Server-side page rendering: look a template up across ordered asset
//! backends, compile it with a fixed helper set, execute it against page data
//! and return an HTML response. Failures become plain-text (or templated)
//! error responses and are handed to a pluggable error logger.
//!
//! ## Feature Flags
//!
//! - `assets` - asset resolver and backends (always on)
//! - `templates` - template compiler, delimiters, helpers
//! - `render` - renderer, error responder, monitoring, settings
//! - `full` (default) - everything
//!
//! ## Quick Example
//!
//! ```rust
//! use pagecraft::prelude::*;
//! use serde_json::json;
//!
//! static PAGES: &[(&str, &[u8])] = &[("index.html", b"<h1>{{ title }}</h1>")];
//!
//! let renderer = Renderer::new(
//!     AssetResolver::new().with_source(EmbeddedAssetSource::from_entries(PAGES.iter().copied())),
//! );
//! let request = Request::new(
//!     Method::GET,
//!     Uri::from_static("/"),
//!     Version::HTTP_11,
//!     HeaderMap::new(),
//!     Default::default(),
//! );
//!
//! let response = renderer.serve_page(&request, "index.html", &json!({"title": "Welcome"}));
//! assert_eq!(response.status, StatusCode::OK);
//! assert_eq!(response.content_type(), Some("text/html; charset=utf-8"));
//! ```

pub mod assets;
pub mod http;
#[cfg(feature = "render")]
pub mod render;
#[cfg(feature = "templates")]
pub mod templates;

pub use pagecraft_assets::{AssetError, AssetResolver, AssetSource, EmbeddedAssetSource, FileSystemAssetSource};
pub use pagecraft_http::{Request, Response, StatusCode};

#[cfg(feature = "templates")]
pub use pagecraft_templates::{CompiledTemplate, Delimiters, HelperFunctions, TemplateCompiler, TemplateError};

#[cfg(feature = "render")]
pub use pagecraft_render::{
	ErrorLogger, FatalStatusPolicy, MonitoringClient, MonitoringReporter, RenderSettings, Renderer,
	TracingMonitoringClient,
};

/// Commonly used types.
pub mod prelude {
	pub use crate::{AssetResolver, AssetSource, EmbeddedAssetSource, FileSystemAssetSource, Request, Response};
	pub use pagecraft_http::{HeaderMap, Method, StatusCode, Uri, Version};

	#[cfg(feature = "templates")]
	pub use crate::{Delimiters, HelperFunctions};

	#[cfg(feature = "render")]
	pub use crate::{
		ErrorLogger, FatalStatusPolicy, MonitoringReporter, RenderSettings, Renderer,
		TracingMonitoringClient,
	};
}
