//! # Pagecraft Render
//!
//! Turns named templates and data into HTTP responses.
//!
//! ```text
//! serve_page ─► resolve ─► compile ─► execute (buffered) ─► 200 text/html
//!                  │           │             │
//!                  └───────────┴─────────────┴──► serve_error ─► logger ─► 500
//! ```
//!
//! Every failure converges on [`Renderer::serve_error`], which hands the
//! failure to the configured [`ErrorLogger`] and always produces a complete
//! response. Nothing in this crate panics on a request path.
//!
//! ## Example
//!
//! ```rust
//! use bytes::Bytes;
//! use pagecraft_assets::{AssetResolver, EmbeddedAssetSource};
//! use pagecraft_http::{HeaderMap, Method, Request, StatusCode, Uri, Version};
//! use pagecraft_render::{MonitoringReporter, Renderer, TracingMonitoringClient};
//! use serde_json::json;
//!
//! static PAGES: &[(&str, &[u8])] = &[("index.html", b"<h1>{{ title }}</h1>")];
//!
//! let mut renderer = Renderer::new(
//!     AssetResolver::new().with_source(EmbeddedAssetSource::from_entries(PAGES.iter().copied())),
//! );
//! renderer.set_error_logger(MonitoringReporter::new(TracingMonitoringClient));
//!
//! let request = Request::new(
//!     Method::GET,
//!     Uri::from_static("/"),
//!     Version::HTTP_11,
//!     HeaderMap::new(),
//!     Bytes::new(),
//! );
//!
//! let ok = renderer.serve_page(&request, "index.html", &json!({"title": "Home"}));
//! assert_eq!(ok.status, StatusCode::OK);
//!
//! let missing = renderer.serve_page(&request, "gone.html", &json!({}));
//! assert_eq!(missing.status, StatusCode::INTERNAL_SERVER_ERROR);
//! ```

mod monitoring;
mod renderer;
mod responder;
mod settings;

pub use monitoring::{
	DEFAULT_SUPPRESSED_STATUSES, ErrorLogger, ErrorReport, HttpStatusError, MonitoringClient,
	MonitoringError, MonitoringReporter, MonitoringResult, TracingMonitoringClient,
};
pub use renderer::Renderer;
pub use responder::FatalStatusPolicy;
pub use settings::{RenderSettings, SettingsError, SettingsResult};
