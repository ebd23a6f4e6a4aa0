//! Error responses
//!
//! [`Renderer::serve_error`] is the single place where failures become
//! client-visible responses.

use crate::Renderer;
use pagecraft_http::{Request, Response, StatusCode, status_text};
use pagecraft_templates::{HelperFunctions, TemplateResult};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

type FatalHook = dyn Fn(StatusCode, Option<&(dyn Error + 'static)>) + Send + Sync;

/// Which served statuses count as fatal, and what to do about them.
///
/// The default policy treats nothing as fatal. A fatal status is logged at
/// error level and handed to the hook after the response has been built;
/// what happens next (alerting, a graceful shutdown) is up to the hook.
#[derive(Clone, Default)]
pub struct FatalStatusPolicy {
	statuses: HashSet<StatusCode>,
	hook: Option<Arc<FatalHook>>,
}

impl FatalStatusPolicy {
	/// A policy under which no status is fatal.
	pub fn never() -> Self {
		Self::default()
	}

	/// Treat the given statuses as fatal.
	pub fn new(statuses: impl IntoIterator<Item = StatusCode>) -> Self {
		Self {
			statuses: statuses.into_iter().collect(),
			hook: None,
		}
	}

	/// Call `hook` whenever a fatal status is served.
	pub fn with_hook<F>(mut self, hook: F) -> Self
	where
		F: Fn(StatusCode, Option<&(dyn Error + 'static)>) + Send + Sync + 'static,
	{
		self.hook = Some(Arc::new(hook));
		self
	}

	/// Returns true if serving `status` is fatal.
	pub fn is_fatal(&self, status: StatusCode) -> bool {
		self.statuses.contains(&status)
	}

	pub(crate) fn trigger(&self, status: StatusCode, error: Option<&(dyn Error + 'static)>) {
		if !self.is_fatal(status) {
			return;
		}
		match error {
			Some(e) => tracing::error!(status = status.as_u16(), error = %e, "fatal status served"),
			None => tracing::error!(status = status.as_u16(), "fatal status served"),
		}
		if let Some(hook) = &self.hook {
			hook(status, error);
		}
	}
}

impl fmt::Debug for FatalStatusPolicy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FatalStatusPolicy")
			.field("statuses", &self.statuses)
			.field("hook", &self.hook.is_some())
			.finish()
	}
}

impl Renderer {
	/// Build the response for a failed request.
	///
	/// The error logger (if any) sees the response first and may add headers.
	/// The body is then either the error page configured for `status`,
	/// rendered with `page_data`, or the status text as plain text. This
	/// never panics and never fails; the returned response is final.
	///
	/// # Examples
	///
	/// ```
	/// use bytes::Bytes;
	/// use pagecraft_assets::AssetResolver;
	/// use pagecraft_http::{HeaderMap, Method, Request, StatusCode, Uri, Version};
	/// use pagecraft_render::Renderer;
	///
	/// let renderer = Renderer::new(AssetResolver::new());
	/// let request = Request::new(
	///     Method::GET,
	///     Uri::from_static("/missing"),
	///     Version::HTTP_11,
	///     HeaderMap::new(),
	///     Bytes::new(),
	/// );
	///
	/// let response = renderer.serve_error(&request, StatusCode::NOT_FOUND, None, None);
	/// assert_eq!(response.status, StatusCode::NOT_FOUND);
	/// assert_eq!(&response.body[..], b"Not Found\n");
	/// ```
	pub fn serve_error(
		&self,
		request: &Request,
		status: StatusCode,
		error: Option<&(dyn Error + 'static)>,
		page_data: Option<&Value>,
	) -> Response {
		match error {
			Some(e) => tracing::warn!(
				status = status.as_u16(),
				path = request.path(),
				error = %e,
				"serving error response"
			),
			None => tracing::warn!(
				status = status.as_u16(),
				path = request.path(),
				"serving error response"
			),
		}

		let mut response = Response::new(status);
		if let Err(e) = self.log_error(&mut response, request, status, error) {
			tracing::debug!(error = %e, "error logger failed");
		}

		let response = self.finish_error_response(response, status, error, page_data);
		self.fatal_policy().trigger(status, error);
		response
	}

	fn finish_error_response(
		&self,
		response: Response,
		status: StatusCode,
		error: Option<&(dyn Error + 'static)>,
		page_data: Option<&Value>,
	) -> Response {
		let message = status_text(status);
		let Some(name) = self.error_template(status) else {
			return response.with_plain_error(message);
		};

		match self.render_error_page(name, status, error, page_data) {
			Ok(html) => response.html(html),
			Err(e) => {
				tracing::warn!(
					status = status.as_u16(),
					template = name,
					error = %e,
					"error page failed to render, serving plain text"
				);
				response.with_plain_error(message)
			}
		}
	}

	fn render_error_page(
		&self,
		name: &str,
		status: StatusCode,
		error: Option<&(dyn Error + 'static)>,
		page_data: Option<&Value>,
	) -> TemplateResult<String> {
		let template = self.compiler().compile(name, HelperFunctions::new())?;

		// Only object fields can become template variables.
		let mut context = match page_data {
			Some(Value::Object(fields)) => fields.clone(),
			_ => Map::new(),
		};
		context.insert("status_code".to_string(), Value::from(status.as_u16()));
		context.insert("status_text".to_string(), Value::from(status_text(status)));
		context.insert(
			"error".to_string(),
			error.map_or(Value::Null, |e| Value::from(e.to_string())),
		);

		template.execute(&Value::Object(context))
	}
}
