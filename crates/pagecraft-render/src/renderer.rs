use crate::{ErrorLogger, FatalStatusPolicy, MonitoringResult};
use bytes::Bytes;
use pagecraft_assets::{AssetResolver, AssetResult};
use pagecraft_http::{Request, Response, StatusCode};
use pagecraft_templates::{CompiledTemplate, Delimiters, HelperFunctions, TemplateCompiler, TemplateResult};
use serde::Serialize;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Renders named templates into HTML responses.
///
/// A renderer is configured once, then shared by every request handler.
/// All serving methods take `&self` and keep their state on the stack, so
/// concurrent calls never observe each other. Setters take `&mut self` and
/// belong to startup.
pub struct Renderer {
	template_dir: PathBuf,
	error_template_dir: PathBuf,
	compiler: TemplateCompiler,
	error_logger: Option<Arc<dyn ErrorLogger>>,
	error_templates: HashMap<StatusCode, String>,
	fatal_policy: FatalStatusPolicy,
}

impl Renderer {
	/// Create a renderer reading templates through `resolver`.
	pub fn new(resolver: AssetResolver) -> Self {
		Self {
			template_dir: PathBuf::new(),
			error_template_dir: PathBuf::new(),
			compiler: TemplateCompiler::new(Arc::new(resolver)),
			error_logger: None,
			error_templates: HashMap::new(),
			fatal_policy: FatalStatusPolicy::default(),
		}
	}

	/// Record where templates live.
	///
	/// Informational only: lookups always go through the resolver.
	pub fn with_template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
		self.template_dir = dir.into();
		self
	}

	/// Record where error templates live. Informational only.
	pub fn with_error_template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
		self.error_template_dir = dir.into();
		self
	}

	pub fn template_dir(&self) -> &Path {
		&self.template_dir
	}

	pub fn error_template_dir(&self) -> &Path {
		&self.error_template_dir
	}

	/// Override the expression delimiters. An empty string keeps the default
	/// for that side.
	pub fn set_delimiters(&mut self, left: impl Into<String>, right: impl Into<String>) {
		self.compiler.set_delimiters(Delimiters::new(left, right));
	}

	pub fn delimiters(&self) -> &Delimiters {
		self.compiler.delimiters()
	}

	/// Install a closure as the error log callback, replacing any previous one.
	///
	/// # Examples
	///
	/// ```
	/// use pagecraft_assets::AssetResolver;
	/// use pagecraft_render::Renderer;
	///
	/// let mut renderer = Renderer::new(AssetResolver::new());
	/// renderer.set_error_log_callback(|_response, request, status, error| {
	///     eprintln!("{} {} failed with {}: {:?}", request.method, request.uri, status, error);
	///     Ok(())
	/// });
	/// ```
	pub fn set_error_log_callback<F>(&mut self, callback: F)
	where
		F: Fn(
				&mut Response,
				&Request,
				StatusCode,
				Option<&(dyn Error + 'static)>,
			) -> MonitoringResult<()>
			+ Send
			+ Sync
			+ 'static,
	{
		self.error_logger = Some(Arc::new(callback));
	}

	/// Install an [`ErrorLogger`], replacing any previous one.
	pub fn set_error_logger(&mut self, logger: impl ErrorLogger + 'static) {
		self.error_logger = Some(Arc::new(logger));
	}

	/// Remove the error logger.
	pub fn clear_error_logger(&mut self) {
		self.error_logger = None;
	}

	/// Run the error logger, if one is installed.
	pub fn log_error(
		&self,
		response: &mut Response,
		request: &Request,
		status: StatusCode,
		error: Option<&(dyn Error + 'static)>,
	) -> MonitoringResult<()> {
		match &self.error_logger {
			Some(logger) => logger.log(response, request, status, error),
			None => Ok(()),
		}
	}

	/// Serve the template `name` instead of plain text for `status`.
	pub fn set_error_template(&mut self, status: StatusCode, name: impl Into<String>) {
		self.error_templates.insert(status, name.into());
	}

	/// The error template configured for `status`.
	pub fn error_template(&self, status: StatusCode) -> Option<&str> {
		self.error_templates.get(&status).map(String::as_str)
	}

	pub fn set_fatal_policy(&mut self, policy: FatalStatusPolicy) {
		self.fatal_policy = policy;
	}

	pub fn fatal_policy(&self) -> &FatalStatusPolicy {
		&self.fatal_policy
	}

	pub(crate) fn compiler(&self) -> &TemplateCompiler {
		&self.compiler
	}

	/// Raw bytes of the template `name`.
	pub fn template_data(&self, name: &str) -> AssetResult<Bytes> {
		self.compiler.resolver().get(name)
	}

	/// Raw bytes of the layout `name`.
	pub fn layout_data(&self, name: &str) -> AssetResult<Bytes> {
		self.compiler.resolver().get(name)
	}

	/// Compile `name` with the fixed helpers plus `helpers`.
	pub fn template(&self, name: &str, helpers: HelperFunctions) -> TemplateResult<CompiledTemplate> {
		self.compiler.compile(name, helpers)
	}

	/// Render `name` with `data` into an HTML response.
	///
	/// Any failure is turned into a 500 through [`Renderer::serve_error`].
	///
	/// # Examples
	///
	/// ```
	/// use bytes::Bytes;
	/// use pagecraft_assets::{AssetResolver, EmbeddedAssetSource};
	/// use pagecraft_http::{HeaderMap, Method, Request, StatusCode, Uri, Version};
	/// use pagecraft_render::Renderer;
	/// use serde_json::json;
	///
	/// static PAGES: &[(&str, &[u8])] = &[("hello.html", b"<p>Hello {{ name }}</p>")];
	///
	/// let renderer = Renderer::new(
	///     AssetResolver::new().with_source(EmbeddedAssetSource::from_entries(PAGES.iter().copied())),
	/// );
	/// let request = Request::new(
	///     Method::GET,
	///     Uri::from_static("/"),
	///     Version::HTTP_11,
	///     HeaderMap::new(),
	///     Bytes::new(),
	/// );
	///
	/// let response = renderer.serve_page(&request, "hello.html", &json!({"name": "<you>"}));
	/// assert_eq!(response.status, StatusCode::OK);
	/// assert_eq!(&response.body[..], b"<p>Hello &lt;you&gt;</p>");
	/// ```
	pub fn serve_page<T: Serialize + ?Sized>(&self, request: &Request, name: &str, data: &T) -> Response {
		self.serve_page_with_funcs(request, name, data, HelperFunctions::new())
	}

	/// Like [`Renderer::serve_page`], with extra helper functions for this
	/// render only.
	pub fn serve_page_with_funcs<T: Serialize + ?Sized>(
		&self,
		request: &Request,
		name: &str,
		data: &T,
		helpers: HelperFunctions,
	) -> Response {
		let template = match self.compiler.compile(name, helpers) {
			Ok(template) => template,
			Err(e) => return self.serve_error(request, StatusCode::INTERNAL_SERVER_ERROR, Some(&e), None),
		};

		match template.execute(data) {
			Ok(body) => {
				tracing::debug!(template = name, bytes = body.len(), "rendered page");
				Response::ok().html(body)
			}
			Err(e) => self.serve_error(request, StatusCode::INTERNAL_SERVER_ERROR, Some(&e), None),
		}
	}
}

impl fmt::Debug for Renderer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Renderer")
			.field("template_dir", &self.template_dir)
			.field("error_template_dir", &self.error_template_dir)
			.field("compiler", &self.compiler)
			.field("error_logger", &self.error_logger.is_some())
			.field("error_templates", &self.error_templates)
			.field("fatal_policy", &self.fatal_policy)
			.finish()
	}
}
