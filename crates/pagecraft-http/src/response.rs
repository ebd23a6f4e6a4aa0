use bytes::Bytes;
use hyper::header::{self, HeaderName, HeaderValue};
use hyper::{HeaderMap, StatusCode};

/// Content type of rendered pages.
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Content type of plain-text error responses.
pub const PLAIN_TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// HTTP Response representation
#[derive(Debug, Clone)]
pub struct Response {
	pub status: StatusCode,
	pub headers: HeaderMap,
	pub body: Bytes,
}

impl Response {
	/// Create a new Response with the given status code
	///
	/// # Examples
	///
	/// ```
	/// use pagecraft_http::Response;
	/// use hyper::StatusCode;
	///
	/// let response = Response::new(StatusCode::OK);
	/// assert_eq!(response.status, StatusCode::OK);
	/// assert!(response.body.is_empty());
	/// ```
	pub fn new(status: StatusCode) -> Self {
		Self {
			status,
			headers: HeaderMap::new(),
			body: Bytes::new(),
		}
	}
	/// Create a Response with HTTP 200 OK status
	pub fn ok() -> Self {
		Self::new(StatusCode::OK)
	}
	/// Create a Response with HTTP 500 Internal Server Error status
	pub fn internal_server_error() -> Self {
		Self::new(StatusCode::INTERNAL_SERVER_ERROR)
	}
	/// Set the response body
	///
	/// # Examples
	///
	/// ```
	/// use pagecraft_http::Response;
	/// use bytes::Bytes;
	///
	/// let response = Response::ok().with_body("Hello, World!");
	/// assert_eq!(response.body, Bytes::from("Hello, World!"));
	/// ```
	pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}
	/// Add a custom header to the response
	///
	/// Invalid header names or values are ignored.
	///
	/// # Examples
	///
	/// ```
	/// use pagecraft_http::Response;
	///
	/// let response = Response::ok().with_header("X-Custom-Header", "custom-value");
	/// assert_eq!(
	///     response.headers.get("X-Custom-Header").unwrap().to_str().unwrap(),
	///     "custom-value"
	/// );
	/// ```
	pub fn with_header(mut self, name: &str, value: &str) -> Self {
		if let Ok(header_name) = HeaderName::from_bytes(name.as_bytes())
			&& let Ok(header_value) = HeaderValue::from_str(value)
		{
			self.headers.insert(header_name, header_value);
		}
		self
	}
	/// Set an HTML body with `text/html; charset=utf-8`
	///
	/// # Examples
	///
	/// ```
	/// use pagecraft_http::Response;
	///
	/// let response = Response::ok().html("<h1>Hi</h1>");
	/// assert_eq!(
	///     response.headers.get("content-type").unwrap(),
	///     "text/html; charset=utf-8"
	/// );
	/// ```
	pub fn html(mut self, body: impl Into<Bytes>) -> Self {
		self.headers.insert(
			header::CONTENT_TYPE,
			HeaderValue::from_static(HTML_CONTENT_TYPE),
		);
		self.body = body.into();
		self
	}
	/// Turn this response into a plain-text error
	///
	/// Mirrors the usual server convention for short error replies: any
	/// stale `Content-Length` is dropped, the content type becomes plain text
	/// with `X-Content-Type-Options: nosniff`, and the body is the message
	/// followed by a newline. Headers set earlier (for instance by an error
	/// logger) are otherwise kept.
	///
	/// # Examples
	///
	/// ```
	/// use pagecraft_http::Response;
	/// use hyper::StatusCode;
	///
	/// let response = Response::new(StatusCode::NOT_FOUND).with_plain_error("Not Found");
	/// assert_eq!(response.status, StatusCode::NOT_FOUND);
	/// assert_eq!(&response.body[..], b"Not Found\n");
	/// ```
	pub fn with_plain_error(mut self, message: &str) -> Self {
		self.headers.remove(header::CONTENT_LENGTH);
		self.headers.insert(
			header::CONTENT_TYPE,
			HeaderValue::from_static(PLAIN_TEXT_CONTENT_TYPE),
		);
		self.headers.insert(
			header::X_CONTENT_TYPE_OPTIONS,
			HeaderValue::from_static("nosniff"),
		);
		self.body = Bytes::from(format!("{}\n", message));
		self
	}
	/// The `Content-Type` header as a string, if set.
	pub fn content_type(&self) -> Option<&str> {
		self.headers
			.get(header::CONTENT_TYPE)
			.and_then(|v| v.to_str().ok())
	}
	/// Convert into a `hyper::Response` ready to be written by a server.
	pub fn into_http(self) -> hyper::Response<Bytes> {
		let mut response = hyper::Response::new(self.body);
		*response.status_mut() = self.status;
		*response.headers_mut() = self.headers;
		response
	}
}
