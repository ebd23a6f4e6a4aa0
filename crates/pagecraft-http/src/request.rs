use bytes::Bytes;
use hyper::{HeaderMap, Method, Uri, Version};

/// HTTP Request representation
#[derive(Debug, Clone)]
pub struct Request {
	pub method: Method,
	pub uri: Uri,
	pub version: Version,
	pub headers: HeaderMap,
	pub body: Bytes,
}

impl Request {
	/// Create a new Request
	///
	/// # Examples
	///
	/// ```
	/// use pagecraft_http::Request;
	/// use hyper::{HeaderMap, Method, Uri, Version};
	/// use bytes::Bytes;
	///
	/// let request = Request::new(
	///     Method::GET,
	///     Uri::from_static("/users/42"),
	///     Version::HTTP_11,
	///     HeaderMap::new(),
	///     Bytes::new(),
	/// );
	/// assert_eq!(request.path(), "/users/42");
	/// ```
	pub fn new(method: Method, uri: Uri, version: Version, headers: HeaderMap, body: Bytes) -> Self {
		Self {
			method,
			uri,
			version,
			headers,
			body,
		}
	}

	/// Convert a `hyper::Request` whose body has already been collected.
	pub fn from_http(request: hyper::Request<Bytes>) -> Self {
		let (parts, body) = request.into_parts();
		Self::new(parts.method, parts.uri, parts.version, parts.headers, body)
	}

	/// The request path, without the query string.
	pub fn path(&self) -> &str {
		self.uri.path()
	}

	/// Header value as a string, if present and valid ASCII.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(name).and_then(|v| v.to_str().ok())
	}
}
