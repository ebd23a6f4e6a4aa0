use hyper::StatusCode;

/// Human-readable text for a status code.
///
/// Returns the canonical reason phrase (`404` becomes `"Not Found"`), or an
/// empty string for codes without a registered phrase.
///
/// # Examples
///
/// ```
/// use pagecraft_http::{StatusCode, status_text};
///
/// assert_eq!(status_text(StatusCode::NOT_FOUND), "Not Found");
/// assert_eq!(status_text(StatusCode::from_u16(599).unwrap()), "");
/// ```
pub fn status_text(status: StatusCode) -> &'static str {
	status.canonical_reason().unwrap_or("")
}
