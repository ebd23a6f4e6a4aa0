//! HTTP request and response values.

pub use pagecraft_http::*;
