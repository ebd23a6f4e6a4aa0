//! # Pagecraft HTTP
//!
//! Request and response values exchanged between a server and the page
//! renderer. The types are plain data: building a response never performs
//! I/O, so the renderer can finish (or abandon) a response before any byte
//! reaches the client.

mod request;
mod response;
mod status;

pub use request::Request;
pub use response::{Response, HTML_CONTENT_TYPE, PLAIN_TEXT_CONTENT_TYPE};
pub use status::status_text;

// Re-export the hyper types used throughout the public API
pub use hyper::header;
pub use hyper::{HeaderMap, Method, StatusCode, Uri, Version};
