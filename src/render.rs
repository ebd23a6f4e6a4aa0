//! Page rendering, error responses and monitoring.

pub use pagecraft_render::*;
