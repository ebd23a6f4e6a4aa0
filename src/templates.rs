//! Template compilation, delimiters and helper functions.

pub use pagecraft_templates::*;
