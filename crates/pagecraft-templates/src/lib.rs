//! # Pagecraft Templates
//!
//! Compiles named templates into executable form.
//!
//! Templates use [Tera](https://keats.github.io/tera/) syntax. On top of it
//! this crate adds:
//!
//! - resolution through a [`pagecraft_assets::AssetResolver`]
//! - an optional custom delimiter pair, see [`Delimiters`]
//! - a fixed set of helper functions plus per-render extras, see
//!   [`HelperFunctions`]
//! - HTML escaping for every template regardless of its file extension
//!
//! Compiled templates are not cached; every [`TemplateCompiler::compile`]
//! reads and parses the source again.

mod compiler;
mod delimiters;
mod error;
mod helpers;
mod template;

pub use compiler::TemplateCompiler;
pub use delimiters::{DEFAULT_LEFT, DEFAULT_RIGHT, Delimiters};
pub use error::{ErrorKind, TemplateError, TemplateResult};
pub use helpers::{HelperFunctions, SAFE_HTML, SHA_FILE, STRINGS_JOIN, SafeHtml, sha_file, strings_join};
pub use template::{CompiledTemplate, DATA_VARIABLE};

pub use tera::{Error as HelperError, Function, Result as HelperResult, Value};
