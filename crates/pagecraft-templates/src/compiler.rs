//! Template compilation
//!
//! Turns a named asset into an executable template: resolve the bytes, apply
//! the delimiter override, install the helper set, then parse.

use crate::{CompiledTemplate, Delimiters, HelperFunctions, TemplateError, TemplateResult};
use pagecraft_assets::AssetResolver;
use std::sync::Arc;
use tera::Tera;

/// Compiles templates resolved through an [`AssetResolver`].
///
/// Nothing is cached: each call parses the current bytes of the asset, so
/// identical inputs always give an equivalent template.
#[derive(Debug)]
pub struct TemplateCompiler {
	resolver: Arc<AssetResolver>,
	delimiters: Delimiters,
}

impl TemplateCompiler {
	/// Create a compiler using the default delimiters.
	pub fn new(resolver: Arc<AssetResolver>) -> Self {
		Self {
			resolver,
			delimiters: Delimiters::default(),
		}
	}

	/// Use a delimiter override for every compiled template.
	pub fn with_delimiters(mut self, delimiters: Delimiters) -> Self {
		self.delimiters = delimiters;
		self
	}

	/// Replace the delimiter override.
	pub fn set_delimiters(&mut self, delimiters: Delimiters) {
		self.delimiters = delimiters;
	}

	/// The active delimiter override.
	pub fn delimiters(&self) -> &Delimiters {
		&self.delimiters
	}

	/// The resolver templates are read from.
	pub fn resolver(&self) -> &AssetResolver {
		&self.resolver
	}

	/// Resolve `name` and compile it with the fixed helpers plus `helpers`.
	///
	/// # Errors
	///
	/// - [`TemplateError::Resolution`] if no source provides `name`
	/// - a compile-class error if the source is not a valid template
	///
	/// # Examples
	///
	/// ```
	/// use pagecraft_assets::{AssetResolver, EmbeddedAssetSource};
	/// use pagecraft_templates::{HelperFunctions, TemplateCompiler};
	/// use serde_json::json;
	/// use std::sync::Arc;
	///
	/// static PAGES: &[(&str, &[u8])] = &[("hello.html", b"Hello {{ name }}!")];
	///
	/// let resolver = AssetResolver::new()
	///     .with_source(EmbeddedAssetSource::from_entries(PAGES.iter().copied()));
	/// let compiler = TemplateCompiler::new(Arc::new(resolver));
	///
	/// let template = compiler.compile("hello.html", HelperFunctions::new()).unwrap();
	/// assert_eq!(template.execute(&json!({"name": "World"})).unwrap(), "Hello World!");
	/// ```
	pub fn compile(&self, name: &str, helpers: HelperFunctions) -> TemplateResult<CompiledTemplate> {
		let raw = self.resolver.get(name)?;
		self.compile_source(name, &raw, helpers)
	}

	/// Compile already resolved template bytes under `name`.
	pub fn compile_source(
		&self,
		name: &str,
		raw: &[u8],
		helpers: HelperFunctions,
	) -> TemplateResult<CompiledTemplate> {
		let text = std::str::from_utf8(raw).map_err(|_| TemplateError::InvalidUtf8 {
			name: name.to_string(),
		})?;
		let source = self.delimiters.translate(name, text)?;

		let mut tera = Tera::default();
		// Escape every template, whatever its extension.
		tera.autoescape_on(vec![""]);
		HelperFunctions::builtin()
			.merged_with(helpers)
			.register(&mut tera);

		tera.add_raw_template(name, &source)
			.map_err(|source| TemplateError::Compile {
				name: name.to_string(),
				source,
			})?;

		Ok(CompiledTemplate::new(name, tera))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ErrorKind;
	use bytes::Bytes;
	use pagecraft_assets::{AssetError, EmbeddedAssetSource};
	use rstest::{fixture, rstest};
	use serde_json::{Value, json};
	use std::collections::HashMap;

	fn compiler_with(pages: &'static [(&'static str, &'static [u8])]) -> TemplateCompiler {
		let resolver =
			AssetResolver::new().with_source(EmbeddedAssetSource::from_entries(pages.iter().copied()));
		TemplateCompiler::new(Arc::new(resolver))
	}

	#[fixture]
	fn compiler() -> TemplateCompiler {
		compiler_with(&[
			("hello.html", b"Hello {{ name }}!"),
			("custom.html", b"Hello << name >>!"),
			("broken.html", b"Hello {{ name "),
			("raw.html", b"{{ body | safeHTML }}|{{ safeHTML(value=body) }}|{{ body }}"),
			("join.html", b"{{ StringsJoin(items=tags, sep=\", \") }}"),
			("shout.html", b"{{ shout(text=name) }}"),
			("binary.html", b"\xff\xfe"),
		])
	}

	fn shout(args: &HashMap<String, Value>) -> tera::Result<Value> {
		let text = args.get("text").and_then(Value::as_str).unwrap_or_default();
		Ok(Value::String(text.to_uppercase()))
	}

	#[rstest]
	fn test_compile_and_execute(compiler: TemplateCompiler) {
		let template = compiler.compile("hello.html", HelperFunctions::new()).unwrap();

		assert_eq!(template.name(), "hello.html");
		assert_eq!(template.execute(&json!({"name": "World"})).unwrap(), "Hello World!");
	}

	#[rstest]
	fn test_missing_template_is_resolution_error(compiler: TemplateCompiler) {
		let err = compiler.compile("nope.html", HelperFunctions::new()).unwrap_err();

		assert_eq!(err.kind(), ErrorKind::Resolution);
		assert!(matches!(err, TemplateError::Resolution(AssetError::NotFound { .. })));
	}

	#[rstest]
	fn test_syntax_error_is_compile_error(compiler: TemplateCompiler) {
		let err = compiler.compile("broken.html", HelperFunctions::new()).unwrap_err();

		assert_eq!(err.kind(), ErrorKind::Compile);
		assert!(err.to_string().starts_with("compile error in template broken.html"));
	}

	#[rstest]
	fn test_non_utf8_source_is_compile_error(compiler: TemplateCompiler) {
		let err = compiler.compile("binary.html", HelperFunctions::new()).unwrap_err();

		assert!(matches!(err, TemplateError::InvalidUtf8 { .. }));
		assert_eq!(err.kind(), ErrorKind::Compile);
	}

	#[rstest]
	fn test_custom_delimiters(compiler: TemplateCompiler) {
		let compiler = compiler.with_delimiters(Delimiters::new("<<", ">>"));
		let data = json!({"name": "World"});

		let custom = compiler.compile("custom.html", HelperFunctions::new()).unwrap();
		assert_eq!(custom.execute(&data).unwrap(), "Hello World!");

		// Default markers are plain text under a custom pair.
		let default = compiler.compile("hello.html", HelperFunctions::new()).unwrap();
		assert_eq!(default.execute(&data).unwrap(), "Hello {{ name }}!");
	}

	#[rstest]
	fn test_default_delimiters_leave_custom_markers_alone(compiler: TemplateCompiler) {
		let template = compiler.compile("custom.html", HelperFunctions::new()).unwrap();

		assert_eq!(
			template.execute(&json!({"name": "World"})).unwrap(),
			"Hello << name >>!"
		);
	}

	#[rstest]
	fn test_unclosed_custom_delimiter_fails_to_compile() {
		let compiler = compiler_with(&[("page.html", b"Hello << name")])
			.with_delimiters(Delimiters::new("<<", ">>"));

		let err = compiler.compile("page.html", HelperFunctions::new()).unwrap_err();
		assert!(matches!(err, TemplateError::UnclosedDelimiter { .. }));
	}

	#[rstest]
	fn test_safe_html_bypasses_escaping(compiler: TemplateCompiler) {
		let template = compiler.compile("raw.html", HelperFunctions::new()).unwrap();

		let out = template.execute(&json!({"body": "<b>x</b>"})).unwrap();
		assert_eq!(out, "<b>x</b>|<b>x</b>|&lt;b&gt;x&lt;&#x2F;b&gt;");
	}

	#[rstest]
	fn test_builtin_join_helper(compiler: TemplateCompiler) {
		let template = compiler.compile("join.html", HelperFunctions::new()).unwrap();

		let out = template.execute(&json!({"tags": ["rust", "web"]})).unwrap();
		assert_eq!(out, "rust, web");
	}

	#[rstest]
	fn test_caller_helpers_are_available(compiler: TemplateCompiler) {
		let helpers = HelperFunctions::new().with("shout", shout);
		let template = compiler.compile("shout.html", helpers).unwrap();

		assert_eq!(template.execute(&json!({"name": "hey"})).unwrap(), "HEY");
	}

	#[rstest]
	fn test_unknown_helper_fails_at_execution(compiler: TemplateCompiler) {
		let template = compiler.compile("shout.html", HelperFunctions::new()).unwrap();

		let err = template.execute(&json!({"name": "hey"})).unwrap_err();
		assert_eq!(err.kind(), ErrorKind::Execution);
	}

	#[rstest]
	fn test_compile_source_is_deterministic(compiler: TemplateCompiler) {
		let raw = Bytes::from_static(b"{% for n in nums %}{{ n }};{% endfor %}");
		let data = json!({"nums": [1, 2, 3]});

		let first = compiler
			.compile_source("loop.html", &raw, HelperFunctions::new())
			.unwrap();
		let second = compiler
			.compile_source("loop.html", &raw, HelperFunctions::new())
			.unwrap();

		assert_eq!(first.execute(&data).unwrap(), "1;2;3;");
		assert_eq!(first.execute(&data).unwrap(), second.execute(&data).unwrap());
	}
}
