use crate::{TemplateError, TemplateResult};
use serde::Serialize;
use std::fmt;
use tera::{Context, Tera, Value, to_value};

/// Variable holding page data that is not a map.
pub const DATA_VARIABLE: &str = "data";

/// A parsed template ready to execute against data values.
///
/// Execution does not mutate the template, so one instance may be shared
/// across threads and executed any number of times.
pub struct CompiledTemplate {
	name: String,
	tera: Tera,
}

impl CompiledTemplate {
	pub(crate) fn new(name: &str, tera: Tera) -> Self {
		Self {
			name: name.to_string(),
			tera,
		}
	}

	/// The name the template was compiled under.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Render the template with `data` as its context.
	///
	/// The fields of a map become top-level template variables. A null or
	/// unit value gives an empty context; any other value is available as
	/// `data`.
	///
	/// # Errors
	///
	/// - [`TemplateError::Context`] if `data` cannot be serialized
	/// - [`TemplateError::Execution`] if rendering fails, e.g. on an undefined
	///   variable or a helper error
	pub fn execute<T: Serialize + ?Sized>(&self, data: &T) -> TemplateResult<String> {
		let context = self.context(data)?;

		self.tera
			.render(&self.name, &context)
			.map_err(|source| TemplateError::Execution {
				name: self.name.clone(),
				source,
			})
	}

	fn context<T: Serialize + ?Sized>(&self, data: &T) -> TemplateResult<Context> {
		let context_error = |source: tera::Error| TemplateError::Context {
			name: self.name.clone(),
			source,
		};

		let value = to_value(data).map_err(|e| context_error(tera::Error::json(e)))?;
		match &value {
			Value::Null => Ok(Context::new()),
			Value::Object(_) => Context::from_serialize(&value).map_err(context_error),
			other => {
				let mut context = Context::new();
				context.insert(DATA_VARIABLE, other);
				Ok(context)
			}
		}
	}
}

impl fmt::Debug for CompiledTemplate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CompiledTemplate")
			.field("name", &self.name)
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use crate::{ErrorKind, HelperFunctions, TemplateCompiler, TemplateError};
	use pagecraft_assets::AssetResolver;
	use rstest::rstest;
	use serde::Serialize;
	use serde_json::json;
	use std::collections::BTreeMap;
	use std::sync::Arc;

	#[derive(Serialize)]
	struct Page<'a> {
		title: &'a str,
		items: Vec<&'a str>,
	}

	fn compile(source: &str) -> super::CompiledTemplate {
		TemplateCompiler::new(Arc::new(AssetResolver::new()))
			.compile_source("page.html", source.as_bytes(), HelperFunctions::new())
			.unwrap()
	}

	#[rstest]
	fn test_execute_struct_data() {
		let template = compile("<h1>{{ title }}</h1>{% for i in items %}<li>{{ i }}</li>{% endfor %}");
		let page = Page {
			title: "Fish & Chips",
			items: vec!["a", "b"],
		};

		assert_eq!(
			template.execute(&page).unwrap(),
			"<h1>Fish &amp; Chips</h1><li>a</li><li>b</li>"
		);
	}

	#[rstest]
	#[case(json!(null))]
	#[case(json!([1, 2]))]
	#[case(json!("text"))]
	#[case(json!(42))]
	fn test_static_template_ignores_non_map_data(#[case] data: serde_json::Value) {
		assert_eq!(compile("static").execute(&data).unwrap(), "static");
	}

	#[rstest]
	fn test_unit_data_gives_empty_context() {
		assert_eq!(compile("<p>about</p>").execute(&()).unwrap(), "<p>about</p>");

		let err = compile("{{ title }}").execute(&()).unwrap_err();
		assert!(matches!(err, TemplateError::Execution { .. }));
	}

	#[rstest]
	fn test_non_map_data_is_exposed_as_data() {
		assert_eq!(compile("<b>{{ data }}</b>").execute(&"a < b").unwrap(), "<b>a &lt; b</b>");
		assert_eq!(
			compile("{% for n in data %}{{ n }};{% endfor %}")
				.execute(&[1, 2, 3])
				.unwrap(),
			"1;2;3;"
		);
	}

	#[rstest]
	fn test_unserializable_data_is_context_error() {
		let mut data = BTreeMap::new();
		data.insert((1, 2), "tuple keys");

		let err = compile("static").execute(&data).unwrap_err();

		assert!(matches!(err, TemplateError::Context { .. }));
		assert_eq!(err.kind(), ErrorKind::Execution);
	}

	#[rstest]
	fn test_undefined_variable_is_execution_error() {
		let err = compile("{{ missing }}").execute(&json!({})).unwrap_err();

		assert!(matches!(err, TemplateError::Execution { .. }));
		assert!(err.to_string().contains("page.html"));
	}

	#[rstest]
	fn test_repeated_execution_is_stable() {
		let template = compile("{{ n }}");

		for n in 0..3 {
			assert_eq!(template.execute(&json!({ "n": n })).unwrap(), n.to_string());
		}
	}
}
