//! Helper functions callable from templates
//!
//! Every compiled template gets the fixed set:
//!
//! - `safeHTML(value=...)` and `| safeHTML`: output the string without
//!   escaping. Only use it for trusted markup.
//! - `StringsJoin(items=[...], sep=", ")`: join a list of strings.
//! - `SHAFile(output="app.css", path="static/app.css")`: append the SHA-256 of
//!   a file as a cache-busting query string.
//!
//! Callers can add their own functions per render. They may shadow
//! `StringsJoin` and `SHAFile`, but `safeHTML` is always the built-in one.

use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::sync::Arc;
use tera::{Filter, Function, Result, Tera, Value, from_value};

/// Name of the raw-HTML helper.
pub const SAFE_HTML: &str = "safeHTML";

/// Name of the string join helper.
pub const STRINGS_JOIN: &str = "StringsJoin";

/// Name of the file hash helper.
pub const SHA_FILE: &str = "SHAFile";

/// A named set of template functions.
///
/// Cloning is cheap: functions are reference counted.
#[derive(Clone, Default)]
pub struct HelperFunctions {
	functions: BTreeMap<String, Arc<dyn Function>>,
}

impl HelperFunctions {
	/// Create an empty set.
	pub fn new() -> Self {
		Self {
			functions: BTreeMap::new(),
		}
	}

	/// The fixed helpers every template receives.
	pub fn builtin() -> Self {
		Self::new()
			.with(STRINGS_JOIN, strings_join)
			.with(SHA_FILE, sha_file)
			.with(SAFE_HTML, SafeHtml)
	}

	/// Add a function, replacing any previous one with the same name.
	///
	/// # Examples
	///
	/// ```
	/// use pagecraft_templates::HelperFunctions;
	/// use std::collections::HashMap;
	/// use tera::{Result, Value};
	///
	/// fn shout(args: &HashMap<String, Value>) -> Result<Value> {
	///     let text = args.get("text").and_then(Value::as_str).unwrap_or_default();
	///     Ok(Value::String(text.to_uppercase()))
	/// }
	///
	/// let helpers = HelperFunctions::new().with("shout", shout);
	/// assert!(helpers.contains("shout"));
	/// ```
	pub fn with<F>(mut self, name: impl Into<String>, function: F) -> Self
	where
		F: Function + 'static,
	{
		self.insert(name, function);
		self
	}

	/// Add a function in place.
	pub fn insert<F>(&mut self, name: impl Into<String>, function: F)
	where
		F: Function + 'static,
	{
		self.functions.insert(name.into(), Arc::new(function));
	}

	/// Returns true if a function is registered under `name`.
	pub fn contains(&self, name: &str) -> bool {
		self.functions.contains_key(name)
	}

	/// Number of functions.
	pub fn len(&self) -> usize {
		self.functions.len()
	}

	/// Returns true if the set is empty.
	pub fn is_empty(&self) -> bool {
		self.functions.is_empty()
	}

	/// Registered names, sorted.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.functions.keys().map(String::as_str)
	}

	/// Overlay `extra` on top of `self`.
	///
	/// Entries of `extra` replace entries of `self`, then `safeHTML` is
	/// installed again so it can never be overridden.
	pub fn merged_with(&self, extra: HelperFunctions) -> HelperFunctions {
		let mut merged = self.clone();
		merged.functions.extend(extra.functions);
		merged.insert(SAFE_HTML, SafeHtml);
		merged
	}

	/// Register every function, and the `safeHTML` filter, on a Tera instance.
	pub(crate) fn register(&self, tera: &mut Tera) {
		for (name, function) in &self.functions {
			tera.register_function(name, SharedFunction(function.clone()));
		}
		tera.register_filter(SAFE_HTML, SafeHtml);
	}
}

impl fmt::Debug for HelperFunctions {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_set().entries(self.functions.keys()).finish()
	}
}

/// Lets one function instance be registered on many Tera instances.
struct SharedFunction(Arc<dyn Function>);

impl Function for SharedFunction {
	fn call(&self, args: &HashMap<String, Value>) -> Result<Value> {
		self.0.call(args)
	}

	fn is_safe(&self) -> bool {
		self.0.is_safe()
	}
}

/// Marks a string as pre-escaped HTML.
#[derive(Debug, Clone, Copy)]
pub struct SafeHtml;

impl Function for SafeHtml {
	fn call(&self, args: &HashMap<String, Value>) -> Result<Value> {
		match args.get("value") {
			Some(Value::String(s)) => Ok(Value::String(s.clone())),
			Some(val) => Err(tera::Error::msg(format!(
				"Function `{}` received value={} but `value` can only be a string",
				SAFE_HTML, val
			))),
			None => Err(tera::Error::msg(format!(
				"Function `{}` was called without a `value` argument",
				SAFE_HTML
			))),
		}
	}

	fn is_safe(&self) -> bool {
		true
	}
}

impl Filter for SafeHtml {
	fn filter(&self, value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
		match value {
			Value::String(s) => Ok(Value::String(s.clone())),
			other => Err(tera::Error::msg(format!(
				"Filter `{}` received {} but can only be applied to strings",
				SAFE_HTML, other
			))),
		}
	}

	fn is_safe(&self) -> bool {
		true
	}
}

/// `StringsJoin(items=[...], sep="...")`
pub fn strings_join(args: &HashMap<String, Value>) -> Result<Value> {
	let items = match args.get("items") {
		Some(val) => from_value::<Vec<String>>(val.clone()).map_err(|_| {
			tera::Error::msg(format!(
				"Function `{}` received items={} but `items` can only be a list of strings",
				STRINGS_JOIN, val
			))
		})?,
		None => {
			return Err(tera::Error::msg(format!(
				"Function `{}` was called without an `items` argument",
				STRINGS_JOIN
			)));
		}
	};
	let sep = match args.get("sep") {
		Some(Value::String(s)) => s.as_str(),
		Some(val) => {
			return Err(tera::Error::msg(format!(
				"Function `{}` received sep={} but `sep` can only be a string",
				STRINGS_JOIN, val
			)));
		}
		None => "",
	};

	Ok(Value::String(items.join(sep)))
}

/// `SHAFile(output="...", path="...")`
///
/// Returns `output?<sha256 hex>` of the file at `path`. A file that cannot be
/// read yields `output` unchanged.
pub fn sha_file(args: &HashMap<String, Value>) -> Result<Value> {
	let output = string_arg(args, SHA_FILE, "output")?;
	let path = string_arg(args, SHA_FILE, "path")?;

	let hashed = match fs::read(path) {
		Ok(content) => format!("{}?{}", output, hex::encode(Sha256::digest(&content))),
		Err(e) => {
			tracing::debug!(path, error = %e, "SHAFile could not read file, using bare name");
			output.to_string()
		}
	};

	Ok(Value::String(hashed))
}

fn string_arg<'a>(args: &'a HashMap<String, Value>, function: &str, key: &str) -> Result<&'a str> {
	match args.get(key) {
		Some(Value::String(s)) => Ok(s.as_str()),
		Some(val) => Err(tera::Error::msg(format!(
			"Function `{}` received {}={} but `{}` can only be a string",
			function, key, val, key
		))),
		None => Err(tera::Error::msg(format!(
			"Function `{}` was called without a `{}` argument",
			function, key
		))),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;
	use tempfile::TempDir;

	fn args(value: Value) -> HashMap<String, Value> {
		serde_json::from_value(value).unwrap()
	}

	fn shout(_args: &HashMap<String, Value>) -> Result<Value> {
		Ok(Value::String("SHOUT".to_string()))
	}

	fn fake_safe(_args: &HashMap<String, Value>) -> Result<Value> {
		Ok(Value::String("overridden".to_string()))
	}

	#[rstest]
	fn test_builtin_set() {
		let helpers = HelperFunctions::builtin();

		assert_eq!(
			helpers.names().collect::<Vec<_>>(),
			vec![SHA_FILE, STRINGS_JOIN, SAFE_HTML]
		);
	}

	#[rstest]
	fn test_merge_keeps_safe_html() {
		let extra = HelperFunctions::new()
			.with(SAFE_HTML, fake_safe)
			.with(STRINGS_JOIN, shout)
			.with("shout", shout);

		let merged = HelperFunctions::builtin().merged_with(extra);
		let out = merged.functions[SAFE_HTML]
			.call(&args(json!({"value": "<b>x</b>"})))
			.unwrap();

		assert_eq!(out, json!("<b>x</b>"));
		assert!(merged.functions[SAFE_HTML].is_safe());
		assert_eq!(
			merged.functions[STRINGS_JOIN].call(&HashMap::new()).unwrap(),
			json!("SHOUT")
		);
		assert!(merged.contains("shout"));
	}

	#[rstest]
	#[case(json!({"items": ["a", "b", "c"], "sep": ", "}), "a, b, c")]
	#[case(json!({"items": ["a", "b"]}), "ab")]
	#[case(json!({"items": [], "sep": "-"}), "")]
	fn test_strings_join(#[case] input: Value, #[case] expected: &str) {
		assert_eq!(strings_join(&args(input)).unwrap(), json!(expected));
	}

	#[rstest]
	#[case(json!({"sep": ","}))]
	#[case(json!({"items": [1, 2]}))]
	#[case(json!({"items": ["a"], "sep": 3}))]
	fn test_strings_join_rejects_bad_args(#[case] input: Value) {
		assert!(strings_join(&args(input)).is_err());
	}

	#[rstest]
	fn test_sha_file_appends_digest() {
		let temp_dir = TempDir::new().unwrap();
		let path = temp_dir.path().join("app.css");
		fs::write(&path, "body {}").unwrap();

		let out = sha_file(&args(json!({
			"output": "/static/app.css",
			"path": path.to_string_lossy(),
		})))
		.unwrap();

		let expected = format!("/static/app.css?{}", hex::encode(Sha256::digest(b"body {}")));
		assert_eq!(out, json!(expected));
	}

	#[rstest]
	fn test_sha_file_falls_back_to_output() {
		let out = sha_file(&args(json!({
			"output": "/static/app.css",
			"path": "/definitely/not/here.css",
		})))
		.unwrap();

		assert_eq!(out, json!("/static/app.css"));
	}

	#[rstest]
	fn test_safe_html_requires_string() {
		assert!(Function::call(&SafeHtml, &args(json!({"value": 3}))).is_err());
		assert!(Function::call(&SafeHtml, &HashMap::new()).is_err());
		assert!(SafeHtml.filter(&json!([1]), &HashMap::new()).is_err());
	}
}
