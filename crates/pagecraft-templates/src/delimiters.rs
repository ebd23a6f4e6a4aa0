//! Custom expression delimiters
//!
//! Tera only understands `{{ }}`, `{% %}` and `{# #}`. A custom pair is
//! supported by rewriting the source before parsing: with the pair `<<`/`>>`,
//!
//! - `<< expr >>` becomes `{{ expr }}`
//! - `<<% stmt %>>` becomes `{% stmt %}`
//! - `<<# note #>>` becomes `{# note #}`
//!
//! and every default marker left in the literal text is emitted verbatim,
//! so `{{ name }}` in a `<<`/`>>` template renders as the text `{{ name }}`.

use crate::{TemplateError, TemplateResult};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Default opening delimiter.
pub const DEFAULT_LEFT: &str = "{{";

/// Default closing delimiter.
pub const DEFAULT_RIGHT: &str = "}}";

/// Optional override of the expression delimiters.
///
/// An empty side keeps its default, so `Delimiters::new("[[", "")` opens
/// expressions with `[[` and still closes them with `}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Delimiters {
	pub left: String,
	pub right: String,
}

impl Delimiters {
	/// Create a delimiter override. Empty strings mean "use the default".
	pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
		Self {
			left: left.into(),
			right: right.into(),
		}
	}

	/// Returns true when at least one side overrides the default.
	pub fn is_custom(&self) -> bool {
		!self.left.is_empty() || !self.right.is_empty()
	}

	/// The active opening marker.
	pub fn left(&self) -> &str {
		if self.left.is_empty() {
			DEFAULT_LEFT
		} else {
			&self.left
		}
	}

	/// The active closing marker.
	pub fn right(&self) -> &str {
		if self.right.is_empty() {
			DEFAULT_RIGHT
		} else {
			&self.right
		}
	}

	/// Rewrite `source` written with these delimiters into default syntax.
	///
	/// Sources using the default pair are returned untouched.
	///
	/// # Errors
	///
	/// Returns [`TemplateError::UnclosedDelimiter`] if an opening marker has
	/// no matching closing marker.
	///
	/// # Examples
	///
	/// ```
	/// use pagecraft_templates::Delimiters;
	///
	/// let delimiters = Delimiters::new("<<", ">>");
	/// let source = delimiters.translate("page", "<<% if x %>><< x >><<% endif %>>").unwrap();
	/// assert_eq!(source, "{% if x %}{{ x }}{% endif %}");
	/// ```
	pub fn translate<'a>(&self, name: &str, source: &'a str) -> TemplateResult<Cow<'a, str>> {
		let (left, right) = (self.left(), self.right());
		if left == DEFAULT_LEFT && right == DEFAULT_RIGHT {
			return Ok(Cow::Borrowed(source));
		}

		let mut out = String::with_capacity(source.len() + 16);
		let mut offset = 0;

		while let Some(found) = source[offset..].find(left) {
			let start = offset + found;
			push_literal(&mut out, &source[offset..start], true);

			let inner_start = start + left.len();
			let (open, close, terminator) = match source[inner_start..].chars().next() {
				Some('%') => ("{%", "%}", format!("%{}", right)),
				Some('#') => ("{#", "#}", format!("#{}", right)),
				_ => ("{{", "}}", right.to_string()),
			};
			let body_start = if open == "{{" { inner_start } else { inner_start + 1 };

			let body_len = source[body_start..].find(&terminator).ok_or_else(|| {
				TemplateError::UnclosedDelimiter {
					name: name.to_string(),
					open: left.to_string(),
					offset: start,
				}
			})?;

			out.push_str(open);
			out.push_str(&source[body_start..body_start + body_len]);
			out.push_str(close);
			offset = body_start + body_len + terminator.len();
		}

		push_literal(&mut out, &source[offset..], false);
		Ok(Cow::Owned(out))
	}
}

/// Emit literal text, neutralising anything Tera would treat as a tag.
///
/// A trailing `{` is escaped too when a translated tag follows, since the
/// tag itself starts with `{`.
fn push_literal(out: &mut String, text: &str, before_tag: bool) {
	let mut chars = text.chars().peekable();
	while let Some(c) = chars.next() {
		let opens_tag = match chars.peek() {
			Some('{' | '%' | '#') => true,
			None => before_tag,
			Some(_) => false,
		};
		if c == '{' && opens_tag {
			out.push_str("{{ \"{\" }}");
		} else {
			out.push(c);
		}
	}
}
