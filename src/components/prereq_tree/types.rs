//! Course mapping supplied by the page.

use log::warn;
use serde_json::Value;

use crate::error::TreeError;

/// Identifier of a course, e.g. `"CSC148"`.
pub type CourseId = String;

/// Ordered adjacency mapping: each course and the courses it links to.
///
/// Key order follows the JSON object the server rendered into the page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CourseMap {
	entries: Vec<(CourseId, Vec<CourseId>)>,
}

impl CourseMap {
	/// Parse a mapping from JSON text.
	///
	/// Only the top-level shape is checked; odd values are tolerated:
	/// `null` becomes an empty list, non-string list items keep their JSON
	/// text, and any other non-list value is dropped with a warning.
	pub fn from_json(text: &str) -> Result<Self, TreeError> {
		let value: Value = serde_json::from_str(text)?;
		let object = match value {
			Value::Object(object) => object,
			other => return Err(TreeError::NotAMapping(kind(&other))),
		};

		let entries = object
			.into_iter()
			.map(|(course, value)| {
				let linked = match value {
					Value::Array(items) => items
						.into_iter()
						.map(|item| match item {
							Value::String(s) => s,
							other => other.to_string(),
						})
						.collect(),
					Value::Null => Vec::new(),
					other => {
						warn!(
							"prereq-tree: ignoring {} value for course {}",
							kind(&other),
							course
						);
						Vec::new()
					}
				};
				(course, linked)
			})
			.collect();

		Ok(Self { entries })
	}

	/// Number of courses (keys).
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the mapping has no courses.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterate courses and their linked courses in mapping order.
	pub fn iter(&self) -> impl Iterator<Item = (&CourseId, &[CourseId])> {
		self.entries.iter().map(|(k, v)| (k, v.as_slice()))
	}
}

impl<K, I> FromIterator<(K, I)> for CourseMap
where
	K: Into<CourseId>,
	I: IntoIterator,
	I::Item: Into<CourseId>,
{
	fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
		Self {
			entries: iter
				.into_iter()
				.map(|(k, v)| (k.into(), v.into_iter().map(Into::into).collect()))
				.collect(),
		}
	}
}

fn kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}
