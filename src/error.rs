//! Errors raised while bootstrapping the tree visualization.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors that can occur while loading page data or mounting the component.
///
/// Everything after a successful mount is best-effort and only logged.
#[derive(Error, Debug)]
pub enum TreeError {
	/// `window` is not available.
	#[error("no global window object")]
	NoWindow,

	/// The window has no document.
	#[error("window has no document")]
	NoDocument,

	/// A required element is missing from the page.
	#[error("required element #{0} not found")]
	MissingElement(&'static str),

	/// An element exists but has the wrong type.
	#[error("element #{id} is not a {expected}")]
	WrongElementType {
		/// Element id.
		id: &'static str,
		/// Expected element kind.
		expected: &'static str,
	},

	/// The tree data is not valid JSON.
	#[error("invalid tree data: {0}")]
	InvalidData(#[from] serde_json::Error),

	/// The tree data is valid JSON but not an object.
	#[error("tree data must be a JSON object, found {0}")]
	NotAMapping(&'static str),

	/// A DOM call failed.
	#[error("javascript error: {0}")]
	Js(String),
}

impl From<JsValue> for TreeError {
	fn from(value: JsValue) -> Self {
		TreeError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}
