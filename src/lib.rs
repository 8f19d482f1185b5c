//! prereq-tree: Interactive prerequisite tree visualization for course pages.
//!
//! This crate provides a WASM-based component that renders a course
//! dependency mapping embedded in a server-rendered page as a force-directed
//! graph, with node dragging and click-through to course detail pages.

use leptos::mount::mount_to;
use leptos::prelude::*;
use log::{Level, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, HtmlScriptElement};

pub mod components;
pub mod error;

pub use components::prereq_tree::{CourseGraph, CourseMap, PrereqTreeCanvas, TreeConfig};
pub use error::TreeError;

/// Container the canvas is mounted into.
pub const CANVAS_CONTAINER_ID: &str = "tree-visual-canvas";
/// Control that navigates back in history.
pub const BACK_BUTTON_ID: &str = "back-button";
/// JSON script element holding the course mapping.
pub const TREE_DATA_ID: &str = "tree-data";
/// Optional JSON script element holding a partial [`TreeConfig`].
pub const TREE_CONFIG_ID: &str = "tree-config";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("prereq-tree: logging initialized");
}

fn element_by_id<T: JsCast>(
	document: &Document,
	id: &'static str,
	expected: &'static str,
) -> Result<T, TreeError> {
	document
		.get_element_by_id(id)
		.ok_or(TreeError::MissingElement(id))?
		.dyn_into::<T>()
		.map_err(|_| TreeError::WrongElementType { id, expected })
}

/// Load the course mapping from the script element with id="tree-data".
/// Expected format: JSON object `{ "COURSE": ["COURSE", ...], ... }`
fn load_course_map(document: &Document) -> Result<CourseMap, TreeError> {
	let script: HtmlScriptElement = element_by_id(document, TREE_DATA_ID, "script")?;
	let json_text = script.text()?;
	let map = CourseMap::from_json(&json_text)?;
	info!("prereq-tree: loaded {} courses", map.len());
	Ok(map)
}

/// Load the optional configuration; anything unusable falls back to defaults.
fn load_config(document: &Document) -> TreeConfig {
	let Some(element) = document.get_element_by_id(TREE_CONFIG_ID) else {
		return TreeConfig::default();
	};
	let Some(text) = element.text_content() else {
		return TreeConfig::default();
	};
	match TreeConfig::from_json(&text) {
		Ok(config) => config,
		Err(e) => {
			warn!("prereq-tree: ignoring invalid config: {}", e);
			TreeConfig::default()
		}
	}
}

/// Make the back control navigate to the previous history entry.
fn attach_back_button(document: &Document) -> Result<(), TreeError> {
	let button: HtmlElement = element_by_id(document, BACK_BUTTON_ID, "element")?;
	let on_click = Closure::<dyn FnMut()>::new(|| {
		let Some(window) = web_sys::window() else {
			return;
		};
		if let Err(e) = window.history().and_then(|history| history.back()) {
			warn!("prereq-tree: history back failed: {:?}", e);
		}
	});
	button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
	// Lives for the rest of the page.
	on_click.forget();
	Ok(())
}

/// Load page data, wire the back control and mount the tree canvas.
///
/// Fails fast when a required element is missing or the data is unreadable.
pub fn run() -> Result<(), TreeError> {
	let window = web_sys::window().ok_or(TreeError::NoWindow)?;
	let document = window.document().ok_or(TreeError::NoDocument)?;

	let data = load_course_map(&document)?;
	let config = load_config(&document);
	attach_back_button(&document)?;
	let container: HtmlElement = element_by_id(&document, CANVAS_CONTAINER_ID, "element")?;

	let graph_data = Signal::derive(move || data.clone());
	mount_to(container, move || {
		view! { <PrereqTreeCanvas data=graph_data config=config /> }
	})
	.forget();
	Ok(())
}
