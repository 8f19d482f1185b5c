//! Leptos component wrapping the prerequisite tree canvas.
//!
//! The component creates an HTML canvas element and wires up mouse handlers
//! for node dragging and click-to-navigate. Presses and hover are read from
//! the canvas; once a drag starts, moves and releases come from the window. An animation loop runs via
//! `requestAnimationFrame`, stepping the layout simulation each frame; the
//! renderer is attached to the simulation as a tick listener, so frames where
//! the layout is idle cost nothing.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::ev;
use leptos::prelude::*;
use log::error;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent};

use super::config::TreeConfig;
use super::graph::CourseGraph;
use super::render::{Renderer, draw_on_tick};
use super::state::{DragOutcome, TreeState, client_to_canvas};
use super::theme::Theme;
use super::types::CourseMap;

/// Renders an interactive prerequisite tree on a canvas element.
///
/// The graph is built once from `data` when the canvas mounts. The canvas
/// drawing surface is sized from the node count and scaled by CSS to the
/// container width.
#[component]
pub fn PrereqTreeCanvas(
	#[prop(into)] data: Signal<CourseMap>,
	#[prop(optional)] config: TreeConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<TreeState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init) = (state.clone(), animate.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			error!("prereq-tree: no window to animate in");
			return;
		};

		let graph = CourseGraph::build(&data.get_untracked());
		let mut tree = TreeState::new(&graph, config.clone());
		canvas.set_width(tree.width() as u32);
		canvas.set_height(tree.height() as u32);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => {
					error!("prereq-tree: 2d context has an unexpected type");
					return;
				}
			},
			_ => {
				error!("prereq-tree: canvas 2d context unavailable");
				return;
			}
		};

		let renderer = Renderer::new(
			ctx,
			Theme::from_name(config.theme),
			tree.bounds,
			config.node_radius,
			config.arrow_size,
			graph.root_flags(),
		);
		let bounds = tree.bounds;
		draw_on_tick(&mut tree.simulation, bounds, move |nodes, links| {
			renderer.draw(nodes, links)
		});
		*state_init.borrow_mut() = Some(tree);

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut tree) = *state_anim.borrow_mut() {
				tree.step();
			}
			if let (Some(cb), Some(window)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let pointer = pointer_position(&canvas, &ev);

		if let Some(ref mut tree) = *state_md.borrow_mut() {
			if let Some(idx) = tree.node_at(pointer.0, pointer.1) {
				ev.prevent_default();
				tree.drag_start(idx, pointer);
				set_cursor(&canvas, "grab");
			}
		}
	};

	let state_hover = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let pointer = pointer_position(&canvas, &ev);

		if let Some(ref tree) = *state_hover.borrow() {
			if !tree.drag.is_active() {
				let over = tree.node_at(pointer.0, pointer.1).is_some();
				set_cursor(&canvas, hover_cursor(over));
			}
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		let dragging = matches!(*state_ml.borrow(), Some(ref tree) if tree.drag.is_active());
		if let (false, Some(canvas)) = (dragging, canvas_ref.get()) {
			let canvas: HtmlCanvasElement = canvas.into();
			set_cursor(&canvas, hover_cursor(false));
		}
	};

	// A drag keeps following the pointer outside the canvas, so moves and
	// releases are taken from the window.
	let state_wm = state.clone();
	let _ = window_event_listener(ev::mousemove, move |ev| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		if let Some(ref mut tree) = *state_wm.borrow_mut() {
			if tree.drag.is_active() {
				tree.drag_move(pointer_position(&canvas, &ev));
			}
		}
	});

	let state_wu = state.clone();
	let _ = window_event_listener(ev::mouseup, move |ev| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let pointer = pointer_position(&canvas, &ev);

		let (outcome, over) = match *state_wu.borrow_mut() {
			Some(ref mut tree) if tree.drag.is_active() => {
				(tree.drag_end(), tree.node_at(pointer.0, pointer.1).is_some())
			}
			_ => return,
		};
		set_cursor(&canvas, hover_cursor(over));
		if let DragOutcome::Click(id) = outcome {
			navigate_to_course(&id);
		}
	});

	// No mouseup arrives once the page loses focus mid-drag.
	let state_wb = state.clone();
	let _ = window_event_listener(ev::blur, move |_| {
		if let Some(ref mut tree) = *state_wb.borrow_mut() {
			tree.drag_cancel();
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="prereq-tree-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
			style="display: block; width: 100%; height: auto; cursor: default;"
		/>
	}
}

/// Pointer position in canvas drawing coordinates.
fn pointer_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	client_to_canvas(
		(ev.client_x() as f64, ev.client_y() as f64),
		(rect.left(), rect.top(), rect.width(), rect.height()),
		(canvas.width() as f64, canvas.height() as f64),
	)
}

fn set_cursor(canvas: &HtmlCanvasElement, cursor: &str) {
	let _ = HtmlElement::style(canvas).set_property("cursor", cursor);
}

/// Cursor shown while no drag is in progress.
fn hover_cursor(over_node: bool) -> &'static str {
	if over_node { "pointer" } else { "default" }
}

/// Detail page of a course, relative to the current page.
fn course_url(id: &str) -> String {
	format!("course/{id}")
}

fn navigate_to_course(id: &str) {
	let Some(window) = web_sys::window() else {
		return;
	};
	if let Err(e) = window.location().set_href(&course_url(id)) {
		error!("prereq-tree: navigation to {} failed: {:?}", id, e);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_course_url_is_relative() {
		assert_eq!(course_url("CS300"), "course/CS300");
		assert_eq!(course_url("MAT 135"), "course/MAT 135");
	}

	#[test]
	fn test_hover_cursor() {
		assert_eq!(hover_cursor(true), "pointer");
		assert_eq!(hover_cursor(false), "default");
	}
}
