//! Tree controller: simulation plus drag interaction.
//!
//! Created once when the component mounts. Pointer handlers call the drag
//! methods; the animation loop calls [`TreeState::step`].

use log::info;

use super::config::TreeConfig;
use super::graph::CourseGraph;
use super::render::Bounds;
use super::simulation::Simulation;
use super::types::CourseId;

/// Tracks an in-progress node drag.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	/// Index of the dragged node.
	pub node_idx: Option<usize>,
	/// Node position minus pointer position at drag start.
	offset: (f64, f64),
	start: (f64, f64),
	moved: bool,
}

impl DragState {
	/// Whether a node is being dragged.
	pub fn is_active(&self) -> bool {
		self.node_idx.is_some()
	}
}

/// What a finished press on a node amounted to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragOutcome {
	/// Released without moving: navigate to the course.
	Click(CourseId),
	/// The node was dragged somewhere.
	Moved,
	/// No drag was in progress.
	Idle,
}

/// Layout simulation with drag interaction state.
pub struct TreeState {
	/// Layout engine.
	pub simulation: Simulation,
	/// Drag in progress, if any.
	pub drag: DragState,
	/// Canvas bounds nodes are clamped to.
	pub bounds: Bounds,
	/// Configuration the tree was built with.
	pub config: TreeConfig,
}

impl TreeState {
	/// Start a running layout for `graph` on a canvas sized by node count.
	pub fn new(graph: &CourseGraph, config: TreeConfig) -> Self {
		let size = config.canvas_size(graph.node_count());
		let simulation = Simulation::new(
			graph.nodes().to_vec(),
			graph.links(),
			config.simulation_parameters(size, size),
		);
		info!(
			"prereq-tree: {} courses, {} edges, {}x{} canvas",
			graph.node_count(),
			graph.edge_count(),
			size,
			size
		);

		Self {
			simulation,
			drag: DragState::default(),
			bounds: Bounds::new(size, size, config.padding),
			config,
		}
	}

	/// Canvas width.
	pub fn width(&self) -> f64 {
		self.bounds.width
	}

	/// Canvas height.
	pub fn height(&self) -> f64 {
		self.bounds.height
	}

	/// Node under a canvas-space point, if any.
	pub fn node_at(&self, x: f64, y: f64) -> Option<usize> {
		self.simulation.find(x, y, self.config.node_radius)
	}

	/// Pin a node where it is and reheat the layout.
	pub fn drag_start(&mut self, idx: usize, pointer: (f64, f64)) {
		let Some(node) = self.simulation.node_mut(idx) else {
			return;
		};
		node.pin(node.x, node.y);
		let offset = (node.x - pointer.0, node.y - pointer.1);

		if !self.drag.is_active() {
			self.simulation
				.set_alpha_target(self.config.drag_alpha_target);
			self.simulation.restart();
		}
		self.drag = DragState {
			node_idx: Some(idx),
			offset,
			start: pointer,
			moved: false,
		};
	}

	/// Move the pinned node so it follows the pointer.
	pub fn drag_move(&mut self, pointer: (f64, f64)) {
		let Some(idx) = self.drag.node_idx else {
			return;
		};
		let (dx, dy) = (pointer.0 - self.drag.start.0, pointer.1 - self.drag.start.1);
		let limit = self.config.click_distance;
		if dx * dx + dy * dy > limit * limit {
			self.drag.moved = true;
		}

		let (x, y) = (pointer.0 + self.drag.offset.0, pointer.1 + self.drag.offset.1);
		if let Some(node) = self.simulation.node_mut(idx) {
			node.pin(x, y);
		}
	}

	/// Release the dragged node and let the layout cool down.
	pub fn drag_end(&mut self) -> DragOutcome {
		let Some(idx) = self.release() else {
			return DragOutcome::Idle;
		};
		if self.drag.moved {
			return DragOutcome::Moved;
		}
		match self.simulation.node(idx) {
			Some(node) => DragOutcome::Click(node.id.clone()),
			None => DragOutcome::Moved,
		}
	}

	/// Release without ever counting as a click (the page lost focus).
	pub fn drag_cancel(&mut self) {
		self.release();
	}

	fn release(&mut self) -> Option<usize> {
		let idx = self.drag.node_idx.take()?;
		self.simulation.set_alpha_target(0.0);
		if let Some(node) = self.simulation.node_mut(idx) {
			node.unpin();
		}
		Some(idx)
	}

	/// Advance the layout if it is running; see [`Simulation::step`].
	pub fn step(&mut self) -> bool {
		self.simulation.step()
	}
}

/// Map a client-space pointer position onto the canvas coordinate system.
///
/// The canvas is scaled by CSS to fit its container, so the displayed rect
/// (`left, top, width, height`) can differ from the drawing surface size.
pub fn client_to_canvas(
	client: (f64, f64),
	rect: (f64, f64, f64, f64),
	canvas: (f64, f64),
) -> (f64, f64) {
	let (left, top, width, height) = rect;
	let sx = if width > 0.0 { canvas.0 / width } else { 1.0 };
	let sy = if height > 0.0 { canvas.1 / height } else { 1.0 };
	((client.0 - left) * sx, (client.1 - top) * sy)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::prereq_tree::render::draw_on_tick;
	use crate::components::prereq_tree::types::CourseMap;

	fn chain_state() -> TreeState {
		let map =
			CourseMap::from_json(r#"{"CS100": [], "CS200": ["CS100"], "CS300": ["CS200"]}"#)
				.unwrap();
		TreeState::new(&CourseGraph::build(&map), TreeConfig::default())
	}

	fn position(state: &TreeState, idx: usize) -> (f64, f64) {
		let node = state.simulation.node(idx).unwrap();
		(node.x, node.y)
	}

	#[test]
	fn test_canvas_size_follows_node_count() {
		let state = chain_state();
		assert_eq!((state.width(), state.height()), (500.0, 500.0));

		let map: CourseMap = (0..31).map(|i| (format!("C{i}"), Vec::<String>::new())).collect();
		let state = TreeState::new(&CourseGraph::build(&map), TreeConfig::default());
		assert_eq!((state.width(), state.height()), (1000.0, 1000.0));
	}

	#[test]
	fn test_drag_start_pins_and_reheats() {
		let mut state = chain_state();
		while state.step() {}
		assert!(!state.simulation.is_running());

		let here = position(&state, 1);
		state.drag_start(1, here);
		let node = state.simulation.node(1).unwrap();
		assert_eq!((node.fixed_x, node.fixed_y), (Some(here.0), Some(here.1)));
		assert!(state.simulation.is_running());
		assert_eq!(state.simulation.alpha_target(), 0.3);
		assert!(state.drag.is_active());
	}

	#[test]
	fn test_drag_to_inside_point() {
		let mut state = chain_state();
		let bounds = state.bounds;
		draw_on_tick(&mut state.simulation, bounds, |_, _| {});

		let here = position(&state, 1);
		state.drag_start(1, here);
		state.drag_move((50.0, 50.0));
		state.step();
		assert_eq!(position(&state, 1), (50.0, 50.0));
	}

	#[test]
	fn test_drag_outside_is_clamped() {
		let mut state = chain_state();
		let bounds = state.bounds;
		draw_on_tick(&mut state.simulation, bounds, |_, _| {});

		let here = position(&state, 1);
		state.drag_start(1, here);
		state.drag_move((-10.0, -10.0));
		state.step();
		assert_eq!(position(&state, 1), (30.0, 30.0));
		// The pin itself follows the pointer; only the drawn position is clamped.
		assert_eq!(state.simulation.node(1).unwrap().fixed_x, Some(-10.0));
	}

	#[test]
	fn test_drag_continues_past_canvas_edge() {
		let mut state = chain_state();
		let bounds = state.bounds;
		draw_on_tick(&mut state.simulation, bounds, |_, _| {});

		// 500px canvas shown at 250px with its top-left corner at (100, 100).
		let rect = (100.0, 100.0, 250.0, 250.0);
		let canvas = (state.width(), state.height());
		let (x, y) = position(&state, 1);
		let grab = client_to_canvas((100.0 + x / 2.0, 100.0 + y / 2.0), rect, canvas);
		state.drag_start(1, grab);

		// Pointer released well outside the element, up and to the left.
		let outside = client_to_canvas((95.0, 95.0), rect, canvas);
		assert!((outside.0 + 10.0).abs() < 1e-9 && (outside.1 + 10.0).abs() < 1e-9);
		state.drag_move(outside);
		state.step();

		assert!(state.drag.is_active());
		assert_eq!(position(&state, 1), (30.0, 30.0));
		assert_eq!(state.drag_end(), DragOutcome::Moved);
	}

	#[test]
	fn test_drag_keeps_grab_offset() {
		let mut state = chain_state();
		let (x, y) = position(&state, 0);
		state.drag_start(0, (x + 5.0, y - 3.0));
		state.drag_move((200.0, 200.0));
		let node = state.simulation.node(0).unwrap();
		let (fx, fy) = (node.fixed_x.unwrap(), node.fixed_y.unwrap());
		assert!((fx - 195.0).abs() < 1e-9 && (fy - 203.0).abs() < 1e-9);
	}

	#[test]
	fn test_drag_end_unpins_and_cools() {
		let mut state = chain_state();
		let here = position(&state, 1);
		state.drag_start(1, here);
		state.drag_move((here.0 + 40.0, here.1));
		for _ in 0..20 {
			state.step();
		}

		assert_eq!(state.drag_end(), DragOutcome::Moved);
		let node = state.simulation.node(1).unwrap();
		assert!(!node.is_pinned());
		assert_eq!(state.simulation.alpha_target(), 0.0);
		assert!(!state.drag.is_active());

		let before = state.simulation.alpha();
		state.step();
		assert!(state.simulation.alpha() < before);
	}

	#[test]
	fn test_press_without_move_is_click() {
		let mut state = chain_state();
		let here = position(&state, 2);
		state.drag_start(2, here);
		state.drag_move(here);
		assert_eq!(state.drag_end(), DragOutcome::Click("CS300".to_string()));
	}

	#[test]
	fn test_click_distance_tolerance() {
		let mut state = chain_state();
		state.config.click_distance = 3.0;
		let here = position(&state, 0);
		state.drag_start(0, here);
		state.drag_move((here.0 + 2.0, here.1));
		assert_eq!(state.drag_end(), DragOutcome::Click("CS100".to_string()));

		state.drag_start(0, here);
		state.drag_move((here.0 + 4.0, here.1));
		assert_eq!(state.drag_end(), DragOutcome::Moved);
	}

	#[test]
	fn test_drag_cancel_never_clicks() {
		let mut state = chain_state();
		let here = position(&state, 0);
		state.drag_start(0, here);
		state.drag_cancel();
		assert!(!state.simulation.node(0).unwrap().is_pinned());
		assert_eq!(state.drag_end(), DragOutcome::Idle);
	}

	#[test]
	fn test_drag_without_start_is_ignored() {
		let mut state = chain_state();
		let before = position(&state, 0);
		state.drag_move((10.0, 10.0));
		assert_eq!(position(&state, 0), before);
		assert_eq!(state.drag_end(), DragOutcome::Idle);
	}

	#[test]
	fn test_node_at() {
		let mut state = chain_state();
		for i in 0..3 {
			state.simulation.node_mut(i).unwrap().x = 100.0 + 100.0 * i as f64;
			state.simulation.node_mut(i).unwrap().y = 100.0;
		}
		assert_eq!(state.node_at(210.0, 90.0), Some(1));
		assert_eq!(state.node_at(100.0, 129.0), Some(0));
		assert_eq!(state.node_at(100.0, 131.0), None);
	}

	#[test]
	fn test_client_to_canvas() {
		// 500px canvas shown at 250px, offset by (10, 20).
		let p = client_to_canvas((135.0, 70.0), (10.0, 20.0, 250.0, 250.0), (500.0, 500.0));
		assert_eq!(p, (250.0, 100.0));
		// Unscaled.
		let p = client_to_canvas((50.0, 60.0), (0.0, 0.0, 500.0, 500.0), (500.0, 500.0));
		assert_eq!(p, (50.0, 60.0));
		// Zero-size rect falls back to an unscaled offset.
		let p = client_to_canvas((50.0, 60.0), (10.0, 10.0, 0.0, 0.0), (500.0, 500.0));
		assert_eq!(p, (40.0, 50.0));
	}
}
