//! Canvas rendering for the prerequisite tree.
//!
//! Drawing hangs off the simulation through [`draw_on_tick`]: after every
//! tick each node is clamped into the padded canvas (the clamped position is
//! written back, so the simulation continues from there), then the frame is
//! drawn in z-order:
//! 1. Background
//! 2. Edge lines, then arrowheads
//! 3. Node circles, then labels

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::graph::Node;
use super::simulation::{Link, Simulation};
use super::theme::Theme;

/// Drawable area with a padding band nodes may not enter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	/// Canvas width.
	pub width: f64,
	/// Canvas height.
	pub height: f64,
	/// Band along each edge that node centers stay out of.
	pub padding: f64,
}

impl Bounds {
	/// Bounds of a `width` by `height` canvas.
	pub fn new(width: f64, height: f64, padding: f64) -> Self {
		Self {
			width,
			height,
			padding,
		}
	}

	/// Clamp a point to `[padding, dimension - padding]` on both axes.
	pub fn clamp(&self, x: f64, y: f64) -> (f64, f64) {
		(
			x.min(self.width - self.padding).max(self.padding),
			y.min(self.height - self.padding).max(self.padding),
		)
	}

	/// Clamp every node in place.
	pub fn clamp_nodes(&self, nodes: &mut [Node]) {
		for node in nodes {
			(node.x, node.y) = self.clamp(node.x, node.y);
		}
	}
}

/// Register `draw` to run after every tick on positions clamped into `bounds`.
pub fn draw_on_tick(
	simulation: &mut Simulation,
	bounds: Bounds,
	mut draw: impl FnMut(&[Node], &[Link]) + 'static,
) {
	simulation.on_tick(move |nodes, links| {
		bounds.clamp_nodes(nodes);
		draw(nodes, links);
	});
}

/// Triangle marking the target end of an edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrowHead {
	pub tip: (f64, f64),
	pub left: (f64, f64),
	pub right: (f64, f64),
}

/// Arrowhead for an edge from `from` to `to`, oriented along the edge.
///
/// The tip sits `node_radius + arrow_size` from the target center and the
/// base another `arrow_size` further back, so the arrow lands just outside
/// the target circle. Returns `None` for zero-length edges.
pub fn arrow_head(
	from: (f64, f64),
	to: (f64, f64),
	node_radius: f64,
	arrow_size: f64,
) -> Option<ArrowHead> {
	let (dx, dy) = (to.0 - from.0, to.1 - from.1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return None;
	}

	let (ux, uy) = (dx / dist, dy / dist);
	let tip_offset = node_radius + arrow_size;
	let base_offset = node_radius + 2.0 * arrow_size;
	let tip = (to.0 - ux * tip_offset, to.1 - uy * tip_offset);
	let (back_x, back_y) = (to.0 - ux * base_offset, to.1 - uy * base_offset);
	let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);

	Some(ArrowHead {
		tip,
		left: (back_x + px, back_y + py),
		right: (back_x - px, back_y - py),
	})
}

/// Draws the tree into a 2D canvas context.
///
/// Root flags are captured at construction and never re-evaluated.
pub struct Renderer {
	ctx: CanvasRenderingContext2d,
	theme: Theme,
	bounds: Bounds,
	node_radius: f64,
	arrow_size: f64,
	roots: Vec<bool>,
	label_font: String,
}

impl Renderer {
	pub fn new(
		ctx: CanvasRenderingContext2d,
		theme: Theme,
		bounds: Bounds,
		node_radius: f64,
		arrow_size: f64,
		roots: Vec<bool>,
	) -> Self {
		let label_font = format!("{}px sans-serif", node_radius * theme.node.label_scale);
		Self {
			ctx,
			theme,
			bounds,
			node_radius,
			arrow_size,
			roots,
			label_font,
		}
	}

	/// Redraw the whole canvas.
	pub fn draw(&self, nodes: &[Node], links: &[Link]) {
		self.draw_background();
		self.draw_edges(nodes, links);
		self.draw_nodes(nodes);
	}

	fn draw_background(&self) {
		let ctx = &self.ctx;
		ctx.clear_rect(0.0, 0.0, self.bounds.width, self.bounds.height);
		if let Some(color) = self.theme.background {
			ctx.set_fill_style_str(&color.to_css());
			ctx.fill_rect(0.0, 0.0, self.bounds.width, self.bounds.height);
		}
	}

	fn draw_edges(&self, nodes: &[Node], links: &[Link]) {
		let ctx = &self.ctx;
		let color = self.theme.edge.color.to_css();

		ctx.set_stroke_style_str(&color);
		ctx.set_line_width(self.theme.edge.width);
		ctx.begin_path();
		for link in links {
			let (s, t) = (&nodes[link.source], &nodes[link.target]);
			ctx.move_to(s.x, s.y);
			ctx.line_to(t.x, t.y);
		}
		ctx.stroke();

		ctx.set_fill_style_str(&color);
		for link in links {
			let (s, t) = (&nodes[link.source], &nodes[link.target]);
			let Some(arrow) = arrow_head((s.x, s.y), (t.x, t.y), self.node_radius, self.arrow_size)
			else {
				continue;
			};
			ctx.begin_path();
			ctx.move_to(arrow.tip.0, arrow.tip.1);
			ctx.line_to(arrow.left.0, arrow.left.1);
			ctx.line_to(arrow.right.0, arrow.right.1);
			ctx.close_path();
			ctx.fill();
		}
	}

	fn draw_nodes(&self, nodes: &[Node]) {
		let ctx = &self.ctx;
		let style = &self.theme.node;

		for (node, &is_root) in nodes.iter().zip(&self.roots) {
			let fill = self.theme.node_fill(is_root);

			ctx.begin_path();
			let _ = ctx.arc(node.x, node.y, self.node_radius, 0.0, 2.0 * PI);
			ctx.set_fill_style_str(&fill.to_css());
			ctx.fill();

			if style.border_width > 0.0 {
				ctx.set_stroke_style_str(&fill.darken(style.border_darken).to_css());
				ctx.set_line_width(style.border_width);
				ctx.stroke();
			}
		}

		ctx.set_font(&self.label_font);
		ctx.set_text_align("center");
		ctx.set_text_baseline("middle");
		ctx.set_fill_style_str(&style.label_color.to_css());
		for node in nodes {
			let _ = ctx.fill_text(&node.id, node.x, node.y);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn close(a: (f64, f64), b: (f64, f64)) -> bool {
		(a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
	}

	#[test]
	fn test_clamp_inside_is_unchanged() {
		let bounds = Bounds::new(500.0, 500.0, 30.0);
		assert_eq!(bounds.clamp(50.0, 50.0), (50.0, 50.0));
		assert_eq!(bounds.clamp(250.0, 470.0), (250.0, 470.0));
	}

	#[test]
	fn test_clamp_outside() {
		let bounds = Bounds::new(500.0, 500.0, 30.0);
		assert_eq!(bounds.clamp(-10.0, -10.0), (30.0, 30.0));
		assert_eq!(bounds.clamp(900.0, 10.0), (470.0, 30.0));
		assert_eq!(bounds.clamp(250.0, 1e9), (250.0, 470.0));
	}

	#[test]
	fn test_clamp_is_idempotent() {
		let bounds = Bounds::new(1000.0, 500.0, 30.0);
		let points = [
			(-50.0, -50.0),
			(0.0, 0.0),
			(30.0, 30.0),
			(512.3, 260.1),
			(999.0, 499.0),
			(2000.0, -3.0),
			(f64::MAX, f64::MIN),
		];
		for (x, y) in points {
			let once = bounds.clamp(x, y);
			assert_eq!(bounds.clamp(once.0, once.1), once, "({x}, {y})");
		}
	}

	#[test]
	fn test_clamp_nodes_writes_back() {
		let bounds = Bounds::new(500.0, 500.0, 30.0);
		let mut nodes = vec![Node::new("CS100"), Node::new("CS200")];
		(nodes[0].x, nodes[0].y) = (-10.0, 600.0);
		(nodes[1].x, nodes[1].y) = (100.0, 200.0);
		bounds.clamp_nodes(&mut nodes);
		assert_eq!((nodes[0].x, nodes[0].y), (30.0, 470.0));
		assert_eq!((nodes[1].x, nodes[1].y), (100.0, 200.0));
	}

	#[test]
	fn test_draw_on_tick_sees_clamped_positions() {
		use std::cell::RefCell;
		use std::rc::Rc;

		let mut node = Node::new("CS200");
		node.pin(-10.0, -10.0);
		let mut simulation = Simulation::new(vec![node], Vec::new(), Default::default());
		let drawn = Rc::new(RefCell::new(Vec::new()));
		let seen = drawn.clone();
		draw_on_tick(&mut simulation, Bounds::new(500.0, 500.0, 30.0), move |nodes, _| {
			seen.borrow_mut().push((nodes[0].x, nodes[0].y));
		});

		assert!(simulation.step());
		assert_eq!(*drawn.borrow(), vec![(30.0, 30.0)]);
		// Written back, while the pin itself is untouched.
		let node = simulation.node(0).unwrap();
		assert_eq!((node.x, node.y), (30.0, 30.0));
		assert_eq!(node.fixed_x, Some(-10.0));
	}

	#[test]
	fn test_arrow_head_horizontal() {
		let arrow = arrow_head((0.0, 0.0), (200.0, 0.0), 30.0, 8.0).unwrap();
		assert!(close(arrow.tip, (162.0, 0.0)));
		assert!(close(arrow.left, (154.0, 4.0)));
		assert!(close(arrow.right, (154.0, -4.0)));
	}

	#[test]
	fn test_arrow_head_points_at_target() {
		let from = (100.0, 100.0);
		let to = (100.0, 300.0);
		let arrow = arrow_head(from, to, 30.0, 8.0).unwrap();
		// Tip lies outside the target circle and closer to it than the base.
		let tip_dist = ((arrow.tip.0 - to.0).powi(2) + (arrow.tip.1 - to.1).powi(2)).sqrt();
		assert!((tip_dist - 38.0).abs() < 1e-9);
		assert!(arrow.left.1 < arrow.tip.1);
		assert!(arrow.right.1 < arrow.tip.1);
	}

	#[test]
	fn test_arrow_head_zero_length() {
		assert_eq!(arrow_head((5.0, 5.0), (5.0, 5.0), 30.0, 8.0), None);
	}
}
