//! Force-directed layout simulation.
//!
//! An iterative relaxation in the style of d3-force: each tick cools `alpha`
//! toward `alpha_target`, applies the link, collision and centering forces to
//! node velocities, then integrates positions. Pinned nodes snap to their
//! fixed position but keep pushing and pulling their neighbours.
//!
//! The simulation is driven externally: the component calls [`Simulation::step`]
//! once per animation frame. Each step that actually ticks notifies the
//! registered tick listeners with the updated nodes.

use std::f64::consts::PI;

use log::debug;

use super::forces::{CenterForce, CollideForce, Lcg, LinkForce, Velocity};
use super::graph::Node;

/// A resolved edge between two node indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Link {
	/// Index of the source node.
	pub source: usize,
	/// Index of the target node.
	pub target: usize,
}

/// Tunables for the simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationParameters {
	/// The simulation goes idle once alpha drops below this.
	pub alpha_min: f64,
	/// Fraction of the gap to `alpha_target` closed per tick.
	pub alpha_decay: f64,
	/// Fraction of velocity lost per tick.
	pub velocity_decay: f64,
	/// Target separation for linked nodes.
	pub link_distance: f64,
	/// Collision radius per node; pairs closer than twice this repel.
	pub collision_radius: f64,
	/// Point the node centroid is pulled to.
	pub center: (f64, f64),
}

impl Default for SimulationParameters {
	fn default() -> Self {
		let alpha_min: f64 = 0.001;
		Self {
			alpha_min,
			// Reaches alpha_min from 1.0 in ~300 ticks.
			alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
			velocity_decay: 0.4,
			link_distance: 100.0,
			collision_radius: 30.0 * 1.8,
			center: (250.0, 250.0),
		}
	}
}

type TickListener = Box<dyn FnMut(&mut [Node], &[Link])>;

/// Radius of the first node on the initial spiral.
const INITIAL_RADIUS: f64 = 10.0;

/// Layout engine over a fixed set of nodes and links.
pub struct Simulation {
	nodes: Vec<Node>,
	velocities: Vec<Velocity>,
	links: Vec<Link>,
	link_force: LinkForce,
	collide_force: CollideForce,
	center_force: CenterForce,
	alpha: f64,
	alpha_target: f64,
	params: SimulationParameters,
	running: bool,
	random: Lcg,
	listeners: Vec<TickListener>,
}

impl Simulation {
	/// Create a running simulation.
	///
	/// Unpinned nodes are seeded on a phyllotaxis spiral around the center so
	/// that layouts are reproducible for the same input.
	pub fn new(mut nodes: Vec<Node>, links: Vec<Link>, params: SimulationParameters) -> Self {
		let golden_angle = PI * (3.0 - 5f64.sqrt());
		let (cx, cy) = params.center;
		for (i, node) in nodes.iter_mut().enumerate() {
			match (node.fixed_x, node.fixed_y) {
				(Some(x), Some(y)) => {
					node.x = x;
					node.y = y;
				}
				_ => {
					let radius = INITIAL_RADIUS * (0.5 + i as f64).sqrt();
					let angle = i as f64 * golden_angle;
					node.x = cx + radius * angle.cos();
					node.y = cy + radius * angle.sin();
				}
			}
		}

		let link_force = LinkForce::new(nodes.len(), &links, params.link_distance);
		let collide_force = CollideForce::new(params.collision_radius);
		let center_force = CenterForce::new(cx, cy);

		Self {
			velocities: vec![Velocity::default(); nodes.len()],
			nodes,
			links,
			link_force,
			collide_force,
			center_force,
			alpha: 1.0,
			alpha_target: 0.0,
			params,
			running: true,
			random: Lcg::new(1),
			listeners: Vec::new(),
		}
	}

	/// Register a listener called after every scheduled tick.
	///
	/// Listeners may rewrite node positions (the renderer clamps them).
	pub fn on_tick(&mut self, listener: impl FnMut(&mut [Node], &[Link]) + 'static) {
		self.listeners.push(Box::new(listener));
	}

	/// Advance the layout by one integration step without notifying listeners.
	pub fn tick(&mut self) {
		self.alpha += (self.alpha_target - self.alpha) * self.params.alpha_decay;

		self.link_force.apply(
			&self.nodes,
			&mut self.velocities,
			&self.links,
			self.alpha,
			&mut self.random,
		);
		self.collide_force
			.apply(&self.nodes, &mut self.velocities, &mut self.random);
		self.center_force.apply(&mut self.nodes);

		let keep = 1.0 - self.params.velocity_decay;
		for (node, v) in self.nodes.iter_mut().zip(self.velocities.iter_mut()) {
			match node.fixed_x {
				Some(fx) => {
					node.x = fx;
					v.vx = 0.0;
				}
				None => {
					v.vx *= keep;
					node.x += v.vx;
				}
			}
			match node.fixed_y {
				Some(fy) => {
					node.y = fy;
					v.vy = 0.0;
				}
				None => {
					v.vy *= keep;
					node.y += v.vy;
				}
			}
		}
	}

	/// Scheduled-callback entry point: tick and notify if running.
	///
	/// Returns whether a tick happened. Goes idle once alpha has cooled below
	/// `alpha_min`.
	pub fn step(&mut self) -> bool {
		if !self.running {
			return false;
		}

		self.tick();
		for listener in &mut self.listeners {
			listener(&mut self.nodes, &self.links);
		}

		if self.alpha < self.params.alpha_min {
			self.running = false;
			debug!("prereq-tree: layout settled");
		}
		true
	}

	/// Resume ticking after the simulation went idle.
	pub fn restart(&mut self) {
		if !self.running {
			debug!("prereq-tree: layout restarted");
		}
		self.running = true;
	}

	/// Stop ticking until [`restart`](Self::restart).
	pub fn stop(&mut self) {
		self.running = false;
	}

	/// Whether [`step`](Self::step) will tick.
	pub fn is_running(&self) -> bool {
		self.running
	}

	/// Current alpha.
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// Overwrite the current alpha.
	pub fn set_alpha(&mut self, alpha: f64) {
		self.alpha = alpha;
	}

	/// Alpha the simulation is cooling (or heating) toward.
	pub fn alpha_target(&self) -> f64 {
		self.alpha_target
	}

	/// Set the alpha to cool toward.
	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target;
	}

	/// Parameters the simulation was built with.
	pub fn parameters(&self) -> &SimulationParameters {
		&self.params
	}

	/// Current node positions.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// Node at `index`.
	pub fn node(&self, index: usize) -> Option<&Node> {
		self.nodes.get(index)
	}

	/// Mutable node at `index`, used to pin and move it.
	pub fn node_mut(&mut self, index: usize) -> Option<&mut Node> {
		self.nodes.get_mut(index)
	}

	/// Resolved links.
	pub fn links(&self) -> &[Link] {
		&self.links
	}

	/// Closest node to `(x, y)` within `radius`, if any.
	pub fn find(&self, x: f64, y: f64, radius: f64) -> Option<usize> {
		let mut best = None;
		let mut best_d2 = radius * radius;
		for (i, node) in self.nodes.iter().enumerate() {
			let (dx, dy) = (node.x - x, node.y - y);
			let d2 = dx * dx + dy * dy;
			if d2 < best_d2 {
				best_d2 = d2;
				best = Some(i);
			}
		}
		best
	}
}
