//! Forces applied by the layout simulation each tick.
//!
//! All forces work on velocities except [`CenterForce`], which translates
//! positions directly. Link and collision forces look at next-step positions
//! (`x + vx`), which keeps the integration stable at high alpha.

use super::graph::Node;
use super::simulation::Link;

/// Per-node velocity, owned by the simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Velocity {
	pub vx: f64,
	pub vy: f64,
}

/// Deterministic linear congruential generator used to break ties
/// between coincident nodes.
#[derive(Clone, Debug)]
pub struct Lcg {
	state: u64,
}

impl Lcg {
	const A: u64 = 1_664_525;
	const C: u64 = 1_013_904_223;
	const M: u64 = 1 << 32;

	pub fn new(seed: u64) -> Self {
		Self { state: seed % Self::M }
	}

	/// Next value in `[0, 1)`.
	pub fn next_f64(&mut self) -> f64 {
		self.state = (Self::A * self.state + Self::C) % Self::M;
		self.state as f64 / Self::M as f64
	}

	/// A tiny non-zero offset.
	pub fn jiggle(&mut self) -> f64 {
		(self.next_f64() - 0.5) * 1e-6
	}
}

/// Spring force pulling linked nodes toward a target separation.
///
/// Strength is `1 / min(degree(source), degree(target))` so that hubs are
/// not dragged around by every neighbour; the correction is split between the
/// endpoints in proportion to their degree.
#[derive(Clone, Debug)]
pub struct LinkForce {
	distance: f64,
	strengths: Vec<f64>,
	biases: Vec<f64>,
}

impl LinkForce {
	pub fn new(node_count: usize, links: &[Link], distance: f64) -> Self {
		let mut degree = vec![0usize; node_count];
		for link in links {
			degree[link.source] += 1;
			degree[link.target] += 1;
		}

		let strengths = links
			.iter()
			.map(|l| 1.0 / degree[l.source].min(degree[l.target]) as f64)
			.collect();
		let biases = links
			.iter()
			.map(|l| {
				let (s, t) = (degree[l.source] as f64, degree[l.target] as f64);
				s / (s + t)
			})
			.collect();

		Self {
			distance,
			strengths,
			biases,
		}
	}

	pub fn apply(
		&self,
		nodes: &[Node],
		velocities: &mut [Velocity],
		links: &[Link],
		alpha: f64,
		random: &mut Lcg,
	) {
		for (i, link) in links.iter().enumerate() {
			let (s, t) = (link.source, link.target);
			let mut x = nodes[t].x + velocities[t].vx - nodes[s].x - velocities[s].vx;
			let mut y = nodes[t].y + velocities[t].vy - nodes[s].y - velocities[s].vy;
			if x == 0.0 {
				x = random.jiggle();
			}
			if y == 0.0 {
				y = random.jiggle();
			}

			let l = (x * x + y * y).sqrt();
			let l = (l - self.distance) / l * alpha * self.strengths[i];
			x *= l;
			y *= l;

			let b = self.biases[i];
			velocities[t].vx -= x * b;
			velocities[t].vy -= y * b;
			velocities[s].vx += x * (1.0 - b);
			velocities[s].vy += y * (1.0 - b);
		}
	}
}

/// Pushes apart nodes whose circles (of `radius`) overlap.
///
/// Pairwise, so O(n²) per tick; fine for the tens of nodes a course tree has.
#[derive(Clone, Debug)]
pub struct CollideForce {
	radius: f64,
	strength: f64,
}

impl CollideForce {
	pub fn new(radius: f64) -> Self {
		Self {
			radius,
			strength: 1.0,
		}
	}

	pub fn apply(&self, nodes: &[Node], velocities: &mut [Velocity], random: &mut Lcg) {
		let ri = self.radius;
		let rj = self.radius;
		let r = ri + rj;
		// Equal radii: each side takes half of the correction.
		let weight = (rj * rj) / (ri * ri + rj * rj);

		for i in 0..nodes.len() {
			let xi = nodes[i].x + velocities[i].vx;
			let yi = nodes[i].y + velocities[i].vy;

			for j in (i + 1)..nodes.len() {
				let mut x = xi - nodes[j].x - velocities[j].vx;
				let mut y = yi - nodes[j].y - velocities[j].vy;
				let mut l = x * x + y * y;
				if l >= r * r {
					continue;
				}
				if x == 0.0 {
					x = random.jiggle();
					l += x * x;
				}
				if y == 0.0 {
					y = random.jiggle();
					l += y * y;
				}

				let d = l.sqrt();
				let k = (r - d) / d * self.strength;
				x *= k;
				y *= k;

				velocities[i].vx += x * weight;
				velocities[i].vy += y * weight;
				velocities[j].vx -= x * (1.0 - weight);
				velocities[j].vy -= y * (1.0 - weight);
			}
		}
	}
}

/// Shifts all nodes so their centroid lands on a fixed point.
#[derive(Clone, Debug)]
pub struct CenterForce {
	pub x: f64,
	pub y: f64,
	strength: f64,
}

impl CenterForce {
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y, strength: 1.0 }
	}

	pub fn apply(&self, nodes: &mut [Node]) {
		if nodes.is_empty() {
			return;
		}
		let n = nodes.len() as f64;
		let (sx, sy) = nodes
			.iter()
			.fold((0.0, 0.0), |(sx, sy), node| (sx + node.x, sy + node.y));
		let dx = (sx / n - self.x) * self.strength;
		let dy = (sy / n - self.y) * self.strength;

		for node in nodes {
			node.x -= dx;
			node.y -= dy;
		}
	}
}
