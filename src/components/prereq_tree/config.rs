//! Layout and sizing configuration.
//!
//! Every field has a default, so the page may embed a partial JSON object
//! (`<script id="tree-config">`) overriding only what it needs.

use serde::Deserialize;

use super::simulation::SimulationParameters;
use super::theme::ThemeName;

/// Canvas size selection by node count.
///
/// Dense trees get a larger square canvas so the forces have room to spread
/// nodes out before the bounds squeeze them.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct CanvasSizing {
	/// Largest node count that still uses the small canvas.
	pub threshold: usize,
	/// Side length of the small canvas.
	pub small: f64,
	/// Side length of the large canvas.
	pub large: f64,
}

impl Default for CanvasSizing {
	fn default() -> Self {
		Self {
			threshold: 30,
			small: 500.0,
			large: 1000.0,
		}
	}
}

/// Complete configuration for the tree visualization.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct TreeConfig {
	/// Node circle radius.
	pub node_radius: f64,
	/// Minimum distance kept between node centers and the canvas edges.
	pub padding: f64,
	/// Arrowhead length.
	pub arrow_size: f64,
	/// Target separation of linked nodes.
	pub link_distance: f64,
	/// Collision radius as a multiple of `node_radius`.
	pub collision_multiplier: f64,
	/// Alpha the simulation is reheated toward while a node is dragged.
	pub drag_alpha_target: f64,
	/// Pointer travel beyond which a press on a node is a drag, not a click.
	pub click_distance: f64,
	/// Canvas size selection by node count.
	pub canvas: CanvasSizing,
	/// Colour scheme.
	pub theme: ThemeName,
}

impl Default for TreeConfig {
	fn default() -> Self {
		Self {
			node_radius: 30.0,
			padding: 30.0,
			arrow_size: 8.0,
			link_distance: 100.0,
			collision_multiplier: 1.8,
			drag_alpha_target: 0.3,
			click_distance: 0.0,
			canvas: CanvasSizing::default(),
			theme: ThemeName::default(),
		}
	}
}

impl TreeConfig {
	/// Parse a (possibly partial) configuration from JSON.
	pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(text)
	}

	/// Side length of the square canvas for a graph of `node_count` nodes.
	pub fn canvas_size(&self, node_count: usize) -> f64 {
		if node_count <= self.canvas.threshold {
			self.canvas.small
		} else {
			self.canvas.large
		}
	}

	/// Collision radius per node.
	pub fn collision_radius(&self) -> f64 {
		self.node_radius * self.collision_multiplier
	}

	/// Simulation parameters for a canvas of the given size.
	pub fn simulation_parameters(&self, width: f64, height: f64) -> SimulationParameters {
		SimulationParameters {
			link_distance: self.link_distance,
			collision_radius: self.collision_radius(),
			center: (width / 2.0, height / 2.0),
			..SimulationParameters::default()
		}
	}
}
