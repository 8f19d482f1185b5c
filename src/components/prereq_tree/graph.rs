//! Course graph built from the page's adjacency mapping.
//!
//! Built once per page load. Edges are kept exactly as listed in the mapping;
//! resolving them to node indices for the simulation happens in [`CourseGraph::links`].

use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use super::simulation::Link;
use super::types::{CourseId, CourseMap};

/// A course in the graph.
///
/// Positions belong to the simulation while it runs; `fixed_x`/`fixed_y`
/// override them while the node is pinned by a drag.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	/// Course identifier, also drawn as the label.
	pub id: CourseId,
	/// Horizontal position in canvas coordinates.
	pub x: f64,
	/// Vertical position in canvas coordinates.
	pub y: f64,
	/// Pinned horizontal position.
	pub fixed_x: Option<f64>,
	/// Pinned vertical position.
	pub fixed_y: Option<f64>,
}

impl Node {
	/// Unpinned node at the origin.
	pub fn new(id: impl Into<CourseId>) -> Self {
		Self {
			id: id.into(),
			x: 0.0,
			y: 0.0,
			fixed_x: None,
			fixed_y: None,
		}
	}

	/// Whether a drag currently pins the node.
	pub fn is_pinned(&self) -> bool {
		self.fixed_x.is_some() || self.fixed_y.is_some()
	}

	/// Pin the node at `(x, y)`.
	pub fn pin(&mut self, x: f64, y: f64) {
		self.fixed_x = Some(x);
		self.fixed_y = Some(y);
	}

	/// Release the pin.
	pub fn unpin(&mut self) {
		self.fixed_x = None;
		self.fixed_y = None;
	}
}

/// A directed edge from a course to a course listed under it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge {
	/// Course whose list contains `target`.
	pub source: CourseId,
	/// Listed course; may be missing from the node set.
	pub target: CourseId,
}

/// Nodes, edges and root set of a prerequisite tree.
#[derive(Clone, Debug, Default)]
pub struct CourseGraph {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	roots: HashSet<CourseId>,
	id_to_index: HashMap<CourseId, usize>,
}

impl CourseGraph {
	/// Build the graph: one node per key, one edge per listed course.
	///
	/// Roots are nodes that no edge points at.
	pub fn build(map: &CourseMap) -> Self {
		let nodes: Vec<Node> = map.iter().map(|(id, _)| Node::new(id.clone())).collect();
		let edges: Vec<Edge> = map
			.iter()
			.flat_map(|(source, targets)| {
				targets.iter().map(move |target| Edge {
					source: source.clone(),
					target: target.clone(),
				})
			})
			.collect();

		let targets: HashSet<&CourseId> = edges.iter().map(|e| &e.target).collect();
		let roots = nodes
			.iter()
			.filter(|n| !targets.contains(&n.id))
			.map(|n| n.id.clone())
			.collect();

		// Later duplicates win, matching what a JSON object would keep.
		let id_to_index = nodes
			.iter()
			.enumerate()
			.map(|(i, node)| (node.id.clone(), i))
			.collect();

		Self {
			nodes,
			edges,
			roots,
			id_to_index,
		}
	}

	/// Number of courses.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Number of listed links, dangling ones included.
	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	/// Nodes in mapping order.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// Edges in mapping order.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Index of the node with this id.
	pub fn node_index(&self, id: &str) -> Option<usize> {
		self.id_to_index.get(id).copied()
	}

	/// Whether no edge points at `id`.
	pub fn is_root(&self, id: &str) -> bool {
		self.roots.contains(id)
	}

	/// Ids of all root courses.
	pub fn roots(&self) -> &HashSet<CourseId> {
		&self.roots
	}

	/// Root flag per node, in node order.
	pub fn root_flags(&self) -> Vec<bool> {
		self.nodes.iter().map(|n| self.is_root(&n.id)).collect()
	}

	/// Resolve edges to node indices for the simulation.
	///
	/// Edges whose target is not a node, and self-loops, are left out: they
	/// stay in [`edges`](Self::edges) but are neither simulated nor drawn.
	pub fn links(&self) -> Vec<Link> {
		let mut dangling = 0;
		let mut self_loops = 0;
		let links = self
			.edges
			.iter()
			.filter_map(|edge| {
				let source = self.node_index(&edge.source)?;
				let Some(target) = self.node_index(&edge.target) else {
					dangling += 1;
					return None;
				};
				if source == target {
					self_loops += 1;
					return None;
				}
				Some(Link { source, target })
			})
			.collect();

		if dangling > 0 {
			warn!(
				"prereq-tree: skipping {} edge(s) to courses outside the tree",
				dangling
			);
		}
		if self_loops > 0 {
			debug!("prereq-tree: skipping {} self-referencing edge(s)", self_loops);
		}
		links
	}
}
