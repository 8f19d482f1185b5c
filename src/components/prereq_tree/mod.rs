//! Interactive prerequisite tree visualization.
//!
//! Renders a course dependency mapping as a force-directed graph on an HTML
//! canvas with:
//! - Physics-based node positioning (link, collision and centering forces)
//! - Node dragging that pins the node and reheats the layout
//! - Root courses (nothing depends on them) highlighted
//! - Click-to-navigate to `course/<id>`
//!
//! # Example
//!
//! ```ignore
//! use prereq_tree::{CourseMap, PrereqTreeCanvas};
//!
//! let data = CourseMap::from_json(r#"{"CS100": [], "CS200": ["CS100"]}"#)?;
//!
//! view! { <PrereqTreeCanvas data=Signal::derive(move || data.clone()) /> }
//! ```

mod component;
mod config;
mod forces;
mod graph;
mod render;
mod simulation;
mod state;
mod theme;
mod types;

pub use component::PrereqTreeCanvas;
pub use config::{CanvasSizing, TreeConfig};
pub use graph::{CourseGraph, Edge, Node};
pub use render::{Bounds, draw_on_tick};
pub use simulation::{Link, Simulation, SimulationParameters};
pub use state::{DragOutcome, DragState, TreeState, client_to_canvas};
pub use theme::{Color, EdgeStyle, NodeStyle, Theme, ThemeName};
pub use types::{CourseId, CourseMap};
