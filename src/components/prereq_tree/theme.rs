//! Visual theming for the prerequisite tree.

use serde::Deserialize;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with opacity.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	/// CSS `rgba()` string.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Edge visual style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Line and arrowhead color
	pub color: Color,
	/// Line width.
	pub width: f64,
}

/// Node visual style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Fill for root courses (nothing points at them)
	pub root_fill: Color,
	/// Fill for every other course
	pub fill: Color,
	/// How much darker the outline is than the fill (0 = no outline)
	pub border_darken: f64,
	/// Border line width; 0 disables the border.
	pub border_width: f64,
	/// Label text color.
	pub label_color: Color,
	/// Label font size as a fraction of the node radius
	pub label_scale: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Theme name.
	pub name: &'static str,
	/// Canvas fill; `None` leaves the page background showing through.
	pub background: Option<Color>,
	/// Edge and arrowhead style.
	pub edge: EdgeStyle,
	/// Node circle and label style.
	pub node: NodeStyle,
}

/// Theme selector used by the page configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
	/// Light theme.
	#[default]
	Classic,
	/// Dark theme.
	Dark,
}

impl Theme {
	/// Light theme matching the course site: red roots, grey courses.
	pub fn classic() -> Self {
		Self {
			name: "classic",
			background: None,
			edge: EdgeStyle {
				color: Color::rgb(153, 153, 153),
				width: 1.5,
			},
			node: NodeStyle {
				root_fill: Color::rgb(255, 0, 0),
				fill: Color::rgb(204, 204, 204),
				border_darken: 0.0,
				border_width: 0.0,
				label_color: Color::rgb(0, 0, 0),
				label_scale: 0.4,
			},
		}
	}

	/// Dark theme for pages rendered with `data-theme="dark"`.
	pub fn dark() -> Self {
		Self {
			name: "dark",
			background: Some(Color::rgb(22, 27, 34)),
			edge: EdgeStyle {
				color: Color::rgba(140, 160, 180, 0.6),
				width: 1.5,
			},
			node: NodeStyle {
				root_fill: Color::rgb(233, 69, 96),
				fill: Color::rgb(74, 85, 104),
				border_darken: 0.3,
				border_width: 1.5,
				label_color: Color::rgb(240, 240, 240),
				label_scale: 0.4,
			},
		}
	}

	/// Theme for a configured name.
	pub fn from_name(name: ThemeName) -> Self {
		match name {
			ThemeName::Classic => Self::classic(),
			ThemeName::Dark => Self::dark(),
		}
	}

	/// Fill color for a node, decided by whether it is a root.
	pub fn node_fill(&self, is_root: bool) -> Color {
		if is_root {
			self.node.root_fill
		} else {
			self.node.fill
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::classic()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_to_css() {
		assert_eq!(Color::rgb(255, 0, 0).to_css(), "#ff0000");
		assert_eq!(Color::rgb(204, 204, 204).to_css(), "#cccccc");
		assert_eq!(Color::rgba(1, 2, 3, 0.5).to_css(), "rgba(1, 2, 3, 0.5)");
	}

	#[test]
	fn test_darken() {
		assert_eq!(Color::rgb(200, 100, 50).darken(0.5), Color::rgb(100, 50, 25));
		assert_eq!(Color::rgb(200, 100, 50).darken(0.0), Color::rgb(200, 100, 50));
		assert_eq!(Color::rgb(200, 100, 50).darken(2.0), Color::rgb(0, 0, 0));
	}

	#[test]
	fn test_root_fill_differs() {
		for theme in [Theme::classic(), Theme::dark()] {
			assert_ne!(theme.node_fill(true), theme.node_fill(false), "{}", theme.name);
		}
		assert_eq!(Theme::default().node_fill(true).to_css(), "#ff0000");
		assert_eq!(Theme::default().node_fill(false).to_css(), "#cccccc");
	}

	#[test]
	fn test_from_name() {
		assert_eq!(Theme::from_name(ThemeName::Classic).name, "classic");
		assert_eq!(Theme::from_name(ThemeName::Dark).name, "dark");
	}
}
