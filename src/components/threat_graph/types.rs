use std::collections::BTreeMap;
use std::fmt;

/// A point or delta in either screen or canvas space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate.
	pub y: f64,
}

impl Point {
	/// `(0, 0)`.
	pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

	/// Builds a point from its coordinates.
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// This point moved by `(dx, dy)`.
	pub fn offset(self, dx: f64, dy: f64) -> Self {
		Self::new(self.x + dx, self.y + dy)
	}

	/// Vector from `start` to this point.
	pub fn delta_from(self, start: Point) -> Point {
		Point::new(self.x - start.x, self.y - start.y)
	}

	/// Euclidean length when read as a vector.
	pub fn length(self) -> f64 {
		(self.x * self.x + self.y * self.y).sqrt()
	}
}

/// Width and height in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
	/// Horizontal extent.
	pub width: f64,
	/// Vertical extent.
	pub height: f64,
}

impl Size {
	/// Builds a size.
	pub fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}
}

/// Unique node identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
	/// Wraps an id string.
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	/// The raw id.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<&str> for NodeId {
	fn from(id: &str) -> Self {
		Self::new(id)
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Artifact category of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
	/// File on disk.
	File,
	/// Network endpoint or connection.
	Network,
	/// Registry key or value.
	Registry,
	/// Running process.
	Process,
	/// Detected threat.
	Threat,
	/// Operating system component.
	System,
}

impl NodeKind {
	/// Lower-case display name.
	pub fn name(self) -> &'static str {
		match self {
			NodeKind::File => "file",
			NodeKind::Network => "network",
			NodeKind::Registry => "registry",
			NodeKind::Process => "process",
			NodeKind::Threat => "threat",
			NodeKind::System => "system",
		}
	}

	/// Short tag drawn in the middle of the node.
	pub fn glyph(self) -> &'static str {
		match self {
			NodeKind::File => "FILE",
			NodeKind::Network => "NET",
			NodeKind::Registry => "REG",
			NodeKind::Process => "PROC",
			NodeKind::Threat => "!",
			NodeKind::System => "SYS",
		}
	}
}

/// Severity assigned to a node, ordered from least to most severe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RiskLevel {
	/// Benign or informational.
	Low,
	/// Worth a look.
	Medium,
	/// Likely malicious.
	High,
	/// Confirmed malicious.
	Critical,
}

impl RiskLevel {
	/// Lower-case display name.
	pub fn name(self) -> &'static str {
		match self {
			RiskLevel::Low => "low",
			RiskLevel::Medium => "medium",
			RiskLevel::High => "high",
			RiskLevel::Critical => "critical",
		}
	}

	/// Accent colour used for rings, edges and badges.
	pub fn color(self) -> &'static str {
		match self {
			RiskLevel::Critical => "hsl(0 84% 60%)",
			RiskLevel::High => "hsl(25 95% 53%)",
			RiskLevel::Medium => "hsl(45 93% 47%)",
			RiskLevel::Low => "hsl(142 76% 36%)",
		}
	}

	/// Same hue as [`RiskLevel::color`] with an alpha channel, for glows and badges.
	pub fn color_alpha(self, alpha: f64) -> String {
		let (h, s, l) = match self {
			RiskLevel::Critical => (0, 84, 60),
			RiskLevel::High => (25, 95, 53),
			RiskLevel::Medium => (45, 93, 47),
			RiskLevel::Low => (142, 76, 36),
		};
		format!("hsl({h} {s}% {l}% / {alpha})")
	}
}

/// Analysis findings attached to a node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeDetails {
	/// Free-text summary.
	pub description: String,
	/// Severity.
	pub risk: RiskLevel,
	/// Key/value facts, shown in key order.
	pub metadata: BTreeMap<String, String>,
}

/// One artifact in the graph.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	/// Unique id.
	pub id: NodeId,
	/// Artifact category.
	pub kind: NodeKind,
	/// Display label.
	pub label: String,
	/// Position in graph space.
	pub position: Point,
	/// Outgoing edges by target id, drawn alongside the explicit connections.
	pub connections: Vec<NodeId>,
	/// Findings shown in the summary panel and detail window.
	pub details: NodeDetails,
}

impl GraphNode {
	/// Label cut to 15 characters for drawing under the node.
	pub fn short_label(&self) -> String {
		const MAX: usize = 15;
		if self.label.chars().count() > MAX {
			let head: String = self.label.chars().take(MAX).collect();
			format!("{head}...")
		} else {
			self.label.clone()
		}
	}
}

/// Direction of a connection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionKind {
	/// Source to target.
	Direct,
	/// Both ways.
	Bidirectional,
}

/// An explicit edge between two nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphConnection {
	/// Unique connection id.
	pub id: String,
	/// Node the edge starts at.
	pub source: NodeId,
	/// Node the edge ends at.
	pub target: NodeId,
	/// Direction, if known.
	pub kind: Option<ConnectionKind>,
	/// Relative strength, if known.
	pub weight: Option<f64>,
}

/// Everything the view needs to draw an analysis.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	/// Nodes in draw order; later nodes sit on top.
	pub nodes: Vec<GraphNode>,
	/// Explicit edges.
	pub connections: Vec<GraphConnection>,
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(label: &str) -> GraphNode {
		GraphNode {
			id: NodeId::from("n"),
			kind: NodeKind::Registry,
			label: label.to_string(),
			position: Point::ORIGIN,
			connections: Vec::new(),
			details: NodeDetails {
				description: String::new(),
				risk: RiskLevel::High,
				metadata: BTreeMap::new(),
			},
		}
	}

	#[test]
	fn short_label_keeps_short_labels() {
		assert_eq!(node("TCP 443").short_label(), "TCP 443");
		assert_eq!(node("exactly15chars!").short_label(), "exactly15chars!");
	}

	#[test]
	fn short_label_truncates_long_labels() {
		let n = node("HKLM\\Software\\Microsoft\\Windows\\CurrentVersion\\Run");
		assert_eq!(n.short_label(), "HKLM\\Software\\M...");
	}

	#[test]
	fn delta_from_subtracts_start() {
		let d = Point::new(240.0, 170.0).delta_from(Point::new(200.0, 150.0));
		assert_eq!(d, Point::new(40.0, 20.0));
	}

	#[test]
	fn risk_colors_with_alpha_share_the_hue() {
		assert_eq!(RiskLevel::Critical.color_alpha(0.2), "hsl(0 84% 60% / 0.2)");
		assert!(RiskLevel::Low < RiskLevel::Critical);
	}
}
