mod component;
mod drag;
mod error;
mod overlays;
mod render;
mod session;
mod settings;
mod state;
mod store;
mod types;
mod viewport;
mod windows;

pub use component::ThreatGraphView;
pub use settings::GraphSettings;
pub use types::{
	ConnectionKind, GraphConnection, GraphData, GraphNode, NodeDetails, NodeId, NodeKind, Point,
	RiskLevel, Size,
};
