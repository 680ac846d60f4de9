//! Built-in sample analysis shown on the graph page.

use std::collections::BTreeMap;

use crate::components::threat_graph::{
	ConnectionKind, GraphConnection, GraphData, GraphNode, NodeDetails, NodeId, NodeKind, Point,
	RiskLevel,
};

fn metadata(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
	pairs
		.iter()
		.map(|(k, v)| (k.to_string(), v.to_string()))
		.collect()
}

#[allow(clippy::too_many_arguments)]
fn node(
	id: &str,
	kind: NodeKind,
	label: &str,
	(x, y): (f64, f64),
	connections: &[&str],
	description: &str,
	risk: RiskLevel,
	meta: &[(&str, &str)],
) -> GraphNode {
	GraphNode {
		id: NodeId::from(id),
		kind,
		label: label.to_string(),
		position: Point::new(x, y),
		connections: connections.iter().map(|c| NodeId::from(*c)).collect(),
		details: NodeDetails {
			description: description.to_string(),
			risk,
			metadata: metadata(meta),
		},
	}
}

fn direct(source: &str, target: &str) -> GraphConnection {
	GraphConnection {
		id: format!("conn-{source}-{target}"),
		source: NodeId::from(source),
		target: NodeId::from(target),
		kind: Some(ConnectionKind::Direct),
		weight: None,
	}
}

/// A dropper that phones home and persists itself through a Run key.
pub fn sample_analysis() -> GraphData {
	let nodes = vec![
		node(
			"1",
			NodeKind::File,
			"malware.exe",
			(200.0, 150.0),
			&["2", "3"],
			"Suspicious executable file detected",
			RiskLevel::Critical,
			&[
				("File Size", "2.3 MB"),
				("Hash (MD5)", "d41d8cd98f00b204e9800998ecf8427e"),
				("First Seen", "2024-01-15 14:30:22"),
			],
		),
		node(
			"2",
			NodeKind::Network,
			"TCP 443",
			(400.0, 100.0),
			&["4"],
			"Outbound HTTPS connection",
			RiskLevel::High,
			&[
				("Destination", "185.123.45.67"),
				("Port", "443"),
				("Protocol", "HTTPS"),
			],
		),
		node(
			"3",
			NodeKind::Registry,
			"HKLM\\Software\\Microsoft\\Windows\\CurrentVersion\\Run",
			(300.0, 300.0),
			&[],
			"Registry modification for persistence",
			RiskLevel::High,
			&[("Action", "Write"), ("Value", "malware.exe"), ("Type", "REG_SZ")],
		),
		node(
			"4",
			NodeKind::Threat,
			"C&C Server",
			(600.0, 150.0),
			&[],
			"Command and control server communication",
			RiskLevel::Critical,
			&[
				("IP", "185.123.45.67"),
				("Geolocation", "Russia"),
				("Known Threat", "APT29"),
			],
		),
	];

	GraphData {
		nodes,
		connections: vec![direct("1", "2"), direct("1", "3"), direct("2", "4")],
	}
}

