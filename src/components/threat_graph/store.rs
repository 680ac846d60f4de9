use std::collections::HashMap;

use log::warn;

use super::types::{GraphData, GraphNode, NodeId, Point};

/// An edge with both endpoints resolved to arena indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedEdge {
	pub source: usize,
	pub target: usize,
}

/// Owned node arena with an id index. The node and edge sets are fixed after load;
/// only positions change.
#[derive(Clone, Debug, Default)]
pub struct GraphStore {
	nodes: Vec<GraphNode>,
	index: HashMap<NodeId, usize>,
	edges: Vec<ResolvedEdge>,
}

impl GraphStore {
	pub fn new(data: &GraphData) -> Self {
		let mut nodes = Vec::with_capacity(data.nodes.len());
		let mut index = HashMap::with_capacity(data.nodes.len());
		for node in &data.nodes {
			if index.contains_key(&node.id) {
				warn!("dropping duplicate node id {}", node.id);
				continue;
			}
			index.insert(node.id.clone(), nodes.len());
			nodes.push(node.clone());
		}

		// Explicit connections first, then each node's own outgoing list. Dangling ends are skipped.
		let mut edges = Vec::new();
		let explicit = data
			.connections
			.iter()
			.map(|c| (&c.source, &c.target));
		let legacy = nodes
			.iter()
			.flat_map(|n| n.connections.iter().map(move |t| (&n.id, t)));
		for (src, tgt) in explicit.chain(legacy) {
			if let (Some(&source), Some(&target)) = (index.get(src), index.get(tgt)) {
				edges.push(ResolvedEdge { source, target });
			}
		}

		Self {
			nodes,
			index,
			edges,
		}
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	pub fn edges(&self) -> &[ResolvedEdge] {
		&self.edges
	}

	pub fn index_of(&self, id: &NodeId) -> Option<usize> {
		self.index.get(id).copied()
	}

	pub fn get(&self, id: &NodeId) -> Option<&GraphNode> {
		self.index_of(id).map(|i| &self.nodes[i])
	}

	pub fn contains(&self, id: &NodeId) -> bool {
		self.index.contains_key(id)
	}

	/// Moves one node; every other node is left untouched. Unknown ids are ignored.
	pub fn reposition(&mut self, id: &NodeId, position: Point) -> bool {
		match self.index_of(id) {
			Some(i) => {
				self.nodes[i].position = position;
				true
			}
			None => false,
		}
	}

	/// Topmost node within `radius` of a canvas-space point. Later nodes draw on top,
	/// so they win ties.
	pub fn node_at(&self, p: Point, radius: f64) -> Option<&GraphNode> {
		self.nodes
			.iter()
			.rev()
			.find(|n| n.position.delta_from(p).length() < radius)
	}
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeMap;

	use super::*;
	use crate::components::threat_graph::types::{
		GraphConnection, NodeDetails, NodeKind, RiskLevel,
	};

	fn node(id: &str, x: f64, y: f64, out: &[&str]) -> GraphNode {
		GraphNode {
			id: NodeId::from(id),
			kind: NodeKind::File,
			label: id.to_string(),
			position: Point::new(x, y),
			connections: out.iter().map(|t| NodeId::from(*t)).collect(),
			details: NodeDetails {
				description: String::new(),
				risk: RiskLevel::Low,
				metadata: BTreeMap::new(),
			},
		}
	}

	fn conn(src: &str, tgt: &str) -> GraphConnection {
		GraphConnection {
			id: format!("{src}-{tgt}"),
			source: NodeId::from(src),
			target: NodeId::from(tgt),
			kind: None,
			weight: None,
		}
	}

	fn sample() -> GraphStore {
		GraphStore::new(&GraphData {
			nodes: vec![
				node("a", 0.0, 0.0, &["b", "ghost"]),
				node("b", 100.0, 0.0, &[]),
				node("c", 100.0, 100.0, &[]),
			],
			connections: vec![conn("a", "c"), conn("c", "missing"), conn("b", "c")],
		})
	}

	#[test]
	fn lookup_by_id() {
		let store = sample();
		assert_eq!(store.len(), 3);
		assert_eq!(store.get(&"b".into()).map(|n| n.position.x), Some(100.0));
		assert!(store.get(&"nope".into()).is_none());
	}

	#[test]
	fn dangling_edges_are_skipped() {
		let store = sample();
		let pairs: Vec<(usize, usize)> = store.edges().iter().map(|e| (e.source, e.target)).collect();
		assert_eq!(pairs, vec![(0, 2), (1, 2), (0, 1)]);
	}

	#[test]
	fn reposition_touches_only_the_target() {
		let mut store = sample();
		assert!(store.reposition(&"b".into(), Point::new(5.0, 6.0)));
		assert_eq!(store.get(&"b".into()).unwrap().position, Point::new(5.0, 6.0));
		assert_eq!(store.get(&"a".into()).unwrap().position, Point::new(0.0, 0.0));
		assert_eq!(store.get(&"c".into()).unwrap().position, Point::new(100.0, 100.0));
	}

	#[test]
	fn reposition_unknown_is_noop() {
		let mut store = sample();
		assert!(!store.reposition(&"zzz".into(), Point::new(1.0, 1.0)));
		assert_eq!(store.len(), 3);
	}

	#[test]
	fn duplicate_ids_keep_the_first() {
		let store = GraphStore::new(&GraphData {
			nodes: vec![node("a", 1.0, 1.0, &[]), node("a", 9.0, 9.0, &[])],
			connections: Vec::new(),
		});
		assert_eq!(store.len(), 1);
		assert_eq!(store.get(&"a".into()).unwrap().position, Point::new(1.0, 1.0));
	}

	#[test]
	fn sample_analysis_resolves_every_edge() {
		let store = GraphStore::new(&crate::sample::sample_analysis());
		assert_eq!(store.len(), 4);
		// Three explicit connections plus the three outgoing lists on the nodes.
		assert_eq!(store.edges().len(), 6);
	}

	#[test]
	fn hit_test_prefers_topmost() {
		let store = GraphStore::new(&GraphData {
			nodes: vec![node("under", 0.0, 0.0, &[]), node("over", 10.0, 0.0, &[])],
			connections: Vec::new(),
		});
		let hit = store.node_at(Point::new(5.0, 0.0), 25.0).map(|n| n.id.as_str());
		assert_eq!(hit, Some("over"));
		assert!(store.node_at(Point::new(200.0, 200.0), 25.0).is_none());
	}
}
