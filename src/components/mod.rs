pub mod threat_graph;
