use std::collections::HashMap;

use crate::config::LayoutConfig;
use crate::ir::{Align, Direction, XYPosition};

#[derive(Debug, Clone, PartialEq)]
pub struct GraphSettings {
    pub direction: Direction,
    pub rank_spacing: f32,
    pub node_spacing: Option<f32>,
    pub margin_x: Option<f32>,
    pub margin_y: Option<f32>,
    /// Requested rank alignment. Recorded here but no engine reads it yet:
    /// layouts always use the engine's default alignment.
    pub align: Option<Align>,
}

impl GraphSettings {
    pub fn new(direction: Direction, config: &LayoutConfig) -> Self {
        Self {
            direction,
            rank_spacing: config.rank_spacing,
            node_spacing: config.node_spacing,
            margin_x: config.margin_x,
            margin_y: config.margin_y,
            align: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SizedNode {
    pub id: String,
    pub width: f32,
    pub height: f32,
    pub position: Option<XYPosition>,
    /// Created by an edge endpoint rather than registered explicitly.
    pub implicit: bool,
}

/// Sized nodes plus directed edges, built fresh for every layout call.
#[derive(Debug, Clone)]
pub struct LayoutGraph {
    settings: GraphSettings,
    nodes: Vec<SizedNode>,
    index: HashMap<String, usize>,
    edges: Vec<(String, String)>,
}

impl LayoutGraph {
    pub fn new(settings: GraphSettings) -> Self {
        Self {
            settings,
            nodes: Vec::new(),
            index: HashMap::new(),
            edges: Vec::new(),
        }
    }

    pub fn settings(&self) -> &GraphSettings {
        &self.settings
    }

    /// Registers a node, replacing the size of an existing node with the same id.
    pub fn set_node(&mut self, id: &str, width: f32, height: f32) {
        if let Some(&idx) = self.index.get(id) {
            let node = &mut self.nodes[idx];
            node.width = width;
            node.height = height;
            node.implicit = false;
            return;
        }
        self.index.insert(id.to_string(), self.nodes.len());
        self.nodes.push(SizedNode {
            id: id.to_string(),
            width,
            height,
            position: None,
            implicit: false,
        });
    }

    /// Adds a directed edge. Parallel edges are kept; unknown endpoints become
    /// zero-sized implicit nodes.
    pub fn set_edge(&mut self, source: &str, target: &str) {
        for id in [source, target] {
            if self.index.contains_key(id) {
                continue;
            }
            self.index.insert(id.to_string(), self.nodes.len());
            self.nodes.push(SizedNode {
                id: id.to_string(),
                width: 0.0,
                height: 0.0,
                position: None,
                implicit: true,
            });
        }
        self.edges.push((source.to_string(), target.to_string()));
    }

    pub fn node(&self, id: &str) -> Option<&SizedNode> {
        self.index.get(id).map(|&idx| &self.nodes[idx])
    }

    pub fn nodes(&self) -> &[SizedNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[(String, String)] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn position(&self, id: &str) -> Option<XYPosition> {
        self.node(id).and_then(|node| node.position)
    }

    /// Stores an engine-computed position. Returns false for unknown ids.
    pub fn set_position(&mut self, id: &str, position: XYPosition) -> bool {
        let Some(&idx) = self.index.get(id) else {
            return false;
        };
        self.nodes[idx].position = Some(position);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph() -> LayoutGraph {
        LayoutGraph::new(GraphSettings::new(
            Direction::LeftRight,
            &LayoutConfig::default(),
        ))
    }

    #[test]
    fn reregistering_node_overwrites_size() {
        let mut g = graph();
        g.set_node("a", 10.0, 10.0);
        g.set_node("a", 20.0, 5.0);
        assert_eq!(g.node_count(), 1);
        let a = g.node("a").unwrap();
        assert_eq!((a.width, a.height), (20.0, 5.0));
    }

    #[test]
    fn parallel_edges_are_kept() {
        let mut g = graph();
        g.set_node("a", 1.0, 1.0);
        g.set_node("b", 1.0, 1.0);
        g.set_edge("a", "b");
        g.set_edge("a", "b");
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn unknown_endpoint_becomes_implicit_node() {
        let mut g = graph();
        g.set_node("a", 1.0, 1.0);
        g.set_edge("a", "ghost");
        let ghost = g.node("ghost").unwrap();
        assert!(ghost.implicit);
        assert_eq!((ghost.width, ghost.height), (0.0, 0.0));
        g.set_node("ghost", 4.0, 4.0);
        assert!(!g.node("ghost").unwrap().implicit);
    }

    #[test]
    fn positions_start_unset() {
        let mut g = graph();
        g.set_node("a", 1.0, 1.0);
        assert_eq!(g.position("a"), None);
        assert!(g.set_position("a", XYPosition::new(3.0, 4.0)));
        assert_eq!(g.position("a"), Some(XYPosition::new(3.0, 4.0)));
        assert!(!g.set_position("b", XYPosition::default()));
    }
}
