//! Diagram store seam.
//!
//! The store owns the live node collection. Layout runs read a snapshot,
//! compute a new one per iteration and hand it back through
//! [`DiagramStore::publish`]; the store is the only writer.

use crate::ir::{Dimensions, FlowNode, LayoutEdge};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A node as the renderer knows it.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    pub id: String,
    pub dimensions: Dimensions,
}

pub trait DiagramStore: Sync {
    fn find_node(&self, id: &str) -> Option<GraphNode>;
    fn nodes(&self) -> Vec<FlowNode>;
    fn edges(&self) -> Vec<LayoutEdge>;
    fn publish(&self, nodes: Vec<FlowNode>);
    fn layout_guard(&self) -> &LayoutGuard;
}

/// Single-flight guard for layout runs against one store.
///
/// Every run takes a ticket; starting another run or cancelling moves the
/// epoch forward and invalidates all earlier tickets.
#[derive(Debug, Default)]
pub struct LayoutGuard {
    epoch: AtomicU64,
}

impl LayoutGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> LayoutTicket<'_> {
        let epoch = self.epoch.fetch_add(1, Ordering::AcqRel) + 1;
        LayoutTicket { guard: self, epoch }
    }

    pub fn cancel(&self) {
        self.epoch.fetch_add(1, Ordering::AcqRel);
    }

    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::Acquire)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LayoutTicket<'a> {
    guard: &'a LayoutGuard,
    epoch: u64,
}

impl LayoutTicket<'_> {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_current(&self) -> bool {
        self.guard.epoch() == self.epoch
    }
}

#[derive(Debug, Default)]
struct FlowState {
    nodes: Vec<FlowNode>,
    edges: Vec<LayoutEdge>,
    dimensions: HashMap<String, Dimensions>,
    revision: u64,
}

/// In-memory diagram store.
#[derive(Debug, Default)]
pub struct FlowStore {
    state: Mutex<FlowState>,
    guard: LayoutGuard,
}

impl FlowStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_diagram(nodes: Vec<FlowNode>, edges: Vec<LayoutEdge>) -> Self {
        let store = Self::new();
        {
            let mut state = store.state();
            state.nodes = nodes;
            state.edges = edges;
        }
        store
    }

    fn state(&self) -> MutexGuard<'_, FlowState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_node(&self, node: FlowNode) {
        self.state().nodes.push(node);
    }

    pub fn remove_node(&self, id: &str) -> Option<FlowNode> {
        let mut state = self.state();
        let idx = state.nodes.iter().position(|node| node.id == id)?;
        state.dimensions.remove(id);
        state
            .edges
            .retain(|edge| edge.source() != id && edge.target() != id);
        Some(state.nodes.remove(idx))
    }

    pub fn add_edge(&self, edge: impl Into<LayoutEdge>) {
        self.state().edges.push(edge.into());
    }

    /// Records the measured size of a rendered node. Returns false for unknown ids.
    pub fn set_dimensions(&self, id: &str, dimensions: Dimensions) -> bool {
        let mut state = self.state();
        if !state.nodes.iter().any(|node| node.id == id) {
            return false;
        }
        state.dimensions.insert(id.to_string(), dimensions);
        true
    }

    pub fn node(&self, id: &str) -> Option<FlowNode> {
        self.state().nodes.iter().find(|node| node.id == id).cloned()
    }

    /// Number of collections published since the store was created.
    pub fn revision(&self) -> u64 {
        self.state().revision
    }
}

impl DiagramStore for FlowStore {
    fn find_node(&self, id: &str) -> Option<GraphNode> {
        let state = self.state();
        let node = state.nodes.iter().find(|node| node.id == id)?;
        Some(GraphNode {
            id: node.id.clone(),
            dimensions: state.dimensions.get(id).copied().unwrap_or_default(),
        })
    }

    fn nodes(&self) -> Vec<FlowNode> {
        self.state().nodes.clone()
    }

    fn edges(&self) -> Vec<LayoutEdge> {
        self.state().edges.clone()
    }

    fn publish(&self, nodes: Vec<FlowNode>) {
        let mut state = self.state();
        state.nodes = nodes;
        state.revision += 1;
    }

    fn layout_guard(&self) -> &LayoutGuard {
        &self.guard
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_ticket_supersedes_older() {
        let guard = LayoutGuard::new();
        let first = guard.begin();
        assert!(first.is_current());
        let second = guard.begin();
        assert!(!first.is_current());
        assert!(second.is_current());
        guard.cancel();
        assert!(!second.is_current());
    }

    #[test]
    fn unmeasured_node_reports_zero_dimensions() {
        let store = FlowStore::new();
        store.add_node(FlowNode::new("a"));
        let found = store.find_node("a").unwrap();
        assert_eq!(found.dimensions, Dimensions::default());
        assert!(store.set_dimensions("a", Dimensions::new(80.0, 30.0)));
        assert_eq!(
            store.find_node("a").unwrap().dimensions,
            Dimensions::new(80.0, 30.0)
        );
        assert!(!store.set_dimensions("missing", Dimensions::new(1.0, 1.0)));
        assert!(store.find_node("missing").is_none());
    }

    #[test]
    fn removing_node_drops_its_edges() {
        let store = FlowStore::with_diagram(
            vec![FlowNode::new("a"), FlowNode::new("b"), FlowNode::new("c")],
            vec![LayoutEdge::edge("e1", "a", "b"), LayoutEdge::pending("b", "c")],
        );
        assert!(store.remove_node("b").is_some());
        assert!(store.edges().is_empty());
        assert_eq!(store.nodes().len(), 2);
        assert!(store.remove_node("b").is_none());
    }

    #[test]
    fn publish_replaces_collection_and_bumps_revision() {
        let store = FlowStore::with_diagram(vec![FlowNode::new("a")], Vec::new());
        assert_eq!(store.revision(), 0);
        store.publish(vec![FlowNode::new("b")]);
        assert_eq!(store.revision(), 1);
        assert!(store.node("a").is_none());
        assert!(store.node("b").is_some());
    }
}
