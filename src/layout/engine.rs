use dagre_rust::{
    GraphConfig as DagreConfig, GraphEdge as DagreEdge, GraphNode as DagreNode,
    layout as dagre_layout,
};
use graphlib_rust::{Graph as DagreGraph, GraphOption};

use super::error::{LayoutError, Result};
use super::graph::LayoutGraph;
use crate::ir::XYPosition;

/// Computes node positions for a [`LayoutGraph`].
///
/// Implementations write every node's position back with
/// [`LayoutGraph::set_position`] and must give the same answer when re-run on
/// an unchanged graph.
pub trait LayoutEngine {
    fn run(&mut self, graph: &mut LayoutGraph) -> Result<()>;
}

/// Layered layout backed by `dagre_rust`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DagreEngine;

impl LayoutEngine for DagreEngine {
    fn run(&mut self, graph: &mut LayoutGraph) -> Result<()> {
        if graph.is_empty() {
            return Ok(());
        }

        let mut dagre_graph: DagreGraph<DagreConfig, DagreNode, DagreEdge> =
            DagreGraph::new(Some(GraphOption {
                directed: Some(true),
                multigraph: Some(false),
                compound: Some(false),
            }));

        let settings = graph.settings();
        let mut graph_config = DagreConfig::default();
        graph_config.rankdir = Some(settings.direction.rankdir().to_string());
        graph_config.ranksep = Some(settings.rank_spacing);
        if let Some(nodesep) = settings.node_spacing {
            graph_config.nodesep = Some(nodesep);
        }
        if let Some(marginx) = settings.margin_x {
            graph_config.marginx = Some(marginx);
        }
        if let Some(marginy) = settings.margin_y {
            graph_config.marginy = Some(marginy);
        }
        dagre_graph.set_graph(graph_config);

        for node in graph.nodes() {
            let mut dagre_node = DagreNode::default();
            dagre_node.width = node.width;
            dagre_node.height = node.height;
            dagre_graph.set_node(node.id.clone(), Some(dagre_node));
        }

        // Without multigraph support a repeated source/target pair collapses
        // into one dagre edge.
        for (from, to) in graph.edges() {
            let _ = dagre_graph.set_edge(from, to, Some(DagreEdge::default()), None);
        }

        dagre_layout::run_layout(&mut dagre_graph);

        let mut placed = Vec::with_capacity(graph.node_count());
        for node in graph.nodes() {
            let Some(dagre_node) = dagre_graph.node(&node.id) else {
                return Err(LayoutError::Unplaced {
                    id: node.id.clone(),
                });
            };
            placed.push((node.id.clone(), XYPosition::new(dagre_node.x, dagre_node.y)));
        }
        for (id, position) in placed {
            graph.set_position(&id, position);
        }

        Ok(())
    }
}
