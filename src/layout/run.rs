use super::engine::LayoutEngine;
use super::error::{LayoutError, Result};
use super::graph::{GraphSettings, LayoutGraph};
use super::types::{LayoutPhase, LayoutReport};
use crate::config::LayoutConfig;
use crate::ir::{Align, AnchorSide, Direction, FlowNode, LayoutEdge, XYPosition};
use crate::store::{DiagramStore, LayoutTicket};

/// One layout request, advanced an iteration at a time with [`LayoutRun::step`].
///
/// The first step is the warm-up pass. Every later step re-runs the engine,
/// derives a candidate collection, publishes it to the store and counts how
/// many consecutive candidates left every `(id, x, y)` unchanged.
pub struct LayoutRun<'a, S: DiagramStore + ?Sized, E: LayoutEngine + ?Sized> {
    store: &'a S,
    engine: &'a mut E,
    ticket: LayoutTicket<'a>,
    graph: LayoutGraph,
    nodes: Vec<FlowNode>,
    anchors: (AnchorSide, AnchorSide),
    required_stable: usize,
    max_iterations: usize,
    phase: LayoutPhase,
    iterations: usize,
    stable_count: usize,
    engine_runs: usize,
}

impl<'a, S: DiagramStore + ?Sized, E: LayoutEngine + ?Sized> LayoutRun<'a, S, E> {
    /// Builds the layout graph for `nodes` and `edges`.
    ///
    /// Fails with [`LayoutError::NodeNotFound`] before touching the engine or
    /// the store when a node is unknown to the store.
    pub fn new(
        store: &'a S,
        engine: &'a mut E,
        nodes: Vec<FlowNode>,
        edges: &[LayoutEdge],
        direction: Direction,
        align: Option<Align>,
        config: &LayoutConfig,
    ) -> Result<Self> {
        let mut settings = GraphSettings::new(direction, config);
        settings.align = align;
        let mut graph = LayoutGraph::new(settings);

        for node in &nodes {
            let Some(rendered) = store.find_node(&node.id) else {
                return Err(LayoutError::NodeNotFound {
                    id: node.id.clone(),
                });
            };
            let width = measured_or(rendered.dimensions.width, config.default_node_width);
            let height = measured_or(rendered.dimensions.height, config.default_node_height);
            graph.set_node(&node.id, width, height);
        }

        for edge in edges {
            graph.set_edge(edge.source(), edge.target());
        }

        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            direction = direction.as_token(),
            "built layout graph"
        );
        if let Some(align) = align {
            tracing::debug!(
                align = align.as_token(),
                "alignment is not forwarded to the layout engine"
            );
        }

        let ticket = store.layout_guard().begin();
        Ok(Self {
            store,
            engine,
            ticket,
            graph,
            nodes,
            anchors: direction.anchor_sides(),
            required_stable: config.required_stable_iterations.max(1),
            max_iterations: config.max_iterations,
            phase: LayoutPhase::Idle,
            iterations: 0,
            stable_count: 0,
            engine_runs: 0,
        })
    }

    pub fn phase(&self) -> LayoutPhase {
        self.phase
    }

    pub fn nodes(&self) -> &[FlowNode] {
        &self.nodes
    }

    pub fn graph(&self) -> &LayoutGraph {
        &self.graph
    }

    pub fn into_graph(self) -> LayoutGraph {
        self.graph
    }

    pub fn report(&self) -> LayoutReport {
        LayoutReport {
            phase: self.phase,
            iterations: self.iterations,
            engine_runs: self.engine_runs,
        }
    }

    pub fn step(&mut self) -> Result<LayoutPhase> {
        if self.phase.is_terminal() {
            return Ok(self.phase);
        }

        if self.phase == LayoutPhase::Idle {
            self.engine.run(&mut self.graph)?;
            self.engine_runs += 1;
            self.phase = LayoutPhase::WarmUp;
            return Ok(self.phase);
        }

        if !self.ticket.is_current() {
            tracing::debug!(
                epoch = self.ticket.epoch(),
                iterations = self.iterations,
                "layout superseded"
            );
            self.phase = LayoutPhase::Superseded;
            return Ok(self.phase);
        }

        if self.iterations >= self.max_iterations {
            self.phase = LayoutPhase::Exhausted;
            return Ok(self.phase);
        }

        self.engine.run(&mut self.graph)?;
        self.engine_runs += 1;

        let candidate = self.place()?;
        if same_positions(&self.nodes, &candidate) {
            self.stable_count += 1;
        } else {
            self.stable_count = 0;
        }
        self.nodes = candidate;
        self.store.publish(self.nodes.clone());
        self.iterations += 1;

        tracing::trace!(
            iteration = self.iterations,
            stable_count = self.stable_count,
            "layout iteration"
        );

        self.phase = if self.stable_count >= self.required_stable {
            LayoutPhase::Converged
        } else if self.iterations >= self.max_iterations {
            LayoutPhase::Exhausted
        } else {
            LayoutPhase::Iterating {
                iteration: self.iterations,
                stable_count: self.stable_count,
            }
        };
        Ok(self.phase)
    }

    fn place(&self) -> Result<Vec<FlowNode>> {
        let (source, target) = self.anchors;
        self.nodes
            .iter()
            .map(|node| {
                let position =
                    self.graph
                        .position(&node.id)
                        .ok_or_else(|| LayoutError::Unplaced {
                            id: node.id.clone(),
                        })?;
                Ok(FlowNode {
                    position,
                    source_position: Some(source),
                    target_position: Some(target),
                    ..node.clone()
                })
            })
            .collect()
    }
}

/// Zero, negative and non-finite sizes count as "not measured yet".
fn measured_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

fn position_key(nodes: &[FlowNode]) -> Vec<(&str, XYPosition)> {
    let mut key: Vec<(&str, XYPosition)> = nodes
        .iter()
        .map(|node| (node.id.as_str(), node.position))
        .collect();
    key.sort_by(|a, b| a.0.cmp(b.0));
    key
}

fn same_positions(previous: &[FlowNode], candidate: &[FlowNode]) -> bool {
    previous.len() == candidate.len() && position_key(previous) == position_key(candidate)
}
