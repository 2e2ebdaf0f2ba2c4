//! Iterative auto-layout.
//!
//! [`LayoutStabilizer`] rebuilds a [`LayoutGraph`] from the caller's nodes
//! and edges on every call, runs the engine once to warm up and then keeps
//! re-running it, publishing each candidate collection to the store, until
//! the positions stop changing or the iteration ceiling is reached.

mod engine;
mod error;
mod graph;
mod run;
mod schedule;
mod types;

pub use engine::{DagreEngine, LayoutEngine};
pub use error::{LayoutError, Result};
pub use graph::{GraphSettings, LayoutGraph, SizedNode};
pub use run::LayoutRun;
pub use schedule::{Immediate, Scheduler, TokioScheduler};
pub use types::{LayoutPhase, LayoutReport};

use crate::config::LayoutConfig;
use crate::ir::{Align, Direction, FlowNode, LayoutEdge};
use crate::store::DiagramStore;

pub struct LayoutStabilizer<E = DagreEngine, T = TokioScheduler> {
    engine: E,
    scheduler: T,
    config: LayoutConfig,
    previous_direction: Direction,
    graph: Option<LayoutGraph>,
}

impl LayoutStabilizer {
    pub fn new(config: LayoutConfig) -> Self {
        Self::with_parts(DagreEngine, TokioScheduler, config)
    }
}

impl Default for LayoutStabilizer {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl<E: LayoutEngine, T: Scheduler> LayoutStabilizer<E, T> {
    pub fn with_parts(engine: E, scheduler: T, config: LayoutConfig) -> Self {
        Self {
            engine,
            scheduler,
            config,
            previous_direction: Direction::LeftRight,
            graph: None,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Direction of the most recent layout request.
    pub fn previous_direction(&self) -> Direction {
        self.previous_direction
    }

    /// Layout graph built by the most recent successful call.
    pub fn graph(&self) -> Option<&LayoutGraph> {
        self.graph.as_ref()
    }

    /// Lays out `nodes` and publishes every intermediate collection to `store`.
    ///
    /// Yields to the scheduler after each iteration that did not finish the
    /// run. `align` is accepted for API compatibility only; no engine uses it.
    pub async fn layout<S: DiagramStore + ?Sized>(
        &mut self,
        store: &S,
        nodes: Vec<FlowNode>,
        edges: &[LayoutEdge],
        direction: Direction,
        align: Option<Align>,
    ) -> Result<LayoutReport> {
        self.previous_direction = direction;

        let mut run = LayoutRun::new(
            store,
            &mut self.engine,
            nodes,
            edges,
            direction,
            align,
            &self.config,
        )?;

        loop {
            let phase = run.step()?;
            if phase.is_terminal() {
                break;
            }
            if matches!(phase, LayoutPhase::Iterating { .. }) {
                self.scheduler.tick().await;
            }
        }

        let report = run.report();
        self.graph = Some(run.into_graph());

        match report.phase {
            LayoutPhase::Converged => tracing::debug!(
                iterations = report.iterations,
                engine_runs = report.engine_runs,
                "layout converged"
            ),
            LayoutPhase::Exhausted => tracing::warn!(
                iterations = report.iterations,
                "layout did not stabilize; keeping last positions"
            ),
            _ => {}
        }

        Ok(report)
    }

    /// Lays out the store's own nodes and edges.
    pub async fn relayout<S: DiagramStore + ?Sized>(
        &mut self,
        store: &S,
        direction: Direction,
        align: Option<Align>,
    ) -> Result<LayoutReport> {
        let nodes = store.nodes();
        let edges = store.edges();
        self.layout(store, nodes, &edges, direction, align).await
    }
}
