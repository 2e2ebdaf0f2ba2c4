use serde::Serialize;

/// Progress of one layout run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutPhase {
    Idle,
    WarmUp,
    Iterating { iteration: usize, stable_count: usize },
    /// Positions repeated for the required number of consecutive iterations.
    Converged,
    /// Hit the iteration ceiling; the last computed positions were kept.
    Exhausted,
    /// A newer layout on the same store, or a cancel, took over.
    Superseded,
}

impl LayoutPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Converged | Self::Exhausted | Self::Superseded)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayoutReport {
    pub phase: LayoutPhase,
    /// Iterations of the convergence loop, warm-up excluded.
    pub iterations: usize,
    pub engine_runs: usize,
}

impl LayoutReport {
    pub fn converged(&self) -> bool {
        self.phase == LayoutPhase::Converged
    }

    pub fn exhausted(&self) -> bool {
        self.phase == LayoutPhase::Exhausted
    }
}
