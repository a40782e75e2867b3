//! Counters maintained by the search engine.

use log::info;

/// Aggregated counters of one search run.
#[derive(Clone, Copy, Debug, Default)]
pub struct SearchStatistics {
    /// The number of value-attempts made by decisions.
    pub num_decisions: u64,
    /// The number of contradictions encountered.
    pub num_conflicts: u64,
    /// The number of propagator invocations.
    pub num_propagations: u64,
    /// The number of solutions found.
    pub num_solutions: u64,
    /// The deepest decision stack observed.
    pub peak_depth: usize,
}

impl SearchStatistics {
    pub fn log(&self) {
        info!("searchNumDecisions={}", self.num_decisions);
        info!("searchNumConflicts={}", self.num_conflicts);
        info!("searchNumPropagations={}", self.num_propagations);
        info!("searchNumSolutions={}", self.num_solutions);
        info!("searchPeakDepth={}", self.peak_depth);
    }
}
