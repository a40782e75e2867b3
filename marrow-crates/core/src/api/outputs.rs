use crate::basic_types::Solution;

/// The conclusion of a single-solution search.
#[derive(Clone, Debug)]
pub enum Outcome {
    /// A satisfying assignment was found.
    Satisfiable(Solution),
    /// The search space was exhausted without finding a solution.
    Infeasible,
    /// The termination condition stopped the search before a conclusion was reached.
    Unknown,
}

/// The conclusion of an exhaustive enumeration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnumerationOutcome {
    /// Every solution was visited.
    Complete { num_solutions: u64 },
    /// The termination condition stopped the enumeration; the visited solutions are a subset of
    /// all solutions.
    Incomplete { num_solutions: u64 },
}

impl EnumerationOutcome {
    pub fn num_solutions(&self) -> u64 {
        match *self {
            EnumerationOutcome::Complete { num_solutions } => num_solutions,
            EnumerationOutcome::Incomplete { num_solutions } => num_solutions,
        }
    }
}
