use crate::engine::domains::DomainStore;
use crate::engine::variables::DomainId;
use crate::propagation::PropagatorId;

/// The conclusion of one relaxation solve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RelaxationBound {
    /// Whether the relaxation admits any solution. An infeasible relaxation proves the current
    /// branch infeasible.
    pub feasible: bool,
    /// A bound on the objective over the current branch. Only meaningful when `feasible` holds.
    pub objective: f64,
}

/// An external procedure that bounds the objective of the current branch, typically by solving a
/// continuous relaxation of it.
///
/// The oracle is consulted, never relied upon: it may return `None` whenever a bound is
/// unavailable (the relaxation timed out, the subproblem is numerically troublesome), and the
/// search carries on without pruning.
pub trait RelaxationOracle {
    fn bound(&mut self, domains: &DomainStore) -> Option<RelaxationBound>;
}

/// A member of an irreducible infeasible subset reported after an infeasible search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubsetMember {
    /// A constraint that participated in the contradiction.
    Row(PropagatorId),
    /// A variable whose domain participated in the contradiction.
    Variable(DomainId),
}

/// A consumer of infeasibility reports. The solver appends the members it can implicate in the
/// root-level contradiction.
pub trait InfeasibilitySink {
    fn append(&mut self, member: SubsetMember);
}

impl InfeasibilitySink for Vec<SubsetMember> {
    fn append(&mut self, member: SubsetMember) {
        self.push(member);
    }
}
