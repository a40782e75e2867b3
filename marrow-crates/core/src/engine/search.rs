//! Branching decisions and the decision stack of the depth-first search.

use rand::rngs::SmallRng;

use crate::branching::SelectionContext;
use crate::branching::ValueSelector;
use crate::engine::cause::CauseId;
use crate::engine::domains::DomainStore;
use crate::engine::domains::EmptyDomain;
use crate::engine::variables::DomainId;
use crate::marrow_assert_moderate;
use crate::marrow_assert_simple;

/// A marker into the global undo state, recorded when a decision is created. Backtracking a
/// decision to its baseline restores exactly the state prior to it.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Baseline {
    /// The trail checkpoint of the [`DomainStore`].
    pub(crate) checkpoint: usize,
    /// The length of the cause arena.
    pub(crate) causes: usize,
}

/// A search-tree node: the attempt to fix (or rule out) values of one variable at one depth.
///
/// The two branching styles are structurally identical and are dispatched through
/// [`Decision::try_next_value`] and [`Decision::is_final`]:
/// - [`ForwardDecision`] assigns candidate values in increasing domain order;
/// - [`ExclusionDecision`] first assigns the candidate proposed by the [`ValueSelector`], then
///   rules that candidate out by splitting the remaining domain around it.
#[derive(Debug)]
pub(crate) enum Decision {
    Forward(ForwardDecision),
    Exclusion(ExclusionDecision),
}

impl Decision {
    pub(crate) fn forward(variable: DomainId, baseline: Baseline, depth: usize) -> Decision {
        Decision::Forward(ForwardDecision {
            variable,
            baseline,
            depth,
            tried: None,
        })
    }

    pub(crate) fn exclusion(variable: DomainId, baseline: Baseline, depth: usize) -> Decision {
        Decision::Exclusion(ExclusionDecision {
            variable,
            baseline,
            depth,
            value: None,
            arm: ExclusionArm::Untried,
        })
    }

    pub(crate) fn variable(&self) -> DomainId {
        match self {
            Decision::Forward(decision) => decision.variable,
            Decision::Exclusion(decision) => decision.variable,
        }
    }

    pub(crate) fn baseline(&self) -> Baseline {
        match self {
            Decision::Forward(decision) => decision.baseline,
            Decision::Exclusion(decision) => decision.baseline,
        }
    }

    pub(crate) fn depth(&self) -> usize {
        match self {
            Decision::Forward(decision) => decision.depth,
            Decision::Exclusion(decision) => decision.depth,
        }
    }

    /// Whether all candidates of this decision have been tried.
    ///
    /// Must be evaluated against the domains as restored to the decision's baseline.
    pub(crate) fn is_final(&self, domains: &DomainStore) -> bool {
        match self {
            Decision::Forward(decision) => decision
                .tried
                .is_some_and(|tried| domains.upper_bound(decision.variable) <= tried),
            Decision::Exclusion(decision) => {
                let lower = domains.lower_bound(decision.variable);
                let upper = domains.upper_bound(decision.variable);
                match decision.arm {
                    ExclusionArm::Untried => false,
                    ExclusionArm::Assigned => decision
                        .value
                        .is_some_and(|value| value <= lower && value >= upper),
                    ExclusionArm::TriedBelow => {
                        decision.value.is_some_and(|value| value >= upper)
                    }
                    ExclusionArm::TriedAbove => true,
                }
            }
        }
    }

    /// Imposes the next candidate of this decision on the restored domains.
    ///
    /// The caller must have restored the state to the decision's baseline and checked
    /// [`Decision::is_final`] beforehand; under that discipline the imposition cannot fail, since
    /// every candidate lies in the restored domain.
    pub(crate) fn try_next_value<Selector: ValueSelector + ?Sized>(
        &mut self,
        domains: &mut DomainStore,
        cause: CauseId,
        value_selector: &mut Selector,
        rng: &mut SmallRng,
    ) -> Result<(), EmptyDomain> {
        marrow_assert_moderate!(!self.is_final(domains));

        match self {
            Decision::Forward(decision) => {
                let lower = domains.lower_bound(decision.variable);
                let next = match decision.tried {
                    None => lower,
                    Some(tried) => lower.max(tried + 1),
                };
                decision.tried = Some(next);
                let _ = domains.impose_range(decision.variable, next, next, cause)?;
            }
            Decision::Exclusion(decision) => {
                let lower = domains.lower_bound(decision.variable);
                let upper = domains.upper_bound(decision.variable);
                match decision.arm {
                    ExclusionArm::Untried => {
                        let mut context = SelectionContext::new(domains, rng);
                        let value = value_selector.select_value(&mut context, decision.variable);
                        marrow_assert_simple!(
                            domains.contains(decision.variable, value),
                            "the value selector must propose a value from the current domain"
                        );
                        decision.value = Some(value);
                        decision.arm = ExclusionArm::Assigned;
                        let _ = domains.impose_range(decision.variable, value, value, cause)?;
                    }
                    ExclusionArm::Assigned => {
                        let value = decision.value.expect("assigned arm stores a value");
                        if value > lower {
                            decision.arm = ExclusionArm::TriedBelow;
                            let _ =
                                domains.impose_range(decision.variable, lower, value - 1, cause)?;
                        } else {
                            marrow_assert_simple!(value < upper);
                            decision.arm = ExclusionArm::TriedAbove;
                            let _ =
                                domains.impose_range(decision.variable, value + 1, upper, cause)?;
                        }
                    }
                    ExclusionArm::TriedBelow => {
                        let value = decision.value.expect("tried arm stores a value");
                        marrow_assert_simple!(value < upper);
                        decision.arm = ExclusionArm::TriedAbove;
                        let _ = domains.impose_range(decision.variable, value + 1, upper, cause)?;
                    }
                    ExclusionArm::TriedAbove => {
                        unreachable!("a final decision cannot try another value")
                    }
                }
            }
        }

        Ok(())
    }
}

/// A decision trying candidate values in increasing domain order.
#[derive(Debug)]
pub(crate) struct ForwardDecision {
    variable: DomainId,
    baseline: Baseline,
    depth: usize,
    /// The most recently tried value.
    tried: Option<i64>,
}

/// A decision which assigns a selected candidate and, when that fails, rules the candidate out by
/// splitting the domain into the parts below and above it.
#[derive(Debug)]
pub(crate) struct ExclusionDecision {
    variable: DomainId,
    baseline: Baseline,
    depth: usize,
    value: Option<i64>,
    arm: ExclusionArm,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ExclusionArm {
    Untried,
    Assigned,
    TriedBelow,
    TriedAbove,
}

/// The LIFO stack of live decisions. Decisions are tried and backtracked strictly
/// last-in-first-out.
#[derive(Debug, Default)]
pub(crate) struct DecisionStack {
    decisions: Vec<Decision>,
}

impl DecisionStack {
    pub(crate) fn push(&mut self, decision: Decision) {
        self.decisions.push(decision);
    }

    pub(crate) fn pop(&mut self) -> Decision {
        self.decisions
            .pop()
            .expect("popping an empty decision stack is a programming error")
    }

    pub(crate) fn top_mut(&mut self) -> &mut Decision {
        self.decisions
            .last_mut()
            .expect("inspecting an empty decision stack is a programming error")
    }

    pub(crate) fn len(&self) -> usize {
        self.decisions.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::branching::InDomainMin;

    fn baseline() -> Baseline {
        Baseline {
            checkpoint: 0,
            causes: 1,
        }
    }

    #[test]
    fn forward_decisions_enumerate_the_domain_in_increasing_order() {
        let mut domains = DomainStore::default();
        let x = domains.new_domain(2, 4);
        let mut rng = SmallRng::seed_from_u64(0);
        let mut selector = InDomainMin;

        let mut decision = Decision::forward(x, baseline(), 0);

        let mut tried = Vec::new();
        while !decision.is_final(&domains) {
            domains.new_checkpoint();
            decision
                .try_next_value(&mut domains, CauseId::ROOT, &mut selector, &mut rng)
                .expect("candidates lie in the restored domain");
            tried.push(domains.lower_bound(x));
            domains.backtrack_to(0);
        }

        assert_eq!(tried, vec![2, 3, 4]);
    }

    #[test]
    fn exclusion_decisions_partition_the_domain_around_the_candidate() {
        let mut domains = DomainStore::default();
        let x = domains.new_domain(0, 5);
        let mut rng = SmallRng::seed_from_u64(0);
        let mut selector = InDomainMin;

        let mut decision = Decision::exclusion(x, baseline(), 0);

        // First arm assigns the selected candidate.
        domains.new_checkpoint();
        decision
            .try_next_value(&mut domains, CauseId::ROOT, &mut selector, &mut rng)
            .expect("non-empty");
        assert_eq!(domains.lower_bound(x), 0);
        assert_eq!(domains.upper_bound(x), 0);
        domains.backtrack_to(0);

        // The candidate was the domain minimum, so the only residual arm is "above".
        assert!(!decision.is_final(&domains));
        domains.new_checkpoint();
        decision
            .try_next_value(&mut domains, CauseId::ROOT, &mut selector, &mut rng)
            .expect("non-empty");
        assert_eq!(domains.lower_bound(x), 1);
        assert_eq!(domains.upper_bound(x), 5);
        domains.backtrack_to(0);

        assert!(decision.is_final(&domains));
    }
}
