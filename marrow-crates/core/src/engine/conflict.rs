//! Conflict diagnosis: explaining a propagation failure in terms of the decisions that caused it.

use crate::basic_types::StoredConflict;
use crate::containers::HashSet;
use crate::engine::cause::Cause;
use crate::engine::cause::CauseArena;
use crate::engine::cause::CauseId;
use crate::engine::variables::DomainId;
use crate::math::Interval;
use crate::propagation::PropagatorId;

/// The default work budget for one diagnosis, counted in cause-arena entries visited.
pub(crate) const DEFAULT_ANALYSIS_BUDGET: usize = 1 << 14;

/// The result of analyzing a propagation failure.
///
/// When `complete` holds, `decisions` is the set of decision indices that together imply the
/// contradiction; when analysis aborted under its work budget, `complete` is false and the
/// diagnostic conservatively implicates only the innermost enclosing decision, so the search can
/// still backtrack safely.
#[derive(Clone, Debug)]
pub struct ConflictDiagnostic {
    /// False only if the analysis aborted under its work budget.
    pub complete: bool,
    /// The indices (depths) of the implicated decisions, ascending.
    pub decisions: Vec<usize>,
    /// The decision variables corresponding to `decisions`.
    pub variables: Vec<DomainId>,
    /// The propagators that participated in deriving the contradiction.
    pub propagators: Vec<PropagatorId>,
    /// The variable whose domain became empty.
    pub failing_domain: DomainId,
    /// The interval of the failing variable at failure time.
    pub failing_interval: Interval,
}

/// Walks the cause graph backward from the failing narrowing, collecting the decisions that are
/// implicated in the contradiction.
pub(crate) fn diagnose(
    conflict: &StoredConflict,
    causes: &CauseArena,
    work_budget: usize,
    innermost_decision: Option<(usize, DomainId)>,
) -> ConflictDiagnostic {
    let mut stack = vec![conflict.cause];
    let mut visited: HashSet<CauseId> = HashSet::default();
    let mut decisions: Vec<(usize, DomainId)> = Vec::new();
    let mut propagators: Vec<PropagatorId> = Vec::new();
    let mut work = 0_usize;

    while let Some(cause) = stack.pop() {
        if !visited.insert(cause) {
            continue;
        }

        work += 1;
        if work > work_budget {
            // Degrade gracefully: fall back to implicating the innermost decision only.
            let (decisions, variables) = innermost_decision
                .map(|(index, variable)| (vec![index], vec![variable]))
                .unwrap_or_default();
            return ConflictDiagnostic {
                complete: false,
                decisions,
                variables,
                propagators,
                failing_domain: conflict.domain,
                failing_interval: conflict.interval,
            };
        }

        match causes.get(cause) {
            Cause::RootLevelDeduction => {}
            Cause::SosBranch { .. } => {}
            Cause::Decision { index, variable } => decisions.push((*index, *variable)),
            Cause::Propagation {
                propagator,
                premises,
            } => {
                if !propagators.contains(propagator) {
                    propagators.push(*propagator);
                }
                stack.extend(premises.iter().copied());
            }
        }
    }

    decisions.sort_unstable_by_key(|(index, _)| *index);
    decisions.dedup();
    let (decisions, variables) = decisions.into_iter().unzip();

    ConflictDiagnostic {
        complete: true,
        decisions,
        variables,
        propagators,
        failing_domain: conflict.domain,
        failing_interval: conflict.interval,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::containers::StorageKey;

    fn decision(arena: &mut CauseArena, index: usize) -> CauseId {
        arena.push(Cause::Decision {
            index,
            variable: DomainId::new(index as u32),
        })
    }

    #[test]
    fn diagnosis_collects_the_implicated_decisions() {
        let mut arena = CauseArena::default();
        let first = decision(&mut arena, 0);
        let second = decision(&mut arena, 1);
        let derived = arena.push(Cause::Propagation {
            propagator: PropagatorId::create_from_index(0),
            premises: vec![second, first],
        });

        let conflict = StoredConflict {
            domain: DomainId::new(5),
            interval: Interval::EMPTY,
            cause: derived,
        };

        let diagnostic = diagnose(&conflict, &arena, DEFAULT_ANALYSIS_BUDGET, Some((1, DomainId::new(1))));
        assert!(diagnostic.complete);
        assert_eq!(diagnostic.decisions, vec![0, 1]);
        assert_eq!(diagnostic.propagators.len(), 1);
    }

    #[test]
    fn shared_premises_are_visited_once() {
        let mut arena = CauseArena::default();
        let shared = decision(&mut arena, 0);
        let left = arena.push(Cause::Propagation {
            propagator: PropagatorId::create_from_index(0),
            premises: vec![shared],
        });
        let right = arena.push(Cause::Propagation {
            propagator: PropagatorId::create_from_index(1),
            premises: vec![shared],
        });
        let top = arena.push(Cause::Propagation {
            propagator: PropagatorId::create_from_index(2),
            premises: vec![left, right],
        });

        let conflict = StoredConflict {
            domain: DomainId::new(9),
            interval: Interval::EMPTY,
            cause: top,
        };

        let diagnostic = diagnose(&conflict, &arena, DEFAULT_ANALYSIS_BUDGET, None);
        assert!(diagnostic.complete);
        assert_eq!(diagnostic.decisions, vec![0]);
    }

    #[test]
    fn exhausting_the_budget_degrades_to_the_innermost_decision() {
        let mut arena = CauseArena::default();
        let mut chain = decision(&mut arena, 0);
        for _ in 0..10 {
            chain = arena.push(Cause::Propagation {
                propagator: PropagatorId::create_from_index(0),
                premises: vec![chain],
            });
        }

        let conflict = StoredConflict {
            domain: DomainId::new(2),
            interval: Interval::EMPTY,
            cause: chain,
        };

        let diagnostic = diagnose(&conflict, &arena, 3, Some((4, DomainId::new(4))));
        assert!(!diagnostic.complete);
        assert_eq!(diagnostic.decisions, vec![4]);
    }
}
