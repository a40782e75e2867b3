//! The solver: variables, propagators, the propagation fixpoint, and the tree search.

use std::collections::VecDeque;
use std::fmt;

use log::debug;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::api::EnumerationOutcome;
use crate::api::InfeasibilitySink;
use crate::api::Outcome;
use crate::api::RelaxationOracle;
use crate::api::SubsetMember;
use crate::basic_types::ConstraintOperationError;
use crate::basic_types::Inconsistency;
use crate::basic_types::NumericOverflow;
use crate::basic_types::Solution;
use crate::branching::Brancher;
use crate::branching::DecisionStyle;
use crate::branching::SelectionContext;
use crate::branching::ValueSelector;
use crate::branching::VariableSelector;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::engine::cause::Cause;
use crate::engine::cause::CauseArena;
use crate::engine::conflict::diagnose;
use crate::engine::conflict::ConflictDiagnostic;
use crate::engine::conflict::DEFAULT_ANALYSIS_BUDGET;
use crate::engine::domains::DomainStore;
use crate::engine::search::Baseline;
use crate::engine::search::Decision;
use crate::engine::search::DecisionStack;
use crate::engine::sos::Sos2Status;
use crate::engine::sos::SosNodeManager;
use crate::engine::sos::SosRowId;
use crate::engine::sos::SosRowNode;
use crate::engine::statistics::SearchStatistics;
use crate::engine::variables::DomainId;
use crate::engine::variables::Literal;
use crate::marrow_assert_simple;
use crate::propagation::EnqueueDecision;
use crate::propagation::PropagationContextMut;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;
use crate::propagation::PropagatorId;
use crate::termination::TerminationCondition;

/// The owner of all solver state: the variable store, the registered propagators, the
/// justification arena, and the search machinery.
///
/// The lifecycle is: create variables with [`Solver::new_variable`] and [`Solver::new_literal`],
/// post constraints with [`Solver::add_propagator`], then call [`Solver::solve`] or
/// [`Solver::solve_all`]. Both searches restore the root state before returning, so the solver
/// can be queried and re-solved afterwards.
pub struct Solver {
    domains: DomainStore,
    causes: CauseArena,
    propagators: KeyedVec<PropagatorId, Box<dyn Propagator>>,
    /// The propagators awaiting a [`Propagator::propagate`] call, FIFO.
    queue: VecDeque<PropagatorId>,
    /// Membership flags for `queue`, so a propagator is enqueued at most once.
    enqueued: KeyedVec<PropagatorId, bool>,
    sos: SosNodeManager,
    sos_rows: KeyedVec<SosRowId, Vec<DomainId>>,
    oracle: Option<Box<dyn RelaxationOracle>>,
    statistics: SearchStatistics,
    rng: SmallRng,
    analysis_budget: usize,
    last_conflict: Option<ConflictDiagnostic>,
}

impl Default for Solver {
    fn default() -> Self {
        Solver::with_seed(42)
    }
}

impl fmt::Debug for Solver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Solver")
            .field("num_domains", &self.domains.num_domains())
            .field("num_propagators", &self.propagators.len())
            .field("statistics", &self.statistics)
            .finish_non_exhaustive()
    }
}

/// The result of trying further arms of the decision stack.
enum Advanced {
    /// An arm was imposed and propagated cleanly; the search can go deeper.
    Progressed,
    /// Every arm of every decision was refuted.
    Exhausted,
    /// The termination condition stopped the search.
    Stopped,
}

impl Solver {
    pub fn new() -> Solver {
        Solver::default()
    }

    /// Create a solver whose randomised components draw from a generator with the given seed.
    pub fn with_seed(seed: u64) -> Solver {
        Solver {
            domains: DomainStore::default(),
            causes: CauseArena::default(),
            propagators: KeyedVec::default(),
            queue: VecDeque::default(),
            enqueued: KeyedVec::default(),
            sos: SosNodeManager::default(),
            sos_rows: KeyedVec::default(),
            oracle: None,
            statistics: SearchStatistics::default(),
            rng: SmallRng::seed_from_u64(seed),
            analysis_budget: DEFAULT_ANALYSIS_BUDGET,
            last_conflict: None,
        }
    }

    /// Create an integer variable with the domain `[lower, upper]`.
    pub fn new_variable(&mut self, lower: i64, upper: i64) -> DomainId {
        self.domains.new_domain(lower, upper)
    }

    /// Create a Boolean variable, backed by a fresh 0-1 integer domain.
    pub fn new_literal(&mut self) -> Literal {
        Literal::new(self.domains.new_domain(0, 1))
    }

    pub fn domains(&self) -> &DomainStore {
        &self.domains
    }

    pub fn lower_bound(&self, domain: DomainId) -> i64 {
        self.domains.lower_bound(domain)
    }

    pub fn upper_bound(&self, domain: DomainId) -> i64 {
        self.domains.upper_bound(domain)
    }

    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    pub fn log_statistics(&self) {
        self.statistics.log();
    }

    /// The diagnostic of the most recent contradiction, if any search or constraint posting has
    /// failed since the solver was created.
    pub fn last_conflict(&self) -> Option<&ConflictDiagnostic> {
        self.last_conflict.as_ref()
    }

    /// Install an oracle which bounds branches through a relaxation. When installed, the oracle
    /// is consulted after every cleanly propagated decision, and a branch whose relaxation is
    /// infeasible is refuted without further descent.
    pub fn set_relaxation_oracle(&mut self, oracle: Box<dyn RelaxationOracle>) {
        self.oracle = Some(oracle);
    }

    /// Post a constraint. The propagator is constructed, its subscriptions are registered, and it
    /// is propagated to fixpoint together with the already posted constraints.
    pub fn add_propagator<Constructor>(
        &mut self,
        constructor: Constructor,
    ) -> Result<PropagatorId, ConstraintOperationError>
    where
        Constructor: PropagatorConstructor,
        Constructor::PropagatorImpl: 'static,
    {
        marrow_assert_simple!(
            self.domains.checkpoint() == 0,
            "constraints can only be added at the root"
        );

        let id = PropagatorId::create_from_index(self.propagators.len());
        let propagator = constructor.create(PropagatorConstructorContext::new(&mut self.domains, id));
        let pushed = self.propagators.push(Box::new(propagator));
        marrow_assert_simple!(pushed == id);
        let _ = self.enqueued.push(false);

        self.enqueue(id);
        match self.propagate() {
            Ok(()) => Ok(id),
            Err(Inconsistency::Overflow(overflow)) => Err(overflow.into()),
            Err(Inconsistency::EmptyDomain(conflict)) => {
                self.last_conflict =
                    Some(diagnose(&conflict, &self.causes, self.analysis_budget, None));
                Err(ConstraintOperationError::InfeasibleAtRoot)
            }
        }
    }

    /// Report the members implicated in the most recent contradiction to the sink: the
    /// propagators that derived it, the decision variables it depends on, and the variable whose
    /// domain became empty.
    pub fn report_infeasible_subset<Sink: InfeasibilitySink + ?Sized>(&self, sink: &mut Sink) {
        let Some(diagnostic) = self.last_conflict.as_ref() else {
            return;
        };

        for &propagator in &diagnostic.propagators {
            sink.append(SubsetMember::Row(propagator));
        }
        for &variable in &diagnostic.variables {
            sink.append(SubsetMember::Variable(variable));
        }
        if !diagnostic.variables.contains(&diagnostic.failing_domain) {
            sink.append(SubsetMember::Variable(diagnostic.failing_domain));
        }
    }
}

// The propagation fixpoint.
impl Solver {
    fn enqueue(&mut self, propagator: PropagatorId) {
        if !self.enqueued[propagator] {
            self.enqueued[propagator] = true;
            self.queue.push_back(propagator);
        }
    }

    fn clear_propagation_state(&mut self) {
        self.queue.clear();
        for flag in self.enqueued.iter_mut() {
            *flag = false;
        }
        self.domains.clear_pending();
    }

    /// Run the enqueued propagators, and the ones they wake through notifications, until no
    /// domain changes any more. On inconsistency the queue and pending notifications are
    /// discarded; the caller backtracks (or gives up) from there.
    pub(crate) fn propagate(&mut self) -> Result<(), Inconsistency> {
        let result = self.propagate_to_fixpoint();
        if result.is_err() {
            self.clear_propagation_state();
        }
        result
    }

    fn propagate_to_fixpoint(&mut self) -> Result<(), Inconsistency> {
        loop {
            for notification in self.domains.drain_pending() {
                let decision = self.propagators[notification.propagator]
                    .notify(notification.local_id, notification.event);
                if decision == EnqueueDecision::Enqueue {
                    self.enqueue(notification.propagator);
                }
            }

            let Some(id) = self.queue.pop_front() else {
                return Ok(());
            };
            self.enqueued[id] = false;
            self.statistics.num_propagations += 1;

            self.propagators[id].propagate(PropagationContextMut::new(
                &mut self.domains,
                &mut self.causes,
                id,
            ))?;
        }
    }
}

// Checkpoint discipline.
impl Solver {
    fn baseline(&self) -> Baseline {
        Baseline {
            checkpoint: self.domains.checkpoint(),
            causes: self.causes.len(),
        }
    }

    fn open_checkpoint(&mut self) {
        self.domains.new_checkpoint();
    }

    /// Restore the solver to a previously recorded baseline: domains, bound justifications, the
    /// cause arena, and all transient propagation state.
    fn restore_to(&mut self, baseline: Baseline) {
        if self.domains.checkpoint() > baseline.checkpoint {
            self.domains.backtrack_to(baseline.checkpoint);
        }
        self.causes.truncate(baseline.causes);
        self.clear_propagation_state();
    }
}

// The depth-first search.
impl Solver {
    /// Search for a single satisfying assignment.
    ///
    /// The brancher must cover every variable of the model; a solution is recognised when its
    /// variable selector reports that everything is fixed. The root state is restored before
    /// returning.
    pub fn solve<VarSel, ValSel, Termination>(
        &mut self,
        brancher: &mut Brancher<VarSel, ValSel>,
        termination: &mut Termination,
    ) -> Result<Outcome, NumericOverflow>
    where
        VarSel: VariableSelector,
        ValSel: ValueSelector,
        Termination: TerminationCondition,
    {
        let root = self.baseline();

        if !self.propagate_root()? {
            return Ok(Outcome::Infeasible);
        }

        let mut stack = DecisionStack::default();

        let outcome = loop {
            if termination.should_stop() {
                break Outcome::Unknown;
            }

            let selected = {
                let mut context = SelectionContext::new(&self.domains, &mut self.rng);
                brancher.variable_selector.select_variable(&mut context)
            };

            if let Some(variable) = selected {
                self.push_decision(&mut stack, variable, brancher.style);
            } else {
                self.statistics.num_solutions += 1;
                break Outcome::Satisfiable(self.domains.extract_solution());
            }

            match self.advance(&mut stack, brancher, termination, true)? {
                Advanced::Progressed => {}
                Advanced::Exhausted => break Outcome::Infeasible,
                Advanced::Stopped => break Outcome::Unknown,
            }
        };

        self.restore_to(root);
        Ok(outcome)
    }

    /// Enumerate every satisfying assignment, invoking the callback for each.
    ///
    /// The enumeration backtracks chronologically, so the solutions reported are exactly the
    /// satisfying assignments, each visited once. The root state is restored before returning.
    pub fn solve_all<VarSel, ValSel, Termination, Callback>(
        &mut self,
        brancher: &mut Brancher<VarSel, ValSel>,
        termination: &mut Termination,
        mut on_solution: Callback,
    ) -> Result<EnumerationOutcome, NumericOverflow>
    where
        VarSel: VariableSelector,
        ValSel: ValueSelector,
        Termination: TerminationCondition,
        Callback: FnMut(&Solution),
    {
        let root = self.baseline();

        if !self.propagate_root()? {
            return Ok(EnumerationOutcome::Complete { num_solutions: 0 });
        }

        let mut stack = DecisionStack::default();
        let mut num_solutions: u64 = 0;

        let outcome = loop {
            if termination.should_stop() {
                break EnumerationOutcome::Incomplete { num_solutions };
            }

            let selected = {
                let mut context = SelectionContext::new(&self.domains, &mut self.rng);
                brancher.variable_selector.select_variable(&mut context)
            };

            if let Some(variable) = selected {
                self.push_decision(&mut stack, variable, brancher.style);
            } else {
                let solution = self.domains.extract_solution();
                on_solution(&solution);
                num_solutions += 1;
                self.statistics.num_solutions += 1;

                if stack.is_empty() {
                    // The root propagation fixed everything; there is exactly this solution.
                    break EnumerationOutcome::Complete { num_solutions };
                }
            }

            match self.advance(&mut stack, brancher, termination, false)? {
                Advanced::Progressed => {}
                Advanced::Exhausted => break EnumerationOutcome::Complete { num_solutions },
                Advanced::Stopped => break EnumerationOutcome::Incomplete { num_solutions },
            }
        };

        self.restore_to(root);
        Ok(outcome)
    }

    fn propagate_root(&mut self) -> Result<bool, NumericOverflow> {
        match self.propagate() {
            Ok(()) => Ok(true),
            Err(Inconsistency::Overflow(overflow)) => Err(overflow),
            Err(Inconsistency::EmptyDomain(conflict)) => {
                self.last_conflict =
                    Some(diagnose(&conflict, &self.causes, self.analysis_budget, None));
                Ok(false)
            }
        }
    }

    fn push_decision(&mut self, stack: &mut DecisionStack, variable: DomainId, style: DecisionStyle) {
        let baseline = self.baseline();
        let depth = stack.len();
        let decision = match style {
            DecisionStyle::Forward => Decision::forward(variable, baseline, depth),
            DecisionStyle::Exclusion => Decision::exclusion(variable, baseline, depth),
        };
        stack.push(decision);
        self.statistics.peak_depth = self.statistics.peak_depth.max(stack.len());
    }

    /// Try arms of the topmost decision until one propagates cleanly, popping decisions whose
    /// arms are exhausted. With `backjump` enabled, a completely diagnosed conflict pops straight
    /// to the deepest implicated decision; enumeration must not backjump, since skipped arms may
    /// contain solutions.
    fn advance<VarSel, ValSel, Termination>(
        &mut self,
        stack: &mut DecisionStack,
        brancher: &mut Brancher<VarSel, ValSel>,
        termination: &mut Termination,
        backjump: bool,
    ) -> Result<Advanced, NumericOverflow>
    where
        VarSel: VariableSelector,
        ValSel: ValueSelector,
        Termination: TerminationCondition,
    {
        loop {
            if stack.is_empty() {
                return Ok(Advanced::Exhausted);
            }
            if termination.should_stop() {
                return Ok(Advanced::Stopped);
            }

            let baseline = stack.top_mut().baseline();
            self.restore_to(baseline);

            if stack.top_mut().is_final(&self.domains) {
                let _ = stack.pop();
                continue;
            }

            self.open_checkpoint();
            let top = stack.top_mut();
            let index = top.depth();
            let variable = top.variable();
            let cause = self.causes.push(Cause::Decision { index, variable });
            self.statistics.num_decisions += 1;

            let imposed = top.try_next_value(
                &mut self.domains,
                cause,
                &mut brancher.value_selector,
                &mut self.rng,
            );
            if imposed.is_err() {
                self.statistics.num_conflicts += 1;
                continue;
            }

            match self.propagate() {
                Ok(()) => {
                    if let Some(oracle) = self.oracle.as_mut() {
                        if let Some(bound) = oracle.bound(&self.domains) {
                            if !bound.feasible {
                                self.statistics.num_conflicts += 1;
                                continue;
                            }
                        }
                    }
                    return Ok(Advanced::Progressed);
                }
                Err(Inconsistency::Overflow(overflow)) => return Err(overflow),
                Err(Inconsistency::EmptyDomain(conflict)) => {
                    self.statistics.num_conflicts += 1;
                    let diagnostic = diagnose(
                        &conflict,
                        &self.causes,
                        self.analysis_budget,
                        Some((index, variable)),
                    );

                    if backjump && diagnostic.complete {
                        match diagnostic.decisions.last() {
                            None => {
                                // The contradiction holds independent of every decision.
                                self.last_conflict = Some(diagnostic);
                                return Ok(Advanced::Exhausted);
                            }
                            Some(&deepest) => {
                                if stack.len() > deepest + 1 {
                                    debug!(
                                        "backjumping from depth {} to depth {}",
                                        stack.len() - 1,
                                        deepest
                                    );
                                }
                                while stack.len() > deepest + 1 {
                                    let _ = stack.pop();
                                }
                            }
                        }
                    }

                    self.last_conflict = Some(diagnostic);
                }
            }
        }
    }
}

// Branch management for special-ordered-set rows.
impl Solver {
    /// Register an SOS2 row over the given member variables, in order.
    pub fn add_sos2_row(&mut self, members: &[DomainId]) -> SosRowId {
        marrow_assert_simple!(!members.is_empty(), "an SOS2 row needs at least one member");
        self.sos_rows.push(members.to_vec())
    }

    pub fn sos2_members(&self, row: SosRowId) -> &[DomainId] {
        &self.sos_rows[row]
    }

    /// Enter a branch of the row: every member not active in `status` is fixed to zero, and the
    /// propagators run to fixpoint.
    ///
    /// Returns `Ok(true)` when the branch survives propagation; the branch is then pushed on the
    /// SOS node stack, to be unwound by [`Solver::leave_sos2_branch`]. When fixing a member or
    /// propagating fails, the state is restored immediately and `Ok(false)` is returned.
    pub fn enter_sos2_branch(
        &mut self,
        row: SosRowId,
        status: Sos2Status,
    ) -> Result<bool, NumericOverflow> {
        let baseline = self.baseline();
        self.open_checkpoint();
        let cause = self.causes.push(Cause::SosBranch { row });

        for position in 0..self.sos_rows[row].len() {
            if status.is_active(position) {
                continue;
            }
            let member = self.sos_rows[row][position];
            if self.domains.impose_range(member, 0, 0, cause).is_err() {
                self.restore_to(baseline);
                return Ok(false);
            }
        }

        match self.propagate() {
            Ok(()) => {
                self.sos.push(SosRowNode {
                    row,
                    status,
                    baseline,
                });
                Ok(true)
            }
            Err(Inconsistency::Overflow(overflow)) => {
                self.restore_to(baseline);
                Err(overflow)
            }
            Err(Inconsistency::EmptyDomain(conflict)) => {
                self.last_conflict =
                    Some(diagnose(&conflict, &self.causes, self.analysis_budget, None));
                self.restore_to(baseline);
                Ok(false)
            }
        }
    }

    /// Leave the innermost SOS2 branch, restoring the state from before it was entered. The
    /// popped node is returned so the caller can derive the next branch from its status.
    pub fn leave_sos2_branch(&mut self) -> SosRowNode {
        let node = self.sos.pop();
        self.restore_to(node.baseline);
        node
    }

    pub fn sos_nodes(&self) -> &SosNodeManager {
        &self.sos
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::basic_types::PropagationStatus;
    use crate::branching::AntiFirstFail;
    use crate::branching::FirstFail;
    use crate::branching::InDomainMax;
    use crate::branching::InDomainMiddle;
    use crate::branching::InDomainMin;
    use crate::branching::InDomainRandom;
    use crate::branching::InputOrder;
    use crate::containers::HashSet;
    use crate::propagators::AdditionToConstantArgs;
    use crate::termination::Indefinite;
    use crate::termination::TimeBudget;

    fn brancher(
        variables: &[DomainId],
        style: DecisionStyle,
    ) -> Brancher<InputOrder, InDomainMin> {
        Brancher::new(InputOrder::new(variables), InDomainMin, style)
    }

    #[test]
    fn posting_a_constraint_propagates_it_at_the_root() {
        let mut solver = Solver::default();
        let x = solver.new_variable(2, 4);
        let y = solver.new_variable(0, 10);

        let _ = solver
            .add_propagator(AdditionToConstantArgs {
                x,
                y,
                constant: 3,
            })
            .expect("feasible at the root");

        assert_eq!(solver.lower_bound(y), 5);
        assert_eq!(solver.upper_bound(y), 7);
    }

    #[test]
    fn a_root_infeasible_constraint_is_rejected_with_a_diagnostic() {
        let mut solver = Solver::default();
        let x = solver.new_variable(0, 2);
        let y = solver.new_variable(9, 10);

        let result = solver.add_propagator(AdditionToConstantArgs {
            x,
            y,
            constant: 3,
        });

        assert_eq!(result, Err(ConstraintOperationError::InfeasibleAtRoot));
        assert!(solver.last_conflict().is_some());

        let mut members: Vec<SubsetMember> = Vec::new();
        solver.report_infeasible_subset(&mut members);
        assert!(members
            .iter()
            .any(|member| matches!(member, SubsetMember::Row(_))));
    }

    #[test]
    fn solving_finds_an_assignment_satisfying_the_constraints() {
        let mut solver = Solver::default();
        let x = solver.new_variable(2, 4);
        let y = solver.new_variable(0, 10);
        let _ = solver
            .add_propagator(AdditionToConstantArgs {
                x,
                y,
                constant: 3,
            })
            .expect("feasible");

        let mut brancher = brancher(&[x, y], DecisionStyle::Exclusion);
        let outcome = solver
            .solve(&mut brancher, &mut Indefinite)
            .expect("no overflow");

        match outcome {
            Outcome::Satisfiable(solution) => {
                assert_eq!(solution.value(y), solution.value(x) + 3);
            }
            other => panic!("expected a solution, got {other:?}"),
        }
    }

    #[test]
    fn the_root_state_is_restored_after_solving() {
        let mut solver = Solver::default();
        let x = solver.new_variable(2, 4);
        let y = solver.new_variable(0, 10);
        let _ = solver
            .add_propagator(AdditionToConstantArgs {
                x,
                y,
                constant: 3,
            })
            .expect("feasible");

        let mut brancher = brancher(&[x, y], DecisionStyle::Exclusion);
        let _ = solver
            .solve(&mut brancher, &mut Indefinite)
            .expect("no overflow");

        assert_eq!(solver.lower_bound(x), 2);
        assert_eq!(solver.upper_bound(x), 4);
        assert_eq!(solver.lower_bound(y), 5);
        assert_eq!(solver.upper_bound(y), 7);
    }

    #[test]
    fn enumeration_visits_every_assignment_exactly_once() {
        for style in [DecisionStyle::Forward, DecisionStyle::Exclusion] {
            let mut solver = Solver::default();
            let variables: Vec<DomainId> =
                (0..3).map(|_| solver.new_variable(0, 1)).collect();

            let mut seen: HashSet<Vec<i64>> = HashSet::default();
            let mut brancher = brancher(&variables, style);
            let outcome = solver
                .solve_all(&mut brancher, &mut Indefinite, |solution| {
                    let values = variables
                        .iter()
                        .map(|&variable| solution.value(variable))
                        .collect::<Vec<_>>();
                    assert!(seen.insert(values), "a solution was visited twice");
                })
                .expect("no overflow");

            assert_eq!(outcome, EnumerationOutcome::Complete { num_solutions: 8 });
            assert_eq!(seen.len(), 8);
        }
    }

    fn count_distinct_solutions<VarSel, ValSel>(
        solver: &mut Solver,
        brancher: &mut Brancher<VarSel, ValSel>,
        variables: &[DomainId],
    ) -> usize
    where
        VarSel: VariableSelector,
        ValSel: ValueSelector,
    {
        let mut seen: HashSet<Vec<i64>> = HashSet::default();
        let outcome = solver
            .solve_all(brancher, &mut Indefinite, |solution| {
                let values = variables
                    .iter()
                    .map(|&variable| solution.value(variable))
                    .collect::<Vec<_>>();
                assert!(seen.insert(values), "a solution was visited twice");
            })
            .expect("no overflow");

        assert_eq!(outcome.num_solutions(), seen.len() as u64);
        seen.len()
    }

    #[test]
    fn enumeration_is_exhaustive_under_every_selector_pairing() {
        fn fresh() -> (Solver, Vec<DomainId>) {
            let mut solver = Solver::default();
            let variables = (0..3).map(|_| solver.new_variable(0, 2)).collect();
            (solver, variables)
        }

        let (mut solver, variables) = fresh();
        let mut brancher = Brancher::new(
            FirstFail::new(&variables),
            InDomainMiddle,
            DecisionStyle::Exclusion,
        );
        assert_eq!(
            count_distinct_solutions(&mut solver, &mut brancher, &variables),
            27
        );

        let (mut solver, variables) = fresh();
        let mut brancher = Brancher::new(
            FirstFail::new(&variables),
            InDomainRandom,
            DecisionStyle::Exclusion,
        );
        assert_eq!(
            count_distinct_solutions(&mut solver, &mut brancher, &variables),
            27
        );

        let (mut solver, variables) = fresh();
        let mut brancher = Brancher::new(
            AntiFirstFail::new(&variables),
            InDomainMax,
            DecisionStyle::Exclusion,
        );
        assert_eq!(
            count_distinct_solutions(&mut solver, &mut brancher, &variables),
            27
        );
    }

    #[test]
    fn enumeration_matches_brute_force_on_a_constrained_problem() {
        let mut solver = Solver::default();
        let x = solver.new_variable(0, 2);
        let y = solver.new_variable(0, 2);
        let z = solver.new_variable(0, 2);
        let _ = solver
            .add_propagator(AdditionToConstantArgs {
                x,
                y,
                constant: 1,
            })
            .expect("feasible");

        let mut expected: HashSet<Vec<i64>> = HashSet::default();
        for x_value in 0..=2 {
            for y_value in 0..=2 {
                for z_value in 0..=2 {
                    if y_value == x_value + 1 {
                        assert!(expected.insert(vec![x_value, y_value, z_value]));
                    }
                }
            }
        }

        let mut seen: HashSet<Vec<i64>> = HashSet::default();
        let mut brancher = brancher(&[x, y, z], DecisionStyle::Exclusion);
        let outcome = solver
            .solve_all(&mut brancher, &mut Indefinite, |solution| {
                let values = vec![solution.value(x), solution.value(y), solution.value(z)];
                assert!(seen.insert(values), "a solution was visited twice");
            })
            .expect("no overflow");

        assert_eq!(outcome.num_solutions(), expected.len() as u64);
        assert_eq!(seen, expected);
    }

    #[test]
    fn an_expired_budget_yields_an_incomplete_enumeration() {
        let mut solver = Solver::default();
        let x = solver.new_variable(0, 100);

        let mut brancher = brancher(&[x], DecisionStyle::Forward);
        let mut budget = TimeBudget::starting_now(Duration::ZERO);
        let outcome = solver
            .solve_all(&mut brancher, &mut budget, |_| {})
            .expect("no overflow");

        assert_eq!(outcome, EnumerationOutcome::Incomplete { num_solutions: 0 });
    }

    #[test]
    fn an_unsatisfiable_search_reports_infeasible() {
        let mut solver = Solver::default();
        // y = x + 3 and y = x + 5 cannot both hold.
        let x = solver.new_variable(0, 10);
        let y = solver.new_variable(0, 20);
        let _ = solver
            .add_propagator(AdditionToConstantArgs {
                x,
                y,
                constant: 3,
            })
            .expect("feasible in isolation");
        let result = solver.add_propagator(AdditionToConstantArgs {
            x,
            y,
            constant: 5,
        });

        // The contradiction already surfaces at the root.
        assert_eq!(result, Err(ConstraintOperationError::InfeasibleAtRoot));
    }

    #[test]
    fn entering_an_sos2_branch_fixes_the_inactive_members() {
        let mut solver = Solver::default();
        let members: Vec<DomainId> = (0..4).map(|_| solver.new_variable(0, 5)).collect();
        let row = solver.add_sos2_row(&members);

        let mut status = Sos2Status::default();
        status.append(1);
        status.append(2);

        let entered = solver
            .enter_sos2_branch(row, status)
            .expect("no overflow");
        assert!(entered);
        assert_eq!(solver.upper_bound(members[0]), 0);
        assert_eq!(solver.upper_bound(members[3]), 0);
        assert_eq!(solver.upper_bound(members[1]), 5);

        let node = solver.leave_sos2_branch();
        assert_eq!(node.row, row);
        assert_eq!(solver.upper_bound(members[0]), 5);
        assert!(solver.sos_nodes().is_empty());
    }

    #[test]
    fn an_immediately_infeasible_sos2_branch_is_rolled_back() {
        let mut solver = Solver::default();
        // The second member can never be zero, so a branch deactivating it must fail.
        let a = solver.new_variable(0, 5);
        let b = solver.new_variable(2, 5);
        let row = solver.add_sos2_row(&[a, b]);

        let mut status = Sos2Status::default();
        status.append(0);

        let entered = solver
            .enter_sos2_branch(row, status)
            .expect("no overflow");
        assert!(!entered);
        assert_eq!(solver.lower_bound(b), 2);
        assert!(solver.sos_nodes().is_empty());
    }

    /// A propagator that never narrows anything; used to check queueing bookkeeping.
    struct Inert;

    impl Propagator for Inert {
        fn name(&self) -> &str {
            "Inert"
        }

        fn propagate(&mut self, _: PropagationContextMut<'_>) -> PropagationStatus {
            Ok(())
        }
    }

    struct InertArgs;

    impl PropagatorConstructor for InertArgs {
        type PropagatorImpl = Inert;

        fn create(self, _: PropagatorConstructorContext<'_>) -> Inert {
            Inert
        }
    }

    #[test]
    fn propagation_reaches_fixpoint_with_inert_propagators() {
        let mut solver = Solver::default();
        let _ = solver.new_variable(0, 1);
        let _ = solver.add_propagator(InertArgs).expect("feasible");
        let _ = solver.add_propagator(InertArgs).expect("feasible");

        assert_eq!(solver.statistics().num_propagations, 2);
    }
}
