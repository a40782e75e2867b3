//! A harness for testing propagators in isolation: a variable store, a cause arena, and direct
//! invocation of a single propagator, without the search machinery around it.

use crate::basic_types::PropagationStatus;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::engine::cause::CauseArena;
use crate::engine::cause::CauseId;
use crate::engine::domains::DomainStore;
use crate::engine::domains::EmptyDomain;
use crate::engine::variables::BoolValue;
use crate::engine::variables::DomainId;
use crate::engine::variables::Literal;
use crate::propagation::PropagationContextMut;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;
use crate::propagation::PropagatorId;

#[derive(Default)]
pub(crate) struct TestSolver {
    pub(crate) domains: DomainStore,
    pub(crate) causes: CauseArena,
    propagators: KeyedVec<PropagatorId, Box<dyn Propagator>>,
}

impl TestSolver {
    pub(crate) fn new_variable(&mut self, lower: i64, upper: i64) -> DomainId {
        self.domains.new_domain(lower, upper)
    }

    pub(crate) fn new_literal(&mut self) -> Literal {
        Literal::new(self.domains.new_domain(0, 1))
    }

    /// Construct the propagator and run its initial propagation.
    pub(crate) fn new_propagator<Constructor>(
        &mut self,
        constructor: Constructor,
    ) -> Result<PropagatorId, crate::basic_types::Inconsistency>
    where
        Constructor: PropagatorConstructor,
        Constructor::PropagatorImpl: 'static,
    {
        let id = PropagatorId::create_from_index(self.propagators.len());
        let propagator =
            constructor.create(PropagatorConstructorContext::new(&mut self.domains, id));
        let _ = self.propagators.push(Box::new(propagator));

        self.propagate(id)?;
        Ok(id)
    }

    /// Run one propagator once. Notifications produced by its narrowings are discarded; tests
    /// re-run the propagator explicitly.
    pub(crate) fn propagate(&mut self, propagator: PropagatorId) -> PropagationStatus {
        let result = self.propagators[propagator].propagate(PropagationContextMut::new(
            &mut self.domains,
            &mut self.causes,
            propagator,
        ));
        self.domains.clear_pending();
        result
    }

    pub(crate) fn impose(
        &mut self,
        domain: DomainId,
        low: i64,
        high: i64,
    ) -> Result<bool, EmptyDomain> {
        let result = self.domains.impose_range(domain, low, high, CauseId::ROOT);
        self.domains.clear_pending();
        result
    }

    pub(crate) fn impose_true(&mut self, literal: Literal) -> Result<bool, EmptyDomain> {
        self.impose(literal.domain_id(), 1, 1)
    }

    pub(crate) fn impose_false(&mut self, literal: Literal) -> Result<bool, EmptyDomain> {
        self.impose(literal.domain_id(), 0, 0)
    }

    pub(crate) fn lower_bound(&self, domain: DomainId) -> i64 {
        self.domains.lower_bound(domain)
    }

    pub(crate) fn upper_bound(&self, domain: DomainId) -> i64 {
        self.domains.upper_bound(domain)
    }

    pub(crate) fn assert_bounds(&self, domain: DomainId, lower: i64, upper: i64) {
        let actual_lower = self.domains.lower_bound(domain);
        let actual_upper = self.domains.upper_bound(domain);

        assert_eq!(
            (lower, upper),
            (actual_lower, actual_upper),
            "expected the domain of {domain} to be [{lower}, {upper}] but it is [{actual_lower}, {actual_upper}]"
        );
    }

    pub(crate) fn assert_literal(&self, literal: Literal, expected: BoolValue) {
        let actual = self.domains.literal_value(literal);
        assert_eq!(
            expected, actual,
            "expected {literal} to be {expected:?} but it is {actual:?}"
        );
    }
}
