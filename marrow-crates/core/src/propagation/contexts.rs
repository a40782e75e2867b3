use itertools::Itertools;

use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatus;
use crate::basic_types::StoredConflict;
use crate::engine::cause::Cause;
use crate::engine::cause::CauseArena;
use crate::engine::cause::CauseId;
use crate::engine::domains::DomainStore;
use crate::engine::variables::BoolValue;
use crate::engine::variables::DomainId;
use crate::engine::variables::Literal;
use crate::math::Interval;
use crate::propagation::PropagatorId;

/// The view a propagator has on the solver state while propagating.
///
/// Reads go straight to the [`DomainStore`]; narrowings go through [`PropagationContextMut::post`]
/// and friends, which attribute each narrowing to a freshly allocated
/// [`Cause::Propagation`] whose premises are the causes currently justifying the bounds of the
/// named premise variables.
#[derive(Debug)]
pub struct PropagationContextMut<'a> {
    domains: &'a mut DomainStore,
    causes: &'a mut CauseArena,
    propagator: PropagatorId,
}

impl<'a> PropagationContextMut<'a> {
    pub(crate) fn new(
        domains: &'a mut DomainStore,
        causes: &'a mut CauseArena,
        propagator: PropagatorId,
    ) -> Self {
        PropagationContextMut {
            domains,
            causes,
            propagator,
        }
    }

    pub fn lower_bound(&self, domain: DomainId) -> i64 {
        self.domains.lower_bound(domain)
    }

    pub fn upper_bound(&self, domain: DomainId) -> i64 {
        self.domains.upper_bound(domain)
    }

    pub fn interval(&self, domain: DomainId) -> Interval {
        self.domains.interval(domain)
    }

    pub fn is_fixed(&self, domain: DomainId) -> bool {
        self.domains.is_fixed(domain)
    }

    pub fn is_true(&self, literal: Literal) -> bool {
        self.domains.literal_value(literal) == BoolValue::True
    }

    pub fn is_false(&self, literal: Literal) -> bool {
        self.domains.literal_value(literal) == BoolValue::False
    }

    /// Intersect the domain of the variable with the given interval, justified by the current
    /// bounds of the `premises` variables.
    pub fn post(
        &mut self,
        domain: DomainId,
        interval: Interval,
        premises: &[DomainId],
    ) -> PropagationStatus {
        let cause = self.make_cause(premises);
        match self
            .domains
            .impose_range(domain, interval.lower, interval.upper, cause)
        {
            Ok(_) => Ok(()),
            Err(empty) => Err(Inconsistency::EmptyDomain(StoredConflict::new(
                empty,
                self.domains.interval(domain),
                cause,
            ))),
        }
    }

    pub fn post_true(&mut self, literal: Literal, premises: &[DomainId]) -> PropagationStatus {
        self.post(literal.domain_id(), Interval::point(1), premises)
    }

    pub fn post_false(&mut self, literal: Literal, premises: &[DomainId]) -> PropagationStatus {
        self.post(literal.domain_id(), Interval::point(0), premises)
    }

    fn make_cause(&mut self, premises: &[DomainId]) -> CauseId {
        let premise_causes = premises
            .iter()
            .flat_map(|&domain| {
                let causes = self.domains.bound_causes(domain);
                [causes.lower, causes.upper]
            })
            .filter(|&cause| cause != CauseId::ROOT)
            .unique()
            .collect();

        self.causes.push(Cause::Propagation {
            propagator: self.propagator,
            premises: premise_causes,
        })
    }
}
