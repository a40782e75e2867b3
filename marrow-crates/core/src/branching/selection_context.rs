use rand::rngs::SmallRng;

use crate::engine::domains::DomainStore;
use crate::engine::variables::DomainId;
use crate::math::Interval;

/// The view that selectors have on the solver state while a decision is being made.
#[derive(Debug)]
pub struct SelectionContext<'a> {
    domains: &'a DomainStore,
    rng: &'a mut SmallRng,
}

impl<'a> SelectionContext<'a> {
    pub(crate) fn new(domains: &'a DomainStore, rng: &'a mut SmallRng) -> Self {
        SelectionContext { domains, rng }
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

    /// The number of values in the current domain of the variable.
    pub fn domain_size(&self, domain: DomainId) -> i64 {
        // The size of a non-empty domain is at most 2 * HORIZON + 1 < 2^63, so the count always
        // fits a signed integer.
        self.domains.interval(domain).size() as i64
    }

    pub fn is_fixed(&self, domain: DomainId) -> bool {
        self.domains.is_fixed(domain)
    }

    /// The random generator of the solver; selectors that randomise draw from it so runs stay
    /// reproducible under a fixed seed.
    pub fn random(&mut self) -> &mut SmallRng {
        self.rng
    }
}
