use crate::engine::domains::DomainStore;
use crate::engine::notifications::DomainEvents;
use crate::engine::variables::DomainId;
use crate::engine::variables::Literal;
use crate::propagation::LocalId;
use crate::propagation::Propagator;
use crate::propagation::PropagatorId;

/// A type which constructs a [`Propagator`] and registers its subscriptions.
///
/// Typically this is the struct carrying the arguments of the constraint; separating construction
/// from the propagator itself means the propagator never sees half-registered state.
pub trait PropagatorConstructor {
    /// The propagator that is created.
    type PropagatorImpl: Propagator;

    /// Create the propagator, registering subscriptions through `context`.
    fn create(self, context: PropagatorConstructorContext<'_>) -> Self::PropagatorImpl;
}

/// The interface through which a [`PropagatorConstructor`] hooks its propagator into the
/// notification machinery.
#[derive(Debug)]
pub struct PropagatorConstructorContext<'a> {
    domains: &'a mut DomainStore,
    propagator: PropagatorId,
}

impl<'a> PropagatorConstructorContext<'a> {
    pub(crate) fn new(domains: &'a mut DomainStore, propagator: PropagatorId) -> Self {
        PropagatorConstructorContext {
            domains,
            propagator,
        }
    }

    /// Subscribe to the given events on the variable. The propagator will be notified with the
    /// given [`LocalId`], in registration order relative to the variable's other subscribers.
    pub fn register(&mut self, domain: DomainId, events: DomainEvents, local_id: LocalId) {
        self.domains
            .watch_modification(domain, events, self.propagator, local_id);
    }

    /// Subscribe to the dedicated became-true channel of a literal.
    pub fn register_true(&mut self, literal: Literal, local_id: LocalId) {
        self.domains.watch_true(literal, self.propagator, local_id);
    }

    /// Subscribe to the dedicated became-false channel of a literal.
    pub fn register_false(&mut self, literal: Literal, local_id: LocalId) {
        self.domains.watch_false(literal, self.propagator, local_id);
    }
}
