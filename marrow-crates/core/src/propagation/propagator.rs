use crate::basic_types::PropagationStatus;
use crate::engine::notifications::DomainEvent;
use crate::propagation::LocalId;
use crate::propagation::PropagationContextMut;

/// A propagator removes values from domains which will never be in any solution, or raises
/// explicit conflicts.
///
/// The required functions are [`Propagator::name`] and [`Propagator::propagate`]; the other
/// functions have default implementations.
pub trait Propagator {
    /// Return the name of the propagator.
    ///
    /// This is a convenience method that is used for printing.
    fn name(&self) -> &str;

    /// Tighten the domains of the registered variables as far as the current domains allow.
    ///
    /// In case no inconsistency has been detected this function should return [`Result::Ok`],
    /// otherwise it should return an [`Inconsistency`](crate::basic_types::Inconsistency):
    /// either a conflict because a domain became empty, or a numeric overflow.
    ///
    /// Propagators must be idempotent against redundant notification: the solver may re-run a
    /// propagator even when none of its variables changed, and doing so must be a no-op.
    fn propagate(&mut self, context: PropagationContextMut<'_>) -> PropagationStatus;

    /// Returns whether the propagator should be enqueued for propagation when a [`DomainEvent`]
    /// happens to one of the variables it subscribed to at registration.
    ///
    /// This should only be used for computationally cheap filtering of irrelevant events;
    /// expensive work belongs in [`Propagator::propagate`]. By default the propagator is always
    /// enqueued for every event it is subscribed to.
    fn notify(&mut self, _local_id: LocalId, _event: DomainEvent) -> EnqueueDecision {
        EnqueueDecision::Enqueue
    }
}

/// Indicator of what to do when a propagator is notified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnqueueDecision {
    /// The propagator should be enqueued.
    Enqueue,
    /// The propagator should not be enqueued.
    Skip,
}
