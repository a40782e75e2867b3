//! Domain-change events and the work items they produce for subscribed propagators.

use enumset::enum_set;
use enumset::EnumSet;
use enumset::EnumSetType;

use crate::engine::variables::DomainId;
use crate::propagation::LocalId;
use crate::propagation::PropagatorId;

/// A description of the kinds of events that can happen on a domain variable.
#[derive(Debug, EnumSetType, Hash)]
pub enum DomainEvent {
    /// Event where a variable domain collapses to a single value.
    Assign,
    /// Event where a variable domain tightens the lower bound.
    LowerBound,
    /// Event where a variable domain tightens the upper bound.
    UpperBound,
}

impl std::fmt::Display for DomainEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainEvent::Assign => write!(f, "[Event:Assign]"),
            DomainEvent::LowerBound => write!(f, "[Event:LB]"),
            DomainEvent::UpperBound => write!(f, "[Event:UB]"),
        }
    }
}

/// A set of [`DomainEvent`]s to subscribe to.
#[derive(Debug, Copy, Clone)]
pub struct DomainEvents {
    events: EnumSet<DomainEvent>,
}

impl DomainEvents {
    /// DomainEvents with both lower and upper bound tightening (but not assignment).
    pub const BOUNDS: DomainEvents = DomainEvents::create(enum_set!(
        DomainEvent::LowerBound | DomainEvent::UpperBound
    ));
    /// DomainEvents with lower and upper bound tightening, and assigning to a single value.
    pub const ANY: DomainEvents = DomainEvents::create(enum_set!(
        DomainEvent::Assign | DomainEvent::LowerBound | DomainEvent::UpperBound
    ));
    /// DomainEvents with only lower bound tightening.
    pub const LOWER_BOUND: DomainEvents = DomainEvents::create(enum_set!(DomainEvent::LowerBound));
    /// DomainEvents with only upper bound tightening.
    pub const UPPER_BOUND: DomainEvents = DomainEvents::create(enum_set!(DomainEvent::UpperBound));
    /// DomainEvents with only assigning to a single value.
    pub const ASSIGN: DomainEvents = DomainEvents::create(enum_set!(DomainEvent::Assign));

    pub(crate) const fn create(events: EnumSet<DomainEvent>) -> DomainEvents {
        DomainEvents { events }
    }

    pub(crate) fn get_events(&self) -> EnumSet<DomainEvent> {
        self.events
    }
}

/// A pending work item: a subscribed propagator must be told that `event` happened to `domain`.
///
/// Work items are appended in subscription (registration) order when a domain narrows, before any
/// subscriber runs, and drained by the solver to compute the propagation fixpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Notification {
    pub(crate) propagator: PropagatorId,
    pub(crate) local_id: LocalId,
    pub(crate) domain: DomainId,
    pub(crate) event: DomainEvent,
}
