//! The variable store: interval domains, their undo trail, and change notification.

use std::collections::VecDeque;

use enumset::EnumSet;

use crate::basic_types::Trail;
use crate::containers::KeyedVec;
use crate::engine::cause::CauseId;
use crate::engine::notifications::DomainEvent;
use crate::engine::notifications::DomainEvents;
use crate::engine::notifications::Notification;
use crate::engine::variables::BoolValue;
use crate::engine::variables::DomainId;
use crate::engine::variables::Literal;
use crate::marrow_assert_moderate;
use crate::marrow_assert_simple;
use crate::math::Interval;
use crate::math::HORIZON;
use crate::propagation::LocalId;
use crate::propagation::PropagatorId;

/// Marker error: a narrowing left a domain with no values.
#[derive(Clone, Copy, Debug)]
pub(crate) struct EmptyDomain {
    pub(crate) domain: DomainId,
}

/// The causes currently justifying the two bounds of a domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct BoundCauses {
    pub(crate) lower: CauseId,
    pub(crate) upper: CauseId,
}

/// One narrowing on the undo trail. Undoing the entry restores the domain, including the
/// justifications of its bounds, bit for bit.
#[derive(Clone, Copy, Debug)]
pub(crate) struct TrailEntry {
    domain: DomainId,
    old_bounds: Interval,
    old_causes: BoundCauses,
    /// The justification of this narrowing.
    pub(crate) cause: CauseId,
}

#[derive(Clone, Copy, Debug)]
struct Watcher {
    propagator: PropagatorId,
    local_id: LocalId,
    events: EnumSet<DomainEvent>,
}

#[derive(Clone, Copy, Debug)]
struct ChannelWatcher {
    propagator: PropagatorId,
    local_id: LocalId,
}

/// The observer registry of one variable: ordered subscriber lists, invoked in registration
/// order. Literals additionally have dedicated became-true/became-false channels.
#[derive(Clone, Debug, Default)]
struct WatchList {
    modification: Vec<Watcher>,
    when_true: Vec<ChannelWatcher>,
    when_false: Vec<ChannelWatcher>,
}

/// The owner of all variable domains.
///
/// Domains shrink monotonically within one search branch through [`DomainStore::impose_range`],
/// and only widen by [`DomainStore::backtrack_to`] a previously recorded checkpoint. Every
/// narrowing is recorded on the trail, together with its [`CauseId`], before any subscriber is
/// notified.
#[derive(Clone, Debug, Default)]
pub struct DomainStore {
    trail: Trail<TrailEntry>,
    bounds: KeyedVec<DomainId, Interval>,
    initial_bounds: KeyedVec<DomainId, Interval>,
    bound_causes: KeyedVec<DomainId, BoundCauses>,
    watchers: KeyedVec<DomainId, WatchList>,
    pending: VecDeque<Notification>,
}

impl DomainStore {
    /// Registers the domain of a new integer variable. Only allowed at the root, before any
    /// decision has been made.
    pub(crate) fn new_domain(&mut self, lower: i64, upper: i64) -> DomainId {
        marrow_assert_simple!(
            self.trail.get_checkpoint() == 0,
            "variables can only be created at the root"
        );
        marrow_assert_simple!(
            lower <= upper,
            "cannot create a variable with an empty domain"
        );
        marrow_assert_simple!(
            lower >= -HORIZON && upper <= HORIZON,
            "domain bounds must lie within the representable horizon"
        );

        let interval = Interval::new(lower, upper);
        let id = self.bounds.push(interval);
        let _ = self.initial_bounds.push(interval);
        let _ = self.bound_causes.push(BoundCauses {
            lower: CauseId::ROOT,
            upper: CauseId::ROOT,
        });
        let _ = self.watchers.push(WatchList::default());

        id
    }

    pub fn num_domains(&self) -> usize {
        self.bounds.len()
    }

    /// Iterate over all variables in creation order.
    pub fn domains(&self) -> impl Iterator<Item = DomainId> {
        self.bounds.keys()
    }

    pub fn lower_bound(&self, domain: DomainId) -> i64 {
        self.bounds[domain].lower
    }

    pub fn upper_bound(&self, domain: DomainId) -> i64 {
        self.bounds[domain].upper
    }

    pub fn interval(&self, domain: DomainId) -> Interval {
        self.bounds[domain]
    }

    pub fn initial_interval(&self, domain: DomainId) -> Interval {
        self.initial_bounds[domain]
    }

    pub fn is_fixed(&self, domain: DomainId) -> bool {
        let interval = self.bounds[domain];
        interval.lower == interval.upper
    }

    pub fn contains(&self, domain: DomainId, value: i64) -> bool {
        self.bounds[domain].contains(value)
    }

    pub fn literal_value(&self, literal: Literal) -> BoolValue {
        let interval = self.bounds[literal.domain_id()];
        if interval.lower == 1 {
            BoolValue::True
        } else if interval.upper == 0 {
            BoolValue::False
        } else {
            BoolValue::Unassigned
        }
    }

    pub(crate) fn bound_causes(&self, domain: DomainId) -> BoundCauses {
        self.bound_causes[domain]
    }

    pub(crate) fn num_trail_entries(&self) -> usize {
        self.trail.len()
    }
}

// Subscription registry.
impl DomainStore {
    pub(crate) fn watch_modification(
        &mut self,
        domain: DomainId,
        events: DomainEvents,
        propagator: PropagatorId,
        local_id: LocalId,
    ) {
        self.watchers[domain].modification.push(Watcher {
            propagator,
            local_id,
            events: events.get_events(),
        });
    }

    pub(crate) fn watch_true(
        &mut self,
        literal: Literal,
        propagator: PropagatorId,
        local_id: LocalId,
    ) {
        self.watchers[literal.domain_id()].when_true.push(ChannelWatcher {
            propagator,
            local_id,
        });
    }

    pub(crate) fn watch_false(
        &mut self,
        literal: Literal,
        propagator: PropagatorId,
        local_id: LocalId,
    ) {
        self.watchers[literal.domain_id()].when_false.push(ChannelWatcher {
            propagator,
            local_id,
        });
    }
}

// Mutation and backtracking.
impl DomainStore {
    /// Intersects the domain of the variable with `[low, high]`.
    ///
    /// Returns `Ok(false)` if the intersection is a no-op, `Ok(true)` on an actual narrowing,
    /// and `Err(EmptyDomain)` if the intersection is empty. A narrowing (including the one that
    /// empties the domain) is recorded on the trail before any subscriber work item is queued, so
    /// a subscriber that detects failure still leaves a well-formed, backtrackable log.
    pub(crate) fn impose_range(
        &mut self,
        domain: DomainId,
        low: i64,
        high: i64,
        cause: CauseId,
    ) -> Result<bool, EmptyDomain> {
        let old = self.bounds[domain];
        marrow_assert_moderate!(
            !old.is_empty(),
            "an empty domain must be backtracked before further imposition"
        );

        let new = old.intersect(Interval { lower: low, upper: high });
        if new == old {
            return Ok(false);
        }

        self.trail.push(TrailEntry {
            domain,
            old_bounds: old,
            old_causes: self.bound_causes[domain],
            cause,
        });
        self.bounds[domain] = new;
        if new.lower > old.lower {
            self.bound_causes[domain].lower = cause;
        }
        if new.upper < old.upper {
            self.bound_causes[domain].upper = cause;
        }

        if new.is_empty() {
            return Err(EmptyDomain { domain });
        }

        self.queue_notifications(domain, old, new);

        Ok(true)
    }

    pub(crate) fn impose_true(
        &mut self,
        literal: Literal,
        cause: CauseId,
    ) -> Result<bool, EmptyDomain> {
        self.impose_range(literal.domain_id(), 1, 1, cause)
    }

    pub(crate) fn impose_false(
        &mut self,
        literal: Literal,
        cause: CauseId,
    ) -> Result<bool, EmptyDomain> {
        self.impose_range(literal.domain_id(), 0, 0, cause)
    }

    fn queue_notifications(&mut self, domain: DomainId, old: Interval, new: Interval) {
        let mut events: EnumSet<DomainEvent> = EnumSet::empty();
        if new.lower > old.lower {
            events |= DomainEvent::LowerBound;
        }
        if new.upper < old.upper {
            events |= DomainEvent::UpperBound;
        }
        let became_fixed = new.lower == new.upper && old.lower != old.upper;
        if became_fixed {
            events |= DomainEvent::Assign;
        }

        for watcher in &self.watchers[domain].modification {
            for event in (watcher.events & events).iter() {
                self.pending.push_back(Notification {
                    propagator: watcher.propagator,
                    local_id: watcher.local_id,
                    domain,
                    event,
                });
            }
        }

        if became_fixed && new.lower == 1 {
            for watcher in &self.watchers[domain].when_true {
                self.pending.push_back(Notification {
                    propagator: watcher.propagator,
                    local_id: watcher.local_id,
                    domain,
                    event: DomainEvent::Assign,
                });
            }
        }
        if became_fixed && new.upper == 0 {
            for watcher in &self.watchers[domain].when_false {
                self.pending.push_back(Notification {
                    propagator: watcher.propagator,
                    local_id: watcher.local_id,
                    domain,
                    event: DomainEvent::Assign,
                });
            }
        }
    }

    pub(crate) fn drain_pending(&mut self) -> Vec<Notification> {
        self.pending.drain(..).collect()
    }

    pub(crate) fn clear_pending(&mut self) {
        self.pending.clear();
    }

    /// The current checkpoint, to be recorded as the baseline of a decision.
    pub(crate) fn checkpoint(&self) -> usize {
        self.trail.get_checkpoint()
    }

    pub(crate) fn new_checkpoint(&mut self) {
        self.trail.new_checkpoint();
    }

    /// Undoes all narrowings recorded after the given checkpoint, restoring bounds and their
    /// justifications to exactly the state they had when the checkpoint was created.
    pub(crate) fn backtrack_to(&mut self, checkpoint: usize) {
        self.pending.clear();

        let undone: Vec<TrailEntry> = self.trail.synchronise(checkpoint).collect();
        for entry in undone {
            self.bounds[entry.domain] = entry.old_bounds;
            self.bound_causes[entry.domain] = entry.old_causes;
        }
    }

    /// Snapshot the current assignment. Every domain must be fixed.
    pub(crate) fn extract_solution(&self) -> crate::basic_types::Solution {
        let mut values = KeyedVec::default();
        for domain in self.domains() {
            marrow_assert_simple!(
                self.is_fixed(domain),
                "a solution can only be extracted from a fully fixed store"
            );
            let _ = values.push(self.lower_bound(domain));
        }
        crate::basic_types::Solution::new(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn imposition_intersects_with_the_current_domain() {
        let mut store = DomainStore::default();
        let x = store.new_domain(0, 10);

        let narrowed = store
            .impose_range(x, 2, 15, CauseId::ROOT)
            .expect("non-empty");
        assert!(narrowed);
        assert_eq!(store.interval(x), Interval::new(2, 10));
    }

    #[test]
    fn a_weaker_imposition_is_a_no_op() {
        let mut store = DomainStore::default();
        let x = store.new_domain(3, 7);

        let narrowed = store
            .impose_range(x, 0, 100, CauseId::ROOT)
            .expect("non-empty");
        assert!(!narrowed);
        assert_eq!(store.num_trail_entries(), 0);
    }

    #[test]
    fn an_empty_intersection_is_reported_and_recorded() {
        let mut store = DomainStore::default();
        let x = store.new_domain(0, 4);

        store.new_checkpoint();
        let result = store.impose_range(x, 7, 9, CauseId::ROOT);
        assert!(result.is_err());
        assert!(store.interval(x).is_empty());

        store.backtrack_to(0);
        assert_eq!(store.interval(x), Interval::new(0, 4));
    }

    #[test]
    fn backtracking_restores_domains_bit_for_bit() {
        let mut store = DomainStore::default();
        let x = store.new_domain(0, 10);
        let y = store.new_domain(-5, 5);

        store.new_checkpoint();
        let _ = store.impose_range(x, 2, 8, CauseId::ROOT).expect("non-empty");
        let _ = store.impose_range(y, 0, 5, CauseId::ROOT).expect("non-empty");
        store.new_checkpoint();
        let _ = store.impose_range(x, 5, 5, CauseId::ROOT).expect("non-empty");

        store.backtrack_to(1);
        assert_eq!(store.interval(x), Interval::new(2, 8));
        assert_eq!(store.interval(y), Interval::new(0, 5));

        store.backtrack_to(0);
        assert_eq!(store.interval(x), Interval::new(0, 10));
        assert_eq!(store.interval(y), Interval::new(-5, 5));
    }

    #[test]
    fn literal_values_follow_the_backing_domain() {
        let mut store = DomainStore::default();
        let literal = Literal::new(store.new_domain(0, 1));

        assert_eq!(store.literal_value(literal), BoolValue::Unassigned);

        let _ = store.impose_true(literal, CauseId::ROOT).expect("non-empty");
        assert_eq!(store.literal_value(literal), BoolValue::True);
    }
}
