use crate::basic_types::NumericOverflow;
use crate::engine::cause::CauseId;
use crate::engine::domains::EmptyDomain;
use crate::engine::variables::DomainId;
use crate::math::Interval;

/// The result of invoking a propagator. The propagation can either succeed or identify an
/// inconsistency, in which case the error variant captures what is needed to recover from it.
pub type PropagationStatus = Result<(), Inconsistency>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Inconsistency {
    /// A domain became empty. The search engine recovers from this locally by backtracking.
    EmptyDomain(StoredConflict),
    /// Interval arithmetic exceeded the representable range. This is not recoverable by
    /// backtracking and is surfaced to the caller.
    Overflow(NumericOverflow),
}

impl From<NumericOverflow> for Inconsistency {
    fn from(overflow: NumericOverflow) -> Self {
        Inconsistency::Overflow(overflow)
    }
}

impl From<StoredConflict> for Inconsistency {
    fn from(conflict: StoredConflict) -> Self {
        Inconsistency::EmptyDomain(conflict)
    }
}

/// A snapshot of a detected contradiction, captured before the offending narrowing is undone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StoredConflict {
    /// The variable whose domain became empty.
    pub(crate) domain: DomainId,
    /// The (empty) interval of the variable at failure time.
    pub(crate) interval: Interval,
    /// The cause of the narrowing that emptied the domain.
    pub(crate) cause: CauseId,
}

impl StoredConflict {
    pub(crate) fn new(empty_domain: EmptyDomain, interval: Interval, cause: CauseId) -> Self {
        StoredConflict {
            domain: empty_domain.domain,
            interval,
            cause,
        }
    }
}
