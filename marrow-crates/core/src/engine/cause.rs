//! Justification tracking for domain narrowings.
//!
//! Every successful narrowing is attributed to exactly one [`Cause`], stored in an append-only
//! arena indexed by [`CauseId`]. Conflict diagnosis is then a backward walk over arena indices
//! rather than pointer chasing, and backtracking simply truncates the arena.

use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::engine::sos::SosRowId;
use crate::engine::variables::DomainId;
use crate::marrow_assert_simple;
use crate::propagation::PropagatorId;

/// An index into the [`CauseArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CauseId {
    id: u32,
}

impl CauseId {
    /// The well-known sentinel for facts that hold independent of any decision. It is always
    /// present at index zero of the arena.
    pub const ROOT: CauseId = CauseId { id: 0 };
}

impl StorageKey for CauseId {
    fn index(&self) -> usize {
        self.id as usize
    }

    fn create_from_index(index: usize) -> Self {
        CauseId { id: index as u32 }
    }
}

/// The justification of a single domain narrowing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cause {
    /// The empty justification group: the narrowing holds at the root level, independent of any
    /// decision.
    RootLevelDeduction,
    /// A search decision assigned (or ruled out) a value of `variable`.
    Decision { index: usize, variable: DomainId },
    /// Entering a special-ordered-set branch fixed the inactive members of a row.
    SosBranch { row: SosRowId },
    /// A propagator derived the narrowing from the bounds justified by `premises`.
    Propagation {
        propagator: PropagatorId,
        premises: Vec<CauseId>,
    },
}

/// The arena of justifications, truncated on backtrack.
#[derive(Clone, Debug)]
pub struct CauseArena {
    entries: KeyedVec<CauseId, Cause>,
}

impl Default for CauseArena {
    fn default() -> Self {
        let mut entries = KeyedVec::default();
        let root = entries.push(Cause::RootLevelDeduction);
        marrow_assert_simple!(root == CauseId::ROOT);

        CauseArena { entries }
    }
}

impl CauseArena {
    pub(crate) fn push(&mut self, cause: Cause) -> CauseId {
        self.entries.push(cause)
    }

    pub(crate) fn get(&self, id: CauseId) -> &Cause {
        &self.entries[id]
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Drop all entries allocated after the given length. The root sentinel is never dropped.
    pub(crate) fn truncate(&mut self, len: usize) {
        marrow_assert_simple!(len >= 1, "the root sentinel must stay in the arena");
        self.entries.truncate(len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_root_sentinel_is_at_index_zero() {
        let arena = CauseArena::default();
        assert_eq!(arena.get(CauseId::ROOT), &Cause::RootLevelDeduction);
    }

    #[test]
    fn truncation_drops_entries_beyond_the_marker() {
        let mut arena = CauseArena::default();
        let marker = arena.len();
        let id = arena.push(Cause::Decision {
            index: 0,
            variable: DomainId::new(1),
        });

        assert_eq!(id.index(), marker);

        arena.truncate(marker);
        assert_eq!(arena.len(), marker);
    }
}
