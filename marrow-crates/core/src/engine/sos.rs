//! Branch management for special-ordered-set constraints of type 2.
//!
//! An SOS2 row is an ordered group of variables of which at most two, and then only two adjacent
//! ones, may be nonzero. Branch-and-bound explores such rows by picking an adjacent pair to keep
//! "active" (nonzero-eligible) and fixing the remaining members to zero; [`Sos2Status`] tracks
//! the active pair of one row, and [`SosNodeManager`] is the LIFO stack of branch nodes currently
//! entered.

use crate::containers::StorageKey;
use crate::engine::search::Baseline;
use crate::marrow_assert_simple;

/// Identifier of an SOS2 row registered with the solver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SosRowId(pub(crate) u32);

impl StorageKey for SosRowId {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        SosRowId(index as u32)
    }
}

/// Tracks which members (by position in the row) of an SOS2 row are currently nonzero-eligible.
///
/// At most two members are active at a time, and when two are active they must be adjacent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sos2Status {
    active: Vec<usize>,
}

impl Sos2Status {
    pub fn append(&mut self, member: usize) {
        marrow_assert_simple!(
            self.active.len() < 2,
            "an SOS2 row has at most two active members"
        );
        if let Some(&existing) = self.active.first() {
            marrow_assert_simple!(
                existing.abs_diff(member) == 1,
                "two active SOS2 members must be adjacent"
            );
        }
        self.active.push(member);
    }

    pub fn remove(&mut self, member: usize) {
        let position = self
            .active
            .iter()
            .position(|&active| active == member)
            .expect("can only remove an active member");
        let _ = self.active.remove(position);
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    pub fn active(&self) -> &[usize] {
        &self.active
    }

    pub fn is_active(&self, member: usize) -> bool {
        self.active.contains(&member)
    }
}

/// A pending SOS2 branch: the row, its active pair, and the baseline to restore on leaving.
#[derive(Clone, Debug)]
pub struct SosRowNode {
    pub row: SosRowId,
    pub status: Sos2Status,
    pub(crate) baseline: Baseline,
}

/// A LIFO stack of SOS branch nodes awaiting exploration.
#[derive(Clone, Debug, Default)]
pub struct SosNodeManager {
    stack: Vec<SosRowNode>,
}

impl SosNodeManager {
    pub(crate) fn push(&mut self, node: SosRowNode) {
        self.stack.push(node);
    }

    pub(crate) fn pop(&mut self) -> SosRowNode {
        self.stack
            .pop()
            .expect("popping an empty SOS node stack is a programming error")
    }

    pub fn peek(&self) -> Option<&SosRowNode> {
        self.stack.last()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}
