use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::containers::HashMap;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::evaluator::TermId;
use crate::evaluator::TermKind;
use crate::marrow_assert_moderate;
use crate::marrow_assert_simple;

#[derive(Clone, Debug)]
struct TermNode {
    kind: TermKind,
    value: f64,
    /// One more than the maximum depth of the inputs; zero for leaves and constants.
    depth: usize,
    /// Whether the node is scheduled in the pending heap.
    dirty: bool,
}

/// An arena DAG of [`TermKind`] nodes with change-driven recomputation.
///
/// Constructing a term computes its value eagerly from the current values of its inputs. After
/// leaves move, [`TermGraph::recompute_pass`] restores consistency by recomputing scheduled nodes
/// in non-decreasing depth order, so a node's inputs are always current when it recomputes; a
/// node whose stored value did not change (compared bit for bit, so `NaN` transitions are
/// detected too) does not schedule its dependents. After a completed pass, every stored value
/// equals the pure function of its inputs' stored values.
#[derive(Clone, Debug, Default)]
pub struct TermGraph {
    nodes: KeyedVec<TermId, TermNode>,
    dependents: KeyedVec<TermId, Vec<TermId>>,
    /// Scheduled recomputations, ordered by (depth, index).
    pending: BinaryHeap<Reverse<(usize, u32)>>,
}

// Construction.
impl TermGraph {
    pub fn constant(&mut self, value: f64) -> TermId {
        self.insert_leaf(TermKind::Constant(value), value)
    }

    /// A numeric leaf with the given initial value.
    pub fn leaf(&mut self, value: f64) -> TermId {
        self.insert_leaf(TermKind::Leaf, value)
    }

    /// A Boolean leaf with the given initial violation.
    pub fn bool_leaf(&mut self, violation: f64) -> TermId {
        self.insert_leaf(TermKind::BoolLeaf, violation)
    }

    pub fn sum(&mut self, children: &[TermId]) -> TermId {
        self.insert(TermKind::Sum(children.to_vec()))
    }

    pub fn product(&mut self, children: &[TermId]) -> TermId {
        self.insert(TermKind::Product(children.to_vec()))
    }

    pub fn quotient(&mut self, numerator: TermId, denominator: TermId) -> TermId {
        self.insert(TermKind::Quotient(numerator, denominator))
    }

    pub fn min(&mut self, children: &[TermId]) -> TermId {
        marrow_assert_simple!(!children.is_empty(), "min needs at least one input");
        self.insert(TermKind::Min(children.to_vec()))
    }

    pub fn max(&mut self, children: &[TermId]) -> TermId {
        marrow_assert_simple!(!children.is_empty(), "max needs at least one input");
        self.insert(TermKind::Max(children.to_vec()))
    }

    pub fn negate(&mut self, input: TermId) -> TermId {
        self.insert(TermKind::Negate(input))
    }

    pub fn and(&mut self, children: &[TermId]) -> TermId {
        marrow_assert_simple!(!children.is_empty(), "a conjunction needs at least one input");
        self.insert(TermKind::And(children.to_vec()))
    }

    pub fn or(&mut self, children: &[TermId]) -> TermId {
        marrow_assert_simple!(!children.is_empty(), "a disjunction needs at least one input");
        self.insert(TermKind::Or(children.to_vec()))
    }

    pub fn not(&mut self, input: TermId) -> TermId {
        self.insert(TermKind::Not(input))
    }

    pub fn less_or_equal(&mut self, lhs: TermId, rhs: TermId) -> TermId {
        self.insert(TermKind::LessOrEqual(lhs, rhs))
    }

    fn insert_leaf(&mut self, kind: TermKind, value: f64) -> TermId {
        let id = self.nodes.push(TermNode {
            kind,
            value,
            depth: 0,
            dirty: false,
        });
        let _ = self.dependents.push(Vec::new());
        id
    }

    fn insert(&mut self, kind: TermKind) -> TermId {
        let inputs = kind.inputs();
        let depth = inputs
            .iter()
            .map(|&input| self.nodes[input].depth + 1)
            .max()
            .unwrap_or(0);
        let value = self.evaluate(&kind);

        let id = self.nodes.push(TermNode {
            kind,
            value,
            depth,
            dirty: false,
        });
        let _ = self.dependents.push(Vec::new());
        for input in inputs {
            self.dependents[input].push(id);
        }

        id
    }
}

// Reading and recomputation.
impl TermGraph {
    pub fn num_terms(&self) -> usize {
        self.nodes.len()
    }

    pub fn kind(&self, id: TermId) -> &TermKind {
        &self.nodes[id].kind
    }

    /// The stored value of a numeric term.
    pub fn value(&self, id: TermId) -> f64 {
        self.nodes[id].value
    }

    /// The stored violation of a Boolean term. Negative means the condition holds.
    pub fn violation(&self, id: TermId) -> f64 {
        self.nodes[id].value
    }

    pub fn is_true(&self, id: TermId) -> bool {
        self.nodes[id].value < 0.0
    }

    /// Move a numeric leaf. Dependents are scheduled but not yet recomputed; call
    /// [`TermGraph::recompute_pass`] once all leaf updates of a batch are in.
    pub fn set_leaf(&mut self, id: TermId, value: f64) {
        marrow_assert_simple!(
            matches!(self.nodes[id].kind, TermKind::Leaf),
            "set_leaf expects a numeric leaf"
        );
        self.set_external(id, value);
    }

    /// Move the violation of a Boolean leaf.
    pub fn set_bool_leaf(&mut self, id: TermId, violation: f64) {
        marrow_assert_simple!(
            matches!(self.nodes[id].kind, TermKind::BoolLeaf),
            "set_bool_leaf expects a Boolean leaf"
        );
        self.set_external(id, violation);
    }

    fn set_external(&mut self, id: TermId, value: f64) {
        if self.nodes[id].value.to_bits() == value.to_bits() {
            return;
        }
        self.nodes[id].value = value;
        self.schedule_dependents(id);
    }

    /// Recompute every scheduled node, in non-decreasing depth order.
    pub fn recompute_pass(&mut self) {
        while let Some(Reverse((depth, index))) = self.pending.pop() {
            let id = TermId::create_from_index(index as usize);
            if !self.nodes[id].dirty {
                // A stale duplicate heap entry.
                continue;
            }
            self.nodes[id].dirty = false;
            marrow_assert_moderate!(depth == self.nodes[id].depth);

            let new_value = self.evaluate(&self.nodes[id].kind);
            let changed = new_value.to_bits() != self.nodes[id].value.to_bits();
            self.nodes[id].value = new_value;

            if changed {
                self.schedule_dependents(id);
            }
        }
    }

    fn schedule_dependents(&mut self, id: TermId) {
        for position in 0..self.dependents[id].len() {
            let dependent = self.dependents[id][position];
            if !self.nodes[dependent].dirty {
                self.nodes[dependent].dirty = true;
                self.pending.push(Reverse((
                    self.nodes[dependent].depth,
                    dependent.index() as u32,
                )));
            }
        }
    }

    fn evaluate(&self, kind: &TermKind) -> f64 {
        match kind {
            TermKind::Constant(value) => *value,
            // Leaves are only moved from outside; evaluation leaves them untouched.
            TermKind::Leaf | TermKind::BoolLeaf => unreachable!("leaves are never recomputed"),
            TermKind::Sum(children) => children.iter().map(|&child| self.value(child)).sum(),
            TermKind::Product(children) => {
                children.iter().map(|&child| self.value(child)).product()
            }
            TermKind::Quotient(numerator, denominator) => {
                self.value(*numerator) / self.value(*denominator)
            }
            TermKind::Min(children) | TermKind::Or(children) => children
                .iter()
                .map(|&child| self.value(child))
                .reduce(f64::min)
                .expect("at least one input"),
            TermKind::Max(children) | TermKind::And(children) => children
                .iter()
                .map(|&child| self.value(child))
                .reduce(f64::max)
                .expect("at least one input"),
            TermKind::Negate(input) | TermKind::Not(input) => -self.value(*input),
            TermKind::LessOrEqual(lhs, rhs) => self.value(*lhs) - self.value(*rhs),
        }
    }
}

// Substitution.
impl TermGraph {
    /// Rebuild the subgraph under `root` with every mapped term replaced by its image.
    ///
    /// Unmapped leaves are shared with the original graph, and a node none of whose inputs
    /// changed is reused as-is, so substituting with an empty map returns `root` itself. Shared
    /// subexpressions are substituted once and stay identity-shared in the result, since the memo
    /// table is seeded from the map and consulted before any node is rebuilt.
    pub fn substitute(&mut self, root: TermId, map: &HashMap<TermId, TermId>) -> TermId {
        let mut memo: HashMap<TermId, TermId> = map.clone();
        self.substitute_term(root, &mut memo)
    }

    fn substitute_term(&mut self, id: TermId, memo: &mut HashMap<TermId, TermId>) -> TermId {
        if let Some(&replacement) = memo.get(&id) {
            return replacement;
        }

        let kind = self.nodes[id].kind.clone();
        let inputs = kind.inputs();

        let result = if inputs.is_empty() {
            id
        } else {
            let new_inputs: Vec<TermId> = inputs
                .iter()
                .map(|&input| self.substitute_term(input, memo))
                .collect();
            if new_inputs == inputs {
                id
            } else {
                self.insert(kind.with_inputs(&new_inputs))
            }
        };

        let _ = memo.insert(id, result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_evaluates_eagerly() {
        let mut graph = TermGraph::default();
        let a = graph.leaf(2.0);
        let b = graph.leaf(3.0);
        let sum = graph.sum(&[a, b]);
        let product = graph.product(&[sum, b]);

        assert_eq!(graph.value(sum), 5.0);
        assert_eq!(graph.value(product), 15.0);
    }

    #[test]
    fn a_recompute_pass_leaves_no_stale_values() {
        let mut graph = TermGraph::default();
        let a = graph.leaf(2.0);
        let b = graph.leaf(3.0);
        let sum = graph.sum(&[a, b]);
        let quotient = graph.quotient(sum, b);
        let top = graph.negate(quotient);

        graph.set_leaf(a, 9.0);
        graph.set_leaf(b, 4.0);
        graph.recompute_pass();

        assert_eq!(graph.value(sum), 13.0);
        assert_eq!(graph.value(quotient), 13.0 / 4.0);
        assert_eq!(graph.value(top), -13.0 / 4.0);
    }

    #[test]
    fn an_unchanged_intermediate_does_not_disturb_its_dependents() {
        let mut graph = TermGraph::default();
        let a = graph.leaf(5.0);
        let big = graph.constant(100.0);
        let capped = graph.max(&[a, big]);
        let top = graph.sum(&[capped, a]);

        // The max stays at 100, but the sum still sees the moved leaf.
        graph.set_leaf(a, 7.0);
        graph.recompute_pass();

        assert_eq!(graph.value(capped), 100.0);
        assert_eq!(graph.value(top), 107.0);
    }

    #[test]
    fn setting_a_leaf_to_its_current_value_schedules_nothing() {
        let mut graph = TermGraph::default();
        let a = graph.leaf(2.0);
        let sum = graph.sum(&[a, a]);

        graph.set_leaf(a, 2.0);
        assert!(graph.pending.is_empty());
        assert_eq!(graph.value(sum), 4.0);
    }

    #[test]
    fn nan_transitions_are_detected_as_changes() {
        let mut graph = TermGraph::default();
        let numerator = graph.leaf(1.0);
        let denominator = graph.leaf(0.0);
        let quotient = graph.quotient(numerator, denominator);
        let top = graph.sum(&[quotient]);

        graph.set_leaf(numerator, 0.0);
        graph.recompute_pass();
        assert!(graph.value(top).is_nan());

        graph.set_leaf(denominator, 2.0);
        graph.recompute_pass();
        assert_eq!(graph.value(top), 0.0);
    }

    #[test]
    fn violations_follow_the_dominating_rule() {
        let mut graph = TermGraph::default();
        let holds = graph.bool_leaf(-2.0);
        let violated = graph.bool_leaf(3.0);

        let conjunction = graph.and(&[holds, violated]);
        let disjunction = graph.or(&[holds, violated]);
        let negation = graph.not(violated);

        assert_eq!(graph.violation(conjunction), 3.0);
        assert!(!graph.is_true(conjunction));
        assert_eq!(graph.violation(disjunction), -2.0);
        assert!(graph.is_true(disjunction));
        assert!(graph.is_true(negation));
    }

    #[test]
    fn de_morgan_duality_holds_exactly() {
        let cases = [(-2.0, 3.0), (1.5, 4.0), (-0.5, -0.25), (0.0, -1.0)];

        for (left, right) in cases {
            let mut graph = TermGraph::default();
            let a = graph.bool_leaf(left);
            let b = graph.bool_leaf(right);

            let conjunction = graph.and(&[a, b]);
            let lhs = graph.not(conjunction);

            let not_a = graph.not(a);
            let not_b = graph.not(b);
            let rhs = graph.or(&[not_a, not_b]);

            assert_eq!(graph.violation(lhs).to_bits(), graph.violation(rhs).to_bits());
        }
    }

    #[test]
    fn comparison_violation_is_the_signed_slack() {
        let mut graph = TermGraph::default();
        let lhs = graph.leaf(4.0);
        let rhs = graph.leaf(10.0);
        let le = graph.less_or_equal(lhs, rhs);

        assert_eq!(graph.violation(le), -6.0);
        assert!(graph.is_true(le));

        graph.set_leaf(lhs, 12.0);
        graph.recompute_pass();
        assert_eq!(graph.violation(le), 2.0);
        assert!(!graph.is_true(le));
    }

    #[test]
    fn substituting_with_an_empty_map_is_the_identity() {
        let mut graph = TermGraph::default();
        let a = graph.leaf(1.0);
        let b = graph.leaf(2.0);
        let sum = graph.sum(&[a, b]);
        let top = graph.product(&[sum, sum]);

        let substituted = graph.substitute(top, &HashMap::default());
        assert_eq!(substituted, top);
    }

    #[test]
    fn substitution_preserves_sharing_of_subexpressions() {
        let mut graph = TermGraph::default();
        let a = graph.leaf(1.0);
        let b = graph.leaf(2.0);
        let shared = graph.sum(&[a, b]);
        let top = graph.product(&[shared, shared]);

        let replacement = graph.leaf(10.0);
        let mut map = HashMap::default();
        let _ = map.insert(a, replacement);

        let substituted = graph.substitute(top, &map);
        assert_ne!(substituted, top);
        assert_eq!(graph.value(substituted), 144.0);

        // The shared sum was rebuilt once; both inputs of the new product are that one node.
        let inputs = graph.kind(substituted).inputs();
        assert_eq!(inputs[0], inputs[1]);
    }

    #[test]
    fn substitution_replaces_every_occurrence_of_a_leaf() {
        let mut graph = TermGraph::default();
        let a = graph.leaf(3.0);
        let b = graph.leaf(4.0);
        let left = graph.sum(&[a, b]);
        let right = graph.product(&[a, b]);
        let top = graph.sum(&[left, right]);

        let replacement = graph.constant(0.0);
        let mut map = HashMap::default();
        let _ = map.insert(a, replacement);

        let substituted = graph.substitute(top, &map);
        assert_eq!(graph.value(substituted), 4.0);
        // The original is untouched.
        assert_eq!(graph.value(top), 19.0);
    }
}
