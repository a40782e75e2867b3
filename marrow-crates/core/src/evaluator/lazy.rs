use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::marrow_assert_simple;

/// An index into a [`LazyGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LazyId(u32);

impl StorageKey for LazyId {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        LazyId(index as u32)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum LazyOp {
    Leaf,
    Exp,
    Ln,
    Inverse,
    Min,
    DivByConst(f64),
    Sum,
}

#[derive(Clone, Debug)]
struct LazyNode {
    op: LazyOp,
    inputs: Vec<LazyId>,
    value: f64,
    subscribers: Vec<LazyId>,
}

/// A push-based graph of auxiliary numeric quantities.
///
/// Unlike the batched [`TermGraph`](crate::evaluator::TermGraph), updates here propagate
/// immediately: [`LazyGraph::set_leaf`] recomputes the subscribers of the moved leaf, and
/// transitively theirs, synchronously. Propagation stops at nodes whose value did not change,
/// compared bit for bit.
#[derive(Clone, Debug, Default)]
pub struct LazyGraph {
    nodes: KeyedVec<LazyId, LazyNode>,
}

impl LazyGraph {
    pub fn leaf(&mut self, value: f64) -> LazyId {
        self.insert(LazyOp::Leaf, Vec::new(), value)
    }

    pub fn exp(&mut self, input: LazyId) -> LazyId {
        let value = self.nodes[input].value.exp();
        self.insert(LazyOp::Exp, vec![input], value)
    }

    pub fn ln(&mut self, input: LazyId) -> LazyId {
        let value = self.nodes[input].value.ln();
        self.insert(LazyOp::Ln, vec![input], value)
    }

    pub fn inverse(&mut self, input: LazyId) -> LazyId {
        let value = 1.0 / self.nodes[input].value;
        self.insert(LazyOp::Inverse, vec![input], value)
    }

    pub fn min(&mut self, inputs: &[LazyId]) -> LazyId {
        marrow_assert_simple!(!inputs.is_empty(), "min needs at least one input");
        let value = self.fold_min(inputs);
        self.insert(LazyOp::Min, inputs.to_vec(), value)
    }

    pub fn div_by_const(&mut self, input: LazyId, divisor: f64) -> LazyId {
        let value = self.nodes[input].value / divisor;
        self.insert(LazyOp::DivByConst(divisor), vec![input], value)
    }

    pub fn sum(&mut self, inputs: &[LazyId]) -> LazyId {
        let value = inputs.iter().map(|&input| self.nodes[input].value).sum();
        self.insert(LazyOp::Sum, inputs.to_vec(), value)
    }

    pub fn value(&self, id: LazyId) -> f64 {
        self.nodes[id].value
    }

    /// Move a leaf and push the change through its subscribers immediately.
    pub fn set_leaf(&mut self, id: LazyId, value: f64) {
        marrow_assert_simple!(
            self.nodes[id].op == LazyOp::Leaf,
            "set_leaf expects a leaf"
        );
        if self.nodes[id].value.to_bits() == value.to_bits() {
            return;
        }
        self.nodes[id].value = value;

        let mut stack = self.nodes[id].subscribers.clone();
        while let Some(node) = stack.pop() {
            let new_value = self.evaluate(node);
            if new_value.to_bits() != self.nodes[node].value.to_bits() {
                self.nodes[node].value = new_value;
                stack.extend(self.nodes[node].subscribers.iter().copied());
            }
        }
    }

    fn insert(&mut self, op: LazyOp, inputs: Vec<LazyId>, value: f64) -> LazyId {
        let id = self.nodes.push(LazyNode {
            op,
            inputs: inputs.clone(),
            value,
            subscribers: Vec::new(),
        });
        for input in inputs {
            self.nodes[input].subscribers.push(id);
        }
        id
    }

    fn evaluate(&self, id: LazyId) -> f64 {
        let node = &self.nodes[id];
        match node.op {
            LazyOp::Leaf => node.value,
            LazyOp::Exp => self.nodes[node.inputs[0]].value.exp(),
            LazyOp::Ln => self.nodes[node.inputs[0]].value.ln(),
            LazyOp::Inverse => 1.0 / self.nodes[node.inputs[0]].value,
            LazyOp::Min => self.fold_min(&node.inputs),
            LazyOp::DivByConst(divisor) => self.nodes[node.inputs[0]].value / divisor,
            LazyOp::Sum => node
                .inputs
                .iter()
                .map(|&input| self.nodes[input].value)
                .sum(),
        }
    }

    fn fold_min(&self, inputs: &[LazyId]) -> f64 {
        inputs
            .iter()
            .map(|&input| self.nodes[input].value)
            .reduce(f64::min)
            .expect("at least one input")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_computes_values_eagerly() {
        let mut graph = LazyGraph::default();
        let a = graph.leaf(1.0);
        let e = graph.exp(a);
        let back = graph.ln(e);

        assert_eq!(graph.value(e), 1.0_f64.exp());
        assert!((graph.value(back) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn leaf_updates_push_through_the_whole_chain() {
        let mut graph = LazyGraph::default();
        let a = graph.leaf(4.0);
        let inverse = graph.inverse(a);
        let scaled = graph.div_by_const(a, 2.0);
        let total = graph.sum(&[inverse, scaled]);

        graph.set_leaf(a, 8.0);

        assert_eq!(graph.value(inverse), 0.125);
        assert_eq!(graph.value(scaled), 4.0);
        assert_eq!(graph.value(total), 4.125);
    }

    #[test]
    fn propagation_stops_at_unchanged_nodes() {
        let mut graph = LazyGraph::default();
        let a = graph.leaf(5.0);
        let floor = graph.leaf(1.0);
        let clamped = graph.min(&[a, floor]);
        let total = graph.sum(&[clamped, clamped]);

        // The minimum stays at 1, so nothing downstream moves.
        graph.set_leaf(a, 9.0);

        assert_eq!(graph.value(clamped), 1.0);
        assert_eq!(graph.value(total), 2.0);
    }
}
