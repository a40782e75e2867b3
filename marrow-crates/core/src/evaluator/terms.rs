use crate::containers::StorageKey;

/// An index into a [`TermGraph`](crate::evaluator::TermGraph).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TermId(u32);

impl StorageKey for TermId {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        TermId(index as u32)
    }
}

impl std::fmt::Display for TermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// The operation of one term.
///
/// Numeric terms store a plain value; Boolean terms store a signed violation, where a negative
/// violation means the condition holds and a non-negative one that it is violated, with the
/// magnitude ranking how severely. The connectives combine violations with the dominating rule:
/// `And` takes the signed maximum of its children, `Or` the signed minimum, and `Not` negates,
/// which satisfies De Morgan duality exactly since `-max(a, b) = min(-a, -b)`.
#[derive(Clone, Debug, PartialEq)]
pub enum TermKind {
    /// A fixed numeric value.
    Constant(f64),
    /// A numeric value set from outside through
    /// [`TermGraph::set_leaf`](crate::evaluator::TermGraph::set_leaf).
    Leaf,
    Sum(Vec<TermId>),
    Product(Vec<TermId>),
    Quotient(TermId, TermId),
    Min(Vec<TermId>),
    Max(Vec<TermId>),
    Negate(TermId),
    /// A violation set from outside through
    /// [`TermGraph::set_bool_leaf`](crate::evaluator::TermGraph::set_bool_leaf).
    BoolLeaf,
    And(Vec<TermId>),
    Or(Vec<TermId>),
    Not(TermId),
    /// The condition `lhs <= rhs`, with violation `lhs - rhs`.
    LessOrEqual(TermId, TermId),
}

impl TermKind {
    /// The input terms, in evaluation order.
    pub(crate) fn inputs(&self) -> Vec<TermId> {
        match self {
            TermKind::Constant(_) | TermKind::Leaf | TermKind::BoolLeaf => Vec::new(),
            TermKind::Sum(children)
            | TermKind::Product(children)
            | TermKind::Min(children)
            | TermKind::Max(children)
            | TermKind::And(children)
            | TermKind::Or(children) => children.clone(),
            TermKind::Quotient(lhs, rhs) | TermKind::LessOrEqual(lhs, rhs) => vec![*lhs, *rhs],
            TermKind::Negate(input) | TermKind::Not(input) => vec![*input],
        }
    }

    /// The same operation applied to different inputs.
    pub(crate) fn with_inputs(&self, inputs: &[TermId]) -> TermKind {
        match self {
            TermKind::Sum(_) => TermKind::Sum(inputs.to_vec()),
            TermKind::Product(_) => TermKind::Product(inputs.to_vec()),
            TermKind::Min(_) => TermKind::Min(inputs.to_vec()),
            TermKind::Max(_) => TermKind::Max(inputs.to_vec()),
            TermKind::And(_) => TermKind::And(inputs.to_vec()),
            TermKind::Or(_) => TermKind::Or(inputs.to_vec()),
            TermKind::Quotient(..) => TermKind::Quotient(inputs[0], inputs[1]),
            TermKind::LessOrEqual(..) => TermKind::LessOrEqual(inputs[0], inputs[1]),
            TermKind::Negate(_) => TermKind::Negate(inputs[0]),
            TermKind::Not(_) => TermKind::Not(inputs[0]),
            TermKind::Constant(_) | TermKind::Leaf | TermKind::BoolLeaf => {
                unreachable!("leaves have no inputs to replace")
            }
        }
    }
}
