use crate::containers::KeyedVec;
use crate::engine::variables::DomainId;
use crate::engine::variables::Literal;

/// A snapshot of an assignment in which every variable is fixed to a single value.
#[derive(Clone, Debug, Default)]
pub struct Solution {
    values: KeyedVec<DomainId, i64>,
}

impl Solution {
    pub(crate) fn new(values: KeyedVec<DomainId, i64>) -> Self {
        Solution { values }
    }

    /// The value the given variable takes in this solution.
    pub fn value(&self, domain: DomainId) -> i64 {
        self.values[domain]
    }

    /// The truth value the given literal takes in this solution.
    pub fn literal_value(&self, literal: Literal) -> bool {
        self.values[literal.domain_id()] == 1
    }

    pub fn num_variables(&self) -> usize {
        self.values.len()
    }

    /// Iterate over `(variable, value)` pairs in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (DomainId, i64)> + '_ {
        self.values.keys().map(|key| (key, self.values[key]))
    }
}
