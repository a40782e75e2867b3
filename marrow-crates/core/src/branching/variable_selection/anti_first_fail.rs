use log::warn;

use crate::branching::SelectionContext;
use crate::branching::VariableSelector;
use crate::engine::variables::DomainId;

/// A [`VariableSelector`] which selects the unfixed variable with the largest domain, breaking
/// ties by input order.
#[derive(Clone, Debug)]
pub struct AntiFirstFail {
    variables: Vec<DomainId>,
}

impl AntiFirstFail {
    pub fn new(variables: &[DomainId]) -> Self {
        if variables.is_empty() {
            warn!("the AntiFirstFail variable selector was not provided with any variables");
        }
        AntiFirstFail {
            variables: variables.to_vec(),
        }
    }
}

impl VariableSelector for AntiFirstFail {
    fn select_variable(&mut self, context: &mut SelectionContext<'_>) -> Option<DomainId> {
        let mut best: Option<(DomainId, i64)> = None;
        for &variable in &self.variables {
            if context.is_fixed(variable) {
                continue;
            }
            let size = context.domain_size(variable);
            if best.map_or(true, |(_, best_size)| size > best_size) {
                best = Some((variable, size));
            }
        }
        best.map(|(variable, _)| variable)
    }
}
