//! Provides the [`VariableSelector`] trait and the selectors shipped with the solver.

mod anti_first_fail;
mod first_fail;
mod input_order;

pub use anti_first_fail::AntiFirstFail;
pub use first_fail::FirstFail;
pub use input_order::InputOrder;

use crate::branching::SelectionContext;
use crate::engine::variables::DomainId;

/// Selects the variable to branch on next, or `None` when every candidate variable is fixed
/// (at which point the search has reached a solution).
pub trait VariableSelector {
    fn select_variable(&mut self, context: &mut SelectionContext<'_>) -> Option<DomainId>;
}

impl VariableSelector for Box<dyn VariableSelector> {
    fn select_variable(&mut self, context: &mut SelectionContext<'_>) -> Option<DomainId> {
        self.as_mut().select_variable(context)
    }
}
