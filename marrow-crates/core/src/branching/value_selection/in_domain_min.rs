use crate::branching::SelectionContext;
use crate::branching::ValueSelector;
use crate::engine::variables::DomainId;

/// A [`ValueSelector`] which proposes the smallest value in the domain.
#[derive(Clone, Copy, Debug, Default)]
pub struct InDomainMin;

impl ValueSelector for InDomainMin {
    fn select_value(&mut self, context: &mut SelectionContext<'_>, variable: DomainId) -> i64 {
        context.lower_bound(variable)
    }
}
