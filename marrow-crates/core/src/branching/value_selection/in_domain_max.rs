use crate::branching::SelectionContext;
use crate::branching::ValueSelector;
use crate::engine::variables::DomainId;

/// A [`ValueSelector`] which proposes the largest value in the domain.
#[derive(Clone, Copy, Debug, Default)]
pub struct InDomainMax;

impl ValueSelector for InDomainMax {
    fn select_value(&mut self, context: &mut SelectionContext<'_>, variable: DomainId) -> i64 {
        context.upper_bound(variable)
    }
}
