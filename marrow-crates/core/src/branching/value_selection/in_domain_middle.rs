use crate::branching::SelectionContext;
use crate::branching::ValueSelector;
use crate::engine::variables::DomainId;

/// A [`ValueSelector`] which proposes the value closest to the middle of the domain, rounding
/// towards the lower bound.
#[derive(Clone, Copy, Debug, Default)]
pub struct InDomainMiddle;

impl ValueSelector for InDomainMiddle {
    fn select_value(&mut self, context: &mut SelectionContext<'_>, variable: DomainId) -> i64 {
        let lower = context.lower_bound(variable);
        let upper = context.upper_bound(variable);
        // Computed as an offset from the lower bound so the midpoint of a domain spanning most of
        // the representable range does not overflow.
        lower + (upper - lower) / 2
    }
}
