//! Provides the [`ValueSelector`] trait and the selectors shipped with the solver.

mod in_domain_max;
mod in_domain_middle;
mod in_domain_min;
mod in_domain_random;

pub use in_domain_max::InDomainMax;
pub use in_domain_middle::InDomainMiddle;
pub use in_domain_min::InDomainMin;
pub use in_domain_random::InDomainRandom;

use crate::branching::SelectionContext;
use crate::engine::variables::DomainId;

/// Selects the value to try for the variable chosen by the
/// [`VariableSelector`](crate::branching::VariableSelector).
///
/// The returned value must lie in the current domain of the variable. The search remains
/// exhaustive regardless of which in-domain value is proposed.
pub trait ValueSelector {
    fn select_value(&mut self, context: &mut SelectionContext<'_>, variable: DomainId) -> i64;
}

impl ValueSelector for Box<dyn ValueSelector> {
    fn select_value(&mut self, context: &mut SelectionContext<'_>, variable: DomainId) -> i64 {
        self.as_mut().select_value(context, variable)
    }
}
