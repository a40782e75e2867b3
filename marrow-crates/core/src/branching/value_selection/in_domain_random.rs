use rand::Rng;

use crate::branching::SelectionContext;
use crate::branching::ValueSelector;
use crate::engine::variables::DomainId;

/// A [`ValueSelector`] which proposes a uniformly random value from the domain, drawn from the
/// solver's seeded generator.
#[derive(Clone, Copy, Debug, Default)]
pub struct InDomainRandom;

impl ValueSelector for InDomainRandom {
    fn select_value(&mut self, context: &mut SelectionContext<'_>, variable: DomainId) -> i64 {
        let lower = context.lower_bound(variable);
        let upper = context.upper_bound(variable);
        context.random().gen_range(lower..=upper)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::engine::domains::DomainStore;

    #[test]
    fn the_proposed_value_lies_in_the_domain() {
        let mut domains = DomainStore::default();
        let x = domains.new_domain(-4, 9);

        let mut rng = SmallRng::seed_from_u64(42);
        let mut selector = InDomainRandom;

        for _ in 0..100 {
            let mut context = SelectionContext::new(&domains, &mut rng);
            let value = selector.select_value(&mut context, x);
            assert!(domains.contains(x, value));
        }
    }
}
