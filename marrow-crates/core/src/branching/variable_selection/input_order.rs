use log::warn;

use crate::branching::SelectionContext;
use crate::branching::VariableSelector;
use crate::engine::variables::DomainId;

/// A [`VariableSelector`] which selects the first unfixed variable in the order in which the
/// variables were provided.
#[derive(Clone, Debug)]
pub struct InputOrder {
    variables: Vec<DomainId>,
}

impl InputOrder {
    pub fn new(variables: &[DomainId]) -> Self {
        if variables.is_empty() {
            warn!("the InputOrder variable selector was not provided with any variables");
        }
        InputOrder {
            variables: variables.to_vec(),
        }
    }
}

impl VariableSelector for InputOrder {
    fn select_variable(&mut self, context: &mut SelectionContext<'_>) -> Option<DomainId> {
        self.variables
            .iter()
            .copied()
            .find(|&variable| !context.is_fixed(variable))
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::engine::cause::CauseId;
    use crate::engine::domains::DomainStore;

    #[test]
    fn the_first_unfixed_variable_is_selected() {
        let mut domains = DomainStore::default();
        let x = domains.new_domain(0, 0);
        let y = domains.new_domain(0, 10);
        let z = domains.new_domain(0, 10);

        let mut rng = SmallRng::seed_from_u64(0);
        let mut selector = InputOrder::new(&[x, y, z]);

        let mut context = SelectionContext::new(&domains, &mut rng);
        assert_eq!(selector.select_variable(&mut context), Some(y));
    }

    #[test]
    fn a_fully_fixed_store_yields_no_variable() {
        let mut domains = DomainStore::default();
        let x = domains.new_domain(0, 1);
        let _ = domains
            .impose_range(x, 1, 1, CauseId::ROOT)
            .expect("non-empty");

        let mut rng = SmallRng::seed_from_u64(0);
        let mut selector = InputOrder::new(&[x]);

        let mut context = SelectionContext::new(&domains, &mut rng);
        assert_eq!(selector.select_variable(&mut context), None);
    }
}
