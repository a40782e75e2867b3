//! User-facing configuration enums and their mapping onto concrete search strategies.

use crate::branching::AntiFirstFail;
use crate::branching::FirstFail;
use crate::branching::InDomainMax;
use crate::branching::InDomainMiddle;
use crate::branching::InDomainMin;
use crate::branching::InputOrder;
use crate::branching::ValueSelector;
use crate::branching::VariableSelector;
use crate::engine::variables::DomainId;

/// The rule used to pick the branching variable and the value to try for it.
///
/// The rules are named after their counterparts in LP-based branch-and-bound. This core does not
/// track pseudo-cost or fractionality histories, so each rule maps onto the structurally closest
/// domain-based selector; the mapping is stable, which keeps command lines and config files
/// meaningful across versions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum BranchingRule {
    /// Let the solver pick; currently behaves like [`BranchingRule::LeastFractional`].
    #[default]
    Automatic,
    /// Prefer the variable expected to degrade the objective the least.
    SmallestPseudoCost,
    /// Prefer the variable expected to degrade the objective the most.
    LargestPseudoCost,
    /// Prefer the variable closest to integrality (the tightest domain).
    LeastFractional,
    /// Prefer the variable furthest from integrality (the widest domain).
    MostFractional,
    /// Prefer variables in the order they appear in the model.
    VectorLength,
    /// Evaluate candidates by tentatively branching on them; approximated here by
    /// [`BranchingRule::LeastFractional`].
    StrongCost,
}

impl BranchingRule {
    /// The variable selector implementing this rule over the given variables.
    pub fn create_variable_selector(&self, variables: &[DomainId]) -> Box<dyn VariableSelector> {
        match self {
            BranchingRule::Automatic
            | BranchingRule::LeastFractional
            | BranchingRule::SmallestPseudoCost
            | BranchingRule::StrongCost => Box::new(FirstFail::new(variables)),
            BranchingRule::LargestPseudoCost | BranchingRule::MostFractional => {
                Box::new(AntiFirstFail::new(variables))
            }
            BranchingRule::VectorLength => Box::new(InputOrder::new(variables)),
        }
    }

    /// The value selector implementing this rule.
    pub fn create_value_selector(&self) -> Box<dyn ValueSelector> {
        match self {
            BranchingRule::Automatic
            | BranchingRule::LeastFractional
            | BranchingRule::SmallestPseudoCost
            | BranchingRule::VectorLength => Box::new(InDomainMin),
            BranchingRule::LargestPseudoCost | BranchingRule::MostFractional => {
                Box::new(InDomainMax)
            }
            BranchingRule::StrongCost => Box::new(InDomainMiddle),
        }
    }
}

/// The order in which open nodes of the search tree are explored.
///
/// The search core explores depth-first; the best-bound and best-estimate orders additionally
/// consult the relaxation oracle (when one is installed) to prune nodes whose bound cannot beat
/// the incumbent. Without an oracle all three behave identically.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum NodeSelection {
    /// Prefer the node with the best relaxation bound.
    BestBound,
    /// Prefer the node with the best estimated completion.
    BestEstimate,
    /// Always dive into the most recent node.
    #[default]
    DepthFirst,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_rule_maps_to_a_selector_pair() {
        let rules = [
            BranchingRule::Automatic,
            BranchingRule::SmallestPseudoCost,
            BranchingRule::LargestPseudoCost,
            BranchingRule::LeastFractional,
            BranchingRule::MostFractional,
            BranchingRule::VectorLength,
            BranchingRule::StrongCost,
        ];

        for rule in rules {
            let _ = rule.create_variable_selector(&[]);
            let _ = rule.create_value_selector();
        }
    }
}
