//! Strategies deciding which variable to branch on next and which value to try for it.
//!
//! A [`Brancher`] pairs a [`VariableSelector`] with a [`ValueSelector`] and a [`DecisionStyle`].
//! The selectors observe the current domains through a [`SelectionContext`]; the style determines
//! how the selected value is turned into search-tree arms. Search completeness never depends on
//! the selectors: any selector that proposes in-domain values yields an exhaustive search.

mod brancher;
mod selection_context;
pub mod value_selection;
pub mod variable_selection;

pub use brancher::Brancher;
pub use brancher::DecisionStyle;
pub use selection_context::SelectionContext;
pub use value_selection::InDomainMax;
pub use value_selection::InDomainMiddle;
pub use value_selection::InDomainMin;
pub use value_selection::InDomainRandom;
pub use value_selection::ValueSelector;
pub use variable_selection::AntiFirstFail;
pub use variable_selection::FirstFail;
pub use variable_selection::InputOrder;
pub use variable_selection::VariableSelector;
