use crate::branching::ValueSelector;
use crate::branching::VariableSelector;

/// How the value proposed by the [`ValueSelector`] is turned into search-tree arms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DecisionStyle {
    /// Enumerate the values of the selected variable in increasing order, one arm per value. The
    /// value selector is ignored.
    Forward,
    /// Try the proposed value first; on refutation, exclude it by splitting the remaining domain
    /// into the parts below and above the proposed value.
    #[default]
    Exclusion,
}

/// The complete branching strategy of one search: which variable, which value, and how the value
/// becomes search-tree arms.
#[derive(Clone, Debug)]
pub struct Brancher<VarSel, ValSel> {
    pub(crate) variable_selector: VarSel,
    pub(crate) value_selector: ValSel,
    pub(crate) style: DecisionStyle,
}

impl<VarSel: VariableSelector, ValSel: ValueSelector> Brancher<VarSel, ValSel> {
    pub fn new(variable_selector: VarSel, value_selector: ValSel, style: DecisionStyle) -> Self {
        Brancher {
            variable_selector,
            value_selector,
            style,
        }
    }
}
