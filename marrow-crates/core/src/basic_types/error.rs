use thiserror::Error;

/// Interval arithmetic exceeded the representable range.
///
/// This is a modeling-level failure: the numeric precision of the problem is exceeded, which
/// indicates the model itself may be ill-posed rather than merely unsatisfiable. It is therefore
/// surfaced to the caller as an error, distinct from ordinary infeasibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("interval arithmetic overflowed the representable range")]
pub struct NumericOverflow;

/// Errors that can occur while adding a constraint to the solver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConstraintOperationError {
    /// The initial propagation of the constraint detected a contradiction at the root level, so
    /// no assignment can ever satisfy the model.
    #[error("adding the constraint failed because it is detected to be infeasible at the root")]
    InfeasibleAtRoot,
    /// The initial propagation exceeded the representable numeric range.
    #[error(transparent)]
    Overflow(#[from] NumericOverflow),
}
