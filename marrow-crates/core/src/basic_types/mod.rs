mod error;
mod propagation_status;
mod solution;
mod trail;

pub use error::ConstraintOperationError;
pub use error::NumericOverflow;
pub use propagation_status::Inconsistency;
pub use propagation_status::PropagationStatus;
pub use propagation_status::StoredConflict;
pub use solution::Solution;
pub(crate) use trail::Trail;
