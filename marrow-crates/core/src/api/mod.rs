mod config;
mod oracle;
mod outputs;

pub use config::BranchingRule;
pub use config::NodeSelection;
pub use oracle::InfeasibilitySink;
pub use oracle::RelaxationBound;
pub use oracle::RelaxationOracle;
pub use oracle::SubsetMember;
pub use outputs::EnumerationOutcome;
pub use outputs::Outcome;

pub use crate::basic_types::ConstraintOperationError;
pub use crate::engine::conflict::ConflictDiagnostic;
pub use crate::engine::solver::Solver;
pub use crate::engine::statistics::SearchStatistics;
