//! The variable handles exposed by the solver.

mod domain_id;
mod literal;

pub use domain_id::DomainId;
pub use literal::BoolValue;
pub use literal::Literal;
