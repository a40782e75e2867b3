//! The concrete propagators that can be posted to the [`Solver`](crate::Solver).
//!
//! Each propagator lives in its own file and comes as a pair: an `Args` struct carrying the
//! variables and parameters of the constraint, which implements
//! [`PropagatorConstructor`](crate::propagation::PropagatorConstructor), and the propagator
//! itself.

mod addition;
mod implication;
mod opposite;
mod times_constant;

pub use addition::AdditionToConstantArgs;
pub use addition::AdditionToConstantPropagator;
pub use implication::ImplicationArgs;
pub use implication::ImplicationPropagator;
pub use opposite::OppositeArgs;
pub use opposite::OppositePropagator;
pub use times_constant::TimesConstantArgs;
pub use times_constant::TimesConstantPropagator;
