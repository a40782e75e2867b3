//! The propagation and search core of the marrow finite-domain solver.
//!
//! The crate maintains a set of discrete variables with shrinking interval domains, runs
//! constraint-specific filtering rules (propagators) whenever a domain changes, and explores the
//! remaining combinatorial space with a backtracking tree search. A tightly coupled incremental
//! evaluator maintains numeric and Boolean "violation" values over an expression graph so that
//! derived quantities (objective value, constraint violation) track variable modifications in time
//! proportional to the changed subgraph.
//!
//! The three main entry points are:
//! - [`Solver`], which owns the variable store, the propagators, and the search machinery;
//! - the [`propagators`] module, which contains the filtering rules that can be posted;
//! - the [`evaluator`] module, which contains the incremental expression graphs.

pub(crate) mod basic_types;
pub mod containers;
pub mod engine;
#[doc(hidden)]
pub mod marrow_asserts;
pub(crate) mod math;

pub mod branching;
pub mod evaluator;
pub mod propagation;
pub mod propagators;
pub mod termination;

#[doc(hidden)]
pub use marrow_asserts as asserts;

// We declare a private module with public use, so that all exports from the API are exports
// directly from the crate.
mod api;

pub use api::*;

pub use crate::basic_types::NumericOverflow;
pub use crate::basic_types::Solution;
pub use crate::engine::variables::BoolValue;
pub use crate::engine::variables::DomainId;
pub use crate::engine::variables::Literal;
pub use crate::math::Interval;
