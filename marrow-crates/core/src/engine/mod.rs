//! The internals of the solver: the variable store, justification tracking, conflict diagnosis,
//! the search machinery, and the [`Solver`](crate::Solver) tying them together.

pub mod cause;
pub mod conflict;
pub mod domains;
pub(crate) mod notifications;
pub(crate) mod search;
pub mod solver;
pub mod sos;
pub mod statistics;
pub mod variables;

#[cfg(test)]
pub(crate) mod test_solver;
