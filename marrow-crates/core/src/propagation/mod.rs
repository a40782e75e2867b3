//! Contains the main building blocks for propagators.
//!
//! A propagator takes as input a set of variables and their current domains, and removes values
//! which cannot be part of any solution given those domains: the domain of a variable either
//! remains the same after applying the propagator or it becomes a subset of what it was. A
//! propagator is at fixpoint when re-running it changes nothing; propagators are not required to
//! be idempotent in one call, since the solver re-runs them until no further narrowings happen.
//!
//! Each concrete propagator implements the [`Propagator`] trait; its main function is
//! [`Propagator::propagate`], which performs the domain reductions through a
//! [`PropagationContextMut`]. A propagator is created by a [`PropagatorConstructor`], which is
//! responsible for registering the propagator's subscriptions through a
//! [`PropagatorConstructorContext`].
//!
//! See the [`crate::propagators`] module for concrete implementations.

mod constructor;
mod contexts;
mod local_id;
mod propagator;
mod propagator_id;

pub use constructor::PropagatorConstructor;
pub use constructor::PropagatorConstructorContext;
pub use contexts::PropagationContextMut;
pub use local_id::LocalId;
pub use propagator::EnqueueDecision;
pub use propagator::Propagator;
pub use propagator_id::PropagatorId;

pub use crate::basic_types::Inconsistency;
pub use crate::basic_types::PropagationStatus;
pub use crate::basic_types::StoredConflict;
pub use crate::engine::notifications::DomainEvent;
pub use crate::engine::notifications::DomainEvents;
