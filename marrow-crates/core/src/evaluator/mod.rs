//! Incremental expression graphs for derived scalar quantities.
//!
//! Two graphs are provided. [`TermGraph`] is the batched evaluator: numeric and Boolean terms in
//! a shared arena DAG, recomputed in dependency-depth order by an explicit
//! [`TermGraph::recompute_pass`], with Boolean terms storing a signed violation rather than a
//! plain truth value. [`LazyGraph`] is a simpler push graph for auxiliary numeric quantities,
//! which updates its subscribers synchronously on every leaf change.

mod graph;
mod lazy;
mod terms;

pub use graph::TermGraph;
pub use lazy::LazyGraph;
pub use lazy::LazyId;
pub use terms::TermId;
pub use terms::TermKind;
