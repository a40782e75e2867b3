//! Conditions under which the search gives up before the space is exhausted.

use std::time::Duration;
use std::time::Instant;

/// A condition polled by the search loop between decisions. When it reports that the search
/// should stop, the current run ends with an inconclusive outcome.
pub trait TerminationCondition {
    /// Returns `true` when the search should stop.
    fn should_stop(&mut self) -> bool;
}

impl TerminationCondition for Box<dyn TerminationCondition> {
    fn should_stop(&mut self) -> bool {
        self.as_mut().should_stop()
    }
}

/// A [`TerminationCondition`] which never stops the search.
#[derive(Clone, Copy, Debug, Default)]
pub struct Indefinite;

impl TerminationCondition for Indefinite {
    fn should_stop(&mut self) -> bool {
        false
    }
}

/// A [`TerminationCondition`] which stops the search when a wall-clock deadline passes.
#[derive(Clone, Copy, Debug)]
pub struct TimeBudget {
    deadline: Instant,
}

impl TimeBudget {
    /// Create a budget expiring the given duration from now.
    pub fn starting_now(budget: Duration) -> TimeBudget {
        TimeBudget {
            deadline: Instant::now() + budget,
        }
    }
}

impl TerminationCondition for TimeBudget {
    fn should_stop(&mut self) -> bool {
        Instant::now() >= self.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn an_expired_budget_stops_the_search() {
        let mut budget = TimeBudget::starting_now(Duration::ZERO);
        assert!(budget.should_stop());
    }

    #[test]
    fn a_generous_budget_does_not_stop_the_search() {
        let mut budget = TimeBudget::starting_now(Duration::from_secs(3600));
        assert!(!budget.should_stop());
    }
}
