use crate::basic_types::PropagationStatus;
use crate::engine::variables::Literal;
use crate::propagation::LocalId;
use crate::propagation::PropagationContextMut;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;

const X: LocalId = LocalId::from(0);
const Y: LocalId = LocalId::from(1);

/// The constraint `x -> y` over two literals.
#[derive(Clone, Copy, Debug)]
pub struct ImplicationArgs {
    pub x: Literal,
    pub y: Literal,
}

impl PropagatorConstructor for ImplicationArgs {
    type PropagatorImpl = ImplicationPropagator;

    fn create(self, mut context: PropagatorConstructorContext<'_>) -> Self::PropagatorImpl {
        // Only the two channels that trigger a deduction are watched: modus ponens fires on `x`
        // becoming true, modus tollens on `y` becoming false.
        context.register_true(self.x, X);
        context.register_false(self.y, Y);

        ImplicationPropagator {
            x: self.x,
            y: self.y,
        }
    }
}

/// Propagator for `x -> y`: assigns `y` when `x` becomes true and `x` when `y` becomes false.
#[derive(Clone, Copy, Debug)]
pub struct ImplicationPropagator {
    x: Literal,
    y: Literal,
}

impl Propagator for ImplicationPropagator {
    fn name(&self) -> &str {
        "Implication"
    }

    fn propagate(&mut self, mut context: PropagationContextMut<'_>) -> PropagationStatus {
        if context.is_true(self.x) {
            context.post_true(self.y, &[self.x.domain_id()])?;
        }
        if context.is_false(self.y) {
            context.post_false(self.x, &[self.y.domain_id()])?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_solver::TestSolver;
    use crate::engine::variables::BoolValue;

    #[test]
    fn a_true_premise_forces_the_conclusion() {
        let mut solver = TestSolver::default();
        let x = solver.new_literal();
        let y = solver.new_literal();

        let propagator = solver
            .new_propagator(ImplicationArgs { x, y })
            .expect("no conflict");

        let _ = solver.impose_true(x).expect("non-empty");
        solver.propagate(propagator).expect("no conflict");

        solver.assert_literal(y, BoolValue::True);
    }

    #[test]
    fn a_false_conclusion_forces_the_premise_false() {
        let mut solver = TestSolver::default();
        let x = solver.new_literal();
        let y = solver.new_literal();

        let propagator = solver
            .new_propagator(ImplicationArgs { x, y })
            .expect("no conflict");

        let _ = solver.impose_false(y).expect("non-empty");
        solver.propagate(propagator).expect("no conflict");

        solver.assert_literal(x, BoolValue::False);
    }

    #[test]
    fn unassigned_literals_stay_unassigned() {
        let mut solver = TestSolver::default();
        let x = solver.new_literal();
        let y = solver.new_literal();

        let propagator = solver
            .new_propagator(ImplicationArgs { x, y })
            .expect("no conflict");

        solver.propagate(propagator).expect("no conflict");

        solver.assert_literal(x, BoolValue::Unassigned);
        solver.assert_literal(y, BoolValue::Unassigned);
    }

    #[test]
    fn a_true_premise_with_a_false_conclusion_is_a_conflict() {
        let mut solver = TestSolver::default();
        let x = solver.new_literal();
        let y = solver.new_literal();

        let propagator = solver
            .new_propagator(ImplicationArgs { x, y })
            .expect("no conflict");

        let _ = solver.impose_true(x).expect("non-empty");
        let _ = solver.impose_false(y).expect("non-empty");

        let result = solver.propagate(propagator);
        assert!(result.is_err());
    }
}
