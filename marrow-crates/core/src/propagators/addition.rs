use crate::basic_types::PropagationStatus;
use crate::engine::variables::DomainId;
use crate::propagation::DomainEvents;
use crate::propagation::LocalId;
use crate::propagation::PropagationContextMut;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;

const X: LocalId = LocalId::from(0);
const Y: LocalId = LocalId::from(1);

/// The constraint `y = x + constant`.
#[derive(Clone, Copy, Debug)]
pub struct AdditionToConstantArgs {
    pub x: DomainId,
    pub y: DomainId,
    pub constant: i64,
}

impl PropagatorConstructor for AdditionToConstantArgs {
    type PropagatorImpl = AdditionToConstantPropagator;

    fn create(self, mut context: PropagatorConstructorContext<'_>) -> Self::PropagatorImpl {
        context.register(self.x, DomainEvents::BOUNDS, X);
        context.register(self.y, DomainEvents::BOUNDS, Y);

        AdditionToConstantPropagator {
            x: self.x,
            y: self.y,
            constant: self.constant,
        }
    }
}

/// Bounds-consistent propagator for `y = x + constant`.
#[derive(Clone, Copy, Debug)]
pub struct AdditionToConstantPropagator {
    x: DomainId,
    y: DomainId,
    constant: i64,
}

impl Propagator for AdditionToConstantPropagator {
    fn name(&self) -> &str {
        "AdditionToConstant"
    }

    fn propagate(&mut self, mut context: PropagationContextMut<'_>) -> PropagationStatus {
        let x = context.interval(self.x);
        context.post(self.y, x.shift(self.constant), &[self.x])?;

        let y = context.interval(self.y);
        context.post(self.x, y.shift(-self.constant), &[self.y])?;

        Ok(())
    }
}
