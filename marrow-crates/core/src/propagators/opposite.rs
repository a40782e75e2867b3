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

/// The constraint `y = -x`.
#[derive(Clone, Copy, Debug)]
pub struct OppositeArgs {
    pub x: DomainId,
    pub y: DomainId,
}

impl PropagatorConstructor for OppositeArgs {
    type PropagatorImpl = OppositePropagator;

    fn create(self, mut context: PropagatorConstructorContext<'_>) -> Self::PropagatorImpl {
        context.register(self.x, DomainEvents::BOUNDS, X);
        context.register(self.y, DomainEvents::BOUNDS, Y);

        OppositePropagator {
            x: self.x,
            y: self.y,
        }
    }
}

/// Bounds-consistent propagator for `y = -x`.
#[derive(Clone, Copy, Debug)]
pub struct OppositePropagator {
    x: DomainId,
    y: DomainId,
}

impl Propagator for OppositePropagator {
    fn name(&self) -> &str {
        "Opposite"
    }

    fn propagate(&mut self, mut context: PropagationContextMut<'_>) -> PropagationStatus {
        let x = context.interval(self.x);
        context.post(self.y, x.negate(), &[self.x])?;

        let y = context.interval(self.y);
        context.post(self.x, y.negate(), &[self.y])?;

        Ok(())
    }
}
