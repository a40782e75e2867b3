use crate::basic_types::NumericOverflow;
use crate::basic_types::PropagationStatus;
use crate::engine::variables::DomainId;
use crate::math::Interval;
use crate::math::NumExt;
use crate::math::HORIZON;
use crate::propagation::DomainEvents;
use crate::propagation::LocalId;
use crate::propagation::PropagationContextMut;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;

const X: LocalId = LocalId::from(0);
const Y: LocalId = LocalId::from(1);

/// The constraint `y = constant * x`.
#[derive(Clone, Copy, Debug)]
pub struct TimesConstantArgs {
    pub x: DomainId,
    pub y: DomainId,
    pub constant: i64,
}

impl PropagatorConstructor for TimesConstantArgs {
    type PropagatorImpl = TimesConstantPropagator;

    fn create(self, mut context: PropagatorConstructorContext<'_>) -> Self::PropagatorImpl {
        context.register(self.x, DomainEvents::BOUNDS, X);
        context.register(self.y, DomainEvents::BOUNDS, Y);

        TimesConstantPropagator {
            x: self.x,
            y: self.y,
            constant: self.constant,
        }
    }
}

/// Bounds-consistent propagator for `y = constant * x`.
///
/// A bound product that leaves the representable range is a modeling-level failure and surfaces
/// as [`NumericOverflow`] rather than a conflict; the division direction cannot overflow.
#[derive(Clone, Copy, Debug)]
pub struct TimesConstantPropagator {
    x: DomainId,
    y: DomainId,
    constant: i64,
}

impl Propagator for TimesConstantPropagator {
    fn name(&self) -> &str {
        "TimesConstant"
    }

    fn propagate(&mut self, mut context: PropagationContextMut<'_>) -> PropagationStatus {
        if self.constant == 0 {
            context.post(self.y, Interval::point(0), &[])?;
            return Ok(());
        }

        let x = context.interval(self.x);
        context.post(self.y, multiply(x, self.constant)?, &[self.x])?;

        let y = context.interval(self.y);
        context.post(self.x, divide(y, self.constant), &[self.y])?;

        Ok(())
    }
}

/// The image of the interval under multiplication by `c != 0`. A negative factor reverses order,
/// so the endpoints swap.
fn multiply(interval: Interval, c: i64) -> Result<Interval, NumericOverflow> {
    if interval.is_empty() {
        return Ok(Interval::EMPTY);
    }
    let (low, high) = if c > 0 {
        (interval.lower, interval.upper)
    } else {
        (interval.upper, interval.lower)
    };
    Ok(Interval {
        lower: multiply_bound(low, c)?,
        upper: multiply_bound(high, c)?,
    })
}

fn multiply_bound(bound: i64, c: i64) -> Result<i64, NumericOverflow> {
    // Sentinels are sticky: an unbounded side stays unbounded, on the side determined by the
    // sign of the factor.
    if bound >= HORIZON || bound <= -HORIZON {
        let positive = (bound > 0) == (c > 0);
        return Ok(if positive { HORIZON } else { -HORIZON });
    }

    let product = bound.checked_mul(c).ok_or(NumericOverflow)?;
    if !(-HORIZON..=HORIZON).contains(&product) {
        return Err(NumericOverflow);
    }
    Ok(product)
}

/// The tightest interval `x` can take given `y = c * x`, for `c != 0`: the lower bound rounds up
/// and the upper bound rounds down, since `x` is integral.
fn divide(interval: Interval, c: i64) -> Interval {
    if interval.is_empty() {
        return Interval::EMPTY;
    }
    let (low, high) = if c > 0 {
        (interval.lower, interval.upper)
    } else {
        (interval.upper, interval.lower)
    };
    Interval {
        lower: divide_bound(low, c, true),
        upper: divide_bound(high, c, false),
    }
}

fn divide_bound(bound: i64, c: i64, round_up: bool) -> i64 {
    if bound >= HORIZON || bound <= -HORIZON {
        let positive = (bound > 0) == (c > 0);
        return if positive { HORIZON } else { -HORIZON };
    }
    // Called through the trait to avoid colliding with the unstable inherent methods.
    if round_up {
        <i64 as NumExt>::div_ceil(bound, c)
    } else {
        <i64 as NumExt>::div_floor(bound, c)
    }
}
