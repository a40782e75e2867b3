use crate::basic_types::NumericOverflow;
use crate::marrow_assert_moderate;

/// The largest magnitude a domain bound can take.
///
/// Bounds at `-HORIZON` or `+HORIZON` act as sentinels for "unbounded": they stay put under
/// shifting, and any interval product whose corners would leave `[-HORIZON, HORIZON]` is reported
/// as [`NumericOverflow`] rather than silently wrapped. Because every in-domain value fits well
/// within an `i64`, adding two bounds can never wrap the machine integer.
pub const HORIZON: i64 = (1 << 62) - 1;

/// A closed integer range `[lower, upper]`.
///
/// The interval is empty when `lower > upper`; [`Interval::EMPTY`] is the canonical empty
/// representative. Every arithmetic operation returns an interval that encloses the true image of
/// the operation over the operand intervals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Interval {
    pub lower: i64,
    pub upper: i64,
}

impl Interval {
    /// The canonical empty interval.
    pub const EMPTY: Interval = Interval {
        lower: HORIZON,
        upper: -HORIZON,
    };

    /// The interval containing every representable value.
    pub const FULL: Interval = Interval {
        lower: -HORIZON,
        upper: HORIZON,
    };

    pub fn new(lower: i64, upper: i64) -> Interval {
        marrow_assert_moderate!(
            lower >= -HORIZON && upper <= HORIZON,
            "interval bounds must lie within the representable horizon"
        );
        Interval { lower, upper }
    }

    /// The interval containing exactly one value.
    pub fn point(value: i64) -> Interval {
        Interval::new(value, value)
    }

    pub fn is_empty(&self) -> bool {
        self.lower > self.upper
    }

    pub fn contains(&self, value: i64) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// The number of values in the interval, or zero if it is empty.
    pub fn size(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            (self.upper - self.lower) as u64 + 1
        }
    }

    pub fn intersect(&self, other: Interval) -> Interval {
        Interval {
            lower: self.lower.max(other.lower),
            upper: self.upper.min(other.upper),
        }
    }

    /// Translate the interval by `amount`. Sentinel bounds stay in place, so an unbounded side
    /// remains unbounded.
    pub fn shift(&self, amount: i64) -> Interval {
        if self.is_empty() {
            return Interval::EMPTY;
        }
        Interval {
            lower: shift_bound(self.lower, amount),
            upper: shift_bound(self.upper, amount),
        }
    }

    /// The interval of `-x` for `x` in this interval. Negation reverses order, so the endpoints
    /// swap.
    pub fn negate(&self) -> Interval {
        if self.is_empty() {
            return Interval::EMPTY;
        }
        Interval {
            lower: -self.upper,
            upper: -self.lower,
        }
    }

    /// The enclosing interval of the four corner products, computed in checked arithmetic.
    ///
    /// A corner product which overflows the machine integer, or whose magnitude exceeds
    /// [`HORIZON`], is a modeling-level failure: the result is [`NumericOverflow`], never a
    /// wrapped value.
    pub fn checked_mul(&self, other: Interval) -> Result<Interval, NumericOverflow> {
        if self.is_empty() || other.is_empty() {
            return Ok(Interval::EMPTY);
        }

        let corners = [
            checked_product(self.lower, other.lower)?,
            checked_product(self.lower, other.upper)?,
            checked_product(self.upper, other.lower)?,
            checked_product(self.upper, other.upper)?,
        ];

        let lower = corners.iter().copied().min().expect("four corners");
        let upper = corners.iter().copied().max().expect("four corners");

        Ok(Interval { lower, upper })
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            write!(f, "[empty]")
        } else {
            write!(f, "[{}, {}]", self.lower, self.upper)
        }
    }
}

fn shift_bound(bound: i64, amount: i64) -> i64 {
    // Sentinels are sticky: an unbounded side does not move.
    if bound <= -HORIZON || bound >= HORIZON {
        return bound;
    }
    bound.saturating_add(amount).clamp(-HORIZON, HORIZON)
}

fn checked_product(a: i64, b: i64) -> Result<i64, NumericOverflow> {
    let product = a.checked_mul(b).ok_or(NumericOverflow)?;
    if !(-HORIZON..=HORIZON).contains(&product) {
        return Err(NumericOverflow);
    }
    Ok(product)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplication_encloses_all_corner_products() {
        let result = Interval::new(-5, 5)
            .checked_mul(Interval::new(-5, 5))
            .expect("no overflow");
        assert_eq!(result, Interval::new(-25, 25));
    }

    #[test]
    fn multiplication_with_mixed_signs_picks_extreme_corners() {
        let result = Interval::new(-3, 2)
            .checked_mul(Interval::new(4, 7))
            .expect("no overflow");
        assert_eq!(result, Interval::new(-21, 14));
    }

    #[test]
    fn multiplication_beyond_the_horizon_is_an_overflow_failure() {
        let huge = Interval::point(1 << 61);
        let result = huge.checked_mul(Interval::point(2));
        assert_eq!(result, Err(NumericOverflow));
    }

    #[test]
    fn multiplication_overflowing_the_machine_integer_is_detected() {
        let result = Interval::point(1 << 40).checked_mul(Interval::point(1 << 40));
        assert_eq!(result, Err(NumericOverflow));
    }

    #[test]
    fn multiplication_with_an_empty_operand_is_empty() {
        let result = Interval::EMPTY
            .checked_mul(Interval::new(1, 10))
            .expect("empty operands cannot overflow");
        assert!(result.is_empty());
    }

    #[test]
    fn intersection_of_disjoint_intervals_is_empty() {
        assert!(Interval::new(0, 3).intersect(Interval::new(5, 9)).is_empty());
    }

    #[test]
    fn shifting_moves_both_endpoints() {
        assert_eq!(Interval::new(2, 4).shift(3), Interval::new(5, 7));
        assert_eq!(Interval::new(2, 4).shift(-3), Interval::new(-1, 1));
    }

    #[test]
    fn shifting_leaves_sentinel_bounds_in_place() {
        let half_open = Interval::new(-HORIZON, 10);
        assert_eq!(half_open.shift(5), Interval::new(-HORIZON, 15));
    }

    #[test]
    fn negation_swaps_the_endpoints() {
        assert_eq!(Interval::new(-2, 7).negate(), Interval::new(-7, 2));
    }
}
