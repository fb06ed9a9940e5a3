//! Implementation of quotient rounding functionality

use crate::{
    options::{RoundingMode, UnsignedRoundingMode},
    DateResult, DateUnwrap,
};

use core::{
    cmp::Ordering,
    num::NonZeroU64,
    ops::{Div, Neg},
};

use num_traits::{ConstZero, Euclid, FromPrimitive, NumCast, Signed, ToPrimitive};

pub(crate) trait Roundable:
    Euclid + Div + PartialOrd + Signed + FromPrimitive + ToPrimitive + NumCast + ConstZero + Copy
{
    fn is_exact(dividend: Self, divisor: Self) -> bool;
    fn compare_remainder(dividend: Self, divisor: Self) -> Ordering;
    fn is_even_cardinal(dividend: Self, divisor: Self) -> bool;
    fn result_floor(dividend: Self, divisor: Self) -> u128;
    fn result_ceil(dividend: Self, divisor: Self) -> u128;
}

/// Divides a signed value by a positive divisor and rounds the quotient.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub(crate) struct IncrementRounder<T: Roundable> {
    sign: bool,
    dividend: T,
    divisor: T,
}

impl<T: Roundable> IncrementRounder<T> {
    #[inline]
    pub(crate) fn from_signed_num(number: T, divisor: NonZeroU64) -> DateResult<Self> {
        let divisor = <T as NumCast>::from(divisor.get()).date_unwrap()?;
        Ok(Self {
            sign: number >= T::ZERO,
            dividend: number,
            divisor,
        })
    }
}

impl<T: Roundable> IncrementRounder<T> {
    /// Returns the signed, rounded quotient.
    #[inline]
    pub fn round_quotient(&self, mode: RoundingMode) -> i128 {
        let unsigned_rounding_mode = mode.get_unsigned_round_mode(self.sign);
        let rounded =
            apply_unsigned_rounding_mode(self.dividend, self.divisor, unsigned_rounding_mode)
                as i128;
        if self.sign {
            rounded
        } else {
            rounded.neg()
        }
    }
}

impl Roundable for i64 {
    fn is_exact(dividend: Self, divisor: Self) -> bool {
        dividend.rem_euclid(divisor) == 0
    }

    fn compare_remainder(dividend: Self, divisor: Self) -> Ordering {
        // Compare twice the remainder so odd divisors have an exact midpoint.
        (2 * (dividend.unsigned_abs() % divisor.unsigned_abs())).cmp(&divisor.unsigned_abs())
    }

    fn is_even_cardinal(dividend: Self, divisor: Self) -> bool {
        Roundable::result_floor(dividend, divisor).rem_euclid(2) == 0
    }

    fn result_floor(dividend: Self, divisor: Self) -> u128 {
        (dividend.unsigned_abs() / divisor.unsigned_abs()) as u128
    }

    fn result_ceil(dividend: Self, divisor: Self) -> u128 {
        Roundable::result_floor(dividend, divisor) + 1
    }
}

/// Applies the unsigned rounding mode.
fn apply_unsigned_rounding_mode<T: Roundable>(
    dividend: T,
    divisor: T,
    unsigned_rounding_mode: UnsignedRoundingMode,
) -> u128 {
    // is_floor
    // 1. If x is equal to r1, return r1.
    if Roundable::is_exact(dividend, divisor) {
        return Roundable::result_floor(dividend, divisor);
    }
    // 2. Assert: r1 < x < r2.

    // 3. If unsignedRoundingMode is zero, return r1.
    if unsigned_rounding_mode == UnsignedRoundingMode::Zero {
        return Roundable::result_floor(dividend, divisor);
    };
    // 4. If unsignedRoundingMode is infinity, return r2.
    if unsigned_rounding_mode == UnsignedRoundingMode::Infinity {
        return Roundable::result_ceil(dividend, divisor);
    };

    // 5. Let d1 be x – r1.
    // 6. Let d2 be r2 – x.
    // 7. If d1 < d2, return r1.
    // 8. If d2 < d1, return r2.
    match Roundable::compare_remainder(dividend, divisor) {
        Ordering::Less => Roundable::result_floor(dividend, divisor),
        Ordering::Greater => Roundable::result_ceil(dividend, divisor),
        Ordering::Equal => {
            // 9. If unsignedRoundingMode is half-zero, return r1.
            if unsigned_rounding_mode == UnsignedRoundingMode::HalfZero {
                return Roundable::result_floor(dividend, divisor);
            };
            // 10. If unsignedRoundingMode is half-infinity, return r2.
            if unsigned_rounding_mode == UnsignedRoundingMode::HalfInfinity {
                return Roundable::result_ceil(dividend, divisor);
            };
            // 11. Assert: unsignedRoundingMode is half-even.
            debug_assert!(unsigned_rounding_mode == UnsignedRoundingMode::HalfEven);
            // 12. If r1 is even, return r1; otherwise return r2.
            if Roundable::is_even_cardinal(dividend, divisor) {
                return Roundable::result_floor(dividend, divisor);
            }
            Roundable::result_ceil(dividend, divisor)
        }
    }
}

/// Divides `dividend` by `divisor` and rounds the quotient with `mode`.
///
/// Integer results never carry a negative zero.
pub(crate) fn divide_rounded(dividend: i64, divisor: i64, mode: RoundingMode) -> i64 {
    let Some(divisor) = u64::try_from(divisor).ok().and_then(NonZeroU64::new) else {
        return 0;
    };
    IncrementRounder::from_signed_num(dividend, divisor)
        .map(|rounder| rounder.round_quotient(mode))
        .ok()
        .and_then(|quotient| i64::try_from(quotient).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use core::num::NonZeroU64;

    use super::{divide_rounded, IncrementRounder, Roundable, RoundingMode};
    use core::fmt::Debug;

    #[derive(Debug)]
    struct TestCase<T> {
        x: T,
        divisor: u64,
        ceil: i128,
        floor: i128,
        expand: i128,
        trunc: i128,
        half_ceil: i128,
        half_floor: i128,
        half_expand: i128,
        half_trunc: i128,
        half_even: i128,
    }

    impl<T: Roundable + Debug> TestCase<T> {
        fn run(&self) {
            let rounder =
                IncrementRounder::from_signed_num(self.x, NonZeroU64::new(self.divisor).unwrap())
                    .unwrap();
            let modes = [
                (RoundingMode::Ceil, self.ceil),
                (RoundingMode::Floor, self.floor),
                (RoundingMode::Expand, self.expand),
                (RoundingMode::Trunc, self.trunc),
                (RoundingMode::HalfCeil, self.half_ceil),
                (RoundingMode::HalfFloor, self.half_floor),
                (RoundingMode::HalfExpand, self.half_expand),
                (RoundingMode::HalfTrunc, self.half_trunc),
                (RoundingMode::HalfEven, self.half_even),
            ];
            for (mode, expected) in modes {
                assert_eq!(
                    expected,
                    rounder.round_quotient(mode),
                    "Testing {:?}/{:?} with mode {mode}",
                    self.x,
                    self.divisor
                );
            }
        }
    }

    #[test]
    fn halfway_quotients() {
        // 2.5
        TestCase {
            x: 5i64,
            divisor: 2,
            ceil: 3,
            floor: 2,
            expand: 3,
            trunc: 2,
            half_ceil: 3,
            half_floor: 2,
            half_expand: 3,
            half_trunc: 2,
            half_even: 2,
        }
        .run();
        // -2.5
        TestCase {
            x: -5i64,
            divisor: 2,
            ceil: -2,
            floor: -3,
            expand: -3,
            trunc: -2,
            half_ceil: -2,
            half_floor: -3,
            half_expand: -3,
            half_trunc: -2,
            half_even: -2,
        }
        .run();
        // 3.5
        TestCase {
            x: 7i64,
            divisor: 2,
            ceil: 4,
            floor: 3,
            expand: 4,
            trunc: 3,
            half_ceil: 4,
            half_floor: 3,
            half_expand: 4,
            half_trunc: 3,
            half_even: 4,
        }
        .run();
    }

    #[test]
    fn odd_divisors() {
        // 1.333..
        TestCase {
            x: 4i64,
            divisor: 3,
            ceil: 2,
            floor: 1,
            expand: 2,
            trunc: 1,
            half_ceil: 1,
            half_floor: 1,
            half_expand: 1,
            half_trunc: 1,
            half_even: 1,
        }
        .run();
        // -1.666..
        TestCase {
            x: -5i64,
            divisor: 3,
            ceil: -1,
            floor: -2,
            expand: -2,
            trunc: -1,
            half_ceil: -2,
            half_floor: -2,
            half_expand: -2,
            half_trunc: -2,
            half_even: -2,
        }
        .run();
    }

    #[test]
    fn exact_quotients() {
        TestCase {
            x: -21i64,
            divisor: 7,
            ceil: -3,
            floor: -3,
            expand: -3,
            trunc: -3,
            half_ceil: -3,
            half_floor: -3,
            half_expand: -3,
            half_trunc: -3,
            half_even: -3,
        }
        .run();
    }

    #[test]
    fn divide_rounded_never_yields_negative_zero() {
        assert_eq!(divide_rounded(-999, 1000, RoundingMode::Trunc), 0);
        assert_eq!(divide_rounded(-1500, 1000, RoundingMode::HalfCeil), -1);
        assert_eq!(divide_rounded(1500, 1000, RoundingMode::HalfCeil), 2);
        assert_eq!(divide_rounded(10, 0, RoundingMode::Trunc), 0);
    }
}
