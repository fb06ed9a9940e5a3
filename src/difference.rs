//! Differences between two dates.
//!
//! Every function reads `left - right`, so a later `left` is positive.
//! Calendar differences count field boundaries crossed and ignore the time
//! of day. Exact differences count fully elapsed units. All return `None`
//! when either date is invalid.

use core::cmp::Ordering;

use crate::{
    arithmetic::sub_iso_week_years,
    boundaries::{get_iso_week_year, start_of, Period},
    fields::{
        from_local_fields, is_last_day_of_month, local_date_time, local_epoch_days, local_fields,
        map_local, set_date, set_year, wall_milliseconds,
    },
    instant::compare_asc,
    iso::LocalFields,
    options::{RoundingMode, WeekOptions},
    rounding::divide_rounded,
    utils::{self, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND, MS_PER_WEEK},
    DateLike, Sign,
};

fn sign_of(ordering: Ordering) -> i64 {
    Sign::from(ordering) as i64
}

/// Compares the local fields of two dates, ignoring their offsets.
fn compare_local_asc<A: DateLike, B: DateLike>(left: &A, right: &B) -> Option<Ordering> {
    Some(local_date_time(left)?.cmp(&local_date_time(right)?))
}

// ==== Exact clock differences ====

pub fn difference_in_milliseconds<A: DateLike, B: DateLike>(left: &A, right: &B) -> Option<i64> {
    Some(left.epoch_milliseconds()? - right.epoch_milliseconds()?)
}

fn difference_in_unit<A: DateLike, B: DateLike>(
    left: &A,
    right: &B,
    unit: i64,
    rounding_mode: RoundingMode,
) -> Option<i64> {
    let diff = difference_in_milliseconds(left, right)?;
    Some(divide_rounded(diff, unit, rounding_mode))
}

pub fn difference_in_seconds<A: DateLike, B: DateLike>(
    left: &A,
    right: &B,
    rounding_mode: RoundingMode,
) -> Option<i64> {
    difference_in_unit(left, right, MS_PER_SECOND, rounding_mode)
}

pub fn difference_in_minutes<A: DateLike, B: DateLike>(
    left: &A,
    right: &B,
    rounding_mode: RoundingMode,
) -> Option<i64> {
    difference_in_unit(left, right, MS_PER_MINUTE, rounding_mode)
}

/// Returns the number of hours between the dates.
///
/// ```rust
/// use calendrical::{difference::difference_in_hours, Instant, RoundingMode};
///
/// let left = Instant::from_date_time(2014, 7, 2, 19, 0, 0, 0);
/// let right = Instant::from_date_time(2014, 7, 2, 6, 30, 0, 0);
/// assert_eq!(difference_in_hours(&left, &right, RoundingMode::Trunc), Some(12));
/// assert_eq!(difference_in_hours(&left, &right, RoundingMode::HalfCeil), Some(13));
/// ```
pub fn difference_in_hours<A: DateLike, B: DateLike>(
    left: &A,
    right: &B,
    rounding_mode: RoundingMode,
) -> Option<i64> {
    difference_in_unit(left, right, MS_PER_HOUR, rounding_mode)
}

// ==== Exact calendar differences ====

/// Returns the number of full days between the dates.
///
/// A day is full when the local time of day has been reached again, so
/// 23:00 to 00:00 the next day is zero days.
pub fn difference_in_days<A: DateLike, B: DateLike>(left: &A, right: &B) -> Option<i64> {
    let sign = sign_of(compare_local_asc(left, right)?);
    let difference = difference_in_calendar_days(left, right)?.abs();
    let shifted = map_local(left, |f| LocalFields {
        day: f.day - sign * difference,
        ..f
    });
    let not_full = i64::from(sign_of(compare_local_asc(&shifted, right)?) == -sign);
    Some(sign * (difference - not_full))
}

pub fn difference_in_weeks<A: DateLike, B: DateLike>(
    left: &A,
    right: &B,
    rounding_mode: RoundingMode,
) -> Option<i64> {
    Some(divide_rounded(difference_in_days(left, right)?, 7, rounding_mode))
}

/// Returns the number of full months between the dates.
///
/// When `left` is the last day of its month, one calendar month after
/// `right`, and later than `right`, the month counts as full even if the
/// day of the month of `right` was not reached. The reverse direction has
/// no such exception, so the result is not antisymmetric:
///
/// ```rust
/// use calendrical::{difference::difference_in_months, Instant};
///
/// let april_30 = Instant::from_date_time(2020, 4, 30, 0, 0, 0, 0);
/// let march_31 = Instant::from_date_time(2020, 3, 31, 0, 0, 0, 0);
/// assert_eq!(difference_in_months(&april_30, &march_31), Some(1));
/// assert_eq!(difference_in_months(&march_31, &april_30), Some(0));
/// ```
pub fn difference_in_months<A: DateLike, B: DateLike>(left: &A, right: &B) -> Option<i64> {
    let ordering = compare_asc(left, right)?;
    let sign = sign_of(ordering);
    let difference = difference_in_calendar_months(left, right)?.abs();
    if difference < 1 {
        return Some(0);
    }

    // February 28th and 29th are first pushed into March.
    let fields = local_fields(left)?;
    let anchored = if fields.month == 2 && fields.day > 27 {
        set_date(left, 30)
    } else {
        left.clone()
    };
    let anchored_fields = local_fields(&anchored)?;
    // Unlike `set_month`, the day is not clamped here.
    let shifted = from_local_fields(
        left,
        LocalFields {
            month: anchored_fields.month - sign * difference,
            ..anchored_fields
        },
    );
    let mut not_full = sign_of(compare_asc(&shifted, right)?) == -sign;
    if is_last_day_of_month(left) && difference == 1 && ordering == Ordering::Greater {
        not_full = false;
    }
    Some(sign * (difference - i64::from(not_full)))
}

pub fn difference_in_quarters<A: DateLike, B: DateLike>(
    left: &A,
    right: &B,
    rounding_mode: RoundingMode,
) -> Option<i64> {
    Some(divide_rounded(difference_in_months(left, right)?, 3, rounding_mode))
}

/// Returns the number of full years between the dates.
pub fn difference_in_years<A: DateLike, B: DateLike>(left: &A, right: &B) -> Option<i64> {
    let sign = sign_of(compare_asc(left, right)?);
    let difference = difference_in_calendar_years(left, right)?.abs();
    // 1584 is a leap year, so February 29th survives the move.
    let not_full =
        sign_of(compare_asc(&set_year(left, 1584), &set_year(right, 1584))?) == -sign;
    Some(sign * (difference - i64::from(not_full)))
}

/// Returns the number of full ISO week-numbering years between the dates.
pub fn difference_in_iso_week_years<A: DateLike, B: DateLike>(left: &A, right: &B) -> Option<i64> {
    let sign = sign_of(compare_asc(left, right)?);
    let difference = difference_in_calendar_iso_week_years(left, right)?.abs();
    let shifted = sub_iso_week_years(left, sign * difference);
    let not_full = sign_of(compare_asc(&shifted, right)?) == -sign;
    Some(sign * (difference - i64::from(not_full)))
}

/// Returns the number of weekdays from `right` up to, but excluding, `left`.
pub fn difference_in_business_days<A: DateLike, B: DateLike>(left: &A, right: &B) -> Option<i64> {
    let target = local_epoch_days(left)?;
    let calendar = difference_in_calendar_days(left, right)?;
    let sign = if calendar < 0 { -1 } else { 1 };
    let weeks = calendar / 7;
    let mut result = weeks * 5;
    let mut moving = local_epoch_days(right)? + weeks * 7;
    while moving != target {
        if !matches!(utils::weekday_from_epoch_days(moving), 0 | 6) {
            result += sign;
        }
        moving += sign;
    }
    Some(result)
}

// ==== Calendar differences ====

/// Returns the number of calendar days between the dates.
///
/// ```rust
/// use calendrical::{difference::difference_in_calendar_days, Instant};
///
/// let left = Instant::from_date_time(2014, 7, 20, 0, 0, 0, 0);
/// let right = Instant::from_date_time(2014, 7, 5, 23, 59, 0, 0);
/// assert_eq!(difference_in_calendar_days(&left, &right), Some(15));
/// ```
pub fn difference_in_calendar_days<A: DateLike, B: DateLike>(left: &A, right: &B) -> Option<i64> {
    Some(local_epoch_days(left)? - local_epoch_days(right)?)
}

fn calendar_weeks_between<A: DateLike, B: DateLike>(
    left: &A,
    right: &B,
    period: Period,
    options: &WeekOptions<'_>,
) -> Option<i64> {
    let left = wall_milliseconds(&start_of(period, left, options))?;
    let right = wall_milliseconds(&start_of(period, right, options))?;
    Some(divide_rounded(left - right, MS_PER_WEEK, RoundingMode::HalfCeil))
}

/// Returns the number of local week boundaries between the dates.
pub fn difference_in_calendar_weeks<A: DateLike, B: DateLike>(
    left: &A,
    right: &B,
    options: &WeekOptions<'_>,
) -> Option<i64> {
    calendar_weeks_between(left, right, Period::Week, options)
}

pub fn difference_in_calendar_iso_weeks<A: DateLike, B: DateLike>(
    left: &A,
    right: &B,
) -> Option<i64> {
    calendar_weeks_between(left, right, Period::IsoWeek, &WeekOptions::default())
}

pub fn difference_in_calendar_months<A: DateLike, B: DateLike>(left: &A, right: &B) -> Option<i64> {
    let (left, right) = (local_fields(left)?, local_fields(right)?);
    Some((left.year - right.year) * 12 + left.month - right.month)
}

pub fn difference_in_calendar_quarters<A: DateLike, B: DateLike>(
    left: &A,
    right: &B,
) -> Option<i64> {
    let (left, right) = (local_fields(left)?, local_fields(right)?);
    let quarter = |month: i64| (month - 1) / 3;
    Some((left.year - right.year) * 4 + quarter(left.month) - quarter(right.month))
}

pub fn difference_in_calendar_years<A: DateLike, B: DateLike>(left: &A, right: &B) -> Option<i64> {
    Some(local_fields(left)?.year - local_fields(right)?.year)
}

pub fn difference_in_calendar_iso_week_years<A: DateLike, B: DateLike>(
    left: &A,
    right: &B,
) -> Option<i64> {
    Some(i64::from(get_iso_week_year(left)?) - i64::from(get_iso_week_year(right)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{options::Weekday, Instant, UtcOffset};

    fn date(y: i64, m: i64, d: i64) -> Instant {
        Instant::from_date_time(y, m, d, 0, 0, 0, 0)
    }

    fn dt(y: i64, m: i64, d: i64, h: i64, mi: i64, s: i64) -> Instant {
        Instant::from_date_time(y, m, d, h, mi, s, 0)
    }

    #[test]
    fn calendar_days_and_weeks() {
        let left = date(2014, 7, 20);
        let right = date(2014, 7, 5);
        assert_eq!(difference_in_calendar_days(&left, &right), Some(15));
        assert_eq!(difference_in_calendar_days(&right, &left), Some(-15));
        assert_eq!(difference_in_calendar_weeks(&left, &right, &WeekOptions::default()), Some(3));
        let monday = WeekOptions::starting_on(Weekday::Monday);
        assert_eq!(difference_in_calendar_weeks(&left, &right, &monday), Some(2));
        assert_eq!(difference_in_calendar_iso_weeks(&left, &right), Some(2));
    }

    #[test]
    fn calendar_fields() {
        let left = date(2014, 1, 1);
        let right = date(2013, 12, 31);
        assert_eq!(difference_in_calendar_months(&left, &right), Some(1));
        assert_eq!(difference_in_calendar_quarters(&left, &right), Some(1));
        assert_eq!(difference_in_calendar_years(&left, &right), Some(1));
        assert_eq!(
            difference_in_calendar_iso_week_years(&date(2012, 1, 1), &date(2010, 1, 1)),
            Some(2)
        );
    }

    #[test]
    fn calendar_days_use_local_fields() {
        let offset = UtcOffset::from_minutes(-300).unwrap();
        // Both are December 31st local time, a day apart in UTC.
        let left = Instant::from_local(offset, 2013, 12, 31, 23, 0, 0, 0);
        let right = Instant::from_local(offset, 2013, 12, 31, 1, 0, 0, 0);
        assert_eq!(difference_in_calendar_days(&left, &right), Some(0));
    }

    #[test]
    fn full_days() {
        assert_eq!(difference_in_days(&dt(2012, 7, 2, 0, 0, 0), &dt(2011, 7, 2, 23, 0, 0)), Some(365));
        assert_eq!(difference_in_days(&dt(2011, 7, 3, 0, 1, 0), &dt(2011, 7, 2, 23, 59, 0)), Some(0));
        assert_eq!(difference_in_days(&dt(2011, 7, 2, 23, 0, 0), &dt(2012, 7, 2, 0, 0, 0)), Some(-365));
        assert_eq!(difference_in_weeks(&date(2014, 7, 20), &date(2014, 7, 5), RoundingMode::Trunc), Some(2));
        assert_eq!(
            difference_in_weeks(&date(2014, 7, 20), &date(2014, 7, 5), RoundingMode::HalfCeil),
            Some(2)
        );
        assert_eq!(
            difference_in_weeks(&date(2014, 7, 20), &date(2014, 7, 5), RoundingMode::Ceil),
            Some(3)
        );
    }

    #[test]
    fn clock_differences() {
        let left = dt(2014, 7, 2, 12, 30, 20);
        let right = dt(2014, 7, 2, 12, 0, 7);
        assert_eq!(difference_in_milliseconds(&left, &right), Some(1_813_000));
        assert_eq!(difference_in_seconds(&left, &right, RoundingMode::Trunc), Some(1813));
        assert_eq!(difference_in_minutes(&left, &right, RoundingMode::Trunc), Some(30));
        assert_eq!(difference_in_minutes(&right, &left, RoundingMode::Trunc), Some(-30));
        assert_eq!(difference_in_minutes(&right, &left, RoundingMode::HalfCeil), Some(-30));
        assert_eq!(difference_in_minutes(&right, &left, RoundingMode::Floor), Some(-31));
        assert_eq!(
            difference_in_hours(&dt(2014, 7, 2, 6, 30, 0), &dt(2014, 7, 2, 7, 0, 0), RoundingMode::Trunc),
            Some(0)
        );
    }

    #[test]
    fn full_months() {
        assert_eq!(difference_in_months(&date(2014, 9, 1), &date(2014, 1, 31)), Some(7));
        assert_eq!(difference_in_months(&date(2014, 1, 31), &date(2014, 9, 1)), Some(-7));
        assert_eq!(difference_in_months(&date(2014, 2, 28), &date(2014, 1, 31)), Some(1));
        assert_eq!(difference_in_months(&date(2014, 8, 1), &date(2014, 8, 31)), Some(0));
        assert_eq!(difference_in_quarters(&date(2014, 9, 1), &date(2014, 1, 31), RoundingMode::Trunc), Some(2));
        assert_eq!(
            difference_in_quarters(&date(2014, 9, 1), &date(2014, 1, 31), RoundingMode::HalfCeil),
            Some(2)
        );
    }

    #[test]
    fn last_day_of_month_counts_as_full_month_forward_only() {
        let april_30 = date(2020, 4, 30);
        let march_31 = date(2020, 3, 31);
        assert_eq!(difference_in_months(&april_30, &march_31), Some(1));
        // The mirror image has no exception.
        assert_eq!(difference_in_months(&march_31, &april_30), Some(0));
        // Only a one-month distance is special.
        assert_eq!(difference_in_months(&date(2020, 6, 30), &date(2020, 3, 31)), Some(2));
    }

    #[test]
    fn full_years() {
        assert_eq!(difference_in_years(&date(2015, 2, 11), &date(2013, 12, 31)), Some(1));
        assert_eq!(difference_in_years(&date(2013, 12, 31), &date(2015, 2, 11)), Some(-1));
        assert_eq!(difference_in_years(&date(2016, 2, 29), &date(2012, 2, 29)), Some(4));
        assert_eq!(difference_in_years(&date(2015, 2, 28), &date(2012, 2, 29)), Some(2));
        assert_eq!(difference_in_iso_week_years(&date(2012, 1, 1), &date(2010, 1, 1)), Some(1));
    }

    #[test]
    fn business_days() {
        assert_eq!(difference_in_business_days(&date(2014, 9, 8), &date(2014, 9, 5)), Some(1));
        assert_eq!(difference_in_business_days(&date(2014, 9, 5), &date(2014, 9, 8)), Some(-1));
        assert_eq!(difference_in_business_days(&date(2014, 7, 20), &date(2014, 1, 10)), Some(136));
        assert_eq!(difference_in_business_days(&date(2014, 1, 10), &date(2014, 7, 20)), Some(-135));
        assert_eq!(difference_in_business_days(&date(2014, 9, 6), &date(2014, 9, 6)), Some(0));
        assert_eq!(difference_in_business_days(&date(2014, 9, 15), &date(2014, 9, 1)), Some(10));
    }

    #[test]
    fn invalid_inputs() {
        let invalid = Instant::invalid();
        let valid = date(2014, 1, 1);
        assert_eq!(difference_in_days(&invalid, &valid), None);
        assert_eq!(difference_in_months(&valid, &invalid), None);
        assert_eq!(difference_in_business_days(&invalid, &valid), None);
        assert_eq!(difference_in_calendar_weeks(&invalid, &valid, &WeekOptions::default()), None);
    }
}
