//! Intervals between two dates.
//!
//! An [`Interval`] may run backwards unless it was created with
//! `assert_positive`. Every operation here sorts the endpoints first.

use crate::{
    arithmetic::add,
    difference::{
        difference_in_days, difference_in_hours, difference_in_minutes, difference_in_months,
        difference_in_seconds, difference_in_years,
    },
    fields::map_local,
    instant::{max, min},
    iso::LocalFields,
    options::RoundingMode,
    rounding::divide_rounded,
    utils::MS_PER_DAY,
    DateError, DateLike, DateResult, Duration,
};

/// A pair of dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval<D> {
    pub start: D,
    pub end: D,
}

impl<D: DateLike> Interval<D> {
    /// Creates an interval without validating the endpoints.
    pub const fn new(start: D, end: D) -> Self {
        Self { start, end }
    }

    /// Creates an interval with valid endpoints, optionally requiring that
    /// `start` is not after `end`.
    pub fn try_new(start: D, end: D, assert_positive: bool) -> DateResult<Self> {
        let Some(start_ms) = start.epoch_milliseconds() else {
            return Err(DateError::r#type().with_message("Start date is invalid"));
        };
        let Some(end_ms) = end.epoch_milliseconds() else {
            return Err(DateError::r#type().with_message("End date is invalid"));
        };
        if assert_positive && start_ms > end_ms {
            return Err(DateError::r#type().with_message("End date must be after start date"));
        }
        Ok(Self { start, end })
    }

    /// Returns the endpoints in milliseconds, earliest first.
    fn sorted_milliseconds(&self) -> Option<(i64, i64)> {
        let start = self.start.epoch_milliseconds()?;
        let end = self.end.epoch_milliseconds()?;
        Some((start.min(end), start.max(end)))
    }
}

/// Returns whether `date` lies within the closed interval.
pub fn is_within_interval<D: DateLike>(date: &D, interval: &Interval<D>) -> bool {
    match (date.epoch_milliseconds(), interval.sorted_milliseconds()) {
        (Some(time), Some((start, end))) => start <= time && time <= end,
        _ => false,
    }
}

/// Returns whether two intervals overlap.
///
/// With `inclusive`, intervals that only touch at an endpoint overlap.
pub fn are_intervals_overlapping<D: DateLike>(
    left: &Interval<D>,
    right: &Interval<D>,
    inclusive: bool,
) -> bool {
    let (Some((left_start, left_end)), Some((right_start, right_end))) =
        (left.sorted_milliseconds(), right.sorted_milliseconds())
    else {
        return false;
    };
    if inclusive {
        left_start <= right_end && right_start <= left_end
    } else {
        left_start < right_end && right_start < left_end
    }
}

/// Clamps `date` into the interval. Invalid if any input is invalid.
pub fn clamp<D: DateLike>(date: &D, interval: &Interval<D>) -> D {
    let lower = max(&[date.clone(), interval.start.clone()]);
    match lower {
        Some(lower) => {
            min(&[lower, interval.end.clone()]).unwrap_or_else(|| date.construct_like(None))
        }
        None => date.construct_like(None),
    }
}

/// Returns the number of days two intervals share, rounded up.
pub fn get_overlapping_days_in_intervals<D: DateLike>(
    left: &Interval<D>,
    right: &Interval<D>,
) -> Option<i64> {
    let (left_start, left_end) = left.sorted_milliseconds()?;
    let (right_start, right_end) = right.sorted_milliseconds()?;
    if !(left_start < right_end && right_start < left_end) {
        return Some(0);
    }
    let overlap_start = left_start.max(right_start);
    let overlap_end = left_end.min(right_end);
    Some(divide_rounded(overlap_end - overlap_start, MS_PER_DAY, RoundingMode::Ceil))
}

/// Returns midnight of every `step`-th day in the interval.
///
/// Dates run chronologically; a backwards interval or a negative `step`
/// each reverse the order. A zero `step` or an invalid endpoint yields no
/// dates.
pub fn each_day_of_interval<D: DateLike>(interval: &Interval<D>, step: i64) -> Vec<D> {
    let (Some(start), Some(end)) = (
        interval.start.epoch_milliseconds(),
        interval.end.epoch_milliseconds(),
    ) else {
        return Vec::new();
    };
    if step == 0 {
        return Vec::new();
    }
    let mut reversed = start > end;
    let (first, end_time) = if reversed {
        (&interval.end, start)
    } else {
        (&interval.start, end)
    };
    if step < 0 {
        reversed = !reversed;
    }
    let step = step.saturating_abs();

    let mut dates = Vec::new();
    let mut current = map_local(first, LocalFields::start_of_day);
    while let Some(time) = current.epoch_milliseconds() {
        if time > end_time {
            break;
        }
        let next = map_local(&current, |f| {
            LocalFields::date(f.year, f.month, f.day.saturating_add(step))
        });
        dates.push(current);
        current = next;
    }
    if reversed {
        dates.reverse();
    }
    dates
}

/// Decomposes an interval into years, months, days, hours, minutes, and
/// seconds, largest first. Zero units are left absent.
///
/// ```rust
/// use calendrical::{interval::interval_to_duration, Instant, Interval};
///
/// let interval = Interval::new(
///     Instant::from_date_time(1929, 1, 15, 12, 0, 0, 0),
///     Instant::from_date_time(1968, 4, 4, 19, 5, 0, 0),
/// );
/// let duration = interval_to_duration(&interval).unwrap();
/// assert_eq!(duration.years, Some(39));
/// assert_eq!(duration.months, Some(2));
/// assert_eq!(duration.days, Some(20));
/// assert_eq!(duration.hours, Some(7));
/// assert_eq!(duration.minutes, Some(5));
/// assert_eq!(duration.seconds, None);
/// ```
pub fn interval_to_duration<D: DateLike>(interval: &Interval<D>) -> DateResult<Duration> {
    let Interval { start, end } = interval;
    if !start.is_valid() || !end.is_valid() {
        return Err(DateError::range().with_message("Invalid interval"));
    }
    let non_zero = |value: Option<i64>| value.filter(|v| *v != 0);
    let mut duration = Duration::default();

    duration.years = non_zero(difference_in_years(end, start));
    let anchor = add(start, &Duration { years: duration.years, ..Duration::default() });

    duration.months = non_zero(difference_in_months(end, &anchor));
    let anchor = add(&anchor, &Duration { months: duration.months, ..Duration::default() });

    duration.days = non_zero(difference_in_days(end, &anchor));
    let anchor = add(&anchor, &Duration { days: duration.days, ..Duration::default() });

    duration.hours = non_zero(difference_in_hours(end, &anchor, RoundingMode::Trunc));
    let anchor = add(&anchor, &Duration { hours: duration.hours, ..Duration::default() });

    duration.minutes = non_zero(difference_in_minutes(end, &anchor, RoundingMode::Trunc));
    let anchor = add(&anchor, &Duration { minutes: duration.minutes, ..Duration::default() });

    duration.seconds = non_zero(difference_in_seconds(end, &anchor, RoundingMode::Trunc));
    Ok(duration)
}
