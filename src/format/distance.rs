//! Distances between two dates in words.

use core::cmp::Ordering;

use locale_provider::{Direction, DistanceToken};

use crate::{
    difference::{difference_in_months, difference_in_seconds},
    instant::compare_asc,
    options::{resolve_locale, DistanceOptions, DistanceStrictOptions, DistanceUnit, RoundingMode},
    rounding::divide_rounded,
    utils::{MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND},
    DateError, DateLike, DateResult, Instant,
};

use super::to_instant;

const MINUTES_IN_DAY: i64 = 1_440;
const MINUTES_IN_ALMOST_TWO_DAYS: i64 = 2_520;
const MINUTES_IN_MONTH: i64 = 43_200;
const MINUTES_IN_YEAR: i64 = 525_600;

/// Both dates as instants, earlier first, with their comparison.
struct Ordered {
    comparison: Ordering,
    earlier: Instant,
    later: Instant,
}

impl Ordered {
    fn new<A: DateLike, B: DateLike>(date: &A, base: &B) -> DateResult<Self> {
        let comparison = compare_asc(date, base)
            .ok_or_else(|| DateError::range().with_message("Invalid time value"))?;
        let (date, base) = (to_instant(date), to_instant(base));
        let (earlier, later) = if comparison == Ordering::Greater {
            (base, date)
        } else {
            (date, base)
        };
        Ok(Self {
            comparison,
            earlier,
            later,
        })
    }

    fn milliseconds(&self) -> i64 {
        self.later.epoch_milliseconds().unwrap_or_default()
            - self.earlier.epoch_milliseconds().unwrap_or_default()
    }

    /// The change in local offset from the earlier to the later date.
    fn offset_change_milliseconds(&self) -> i64 {
        self.later.offset().milliseconds() - self.earlier.offset().milliseconds()
    }
}

fn direction(add_suffix: bool, comparison: Ordering) -> Option<Direction> {
    match (add_suffix, comparison) {
        (false, _) => None,
        (true, Ordering::Greater) => Some(Direction::Future),
        (true, _) => Some(Direction::Past),
    }
}

/// Describes the distance between `date` and `base` in approximate words,
/// e.g. `about 1 hour` or, with a suffix, `3 days ago`.
///
/// ```rust
/// use calendrical::{format::format_distance, options::DistanceOptions, Instant};
///
/// let date = Instant::from_date_time(2014, 7, 2, 0, 0, 0, 0);
/// let base = Instant::from_date_time(2015, 1, 1, 0, 0, 0, 0);
/// assert_eq!(format_distance(&date, &base, &DistanceOptions::default()).unwrap(), "6 months");
/// ```
///
/// # Errors
///
/// A `Range` error when either date is invalid.
pub fn format_distance<A: DateLike, B: DateLike>(
    date: &A,
    base: &B,
    options: &DistanceOptions<'_>,
) -> DateResult<String> {
    let locale = resolve_locale(options.locale);
    let ordered = Ordered::new(date, base)?;
    let suffix = direction(options.add_suffix, ordered.comparison);
    let phrase = |token, count| locale.format_distance(token, count, suffix);

    let seconds = difference_in_seconds(&ordered.later, &ordered.earlier, RoundingMode::Trunc)
        .unwrap_or_default();
    let offset_seconds = ordered.offset_change_milliseconds() / MS_PER_SECOND;
    let minutes = divide_rounded(seconds - offset_seconds, 60, RoundingMode::HalfCeil);

    let text = if minutes < 2 {
        if options.include_seconds {
            match seconds {
                ..5 => phrase(DistanceToken::LessThanXSeconds, 5),
                5..10 => phrase(DistanceToken::LessThanXSeconds, 10),
                10..20 => phrase(DistanceToken::LessThanXSeconds, 20),
                20..40 => phrase(DistanceToken::HalfAMinute, 0),
                40..60 => phrase(DistanceToken::LessThanXMinutes, 1),
                _ => phrase(DistanceToken::XMinutes, 1),
            }
        } else if minutes == 0 {
            phrase(DistanceToken::LessThanXMinutes, 1)
        } else {
            phrase(DistanceToken::XMinutes, minutes)
        }
    } else if minutes < 45 {
        phrase(DistanceToken::XMinutes, minutes)
    } else if minutes < 90 {
        phrase(DistanceToken::AboutXHours, 1)
    } else if minutes < MINUTES_IN_DAY {
        let hours = divide_rounded(minutes, 60, RoundingMode::HalfCeil);
        phrase(DistanceToken::AboutXHours, hours)
    } else if minutes < MINUTES_IN_ALMOST_TWO_DAYS {
        phrase(DistanceToken::XDays, 1)
    } else if minutes < MINUTES_IN_MONTH {
        let days = divide_rounded(minutes, MINUTES_IN_DAY, RoundingMode::HalfCeil);
        phrase(DistanceToken::XDays, days)
    } else if minutes < MINUTES_IN_MONTH * 2 {
        let months = divide_rounded(minutes, MINUTES_IN_MONTH, RoundingMode::HalfCeil);
        phrase(DistanceToken::AboutXMonths, months)
    } else {
        let months =
            difference_in_months(&ordered.later, &ordered.earlier).unwrap_or_default();
        if months < 12 {
            let nearest = divide_rounded(minutes, MINUTES_IN_MONTH, RoundingMode::HalfCeil);
            phrase(DistanceToken::XMonths, nearest)
        } else {
            let years = months / 12;
            match months % 12 {
                ..3 => phrase(DistanceToken::AboutXYears, years),
                3..9 => phrase(DistanceToken::OverXYears, years),
                _ => phrase(DistanceToken::AlmostXYears, years + 1),
            }
        }
    };
    Ok(text)
}

/// Describes the distance between `date` and `base` in one exact unit,
/// e.g. `5 hours`.
///
/// Without a forced unit the largest unit that fits is used. Values are
/// rounded with the options' rounding mode, `HalfCeil` by default.
///
/// ```rust
/// use calendrical::{
///     format::format_distance_strict,
///     options::{DistanceStrictOptions, DistanceUnit},
///     Instant,
/// };
///
/// let date = Instant::from_date_time(2014, 7, 2, 0, 0, 0, 0);
/// let base = Instant::from_date_time(2015, 1, 1, 0, 0, 0, 0);
/// let options = DistanceStrictOptions::default();
/// assert_eq!(format_distance_strict(&date, &base, &options).unwrap(), "6 months");
///
/// let in_days = DistanceStrictOptions { unit: Some(DistanceUnit::Day), ..options };
/// assert_eq!(format_distance_strict(&date, &base, &in_days).unwrap(), "183 days");
/// ```
///
/// # Errors
///
/// A `Range` error when either date is invalid.
pub fn format_distance_strict<A: DateLike, B: DateLike>(
    date: &A,
    base: &B,
    options: &DistanceStrictOptions<'_>,
) -> DateResult<String> {
    let locale = resolve_locale(options.locale);
    let ordered = Ordered::new(date, base)?;
    let suffix = direction(options.add_suffix, ordered.comparison);
    let phrase = |token, count| locale.format_distance(token, count, suffix);
    let round = |dividend, divisor| divide_rounded(dividend, divisor, options.rounding_mode);

    let milliseconds = ordered.milliseconds();
    let normalized = milliseconds - ordered.offset_change_milliseconds();

    let unit = options.unit.unwrap_or(if milliseconds < MS_PER_MINUTE {
        DistanceUnit::Second
    } else if milliseconds < MS_PER_HOUR {
        DistanceUnit::Minute
    } else if milliseconds < MS_PER_DAY {
        DistanceUnit::Hour
    } else if normalized < MINUTES_IN_MONTH * MS_PER_MINUTE {
        DistanceUnit::Day
    } else if normalized < MINUTES_IN_YEAR * MS_PER_MINUTE {
        DistanceUnit::Month
    } else {
        DistanceUnit::Year
    });

    let text = match unit {
        DistanceUnit::Second => phrase(DistanceToken::XSeconds, round(milliseconds, MS_PER_SECOND)),
        DistanceUnit::Minute => phrase(DistanceToken::XMinutes, round(milliseconds, MS_PER_MINUTE)),
        DistanceUnit::Hour => phrase(DistanceToken::XHours, round(milliseconds, MS_PER_HOUR)),
        DistanceUnit::Day => phrase(DistanceToken::XDays, round(normalized, MS_PER_DAY)),
        DistanceUnit::Month => {
            let months = round(normalized, MINUTES_IN_MONTH * MS_PER_MINUTE);
            if months == 12 && options.unit != Some(DistanceUnit::Month) {
                phrase(DistanceToken::XYears, 1)
            } else {
                phrase(DistanceToken::XMonths, months)
            }
        }
        DistanceUnit::Year => {
            phrase(DistanceToken::XYears, round(normalized, MINUTES_IN_YEAR * MS_PER_MINUTE))
        }
    };
    Ok(text)
}
