//! Durations in words.

use locale_provider::DistanceToken;

use crate::{
    options::{resolve_locale, DurationUnit, FormatDurationOptions},
    Duration,
};

fn distance_token(unit: DurationUnit) -> DistanceToken {
    match unit {
        DurationUnit::Years => DistanceToken::XYears,
        DurationUnit::Months => DistanceToken::XMonths,
        DurationUnit::Weeks => DistanceToken::XWeeks,
        DurationUnit::Days => DistanceToken::XDays,
        DurationUnit::Hours => DistanceToken::XHours,
        DurationUnit::Minutes => DistanceToken::XMinutes,
        DurationUnit::Seconds => DistanceToken::XSeconds,
    }
}

/// Renders the present units of `duration` in the order of
/// `options.format`, joined by `options.delimiter`.
///
/// Zero units are skipped unless `options.zero` is set; absent units are
/// always skipped.
///
/// ```rust
/// use calendrical::{format::format_duration, options::FormatDurationOptions, Duration};
///
/// let duration = Duration {
///     years: Some(2),
///     months: Some(9),
///     weeks: Some(1),
///     days: Some(7),
///     hours: Some(5),
///     minutes: Some(9),
///     seconds: Some(30),
///     ..Duration::default()
/// };
/// assert_eq!(
///     format_duration(&duration, &FormatDurationOptions::default()),
///     "2 years 9 months 1 week 7 days 5 hours 9 minutes 30 seconds"
/// );
/// ```
pub fn format_duration(duration: &Duration, options: &FormatDurationOptions<'_>) -> String {
    let locale = resolve_locale(options.locale);
    let mut parts = Vec::with_capacity(options.format.len());
    for unit in options.format {
        match duration.get(*unit) {
            Some(value) if options.zero || value != 0 => {
                parts.push(locale.format_distance(distance_token(*unit), value, None));
            }
            _ => {}
        }
    }
    parts.join(options.delimiter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_absent_units() {
        let duration = Duration {
            months: Some(9),
            days: Some(0),
            ..Duration::default()
        };
        let options = FormatDurationOptions::default();
        assert_eq!(format_duration(&duration, &options), "9 months");

        let with_zero = FormatDurationOptions {
            zero: true,
            ..options
        };
        assert_eq!(format_duration(&duration, &with_zero), "9 months 0 days");
    }

    #[test]
    fn custom_units_and_delimiter() {
        let duration = Duration {
            years: Some(2),
            months: Some(9),
            weeks: Some(3),
            ..Duration::default()
        };
        let options = FormatDurationOptions {
            format: &[DurationUnit::Weeks, DurationUnit::Years],
            delimiter: ", ",
            ..FormatDurationOptions::default()
        };
        assert_eq!(format_duration(&duration, &options), "3 weeks, 2 years");
        assert_eq!(
            format_duration(&Duration::default(), &FormatDurationOptions::default()),
            ""
        );
    }
}
