//! Dates described relative to a base date.

use locale_provider::RelativeToken;

use crate::{
    difference::difference_in_calendar_days,
    options::{resolve_locale, FormatOptions},
    DateError, DateLike, DateResult,
};

use super::format;

/// Picks the locale phrase for a distance in calendar days.
fn relative_token(days: i64) -> RelativeToken {
    match days {
        ..-6 => RelativeToken::Other,
        -6..-1 => RelativeToken::LastWeek,
        -1 => RelativeToken::Yesterday,
        0 => RelativeToken::Today,
        1 => RelativeToken::Tomorrow,
        2..7 => RelativeToken::NextWeek,
        _ => RelativeToken::Other,
    }
}

/// Renders `date` in words relative to `base`, e.g. `last Sunday at 7:00
/// PM` or `tomorrow at 9:30 AM`. Dates a week or more away use the
/// locale's short date.
///
/// ```rust
/// use calendrical::{format::format_relative, options::FormatOptions, Instant};
///
/// let base = Instant::from_date_time(2014, 2, 11, 12, 0, 0, 0);
/// let date = Instant::from_date_time(2014, 2, 10, 19, 0, 0, 0);
/// assert_eq!(
///     format_relative(&date, &base, &FormatOptions::default()).unwrap(),
///     "yesterday at 7:00 PM"
/// );
/// ```
///
/// # Errors
///
/// A `Range` error when either date is invalid, and any error the
/// locale's pattern raises while formatting.
pub fn format_relative<A: DateLike, B: DateLike>(
    date: &A,
    base: &B,
    options: &FormatOptions<'_>,
) -> DateResult<String> {
    let days = difference_in_calendar_days(date, base)
        .ok_or_else(|| DateError::range().with_message("Invalid time value"))?;
    let locale = resolve_locale(options.locale);
    let pattern = locale.relative_pattern(relative_token(days));
    let options = FormatOptions {
        locale: Some(&*locale),
        week_starts_on: options.week_starts_on,
        ..FormatOptions::default()
    };
    format(date, pattern, &options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_by_day_distance() {
        assert_eq!(relative_token(-7), RelativeToken::Other);
        assert_eq!(relative_token(-6), RelativeToken::LastWeek);
        assert_eq!(relative_token(-2), RelativeToken::LastWeek);
        assert_eq!(relative_token(-1), RelativeToken::Yesterday);
        assert_eq!(relative_token(0), RelativeToken::Today);
        assert_eq!(relative_token(1), RelativeToken::Tomorrow);
        assert_eq!(relative_token(6), RelativeToken::NextWeek);
        assert_eq!(relative_token(7), RelativeToken::Other);
    }
}
