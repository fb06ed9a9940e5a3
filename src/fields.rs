//! Local calendar field getters and setters.
//!
//! Fields are read in the date's own [`UtcOffset`](crate::UtcOffset).
//! Getters return `None` for an invalid date. Setters overflow into the
//! neighbouring unit unless documented otherwise, so setting the date to
//! 32 in January yields February 1st.

use crate::{
    boundaries::{get_iso_week, get_week, start_of_iso_week_year, start_of_week_year},
    difference::difference_in_calendar_days,
    iso::{IsoDateTime, LocalFields},
    options::WeekOptions,
    utils::{self, MS_PER_SECOND},
    DateLike, MAX_EPOCH_MILLISECONDS,
};

// ==== Local representation helpers ====

/// Builds a date like `template` at `epoch_ms`, invalid outside the
/// representable range.
pub(crate) fn with_epoch<D: DateLike>(template: &D, epoch_ms: Option<i64>) -> D {
    template.construct_like(
        epoch_ms.filter(|ms| ms.unsigned_abs() <= MAX_EPOCH_MILLISECONDS as u64),
    )
}

/// Returns the wall-clock milliseconds of `date` in its own offset.
pub(crate) fn wall_milliseconds<D: DateLike>(date: &D) -> Option<i64> {
    date.epoch_milliseconds()?
        .checked_add(date.offset().milliseconds())
}

pub(crate) fn local_date_time<D: DateLike>(date: &D) -> Option<IsoDateTime> {
    wall_milliseconds(date).map(IsoDateTime::from_wall_milliseconds)
}

pub(crate) fn local_fields<D: DateLike>(date: &D) -> Option<LocalFields> {
    local_date_time(date).map(LocalFields::from)
}

/// Builds a date like `template` from balanced wall-clock fields.
pub(crate) fn from_local_fields<D: DateLike>(template: &D, fields: LocalFields) -> D {
    let epoch = fields
        .to_wall_milliseconds()
        .and_then(|ms| ms.checked_sub(template.offset().milliseconds()));
    with_epoch(template, epoch)
}

/// Rewrites the local fields of `date`; invalid dates stay invalid.
pub(crate) fn map_local<D, F>(date: &D, f: F) -> D
where
    D: DateLike,
    F: FnOnce(LocalFields) -> LocalFields,
{
    match local_fields(date) {
        Some(fields) => from_local_fields(date, f(fields)),
        None => date.construct_like(None),
    }
}

/// Returns the local epoch day of `date`.
pub(crate) fn local_epoch_days<D: DateLike>(date: &D) -> Option<i64> {
    wall_milliseconds(date).map(|ms| ms.div_euclid(utils::MS_PER_DAY))
}

/// The length of a balanced `year`/`month` in days.
pub(crate) fn days_in_local_month(year: i64, month: i64) -> Option<i64> {
    let start = utils::epoch_days_from_gregorian_date(year, month, 1)?;
    let end = utils::epoch_days_from_gregorian_date(year, month.checked_add(1)?, 1)?;
    Some(end - start)
}

// ==== Getters ====

pub fn get_year<D: DateLike>(date: &D) -> Option<i32> {
    Some(local_date_time(date)?.date.year)
}

/// Returns the month, `1 = January`.
pub fn get_month<D: DateLike>(date: &D) -> Option<u8> {
    Some(local_date_time(date)?.date.month)
}

/// Returns the day of the month.
pub fn get_date<D: DateLike>(date: &D) -> Option<u8> {
    Some(local_date_time(date)?.date.day)
}

/// Returns the day of the week, `0 = Sunday`.
pub fn get_day<D: DateLike>(date: &D) -> Option<u8> {
    local_epoch_days(date).map(utils::weekday_from_epoch_days)
}

pub fn get_hours<D: DateLike>(date: &D) -> Option<u8> {
    Some(local_date_time(date)?.time.hour)
}

pub fn get_minutes<D: DateLike>(date: &D) -> Option<u8> {
    Some(local_date_time(date)?.time.minute)
}

pub fn get_seconds<D: DateLike>(date: &D) -> Option<u8> {
    Some(local_date_time(date)?.time.second)
}

pub fn get_milliseconds<D: DateLike>(date: &D) -> Option<u16> {
    Some(local_date_time(date)?.time.millisecond)
}

/// Returns milliseconds since the Unix epoch.
pub fn get_time<D: DateLike>(date: &D) -> Option<i64> {
    date.epoch_milliseconds()
}

/// Returns whole seconds since the Unix epoch, truncated toward zero.
pub fn get_unix_time<D: DateLike>(date: &D) -> Option<i64> {
    Some(date.epoch_milliseconds()? / MS_PER_SECOND)
}

/// Returns the quarter, `1..=4`.
pub fn get_quarter<D: DateLike>(date: &D) -> Option<u8> {
    Some(local_date_time(date)?.date.quarter())
}

/// Returns the day of the year, `1..=366`.
pub fn get_day_of_year<D: DateLike>(date: &D) -> Option<u16> {
    Some(local_date_time(date)?.date.day_of_year())
}

/// Returns the ISO day of the week, `1 = Monday` through `7 = Sunday`.
pub fn get_iso_day<D: DateLike>(date: &D) -> Option<u8> {
    get_day(date).map(|day| if day == 0 { 7 } else { day })
}

pub fn get_days_in_month<D: DateLike>(date: &D) -> Option<u8> {
    Some(local_date_time(date)?.date.days_in_month())
}

pub fn get_days_in_year<D: DateLike>(date: &D) -> Option<u16> {
    Some(local_date_time(date)?.date.days_in_year())
}

/// Returns the first year of the decade, e.g. `1940` for 1942.
pub fn get_decade<D: DateLike>(date: &D) -> Option<i32> {
    Some(get_year(date)?.div_euclid(10) * 10)
}

pub fn is_leap_year<D: DateLike>(date: &D) -> bool {
    local_date_time(date).is_some_and(|dt| dt.date.in_leap_year())
}

/// Returns whether the date falls on a Saturday or a Sunday.
pub fn is_weekend<D: DateLike>(date: &D) -> bool {
    matches!(get_day(date), Some(0 | 6))
}

pub fn is_first_day_of_month<D: DateLike>(date: &D) -> bool {
    get_date(date) == Some(1)
}

pub fn is_last_day_of_month<D: DateLike>(date: &D) -> bool {
    local_date_time(date).is_some_and(|dt| dt.date.day == dt.date.days_in_month())
}

// ==== Setters ====

/// Sets the year; February 29th moves to March 1st in a common year.
pub fn set_year<D: DateLike>(date: &D, year: i64) -> D {
    map_local(date, |f| LocalFields { year, ..f })
}

/// Sets the month, `1 = January`.
///
/// The day of the month is clamped to the length of the destination month,
/// so January 31st set to February is the last day of February.
pub fn set_month<D: DateLike>(date: &D, month: i64) -> D {
    let Some(fields) = local_fields(date) else {
        return date.construct_like(None);
    };
    let Some(days) = days_in_local_month(fields.year, month) else {
        return date.construct_like(None);
    };
    from_local_fields(
        date,
        LocalFields {
            month,
            day: fields.day.min(days),
            ..fields
        },
    )
}

/// Sets the day of the month.
pub fn set_date<D: DateLike>(date: &D, day: i64) -> D {
    map_local(date, |f| LocalFields { day, ..f })
}

pub fn set_hours<D: DateLike>(date: &D, hour: i64) -> D {
    map_local(date, |f| LocalFields { hour, ..f })
}

pub fn set_minutes<D: DateLike>(date: &D, minute: i64) -> D {
    map_local(date, |f| LocalFields { minute, ..f })
}

pub fn set_seconds<D: DateLike>(date: &D, second: i64) -> D {
    map_local(date, |f| LocalFields { second, ..f })
}

pub fn set_milliseconds<D: DateLike>(date: &D, millisecond: i64) -> D {
    map_local(date, |f| LocalFields { millisecond, ..f })
}

/// Moves the date into `quarter` keeping its position within the quarter.
pub fn set_quarter<D: DateLike>(date: &D, quarter: i64) -> D {
    let Some(month) = get_month(date) else {
        return date.construct_like(None);
    };
    let month = i64::from(month);
    let current = (month - 1) / 3 + 1;
    set_month(date, month + (quarter - current) * 3)
}

/// Sets the day of the year, keeping the time of day.
pub fn set_day_of_year<D: DateLike>(date: &D, day_of_year: i64) -> D {
    map_local(date, |f| LocalFields {
        month: 1,
        day: day_of_year,
        ..f
    })
}

/// Moves the date to `day` (`0 = Sunday`) of its week.
///
/// Values outside `0..=6` move into neighbouring weeks, counted from the
/// start of the week.
pub fn set_day<D: DateLike>(date: &D, day: i64, options: &WeekOptions<'_>) -> D {
    let Some(current) = get_day(date) else {
        return date.construct_like(None);
    };
    let week_starts_on = i64::from(options.resolve().week_starts_on);
    let current = i64::from(current);
    let delta = 7 - week_starts_on;
    let position = (current + delta) % 7;
    let diff = if (0..=6).contains(&day) {
        (day + delta) % 7 - position
    } else {
        day - position
    };
    map_local(date, |f| LocalFields {
        day: f.day + diff,
        ..f
    })
}

/// Moves the date to the ISO `day` (`1 = Monday`, `7 = Sunday`) of its
/// ISO week.
pub fn set_iso_day<D: DateLike>(date: &D, day: i64) -> D {
    let Some(current) = get_iso_day(date) else {
        return date.construct_like(None);
    };
    let diff = day - i64::from(current);
    map_local(date, |f| LocalFields {
        day: f.day + diff,
        ..f
    })
}

/// Moves the date to the same weekday of local week `week`.
pub fn set_week<D: DateLike>(date: &D, week: i64, options: &WeekOptions<'_>) -> D {
    let Some(current) = get_week(date, options) else {
        return date.construct_like(None);
    };
    let diff = i64::from(current) - week;
    map_local(date, |f| LocalFields {
        day: f.day - diff * 7,
        ..f
    })
}

/// Moves the date to the same weekday of ISO week `week`.
pub fn set_iso_week<D: DateLike>(date: &D, week: i64) -> D {
    let Some(current) = get_iso_week(date) else {
        return date.construct_like(None);
    };
    let diff = i64::from(current) - week;
    map_local(date, |f| LocalFields {
        day: f.day - diff * 7,
        ..f
    })
}

/// Moves the date into local week-year `week_year`, keeping its day offset
/// from the start of the week-year. The time is reset to midnight.
pub fn set_week_year<D: DateLike>(date: &D, week_year: i64, options: &WeekOptions<'_>) -> D {
    let Some(diff) = difference_in_calendar_days(date, &start_of_week_year(date, options)) else {
        return date.construct_like(None);
    };
    let first_week_contains_date = i64::from(options.resolve().first_week_contains_date);
    let first_week = from_local_fields(
        date,
        LocalFields::date(week_year, 1, first_week_contains_date),
    );
    map_local(&start_of_week_year(&first_week, options), |f| LocalFields {
        day: f.day + diff,
        ..f
    })
}

/// Moves the date into ISO week-year `week_year`, keeping its day offset
/// from the start of the ISO week-year. The time is reset to midnight.
pub fn set_iso_week_year<D: DateLike>(date: &D, week_year: i64) -> D {
    let Some(diff) = difference_in_calendar_days(date, &start_of_iso_week_year(date)) else {
        return date.construct_like(None);
    };
    let fourth_of_january = from_local_fields(date, LocalFields::date(week_year, 1, 4));
    map_local(&start_of_iso_week_year(&fourth_of_january), |f| LocalFields {
        day: f.day + diff,
        ..f
    })
}

/// Field values for [`set`]; absent fields are left unchanged.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DateValues {
    pub year: Option<i64>,
    /// `1 = January`; clamps the day like [`set_month`].
    pub month: Option<i64>,
    pub date: Option<i64>,
    pub hours: Option<i64>,
    pub minutes: Option<i64>,
    pub seconds: Option<i64>,
    pub milliseconds: Option<i64>,
}

/// Sets several fields at once, largest unit first.
pub fn set<D: DateLike>(date: &D, values: &DateValues) -> D {
    let mut result = date.clone();
    if let Some(year) = values.year {
        result = set_year(&result, year);
    }
    if let Some(month) = values.month {
        result = set_month(&result, month);
    }
    if let Some(day) = values.date {
        result = set_date(&result, day);
    }
    if let Some(hour) = values.hours {
        result = set_hours(&result, hour);
    }
    if let Some(minute) = values.minutes {
        result = set_minutes(&result, minute);
    }
    if let Some(second) = values.seconds {
        result = set_seconds(&result, second);
    }
    if let Some(millisecond) = values.milliseconds {
        result = set_milliseconds(&result, millisecond);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{options::Weekday, Instant, UtcOffset};

    fn date(y: i64, m: i64, d: i64) -> Instant {
        Instant::from_date_time(y, m, d, 0, 0, 0, 0)
    }

    fn dt(y: i64, m: i64, d: i64, h: i64, mi: i64, s: i64, ms: i64) -> Instant {
        Instant::from_date_time(y, m, d, h, mi, s, ms)
    }

    #[test]
    fn getters() {
        let value = dt(2012, 2, 29, 11, 45, 5, 123);
        assert_eq!(get_year(&value), Some(2012));
        assert_eq!(get_month(&value), Some(2));
        assert_eq!(get_date(&value), Some(29));
        assert_eq!(get_day(&value), Some(3));
        assert_eq!(get_hours(&value), Some(11));
        assert_eq!(get_minutes(&value), Some(45));
        assert_eq!(get_seconds(&value), Some(5));
        assert_eq!(get_milliseconds(&value), Some(123));
        assert_eq!(get_quarter(&value), Some(1));
        assert_eq!(get_day_of_year(&value), Some(60));
        assert_eq!(get_days_in_month(&value), Some(29));
        assert_eq!(get_days_in_year(&value), Some(366));
        assert_eq!(get_decade(&value), Some(2010));
        assert!(is_leap_year(&value));
        assert!(is_last_day_of_month(&value));
        assert_eq!(get_iso_day(&date(2012, 2, 26)), Some(7));
        assert_eq!(get_unix_time(&dt(2012, 2, 29, 11, 45, 5, 123)), Some(1_330_515_905));
        assert_eq!(get_decade(&date(-1, 6, 1)), Some(-10));
    }

    #[test]
    fn getters_on_invalid() {
        let invalid = Instant::invalid();
        assert_eq!(get_year(&invalid), None);
        assert_eq!(get_day(&invalid), None);
        assert!(!is_weekend(&invalid));
        assert!(!is_leap_year(&invalid));
    }

    #[test]
    fn getters_use_local_offset() {
        // 2014-01-01T02:00Z is still December 31st at UTC-05:00.
        let offset = UtcOffset::from_minutes(-300).unwrap();
        let value = dt(2014, 1, 1, 2, 0, 0, 0).with_offset(offset);
        assert_eq!(get_year(&value), Some(2013));
        assert_eq!(get_date(&value), Some(31));
        assert_eq!(get_hours(&value), Some(21));
    }

    #[test]
    fn set_month_clamps_day() {
        assert_eq!(set_month(&date(2014, 1, 31), 2), date(2014, 2, 28));
        assert_eq!(set_month(&date(2014, 9, 1), 10), date(2014, 10, 1));
        assert_eq!(set_month(&date(2014, 1, 31), 14), date(2015, 2, 28));
        assert_eq!(set_quarter(&date(2014, 7, 2), 2), date(2014, 4, 2));
    }

    #[test]
    fn setters_overflow() {
        assert_eq!(set_year(&date(2012, 2, 29), 2013), date(2013, 3, 1));
        assert_eq!(set_date(&date(2014, 1, 1), 32), date(2014, 2, 1));
        assert_eq!(set_hours(&date(2014, 1, 1), 25), dt(2014, 1, 2, 1, 0, 0, 0));
        assert_eq!(set_minutes(&date(2014, 1, 1), -1), dt(2013, 12, 31, 23, 59, 0, 0));
        assert_eq!(set_day_of_year(&date(2014, 7, 2), 2), date(2014, 1, 2));
        assert!(!set_year(&Instant::invalid(), 2000).is_valid());
    }

    #[test]
    fn set_day_respects_week_start() {
        // Monday, September 1st 2014.
        let monday = date(2014, 9, 1);
        assert_eq!(set_day(&monday, 0, &WeekOptions::default()), date(2014, 8, 31));
        let options = WeekOptions::starting_on(Weekday::Monday);
        assert_eq!(set_day(&monday, 0, &options), date(2014, 9, 7));
        assert_eq!(set_day(&monday, 7, &WeekOptions::default()), date(2014, 9, 7));
        assert_eq!(set_day(&monday, -7, &WeekOptions::default()), date(2014, 8, 24));
        assert_eq!(set_iso_day(&monday, 7), date(2014, 9, 7));
    }

    #[test]
    fn week_setters() {
        assert_eq!(set_iso_week(&date(2004, 8, 7), 53), date(2005, 1, 1));
        assert_eq!(set_week(&date(2005, 1, 2), 1, &WeekOptions::default()), date(2004, 12, 26));
        assert_eq!(set_iso_week_year(&date(2008, 12, 29), 2007), date(2007, 1, 1));
        assert_eq!(
            set_week_year(&date(2010, 1, 2), 2004, &WeekOptions::default()),
            date(2004, 1, 3)
        );
    }

    #[test]
    fn multi_field_set() {
        let values = DateValues {
            year: Some(2015),
            month: Some(2),
            hours: Some(9),
            ..DateValues::default()
        };
        assert_eq!(set(&dt(2014, 1, 31, 1, 2, 3, 4), &values), dt(2015, 2, 28, 9, 2, 3, 4));
    }
}
