//! Period boundaries, week numbering, and week-numbering years.
//!
//! A local week starts on the resolved `week_starts_on` and week one of a
//! local week-year is the week containing January
//! `first_week_contains_date`. ISO weeks fix these at Monday and the 4th.

use crate::{
    arithmetic::add_weeks,
    difference::difference_in_calendar_weeks,
    fields::{from_local_fields, get_day, local_fields, map_local, with_epoch},
    iso::LocalFields,
    options::{ResolvedWeekOptions, RoundingMode, WeekOptions},
    rounding::divide_rounded,
    utils::MS_PER_WEEK,
    DateLike,
};

/// A calendar period with a start and an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Second,
    Minute,
    Hour,
    Day,
    /// A local week, see [`WeekOptions`].
    Week,
    /// A Monday-based week.
    IsoWeek,
    Month,
    Quarter,
    Year,
    Decade,
    /// A local week-numbering year, see [`WeekOptions`].
    WeekYear,
    /// An ISO week-numbering year.
    IsoWeekYear,
}

/// Returns the first millisecond of the period containing `date`.
pub fn start_of<D: DateLike>(period: Period, date: &D, options: &WeekOptions<'_>) -> D {
    match period {
        Period::Second => map_local(date, |f| LocalFields { millisecond: 0, ..f }),
        Period::Minute => map_local(date, |f| f.with_time(f.hour, f.minute, 0, 0)),
        Period::Hour => map_local(date, |f| f.with_time(f.hour, 0, 0, 0)),
        Period::Day => map_local(date, LocalFields::start_of_day),
        Period::Week => start_of_week_resolved(date, options.resolve()),
        Period::IsoWeek => start_of_week_resolved(date, ResolvedWeekOptions::ISO),
        Period::Month => map_local(date, |f| LocalFields::date(f.year, f.month, 1)),
        Period::Quarter => map_local(date, |f| {
            LocalFields::date(f.year, f.month - (f.month - 1) % 3, 1)
        }),
        Period::Year => map_local(date, |f| LocalFields::date(f.year, 1, 1)),
        Period::Decade => map_local(date, |f| {
            LocalFields::date(f.year.div_euclid(10) * 10, 1, 1)
        }),
        Period::WeekYear => start_of_week_year_resolved(date, options.resolve()),
        Period::IsoWeekYear => start_of_week_year_resolved(date, ResolvedWeekOptions::ISO),
    }
}

/// Returns the last millisecond of the period containing `date`.
pub fn end_of<D: DateLike>(period: Period, date: &D, options: &WeekOptions<'_>) -> D {
    match period {
        Period::Second => map_local(date, |f| LocalFields {
            millisecond: 999,
            ..f
        }),
        Period::Minute => map_local(date, |f| f.with_time(f.hour, f.minute, 59, 999)),
        Period::Hour => map_local(date, |f| f.with_time(f.hour, 59, 59, 999)),
        Period::Day => map_local(date, LocalFields::end_of_day),
        Period::Week | Period::IsoWeek => {
            let resolved = if period == Period::Week {
                options.resolve()
            } else {
                ResolvedWeekOptions::ISO
            };
            let last_day = last_day_of_week_resolved(date, resolved);
            map_local(&last_day, LocalFields::end_of_day)
        }
        Period::Month => map_local(date, |f| LocalFields::date(f.year, f.month + 1, 0).end_of_day()),
        Period::Quarter => map_local(date, |f| {
            LocalFields::date(f.year, f.month - (f.month - 1) % 3 + 3, 0).end_of_day()
        }),
        Period::Year => map_local(date, |f| LocalFields::date(f.year, 12, 31).end_of_day()),
        Period::Decade => map_local(date, |f| {
            LocalFields::date(f.year.div_euclid(10) * 10 + 9, 12, 31).end_of_day()
        }),
        Period::WeekYear => end_of_week_year_resolved(date, options.resolve()),
        Period::IsoWeekYear => end_of_week_year_resolved(date, ResolvedWeekOptions::ISO),
    }
}

/// Returns whether both dates fall in the same period. `false` when either
/// is invalid.
pub fn is_same<A: DateLike, B: DateLike>(
    period: Period,
    left: &A,
    right: &B,
    options: &WeekOptions<'_>,
) -> bool {
    let left = start_of(period, left, options).epoch_milliseconds();
    let right = start_of(period, right, options).epoch_milliseconds();
    left.is_some() && left == right
}

// ==== Weeks ====

fn week_position(weekday: i64, week_starts_on: i64) -> i64 {
    (if weekday < week_starts_on { 7 } else { 0 }) + weekday - week_starts_on
}

fn start_of_week_resolved<D: DateLike>(date: &D, options: ResolvedWeekOptions) -> D {
    let Some(weekday) = get_day(date) else {
        return date.construct_like(None);
    };
    let diff = week_position(i64::from(weekday), i64::from(options.week_starts_on));
    map_local(date, |f| LocalFields::date(f.year, f.month, f.day - diff))
}

fn last_day_of_week_resolved<D: DateLike>(date: &D, options: ResolvedWeekOptions) -> D {
    let Some(weekday) = get_day(date) else {
        return date.construct_like(None);
    };
    let diff = 6 - week_position(i64::from(weekday), i64::from(options.week_starts_on));
    map_local(date, |f| LocalFields::date(f.year, f.month, f.day + diff))
}

pub fn start_of_week<D: DateLike>(date: &D, options: &WeekOptions<'_>) -> D {
    start_of(Period::Week, date, options)
}

pub fn start_of_iso_week<D: DateLike>(date: &D) -> D {
    start_of_week_resolved(date, ResolvedWeekOptions::ISO)
}

/// Returns midnight of the last day of the local week.
pub fn last_day_of_week<D: DateLike>(date: &D, options: &WeekOptions<'_>) -> D {
    last_day_of_week_resolved(date, options.resolve())
}

/// Returns midnight of the Sunday ending the ISO week.
pub fn last_day_of_iso_week<D: DateLike>(date: &D) -> D {
    last_day_of_week_resolved(date, ResolvedWeekOptions::ISO)
}

// ==== Last days ====

pub fn last_day_of_month<D: DateLike>(date: &D) -> D {
    map_local(date, |f| LocalFields::date(f.year, f.month + 1, 0))
}

pub fn last_day_of_quarter<D: DateLike>(date: &D) -> D {
    map_local(date, |f| {
        LocalFields::date(f.year, f.month - (f.month - 1) % 3 + 3, 0)
    })
}

pub fn last_day_of_year<D: DateLike>(date: &D) -> D {
    map_local(date, |f| LocalFields::date(f.year, 12, 31))
}

pub fn last_day_of_decade<D: DateLike>(date: &D) -> D {
    map_local(date, |f| LocalFields::date(f.year.div_euclid(10) * 10 + 9, 12, 31))
}

// ==== Week-numbering years ====

/// Returns the week-year containing `date`.
///
/// The start of week one of `year + 1` and of `year` are tried in turn;
/// anything before both belongs to `year - 1`.
fn week_year_resolved<D: DateLike>(date: &D, options: ResolvedWeekOptions) -> Option<i64> {
    let ms = date.epoch_milliseconds()?;
    let year = local_fields(date)?.year;
    let start_of_week_one =
        |year: i64| start_of_week_year_of(date, year, options).epoch_milliseconds();

    if start_of_week_one(year + 1).is_some_and(|start| ms >= start) {
        Some(year + 1)
    } else if start_of_week_one(year).is_some_and(|start| ms >= start) {
        Some(year)
    } else {
        Some(year - 1)
    }
}

fn start_of_week_year_of<D: DateLike>(template: &D, year: i64, options: ResolvedWeekOptions) -> D {
    let anchor = from_local_fields(
        template,
        LocalFields::date(year, 1, i64::from(options.first_week_contains_date)),
    );
    start_of_week_resolved(&anchor, options)
}

fn start_of_week_year_resolved<D: DateLike>(date: &D, options: ResolvedWeekOptions) -> D {
    match week_year_resolved(date, options) {
        Some(year) => start_of_week_year_of(date, year, options),
        None => date.construct_like(None),
    }
}

fn end_of_week_year_resolved<D: DateLike>(date: &D, options: ResolvedWeekOptions) -> D {
    let Some(year) = week_year_resolved(date, options) else {
        return date.construct_like(None);
    };
    let next = start_of_week_year_of(date, year + 1, options);
    with_epoch(date, next.epoch_milliseconds().map(|ms| ms - 1))
}

/// Returns the local week-numbering year.
pub fn get_week_year<D: DateLike>(date: &D, options: &WeekOptions<'_>) -> Option<i32> {
    week_year_resolved(date, options.resolve()).and_then(|y| i32::try_from(y).ok())
}

/// Returns the ISO week-numbering year.
///
/// ```rust
/// use calendrical::{boundaries::get_iso_week_year, Instant};
///
/// let date = Instant::from_date_time(2005, 1, 2, 0, 0, 0, 0);
/// assert_eq!(get_iso_week_year(&date), Some(2004));
/// ```
pub fn get_iso_week_year<D: DateLike>(date: &D) -> Option<i32> {
    week_year_resolved(date, ResolvedWeekOptions::ISO).and_then(|y| i32::try_from(y).ok())
}

pub fn start_of_week_year<D: DateLike>(date: &D, options: &WeekOptions<'_>) -> D {
    start_of_week_year_resolved(date, options.resolve())
}

pub fn start_of_iso_week_year<D: DateLike>(date: &D) -> D {
    start_of_week_year_resolved(date, ResolvedWeekOptions::ISO)
}

fn week_resolved<D: DateLike>(date: &D, options: ResolvedWeekOptions) -> Option<u8> {
    let week_start = start_of_week_resolved(date, options).epoch_milliseconds()?;
    let year_start = start_of_week_year_resolved(date, options).epoch_milliseconds()?;
    let weeks = divide_rounded(week_start - year_start, MS_PER_WEEK, RoundingMode::HalfCeil);
    u8::try_from(weeks + 1).ok()
}

/// Returns the local week number, `1..=53`.
pub fn get_week<D: DateLike>(date: &D, options: &WeekOptions<'_>) -> Option<u8> {
    week_resolved(date, options.resolve())
}

/// Returns the ISO week number, `1..=53`.
pub fn get_iso_week<D: DateLike>(date: &D) -> Option<u8> {
    week_resolved(date, ResolvedWeekOptions::ISO)
}

/// Returns the number of ISO weeks in the ISO week-year of `date`, 52 or 53.
pub fn get_iso_weeks_in_year<D: DateLike>(date: &D) -> Option<u8> {
    let this_year = start_of_iso_week_year(date);
    let later = add_weeks(&this_year, 60);
    let next_year = start_of_iso_week_year(&later);
    let diff = next_year.epoch_milliseconds()? - this_year.epoch_milliseconds()?;
    u8::try_from(divide_rounded(diff, MS_PER_WEEK, RoundingMode::HalfCeil)).ok()
}

/// Returns how many local weeks the month of `date` spans.
pub fn get_weeks_in_month<D: DateLike>(date: &D, options: &WeekOptions<'_>) -> Option<u8> {
    let first = start_of(Period::Month, date, options);
    let last = last_day_of_month(date);
    let weeks = difference_in_calendar_weeks(&last, &first, options)?;
    u8::try_from(weeks + 1).ok()
}

/// Returns the local week of the month, starting at 1.
pub fn get_week_of_month<D: DateLike>(date: &D, options: &WeekOptions<'_>) -> Option<u8> {
    let resolved = options.resolve();
    let day_of_month = i64::from(local_fields(date)?.day);
    let first_weekday = i64::from(get_day(&start_of(Period::Month, date, options))?);
    let mut last_day_of_first_week = i64::from(resolved.week_starts_on) - first_weekday;
    if last_day_of_first_week <= 0 {
        last_day_of_first_week += 7;
    }
    let remaining = day_of_month - last_day_of_first_week;
    u8::try_from(divide_rounded(remaining, 7, RoundingMode::Ceil) + 1).ok()
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

    const DEFAULT: WeekOptions<'static> = WeekOptions {
        locale: None,
        week_starts_on: None,
        first_week_contains_date: None,
    };

    #[test]
    fn clock_boundaries() {
        let value = dt(2014, 9, 2, 11, 55, 30, 400);
        assert_eq!(start_of(Period::Second, &value, &DEFAULT), dt(2014, 9, 2, 11, 55, 30, 0));
        assert_eq!(end_of(Period::Minute, &value, &DEFAULT), dt(2014, 9, 2, 11, 55, 59, 999));
        assert_eq!(start_of(Period::Hour, &value, &DEFAULT), dt(2014, 9, 2, 11, 0, 0, 0));
        assert_eq!(end_of(Period::Day, &value, &DEFAULT), dt(2014, 9, 2, 23, 59, 59, 999));
    }

    #[test]
    fn week_boundaries() {
        // Tuesday, September 2nd 2014.
        let value = dt(2014, 9, 2, 11, 55, 0, 0);
        assert_eq!(start_of(Period::Week, &value, &DEFAULT), date(2014, 8, 31));
        let monday = WeekOptions::starting_on(Weekday::Monday);
        assert_eq!(start_of(Period::Week, &value, &monday), date(2014, 9, 1));
        assert_eq!(start_of(Period::IsoWeek, &value, &DEFAULT), date(2014, 9, 1));
        assert_eq!(end_of(Period::Week, &value, &DEFAULT), dt(2014, 9, 6, 23, 59, 59, 999));
        assert_eq!(end_of(Period::IsoWeek, &value, &DEFAULT), dt(2014, 9, 7, 23, 59, 59, 999));
        let wednesday = WeekOptions::starting_on(Weekday::Wednesday);
        assert_eq!(start_of(Period::Week, &value, &wednesday), date(2014, 8, 27));
        assert_eq!(last_day_of_week(&value, &wednesday), date(2014, 9, 2));
        assert_eq!(last_day_of_iso_week(&value), date(2014, 9, 7));
    }

    #[test]
    fn calendar_boundaries() {
        let value = dt(2014, 11, 2, 11, 55, 0, 0);
        assert_eq!(start_of(Period::Month, &value, &DEFAULT), date(2014, 11, 1));
        assert_eq!(end_of(Period::Month, &value, &DEFAULT), dt(2014, 11, 30, 23, 59, 59, 999));
        assert_eq!(start_of(Period::Quarter, &value, &DEFAULT), date(2014, 10, 1));
        assert_eq!(end_of(Period::Quarter, &value, &DEFAULT), dt(2014, 12, 31, 23, 59, 59, 999));
        assert_eq!(start_of(Period::Year, &value, &DEFAULT), date(2014, 1, 1));
        assert_eq!(end_of(Period::Year, &value, &DEFAULT), dt(2014, 12, 31, 23, 59, 59, 999));
        assert_eq!(start_of(Period::Decade, &value, &DEFAULT), date(2010, 1, 1));
        assert_eq!(end_of(Period::Decade, &value, &DEFAULT), dt(2019, 12, 31, 23, 59, 59, 999));
        assert_eq!(start_of(Period::Decade, &date(-5, 6, 1), &DEFAULT), date(-10, 1, 1));
        assert_eq!(last_day_of_month(&value), date(2014, 11, 30));
        assert_eq!(last_day_of_quarter(&value), date(2014, 12, 31));
        assert_eq!(last_day_of_year(&value), date(2014, 12, 31));
        assert_eq!(last_day_of_decade(&value), date(2019, 12, 31));
        assert_eq!(last_day_of_month(&date(2012, 2, 11)), date(2012, 2, 29));
    }

    #[test]
    fn boundaries_in_local_offset() {
        let offset = UtcOffset::from_minutes(330).unwrap();
        let value = Instant::from_local(offset, 2014, 9, 2, 1, 0, 0, 0);
        let start = start_of(Period::Day, &value, &DEFAULT);
        assert_eq!(start, Instant::from_local(offset, 2014, 9, 2, 0, 0, 0, 0));
        assert_eq!(start.offset(), offset);
    }

    #[test]
    fn iso_week_years() {
        assert_eq!(get_iso_week_year(&date(2005, 1, 2)), Some(2004));
        assert_eq!(get_iso_week_year(&date(2008, 12, 29)), Some(2009));
        assert_eq!(start_of_iso_week_year(&dt(2009, 7, 2, 12, 0, 0, 0)), date(2008, 12, 29));
        assert_eq!(start_of_iso_week_year(&date(2005, 1, 2)), date(2003, 12, 29));
        assert_eq!(
            end_of(Period::IsoWeekYear, &date(2005, 7, 2), &DEFAULT),
            dt(2006, 1, 1, 23, 59, 59, 999)
        );
        assert_eq!(get_iso_weeks_in_year(&date(2015, 2, 11)), Some(53));
        assert_eq!(get_iso_weeks_in_year(&date(2014, 2, 11)), Some(52));
    }

    #[test]
    fn local_week_years() {
        assert_eq!(get_week_year(&date(2004, 12, 26), &DEFAULT), Some(2005));
        let options = WeekOptions {
            week_starts_on: Some(Weekday::Monday),
            first_week_contains_date: Some(4),
            ..DEFAULT
        };
        assert_eq!(get_week_year(&date(2004, 12, 26), &options), Some(2004));
        assert_eq!(start_of_week_year(&date(2005, 7, 2), &DEFAULT), date(2004, 12, 26));
        assert_eq!(start_of_week_year(&date(2005, 7, 2), &options), date(2005, 1, 3));
    }

    #[test]
    fn week_numbers() {
        assert_eq!(get_iso_week(&date(2005, 1, 2)), Some(53));
        assert_eq!(get_iso_week(&date(2008, 12, 29)), Some(1));
        assert_eq!(get_week(&date(2005, 1, 2), &DEFAULT), Some(2));
        assert_eq!(get_week(&date(2004, 12, 26), &DEFAULT), Some(1));
        assert_eq!(get_weeks_in_month(&date(2015, 2, 8), &DEFAULT), Some(4));
        assert_eq!(
            get_weeks_in_month(&date(2017, 7, 5), &WeekOptions::starting_on(Weekday::Monday)),
            Some(6)
        );
        assert_eq!(get_week_of_month(&date(2017, 11, 15), &DEFAULT), Some(3));
        assert_eq!(get_week_of_month(&date(2017, 11, 1), &DEFAULT), Some(1));
        assert_eq!(
            get_week_of_month(&date(2017, 10, 31), &WeekOptions::starting_on(Weekday::Monday)),
            Some(6)
        );
    }

    #[test]
    fn iso_week_wraps_at_week_year_boundary() {
        let mut value = date(2004, 12, 13);
        let mut weeks = Vec::new();
        for _ in 0..5 {
            weeks.push(get_iso_week(&value).unwrap());
            value = add_weeks(&value, 1);
        }
        assert_eq!(weeks, [51, 52, 53, 1, 2]);
    }

    #[test]
    fn same_period() {
        let a = dt(2014, 9, 4, 6, 0, 0, 0);
        let b = dt(2014, 9, 4, 18, 0, 0, 0);
        assert!(is_same(Period::Day, &a, &b, &DEFAULT));
        assert!(is_same(Period::Week, &date(2014, 8, 31), &date(2014, 9, 4), &DEFAULT));
        let monday = WeekOptions::starting_on(Weekday::Monday);
        assert!(!is_same(Period::Week, &date(2014, 8, 31), &date(2014, 9, 4), &monday));
        assert!(is_same(Period::IsoWeekYear, &date(2003, 12, 29), &date(2004, 1, 1), &DEFAULT));
        assert!(!is_same(Period::Day, &Instant::invalid(), &Instant::invalid(), &DEFAULT));
    }

    #[test]
    fn invalid_propagates() {
        let invalid = Instant::invalid();
        for period in [Period::Second, Period::Week, Period::Decade, Period::IsoWeekYear] {
            assert!(!start_of(period, &invalid, &DEFAULT).is_valid());
            assert!(!end_of(period, &invalid, &DEFAULT).is_valid());
        }
        assert_eq!(get_week(&invalid, &DEFAULT), None);
    }
}
