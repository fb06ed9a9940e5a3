//! This module implements `Duration` and the unit conversion helpers.

use crate::{
    options::DurationUnit,
    utils::{MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND, MS_PER_WEEK},
    Sign,
};

/// Milliseconds in an average Gregorian year of 365.2425 days.
const MS_PER_AVERAGE_YEAR: i64 = 31_556_952_000;
/// Milliseconds in an average Gregorian month, a twelfth of a year.
const MS_PER_AVERAGE_MONTH: i64 = MS_PER_AVERAGE_YEAR / 12;

/// A set of independent, possibly signed, calendar and clock amounts.
///
/// Absent fields count as zero. Fields are never balanced against each
/// other, so `{ months: 14 }` stays fourteen months.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Duration {
    pub years: Option<i64>,
    pub months: Option<i64>,
    pub weeks: Option<i64>,
    pub days: Option<i64>,
    pub hours: Option<i64>,
    pub minutes: Option<i64>,
    pub seconds: Option<i64>,
    pub milliseconds: Option<i64>,
}

// ==== Public Duration API ====

impl Duration {
    /// A duration of whole years.
    pub const fn years(years: i64) -> Self {
        Self {
            years: Some(years),
            ..Self::EMPTY
        }
    }

    /// A duration of whole months.
    pub const fn months(months: i64) -> Self {
        Self {
            months: Some(months),
            ..Self::EMPTY
        }
    }

    /// A duration of whole days.
    pub const fn days(days: i64) -> Self {
        Self {
            days: Some(days),
            ..Self::EMPTY
        }
    }

    const EMPTY: Self = Self {
        years: None,
        months: None,
        weeks: None,
        days: None,
        hours: None,
        minutes: None,
        seconds: None,
        milliseconds: None,
    };

    /// Returns the value of a formattable unit.
    pub fn get(&self, unit: DurationUnit) -> Option<i64> {
        match unit {
            DurationUnit::Years => self.years,
            DurationUnit::Months => self.months,
            DurationUnit::Weeks => self.weeks,
            DurationUnit::Days => self.days,
            DurationUnit::Hours => self.hours,
            DurationUnit::Minutes => self.minutes,
            DurationUnit::Seconds => self.seconds,
        }
    }

    fn fields(&self) -> [Option<i64>; 8] {
        [
            self.years,
            self.months,
            self.weeks,
            self.days,
            self.hours,
            self.minutes,
            self.seconds,
            self.milliseconds,
        ]
    }

    /// Returns whether every field is absent or zero.
    pub fn is_zero(&self) -> bool {
        self.fields().iter().all(|f| f.unwrap_or_default() == 0)
    }

    /// Returns the sign of the first non-zero field.
    pub fn sign(&self) -> Sign {
        self.fields()
            .iter()
            .map(|f| f.unwrap_or_default())
            .find(|v| *v != 0)
            .map_or(Sign::Zero, Sign::from)
    }

    /// Returns this duration with every present field negated.
    ///
    /// `None` if a field is `i64::MIN`.
    pub fn negated(&self) -> Option<Self> {
        let neg = |f: Option<i64>| match f {
            Some(v) => v.checked_neg().map(Some),
            None => Some(None),
        };
        Some(Self {
            years: neg(self.years)?,
            months: neg(self.months)?,
            weeks: neg(self.weeks)?,
            days: neg(self.days)?,
            hours: neg(self.hours)?,
            minutes: neg(self.minutes)?,
            seconds: neg(self.seconds)?,
            milliseconds: neg(self.milliseconds)?,
        })
    }

    /// Returns an approximate length in milliseconds.
    ///
    /// Years are 365.2425 days and months a twelfth of that, so the result
    /// is exact in integer milliseconds. `None` on overflow.
    pub fn to_milliseconds(&self) -> Option<i64> {
        const UNITS: [i64; 8] = [
            MS_PER_AVERAGE_YEAR,
            MS_PER_AVERAGE_MONTH,
            MS_PER_WEEK,
            MS_PER_DAY,
            MS_PER_HOUR,
            MS_PER_MINUTE,
            MS_PER_SECOND,
            1,
        ];
        self.fields()
            .iter()
            .zip(UNITS)
            .try_fold(0i64, |acc, (value, unit)| {
                acc.checked_add(value.unwrap_or_default().checked_mul(unit)?)
            })
    }
}

// ==== Unit conversions ====
//
// Conversions into a larger unit truncate toward zero. Conversions into a
// smaller unit saturate at the bounds of `i64`.

pub const fn milliseconds_to_seconds(milliseconds: i64) -> i64 {
    milliseconds / MS_PER_SECOND
}

pub const fn milliseconds_to_minutes(milliseconds: i64) -> i64 {
    milliseconds / MS_PER_MINUTE
}

pub const fn milliseconds_to_hours(milliseconds: i64) -> i64 {
    milliseconds / MS_PER_HOUR
}

pub const fn seconds_to_milliseconds(seconds: i64) -> i64 {
    seconds.saturating_mul(MS_PER_SECOND)
}

pub const fn seconds_to_minutes(seconds: i64) -> i64 {
    seconds / 60
}

pub const fn seconds_to_hours(seconds: i64) -> i64 {
    seconds / 3600
}

pub const fn minutes_to_milliseconds(minutes: i64) -> i64 {
    minutes.saturating_mul(MS_PER_MINUTE)
}

pub const fn minutes_to_seconds(minutes: i64) -> i64 {
    minutes.saturating_mul(60)
}

pub const fn minutes_to_hours(minutes: i64) -> i64 {
    minutes / 60
}

pub const fn hours_to_milliseconds(hours: i64) -> i64 {
    hours.saturating_mul(MS_PER_HOUR)
}

pub const fn hours_to_seconds(hours: i64) -> i64 {
    hours.saturating_mul(3600)
}

pub const fn hours_to_minutes(hours: i64) -> i64 {
    hours.saturating_mul(60)
}

pub const fn days_to_weeks(days: i64) -> i64 {
    days / 7
}

pub const fn weeks_to_days(weeks: i64) -> i64 {
    weeks.saturating_mul(7)
}

pub const fn months_to_quarters(months: i64) -> i64 {
    months / 3
}

pub const fn months_to_years(months: i64) -> i64 {
    months / 12
}

pub const fn quarters_to_months(quarters: i64) -> i64 {
    quarters.saturating_mul(3)
}

pub const fn quarters_to_years(quarters: i64) -> i64 {
    quarters / 4
}

pub const fn years_to_months(years: i64) -> i64 {
    years.saturating_mul(12)
}

pub const fn years_to_quarters(years: i64) -> i64 {
    years.saturating_mul(4)
}
