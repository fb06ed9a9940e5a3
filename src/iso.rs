//! This module implements the internal ISO field records.
//!
//! The three main types of records are:
//!   - `IsoDateTime`
//!   - `IsoDate`
//!   - `IsoTime`
//!
//! All three describe wall-clock fields, i.e. an instant already shifted by
//! its local offset. `LocalFields` is the unbalanced counterpart used while
//! setting fields: any component may be out of range and is carried into
//! the next larger unit on conversion.

use crate::{
    utils::{self, MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND},
    DateError, DateResult,
};

/// `IsoDateTime` is the record of the `IsoDate` and `IsoTime` fields.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDateTime {
    pub date: IsoDate,
    pub time: IsoTime,
}

impl IsoDateTime {
    /// Creates a new `IsoDateTime` without any validation.
    pub(crate) const fn new_unchecked(date: IsoDate, time: IsoTime) -> Self {
        Self { date, time }
    }

    /// Splits wall-clock milliseconds since the epoch into fields.
    pub(crate) fn from_wall_milliseconds(ms: i64) -> Self {
        let (days, time_ms) = utils::div_mod(ms, MS_PER_DAY);
        Self::new_unchecked(
            IsoDate::from_epoch_days(days),
            IsoTime::from_day_milliseconds(time_ms),
        )
    }

    /// Returns wall-clock milliseconds since the epoch.
    pub(crate) fn to_wall_milliseconds(self) -> i64 {
        self.date.to_epoch_days() * MS_PER_DAY + self.time.to_day_milliseconds()
    }
}

// ==== `IsoDate` section ====

/// `IsoDate` is a proleptic Gregorian calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl Default for IsoDate {
    fn default() -> Self {
        Self::new_unchecked(1970, 1, 1)
    }
}

impl IsoDate {
    /// Creates a new `IsoDate` without determining the validity.
    pub(crate) const fn new_unchecked(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Creates a new validated `IsoDate`.
    pub fn try_new(year: i32, month: u8, day: u8) -> DateResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(DateError::range().with_message("month is not within a valid range."));
        }
        if day == 0 || day > utils::iso_days_in_month(year, month) {
            return Err(DateError::range().with_message("day is not within a valid range."));
        }
        Ok(Self::new_unchecked(year, month, day))
    }

    pub(crate) fn from_epoch_days(days: i64) -> Self {
        let (year, month, day) = utils::gregorian_ymd_from_epoch_days(days);
        Self::new_unchecked(year, month, day)
    }

    /// Returns the epoch day of this date.
    pub fn to_epoch_days(self) -> i64 {
        let days = utils::epoch_days_from_gregorian_date(
            i64::from(self.year),
            i64::from(self.month),
            i64::from(self.day),
        );
        debug_assert!(days.is_some());
        days.unwrap_or_default()
    }

    /// Returns the weekday, `0 = Sunday`.
    pub fn day_of_week(self) -> u8 {
        utils::weekday_from_epoch_days(self.to_epoch_days())
    }

    /// Returns the 1-based day of the year.
    pub const fn day_of_year(self) -> u16 {
        utils::day_of_year(self.year, self.month, self.day)
    }

    pub const fn days_in_month(self) -> u8 {
        utils::iso_days_in_month(self.year, self.month)
    }

    pub const fn days_in_year(self) -> u16 {
        utils::days_in_year(self.year)
    }

    pub const fn in_leap_year(self) -> bool {
        utils::is_leap_year(self.year)
    }

    /// Returns the 1-based quarter of the year.
    pub const fn quarter(self) -> u8 {
        (self.month - 1) / 3 + 1
    }
}

// ==== `IsoTime` section ====

/// An `IsoTime` record with millisecond precision.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub millisecond: u16,
}

impl IsoTime {
    /// Creates a new `IsoTime` without any validation.
    pub(crate) const fn new_unchecked(hour: u8, minute: u8, second: u8, millisecond: u16) -> Self {
        Self {
            hour,
            minute,
            second,
            millisecond,
        }
    }

    /// Creates a validated `IsoTime`.
    pub fn try_new(hour: u8, minute: u8, second: u8, millisecond: u16) -> DateResult<Self> {
        if hour > 23 || minute > 59 || second > 59 || millisecond > 999 {
            return Err(DateError::range().with_message("IsoTime is not within a valid range."));
        }
        Ok(Self::new_unchecked(hour, minute, second, millisecond))
    }

    /// Splits milliseconds into the day, `0..MS_PER_DAY`, into fields.
    pub(crate) fn from_day_milliseconds(ms: i64) -> Self {
        debug_assert!((0..MS_PER_DAY).contains(&ms));
        Self::new_unchecked(
            (ms / MS_PER_HOUR) as u8,
            (ms / MS_PER_MINUTE % 60) as u8,
            (ms / MS_PER_SECOND % 60) as u8,
            (ms % MS_PER_SECOND) as u16,
        )
    }

    /// Returns milliseconds into the day.
    pub(crate) fn to_day_milliseconds(self) -> i64 {
        i64::from(self.hour) * MS_PER_HOUR
            + i64::from(self.minute) * MS_PER_MINUTE
            + i64::from(self.second) * MS_PER_SECOND
            + i64::from(self.millisecond)
    }
}

// ==== `LocalFields` section ====

/// Wall-clock fields that may be out of range.
///
/// Conversion balances every component into the next larger one, so
/// month 13 is January of the following year and day 0 is the last day of
/// the prior month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LocalFields {
    pub(crate) year: i64,
    pub(crate) month: i64,
    pub(crate) day: i64,
    pub(crate) hour: i64,
    pub(crate) minute: i64,
    pub(crate) second: i64,
    pub(crate) millisecond: i64,
}

impl From<IsoDateTime> for LocalFields {
    fn from(value: IsoDateTime) -> Self {
        Self {
            year: i64::from(value.date.year),
            month: i64::from(value.date.month),
            day: i64::from(value.date.day),
            hour: i64::from(value.time.hour),
            minute: i64::from(value.time.minute),
            second: i64::from(value.time.second),
            millisecond: i64::from(value.time.millisecond),
        }
    }
}

impl LocalFields {
    /// Midnight at the start of `year-month-day`.
    pub(crate) const fn date(year: i64, month: i64, day: i64) -> Self {
        Self {
            year,
            month,
            day,
            hour: 0,
            minute: 0,
            second: 0,
            millisecond: 0,
        }
    }

    #[must_use]
    pub(crate) const fn with_time(self, hour: i64, minute: i64, second: i64, millisecond: i64) -> Self {
        Self {
            hour,
            minute,
            second,
            millisecond,
            ..self
        }
    }

    #[must_use]
    pub(crate) const fn start_of_day(self) -> Self {
        self.with_time(0, 0, 0, 0)
    }

    #[must_use]
    pub(crate) const fn end_of_day(self) -> Self {
        self.with_time(23, 59, 59, 999)
    }

    /// Balances the fields into wall-clock milliseconds since the epoch.
    pub(crate) fn to_wall_milliseconds(self) -> Option<i64> {
        let days = utils::epoch_days_from_gregorian_date(self.year, self.month, self.day)?;
        let time = self
            .hour
            .checked_mul(MS_PER_HOUR)?
            .checked_add(self.minute.checked_mul(MS_PER_MINUTE)?)?
            .checked_add(self.second.checked_mul(MS_PER_SECOND)?)?
            .checked_add(self.millisecond)?;
        days.checked_mul(MS_PER_DAY)?.checked_add(time)
    }
}
