//! The instant model: epoch milliseconds paired with a fixed local offset.

use core::cmp::Ordering;
use core::fmt;

use crate::{
    iso::{IsoDateTime, LocalFields},
    parsers::parse_iso,
    utils::MS_PER_MINUTE,
    DateError, DateResult, MAX_EPOCH_MILLISECONDS,
};

// ==== UtcOffset ====

/// A fixed offset from UTC in minutes east, strictly within one day.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcOffset(i16);

impl UtcOffset {
    pub const UTC: Self = Self(0);

    /// Creates an offset from minutes east of UTC.
    pub fn from_minutes(minutes: i16) -> DateResult<Self> {
        if minutes.unsigned_abs() >= 24 * 60 {
            return Err(DateError::range().with_message("UTC offset must be within one day."));
        }
        Ok(Self(minutes))
    }

    /// Creates an offset from a sign and hour and minute magnitudes.
    pub fn from_hours_minutes(negative: bool, hours: u8, minutes: u8) -> DateResult<Self> {
        if minutes > 59 {
            return Err(DateError::range().with_message("UTC offset minutes out of range."));
        }
        let total = i16::from(hours) * 60 + i16::from(minutes);
        Self::from_minutes(if negative { -total } else { total })
    }

    pub const fn minutes(self) -> i16 {
        self.0
    }

    pub(crate) const fn milliseconds(self) -> i64 {
        self.0 as i64 * MS_PER_MINUTE
    }
}

// ==== DateLike ====

/// A point in time the engine can read and reconstruct.
///
/// Every operation is generic over `DateLike` and builds its result with
/// [`construct_like`](DateLike::construct_like), so the caller's type and
/// local offset survive arithmetic.
pub trait DateLike: Clone {
    /// Milliseconds since the Unix epoch, or `None` when invalid.
    fn epoch_milliseconds(&self) -> Option<i64>;

    /// The offset used to derive local calendar fields.
    fn offset(&self) -> UtcOffset {
        UtcOffset::UTC
    }

    /// Builds a value of the same representation set to `epoch_ms`.
    fn construct_like(&self, epoch_ms: Option<i64>) -> Self;

    /// Returns whether this value holds a real instant.
    fn is_valid(&self) -> bool {
        self.epoch_milliseconds().is_some()
    }
}

// ==== Instant ====

/// The bundled [`DateLike`] implementation.
///
/// An `Instant` may be invalid. Invalid instants propagate through every
/// operation and are rejected only where a result cannot be expressed
/// without a real value, e.g. formatting.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instant {
    epoch_ms: Option<i64>,
    offset: UtcOffset,
}

impl DateLike for Instant {
    fn epoch_milliseconds(&self) -> Option<i64> {
        self.epoch_ms
    }

    fn offset(&self) -> UtcOffset {
        self.offset
    }

    fn construct_like(&self, epoch_ms: Option<i64>) -> Self {
        Self::from_parts(epoch_ms, self.offset)
    }
}

impl Instant {
    fn from_parts(epoch_ms: Option<i64>, offset: UtcOffset) -> Self {
        Self {
            epoch_ms: epoch_ms.filter(|ms| ms.unsigned_abs() <= MAX_EPOCH_MILLISECONDS as u64),
            offset,
        }
    }

    /// The invalid instant.
    pub const fn invalid() -> Self {
        Self {
            epoch_ms: None,
            offset: UtcOffset::UTC,
        }
    }

    /// Creates a UTC instant; values beyond ±8.64e15 are invalid.
    pub fn from_epoch_milliseconds(ms: i64) -> Self {
        Self::from_parts(Some(ms), UtcOffset::UTC)
    }

    /// Creates an instant from balanced UTC fields. `month` is 1-based and
    /// overflowing fields carry, e.g. `(2014, 2, 30)` is March 2nd.
    pub fn from_date_time(
        year: i64,
        month: i64,
        day: i64,
        hour: i64,
        minute: i64,
        second: i64,
        millisecond: i64,
    ) -> Self {
        Self::from_local(
            UtcOffset::UTC,
            year,
            month,
            day,
            hour,
            minute,
            second,
            millisecond,
        )
    }

    /// Creates an instant from balanced wall-clock fields at `offset`.
    pub fn from_local(
        offset: UtcOffset,
        year: i64,
        month: i64,
        day: i64,
        hour: i64,
        minute: i64,
        second: i64,
        millisecond: i64,
    ) -> Self {
        let wall = LocalFields::date(year, month, day)
            .with_time(hour, minute, second, millisecond)
            .to_wall_milliseconds();
        let epoch = wall.and_then(|ms| ms.checked_sub(offset.milliseconds()));
        Self::from_parts(epoch, offset)
    }

    /// Returns the same instant observed at another offset.
    #[must_use]
    pub fn with_offset(self, offset: UtcOffset) -> Self {
        Self { offset, ..self }
    }

    /// Returns the local calendar fields, or `None` when invalid.
    pub fn to_iso_date_time(&self) -> Option<IsoDateTime> {
        let local = self.epoch_ms? + self.offset.milliseconds();
        Some(IsoDateTime::from_wall_milliseconds(local))
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(dt) = self.to_iso_date_time() else {
            return f.write_str("Invalid Date");
        };
        let (d, t) = (dt.date, dt.time);
        if (0..=9999).contains(&d.year) {
            write!(f, "{:04}", d.year)?;
        } else {
            let sign = if d.year < 0 { '-' } else { '+' };
            write!(f, "{sign}{:06}", d.year.unsigned_abs())?;
        }
        write!(
            f,
            "-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}",
            d.month, d.day, t.hour, t.minute, t.second, t.millisecond
        )?;
        let minutes = self.offset.minutes();
        if minutes == 0 {
            return f.write_str("Z");
        }
        let sign = if minutes < 0 { '-' } else { '+' };
        let abs = minutes.unsigned_abs();
        write!(f, "{sign}{:02}:{:02}", abs / 60, abs % 60)
    }
}

// ==== Coercion ====

/// The input shapes an [`Instant`] may be coerced from.
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
    Instant(Instant),
    Milliseconds(i64),
    Number(f64),
    Text(String),
}

impl From<Instant> for DateInput {
    fn from(value: Instant) -> Self {
        Self::Instant(value)
    }
}

impl From<i64> for DateInput {
    fn from(value: i64) -> Self {
        Self::Milliseconds(value)
    }
}

impl From<f64> for DateInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for DateInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Coerces any supported input into an [`Instant`].
///
/// Never fails: inputs that do not describe a real instant yield the
/// invalid instant.
pub fn coerce(input: impl Into<DateInput>) -> Instant {
    match input.into() {
        DateInput::Instant(instant) => instant,
        DateInput::Milliseconds(ms) => Instant::from_epoch_milliseconds(ms),
        DateInput::Number(n) if n.is_finite() && n.abs() <= MAX_EPOCH_MILLISECONDS as f64 => {
            Instant::from_epoch_milliseconds(n.trunc() as i64)
        }
        DateInput::Number(_) => Instant::invalid(),
        DateInput::Text(text) => parse_iso(&text),
    }
}

// ==== Comparison ====

/// Compares two dates, earliest first. `None` when either is invalid.
pub fn compare_asc<A: DateLike, B: DateLike>(left: &A, right: &B) -> Option<Ordering> {
    Some(left.epoch_milliseconds()?.cmp(&right.epoch_milliseconds()?))
}

/// Compares two dates, latest first. `None` when either is invalid.
pub fn compare_desc<A: DateLike, B: DateLike>(left: &A, right: &B) -> Option<Ordering> {
    compare_asc(left, right).map(Ordering::reverse)
}

pub fn is_after<A: DateLike, B: DateLike>(date: &A, compared: &B) -> bool {
    compare_asc(date, compared) == Some(Ordering::Greater)
}

pub fn is_before<A: DateLike, B: DateLike>(date: &A, compared: &B) -> bool {
    compare_asc(date, compared) == Some(Ordering::Less)
}

pub fn is_equal<A: DateLike, B: DateLike>(left: &A, right: &B) -> bool {
    compare_asc(left, right) == Some(Ordering::Equal)
}

fn extreme<D: DateLike>(dates: &[D], keep: Ordering) -> Option<D> {
    let (first, rest) = dates.split_first()?;
    let mut best = first;
    for date in rest {
        match compare_asc(date, best) {
            Some(ordering) if ordering == keep => best = date,
            Some(_) => {}
            None => return Some(first.construct_like(None)),
        }
    }
    if !best.is_valid() {
        return Some(first.construct_like(None));
    }
    Some(best.clone())
}

/// Returns the earliest date. Invalid if any date is invalid.
pub fn min<D: DateLike>(dates: &[D]) -> Option<D> {
    extreme(dates, Ordering::Less)
}

/// Returns the latest date. Invalid if any date is invalid.
pub fn max<D: DateLike>(dates: &[D]) -> Option<D> {
    extreme(dates, Ordering::Greater)
}

/// Returns the index of the date closest to `target`; the first wins a tie.
///
/// `None` when `dates` is empty or any input is invalid.
pub fn closest_index_to<T: DateLike, D: DateLike>(target: &T, dates: &[D]) -> Option<usize> {
    let target = target.epoch_milliseconds()?;
    let mut best: Option<(usize, u64)> = None;
    for (index, date) in dates.iter().enumerate() {
        let distance = target.abs_diff(date.epoch_milliseconds()?);
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((index, distance));
        }
    }
    best.map(|(index, _)| index)
}

/// Returns the date closest to `target`.
///
/// `None` for an empty slice, the invalid date when any input is invalid.
pub fn closest_to<T: DateLike, D: DateLike>(target: &T, dates: &[D]) -> Option<D> {
    let first = dates.first()?;
    match closest_index_to(target, dates) {
        Some(index) => dates.get(index).cloned(),
        None => Some(first.construct_like(None)),
    }
}
