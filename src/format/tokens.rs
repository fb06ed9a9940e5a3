//! Renderers for single pattern tokens.

use core::fmt::{self, Write};

use locale_provider::{DayPeriod, Locale, NameContext, NameWidth, OrdinalUnit};
use writeable::Writeable;

use crate::{
    boundaries::{get_iso_week, get_iso_week_year, get_week, get_week_year},
    iso::IsoDateTime,
    options::{LocaleRef, ResolvedWeekOptions},
    pattern::first_letter,
    DateError, DateLike, DateResult, Instant,
};

/// The letters that name a format token.
pub(super) const FORMAT_LETTERS: &str = "GyYRuQqMLwIdDEeciabBhHKkmsSXxOztT";

pub(super) fn is_format_letter(letter: char) -> bool {
    FORMAT_LETTERS.contains(letter)
}

/// Everything a renderer reads, resolved once per format call.
pub(super) struct RenderContext<'a> {
    pub(super) instant: Instant,
    pub(super) local: IsoDateTime,
    pub(super) locale: LocaleRef<'a>,
    pub(super) week: ResolvedWeekOptions,
    week_year: Option<i32>,
    week_number: Option<u8>,
    iso_week_year: Option<i32>,
    iso_week_number: Option<u8>,
}

impl<'a> RenderContext<'a> {
    pub(super) fn new(
        instant: Instant,
        locale: LocaleRef<'a>,
        week: ResolvedWeekOptions,
    ) -> DateResult<Self> {
        let local = instant
            .to_iso_date_time()
            .ok_or_else(|| DateError::range().with_message("Invalid time value"))?;
        Ok(Self {
            instant,
            local,
            locale,
            week,
            week_year: None,
            week_number: None,
            iso_week_year: None,
            iso_week_number: None,
        })
    }

    /// Computes the week numbering a token needs up front, so rendering
    /// itself cannot fail.
    pub(super) fn prepare(&mut self, letter: char) -> DateResult<()> {
        let missing = || DateError::range().with_message("Invalid time value");
        let options = self.week.to_week_options();
        match letter {
            'Y' if self.week_year.is_none() => {
                self.week_year = Some(get_week_year(&self.instant, &options).ok_or_else(missing)?);
            }
            'w' if self.week_number.is_none() => {
                self.week_number = Some(get_week(&self.instant, &options).ok_or_else(missing)?);
            }
            'R' if self.iso_week_year.is_none() => {
                self.iso_week_year = Some(get_iso_week_year(&self.instant).ok_or_else(missing)?);
            }
            'I' if self.iso_week_number.is_none() => {
                self.iso_week_number = Some(get_iso_week(&self.instant).ok_or_else(missing)?);
            }
            _ => {}
        }
        Ok(())
    }
}

// ==== Writing helpers ====

/// Writes `value` zero-padded to `width` digits, sign first.
pub(super) fn write_padded<W: Write + ?Sized>(sink: &mut W, value: i64, width: usize) -> fmt::Result {
    if value < 0 {
        sink.write_char('-')?;
    }
    write!(sink, "{:0width$}", value.unsigned_abs())
}

fn write_name<W: Write + ?Sized>(sink: &mut W, name: Option<&str>, fallback: i64) -> fmt::Result {
    match name {
        Some(name) => sink.write_str(name),
        None => {
            #[cfg(feature = "log")]
            log::trace!("no locale name at any width, rendering {fallback} instead");
            fallback.write_to(sink)
        }
    }
}

fn write_ordinal<W: Write + ?Sized>(
    sink: &mut W,
    locale: &dyn Locale,
    value: i64,
    unit: OrdinalUnit,
) -> fmt::Result {
    sink.write_str(&locale.ordinal_number(value, unit))
}

/// Writes `-hh<delimiter>mm` for an offset in minutes east of UTC.
pub(super) fn write_offset<W: Write + ?Sized>(
    sink: &mut W,
    minutes: i16,
    delimiter: &str,
) -> fmt::Result {
    sink.write_char(if minutes < 0 { '-' } else { '+' })?;
    let abs = minutes.unsigned_abs();
    write!(sink, "{:02}{delimiter}{:02}", abs / 60, abs % 60)
}

/// Like [`write_offset`], omitting the minutes on whole hours.
fn write_offset_optional_minutes<W: Write + ?Sized>(sink: &mut W, minutes: i16) -> fmt::Result {
    if minutes % 60 != 0 {
        return write_offset(sink, minutes, "");
    }
    sink.write_char(if minutes < 0 { '-' } else { '+' })?;
    write!(sink, "{:02}", minutes.unsigned_abs() / 60)
}

/// Writes `-h<delimiter>mm` without hour padding, e.g. `+5` or `-3:30`.
fn write_offset_short<W: Write + ?Sized>(sink: &mut W, minutes: i16, delimiter: &str) -> fmt::Result {
    sink.write_char(if minutes < 0 { '-' } else { '+' })?;
    let abs = minutes.unsigned_abs();
    (abs / 60).write_to(sink)?;
    if abs % 60 == 0 {
        return Ok(());
    }
    write!(sink, "{delimiter}{:02}", abs % 60)
}

/// Years before 1 are written as positive years of the BC era.
fn era_year(year: i64) -> i64 {
    if year > 0 {
        year
    } else {
        1 - year
    }
}

/// The name width of a quarter or month token by run length.
fn text_width(len: usize) -> NameWidth {
    match len {
        3 => NameWidth::Abbreviated,
        5 => NameWidth::Narrow,
        _ => NameWidth::Wide,
    }
}

/// The name width of a weekday token by run length.
fn weekday_width(len: usize) -> NameWidth {
    match len {
        1..=3 => NameWidth::Abbreviated,
        5 => NameWidth::Narrow,
        6 => NameWidth::Short,
        _ => NameWidth::Wide,
    }
}

// ==== Token rendering ====

/// Renders one validated format token.
pub(super) fn write_token<W: Write + ?Sized>(
    ctx: &RenderContext<'_>,
    token: &str,
    sink: &mut W,
) -> fmt::Result {
    let len = token.len();
    let ordinal = len == 2 && token.ends_with('o');
    let locale = &*ctx.locale;
    let date = ctx.local.date;
    let time = ctx.local.time;
    let offset = ctx.instant.offset().minutes();

    match first_letter(token) {
        // Era
        'G' => {
            let era = usize::from(date.year > 0);
            let width = match len {
                1..=3 => NameWidth::Abbreviated,
                5 => NameWidth::Narrow,
                _ => NameWidth::Wide,
            };
            write_name(sink, locale.era_name(era, width), era as i64)
        }
        // Calendar year
        'y' => {
            let year = era_year(i64::from(date.year));
            match token {
                "yo" => write_ordinal(sink, locale, year, OrdinalUnit::Year),
                "yy" => write_padded(sink, year % 100, 2),
                _ => write_padded(sink, year, len),
            }
        }
        // Local week-numbering year
        'Y' => {
            let year = era_year(i64::from(ctx.week_year.unwrap_or(date.year)));
            match token {
                "Yo" => write_ordinal(sink, locale, year, OrdinalUnit::Year),
                "YY" => write_padded(sink, year % 100, 2),
                _ => write_padded(sink, year, len),
            }
        }
        // ISO week-numbering year
        'R' => write_padded(sink, i64::from(ctx.iso_week_year.unwrap_or(date.year)), len),
        // Extended year
        'u' => write_padded(sink, i64::from(date.year), len),
        // Quarter
        letter @ ('Q' | 'q') => {
            let quarter = date.quarter();
            let context = if letter == 'Q' {
                NameContext::Formatting
            } else {
                NameContext::Standalone
            };
            match len {
                _ if ordinal => write_ordinal(sink, locale, quarter.into(), OrdinalUnit::Quarter),
                1 | 2 => write_padded(sink, quarter.into(), len),
                _ => write_name(
                    sink,
                    locale.quarter_name(usize::from(quarter - 1), text_width(len), context),
                    quarter.into(),
                ),
            }
        }
        // Month
        letter @ ('M' | 'L') => {
            let month = date.month;
            let context = if letter == 'M' {
                NameContext::Formatting
            } else {
                NameContext::Standalone
            };
            match len {
                _ if ordinal => write_ordinal(sink, locale, month.into(), OrdinalUnit::Month),
                1 | 2 => write_padded(sink, month.into(), len),
                _ => write_name(
                    sink,
                    locale.month_name(usize::from(month - 1), text_width(len), context),
                    month.into(),
                ),
            }
        }
        // Local week of year
        'w' => {
            let week = i64::from(ctx.week_number.unwrap_or_default());
            if ordinal {
                write_ordinal(sink, locale, week, OrdinalUnit::Week)
            } else {
                write_padded(sink, week, len)
            }
        }
        // ISO week of year
        'I' => {
            let week = i64::from(ctx.iso_week_number.unwrap_or_default());
            if ordinal {
                write_ordinal(sink, locale, week, OrdinalUnit::Week)
            } else {
                write_padded(sink, week, len)
            }
        }
        // Day of month
        'd' => {
            if ordinal {
                write_ordinal(sink, locale, date.day.into(), OrdinalUnit::Date)
            } else {
                write_padded(sink, date.day.into(), len)
            }
        }
        // Day of year
        'D' => {
            let day = i64::from(date.day_of_year());
            if ordinal {
                write_ordinal(sink, locale, day, OrdinalUnit::DayOfYear)
            } else {
                write_padded(sink, day, len)
            }
        }
        // Day of week
        'E' => {
            let weekday = date.day_of_week();
            write_name(
                sink,
                locale.day_name(weekday.into(), weekday_width(len), NameContext::Formatting),
                weekday.into(),
            )
        }
        // Local, standalone local, and ISO day of week
        letter @ ('e' | 'c' | 'i') => {
            let weekday = date.day_of_week();
            let number = match letter {
                'i' if weekday == 0 => 7,
                'i' => weekday,
                _ => (weekday + 7 - ctx.week.week_starts_on) % 7 + 1,
            };
            let context = if letter == 'c' {
                NameContext::Standalone
            } else {
                NameContext::Formatting
            };
            match len {
                _ if ordinal => write_ordinal(sink, locale, number.into(), OrdinalUnit::Day),
                1 | 2 => write_padded(sink, number.into(), len),
                _ => write_name(
                    sink,
                    locale.day_name(weekday.into(), weekday_width(len), context),
                    number.into(),
                ),
            }
        }
        // AM, PM
        'a' => {
            let period = if time.hour >= 12 {
                DayPeriod::Pm
            } else {
                DayPeriod::Am
            };
            write_day_period(sink, locale, period, len, true)
        }
        // AM, PM, noon, midnight
        'b' => {
            let period = match time.hour {
                12 => DayPeriod::Noon,
                0 => DayPeriod::Midnight,
                13.. => DayPeriod::Pm,
                _ => DayPeriod::Am,
            };
            write_day_period(sink, locale, period, len, true)
        }
        // Flexible day periods
        'B' => {
            let period = match time.hour {
                17.. => DayPeriod::Evening,
                12.. => DayPeriod::Afternoon,
                4.. => DayPeriod::Morning,
                _ => DayPeriod::Night,
            };
            write_day_period(sink, locale, period, len, false)
        }
        // Hour [1-12]
        'h' => {
            let hour = match time.hour % 12 {
                0 => 12,
                hour => hour,
            };
            write_hour_like(sink, locale, hour, len, ordinal)
        }
        // Hour [0-23]
        'H' => write_hour_like(sink, locale, time.hour, len, ordinal),
        // Hour [0-11]
        'K' => write_hour_like(sink, locale, time.hour % 12, len, ordinal),
        // Hour [1-24]
        'k' => {
            let hour = if time.hour == 0 { 24 } else { time.hour };
            write_hour_like(sink, locale, hour, len, ordinal)
        }
        'm' if ordinal => write_ordinal(sink, locale, time.minute.into(), OrdinalUnit::Minute),
        'm' => write_padded(sink, time.minute.into(), len),
        's' if ordinal => write_ordinal(sink, locale, time.second.into(), OrdinalUnit::Second),
        's' => write_padded(sink, time.second.into(), len),
        // Fraction of second
        'S' => {
            let ms = i64::from(time.millisecond);
            if len >= 3 {
                write_padded(sink, ms, 3)?;
                (3..len).try_for_each(|_| sink.write_char('0'))
            } else {
                write_padded(sink, ms / 10_i64.pow(3 - len as u32), len)
            }
        }
        // Offset, `Z` for UTC
        'X' if offset == 0 => sink.write_char('Z'),
        // Offset
        'X' | 'x' => match len {
            1 => write_offset_optional_minutes(sink, offset),
            2 | 4 => write_offset(sink, offset, ""),
            _ => write_offset(sink, offset, ":"),
        },
        // Offset as a GMT string
        'O' | 'z' => {
            sink.write_str("GMT")?;
            if len <= 3 {
                write_offset_short(sink, offset, ":")
            } else {
                write_offset(sink, offset, ":")
            }
        }
        // Seconds timestamp
        't' => {
            let seconds = ctx.instant.epoch_milliseconds().unwrap_or_default() / 1000;
            write_padded(sink, seconds, len)
        }
        // Milliseconds timestamp
        'T' => write_padded(sink, ctx.instant.epoch_milliseconds().unwrap_or_default(), len),
        // Validated before rendering.
        _ => sink.write_str(token),
    }
}

fn write_hour_like<W: Write + ?Sized>(
    sink: &mut W,
    locale: &dyn Locale,
    hour: u8,
    len: usize,
    ordinal: bool,
) -> fmt::Result {
    if ordinal {
        write_ordinal(sink, locale, hour.into(), OrdinalUnit::Hour)
    } else {
        write_padded(sink, hour.into(), len)
    }
}

fn write_day_period<W: Write + ?Sized>(
    sink: &mut W,
    locale: &dyn Locale,
    period: DayPeriod,
    len: usize,
    lowercase_at_three: bool,
) -> fmt::Result {
    let width = match len {
        1..=3 => NameWidth::Abbreviated,
        5 => NameWidth::Narrow,
        _ => NameWidth::Wide,
    };
    let name = locale.day_period_name(period, width, NameContext::Formatting);
    match name {
        Some(name) if len == 3 && lowercase_at_three => sink.write_str(&name.to_lowercase()),
        name => write_name(sink, name, period as i64),
    }
}
