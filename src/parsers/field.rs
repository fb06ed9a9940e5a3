//! One parser per pattern letter.
//!
//! Each [`FieldParser`] reads its field from the input, then later
//! validates and applies the value against the date under construction.
//! Parsers run in input order; setters run by descending priority, so
//! larger units are applied first.

use locale_provider::{DayPeriod, Locale, NameCategory, NameContext, NameWidth, OrdinalUnit};

use crate::{
    boundaries::{get_week_year, start_of_iso_week, start_of_week},
    fields::{local_date_time, map_local, set_day, set_iso_day, set_iso_week, set_milliseconds, set_week},
    iso::LocalFields,
    options::ResolvedWeekOptions,
    DateLike, Instant, UtcOffset,
};

use super::numeric::{any_digits_signed, bounded, n_digits, n_digits_signed, offset, OffsetFormat};

/// Everything a field parser reads besides the input.
pub(super) struct ParseContext<'a> {
    pub(super) locale: &'a dyn Locale,
    pub(super) week: ResolvedWeekOptions,
}

/// A parsed field value, before it is validated and applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ParsedValue {
    Number(i64),
    /// Two-digit years are resolved against the year under construction.
    Year { year: i64, two_digit: bool },
    Period(DayPeriod),
}

/// State shared between setters.
#[derive(Debug, Default, Clone, Copy)]
pub(super) struct Flags {
    /// The instant was set from an epoch timestamp and is final.
    pub(super) timestamp_is_set: bool,
    /// The parsed era, `0 = BC`.
    pub(super) era: Option<i64>,
}

/// The date under construction.
///
/// Until an offset is applied, `date` holds the parsed wall-clock fields
/// as if they were UTC.
#[derive(Debug, Clone, Copy)]
pub(super) struct Construction {
    pub(super) date: Instant,
    pub(super) flags: Flags,
    /// The offset the wall clock is read in when no offset token is parsed.
    pub(super) offset: UtcOffset,
}

/// The tokens a parser cannot be combined with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Incompatible {
    /// Any of these letters, or the parser's own letter a second time.
    Letters(&'static str),
    /// Every other token.
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum FieldParser {
    Era,
    Year,
    LocalWeekYear,
    IsoWeekYear,
    ExtendedYear,
    Quarter,
    StandaloneQuarter,
    Month,
    StandaloneMonth,
    LocalWeek,
    IsoWeek,
    Date,
    DayOfYear,
    Day,
    LocalDay,
    StandaloneLocalDay,
    IsoDay,
    AmPm,
    AmPmMidnight,
    DayPeriod,
    Hour1To12,
    Hour0To23,
    Hour0To11,
    Hour1To24,
    Minute,
    Second,
    FractionOfSecond,
    IsoTimezoneWithZ,
    IsoTimezone,
    TimestampSeconds,
    TimestampMilliseconds,
}

// ==== Static properties ====

impl FieldParser {
    pub(super) const fn from_letter(letter: char) -> Option<Self> {
        let parser = match letter {
            'G' => Self::Era,
            'y' => Self::Year,
            'Y' => Self::LocalWeekYear,
            'R' => Self::IsoWeekYear,
            'u' => Self::ExtendedYear,
            'Q' => Self::Quarter,
            'q' => Self::StandaloneQuarter,
            'M' => Self::Month,
            'L' => Self::StandaloneMonth,
            'w' => Self::LocalWeek,
            'I' => Self::IsoWeek,
            'd' => Self::Date,
            'D' => Self::DayOfYear,
            'E' => Self::Day,
            'e' => Self::LocalDay,
            'c' => Self::StandaloneLocalDay,
            'i' => Self::IsoDay,
            'a' => Self::AmPm,
            'b' => Self::AmPmMidnight,
            'B' => Self::DayPeriod,
            'h' => Self::Hour1To12,
            'H' => Self::Hour0To23,
            'K' => Self::Hour0To11,
            'k' => Self::Hour1To24,
            'm' => Self::Minute,
            's' => Self::Second,
            'S' => Self::FractionOfSecond,
            'X' => Self::IsoTimezoneWithZ,
            'x' => Self::IsoTimezone,
            't' => Self::TimestampSeconds,
            'T' => Self::TimestampMilliseconds,
            _ => return None,
        };
        Some(parser)
    }

    /// Higher priorities are applied first.
    pub(super) const fn priority(self) -> i32 {
        match self {
            Self::Era => 140,
            Self::Year | Self::LocalWeekYear | Self::IsoWeekYear | Self::ExtendedYear => 130,
            Self::Quarter | Self::StandaloneQuarter => 120,
            Self::Month | Self::StandaloneMonth => 110,
            Self::LocalWeek | Self::IsoWeek => 100,
            Self::Date
            | Self::DayOfYear
            | Self::Day
            | Self::LocalDay
            | Self::StandaloneLocalDay
            | Self::IsoDay => 90,
            Self::AmPm | Self::AmPmMidnight | Self::DayPeriod => 80,
            Self::Hour1To12 | Self::Hour0To23 | Self::Hour0To11 | Self::Hour1To24 => 70,
            Self::Minute => 60,
            Self::Second => 50,
            Self::TimestampSeconds => 40,
            Self::FractionOfSecond => 30,
            Self::TimestampMilliseconds => 20,
            Self::IsoTimezoneWithZ | Self::IsoTimezone => 10,
        }
    }

    /// Breaks ties within a priority; only the highest is applied.
    pub(super) const fn sub_priority(self) -> i32 {
        match self {
            Self::Date | Self::DayOfYear => 1,
            _ => 0,
        }
    }

    pub(super) const fn incompatible(self) -> Incompatible {
        let letters = match self {
            Self::Era => "RutT",
            Self::Year => "YRuwIiectT",
            Self::LocalWeekYear => "yRuQqMLIdDitT",
            Self::IsoWeekYear => "GyYuQqMLwdDectT",
            Self::ExtendedYear => "GyYRwIiectT",
            Self::Quarter => "YRqMLwIdDiectT",
            Self::StandaloneQuarter => "YRQMLwIdDiectT",
            Self::Month => "YRqQLwIDiectT",
            Self::StandaloneMonth => "YRqQMwIDiectT",
            Self::LocalWeek => "yRuqQMLIdDitT",
            Self::IsoWeek => "yYuqQMLwdDectT",
            Self::Date => "YRqQwIDiectT",
            Self::DayOfYear => "YRqQMLwIdEiectT",
            Self::Day => "DiectT",
            Self::LocalDay => "yRuqQMLIdDEictT",
            Self::StandaloneLocalDay => "yRuqQMLIdDEietT",
            Self::IsoDay => "yYuqQMLwdDEectT",
            Self::AmPm => "bBHktT",
            Self::AmPmMidnight => "aBHktT",
            Self::DayPeriod => "abtT",
            Self::Hour1To12 => "HKktT",
            Self::Hour0To23 => "abhKktT",
            Self::Hour0To11 => "hHktT",
            Self::Hour1To24 => "abhHKtT",
            Self::Minute | Self::Second | Self::FractionOfSecond => "tT",
            Self::IsoTimezoneWithZ => "tTx",
            Self::IsoTimezone => "tTX",
            Self::TimestampSeconds | Self::TimestampMilliseconds => return Incompatible::All,
        };
        Incompatible::Letters(letters)
    }
}

// ==== Parsing ====

fn is_ordinal(token: &str) -> bool {
    token.len() == 2 && token.ends_with('o')
}

/// Name widths tried, in order, for eras, quarters, months, and day periods.
fn text_widths(len: usize) -> &'static [NameWidth] {
    match len {
        5 => &[NameWidth::Narrow],
        1..=3 => &[NameWidth::Abbreviated, NameWidth::Narrow],
        _ => &[NameWidth::Wide, NameWidth::Abbreviated, NameWidth::Narrow],
    }
}

/// Name widths tried, in order, for weekdays.
fn weekday_widths(len: usize) -> &'static [NameWidth] {
    match len {
        5 => &[NameWidth::Narrow],
        6 => &[NameWidth::Short, NameWidth::Narrow],
        1..=3 => &[NameWidth::Abbreviated, NameWidth::Short, NameWidth::Narrow],
        _ => &[
            NameWidth::Wide,
            NameWidth::Abbreviated,
            NameWidth::Short,
            NameWidth::Narrow,
        ],
    }
}

fn match_names(
    locale: &dyn Locale,
    category: NameCategory,
    text: &str,
    widths: &[NameWidth],
    context: NameContext,
) -> Option<(i64, usize)> {
    widths
        .iter()
        .find_map(|width| locale.match_name(category, text, *width, context))
        .map(|(index, len)| (index as i64, len))
}

fn context_for(standalone: bool) -> NameContext {
    if standalone {
        NameContext::Standalone
    } else {
        NameContext::Formatting
    }
}

/// Maps a numeric local weekday (`1` = first day of the week) to a day
/// index, `0 = Sunday`. Numbers past 7 move into later weeks.
fn local_day_from_number(value: i64, week_starts_on: u8) -> i64 {
    let whole_weeks = (value - 1).div_euclid(7) * 7;
    (value + i64::from(week_starts_on) + 6) % 7 + whole_weeks
}

fn number(matched: Option<(i64, usize)>) -> Option<(ParsedValue, usize)> {
    matched.map(|(value, len)| (ParsedValue::Number(value), len))
}

impl FieldParser {
    /// Reads this parser's field from the start of `text`.
    ///
    /// Returns the value and the number of bytes consumed.
    pub(super) fn parse(
        self,
        token: &str,
        text: &str,
        ctx: &ParseContext<'_>,
    ) -> Option<(ParsedValue, usize)> {
        let len = token.len();
        let ordinal = is_ordinal(token);
        let locale = ctx.locale;
        let ordinal_number = |unit| locale.match_ordinal_number(text, unit);

        match self {
            Self::Era => number(match_names(
                locale,
                NameCategory::Era,
                text,
                text_widths(len),
                NameContext::Formatting,
            )),
            Self::Year | Self::LocalWeekYear => {
                let (year, consumed) = match len {
                    _ if ordinal => ordinal_number(OrdinalUnit::Year)?,
                    1 => n_digits(4, text)?,
                    _ => n_digits(len, text)?,
                };
                let two_digit = len == 2 && !ordinal;
                Some((ParsedValue::Year { year, two_digit }, consumed))
            }
            Self::IsoWeekYear | Self::ExtendedYear => {
                number(n_digits_signed(if len == 1 { 4 } else { len }, text))
            }
            Self::Quarter | Self::StandaloneQuarter => {
                let context = context_for(self == Self::StandaloneQuarter);
                match len {
                    _ if ordinal => number(ordinal_number(OrdinalUnit::Quarter)),
                    1 | 2 => number(n_digits(len, text)),
                    _ => number(
                        match_names(locale, NameCategory::Quarter, text, text_widths(len), context)
                            .map(|(index, consumed)| (index + 1, consumed)),
                    ),
                }
            }
            Self::Month | Self::StandaloneMonth => {
                let context = context_for(self == Self::StandaloneMonth);
                match len {
                    _ if ordinal => number(ordinal_number(OrdinalUnit::Month)),
                    1 => number(bounded(text, 2, 12)),
                    2 => number(n_digits(2, text)),
                    _ => number(
                        match_names(locale, NameCategory::Month, text, text_widths(len), context)
                            .map(|(index, consumed)| (index + 1, consumed)),
                    ),
                }
            }
            Self::LocalWeek | Self::IsoWeek => match len {
                _ if ordinal => number(ordinal_number(OrdinalUnit::Week)),
                1 => number(bounded(text, 2, 53)),
                _ => number(n_digits(len, text)),
            },
            Self::Date => match len {
                _ if ordinal => number(ordinal_number(OrdinalUnit::Date)),
                1 => number(bounded(text, 2, 31)),
                _ => number(n_digits(len, text)),
            },
            Self::DayOfYear => match len {
                _ if ordinal => number(ordinal_number(OrdinalUnit::DayOfYear)),
                1 | 2 => number(bounded(text, 3, 366)),
                _ => number(n_digits(len, text)),
            },
            Self::Day => number(match_names(
                locale,
                NameCategory::Day,
                text,
                weekday_widths(len),
                NameContext::Formatting,
            )),
            Self::LocalDay | Self::StandaloneLocalDay => {
                let from_number = |(value, consumed): (i64, usize)| {
                    (local_day_from_number(value, ctx.week.week_starts_on), consumed)
                };
                let context = context_for(self == Self::StandaloneLocalDay);
                match len {
                    _ if ordinal => number(ordinal_number(OrdinalUnit::Day).map(from_number)),
                    1 | 2 => number(n_digits(len, text).map(from_number)),
                    _ => number(match_names(
                        locale,
                        NameCategory::Day,
                        text,
                        weekday_widths(len),
                        context,
                    )),
                }
            }
            Self::IsoDay => match len {
                _ if ordinal => number(ordinal_number(OrdinalUnit::Day)),
                1 | 2 => number(n_digits(len, text)),
                _ => number(
                    match_names(
                        locale,
                        NameCategory::Day,
                        text,
                        weekday_widths(len),
                        NameContext::Formatting,
                    )
                    .map(|(index, consumed)| (if index == 0 { 7 } else { index }, consumed)),
                ),
            },
            Self::AmPm | Self::AmPmMidnight | Self::DayPeriod => match_names(
                locale,
                NameCategory::DayPeriod,
                text,
                text_widths(len),
                NameContext::Formatting,
            )
            .and_then(|(index, consumed)| {
                let period = DayPeriod::from_index(usize::try_from(index).ok()?)?;
                Some((ParsedValue::Period(period), consumed))
            }),
            Self::Hour1To12 | Self::Hour0To23 | Self::Hour0To11 | Self::Hour1To24 => {
                let max = match self {
                    Self::Hour1To12 => 12,
                    Self::Hour0To23 => 23,
                    Self::Hour0To11 => 11,
                    _ => 24,
                };
                match len {
                    _ if ordinal => number(ordinal_number(OrdinalUnit::Hour)),
                    1 => number(bounded(text, 2, max)),
                    _ => number(n_digits(len, text)),
                }
            }
            Self::Minute | Self::Second => {
                let unit = if self == Self::Minute {
                    OrdinalUnit::Minute
                } else {
                    OrdinalUnit::Second
                };
                match len {
                    _ if ordinal => number(ordinal_number(unit)),
                    1 => number(bounded(text, 2, 59)),
                    _ => number(n_digits(len, text)),
                }
            }
            // The digits are scaled to milliseconds by the token length.
            Self::FractionOfSecond => {
                let (value, consumed) = n_digits(len, text)?;
                let scaled = if len >= 3 {
                    10_i64
                        .checked_pow(u32::try_from(len - 3).ok()?)
                        .map_or(0, |divisor| value / divisor)
                } else {
                    value.checked_mul(10_i64.pow(3 - len as u32))?
                };
                Some((ParsedValue::Number(scaled), consumed))
            }
            Self::IsoTimezoneWithZ | Self::IsoTimezone => {
                number(offset(text, OffsetFormat::from_run_length(len)))
            }
            Self::TimestampSeconds => {
                let (seconds, consumed) = any_digits_signed(text)?;
                Some((ParsedValue::Number(seconds.checked_mul(1000)?), consumed))
            }
            Self::TimestampMilliseconds => number(any_digits_signed(text)),
        }
    }
}

// ==== Validation and setting ====

/// Resolves a two-digit year into the century window centred on
/// `current_year`.
pub(super) fn normalize_two_digit_year(two_digit_year: i64, current_year: i64) -> i64 {
    let is_common_era = current_year > 0;
    let abs_current_year = if is_common_era {
        current_year
    } else {
        1 - current_year
    };
    let result = if abs_current_year <= 50 {
        if two_digit_year == 0 {
            100
        } else {
            two_digit_year
        }
    } else {
        let range_end = abs_current_year + 50;
        let range_end_century = range_end / 100 * 100;
        let is_previous_century = two_digit_year >= range_end % 100;
        two_digit_year + range_end_century - if is_previous_century { 100 } else { 0 }
    };
    if is_common_era {
        result
    } else {
        1 - result
    }
}

fn midnight(template: &Instant, year: i64, month: i64, day: i64) -> Instant {
    map_local(template, |_| LocalFields::date(year, month, day))
}

fn start_of_local_day(date: &Instant) -> Instant {
    map_local(date, LocalFields::start_of_day)
}

fn with_hours(date: &Instant, hour: i64) -> Instant {
    map_local(date, |f| f.with_time(hour, 0, 0, 0))
}

impl FieldParser {
    /// Checks `value` against the date built so far.
    pub(super) fn validate(self, date: &Instant, value: ParsedValue) -> bool {
        let ParsedValue::Number(n) = value else {
            return match value {
                ParsedValue::Year { year, two_digit } => two_digit || year > 0,
                _ => true,
            };
        };
        let range = match self {
            Self::Quarter | Self::StandaloneQuarter => 1..=4,
            Self::Month | Self::StandaloneMonth => 1..=12,
            Self::LocalWeek | Self::IsoWeek => 1..=53,
            Self::Date => {
                let Some(local) = local_date_time(date) else {
                    return false;
                };
                1..=i64::from(local.date.days_in_month())
            }
            Self::DayOfYear => {
                let Some(local) = local_date_time(date) else {
                    return false;
                };
                1..=i64::from(local.date.days_in_year())
            }
            Self::Day | Self::LocalDay | Self::StandaloneLocalDay => 0..=6,
            Self::IsoDay => 1..=7,
            Self::Hour1To12 => 1..=12,
            Self::Hour0To23 => 0..=23,
            Self::Hour0To11 => 0..=11,
            Self::Hour1To24 => 1..=24,
            Self::Minute | Self::Second => 0..=59,
            _ => return true,
        };
        range.contains(&n)
    }

    /// Applies `value` to the date under construction.
    pub(super) fn set(self, construction: &mut Construction, value: ParsedValue, ctx: &ParseContext<'_>) {
        let date = &construction.date;
        let era = construction.flags.era;
        let week = ctx.week.to_week_options();
        let current = local_date_time(date);
        let n = match value {
            ParsedValue::Number(n) => n,
            ParsedValue::Year { year, .. } => year,
            ParsedValue::Period(period) => i64::from(period.to_hours()),
        };
        let two_digit = matches!(value, ParsedValue::Year { two_digit: true, .. });
        let calendar_year = |current_year: i64| match era {
            _ if two_digit => normalize_two_digit_year(n, current_year),
            Some(0) => 1 - n,
            _ => n,
        };

        let next = match self {
            Self::Era => {
                construction.flags.era = Some(n);
                midnight(date, n, 1, 1)
            }
            Self::Year => match current {
                Some(current) => midnight(date, calendar_year(current.date.year.into()), 1, 1),
                None => Instant::invalid(),
            },
            Self::LocalWeekYear => match get_week_year(date, &week) {
                Some(current) => {
                    let first_week_day = i64::from(ctx.week.first_week_contains_date);
                    let anchor = midnight(date, calendar_year(current.into()), 1, first_week_day);
                    start_of_week(&anchor, &week)
                }
                None => Instant::invalid(),
            },
            Self::IsoWeekYear => start_of_iso_week(&midnight(date, n, 1, 4)),
            Self::ExtendedYear => midnight(date, n, 1, 1),
            Self::Quarter | Self::StandaloneQuarter => {
                map_local(date, |f| LocalFields::date(f.year, (n - 1) * 3 + 1, 1))
            }
            Self::Month | Self::StandaloneMonth => {
                map_local(date, |f| LocalFields::date(f.year, n, 1))
            }
            Self::LocalWeek => start_of_week(&set_week(date, n, &week), &week),
            Self::IsoWeek => start_of_iso_week(&set_iso_week(date, n)),
            Self::Date => map_local(date, |f| LocalFields::date(f.year, f.month, n)),
            Self::DayOfYear => map_local(date, |f| LocalFields::date(f.year, 1, n)),
            Self::Day | Self::LocalDay | Self::StandaloneLocalDay => {
                start_of_local_day(&set_day(date, n, &week))
            }
            Self::IsoDay => start_of_local_day(&set_iso_day(date, n)),
            Self::AmPm | Self::AmPmMidnight | Self::DayPeriod => with_hours(date, n),
            Self::Hour1To12 | Self::Hour0To11 => {
                let is_pm = current.is_some_and(|c| c.time.hour >= 12);
                let hour = match n {
                    12 if !is_pm => 0,
                    n if is_pm && n < 12 => n + 12,
                    n => n,
                };
                with_hours(date, hour)
            }
            Self::Hour0To23 => with_hours(date, n),
            Self::Hour1To24 => with_hours(date, n % 24),
            Self::Minute => map_local(date, |f| LocalFields {
                minute: n,
                second: 0,
                millisecond: 0,
                ..f
            }),
            Self::Second => map_local(date, |f| LocalFields {
                second: n,
                millisecond: 0,
                ..f
            }),
            Self::FractionOfSecond => set_milliseconds(date, n),
            Self::IsoTimezoneWithZ | Self::IsoTimezone => {
                if construction.flags.timestamp_is_set {
                    return;
                }
                date.construct_like(date.epoch_milliseconds().and_then(|wall| wall.checked_sub(n)))
            }
            Self::TimestampSeconds | Self::TimestampMilliseconds => {
                construction.flags.timestamp_is_set = true;
                date.construct_like(Some(n))
            }
        };
        construction.date = next;
    }
}

// ==== Setters ====

/// A value waiting to be applied, or the final conversion of the wall
/// clock into the caller's offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Setter {
    Field(FieldParser, ParsedValue),
    /// Reads the wall clock in the reference offset. An offset token at the
    /// same priority replaces it.
    NormalizeLocal,
}

impl Setter {
    pub(super) const fn priority(self) -> i32 {
        match self {
            Self::Field(parser, _) => parser.priority(),
            Self::NormalizeLocal => 10,
        }
    }

    pub(super) const fn sub_priority(self) -> i32 {
        match self {
            Self::Field(parser, _) => parser.sub_priority(),
            Self::NormalizeLocal => -1,
        }
    }

    pub(super) fn validate(self, date: &Instant) -> bool {
        match self {
            Self::Field(parser, value) => parser.validate(date, value),
            Self::NormalizeLocal => true,
        }
    }

    pub(super) fn set(self, construction: &mut Construction, ctx: &ParseContext<'_>) {
        match self {
            Self::Field(parser, value) => parser.set(construction, value, ctx),
            Self::NormalizeLocal if construction.flags.timestamp_is_set => {}
            Self::NormalizeLocal => {
                let date = &construction.date;
                let offset = construction.offset.milliseconds();
                construction.date = date.construct_like(
                    date.epoch_milliseconds()
                        .and_then(|wall| wall.checked_sub(offset)),
                );
            }
        }
    }
}
