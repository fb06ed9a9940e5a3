//! Reading dates from text.
//!
//! [`parse`] reads text against the same patterns [`format`](crate::format::format)
//! writes. Each letter run selects a field parser; the parsed values are
//! then applied to a reference date from the largest unit to the smallest,
//! so `parse("10:00", "HH:mm", &reference, ..)` keeps the reference's day.
//!
//! Malformed patterns are a [`DateError`]; text that does not match a
//! well-formed pattern gives an invalid date, matching the rest of the
//! crate.
//!
//! [`parse_iso`] reads RFC 3339 / ISO 8601 date-times with `ixdtf`.

use std::borrow::Cow;

use ixdtf::{parsers::IxdtfParser, records::UtcOffsetRecordOrZ};

use crate::{
    fields::{wall_milliseconds, with_epoch},
    iso::LocalFields,
    options::{resolve_locale, ParseOptions},
    pattern::{
        check_protected_token, expand_long_format, first_letter, tokenize, unescaped_letter_error,
        Part,
    },
    utils::{MS_PER_MINUTE, MS_PER_SECOND},
    DateError, DateLike, DateResult, Instant, UtcOffset,
};

mod field;
mod numeric;


use field::{Construction, FieldParser, Flags, Incompatible, ParseContext, Setter};

/// One validated step of a pattern.
#[derive(Debug)]
enum Step<'a> {
    Field { parser: FieldParser, token: &'a str },
    Literal(Cow<'a, str>),
}

/// Checks every run of `parts` before any input is read.
///
/// In token order: protected tokens, then conflicts with earlier tokens,
/// then unescaped letters that name no parser.
fn plan<'a>(
    parts: Vec<Part<'a>>,
    pattern: &str,
    text: &str,
    options: &ParseOptions<'_>,
) -> DateResult<Vec<Step<'a>>> {
    let mut used: Vec<&'a str> = Vec::new();
    let mut steps = Vec::with_capacity(parts.len());
    for part in parts {
        let run = match part {
            Part::Literal(literal) => {
                steps.push(Step::Literal(literal));
                continue;
            }
            Part::Run(run) => run,
        };
        check_protected_token(run, pattern, &text, options)?;

        let letter = first_letter(run);
        match FieldParser::from_letter(letter) {
            Some(parser) => {
                check_conflicts(parser, run, &used)?;
                used.push(run);
                steps.push(Step::Field { parser, token: run });
            }
            None if letter.is_ascii_alphabetic() => return Err(unescaped_letter_error(letter)),
            None => steps.push(Step::Literal(Cow::Borrowed(run))),
        }
    }
    Ok(steps)
}

fn check_conflicts(parser: FieldParser, token: &str, used: &[&str]) -> DateResult<()> {
    match parser.incompatible() {
        Incompatible::All if !used.is_empty() => Err(DateError::pattern().with_message(format!(
            "The format string mustn't contain `{token}` and any other token at the same time"
        ))),
        Incompatible::All => Ok(()),
        Incompatible::Letters(letters) => {
            let letter = first_letter(token);
            let conflict = used.iter().find(|used| {
                let used_letter = first_letter(used);
                used_letter == letter || letters.contains(used_letter)
            });
            match conflict {
                Some(used) => Err(DateError::pattern().with_message(format!(
                    "The format string mustn't contain `{used}` and `{token}` at the same time"
                ))),
                None => Ok(()),
            }
        }
    }
}

#[cfg(feature = "log")]
fn log_mismatch(step: &Step<'_>, rest: &str) {
    match step {
        Step::Field { token, .. } => log::debug!("`{token}` does not match {rest:?}"),
        Step::Literal(literal) => log::debug!("literal {literal:?} does not match {rest:?}"),
    }
}

/// Reads `text` against `steps`, returning the collected setters.
fn read_fields(
    steps: &[Step<'_>],
    text: &str,
    ctx: &ParseContext<'_>,
) -> Option<Vec<Setter>> {
    let mut setters = vec![Setter::NormalizeLocal];
    let mut rest = text;
    for step in steps {
        let consumed = match step {
            Step::Field { parser, token } => parser.parse(token, rest, ctx).map(|(value, len)| {
                setters.push(Setter::Field(*parser, value));
                len
            }),
            Step::Literal(literal) => rest.starts_with(&**literal).then_some(literal.len()),
        };
        let Some(consumed) = consumed else {
            #[cfg(feature = "log")]
            log_mismatch(step, rest);
            return None;
        };
        rest = &rest[consumed..];
    }

    if !rest.trim_start().is_empty() {
        #[cfg(feature = "log")]
        log::debug!("unparsed trailing input {rest:?}");
        return None;
    }
    Some(setters)
}

/// Applies `setters` to the wall clock of `reference`.
fn assemble<D: DateLike>(
    mut setters: Vec<Setter>,
    reference: &D,
    ctx: &ParseContext<'_>,
) -> Option<i64> {
    // Stable: equal keys keep input order, and the first setter of each
    // priority wins.
    setters.sort_by_key(|setter| core::cmp::Reverse((setter.priority(), setter.sub_priority())));
    setters.dedup_by_key(|setter| setter.priority());

    let mut construction = Construction {
        date: Instant::from_epoch_milliseconds(wall_milliseconds(reference)?),
        flags: Flags::default(),
        offset: reference.offset(),
    };
    for setter in setters {
        if !setter.validate(&construction.date) {
            #[cfg(feature = "log")]
            log::debug!("parsed value {setter:?} is out of range");
            return None;
        }
        setter.set(&mut construction, ctx);
    }
    construction.date.epoch_milliseconds()
}

/// Parses `text` with `pattern`, filling unparsed fields from `reference`.
///
/// The result is built with `reference`'s [`DateLike::construct_like`],
/// so it keeps the reference's offset. Text that does not match the
/// pattern, trailing non-whitespace input, and out-of-range values such as
/// `2014-02-30` all give an invalid date.
///
/// ```rust
/// use calendrical::{format::format, parsers::parse, options::ParseOptions, DateLike, Instant};
///
/// let reference = Instant::from_date_time(2020, 5, 17, 0, 0, 0, 0);
/// let options = ParseOptions::default();
///
/// let date = parse("02/11/2014", "MM/dd/yyyy", &reference, &options).unwrap();
/// assert_eq!(date, Instant::from_date_time(2014, 2, 11, 0, 0, 0, 0));
///
/// let time = parse("10:32 PM", "hh:mm a", &reference, &options).unwrap();
/// assert_eq!(format(&time, "yyyy-MM-dd HH:mm", &options).unwrap(), "2020-05-17 22:32");
///
/// let bad = parse("02/30/2014", "MM/dd/yyyy", &reference, &options).unwrap();
/// assert!(!bad.is_valid());
/// ```
///
/// # Errors
///
/// A `Pattern` error for an unescaped letter that names no token, for two
/// tokens that cannot be combined (e.g. `yyyy` with `YYYY`, or `t` with
/// anything), and for a protected `D`/`Y` token without the matching
/// opt-in. The pattern is checked before any input is read.
pub fn parse<D: DateLike>(
    text: &str,
    pattern: &str,
    reference: &D,
    options: &ParseOptions<'_>,
) -> DateResult<D> {
    if pattern.is_empty() {
        return Ok(if text.is_empty() {
            reference.clone()
        } else {
            reference.construct_like(None)
        });
    }

    let locale = resolve_locale(options.locale);
    let expanded = expand_long_format(pattern, &*locale);
    let steps = plan(tokenize(&expanded), pattern, text, options)?;

    let ctx = ParseContext {
        locale: &*locale,
        week: options.week_options().resolve(),
    };
    let epoch_ms = read_fields(&steps, text, &ctx).and_then(|setters| assemble(setters, reference, &ctx));
    Ok(with_epoch(reference, epoch_ms))
}

/// Returns whether `text` parses with `pattern` into a valid date.
///
/// Fields the pattern leaves out are filled from `reference`.
///
/// ```rust
/// use calendrical::{parsers::is_match, options::ParseOptions, Instant};
///
/// let reference = Instant::from_epoch_milliseconds(0);
/// let options = ParseOptions::default();
/// assert!(is_match("02/11/2014", "MM/dd/yyyy", &reference, &options).unwrap());
/// assert!(!is_match("02/29/2014", "MM/dd/yyyy", &reference, &options).unwrap());
/// ```
///
/// # Errors
///
/// The pattern errors of [`parse`].
pub fn is_match<D: DateLike>(
    text: &str,
    pattern: &str,
    reference: &D,
    options: &ParseOptions<'_>,
) -> DateResult<bool> {
    parse(text, pattern, reference, options).map(|date| date.is_valid())
}

// ==== ISO 8601 ====

/// The offset in milliseconds east of UTC and the offset the result is
/// observed at.
fn offset_from_record(record: Option<UtcOffsetRecordOrZ>) -> (i64, UtcOffset) {
    match record {
        Some(UtcOffsetRecordOrZ::Offset(offset)) => {
            let sign = offset.sign() as i64;
            let minutes = i64::from(offset.hour()) * 60 + i64::from(offset.minute());
            let seconds = offset.second().map_or(0, i64::from);
            let ms = sign * (minutes * MS_PER_MINUTE + seconds * MS_PER_SECOND);
            // Offsets with seconds are applied exactly but observed in UTC.
            let observed = if seconds == 0 {
                UtcOffset::from_minutes((sign * minutes) as i16).unwrap_or(UtcOffset::UTC)
            } else {
                UtcOffset::UTC
            };
            (ms, observed)
        }
        Some(UtcOffsetRecordOrZ::Z) | None => (0, UtcOffset::UTC),
    }
}

fn parse_iso_record(text: &str) -> DateResult<Instant> {
    let record = IxdtfParser::from_utf8(text.as_bytes())
        .parse()
        .map_err(|err| DateError::range().with_message(err.to_string()))?;
    let date = record
        .date
        .ok_or_else(|| DateError::range().with_message("ISO strings must contain a date."))?;

    let (hour, minute, second, nanosecond) = match record.time {
        Some(time) => {
            let nanosecond = match time.fraction {
                Some(fraction) => fraction.to_nanoseconds().ok_or_else(|| {
                    DateError::range().with_message("Fractional seconds exceed nine digits.")
                })?,
                None => 0,
            };
            // A leap second reads as the last second of the minute.
            (time.hour, time.minute, time.second.min(59), nanosecond)
        }
        None => (0, 0, 0, 0),
    };

    let (offset_ms, observed) = offset_from_record(record.offset);
    let wall = LocalFields::date(
        i64::from(date.year),
        i64::from(date.month),
        i64::from(date.day),
    )
    .with_time(
        i64::from(hour),
        i64::from(minute),
        i64::from(second),
        i64::from(nanosecond / 1_000_000),
    )
    .to_wall_milliseconds()
    .ok_or_else(|| DateError::range().with_message("ISO date-time is out of range."))?;

    let instant = Instant::from_epoch_milliseconds(wall - offset_ms).with_offset(observed);
    if !instant.is_valid() {
        return Err(DateError::range().with_message("ISO date-time is out of range."));
    }
    Ok(instant)
}

/// Parses an RFC 3339 / ISO 8601 date or date-time.
///
/// A date without a time is midnight; a string without an offset is read
/// as UTC. The result is observed at the parsed offset when it has whole
/// minutes. Anything unparseable gives an invalid instant.
///
/// ```rust
/// use calendrical::{parsers::parse_iso, DateLike, Instant};
///
/// assert_eq!(
///     parse_iso("2014-02-11T11:30:30.5+01:00").epoch_milliseconds(),
///     Instant::from_date_time(2014, 2, 11, 10, 30, 30, 500).epoch_milliseconds()
/// );
/// assert_eq!(parse_iso("20140211"), Instant::from_date_time(2014, 2, 11, 0, 0, 0, 0));
/// assert!(!parse_iso("2014-13-01").is_valid());
/// ```
pub fn parse_iso(text: &str) -> Instant {
    match parse_iso_record(text) {
        Ok(instant) => instant,
        Err(_err) => {
            #[cfg(feature = "log")]
            log::debug!("{text:?} is not an ISO date-time: {}", _err.message());
            Instant::invalid()
        }
    }
}
