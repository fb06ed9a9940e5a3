//! Rendering dates as text.
//!
//! [`format`] renders a date with a pattern of repeated field letters, e.g.
//! `yyyy-MM-dd'T'HH:mm`. Letter runs select a field and its width, text
//! inside single quotes is copied verbatim, and `''` writes one quote.
//! Long macros (`P`, `PP`, `p`, `PPpp`, ...) expand to the locale's own
//! date and time patterns first.
//!
//! The remaining functions render distances between two dates
//! ([`format_distance`], [`format_distance_strict`]), a date relative to a
//! base date ([`format_relative`]), a [`Duration`](crate::Duration)
//! ([`format_duration`]), and ISO 8601 strings ([`format_iso`]).

use core::fmt;
use std::borrow::Cow;

use writeable::{impl_display_with_writeable, Writeable};

use crate::{
    options::{resolve_locale, FormatOptions},
    pattern::{
        check_protected_token, expand_long_format, first_letter, tokenize, unescaped_letter_error,
        Part,
    },
    DateError, DateLike, DateResult, Instant,
};

mod distance;
mod duration;
mod iso;
mod relative;
mod tokens;

#[cfg(test)]
mod tests;

pub use distance::{format_distance, format_distance_strict};
pub use duration::format_duration;
pub use iso::{format_iso, FormattedIso};
pub use relative::format_relative;

use tokens::{is_format_letter, write_token, RenderContext};

/// Converts any [`DateLike`] into the bundled representation, keeping its
/// offset.
pub(crate) fn to_instant<D: DateLike>(date: &D) -> Instant {
    match date.epoch_milliseconds() {
        Some(ms) => Instant::from_epoch_milliseconds(ms).with_offset(date.offset()),
        None => Instant::invalid(),
    }
}

/// A date rendered with a validated pattern.
///
/// The pattern is checked when the value is built, so writing it never
/// fails.
pub struct FormattedDate<'a> {
    pattern: Cow<'a, str>,
    context: RenderContext<'a>,
}

impl fmt::Debug for FormattedDate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormattedDate")
            .field("pattern", &self.pattern)
            .field("instant", &self.context.instant)
            .finish_non_exhaustive()
    }
}

impl<'a> FormattedDate<'a> {
    /// Validates `pattern` and prepares `date` for rendering.
    pub fn try_new<D: DateLike>(
        date: &D,
        pattern: &'a str,
        options: &FormatOptions<'a>,
    ) -> DateResult<Self> {
        let instant = to_instant(date);
        if !instant.is_valid() {
            return Err(DateError::range().with_message("Invalid time value"));
        }
        let locale = resolve_locale(options.locale);
        let week = options.week_options().resolve();
        let expanded = expand_long_format(pattern, &*locale);
        let mut context = RenderContext::new(instant, locale, week)?;

        validate_parts(&tokenize(&expanded), pattern, &instant, options, &mut context)?;
        Ok(Self {
            pattern: expanded,
            context,
        })
    }
}

/// Rejects unknown letters first, then protected tokens, and prepares the
/// week numbering the remaining tokens read.
fn validate_parts(
    parts: &[Part<'_>],
    pattern: &str,
    instant: &Instant,
    options: &FormatOptions<'_>,
    context: &mut RenderContext<'_>,
) -> DateResult<()> {
    let runs = || {
        parts.iter().filter_map(|part| match part {
            Part::Run(run) => Some(*run),
            Part::Literal(_) => None,
        })
    };
    if let Some(letter) = runs()
        .map(first_letter)
        .find(|letter| !is_format_letter(*letter) && letter.is_ascii_alphabetic())
    {
        return Err(unescaped_letter_error(letter));
    }
    for run in runs().filter(|run| is_format_letter(first_letter(run))) {
        check_protected_token(run, pattern, instant, options)?;
        context.prepare(first_letter(run))?;
    }
    Ok(())
}

impl Writeable for FormattedDate<'_> {
    fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        for part in tokenize(&self.pattern) {
            match part {
                Part::Literal(text) => sink.write_str(&text)?,
                Part::Run(run) if is_format_letter(first_letter(run)) => {
                    write_token(&self.context, run, sink)?;
                }
                Part::Run(run) => sink.write_str(run)?,
            }
        }
        Ok(())
    }
}

impl_display_with_writeable!(FormattedDate<'_>);

/// Renders `date` with `pattern`.
///
/// ```rust
/// use calendrical::{format::format, options::FormatOptions, Instant};
///
/// let date = Instant::from_date_time(2014, 2, 11, 11, 30, 30, 0);
/// let options = FormatOptions::default();
/// assert_eq!(
///     format(&date, "do MMMM yyyy, h:mm a", &options).unwrap(),
///     "11th February 2014, 11:30 AM"
/// );
/// assert_eq!(format(&date, "PPpp", &options).unwrap(), "Feb 11, 2014, 11:30:30 AM");
/// ```
///
/// # Errors
///
/// A `Range` error for an invalid date, and a `Pattern` error for an
/// unescaped letter that names no token or for a protected `D`/`Y` token
/// without the matching opt-in.
pub fn format<D: DateLike>(
    date: &D,
    pattern: &str,
    options: &FormatOptions<'_>,
) -> DateResult<String> {
    FormattedDate::try_new(date, pattern, options)
        .map(|formatted| formatted.write_to_string().into_owned())
}
