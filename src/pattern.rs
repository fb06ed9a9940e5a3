//! The pattern mini-language shared by formatting and parsing.
//!
//! A pattern is scanned twice. The first pass expands the locale's long
//! macros (`P`, `PP`, `p`, `PPpp`, ...) into plain patterns. The second
//! splits the result into runs of one repeated word character, ordinal
//! tokens such as `do`, quoted literals, and single characters.

use std::borrow::Cow;

use locale_provider::{Locale, LongWidth};

use crate::{options::PatternOptions, DateError, DateResult};

/// Letters that accept an ordinal `o` suffix.
const ORDINAL_LETTERS: &[u8] = b"yYQqMLwIdDecihHKkms";

/// Macro expansions may themselves contain macros, up to this depth.
const MAX_EXPANSION_DEPTH: u8 = 4;

// ==== Scanning helpers ====

/// Returns the byte length of a quoted literal starting at the `'` at the
/// start of `text`. An unterminated quote runs to the end of the input.
fn quoted_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    debug_assert_eq!(bytes.first(), Some(&b'\''));
    let mut index = 1;
    while index < bytes.len() {
        if bytes[index] == b'\'' {
            if bytes.get(index + 1) == Some(&b'\'') {
                index += 2;
                continue;
            }
            return index + 1;
        }
        index += 1;
    }
    bytes.len()
}

fn run_len(text: &str, byte: u8) -> usize {
    text.bytes().take_while(|b| *b == byte).count()
}

fn first_char_len(text: &str) -> usize {
    text.chars().next().map_or(0, char::len_utf8)
}

/// Strips the quotes from a quoted literal and unescapes `''`.
pub(crate) fn clean_escaped(text: &str) -> Cow<'_, str> {
    let Some(inner) = text.strip_prefix('\'') else {
        return Cow::Borrowed(text);
    };
    let inner = inner.strip_suffix('\'').unwrap_or(inner);
    if inner.contains("''") {
        Cow::Owned(inner.replace("''", "'"))
    } else {
        Cow::Borrowed(inner)
    }
}

// ==== Long-format expansion ====

fn time_pattern(run: usize, locale: &dyn Locale) -> &str {
    locale.time_pattern(LongWidth::from_run_length(run))
}

fn date_pattern(run: usize, locale: &dyn Locale) -> &str {
    locale.date_pattern(LongWidth::from_run_length(run))
}

/// Expands every unquoted long macro of `pattern` with the locale's
/// patterns.
pub(crate) fn expand_long_format<'a>(pattern: &'a str, locale: &dyn Locale) -> Cow<'a, str> {
    expand_with_depth(pattern, locale, 0)
}

fn expand_with_depth<'a>(pattern: &'a str, locale: &dyn Locale, depth: u8) -> Cow<'a, str> {
    if depth >= MAX_EXPANSION_DEPTH || !pattern.contains(['P', 'p']) {
        return Cow::Borrowed(pattern);
    }

    let mut output = String::with_capacity(pattern.len());
    let mut rest = pattern;
    while !rest.is_empty() {
        let (expansion, len) = match rest.as_bytes()[0] {
            b'P' => {
                let dates = run_len(rest, b'P');
                let times = run_len(&rest[dates..], b'p');
                let date = date_pattern(dates, locale);
                if times == 0 {
                    (Some(date.to_owned()), dates)
                } else {
                    let glue = locale.date_time_pattern(LongWidth::from_run_length(dates));
                    let combined = glue
                        .replace("{{date}}", date)
                        .replace("{{time}}", time_pattern(times, locale));
                    (Some(combined), dates + times)
                }
            }
            b'p' => {
                let times = run_len(rest, b'p');
                (Some(time_pattern(times, locale).to_owned()), times)
            }
            b'\'' => (None, quoted_len(rest)),
            _ => (None, first_char_len(rest)),
        };
        match expansion {
            Some(expanded) => output.push_str(&expand_with_depth(&expanded, locale, depth + 1)),
            None => output.push_str(&rest[..len]),
        }
        rest = &rest[len..];
    }
    Cow::Owned(output)
}

// ==== Tokenizing ====

/// One piece of a tokenized pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Part<'a> {
    /// A run of one repeated word character, or an ordinal token like `do`.
    Run(&'a str),
    /// Literal text: quoted, an escaped quote, or one other character.
    Literal(Cow<'a, str>),
}

/// Returns the first character of a run.
pub(crate) fn first_letter(run: &str) -> char {
    run.chars().next().unwrap_or_default()
}

fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Splits an expanded pattern into parts.
pub(crate) fn tokenize(pattern: &str) -> Vec<Part<'_>> {
    let mut parts = Vec::new();
    let mut rest = pattern;
    while let Some(&first) = rest.as_bytes().first() {
        let (part, len) = if ORDINAL_LETTERS.contains(&first) && rest.as_bytes().get(1) == Some(&b'o') {
            (Part::Run(&rest[..2]), 2)
        } else if is_word_byte(first) {
            let len = run_len(rest, first);
            (Part::Run(&rest[..len]), len)
        } else if rest.starts_with("''") {
            (Part::Literal(Cow::Borrowed("'")), 2)
        } else if first == b'\'' {
            let len = quoted_len(rest);
            (Part::Literal(clean_escaped(&rest[..len])), len)
        } else {
            let len = first_char_len(rest);
            (Part::Literal(Cow::Borrowed(&rest[..len])), len)
        };
        parts.push(part);
        rest = &rest[len..];
    }
    parts
}

/// The error for an unescaped ASCII letter that names no token.
pub(crate) fn unescaped_letter_error(letter: char) -> DateError {
    DateError::pattern().with_message(format!(
        "Format string contains an unescaped latin alphabet character `{letter}`"
    ))
}

// ==== Protected tokens ====

/// Checks the tokens that are easily mistaken for others: any run of `D`
/// (day of year, not day of month) and of `Y` (week-numbering year, not
/// calendar year).
///
/// Unless the matching option is set, a warning is logged and `D`, `DD`,
/// `YY`, and `YYYY` fail outright.
pub(crate) fn check_protected_token(
    token: &str,
    pattern: &str,
    input: &dyn core::fmt::Display,
    options: &PatternOptions<'_>,
) -> DateResult<()> {
    let all = |byte: u8| !token.is_empty() && token.bytes().all(|b| b == byte);
    let protected = (all(b'Y') && !options.use_additional_week_year_tokens)
        || (all(b'D') && !options.use_additional_day_of_year_tokens);
    if !protected {
        return Ok(());
    }

    let subject = if token.starts_with('Y') {
        "years"
    } else {
        "days of the month"
    };
    let message = format!(
        "Use `{}` instead of `{token}` (in `{pattern}`) for formatting {subject} to the input `{input}`",
        token.to_lowercase()
    );
    #[cfg(feature = "log")]
    log::warn!("{message}");

    if matches!(token, "D" | "DD" | "YY" | "YYYY") {
        return Err(DateError::pattern().with_message(message));
    }
    Ok(())
}
