//! Prefix matchers for numbers and UTC offsets.
//!
//! Every matcher reads from the start of its input and returns the value
//! with the number of bytes consumed, or `None` when nothing matches.

use crate::utils::{MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND};

fn leading_digits(text: &str) -> usize {
    text.bytes().take_while(u8::is_ascii_digit).count()
}

fn sign_len(text: &str) -> usize {
    usize::from(text.starts_with('-'))
}

/// Matches `1..=max_digits` ASCII digits; `None` for `max_digits` means any
/// number of digits.
fn digits(text: &str, max_digits: Option<usize>, signed: bool) -> Option<(i64, usize)> {
    let sign = if signed { sign_len(text) } else { 0 };
    let available = leading_digits(&text[sign..]);
    let count = max_digits.map_or(available, |max| available.min(max));
    if count == 0 {
        return None;
    }
    let end = sign + count;
    text[..end].parse().ok().map(|value| (value, end))
}

/// Matches up to `n` digits.
pub(super) fn n_digits(n: usize, text: &str) -> Option<(i64, usize)> {
    digits(text, Some(n), false)
}

/// Like [`n_digits`] with an optional leading `-`.
pub(super) fn n_digits_signed(n: usize, text: &str) -> Option<(i64, usize)> {
    digits(text, Some(n), true)
}

/// Matches any run of digits with an optional leading `-`.
pub(super) fn any_digits_signed(text: &str) -> Option<(i64, usize)> {
    digits(text, None, true)
}

/// Matches the longest run of at most `width` digits whose value does not
/// exceed `max`, e.g. `13` read as a month is `1` followed by `3`.
pub(super) fn bounded(text: &str, width: usize, max: i64) -> Option<(i64, usize)> {
    let mut count = leading_digits(text).min(width);
    while count > 0 {
        if let Ok(value) = text[..count].parse::<i64>() {
            if value <= max {
                return Some((value, count));
            }
        }
        count -= 1;
    }
    None
}

/// The accepted shapes of a UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum OffsetFormat {
    /// `+hh` or `+hhmm`
    BasicOptionalMinutes,
    /// `+hhmm`
    Basic,
    /// `+hhmm` or `+hhmmss`
    BasicOptionalSeconds,
    /// `+hh:mm`
    Extended,
    /// `+hh:mm` or `+hh:mm:ss`
    ExtendedOptionalSeconds,
}

impl OffsetFormat {
    pub(super) const fn from_run_length(len: usize) -> Self {
        match len {
            1 => Self::BasicOptionalMinutes,
            2 => Self::Basic,
            4 => Self::BasicOptionalSeconds,
            5 => Self::ExtendedOptionalSeconds,
            _ => Self::Extended,
        }
    }
}

fn two_digits(bytes: &[u8], at: usize) -> Option<i64> {
    match bytes.get(at..at + 2)? {
        [tens, ones] if tens.is_ascii_digit() && ones.is_ascii_digit() => {
            Some(i64::from(tens - b'0') * 10 + i64::from(ones - b'0'))
        }
        _ => None,
    }
}

/// Reads an optional `delimiter` plus two digits at `at`.
fn optional_component(bytes: &[u8], at: usize, delimiter: &[u8]) -> Option<(i64, usize)> {
    if !bytes.get(at..)?.starts_with(delimiter) {
        return None;
    }
    let value = two_digits(bytes, at + delimiter.len())?;
    Some((value, at + delimiter.len() + 2))
}

/// Matches a UTC offset or `Z`, returning the offset in milliseconds east
/// of UTC.
pub(super) fn offset(text: &str, format: OffsetFormat) -> Option<(i64, usize)> {
    if text.starts_with('Z') {
        return Some((0, 1));
    }
    let bytes = text.as_bytes();
    let sign = match bytes.first()? {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let hours = two_digits(bytes, 1)?;
    let delimiter: &[u8] = match format {
        OffsetFormat::Extended | OffsetFormat::ExtendedOptionalSeconds => b":",
        _ => b"",
    };

    let (minutes, mut end) = match format {
        OffsetFormat::BasicOptionalMinutes => optional_component(bytes, 3, b"").unwrap_or((0, 3)),
        _ => optional_component(bytes, 3, delimiter)?,
    };
    let mut seconds = 0;
    if matches!(
        format,
        OffsetFormat::BasicOptionalSeconds | OffsetFormat::ExtendedOptionalSeconds
    ) {
        if let Some((value, next)) = optional_component(bytes, end, delimiter) {
            seconds = value;
            end = next;
        }
    }

    let total = hours * MS_PER_HOUR + minutes * MS_PER_MINUTE + seconds * MS_PER_SECOND;
    Some((sign * total, end))
}
