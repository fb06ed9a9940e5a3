//! The `calendrical` crate is a calendar-aware date engine: it performs
//! calendar arithmetic, computes period boundaries and differences, and
//! converts between instants and text with a locale-aware pattern
//! language.
//!
//! ```rust
//! use calendrical::{arithmetic::add_months, format::format, options::FormatOptions, Instant};
//!
//! let date = Instant::from_date_time(2014, 1, 31, 0, 0, 0, 0);
//! let next = add_months(&date, 1);
//! assert_eq!(
//!     format(&next, "yyyy-MM-dd", &FormatOptions::default()).unwrap(),
//!     "2014-02-28"
//! );
//! ```
//!
//! Every operation is generic over [`DateLike`], so a caller's own date
//! type flows through arithmetic unchanged. The bundled [`Instant`] pairs
//! an epoch-millisecond value with a fixed local offset.
//!
//! Failures come in two forms. Bad data (unparseable text, overflowing
//! arithmetic, invalid inputs) yields an invalid instant that propagates
//! through later calls, while a malformed pattern is a [`DateError`].
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/calendrical-rs/calendrical/main/assets/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/calendrical-rs/calendrical/main/assets/logo.svg"
)]
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![allow(
    // Currently throws a false positive regarding dependencies that are only used in tests.
    unused_crate_dependencies,
    clippy::module_name_repetitions,
    clippy::redundant_pub_crate,
    clippy::too_many_lines,
    clippy::cognitive_complexity,
    clippy::missing_errors_doc,
    clippy::option_if_let_else,
    clippy::too_many_arguments,

    // Field values are range checked before narrowing.
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
)]

pub mod arithmetic;
pub mod boundaries;
pub mod difference;
pub mod duration;
pub mod error;
pub mod fields;
pub mod format;
pub mod instant;
pub mod interval;
pub mod iso;
pub mod options;
pub mod parsers;

mod pattern;

#[doc(hidden)]
pub(crate) mod rounding;
#[doc(hidden)]
pub(crate) mod utils;

use core::cmp::Ordering;

/// Re-export of `TinyAsciiStr` from `tinystr`.
pub use tinystr::TinyAsciiStr;

/// Re-export of the locale contract and bundled data.
pub use locale_provider as locale;

#[doc(inline)]
pub use error::DateError;

/// The `calendrical` result type
pub type DateResult<T> = Result<T, DateError>;

pub use crate::{
    duration::Duration,
    instant::{DateInput, DateLike, Instant, UtcOffset},
    interval::Interval,
    options::{RoundingMode, Weekday},
};

/// A library specific trait for unwrapping assertions.
pub(crate) trait DateUnwrap {
    type Output;

    /// `calendrical` based assertion for unwrapping. This will panic in
    /// debug builds, but throws error during runtime.
    fn date_unwrap(self) -> DateResult<Self::Output>;
}

impl<T> DateUnwrap for Option<T> {
    type Output = T;

    fn date_unwrap(self) -> DateResult<Self::Output> {
        debug_assert!(self.is_some());
        self.ok_or(DateError::assert())
    }
}

/// A general Sign type.
#[repr(i8)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Sign {
    #[default]
    Positive = 1,
    Zero = 0,
    Negative = -1,
}

impl From<Ordering> for Sign {
    fn from(value: Ordering) -> Self {
        match value {
            Ordering::Greater => Self::Positive,
            Ordering::Equal => Self::Zero,
            Ordering::Less => Self::Negative,
        }
    }
}

impl From<i64> for Sign {
    fn from(value: i64) -> Self {
        Self::from(value.cmp(&0))
    }
}

// Relevant numeric constants
/// Milliseconds per day constant: 8.64e+7
pub const MS_PER_DAY: i64 = utils::MS_PER_DAY;
/// Milliseconds per week constant: 6.048e+8
pub const MS_PER_WEEK: i64 = utils::MS_PER_WEEK;
/// The largest representable epoch-millisecond magnitude: 8.64e+15
pub const MAX_EPOCH_MILLISECONDS: i64 = MS_PER_DAY * 100_000_000;
