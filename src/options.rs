//! Native implementation of the engine's options.
//!
//! Week conventions resolve through a fixed chain: an explicit option, the
//! explicit locale's options, the process-wide [`DefaultOptions`], the
//! default locale's options, and finally the library defaults
//! (`Sunday`, first week contains January 1st).

use core::fmt;
use core::ops::Deref;
use core::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock};

use locale_provider::{Locale, EN_US};

use crate::DateError;

// ==== Weekday ====

/// A day of the week, numbered from Sunday.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    #[default]
    Sunday = 0,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    const ALL: [Weekday; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// Returns the weekday for `0 = Sunday` through `6 = Saturday`.
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    /// Returns `0 = Sunday` through `6 = Saturday`.
    pub const fn index(self) -> u8 {
        self as u8
    }
}

// ==== Rounding ====

/// Declares the specified `RoundingMode` for the operation.
///
/// `HalfCeil` matches the common "round half up" behavior of rounding a
/// real number to the nearest integer.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum RoundingMode {
    /// Ceil RoundingMode
    Ceil,
    /// Floor RoundingMode
    Floor,
    /// Expand RoundingMode
    Expand,
    /// Truncate RoundingMode - Default
    #[default]
    Trunc,
    /// HalfCeil RoundingMode
    HalfCeil,
    /// HalfFloor RoundingMode
    HalfFloor,
    /// HalfExpand RoundingMode
    HalfExpand,
    /// HalfTruncate RoundingMode
    HalfTrunc,
    /// HalfEven RoundingMode
    HalfEven,
}

/// The `UnsignedRoundingMode`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsignedRoundingMode {
    /// `Infinity` `RoundingMode`
    Infinity,
    /// `Zero` `RoundingMode`
    Zero,
    /// `HalfInfinity` `RoundingMode`
    HalfInfinity,
    /// `HalfZero` `RoundingMode`
    HalfZero,
    /// `HalfEven` `RoundingMode`
    HalfEven,
}

impl RoundingMode {
    #[inline]
    #[must_use]
    /// Negates the current `RoundingMode`.
    pub const fn negate(self) -> Self {
        use RoundingMode::{
            Ceil, Expand, Floor, HalfCeil, HalfEven, HalfExpand, HalfFloor, HalfTrunc, Trunc,
        };

        match self {
            Ceil => Self::Floor,
            Floor => Self::Ceil,
            HalfCeil => Self::HalfFloor,
            HalfFloor => Self::HalfCeil,
            Trunc => Self::Trunc,
            Expand => Self::Expand,
            HalfTrunc => Self::HalfTrunc,
            HalfExpand => Self::HalfExpand,
            HalfEven => Self::HalfEven,
        }
    }

    #[inline]
    #[must_use]
    /// Returns the `UnsignedRoundingMode`
    pub const fn get_unsigned_round_mode(self, is_positive: bool) -> UnsignedRoundingMode {
        use RoundingMode::{
            Ceil, Expand, Floor, HalfCeil, HalfEven, HalfExpand, HalfFloor, HalfTrunc, Trunc,
        };

        match self {
            Ceil if is_positive => UnsignedRoundingMode::Infinity,
            Ceil => UnsignedRoundingMode::Zero,
            Floor if is_positive => UnsignedRoundingMode::Zero,
            Floor | Expand => UnsignedRoundingMode::Infinity,
            Trunc => UnsignedRoundingMode::Zero,
            HalfCeil if is_positive => UnsignedRoundingMode::HalfInfinity,
            HalfCeil | HalfTrunc => UnsignedRoundingMode::HalfZero,
            HalfFloor if is_positive => UnsignedRoundingMode::HalfZero,
            HalfFloor | HalfExpand => UnsignedRoundingMode::HalfInfinity,
            HalfEven => UnsignedRoundingMode::HalfEven,
        }
    }
}

impl FromStr for RoundingMode {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ceil" => Ok(Self::Ceil),
            "floor" => Ok(Self::Floor),
            "expand" => Ok(Self::Expand),
            "trunc" => Ok(Self::Trunc),
            // The conventional `Math.round` behavior.
            "round" | "halfCeil" => Ok(Self::HalfCeil),
            "halfFloor" => Ok(Self::HalfFloor),
            "halfExpand" => Ok(Self::HalfExpand),
            "halfTrunc" => Ok(Self::HalfTrunc),
            "halfEven" => Ok(Self::HalfEven),
            _ => Err(DateError::range().with_message("RoundingMode not an accepted value.")),
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ceil => "ceil",
            Self::Floor => "floor",
            Self::Expand => "expand",
            Self::Trunc => "trunc",
            Self::HalfCeil => "halfCeil",
            Self::HalfFloor => "halfFloor",
            Self::HalfExpand => "halfExpand",
            Self::HalfTrunc => "halfTrunc",
            Self::HalfEven => "halfEven",
        }
        .fmt(f)
    }
}

// ==== Locale resolution ====

/// A locale borrowed from the caller or shared through the default slot.
#[derive(Clone)]
pub(crate) enum LocaleRef<'a> {
    Borrowed(&'a dyn Locale),
    Shared(Arc<dyn Locale>),
}

impl<'a> Deref for LocaleRef<'a> {
    type Target = dyn Locale + 'a;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Borrowed(locale) => *locale,
            Self::Shared(locale) => locale.as_ref(),
        }
    }
}

impl fmt::Debug for LocaleRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocaleRef").field(&self.code()).finish()
    }
}

/// Picks the explicit locale, then the default slot's, then `en-US`.
pub(crate) fn resolve_locale(explicit: Option<&dyn Locale>) -> LocaleRef<'_> {
    if let Some(locale) = explicit {
        return LocaleRef::Borrowed(locale);
    }
    match get_default_options().locale {
        Some(locale) => LocaleRef::Shared(locale),
        None => LocaleRef::Borrowed(&EN_US),
    }
}

// ==== Default options slot ====

/// Process-wide fallbacks for every locale or week option.
#[derive(Clone, Default)]
pub struct DefaultOptions {
    pub locale: Option<Arc<dyn Locale>>,
    pub week_starts_on: Option<Weekday>,
    pub first_week_contains_date: Option<u8>,
}

impl DefaultOptions {
    /// Options with nothing set.
    pub const fn new() -> Self {
        Self {
            locale: None,
            week_starts_on: None,
            first_week_contains_date: None,
        }
    }
}

impl fmt::Debug for DefaultOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultOptions")
            .field("locale", &self.locale.as_ref().map(|l| l.code()))
            .field("week_starts_on", &self.week_starts_on)
            .field("first_week_contains_date", &self.first_week_contains_date)
            .finish()
    }
}

static DEFAULT_OPTIONS: RwLock<DefaultOptions> = RwLock::new(DefaultOptions::new());

/// Returns a snapshot of the process-wide default options.
pub fn get_default_options() -> DefaultOptions {
    DEFAULT_OPTIONS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Replaces the process-wide default options.
pub fn set_default_options(options: DefaultOptions) {
    *DEFAULT_OPTIONS
        .write()
        .unwrap_or_else(PoisonError::into_inner) = options;
}

// ==== Week options ====

/// Week conventions for week-based operations.
#[derive(Clone, Copy, Default)]
pub struct WeekOptions<'a> {
    pub locale: Option<&'a dyn Locale>,
    pub week_starts_on: Option<Weekday>,
    /// The day of January always in the first week, `1..=7`.
    pub first_week_contains_date: Option<u8>,
}

impl fmt::Debug for WeekOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeekOptions")
            .field("locale", &self.locale.map(|l| l.code()))
            .field("week_starts_on", &self.week_starts_on)
            .field("first_week_contains_date", &self.first_week_contains_date)
            .finish()
    }
}

impl<'a> WeekOptions<'a> {
    /// Options that only set the week start.
    pub fn starting_on(week_starts_on: Weekday) -> Self {
        Self {
            week_starts_on: Some(week_starts_on),
            ..Self::default()
        }
    }

    pub(crate) fn resolve(&self) -> ResolvedWeekOptions {
        let defaults = get_default_options();
        let explicit_locale = self.locale.map(|l| l.options());
        let default_locale = defaults.locale.as_ref().map(|l| l.options());

        let week_starts_on = self
            .week_starts_on
            .or_else(|| explicit_locale?.week_starts_on.and_then(Weekday::from_index))
            .or(defaults.week_starts_on)
            .or_else(|| default_locale?.week_starts_on.and_then(Weekday::from_index))
            .unwrap_or_default();

        let first_week_contains_date = self
            .first_week_contains_date
            .or_else(|| explicit_locale?.first_week_contains_date)
            .or(defaults.first_week_contains_date)
            .or_else(|| default_locale?.first_week_contains_date)
            .unwrap_or(1)
            .clamp(1, 7);

        ResolvedWeekOptions {
            week_starts_on: week_starts_on.index(),
            first_week_contains_date,
        }
    }
}

/// Week conventions after the fallback chain has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ResolvedWeekOptions {
    pub(crate) week_starts_on: u8,
    pub(crate) first_week_contains_date: u8,
}

impl ResolvedWeekOptions {
    /// ISO-8601 weeks: Monday start, week one contains January 4th.
    pub(crate) const ISO: Self = Self {
        week_starts_on: 1,
        first_week_contains_date: 4,
    };

    /// Fully explicit options that resolve back to `self`.
    pub(crate) fn to_week_options(self) -> WeekOptions<'static> {
        WeekOptions {
            locale: None,
            week_starts_on: Weekday::from_index(self.week_starts_on),
            first_week_contains_date: Some(self.first_week_contains_date),
        }
    }
}

// ==== Pattern options ====

/// Options for pattern formatting and parsing.
#[derive(Clone, Copy, Default)]
pub struct PatternOptions<'a> {
    pub locale: Option<&'a dyn Locale>,
    pub week_starts_on: Option<Weekday>,
    pub first_week_contains_date: Option<u8>,
    /// Allows `Y` week-year tokens without a warning or error.
    pub use_additional_week_year_tokens: bool,
    /// Allows `D` day-of-year tokens without a warning or error.
    pub use_additional_day_of_year_tokens: bool,
}

/// Options for [`format`](crate::format::format).
pub type FormatOptions<'a> = PatternOptions<'a>;

/// Options for [`parse`](crate::parsers::parse).
pub type ParseOptions<'a> = PatternOptions<'a>;

impl fmt::Debug for PatternOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternOptions")
            .field("locale", &self.locale.map(|l| l.code()))
            .field("week_starts_on", &self.week_starts_on)
            .field("first_week_contains_date", &self.first_week_contains_date)
            .field(
                "use_additional_week_year_tokens",
                &self.use_additional_week_year_tokens,
            )
            .field(
                "use_additional_day_of_year_tokens",
                &self.use_additional_day_of_year_tokens,
            )
            .finish()
    }
}

impl<'a> PatternOptions<'a> {
    /// Options with only a locale set.
    pub fn with_locale(locale: &'a dyn Locale) -> Self {
        Self {
            locale: Some(locale),
            ..Self::default()
        }
    }

    /// The week conventions embedded in these options.
    pub fn week_options(&self) -> WeekOptions<'a> {
        WeekOptions {
            locale: self.locale,
            week_starts_on: self.week_starts_on,
            first_week_contains_date: self.first_week_contains_date,
        }
    }
}

// ==== Distance options ====

/// Options for [`format_distance`](crate::format::format_distance).
#[derive(Clone, Copy, Default)]
pub struct DistanceOptions<'a> {
    pub locale: Option<&'a dyn Locale>,
    /// Distinguishes durations under a minute.
    pub include_seconds: bool,
    /// Renders `in …` or `… ago`.
    pub add_suffix: bool,
}

/// The unit [`format_distance_strict`](crate::format::format_distance_strict)
/// renders in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceUnit {
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

/// A parsing error for `DistanceUnit`
#[derive(Debug, Clone, Copy)]
pub struct ParseDistanceUnitError;

impl fmt::Display for ParseDistanceUnitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("provided string was not a valid DistanceUnit")
    }
}

impl FromStr for DistanceUnit {
    type Err = ParseDistanceUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "second" => Ok(Self::Second),
            "minute" => Ok(Self::Minute),
            "hour" => Ok(Self::Hour),
            "day" => Ok(Self::Day),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            _ => Err(ParseDistanceUnitError),
        }
    }
}

/// Options for
/// [`format_distance_strict`](crate::format::format_distance_strict).
#[derive(Clone, Copy)]
pub struct DistanceStrictOptions<'a> {
    pub locale: Option<&'a dyn Locale>,
    pub add_suffix: bool,
    /// Forces a unit instead of picking the largest that fits.
    pub unit: Option<DistanceUnit>,
    pub rounding_mode: RoundingMode,
}

impl Default for DistanceStrictOptions<'_> {
    fn default() -> Self {
        Self {
            locale: None,
            add_suffix: false,
            unit: None,
            rounding_mode: RoundingMode::HalfCeil,
        }
    }
}

// ==== Duration and ISO options ====

/// A unit [`format_duration`](crate::format::format_duration) may render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    Years,
    Months,
    Weeks,
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl DurationUnit {
    /// Every unit, largest first.
    pub const ALL: [DurationUnit; 7] = [
        Self::Years,
        Self::Months,
        Self::Weeks,
        Self::Days,
        Self::Hours,
        Self::Minutes,
        Self::Seconds,
    ];
}

/// Options for [`format_duration`](crate::format::format_duration).
#[derive(Clone, Copy)]
pub struct FormatDurationOptions<'a> {
    pub locale: Option<&'a dyn Locale>,
    /// The units rendered, in order.
    pub format: &'a [DurationUnit],
    /// Renders zero-valued units that are present.
    pub zero: bool,
    pub delimiter: &'a str,
}

impl Default for FormatDurationOptions<'_> {
    fn default() -> Self {
        Self {
            locale: None,
            format: &DurationUnit::ALL,
            zero: false,
            delimiter: " ",
        }
    }
}

/// `Extended` separates fields with `-` and `:`; `Basic` does not.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum IsoFormat {
    #[default]
    Extended,
    Basic,
}

/// Which parts of the instant [`format_iso`](crate::format::format_iso)
/// renders.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum IsoRepresentation {
    #[default]
    Complete,
    Date,
    Time,
}

/// Options for [`format_iso`](crate::format::format_iso).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IsoFormatOptions {
    pub format: IsoFormat,
    pub representation: IsoRepresentation,
}
