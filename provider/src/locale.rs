//! The `Locale` trait.

use alloc::string::String;
use tinystr::TinyAsciiStr;

use crate::names::{match_prefix, strip_prefix_ignore_case, DayPeriod, NameCategory, NameContext, NameWidth};

/// Week conventions a locale supplies.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LocaleOptions {
    /// `0 = Sunday` through `6 = Saturday`.
    pub week_starts_on: Option<u8>,
    /// The day of January that is always in week one, `1..=7`.
    pub first_week_contains_date: Option<u8>,
}

/// The unit an ordinal number is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrdinalUnit {
    Year,
    Quarter,
    Month,
    Week,
    Date,
    DayOfYear,
    Day,
    Hour,
    Minute,
    Second,
}

/// The width of a long-format macro (`P`, `PP`, `PPP`, `PPPP`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LongWidth {
    Full,
    Long,
    Medium,
    Short,
}

impl LongWidth {
    /// Maps a macro run length onto a width.
    pub const fn from_run_length(len: usize) -> Self {
        match len {
            1 => Self::Short,
            2 => Self::Medium,
            3 => Self::Long,
            _ => Self::Full,
        }
    }
}

/// A distance phrase key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistanceToken {
    LessThanXSeconds,
    XSeconds,
    HalfAMinute,
    LessThanXMinutes,
    XMinutes,
    AboutXHours,
    XHours,
    XDays,
    AboutXWeeks,
    XWeeks,
    AboutXMonths,
    XMonths,
    AboutXYears,
    XYears,
    OverXYears,
    AlmostXYears,
}

/// Whether a distance lies in the past or the future of its base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Past,
    Future,
}

/// A relative phrase key, chosen by calendar-day distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelativeToken {
    LastWeek,
    Yesterday,
    Today,
    Tomorrow,
    NextWeek,
    Other,
}

/// The data and behavior a locale supplies to the format and parse engines.
///
/// Implementors provide raw name tables; the width and context fallback,
/// and the matching used while parsing, are shared default methods.
pub trait Locale: Send + Sync {
    /// The BCP-47 code of this locale.
    fn code(&self) -> TinyAsciiStr<8>;

    /// Week conventions for this locale.
    fn options(&self) -> LocaleOptions {
        LocaleOptions::default()
    }

    /// Renders `number` as an ordinal, e.g. `21st`.
    fn ordinal_number(&self, number: i64, unit: OrdinalUnit) -> String;

    /// Returns the raw table for a category, or `None` if the locale has no
    /// table at exactly this width and context.
    fn name_table(
        &self,
        category: NameCategory,
        width: NameWidth,
        context: NameContext,
    ) -> Option<&[&str]>;

    /// Renders a distance phrase, with a suffix when `direction` is set.
    fn format_distance(
        &self,
        token: DistanceToken,
        count: i64,
        direction: Option<Direction>,
    ) -> String;

    /// The pattern used to render a date relative to a base date.
    fn relative_pattern(&self, token: RelativeToken) -> &str;

    /// The expansion of `P`-style macros.
    fn date_pattern(&self, width: LongWidth) -> &str;

    /// The expansion of `p`-style macros.
    fn time_pattern(&self, width: LongWidth) -> &str;

    /// The glue between a date and a time pattern, with `{{date}}` and
    /// `{{time}}` placeholders.
    fn date_time_pattern(&self, width: LongWidth) -> &str;

    // ==== Provided methods ====

    /// Resolves the table for a category, falling back through
    /// [`NameWidth::fallback_chain`] and then from standalone to formatting.
    fn resolve_table(
        &self,
        category: NameCategory,
        width: NameWidth,
        context: NameContext,
    ) -> Option<&[&str]> {
        let contexts: &[NameContext] = match context {
            NameContext::Standalone => &[NameContext::Standalone, NameContext::Formatting],
            NameContext::Formatting => &[NameContext::Formatting],
        };
        contexts.iter().find_map(|ctx| {
            width
                .fallback_chain()
                .iter()
                .find_map(|w| self.name_table(category, *w, *ctx))
        })
    }

    /// Looks up the name at `index` in the resolved table.
    fn name(
        &self,
        category: NameCategory,
        index: usize,
        width: NameWidth,
        context: NameContext,
    ) -> Option<&str> {
        self.resolve_table(category, width, context)?
            .get(index)
            .copied()
    }

    fn era_name(&self, era: usize, width: NameWidth) -> Option<&str> {
        self.name(NameCategory::Era, era, width, NameContext::Formatting)
    }

    fn quarter_name(&self, quarter: usize, width: NameWidth, context: NameContext) -> Option<&str> {
        self.name(NameCategory::Quarter, quarter, width, context)
    }

    fn month_name(&self, month: usize, width: NameWidth, context: NameContext) -> Option<&str> {
        self.name(NameCategory::Month, month, width, context)
    }

    fn day_name(&self, day: usize, width: NameWidth, context: NameContext) -> Option<&str> {
        self.name(NameCategory::Day, day, width, context)
    }

    fn day_period_name(
        &self,
        period: DayPeriod,
        width: NameWidth,
        context: NameContext,
    ) -> Option<&str> {
        self.name(NameCategory::DayPeriod, period as usize, width, context)
    }

    /// Matches a name at the start of `text`.
    ///
    /// Returns the table index and the number of bytes consumed.
    fn match_name(
        &self,
        category: NameCategory,
        text: &str,
        width: NameWidth,
        context: NameContext,
    ) -> Option<(usize, usize)> {
        match_prefix(self.resolve_table(category, width, context)?, text)
    }

    /// Matches an ordinal number at the start of `text`.
    ///
    /// Leading ASCII digits are required. The suffix this locale renders for
    /// the same value is consumed too when it follows the digits.
    fn match_ordinal_number(&self, text: &str, unit: OrdinalUnit) -> Option<(i64, usize)> {
        let digits = text.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return None;
        }
        let value: i64 = text[..digits].parse().ok()?;
        let rendered = self.ordinal_number(value, unit);
        let suffix = rendered
            .strip_prefix(&text[..digits])
            .unwrap_or_default();
        let consumed = match strip_prefix_ignore_case(&text[digits..], suffix) {
            Some(len) if !suffix.is_empty() => digits + len,
            _ => digits,
        };
        Some((value, consumed))
    }
}
