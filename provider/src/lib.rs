//! Locale data for `calendrical`
//!
//! This crate defines the [`Locale`] contract consumed by the format and
//! parse engines and bundles an `en-US` implementation of it.
//!
//! ```rust
//! use locale_provider::{Locale, NameContext, NameWidth, EN_US};
//!
//! assert_eq!(EN_US.month_name(0, NameWidth::Wide, NameContext::Formatting), Some("January"));
//! // No standalone tables: falls back to the formatting names.
//! assert_eq!(EN_US.month_name(0, NameWidth::Abbreviated, NameContext::Standalone), Some("Jan"));
//! ```
#![no_std]
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]

extern crate alloc;

mod en_us;
mod locale;
pub mod names;

pub use en_us::{EnUs, EN_US};
pub use locale::{
    Direction, DistanceToken, Locale, LocaleOptions, LongWidth, OrdinalUnit, RelativeToken,
};
pub use names::{DayPeriod, NameCategory, NameContext, NameWidth};

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;

    #[test]
    fn ordinal_numbers() {
        let cases = [
            (1, "1st"),
            (2, "2nd"),
            (3, "3rd"),
            (4, "4th"),
            (11, "11th"),
            (12, "12th"),
            (13, "13th"),
            (21, "21st"),
            (102, "102nd"),
            (111, "111th"),
        ];
        for (n, expected) in cases {
            assert_eq!(EN_US.ordinal_number(n, OrdinalUnit::Date), expected);
        }
    }

    #[test]
    fn width_fallback() {
        // Eras have no short table.
        assert_eq!(EN_US.era_name(1, NameWidth::Short), Some("AD"));
        assert_eq!(
            EN_US.day_name(2, NameWidth::Short, NameContext::Standalone),
            Some("Tu")
        );
        assert_eq!(
            EN_US.quarter_name(3, NameWidth::Wide, NameContext::Formatting),
            Some("4th quarter")
        );
        assert_eq!(EN_US.month_name(12, NameWidth::Wide, NameContext::Formatting), None);
    }

    #[test]
    fn standalone_day_periods() {
        assert_eq!(
            EN_US.day_period_name(DayPeriod::Morning, NameWidth::Wide, NameContext::Standalone),
            Some("morning")
        );
        assert_eq!(
            EN_US.day_period_name(DayPeriod::Morning, NameWidth::Wide, NameContext::Formatting),
            Some("in the morning")
        );
    }

    #[test]
    fn ordinal_matching() {
        assert_eq!(EN_US.match_ordinal_number("21st of", OrdinalUnit::Date), Some((21, 4)));
        assert_eq!(EN_US.match_ordinal_number("21ST", OrdinalUnit::Date), Some((21, 4)));
        assert_eq!(EN_US.match_ordinal_number("21 of", OrdinalUnit::Date), Some((21, 2)));
        assert_eq!(EN_US.match_ordinal_number("st", OrdinalUnit::Date), None);
    }

    #[test]
    fn distance_phrases() {
        let plain: String = EN_US.format_distance(DistanceToken::XDays, 3, None);
        assert_eq!(plain, "3 days");
        assert_eq!(
            EN_US.format_distance(DistanceToken::AboutXHours, 1, Some(Direction::Future)),
            "in about 1 hour"
        );
        assert_eq!(
            EN_US.format_distance(DistanceToken::HalfAMinute, 0, Some(Direction::Past)),
            "half a minute ago"
        );
    }

    #[test]
    fn locale_code() {
        assert_eq!(EN_US.code().as_str(), "en-US");
    }
}
