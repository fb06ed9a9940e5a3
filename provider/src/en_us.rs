//! Bundled `en-US` locale data.

use alloc::{format, string::String};
use tinystr::{tinystr, TinyAsciiStr};

use crate::locale::{
    Direction, DistanceToken, Locale, LocaleOptions, LongWidth, OrdinalUnit, RelativeToken,
};
use crate::names::{NameCategory, NameContext, NameWidth};

/// American English.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EnUs;

/// The shared `en-US` instance, used when no locale is configured.
pub static EN_US: EnUs = EnUs;

const ERA_NARROW: [&str; 2] = ["B", "A"];
const ERA_ABBREVIATED: [&str; 2] = ["BC", "AD"];
const ERA_WIDE: [&str; 2] = ["Before Christ", "Anno Domini"];

const QUARTER_NARROW: [&str; 4] = ["1", "2", "3", "4"];
const QUARTER_ABBREVIATED: [&str; 4] = ["Q1", "Q2", "Q3", "Q4"];
const QUARTER_WIDE: [&str; 4] = ["1st quarter", "2nd quarter", "3rd quarter", "4th quarter"];

const MONTH_NARROW: [&str; 12] = ["J", "F", "M", "A", "M", "J", "J", "A", "S", "O", "N", "D"];
const MONTH_ABBREVIATED: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const MONTH_WIDE: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const DAY_NARROW: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];
const DAY_SHORT: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];
const DAY_ABBREVIATED: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const DAY_WIDE: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

// Indexed by `DayPeriod`.
const DAY_PERIOD_NARROW: [&str; 8] = [
    "a",
    "p",
    "mi",
    "n",
    "in the morning",
    "in the afternoon",
    "in the evening",
    "at night",
];
const DAY_PERIOD_ABBREVIATED: [&str; 8] = [
    "AM",
    "PM",
    "midnight",
    "noon",
    "in the morning",
    "in the afternoon",
    "in the evening",
    "at night",
];
const DAY_PERIOD_WIDE: [&str; 8] = [
    "a.m.",
    "p.m.",
    "midnight",
    "noon",
    "in the morning",
    "in the afternoon",
    "in the evening",
    "at night",
];
const DAY_PERIOD_STANDALONE_NARROW: [&str; 8] = [
    "a", "p", "mi", "n", "morning", "afternoon", "evening", "night",
];
const DAY_PERIOD_STANDALONE_ABBREVIATED: [&str; 8] = [
    "AM",
    "PM",
    "midnight",
    "noon",
    "morning",
    "afternoon",
    "evening",
    "night",
];
const DAY_PERIOD_STANDALONE_WIDE: [&str; 8] = [
    "a.m.",
    "p.m.",
    "midnight",
    "noon",
    "morning",
    "afternoon",
    "evening",
    "night",
];

impl EnUs {
    fn distance_forms(token: DistanceToken) -> (&'static str, &'static str) {
        match token {
            DistanceToken::LessThanXSeconds => ("less than a second", "less than {{count}} seconds"),
            DistanceToken::XSeconds => ("1 second", "{{count}} seconds"),
            DistanceToken::HalfAMinute => ("half a minute", "half a minute"),
            DistanceToken::LessThanXMinutes => ("less than a minute", "less than {{count}} minutes"),
            DistanceToken::XMinutes => ("1 minute", "{{count}} minutes"),
            DistanceToken::AboutXHours => ("about 1 hour", "about {{count}} hours"),
            DistanceToken::XHours => ("1 hour", "{{count}} hours"),
            DistanceToken::XDays => ("1 day", "{{count}} days"),
            DistanceToken::AboutXWeeks => ("about 1 week", "about {{count}} weeks"),
            DistanceToken::XWeeks => ("1 week", "{{count}} weeks"),
            DistanceToken::AboutXMonths => ("about 1 month", "about {{count}} months"),
            DistanceToken::XMonths => ("1 month", "{{count}} months"),
            DistanceToken::AboutXYears => ("about 1 year", "about {{count}} years"),
            DistanceToken::XYears => ("1 year", "{{count}} years"),
            DistanceToken::OverXYears => ("over 1 year", "over {{count}} years"),
            DistanceToken::AlmostXYears => ("almost 1 year", "almost {{count}} years"),
        }
    }
}

impl Locale for EnUs {
    fn code(&self) -> TinyAsciiStr<8> {
        tinystr!(8, "en-US")
    }

    fn options(&self) -> LocaleOptions {
        LocaleOptions {
            week_starts_on: Some(0),
            first_week_contains_date: Some(1),
        }
    }

    fn ordinal_number(&self, number: i64, _unit: OrdinalUnit) -> String {
        let rem100 = number % 100;
        if !(10..=20).contains(&rem100) {
            match rem100 % 10 {
                1 => return format!("{number}st"),
                2 => return format!("{number}nd"),
                3 => return format!("{number}rd"),
                _ => {}
            }
        }
        format!("{number}th")
    }

    fn name_table(
        &self,
        category: NameCategory,
        width: NameWidth,
        context: NameContext,
    ) -> Option<&[&str]> {
        use NameCategory as C;
        use NameContext::{Formatting, Standalone};
        use NameWidth::{Abbreviated, Narrow, Short, Wide};
        let table: &[&str] = match (category, context, width) {
            (C::Era, Formatting, Narrow) => &ERA_NARROW,
            (C::Era, Formatting, Abbreviated) => &ERA_ABBREVIATED,
            (C::Era, Formatting, Wide) => &ERA_WIDE,
            (C::Quarter, Formatting, Narrow) => &QUARTER_NARROW,
            (C::Quarter, Formatting, Abbreviated) => &QUARTER_ABBREVIATED,
            (C::Quarter, Formatting, Wide) => &QUARTER_WIDE,
            (C::Month, Formatting, Narrow) => &MONTH_NARROW,
            (C::Month, Formatting, Abbreviated) => &MONTH_ABBREVIATED,
            (C::Month, Formatting, Wide) => &MONTH_WIDE,
            (C::Day, Formatting, Narrow) => &DAY_NARROW,
            (C::Day, Formatting, Short) => &DAY_SHORT,
            (C::Day, Formatting, Abbreviated) => &DAY_ABBREVIATED,
            (C::Day, Formatting, Wide) => &DAY_WIDE,
            (C::DayPeriod, Formatting, Narrow) => &DAY_PERIOD_NARROW,
            (C::DayPeriod, Formatting, Abbreviated) => &DAY_PERIOD_ABBREVIATED,
            (C::DayPeriod, Formatting, Wide) => &DAY_PERIOD_WIDE,
            (C::DayPeriod, Standalone, Narrow) => &DAY_PERIOD_STANDALONE_NARROW,
            (C::DayPeriod, Standalone, Abbreviated) => &DAY_PERIOD_STANDALONE_ABBREVIATED,
            (C::DayPeriod, Standalone, Wide) => &DAY_PERIOD_STANDALONE_WIDE,
            _ => return None,
        };
        Some(table)
    }

    fn format_distance(
        &self,
        token: DistanceToken,
        count: i64,
        direction: Option<Direction>,
    ) -> String {
        let (one, other) = Self::distance_forms(token);
        let phrase = if count == 1 {
            String::from(one)
        } else {
            other.replace("{{count}}", &format!("{count}"))
        };
        match direction {
            Some(Direction::Future) => format!("in {phrase}"),
            Some(Direction::Past) => format!("{phrase} ago"),
            None => phrase,
        }
    }

    fn relative_pattern(&self, token: RelativeToken) -> &str {
        match token {
            RelativeToken::LastWeek => "'last' eeee 'at' p",
            RelativeToken::Yesterday => "'yesterday at' p",
            RelativeToken::Today => "'today at' p",
            RelativeToken::Tomorrow => "'tomorrow at' p",
            RelativeToken::NextWeek => "eeee 'at' p",
            RelativeToken::Other => "P",
        }
    }

    fn date_pattern(&self, width: LongWidth) -> &str {
        match width {
            LongWidth::Full => "EEEE, MMMM do, y",
            LongWidth::Long => "MMMM do, y",
            LongWidth::Medium => "MMM d, y",
            LongWidth::Short => "MM/dd/yyyy",
        }
    }

    fn time_pattern(&self, width: LongWidth) -> &str {
        match width {
            LongWidth::Full => "h:mm:ss a zzzz",
            LongWidth::Long => "h:mm:ss a z",
            LongWidth::Medium => "h:mm:ss a",
            LongWidth::Short => "h:mm a",
        }
    }

    fn date_time_pattern(&self, width: LongWidth) -> &str {
        match width {
            LongWidth::Full | LongWidth::Long => "{{date}} 'at' {{time}}",
            LongWidth::Medium | LongWidth::Short => "{{date}}, {{time}}",
        }
    }
}
