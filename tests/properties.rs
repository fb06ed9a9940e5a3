//! Property tests over the calendar model, checked against `icu_calendar`
//! where it has an answer.

use calendrical::{
    arithmetic::{add_days, add_months, sub_months},
    boundaries::{end_of, get_iso_week, get_iso_week_year, start_of, Period},
    difference::difference_in_calendar_days,
    fields::{get_date, get_day, get_day_of_year, get_days_in_month, get_month, get_year},
    format::format,
    options::{FormatOptions, ParseOptions, WeekOptions},
    parsers::parse,
    DateLike, Instant, UtcOffset, Weekday,
};
use icu_calendar::Date;
use proptest::prelude::*;

/// About 273 years either side of the epoch.
const SPAN_MS: i64 = 8_640_000_000_000;

fn instant() -> impl Strategy<Value = Instant> {
    (-SPAN_MS..SPAN_MS).prop_map(Instant::from_epoch_milliseconds)
}

fn offset() -> impl Strategy<Value = UtcOffset> {
    (-48_i16..=56).prop_map(|quarters| UtcOffset::from_minutes(quarters * 15).unwrap())
}

fn weekday() -> impl Strategy<Value = Weekday> {
    prop_oneof![
        Just(Weekday::Sunday),
        Just(Weekday::Monday),
        Just(Weekday::Wednesday),
        Just(Weekday::Saturday),
    ]
}

const PERIODS: [Period; 11] = [
    Period::Second,
    Period::Minute,
    Period::Hour,
    Period::Day,
    Period::Week,
    Period::IsoWeek,
    Period::Month,
    Period::Quarter,
    Period::Year,
    Period::Decade,
    Period::IsoWeekYear,
];

proptest! {
    #[test]
    fn calendar_fields_match_icu(date in instant(), offset in offset()) {
        let date = date.with_offset(offset);
        let year = get_year(&date).unwrap();
        let month = get_month(&date).unwrap();
        let day = get_date(&date).unwrap();
        let icu = Date::try_new_iso(year, month, day).unwrap();

        prop_assert_eq!(get_day_of_year(&date).unwrap(), icu.day_of_year().0);
        prop_assert_eq!(get_days_in_month(&date).unwrap(), icu.days_in_month());
        prop_assert_eq!(get_day(&date).unwrap(), icu.day_of_week() as u8 % 7);

        let week = icu.week_of_year();
        prop_assert_eq!(get_iso_week(&date).unwrap(), week.week_number);
        prop_assert_eq!(get_iso_week_year(&date).unwrap(), week.iso_year);
    }

    #[test]
    fn boundaries_contain_the_date(date in instant(), offset in offset(), starts_on in weekday()) {
        let date = date.with_offset(offset);
        let options = WeekOptions::starting_on(starts_on);
        for period in PERIODS {
            let start = start_of(period, &date, &options);
            let end = end_of(period, &date, &options);
            prop_assert!(start.epoch_milliseconds() <= date.epoch_milliseconds(), "{period:?}");
            prop_assert!(date.epoch_milliseconds() <= end.epoch_milliseconds(), "{period:?}");
            prop_assert_eq!(start_of(period, &start, &options), start);
        }
    }

    #[test]
    fn months_round_trip_below_the_29th(
        year in 1800_i64..2200,
        month in 1_i64..=12,
        day in 1_i64..=28,
        amount in -240_i64..240,
    ) {
        let date = Instant::from_date_time(year, month, day, 12, 30, 0, 0);
        prop_assert_eq!(sub_months(&add_months(&date, amount), amount), date);
    }

    #[test]
    fn calendar_days_count_added_days(date in instant(), offset in offset(), amount in -5000_i64..5000) {
        let date = date.with_offset(offset);
        let moved = add_days(&date, amount);
        prop_assert_eq!(difference_in_calendar_days(&moved, &date), Some(amount));
    }

    #[test]
    fn format_then_parse_is_lossless(ms in -30_000_000_000_000_i64..200_000_000_000_000, offset in offset()) {
        // Years 1019..=8307 keep four digits.
        let date = Instant::from_epoch_milliseconds(ms).with_offset(offset);
        let pattern = "yyyy-MM-dd'T'HH:mm:ss.SSSxxx";
        let text = format(&date, pattern, &FormatOptions::default()).unwrap();
        let reference = Instant::from_epoch_milliseconds(0);
        let parsed = parse(&text, pattern, &reference, &ParseOptions::default()).unwrap();
        prop_assert_eq!(parsed.epoch_milliseconds(), date.epoch_milliseconds(), "{}", text);
    }
}
