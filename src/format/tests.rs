use crate::{
    error::ErrorKind,
    format::{
        format, format_distance, format_distance_strict, format_duration, format_iso,
        format_relative,
    },
    options::{
        DistanceOptions, DistanceStrictOptions, DistanceUnit, FormatDurationOptions,
        FormatOptions, IsoFormat, IsoFormatOptions, IsoRepresentation,
    },
    Duration, Instant, RoundingMode, UtcOffset, Weekday,
};

/// Friday, April 4th 1986, 10:32:55.123 UTC.
fn sample() -> Instant {
    Instant::from_date_time(1986, 4, 4, 10, 32, 55, 123)
}

fn render(date: &Instant, pattern: &str) -> String {
    format(date, pattern, &FormatOptions::default()).unwrap()
}

fn at(hour: i64, minute: i64) -> Instant {
    Instant::from_date_time(1986, 4, 4, hour, minute, 0, 0)
}

#[test]
fn eras() {
    assert_eq!(
        render(&sample(), "G GG GGG GGGG GGGGG"),
        "AD AD AD Anno Domini A"
    );
    let before_christ = Instant::from_date_time(0, 1, 1, 0, 0, 0, 0);
    assert_eq!(
        render(&before_christ, "G GGGG GGGGG y"),
        "BC Before Christ B 1"
    );
}

#[test]
fn years() {
    let date = sample();
    assert_eq!(
        render(&date, "y yo yy yyy yyyy yyyyy"),
        "1986 1986th 86 1986 1986 01986"
    );
    let early = Instant::from_date_time(5, 1, 1, 0, 0, 0, 0);
    assert_eq!(render(&early, "y yy yyy"), "5 05 005");
    assert_eq!(render(&date, "R RR RRRRR"), "1986 1986 01986");
    assert_eq!(render(&date, "u uu uuuuu"), "1986 1986 01986");

    let options = FormatOptions {
        use_additional_week_year_tokens: true,
        ..FormatOptions::default()
    };
    assert_eq!(
        format(&date, "Y Yo YY YYYY", &options).unwrap(),
        "1986 1986th 86 1986"
    );
}

#[test]
fn week_year_at_the_turn_of_the_year() {
    // Sunday, December 28th 2014, already in the first local week of 2015.
    let date = Instant::from_date_time(2014, 12, 28, 0, 0, 0, 0);
    assert_eq!(render(&date, "Y w"), "2015 1");
    // The ISO week belongs to 2014 until the Monday after.
    assert_eq!(render(&date, "R I"), "2014 52");
}

#[test]
fn quarters_and_months() {
    let date = sample();
    assert_eq!(
        render(&date, "Q Qo QQ QQQ QQQQ QQQQQ"),
        "2 2nd 02 Q2 2nd quarter 2"
    );
    assert_eq!(
        render(&date, "q qo qq qqq qqqq qqqqq"),
        "2 2nd 02 Q2 2nd quarter 2"
    );
    assert_eq!(
        render(&date, "M Mo MM MMM MMMM MMMMM"),
        "4 4th 04 Apr April A"
    );
    assert_eq!(
        render(&date, "L Lo LL LLL LLLL LLLLL"),
        "4 4th 04 Apr April A"
    );
}

#[test]
fn weeks_and_days() {
    let date = sample();
    assert_eq!(render(&date, "w wo ww"), "14 14th 14");
    assert_eq!(render(&date, "I Io II"), "14 14th 14");
    assert_eq!(render(&date, "d do dd"), "4 4th 04");

    let options = FormatOptions {
        use_additional_day_of_year_tokens: true,
        ..FormatOptions::default()
    };
    assert_eq!(
        format(&date, "D Do DD DDD DDDD", &options).unwrap(),
        "94 94th 94 094 0094"
    );
}

#[test]
fn weekdays() {
    let date = sample();
    assert_eq!(
        render(&date, "E EE EEE EEEE EEEEE EEEEEE"),
        "Fri Fri Fri Friday F Fr"
    );
    assert_eq!(
        render(&date, "e eo ee eee eeee eeeee eeeeee"),
        "6 6th 06 Fri Friday F Fr"
    );
    assert_eq!(render(&date, "c co cc cccc"), "6 6th 06 Friday");
    assert_eq!(render(&date, "i io ii iii iiii"), "5 5th 05 Fri Friday");

    let monday_first = FormatOptions {
        week_starts_on: Some(Weekday::Monday),
        ..FormatOptions::default()
    };
    assert_eq!(format(&date, "e c", &monday_first).unwrap(), "5 5");

    let sunday = Instant::from_date_time(1986, 4, 6, 0, 0, 0, 0);
    assert_eq!(render(&sunday, "i e"), "7 1");
}

#[test]
fn day_periods() {
    assert_eq!(render(&at(10, 32), "a aa aaa aaaa aaaaa"), "AM AM am a.m. a");
    assert_eq!(render(&at(13, 0), "a aaa aaaa"), "PM pm p.m.");
    assert_eq!(render(&at(12, 0), "b bbbb bbbbb"), "noon noon n");
    assert_eq!(render(&at(0, 0), "b bbbb"), "midnight midnight");
    assert_eq!(render(&at(14, 0), "b"), "PM");
    assert_eq!(render(&at(10, 32), "B"), "in the morning");
    assert_eq!(render(&at(13, 0), "B"), "in the afternoon");
    assert_eq!(render(&at(17, 0), "B"), "in the evening");
    assert_eq!(render(&at(2, 0), "B"), "at night");
}

#[test]
fn hours_minutes_seconds() {
    assert_eq!(
        render(&at(0, 0), "h hh H HH K KK k kk"),
        "12 12 0 00 0 00 24 24"
    );
    assert_eq!(render(&at(13, 5), "h H K k ho"), "1 13 1 13 1st");
    assert_eq!(
        render(&sample(), "m mo mm s so ss"),
        "32 32nd 32 55 55th 55"
    );
}

#[test]
fn fractions_of_a_second() {
    assert_eq!(render(&sample(), "S SS SSS SSSS"), "1 12 123 1230");
    let date = Instant::from_date_time(1986, 4, 4, 0, 0, 0, 7);
    assert_eq!(render(&date, "S SS SSS"), "0 00 007");
}

#[test]
fn offsets() {
    let date = sample();
    assert_eq!(render(&date, "X XX XXX XXXX XXXXX"), "Z Z Z Z Z");
    assert_eq!(
        render(&date, "x xx xxx xxxx xxxxx"),
        "+00 +0000 +00:00 +0000 +00:00"
    );
    assert_eq!(render(&date, "O OOOO"), "GMT+0 GMT+00:00");

    let india = date.with_offset(UtcOffset::from_minutes(330).unwrap());
    assert_eq!(render(&india, "X XX XXX"), "+0530 +0530 +05:30");
    assert_eq!(render(&india, "O OOOO z zzzz"), "GMT+5:30 GMT+05:30 GMT+5:30 GMT+05:30");
    assert_eq!(render(&india, "HH:mm"), "16:02");

    let west = date.with_offset(UtcOffset::from_minutes(-120).unwrap());
    assert_eq!(render(&west, "x X O"), "-02 -02 GMT-2");
}

#[test]
fn timestamps() {
    assert_eq!(render(&sample(), "t T"), "512994775 512994775123");
    let before_epoch = Instant::from_epoch_milliseconds(-1_500);
    assert_eq!(render(&before_epoch, "t T"), "-1 -1500");
}

#[test]
fn quotes_and_literals() {
    let date = sample();
    assert_eq!(render(&date, "h 'o''clock'"), "10 o'clock");
    assert_eq!(render(&date, "''"), "'");
    assert_eq!(render(&date, "'yyyy' yyyy"), "yyyy 1986");
    assert_eq!(render(&date, "yyyy-MM-dd'T'HH:mm"), "1986-04-04T10:32");
    assert_eq!(render(&date, "yyyy 12"), "1986 12");
    // An unterminated quote runs to the end of the pattern.
    assert_eq!(render(&date, "d 'of the month"), "4 of the month");
}

#[test]
fn long_formats() {
    let date = sample();
    assert_eq!(render(&date, "P"), "04/04/1986");
    assert_eq!(render(&date, "PP"), "Apr 4, 1986");
    assert_eq!(render(&date, "PPP"), "April 4th, 1986");
    assert_eq!(render(&date, "PPPP"), "Friday, April 4th, 1986");
    assert_eq!(render(&date, "p"), "10:32 AM");
    assert_eq!(render(&date, "pp"), "10:32:55 AM");
    assert_eq!(render(&date, "ppp"), "10:32:55 AM GMT+0");
    assert_eq!(render(&date, "pppp"), "10:32:55 AM GMT+00:00");
    assert_eq!(render(&date, "Pp"), "04/04/1986, 10:32 AM");
    assert_eq!(
        render(&date, "PPPPpppp"),
        "Friday, April 4th, 1986 at 10:32:55 AM GMT+00:00"
    );
}

#[test]
fn unescaped_letters_are_rejected() {
    let err = format(&sample(), "yyyy-MM-dd junk", &FormatOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Pattern);
    assert_eq!(
        err.message(),
        "Format string contains an unescaped latin alphabet character `j`"
    );
}

#[test]
fn protected_tokens_need_an_opt_in() {
    let date = sample();
    let options = FormatOptions::default();
    for pattern in ["YYYY-MM-dd", "YY", "D", "DD MMMM"] {
        let err = format(&date, pattern, &options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Pattern, "{pattern}");
    }
    let err = format(&date, "YYYY-MM-dd", &options).unwrap_err();
    assert!(err.message().starts_with("Use `yyyy` instead of `YYYY`"));

    // Other run lengths only warn.
    assert_eq!(format(&date, "DDD", &options).unwrap(), "094");
    assert_eq!(format(&date, "Y", &options).unwrap(), "1986");
}

#[test]
fn invalid_dates_are_a_range_error() {
    let err = format(&Instant::invalid(), "yyyy", &FormatOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Range);
    assert_eq!(err.message(), "Invalid time value");
}

// ==== Distances ====

fn distance(date: &Instant, base: &Instant, options: &DistanceOptions<'_>) -> String {
    format_distance(date, base, options).unwrap()
}

#[test]
fn distance_in_words() {
    let base = Instant::from_date_time(2014, 1, 1, 0, 0, 0, 0);
    let options = DistanceOptions::default();
    let after = |days: i64, hours, minutes, seconds| {
        Instant::from_date_time(2014, 1, 1 + days, hours, minutes, seconds, 0)
    };

    assert_eq!(distance(&base, &base, &options), "less than a minute");
    assert_eq!(distance(&after(0, 0, 1, 0), &base, &options), "1 minute");
    assert_eq!(distance(&after(0, 0, 44, 0), &base, &options), "44 minutes");
    assert_eq!(distance(&after(0, 1, 0, 0), &base, &options), "about 1 hour");
    assert_eq!(distance(&after(0, 5, 0, 0), &base, &options), "about 5 hours");
    assert_eq!(distance(&after(1, 0, 0, 0), &base, &options), "1 day");
    assert_eq!(distance(&after(3, 0, 0, 0), &base, &options), "3 days");
    assert_eq!(distance(&after(35, 0, 0, 0), &base, &options), "about 1 month");

    let in_year = |year, month| Instant::from_date_time(year, month, 1, 0, 0, 0, 0);
    assert_eq!(distance(&in_year(2014, 4), &base, &options), "3 months");
    assert_eq!(distance(&in_year(2015, 2), &base, &options), "about 1 year");
    assert_eq!(distance(&in_year(2015, 5), &base, &options), "over 1 year");
    assert_eq!(distance(&in_year(2015, 11), &base, &options), "almost 2 years");
}

#[test]
fn distance_with_seconds() {
    let base = Instant::from_date_time(2014, 1, 1, 0, 0, 0, 0);
    let options = DistanceOptions {
        include_seconds: true,
        ..DistanceOptions::default()
    };
    let after = |seconds| Instant::from_date_time(2014, 1, 1, 0, 0, seconds, 0);

    assert_eq!(distance(&after(3), &base, &options), "less than 5 seconds");
    assert_eq!(distance(&after(7), &base, &options), "less than 10 seconds");
    assert_eq!(distance(&after(15), &base, &options), "less than 20 seconds");
    assert_eq!(distance(&after(25), &base, &options), "half a minute");
    assert_eq!(distance(&after(45), &base, &options), "less than a minute");
    assert_eq!(distance(&after(70), &base, &options), "1 minute");
}

#[test]
fn distance_suffixes() {
    let base = Instant::from_date_time(2014, 1, 1, 0, 0, 0, 0);
    let later = Instant::from_date_time(2014, 1, 1, 1, 0, 0, 0);
    let options = DistanceOptions {
        add_suffix: true,
        ..DistanceOptions::default()
    };
    assert_eq!(distance(&later, &base, &options), "in about 1 hour");
    assert_eq!(distance(&base, &later, &options), "about 1 hour ago");

    let err = format_distance(&Instant::invalid(), &base, &options).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Range);
}

#[test]
fn strict_distance() {
    let base = Instant::from_date_time(2014, 1, 1, 0, 0, 0, 0);
    let options = DistanceStrictOptions::default();
    let strict = |date: &Instant, options: &DistanceStrictOptions<'_>| {
        format_distance_strict(date, &base, options).unwrap()
    };

    let seconds = Instant::from_date_time(2014, 1, 1, 0, 0, 15, 0);
    assert_eq!(strict(&seconds, &options), "15 seconds");
    let hours = Instant::from_date_time(2014, 1, 1, 2, 0, 0, 0);
    assert_eq!(strict(&hours, &options), "2 hours");

    let in_minutes = DistanceStrictOptions {
        unit: Some(DistanceUnit::Minute),
        ..options
    };
    assert_eq!(strict(&hours, &in_minutes), "120 minutes");

    // 361 days round to twelve months, shown as a year unless months are
    // forced.
    let almost_a_year = Instant::from_date_time(2014, 12, 28, 0, 0, 0, 0);
    assert_eq!(strict(&almost_a_year, &options), "1 year");
    let in_months = DistanceStrictOptions {
        unit: Some(DistanceUnit::Month),
        ..options
    };
    assert_eq!(strict(&almost_a_year, &in_months), "12 months");

    let ninety_minutes = Instant::from_date_time(2014, 1, 1, 1, 30, 0, 0);
    assert_eq!(strict(&ninety_minutes, &options), "2 hours");
    let floor = DistanceStrictOptions {
        rounding_mode: RoundingMode::Floor,
        ..options
    };
    assert_eq!(strict(&ninety_minutes, &floor), "1 hour");

    let suffixed = DistanceStrictOptions {
        add_suffix: true,
        ..options
    };
    assert_eq!(strict(&hours, &suffixed), "in 2 hours");
    assert_eq!(
        format_distance_strict(&base, &hours, &suffixed).unwrap(),
        "2 hours ago"
    );
}

#[test]
fn durations() {
    let duration = Duration {
        years: Some(1),
        hours: Some(2),
        minutes: Some(0),
        ..Duration::default()
    };
    assert_eq!(
        format_duration(&duration, &FormatDurationOptions::default()),
        "1 year 2 hours"
    );
}

// ==== ISO 8601 ====

#[test]
fn iso_representations() {
    let date = Instant::from_date_time(2019, 9, 18, 19, 0, 52, 234);
    let iso = |format, representation| {
        format_iso(
            &date,
            &IsoFormatOptions {
                format,
                representation,
            },
        )
        .unwrap()
    };

    assert_eq!(
        iso(IsoFormat::Extended, IsoRepresentation::Complete),
        "2019-09-18T19:00:52Z"
    );
    assert_eq!(
        iso(IsoFormat::Basic, IsoRepresentation::Complete),
        "20190918T190052Z"
    );
    assert_eq!(iso(IsoFormat::Extended, IsoRepresentation::Date), "2019-09-18");
    assert_eq!(iso(IsoFormat::Extended, IsoRepresentation::Time), "19:00:52Z");
    assert_eq!(iso(IsoFormat::Basic, IsoRepresentation::Time), "190052Z");
}

#[test]
fn iso_offsets_and_years() {
    let offset = UtcOffset::from_minutes(-330).unwrap();
    let date = Instant::from_local(offset, 33, 1, 2, 3, 4, 5, 0);
    let basic = IsoFormatOptions {
        format: IsoFormat::Basic,
        ..IsoFormatOptions::default()
    };
    assert_eq!(
        format_iso(&date, &IsoFormatOptions::default()).unwrap(),
        "0033-01-02T03:04:05-05:30"
    );
    assert_eq!(format_iso(&date, &basic).unwrap(), "00330102T030405-05:30");

    let err = format_iso(&Instant::invalid(), &basic).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Range);
}

// ==== Relative ====

#[test]
fn relative_phrases() {
    let base = Instant::from_date_time(2014, 2, 11, 12, 0, 0, 0);
    let options = FormatOptions::default();
    let relative = |date: Instant| format_relative(&date, &base, &options).unwrap();

    assert_eq!(
        relative(Instant::from_date_time(2014, 2, 8, 9, 0, 0, 0)),
        "last Saturday at 9:00 AM"
    );
    assert_eq!(
        relative(Instant::from_date_time(2014, 2, 11, 8, 0, 0, 0)),
        "today at 8:00 AM"
    );
    assert_eq!(
        relative(Instant::from_date_time(2014, 2, 12, 8, 0, 0, 0)),
        "tomorrow at 8:00 AM"
    );
    assert_eq!(
        relative(Instant::from_date_time(2014, 2, 14, 15, 0, 0, 0)),
        "Friday at 3:00 PM"
    );
    assert_eq!(
        relative(Instant::from_date_time(2014, 3, 1, 0, 0, 0, 0)),
        "03/01/2014"
    );

    let err = format_relative(&Instant::invalid(), &base, &options).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Range);
}
