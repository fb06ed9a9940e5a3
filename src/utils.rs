//! Utility date and time equations for the proleptic Gregorian calendar.
//!
//! Conversions between epoch days and year/month/day follow the
//! Neri-Schneider integer equations.

// NOTE: valid instants span epoch_days.abs() <= 100_000_001, plus one day of
// local offset. The computational shift must cover year -271_822.
//
// (271_822 / 400).ceil() = 680

const EPOCH_COMPUTATIONAL_RATA_DIE: i64 = 719_468;

const DAYS_IN_A_400Y_CYCLE: u32 = 146_097;
const TWO_POWER_THIRTY_NINE: u64 = 549_755_813_888; // 2^39 constant
const TWO_POWER_SIXTEEN: u32 = 65_536; // 2^16 constant

const SHIFTS: i64 = 680;

/// Years outside of this range can never balance into a valid instant.
pub(crate) const MAX_BALANCE_YEAR: i64 = 1_000_000;

pub(crate) const MS_PER_SECOND: i64 = 1_000;
pub(crate) const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
pub(crate) const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
pub(crate) const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;
pub(crate) const MS_PER_WEEK: i64 = 7 * MS_PER_DAY;

/// Returns the epoch day of a year, month, and day.
///
/// `month` and `day` are balanced, so month 13 is January of the next year
/// and day 0 is the last day of the prior month. Returns `None` on
/// overflow.
pub(crate) fn epoch_days_from_gregorian_date(year: i64, month: i64, day: i64) -> Option<i64> {
    let month_index = month.checked_sub(1)?;
    let year = year.checked_add(month_index.div_euclid(12))?;
    if !(-MAX_BALANCE_YEAR..=MAX_BALANCE_YEAR).contains(&year) {
        return None;
    }
    let month = month_index.rem_euclid(12) + 1;

    // Computational calendar: March is month 3, January and February are
    // months 13 and 14 of the prior year.
    let j = i64::from(month <= 2);
    let comp_year = year - j;
    let comp_month = month + 12 * j;
    let century = comp_year.div_euclid(100);
    let y_star = (1461 * comp_year).div_euclid(4) - century + century.div_euclid(4);
    let m_star = (979 * comp_month - 2919).div_euclid(32);

    (y_star + m_star - EPOCH_COMPUTATIONAL_RATA_DIE).checked_add(day.checked_sub(1)?)
}

// Returns Y, M, D, N_y
const fn computational_ymd(rata_die: u32) -> (u32, u32, u32, u32) {
    let n_one = 4 * rata_die + 3;
    let century = n_one / DAYS_IN_A_400Y_CYCLE;
    let n_two = (n_one % DAYS_IN_A_400Y_CYCLE) | 3;
    let year_of_century = ((376_287_347 * n_two as u64) / TWO_POWER_THIRTY_NINE) as u32;
    let day_of_year = (n_two - 1461 * year_of_century) / 4;
    let n_three = 2141 * day_of_year + 197_913;
    let month = n_three / TWO_POWER_SIXTEEN;
    let day = (n_three % TWO_POWER_SIXTEEN) / 2141;
    (100 * century + year_of_century, month, day, day_of_year)
}

/// Returns the Gregorian year, month, and day of an epoch day.
pub(crate) const fn gregorian_ymd_from_epoch_days(epoch_days: i64) -> (i32, u8, u8) {
    let rata_die_shift_constant =
        EPOCH_COMPUTATIONAL_RATA_DIE + DAYS_IN_A_400Y_CYCLE as i64 * SHIFTS;
    let (year, month, day, day_of_year) =
        computational_ymd((epoch_days + rata_die_shift_constant) as u32);
    let j = (day_of_year >= 306) as u32;
    let year = (year + j) as i64 - 400 * SHIFTS;
    ((year) as i32, (month - 12 * j) as u8, (day + 1) as u8)
}

/// Returns the weekday of an epoch day, `0 = Sunday`.
pub(crate) const fn weekday_from_epoch_days(epoch_days: i64) -> u8 {
    // 1970-01-01 was a Thursday.
    ((epoch_days.rem_euclid(7) + 4) % 7) as u8
}

pub(crate) const fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

pub(crate) const fn days_in_year(year: i32) -> u16 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

pub(crate) const fn iso_days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ if is_leap_year(year) => 29,
        _ => 28,
    }
}

/// Returns the 1-based ordinal day of the year.
pub(crate) const fn day_of_year(year: i32, month: u8, day: u8) -> u16 {
    const CUMULATIVE: [u16; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];
    let leap_day = (month > 2 && is_leap_year(year)) as u16;
    CUMULATIVE[(month - 1) as usize] + leap_day + day as u16
}

/// Euclidean division returning quotient and remainder.
pub(crate) const fn div_mod(dividend: i64, divisor: i64) -> (i64, i64) {
    (dividend.div_euclid(divisor), dividend.rem_euclid(divisor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_day_round_trips() {
        let cases = [
            (0, (1970, 1, 1)),
            (-1, (1969, 12, 31)),
            (11_017, (2000, 3, 1)),
            (16_101, (2014, 1, 31)),
            (-719_528, (0, 1, 1)),
            (100_000_000, (275_760, 9, 13)),
            (-100_000_000, (-271_821, 4, 20)),
        ];
        for (days, (y, m, d)) in cases {
            assert_eq!(gregorian_ymd_from_epoch_days(days), (y, m, d), "{days}");
            assert_eq!(
                epoch_days_from_gregorian_date(i64::from(y), i64::from(m), i64::from(d)),
                Some(days)
            );
        }
    }

    #[test]
    fn balancing_month_and_day() {
        // 2014-13-01 is 2015-01-01; day 0 is the last day of the prior month.
        assert_eq!(
            epoch_days_from_gregorian_date(2014, 13, 1),
            epoch_days_from_gregorian_date(2015, 1, 1)
        );
        assert_eq!(
            epoch_days_from_gregorian_date(2014, 3, 0),
            epoch_days_from_gregorian_date(2014, 2, 28)
        );
        assert_eq!(
            epoch_days_from_gregorian_date(2014, -1, 1),
            epoch_days_from_gregorian_date(2013, 11, 1)
        );
        assert_eq!(epoch_days_from_gregorian_date(i64::MAX, 1, 1), None);
        assert_eq!(epoch_days_from_gregorian_date(2000, i64::MIN, 1), None);
    }

    #[test]
    fn weekdays() {
        // Thursday
        assert_eq!(weekday_from_epoch_days(0), 4);
        // 2014-07-20 was a Sunday.
        let days = epoch_days_from_gregorian_date(2014, 7, 20).unwrap();
        assert_eq!(weekday_from_epoch_days(days), 0);
        assert_eq!(weekday_from_epoch_days(-1), 3);
    }

    #[test]
    fn agrees_with_icu4x() {
        for year in [-400, -1, 0, 1, 1600, 1900, 1999, 2000, 2004, 2023, 2100, 9999] {
            for month in 1..=12u8 {
                let date = icu_calendar::Date::try_new_iso(year, month, 1).unwrap();
                assert_eq!(iso_days_in_month(year, month), date.days_in_month());
                let last = iso_days_in_month(year, month);
                for day in [1, 15, last] {
                    let date = icu_calendar::Date::try_new_iso(year, month, day).unwrap();
                    assert_eq!(day_of_year(year, month, day), date.day_of_year().0);
                    let epoch_days = epoch_days_from_gregorian_date(
                        i64::from(year),
                        i64::from(month),
                        i64::from(day),
                    )
                    .unwrap();
                    // ICU4X numbers weekdays Monday = 1 through Sunday = 7.
                    assert_eq!(
                        weekday_from_epoch_days(epoch_days),
                        (date.day_of_week() as u8) % 7
                    );
                }
            }
            let jan = icu_calendar::Date::try_new_iso(year, 1, 1).unwrap();
            assert_eq!(days_in_year(year), jan.days_in_year());
            assert_eq!(is_leap_year(year), jan.is_in_leap_year());
        }
    }
}
