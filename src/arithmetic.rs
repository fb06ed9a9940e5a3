//! Calendar arithmetic.
//!
//! Month-based units clamp the day of the month to the length of the
//! destination month. Day-based units keep the local time of day. Clock
//! units are exact millisecond offsets. Any overflow yields an invalid
//! date.

use crate::{
    boundaries::get_iso_week_year,
    fields::{
        days_in_local_month, from_local_fields, local_epoch_days, local_fields, map_local,
        set_iso_week_year, with_epoch,
    },
    iso::LocalFields,
    utils::{self, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND},
    DateLike, Duration,
};

/// Adds a [`Duration`]: months (with years) first, then days (with weeks),
/// then every clock unit as one millisecond offset.
pub fn add<D: DateLike>(date: &D, duration: &Duration) -> D {
    let result = add_duration(date, duration);
    result.unwrap_or_else(|| date.construct_like(None))
}

fn add_duration<D: DateLike>(date: &D, duration: &Duration) -> Option<D> {
    let get = |field: Option<i64>| field.unwrap_or_default();

    let months = get(duration.years)
        .checked_mul(12)?
        .checked_add(get(duration.months))?;
    let with_months = if months == 0 {
        date.clone()
    } else {
        add_months(date, months)
    };

    let days = get(duration.weeks)
        .checked_mul(7)?
        .checked_add(get(duration.days))?;
    let with_days = if days == 0 {
        with_months
    } else {
        add_days(&with_months, days)
    };

    let milliseconds = get(duration.hours)
        .checked_mul(MS_PER_HOUR)?
        .checked_add(get(duration.minutes).checked_mul(MS_PER_MINUTE)?)?
        .checked_add(get(duration.seconds).checked_mul(MS_PER_SECOND)?)?
        .checked_add(get(duration.milliseconds))?;
    Some(add_milliseconds(&with_days, milliseconds))
}

/// Subtracts a [`Duration`], i.e. adds it with every field negated.
pub fn sub<D: DateLike>(date: &D, duration: &Duration) -> D {
    match duration.negated() {
        Some(negated) => add(date, &negated),
        None => date.construct_like(None),
    }
}

pub fn add_years<D: DateLike>(date: &D, amount: i64) -> D {
    match amount.checked_mul(12) {
        Some(months) => add_months(date, months),
        None => date.construct_like(None),
    }
}

pub fn add_quarters<D: DateLike>(date: &D, amount: i64) -> D {
    match amount.checked_mul(3) {
        Some(months) => add_months(date, months),
        None => date.construct_like(None),
    }
}

/// Adds months, clamping to the last day of the destination month.
///
/// ```rust
/// use calendrical::{arithmetic::add_months, fields::get_date, Instant};
///
/// let date = Instant::from_date_time(2016, 1, 31, 0, 0, 0, 0);
/// assert_eq!(get_date(&add_months(&date, 1)), Some(29));
/// ```
pub fn add_months<D: DateLike>(date: &D, amount: i64) -> D {
    let Some(fields) = local_fields(date) else {
        return date.construct_like(None);
    };
    if amount == 0 {
        return date.clone();
    }
    let destination = fields
        .month
        .checked_add(amount)
        .and_then(|month| Some((month, days_in_local_month(fields.year, month)?)));
    match destination {
        Some((month, days)) => from_local_fields(
            date,
            LocalFields {
                month,
                day: fields.day.min(days),
                ..fields
            },
        ),
        None => date.construct_like(None),
    }
}

pub fn add_weeks<D: DateLike>(date: &D, amount: i64) -> D {
    match amount.checked_mul(7) {
        Some(days) => add_days(date, days),
        None => date.construct_like(None),
    }
}

/// Adds calendar days, keeping the local time of day.
pub fn add_days<D: DateLike>(date: &D, amount: i64) -> D {
    if amount == 0 {
        return date.clone();
    }
    map_local(date, |f| LocalFields {
        day: f.day.saturating_add(amount),
        ..f
    })
}

pub fn add_hours<D: DateLike>(date: &D, amount: i64) -> D {
    add_scaled_milliseconds(date, amount, MS_PER_HOUR)
}

pub fn add_minutes<D: DateLike>(date: &D, amount: i64) -> D {
    add_scaled_milliseconds(date, amount, MS_PER_MINUTE)
}

pub fn add_seconds<D: DateLike>(date: &D, amount: i64) -> D {
    add_scaled_milliseconds(date, amount, MS_PER_SECOND)
}

pub fn add_milliseconds<D: DateLike>(date: &D, amount: i64) -> D {
    add_scaled_milliseconds(date, amount, 1)
}

fn add_scaled_milliseconds<D: DateLike>(date: &D, amount: i64, unit: i64) -> D {
    let epoch = date
        .epoch_milliseconds()
        .and_then(|ms| ms.checked_add(amount.checked_mul(unit)?));
    with_epoch(date, epoch)
}

/// Adds business days, skipping Saturdays and Sundays.
///
/// A date on a weekend that lands on a weekend again is moved to the
/// nearest business day before it in the direction of travel. Adding zero
/// returns the date unchanged, even on a weekend.
pub fn add_business_days<D: DateLike>(date: &D, amount: i64) -> D {
    let offset = local_epoch_days(date).and_then(|start| {
        business_day_target(start, amount).and_then(|target| target.checked_sub(start))
    });
    let Some(offset) = offset else {
        return with_epoch(date, None);
    };
    map_local(date, |f| LocalFields {
        day: f.day.saturating_add(offset),
        ..f
    })
}

/// The epoch day `amount` business days from `start`, or `None` past the
/// range of `i64`.
fn business_day_target(start: i64, amount: i64) -> Option<i64> {
    let is_weekend = |day: i64| matches!(utils::weekday_from_epoch_days(day), 0 | 6);
    let sign = if amount < 0 { -1 } else { 1 };

    let mut current = start.checked_add((amount / 5).checked_mul(7)?)?;
    let mut rest = (amount % 5).abs();
    while rest > 0 {
        current = current.checked_add(sign)?;
        if !is_weekend(current) {
            rest -= 1;
        }
    }

    if is_weekend(start) && is_weekend(current) && amount != 0 {
        let shift = match (utils::weekday_from_epoch_days(current), sign < 0) {
            (6, true) => 2,
            (6, false) => -1,
            (_, true) => 1,
            (_, false) => -2,
        };
        current = current.checked_add(shift)?;
    }
    Some(current)
}

/// Adds ISO week-numbering years, keeping the ISO week and weekday. The
/// time is reset to midnight.
pub fn add_iso_week_years<D: DateLike>(date: &D, amount: i64) -> D {
    match get_iso_week_year(date).and_then(|year| i64::from(year).checked_add(amount)) {
        Some(year) => set_iso_week_year(date, year),
        None => date.construct_like(None),
    }
}

// ==== Subtraction ====

fn negate_then<D: DateLike>(date: &D, amount: i64, op: fn(&D, i64) -> D) -> D {
    match amount.checked_neg() {
        Some(amount) => op(date, amount),
        None => date.construct_like(None),
    }
}

pub fn sub_years<D: DateLike>(date: &D, amount: i64) -> D {
    negate_then(date, amount, add_years)
}

pub fn sub_quarters<D: DateLike>(date: &D, amount: i64) -> D {
    negate_then(date, amount, add_quarters)
}

pub fn sub_months<D: DateLike>(date: &D, amount: i64) -> D {
    negate_then(date, amount, add_months)
}

pub fn sub_weeks<D: DateLike>(date: &D, amount: i64) -> D {
    negate_then(date, amount, add_weeks)
}

pub fn sub_days<D: DateLike>(date: &D, amount: i64) -> D {
    negate_then(date, amount, add_days)
}

pub fn sub_hours<D: DateLike>(date: &D, amount: i64) -> D {
    negate_then(date, amount, add_hours)
}

pub fn sub_minutes<D: DateLike>(date: &D, amount: i64) -> D {
    negate_then(date, amount, add_minutes)
}

pub fn sub_seconds<D: DateLike>(date: &D, amount: i64) -> D {
    negate_then(date, amount, add_seconds)
}

pub fn sub_milliseconds<D: DateLike>(date: &D, amount: i64) -> D {
    negate_then(date, amount, add_milliseconds)
}

pub fn sub_business_days<D: DateLike>(date: &D, amount: i64) -> D {
    negate_then(date, amount, add_business_days)
}

pub fn sub_iso_week_years<D: DateLike>(date: &D, amount: i64) -> D {
    negate_then(date, amount, add_iso_week_years)
}
