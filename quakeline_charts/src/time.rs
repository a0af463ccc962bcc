// Copyright 2025 the Quakeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Calendar helpers and year ticks.
//!
//! Dates are modeled as `f64` days since 1970-01-01 in the proleptic Gregorian calendar.
//! Years are astronomical (year `0` is 1 BCE), which matters for historical catalogs that
//! reach back several millennia.

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::scale::nice_step;

const DAYS_PER_ERA: i64 = 146_097;
// Days from 0000-03-01 to 1970-01-01.
const EPOCH_SHIFT: i64 = 719_468;

/// Returns the day number (days since 1970-01-01) of a civil date.
///
/// `month` is `1..=12` and `day` is `1..=31`; out-of-range values roll over arithmetically.
pub fn days_from_civil(year: i64, month: u32, day: u32) -> i64 {
    let year = if month <= 2 { year - 1 } else { year };
    let era = (if year >= 0 { year } else { year - 399 }) / 400;
    let yoe = year - era * 400;
    let mp = (i64::from(month) + 9) % 12;
    let doy = (153 * mp + 2) / 5 + i64::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * DAYS_PER_ERA + doe - EPOCH_SHIFT
}

/// Returns the civil `(year, month, day)` of a day number.
pub fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + EPOCH_SHIFT;
    let era = (if z >= 0 { z } else { z - (DAYS_PER_ERA - 1) }) / DAYS_PER_ERA;
    let doe = z - era * DAYS_PER_ERA;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "month is 1..=12 and day is 1..=31 by construction"
    )]
    {
        (year, month as u32, day as u32)
    }
}

/// Returns the astronomical year containing a (fractional) day number.
pub fn year_of(days: f64) -> i64 {
    civil_from_days(floor_days(days)).0
}

fn floor_days(days: f64) -> i64 {
    let d = days.floor().clamp(-1.0e15, 1.0e15);
    #[allow(clippy::cast_possible_truncation, reason = "clamped well inside the i64 range")]
    {
        d as i64
    }
}

/// Returns tick positions (days) falling on January 1st of “nice” years within `[min, max]`.
pub fn nice_year_ticks(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let y0 = year_of(min);
    let y1 = year_of(max) + 1;
    let span = (y1 - y0) as f64;
    let step = nice_step(span / count as f64).max(1.0).round();
    #[allow(clippy::cast_possible_truncation, reason = "nice steps are small whole numbers")]
    let step = step as i64;

    let mut out = Vec::new();
    let mut year = y0.div_euclid(step) * step;
    while year <= y1 && out.len() < 10_000 {
        let day = days_from_civil(year, 1, 1) as f64;
        if day >= min && day <= max {
            out.push(day);
        }
        year += step;
    }
    out
}

/// Formats an astronomical year for display (`1995`, `480 BCE`).
pub fn format_year(year: i64) -> String {
    if year > 0 {
        alloc::format!("{year}")
    } else {
        alloc::format!("{} BCE", 1 - year)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn known_dates_round_trip() {
        assert_eq!(days_from_civil(1970, 1, 1), 0);
        assert_eq!(days_from_civil(2000, 3, 1), 11_017);
        assert_eq!(civil_from_days(11_017), (2000, 3, 1));
        // 2011 Tohoku.
        let d = days_from_civil(2011, 3, 11);
        assert_eq!(civil_from_days(d), (2011, 3, 11));
        // Before the epoch and before year 0.
        assert_eq!(civil_from_days(-1), (1969, 12, 31));
        let d = days_from_civil(-2150, 6, 15);
        assert_eq!(civil_from_days(d), (-2150, 6, 15));
    }

    #[test]
    fn year_ticks_land_on_january_first() {
        let min = days_from_civil(2000, 6, 1) as f64;
        let max = days_from_civil(2016, 2, 1) as f64;
        let ticks = nice_year_ticks(min, max, 4);
        assert!(!ticks.is_empty(), "some ticks");
        for t in &ticks {
            #[allow(clippy::cast_possible_truncation, reason = "ticks are whole days")]
            let (_, m, d) = civil_from_days(*t as i64);
            assert_eq!((m, d), (1, 1), "tick {t} is not a new year");
            assert!(*t >= min && *t <= max, "tick {t} out of domain");
        }
        let years: Vec<i64> = ticks.iter().map(|&t| year_of(t)).collect();
        assert_eq!(years, alloc::vec![2005, 2010, 2015]);
    }

    #[test]
    fn bce_years_format_with_suffix() {
        assert_eq!(format_year(2011), "2011");
        assert_eq!(format_year(0), "1 BCE");
        assert_eq!(format_year(-479), "480 BCE");
    }
}
