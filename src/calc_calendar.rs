/*  calc_calendar.rs -- Calendar and Julian day conversion
    This file is part of solar-clock.
    Copyright (C) 2024 Mahor Foruzesh <mahor1221@gmail.com>
    Ported from the NOAA Solar Calculator <https://gml.noaa.gov/grad/solcalc/>.

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU General Public License as published by
    the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU General Public License for more details.

    You should have received a copy of the GNU General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use crate::error::types::JulianDayError;
use std::ops::Deref;

/// Julian day of the J2000.0 epoch
pub const J2000: f64 = 2451545.0;
pub const DAYS_PER_CENTURY: f64 = 36525.0;
/// First day of the Gregorian calendar (1582-10-15)
pub const GREGORIAN_CUTOVER: f64 = 2299161.0;

/// Days since noon of January 1, 4713 BC in the proleptic Julian calendar.
/// Half-integer values fall on UTC midnight.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct JulianDay(f64);

/// Julian centuries since J2000.0. Most of the solar series are polynomials
/// in this variable.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct JulianCentury(f64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u8,
    /// Day of month, the fractional part is the time of day
    pub day: f64,
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

impl JulianDay {
    /// Julian day of a calendar date. January and February count as the 13th
    /// and 14th months of the previous year. The Gregorian correction is
    /// always applied.
    pub fn from_date(year: i32, month: u8, day: f64) -> Self {
        let (y, m) = match month {
            1 | 2 => (year as f64 - 1.0, month as f64 + 12.0),
            _ => (year as f64, month as f64),
        };
        let a = (y / 100.0).floor();
        let b = 2.0 - a + (a / 4.0).floor();
        let jd = (365.25 * (y + 4716.0)).floor()
            + (30.6001 * (m + 1.0)).floor()
            + day
            + b
            - 1524.5;
        Self(jd)
    }

    pub fn to_calendar_date(self) -> CalendarDate {
        let z = (self.0 + 0.5).floor();
        let f = (self.0 + 0.5) - z;
        let a = if z < GREGORIAN_CUTOVER {
            z
        } else {
            let alpha = ((z - 1867216.25) / 36524.25).floor();
            z + 1.0 + alpha - (alpha / 4.0).floor()
        };
        let b = a + 1524.0;
        let c = ((b - 122.1) / 365.25).floor();
        let d = (365.25 * c).floor();
        let e = ((b - d) / 30.6001).floor();

        let day = b - d - (30.6001 * e).floor() + f;
        let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
        let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };

        CalendarDate {
            year: year as i32,
            month: month as u8,
            day,
        }
    }

    /// Ordinal day of the year, starting from 1
    pub fn day_of_year(self) -> u16 {
        let CalendarDate { year, month, day } = self.to_calendar_date();
        let k = if is_leap_year(year) { 1 } else { 2 };
        let m = month as i32;
        let doy = (275 * m) / 9 - k * ((m + 9) / 12) + day.floor() as i32 - 30;
        doy as u16
    }

    pub fn to_century(self) -> JulianCentury {
        JulianCentury((self.0 - J2000) / DAYS_PER_CENTURY)
    }

    pub fn add_days(self, days: f64) -> Self {
        Self(self.0 + days)
    }

    pub fn add_minutes(self, minutes: f64) -> Self {
        Self(self.0 + minutes / 1440.0)
    }
}

impl JulianCentury {
    pub fn to_julian_day(self) -> JulianDay {
        JulianDay(self.0 * DAYS_PER_CENTURY + J2000)
    }
}

impl TryFrom<f64> for JulianDay {
    type Error = JulianDayError;

    fn try_from(n: f64) -> Result<Self, Self::Error> {
        if n.is_finite() {
            Ok(Self(n))
        } else {
            Err(JulianDayError(n))
        }
    }
}

impl From<chrono::NaiveDate> for JulianDay {
    fn from(date: chrono::NaiveDate) -> Self {
        use chrono::Datelike;
        Self::from_date(date.year(), date.month() as u8, date.day() as f64)
    }
}

impl Deref for JulianDay {
    type Target = f64;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Deref for JulianCentury {
    type Target = f64;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};

    #[test]
    fn known_julian_days() {
        assert_eq!(*JulianDay::from_date(2000, 1, 1.5), J2000);
        assert_eq!(*JulianDay::from_date(2024, 6, 21.0), 2460482.5);
        let sputnik = JulianDay::from_date(1957, 10, 4.81);
        assert!((*sputnik - 2436116.31).abs() < 1e-6);
    }

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn calendar_round_trip() {
        for year in (1600..2400).step_by(7) {
            for month in 1..=12 {
                for day in [1, 9, 15, 28] {
                    let jd = JulianDay::from_date(year, month, day as f64);
                    let date = jd.to_calendar_date();
                    assert_eq!(
                        (date.year, date.month, date.day),
                        (year, month, day as f64)
                    );
                }
            }
        }
    }

    #[test]
    fn consecutive_dates_are_one_day_apart() {
        let mut date = NaiveDate::from_ymd_opt(1899, 12, 25).unwrap();
        let mut prev = JulianDay::from(date);
        for _ in 0..(366 * 130) {
            date = date.succ_opt().unwrap();
            let jd = JulianDay::from(date);
            assert!(jd > prev, "{date}");
            assert_eq!(*jd - *prev, 1.0, "{date}");

            let cal = jd.to_calendar_date();
            assert_eq!(cal.year, date.year());
            assert_eq!(cal.month as u32, date.month());
            assert_eq!(cal.day, date.day() as f64);
            assert_eq!(jd.day_of_year() as u32, date.ordinal(), "{date}");
            prev = jd;
        }
    }

    #[test]
    fn julian_calendar_before_cutover() {
        // the day before the Gregorian reform was 1582-10-04 (Julian)
        let date = JulianDay(GREGORIAN_CUTOVER - 1.0).to_calendar_date();
        assert_eq!((date.year, date.month, date.day), (1582, 10, 4.5));
    }

    #[test]
    fn time_of_day_is_kept_in_the_fraction() {
        let date = JulianDay::from_date(2024, 3, 20.75).to_calendar_date();
        assert_eq!((date.year, date.month), (2024, 3));
        assert!((date.day - 20.75).abs() < 1e-9);
    }

    #[test]
    fn century_round_trip() {
        for jd in [0.0, 2299160.5, J2000, 2460482.5, 3000000.25] {
            let back = *JulianDay(jd).to_century().to_julian_day();
            assert!((back - jd).abs() < 1e-8, "{jd} {back}");
        }
        assert_eq!(*JulianDay(J2000).to_century(), 0.0);
        assert_eq!(*JulianDay(J2000 + DAYS_PER_CENTURY).to_century(), 1.0);
    }

    #[test]
    fn non_finite_julian_day_is_rejected() {
        assert!(JulianDay::try_from(f64::NAN).is_err());
        assert!(JulianDay::try_from(f64::INFINITY).is_err());
        assert!(JulianDay::try_from(2451545.0).is_ok());
    }
}
