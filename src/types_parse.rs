/*  types_parse.rs -- FromStr implementation for types
    This file is part of solar-clock.
    Copyright (C) 2024 Mahor Foruzesh <mahor1221@gmail.com>

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

use crate::{
    error::parse::*,
    types::{Latitude, Location, Longitude, TimeZone},
    utils::IntoGeneric,
};
use chrono::NaiveTime;
use frunk::validated::IntoValidated;
use std::str::FromStr;

impl FromStr for Latitude {
    type Err = LatitudeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.trim()
            .parse::<f64>()
            .map_err(|e| LatitudeError::Parse(e, s.into()))?
            .try_into()?)
    }
}

impl FromStr for Longitude {
    type Err = LongitudeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.trim()
            .parse::<f64>()
            .map_err(|e| LongitudeError::Parse(e, s.into()))?
            .try_into()?)
    }
}

impl FromStr for Location {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match *s.split(':').collect::<Vec<_>>().as_slice() {
            [lat, lon] => Ok((lat
                .parse::<Latitude>()
                .map_err(CoordinateError::from)
                .into_validated()
                + lon.parse::<Longitude>().map_err(CoordinateError::from))
            .into_result()?
            .into_generic()),
            _ => Err(LocationError::Fmt),
        }
    }
}

/// Accepts hours as a decimal number (`5.5`, `-3`) or as `[+-]HH:MM`
impl FromStr for TimeZone {
    type Err = TimeZoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let int = |n: &str| {
            n.trim()
                .parse::<u8>()
                .map_err(|e| TimeZoneError::ParseInt(e, n.into()))
        };

        let hours = match *s.trim().split(':').collect::<Vec<_>>().as_slice() {
            [hours] => hours
                .parse::<f64>()
                .map_err(|e| TimeZoneError::ParseFloat(e, s.into()))?,
            [hours, minutes] => {
                let (sign, hours) = match hours.strip_prefix('-') {
                    Some(h) => (-1.0, h),
                    None => (1.0, hours.strip_prefix('+').unwrap_or(hours)),
                };
                let (h, m) = (int(hours)?, int(minutes)?);
                if m >= 60 {
                    return Err(TimeZoneError::Minute(m));
                }
                sign * (h as f64 + m as f64 / 60.0)
            }
            _ => Err(TimeZoneError::Fmt)?,
        };

        Ok(hours.try_into()?)
    }
}

/// Parse a wall clock time given as `HH:MM`
pub fn naive_time(s: &str) -> Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use insta::assert_snapshot;

    #[test]
    fn location() -> Result<()> {
        let loc = "52.52:13.405".parse::<Location>()?;
        assert_eq!((*loc.lat, *loc.lon), (52.52, 13.405));
        let loc = "-33.92: -18.42".parse::<Location>()?;
        assert_eq!((*loc.lat, *loc.lon), (-33.92, -18.42));
        Ok(())
    }

    #[test]
    fn location_errors() {
        let err = |s: &str| match s.parse::<Location>() {
            Ok(loc) => panic!("{s} parsed as {loc:?}"),
            Err(e) => e.to_string(),
        };

        assert_snapshot!(err("91:0"), @"- latitude must be between -90° and 90° (91)");
        assert_snapshot!(err("abc:200"), @r"
        - invalid float literal (abc)
        - longitude must be between -180° and 180° (200)
        ");
        assert_snapshot!(err("52.5"), @"- invalid format, expected LAT:LON");
        assert_snapshot!(err("1:2:3"), @"- invalid format, expected LAT:LON");
    }

    #[test]
    fn time_zone() -> Result<()> {
        let hours = |s: &str| s.parse::<TimeZone>().map(|tz| *tz);
        assert_eq!(hours("+05:30")?, 5.5);
        assert_eq!(hours("-03:30")?, -3.5);
        assert_eq!(hours("-3")?, -3.0);
        assert_eq!(hours("5.75")?, 5.75);
        assert_eq!(hours("00:00")?, 0.0);
        assert_eq!(hours(" 14 ")?, 14.0);
        Ok(())
    }

    #[test]
    fn time_zone_errors() {
        let err = |s: &str| match s.parse::<TimeZone>() {
            Ok(tz) => panic!("{s} parsed as {tz:?}"),
            Err(e) => e.to_string(),
        };

        assert_snapshot!(err("19"), @"time zone offset must be between -18h and 18h (19)");
        assert_snapshot!(err("+05:75"), @"minutes must be between 0 and 59 (75)");
        assert_snapshot!(err("+ab:00"), @"invalid digit found in string (ab)");
        assert_snapshot!(err("utc"), @"invalid float literal (utc)");
        assert_snapshot!(err("1:2:3"), @"invalid format, expected [+-]HH[:MM] or hours");
        assert!("nan".parse::<TimeZone>().is_err());
    }

    #[test]
    fn clock_time() -> Result<()> {
        let time = NaiveTime::from_hms_opt(13, 5, 0);
        assert_eq!(Some(naive_time("13:05")?), time);
        assert!(naive_time("25:00").is_err());
        assert!(naive_time("noon").is_err());
        Ok(())
    }
}
