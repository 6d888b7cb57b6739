/*  types.rs -- Common types
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
    calc_calendar::JulianDay,
    calc_solar::{
        az_el, solar_noon, sunrise_set, MINUTES_PER_DAY, SUNRISE_ELEVATION,
    },
    error::types::*,
    utils::IntoGeneric,
};
use frunk::{validated::IntoValidated, Generic};
use std::ops::Deref;

pub const DEFAULT_LATITUDE: f64 = 0.0;
pub const DEFAULT_LONGITUDE: f64 = 0.0;

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;
pub const MIN_TIMEZONE: f64 = -18.0;
pub const MAX_TIMEZONE: f64 = 18.0;

#[derive(Debug, Clone, Copy)]
pub struct Latitude(f64);
/// East positive
#[derive(Debug, Clone, Copy)]
pub struct Longitude(f64);
#[derive(Debug, Clone, Copy, Default, PartialEq, Generic)]
pub struct Location {
    pub lat: Latitude,
    pub lon: Longitude,
}

/// Fixed offset from UTC in hours, east positive
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct TimeZone(f64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Sunrise,
    Sunset,
}

/// Outcome of a sunrise or sunset query for one day
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HorizonEvent {
    /// `jday` moves to the neighbouring day when the local clock time
    /// crossed midnight. `minutes` is the local clock time in [0, 1440),
    /// `azimuth` is in [0, 360).
    Found {
        jday: f64,
        minutes: f64,
        azimuth: f64,
    },
    /// The sun stays above or below the horizon all day. `jday` is the
    /// nearest day with this event in the direction that was searched.
    Adjacent { jday: f64 },
    /// No event within a year of the queried day
    Unresolved,
}

/// Refraction corrected position of the sun
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AzEl {
    /// Degrees clockwise from north
    pub azimuth: f64,
    /// Degrees above the horizon
    pub elevation: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Events,
    Position,
    Print,
    Period,
    Daemon,
}

/// Part of the day a local clock time falls in. `progress` is the elapsed
/// fraction of the period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Period {
    Daytime { progress: f64 },
    Night { progress: f64 },
    PolarDay,
    PolarNight,
}

//

impl Default for Latitude {
    fn default() -> Self {
        Self(DEFAULT_LATITUDE)
    }
}

impl Default for Longitude {
    fn default() -> Self {
        Self(DEFAULT_LONGITUDE)
    }
}

impl TryFrom<f64> for Latitude {
    type Error = LatitudeError;

    fn try_from(n: f64) -> Result<Self, Self::Error> {
        if (MIN_LATITUDE..=MAX_LATITUDE).contains(&n) {
            Ok(Self(n))
        } else {
            Err(LatitudeError(n))
        }
    }
}

impl TryFrom<f64> for Longitude {
    type Error = LongitudeError;

    fn try_from(n: f64) -> Result<Self, Self::Error> {
        if (MIN_LONGITUDE..=MAX_LONGITUDE).contains(&n) {
            Ok(Self(n))
        } else {
            Err(LongitudeError(n))
        }
    }
}

impl TryFrom<f64> for TimeZone {
    type Error = TimeZoneError;

    fn try_from(n: f64) -> Result<Self, Self::Error> {
        if (MIN_TIMEZONE..=MAX_TIMEZONE).contains(&n) {
            Ok(Self(n))
        } else {
            Err(TimeZoneError(n))
        }
    }
}

impl TryFrom<(f64, f64)> for Location {
    type Error = LocationError;

    fn try_from((lat, lon): (f64, f64)) -> Result<Self, Self::Error> {
        Ok((Latitude::try_from(lat)
            .map_err(CoordinateError::from)
            .into_validated()
            + Longitude::try_from(lon).map_err(CoordinateError::from))
        .into_result()?
        .into_generic())
    }
}

impl TryFrom<chrono::FixedOffset> for TimeZone {
    type Error = TimeZoneError;

    fn try_from(offset: chrono::FixedOffset) -> Result<Self, Self::Error> {
        Self::try_from(offset.local_minus_utc() as f64 / 3600.0)
    }
}

// NOTE: Using Deref is not an anti pattern here. These newtypes are plain
// wrappers that only enforce restrictions and boundaries on the inner type.
// I want these wrappers act exactly like their inner type. Obviously DerefMut
// should not be implemented for these types. See this discussion:
// https://users.rust-lang.org/t/understanding-the-perils-of-deref/47958/18

impl Deref for Latitude {
    type Target = f64;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Deref for Longitude {
    type Target = f64;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Deref for TimeZone {
    type Target = f64;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

//

fn eq(lhs: f64, rhs: f64) -> bool {
    (lhs * 100.0).round() == (rhs * 100.0).round()
}

impl PartialEq for Latitude {
    fn eq(&self, other: &Self) -> bool {
        eq(**self, **other)
    }
}
impl PartialEq for Longitude {
    fn eq(&self, other: &Self) -> bool {
        eq(**self, **other)
    }
}

//

impl HorizonEvent {
    pub fn jday(&self) -> Option<JulianDay> {
        match self {
            Self::Found { jday, .. } | Self::Adjacent { jday } => {
                JulianDay::try_from(*jday).ok()
            }
            Self::Unresolved => None,
        }
    }

    /// Local clock time in minutes, 0 when the event was not found on the
    /// queried day
    pub fn local_minutes(&self) -> f64 {
        match self {
            Self::Found { minutes, .. } => *minutes,
            Self::Adjacent { .. } | Self::Unresolved => 0.0,
        }
    }

    pub fn azimuth(&self) -> Option<f64> {
        match self {
            Self::Found { azimuth, .. } => Some(*azimuth),
            Self::Adjacent { .. } | Self::Unresolved => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

impl Location {
    /// Sunrise or sunset of the day whose UTC midnight is `jd`, in the local
    /// clock of `tz`
    pub fn horizon_event(
        &self,
        direction: Direction,
        jd: JulianDay,
        tz: TimeZone,
    ) -> HorizonEvent {
        sunrise_set(direction, jd, *self.lat, *self.lon, *tz)
    }

    /// Position of the sun at `minutes` past local midnight of `jd`
    pub fn position(
        &self,
        jd: JulianDay,
        minutes: f64,
        tz: TimeZone,
    ) -> AzEl {
        let t = jd.add_minutes(minutes - *tz * 60.0).to_century();
        az_el(t, minutes, *self.lat, *self.lon, *tz)
    }

    /// Local clock time of solar noon in minutes
    pub fn solar_noon(&self, jd: JulianDay, tz: TimeZone) -> f64 {
        solar_noon(jd, *self.lon, *tz)
    }
}

impl Period {
    /// Which period `minutes` past local midnight of `jd` falls in. Nights
    /// span midnight, so the neighbouring days' events are consulted.
    pub fn at(
        jd: JulianDay,
        minutes: f64,
        loc: &Location,
        tz: TimeZone,
    ) -> Self {
        use Direction::*;
        let event = |d, jd| loc.horizon_event(d, jd, tz);

        // minutes from local midnight of `jd`, outside [0, 1440) when the
        // event fell on a neighbouring day
        let relative = |e: HorizonEvent| match e {
            HorizonEvent::Found { jday, minutes, .. } => {
                Some(minutes + MINUTES_PER_DAY * (jday - *jd))
            }
            HorizonEvent::Adjacent { .. } | HorizonEvent::Unresolved => None,
        };

        let (sunrise, sunset) =
            match (relative(event(Sunrise, jd)), relative(event(Sunset, jd))) {
                (Some(r), Some(s)) => (r, s),
                _ => {
                    let elev = loc.position(jd, minutes, tz).elevation;
                    return if elev > SUNRISE_ELEVATION {
                        Self::PolarDay
                    } else {
                        Self::PolarNight
                    };
                }
            };

        let progress = |elapsed: f64, duration: f64| {
            if duration > 0.0 {
                (elapsed / duration).clamp(0.0, 1.0)
            } else {
                0.0
            }
        };

        // a missing neighbouring event is taken as midnight
        if minutes < sunrise {
            let begin =
                relative(event(Sunset, jd.add_days(-1.0))).unwrap_or(0.0);
            Self::Night {
                progress: progress(minutes - begin, sunrise - begin),
            }
        } else if minutes < sunset {
            Self::Daytime {
                progress: progress(minutes - sunrise, sunset - sunrise),
            }
        } else {
            let end = relative(event(Sunrise, jd.add_days(1.0)))
                .unwrap_or(MINUTES_PER_DAY);
            Self::Night {
                progress: progress(minutes - sunset, end - sunset),
            }
        }
    }

    pub fn is_night(&self) -> bool {
        matches!(self, Self::Night { .. } | Self::PolarNight)
    }
}
