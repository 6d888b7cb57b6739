/*  calc_solar.rs -- Solar position calculations
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

//! Low precision solar ephemeris. The series below are empirical fits from
//! Astronomical Algorithms by Jean Meeus. They are accurate to about a minute
//! of time for dates within a few millennia of the present. Other centuries
//! are accepted but the accuracy degrades.

use crate::{
    calc_calendar::{JulianCentury, JulianDay},
    types::{AzEl, Direction, HorizonEvent},
};
use tracing::trace;

pub const MINUTES_PER_DAY: f64 = 1440.0;
/// Zenith of the sun's center at sunrise/sunset: refraction at the horizon
/// plus the apparent radius of the solar disc
pub const SUNRISE_ZENITH: f64 = 90.833;
/// Refraction corrected elevation at sunrise/sunset
pub const SUNRISE_ELEVATION: f64 = 90.0 - SUNRISE_ZENITH;
/// Latitude above which a missing sunrise/sunset is classified by season
pub const POLAR_LATITUDE: f64 = 66.4;
/// Upper bound of the adjacent day search. The sun crosses the horizon at
/// least once a year everywhere but at the poles.
pub const MAX_SEARCH_DAYS: u16 = 366;

//

pub fn geom_mean_long_sun(t: f64) -> f64 {
    (280.46646 + t * (36000.76983 + t * 0.0003032)).rem_euclid(360.0)
}

pub fn geom_mean_anomaly_sun(t: f64) -> f64 {
    357.52911 + t * (35999.05029 - 0.0001537 * t)
}

pub fn eccentricity_earth_orbit(t: f64) -> f64 {
    0.016708634 - t * (0.000042037 + 0.0000001267 * t)
}

pub fn sun_eq_of_center(t: f64) -> f64 {
    let m = geom_mean_anomaly_sun(t).to_radians();
    m.sin() * (1.914602 - t * (0.004817 + 0.000014 * t))
        + (2.0 * m).sin() * (0.019993 - 0.000101 * t)
        + (3.0 * m).sin() * 0.000289
}

pub fn sun_true_long(t: f64) -> f64 {
    geom_mean_long_sun(t) + sun_eq_of_center(t)
}

pub fn sun_true_anomaly(t: f64) -> f64 {
    geom_mean_anomaly_sun(t) + sun_eq_of_center(t)
}

/// Distance to the sun in AU
pub fn sun_rad_vector(t: f64) -> f64 {
    let v = sun_true_anomaly(t).to_radians();
    let e = eccentricity_earth_orbit(t);
    (1.000001018 * (1.0 - e * e)) / (1.0 + e * v.cos())
}

/// Longitude of the ascending node of the moon's orbit, used by the nutation
/// and aberration terms
fn omega(t: f64) -> f64 {
    125.04 - 1934.136 * t
}

pub fn sun_apparent_long(t: f64) -> f64 {
    sun_true_long(t) - 0.00569 - 0.00478 * omega(t).to_radians().sin()
}

pub fn mean_obliquity_of_ecliptic(t: f64) -> f64 {
    let seconds = 21.448 - t * (46.8150 + t * (0.00059 - t * 0.001813));
    23.0 + (26.0 + seconds / 60.0) / 60.0
}

pub fn obliquity_correction(t: f64) -> f64 {
    mean_obliquity_of_ecliptic(t) + 0.00256 * omega(t).to_radians().cos()
}

/// Right ascension in (-180, 180]
pub fn sun_right_ascension(t: f64) -> f64 {
    let e = obliquity_correction(t).to_radians();
    let lambda = sun_apparent_long(t).to_radians();
    (e.cos() * lambda.sin()).atan2(lambda.cos()).to_degrees()
}

pub fn sun_declination(t: f64) -> f64 {
    let e = obliquity_correction(t).to_radians();
    let lambda = sun_apparent_long(t).to_radians();
    (e.sin() * lambda.sin()).asin().to_degrees()
}

/// Difference between true and mean solar time in minutes
pub fn equation_of_time(t: f64) -> f64 {
    let epsilon = obliquity_correction(t).to_radians();
    let l0 = geom_mean_long_sun(t).to_radians();
    let e = eccentricity_earth_orbit(t);
    let m = geom_mean_anomaly_sun(t).to_radians();
    let y = (epsilon / 2.0).tan().powi(2);

    let eq_time = y * (2.0 * l0).sin() - 2.0 * e * m.sin()
        + 4.0 * e * y * m.sin() * (2.0 * l0).cos()
        - 0.5 * y * y * (4.0 * l0).sin()
        - 1.25 * e * e * (2.0 * m).sin();
    eq_time.to_degrees() * 4.0
}

//

/// Correction in degrees to add to the geometric elevation to get the
/// apparent elevation
pub fn atmospheric_refraction(elev: f64) -> f64 {
    if elev > 85.0 {
        return 0.0;
    }

    let te = elev.to_radians().tan();
    let arcsec = if elev > 5.0 {
        58.1 / te - 0.07 / te.powi(3) + 0.000086 / te.powi(5)
    } else if elev > -0.575 {
        1735.0
            + elev * (-518.2 + elev * (103.4 + elev * (-12.79 + elev * 0.711)))
    } else {
        -20.774 / te
    };
    arcsec / 3600.0
}

/// Azimuth and refraction corrected elevation of the sun at a local clock
/// time. `t` must be the Julian century of the same instant.
pub fn az_el(
    t: JulianCentury,
    local_minutes: f64,
    lat: f64,
    lon: f64,
    tz: f64,
) -> AzEl {
    let eq_time = equation_of_time(*t);
    let decl = sun_declination(*t).to_radians();
    let lat_rad = lat.to_radians();

    let solar_time_fix = eq_time + 4.0 * lon - 60.0 * tz;
    let true_solar_time =
        (local_minutes + solar_time_fix).rem_euclid(MINUTES_PER_DAY);
    let hour_angle = true_solar_time / 4.0 - 180.0;

    let csz = (lat_rad.sin() * decl.sin()
        + lat_rad.cos() * decl.cos() * hour_angle.to_radians().cos())
    .clamp(-1.0, 1.0);
    let zenith = csz.acos();

    // the sun is over the pole point when the denominator vanishes
    let az_denom = lat_rad.cos() * zenith.sin();
    let azimuth = if az_denom.abs() > 0.001 {
        let ratio = ((lat_rad.sin() * zenith.cos() - decl.sin()) / az_denom)
            .clamp(-1.0, 1.0);
        let azimuth = 180.0 - ratio.acos().to_degrees();
        if hour_angle > 0.0 {
            -azimuth
        } else {
            azimuth
        }
    } else if lat > 0.0 {
        180.0
    } else {
        0.0
    };
    let azimuth = if azimuth < 0.0 { azimuth + 360.0 } else { azimuth };

    let exoatm_elevation = 90.0 - zenith.to_degrees();
    let elevation =
        exoatm_elevation + atmospheric_refraction(exoatm_elevation);
    AzEl { azimuth, elevation }
}

//

/// Hour angle of sunrise in radians, negate it for sunset. NaN when the sun
/// does not cross the horizon on that day.
pub fn hour_angle_sunrise(lat: f64, decl: f64) -> f64 {
    let lat = lat.to_radians();
    let decl = decl.to_radians();
    let ha_arg = SUNRISE_ZENITH.to_radians().cos() / (lat.cos() * decl.cos())
        - lat.tan() * decl.tan();
    ha_arg.acos()
}

/// Time of sunrise or sunset in minutes from midnight UTC of `jd`. None when
/// the sun stays above or below the horizon.
pub fn sunrise_set_utc(
    direction: Direction,
    jd: JulianDay,
    lat: f64,
    lon: f64,
) -> Option<f64> {
    let t = *jd.to_century();
    let eq_time = equation_of_time(t);
    let decl = sun_declination(t);
    let hour_angle = match direction {
        Direction::Sunrise => hour_angle_sunrise(lat, decl),
        Direction::Sunset => -hour_angle_sunrise(lat, decl),
    };
    let delta = lon + hour_angle.to_degrees();
    let time_utc = 720.0 - 4.0 * delta - eq_time;
    Some(time_utc).filter(|t| t.is_finite())
}

/// Move local clock minutes into [0, 1440), shifting the day to match
fn normalize_clock(mut jd: JulianDay, mut minutes: f64) -> (JulianDay, f64) {
    while minutes < 0.0 {
        minutes += MINUTES_PER_DAY;
        jd = jd.add_days(-1.0);
    }
    while minutes >= MINUTES_PER_DAY {
        minutes -= MINUTES_PER_DAY;
        jd = jd.add_days(1.0);
    }
    (jd, minutes)
}

/// Sunrise or sunset of the day starting at `jd` (UTC midnight), in local
/// clock time of the `tz` offset (hours)
pub fn sunrise_set(
    direction: Direction,
    jd: JulianDay,
    lat: f64,
    lon: f64,
    tz: f64,
) -> HorizonEvent {
    // The second pass evaluates the sun at the estimated time of the event
    // to account for its motion during the day
    let time_utc = sunrise_set_utc(direction, jd, lat, lon).and_then(|t| {
        sunrise_set_utc(direction, jd.add_minutes(t), lat, lon)
    });

    match time_utc {
        Some(time_utc) => {
            let local = time_utc + tz * 60.0;
            let t = jd.add_minutes(time_utc).to_century();
            let AzEl { azimuth, .. } = az_el(t, local, lat, lon, tz);
            let (jday, minutes) = normalize_clock(jd, local);
            HorizonEvent::Found {
                jday: *jday,
                minutes,
                azimuth,
            }
        }

        None => {
            let doy = jd.day_of_year();
            let polar_day = (lat > POLAR_LATITUDE && doy > 79 && doy < 267)
                || (lat < -POLAR_LATITUDE && (doy < 83 || doy > 263));
            // during polar day look for the previous sunrise and the next
            // sunset, during polar night the other way around
            let forward = match (polar_day, direction) {
                (true, Direction::Sunrise) | (false, Direction::Sunset) => {
                    false
                }
                (true, Direction::Sunset) | (false, Direction::Sunrise) => {
                    true
                }
            };
            trace!(polar_day, forward, "no {direction} on day {}", *jd);

            match find_adjacent_rise_set(forward, direction, jd, lat, lon, tz)
            {
                Some(jday) => HorizonEvent::Adjacent { jday: *jday },
                None => HorizonEvent::Unresolved,
            }
        }
    }
}

/// Step day by day from `jd` until a sunrise or sunset happens. Returns the
/// day the event falls on in local clock time.
fn find_adjacent_rise_set(
    forward: bool,
    direction: Direction,
    jd: JulianDay,
    lat: f64,
    lon: f64,
    tz: f64,
) -> Option<JulianDay> {
    let step = if forward { 1.0 } else { -1.0 };
    (0..=MAX_SEARCH_DAYS)
        .map(|i| jd.add_days(step * i as f64))
        .find_map(|day| {
            let time_utc = sunrise_set_utc(direction, day, lat, lon)?;
            let (jday, _) = normalize_clock(day, time_utc + tz * 60.0);
            Some(jday)
        })
}

/// Local clock time of solar noon in minutes
pub fn solar_noon(jd: JulianDay, lon: f64, tz: f64) -> f64 {
    let t_noon = jd.add_days(-lon / 360.0).to_century();
    let offset = 720.0 - 4.0 * lon - equation_of_time(*t_noon);
    let t = jd.add_minutes(offset).to_century();
    let noon = 720.0 - 4.0 * lon - equation_of_time(*t) + tz * 60.0;
    noon.rem_euclid(MINUTES_PER_DAY)
}
