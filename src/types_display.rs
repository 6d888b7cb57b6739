/*  types_display.rs -- Display implementation for common types
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
    calc_calendar::{CalendarDate, JulianDay},
    calc_solar::MINUTES_PER_DAY,
    config::Config,
    types::{
        AzEl, Direction, HorizonEvent, Latitude, Location, Longitude, Mode,
        Period, TimeZone,
    },
};
use anstyle::{AnsiColor, Style};
use std::fmt::{Display, Formatter, Result as FmtResult};

pub const HEADER: Style = Style::new().bold().underline();
pub const BODY: Style = Style::new().bold();
pub const ERR: Style = AnsiColor::Red.on_default().bold();

/// Minutes past local midnight shown as `HH:MM`
#[derive(Debug, Clone, Copy)]
pub struct ClockMinutes(pub f64);

impl Display for ClockMinutes {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let m = self.0.round().rem_euclid(MINUTES_PER_DAY) as u32;
        write!(f, "{:02}:{:02}", m / 60, m % 60)
    }
}

impl Display for CalendarDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let Self { year, month, day } = self;
        write!(f, "{year:04}-{month:02}-{:02}", day.floor() as u8)
    }
}

impl Display for JulianDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.to_calendar_date(), f)
    }
}

impl Display for Latitude {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let ns = if **self >= 0.0 { "N" } else { "S" };
        write!(f, "{:.2}°{ns}", self.abs())
    }
}

impl Display for Longitude {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let ew = if **self >= 0.0 { "E" } else { "W" };
        write!(f, "{:.2}°{ew}", self.abs())
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}, {}", self.lat, self.lon)
    }
}

impl Display for TimeZone {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let sign = if **self < 0.0 { '-' } else { '+' };
        let m = (self.abs() * 60.0).round() as u32;
        write!(f, "UTC{sign}{:02}:{:02}", m / 60, m % 60)
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Direction::Sunrise => f.write_str("sunrise"),
            Direction::Sunset => f.write_str("sunset"),
        }
    }
}

impl Display for HorizonEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            HorizonEvent::Found {
                minutes, azimuth, ..
            } => {
                write!(f, "{}, azimuth {azimuth:.2}°", ClockMinutes(*minutes))
            }
            HorizonEvent::Adjacent { .. } => match self.jday() {
                Some(jd) => write!(f, "none, nearest on {jd}"),
                None => f.write_str("none"),
            },
            HorizonEvent::Unresolved => f.write_str("none within a year"),
        }
    }
}

impl Display for AzEl {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let Self { azimuth, elevation } = self;
        write!(f, "azimuth {azimuth:6.2}°, elevation {elevation:6.2}°")
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let percent = |p: &f64| (p * 100.0).floor() as u8;
        match self {
            Period::Daytime { progress } => {
                write!(f, "daytime ({}% elapsed)", percent(progress))
            }
            Period::Night { progress } => {
                write!(f, "night ({}% elapsed)", percent(progress))
            }
            Period::PolarDay => f.write_str("polar day"),
            Period::PolarNight => f.write_str("polar night"),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Mode::Events => f.write_str("events"),
            Mode::Position => f.write_str("position"),
            Mode::Print => f.write_str("print"),
            Mode::Period => f.write_str("period"),
            Mode::Daemon => f.write_str("daemon"),
        }
    }
}

impl Display for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let Config {
            mode,
            location,
            timezone,
            date,
            clock,
            sleep_duration,
            time: _,
        } = self;

        writeln!(f, "{BODY}Mode{BODY:#}: {mode}")?;
        writeln!(f, "{BODY}Location{BODY:#}: {location}")?;
        writeln!(f, "{BODY}Time zone{BODY:#}: {timezone}")?;
        match date {
            Some(d) => writeln!(f, "{BODY}Date{BODY:#}: {d}")?,
            None => writeln!(f, "{BODY}Date{BODY:#}: today")?,
        }
        match clock {
            Some(t) => writeln!(f, "{BODY}Time{BODY:#}: {}", t.format("%H:%M"))?,
            None => writeln!(f, "{BODY}Time{BODY:#}: now")?,
        }
        if *mode == Mode::Daemon {
            let ms = sleep_duration.as_millis();
            writeln!(f, "{BODY}Sleep duration{BODY:#}: {ms}ms")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use insta::assert_snapshot;

    #[test]
    fn clock_minutes() {
        assert_snapshot!(ClockMinutes(0.0), @"00:00");
        assert_snapshot!(ClockMinutes(283.4), @"04:43");
        assert_snapshot!(ClockMinutes(1293.6), @"21:34");
        assert_snapshot!(ClockMinutes(1439.7), @"00:00");
    }

    #[test]
    fn dates() {
        let jd = JulianDay::from_date(2024, 6, 21.0);
        assert_snapshot!(jd, @"2024-06-21");
        assert_snapshot!(JulianDay::from_date(1999, 12, 31.75), @"1999-12-31");
    }

    #[test]
    fn location_and_time_zone() -> Result<()> {
        let loc = "52.52:-13.41".parse::<Location>()?;
        assert_snapshot!(loc, @"52.52°N, 13.41°W");
        let loc = "-33.9:151.2".parse::<Location>()?;
        assert_snapshot!(loc, @"33.90°S, 151.20°E");

        assert_snapshot!("+05:30".parse::<TimeZone>()?, @"UTC+05:30");
        assert_snapshot!("-3.5".parse::<TimeZone>()?, @"UTC-03:30");
        assert_snapshot!("0".parse::<TimeZone>()?, @"UTC+00:00");
        Ok(())
    }

    #[test]
    fn events_and_periods() {
        let found = HorizonEvent::Found {
            jday: 2460482.5,
            minutes: 283.2,
            azimuth: 47.516,
        };
        assert_snapshot!(found, @"04:43, azimuth 47.52°");
        let adjacent = HorizonEvent::Adjacent { jday: 2460450.5 };
        assert_snapshot!(adjacent, @"none, nearest on 2024-05-20");
        assert_snapshot!(HorizonEvent::Unresolved, @"none within a year");

        let pos = AzEl {
            azimuth: 180.0,
            elevation: 60.926,
        };
        assert_snapshot!(pos, @"azimuth 180.00°, elevation  60.93°");

        assert_snapshot!(Period::Daytime { progress: 0.493 }, @"daytime (49% elapsed)");
        assert_snapshot!(Period::Night { progress: 1.0 }, @"night (100% elapsed)");
        assert_snapshot!(Period::PolarNight, @"polar night");
    }
}
