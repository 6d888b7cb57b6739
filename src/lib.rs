/*  lib.rs -- Main program
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

pub mod calc_calendar;
pub mod calc_solar;
mod cli;
mod config;
pub mod error;
pub mod types;
mod types_display;
mod types_parse;
mod utils;

pub use calc_calendar::{JulianCentury, JulianDay};
pub use cli::cli_args_command;
pub use error::types::{InputError, InvalidInput};
pub use types::{
    AzEl, Direction, HorizonEvent, Latitude, Location, Longitude, Period,
    TimeZone,
};
pub use types_display::ClockMinutes;

use crate::{
    cli::ClapColorChoiceExt,
    config::{Config, ConfigBuilder},
    error::ClockError,
    types::Mode,
    types_display::{BODY, HEADER},
    utils::IntoGeneric,
};
use anstream::AutoStream;
use frunk::validated::IntoValidated;
use itertools::Itertools;
use std::{
    io,
    sync::mpsc::{self, Receiver, RecvTimeoutError},
};
use tracing::{debug, error, info, Level};
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Sunrise or sunset for the day whose UTC midnight is `julian_day`, with
/// the result in the local clock of `timezone_hours`. Every invalid argument
/// is reported, not only the first one.
pub fn sunrise_or_sunset(
    direction: Direction,
    julian_day: f64,
    latitude: f64,
    longitude: f64,
    timezone_hours: f64,
) -> Result<HorizonEvent, InputError> {
    let (jd, lat, lon, tz) = (JulianDay::try_from(julian_day)
        .map_err(InvalidInput::from)
        .into_validated()
        + Latitude::try_from(latitude).map_err(InvalidInput::from)
        + Longitude::try_from(longitude).map_err(InvalidInput::from)
        + TimeZone::try_from(timezone_hours).map_err(InvalidInput::from))
    .into_result()?
    .into_generic::<(_, _, _, _)>();

    Ok(Location { lat, lon }.horizon_event(direction, jd, tz))
}

pub fn main() {
    let res = (|| -> Result<(), ClockError> {
        let c = ConfigBuilder::new(|verbosity, color| {
            let choice = color.to_choice();
            let stdout = move || AutoStream::new(io::stdout(), choice).lock();
            let stderr = move || AutoStream::new(io::stderr(), choice).lock();
            let stdio = stderr.with_max_level(Level::WARN).or_else(stdout);

            tracing_subscriber::fmt()
                .with_writer(stdio)
                .with_max_level(verbosity.level_filter())
                .without_time()
                .with_level(false)
                .with_target(false)
                .init();
        })?
        .build()?;
        debug!("{c}");

        let (tx, rx) = mpsc::channel();
        ctrlc::set_handler(move || {
            #[allow(clippy::expect_used)]
            tx.send(()).expect("Could not send signal on channel")
        })
        .or_else(|e| match c.mode {
            Mode::Events | Mode::Position | Mode::Print | Mode::Period => {
                Ok(())
            }
            Mode::Daemon => Err(e),
        })?;

        run(&c, &rx)
    })();

    if let Err(e) = res {
        error!("{e}");
        std::process::exit(e.exit_code());
    }
}

fn run(c: &Config, sig: &Receiver<()>) -> Result<(), ClockError> {
    match c.mode {
        Mode::Events => run_events_mode(c),
        Mode::Position => {
            let (jd, minutes) = c.now();
            let pos = c.location.position(jd, minutes, c.timezone);
            info!("{BODY}{}{BODY:#}: {pos}", ClockMinutes(minutes));
        }
        Mode::Print => run_print_mode(c),
        Mode::Period => {
            let (jd, minutes) = c.now();
            let p = Period::at(jd, minutes, &c.location, c.timezone);
            info!("{BODY}Period{BODY:#}: {p}");
        }
        Mode::Daemon => {
            info!("{HEADER}Current{HEADER:#}:");
            DaemonMode::new(c, sig).run_loop()?;
        }
    }

    Ok(())
}

fn run_events_mode(c: &Config) {
    let (jd, _) = c.now();
    let (loc, tz) = (&c.location, c.timezone);

    // events that crossed local midnight are shown with their own date
    let line = |direction| {
        let e = loc.horizon_event(direction, jd, tz);
        match e.jday() {
            Some(d) if e.is_found() && d != jd => format!("{e} ({d})"),
            _ => e.to_string(),
        }
    };
    let sunrise = line(Direction::Sunrise);
    let noon = ClockMinutes(loc.solar_noon(jd, tz));
    let sunset = line(Direction::Sunset);

    info!(
        "{HEADER}{jd}{HEADER:#} ({loc}, {tz}):
{BODY}Sunrise{BODY:#}: {sunrise}
{BODY}Solar noon{BODY:#}: {noon}
{BODY}Sunset{BODY:#}: {sunset}"
    );
}

fn run_print_mode(c: &Config) {
    let (jd, _) = c.now();
    let mut buf = (0..24).map(|h| {
        let minutes = h as f64 * 60.0;
        let pos = c.location.position(jd, minutes, c.timezone);
        format!("{BODY}{}{BODY:#}: {pos}", ClockMinutes(minutes))
    });
    info!("{HEADER}{jd}{HEADER:#}:\n{}", buf.join("\n"));
}

#[derive(Debug)]
struct DaemonMode<'a, 'b> {
    cfg: &'a Config,
    sig: &'b Receiver<()>,

    period: String,
    // only log when the shown period changed
    prev_period: Option<String>,
}

impl<'a, 'b> DaemonMode<'a, 'b> {
    fn new(cfg: &'a Config, sig: &'b Receiver<()>) -> Self {
        Self {
            cfg,
            sig,
            period: Default::default(),
            prev_period: Default::default(),
        }
    }

    /// Recompute the period every sleep duration until CTRL-C is received
    fn run_loop(&mut self) -> Result<(), ClockError> {
        let c = self.cfg;
        loop {
            let (jd, minutes) = c.now();
            let p = Period::at(jd, minutes, &c.location, c.timezone);
            self.period = p.to_string();

            if Some(&self.period) != self.prev_period.as_ref() {
                info!(
                    "{BODY}{}{BODY:#}: {}",
                    ClockMinutes(minutes),
                    self.period
                );
            }
            self.prev_period = Some(self.period.clone());

            match self.sig.recv_timeout(c.sleep_duration) {
                Err(RecvTimeoutError::Timeout) => {}
                Err(e) => Err(e)?,
                Ok(()) => break Ok(()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn sunrise_or_sunset_matches_typed_api() -> Result<()> {
        let jd = JulianDay::from_date(2024, 6, 21.0);
        let loc = Location::try_from((52.52, 13.405))?;
        let tz = TimeZone::try_from(2.0)?;

        let e =
            sunrise_or_sunset(Direction::Sunset, *jd, 52.52, 13.405, 2.0)?;
        assert_eq!(e, loc.horizon_event(Direction::Sunset, jd, tz));
        assert!(e.is_found());
        Ok(())
    }

    #[test]
    fn sunrise_or_sunset_reports_every_invalid_argument() {
        let res =
            sunrise_or_sunset(Direction::Sunrise, f64::NAN, 95.0, 0.0, 20.0);
        let Err(e) = res else {
            panic!("expected an error, got {res:?}")
        };
        assert_eq!(e.errors().len(), 3);
    }
}
