/*  config.rs -- Hierarchical configuration
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
    cli::{CliArgs, CmdArgs, ModeArgs, TimeArgs, Verbosity},
    error::config::{ConfigError, ConfigFileError},
    types::{Location, Mode, TimeZone},
};
use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeDelta, Timelike};
use clap::{ColorChoice, Parser};
use const_format::formatcp;
use serde::{de, Deserialize, Deserializer};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::debug;

pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
// Duration of sleep between period checks in daemon mode (milliseconds)
pub const DEFAULT_SLEEP_DURATION: u64 = 60000;

/// Merge of cli arguments and config files from highest priority to lowest:
/// 1. CLI arguments
/// 2. User config file
/// 3. System config file (Unix-like OS's only)
/// 4. Default values
#[derive(Debug)]
pub struct Config {
    pub mode: Mode,

    pub location: Location,
    pub timezone: TimeZone,
    pub date: Option<NaiveDate>,
    pub clock: Option<NaiveTime>,
    pub sleep_duration: Duration,

    pub time: fn() -> DateTime<Local>,
}

#[derive(Debug)]
pub struct ConfigBuilder {
    mode: Mode,

    location: Location,
    timezone: Option<TimeZone>,
    date: Option<NaiveDate>,
    clock: Option<NaiveTime>,
    sleep_duration: Duration,

    time: fn() -> DateTime<Local>,
}

#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct ConfigFile {
    location: Option<Location>,
    timezone: Option<TimeZone>,
    sleep_duration: Option<u64>,
}

impl ConfigBuilder {
    /// Parse the command line, let the caller set up logging with the
    /// requested verbosity and color, then merge the config files
    pub fn new(
        init_logging: impl FnOnce(Verbosity, ColorChoice),
    ) -> Result<Self, ConfigError> {
        let cli_args = CliArgs::parse();
        let mut cfg = Self::default();

        let verbosity = Verbosity::from(cli_args.verbosity);
        let color = cli_args.color.unwrap_or_default();
        init_logging(verbosity, color);

        let config_file = ConfigFile::new(cli_args.mode.config_path())?;
        cfg.merge_with_config_file(config_file);
        cfg.merge_with_mode_args(cli_args.mode);

        Ok(cfg)
    }

    pub fn build(self) -> Result<Config, ConfigError> {
        let Self {
            mode,
            location,
            timezone,
            date,
            clock,
            sleep_duration,
            time,
        } = self;

        // fall back to the offset the system clock currently uses
        let timezone = match timezone {
            Some(tz) => tz,
            None => TimeZone::try_from(*time().offset())?,
        };

        Ok(Config {
            mode,
            location,
            timezone,
            date,
            clock,
            sleep_duration,
            time,
        })
    }

    fn merge_with_mode_args(&mut self, mode: ModeArgs) {
        match mode {
            ModeArgs::Events { c } => {
                self.merge_with_cmd_args(c);
                self.mode = Mode::Events;
            }
            ModeArgs::Position { c, t } => {
                self.merge_with_cmd_args(c);
                self.merge_with_time_args(t);
                self.mode = Mode::Position;
            }
            ModeArgs::Print { c } => {
                self.merge_with_cmd_args(c);
                self.mode = Mode::Print;
            }
            ModeArgs::Period { c, t } => {
                self.merge_with_cmd_args(c);
                self.merge_with_time_args(t);
                self.mode = Mode::Period;
            }
            ModeArgs::Daemon { c, sleep_duration } => {
                self.merge_with_cmd_args(c);
                if let Some(t) = sleep_duration {
                    self.sleep_duration = Duration::from_millis(t);
                }
                self.mode = Mode::Daemon;
            }
        }
    }

    fn merge_with_cmd_args(&mut self, args: CmdArgs) {
        let CmdArgs {
            location,
            timezone,
            date,
            config: _,
        } = args;

        if let Some(t) = location {
            self.location = t;
        }
        if let Some(t) = timezone {
            self.timezone = Some(t);
        }
        if let Some(t) = date {
            self.date = Some(t);
        }
    }

    fn merge_with_time_args(&mut self, args: TimeArgs) {
        if let Some(t) = args.time {
            self.clock = Some(t);
        }
    }

    fn merge_with_config_file(&mut self, config: ConfigFile) {
        let ConfigFile {
            location,
            timezone,
            sleep_duration,
        } = config;

        if let Some(t) = location {
            self.location = t;
        }
        if let Some(t) = timezone {
            self.timezone = Some(t);
        }
        if let Some(t) = sleep_duration {
            self.sleep_duration = Duration::from_millis(t);
        }
    }
}

impl Config {
    /// Julian day of the local date (at UTC midnight) and the local clock
    /// time in minutes. Fixed values from the command line take precedence
    /// over the system clock.
    pub fn now(&self) -> (JulianDay, f64) {
        let now = (self.time)();
        let offset = TimeDelta::seconds((*self.timezone * 3600.0) as i64);
        let local = now
            .naive_utc()
            .checked_add_signed(offset)
            .unwrap_or(now.naive_local());

        let date = self.date.unwrap_or(local.date());
        let time = self.clock.unwrap_or(local.time());
        let minutes = time.num_seconds_from_midnight() as f64 / 60.0;
        (date.into(), minutes)
    }
}

impl ModeArgs {
    fn config_path(&self) -> Option<&Path> {
        match self {
            ModeArgs::Events { c }
            | ModeArgs::Position { c, .. }
            | ModeArgs::Print { c }
            | ModeArgs::Period { c, .. }
            | ModeArgs::Daemon { c, .. } => c.config.as_deref(),
        }
    }
}

impl ConfigFile {
    fn new(config_path: Option<&Path>) -> Result<Self, ConfigFileError> {
        #[cfg(unix)]
        let system_config =
            Path::new(formatcp!("/etc/{PKG_NAME}/config.toml"));
        let local_config =
            dirs::config_dir().map(|d| d.join(PKG_NAME).join("config.toml"));
        let user_config = config_path
            .map(|p| match p.is_file() {
                true => Ok(p),
                false => Err(ConfigFileError::PathNotFile(p.into())),
            })
            .transpose()?
            .or(local_config.as_deref())
            .ok_or(ConfigFileError::ConfigDirNotFound)?;

        let mut config = Self::default();
        #[cfg(unix)]
        config.merge(Self::read(system_config)?);
        config.merge(Self::read(user_config)?);
        Ok(config)
    }

    /// A missing file reads as an empty config
    fn read(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.is_file() {
            return Ok(Self::default());
        }

        debug!("reading {}", path.display());
        let buf = fs::read_to_string(path)
            .map_err(|e| ConfigFileError::OpenFailed(e, path.into()))?;
        Self::parse(&buf, path.into())
    }

    fn parse(buf: &str, path: PathBuf) -> Result<Self, ConfigFileError> {
        toml::from_str(buf)
            .map_err(|e| ConfigFileError::DeserializeFailed(e, path))
    }

    fn merge(&mut self, other: Self) {
        let Self {
            location,
            timezone,
            sleep_duration,
        } = other;

        if let Some(t) = location {
            self.location = Some(t);
        }
        if let Some(t) = timezone {
            self.timezone = Some(t);
        }
        if let Some(t) = sleep_duration {
            self.sleep_duration = Some(t);
        }
    }
}

//

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            mode: Default::default(),
            location: Default::default(),
            timezone: Default::default(),
            date: Default::default(),
            clock: Default::default(),
            sleep_duration: Duration::from_millis(DEFAULT_SLEEP_DURATION),
            time: Local::now,
        }
    }
}

impl<'de> Deserialize<'de> for Location {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        String::deserialize(d)?.parse().map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for TimeZone {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        String::deserialize(d)?.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use chrono::TimeZone as _;

    fn file(s: &str) -> Result<ConfigFile, ConfigFileError> {
        ConfigFile::parse(s, "config.toml".into())
    }

    #[test]
    fn config_file() -> Result<()> {
        let c = file(
            r#"
            location = "52.52:13.405"
            timezone = "+02:00"
            sleep-duration = 1000
            "#,
        )?;
        assert_eq!(c.location, Some("52.52:13.405".parse::<Location>()?));
        assert_eq!(c.timezone.map(|tz| *tz), Some(2.0));
        assert_eq!(c.sleep_duration, Some(1000));

        assert_eq!(file("")?, ConfigFile::default());
        Ok(())
    }

    #[test]
    fn config_file_errors() {
        assert!(file(r#"location = "91:0""#).is_err());
        assert!(file(r#"timezone = 2"#).is_err());
        assert!(file(r#"elevation = 5"#).is_err());
    }

    #[test]
    fn later_files_take_precedence() -> Result<()> {
        let mut c = file(r#"location = "1:2""#)?;
        c.merge(file(
            r#"
            location = "3:4"
            timezone = "-5"
            "#,
        )?);
        c.merge(file("sleep-duration = 10")?);
        assert_eq!(c.location, Some("3:4".parse::<Location>()?));
        assert_eq!(c.timezone.map(|tz| *tz), Some(-5.0));
        assert_eq!(c.sleep_duration, Some(10));
        Ok(())
    }

    #[test]
    fn missing_config_file() {
        let path = Path::new("/nonexistent/solar-clock.toml");
        assert!(matches!(
            ConfigFile::new(Some(path)),
            Err(ConfigFileError::PathNotFile(_))
        ));
    }

    fn fixed_now() -> DateTime<Local> {
        let utc = chrono::Utc.with_ymd_and_hms(2024, 6, 20, 23, 30, 0);
        utc.single()
            .map(|t| t.with_timezone(&Local))
            .unwrap_or_else(|| unreachable!())
    }

    #[test]
    fn now_uses_the_configured_offset() -> Result<()> {
        let builder = ConfigBuilder {
            timezone: Some("+02:00".parse()?),
            time: fixed_now,
            ..Default::default()
        };
        let c = builder.build()?;
        let (jd, minutes) = c.now();
        assert_eq!(jd, JulianDay::from_date(2024, 6, 21.0));
        assert_eq!(minutes, 90.0);

        let c = Config {
            date: NaiveDate::from_ymd_opt(2024, 1, 1),
            clock: NaiveTime::from_hms_opt(12, 0, 0),
            ..c
        };
        let (jd, minutes) = c.now();
        assert_eq!(jd, JulianDay::from_date(2024, 1, 1.0));
        assert_eq!(minutes, 720.0);
        Ok(())
    }
}
