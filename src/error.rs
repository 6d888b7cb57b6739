/*  error.rs -- Errors
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

use crate::types_display::ERR;
use config::ConfigError;
use itertools::Itertools;
use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    io,
    path::PathBuf,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub struct VecError<E: Error>(pub Vec<E>);
impl<E: Error> Display for VecError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let err =
            |e: &E| "- ".to_string() + &e.to_string().lines().join("\n  ");
        let s = self.0.iter().map(err).join("\n");
        f.write_str(&s)
    }
}

impl<E: Error> Default for VecError<E> {
    fn default() -> Self {
        Self(vec![])
    }
}

//

#[derive(Debug)]
pub struct ClockError(ClockErrorKind);

impl Display for ClockError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let sep = "\n".to_string() + &" ".repeat("error: ".len());
        let s = format!("{ERR}error:{ERR:#} {}", self.0).lines().join(&sep);
        f.write_str(&s)
    }
}

impl ClockError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> exitcode::ExitCode {
        match &self.0 {
            ClockErrorKind::Config(ConfigError::File(_)) => exitcode::CONFIG,
            ClockErrorKind::Config(_) => exitcode::USAGE,
            ClockErrorKind::Ctrlc(_) | ClockErrorKind::Mpsc(_) => {
                exitcode::OSERR
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum ClockErrorKind {
    #[error("configuration failed:\n{0}")]
    Config(#[from] ConfigError),
    #[error("failed to set CTRL-C handler:\n{0}")]
    Ctrlc(#[from] ctrlc::Error),
    #[error("failed to handle CTRL-C:\n{0}")]
    Mpsc(#[from] std::sync::mpsc::RecvTimeoutError),
}

pub mod config {
    use super::*;

    #[derive(Debug, Error)]
    pub enum ConfigError {
        #[error("{0}")]
        File(#[from] ConfigFileError),
        #[error("{0}")]
        TimeZone(#[from] types::TimeZoneError),
    }

    #[derive(Debug, Error)]
    pub enum ConfigFileError {
        #[error("given path is not a file ({0})")]
        PathNotFile(PathBuf),
        #[error("unable to find configuration file. Use the -c flag.")]
        ConfigDirNotFound,
        #[error("unable to read file ({1}):\n{0}")]
        OpenFailed(io::Error, PathBuf),
        #[error("unable to deserialize file ({1}):\n{0}")]
        DeserializeFailed(toml::de::Error, PathBuf),
    }
}

pub mod types {
    use super::*;
    use crate::types::{
        MAX_LATITUDE, MAX_LONGITUDE, MAX_TIMEZONE, MIN_LATITUDE,
        MIN_LONGITUDE, MIN_TIMEZONE,
    };

    #[derive(Debug, Error)]
    #[error(
        "latitude must be between {MIN_LATITUDE}° and {MAX_LATITUDE}° ({0})"
    )]
    pub struct LatitudeError(pub f64);

    #[derive(Debug, Error)]
    #[error("longitude must be between {MIN_LONGITUDE}° and {MAX_LONGITUDE}° ({0})")]
    pub struct LongitudeError(pub f64);

    #[derive(Debug, Error)]
    #[error("time zone offset must be between {MIN_TIMEZONE}h and {MAX_TIMEZONE}h ({0})")]
    pub struct TimeZoneError(pub f64);

    #[derive(Debug, Error)]
    #[error("julian day must be a finite number ({0})")]
    pub struct JulianDayError(pub f64);

    #[derive(Debug, Error)]
    pub enum CoordinateError {
        #[error("{0}")]
        Latitude(#[from] LatitudeError),
        #[error("{0}")]
        Longitude(#[from] LongitudeError),
    }

    #[derive(Debug, Error)]
    #[error("location:\n{0}")]
    pub struct LocationError(#[from] VecError<CoordinateError>);

    #[derive(Debug, Error)]
    pub enum InvalidInput {
        #[error("{0}")]
        JulianDay(#[from] JulianDayError),
        #[error("{0}")]
        Latitude(#[from] LatitudeError),
        #[error("{0}")]
        Longitude(#[from] LongitudeError),
        #[error("{0}")]
        TimeZone(#[from] TimeZoneError),
    }

    /// Rejected arguments of [crate::sunrise_or_sunset]
    #[derive(Debug, Error)]
    #[error("invalid input:\n{0}")]
    pub struct InputError(#[from] VecError<InvalidInput>);

    impl InputError {
        pub fn errors(&self) -> &[InvalidInput] {
            &self.0 .0
        }
    }

    impl From<Vec<CoordinateError>> for LocationError {
        fn from(v: Vec<CoordinateError>) -> Self {
            Self(VecError(v))
        }
    }

    impl From<Vec<InvalidInput>> for InputError {
        fn from(v: Vec<InvalidInput>) -> Self {
            Self(VecError(v))
        }
    }
}

pub mod parse {
    use super::*;
    use std::num::{ParseFloatError, ParseIntError};

    #[derive(Debug, Error)]
    pub enum LatitudeError {
        #[error("{0} ({1})")]
        Parse(ParseFloatError, String),
        #[error("{0}")]
        Type(#[from] types::LatitudeError),
    }

    #[derive(Debug, Error)]
    pub enum LongitudeError {
        #[error("{0} ({1})")]
        Parse(ParseFloatError, String),
        #[error("{0}")]
        Type(#[from] types::LongitudeError),
    }

    #[derive(Debug, Error)]
    pub enum CoordinateError {
        #[error("{0}")]
        Latitude(#[from] LatitudeError),
        #[error("{0}")]
        Longitude(#[from] LongitudeError),
    }

    #[derive(Debug, Error)]
    pub enum LocationError {
        #[error("{0}")]
        Multiple(#[from] VecError<CoordinateError>),
        #[error("- invalid format, expected LAT:LON")]
        Fmt,
    }

    #[derive(Debug, Error)]
    pub enum TimeZoneError {
        #[error("{0} ({1})")]
        ParseFloat(ParseFloatError, String),
        #[error("{0} ({1})")]
        ParseInt(ParseIntError, String),
        #[error("minutes must be between 0 and 59 ({0})")]
        Minute(u8),
        #[error("{0}")]
        Type(#[from] types::TimeZoneError),
        #[error("invalid format, expected [+-]HH[:MM] or hours")]
        Fmt,
    }

    impl From<Vec<CoordinateError>> for LocationError {
        fn from(v: Vec<CoordinateError>) -> Self {
            Self::Multiple(VecError(v))
        }
    }
}

impl From<ConfigError> for ClockError {
    fn from(e: ConfigError) -> Self {
        Self(ClockErrorKind::Config(e))
    }
}

impl From<config::ConfigFileError> for ClockError {
    fn from(e: config::ConfigFileError) -> Self {
        Self(ClockErrorKind::Config(ConfigError::File(e)))
    }
}

impl From<ctrlc::Error> for ClockError {
    fn from(e: ctrlc::Error) -> Self {
        Self(ClockErrorKind::Ctrlc(e))
    }
}

impl From<std::sync::mpsc::RecvTimeoutError> for ClockError {
    fn from(e: std::sync::mpsc::RecvTimeoutError) -> Self {
        Self(ClockErrorKind::Mpsc(e))
    }
}
