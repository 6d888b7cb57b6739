/*  cli.rs -- Command line interface
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
    config::DEFAULT_SLEEP_DURATION,
    types::{Location, TimeZone},
    types_parse::naive_time,
};
use chrono::{NaiveDate, NaiveTime};
use clap::{
    ArgAction, Args, ColorChoice, Command, CommandFactory, Parser, Subcommand,
};
use const_format::formatcp;
use std::{path::PathBuf, str::FromStr};
use tracing::level_filters::LevelFilter;

const VERSION: &str = {
    const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_DESCRIBE: &str = env!("VERGEN_GIT_DESCRIBE");
    const GIT_COMMIT_DATE: &str = env!("VERGEN_GIT_COMMIT_DATE");

    formatcp!("{PKG_VERSION} ({GIT_DESCRIBE} {GIT_COMMIT_DATE})")
};

const VERSION_LONG: &str = {
    const RUSTC_SEMVER: &str = env!("VERGEN_RUSTC_SEMVER");
    const RUSTC_HOST_TRIPLE: &str = env!("VERGEN_RUSTC_HOST_TRIPLE");
    const CARGO_FEATURES: &str = env!("VERGEN_CARGO_FEATURES");
    const CARGO_TARGET_TRIPLE: &str = env!("VERGEN_CARGO_TARGET_TRIPLE");

    formatcp!(
        "{VERSION}

rustc version:       {RUSTC_SEMVER}
rustc host triple:   {RUSTC_HOST_TRIPLE}
cargo features:      {CARGO_FEATURES}
cargo target triple: {CARGO_TARGET_TRIPLE}"
    )
};

const ABOUT: &str = "Sunrise, sunset and solar position from the NOAA \
    solar calculator algorithms";

const AFTER_HELP: &str = formatcp!(
    "Locations are given as LAT:LON in degrees, north and east positive.
Time zone offsets are given as [+-]HH:MM or in hours (e.g. -3.5). The system
clock's current offset is used when no offset is given.

The daemon mode checks the period every {DEFAULT_SLEEP_DURATION}ms by default."
);

#[derive(Debug, Parser)]
#[command(version = VERSION, long_version = VERSION_LONG, about = ABOUT)]
#[command(after_help = AFTER_HELP, propagate_version = true)]
pub struct CliArgs {
    #[command(subcommand)]
    pub mode: ModeArgs,
    #[command(flatten)]
    pub verbosity: VerbosityArgs,
    #[arg(long, global = true, value_name = "WHEN", display_order(100))]
    pub color: Option<ColorChoice>,
}

#[derive(Debug, Subcommand)]
pub enum ModeArgs {
    #[command(about = "Print sunrise, solar noon and sunset")]
    Events {
        #[command(flatten)]
        c: CmdArgs,
    },
    #[command(about = "Print the azimuth and elevation of the sun")]
    Position {
        #[command(flatten)]
        c: CmdArgs,
        #[command(flatten)]
        t: TimeArgs,
    },
    #[command(about = "Print the position of the sun for every hour")]
    Print {
        #[command(flatten)]
        c: CmdArgs,
    },
    #[command(about = "Print the current period of the day and its progress")]
    Period {
        #[command(flatten)]
        c: CmdArgs,
        #[command(flatten)]
        t: TimeArgs,
    },
    #[command(about = "Print the period whenever it changes until CTRL-C")]
    Daemon {
        #[command(flatten)]
        c: CmdArgs,
        #[arg(long, value_name = "MILLISECONDS")]
        sleep_duration: Option<u64>,
    },
}

#[derive(Debug, Args)]
pub struct CmdArgs {
    #[arg(
        long,
        short,
        value_name = "LAT:LON",
        value_parser = Location::from_str,
        allow_hyphen_values = true
    )]
    pub location: Option<Location>,

    #[arg(
        long,
        short = 'z',
        value_name = "OFFSET",
        value_parser = TimeZone::from_str,
        allow_hyphen_values = true
    )]
    pub timezone: Option<TimeZone>,

    #[arg(long, short, value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,

    #[arg(long, short, display_order(100), value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct TimeArgs {
    /// Local clock time, defaults to now
    #[arg(long, short, value_name = "HH:MM", value_parser = naive_time)]
    pub time: Option<NaiveTime>,
}

#[derive(Debug, Args)]
pub struct VerbosityArgs {
    #[arg(
        long,
        short,
        global = true,
        action = ArgAction::SetTrue,
        conflicts_with = "verbose",
        display_order(100)
    )]
    pub quiet: bool,
    #[arg(
        long,
        short,
        global = true,
        action = ArgAction::SetTrue,
        display_order(100)
    )]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    #[default]
    Low,
    High,
}

impl From<VerbosityArgs> for Verbosity {
    fn from(args: VerbosityArgs) -> Self {
        match args {
            VerbosityArgs { quiet: true, .. } => Self::Quiet,
            VerbosityArgs { verbose: true, .. } => Self::High,
            VerbosityArgs { .. } => Self::Low,
        }
    }
}

impl Verbosity {
    pub fn level_filter(&self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::WARN,
            Self::Low => LevelFilter::INFO,
            Self::High => LevelFilter::DEBUG,
        }
    }
}

pub trait ClapColorChoiceExt {
    fn to_choice(self) -> anstream::ColorChoice;
}

impl ClapColorChoiceExt for ColorChoice {
    fn to_choice(self) -> anstream::ColorChoice {
        match self {
            ColorChoice::Auto => anstream::ColorChoice::Auto,
            ColorChoice::Always => anstream::ColorChoice::Always,
            ColorChoice::Never => anstream::ColorChoice::Never,
        }
    }
}

/// Used by the completion and man page generator
pub fn cli_args_command() -> Command {
    CliArgs::command()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn parse(args: &[&str]) -> Result<CliArgs> {
        let args = ["solar-clock"].iter().chain(args);
        Ok(CliArgs::try_parse_from(args)?)
    }

    #[test]
    fn command_is_valid() {
        cli_args_command().debug_assert();
    }

    #[test]
    fn negative_values() -> Result<()> {
        let args = parse(&["events", "-l", "-33.9:-18.4", "-z", "-03:30"])?;
        let ModeArgs::Events { c } = args.mode else {
            panic!("expected events mode")
        };
        let loc = c.location.map(|l| (*l.lat, *l.lon));
        assert_eq!(loc, Some((-33.9, -18.4)));
        assert_eq!(c.timezone.map(|tz| *tz), Some(-3.5));
        Ok(())
    }

    #[test]
    fn global_flags_after_subcommand() -> Result<()> {
        let args = parse(&["period", "-t", "13:30", "-v", "--color", "never"])?;
        assert_eq!(Verbosity::from(args.verbosity), Verbosity::High);
        assert_eq!(args.color, Some(ColorChoice::Never));
        let ModeArgs::Period { t, .. } = args.mode else {
            panic!("expected period mode")
        };
        assert_eq!(t.time, NaiveTime::from_hms_opt(13, 30, 0));
        Ok(())
    }

    #[test]
    fn rejected_arguments() {
        assert!(parse(&["events", "-l", "91:0"]).is_err());
        assert!(parse(&["events", "-z", "+25:00"]).is_err());
        assert!(parse(&["events", "-d", "2024-02-30"]).is_err());
        assert!(parse(&["position", "-t", "24:10"]).is_err());
        assert!(parse(&["events", "-q", "-v"]).is_err());
        assert!(parse(&[]).is_err());
    }
}
