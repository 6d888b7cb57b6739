use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use insta::assert_snapshot;
use solar_clock::{
    calc_calendar::is_leap_year, calc_solar::equation_of_time,
    sunrise_or_sunset, Direction, HorizonEvent, JulianDay, Location, Period,
    TimeZone,
};

fn found(e: HorizonEvent) -> (f64, f64) {
    match e {
        HorizonEvent::Found { jday, minutes, .. } => (jday, minutes),
        e => panic!("expected a sunrise or sunset, got {e:?}"),
    }
}

#[test]
fn invalid_arguments_are_all_reported() {
    let res =
        sunrise_or_sunset(Direction::Sunrise, f64::NAN, 95.0, 200.0, 20.0);
    let Err(e) = res else {
        panic!("expected an error, got {res:?}")
    };
    assert_snapshot!(e, @r"
    invalid input:
    - julian day must be a finite number (NaN)
    - latitude must be between -90° and 90° (95)
    - longitude must be between -180° and 180° (200)
    - time zone offset must be between -18h and 18h (20)
    ");

    let res = sunrise_or_sunset(Direction::Sunset, 2460480.5, 0.0, 0.0, 0.0);
    assert!(res.is_ok());
}

#[test]
fn calendar_walk() {
    let mut date = NaiveDate::from_ymd_opt(1999, 12, 1);
    let mut prev: Option<JulianDay> = None;
    while let Some(d) = date.filter(|d| d.year() < 2025) {
        let jd = JulianDay::from(d);
        if let Some(prev) = prev {
            assert_eq!(*jd - *prev, 1.0, "{d}");
        }

        let c = jd.to_calendar_date();
        assert_eq!(
            (c.year, c.month as u32, c.day),
            (d.year(), d.month(), d.day() as f64)
        );
        assert_eq!(jd.day_of_year() as u32, d.ordinal(), "{d}");

        prev = Some(jd);
        date = d.succ_opt();
    }

    assert!(is_leap_year(2000) && is_leap_year(2024));
    assert!(!is_leap_year(1900) && !is_leap_year(2023));
}

#[test]
fn equation_of_time_over_a_year() {
    let start = JulianDay::from_date(2024, 1, 1.0);
    for day in 0..366 {
        let t = *start.add_days(day as f64).to_century();
        let eot = equation_of_time(t);
        assert!((-17.0..=17.0).contains(&eot), "{day} {eot}");
    }
}

#[test]
fn equinox_is_symmetric_about_noon() -> Result<()> {
    let jd = *JulianDay::from_date(2024, 3, 20.0);
    let event = |d| sunrise_or_sunset(d, jd, 0.0, 0.0, 0.0);
    let (rise_jd, rise) = found(event(Direction::Sunrise)?);
    let (set_jd, set) = found(event(Direction::Sunset)?);

    assert_eq!((rise_jd, set_jd), (jd, jd));
    let midpoint = (rise + set) / 2.0;
    assert!((midpoint - 720.0).abs() < 10.0, "{midpoint}");
    Ok(())
}

#[test]
fn daylight_grows_towards_the_summer_solstice() -> Result<()> {
    let day_length = |month, day| -> Result<f64> {
        let jd = *JulianDay::from_date(2024, month, day);
        let event = |d| sunrise_or_sunset(d, jd, 52.52, 13.405, 1.0);
        let rise = event(Direction::Sunrise)?;
        let set = event(Direction::Sunset)?;
        Ok(found(set).1 - found(rise).1)
    };

    let lengths = [(1, 15.0), (3, 15.0), (5, 15.0), (6, 21.0)]
        .into_iter()
        .map(|(m, d)| day_length(m, d))
        .collect::<Result<Vec<_>>>()?;
    assert!(lengths.windows(2).all(|w| w[0] < w[1]), "{lengths:?}");
    // about 16h50m in Berlin at midsummer
    assert!((lengths[3] - 1010.0).abs() < 10.0, "{lengths:?}");
    Ok(())
}

#[test]
fn polar_events_point_to_nearby_days() -> Result<()> {
    let jd = *JulianDay::from_date(2024, 6, 21.0);
    let rise = sunrise_or_sunset(Direction::Sunrise, jd, 69.0, 18.0, 2.0)?;
    let set = sunrise_or_sunset(Direction::Sunset, jd, 69.0, 18.0, 2.0)?;

    let (
        HorizonEvent::Adjacent { jday: rise },
        HorizonEvent::Adjacent { jday: set },
    ) = (rise, set)
    else {
        panic!("expected adjacent days, got {rise:?} and {set:?}")
    };
    assert!(rise < jd && set > jd);

    let e = sunrise_or_sunset(Direction::Sunset, jd, 90.0, 0.0, 0.0)?;
    assert_eq!(e, HorizonEvent::Unresolved);
    assert_snapshot!(e, @"none within a year");
    Ok(())
}

#[test]
fn periods_of_a_day() -> Result<()> {
    let jd = JulianDay::from_date(2024, 6, 21.0);
    let loc = "52.52:13.405".parse::<Location>()?;
    let tz = "+02:00".parse::<TimeZone>()?;

    let periods = (0..24)
        .map(|h| Period::at(jd, h as f64 * 60.0 + 15.0, &loc, tz))
        .collect::<Vec<_>>();
    let nights = periods.iter().filter(|p| p.is_night()).count();
    // sunrise 04:43, sunset 21:33
    assert_eq!(nights, 7, "{periods:?}");
    assert!(periods[12..21].iter().all(|p| !p.is_night()));
    Ok(())
}
