//! Time series of sun positions for plotting.
//!
//! For a set of sample days of one year, the sun position is evaluated at fixed
//! local clock times. The result contains one sun path per day, iso-hour lines
//! that connect the same clock time across the sampled days, and optionally the
//! sun elevation above a panel plane.
//!
//! Local clock times are either local apparent solar time or an approximate civil
//! time: the zone time of the nearest 15° meridian plus a daylight-saving shift
//! looked up per date. This is a coarse heuristic, not a timezone database.

use std::collections::BTreeMap;

use log::debug;

use crate::ecliptic::ecliptic_coordinates_from_julian;
use crate::error::check_step_minutes;
use crate::math::{radians_to_degrees, round};
use crate::plane::PlaneOrientation;
use crate::position::solar_coordinates;
use crate::time::{CalendarMoment, CalendarSystem, JulianDate, gregorian_days_in_month};
use crate::types::{GeoLocation, HorizontalCoordinates};
use crate::{Error, Result};

/// Minutes per day
const MINUTES_PER_DAY: u32 = 1440;

/// Minutes per hour
const MINUTES_PER_HOUR: f64 = 60.0;

/// Degrees of longitude per hour of time
const DEGREES_PER_HOUR: f64 = 15.0;

/// How local clock times of the series are mapped to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockMode {
    /// Local apparent solar time: the sun culminates at 12:00.
    ///
    /// The offset from UTC is the longitude in hours plus the equation of time,
    /// evaluated once per sample day at local noon.
    #[default]
    SolarTime,
    /// Zone time of the nearest 15° meridian, plus the daylight-saving shift.
    CivilTime,
}

/// Daylight-saving rule used with [`ClockMode::CivilTime`].
pub trait DaylightSaving {
    /// Hours the civil clock runs ahead of zone time on the given date.
    fn shift_hours(&self, year: i32, month: u32, day: u32) -> f64;
}

/// Civil time equals zone time all year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoDaylightSaving;

impl DaylightSaving for NoDaylightSaving {
    fn shift_hours(&self, _year: i32, _month: u32, _day: u32) -> f64 {
        0.0
    }
}

/// European summer time: one hour from the last Sunday of March up to the last
/// Sunday of October.
///
/// Resolution is whole days; the switch at 01:00 UTC is not modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EuropeanSummerTime;

impl DaylightSaving for EuropeanSummerTime {
    fn shift_hours(&self, year: i32, month: u32, day: u32) -> f64 {
        let start = (3, last_sunday(year, 3));
        let end = (10, last_sunday(year, 10));
        if (month, day) >= start && (month, day) < end {
            1.0
        } else {
            0.0
        }
    }
}

fn last_sunday(year: i32, month: u32) -> u32 {
    let last_day = gregorian_days_in_month(year, month);
    last_day - JulianDate::from_date(year, month, last_day).weekday()
}

/// Daylight-saving shift taken from a chrono `TimeZone`.
///
/// The shift is the zone's UTC offset on the date minus its standard offset,
/// where the standard offset is the smaller of the offsets on January 1st and
/// July 1st of the same year.
#[cfg(feature = "chrono")]
#[derive(Debug, Clone)]
pub struct ZoneRules<Tz>(pub Tz);

#[cfg(feature = "chrono")]
impl<Tz: chrono::TimeZone> DaylightSaving for ZoneRules<Tz> {
    fn shift_hours(&self, year: i32, month: u32, day: u32) -> f64 {
        use chrono::{NaiveDate, Offset};

        let offset_seconds = |month: u32, day: u32| {
            NaiveDate::from_ymd_opt(year, month, day)
                .map(|date| self.0.offset_from_utc_date(&date).fix().local_minus_utc())
        };

        match (
            offset_seconds(month, day),
            offset_seconds(1, 1),
            offset_seconds(7, 1),
        ) {
            (Some(current), Some(january), Some(july)) => {
                f64::from(current - january.min(july)) / 3600.0
            }
            _ => 0.0,
        }
    }
}

/// The 21st of every month, a common choice of sample days.
#[must_use]
pub fn standard_sample_days() -> Vec<(u32, u32)> {
    (1..=12).map(|month| (month, 21)).collect()
}

/// One sample of the sun position at a local clock time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunPathPoint {
    /// Local clock time in hours since midnight
    pub clock_hours: f64,
    /// Azimuth in degrees, 0 = south, negative towards east
    pub azimuth_deg: f64,
    /// Geometric elevation in degrees
    pub elevation_deg: f64,
    /// Elevation corrected for atmospheric refraction, in degrees
    pub elevation_refracted_deg: f64,
}

impl SunPathPoint {
    fn new(clock_hours: f64, sun: &HorizontalCoordinates) -> Self {
        Self {
            clock_hours,
            azimuth_deg: sun.azimuth_deg(),
            elevation_deg: sun.elevation_deg(),
            elevation_refracted_deg: sun.elevation_refracted_deg(),
        }
    }
}

/// Sun path of one sample day, above-horizon samples only.
#[derive(Debug, Clone, PartialEq)]
pub struct DayPath {
    /// Month of the sample day
    pub month: u32,
    /// Day of month of the sample day
    pub day: u32,
    /// Hours added to UTC to get the local clock time on this day
    pub utc_offset_hours: f64,
    /// Samples in clock order
    pub points: Vec<SunPathPoint>,
}

impl DayPath {
    /// (azimuth, elevation) pairs in degrees.
    #[must_use]
    pub fn xy(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .map(|p| (p.azimuth_deg, p.elevation_deg))
            .collect()
    }
}

/// A sample on an iso-hour line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourLinePoint {
    /// Month of the sample day
    pub month: u32,
    /// Day of month of the sample day
    pub day: u32,
    /// Azimuth in degrees, 0 = south, negative towards east
    pub azimuth_deg: f64,
    /// Geometric elevation in degrees
    pub elevation_deg: f64,
}

/// Sun positions at the same local clock time across all sample days.
#[derive(Debug, Clone, PartialEq)]
pub struct HourLine {
    /// Local clock time in minutes since midnight
    pub clock_minutes: u32,
    /// Samples in sample-day order
    pub points: Vec<HourLinePoint>,
}

impl HourLine {
    /// Local clock time in hours.
    #[must_use]
    pub fn clock_hours(&self) -> f64 {
        f64::from(self.clock_minutes) / 60.0
    }

    /// (azimuth, elevation) pairs in degrees.
    #[must_use]
    pub fn xy(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .map(|p| (p.azimuth_deg, p.elevation_deg))
            .collect()
    }
}

/// Sun elevation above the panel plane at one local clock time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExposurePoint {
    /// Local clock time in hours since midnight
    pub clock_hours: f64,
    /// Elevation above the panel plane in degrees (negative = sun behind the panel)
    pub relative_elevation_deg: f64,
    /// Geometric elevation above the horizon in degrees
    pub elevation_deg: f64,
}

/// Panel exposure of one sample day, above-horizon samples only.
#[derive(Debug, Clone, PartialEq)]
pub struct DayExposure {
    /// Month of the sample day
    pub month: u32,
    /// Day of month of the sample day
    pub day: u32,
    /// Samples in clock order
    pub points: Vec<ExposurePoint>,
}

impl DayExposure {
    /// (clock hours, relative elevation) pairs.
    #[must_use]
    pub fn xy(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .map(|p| (p.clock_hours, p.relative_elevation_deg))
            .collect()
    }
}

/// All series produced by [`SeriesBuilder::build`].
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSet {
    /// One sun path per sample day, in sample order
    pub sun_paths: Vec<DayPath>,
    /// Iso-hour lines, ordered by clock time
    pub hour_lines: Vec<HourLine>,
    /// Panel exposure per sample day; empty when no panel was configured
    pub panel_exposure: Vec<DayExposure>,
}

/// Builds sun path, iso-hour and panel exposure series.
///
/// # Example
/// ```
/// use solar_exposure::series::{ClockMode, EuropeanSummerTime, SeriesBuilder};
/// use solar_exposure::{GeoLocation, PlaneOrientation};
///
/// let munich = GeoLocation::new(48.1, 11.6).unwrap();
/// let series = SeriesBuilder::new(munich, 2021, vec![(3, 21), (6, 21), (12, 21)])
///     .clock(ClockMode::CivilTime)
///     .daylight_saving(EuropeanSummerTime)
///     .panel(PlaneOrientation::from_degrees(30.0, 0.0).unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(series.sun_paths.len(), 3);
/// assert!(series.sun_paths[1].points.len() > series.sun_paths[2].points.len());
/// ```
#[derive(Debug, Clone)]
pub struct SeriesBuilder<D = NoDaylightSaving> {
    location: GeoLocation,
    year: i32,
    sample_days: Vec<(u32, u32)>,
    clock: ClockMode,
    step_minutes: u32,
    panel: Option<PlaneOrientation>,
    daylight_saving: D,
}

impl SeriesBuilder<NoDaylightSaving> {
    /// Creates a builder for the given location, year and (month, day) samples.
    ///
    /// Defaults: solar time, hourly samples, no panel, no daylight saving.
    #[must_use]
    pub fn new(location: GeoLocation, year: i32, sample_days: impl Into<Vec<(u32, u32)>>) -> Self {
        Self {
            location,
            year,
            sample_days: sample_days.into(),
            clock: ClockMode::default(),
            step_minutes: 60,
            panel: None,
            daylight_saving: NoDaylightSaving,
        }
    }
}

impl<D: DaylightSaving> SeriesBuilder<D> {
    /// Sets how local clock times map to UTC.
    #[must_use]
    pub const fn clock(mut self, clock: ClockMode) -> Self {
        self.clock = clock;
        self
    }

    /// Sets the sampling step in minutes; must divide 1440.
    #[must_use]
    pub const fn step_minutes(mut self, minutes: u32) -> Self {
        self.step_minutes = minutes;
        self
    }

    /// Adds panel exposure series for the given plane.
    #[must_use]
    pub const fn panel(mut self, panel: PlaneOrientation) -> Self {
        self.panel = Some(panel);
        self
    }

    /// Sets the daylight-saving rule used in [`ClockMode::CivilTime`].
    #[must_use]
    pub fn daylight_saving<E: DaylightSaving>(self, rules: E) -> SeriesBuilder<E> {
        SeriesBuilder {
            location: self.location,
            year: self.year,
            sample_days: self.sample_days,
            clock: self.clock,
            step_minutes: self.step_minutes,
            panel: self.panel,
            daylight_saving: rules,
        }
    }

    /// Hours added to UTC to get the local clock time on a sample day.
    #[must_use]
    pub fn utc_offset_hours(&self, month: u32, day: u32) -> f64 {
        let longitude_hours = self.location.longitude() / DEGREES_PER_HOUR;
        match self.clock {
            ClockMode::SolarTime => {
                let local_noon = CalendarMoment::from_components(self.year, month, day, 12, 0, 0)
                    .julian_date(CalendarSystem::Gregorian)
                    .add_days(-longitude_hours / 24.0);
                let sun = ecliptic_coordinates_from_julian(local_noon);
                longitude_hours + sun.equation_of_time_minutes() / MINUTES_PER_HOUR
            }
            ClockMode::CivilTime => {
                round(longitude_hours) + self.daylight_saving.shift_hours(self.year, month, day)
            }
        }
    }

    /// Evaluates the sun position for every sample day and clock time.
    ///
    /// # Errors
    /// Returns `InvalidStep` if the step does not divide a day, `InvalidDateTime`
    /// if a sample day does not exist in the configured year.
    pub fn build(&self) -> Result<SeriesSet> {
        check_step_minutes(self.step_minutes)?;
        for &(month, day) in &self.sample_days {
            check_sample_day(self.year, month, day)?;
        }

        let mut sun_paths = Vec::with_capacity(self.sample_days.len());
        let mut panel_exposure = Vec::new();
        let mut hour_lines: BTreeMap<u32, Vec<HourLinePoint>> = BTreeMap::new();

        for &(month, day) in &self.sample_days {
            let utc_offset_hours = self.utc_offset_hours(month, day);
            let offset_seconds = round(utc_offset_hours * 3600.0) as i64;
            let local_midnight = CalendarMoment::date(self.year, month, day);

            let mut points = Vec::new();
            let mut exposure = Vec::new();

            for clock_minutes in (0..MINUTES_PER_DAY).step_by(self.step_minutes as usize) {
                let utc = local_midnight.offset_seconds(
                    i64::from(clock_minutes) * 60 - offset_seconds,
                    CalendarSystem::Gregorian,
                );
                let sun = solar_coordinates(&utc, &self.location);
                if !sun.is_sun_up() {
                    continue;
                }

                let clock_hours = f64::from(clock_minutes) / 60.0;
                let point = SunPathPoint::new(clock_hours, &sun);
                hour_lines.entry(clock_minutes).or_default().push(HourLinePoint {
                    month,
                    day,
                    azimuth_deg: point.azimuth_deg,
                    elevation_deg: point.elevation_deg,
                });
                points.push(point);

                if let Some(panel) = &self.panel {
                    exposure.push(ExposurePoint {
                        clock_hours,
                        relative_elevation_deg: radians_to_degrees(panel.relative_elevation(&sun)),
                        elevation_deg: point.elevation_deg,
                    });
                }
            }

            debug!(
                "{}-{month:02}-{day:02}: UTC offset {utc_offset_hours:+.3} h, {} samples above horizon",
                self.year,
                points.len()
            );

            if self.panel.is_some() {
                panel_exposure.push(DayExposure {
                    month,
                    day,
                    points: exposure,
                });
            }
            sun_paths.push(DayPath {
                month,
                day,
                utc_offset_hours,
                points,
            });
        }

        let hour_lines: Vec<HourLine> = hour_lines
            .into_iter()
            .map(|(clock_minutes, points)| HourLine {
                clock_minutes,
                points,
            })
            .collect();

        debug!(
            "built {} sun paths and {} hour lines for ({:.3}, {:.3})",
            sun_paths.len(),
            hour_lines.len(),
            self.location.latitude(),
            self.location.longitude()
        );

        Ok(SeriesSet {
            sun_paths,
            hour_lines,
            panel_exposure,
        })
    }
}

/// Checks that a (month, day) sample exists in the Gregorian calendar year.
pub(crate) fn check_sample_day(year: i32, month: u32, day: u32) -> Result<()> {
    if !(1..=12).contains(&month) {
        return Err(Error::invalid_datetime("month must be between 1 and 12"));
    }
    if day == 0 || day > gregorian_days_in_month(year, month) {
        return Err(Error::invalid_datetime("day is out of range for month"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn munich() -> GeoLocation {
        GeoLocation::new(48.1, 11.6).unwrap()
    }

    #[test]
    fn test_sun_paths_exclude_samples_below_horizon() {
        let series = SeriesBuilder::new(munich(), 2021, standard_sample_days())
            .step_minutes(15)
            .build()
            .unwrap();

        assert_eq!(series.sun_paths.len(), 12);
        for path in &series.sun_paths {
            assert!(!path.points.is_empty());
            for point in &path.points {
                assert!(
                    point.elevation_deg > 0.0,
                    "{}-{}: {point:?}",
                    path.month,
                    path.day
                );
            }
        }
        assert!(series.panel_exposure.is_empty());
    }

    #[test]
    fn test_polar_night_has_empty_path() {
        let tromso = GeoLocation::new(69.65, 18.96).unwrap();
        let series = SeriesBuilder::new(tromso, 2021, vec![(12, 21), (6, 21)])
            .build()
            .unwrap();
        assert!(series.sun_paths[0].points.is_empty());
        // Midnight sun: every hourly sample is above the horizon
        assert_eq!(series.sun_paths[1].points.len(), 24);
    }

    #[test]
    fn test_solar_time_culminates_at_noon() {
        let series = SeriesBuilder::new(munich(), 2021, vec![(6, 21)])
            .step_minutes(5)
            .build()
            .unwrap();
        let highest = series.sun_paths[0]
            .points
            .iter()
            .max_by(|a, b| a.elevation_deg.total_cmp(&b.elevation_deg))
            .unwrap();
        assert_eq!(highest.clock_hours, 12.0, "{highest:?}");
    }

    #[test]
    fn test_civil_time_offsets() {
        let builder = SeriesBuilder::new(munich(), 2021, vec![(1, 15), (7, 15)])
            .clock(ClockMode::CivilTime)
            .daylight_saving(EuropeanSummerTime);
        assert_eq!(builder.utc_offset_hours(1, 15), 1.0);
        assert_eq!(builder.utc_offset_hours(7, 15), 2.0);

        // Mid-January the true sun runs about 9.5 min behind mean time
        let solar = SeriesBuilder::new(munich(), 2021, vec![(1, 15)]);
        let equation_of_time = (solar.utc_offset_hours(1, 15) - 11.6 / 15.0) * 60.0;
        assert!((equation_of_time + 9.48).abs() < 0.05, "{equation_of_time}");

        let west = GeoLocation::new(40.4, -3.7).unwrap();
        let madrid = SeriesBuilder::new(west, 2021, vec![(1, 15)]).clock(ClockMode::CivilTime);
        assert_eq!(madrid.utc_offset_hours(1, 15), 0.0);
    }

    #[test]
    fn test_european_summer_time_bounds() {
        // 2021: summer time from 2021-03-28 to 2021-10-31
        let rule = EuropeanSummerTime;
        assert_eq!(rule.shift_hours(2021, 3, 27), 0.0);
        assert_eq!(rule.shift_hours(2021, 3, 28), 1.0);
        assert_eq!(rule.shift_hours(2021, 8, 6), 1.0);
        assert_eq!(rule.shift_hours(2021, 10, 30), 1.0);
        assert_eq!(rule.shift_hours(2021, 10, 31), 0.0);
        assert_eq!(rule.shift_hours(2021, 12, 24), 0.0);
        assert_eq!(last_sunday(2024, 3), 31);
        assert_eq!(last_sunday(2024, 10), 27);
    }

    #[test]
    fn test_civil_time_shifts_path_by_an_hour() {
        let solar_like = SeriesBuilder::new(GeoLocation::new(48.1, 15.0).unwrap(), 2021, vec![(7, 1)])
            .clock(ClockMode::CivilTime)
            .build()
            .unwrap();
        let summer = SeriesBuilder::new(GeoLocation::new(48.1, 15.0).unwrap(), 2021, vec![(7, 1)])
            .clock(ClockMode::CivilTime)
            .daylight_saving(EuropeanSummerTime)
            .build()
            .unwrap();

        let at = |set: &SeriesSet, hours: f64| {
            set.sun_paths[0]
                .points
                .iter()
                .find(|p| (p.clock_hours - hours).abs() < 1e-9)
                .copied()
                .unwrap()
        };
        let winter_clock = at(&solar_like, 12.0);
        let summer_clock = at(&summer, 13.0);
        assert!((winter_clock.azimuth_deg - summer_clock.azimuth_deg).abs() < 1e-9);
        assert!((winter_clock.elevation_deg - summer_clock.elevation_deg).abs() < 1e-9);
    }

    #[test]
    fn test_series_before_calendar_reform() {
        let at_noon = |set: &SeriesSet| {
            set.sun_paths[0]
                .points
                .iter()
                .find(|p| p.clock_hours == 12.0)
                .copied()
                .unwrap()
        };

        // Zone time UTC+1: 12:00 on the clock is 11:00 UTC of the same proleptic date
        let civil = SeriesBuilder::new(munich(), 1500, vec![(6, 21)])
            .clock(ClockMode::CivilTime)
            .build()
            .unwrap();
        let direct = solar_coordinates(
            &CalendarMoment::from_components(1500, 6, 21, 11, 0, 0),
            &munich(),
        );
        let noon = at_noon(&civil);
        assert!((noon.elevation_deg - direct.elevation_deg()).abs() < 1e-9);
        assert!((noon.azimuth_deg - direct.azimuth_deg()).abs() < 1e-9);

        let solar = SeriesBuilder::new(munich(), 1500, vec![(6, 21)]).build().unwrap();
        let noon = at_noon(&solar);
        assert!((noon.elevation_deg - 65.41).abs() < 0.01, "{noon:?}");
        assert!(noon.azimuth_deg.abs() < 0.1, "{noon:?}");
    }

    #[test]
    fn test_hour_lines_group_by_clock_time() {
        let days = vec![(3, 21), (6, 21), (9, 21), (12, 21)];
        let series = SeriesBuilder::new(munich(), 2021, days.clone())
            .build()
            .unwrap();

        let mut previous = None;
        for line in &series.hour_lines {
            if let Some(previous) = previous {
                assert!(line.clock_minutes > previous);
            }
            previous = Some(line.clock_minutes);
            assert!(!line.points.is_empty());
            assert!(line.points.len() <= days.len());
            for point in &line.points {
                assert!(point.elevation_deg > 0.0);
            }
        }

        let noon = series
            .hour_lines
            .iter()
            .find(|line| line.clock_minutes == 720)
            .unwrap();
        let order: Vec<(u32, u32)> = noon.points.iter().map(|p| (p.month, p.day)).collect();
        assert_eq!(order, days);
        assert_eq!(noon.clock_hours(), 12.0);
        assert_eq!(noon.xy().len(), 4);

        // Every visible sample appears in exactly one hour line
        let path_total: usize = series.sun_paths.iter().map(|p| p.points.len()).sum();
        let line_total: usize = series.hour_lines.iter().map(|l| l.points.len()).sum();
        assert_eq!(path_total, line_total);
    }

    #[test]
    fn test_panel_exposure_series() {
        let flat = SeriesBuilder::new(munich(), 2021, vec![(6, 21)])
            .panel(PlaneOrientation::horizontal())
            .build()
            .unwrap();
        let exposure = &flat.panel_exposure[0];
        assert_eq!(exposure.points.len(), flat.sun_paths[0].points.len());
        for point in &exposure.points {
            assert!((point.relative_elevation_deg - point.elevation_deg).abs() < 1e-12);
        }

        let tilted = SeriesBuilder::new(munich(), 2021, vec![(12, 21)])
            .panel(PlaneOrientation::from_degrees(60.0, 0.0).unwrap())
            .build()
            .unwrap();
        let noon = tilted.panel_exposure[0]
            .xy()
            .into_iter()
            .find(|(hours, _)| (*hours - 12.0).abs() < 1e-9)
            .unwrap();
        // Winter noon sun (about 18.5°) hits a steep south panel almost head-on
        assert!(noon.1 > 70.0, "got {}", noon.1);
    }

    #[test]
    fn test_invalid_settings() {
        assert_eq!(
            SeriesBuilder::new(munich(), 2021, vec![(6, 21)])
                .step_minutes(7)
                .build(),
            Err(Error::invalid_step(7))
        );
        assert!(
            SeriesBuilder::new(munich(), 2021, vec![(2, 29)])
                .build()
                .is_err()
        );
        assert!(
            SeriesBuilder::new(munich(), 2024, vec![(2, 29)])
                .build()
                .is_ok()
        );
        assert!(
            SeriesBuilder::new(munich(), 2021, vec![(13, 1)])
                .build()
                .is_err()
        );
    }

    #[test]
    fn test_day_path_xy() {
        let series = SeriesBuilder::new(munich(), 2021, vec![(6, 21)])
            .build()
            .unwrap();
        let path = &series.sun_paths[0];
        let xy = path.xy();
        assert_eq!(xy.len(), path.points.len());
        assert_eq!(xy[0], (path.points[0].azimuth_deg, path.points[0].elevation_deg));
        // Morning samples come first and lie east of south
        assert!(xy[0].0 < 0.0);
    }

    #[test]
    #[cfg(feature = "chrono")]
    fn test_zone_rules_from_chrono() {
        use chrono::FixedOffset;

        let fixed = ZoneRules(FixedOffset::east_opt(3600).unwrap());
        assert_eq!(fixed.shift_hours(2021, 7, 1), 0.0);
        assert_eq!(fixed.shift_hours(2021, 2, 30), 0.0);
    }
}
