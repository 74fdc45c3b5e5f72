//! Calendar and Julian Date conversions.
//!
//! The conversion follows Meeus, "Astronomical Algorithms", chapter 7. Both the
//! Gregorian and the proleptic Julian calendar are supported; they share the same
//! day count and differ only in the leap-year correction term.

#![allow(clippy::unreadable_literal)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::cast_sign_loss)]

use crate::math::floor;
use crate::{Error, Result};
#[cfg(feature = "chrono")]
use chrono::{Datelike, TimeZone, Timelike};

/// Seconds per day (86,400)
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Julian Day Number for J2000.0 epoch (2000-01-01 12:00:00 UTC)
pub const J2000_JDN: f64 = 2_451_545.0;

/// Days per Julian century
const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Calendar used to interpret a civil date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CalendarSystem {
    /// Gregorian calendar, also applied proleptically before 1582-10-15.
    #[default]
    Gregorian,
    /// Proleptic Julian calendar (no century leap-year correction).
    Julian,
}

/// Calculates the Julian Date of a civil date and time.
///
/// January and February count as months 13 and 14 of the previous year. No range
/// checks are applied: the caller supplies valid calendar components, and values
/// such as `hour = 24` simply roll into the next day.
///
/// # Example
/// ```
/// # use solar_exposure::time::{julian_date, CalendarSystem};
/// let jd = julian_date(2000, 1, 1, 12, 0, 0, CalendarSystem::Gregorian);
/// assert_eq!(jd, 2_451_545.0);
///
/// let origin = julian_date(-4712, 1, 1, 12, 0, 0, CalendarSystem::Julian);
/// assert_eq!(origin, 0.0);
/// ```
#[must_use]
pub fn julian_date(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    calendar: CalendarSystem,
) -> f64 {
    let mut y = f64::from(year);
    let mut m = f64::from(month);

    if month <= 2 {
        y -= 1.0;
        m += 12.0;
    }

    let day_fraction =
        (f64::from(second) + f64::from(minute) * 60.0 + f64::from(hour) * 3600.0)
            / SECONDS_PER_DAY;

    let b = match calendar {
        CalendarSystem::Gregorian => 2.0 - floor(y / 100.0) + floor(y / 400.0),
        CalendarSystem::Julian => 0.0,
    };

    floor(365.25 * (y + 4716.0)) + floor(30.6001 * (m + 1.0)) + f64::from(day) + day_fraction + b
        - 1524.5
}

/// Converts a Julian Date back to a calendar date.
///
/// Returns `(year, month, day)` where the day carries the fraction of the day
/// elapsed since midnight. This is the exact inverse of [`julian_date`] for the same
/// calendar: both read [`CalendarSystem::Gregorian`] proleptically, so dates before
/// 1582-10-15 come back in the Gregorian calendar as well. Valid for non-negative
/// Julian Dates.
///
/// # Example
/// ```
/// # use solar_exposure::time::{calendar_date, CalendarSystem};
/// let (year, month, day) = calendar_date(2_451_545.0, CalendarSystem::Gregorian);
/// assert_eq!((year, month), (2000, 1));
/// assert!((day - 1.5).abs() < 1e-9);
/// ```
#[must_use]
pub fn calendar_date(jd: f64, calendar: CalendarSystem) -> (i32, u32, f64) {
    let shifted = jd + 0.5;
    let z = floor(shifted);
    let f = shifted - z;

    let a = if calendar == CalendarSystem::Gregorian {
        let alpha = floor((z - 1_867_216.25) / 36_524.25);
        z + 1.0 + alpha - floor(alpha / 4.0)
    } else {
        z
    };

    let b = a + 1524.0;
    let c = floor((b - 122.1) / 365.25);
    let d = floor(365.25 * c);
    let e = floor((b - d) / 30.6001);

    let day = b - d - floor(30.6001 * e) + f;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };

    (year as i32, month as u32, day)
}

/// A UTC civil timestamp.
///
/// Fields are public and unchecked: the numeric core treats valid ranges as a
/// caller precondition. Use [`CalendarMoment::new`] to have them validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarMoment {
    /// Year (can be zero or negative for BCE years, astronomical numbering)
    pub year: i32,
    /// Month (1-12)
    pub month: u32,
    /// Day of month (1-31)
    pub day: u32,
    /// Hour (0-23)
    pub hour: u32,
    /// Minute (0-59)
    pub minute: u32,
    /// Second (0-59)
    pub second: u32,
}

impl CalendarMoment {
    /// Creates a validated calendar moment.
    ///
    /// Day ranges follow the proleptic Gregorian calendar, the calendar in which
    /// the position chain reads a moment. Dates before 1582-10-15 are therefore
    /// Gregorian dates too: 1500-02-29 is rejected and 1582-10-10 is accepted.
    ///
    /// # Errors
    /// Returns `InvalidDateTime` if any component is outside its valid range.
    ///
    /// # Example
    /// ```
    /// # use solar_exposure::time::CalendarMoment;
    /// assert!(CalendarMoment::new(2024, 2, 29, 12, 0, 0).is_ok());
    /// assert!(CalendarMoment::new(2023, 2, 29, 12, 0, 0).is_err());
    /// ```
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::invalid_datetime("month must be between 1 and 12"));
        }
        if !(1..=31).contains(&day) {
            return Err(Error::invalid_datetime("day must be between 1 and 31"));
        }
        if hour > 23 {
            return Err(Error::invalid_datetime("hour must be between 0 and 23"));
        }
        if minute > 59 {
            return Err(Error::invalid_datetime("minute must be between 0 and 59"));
        }
        if second > 59 {
            return Err(Error::invalid_datetime("second must be between 0 and 59"));
        }
        if day > gregorian_days_in_month(year, month) {
            return Err(Error::invalid_datetime("day is out of range for month"));
        }

        Ok(Self::from_components(year, month, day, hour, minute, second))
    }

    /// Creates a calendar moment without validation.
    #[must_use]
    pub const fn from_components(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Midnight UTC of the given date, without validation.
    #[must_use]
    pub const fn date(year: i32, month: u32, day: u32) -> Self {
        Self::from_components(year, month, day, 0, 0, 0)
    }

    /// Converts a timezone-aware chrono `DateTime` to a UTC calendar moment.
    ///
    /// Sub-second precision is dropped.
    #[cfg(feature = "chrono")]
    pub fn from_datetime<Tz: TimeZone>(datetime: &chrono::DateTime<Tz>) -> Self {
        let utc = datetime.with_timezone(&chrono::Utc);
        Self::from_components(
            utc.year(),
            utc.month(),
            utc.day(),
            utc.hour(),
            utc.minute(),
            utc.second(),
        )
    }

    /// The same date at midnight UTC.
    #[must_use]
    pub const fn midnight(&self) -> Self {
        Self::date(self.year, self.month, self.day)
    }

    /// Hours elapsed since midnight, including minutes and seconds.
    #[must_use]
    pub fn hours_of_day(&self) -> f64 {
        f64::from(self.hour) + f64::from(self.minute) / 60.0 + f64::from(self.second) / 3600.0
    }

    /// Julian Date of this moment in the given calendar.
    #[must_use]
    pub fn julian_date(&self, calendar: CalendarSystem) -> JulianDate {
        JulianDate(julian_date(
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
            calendar,
        ))
    }

    /// Shifts this moment by a signed number of seconds, rolling over days, months
    /// and years as needed.
    ///
    /// # Example
    /// ```
    /// # use solar_exposure::time::{CalendarMoment, CalendarSystem};
    /// let new_year = CalendarMoment::from_components(2023, 12, 31, 23, 30, 0);
    /// let later = new_year.offset_seconds(3600, CalendarSystem::Gregorian);
    /// assert_eq!(later, CalendarMoment::from_components(2024, 1, 1, 0, 30, 0));
    /// ```
    #[must_use]
    pub fn offset_seconds(&self, seconds: i64, calendar: CalendarSystem) -> Self {
        let seconds_of_day = i64::from(self.hour) * 3600
            + i64::from(self.minute) * 60
            + i64::from(self.second)
            + seconds;
        let day_shift = seconds_of_day.div_euclid(86_400);
        let remainder = seconds_of_day.rem_euclid(86_400);

        let midnight = julian_date(self.year, self.month, self.day, 0, 0, 0, calendar)
            + day_shift as f64;
        let (year, month, day) = calendar_date(midnight, calendar);

        Self::from_components(
            year,
            month,
            floor(day + 1e-9) as u32,
            (remainder / 3600) as u32,
            ((remainder % 3600) / 60) as u32,
            (remainder % 60) as u32,
        )
    }
}

/// Julian Date: continuous count of days and fractions since -4712-01-01 12:00.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct JulianDate(f64);

impl JulianDate {
    /// Wraps a raw Julian Date value.
    #[must_use]
    pub const fn new(jd: f64) -> Self {
        Self(jd)
    }

    /// Julian Date of a civil date and time.
    #[must_use]
    pub fn from_calendar(moment: &CalendarMoment, calendar: CalendarSystem) -> Self {
        moment.julian_date(calendar)
    }

    /// Julian Date at midnight UTC of a Gregorian date.
    #[must_use]
    pub fn from_date(year: i32, month: u32, day: u32) -> Self {
        Self(julian_date(year, month, day, 0, 0, 0, CalendarSystem::Gregorian))
    }

    /// Gets the Julian Date value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Days since the J2000.0 epoch (2000-01-01 12:00 UTC).
    #[must_use]
    pub fn days_since_j2000(&self) -> f64 {
        self.0 - J2000_JDN
    }

    /// Calculates the Julian Century (JC) from J2000.0.
    ///
    /// JC = (JD - 2451545.0) / 36525
    #[must_use]
    pub fn julian_century(&self) -> f64 {
        self.days_since_j2000() / DAYS_PER_CENTURY
    }

    /// Adds a (possibly fractional or negative) number of days.
    #[must_use]
    pub fn add_days(self, days: f64) -> Self {
        Self(self.0 + days)
    }

    /// Day of the week, 0 = Sunday through 6 = Saturday.
    #[must_use]
    pub fn weekday(&self) -> u32 {
        (floor(self.0 + 1.5) as i64).rem_euclid(7) as u32
    }

    /// Converts back to a calendar date, see [`calendar_date`].
    #[must_use]
    pub fn to_calendar(&self, calendar: CalendarSystem) -> (i32, u32, f64) {
        calendar_date(self.0, calendar)
    }
}

const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a month of the proleptic Gregorian calendar.
#[must_use]
pub const fn gregorian_days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 31,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_j2000_epoch() {
        let jd = CalendarMoment::from_components(2000, 1, 1, 12, 0, 0)
            .julian_date(CalendarSystem::Gregorian);

        assert!((jd.value() - J2000_JDN).abs() < EPSILON);
        assert!(jd.days_since_j2000().abs() < EPSILON);
        assert!(jd.julian_century().abs() < EPSILON);
    }

    #[test]
    fn test_specific_julian_dates() {
        // Unix epoch: 1970-01-01 00:00:00 UTC
        let unix_epoch = JulianDate::from_date(1970, 1, 1);
        assert!((unix_epoch.value() - 2_440_587.5).abs() < 1e-6);

        // Y2K: 2000-01-01 00:00:00 UTC
        let y2k = JulianDate::from_date(2000, 1, 1);
        assert!((y2k.value() - 2_451_544.5).abs() < 1e-6);
    }

    #[test]
    fn test_gregorian_reform_is_one_day_apart() {
        let last_julian = julian_date(1582, 10, 4, 12, 0, 0, CalendarSystem::Julian);
        let first_gregorian = julian_date(1582, 10, 15, 12, 0, 0, CalendarSystem::Gregorian);

        let diff = first_gregorian - last_julian;
        assert!(
            (diff - 1.0).abs() < 1e-6,
            "Expected 1 day difference in JD, got {diff}"
        );
    }

    #[test]
    fn test_hour_24_rolls_into_next_day() {
        let end_of_day = julian_date(2021, 3, 1, 24, 0, 0, CalendarSystem::Gregorian);
        let next_day = julian_date(2021, 3, 2, 0, 0, 0, CalendarSystem::Gregorian);
        assert!((end_of_day - next_day).abs() < EPSILON);
    }

    #[test]
    fn test_moment_validation() {
        assert!(CalendarMoment::new(2024, 13, 1, 0, 0, 0).is_err());
        assert!(CalendarMoment::new(2024, 0, 1, 0, 0, 0).is_err());
        assert!(CalendarMoment::new(2024, 1, 32, 0, 0, 0).is_err());
        assert!(CalendarMoment::new(2024, 1, 1, 24, 0, 0).is_err());
        assert!(CalendarMoment::new(2024, 1, 1, 0, 60, 0).is_err());
        assert!(CalendarMoment::new(2024, 1, 1, 0, 0, 60).is_err());

        assert!(CalendarMoment::new(2024, 2, 30, 0, 0, 0).is_err());
        assert!(CalendarMoment::new(2024, 2, 29, 0, 0, 0).is_ok());
        assert!(CalendarMoment::new(1900, 2, 29, 0, 0, 0).is_err());
        assert!(CalendarMoment::new(2000, 2, 29, 0, 0, 0).is_ok());
    }

    #[test]
    fn test_moment_validation_is_proleptic_gregorian() {
        // 1500 is a leap year only in the Julian calendar
        assert!(CalendarMoment::new(1500, 2, 29, 0, 0, 0).is_err());
        assert!(CalendarMoment::new(1600, 2, 29, 0, 0, 0).is_ok());
        // No reform gap: the dates exist proleptically
        assert!(CalendarMoment::new(1582, 10, 4, 0, 0, 0).is_ok());
        assert!(CalendarMoment::new(1582, 10, 10, 0, 0, 0).is_ok());
        assert!(CalendarMoment::new(1582, 10, 15, 0, 0, 0).is_ok());

        // Every accepted date has its own Julian Date
        let feb_28 = CalendarMoment::new(1500, 2, 28, 0, 0, 0).unwrap();
        let mar_1 = CalendarMoment::new(1500, 3, 1, 0, 0, 0).unwrap();
        let gap = mar_1.julian_date(CalendarSystem::Gregorian).value()
            - feb_28.julian_date(CalendarSystem::Gregorian).value();
        assert!((gap - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_hours_of_day() {
        let moment = CalendarMoment::from_components(2006, 8, 6, 6, 30, 36);
        assert!((moment.hours_of_day() - 6.51).abs() < EPSILON);
        assert_eq!(moment.midnight(), CalendarMoment::date(2006, 8, 6));
    }

    #[test]
    fn test_calendar_date_inverse() {
        let cases = [
            (1957, 10, 4, 19, 26, 24),
            (2000, 1, 1, 12, 0, 0),
            (2000, 2, 29, 0, 0, 0),
            (1999, 12, 31, 23, 59, 59),
            (2024, 3, 1, 6, 0, 0),
            (1600, 12, 31, 0, 0, 0),
            (1582, 10, 10, 6, 0, 0),
            (1500, 6, 21, 12, 0, 0),
            (1200, 2, 29, 0, 0, 0),
            (-500, 3, 1, 18, 0, 0),
        ];
        for (year, month, day, hour, minute, second) in cases {
            let jd = julian_date(year, month, day, hour, minute, second, CalendarSystem::Gregorian);
            let (y, m, d) = calendar_date(jd, CalendarSystem::Gregorian);
            let expected_fraction =
                (f64::from(hour) * 3600.0 + f64::from(minute) * 60.0 + f64::from(second)) / 86_400.0;
            assert_eq!((y, m), (year, month), "{year}-{month}-{day}");
            assert!(
                (d - f64::from(day) - expected_fraction).abs() < 1e-6,
                "{year}-{month}-{day}: got day {d}"
            );
        }
    }

    #[test]
    fn test_calendar_date_julian_calendar() {
        // Meeus example 7.b: 333-01-27 12:00 (Julian calendar)
        let (y, m, d) = calendar_date(1_842_713.0, CalendarSystem::Julian);
        assert_eq!((y, m), (333, 1));
        assert!((d - 27.5).abs() < 1e-9);

        let (y, m, d) = calendar_date(0.0, CalendarSystem::Julian);
        assert_eq!((y, m), (-4712, 1));
        assert!((d - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_offset_seconds_rolls_dates() {
        let moment = CalendarMoment::from_components(2024, 2, 28, 22, 0, 0);
        assert_eq!(
            moment.offset_seconds(4 * 3600, CalendarSystem::Gregorian),
            CalendarMoment::from_components(2024, 2, 29, 2, 0, 0)
        );

        let moment = CalendarMoment::from_components(2023, 3, 1, 1, 15, 0);
        assert_eq!(
            moment.offset_seconds(-2 * 3600, CalendarSystem::Gregorian),
            CalendarMoment::from_components(2023, 2, 28, 23, 15, 0)
        );

        let moment = CalendarMoment::from_components(2021, 6, 21, 12, 0, 0);
        assert_eq!(
            moment.offset_seconds(-2_784, CalendarSystem::Gregorian),
            CalendarMoment::from_components(2021, 6, 21, 11, 13, 36)
        );
        assert_eq!(moment.offset_seconds(0, CalendarSystem::Gregorian), moment);
    }

    #[test]
    fn test_offset_seconds_before_calendar_reform() {
        let moment = CalendarMoment::from_components(1500, 6, 21, 12, 0, 0);
        assert_eq!(moment.offset_seconds(0, CalendarSystem::Gregorian), moment);
        assert_eq!(
            moment.offset_seconds(-2_784, CalendarSystem::Gregorian),
            CalendarMoment::from_components(1500, 6, 21, 11, 13, 36)
        );

        let moment = CalendarMoment::from_components(1500, 2, 28, 23, 0, 0);
        assert_eq!(
            moment.offset_seconds(3600, CalendarSystem::Gregorian),
            CalendarMoment::from_components(1500, 3, 1, 0, 0, 0)
        );
        assert_eq!(
            moment.offset_seconds(3600, CalendarSystem::Julian),
            CalendarMoment::from_components(1500, 2, 29, 0, 0, 0)
        );
    }

    #[test]
    fn test_weekday() {
        // 2000-01-01 was a Saturday, 2021-03-28 a Sunday
        assert_eq!(JulianDate::from_date(2000, 1, 1).weekday(), 6);
        assert_eq!(JulianDate::from_date(2021, 3, 28).weekday(), 0);
        assert_eq!(JulianDate::from_date(2021, 3, 28).add_days(1.0).weekday(), 1);
    }

    #[test]
    fn test_gregorian_days_in_month() {
        assert_eq!(gregorian_days_in_month(2024, 2), 29);
        assert_eq!(gregorian_days_in_month(2023, 2), 28);
        assert_eq!(gregorian_days_in_month(1900, 2), 28);
        assert_eq!(gregorian_days_in_month(2000, 2), 29);
        assert_eq!(gregorian_days_in_month(2023, 4), 30);
        assert_eq!(gregorian_days_in_month(2023, 12), 31);
    }

    #[test]
    #[cfg(feature = "chrono")]
    fn test_moment_from_datetime() {
        use chrono::{DateTime, FixedOffset};

        let datetime = "2006-08-06T08:00:00+02:00"
            .parse::<DateTime<FixedOffset>>()
            .unwrap();
        assert_eq!(
            CalendarMoment::from_datetime(&datetime),
            CalendarMoment::from_components(2006, 8, 6, 6, 0, 0)
        );
    }
}
