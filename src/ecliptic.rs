//! Low-precision ecliptic and equatorial coordinates of the sun.
//!
//! Uses the approximation published in the Astronomical Almanac (accuracy about
//! 0.01° for the years 1950 to 2050), which is adequate for visualization.

#![allow(clippy::unreadable_literal)]

use crate::math::{
    PI, asin, atan, cos, degrees_to_radians, normalize_degrees_0_to_360, normalize_radians_pi,
    radians_to_degrees, sin, tan,
};
use crate::time::{CalendarMoment, CalendarSystem, JulianDate};

/// Minutes of time per degree of hour angle
const MINUTES_PER_DEGREE: f64 = 4.0;

/// Sun coordinates on the ecliptic and the celestial equator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EclipticCoordinates {
    julian_date: JulianDate,
    days_since_epoch: f64,
    mean_longitude: f64,
    mean_anomaly: f64,
    ecliptic_longitude: f64,
    obliquity: f64,
    right_ascension: f64,
    declination: f64,
}

impl EclipticCoordinates {
    /// Julian Date the coordinates were computed for.
    #[must_use]
    pub const fn julian_date(&self) -> JulianDate {
        self.julian_date
    }

    /// Days since J2000.0 (`n`).
    #[must_use]
    pub const fn days_since_epoch(&self) -> f64 {
        self.days_since_epoch
    }

    /// Mean ecliptic longitude `L` in degrees, [0, 360).
    #[must_use]
    pub const fn mean_longitude_deg(&self) -> f64 {
        self.mean_longitude
    }

    /// Mean anomaly `g` in degrees, [0, 360).
    #[must_use]
    pub const fn mean_anomaly_deg(&self) -> f64 {
        self.mean_anomaly
    }

    /// Ecliptic longitude `λ` in degrees, corrected for the anomaly.
    #[must_use]
    pub const fn ecliptic_longitude_deg(&self) -> f64 {
        self.ecliptic_longitude
    }

    /// Obliquity of the ecliptic `ε` in degrees.
    #[must_use]
    pub const fn obliquity_deg(&self) -> f64 {
        self.obliquity
    }

    /// Right ascension `α` in radians, (-π/2, 3π/2).
    #[must_use]
    pub const fn right_ascension_rad(&self) -> f64 {
        self.right_ascension
    }

    /// Right ascension `α` in degrees.
    #[must_use]
    pub const fn right_ascension_deg(&self) -> f64 {
        radians_to_degrees(self.right_ascension)
    }

    /// Declination `δ` in radians.
    #[must_use]
    pub const fn declination_rad(&self) -> f64 {
        self.declination
    }

    /// Declination `δ` in degrees.
    #[must_use]
    pub const fn declination_deg(&self) -> f64 {
        radians_to_degrees(self.declination)
    }

    /// Equation of time in minutes: apparent minus mean solar time, `L - α`.
    ///
    /// Positive when the true sun culminates before mean noon (early November,
    /// about +16 min), negative in February (about -14 min).
    #[must_use]
    pub fn equation_of_time_minutes(&self) -> f64 {
        let difference = normalize_radians_pi(
            degrees_to_radians(self.mean_longitude) - self.right_ascension,
        );
        radians_to_degrees(difference) * MINUTES_PER_DEGREE
    }
}

/// Calculates the sun's ecliptic and equatorial coordinates for a UTC moment.
///
/// # Example
/// ```
/// use solar_exposure::{ecliptic, time::CalendarMoment};
///
/// let moment = CalendarMoment::from_components(2006, 8, 6, 6, 0, 0);
/// let coords = ecliptic::ecliptic_coordinates(&moment);
/// assert!((coords.declination_deg() - 16.73).abs() < 0.01);
/// ```
#[must_use]
pub fn ecliptic_coordinates(moment: &CalendarMoment) -> EclipticCoordinates {
    ecliptic_coordinates_from_julian(moment.julian_date(CalendarSystem::Gregorian))
}

/// Calculates the sun's ecliptic and equatorial coordinates for a Julian Date.
#[must_use]
pub fn ecliptic_coordinates_from_julian(jd: JulianDate) -> EclipticCoordinates {
    let n = jd.days_since_j2000();

    let mean_longitude = normalize_degrees_0_to_360(280.460 + 0.9856474 * n);
    let mean_anomaly = normalize_degrees_0_to_360(357.528 + 0.9856003 * n);
    let g = degrees_to_radians(mean_anomaly);

    let ecliptic_longitude = mean_longitude + 1.915 * sin(g) + 0.01997 * sin(2.0 * g);
    let lambda = degrees_to_radians(ecliptic_longitude);

    let obliquity = 23.439 - 0.0000004 * n;
    let epsilon = degrees_to_radians(obliquity);

    // atan only covers (-π/2, π/2); shift into the quadrant of λ
    let mut right_ascension = atan(cos(epsilon) * tan(lambda));
    if cos(lambda) < 0.0 {
        right_ascension += PI;
    }

    let declination = asin(sin(epsilon) * sin(lambda));

    EclipticCoordinates {
        julian_date: jd,
        days_since_epoch: n,
        mean_longitude,
        mean_anomaly,
        ecliptic_longitude,
        obliquity,
        right_ascension,
        declination,
    }
}
