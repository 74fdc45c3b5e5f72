//! Horizontal coordinates (azimuth and elevation) of the sun.
//!
//! Combines the Julian Date, the sun's equatorial coordinates and the observer's
//! location through the mean sidereal time. The worked example of the German
//! Wikipedia article "Sonnenstand" (Munich, 2006-08-06 06:00 UTC) is reproduced
//! by the tests of this module.

#![allow(clippy::unreadable_literal)]
#![allow(clippy::many_single_char_names)]

use crate::ecliptic::{EclipticCoordinates, ecliptic_coordinates};
use crate::math::{
    PI, TAU, asin, atan, clamp_unit, cos, degrees_to_radians, normalize_hours_0_to_24,
    radians_to_degrees, sin, tan,
};
use crate::time::{CalendarMoment, CalendarSystem};
use crate::types::{GeoLocation, HorizontalCoordinates};
#[cfg(feature = "chrono")]
use chrono::{DateTime, TimeZone};

/// Degrees of rotation per sidereal hour.
const DEGREES_PER_HOUR: f64 = 15.0;

/// Greenwich mean sidereal time in hours, [0, 24).
///
/// Uses Julian centuries since J2000.0 at 0h UT of the date plus the UT time of
/// day scaled to sidereal rate.
#[must_use]
pub fn greenwich_sidereal_hours(moment: &CalendarMoment) -> f64 {
    let t0 = moment
        .midnight()
        .julian_date(CalendarSystem::Gregorian)
        .julian_century();
    normalize_hours_0_to_24(6.697376 + 2400.05134 * t0 + 1.002738 * moment.hours_of_day())
}

/// Calculates azimuth, elevation and refracted elevation of the sun.
///
/// The moment is interpreted as UTC. Azimuth is 0 at south, negative towards east.
/// A zero azimuth divisor never panics, see [`azimuth`].
///
/// # Example
/// ```
/// use solar_exposure::{position, time::CalendarMoment, GeoLocation};
///
/// let munich = GeoLocation::new(48.1, 11.6).unwrap();
/// let moment = CalendarMoment::new(2006, 8, 6, 6, 0, 0).unwrap();
/// let coords = position::solar_coordinates(&moment, &munich);
///
/// assert!((coords.azimuth_deg() + 94.06).abs() < 0.01);
/// assert!((coords.elevation_deg() - 19.06).abs() < 0.01);
/// assert!((coords.elevation_refracted_deg() - 19.11).abs() < 0.01);
/// ```
#[must_use]
pub fn solar_coordinates(moment: &CalendarMoment, location: &GeoLocation) -> HorizontalCoordinates {
    let ecliptic = ecliptic_coordinates(moment);
    horizontal_from_ecliptic(moment, location, ecliptic)
}

/// Calculates the sun position for a timezone-aware chrono `DateTime`.
#[cfg(feature = "chrono")]
#[allow(clippy::needless_pass_by_value)]
pub fn solar_coordinates_at<Tz: TimeZone>(
    datetime: DateTime<Tz>,
    location: &GeoLocation,
) -> HorizontalCoordinates {
    solar_coordinates(&CalendarMoment::from_datetime(&datetime), location)
}

fn horizontal_from_ecliptic(
    moment: &CalendarMoment,
    location: &GeoLocation,
    ecliptic: EclipticCoordinates,
) -> HorizontalCoordinates {
    let greenwich_sidereal_hours = greenwich_sidereal_hours(moment);
    let local_sidereal_deg = greenwich_sidereal_hours * DEGREES_PER_HOUR + location.longitude();

    let tau = degrees_to_radians(local_sidereal_deg) - ecliptic.right_ascension_rad();
    let delta = ecliptic.declination_rad();
    let phi = location.latitude_rad();

    let azimuth = azimuth(tau, delta, phi);
    let elevation = asin(clamp_unit(
        cos(delta) * cos(tau) * cos(phi) + sin(delta) * sin(phi),
    ));

    HorizontalCoordinates {
        azimuth,
        elevation,
        elevation_refracted: refraction_corrected_elevation(elevation),
        hour_angle: tau,
        greenwich_sidereal_hours,
        local_sidereal_deg,
        ecliptic,
    }
}

/// Azimuth in radians from hour angle `tau`, declination `delta` and latitude `phi`.
///
/// Measured from south, negative towards east, in (-π, π]. A zero divisor
/// (for example on the equator at equinox) yields ±π/2, or NaN when the hour
/// angle is zero as well.
#[must_use]
pub fn azimuth(tau: f64, delta: f64, phi: f64) -> f64 {
    let divisor = cos(tau) * sin(phi) - tan(delta) * cos(phi);
    let mut azimuth = atan(sin(tau) / divisor);
    if divisor < 0.0 {
        azimuth += PI;
    }
    if azimuth > PI {
        azimuth -= TAU;
    }
    azimuth
}

/// Applies the mean atmospheric refraction to a geometric elevation (radians).
///
/// Uses Sæmundsson's formula for standard conditions (1010 hPa, 10 °C). The
/// approximation degrades near and below the horizon and is not clamped, so
/// callers should filter on the geometric elevation first.
///
/// # Example
/// ```
/// # use solar_exposure::position::refraction_corrected_elevation;
/// let refracted = refraction_corrected_elevation(30_f64.to_radians());
/// // about 1.75 arc minutes at 30°
/// assert!((refracted.to_degrees() - 30.0 - 1.75 / 60.0).abs() < 0.01 / 60.0);
/// ```
#[must_use]
pub fn refraction_corrected_elevation(elevation: f64) -> f64 {
    let elevation_deg = radians_to_degrees(elevation);
    let corrected_argument = elevation_deg + 10.3 / (elevation_deg + 5.11);
    let correction_minutes = 1.02 / tan(degrees_to_radians(corrected_argument));
    degrees_to_radians(elevation_deg + correction_minutes / 60.0)
}
