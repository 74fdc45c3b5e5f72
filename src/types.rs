//! Core data types shared by the position and projection modules.

use crate::ecliptic::EclipticCoordinates;
use crate::error::check_coordinates;
use crate::math::{PI, degrees_to_radians, normalize_degrees_0_to_360, radians_to_degrees};
use crate::Result;

/// Observer location on the Earth's surface.
///
/// Longitude is positive east of Greenwich, latitude positive north of the equator.
///
/// # Example
/// ```
/// # use solar_exposure::GeoLocation;
/// let munich = GeoLocation::new(48.1, 11.6).unwrap();
/// assert_eq!(munich.latitude(), 48.1);
/// assert!(GeoLocation::new(91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoLocation {
    /// Latitude in degrees (-90 to +90)
    latitude: f64,
    /// Longitude in degrees (-180 to +180, east positive)
    longitude: f64,
}

impl GeoLocation {
    /// Creates a location from latitude and longitude in degrees.
    ///
    /// # Errors
    /// Returns `InvalidLatitude` or `InvalidLongitude` for out-of-range or NaN values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        check_coordinates(latitude, longitude)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Gets the latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Gets the longitude in degrees (east positive).
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Gets the latitude in radians.
    #[must_use]
    pub const fn latitude_rad(&self) -> f64 {
        degrees_to_radians(self.latitude)
    }
}

/// Sun position relative to the local horizon, with the intermediate values of
/// the calculation.
///
/// Azimuth is measured from geographic south, negative towards east and positive
/// towards west, in the range (-180°, 180°]. Elevation is the angle above the
/// horizon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalCoordinates {
    pub(crate) azimuth: f64,
    pub(crate) elevation: f64,
    pub(crate) elevation_refracted: f64,
    pub(crate) hour_angle: f64,
    pub(crate) greenwich_sidereal_hours: f64,
    pub(crate) local_sidereal_deg: f64,
    pub(crate) ecliptic: EclipticCoordinates,
}

impl HorizontalCoordinates {
    /// Azimuth in radians, (-π, π], 0 = south.
    #[must_use]
    pub const fn azimuth_rad(&self) -> f64 {
        self.azimuth
    }

    /// Azimuth in degrees, (-180°, 180°], 0 = south.
    #[must_use]
    pub const fn azimuth_deg(&self) -> f64 {
        radians_to_degrees(self.azimuth)
    }

    /// Compass azimuth in degrees, 0° = north, increasing clockwise to 360°.
    #[must_use]
    pub fn azimuth_from_north_deg(&self) -> f64 {
        normalize_degrees_0_to_360(radians_to_degrees(self.azimuth + PI))
    }

    /// Geometric elevation in radians.
    #[must_use]
    pub const fn elevation_rad(&self) -> f64 {
        self.elevation
    }

    /// Geometric elevation in degrees.
    #[must_use]
    pub const fn elevation_deg(&self) -> f64 {
        radians_to_degrees(self.elevation)
    }

    /// Apparent elevation in radians, corrected for atmospheric refraction.
    ///
    /// Unreliable below the horizon; filter on [`Self::is_sun_up`] first.
    #[must_use]
    pub const fn elevation_refracted_rad(&self) -> f64 {
        self.elevation_refracted
    }

    /// Apparent elevation in degrees, corrected for atmospheric refraction.
    #[must_use]
    pub const fn elevation_refracted_deg(&self) -> f64 {
        radians_to_degrees(self.elevation_refracted)
    }

    /// Local hour angle of the sun in radians.
    #[must_use]
    pub const fn hour_angle_rad(&self) -> f64 {
        self.hour_angle
    }

    /// Greenwich mean sidereal time in hours, [0, 24).
    #[must_use]
    pub const fn greenwich_sidereal_hours(&self) -> f64 {
        self.greenwich_sidereal_hours
    }

    /// Local hour angle of the vernal equinox in degrees.
    #[must_use]
    pub const fn local_sidereal_deg(&self) -> f64 {
        self.local_sidereal_deg
    }

    /// Ecliptic and equatorial coordinates the position was derived from.
    #[must_use]
    pub const fn ecliptic(&self) -> &EclipticCoordinates {
        &self.ecliptic
    }

    /// Checks if the sun is above the horizon (geometric elevation > 0°).
    #[must_use]
    pub fn is_sun_up(&self) -> bool {
        self.elevation > 0.0
    }
}
