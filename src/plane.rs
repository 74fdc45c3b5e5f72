//! Sun elevation relative to a tilted and rotated plane.
//!
//! The sun's unit vector is rotated about the vertical axis by the plane
//! direction and then about the new horizontal axis by the plane tilt; the
//! z-component of the result is the sine of the elevation above the plane.

use crate::error::{check_direction, check_tilt};
use crate::math::{asin, clamp_unit, cos, degrees_to_radians, normalize_radians_pi, sin};
use crate::types::HorizontalCoordinates;
use crate::Result;

/// Orientation of a plane such as a photovoltaic panel.
///
/// Tilt is measured from the horizontal (0 = flat, π/2 = vertical). Direction is
/// the azimuth the plane faces, measured from geographic south, negative towards
/// east, using the same convention as [`HorizontalCoordinates::azimuth_rad`].
///
/// # Example
/// ```
/// # use solar_exposure::PlaneOrientation;
/// let roof = PlaneOrientation::from_degrees(30.0, -15.0).unwrap();
/// assert!((roof.tilt_rad() - 30_f64.to_radians()).abs() < 1e-12);
/// assert!(PlaneOrientation::from_degrees(95.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneOrientation {
    tilt: f64,
    direction: f64,
}

impl PlaneOrientation {
    /// Creates an orientation from tilt and direction in degrees.
    ///
    /// # Errors
    /// Returns `InvalidTilt` if tilt is outside 0° to 90°, `InvalidDirection` if
    /// direction is not finite.
    pub fn from_degrees(tilt: f64, direction: f64) -> Result<Self> {
        check_tilt(tilt)?;
        check_direction(direction)?;
        Ok(Self {
            tilt: degrees_to_radians(tilt),
            direction: degrees_to_radians(direction),
        })
    }

    /// A flat, horizontal plane.
    #[must_use]
    pub const fn horizontal() -> Self {
        Self {
            tilt: 0.0,
            direction: 0.0,
        }
    }

    /// Gets the tilt in radians.
    #[must_use]
    pub const fn tilt_rad(&self) -> f64 {
        self.tilt
    }

    /// Gets the direction in radians.
    #[must_use]
    pub const fn direction_rad(&self) -> f64 {
        self.direction
    }

    /// Elevation of the sun above this plane, in radians.
    #[must_use]
    pub fn relative_elevation(&self, sun: &HorizontalCoordinates) -> f64 {
        relative_elevation(self.tilt, self.direction, sun.azimuth_rad(), sun.elevation_rad())
    }
}

/// Elevation of the sun relative to a tilted plane, all angles in radians.
///
/// Azimuth is normalised into (-π, π] first, so whole turns added upstream do not
/// matter. The `asin` argument is clamped into [-1, 1] against rounding. A tilt of
/// exactly zero returns `elevation` unchanged.
///
/// # Example
/// ```
/// # use solar_exposure::plane::relative_elevation;
/// use std::f64::consts::FRAC_PI_2;
///
/// // A vertical south-facing wall sees a sun due south at 30° elevation at 60°
/// let rel = relative_elevation(FRAC_PI_2, 0.0, 0.0, 30_f64.to_radians());
/// assert!((rel.to_degrees() - 60.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn relative_elevation(tilt: f64, direction: f64, azimuth: f64, elevation: f64) -> f64 {
    if tilt == 0.0 {
        return elevation;
    }

    let azimuth = normalize_radians_pi(azimuth);
    let horizontal = cos(elevation) * cos(azimuth) * cos(direction)
        + cos(elevation) * sin(azimuth) * sin(direction);
    let z = horizontal * sin(tilt) + sin(elevation) * cos(tilt);

    asin(clamp_unit(z))
}
