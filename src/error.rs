//! Error types for the solar exposure library.
//!
//! The numeric core is total and never fails; errors only come from the
//! validating constructors and the series builder settings.

use core::fmt;

/// Result type alias for operations in this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised by validating constructors.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid latitude value (must be between -90 and +90 degrees).
    InvalidLatitude {
        /// The invalid latitude value provided.
        value: f64,
    },
    /// Invalid longitude value (must be between -180 and +180 degrees).
    InvalidLongitude {
        /// The invalid longitude value provided.
        value: f64,
    },
    /// Invalid plane tilt (must be between 0 and 90 degrees).
    InvalidTilt {
        /// The invalid tilt value provided, in degrees.
        value: f64,
    },
    /// Plane direction is not a finite angle.
    InvalidDirection {
        /// The invalid direction value provided, in degrees.
        value: f64,
    },
    /// Sampling step does not divide a day into whole steps.
    InvalidStep {
        /// The invalid step, in minutes.
        minutes: u32,
    },
    /// Invalid calendar date or time of day.
    InvalidDateTime {
        /// Description of the date/time constraint violation.
        message: &'static str,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLatitude { value } => {
                write!(
                    f,
                    "invalid latitude {value}° (must be between -90° and +90°)"
                )
            }
            Self::InvalidLongitude { value } => {
                write!(
                    f,
                    "invalid longitude {value}° (must be between -180° and +180°)"
                )
            }
            Self::InvalidTilt { value } => {
                write!(f, "invalid tilt {value}° (must be between 0° and 90°)")
            }
            Self::InvalidDirection { value } => {
                write!(f, "invalid plane direction {value}° (must be finite)")
            }
            Self::InvalidStep { minutes } => {
                write!(
                    f,
                    "invalid step of {minutes} min (must be positive and divide 1440)"
                )
            }
            Self::InvalidDateTime { message } => {
                write!(f, "invalid date/time: {message}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl Error {
    /// Creates an invalid latitude error.
    #[must_use]
    pub const fn invalid_latitude(value: f64) -> Self {
        Self::InvalidLatitude { value }
    }

    /// Creates an invalid longitude error.
    #[must_use]
    pub const fn invalid_longitude(value: f64) -> Self {
        Self::InvalidLongitude { value }
    }

    /// Creates an invalid tilt error.
    #[must_use]
    pub const fn invalid_tilt(value: f64) -> Self {
        Self::InvalidTilt { value }
    }

    /// Creates an invalid direction error.
    #[must_use]
    pub const fn invalid_direction(value: f64) -> Self {
        Self::InvalidDirection { value }
    }

    /// Creates an invalid step error.
    #[must_use]
    pub const fn invalid_step(minutes: u32) -> Self {
        Self::InvalidStep { minutes }
    }

    /// Creates an invalid date/time error.
    #[must_use]
    pub const fn invalid_datetime(message: &'static str) -> Self {
        Self::InvalidDateTime { message }
    }
}

/// Validates latitude is within the valid range (-90 to +90 degrees).
///
/// # Errors
/// Returns `InvalidLatitude` if latitude is outside -90 to +90 degrees.
pub fn check_latitude(latitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(Error::invalid_latitude(latitude));
    }
    Ok(())
}

/// Validates longitude is within the valid range (-180 to +180 degrees).
///
/// # Errors
/// Returns `InvalidLongitude` if longitude is outside -180 to +180 degrees.
pub fn check_longitude(longitude: f64) -> Result<()> {
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(Error::invalid_longitude(longitude));
    }
    Ok(())
}

/// Validates both latitude and longitude are within valid ranges.
///
/// # Errors
/// Returns `InvalidLatitude` or `InvalidLongitude` for out-of-range coordinates.
pub fn check_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    check_latitude(latitude)?;
    check_longitude(longitude)?;
    Ok(())
}

/// Validates a plane tilt in degrees (0 = horizontal, 90 = vertical).
///
/// # Errors
/// Returns `InvalidTilt` if tilt is outside 0 to 90 degrees.
pub fn check_tilt(tilt_degrees: f64) -> Result<()> {
    if !(0.0..=90.0).contains(&tilt_degrees) {
        return Err(Error::invalid_tilt(tilt_degrees));
    }
    Ok(())
}

/// Validates a plane direction in degrees.
///
/// # Errors
/// Returns `InvalidDirection` if direction is NaN or infinite.
pub fn check_direction(direction_degrees: f64) -> Result<()> {
    if !direction_degrees.is_finite() {
        return Err(Error::invalid_direction(direction_degrees));
    }
    Ok(())
}

/// Validates a sampling step in minutes.
///
/// # Errors
/// Returns `InvalidStep` unless the step is positive and divides a day evenly.
pub const fn check_step_minutes(minutes: u32) -> Result<()> {
    if minutes == 0 || 1440 % minutes != 0 {
        return Err(Error::invalid_step(minutes));
    }
    Ok(())
}
