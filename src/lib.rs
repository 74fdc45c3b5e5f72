//! # Solar Exposure Library
//!
//! Sun position, atmospheric refraction and sun exposure of tilted planes.

#![cfg_attr(not(feature = "std"), no_std)]
//!
//! The calculation chain is:
//! - **time**: calendar date and UTC time of day to Julian Date
//! - **ecliptic**: Julian Date to ecliptic longitude, right ascension and declination
//! - **position**: sidereal time and observer location to azimuth and elevation,
//!   plus refraction-corrected elevation
//! - **plane**: elevation of the sun above a tilted, rotated plane (e.g. a solar panel)
//! - **series**: sun paths, iso-hour lines and panel exposure over sample days (`std` only)
//!
//! The ecliptic formulas are the low-precision approximation of the Astronomical
//! Almanac, accurate to about 0.01° between 1950 and 2050. That is plenty for
//! sun path diagrams and shading studies but not for tracking telescopes.
//!
//! ## Feature Flags
//!
//! - `std` (default): Use standard library for native math functions, enables `series`
//! - `chrono` (default): Enable `DateTime<Tz>` based convenience API and timezone DST rules
//! - `libm`: Use pure Rust math for `no_std` environments
//! - `io`: JSON configuration files and CSV export of positions and series
//!
//! **Configuration examples:**
//! ```toml
//! # Default: std + chrono
//! solar-exposure = "0.1"
//!
//! # With configuration and CSV export
//! solar-exposure = { version = "0.1", features = ["io"] }
//!
//! # Minimal no_std (pure numeric API)
//! solar-exposure = { version = "0.1", default-features = false, features = ["libm"] }
//! ```
//!
//! ## Quick Start
//!
//! ### Sun position (numeric API)
//! ```rust
//! use solar_exposure::{position, time::CalendarMoment, GeoLocation};
//!
//! // Munich, 2006-08-06 06:00 UTC
//! let munich = GeoLocation::new(48.1, 11.6).unwrap();
//! let moment = CalendarMoment::new(2006, 8, 6, 6, 0, 0).unwrap();
//! let sun = position::solar_coordinates(&moment, &munich);
//!
//! println!("Azimuth: {:.2}° (from south)", sun.azimuth_deg());
//! println!("Elevation: {:.2}°", sun.elevation_deg());
//! ```
//!
//! ### Sun position (with chrono)
//! ```rust
//! # #[cfg(feature = "chrono")] {
//! use solar_exposure::{position, GeoLocation};
//! use chrono::{DateTime, FixedOffset};
//!
//! let datetime = "2026-06-21T12:00:00+02:00".parse::<DateTime<FixedOffset>>().unwrap();
//! let vienna = GeoLocation::new(48.21, 16.37).unwrap();
//! let sun = position::solar_coordinates_at(datetime, &vienna);
//! assert!(sun.is_sun_up());
//! # }
//! ```
//!
//! ### Panel exposure
//! ```rust
//! use solar_exposure::{position, time::CalendarMoment, GeoLocation, PlaneOrientation};
//!
//! let munich = GeoLocation::new(48.1, 11.6).unwrap();
//! let sun = position::solar_coordinates(&CalendarMoment::new(2006, 8, 6, 6, 0, 0).unwrap(), &munich);
//!
//! // 30° roof facing east
//! let roof = PlaneOrientation::from_degrees(30.0, -90.0).unwrap();
//! let above_roof = roof.relative_elevation(&sun).to_degrees();
//! assert!(above_roof > sun.elevation_deg());
//! ```
//!
//! ## Coordinate System
//!
//! - **Longitude**: positive east of Greenwich
//! - **Azimuth**: 0° = south, negative towards east, positive towards west, (-180°, 180°]
//! - **Elevation**: 0° = horizon, 90° = directly overhead (-90° to +90°)
//! - **Plane direction**: azimuth the plane faces, same convention as the sun azimuth
//! - **Plane tilt**: 0° = horizontal, 90° = vertical

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery, clippy::cargo, clippy::all)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cargo_common_metadata,
    clippy::multiple_crate_versions, // Acceptable for dev-dependencies
    clippy::float_cmp, // Exact comparisons of mathematical constants in tests
)]

// Public API exports
pub use crate::ecliptic::EclipticCoordinates;
pub use crate::error::{Error, Result};
pub use crate::plane::PlaneOrientation;
#[cfg(feature = "std")]
pub use crate::series::{ClockMode, SeriesBuilder, SeriesSet};
pub use crate::time::{CalendarMoment, CalendarSystem, JulianDate};
pub use crate::types::{GeoLocation, HorizontalCoordinates};

// Calculation modules
pub mod ecliptic;
pub mod plane;
pub mod position;
#[cfg(feature = "std")]
pub mod series;

// Core modules
pub mod error;
pub mod types;

// Internal modules
mod math;

// Public modules
#[cfg(feature = "io")]
pub mod io;
pub mod time;
