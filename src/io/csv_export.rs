//! CSV export of sun positions and plotting series.
//!
//! Writers emit a header row before the first record and one row per sample;
//! empty input produces empty output. Angles are in degrees, azimuths measured
//! from south with east negative.

use std::fmt;
use std::io::Write;

use csv::Writer;
use log::debug;
use serde::Serialize;

use crate::math::radians_to_degrees;
use crate::plane::PlaneOrientation;
use crate::series::SeriesSet;
use crate::time::CalendarMoment;
use crate::types::HorizontalCoordinates;

/// Errors raised while writing CSV output.
#[derive(Debug)]
pub enum ExportError {
    /// Serialization or write error reported by the CSV writer.
    Csv(csv::Error),
    /// The underlying writer failed to flush.
    Io(std::io::Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv(e) => write!(f, "CSV error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Csv(e) => Some(e),
            Self::Io(e) => Some(e),
        }
    }
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// A sun position at a UTC moment, to be written by [`write_positions`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionRecord {
    /// UTC moment of the position
    pub moment: CalendarMoment,
    /// Sun position at that moment
    pub sun: HorizontalCoordinates,
}

#[derive(Serialize)]
struct PositionRow {
    timestamp: String,
    azimuth_deg: f64,
    elevation_deg: f64,
    elevation_refracted_deg: f64,
    relative_elevation_deg: Option<f64>,
}

#[derive(Serialize)]
struct SunPathRow {
    month: u32,
    day: u32,
    clock_hours: f64,
    azimuth_deg: f64,
    elevation_deg: f64,
    elevation_refracted_deg: f64,
}

#[derive(Serialize)]
struct HourLineRow {
    month: u32,
    day: u32,
    clock_hours: f64,
    azimuth_deg: f64,
    elevation_deg: f64,
}

#[derive(Serialize)]
struct ExposureRow {
    month: u32,
    day: u32,
    clock_hours: f64,
    relative_elevation_deg: f64,
    elevation_deg: f64,
}

/// Formats a moment as an ISO 8601 UTC timestamp.
fn timestamp(moment: &CalendarMoment) -> String {
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        moment.year, moment.month, moment.day, moment.hour, moment.minute, moment.second
    )
}

fn finish<W: Write>(mut writer: Writer<W>, rows: usize, what: &str) -> Result<(), ExportError> {
    writer.flush()?;
    debug!("wrote {rows} {what} rows");
    Ok(())
}

/// Writes sun positions with the columns `timestamp`, `azimuth_deg`,
/// `elevation_deg`, `elevation_refracted_deg` and `relative_elevation_deg`.
///
/// The relative elevation column is left empty when no panel is given.
///
/// # Errors
/// Returns `ExportError` if a row cannot be written.
///
/// # Example
/// ```
/// use solar_exposure::io::csv_export::{write_positions, PositionRecord};
/// use solar_exposure::{position, time::CalendarMoment, GeoLocation};
///
/// let munich = GeoLocation::new(48.1, 11.6).unwrap();
/// let moment = CalendarMoment::new(2006, 8, 6, 6, 0, 0).unwrap();
/// let record = PositionRecord { moment, sun: position::solar_coordinates(&moment, &munich) };
///
/// let mut out = Vec::new();
/// write_positions(&mut out, &[record], None).unwrap();
/// let text = String::from_utf8(out).unwrap();
/// assert!(text.starts_with("timestamp,azimuth_deg,elevation_deg,"));
/// assert!(text.contains("2006-08-06T06:00:00Z,-94.06"));
/// ```
pub fn write_positions<W: Write>(
    writer: W,
    records: &[PositionRecord],
    panel: Option<&PlaneOrientation>,
) -> Result<(), ExportError> {
    let mut csv = Writer::from_writer(writer);
    for record in records {
        csv.serialize(PositionRow {
            timestamp: timestamp(&record.moment),
            azimuth_deg: record.sun.azimuth_deg(),
            elevation_deg: record.sun.elevation_deg(),
            elevation_refracted_deg: record.sun.elevation_refracted_deg(),
            relative_elevation_deg: panel
                .map(|panel| radians_to_degrees(panel.relative_elevation(&record.sun))),
        })?;
    }
    finish(csv, records.len(), "position")
}

/// Writes the sun paths of a series, one row per visible sample.
///
/// # Errors
/// Returns `ExportError` if a row cannot be written.
pub fn write_sun_paths<W: Write>(writer: W, series: &SeriesSet) -> Result<(), ExportError> {
    let mut csv = Writer::from_writer(writer);
    let mut rows = 0;
    for path in &series.sun_paths {
        for point in &path.points {
            csv.serialize(SunPathRow {
                month: path.month,
                day: path.day,
                clock_hours: point.clock_hours,
                azimuth_deg: point.azimuth_deg,
                elevation_deg: point.elevation_deg,
                elevation_refracted_deg: point.elevation_refracted_deg,
            })?;
            rows += 1;
        }
    }
    finish(csv, rows, "sun path")
}

/// Writes the iso-hour lines of a series, ordered by clock time.
///
/// # Errors
/// Returns `ExportError` if a row cannot be written.
pub fn write_hour_lines<W: Write>(writer: W, series: &SeriesSet) -> Result<(), ExportError> {
    let mut csv = Writer::from_writer(writer);
    let mut rows = 0;
    for line in &series.hour_lines {
        for point in &line.points {
            csv.serialize(HourLineRow {
                month: point.month,
                day: point.day,
                clock_hours: line.clock_hours(),
                azimuth_deg: point.azimuth_deg,
                elevation_deg: point.elevation_deg,
            })?;
            rows += 1;
        }
    }
    finish(csv, rows, "hour line")
}

/// Writes the panel exposure of a series; nothing is written without a panel.
///
/// # Errors
/// Returns `ExportError` if a row cannot be written.
pub fn write_panel_exposure<W: Write>(writer: W, series: &SeriesSet) -> Result<(), ExportError> {
    let mut csv = Writer::from_writer(writer);
    let mut rows = 0;
    for exposure in &series.panel_exposure {
        for point in &exposure.points {
            csv.serialize(ExposureRow {
                month: exposure.month,
                day: exposure.day,
                clock_hours: point.clock_hours,
                relative_elevation_deg: point.relative_elevation_deg,
                elevation_deg: point.elevation_deg,
            })?;
            rows += 1;
        }
    }
    finish(csv, rows, "panel exposure")
}
