//! JSON configuration for locations, panels and plotting series.
//!
//! ```json
//! {
//!     "location": { "lat": 48.1, "lon": 11.6 },
//!     "panel": { "inclination": 30.0, "direction": -15.0 },
//!     "series": {
//!         "year": 2021,
//!         "clock": "civil",
//!         "daylight_saving": "european",
//!         "step_minutes": 30,
//!         "sample_days": [[6, 21], [12, 21]]
//!     }
//! }
//! ```
//!
//! `panel` and `series` are optional. Within `series` only `year` is required;
//! the clock defaults to solar time, the step to 60 minutes and the sample days to
//! the 21st of every month.

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::{debug, info};
use serde::Deserialize;

use crate::error::check_step_minutes;
use crate::plane::PlaneOrientation;
use crate::series::{
    ClockMode, DaylightSaving, EuropeanSummerTime, NoDaylightSaving, SeriesBuilder,
    check_sample_day, standard_sample_days,
};
use crate::types::GeoLocation;

/// Errors raised while loading a configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Io(std::io::Error),
    /// The content is not valid JSON or does not have the expected shape.
    Json(serde_json::Error),
    /// A value is out of range.
    Invalid(crate::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Json(e) => write!(f, "failed to parse JSON: {e}"),
            Self::Invalid(e) => write!(f, "invalid configuration: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Invalid(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<crate::Error> for ConfigError {
    fn from(err: crate::Error) -> Self {
        Self::Invalid(err)
    }
}

/// Daylight-saving rule selectable from a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DaylightSavingRule {
    /// No daylight saving
    #[default]
    None,
    /// European summer time
    European,
}

impl DaylightSaving for DaylightSavingRule {
    fn shift_hours(&self, year: i32, month: u32, day: u32) -> f64 {
        match self {
            Self::None => NoDaylightSaving.shift_hours(year, month, day),
            Self::European => EuropeanSummerTime.shift_hours(year, month, day),
        }
    }
}

/// Validated series settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSettings {
    year: i32,
    clock: ClockMode,
    daylight_saving: DaylightSavingRule,
    step_minutes: u32,
    sample_days: Vec<(u32, u32)>,
}

impl SeriesSettings {
    /// Year of the sample days.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Clock mode of the series.
    #[must_use]
    pub const fn clock(&self) -> ClockMode {
        self.clock
    }

    /// Daylight-saving rule for civil time.
    #[must_use]
    pub const fn daylight_saving(&self) -> DaylightSavingRule {
        self.daylight_saving
    }

    /// Sampling step in minutes.
    #[must_use]
    pub const fn step_minutes(&self) -> u32 {
        self.step_minutes
    }

    /// Sample days as (month, day).
    #[must_use]
    pub fn sample_days(&self) -> &[(u32, u32)] {
        &self.sample_days
    }
}

/// A validated configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    location: GeoLocation,
    panel: Option<PlaneOrientation>,
    series: Option<SeriesSettings>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    location: LocationFile,
    panel: Option<PanelFile>,
    series: Option<SeriesFile>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct LocationFile {
    lat: f64,
    lon: f64,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PanelFile {
    inclination: f64,
    direction: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum ClockFile {
    Solar,
    Civil,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SeriesFile {
    year: i32,
    clock: Option<ClockFile>,
    #[serde(default)]
    daylight_saving: DaylightSavingRule,
    step_minutes: Option<u32>,
    sample_days: Option<Vec<(u32, u32)>>,
}

impl Config {
    fn from_parsed(file: ConfigFile) -> crate::Result<Self> {
        let location = GeoLocation::new(file.location.lat, file.location.lon)?;

        let panel = file
            .panel
            .map(|panel| PlaneOrientation::from_degrees(panel.inclination, panel.direction))
            .transpose()?;

        let series = match file.series {
            Some(series) => {
                let step_minutes = series.step_minutes.unwrap_or(60);
                check_step_minutes(step_minutes)?;

                let sample_days = series.sample_days.unwrap_or_else(standard_sample_days);
                for &(month, day) in &sample_days {
                    check_sample_day(series.year, month, day)?;
                }

                Some(SeriesSettings {
                    year: series.year,
                    clock: match series.clock {
                        Some(ClockFile::Civil) => ClockMode::CivilTime,
                        Some(ClockFile::Solar) | None => ClockMode::SolarTime,
                    },
                    daylight_saving: series.daylight_saving,
                    step_minutes,
                    sample_days,
                })
            }
            None => None,
        };

        Ok(Self {
            location,
            panel,
            series,
        })
    }

    /// Creates a configuration for a location without panel or series.
    #[must_use]
    pub const fn new(location: GeoLocation) -> Self {
        Self {
            location,
            panel: None,
            series: None,
        }
    }

    /// Loads and validates a configuration file.
    ///
    /// # Errors
    /// Returns `ConfigError::Io` if the file cannot be opened, `Json` for malformed
    /// content and `Invalid` for out-of-range values.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let raw: ConfigFile = serde_json::from_reader(reader)?;
        let config = Self::from_parsed(raw)?;

        info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parses and validates a configuration from a JSON string.
    ///
    /// # Errors
    /// Returns `ConfigError::Json` for malformed content and `Invalid` for
    /// out-of-range values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let raw: ConfigFile = serde_json::from_str(json)?;
        Ok(Self::from_parsed(raw)?)
    }

    /// Observer location.
    #[must_use]
    pub const fn location(&self) -> GeoLocation {
        self.location
    }

    /// Panel orientation, if configured.
    #[must_use]
    pub const fn panel(&self) -> Option<PlaneOrientation> {
        self.panel
    }

    /// Series settings, if configured.
    #[must_use]
    pub const fn series(&self) -> Option<&SeriesSettings> {
        self.series.as_ref()
    }

    /// Creates a series builder from the series settings, with the panel applied.
    ///
    /// Returns `None` when the configuration has no `series` section.
    #[must_use]
    pub fn series_builder(&self) -> Option<SeriesBuilder<DaylightSavingRule>> {
        let settings = self.series.as_ref()?;
        debug!(
            "series for {}: {:?}, {} min steps, {} sample days",
            settings.year,
            settings.clock,
            settings.step_minutes,
            settings.sample_days.len()
        );

        let builder = SeriesBuilder::new(self.location, settings.year, settings.sample_days.clone())
            .clock(settings.clock)
            .step_minutes(settings.step_minutes)
            .daylight_saving(settings.daylight_saving);

        Some(match self.panel {
            Some(panel) => builder.panel(panel),
            None => builder,
        })
    }
}
