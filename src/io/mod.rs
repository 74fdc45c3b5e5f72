//! File and stream I/O around the numeric core: JSON configuration and CSV export.

pub mod config;
pub mod csv_export;

pub use config::{Config, ConfigError, DaylightSavingRule, SeriesSettings};
pub use csv_export::{ExportError, PositionRecord};
