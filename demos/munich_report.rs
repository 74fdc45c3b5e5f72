//! Sun position report and plotting series for a configured location.
//!
//! Usage: `cargo run --example munich_report --features io [config.json] [output-dir]`
//!
//! Without arguments the built-in Munich configuration is used and the CSV files
//! are written to the current directory. Set `RUST_LOG=debug` for details.

use chrono::{TimeZone, Utc};
use log::info;
use solar_exposure::io::Config;
use solar_exposure::io::csv_export::{
    PositionRecord, write_hour_lines, write_panel_exposure, write_positions, write_sun_paths,
};
use solar_exposure::position::solar_coordinates_at;
use solar_exposure::time::CalendarMoment;
use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

const MUNICH: &str = r#"
{
    "location": { "lat": 48.1, "lon": 11.6 },
    "panel": { "inclination": 30.0, "direction": -15.0 },
    "series": { "year": 2021, "clock": "civil", "daylight_saving": "european", "step_minutes": 15 }
}
"#;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => Config::from_file(path)?,
        None => Config::from_json_str(MUNICH)?,
    };
    let out_dir = args.next().map_or_else(|| PathBuf::from("."), PathBuf::from);

    let location = config.location();
    println!(
        "Location: {:.3}°, {:.3}° (east positive)",
        location.latitude(),
        location.longitude()
    );

    // Worked example moment
    let datetime = Utc.with_ymd_and_hms(2006, 8, 6, 6, 0, 0).unwrap();
    let sun = solar_coordinates_at(datetime, &location);
    println!("\nSun position at {datetime}:");
    println!(
        "  Azimuth: {:.3}° from south ({:.3}° compass)",
        sun.azimuth_deg(),
        sun.azimuth_from_north_deg()
    );
    println!("  Elevation: {:.3}°", sun.elevation_deg());
    println!("  Refracted elevation: {:.3}°", sun.elevation_refracted_deg());
    if let Some(panel) = config.panel() {
        println!(
            "  Above panel: {:.3}°",
            panel.relative_elevation(&sun).to_degrees()
        );
    }

    // Hourly positions for one day
    let records: Vec<PositionRecord> = (0..24)
        .map(|hour| {
            let moment = CalendarMoment::from_components(2021, 6, 21, hour, 0, 0);
            let at = Utc.with_ymd_and_hms(2021, 6, 21, hour, 0, 0).unwrap();
            PositionRecord {
                moment,
                sun: solar_coordinates_at(at, &location),
            }
        })
        .collect();
    let positions_path = out_dir.join("positions.csv");
    write_positions(
        BufWriter::new(File::create(&positions_path)?),
        &records,
        config.panel().as_ref(),
    )?;
    info!("wrote {}", positions_path.display());

    let Some(builder) = config.series_builder() else {
        println!("\nNo series configured.");
        return Ok(());
    };
    let series = builder.build()?;

    println!("\nSun paths:");
    for path in &series.sun_paths {
        let highest = path
            .points
            .iter()
            .map(|p| p.elevation_deg)
            .fold(f64::NEG_INFINITY, f64::max);
        println!(
            "  {:02}-{:02} (UTC{:+.2} h): {} samples above horizon, max elevation {:.1}°",
            path.month,
            path.day,
            path.utc_offset_hours,
            path.points.len(),
            highest
        );
    }

    write_sun_paths(BufWriter::new(File::create(out_dir.join("sun_paths.csv"))?), &series)?;
    write_hour_lines(BufWriter::new(File::create(out_dir.join("hour_lines.csv"))?), &series)?;
    write_panel_exposure(
        BufWriter::new(File::create(out_dir.join("panel_exposure.csv"))?),
        &series,
    )?;
    println!("\nCSV files written to {}", out_dir.display());

    Ok(())
}
