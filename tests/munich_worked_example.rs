//! Full calculation chain for Munich, 2006-08-06 06:00 UTC (48.1°N, 11.6°E).
//!
//! Reference values from the worked example in the German Wikipedia article
//! "Sonnenstand".

use solar_exposure::ecliptic::ecliptic_coordinates;
use solar_exposure::position::{greenwich_sidereal_hours, solar_coordinates};
use solar_exposure::time::{CalendarMoment, CalendarSystem};
use solar_exposure::{GeoLocation, PlaneOrientation};

const EPSILON: f64 = 1e-4;

fn moment() -> CalendarMoment {
    CalendarMoment::new(2006, 8, 6, 6, 0, 0).unwrap()
}

fn munich() -> GeoLocation {
    GeoLocation::new(48.1, 11.6).unwrap()
}

fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "{what}: got {actual}, expected {expected}"
    );
}

#[test]
fn test_julian_date() {
    assert_close(
        moment().julian_date(CalendarSystem::Gregorian).value(),
        2_453_953.75,
        "JD",
    );
    assert_close(
        moment()
            .midnight()
            .julian_date(CalendarSystem::Gregorian)
            .julian_century(),
        0.065_941_136,
        "T0",
    );
}

#[test]
fn test_ecliptic_coordinates() {
    let ecliptic = ecliptic_coordinates(&moment());
    assert_close(ecliptic.days_since_epoch(), 2408.75, "n");
    assert_close(ecliptic.mean_longitude_deg(), 134.6382, "L");
    assert_close(ecliptic.mean_anomaly_deg(), 211.5927, "g");
    assert_close(ecliptic.ecliptic_longitude_deg(), 133.6528, "λ");
    assert_close(ecliptic.obliquity_deg(), 23.4380, "ε");
    assert_close(ecliptic.right_ascension_deg(), 136.1189, "α");
    assert_close(ecliptic.declination_deg(), 16.7258, "δ");
}

#[test]
fn test_horizontal_coordinates() {
    assert_close(greenwich_sidereal_hours(&moment()), 2.9759, "θG");

    let sun = solar_coordinates(&moment(), &munich());
    assert_close(sun.local_sidereal_deg(), 56.2387, "θ");
    assert_close(sun.hour_angle_rad().to_degrees(), -79.8802, "τ");
    assert_close(sun.azimuth_deg(), -94.0618, "azimuth");
    assert_close(sun.elevation_deg(), 19.0616, "elevation");
    assert_close(sun.elevation_refracted_deg(), 19.1097, "refracted elevation");

    // Compass bearing: east of north by about 85.9°
    assert_close(sun.azimuth_from_north_deg(), 85.9382, "compass azimuth");
    assert!(sun.is_sun_up());
}

#[test]
fn test_panel_relative_elevation() {
    let sun = solar_coordinates(&moment(), &munich());

    // South-facing 30° panel sees the early morning sun almost edge-on
    let south = PlaneOrientation::from_degrees(30.0, 0.0).unwrap();
    let south_deg = south.relative_elevation(&sun).to_degrees();

    // East-facing panel of the same tilt sees it much higher
    let east = PlaneOrientation::from_degrees(30.0, -90.0).unwrap();
    let east_deg = east.relative_elevation(&sun).to_degrees();

    assert!(east_deg > sun.elevation_deg());
    assert!(south_deg < sun.elevation_deg());
    assert!((east_deg - 48.96).abs() < 0.01, "east panel: {east_deg}");
    assert!((south_deg - 14.44).abs() < 0.01, "south panel: {south_deg}");
}

#[test]
#[cfg(feature = "chrono")]
fn test_same_result_through_chrono() {
    use chrono::{TimeZone, Utc};
    use chrono_tz::Europe::Berlin;
    use solar_exposure::position::solar_coordinates_at;

    let summer_time = Berlin.with_ymd_and_hms(2006, 8, 6, 8, 0, 0).unwrap();
    let utc = Utc.with_ymd_and_hms(2006, 8, 6, 6, 0, 0).unwrap();

    let expected = solar_coordinates(&moment(), &munich());
    assert_eq!(solar_coordinates_at(summer_time, &munich()), expected);
    assert_eq!(solar_coordinates_at(utc, &munich()), expected);
}
