//! Refined sunrise/sunset offsets against recorded reference values.
//!
//! Each row holds a midnight Julian date, a position, the truncated minute offsets of
//! sunrise and sunset from that midnight, and the classification of each.
#![allow(clippy::unwrap_used, clippy::panic, clippy::expect_used)]
extern crate std;

use std::format;
use std::string::String;
use std::vec::Vec;

use crate::{refined_sunrise_set_utc, Angle, DaylightType};

#[derive(Debug, serde::Deserialize)]
struct RefinedRow {
    julian_midnight: f64,
    longitude: f64,
    latitude: f64,
    sunrise_minutes: i64,
    sunset_minutes: i64,
    sunrise_type: String,
    sunset_type: String,
}

fn load_rows() -> Vec<RefinedRow> {
    let csv_path = "test_data/refined_sunrise_sunset.csv";
    let mut rdr =
        csv::Reader::from_path(csv_path).unwrap_or_else(|e| std::panic!("Failed to open CSV file {}: {}", csv_path, e));
    rdr.deserialize()
        .enumerate()
        .map(|(row_num, result)| {
            result.unwrap_or_else(|e| std::panic!("Failed to parse CSV row {}: {}", row_num + 2, e))
        })
        .collect()
}

#[test]
fn test_against_csv_data() {
    let rows = load_rows();
    assert_eq!(rows.len(), 57);

    let mut failures = Vec::new();
    for row in &rows {
        let latitude = Angle::from_degrees(row.latitude);
        let longitude = Angle::from_degrees(row.longitude);
        let (rise, rise_type) = refined_sunrise_set_utc(true, row.julian_midnight, latitude, longitude).unwrap();
        let (set, set_type) = refined_sunrise_set_utc(false, row.julian_midnight, latitude, longitude).unwrap();

        let expected_rise_type: DaylightType = row.sunrise_type.parse().unwrap();
        let expected_set_type: DaylightType = row.sunset_type.parse().unwrap();
        if rise as i64 != row.sunrise_minutes
            || set as i64 != row.sunset_minutes
            || rise_type != expected_rise_type
            || set_type != expected_set_type
        {
            failures.push(format!(
                "jd {} lon {} lat {}: got ({rise}, {set}, {rise_type}, {set_type}), expected ({}, {}, {}, {})",
                row.julian_midnight,
                row.longitude,
                row.latitude,
                row.sunrise_minutes,
                row.sunset_minutes,
                row.sunrise_type,
                row.sunset_type
            ));
        }
    }
    assert!(failures.is_empty(), "{} mismatches:\n{}", failures.len(), failures.join("\n"));
}

#[test]
fn transition_days_classify_rise_and_set_independently() {
    let rows = load_rows();
    let mixed: Vec<_> = rows
        .iter()
        .filter(|row| row.sunrise_type != row.sunset_type)
        .map(|row| (row.julian_midnight, row.longitude))
        .collect();
    assert_eq!(mixed, [(174.0, 0.0), (249.0, 180.0)]);

    let (_, rise_type) = refined_sunrise_set_utc(true, 174.0, Angle::from_degrees(70.0), Angle::from_degrees(0.0)).unwrap();
    let (_, set_type) = refined_sunrise_set_utc(false, 174.0, Angle::from_degrees(70.0), Angle::from_degrees(0.0)).unwrap();
    assert_eq!(rise_type, DaylightType::Normal);
    assert_eq!(set_type, DaylightType::MidnightSun);
}

#[test]
fn searched_events_agree_with_the_day_they_were_found_on() {
    for row in load_rows() {
        let latitude = Angle::from_degrees(row.latitude);
        let longitude = Angle::from_degrees(row.longitude);
        let mean_noon = 720.0 - 4.0 * row.longitude;
        for rise in [true, false] {
            let (minutes, kind) = refined_sunrise_set_utc(rise, row.julian_midnight, latitude, longitude).unwrap();
            if kind == DaylightType::Normal {
                continue;
            }
            let days = ((minutes - mean_noon) / 1440.0).round();
            assert_ne!(days, 0.0);
            let (local, local_kind) =
                refined_sunrise_set_utc(rise, row.julian_midnight + days, latitude, longitude).unwrap();
            assert_eq!(local_kind, DaylightType::Normal, "jd {} rise {rise}", row.julian_midnight);
            assert!(
                (days * 1440.0 + local - minutes).abs() < 2.0,
                "jd {} rise {rise}: {minutes} vs {days} days + {local}",
                row.julian_midnight
            );
        }
    }
}
