//! Output formatting and persistence for metric results.
//!
//! Supports pretty-printed JSON for result tables/scalars and CSV export of a
//! sanitized record set.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::record::CleanRecord;
use csv::WriterBuilder;

/// Logs a result table or scalar as pretty-printed JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes a clean record set as CSV using the source column headers.
///
/// The exported file round-trips: the loader and sanitizer accept it and
/// reproduce the same set. An existing file at `path` is replaced.
pub fn write_clean_csv(path: &str, records: &[CleanRecord]) -> Result<()> {
    debug!(path, rows = records.len(), "Writing clean CSV");

    let mut writer = WriterBuilder::new().from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{City, Festival, Traffic};
    use chrono::NaiveDate;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn sample_record() -> CleanRecord {
        CleanRecord {
            id: "0x1".to_string(),
            delivery_person_id: "RES01DEL01".to_string(),
            delivery_person_age: 30,
            delivery_person_rating: 4.5,
            restaurant_latitude: 12.9,
            restaurant_longitude: 77.6,
            delivery_location_latitude: 13.0,
            delivery_location_longitude: 77.7,
            order_date: NaiveDate::from_ymd_opt(2022, 3, 10).unwrap(),
            weather_condition: "conditions Sunny".to_string(),
            road_traffic_density: Traffic::Low,
            vehicle_condition: 2,
            order_type: "Snack".to_string(),
            vehicle_type: "motorcycle".to_string(),
            multiple_deliveries: 1,
            festival: Festival::No,
            city: City::Urban,
            time_taken_minutes: 25,
        }
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&vec![sample_record()]).unwrap();
    }

    #[test]
    fn test_write_clean_csv_headers_and_rows() {
        let path = temp_path("delivery_metrics_test_write.csv");
        let _ = fs::remove_file(&path);

        write_clean_csv(&path, &[sample_record(), sample_record()]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Delivery_person_ID"));
        assert!(lines[0].contains("Time_taken(min)"));
        // Dates keep the source text format
        assert!(lines[1].contains("10-03-2022"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_clean_csv_replaces_existing_file() {
        let path = temp_path("delivery_metrics_test_replace.csv");
        let _ = fs::remove_file(&path);

        write_clean_csv(&path, &[sample_record(), sample_record()]).unwrap();
        write_clean_csv(&path, &[sample_record()]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);

        fs::remove_file(&path).unwrap();
    }
}
