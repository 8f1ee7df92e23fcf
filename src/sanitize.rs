//! Raw-to-clean sanitization.
//!
//! The export marks a missing value with a literal `NaN` token per column
//! rather than an empty cell. Sanitization runs a fixed sequence of per-field
//! passes: drop rows carrying the missing marker in each marker-bearing
//! column, then coerce every surviving row into a typed [`CleanRecord`].
//! A non-marker value that fails to parse is a malformed row and aborts the
//! whole run.

use anyhow::{Context, Result, ensure};
use tracing::debug;

use crate::record::{CleanRecord, City, Festival, RawRecord, Traffic, parse_order_date};

/// Literal token the export writes for "no value" (compared after trimming;
/// the source files carry it with a trailing space).
pub const MISSING_MARKER: &str = "NaN";

/// Unit marker embedded in the `Time_taken(min)` column, e.g. `(min) 24`.
const TIME_UNIT_MARKER: &str = "(min) ";

/// Marker-bearing columns, in the order their drop passes run.
const MISSING_PASSES: &[(&str, fn(&RawRecord) -> &str)] = &[
    ("Delivery_person_Age", |r| &r.delivery_person_age),
    ("Road_traffic_density", |r| &r.road_traffic_density),
    ("City", |r| &r.city),
    ("Festival", |r| &r.festival),
    ("multiple_deliveries", |r| &r.multiple_deliveries),
];

fn is_missing(value: &str) -> bool {
    value.trim() == MISSING_MARKER
}

/// Sanitizes a raw record set into a fresh clean set.
///
/// The input is left untouched; running the result back through the loader
/// and this function yields an identical set.
///
/// # Errors
///
/// Fails on the first malformed field, naming the order id and column.
pub fn sanitize(raw: &[RawRecord]) -> Result<Vec<CleanRecord>> {
    let mut rows: Vec<&RawRecord> = raw.iter().collect();

    for &(field, value_of) in MISSING_PASSES {
        let before = rows.len();
        rows.retain(|r| !is_missing(value_of(r)));
        let removed = before - rows.len();
        if removed > 0 {
            debug!(field, removed, "Dropped rows with missing marker");
        }
    }

    let clean: Vec<CleanRecord> = rows
        .into_iter()
        .map(|r| {
            coerce(r).with_context(|| format!("malformed order {:?}", r.id.trim()))
        })
        .collect::<Result<_>>()?;

    debug!(raw = raw.len(), clean = clean.len(), "Sanitization complete");
    Ok(clean)
}

fn coerce(r: &RawRecord) -> Result<CleanRecord> {
    let delivery_person_age = parse_u32(&r.delivery_person_age).context("Delivery_person_Age")?;
    let delivery_person_rating =
        parse_f64(&r.delivery_person_ratings).context("Delivery_person_Ratings")?;
    ensure!(
        (0.0..=6.0).contains(&delivery_person_rating),
        "Delivery_person_Ratings: {} outside plausible range",
        delivery_person_rating
    );

    Ok(CleanRecord {
        id: r.id.trim().to_string(),
        delivery_person_id: r.delivery_person_id.trim().to_string(),
        delivery_person_age,
        delivery_person_rating,
        restaurant_latitude: parse_f64(&r.restaurant_latitude).context("Restaurant_latitude")?,
        restaurant_longitude: parse_f64(&r.restaurant_longitude).context("Restaurant_longitude")?,
        delivery_location_latitude: parse_f64(&r.delivery_location_latitude)
            .context("Delivery_location_latitude")?,
        delivery_location_longitude: parse_f64(&r.delivery_location_longitude)
            .context("Delivery_location_longitude")?,
        order_date: parse_order_date(&r.order_date).context("Order_Date")?,
        weather_condition: r.weather_conditions.trim().to_string(),
        road_traffic_density: r
            .road_traffic_density
            .parse::<Traffic>()
            .context("Road_traffic_density")?,
        vehicle_condition: parse_u32(&r.vehicle_condition).context("Vehicle_condition")?,
        order_type: r.type_of_order.trim().to_string(),
        vehicle_type: r.type_of_vehicle.trim().to_string(),
        multiple_deliveries: parse_u32(&r.multiple_deliveries).context("multiple_deliveries")?,
        festival: r.festival.parse::<Festival>().context("Festival")?,
        city: r.city.parse::<City>().context("City")?,
        time_taken_minutes: parse_time_taken(&r.time_taken).context("Time_taken(min)")?,
    })
}

fn parse_u32(s: &str) -> Result<u32> {
    Ok(s.trim().parse::<u32>()?)
}

fn parse_f64(s: &str) -> Result<f64> {
    Ok(s.trim().parse::<f64>()?)
}

/// Extracts the minute count from the `Time_taken(min)` column.
///
/// The export writes free text followed by the unit marker and the number
/// (`(min) 24`); a bare number is accepted too so re-cleaning an exported
/// clean set is stable.
fn parse_time_taken(s: &str) -> Result<u32> {
    let token = match s.split_once(TIME_UNIT_MARKER) {
        Some((_, rest)) => rest,
        None => s,
    };
    parse_u32(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn raw(age: &str, traffic: &str, city: &str, festival: &str) -> RawRecord {
        RawRecord {
            id: "0x1 ".to_string(),
            delivery_person_id: "RES01DEL01 ".to_string(),
            delivery_person_age: age.to_string(),
            delivery_person_ratings: "4.6".to_string(),
            restaurant_latitude: "12.91".to_string(),
            restaurant_longitude: "77.68".to_string(),
            delivery_location_latitude: "13.04".to_string(),
            delivery_location_longitude: "77.81".to_string(),
            order_date: "13-03-2022".to_string(),
            weather_conditions: "conditions Sunny".to_string(),
            road_traffic_density: traffic.to_string(),
            vehicle_condition: "2".to_string(),
            type_of_order: "Snack ".to_string(),
            type_of_vehicle: "motorcycle ".to_string(),
            multiple_deliveries: "1".to_string(),
            festival: festival.to_string(),
            city: city.to_string(),
            time_taken: "(min) 24".to_string(),
        }
    }

    #[test]
    fn test_sanitize_typical_row() {
        let clean = sanitize(&[raw("34 ", "Low ", "Urban ", "No ")]).unwrap();
        assert_eq!(clean.len(), 1);
        let c = &clean[0];
        assert_eq!(c.id, "0x1");
        assert_eq!(c.delivery_person_age, 34);
        assert_eq!(c.road_traffic_density, Traffic::Low);
        assert_eq!(c.city, City::Urban);
        assert_eq!(c.festival, Festival::No);
        assert_eq!(c.order_type, "Snack");
        assert_eq!(c.time_taken_minutes, 24);
        assert_eq!(c.order_date, NaiveDate::from_ymd_opt(2022, 3, 13).unwrap());
    }

    #[test]
    fn test_sanitize_drops_missing_marker_rows() {
        let rows = vec![
            raw("34", "Low", "Urban", "No"),
            raw("NaN ", "Low", "Urban", "No"),
            raw("29", "NaN ", "Urban", "No"),
            raw("29", "Jam", "NaN ", "No"),
            raw("29", "Jam", "Urban", "NaN "),
        ];
        let clean = sanitize(&rows).unwrap();
        assert_eq!(clean.len(), 1);
    }

    #[test]
    fn test_sanitize_row_missing_in_two_fields_dropped_once() {
        let rows = vec![raw("NaN ", "NaN ", "Urban", "No"), raw("20", "High", "Urban", "Yes")];
        let clean = sanitize(&rows).unwrap();
        assert_eq!(clean.len(), 1);
        assert_eq!(clean[0].delivery_person_age, 20);
    }

    #[test]
    fn test_sanitize_malformed_age_is_fatal() {
        let err = sanitize(&[raw("thirty", "Low", "Urban", "No")]).unwrap_err();
        assert!(format!("{:#}", err).contains("Delivery_person_Age"));
    }

    #[test]
    fn test_sanitize_malformed_date_is_fatal() {
        let mut r = raw("34", "Low", "Urban", "No");
        r.order_date = "2022/03/13".to_string();
        assert!(sanitize(&[r]).is_err());
    }

    #[test]
    fn test_sanitize_unknown_traffic_is_fatal() {
        assert!(sanitize(&[raw("34", "Gridlock", "Urban", "No")]).is_err());
    }

    #[test]
    fn test_time_taken_accepts_bare_minutes() {
        let mut r = raw("34", "Low", "Urban", "No");
        r.time_taken = "24".to_string();
        let clean = sanitize(&[r]).unwrap();
        assert_eq!(clean[0].time_taken_minutes, 24);
    }

    #[test]
    fn test_sanitize_empty_input() {
        assert!(sanitize(&[]).unwrap().is_empty());
    }
}
