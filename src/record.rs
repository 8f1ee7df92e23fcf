//! Data types for delivery orders.
//!
//! A [`RawRecord`] is one row of the marketplace CSV export exactly as
//! shipped: every column is text, and several columns use a literal missing
//! marker instead of an empty cell. A [`CleanRecord`] is the typed projection
//! produced by the sanitizer.

use anyhow::{anyhow, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Text format used by the export for order dates (e.g. `13-03-2022`).
pub const ORDER_DATE_FORMAT: &str = "%d-%m-%Y";

/// One row of the raw export. Field names map to the exact CSV headers, so a
/// column missing from the input fails deserialization up front.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Delivery_person_ID")]
    pub delivery_person_id: String,
    #[serde(rename = "Delivery_person_Age")]
    pub delivery_person_age: String,
    #[serde(rename = "Delivery_person_Ratings")]
    pub delivery_person_ratings: String,
    #[serde(rename = "Restaurant_latitude")]
    pub restaurant_latitude: String,
    #[serde(rename = "Restaurant_longitude")]
    pub restaurant_longitude: String,
    #[serde(rename = "Delivery_location_latitude")]
    pub delivery_location_latitude: String,
    #[serde(rename = "Delivery_location_longitude")]
    pub delivery_location_longitude: String,
    #[serde(rename = "Order_Date")]
    pub order_date: String,
    #[serde(rename = "Weatherconditions")]
    pub weather_conditions: String,
    #[serde(rename = "Road_traffic_density")]
    pub road_traffic_density: String,
    #[serde(rename = "Vehicle_condition")]
    pub vehicle_condition: String,
    #[serde(rename = "Type_of_order")]
    pub type_of_order: String,
    #[serde(rename = "Type_of_vehicle")]
    pub type_of_vehicle: String,
    #[serde(rename = "multiple_deliveries")]
    pub multiple_deliveries: String,
    #[serde(rename = "Festival")]
    pub festival: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Time_taken(min)")]
    pub time_taken: String,
}

/// Typed, validated delivery order.
///
/// Serializes back to the source column headers (dates in the source
/// `%d-%m-%Y` format), so an exported clean set is accepted by the loader
/// again unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanRecord {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Delivery_person_ID")]
    pub delivery_person_id: String,
    #[serde(rename = "Delivery_person_Age")]
    pub delivery_person_age: u32,
    #[serde(rename = "Delivery_person_Ratings")]
    pub delivery_person_rating: f64,
    #[serde(rename = "Restaurant_latitude")]
    pub restaurant_latitude: f64,
    #[serde(rename = "Restaurant_longitude")]
    pub restaurant_longitude: f64,
    #[serde(rename = "Delivery_location_latitude")]
    pub delivery_location_latitude: f64,
    #[serde(rename = "Delivery_location_longitude")]
    pub delivery_location_longitude: f64,
    #[serde(rename = "Order_Date", with = "order_date_format")]
    pub order_date: NaiveDate,
    #[serde(rename = "Weatherconditions")]
    pub weather_condition: String,
    #[serde(rename = "Road_traffic_density")]
    pub road_traffic_density: Traffic,
    #[serde(rename = "Vehicle_condition")]
    pub vehicle_condition: u32,
    #[serde(rename = "Type_of_order")]
    pub order_type: String,
    #[serde(rename = "Type_of_vehicle")]
    pub vehicle_type: String,
    #[serde(rename = "multiple_deliveries")]
    pub multiple_deliveries: u32,
    #[serde(rename = "Festival")]
    pub festival: Festival,
    #[serde(rename = "City")]
    pub city: City,
    #[serde(rename = "Time_taken(min)")]
    pub time_taken_minutes: u32,
}

/// Road traffic density at order time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Traffic {
    Low,
    Medium,
    High,
    Jam,
}

impl Traffic {
    pub const ALL: [Traffic; 4] = [Traffic::Low, Traffic::Medium, Traffic::High, Traffic::Jam];
}

impl FromStr for Traffic {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Low" => Ok(Traffic::Low),
            "Medium" => Ok(Traffic::Medium),
            "High" => Ok(Traffic::High),
            "Jam" => Ok(Traffic::Jam),
            other => Err(anyhow!("unknown traffic density {:?}", other)),
        }
    }
}

impl fmt::Display for Traffic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Traffic::Low => "Low",
            Traffic::Medium => "Medium",
            Traffic::High => "High",
            Traffic::Jam => "Jam",
        };
        f.write_str(s)
    }
}

/// City category served by the order.
///
/// The raw export spells the first category `Metropolitian`; both spellings
/// parse, the canonical rendering is `Metropolitan`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum City {
    #[serde(alias = "Metropolitian")]
    Metropolitan,
    Urban,
    #[serde(rename = "Semi-Urban")]
    SemiUrban,
}

impl City {
    pub const ALL: [City; 3] = [City::Metropolitan, City::Urban, City::SemiUrban];
}

impl FromStr for City {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Metropolitan" | "Metropolitian" => Ok(City::Metropolitan),
            "Urban" => Ok(City::Urban),
            "Semi-Urban" => Ok(City::SemiUrban),
            other => Err(anyhow!("unknown city category {:?}", other)),
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            City::Metropolitan => "Metropolitan",
            City::Urban => "Urban",
            City::SemiUrban => "Semi-Urban",
        };
        f.write_str(s)
    }
}

/// Whether the order was placed during a festival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Festival {
    Yes,
    No,
}

impl FromStr for Festival {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Yes" => Ok(Festival::Yes),
            "No" => Ok(Festival::No),
            other => Err(anyhow!("unknown festival flag {:?}", other)),
        }
    }
}

impl fmt::Display for Festival {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Festival::Yes => "Yes",
            Festival::No => "No",
        })
    }
}

/// Parses an order date in the export's `%d-%m-%Y` text format.
pub fn parse_order_date(s: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), ORDER_DATE_FORMAT)
        .map_err(|e| anyhow!("invalid order date {:?}: {}", s, e))
}

/// Serde adapter keeping `Order_Date` in the source text format on export.
mod order_date_format {
    use super::ORDER_DATE_FORMAT;
    use chrono::NaiveDate;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, ser: S) -> Result<S::Ok, S::Error> {
        ser.collect_str(&date.format(ORDER_DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<NaiveDate, D::Error> {
        let s = String::deserialize(de)?;
        NaiveDate::parse_from_str(&s, ORDER_DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Statistic selector for the festival delivery-time lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeStat {
    AvgTime,
    StdTime,
}

impl FromStr for TimeStat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "avg_time" => Ok(TimeStat::AvgTime),
            "std_time" => Ok(TimeStat::StdTime),
            other => bail!("unknown statistic {:?} (expected avg_time or std_time)", other),
        }
    }
}
