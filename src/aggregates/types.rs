//! Result-row types produced by the aggregation functions.
//!
//! Each table is an ordered `Vec` of one of these rows; the presentation
//! layer consumes them directly or as serialized JSON.

use chrono::NaiveDate;
use serde::Serialize;

use crate::record::{City, Traffic};

/// Order count for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyOrders {
    pub order_date: NaiveDate,
    pub orders: usize,
}

/// Order count and share of total for one traffic density.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrafficShare {
    pub road_traffic_density: Traffic,
    pub orders: usize,
    pub share: f64,
}

/// Order count for one (city, traffic density) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityTrafficOrders {
    pub city: City,
    pub road_traffic_density: Traffic,
    pub orders: usize,
}

/// Order count for one week of the year (Sunday-first, zero-padded key).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyOrders {
    pub week: String,
    pub orders: usize,
}

/// Orders per distinct courier for one week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyCourierLoad {
    pub week: String,
    pub orders: usize,
    pub couriers: usize,
    pub orders_per_courier: f64,
}

/// Median delivery coordinate for one (city, traffic density) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliveryHotspot {
    pub city: City,
    pub road_traffic_density: Traffic,
    pub latitude: f64,
    pub longitude: f64,
}

/// Mean rating for one courier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourierRating {
    pub delivery_person_id: String,
    pub rating_mean: f64,
}

/// Rating mean and standard deviation for one courier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourierRatingStats {
    pub delivery_person_id: String,
    pub courier_mean: f64,
    pub courier_std: f64,
}

/// Rating mean and standard deviation for one traffic density.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrafficRatingStats {
    pub road_traffic_density: Traffic,
    pub traffic_mean: f64,
    pub traffic_std: f64,
}

/// Rating mean and standard deviation for one weather condition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherRatingStats {
    pub weather_condition: String,
    pub weather_mean: f64,
    pub weather_std: f64,
}

/// Mean delivery time for one courier within one city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourierSpeed {
    pub city: City,
    pub delivery_person_id: String,
    pub avg_time: f64,
}

/// Mean restaurant-to-customer distance for one city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityDistance {
    pub city: City,
    pub avg_distance: f64,
}

/// Delivery-time mean and standard deviation for one city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityTimeStats {
    pub city: City,
    pub avg_time: f64,
    pub std_time: f64,
}

/// Delivery-time mean and standard deviation for one (city, traffic) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityTrafficTimeStats {
    pub city: City,
    pub road_traffic_density: Traffic,
    pub avg_time: f64,
    pub std_time: f64,
}

/// The (city, traffic) delivery-time table plus the midpoint of its std
/// column, used to center the color scale of the hierarchical chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrafficTimeBreakdown {
    pub rows: Vec<CityTrafficTimeStats>,
    pub std_midpoint: f64,
}

/// Delivery-time mean and standard deviation for one (city, order type) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityOrderTypeTimeStats {
    pub city: City,
    pub order_type: String,
    pub avg_time: f64,
    pub std_time: f64,
}
