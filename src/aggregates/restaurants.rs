//! Restaurant metrics: delivery distance and delivery-time statistics.

use std::collections::BTreeMap;

use crate::aggregates::types::{
    CityDistance, CityOrderTypeTimeStats, CityTimeStats, CityTrafficTimeStats,
    TrafficTimeBreakdown,
};
use crate::aggregates::utility::{mean, round2, stddev};
use crate::geo::haversine_km;
use crate::record::{City, CleanRecord, Festival, TimeStat};

/// Restaurant-to-customer distance of a single order, in kilometers.
fn order_distance(r: &CleanRecord) -> f64 {
    haversine_km(
        r.restaurant_latitude,
        r.restaurant_longitude,
        r.delivery_location_latitude,
        r.delivery_location_longitude,
    )
}

/// Overall mean delivery distance, rounded to two decimals. `None` for an
/// empty set.
pub fn average_distance(records: &[CleanRecord]) -> Option<f64> {
    if records.is_empty() {
        return None;
    }
    let distances: Vec<f64> = records.iter().map(order_distance).collect();
    Some(round2(mean(&distances)))
}

/// Mean delivery distance per city.
pub fn average_distance_by_city(records: &[CleanRecord]) -> Vec<CityDistance> {
    let mut by_city: BTreeMap<City, Vec<f64>> = BTreeMap::new();
    for r in records {
        by_city.entry(r.city).or_default().push(order_distance(r));
    }
    by_city
        .into_iter()
        .map(|(city, distances)| CityDistance {
            city,
            avg_distance: mean(&distances),
        })
        .collect()
}

/// Delivery-time mean or standard deviation for orders matching the given
/// festival flag, rounded to two decimals.
///
/// `None` when no record matches the flag; the caller guards before display.
pub fn festival_time_stat(
    records: &[CleanRecord],
    festival: Festival,
    stat: TimeStat,
) -> Option<f64> {
    let times: Vec<f64> = records
        .iter()
        .filter(|r| r.festival == festival)
        .map(|r| r.time_taken_minutes as f64)
        .collect();
    if times.is_empty() {
        return None;
    }
    let m = mean(&times);
    let value = match stat {
        TimeStat::AvgTime => m,
        TimeStat::StdTime => stddev(&times, m),
    };
    Some(round2(value))
}

fn time_stats_grouped<K: Ord>(
    records: &[CleanRecord],
    key: impl Fn(&CleanRecord) -> K,
) -> Vec<(K, f64, f64)> {
    let mut groups: BTreeMap<K, Vec<f64>> = BTreeMap::new();
    for r in records {
        groups.entry(key(r)).or_default().push(r.time_taken_minutes as f64);
    }
    groups
        .into_iter()
        .map(|(k, times)| {
            let m = mean(&times);
            let sd = stddev(&times, m);
            (k, m, sd)
        })
        .collect()
}

/// Delivery-time mean and standard deviation per city.
pub fn time_stats_by_city(records: &[CleanRecord]) -> Vec<CityTimeStats> {
    time_stats_grouped(records, |r| r.city)
        .into_iter()
        .map(|(city, avg_time, std_time)| CityTimeStats { city, avg_time, std_time })
        .collect()
}

/// Delivery-time mean and standard deviation per (city, traffic) pair, with
/// the mean of the std column attached for color-scale centering.
pub fn time_stats_by_city_and_traffic(records: &[CleanRecord]) -> TrafficTimeBreakdown {
    let rows: Vec<CityTrafficTimeStats> =
        time_stats_grouped(records, |r| (r.city, r.road_traffic_density))
            .into_iter()
            .map(|((city, road_traffic_density), avg_time, std_time)| CityTrafficTimeStats {
                city,
                road_traffic_density,
                avg_time,
                std_time,
            })
            .collect();
    let stds: Vec<f64> = rows.iter().map(|r| r.std_time).collect();
    TrafficTimeBreakdown {
        std_midpoint: mean(&stds),
        rows,
    }
}

/// Delivery-time mean and standard deviation per (city, order type) pair.
pub fn time_stats_by_city_and_order_type(records: &[CleanRecord]) -> Vec<CityOrderTypeTimeStats> {
    time_stats_grouped(records, |r| (r.city, r.order_type.clone()))
        .into_iter()
        .map(|((city, order_type), avg_time, std_time)| CityOrderTypeTimeStats {
            city,
            order_type,
            avg_time,
            std_time,
        })
        .collect()
}
