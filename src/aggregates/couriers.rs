//! Courier metrics: ratings, speed ranking, and overview scalars.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::aggregates::types::{
    CourierRating, CourierRatingStats, CourierSpeed, TrafficRatingStats, WeatherRatingStats,
};
use crate::aggregates::utility::{mean, stddev};
use crate::record::{City, CleanRecord};

/// Ranking tables keep at most this many couriers per city.
const RANKING_SIZE: usize = 10;

fn grouped_stats<K: Ord>(
    records: &[CleanRecord],
    key: impl Fn(&CleanRecord) -> K,
    value: impl Fn(&CleanRecord) -> f64,
) -> Vec<(K, f64, f64)> {
    let mut groups: BTreeMap<K, Vec<f64>> = BTreeMap::new();
    for r in records {
        groups.entry(key(r)).or_default().push(value(r));
    }
    groups
        .into_iter()
        .map(|(k, values)| {
            let m = mean(&values);
            let sd = stddev(&values, m);
            (k, m, sd)
        })
        .collect()
}

/// Mean rating per courier, best rated first.
pub fn avg_rating_by_courier(records: &[CleanRecord]) -> Vec<CourierRating> {
    let mut rows: Vec<CourierRating> =
        grouped_stats(records, |r| r.delivery_person_id.clone(), |r| r.delivery_person_rating)
            .into_iter()
            .map(|(delivery_person_id, rating_mean, _)| CourierRating {
                delivery_person_id,
                rating_mean,
            })
            .collect();
    rows.sort_by(|a, b| {
        b.rating_mean
            .partial_cmp(&a.rating_mean)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.delivery_person_id.cmp(&b.delivery_person_id))
    });
    rows
}

/// Rating mean and standard deviation per courier, ordered by courier id.
pub fn rating_stats_by_courier(records: &[CleanRecord]) -> Vec<CourierRatingStats> {
    grouped_stats(records, |r| r.delivery_person_id.clone(), |r| r.delivery_person_rating)
        .into_iter()
        .map(|(delivery_person_id, courier_mean, courier_std)| CourierRatingStats {
            delivery_person_id,
            courier_mean,
            courier_std,
        })
        .collect()
}

/// Rating mean and standard deviation per traffic density.
pub fn rating_stats_by_traffic(records: &[CleanRecord]) -> Vec<TrafficRatingStats> {
    grouped_stats(records, |r| r.road_traffic_density, |r| r.delivery_person_rating)
        .into_iter()
        .map(|(road_traffic_density, traffic_mean, traffic_std)| TrafficRatingStats {
            road_traffic_density,
            traffic_mean,
            traffic_std,
        })
        .collect()
}

/// Rating mean and standard deviation per weather condition.
pub fn rating_stats_by_weather(records: &[CleanRecord]) -> Vec<WeatherRatingStats> {
    grouped_stats(records, |r| r.weather_condition.clone(), |r| r.delivery_person_rating)
        .into_iter()
        .map(|(weather_condition, weather_mean, weather_std)| WeatherRatingStats {
            weather_condition,
            weather_mean,
            weather_std,
        })
        .collect()
}

/// Top couriers by mean delivery time, up to ten per city, concatenated in
/// the fixed city order.
///
/// `ascending` ranks the fastest couriers first; `false` ranks the slowest
/// first. Courier id breaks ties.
pub fn rank_couriers_by_time(records: &[CleanRecord], ascending: bool) -> Vec<CourierSpeed> {
    let per_courier: Vec<((City, String), f64, f64)> = grouped_stats(
        records,
        |r| (r.city, r.delivery_person_id.clone()),
        |r| r.time_taken_minutes as f64,
    );

    let mut ranked = Vec::new();
    for city in City::ALL {
        let mut rows: Vec<CourierSpeed> = per_courier
            .iter()
            .filter(|((c, _), _, _)| *c == city)
            .map(|((city, delivery_person_id), avg_time, _)| CourierSpeed {
                city: *city,
                delivery_person_id: delivery_person_id.clone(),
                avg_time: *avg_time,
            })
            .collect();
        rows.sort_by(|a, b| {
            let by_time = a.avg_time.partial_cmp(&b.avg_time).unwrap_or(Ordering::Equal);
            let by_time = if ascending { by_time } else { by_time.reverse() };
            by_time.then_with(|| a.delivery_person_id.cmp(&b.delivery_person_id))
        });
        rows.truncate(RANKING_SIZE);
        ranked.extend(rows);
    }
    ranked
}

/// Youngest and oldest courier age over the set, if non-empty.
pub fn age_extremes(records: &[CleanRecord]) -> Option<(u32, u32)> {
    let min = records.iter().map(|r| r.delivery_person_age).min()?;
    let max = records.iter().map(|r| r.delivery_person_age).max()?;
    Some((min, max))
}

/// Worst and best vehicle condition score over the set, if non-empty.
pub fn vehicle_condition_extremes(records: &[CleanRecord]) -> Option<(u32, u32)> {
    let min = records.iter().map(|r| r.vehicle_condition).min()?;
    let max = records.iter().map(|r| r.vehicle_condition).max()?;
    Some((min, max))
}

/// Number of distinct couriers in the set.
pub fn unique_couriers(records: &[CleanRecord]) -> usize {
    records
        .iter()
        .map(|r| r.delivery_person_id.as_str())
        .collect::<std::collections::HashSet<_>>()
        .len()
}
