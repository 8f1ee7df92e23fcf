//! Order-volume metrics: daily and weekly counts, traffic mix, geography.

use std::collections::{BTreeMap, HashSet};

use crate::aggregates::types::{
    CityTrafficOrders, DailyOrders, DeliveryHotspot, TrafficShare, WeeklyCourierLoad, WeeklyOrders,
};
use crate::aggregates::utility::median;
use crate::record::{City, CleanRecord, Traffic};

/// strftime-style `%U` key: week of year, Sunday first, zero-padded.
fn week_key(r: &CleanRecord) -> String {
    r.order_date.format("%U").to_string()
}

/// Order count per calendar day, ascending by date.
pub fn daily_order_count(records: &[CleanRecord]) -> Vec<DailyOrders> {
    let mut by_day: BTreeMap<_, usize> = BTreeMap::new();
    for r in records {
        *by_day.entry(r.order_date).or_default() += 1;
    }
    by_day
        .into_iter()
        .map(|(order_date, orders)| DailyOrders { order_date, orders })
        .collect()
}

/// Order count per traffic density plus each group's share of the total.
///
/// Returns an empty table for an empty input; shares of a non-empty result
/// sum to 1.
pub fn traffic_share(records: &[CleanRecord]) -> Vec<TrafficShare> {
    let mut by_traffic: BTreeMap<Traffic, usize> = BTreeMap::new();
    for r in records {
        *by_traffic.entry(r.road_traffic_density).or_default() += 1;
    }

    let total: usize = by_traffic.values().sum();
    if total == 0 {
        return Vec::new();
    }

    by_traffic
        .into_iter()
        .map(|(road_traffic_density, orders)| TrafficShare {
            road_traffic_density,
            orders,
            share: orders as f64 / total as f64,
        })
        .collect()
}

/// Order count per (city, traffic density) pair.
pub fn orders_by_city_and_traffic(records: &[CleanRecord]) -> Vec<CityTrafficOrders> {
    let mut by_pair: BTreeMap<(City, Traffic), usize> = BTreeMap::new();
    for r in records {
        *by_pair.entry((r.city, r.road_traffic_density)).or_default() += 1;
    }
    by_pair
        .into_iter()
        .map(|((city, road_traffic_density), orders)| CityTrafficOrders {
            city,
            road_traffic_density,
            orders,
        })
        .collect()
}

/// Order count per week of the year, ascending by week key.
pub fn weekly_order_count(records: &[CleanRecord]) -> Vec<WeeklyOrders> {
    let mut by_week: BTreeMap<String, usize> = BTreeMap::new();
    for r in records {
        *by_week.entry(week_key(r)).or_default() += 1;
    }
    by_week
        .into_iter()
        .map(|(week, orders)| WeeklyOrders { week, orders })
        .collect()
}

/// Orders per distinct courier per week.
///
/// Order counts and courier counts are computed independently and joined on
/// the week key; a week present in only one side is dropped rather than
/// zero-filled.
pub fn weekly_orders_per_courier(records: &[CleanRecord]) -> Vec<WeeklyCourierLoad> {
    let mut order_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut courier_sets: BTreeMap<String, HashSet<&str>> = BTreeMap::new();

    for r in records {
        let week = week_key(r);
        *order_counts.entry(week.clone()).or_default() += 1;
        courier_sets.entry(week).or_default().insert(&r.delivery_person_id);
    }

    order_counts
        .into_iter()
        .filter_map(|(week, orders)| {
            let couriers = courier_sets.get(&week)?.len();
            Some(WeeklyCourierLoad {
                week,
                orders,
                couriers,
                orders_per_courier: orders as f64 / couriers as f64,
            })
        })
        .collect()
}

/// Median delivery coordinate per (city, traffic density) pair, for the
/// geographic hotspot view. Latitude and longitude medians are taken
/// independently.
pub fn median_delivery_location(records: &[CleanRecord]) -> Vec<DeliveryHotspot> {
    let mut by_pair: BTreeMap<(City, Traffic), (Vec<f64>, Vec<f64>)> = BTreeMap::new();
    for r in records {
        let entry = by_pair.entry((r.city, r.road_traffic_density)).or_default();
        entry.0.push(r.delivery_location_latitude);
        entry.1.push(r.delivery_location_longitude);
    }
    by_pair
        .into_iter()
        .map(|((city, road_traffic_density), (lats, lons))| DeliveryHotspot {
            city,
            road_traffic_density,
            latitude: median(lats),
            longitude: median(lons),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Festival;
    use chrono::NaiveDate;

    fn order(date: (i32, u32, u32), courier: &str, traffic: Traffic, city: City) -> CleanRecord {
        CleanRecord {
            id: "0x1".to_string(),
            delivery_person_id: courier.to_string(),
            delivery_person_age: 30,
            delivery_person_rating: 4.5,
            restaurant_latitude: 12.9,
            restaurant_longitude: 77.6,
            delivery_location_latitude: 13.0,
            delivery_location_longitude: 77.7,
            order_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            weather_condition: "conditions Sunny".to_string(),
            road_traffic_density: traffic,
            vehicle_condition: 2,
            order_type: "Snack".to_string(),
            vehicle_type: "motorcycle".to_string(),
            multiple_deliveries: 1,
            festival: Festival::No,
            city,
            time_taken_minutes: 25,
        }
    }

    #[test]
    fn test_daily_order_count_sorted_ascending() {
        let records = vec![
            order((2022, 3, 15), "A", Traffic::Low, City::Urban),
            order((2022, 3, 10), "A", Traffic::Low, City::Urban),
            order((2022, 3, 10), "B", Traffic::Low, City::Urban),
        ];
        let table = daily_order_count(&records);
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].order_date, NaiveDate::from_ymd_opt(2022, 3, 10).unwrap());
        assert_eq!(table[0].orders, 2);
        assert_eq!(table[1].orders, 1);
    }

    #[test]
    fn test_traffic_share_sums_to_one() {
        let records = vec![
            order((2022, 3, 10), "A", Traffic::Low, City::Urban),
            order((2022, 3, 10), "B", Traffic::Jam, City::Urban),
            order((2022, 3, 10), "C", Traffic::Jam, City::Urban),
            order((2022, 3, 10), "D", Traffic::High, City::Urban),
        ];
        let table = traffic_share(&records);
        let total_share: f64 = table.iter().map(|r| r.share).sum();
        assert!((total_share - 1.0).abs() < 1e-9);
        let jam = table
            .iter()
            .find(|r| r.road_traffic_density == Traffic::Jam)
            .unwrap();
        assert_eq!(jam.orders, 2);
        assert!((jam.share - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_traffic_share_empty_input() {
        assert!(traffic_share(&[]).is_empty());
    }

    #[test]
    fn test_orders_by_city_and_traffic() {
        let records = vec![
            order((2022, 3, 10), "A", Traffic::Low, City::Urban),
            order((2022, 3, 10), "B", Traffic::Low, City::Urban),
            order((2022, 3, 10), "C", Traffic::Low, City::Metropolitan),
        ];
        let table = orders_by_city_and_traffic(&records);
        assert_eq!(table.len(), 2);
        // Metropolitan sorts before Urban
        assert_eq!(table[0].city, City::Metropolitan);
        assert_eq!(table[0].orders, 1);
        assert_eq!(table[1].orders, 2);
    }

    #[test]
    fn test_weekly_key_is_sunday_first_zero_padded() {
        // 2022-04-10 was a Sunday, opening week 15 of the year
        let records = vec![order((2022, 4, 10), "A", Traffic::Low, City::Urban)];
        let table = weekly_order_count(&records);
        assert_eq!(table[0].week, "15");
    }

    #[test]
    fn test_weekly_orders_per_courier_ratio() {
        // Two couriers making 3 and 5 orders in week 15
        let mut records = Vec::new();
        for day in 10..13 {
            records.push(order((2022, 4, day), "A", Traffic::Low, City::Urban));
        }
        for day in 10..15 {
            records.push(order((2022, 4, day), "B", Traffic::Low, City::Urban));
        }
        let table = weekly_orders_per_courier(&records);
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].week, "15");
        assert_eq!(table[0].orders, 8);
        assert_eq!(table[0].couriers, 2);
        assert!((table[0].orders_per_courier - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_median_delivery_location() {
        let mut records = vec![
            order((2022, 3, 10), "A", Traffic::Low, City::Urban),
            order((2022, 3, 10), "B", Traffic::Low, City::Urban),
            order((2022, 3, 10), "C", Traffic::Low, City::Urban),
        ];
        records[0].delivery_location_latitude = 13.0;
        records[1].delivery_location_latitude = 13.2;
        records[2].delivery_location_latitude = 13.9;
        let table = median_delivery_location(&records);
        assert_eq!(table.len(), 1);
        assert!((table[0].latitude - 13.2).abs() < 1e-9);
    }
}
