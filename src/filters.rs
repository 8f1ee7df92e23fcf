//! Session-scoped narrowing of a clean record set.

use chrono::NaiveDate;

use crate::record::{CleanRecord, Traffic};

/// Caller-supplied filters applied before each aggregation run.
///
/// An empty allow-list leaves that dimension unconstrained. The struct is a
/// plain value passed per invocation; nothing is shared across sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionFilters {
    /// Exclusive upper bound on `order_date`.
    pub until: Option<NaiveDate>,
    pub traffic: Vec<Traffic>,
    pub weather: Vec<String>,
}

impl SessionFilters {
    pub fn apply(&self, records: &[CleanRecord]) -> Vec<CleanRecord> {
        records
            .iter()
            .filter(|r| self.until.is_none_or(|cutoff| r.order_date < cutoff))
            .filter(|r| self.traffic.is_empty() || self.traffic.contains(&r.road_traffic_density))
            .filter(|r| self.weather.is_empty() || self.weather.contains(&r.weather_condition))
            .cloned()
            .collect()
    }
}
