//! Grouped dashboard metrics over a clean record set.
//!
//! Every function here is pure: it takes the (already filtered) clean set,
//! produces a fresh result table or scalar, and tolerates empty input by
//! returning an empty result.

pub mod company;
pub mod couriers;
pub mod restaurants;
pub mod types;
pub mod utility;
