/// Earnings rolled up by calendar period
///
/// Bucket keys sort lexicographically in date order, so the newest-first
/// ordering is just a descending sort on the key.
///
/// | period  | key          | example      |
/// |---------|--------------|--------------|
/// | `day`   | `YYYY-MM-DD` | `2024-01-05` |
/// | `week`  | `YYYY-Www`   | `2024-W01`   |
/// | `month` | `YYYY-MM`    | `2024-01`    |
///
/// Weeks are ISO weeks keyed by ISO year, so 2024-12-30 falls in `2025-W01`.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::models::shift::Shift;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Day,
    Week,
    Month,
}

impl Period {
    /// Parses a query parameter; anything unrecognized means `Day`
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("week") => Period::Week,
            Some("month") => Period::Month,
            _ => Period::Day,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
        }
    }

    pub fn bucket_key(&self, date: NaiveDate) -> String {
        match self {
            Period::Day => date.format("%Y-%m-%d").to_string(),
            Period::Week => {
                let week = date.iso_week();
                format!("{:04}-W{:02}", week.year(), week.week())
            }
            Period::Month => date.format("%Y-%m").to_string(),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsBucket {
    /// Bucket key, e.g. `2024-01`
    pub period: String,
    pub shift_count: u64,
    pub total_hours: Decimal,
    pub total_tips: Decimal,
    pub total_earnings: Decimal,
}

impl EarningsBucket {
    fn empty(period: String) -> Self {
        Self {
            period,
            shift_count: 0,
            total_hours: Decimal::ZERO,
            total_tips: Decimal::ZERO,
            total_earnings: Decimal::ZERO,
        }
    }

    fn add(&mut self, shift: &Shift) {
        self.shift_count += 1;
        self.total_hours += shift.hours_worked;
        self.total_tips += shift.tips();
        self.total_earnings += shift.total_earned();
    }
}

/// Groups shifts by `period`, newest bucket first
pub fn bucket_earnings(shifts: &[Shift], period: Period) -> Vec<EarningsBucket> {
    let mut buckets: BTreeMap<String, EarningsBucket> = BTreeMap::new();

    for shift in shifts {
        let key = period.bucket_key(shift.date);
        buckets
            .entry(key)
            .or_insert_with_key(|key| EarningsBucket::empty(key.clone()))
            .add(shift);
    }

    buckets.into_values().rev().collect()
}
