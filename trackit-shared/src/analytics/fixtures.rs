//! Shift builders shared by the analytics tests

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::shift::Shift;

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub struct ShiftBuilder {
    shift: Shift,
}

impl ShiftBuilder {
    /// A zero-value shift for `user_id` on `day` (YYYY-MM-DD)
    pub fn new(user_id: Uuid, day: &str) -> Self {
        let date = date(day);
        let created: DateTime<Utc> = Utc.from_utc_datetime(&date.and_hms_opt(12, 0, 0).unwrap());

        Self {
            shift: Shift {
                id: Uuid::new_v4(),
                user_id,
                date,
                hours_worked: Decimal::ZERO,
                hourly_wage: Decimal::ZERO,
                cash_tips: Decimal::ZERO,
                credit_tips: Decimal::ZERO,
                created_at: created,
                updated_at: created,
            },
        }
    }

    pub fn hours(mut self, hours: Decimal, wage: Decimal) -> Self {
        self.shift.hours_worked = hours;
        self.shift.hourly_wage = wage;
        self
    }

    pub fn tips(mut self, cash: Decimal, credit: Decimal) -> Self {
        self.shift.cash_tips = cash;
        self.shift.credit_tips = credit;
        self
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.shift.created_at = at;
        self.shift.updated_at = at;
        self
    }

    pub fn id(mut self, id: Uuid) -> Self {
        self.shift.id = id;
        self
    }

    pub fn build(self) -> Shift {
        self.shift
    }
}
