use serde::Serialize;
use time::{Date, Weekday};

use super::DateKey;

/// One day of the time dimension.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeRow {
    pub date_key: DateKey,
    pub weekday: String,
    pub iso_week: u8,
    pub month_abbrev: String,
    pub quarter: u8,
    pub year: i32,
    pub is_business_day: bool,
}

impl TimeRow {
    /// Derive every attribute from the calendar date alone.
    pub fn from_date(date: Date) -> Self {
        let month = date.month();
        let month_number = u8::from(month);

        Self {
            date_key: DateKey::from(date),
            weekday: date.weekday().to_string(),
            iso_week: date.iso_week(),
            month_abbrev: month.to_string().chars().take(3).collect(),
            quarter: (month_number - 1) / 3 + 1,
            year: date.year(),
            is_business_day: is_business_day(date),
        }
    }
}

pub fn is_business_day(date: Date) -> bool {
    !matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday)
}
