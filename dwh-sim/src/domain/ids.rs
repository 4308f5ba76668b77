use serde::Serialize;
use std::fmt;
use time::{Date, Month};

/// A calendar day encoded as `YYYYMMDD`.
///
/// Ordering of keys matches ordering of the dates they encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DateKey(u32);

impl DateKey {
    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// Decode the key back into the calendar date it was built from.
    pub fn to_date(self) -> Result<Date, time::error::ComponentRange> {
        let year = (self.0 / 10_000) as i32;
        let month = Month::try_from(((self.0 / 100) % 100) as u8)?;
        let day = (self.0 % 100) as u8;
        Date::from_calendar_date(year, month, day)
    }
}

impl From<Date> for DateKey {
    fn from(date: Date) -> Self {
        let year = date.year().max(0) as u32;
        Self(year * 10_000 + u8::from(date.month()) as u32 * 100 + date.day() as u32)
    }
}

impl From<DateKey> for u32 {
    fn from(key: DateKey) -> Self {
        key.0
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
