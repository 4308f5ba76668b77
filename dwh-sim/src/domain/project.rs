use serde::Serialize;
use strum::{AsRefStr, Display, EnumString};
use time::Date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, AsRefStr)]
pub enum ProjectStatus {
    Delivered,
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, AsRefStr)]
pub enum DevelopmentType {
    Web,
    Mobile,
    Integration,
}

/// Inclusive range of days a project is worked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectWindow {
    pub start: Date,
    pub end: Date,
}

impl ProjectWindow {
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every day of the window, in order.
    pub fn days(&self) -> Vec<Date> {
        let mut days = Vec::new();
        let mut day = self.start;
        while day <= self.end {
            days.push(day);
            match day.next_day() {
                Some(next) => day = next,
                None => break,
            }
        }
        days
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    pub id: u32,
    pub client_id: u32,
    pub name: String,
    pub status: ProjectStatus,
    pub estimated_effort_hours: u32,
    pub budget: f64,
    pub development_type: DevelopmentType,
    pub maturity_level: u8,
    /// Not part of the exported columns; bounds the project's fact dates.
    #[serde(skip)]
    pub window: ProjectWindow,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Month;

    #[test]
    fn window_days_are_inclusive() {
        let window = ProjectWindow {
            start: Date::from_calendar_date(2024, Month::February, 27).unwrap(),
            end: Date::from_calendar_date(2024, Month::March, 2).unwrap(),
        };

        let days = window.days();
        assert_eq!(days.len(), 5);
        assert_eq!(days.first(), Some(&window.start));
        assert_eq!(days.last(), Some(&window.end));
        assert!(days.iter().all(|day| window.contains(*day)));
    }
}
