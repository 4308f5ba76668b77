use std::collections::HashSet;
use std::ops::RangeInclusive;

use strum::{Display, EnumString};
use thiserror::Error;
use time::{macros::date, Date, Duration};

use crate::domain::{
    ContractType, DevelopmentType, InternalProcess, Role, Sector, Seniority, Severity, Team,
};

/// Smallest trailing buffer after the fact horizon: one quarter.
pub const MIN_TRAILING_BUFFER_DAYS: i64 = 90;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} count must be at least 1")]
    EmptyPopulation(&'static str),
    #[error("vocabulary '{0}' must not be empty")]
    EmptyVocabulary(&'static str),
    #[error("simulation horizon ends ({end}) before it starts ({start})")]
    InvalidHorizon { start: Date, end: Date },
    #[error("trailing buffer of {buffer_days} days is shorter than the required {required_days}")]
    BufferTooShort { buffer_days: i64, required_days: i64 },
    #[error("range '{0}' is empty or out of bounds")]
    InvalidRange(&'static str),
    #[error("margin factor must be strictly greater than 1, got {0}")]
    MarginNotAboveOne(f64),
    #[error("weights for '{0}' must be non-negative and not all zero")]
    InvalidWeights(&'static str),
    #[error("maturity level {0} is not one of 2, 3, 4")]
    UnsupportedMaturity(u8),
    #[error("parameter '{0}' must be a positive finite number")]
    NonPositive(&'static str),
    #[error("role '{0}' has more than one hourly cost")]
    DuplicateRole(Role),
}

/// Hourly base cost for one employee role.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleCost {
    pub role: Role,
    pub hourly_cost: f64,
}

/// Sampling weight and mean net resolution time for one severity.
#[derive(Debug, Clone, PartialEq)]
pub struct SeverityProfile {
    pub severity: Severity,
    pub weight: f64,
    pub mean_resolution_hours: f64,
}

/// Every knob of one generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub client_count: u32,
    pub employee_count: u32,
    pub project_count: u32,
    /// First day of the fact horizon.
    pub horizon_start: Date,
    /// Last day any effort record or defect report may fall on.
    pub horizon_end: Date,
    /// Extra days of the time dimension after `horizon_end`, so late closes resolve.
    pub trailing_buffer_days: i64,
    pub sectors: Vec<Sector>,
    pub contract_types: Vec<ContractType>,
    pub role_costs: Vec<RoleCost>,
    pub seniorities: Vec<Seniority>,
    pub teams: Vec<Team>,
    pub development_types: Vec<DevelopmentType>,
    pub delivered_probability: f64,
    pub effort_hours: RangeInclusive<u32>,
    pub project_duration_days: RangeInclusive<i64>,
    pub maturity_weights: Vec<(u8, f64)>,
    pub reference_hourly_rate: f64,
    pub margin_factor: RangeInclusive<f64>,
    /// Logged hours relative to estimated effort.
    pub effort_variation: RangeInclusive<f64>,
    pub average_daily_hours: f64,
    pub daily_hours: RangeInclusive<f64>,
    pub severities: Vec<SeverityProfile>,
    pub resolution_hours_std_dev: f64,
    pub min_resolution_hours: f64,
    pub close_delay_days: RangeInclusive<i64>,
    pub planning_standard_days: i64,
    /// Discovery weights aligned with [`InternalProcess::catalog`].
    pub discovery_weights: [f64; InternalProcess::CATALOG_LEN],
    pub docs_base_url: String,
}

/// Named parameter sets for [`SimulationConfig`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
pub enum Preset {
    #[default]
    #[strum(ascii_case_insensitive, serialize = "enterprise")]
    Enterprise,
    #[strum(ascii_case_insensitive, serialize = "startup")]
    Startup,
}

impl Preset {
    pub fn config(self) -> SimulationConfig {
        match self {
            Preset::Enterprise => SimulationConfig::enterprise(),
            Preset::Startup => SimulationConfig::startup(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::enterprise()
    }
}

impl SimulationConfig {
    pub fn enterprise() -> Self {
        Self {
            client_count: 8,
            employee_count: 10,
            project_count: 15,
            horizon_start: date!(2024 - 01 - 01),
            horizon_end: date!(2024 - 12 - 31),
            trailing_buffer_days: 92,
            sectors: vec![
                Sector::Finance,
                Sector::Retail,
                Sector::Health,
                Sector::Technology,
                Sector::Education,
            ],
            contract_types: vec![
                ContractType::FixedPrice,
                ContractType::TimeAndMaterials,
                ContractType::Subscription,
            ],
            role_costs: vec![
                RoleCost::new(Role::ProjectLead, 700.0),
                RoleCost::new(Role::SeniorDeveloper, 600.0),
                RoleCost::new(Role::MidDeveloper, 400.0),
                RoleCost::new(Role::JuniorDeveloper, 250.0),
                RoleCost::new(Role::QaTester, 350.0),
            ],
            seniorities: vec![Seniority::Senior, Seniority::Mid, Seniority::Junior],
            teams: vec![Team::Alpha, Team::Beta, Team::Gamma],
            development_types: vec![
                DevelopmentType::Web,
                DevelopmentType::Mobile,
                DevelopmentType::Integration,
            ],
            delivered_probability: 0.7,
            effort_hours: 200..=1999,
            project_duration_days: 60..=239,
            maturity_weights: vec![(2, 0.2), (3, 0.5), (4, 0.3)],
            reference_hourly_rate: 400.0,
            margin_factor: 1.1..=1.5,
            effort_variation: 0.9..=1.15,
            average_daily_hours: 4.5,
            daily_hours: 0.5..=8.5,
            severities: vec![
                SeverityProfile::new(Severity::Blocker, 0.1, 8.0),
                SeverityProfile::new(Severity::Major, 0.3, 4.0),
                SeverityProfile::new(Severity::Minor, 0.4, 1.5),
                SeverityProfile::new(Severity::Trivial, 0.2, 0.5),
            ],
            resolution_hours_std_dev: 1.5,
            min_resolution_hours: 0.25,
            close_delay_days: 1..=9,
            planning_standard_days: 5,
            discovery_weights: [0.05, 0.05, 0.15, 0.15, 0.20, 0.30, 0.10],
            docs_base_url: "http://docs.company.com".to_string(),
        }
    }

    pub fn startup() -> Self {
        Self {
            client_count: 4,
            employee_count: 6,
            project_count: 8,
            sectors: vec![Sector::Technology, Sector::Retail, Sector::Education],
            contract_types: vec![ContractType::TimeAndMaterials, ContractType::Subscription],
            role_costs: vec![
                RoleCost::new(Role::ProjectLead, 520.0),
                RoleCost::new(Role::SeniorDeveloper, 450.0),
                RoleCost::new(Role::MidDeveloper, 320.0),
                RoleCost::new(Role::JuniorDeveloper, 200.0),
                RoleCost::new(Role::QaTester, 280.0),
            ],
            teams: vec![Team::Alpha, Team::Beta],
            development_types: vec![DevelopmentType::Web, DevelopmentType::Mobile],
            delivered_probability: 0.6,
            effort_hours: 150..=900,
            maturity_weights: vec![(2, 0.5), (3, 0.4), (4, 0.1)],
            reference_hourly_rate: 360.0,
            margin_factor: 1.05..=1.3,
            ..Self::enterprise()
        }
    }

    /// Number of days in the fact horizon, both ends included.
    pub fn horizon_days(&self) -> i64 {
        (self.horizon_end - self.horizon_start).whole_days() + 1
    }

    /// Last day covered by the time dimension.
    pub fn time_dimension_end(&self) -> Option<Date> {
        self.horizon_end
            .checked_add(Duration::days(self.trailing_buffer_days))
    }

    pub fn hourly_cost(&self, role: Role) -> Option<f64> {
        self.role_costs
            .iter()
            .find(|entry| entry.role == role)
            .map(|entry| entry.hourly_cost)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, count) in [
            ("client", self.client_count),
            ("employee", self.employee_count),
            ("project", self.project_count),
        ] {
            if count == 0 {
                return Err(ConfigError::EmptyPopulation(name));
            }
        }

        for (name, empty) in [
            ("sectors", self.sectors.is_empty()),
            ("contract_types", self.contract_types.is_empty()),
            ("role_costs", self.role_costs.is_empty()),
            ("seniorities", self.seniorities.is_empty()),
            ("teams", self.teams.is_empty()),
            ("development_types", self.development_types.is_empty()),
            ("severities", self.severities.is_empty()),
        ] {
            if empty {
                return Err(ConfigError::EmptyVocabulary(name));
            }
        }

        if self.horizon_end < self.horizon_start {
            return Err(ConfigError::InvalidHorizon {
                start: self.horizon_start,
                end: self.horizon_end,
            });
        }

        let required_days = MIN_TRAILING_BUFFER_DAYS.max(*self.close_delay_days.end());
        if self.trailing_buffer_days < required_days {
            return Err(ConfigError::BufferTooShort {
                buffer_days: self.trailing_buffer_days,
                required_days,
            });
        }
        if self.time_dimension_end().is_none() {
            return Err(ConfigError::InvalidRange("trailing_buffer_days"));
        }

        check_range("effort_hours", &self.effort_hours, 1)?;
        check_range("project_duration_days", &self.project_duration_days, 1)?;
        check_range("close_delay_days", &self.close_delay_days, 1)?;
        check_float_range("effort_variation", &self.effort_variation)?;
        check_float_range("daily_hours", &self.daily_hours)?;
        check_float_range("margin_factor", &self.margin_factor)?;

        if *self.margin_factor.start() <= 1.0 {
            return Err(ConfigError::MarginNotAboveOne(*self.margin_factor.start()));
        }

        for (name, value) in [
            ("reference_hourly_rate", self.reference_hourly_rate),
            ("average_daily_hours", self.average_daily_hours),
            ("resolution_hours_std_dev", self.resolution_hours_std_dev),
            ("min_resolution_hours", self.min_resolution_hours),
        ] {
            if !is_positive(value) {
                return Err(ConfigError::NonPositive(name));
            }
        }
        let mut seen_roles = HashSet::new();
        if let Some(entry) = self.role_costs.iter().find(|e| !seen_roles.insert(e.role)) {
            return Err(ConfigError::DuplicateRole(entry.role));
        }
        if let Some(entry) = self.role_costs.iter().find(|e| !is_positive(e.hourly_cost)) {
            tracing::debug!(role = %entry.role, "Rejecting non-positive hourly cost");
            return Err(ConfigError::NonPositive("role_costs"));
        }
        if self
            .severities
            .iter()
            .any(|profile| !is_positive(profile.mean_resolution_hours))
        {
            return Err(ConfigError::NonPositive("severities.mean_resolution_hours"));
        }

        if !(0.0..=1.0).contains(&self.delivered_probability) {
            return Err(ConfigError::InvalidRange("delivered_probability"));
        }

        if let Some((level, _)) = self
            .maturity_weights
            .iter()
            .find(|(level, _)| !(2..=4).contains(level))
        {
            return Err(ConfigError::UnsupportedMaturity(*level));
        }
        check_weights("maturity_weights", self.maturity_weights.iter().map(|(_, w)| *w))?;
        check_weights("severities", self.severities.iter().map(|p| p.weight))?;
        check_weights("discovery_weights", self.discovery_weights.iter().copied())?;

        Ok(())
    }
}

impl RoleCost {
    pub fn new(role: Role, hourly_cost: f64) -> Self {
        Self { role, hourly_cost }
    }
}

impl SeverityProfile {
    pub fn new(severity: Severity, weight: f64, mean_resolution_hours: f64) -> Self {
        Self {
            severity,
            weight,
            mean_resolution_hours,
        }
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn check_range<T: PartialOrd>(
    name: &'static str,
    range: &RangeInclusive<T>,
    min: T,
) -> Result<(), ConfigError> {
    if range.is_empty() || *range.start() < min {
        return Err(ConfigError::InvalidRange(name));
    }
    Ok(())
}

fn check_float_range(name: &'static str, range: &RangeInclusive<f64>) -> Result<(), ConfigError> {
    if !is_positive(*range.start()) || !range.end().is_finite() || range.is_empty() {
        return Err(ConfigError::InvalidRange(name));
    }
    Ok(())
}

fn check_weights(
    name: &'static str,
    weights: impl Iterator<Item = f64>,
) -> Result<(), ConfigError> {
    let mut total = 0.0;
    for weight in weights {
        if !weight.is_finite() || weight < 0.0 {
            return Err(ConfigError::InvalidWeights(name));
        }
        total += weight;
    }
    if total <= 0.0 {
        return Err(ConfigError::InvalidWeights(name));
    }
    Ok(())
}
