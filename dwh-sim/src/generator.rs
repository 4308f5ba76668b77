use std::collections::HashSet;

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::Normal;
use serde::Serialize;
use time::{Date, Duration};
use tracing::{debug, info, warn};

use crate::config::{ConfigError, SimulationConfig};
use crate::domain::{
    is_business_day, Client, DateKey, Defect, EffortRecord, Employee, InternalProcess, Project,
    ProjectStatus, ProjectWindow, TimeRow,
};
use crate::predictor;

/// All seven tables of one generation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Warehouse {
    pub time: Vec<TimeRow>,
    pub clients: Vec<Client>,
    pub employees: Vec<Employee>,
    pub processes: Vec<InternalProcess>,
    pub projects: Vec<Project>,
    pub effort: Vec<EffortRecord>,
    pub defects: Vec<Defect>,
}

/// A foreign key that does not resolve inside the same [`Warehouse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrityViolation {
    pub table: &'static str,
    pub row_id: u32,
    pub column: &'static str,
    pub value: u32,
}

impl Warehouse {
    /// Scan every foreign key of both fact tables and the project dimension.
    pub fn integrity_violations(&self) -> Vec<IntegrityViolation> {
        let dates: HashSet<u32> = self.time.iter().map(|t| t.date_key.as_u32()).collect();
        let clients: HashSet<u32> = self.clients.iter().map(|c| c.id).collect();
        let employees: HashSet<u32> = self.employees.iter().map(|e| e.id).collect();
        let processes: HashSet<u32> = self.processes.iter().map(|p| p.id).collect();
        let projects: HashSet<u32> = self.projects.iter().map(|p| p.id).collect();

        let mut violations = Vec::new();
        let mut check = |table, row_id, column, value: u32, keys: &HashSet<u32>| {
            if !keys.contains(&value) {
                violations.push(IntegrityViolation {
                    table,
                    row_id,
                    column,
                    value,
                });
            }
        };

        for project in &self.projects {
            check(
                "dim_project",
                project.id,
                "client_id",
                project.client_id,
                &clients,
            );
        }
        for record in &self.effort {
            for (column, value, keys) in [
                ("project_id", record.project_id, &projects),
                ("date_key", record.date_key.as_u32(), &dates),
                ("employee_id", record.employee_id, &employees),
                ("process_id", record.process_id, &processes),
            ] {
                check("fact_effort", record.id, column, value, keys);
            }
        }
        for defect in &self.defects {
            for (column, value, keys) in [
                ("project_id", defect.project_id, &projects),
                ("reported_key", defect.reported_key.as_u32(), &dates),
                ("closed_key", defect.closed_key.as_u32(), &dates),
                ("responsible_employee_id", defect.responsible_employee_id, &employees),
                ("process_id", defect.process_id, &processes),
            ] {
                check("fact_defect", defect.id, column, value, keys);
            }
        }

        violations
    }

    pub fn project(&self, id: u32) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn employee(&self, id: u32) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }
}

/// Weighted samplers prepared once from a validated config.
struct Samplers {
    maturity: WeightedIndex<f64>,
    severity: WeightedIndex<f64>,
    resolution: Vec<Normal<f64>>,
    discovery: WeightedIndex<f64>,
}

impl Samplers {
    fn new(config: &SimulationConfig) -> Result<Self, ConfigError> {
        let maturity = WeightedIndex::new(config.maturity_weights.iter().map(|(_, w)| *w))
            .map_err(|_| ConfigError::InvalidWeights("maturity_weights"))?;
        let severity = WeightedIndex::new(config.severities.iter().map(|p| p.weight))
            .map_err(|_| ConfigError::InvalidWeights("severities"))?;
        let discovery = WeightedIndex::new(config.discovery_weights.iter().copied())
            .map_err(|_| ConfigError::InvalidWeights("discovery_weights"))?;
        let resolution = config
            .severities
            .iter()
            .map(|profile| {
                Normal::new(profile.mean_resolution_hours, config.resolution_hours_std_dev)
                    .map_err(|_| ConfigError::NonPositive("resolution_hours_std_dev"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            maturity,
            severity,
            resolution,
            discovery,
        })
    }
}

/// Builds a [`Warehouse`] from a [`SimulationConfig`] and an owned random source.
///
/// Dimensions are generated before facts, and fact quantities are derived from
/// already generated dimension attributes, so every foreign key resolves.
///
/// # Example
///
/// ```
/// use dwh_sim::{Generator, SimulationConfig};
///
/// let mut generator = Generator::from_seed(SimulationConfig::startup(), 11).unwrap();
/// let warehouse = generator.generate();
/// assert_eq!(warehouse.projects.len(), 8);
/// ```
pub struct Generator<R = ChaCha8Rng> {
    config: SimulationConfig,
    samplers: Samplers,
    rng: R,
}

impl Generator<ChaCha8Rng> {
    /// Reproducible generator: the same seed yields the same warehouse.
    pub fn from_seed(config: SimulationConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy(config: SimulationConfig) -> Result<Self, ConfigError> {
        Self::new(config, ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> Generator<R> {
    pub fn new(config: SimulationConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let samplers = Samplers::new(&config)?;
        Ok(Self {
            config,
            samplers,
            rng,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run every stage and return the complete data set.
    pub fn generate(&mut self) -> Warehouse {
        let time = self.time_dimension();
        let clients = self.clients();
        let employees = self.employees();
        let processes = InternalProcess::catalog(&self.config.docs_base_url);
        let projects = self.projects(&clients);
        let effort = self.effort_records(&projects, &employees, &processes);
        let defects = self.defects(&projects, &employees, &processes);

        info!(
            time = time.len(),
            clients = clients.len(),
            employees = employees.len(),
            projects = projects.len(),
            effort = effort.len(),
            defects = defects.len(),
            "Generated warehouse"
        );

        Warehouse {
            time,
            clients,
            employees,
            processes,
            projects,
            effort,
            defects,
        }
    }

    /// Every day from the horizon start through the trailing buffer.
    pub fn time_dimension(&self) -> Vec<TimeRow> {
        let end = self
            .config
            .time_dimension_end()
            .unwrap_or(self.config.horizon_end);

        let mut rows = Vec::new();
        let mut day = self.config.horizon_start;
        while day <= end {
            rows.push(TimeRow::from_date(day));
            match day.next_day() {
                Some(next) => day = next,
                None => break,
            }
        }

        debug!(rows = rows.len(), "Generated time dimension");
        rows
    }

    fn clients(&mut self) -> Vec<Client> {
        let config = &self.config;
        let rng = &mut self.rng;

        (1..=config.client_count)
            .filter_map(|id| {
                Some(Client {
                    id,
                    name: format!("Client_{id}"),
                    sector: *config.sectors.choose(rng)?,
                    contract_type: *config.contract_types.choose(rng)?,
                })
            })
            .collect()
    }

    fn employees(&mut self) -> Vec<Employee> {
        let config = &self.config;
        let rng = &mut self.rng;

        (1..=config.employee_count)
            .filter_map(|id| {
                let role_cost = config.role_costs.choose(rng)?;
                Some(Employee {
                    id,
                    name: format!("Employee_{id}"),
                    role: role_cost.role,
                    seniority: *config.seniorities.choose(rng)?,
                    hourly_cost: role_cost.hourly_cost,
                    team: *config.teams.choose(rng)?,
                })
            })
            .collect()
    }

    fn projects(&mut self, clients: &[Client]) -> Vec<Project> {
        let mut projects = Vec::with_capacity(self.config.project_count as usize);

        for id in 1..=self.config.project_count {
            let Some(client) = clients.choose(&mut self.rng) else {
                warn!("No clients to own projects");
                break;
            };
            let window = self.project_window();
            let status = if self.rng.gen_bool(self.config.delivered_probability) {
                ProjectStatus::Delivered
            } else {
                ProjectStatus::Active
            };
            let effort = self.rng.gen_range(self.config.effort_hours.clone());
            let margin = self.rng.gen_range(self.config.margin_factor.clone());
            let (maturity_level, _) =
                self.config.maturity_weights[self.samplers.maturity.sample(&mut self.rng)];
            let Some(development_type) = self.config.development_types.choose(&mut self.rng)
            else {
                break;
            };

            projects.push(Project {
                id,
                client_id: client.id,
                name: format!("System_{id}"),
                status,
                estimated_effort_hours: effort,
                budget: round_up_cents(
                    effort as f64 * self.config.reference_hourly_rate * margin,
                ),
                development_type: *development_type,
                maturity_level,
                window,
            });
        }

        projects
    }

    /// A window of sampled length placed entirely inside the fact horizon.
    fn project_window(&mut self) -> ProjectWindow {
        let horizon_days = self.config.horizon_days();
        let longest = (*self.config.project_duration_days.end()).min(horizon_days);
        let shortest = (*self.config.project_duration_days.start()).min(longest);
        let duration = self.rng.gen_range(shortest..=longest);
        let offset = self.rng.gen_range(0..=horizon_days - duration);

        let start = self.config.horizon_start + Duration::days(offset);
        ProjectWindow {
            start,
            end: start + Duration::days(duration - 1),
        }
    }

    fn effort_records(
        &mut self,
        projects: &[Project],
        employees: &[Employee],
        processes: &[InternalProcess],
    ) -> Vec<EffortRecord> {
        let mut records = Vec::new();

        for project in projects {
            let workdays = working_days(&project.window);
            let variation = self.rng.gen_range(self.config.effort_variation.clone());
            let target_hours = project.estimated_effort_hours as f64 * variation;
            let count = ((target_hours / self.config.average_daily_hours).round() as usize).max(1);

            let mut dates: Vec<Date> = (0..count)
                .filter_map(|_| workdays.choose(&mut self.rng).copied())
                .collect();
            dates.sort();

            for date in dates {
                let (Some(employee), Some(process)) = (
                    employees.choose(&mut self.rng),
                    processes.choose(&mut self.rng),
                ) else {
                    continue;
                };
                let hours = round_cents(self.rng.gen_range(self.config.daily_hours.clone()));

                records.push(EffortRecord {
                    id: records.len() as u32 + 1,
                    project_id: project.id,
                    date_key: DateKey::from(date),
                    employee_id: employee.id,
                    process_id: process.id,
                    hours,
                    cost: round_cents(hours * employee.hourly_cost),
                });
            }
        }

        debug!(rows = records.len(), "Generated effort records");
        records
    }

    fn defects(
        &mut self,
        projects: &[Project],
        employees: &[Employee],
        processes: &[InternalProcess],
    ) -> Vec<Defect> {
        let mut responsible_pool: Vec<&Employee> =
            employees.iter().filter(|e| !e.role.is_lead()).collect();
        if responsible_pool.is_empty() {
            warn!("No non-lead employees; assigning defects to any employee");
            responsible_pool = employees.iter().collect();
        }

        let mut defects = Vec::new();
        for project in projects {
            let count = predictor::sample_defects(
                &mut self.rng,
                project.estimated_effort_hours as f64,
                i64::from(project.maturity_level),
            );
            let workdays = working_days(&project.window);

            for _ in 0..count {
                let (Some(reported), Some(responsible)) = (
                    workdays.choose(&mut self.rng).copied(),
                    responsible_pool.choose(&mut self.rng),
                ) else {
                    continue;
                };
                let delay = self.rng.gen_range(self.config.close_delay_days.clone());
                let closed = reported + Duration::days(delay);

                let severity_idx = self.samplers.severity.sample(&mut self.rng);
                let severity = self.config.severities[severity_idx].severity;
                let resolution_hours = self.samplers.resolution[severity_idx]
                    .sample(&mut self.rng)
                    .max(self.config.min_resolution_hours);

                let process = &processes[self.samplers.discovery.sample(&mut self.rng)];

                defects.push(Defect {
                    id: defects.len() as u32 + 1,
                    project_id: project.id,
                    reported_key: DateKey::from(reported),
                    closed_key: DateKey::from(closed),
                    responsible_employee_id: responsible.id,
                    process_id: process.id,
                    severity,
                    resolution_hours: round_cents(resolution_hours)
                        .max(self.config.min_resolution_hours),
                    schedule_variance_days: (closed - reported).whole_days()
                        - self.config.planning_standard_days,
                });
            }
        }

        debug!(rows = defects.len(), "Generated defects");
        defects
    }
}

/// Business days of a window; every day if the window has none.
fn working_days(window: &ProjectWindow) -> Vec<Date> {
    let days = window.days();
    let business: Vec<Date> = days.iter().copied().filter(|d| is_business_day(*d)).collect();
    if business.is_empty() {
        days
    } else {
        business
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round_up_cents(value: f64) -> f64 {
    (value * 100.0).ceil() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Role, Severity};
    use crate::RoleCost;

    fn generate(config: SimulationConfig, seed: u64) -> Warehouse {
        Generator::from_seed(config, seed).unwrap().generate()
    }

    #[test]
    fn invalid_config_is_rejected_before_sampling() {
        let config = SimulationConfig {
            project_count: 0,
            ..SimulationConfig::enterprise()
        };
        assert!(matches!(
            Generator::from_seed(config, 1),
            Err(ConfigError::EmptyPopulation("project"))
        ));
    }

    #[test]
    fn same_seed_same_warehouse() {
        let first = generate(SimulationConfig::startup(), 9);
        let second = generate(SimulationConfig::startup(), 9);
        assert_eq!(first.projects, second.projects);
        assert_eq!(first.effort, second.effort);
        assert_eq!(first.defects, second.defects);
    }

    #[test]
    fn time_dimension_covers_horizon_and_buffer() {
        let config = SimulationConfig::enterprise();
        let generator = Generator::from_seed(config.clone(), 1).unwrap();
        let time = generator.time_dimension();

        assert_eq!(time.len() as i64, config.horizon_days() + config.trailing_buffer_days);
        assert_eq!(time[0].date_key.as_u32(), 20240101);
        assert_eq!(time.last().unwrap().date_key.as_u32(), 20250402);
        assert!(time.windows(2).all(|w| w[0].date_key < w[1].date_key));
    }

    #[test]
    fn time_rows_round_trip_their_dates() {
        let generator = Generator::from_seed(SimulationConfig::startup(), 1).unwrap();
        let mut expected = generator.config().horizon_start;
        for row in generator.time_dimension() {
            assert_eq!(row.date_key.to_date().unwrap(), expected);
            assert_eq!(row.is_business_day, is_business_day(expected));
            expected = expected.next_day().unwrap();
        }
    }

    #[test]
    fn client_ids_are_dense() {
        let warehouse = generate(SimulationConfig::enterprise(), 3);
        let ids: Vec<u32> = warehouse.clients.iter().map(|c| c.id).collect();
        assert_eq!(ids, (1..=8).collect::<Vec<_>>());
    }

    #[test]
    fn employee_cost_follows_role() {
        let config = SimulationConfig::enterprise();
        let warehouse = generate(config.clone(), 4);
        for employee in &warehouse.employees {
            assert_eq!(Some(employee.hourly_cost), config.hourly_cost(employee.role));
        }
    }

    #[test]
    fn budget_exceeds_reference_cost() {
        let config = SimulationConfig::enterprise();
        let warehouse = generate(config.clone(), 5);
        for project in &warehouse.projects {
            let reference = project.estimated_effort_hours as f64 * config.reference_hourly_rate;
            assert!(project.budget > reference, "{project:?}");
            assert!((2..=4).contains(&project.maturity_level));
            assert!(config.effort_hours.contains(&project.estimated_effort_hours));
        }
    }

    #[test]
    fn windows_stay_inside_the_horizon() {
        let config = SimulationConfig::enterprise();
        let warehouse = generate(config.clone(), 6);
        for project in &warehouse.projects {
            assert!(project.window.start >= config.horizon_start);
            assert!(project.window.end <= config.horizon_end);
            let length = (project.window.end - project.window.start).whole_days() + 1;
            assert!(config.project_duration_days.contains(&length));
        }
    }

    #[test]
    fn effort_stays_in_project_window_and_costs_match() {
        let warehouse = generate(SimulationConfig::enterprise(), 7);
        for record in &warehouse.effort {
            let project = warehouse.project(record.project_id).unwrap();
            let date = record.date_key.to_date().unwrap();
            assert!(project.window.contains(date));
            assert!(is_business_day(date));

            let employee = warehouse.employee(record.employee_id).unwrap();
            assert!((record.cost - record.hours * employee.hourly_cost).abs() < 0.01);
            assert!((0.5..=8.5).contains(&record.hours));
        }
    }

    #[test]
    fn logged_hours_track_estimated_effort() {
        let warehouse = generate(SimulationConfig::enterprise(), 8);
        for project in &warehouse.projects {
            let logged: f64 = warehouse
                .effort
                .iter()
                .filter(|r| r.project_id == project.id)
                .map(|r| r.hours)
                .sum();
            let ratio = logged / project.estimated_effort_hours as f64;
            assert!((0.6..=1.5).contains(&ratio), "project {} ratio {ratio}", project.id);
        }
    }

    #[test]
    fn defects_close_after_report_and_take_time() {
        let config = SimulationConfig::enterprise();
        let warehouse = generate(config.clone(), 10);
        assert!(!warehouse.defects.is_empty());
        for defect in &warehouse.defects {
            assert!(defect.closed_key > defect.reported_key);
            assert!(defect.resolution_hours > 0.0);

            let reported = defect.reported_key.to_date().unwrap();
            let closed = defect.closed_key.to_date().unwrap();
            assert_eq!(
                defect.schedule_variance_days,
                (closed - reported).whole_days() - config.planning_standard_days
            );
            let responsible = warehouse.employee(defect.responsible_employee_id).unwrap();
            assert!(!responsible.role.is_lead());
        }
    }

    #[test]
    fn every_project_gets_the_minimum_defects() {
        let warehouse = generate(SimulationConfig::startup(), 12);
        for project in &warehouse.projects {
            let count = warehouse
                .defects
                .iter()
                .filter(|d| d.project_id == project.id)
                .count();
            assert!(count as u32 >= predictor::MIN_SIMULATED_DEFECTS);
        }
    }

    #[test]
    fn lead_only_staff_falls_back_to_any_employee() {
        let config = SimulationConfig {
            role_costs: vec![RoleCost::new(Role::ProjectLead, 700.0)],
            ..SimulationConfig::startup()
        };
        let warehouse = generate(config, 13);

        assert!(!warehouse.defects.is_empty());
        assert!(warehouse.integrity_violations().is_empty());
        assert!(warehouse
            .defects
            .iter()
            .all(|d| warehouse.employee(d.responsible_employee_id).is_some()));
    }

    #[test]
    fn severity_sampling_respects_zero_weights() {
        let mut config = SimulationConfig::startup();
        for profile in config.severities.iter_mut() {
            if profile.severity != Severity::Minor {
                profile.weight = 0.0;
            }
        }
        let warehouse = generate(config, 14);
        assert!(warehouse.defects.iter().all(|d| d.severity == Severity::Minor));
    }

    #[test]
    fn weighted_attributes_follow_their_weights() {
        use std::collections::HashMap;

        let mut discovery: HashMap<u32, usize> = HashMap::new();
        let mut severities: HashMap<Severity, usize> = HashMap::new();
        let mut maturities: HashMap<u8, usize> = HashMap::new();
        let (mut delivered, mut active) = (0, 0);

        for seed in 0..100 {
            let warehouse = generate(SimulationConfig::enterprise(), seed);
            for defect in &warehouse.defects {
                *discovery.entry(defect.process_id).or_default() += 1;
                *severities.entry(defect.severity).or_default() += 1;
            }
            for project in &warehouse.projects {
                *maturities.entry(project.maturity_level).or_default() += 1;
                match project.status {
                    ProjectStatus::Delivered => delivered += 1,
                    ProjectStatus::Active => active += 1,
                }
            }
        }

        let (busiest_phase, _) = discovery.iter().max_by_key(|(_, n)| **n).unwrap();
        assert_eq!(*busiest_phase, 6, "{discovery:?}");
        let blockers = severities[&Severity::Blocker];
        assert!(severities[&Severity::Minor] > blockers, "{severities:?}");
        assert!(severities[&Severity::Major] > blockers, "{severities:?}");
        assert!(delivered > active, "{delivered} delivered vs {active} active");
        let (common_level, _) = maturities.iter().max_by_key(|(_, n)| **n).unwrap();
        assert_eq!(*common_level, 3, "{maturities:?}");
    }

    #[test]
    fn employee_cost_is_looked_up_from_role() {
        let config = SimulationConfig::enterprise();
        let warehouse = generate(config.clone(), 16);
        for employee in &warehouse.employees {
            assert_eq!(Some(employee.hourly_cost), config.hourly_cost(employee.role));
        }
    }

    #[test]
    fn integrity_scan_reports_dangling_keys() {
        let mut warehouse = generate(SimulationConfig::startup(), 15);
        assert!(warehouse.integrity_violations().is_empty());

        warehouse.effort[0].employee_id = 999;
        let violations = warehouse.integrity_violations();
        assert_eq!(
            violations,
            vec![IntegrityViolation {
                table: "fact_effort",
                row_id: warehouse.effort[0].id,
                column: "employee_id",
                value: 999,
            }]
        );
    }
}
