use std::collections::HashSet;

use dwh_sim::domain::DateKey;
use dwh_sim::{predictor, Generator, Preset, SimulationConfig, Warehouse};
use time::macros::date;

fn generate(config: SimulationConfig, seed: u64) -> Warehouse {
    Generator::from_seed(config, seed)
        .expect("valid config")
        .generate()
}

#[test]
fn twelve_project_warehouse_has_no_dangling_keys() {
    let config = SimulationConfig {
        project_count: 12,
        ..SimulationConfig::enterprise()
    };
    let warehouse = generate(config, 2024);

    assert_eq!(warehouse.projects.len(), 12);
    let project_ids: HashSet<u32> = warehouse.projects.iter().map(|p| p.id).collect();
    let employee_ids: HashSet<u32> = warehouse.employees.iter().map(|e| e.id).collect();

    assert!(warehouse
        .defects
        .iter()
        .all(|d| project_ids.contains(&d.project_id)));
    assert!(warehouse
        .effort
        .iter()
        .all(|r| employee_ids.contains(&r.employee_id)));
    assert!(warehouse.integrity_violations().is_empty());
}

#[test]
fn facts_respect_the_horizon_across_seeds() {
    for preset in [Preset::Enterprise, Preset::Startup] {
        for seed in 0..5 {
            let config = preset.config();
            let first = DateKey::from(config.horizon_start);
            let last = DateKey::from(config.horizon_end);
            let warehouse = generate(config, seed);

            assert!(warehouse
                .effort
                .iter()
                .all(|r| first <= r.date_key && r.date_key <= last));
            assert!(warehouse
                .defects
                .iter()
                .all(|d| first <= d.reported_key && d.reported_key <= last));
            assert!(warehouse
                .defects
                .iter()
                .all(|d| d.closed_key >= d.reported_key && d.resolution_hours > 0.0));
            assert!(warehouse.integrity_violations().is_empty());
        }
    }
}

#[test]
fn deterministic_estimates_match_planning_examples() {
    assert_eq!(predictor::predict_defects(1500.0, 3), 15);
    assert_eq!(predictor::predict_defects(1500.0, 4), 7);
    assert_eq!(predictor::predict_defects(800.0, 99), 16);
}

/// One project of fixed effort and maturity on a short horizon.
fn single_project(maturity: u8) -> SimulationConfig {
    SimulationConfig {
        client_count: 1,
        employee_count: 3,
        project_count: 1,
        horizon_start: date!(2024 - 01 - 01),
        horizon_end: date!(2024 - 04 - 30),
        project_duration_days: 60..=100,
        effort_hours: 1000..=1000,
        maturity_weights: vec![(maturity, 1.0)],
        ..SimulationConfig::startup()
    }
}

#[test]
fn mature_projects_average_fewer_generated_defects() {
    let runs = 1000;
    let mean_defects = |maturity: u8, seed_offset: u64| {
        (0..runs)
            .map(|run| generate(single_project(maturity), seed_offset + run).defects.len() as f64)
            .sum::<f64>()
            / runs as f64
    };

    let mature = mean_defects(4, 0);
    let immature = mean_defects(2, 1_000_000);

    // Poisson means are 5 and 20; the gap is many standard errors wide.
    assert!(mature < immature, "{mature} vs {immature}");
    assert!(immature - mature > 10.0, "{mature} vs {immature}");
}
