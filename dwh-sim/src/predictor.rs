//! Rayleigh-simplified defect prediction.
//!
//! Both operations share one rate table (defects per effort hour, by maturity
//! level) but answer different questions:
//!
//! - [`sample_defects`] draws a realised count for a simulated project, so the
//!   generator gets variance between otherwise similar projects.
//! - [`predict_defects`] is the repeatable planning estimate shown to users.
//!
//! The interactive boundary validates its input through [`EffortHours`] and
//! [`MaturityLevel`] before calling [`estimate`].

use std::fmt;
use std::ops::RangeInclusive;

use rand::Rng;
use rand_distr::{Distribution, Poisson};
use serde::Serialize;
use thiserror::Error;

/// Floor applied to sampled counts.
///
/// Business policy: every simulated project reports at least this many defects,
/// even when a Poisson draw yields fewer. This inflates counts for small or
/// highly mature projects.
pub const MIN_SIMULATED_DEFECTS: u32 = 3;

/// Number of points on a Rayleigh curve.
pub const CURVE_POINTS: usize = 100;

/// The curve extends this far past the estimated effort.
pub const CURVE_SPAN_FACTOR: f64 = 1.2;

/// Effort accepted by the interactive estimator, in hours.
pub const EFFORT_RANGE: RangeInclusive<f64> = 100.0..=10_000.0;

#[derive(Debug, Error, PartialEq)]
pub enum PredictorError {
    #[error("effort must be a positive number of hours, got {0}")]
    NonPositiveEffort(f64),
    #[error("effort must be between 100 and 10000 hours, got {0}")]
    EffortOutOfRange(f64),
    #[error("failure curve is not finite for an effort of {0} hours")]
    DegenerateCurve(f64),
    #[error("maturity level must be 2, 3 or 4, got {0}")]
    UnsupportedMaturity(i64),
}

/// Expected defects per effort hour. Unrecognised levels get the least mature rate.
pub fn defect_rate(maturity: i64) -> f64 {
    match maturity {
        4 => 0.005,
        3 => 0.01,
        _ => 0.02,
    }
}

/// Deterministic estimate: `floor(effort × rate)`, saturating at `u32::MAX`.
pub fn predict_defects(effort_hours: f64, maturity: i64) -> u32 {
    let expected = effort_hours * defect_rate(maturity);
    if expected.is_finite() && expected > 0.0 {
        expected.floor() as u32
    } else {
        0
    }
}

/// Poisson draw with mean `effort × rate`, floored at [`MIN_SIMULATED_DEFECTS`].
pub fn sample_defects<R: Rng + ?Sized>(rng: &mut R, effort_hours: f64, maturity: i64) -> u32 {
    let mean = effort_hours * defect_rate(maturity);
    let drawn = match Poisson::new(mean) {
        Ok(poisson) => {
            let sample: f64 = poisson.sample(rng);
            sample as u32
        }
        Err(_) => 0,
    };

    drawn.max(MIN_SIMULATED_DEFECTS)
}

/// One point of the failure-intensity curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    pub t: f64,
    pub intensity: f64,
}

/// Rayleigh density `(t/σ²)·exp(−t²/(2σ²))` with `σ = effort/4`, sampled at
/// [`CURVE_POINTS`] evenly spaced points over `[0, 1.2 × effort]`.
pub fn rayleigh_curve(effort_hours: f64) -> Result<Vec<CurvePoint>, PredictorError> {
    if !(effort_hours.is_finite() && effort_hours > 0.0) {
        return Err(PredictorError::NonPositiveEffort(effort_hours));
    }
    let sigma = effort_hours / 4.0;
    let variance = sigma * sigma;
    let span = effort_hours * CURVE_SPAN_FACTOR;
    let step = span / (CURVE_POINTS - 1) as f64;

    let points = (0..CURVE_POINTS)
        .map(|idx| {
            let t = step * idx as f64;
            CurvePoint {
                t,
                intensity: (t / variance) * (-(t * t) / (2.0 * variance)).exp(),
            }
        })
        .collect::<Vec<_>>();

    // sigma² over- or underflows for extreme efforts
    if points.iter().any(|p| !p.intensity.is_finite()) {
        return Err(PredictorError::DegenerateCurve(effort_hours));
    }
    Ok(points)
}

/// Effort supplied by a user: finite, positive and inside [`EFFORT_RANGE`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct EffortHours(f64);

impl EffortHours {
    pub fn new(hours: f64) -> Result<Self, PredictorError> {
        if !(hours.is_finite() && hours > 0.0) {
            Err(PredictorError::NonPositiveEffort(hours))
        } else if !EFFORT_RANGE.contains(&hours) {
            Err(PredictorError::EffortOutOfRange(hours))
        } else {
            Ok(Self(hours))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// A maturity level accepted by the interactive estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "i64")]
pub struct MaturityLevel(u8);

impl TryFrom<i64> for MaturityLevel {
    type Error = PredictorError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            2..=4 => Ok(Self(value as u8)),
            other => Err(PredictorError::UnsupportedMaturity(other)),
        }
    }
}

impl From<MaturityLevel> for i64 {
    fn from(level: MaturityLevel) -> Self {
        level.0 as i64
    }
}

impl fmt::Display for MaturityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of an interactive estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimate {
    pub effort_hours: EffortHours,
    pub maturity_level: MaturityLevel,
    pub defect_rate: f64,
    pub expected_defects: u32,
    pub curve: Vec<CurvePoint>,
}

/// Deterministic estimate plus the curve drawn next to it.
pub fn estimate(
    effort: EffortHours,
    maturity: MaturityLevel,
) -> Result<Estimate, PredictorError> {
    let level = i64::from(maturity);
    let curve = rayleigh_curve(effort.value())?;

    Ok(Estimate {
        effort_hours: effort,
        maturity_level: maturity,
        defect_rate: defect_rate(level),
        expected_defects: predict_defects(effort.value(), level),
        curve,
    })
}

/// Validate raw user input and estimate.
pub fn estimate_raw(effort_hours: f64, maturity: i64) -> Result<Estimate, PredictorError> {
    let effort = EffortHours::new(effort_hours)?;
    let maturity = MaturityLevel::try_from(maturity)?;
    estimate(effort, maturity)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn rate_table_is_exact() {
        assert_eq!(defect_rate(4), 0.005);
        assert_eq!(defect_rate(3), 0.01);
        assert_eq!(defect_rate(2), 0.02);
        assert_eq!(defect_rate(1), 0.02);
        assert_eq!(defect_rate(99), 0.02);
    }

    #[test]
    fn mid_maturity_estimate() {
        assert_eq!(predict_defects(1500.0, 3), 15);
    }

    #[test]
    fn high_maturity_estimate_truncates() {
        assert_eq!(predict_defects(1500.0, 4), 7);
    }

    #[test]
    fn unrecognised_maturity_uses_lowest_rate() {
        assert_eq!(predict_defects(800.0, 99), 16);
    }

    #[test]
    fn deterministic_estimate_is_monotonic_in_maturity() {
        for effort in [1.0, 99.0, 250.0, 1000.0, 1234.5, 10_000.0] {
            let level4 = predict_defects(effort, 4);
            let level3 = predict_defects(effort, 3);
            let level2 = predict_defects(effort, 2);
            assert!(level4 <= level3, "effort {effort}");
            assert!(level3 <= level2, "effort {effort}");
        }
    }

    #[test]
    fn deterministic_estimate_is_repeatable() {
        assert_eq!(predict_defects(4321.0, 3), predict_defects(4321.0, 3));
    }

    #[test]
    fn non_positive_effort_predicts_nothing() {
        assert_eq!(predict_defects(0.0, 3), 0);
        assert_eq!(predict_defects(-50.0, 2), 0);
        assert_eq!(predict_defects(f64::NAN, 2), 0);
    }

    #[test]
    fn sampled_count_respects_floor() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..200 {
            assert!(sample_defects(&mut rng, 10.0, 4) >= MIN_SIMULATED_DEFECTS);
        }
        assert_eq!(sample_defects(&mut rng, 0.0, 4), MIN_SIMULATED_DEFECTS);
    }

    #[test]
    fn sampled_mean_decreases_with_maturity() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let trials = 1000;
        let mean = |rng: &mut ChaCha8Rng, maturity: i64| {
            (0..trials)
                .map(|_| sample_defects(rng, 1000.0, maturity) as f64)
                .sum::<f64>()
                / trials as f64
        };

        let level4 = mean(&mut rng, 4);
        let level3 = mean(&mut rng, 3);
        let level2 = mean(&mut rng, 2);

        assert!(level4 < level3, "{level4} vs {level3}");
        assert!(level3 < level2, "{level3} vs {level2}");
        assert!((level2 - 20.0).abs() < 1.0, "{level2}");
    }

    #[test]
    fn curve_spans_one_point_two_times_effort() {
        let curve = rayleigh_curve(1500.0).unwrap();
        assert_eq!(curve.len(), CURVE_POINTS);
        assert_eq!(curve[0].t, 0.0);
        assert_eq!(curve[0].intensity, 0.0);
        assert!((curve[CURVE_POINTS - 1].t - 1800.0).abs() < 1e-9);
        assert!(curve.iter().all(|p| p.intensity >= 0.0));
    }

    #[test]
    fn curve_peaks_near_sigma() {
        let effort = 2000.0;
        let curve = rayleigh_curve(effort).unwrap();
        let peak = curve
            .iter()
            .max_by(|a, b| a.intensity.total_cmp(&b.intensity))
            .unwrap();
        let sigma = effort / 4.0;
        let step = effort * CURVE_SPAN_FACTOR / (CURVE_POINTS - 1) as f64;
        assert!((peak.t - sigma).abs() <= step);
    }

    #[test]
    fn curve_rejects_non_positive_effort() {
        assert_eq!(
            rayleigh_curve(0.0),
            Err(PredictorError::NonPositiveEffort(0.0))
        );
        assert!(rayleigh_curve(-1.0).is_err());
    }

    #[test]
    fn curve_rejects_efforts_that_overflow_sigma() {
        assert_eq!(
            rayleigh_curve(1e-200),
            Err(PredictorError::DegenerateCurve(1e-200))
        );
        assert_eq!(
            rayleigh_curve(1e200),
            Err(PredictorError::DegenerateCurve(1e200))
        );
    }

    #[test]
    fn estimate_rejects_effort_outside_planning_range() {
        for effort in [1e-200, 99.9, 10_000.5, 1e12, 1e200] {
            assert_eq!(
                estimate_raw(effort, 3).unwrap_err(),
                PredictorError::EffortOutOfRange(effort),
                "effort {effort}"
            );
        }
    }

    #[test]
    fn estimate_at_range_bounds_is_finite() {
        for effort in [*EFFORT_RANGE.start(), *EFFORT_RANGE.end()] {
            let estimate = estimate_raw(effort, 2).unwrap();
            assert!(estimate.curve.iter().all(|p| p.intensity.is_finite()));
        }
        assert_eq!(estimate_raw(10_000.0, 2).unwrap().expected_defects, 200);
    }

    #[test]
    fn maturity_level_accepts_only_known_levels() {
        assert!(MaturityLevel::try_from(2).is_ok());
        assert!(MaturityLevel::try_from(4).is_ok());
        assert_eq!(
            MaturityLevel::try_from(5),
            Err(PredictorError::UnsupportedMaturity(5))
        );
        assert!(MaturityLevel::try_from(0).is_err());
    }

    #[test]
    fn estimate_raw_validates_input() {
        let estimate = estimate_raw(1500.0, 3).unwrap();
        assert_eq!(estimate.expected_defects, 15);
        assert_eq!(estimate.defect_rate, 0.01);
        assert_eq!(estimate.curve.len(), CURVE_POINTS);

        assert_eq!(
            estimate_raw(-5.0, 3).unwrap_err(),
            PredictorError::NonPositiveEffort(-5.0)
        );
        assert_eq!(
            estimate_raw(1500.0, 99).unwrap_err(),
            PredictorError::UnsupportedMaturity(99)
        );
    }
}
