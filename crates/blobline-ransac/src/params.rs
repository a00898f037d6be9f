use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Threshold range exposed to users, in pixels.
pub const THRESHOLD_RANGE: RangeInclusive<f64> = 1.0..=400.0;
/// Iteration budget range exposed to users.
pub const ITERATIONS_RANGE: RangeInclusive<usize> = 0..=200;
/// Minimum inlier share exposed to users, in percent.
pub const INLIER_PERCENT_RANGE: RangeInclusive<f64> = 0.0..=100.0;

/// Errors returned by [`FitParams::validate`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum FitParamsError {
    #[error("distance threshold must be positive and finite (got {0})")]
    InvalidThreshold(f64),
    #[error("minimum inlier fraction must lie in [0, 1] (got {0})")]
    InvalidInlierFraction(f64),
}

/// Configuration for one RANSAC line fit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitParams {
    /// Max perpendicular distance (pixels) for a blob to count as an inlier.
    pub distance_threshold: f64,
    /// Exact number of candidate lines to sample.
    pub max_iterations: usize,
    /// A candidate is only accepted when `inliers / blobs` reaches this value.
    pub min_inlier_fraction: f64,
    /// Seed for reproducible sampling. `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            distance_threshold: 1.0,
            max_iterations: 100,
            min_inlier_fraction: 0.0,
            seed: None,
        }
    }
}

impl FitParams {
    pub fn new(distance_threshold: f64, max_iterations: usize, min_inlier_fraction: f64) -> Self {
        Self {
            distance_threshold,
            max_iterations,
            min_inlier_fraction,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build parameters from user-facing controls, clamping each value into
    /// [`THRESHOLD_RANGE`], [`ITERATIONS_RANGE`] and [`INLIER_PERCENT_RANGE`].
    pub fn from_ui(threshold: f64, iterations: f64, inlier_percent: f64) -> Self {
        let threshold = clamp_or(threshold, &THRESHOLD_RANGE, *THRESHOLD_RANGE.start());
        let percent = clamp_or(
            inlier_percent,
            &INLIER_PERCENT_RANGE,
            *INLIER_PERCENT_RANGE.start(),
        );
        let max_iters = *ITERATIONS_RANGE.end() as f64;
        let iterations = if iterations.is_nan() {
            0
        } else {
            iterations.round().clamp(0.0, max_iters) as usize
        };
        Self::new(threshold, iterations, percent / 100.0)
    }

    pub fn validate(&self) -> Result<(), FitParamsError> {
        let t = self.distance_threshold;
        if !(t.is_finite() && t > 0.0) {
            return Err(FitParamsError::InvalidThreshold(t));
        }
        let f = self.min_inlier_fraction;
        if !(0.0..=1.0).contains(&f) {
            return Err(FitParamsError::InvalidInlierFraction(f));
        }
        Ok(())
    }

    /// Nearest valid parameters.
    ///
    /// A non-positive or NaN threshold becomes the smallest positive `f64`,
    /// an infinite one `f64::MAX`; the inlier fraction is clamped to
    /// `[0, 1]` with NaN mapped to `0`.
    pub fn clamped(&self) -> Self {
        let t = self.distance_threshold;
        let distance_threshold = if t.is_nan() || t <= 0.0 {
            f64::MIN_POSITIVE
        } else {
            t.min(f64::MAX)
        };
        Self {
            distance_threshold,
            min_inlier_fraction: clamp_or(self.min_inlier_fraction, &(0.0..=1.0), 0.0),
            ..self.clone()
        }
    }
}

fn clamp_or(v: f64, range: &RangeInclusive<f64>, nan: f64) -> f64 {
    if v.is_nan() {
        nan
    } else {
        v.clamp(*range.start(), *range.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(FitParams::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_values() {
        assert_eq!(
            FitParams::new(0.0, 10, 0.5).validate(),
            Err(FitParamsError::InvalidThreshold(0.0))
        );
        assert!(matches!(
            FitParams::new(f64::NAN, 10, 0.5).validate(),
            Err(FitParamsError::InvalidThreshold(_))
        ));
        assert_eq!(
            FitParams::new(2.0, 10, 1.5).validate(),
            Err(FitParamsError::InvalidInlierFraction(1.5))
        );
    }

    #[test]
    fn clamped_is_always_valid() {
        for p in [
            FitParams::new(-3.0, 5, -0.2),
            FitParams::new(f64::NAN, 5, f64::NAN),
            FitParams::new(f64::INFINITY, 5, 7.0),
        ] {
            let c = p.clamped();
            assert!(c.validate().is_ok(), "{c:?}");
            assert_eq!(c.max_iterations, 5);
        }
        let ok = FitParams::new(4.0, 12, 0.25).with_seed(9);
        assert_eq!(ok.clamped(), ok);
    }

    #[test]
    fn ui_values_are_clamped_into_documented_ranges() {
        let p = FitParams::from_ui(1000.0, 250.0, 150.0);
        assert_eq!(p.distance_threshold, 400.0);
        assert_eq!(p.max_iterations, 200);
        assert_eq!(p.min_inlier_fraction, 1.0);

        let p = FitParams::from_ui(0.2, -4.0, 40.0);
        assert_eq!(p.distance_threshold, 1.0);
        assert_eq!(p.max_iterations, 0);
        assert!((p.min_inlier_fraction - 0.4).abs() < 1e-12);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let p: FitParams = serde_json::from_str(r#"{"distance_threshold": 3.5}"#).expect("parse");
        assert_eq!(p.distance_threshold, 3.5);
        assert_eq!(p.max_iterations, FitParams::default().max_iterations);
        assert_eq!(p.seed, None);
    }
}
