//! Ordinary least-squares refinement of a fitted line.
//!
//! The regression models `y` as a function of `x`, so a cluster whose points
//! all share one x-coordinate has no solution. Callers get `None` in that
//! case and are expected to keep whatever line they already had.

use crate::{Blob, LineModel};
use log::debug;

/// Relative tolerance under which the x-spread is treated as zero.
const SINGULAR_EPS: f64 = 1e-12;

/// `y = slope * x + intercept`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Least-squares fit of `y` against `x` over `blobs`.
///
/// Returns `None` for fewer than two blobs, a vertical (single-x) cluster,
/// or any non-finite result.
pub fn fit_least_squares(blobs: &[Blob]) -> Option<LinearFit> {
    if blobs.len() < 2 {
        return None;
    }

    let n = blobs.len() as f64;
    let mean_x = blobs.iter().map(Blob::x).sum::<f64>() / n;
    let mean_y = blobs.iter().map(Blob::y).sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for b in blobs {
        let dx = b.x() - mean_x;
        sxx += dx * dx;
        sxy += dx * (b.y() - mean_y);
    }

    let scale = blobs
        .iter()
        .map(|b| b.x() * b.x())
        .sum::<f64>()
        .max(1.0);
    if sxx.is_nan() || sxx <= SINGULAR_EPS * scale {
        debug!("singular regression: x spread {sxx:e} over {} blobs", blobs.len());
        return None;
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    (slope.is_finite() && intercept.is_finite()).then_some(LinearFit { slope, intercept })
}

/// Refit a line through `inliers` and evaluate it at the abscissae `x_at`.
///
/// When both abscissae coincide the inlier x-extent is used instead, so the
/// result always has two distinct reference points.
pub fn refine_line(inliers: &[Blob], x_at: [f64; 2]) -> Option<LineModel> {
    let fit = fit_least_squares(inliers)?;

    let [mut xa, mut xb] = x_at;
    if xa == xb || !(xa.is_finite() && xb.is_finite()) {
        let (min_x, max_x) = inliers
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), b| {
                (lo.min(b.x()), hi.max(b.x()))
            });
        xa = min_x;
        xb = max_x;
    }

    Some(LineModel::new(xa, fit.eval(xa), xb, fit.eval(xb)))
}
