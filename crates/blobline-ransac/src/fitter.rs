//! RANSAC search loop.
//!
//! Each iteration samples two distinct blobs, scores the line through them
//! with [`score_candidate`], and keeps the lowest-scoring candidate whose
//! inlier share reaches `min_inlier_fraction`. The winning inlier set is then
//! refit by least squares.

use crate::consensus::{score_candidate, Consensus};
use crate::params::FitParams;
use crate::report::FitReport;
use crate::sampler::{sample_pair, IndexSampler};
use blobline_core::{refine_line, Blob, BlobSet, LineModel};
use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Raw result of the search, before it is wrapped into a [`FitReport`].
#[derive(Clone, Debug, PartialEq)]
pub struct LineSearch {
    /// Refined line, or the sampled one when refinement was not possible.
    pub line: LineModel,
    /// Line through the two sampled blobs of the accepted candidate.
    pub sampled: LineModel,
    pub inliers: Vec<Blob>,
    pub outliers: Vec<Blob>,
    /// Consensus score of the accepted candidate; `+inf` if none was accepted.
    pub score: f64,
    /// Whether `line` came from the least-squares refit.
    pub refined: bool,
}

/// Best candidate seen so far.
struct Best {
    score: f64,
    line: LineModel,
    consensus: Option<Consensus>,
}

impl Best {
    fn initial() -> Self {
        Self {
            score: f64::INFINITY,
            line: LineModel::zero(),
            consensus: None,
        }
    }
}

/// Search for the best line through `blobs`.
///
/// Runs exactly `params.max_iterations` iterations. `params` is used as
/// given; see [`FitParams::clamped`] for sanitising user input. With fewer
/// than two blobs there is nothing to sample: both sets are empty and the
/// line is zero.
pub fn search_line<S: IndexSampler + ?Sized>(
    blobs: &[Blob],
    params: &FitParams,
    sampler: &mut S,
) -> LineSearch {
    let n = blobs.len();
    if n < 2 {
        return LineSearch {
            line: LineModel::zero(),
            sampled: LineModel::zero(),
            inliers: Vec::new(),
            outliers: Vec::new(),
            score: f64::INFINITY,
            refined: false,
        };
    }

    let threshold = params.distance_threshold;
    let best = (0..params.max_iterations).fold(Best::initial(), |best, iteration| {
        let (i, j) = sample_pair(&mut *sampler, n);
        let candidate = LineModel::through(blobs[i].position, blobs[j].position);
        let consensus = score_candidate(&candidate, blobs, threshold);

        let fraction = consensus.inliers.len() as f64 / n as f64;
        if consensus.score < best.score && fraction >= params.min_inlier_fraction {
            trace!(
                "iteration {iteration}: accepted blobs ({i}, {j}) score {:.3} inliers {}",
                consensus.score,
                consensus.inliers.len()
            );
            Best {
                score: consensus.score,
                line: candidate,
                consensus: Some(consensus),
            }
        } else {
            best
        }
    });

    let Some(consensus) = best.consensus else {
        debug!(
            "no candidate reached inlier fraction {} in {} iterations",
            params.min_inlier_fraction, params.max_iterations
        );
        return LineSearch {
            line: LineModel::zero(),
            sampled: LineModel::zero(),
            inliers: Vec::new(),
            outliers: blobs.to_vec(),
            score: f64::INFINITY,
            refined: false,
        };
    };

    let refit = if consensus.inliers.len() >= 2 {
        let line = refine_line(&consensus.inliers, [blobs[0].x(), blobs[1].x()]);
        if line.is_none() {
            debug!(
                "refit over {} inliers is singular, keeping sampled line",
                consensus.inliers.len()
            );
        }
        line
    } else {
        None
    };

    LineSearch {
        line: refit.unwrap_or(best.line),
        sampled: best.line,
        inliers: consensus.inliers,
        outliers: consensus.outliers,
        score: best.score,
        refined: refit.is_some(),
    }
}

/// RANSAC line fitter over blob sets.
#[derive(Clone, Debug, Default)]
pub struct RansacLineFitter {
    params: FitParams,
}

impl RansacLineFitter {
    /// Create a fitter. Out-of-range parameters are clamped to the nearest
    /// valid value.
    pub fn new(params: FitParams) -> Self {
        if let Err(err) = params.validate() {
            warn!("{err}; clamping parameters");
        }
        Self {
            params: params.clamped(),
        }
    }

    pub fn params(&self) -> &FitParams {
        &self.params
    }

    /// Fit a line using the configured seed, or the thread RNG if there is
    /// none.
    pub fn fit(&self, set: &BlobSet) -> FitReport {
        match self.params.seed {
            Some(seed) => self.fit_with_sampler(set, &mut StdRng::seed_from_u64(seed)),
            None => self.fit_with_sampler(set, &mut rand::rng()),
        }
    }

    /// Fit a line drawing every sample from `sampler`.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, set, sampler), fields(blobs = set.len()))
    )]
    pub fn fit_with_sampler<S: IndexSampler + ?Sized>(
        &self,
        set: &BlobSet,
        sampler: &mut S,
    ) -> FitReport {
        let threshold = self.params.distance_threshold;
        if set.len() < 2 {
            debug!("{} blobs, nothing to fit", set.len());
            return FitReport::empty(set.image, threshold);
        }

        let search = search_line(&set.blobs, &self.params, sampler);
        debug!(
            "fit {} blobs: {} inliers, {} outliers, score {:.3}, refined {}",
            set.len(),
            search.inliers.len(),
            search.outliers.len(),
            search.score,
            search.refined
        );

        FitReport::new(
            set.image,
            threshold,
            search.inliers,
            search.outliers,
            search.line,
        )
    }
}
