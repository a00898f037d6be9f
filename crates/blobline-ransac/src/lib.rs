//! RANSAC line fitting over detected blobs.
//!
//! Pipeline:
//! - sample two distinct blobs per iteration ([`sampler`]),
//! - score the line through them with a threshold-capped distance sum
//!   ([`score_candidate`]),
//! - keep the lowest score that reaches the minimum inlier share,
//! - refit the winning inliers by least squares.
//!
//! The result is an immutable [`FitReport`]. [`LineOverlay`] derives the
//! geometry a preview needs to draw it.
//!
//! ```
//! use blobline_core::{BlobSet, ImageSize};
//! use blobline_ransac::{FitParams, RansacLineFitter};
//!
//! let set = BlobSet::from_points(
//!     ImageSize::new(640.0, 480.0),
//!     &[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0), (100.0, -50.0)],
//! );
//! let fitter = RansacLineFitter::new(FitParams::new(1.0, 50, 0.0).with_seed(7));
//! let report = fitter.fit(&set);
//! assert_eq!(report.inlier_count(), 4);
//! assert_eq!(report.outlier_count(), 1);
//! ```

mod consensus;
mod fitter;
mod io;
mod overlay;
mod params;
mod report;
pub mod sampler;

pub use consensus::{score_candidate, Consensus};
pub use fitter::{search_line, LineSearch, RansacLineFitter};
pub use io::{load_blob_set, write_blob_set, LineFitConfig, LineFitIoError, LineFitRunReport};
pub use overlay::{LineOverlay, ThresholdBand};
pub use params::{
    FitParams, FitParamsError, INLIER_PERCENT_RANGE, ITERATIONS_RANGE, THRESHOLD_RANGE,
};
pub use report::{FitReport, FitSummary};
pub use sampler::{IndexSampler, ScriptedSampler};
