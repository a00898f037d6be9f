//! High-level facade for the `blobline-*` workspace.
//!
//! This crate provides:
//! - re-exports of the geometry core and the RANSAC fitter,
//! - one-call helpers that fit an in-memory blob set, a blob file, or a whole JSON run
//!   (config + blob file → run report),
//! - (feature `cli`) the `blobline` command line tool.
//!
//! ## Quickstart
//!
//! ```
//! use blobline::{fit_blobs, BlobSet, FitParams, ImageSize};
//!
//! let blobs = BlobSet::from_points(
//!     ImageSize::new(320.0, 240.0),
//!     &[(10.0, 20.0), (60.0, 45.0), (110.0, 70.0), (160.0, 95.0), (40.0, 200.0)],
//! );
//! let report = fit_blobs(&blobs, FitParams::new(2.0, 40, 0.5).with_seed(1));
//! assert_eq!(report.inlier_count(), 4);
//! println!("{report}");
//! ```
//!
//! ## API map
//! - `blobline::core`: blobs, image size, `LineModel` geometry, least squares.
//! - `blobline::ransac`: consensus scoring, sampling, the fitter, reports,
//!   overlays and JSON helpers.

pub use blobline_core as core;
pub use blobline_ransac as ransac;

pub use blobline_core::{Blob, BlobSet, ImageSize, LineModel};
pub use blobline_ransac::{
    FitParams, FitReport, FitSummary, LineFitConfig, LineFitRunReport, LineOverlay,
    RansacLineFitter,
};

use blobline_ransac::{load_blob_set, FitParamsError, LineFitIoError};
use std::path::Path;

/// Errors produced by the run helpers.
#[derive(thiserror::Error, Debug)]
pub enum FitFileError {
    #[error("failed to load config {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: LineFitIoError,
    },
    #[error("failed to load blobs {path}: {source}")]
    Blobs {
        path: String,
        #[source]
        source: LineFitIoError,
    },
    #[error(transparent)]
    Params(#[from] FitParamsError),
}

/// Fit a line through `blobs`. Out-of-range parameters are clamped.
pub fn fit_blobs(blobs: &BlobSet, params: FitParams) -> FitReport {
    RansacLineFitter::new(params).fit(blobs)
}

/// Load the blob set JSON at `blobs_path` and fit it.
///
/// Unlike [`fit_blobs`], out-of-range parameters are rejected.
pub fn fit_blob_file(blobs_path: &Path, params: FitParams) -> Result<FitReport, FitFileError> {
    params.validate()?;
    let blobs = load_blob_set(blobs_path).map_err(|source| FitFileError::Blobs {
        path: blobs_path.display().to_string(),
        source,
    })?;
    Ok(fit_blobs(&blobs, params))
}

/// Run the fit described by the JSON config at `config_path`.
///
/// Unreadable files are errors. Invalid fit parameters are not: they are
/// recorded in the returned report's `error` field, the way a failed fit
/// would be.
pub fn run_config(config_path: &Path) -> Result<(LineFitConfig, LineFitRunReport), FitFileError> {
    let cfg = LineFitConfig::load_json(config_path).map_err(|source| FitFileError::Config {
        path: config_path.display().to_string(),
        source,
    })?;
    let run = run_loaded_config(&cfg, config_path)?;
    Ok((cfg, run))
}

/// Like [`run_config`] for an already loaded config.
pub fn run_loaded_config(
    cfg: &LineFitConfig,
    config_path: &Path,
) -> Result<LineFitRunReport, FitFileError> {
    let blobs_path = cfg.resolve_blobs_path(config_path);
    let blobs = load_blob_set(&blobs_path).map_err(|source| FitFileError::Blobs {
        path: blobs_path.display().to_string(),
        source,
    })?;

    let mut run = LineFitRunReport::new(cfg, config_path, blobs.len());
    match cfg.build_fitter() {
        Ok(fitter) => run.set_fit(fitter.fit(&blobs)),
        Err(err) => run.set_error(err),
    }
    Ok(run)
}
