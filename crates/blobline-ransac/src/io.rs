//! JSON configuration and report helpers for line fitting runs.

use crate::{FitParams, FitParamsError, FitReport, FitSummary, LineOverlay, RansacLineFitter};
use blobline_core::BlobSet;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(thiserror::Error, Debug)]
pub enum LineFitIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Load a blob set from JSON on disk.
pub fn load_blob_set(path: impl AsRef<Path>) -> Result<BlobSet, LineFitIoError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Write a blob set to disk as pretty JSON.
pub fn write_blob_set(set: &BlobSet, path: impl AsRef<Path>) -> Result<(), LineFitIoError> {
    let json = serde_json::to_string_pretty(set)?;
    fs::write(path, json)?;
    Ok(())
}

/// Configuration for one fitting run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineFitConfig {
    /// Blob set JSON to fit.
    pub blobs_path: String,
    /// Where to write the run report.
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default)]
    pub params: FitParams,
}

impl LineFitConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, LineFitIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), LineFitIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the output report path.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("blobline_report.json"))
    }

    /// Resolve `blobs_path` relative to the directory holding the config.
    pub fn resolve_blobs_path(&self, config_path: &Path) -> PathBuf {
        let blobs = Path::new(&self.blobs_path);
        match config_path.parent() {
            Some(dir) if blobs.is_relative() => dir.join(blobs),
            _ => blobs.to_path_buf(),
        }
    }

    /// Build a fitter, rejecting out-of-range parameters.
    pub fn build_fitter(&self) -> Result<RansacLineFitter, FitParamsError> {
        self.params.validate()?;
        Ok(RansacLineFitter::new(self.params.clone()))
    }
}

/// Everything recorded about one run, written next to the config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineFitRunReport {
    pub blobs_path: String,
    pub config_path: String,
    pub num_blobs: usize,
    pub params: FitParams,
    #[serde(default)]
    pub report: Option<FitReport>,
    #[serde(default)]
    pub summary: Option<FitSummary>,
    #[serde(default)]
    pub overlay: Option<LineOverlay>,
    #[serde(default)]
    pub error: Option<String>,
}

impl LineFitRunReport {
    /// Build a base report from the config and the loaded blob count.
    pub fn new(cfg: &LineFitConfig, config_path: &Path, num_blobs: usize) -> Self {
        Self {
            blobs_path: cfg.blobs_path.clone(),
            config_path: config_path.to_string_lossy().into_owned(),
            num_blobs,
            params: cfg.params.clone(),
            report: None,
            summary: None,
            overlay: None,
            error: None,
        }
    }

    /// Populate the result fields from a finished fit.
    pub fn set_fit(&mut self, report: FitReport) {
        self.summary = Some(report.summary());
        self.overlay = Some(LineOverlay::from_report(&report));
        self.report = Some(report);
        self.error = None;
    }

    /// Record a failure that prevented the fit.
    pub fn set_error(&mut self, err: impl std::fmt::Display) {
        self.error = Some(err.to_string());
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, LineFitIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), LineFitIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
