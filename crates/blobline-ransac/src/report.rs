use blobline_core::{Blob, ImageSize, LineModel};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of one line fit.
///
/// Built once per fit and never changed afterwards. For inputs with at least
/// two blobs, `inliers().len() + outliers().len()` equals the number of
/// input blobs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FitReport {
    image: ImageSize,
    threshold: f64,
    inliers: Vec<Blob>,
    outliers: Vec<Blob>,
    line: LineModel,
}

impl FitReport {
    pub fn new(
        image: ImageSize,
        threshold: f64,
        inliers: Vec<Blob>,
        outliers: Vec<Blob>,
        line: LineModel,
    ) -> Self {
        Self {
            image,
            threshold,
            inliers,
            outliers,
            line,
        }
    }

    /// Report for an input too small to fit: no blobs, zero line.
    pub fn empty(image: ImageSize, threshold: f64) -> Self {
        Self::new(image, threshold, Vec::new(), Vec::new(), LineModel::zero())
    }

    /// Size of the image the blobs came from.
    pub fn image(&self) -> ImageSize {
        self.image
    }

    /// Threshold the blobs were classified with.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Blobs within `threshold` of the accepted candidate line.
    pub fn inliers(&self) -> &[Blob] {
        &self.inliers
    }

    /// Every other input blob.
    pub fn outliers(&self) -> &[Blob] {
        &self.outliers
    }

    /// The best fit line.
    pub fn line(&self) -> &LineModel {
        &self.line
    }

    pub fn inlier_count(&self) -> usize {
        self.inliers.len()
    }

    pub fn outlier_count(&self) -> usize {
        self.outliers.len()
    }

    /// Whether the report carries a line worth drawing (two or more inliers).
    pub fn has_line(&self) -> bool {
        self.inliers.len() > 1
    }

    pub fn x1(&self) -> f64 {
        self.line.x1
    }

    pub fn y1(&self) -> f64 {
        self.line.y1
    }

    pub fn x2(&self) -> f64 {
        self.line.x2
    }

    pub fn y2(&self) -> f64 {
        self.line.y2
    }

    /// Line direction in degrees.
    pub fn angle(&self) -> f64 {
        self.line.angle()
    }

    /// Mean y of the line's reference points.
    pub fn height(&self) -> f64 {
        self.line.height()
    }

    /// Scalar summary for publishing.
    pub fn summary(&self) -> FitSummary {
        FitSummary {
            x1: self.x1(),
            y1: self.y1(),
            x2: self.x2(),
            y2: self.y2(),
            angle: self.angle(),
            height: self.height(),
            inliers: self.inlier_count(),
            outliers: self.outlier_count(),
        }
    }
}

impl Default for FitReport {
    fn default() -> Self {
        Self::empty(ImageSize::default(), 0.0)
    }
}

impl fmt::Display for FitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "found {} inliers and {} outliers, {}",
            self.inlier_count(),
            self.outlier_count(),
            self.line
        )
    }
}

/// Externally observable summary of a fit.
///
/// Field order is the publishing order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FitSummary {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub angle: f64,
    pub height: f64,
    pub inliers: usize,
    pub outliers: usize,
}

impl FitSummary {
    /// Named line scalars in publishing order.
    pub fn values(&self) -> [(&'static str, f64); 6] {
        [
            ("x1", self.x1),
            ("y1", self.y1),
            ("x2", self.x2),
            ("y2", self.y2),
            ("angle", self.angle),
            ("height", self.height),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> FitReport {
        FitReport::new(
            ImageSize::new(320.0, 240.0),
            2.0,
            vec![Blob::new(0.0, 10.0), Blob::new(10.0, 20.0)],
            vec![Blob::new(50.0, 0.0)],
            LineModel::new(0.0, 10.0, 10.0, 20.0),
        )
    }

    #[test]
    fn scalar_fields_follow_line() {
        let r = sample_report();
        assert_eq!(r.x1(), 0.0);
        assert_eq!(r.y2(), 20.0);
        assert!((r.angle() - 45.0).abs() < 1e-12);
        assert_eq!(r.height(), 15.0);
        assert!(r.has_line());
    }

    #[test]
    fn summary_publishes_in_fixed_order() {
        let s = sample_report().summary();
        let keys: Vec<&str> = s.values().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, ["x1", "y1", "x2", "y2", "angle", "height"]);
        assert_eq!((s.inliers, s.outliers), (2, 1));

        let json = serde_json::to_string(&s).expect("serialize");
        assert!(json.starts_with(r#"{"x1":0.0,"y1":10.0,"x2":10.0,"y2":20.0,"angle":"#));
    }

    #[test]
    fn default_report_is_empty() {
        let r = FitReport::default();
        assert_eq!(r.threshold(), 0.0);
        assert!(r.inliers().is_empty() && r.outliers().is_empty());
        assert_eq!(*r.line(), LineModel::zero());
        assert!(!r.has_line());
    }

    #[test]
    fn display_mentions_counts() {
        let text = sample_report().to_string();
        assert!(text.starts_with("found 2 inliers and 1 outliers"), "{text}");
    }
}
