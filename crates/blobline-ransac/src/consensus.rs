use blobline_core::{Blob, LineModel};

/// Score and inlier/outlier split of one candidate line.
#[derive(Clone, Debug, PartialEq)]
pub struct Consensus {
    /// Sum of inlier distances plus `threshold` per outlier. Lower is better.
    pub score: f64,
    pub inliers: Vec<Blob>,
    pub outliers: Vec<Blob>,
}

impl Consensus {
    pub fn inlier_fraction(&self) -> f64 {
        let total = self.inliers.len() + self.outliers.len();
        if total == 0 {
            return 0.0;
        }
        self.inliers.len() as f64 / total as f64
    }
}

/// Score `candidate` against every blob.
///
/// A blob within `threshold` of the line is an inlier and adds its distance;
/// any other blob is an outlier and adds exactly `threshold`, which caps the
/// penalty of far-away points. A degenerate candidate has no distance to
/// anything, so every blob counts as a maximal outlier.
///
/// Inliers and outliers keep the input order.
pub fn score_candidate(candidate: &LineModel, blobs: &[Blob], threshold: f64) -> Consensus {
    let mut score = 0.0;
    let mut inliers = Vec::new();
    let mut outliers = Vec::new();

    for blob in blobs {
        match candidate.distance_to(blob.position) {
            Some(d) if d <= threshold => {
                score += d;
                inliers.push(*blob);
            }
            _ => {
                score += threshold;
                outliers.push(*blob);
            }
        }
    }

    Consensus {
        score,
        inliers,
        outliers,
    }
}
