//! Geometry for drawing a fit over its source image.
//!
//! Nothing here rasterizes; a renderer reads these lines and draws them.

use crate::report::FitReport;
use blobline_core::LineModel;
use serde::{Deserialize, Serialize};

/// The two lines at `±threshold` around the fitted line, clipped to the
/// image. Either side is `None` when it falls outside the image.
///
/// Sides follow the sign of [`LineModel::offset_line`]: for a non-vertical
/// line `positive` has the larger y, which is lower on screen in image
/// coordinates. For a vertical line it has the larger x.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThresholdBand {
    /// `offset_line(+threshold)`, clipped.
    pub positive: Option<LineModel>,
    /// `offset_line(-threshold)`, clipped.
    pub negative: Option<LineModel>,
}

/// Everything a preview needs to show one fit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineOverlay {
    /// The reported line's two reference points, drawn as markers.
    pub reference: LineModel,
    /// The fitted line clipped to the image rectangle.
    pub extended: Option<LineModel>,
    /// Inlier band around the fitted line.
    pub band: Option<ThresholdBand>,
}

impl LineOverlay {
    /// Build the overlay for `report`.
    ///
    /// Reports without a line (fewer than two inliers) yield an overlay with
    /// no extended line and no band.
    pub fn from_report(report: &FitReport) -> Self {
        let reference = *report.line();
        if !report.has_line() {
            return Self {
                reference,
                extended: None,
                band: None,
            };
        }

        let image = report.image();
        let clip = |line: LineModel| line.extended_line(image.width, image.height);

        let threshold = report.threshold();
        let band = (threshold > 0.0).then(|| ThresholdBand {
            positive: clip(reference.offset_line(threshold)),
            negative: clip(reference.offset_line(-threshold)),
        });

        Self {
            reference,
            extended: clip(reference),
            band,
        }
    }

    /// True when there is nothing to draw across the image.
    pub fn is_empty(&self) -> bool {
        self.extended.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use blobline_core::{Blob, ImageSize};

    fn report(line: LineModel, threshold: f64, inliers: usize) -> FitReport {
        FitReport::new(
            ImageSize::new(100.0, 80.0),
            threshold,
            vec![Blob::new(0.0, 0.0); inliers],
            Vec::new(),
            line,
        )
    }

    #[test]
    fn horizontal_fit_gets_band_on_both_sides() {
        let line = LineModel::new(10.0, 40.0, 20.0, 40.0);
        let overlay = LineOverlay::from_report(&report(line, 5.0, 3));

        let ext = overlay.extended.expect("line crosses image");
        assert_relative_eq!(ext.x1, 0.0);
        assert_relative_eq!(ext.x2, 100.0);

        let band = overlay.band.expect("band");
        let positive = band.positive.expect("positive side inside");
        let negative = band.negative.expect("negative side inside");
        assert_relative_eq!(positive.y1, 45.0, epsilon = 1e-9);
        assert_relative_eq!(negative.y1, 35.0, epsilon = 1e-9);
    }

    #[test]
    fn band_side_outside_image_is_dropped() {
        let line = LineModel::new(0.0, 78.0, 10.0, 78.0);
        let overlay = LineOverlay::from_report(&report(line, 5.0, 2));
        let band = overlay.band.expect("band");
        // y = 83 leaves the 80 px tall image, y = 73 stays inside
        assert!(band.positive.is_none());
        assert!(band.negative.is_some());
    }

    #[test]
    fn vertical_fit_band_is_signed_along_x() {
        let line = LineModel::new(30.0, 10.0, 30.0, 60.0);
        let band = LineOverlay::from_report(&report(line, 4.0, 3))
            .band
            .expect("band");
        assert_eq!(band.positive, Some(LineModel::new(34.0, 0.0, 34.0, 80.0)));
        assert_eq!(band.negative, Some(LineModel::new(26.0, 0.0, 26.0, 80.0)));
    }

    #[test]
    fn no_line_means_empty_overlay() {
        let overlay = LineOverlay::from_report(&report(LineModel::zero(), 5.0, 1));
        assert!(overlay.is_empty());
        assert!(overlay.band.is_none());
        assert_eq!(overlay.reference, LineModel::zero());
    }

    #[test]
    fn fit_outside_image_is_empty() {
        let overlay =
            LineOverlay::from_report(&report(LineModel::new(0.0, 500.0, 1.0, 500.0), 2.0, 4));
        assert!(overlay.is_empty());
    }
}
