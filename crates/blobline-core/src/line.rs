use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An infinite line through two reference points.
///
/// The endpoints are *not* segment boundaries: every operation treats the
/// model as the unbounded line through `(x1, y1)` and `(x2, y2)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LineModel {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl LineModel {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn through(a: Point2<f64>, b: Point2<f64>) -> Self {
        Self::new(a.x, a.y, b.x, b.y)
    }

    /// The all-zero placeholder used when no line was found.
    pub fn zero() -> Self {
        Self::default()
    }

    #[inline]
    pub fn start(&self) -> Point2<f64> {
        Point2::new(self.x1, self.y1)
    }

    #[inline]
    pub fn end(&self) -> Point2<f64> {
        Point2::new(self.x2, self.y2)
    }

    /// True when both reference points coincide, so no direction is defined.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.x1 == self.x2 && self.y1 == self.y2
    }

    #[inline]
    pub fn is_vertical(&self) -> bool {
        self.x1 == self.x2
    }

    /// Direction in degrees, `atan2(dy, dx)`.
    pub fn angle(&self) -> f64 {
        (self.y2 - self.y1).atan2(self.x2 - self.x1).to_degrees()
    }

    /// Mean image-space height of the two reference points.
    pub fn height(&self) -> f64 {
        (self.y1 + self.y2) / 2.0
    }

    /// Perpendicular distance from `p` to the infinite line.
    ///
    /// Returns `None` for a degenerate line.
    pub fn distance_to(&self, p: Point2<f64>) -> Option<f64> {
        let dx = self.x2 - self.x1;
        let dy = self.y2 - self.y1;
        let norm = dx.hypot(dy);
        if norm == 0.0 || !norm.is_finite() {
            return None;
        }
        let num = (dy * p.x - dx * p.y + self.x2 * self.y1 - self.y2 * self.x1).abs();
        let d = num / norm;
        d.is_finite().then_some(d)
    }

    /// The part of this line inside the rectangle `[0, max_x] x [0, max_y]`.
    ///
    /// Returns `None` when the line misses the rectangle, when the rectangle
    /// has no area, or when the line itself is degenerate.
    pub fn extended_line(&self, max_x: f64, max_y: f64) -> Option<LineModel> {
        if self.is_degenerate() || !(max_x > 0.0 && max_y > 0.0) {
            return None;
        }

        let vertical = |x: f64| {
            (0.0..=max_x)
                .contains(&x)
                .then(|| LineModel::new(x, 0.0, x, max_y))
        };
        if self.is_vertical() {
            return vertical(self.x1);
        }

        // y = m x + b, sampled at the left and right image borders
        let m = (self.y1 - self.y2) / (self.x1 - self.x2);
        let b = self.y1 - m * self.x1;
        if !(m.is_finite() && b.is_finite()) {
            // dx too small for a finite slope
            return vertical(self.x1);
        }
        let span = LineModel::new(0.0, b, max_x, m * max_x + b);
        clip_to_rect(&span, max_x, max_y)
    }

    /// A parallel line at perpendicular distance `d`.
    ///
    /// Non-vertical lines are shifted along y by `d / cos(angle)`, vertical
    /// lines along x by `d`.
    pub fn offset_line(&self, d: f64) -> LineModel {
        if self.is_vertical() {
            return LineModel::new(self.x1 + d, self.y1, self.x2 + d, self.y2);
        }
        let shift = d / self.angle().to_radians().cos();
        LineModel::new(self.x1, self.y1 + shift, self.x2, self.y2 + shift)
    }
}

impl fmt::Display for LineModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LineModel{{x1={}, y1={}, x2={}, y2={}}}",
            self.x1, self.y1, self.x2, self.y2
        )
    }
}

/// Liang-Barsky clipping of a segment against `[0, max_x] x [0, max_y]`.
fn clip_to_rect(seg: &LineModel, max_x: f64, max_y: f64) -> Option<LineModel> {
    let dx = seg.x2 - seg.x1;
    let dy = seg.y2 - seg.y1;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    for (p, q) in [
        (-dx, seg.x1),
        (dx, max_x - seg.x1),
        (-dy, seg.y1),
        (dy, max_y - seg.y1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    if !(t0.is_finite() && t1.is_finite()) {
        return None;
    }

    Some(LineModel::new(
        seg.x1 + t0 * dx,
        seg.y1 + t0 * dy,
        seg.x1 + t1 * dx,
        seg.y1 + t1 * dy,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn angle_and_height() {
        let line = LineModel::new(0.0, 0.0, 10.0, 10.0);
        assert_relative_eq!(line.angle(), 45.0, epsilon = 1e-12);
        assert_relative_eq!(line.height(), 5.0);

        let down = LineModel::new(0.0, 4.0, 0.0, -4.0);
        assert_relative_eq!(down.angle(), -90.0, epsilon = 1e-12);
        assert_relative_eq!(down.height(), 0.0);
    }

    #[test]
    fn distance_matches_closed_form() {
        let line = LineModel::new(0.0, 0.0, 4.0, 0.0);
        assert_relative_eq!(line.distance_to(Point2::new(2.0, 3.0)).unwrap(), 3.0);

        let diag = LineModel::new(0.0, 0.0, 1.0, 1.0);
        let d = diag.distance_to(Point2::new(1.0, 0.0)).unwrap();
        assert_relative_eq!(d, std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-12);
    }

    #[test]
    fn degenerate_line_has_no_distance() {
        let line = LineModel::new(5.0, 5.0, 5.0, 5.0);
        assert!(line.is_degenerate());
        assert!(line.distance_to(Point2::new(5.0, 5.0)).is_none());
        assert!(line.extended_line(100.0, 100.0).is_none());
    }

    #[test]
    fn vertical_line_spans_image_height() {
        let line = LineModel::new(30.0, 10.0, 30.0, 20.0);
        let ext = line.extended_line(640.0, 480.0).expect("inside image");
        assert_eq!(ext, LineModel::new(30.0, 0.0, 30.0, 480.0));

        assert!(LineModel::new(700.0, 1.0, 700.0, 2.0)
            .extended_line(640.0, 480.0)
            .is_none());
    }

    #[test]
    fn near_vertical_line_is_clipped_as_vertical() {
        let line = LineModel::new(0.0, 0.0, 1e-310, 100.0);
        let ext = line.extended_line(640.0, 480.0).expect("inside image");
        assert_eq!(ext, LineModel::new(0.0, 0.0, 0.0, 480.0));
        assert!(ext.y1.is_finite() && ext.y2.is_finite());

        let outside = LineModel::new(-5.0, 0.0, -5.0 + 1e-300, 100.0);
        assert!(outside.extended_line(640.0, 480.0).is_none());
    }

    #[test]
    fn horizontal_line_spans_image_width() {
        let line = LineModel::new(10.0, 50.0, 20.0, 50.0);
        let ext = line.extended_line(640.0, 480.0).expect("inside image");
        assert_relative_eq!(ext.x1, 0.0);
        assert_relative_eq!(ext.x2, 640.0);
        assert_relative_eq!(ext.y1, 50.0);
        assert_relative_eq!(ext.y2, 50.0);
    }

    #[test]
    fn steep_line_is_clipped_to_top_and_bottom() {
        // y = 2x - 100 enters at y=0 (x=50) and leaves at y=200 (x=150)
        let line = LineModel::new(60.0, 20.0, 80.0, 60.0);
        let ext = line.extended_line(300.0, 200.0).expect("crosses image");
        assert_relative_eq!(ext.x1, 50.0, epsilon = 1e-9);
        assert_relative_eq!(ext.y1, 0.0, epsilon = 1e-9);
        assert_relative_eq!(ext.x2, 150.0, epsilon = 1e-9);
        assert_relative_eq!(ext.y2, 200.0, epsilon = 1e-9);
    }

    #[test]
    fn line_outside_image_has_no_extension() {
        let max_y = 480.0;
        let line = LineModel::new(0.0, max_y + 100.0, 10.0, max_y + 100.0);
        assert!(line.extended_line(640.0, max_y).is_none());

        // passes above-left of the origin corner
        let corner = LineModel::new(-10.0, 0.0, 0.0, -10.0);
        assert!(corner.extended_line(640.0, 480.0).is_none());
    }

    #[test]
    fn offset_keeps_direction_and_distance() {
        let line = LineModel::new(0.0, 0.0, 10.0, 5.0);
        let shifted = line.offset_line(3.0);
        assert_relative_eq!(shifted.angle(), line.angle(), epsilon = 1e-9);
        let d = line.distance_to(shifted.start()).unwrap();
        assert_relative_eq!(d, 3.0, epsilon = 1e-9);
    }

    #[test]
    fn offset_round_trip_is_coincident() {
        let line = LineModel::new(12.0, 40.0, 300.0, 95.0);
        let back = line.offset_line(7.5).offset_line(-7.5);
        assert_relative_eq!(back.angle(), line.angle(), epsilon = 1e-9);
        assert_relative_eq!(back.y1, line.y1, epsilon = 1e-9);
        assert_relative_eq!(back.y2, line.y2, epsilon = 1e-9);
        assert!(line.distance_to(back.start()).unwrap() < 1e-9);
    }

    #[test]
    fn vertical_offset_moves_x() {
        let line = LineModel::new(10.0, 0.0, 10.0, 100.0);
        assert_eq!(line.offset_line(-4.0), LineModel::new(6.0, 0.0, 6.0, 100.0));
    }
}
