use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// A point-like feature detected in an image.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Blob {
    /// Centroid in image pixel coordinates.
    pub position: Point2<f64>,
    /// Blob diameter in pixels. Carried through untouched by the line fit.
    #[serde(default)]
    pub size: f64,
}

impl Blob {
    /// Zero-size blob at `(x, y)`.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            position: Point2::new(x, y),
            size: 0.0,
        }
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.position.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.position.y
    }
}

/// Dimensions of the image the blobs were detected in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: f64,
    pub height: f64,
}

impl ImageSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Ordered blobs together with the size of their source image.
///
/// Order does not matter to the fit, but indices must stay stable while a
/// fit borrows the set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BlobSet {
    #[serde(default)]
    pub image: ImageSize,
    pub blobs: Vec<Blob>,
}

impl BlobSet {
    pub fn new(image: ImageSize, blobs: Vec<Blob>) -> Self {
        Self { image, blobs }
    }

    /// Build a set from raw `(x, y)` pairs.
    pub fn from_points(image: ImageSize, points: &[(f64, f64)]) -> Self {
        Self {
            image,
            blobs: points.iter().map(|&(x, y)| Blob::new(x, y)).collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}
