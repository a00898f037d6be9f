//! Core types and geometry for fitting a line through detected blobs.
//!
//! This crate is intentionally small and purely geometric. It knows nothing
//! about random sampling or consensus scoring; those live in
//! `blobline-ransac`.

mod blob;
mod line;
mod logger;
mod regression;

pub use blob::{Blob, BlobSet, ImageSize};
pub use line::LineModel;
pub use regression::{fit_least_squares, refine_line, LinearFit};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
