//! Structure implementations for isoscope.
//!
//! This crate provides the threshold-driven structures and the extractors
//! behind them:
//! - [`Contour`]: marching squares over a 2D grid, as lines or filled bands
//! - [`Isosurface`]: marching cubes over a 3D grid
//!
//! Both keep their vertex buffer in an [`ExtractionCache`] so that repeated
//! frames at an unchanged threshold cost nothing.

// Grid indices and counts are converted to floats and back throughout
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]

pub mod cache;
pub mod color;
pub mod contour;
pub mod interp;
pub mod isosurface;
pub mod vertex;

pub use cache::{CacheState, ExtractionCache, ExtractionStats};
pub use color::{CellColor, ValueColor};
pub use contour::{
    marching_squares, Contour, ContourPlacement, ContourSettings, ContourStyle,
    DEFAULT_DEPTH_SCALE,
};
pub use interp::edge_weight;
pub use isosurface::{marching_cubes, Isosurface, DEFAULT_LOOKUP_RESOLUTION};
pub use vertex::{ContourVertex, MeshVertex};
