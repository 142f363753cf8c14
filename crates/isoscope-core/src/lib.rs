//! Core abstractions for isoscope.
//!
//! This crate provides the fundamental types used throughout isoscope:
//! - [`ScalarField`] and the [`Grid2`]/[`Grid3`] grids it is implemented by
//! - Static marching squares and marching cubes case tables
//! - [`Structure`] trait, global state management and structure registry
//! - Color maps and configuration options

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod color_maps;
pub mod error;
pub mod field;
pub mod options;
pub mod registry;
pub mod scalars;
pub mod state;
pub mod structure;
pub mod tables;

pub use color_maps::{ColorMap, ColorMapRegistry, DEFAULT_COLOR_MAP};
pub use error::{IsoscopeError, Result};
pub use field::{Axis, Field2, Field3, Grid2, Grid3, SampleError, ScalarField, SlicePlane};
pub use options::Options;
pub use registry::Registry;
pub use scalars::ScalarAttributes;
pub use state::{with_context, with_context_mut, Context};
pub use structure::Structure;
pub use tables::{CaseEntry, PointRef};

// Re-export glam types for convenience
pub use glam::{UVec3, Vec2, Vec3, Vec4};
