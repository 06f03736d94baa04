//! # Campkit Core
//!
//! Core types and math for the Campkit map-editing engine.
//! Provides the plan-space geometry primitives, the pure transform
//! functions (snapping, rotation, clamping, group scaling), and the
//! shared error types.

pub mod constants;
pub mod error;
pub mod geometry;
pub mod transform;

pub use error::{CommandError, Error, MapError, Result};

pub use geometry::{MapBounds, Point, Rect, Size};

// Re-export the transform entry points for convenience
pub use transform::{
    bounding_box, bounding_box_of, clamp_size, clamp_to_bounds, enforce_min_size,
    normalize_rotation, rotate_point, rotation_from_pointer, snap_rotation, snap_to_grid,
    snap_value, ScaleTranslate,
};
