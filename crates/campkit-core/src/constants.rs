//! Engine-wide constants
//!
//! Shared limits and defaults for the map-editing engine. All lengths
//! are in plan units (the map's own coordinate space), angles are in
//! degrees, and zoom is a unitless scale factor.

/// Smallest edge length a module may have, in plan units.
pub const MIN_MODULE_SIZE: f64 = 20.0;

/// Largest edge length a module may have, in plan units.
pub const MAX_MODULE_SIZE: f64 = 10_000.0;

/// Highest paint-order index a module may carry.
pub const MAX_Z_INDEX: u32 = 1000;

/// Lower zoom bound (10%).
pub const MIN_ZOOM: f64 = 0.1;

/// Upper zoom bound (500%).
pub const MAX_ZOOM: f64 = 5.0;

/// Multiplier applied per zoom-in step; zoom-out divides by it.
pub const ZOOM_STEP: f64 = 1.2;

/// Margin factor used by fit-to-screen so the plan keeps a border.
pub const FIT_SCREEN_FACTOR: f64 = 0.9;

/// Maximum number of commands retained on the undo stack.
pub const HISTORY_LIMIT: usize = 50;

/// Offset applied to pasted and duplicated modules, in plan units.
pub const PASTE_OFFSET: f64 = 20.0;

/// Default grid spacing, in plan units.
pub const DEFAULT_GRID_SIZE: f64 = 20.0;

/// Default rotation snap increment, in degrees.
pub const DEFAULT_ROTATION_SNAP: f64 = 15.0;

/// Arrow-key nudge distance, in plan units.
pub const NUDGE_STEP: f64 = 1.0;

/// Arrow-key nudge distance with Shift held, in plan units.
pub const NUDGE_STEP_LARGE: f64 = 10.0;
