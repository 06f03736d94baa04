//! Well-formedness checks and constraint clamping
//!
//! Constraint violations are corrected, not rejected: geometry is
//! clamped into range with a warning that carries the attempted and
//! corrected values. Only structurally broken modules (non-finite
//! geometry) are dropped, and only from batch operations.

use campkit_core::constants::MAX_Z_INDEX;
use campkit_core::geometry::MapBounds;
use campkit_core::transform;

use crate::model::Module;

/// True when every geometric field holds a finite number.
pub fn is_well_formed(module: &Module) -> bool {
    module.position.is_finite() && module.size.is_finite() && module.rotation.is_finite()
}

/// Clamp a module's geometry into the allowed ranges, in place.
///
/// Order matters: the size is settled first so the position clamp sees
/// the final extent. Returns true when anything was corrected.
pub fn clamp_geometry(module: &mut Module, bounds: MapBounds) -> bool {
    let mut corrected = false;

    let size = transform::clamp_size(module.size);
    if size != module.size {
        tracing::warn!(
            module = %module.id,
            attempted = ?module.size,
            corrected = ?size,
            "Module size out of range, clamped"
        );
        module.size = size;
        corrected = true;
    }

    let rotation = transform::normalize_rotation(module.rotation);
    if rotation != module.rotation {
        tracing::warn!(
            module = %module.id,
            attempted = module.rotation,
            corrected = rotation,
            "Module rotation out of range, normalized"
        );
        module.rotation = rotation;
        corrected = true;
    }

    if module.z_index > MAX_Z_INDEX {
        tracing::warn!(
            module = %module.id,
            attempted = module.z_index,
            corrected = MAX_Z_INDEX,
            "Module z-index out of range, clamped"
        );
        module.z_index = MAX_Z_INDEX;
        corrected = true;
    }

    let position = transform::clamp_to_bounds(module.position, module.size, bounds);
    if position != module.position {
        tracing::warn!(
            module = %module.id,
            attempted = ?module.position,
            corrected = ?position,
            "Module position outside bounds, clamped"
        );
        module.position = position;
        corrected = true;
    }

    corrected
}

/// Drop malformed modules from a batch, keeping the rest.
///
/// Returns the surviving modules and how many were dropped. Each drop
/// is logged as an error with the module id.
pub fn sanitize_batch(modules: Vec<Module>) -> (Vec<Module>, usize) {
    let total = modules.len();
    let kept: Vec<Module> = modules
        .into_iter()
        .filter(|module| {
            if is_well_formed(module) {
                true
            } else {
                tracing::error!(
                    module = %module.id,
                    kind = %module.kind,
                    "Dropping malformed module from batch"
                );
                false
            }
        })
        .collect();
    let dropped = total - kept.len();
    (kept, dropped)
}
