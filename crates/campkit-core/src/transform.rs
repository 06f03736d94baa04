//! Pure transform math for the map editor
//!
//! Every function here is total: out-of-range or non-finite input is
//! corrected, never panicked on. Angles are degrees measured clockwise
//! from the upward vertical (plan space has y pointing down, so the
//! standard rotation formula already turns clockwise on screen).
//! Rotation does not move a module's position; the stored rectangle
//! stays axis-aligned and rotation is applied around its center.

use crate::constants::{MAX_MODULE_SIZE, MIN_MODULE_SIZE};
use crate::geometry::{MapBounds, Point, Rect, Size};

/// Snap a single value to the nearest multiple of `step`.
///
/// Returns the value unchanged when `step` is zero, negative, or not
/// finite.
pub fn snap_value(value: f64, step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 || !value.is_finite() {
        return value;
    }
    (value / step).round() * step
}

/// Snap a point to the nearest grid intersection.
///
/// Each coordinate snaps independently, so a point can move diagonally
/// to reach the grid. A non-positive grid size disables snapping.
pub fn snap_to_grid(point: Point, grid_size: f64) -> Point {
    Point::new(snap_value(point.x, grid_size), snap_value(point.y, grid_size))
}

/// Normalize an angle in degrees to the range [0, 360).
///
/// Non-finite input normalizes to 0.
pub fn normalize_rotation(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let normalized = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negatives.
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Snap an angle to the nearest multiple of `increment` degrees.
///
/// The result is normalized to [0, 360). A non-positive increment
/// disables snapping (the angle is still normalized).
pub fn snap_rotation(degrees: f64, increment: f64) -> f64 {
    normalize_rotation(snap_value(degrees, increment))
}

/// Rotation implied by a pointer position during a rotate gesture.
///
/// The angle is measured at `center`, clockwise, with 0 degrees
/// pointing straight up: a pointer directly above the center yields 0,
/// directly to the right yields 90. `snap_angle` rounds the result to
/// the nearest multiple when given. A pointer exactly on the center is
/// degenerate and yields 0.
pub fn rotation_from_pointer(center: Point, pointer: Point, snap_angle: Option<f64>) -> f64 {
    let dx = pointer.x - center.x;
    let dy = pointer.y - center.y;
    if !dx.is_finite() || !dy.is_finite() || (dx == 0.0 && dy == 0.0) {
        return 0.0;
    }
    let degrees = dx.atan2(-dy).to_degrees();
    match snap_angle {
        Some(step) => snap_rotation(degrees, step),
        None => normalize_rotation(degrees),
    }
}

/// Rotate a point around a center, clockwise in plan space.
pub fn rotate_point(point: Point, center: Point, degrees: f64) -> Point {
    let radians = degrees.to_radians();
    let (sin, cos) = radians.sin_cos();
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    Point::new(
        center.x + dx * cos - dy * sin,
        center.y + dx * sin + dy * cos,
    )
}

/// Axis-aligned bounding box of a rectangle rotated around its center.
///
/// Rotation of 0 (after normalization) returns the rectangle as-is.
/// Otherwise the four corners are rotated and re-boxed, which
/// intentionally yields loose bounds for non-cardinal angles; hit
/// testing and fit-to-screen both want the covering box, not the tight
/// polygon.
pub fn bounding_box(rect: Rect, rotation_degrees: f64) -> Rect {
    let rotation = normalize_rotation(rotation_degrees);
    if rotation == 0.0 {
        return rect;
    }
    let center = rect.center();
    let corners = rect.corners();
    let mut min_x = f64::MAX;
    let mut min_y = f64::MAX;
    let mut max_x = f64::MIN;
    let mut max_y = f64::MIN;
    for corner in corners {
        let rotated = rotate_point(corner, center, rotation);
        min_x = min_x.min(rotated.x);
        min_y = min_y.min(rotated.y);
        max_x = max_x.max(rotated.x);
        max_y = max_y.max(rotated.y);
    }
    Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
}

/// Combined axis-aligned bounding box over many rotated rectangles.
///
/// Returns `None` for an empty input. Used for selection boxes and
/// fit-to-screen framing.
pub fn bounding_box_of<I>(items: I) -> Option<Rect>
where
    I: IntoIterator<Item = (Rect, f64)>,
{
    items
        .into_iter()
        .map(|(rect, rotation)| bounding_box(rect, rotation))
        .reduce(|acc, next| acc.union(&next))
}

/// Raise a module's edge lengths to at least the minimum size.
///
/// Non-finite extents collapse to the minimum, so the result is always
/// a usable rectangle.
pub fn enforce_min_size(size: Size) -> Size {
    Size::new(
        size.width.max(MIN_MODULE_SIZE),
        size.height.max(MIN_MODULE_SIZE),
    )
}

/// Clamp a module's edge lengths to the allowed range (floor and
/// ceiling).
pub fn clamp_size(size: Size) -> Size {
    let size = enforce_min_size(size);
    Size::new(
        size.width.min(MAX_MODULE_SIZE),
        size.height.min(MAX_MODULE_SIZE),
    )
}

/// Clamp a module position so its unrotated rectangle stays in bounds.
///
/// A module larger than the bounds on an axis is pinned to the minimum
/// corner of that axis. The rotated silhouette may still poke outside;
/// only the stored rectangle is constrained.
pub fn clamp_to_bounds(position: Point, size: Size, bounds: MapBounds) -> Point {
    let max_x = (bounds.max_x - size.width).max(bounds.min_x);
    let max_y = (bounds.max_y - size.height).max(bounds.min_y);
    let x = if position.x.is_finite() {
        position.x.max(bounds.min_x).min(max_x)
    } else {
        bounds.min_x
    };
    let y = if position.y.is_finite() {
        position.y.max(bounds.min_y).min(max_y)
    } else {
        bounds.min_y
    };
    Point::new(x, y)
}

/// Affine scale-and-translate mapping one selection box onto another.
///
/// Group resize is expressed with one of these: the transform that
/// carries the gesture's starting selection box onto the current box
/// is applied to every member rectangle independently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleTranslate {
    pub sx: f64,
    pub sy: f64,
    pub tx: f64,
    pub ty: f64,
}

impl ScaleTranslate {
    /// Identity transform
    pub const IDENTITY: ScaleTranslate = ScaleTranslate {
        sx: 1.0,
        sy: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    /// Transform carrying `old` onto `new`.
    ///
    /// A degenerate `old` axis (zero width or height) keeps scale 1 on
    /// that axis and translates by the corner difference instead.
    pub fn between(old: &Rect, new: &Rect) -> ScaleTranslate {
        let sx = if old.width.abs() > f64::EPSILON {
            new.width / old.width
        } else {
            1.0
        };
        let sy = if old.height.abs() > f64::EPSILON {
            new.height / old.height
        } else {
            1.0
        };
        ScaleTranslate {
            sx,
            sy,
            tx: new.x - old.x * sx,
            ty: new.y - old.y * sy,
        }
    }

    pub fn apply_point(&self, point: Point) -> Point {
        Point::new(point.x * self.sx + self.tx, point.y * self.sy + self.ty)
    }

    /// Apply to a rectangle, keeping width/height positive.
    pub fn apply_rect(&self, rect: Rect) -> Rect {
        let a = self.apply_point(rect.position());
        let b = self.apply_point(Point::new(rect.max_x(), rect.max_y()));
        Rect::new(
            a.x.min(b.x),
            a.y.min(b.y),
            (b.x - a.x).abs(),
            (b.y - a.y).abs(),
        )
    }
}
