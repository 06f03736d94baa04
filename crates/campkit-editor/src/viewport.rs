//! Viewport and coordinate transformation for map rendering
//!
//! Handles conversion between screen coordinates (renderer pixels) and
//! plane coordinates (plan units). Both spaces have the origin at the
//! top-left with y pointing down, so the mapping is pure zoom and pan:
//!
//! ```text
//! screen = plane * zoom + pan
//! plane  = (screen - pan) / zoom
//! ```
//!
//! The controller knows nothing about modules or the screen size; the
//! renderer passes its size where one is needed.

use std::fmt;

use campkit_core::constants::{FIT_SCREEN_FACTOR, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};
use campkit_core::geometry::{Point, Size};

/// The viewport transformation state (zoom and pan).
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportController {
    zoom: f64,
    pan: Point,
}

impl ViewportController {
    pub fn new() -> Self {
        Self {
            zoom: 1.0,
            pan: Point::ZERO,
        }
    }

    /// Current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Current pan offset in screen units.
    pub fn pan(&self) -> Point {
        self.pan
    }

    /// Set the zoom level, clamped to [0.1, 5.0].
    ///
    /// When `around` is given (a screen point, typically the cursor),
    /// the pan is adjusted so the plane point under it stays under it:
    ///
    /// ```text
    /// pan' = around - (around - pan) * (zoom' / zoom)
    /// ```
    pub fn set_zoom(&mut self, zoom: f64, around: Option<Point>) {
        let new_zoom = if zoom.is_finite() {
            zoom.clamp(MIN_ZOOM, MAX_ZOOM)
        } else {
            self.zoom
        };
        if let Some(pivot) = around {
            let ratio = new_zoom / self.zoom;
            self.pan = Point::new(
                pivot.x - (pivot.x - self.pan.x) * ratio,
                pivot.y - (pivot.y - self.pan.y) * ratio,
            );
        }
        self.zoom = new_zoom;
    }

    /// Zoom in one step (x1.2), keeping the pan fixed.
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * ZOOM_STEP, None);
    }

    /// Zoom out one step (/1.2), keeping the pan fixed.
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / ZOOM_STEP, None);
    }

    /// Zoom in one step keeping the given screen point fixed.
    pub fn zoom_in_at(&mut self, screen: Point) {
        self.set_zoom(self.zoom * ZOOM_STEP, Some(screen));
    }

    /// Zoom out one step keeping the given screen point fixed.
    pub fn zoom_out_at(&mut self, screen: Point) {
        self.set_zoom(self.zoom / ZOOM_STEP, Some(screen));
    }

    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan = Point::new(x, y);
    }

    /// Pan by a delta in screen units.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan = self.pan.offset(dx, dy);
    }

    /// Convert a screen point to plane coordinates.
    pub fn screen_to_plane(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.pan.x) / self.zoom,
            (screen.y - self.pan.y) / self.zoom,
        )
    }

    /// Convert a plane point to screen coordinates.
    pub fn plane_to_screen(&self, plane: Point) -> Point {
        Point::new(
            plane.x * self.zoom + self.pan.x,
            plane.y * self.zoom + self.pan.y,
        )
    }

    /// Frame the whole plan in the given screen area.
    ///
    /// Picks the largest zoom that still shows everything, scaled by 0.9
    /// to leave a border, clamps it to the zoom range, and centers the
    /// plan.
    pub fn fit_to_screen(&mut self, map_size: Size, screen_size: Size) {
        if map_size.width <= 0.0
            || map_size.height <= 0.0
            || screen_size.width <= 0.0
            || screen_size.height <= 0.0
        {
            return;
        }
        let zoom_x = screen_size.width / map_size.width;
        let zoom_y = screen_size.height / map_size.height;
        let zoom = (zoom_x.min(zoom_y) * FIT_SCREEN_FACTOR).clamp(MIN_ZOOM, MAX_ZOOM);

        self.zoom = zoom;
        self.pan = Point::new(
            (screen_size.width - map_size.width * zoom) / 2.0,
            (screen_size.height - map_size.height * zoom) / 2.0,
        );
    }

    /// Reset to 1:1 zoom at the origin.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan = Point::ZERO;
    }
}

impl fmt::Display for ViewportController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Pan: ({:.1}, {:.1})",
            self.zoom, self.pan.x, self.pan.y
        )
    }
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new()
    }
}
