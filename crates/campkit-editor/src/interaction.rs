//! Gesture state machine for pointer-driven transforms
//!
//! A gesture owns the pre-gesture snapshot of every module it touches.
//! The snapshot is captured before the first snap or clamp is applied,
//! which is what makes the eventual undo return modules to their exact
//! starting geometry rather than to an already-snapped position.
//!
//! During a gesture the editor writes candidate geometry straight into
//! the store (live, uncommitted, no timestamps); when the gesture ends
//! the snapshot is diffed against the live state and collapsed into at
//! most one command. Cancelling writes the snapshot back and commits
//! nothing.

use campkit_core::geometry::{MapBounds, Point, Rect, Size};
use campkit_core::transform::{
    clamp_size, clamp_to_bounds, rotation_from_pointer, snap_to_grid, ScaleTranslate,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::commands::{
    EditorCommand, MoveEntry, MoveModules, ResizeEntry, ResizeModules, RotateModule,
};
use crate::model::Module;
use crate::store::MapStore;

/// Corner being dragged during a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeHandle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeHandle {
    /// The corner this handle moves and the opposite, fixed corner.
    fn moved_and_fixed(&self, rect: Rect) -> (Point, Point) {
        let tl = Point::new(rect.min_x(), rect.min_y());
        let tr = Point::new(rect.max_x(), rect.min_y());
        let bl = Point::new(rect.min_x(), rect.max_y());
        let br = Point::new(rect.max_x(), rect.max_y());
        match self {
            ResizeHandle::TopLeft => (tl, br),
            ResizeHandle::TopRight => (tr, bl),
            ResizeHandle::BottomLeft => (bl, tr),
            ResizeHandle::BottomRight => (br, tl),
        }
    }

    /// Selection box after dragging this handle by (dx, dy).
    ///
    /// The moved corner optionally snaps to the grid; the opposite
    /// corner stays fixed. Crossing over the fixed corner flips the
    /// box rather than producing a negative extent.
    pub fn resize_box(&self, start: Rect, dx: f64, dy: f64, grid: Option<f64>) -> Rect {
        let (moved, fixed) = self.moved_and_fixed(start);
        let mut moved = moved.offset(dx, dy);
        if let Some(grid) = grid {
            moved = snap_to_grid(moved, grid);
        }
        Rect::from_corners(moved, fixed)
    }
}

/// Pre-gesture geometry of one module.
#[derive(Debug, Clone)]
pub struct CapturedModule {
    pub id: Uuid,
    pub position: Point,
    pub size: Size,
    pub rotation: f64,
    pub updated_at: DateTime<Utc>,
}

impl CapturedModule {
    pub fn of(module: &Module) -> Self {
        Self {
            id: module.id,
            position: module.position,
            size: module.size,
            rotation: module.rotation,
            updated_at: module.updated_at,
        }
    }

    /// Write the captured geometry back (gesture cancel).
    pub(crate) fn restore(&self, store: &mut MapStore) {
        if let Some(module) = store.module_mut(self.id) {
            module.position = self.position;
            module.size = self.size;
            module.rotation = self.rotation;
        }
    }
}

/// An in-flight move of the selected modules.
#[derive(Debug, Clone)]
pub struct DragGesture {
    /// Plane point where the pointer went down.
    pub origin: Point,
    pub start: Vec<CapturedModule>,
}

impl DragGesture {
    /// Candidate positions for the current pointer location.
    ///
    /// The first captured module anchors grid snapping: its snapped
    /// position defines the shared delta, so a group keeps its internal
    /// layout. Every member is then clamped to the bounds on its own.
    pub fn target_positions(
        &self,
        pointer: Point,
        grid: Option<f64>,
        bounds: MapBounds,
    ) -> Vec<(Uuid, Point)> {
        let mut dx = pointer.x - self.origin.x;
        let mut dy = pointer.y - self.origin.y;
        if let (Some(grid), Some(anchor)) = (grid, self.start.first()) {
            let snapped = snap_to_grid(anchor.position.offset(dx, dy), grid);
            dx = snapped.x - anchor.position.x;
            dy = snapped.y - anchor.position.y;
        }
        self.start
            .iter()
            .map(|captured| {
                let candidate = captured.position.offset(dx, dy);
                (
                    captured.id,
                    clamp_to_bounds(candidate, captured.size, bounds),
                )
            })
            .collect()
    }

    /// Collapse the gesture into one command, diffing the snapshot
    /// against the final live state. `None` when nothing moved.
    pub fn to_command(&self, store: &MapStore) -> Option<EditorCommand> {
        let entries: Vec<MoveEntry> = self
            .start
            .iter()
            .filter_map(|captured| {
                let live = store.module(captured.id)?;
                if live.position == captured.position {
                    return None;
                }
                Some(MoveEntry {
                    id: captured.id,
                    old_position: captured.position,
                    new_position: live.position,
                    old_updated_at: captured.updated_at,
                })
            })
            .collect();
        if entries.is_empty() {
            return None;
        }
        Some(EditorCommand::Move(MoveModules {
            entries,
            stamp: Utc::now(),
        }))
    }
}

/// An in-flight resize of the selection box.
#[derive(Debug, Clone)]
pub struct ResizeGesture {
    pub handle: ResizeHandle,
    /// Plane point where the pointer went down.
    pub origin: Point,
    /// Selection box (unrotated rects) at gesture start.
    pub start_box: Rect,
    pub start: Vec<CapturedModule>,
}

impl ResizeGesture {
    /// Candidate rectangles for the current pointer location.
    ///
    /// The transform that maps the starting selection box onto the
    /// dragged box is applied to every member, then each member is
    /// clamped to the size limits and the bounds independently.
    pub fn target_rects(
        &self,
        pointer: Point,
        grid: Option<f64>,
        bounds: MapBounds,
    ) -> Vec<(Uuid, Point, Size)> {
        let dx = pointer.x - self.origin.x;
        let dy = pointer.y - self.origin.y;
        let new_box = self.handle.resize_box(self.start_box, dx, dy, grid);
        let transform = ScaleTranslate::between(&self.start_box, &new_box);

        self.start
            .iter()
            .map(|captured| {
                let rect =
                    transform.apply_rect(Rect::from_point_size(captured.position, captured.size));
                let size = clamp_size(rect.size());
                let position = clamp_to_bounds(rect.position(), size, bounds);
                (captured.id, position, size)
            })
            .collect()
    }

    /// Collapse the gesture into one command. `None` when no module
    /// changed its rectangle.
    pub fn to_command(&self, store: &MapStore) -> Option<EditorCommand> {
        let entries: Vec<ResizeEntry> = self
            .start
            .iter()
            .filter_map(|captured| {
                let live = store.module(captured.id)?;
                if live.position == captured.position && live.size == captured.size {
                    return None;
                }
                Some(ResizeEntry {
                    id: captured.id,
                    old_position: captured.position,
                    old_size: captured.size,
                    new_position: live.position,
                    new_size: live.size,
                    old_updated_at: captured.updated_at,
                })
            })
            .collect();
        if entries.is_empty() {
            return None;
        }
        Some(EditorCommand::Resize(ResizeModules {
            entries,
            stamp: Utc::now(),
        }))
    }
}

/// An in-flight rotation of a single module.
#[derive(Debug, Clone)]
pub struct RotateGesture {
    pub id: Uuid,
    /// Pivot, fixed at gesture start (module center).
    pub center: Point,
    pub start: CapturedModule,
}

impl RotateGesture {
    /// Rotation implied by the current pointer location.
    pub fn target_rotation(&self, pointer: Point, snap_angle: Option<f64>) -> f64 {
        rotation_from_pointer(self.center, pointer, snap_angle)
    }

    /// Collapse the gesture into one command. `None` when the rotation
    /// ends where it started.
    pub fn to_command(&self, store: &MapStore) -> Option<EditorCommand> {
        let live = store.module(self.id)?;
        if live.rotation == self.start.rotation {
            return None;
        }
        Some(EditorCommand::Rotate(RotateModule {
            id: self.id,
            old_rotation: self.start.rotation,
            new_rotation: live.rotation,
            old_updated_at: self.start.updated_at,
            stamp: Utc::now(),
        }))
    }
}

/// What the pointer is currently doing.
///
/// Dragging, resizing, and rotating mutate module geometry and commit
/// a command on completion; panning only moves the viewport and leaves
/// no trace in history.
#[derive(Debug, Clone, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging(DragGesture),
    Resizing(ResizeGesture),
    Rotating(RotateGesture),
    Panning {
        /// Last screen point, for incremental pan deltas.
        last: Point,
    },
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }

    /// Ids of modules with uncommitted live geometry.
    pub fn active_ids(&self) -> Vec<Uuid> {
        match self {
            InteractionState::Dragging(g) => g.start.iter().map(|c| c.id).collect(),
            InteractionState::Resizing(g) => g.start.iter().map(|c| c.id).collect(),
            InteractionState::Rotating(g) => vec![g.id],
            InteractionState::Idle | InteractionState::Panning { .. } => Vec::new(),
        }
    }
}
