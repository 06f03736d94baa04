//! The module entity: one placed amenity on the plan

use campkit_core::geometry::{Point, Rect, Size};
use campkit_core::transform;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ModuleKind, ModuleMetadata};

fn default_visible() -> bool {
    true
}

/// A placed amenity on the campsite plan.
///
/// `position` is the top-left corner of the unrotated rectangle in
/// plan units; `rotation` turns the rectangle clockwise around its
/// center without moving `position`. The id never changes once the
/// module exists, including across undo/redo of its deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: ModuleKind,
    pub position: Point,
    pub size: Size,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub z_index: u32,
    #[serde(default)]
    pub locked: bool,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub metadata: ModuleMetadata,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Module {
    /// Create a module of the given kind with its default footprint.
    pub fn new(kind: ModuleKind, position: Point) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            kind,
            position,
            size: kind.default_size(),
            rotation: 0.0,
            z_index: 0,
            locked: false,
            visible: true,
            metadata: ModuleMetadata::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// The unrotated rectangle this module occupies.
    pub fn rect(&self) -> Rect {
        Rect::from_point_size(self.position, self.size)
    }

    /// Axis-aligned box covering the module at its current rotation.
    pub fn bounding_box(&self) -> Rect {
        transform::bounding_box(self.rect(), self.rotation)
    }

    /// Label shown on the plan; falls back to the kind name.
    pub fn label(&self) -> &str {
        if self.metadata.name.is_empty() {
            self.kind.display_name()
        } else {
            &self.metadata.name
        }
    }
}

/// A sparse patch over a module's mutable fields.
///
/// `None` fields are left untouched when the patch is applied. Update
/// commands carry a forward and a reverse patch built over the same
/// fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleChanges {
    pub position: Option<Point>,
    pub size: Option<Size>,
    pub rotation: Option<f64>,
    pub z_index: Option<u32>,
    pub locked: Option<bool>,
    pub visible: Option<bool>,
    pub metadata: Option<ModuleMetadata>,
}

impl ModuleChanges {
    pub fn is_empty(&self) -> bool {
        self.position.is_none()
            && self.size.is_none()
            && self.rotation.is_none()
            && self.z_index.is_none()
            && self.locked.is_none()
            && self.visible.is_none()
            && self.metadata.is_none()
    }

    /// Write every provided field onto the module verbatim.
    pub fn apply_to(&self, module: &mut Module) {
        if let Some(position) = self.position {
            module.position = position;
        }
        if let Some(size) = self.size {
            module.size = size;
        }
        if let Some(rotation) = self.rotation {
            module.rotation = rotation;
        }
        if let Some(z_index) = self.z_index {
            module.z_index = z_index;
        }
        if let Some(locked) = self.locked {
            module.locked = locked;
        }
        if let Some(visible) = self.visible {
            module.visible = visible;
        }
        if let Some(metadata) = &self.metadata {
            module.metadata = metadata.clone();
        }
    }

    /// Snapshot the module's current values for exactly the fields this
    /// patch sets. Applying the result reverses `apply_to`.
    pub fn capture_from(&self, module: &Module) -> ModuleChanges {
        ModuleChanges {
            position: self.position.map(|_| module.position),
            size: self.size.map(|_| module.size),
            rotation: self.rotation.map(|_| module.rotation),
            z_index: self.z_index.map(|_| module.z_index),
            locked: self.locked.map(|_| module.locked),
            visible: self.visible.map(|_| module.visible),
            metadata: self.metadata.as_ref().map(|_| module.metadata.clone()),
        }
    }
}
