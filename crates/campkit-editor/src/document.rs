//! The map document: one campsite plan and its placed modules

use campkit_core::geometry::{MapBounds, Size};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::model::Module;

fn default_scale() -> f64 {
    1.0
}

fn default_image_size() -> Size {
    Size::new(2000.0, 2000.0)
}

/// A campsite plan document.
///
/// `modules` keeps insertion order; paint order is resolved at query
/// time by sorting on `z_index` (ties break by insertion order). The
/// wire form uses camelCase keys and ISO-8601 dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapDocument {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Pixel size of the background plan image.
    #[serde(default = "default_image_size")]
    pub image_size: Size,
    /// Plan units per meter, for display only.
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default)]
    pub bounds: MapBounds,
    #[serde(default)]
    pub modules: Vec<Module>,
    /// Document fields the engine does not interpret.
    #[serde(default)]
    pub metadata: Map<String, Value>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl MapDocument {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            image_size: default_image_size(),
            scale: 1.0,
            bounds: MapBounds::default(),
            modules: Vec::new(),
            metadata: Map::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Default for MapDocument {
    fn default() -> Self {
        Self::new("Untitled Map")
    }
}
