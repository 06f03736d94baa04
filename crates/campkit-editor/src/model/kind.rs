//! The closed set of amenity kinds a plan can contain
//!
//! Kind drives the defaults a freshly placed module gets (size, label,
//! icon) and nothing else; geometry and command handling are identical
//! for every kind.

use campkit_core::geometry::Size;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of amenity a module represents on the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleKind {
    Campsite,
    Toilet,
    Storage,
    Building,
    Parking,
    Road,
    WaterSource,
    Electricity,
    WasteDisposal,
    Recreation,
    Custom,
}

impl ModuleKind {
    /// Every kind, in palette order.
    pub const ALL: [ModuleKind; 11] = [
        ModuleKind::Campsite,
        ModuleKind::Toilet,
        ModuleKind::Storage,
        ModuleKind::Building,
        ModuleKind::Parking,
        ModuleKind::Road,
        ModuleKind::WaterSource,
        ModuleKind::Electricity,
        ModuleKind::WasteDisposal,
        ModuleKind::Recreation,
        ModuleKind::Custom,
    ];

    /// Human-readable name shown in palettes and as the default label.
    pub fn display_name(&self) -> &'static str {
        match self {
            ModuleKind::Campsite => "Campsite",
            ModuleKind::Toilet => "Toilet",
            ModuleKind::Storage => "Storage",
            ModuleKind::Building => "Building",
            ModuleKind::Parking => "Parking",
            ModuleKind::Road => "Road",
            ModuleKind::WaterSource => "Water Source",
            ModuleKind::Electricity => "Electricity",
            ModuleKind::WasteDisposal => "Waste Disposal",
            ModuleKind::Recreation => "Recreation",
            ModuleKind::Custom => "Custom",
        }
    }

    /// Icon identifier the rendering surface maps to an asset.
    pub fn icon(&self) -> &'static str {
        match self {
            ModuleKind::Campsite => "tent",
            ModuleKind::Toilet => "bath",
            ModuleKind::Storage => "warehouse",
            ModuleKind::Building => "building",
            ModuleKind::Parking => "car",
            ModuleKind::Road => "route",
            ModuleKind::WaterSource => "droplet",
            ModuleKind::Electricity => "zap",
            ModuleKind::WasteDisposal => "trash",
            ModuleKind::Recreation => "trees",
            ModuleKind::Custom => "shapes",
        }
    }

    /// Footprint a new module of this kind starts with, in plan units.
    pub fn default_size(&self) -> Size {
        match self {
            ModuleKind::Campsite => Size::new(80.0, 60.0),
            ModuleKind::Toilet => Size::new(40.0, 40.0),
            ModuleKind::Storage => Size::new(60.0, 40.0),
            ModuleKind::Building => Size::new(120.0, 80.0),
            ModuleKind::Parking => Size::new(100.0, 60.0),
            ModuleKind::Road => Size::new(200.0, 40.0),
            ModuleKind::WaterSource => Size::new(30.0, 30.0),
            ModuleKind::Electricity => Size::new(30.0, 30.0),
            ModuleKind::WasteDisposal => Size::new(40.0, 40.0),
            ModuleKind::Recreation => Size::new(100.0, 100.0),
            ModuleKind::Custom => Size::new(60.0, 60.0),
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
