//! Module metadata bag
//!
//! The engine only understands the `name` field; everything else
//! (pricing, capacity, hookup details) belongs to outer layers and is
//! carried through opaquely so round-trips never lose data.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Metadata attached to a module.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleMetadata {
    /// Display label; empty means "use the kind's name".
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Fields the engine does not interpret, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ModuleMetadata {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: Map::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.extra.is_empty()
    }
}
