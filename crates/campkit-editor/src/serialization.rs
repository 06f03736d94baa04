//! Save and load for map documents
//!
//! The wire form is the `MapDocument` itself: camelCase JSON with
//! ISO-8601 dates. Loading is resilient: malformed modules are dropped,
//! out-of-range geometry is clamped, duplicate ids are deduplicated,
//! all with logging, and a clean document round-trips unchanged.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use campkit_core::geometry::MapBounds;

use crate::document::MapDocument;
use crate::validation;

/// Serialize a document to pretty-printed JSON.
pub fn to_json(document: &MapDocument) -> Result<String> {
    serde_json::to_string_pretty(document).context("Failed to serialize map document")
}

/// Parse a document from JSON and sanitize its content.
///
/// Structural errors (not JSON, missing id) fail; bad content inside a
/// well-formed document is corrected instead: invalid bounds fall back
/// to the default, malformed modules and duplicate ids are dropped,
/// out-of-range geometry is clamped.
pub fn from_json(json: &str) -> Result<MapDocument> {
    let mut document: MapDocument =
        serde_json::from_str(json).context("Failed to parse map document")?;

    if !document.bounds.is_valid() {
        tracing::warn!(
            attempted = ?document.bounds,
            "Invalid bounds in loaded document, using default"
        );
        document.bounds = MapBounds::default();
    }

    let modules = std::mem::take(&mut document.modules);
    let total = modules.len();
    let (mut kept, dropped) = validation::sanitize_batch(modules);
    if dropped > 0 {
        tracing::warn!(dropped, total, "Load dropped malformed modules");
    }

    let mut seen = HashSet::with_capacity(kept.len());
    kept.retain(|module| {
        if seen.insert(module.id) {
            true
        } else {
            tracing::warn!(module = %module.id, "Load dropped module with duplicate id");
            false
        }
    });

    for module in &mut kept {
        validation::clamp_geometry(module, document.bounds);
    }
    document.modules = kept;
    Ok(document)
}

/// Save a document to a JSON file.
pub fn save_to_file(document: &MapDocument, path: impl AsRef<Path>) -> Result<()> {
    let json = to_json(document)?;
    std::fs::write(path.as_ref(), json).context("Failed to write map file")?;
    Ok(())
}

/// Load and sanitize a document from a JSON file.
pub fn load_from_file(path: impl AsRef<Path>) -> Result<MapDocument> {
    let content = std::fs::read_to_string(path.as_ref()).context("Failed to read map file")?;
    from_json(&content)
}
