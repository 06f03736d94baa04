//! # Campkit
//!
//! A map-editing engine for campsite and RV-park plans: placed
//! amenity modules, selection and clipboard, grid-snapped move,
//! resize, and rotate gestures, and reversible editing with bounded
//! undo.
//!
//! ## Architecture
//!
//! Campkit is organized as a workspace with multiple crates:
//!
//! 1. **campkit-core** - Geometry primitives, transform math, shared errors
//! 2. **campkit-editor** - Module store, selection, commands, gestures, viewport
//! 3. **campkit** - This facade, re-exporting the public surface
//!
//! ## Features
//!
//! - **Typed Modules**: Campsites, toilets, roads, hookups, and more
//! - **Gesture Editing**: Drag, resize, and rotate with live feedback
//! - **Grid Snapping**: Configurable grid and rotation snap
//! - **Reversible Edits**: Every change undoes bit-for-bit, bounded history
//! - **Plan Persistence**: Forgiving JSON load, exact save round-trips
//! - **Headless Core**: No rendering, windowing, or I/O assumptions

pub use campkit_core::{constants, geometry, transform};
pub use campkit_editor as editor;

pub use campkit_core::{
    CommandError, Error, MapBounds, MapError, Point, Rect, Result, ScaleTranslate, Size,
};

pub use campkit_editor::{
    resolve_shortcut, Alignment, Clipboard, CommandHistory, EditorAction, EditorCommand,
    EditorSettings, InteractionState, Key, KeyInput, MapDocument, MapEditor, MapStore, Module,
    ModuleChanges, ModuleKind, ModuleMetadata, PointerModifiers, ResizeHandle, SelectionManager,
    Tool, ViewportController,
};

pub use campkit_editor::serialization::{from_json, load_from_file, save_to_file, to_json};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
/// - UTC timestamps
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
        assert!(!BUILD_DATE.is_empty());
    }

    #[test]
    fn test_facade_round_trip() {
        let mut editor = MapEditor::new();
        let id = editor
            .place_module(ModuleKind::Campsite, Point::new(100.0, 100.0))
            .unwrap();

        let json = to_json(editor.store().document()).unwrap();
        let doc = from_json(&json).unwrap();
        assert!(doc.modules.iter().any(|m| m.id == id));
    }
}
