//! # Campkit Editor
//!
//! The map-editing engine for campsite plans. It owns the placed
//! modules of an open plan and gives a rendering surface everything it
//! needs to select, move, resize, rotate, copy and place them, with
//! grid snapping, boundary enforcement, and bounded undo/redo.
//!
//! ## Core Components
//!
//! - **Model**: the `Module` entity, its kind and metadata
//! - **Store**: the open `MapDocument` plus dirty tracking
//! - **Viewport**: screen/plane mapping (zoom and pan)
//! - **Selection & Clipboard**: id-set selection, value-semantics copy
//! - **Commands & History**: reversible edits on bounded undo/redo stacks
//! - **Interaction**: the drag/resize/rotate gesture state machine
//! - **Editor**: the per-map facade a UI talks to
//!
//! ## Architecture
//!
//! ```text
//! MapEditor (facade)
//!   ├── MapStore (document + modules + dirty flag)
//!   ├── SelectionManager / Clipboard
//!   ├── CommandHistory (undo/redo of EditorCommand)
//!   ├── InteractionState (live gestures, committed on release)
//!   ├── ViewportController (screen <-> plane)
//!   └── EditorSettings (grid, snapping, history limit)
//! ```
//!
//! The engine is single-threaded and event-driven: the host forwards
//! pointer, wheel, and key events and pulls paint-ordered modules back.
//! Nothing here renders, persists on its own, or talks to a network.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use campkit_core::geometry::Point;
//! use campkit_editor::editor::{MapEditor, PointerModifiers};
//! use campkit_editor::model::ModuleKind;
//!
//! let mut editor = MapEditor::new();
//! let id = editor.place_module(ModuleKind::Campsite, Point::new(100.0, 100.0));
//!
//! // Drag it 40 units right: one undo step.
//! editor.pointer_down(id, Point::new(100.0, 100.0), PointerModifiers::default());
//! editor.pointer_move(Point::new(140.0, 100.0));
//! editor.pointer_up(Point::new(140.0, 100.0));
//! assert!(editor.can_undo());
//! ```

pub mod clipboard;
pub mod commands;
pub mod document;
pub mod editor;
pub mod history;
pub mod input;
pub mod interaction;
pub mod model;
pub mod selection;
pub mod serialization;
pub mod settings;
pub mod store;
pub mod validation;
pub mod viewport;

pub use clipboard::Clipboard;
pub use commands::{
    AddModules, EditorCommand, MoveEntry, MoveModules, RemoveModules, ResizeEntry, ResizeModules,
    RotateModule, UpdateModule,
};
pub use document::MapDocument;
pub use editor::{Alignment, MapEditor, PointerModifiers, Tool};
pub use history::CommandHistory;
pub use input::{resolve_shortcut, EditorAction, Key, KeyInput};
pub use interaction::{InteractionState, ResizeHandle};
pub use model::{Module, ModuleChanges, ModuleKind, ModuleMetadata};
pub use selection::SelectionManager;
pub use settings::EditorSettings;
pub use store::MapStore;
pub use viewport::ViewportController;
