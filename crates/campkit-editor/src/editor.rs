//! Editor facade for UI integration
//!
//! One `MapEditor` per open map. It owns the store, selection,
//! clipboard, history, viewport, settings, and the interaction state
//! machine, and exposes the operations a rendering surface needs:
//! pointer and wheel events in, semantic edits (undo, paste, align,
//! nudge) in, paint-ordered modules and selection state out.
//!
//! All methods take `&mut self` and run on the caller's thread; there
//! is no interior mutability and no background work.

use campkit_core::constants::MAX_Z_INDEX;
use campkit_core::geometry::{Point, Rect, Size};
use campkit_core::transform::{bounding_box_of, clamp_to_bounds, snap_to_grid};
use uuid::Uuid;

use crate::clipboard::Clipboard;
use crate::commands::{AddModules, EditorCommand, MoveModules, RemoveModules, UpdateModule};
use crate::document::MapDocument;
use crate::history::CommandHistory;
use crate::input::EditorAction;
use crate::interaction::{
    CapturedModule, DragGesture, InteractionState, ResizeGesture, ResizeHandle, RotateGesture,
};
use crate::model::{Module, ModuleChanges, ModuleKind, ModuleMetadata};
use crate::selection::SelectionManager;
use crate::settings::EditorSettings;
use crate::store::MapStore;
use crate::validation;
use crate::viewport::ViewportController;

/// Active pointer tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Click to select, drag to move
    #[default]
    Select,
    /// Drag to pan the viewport
    Pan,
    /// Click to place a module of this kind
    Place(ModuleKind),
}

/// Modifier keys held during a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerModifiers {
    pub shift: bool,
    /// Ctrl on Windows and Linux, Cmd on macOS.
    pub command: bool,
}

impl PointerModifiers {
    /// Whether the event should toggle rather than replace selection.
    fn additive(&self) -> bool {
        self.shift || self.command
    }
}

/// Edge or center the selection aligns to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    CenterHorizontal,
    Right,
    Top,
    CenterVertical,
    Bottom,
}

/// Per-map editor state and operations.
#[derive(Debug, Clone)]
pub struct MapEditor {
    store: MapStore,
    selection: SelectionManager,
    clipboard: Clipboard,
    history: CommandHistory,
    viewport: ViewportController,
    settings: EditorSettings,
    interaction: InteractionState,
    tool: Tool,
}

impl MapEditor {
    /// An editor over an empty untitled map.
    pub fn new() -> Self {
        Self::from_document(MapDocument::default())
    }

    /// An editor over an existing document.
    pub fn from_document(document: MapDocument) -> Self {
        let settings = EditorSettings::default();
        Self {
            store: MapStore::from_document(document),
            selection: SelectionManager::new(),
            clipboard: Clipboard::new(),
            history: CommandHistory::with_limit(settings.history_limit),
            viewport: ViewportController::new(),
            settings,
            interaction: InteractionState::Idle,
            tool: Tool::Select,
        }
    }

    // -- state access --

    pub fn store(&self) -> &MapStore {
        &self.store
    }

    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut ViewportController {
        &mut self.viewport
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// Replace the settings, rebounding the history if its limit moved.
    pub fn set_settings(&mut self, settings: EditorSettings) {
        self.history.set_limit(settings.history_limit);
        self.settings = settings;
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switch tools. An active gesture is cancelled first.
    pub fn set_tool(&mut self, tool: Tool) {
        if !self.interaction.is_idle() {
            self.cancel_gesture();
        }
        self.tool = tool;
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn is_dirty(&self) -> bool {
        self.store.is_dirty()
    }

    /// Mark the open document saved.
    pub fn mark_clean(&mut self) {
        self.store.mark_clean();
    }

    /// Modules in paint order for the renderer.
    pub fn modules_by_paint_order(&self) -> Vec<&Module> {
        self.store.modules_by_paint_order()
    }

    /// Ids whose geometry is mid-gesture and not yet committed.
    pub fn in_progress_ids(&self) -> Vec<Uuid> {
        self.interaction.active_ids()
    }

    /// Replace the open map.
    ///
    /// History, selection, and any active gesture are dropped; the
    /// clipboard survives so content can be pasted across maps.
    pub fn set_map(&mut self, document: MapDocument) {
        self.interaction = InteractionState::Idle;
        self.history.clear();
        self.selection.clear();
        self.selection.set_hovered(None);
        self.store.set_map(document);
    }

    // -- pointer events --

    /// Pointer pressed over the surface.
    ///
    /// `target` is the topmost module under the pointer (the renderer
    /// hit-tests). Routed by the active tool: Select starts selection
    /// changes and drag gestures, Pan starts a viewport pan, Place
    /// drops a new module.
    pub fn pointer_down(
        &mut self,
        target: Option<Uuid>,
        screen: Point,
        modifiers: PointerModifiers,
    ) {
        if !self.interaction.is_idle() {
            return;
        }
        match self.tool {
            Tool::Pan => {
                self.interaction = InteractionState::Panning { last: screen };
            }
            Tool::Place(kind) => {
                let plane = self.viewport.screen_to_plane(screen);
                self.place_module(kind, plane);
            }
            Tool::Select => self.select_pointer_down(target, screen, modifiers),
        }
    }

    fn select_pointer_down(
        &mut self,
        target: Option<Uuid>,
        screen: Point,
        modifiers: PointerModifiers,
    ) {
        let Some(id) = target else {
            if !modifiers.additive() {
                self.selection.clear();
            }
            return;
        };
        if modifiers.additive() {
            self.selection.toggle(id);
            return;
        }
        if !self.selection.is_selected(id) {
            self.selection.select(&[id], false);
        }
        let Some(clicked) = self.store.module(id) else {
            return;
        };
        if clicked.locked {
            return;
        }
        // The clicked module goes first so it anchors grid snapping.
        let mut start = vec![CapturedModule::of(clicked)];
        start.extend(
            self.selected_in_store_order()
                .into_iter()
                .filter(|m| m.id != id && !m.locked)
                .map(CapturedModule::of),
        );
        self.interaction = InteractionState::Dragging(DragGesture {
            origin: self.viewport.screen_to_plane(screen),
            start,
        });
    }

    /// Pointer moved. Advances whatever gesture is active.
    pub fn pointer_move(&mut self, screen: Point) {
        let plane = self.viewport.screen_to_plane(screen);
        let bounds = self.store.bounds();
        let grid = self.settings.snap_grid();
        match &mut self.interaction {
            InteractionState::Idle => {}
            InteractionState::Panning { last } => {
                let (dx, dy) = (screen.x - last.x, screen.y - last.y);
                *last = screen;
                self.viewport.pan_by(dx, dy);
            }
            InteractionState::Dragging(gesture) => {
                for (id, position) in gesture.target_positions(plane, grid, bounds) {
                    if let Some(module) = self.store.module_mut(id) {
                        module.position = position;
                    }
                }
            }
            InteractionState::Resizing(gesture) => {
                for (id, position, size) in gesture.target_rects(plane, grid, bounds) {
                    if let Some(module) = self.store.module_mut(id) {
                        module.position = position;
                        module.size = size;
                    }
                }
            }
            InteractionState::Rotating(gesture) => {
                let rotation = gesture.target_rotation(plane, self.settings.snap_angle());
                if let Some(module) = self.store.module_mut(gesture.id) {
                    module.rotation = rotation;
                }
            }
        }
    }

    /// Pointer released. Commits the active gesture as one command.
    pub fn pointer_up(&mut self, screen: Point) {
        self.pointer_move(screen);
        let state = std::mem::take(&mut self.interaction);
        let command = match &state {
            InteractionState::Dragging(gesture) => gesture.to_command(&self.store),
            InteractionState::Resizing(gesture) => gesture.to_command(&self.store),
            InteractionState::Rotating(gesture) => gesture.to_command(&self.store),
            InteractionState::Idle | InteractionState::Panning { .. } => None,
        };
        if let Some(command) = command {
            // Failure is logged by the history; live state already
            // matches the command's new side either way.
            let _ = self.history.execute(command, &mut self.store);
        }
        self.selection.prune(&self.store);
    }

    /// Wheel over the surface zooms around the cursor.
    pub fn wheel(&mut self, delta: f64, screen: Point) {
        if delta > 0.0 {
            self.viewport.zoom_in_at(screen);
        } else if delta < 0.0 {
            self.viewport.zoom_out_at(screen);
        }
    }

    // -- gestures --

    /// Start resizing the selection from the given handle.
    ///
    /// Returns false when nothing resizable is selected or a gesture is
    /// already active.
    pub fn begin_resize(&mut self, handle: ResizeHandle, screen: Point) -> bool {
        if !self.interaction.is_idle() {
            return false;
        }
        let members: Vec<&Module> = self
            .selected_in_store_order()
            .into_iter()
            .filter(|m| !m.locked)
            .collect();
        let Some(start_box) =
            bounding_box_of(members.iter().map(|m| (m.rect(), m.rotation)))
        else {
            return false;
        };
        let start = members.into_iter().map(CapturedModule::of).collect();
        self.interaction = InteractionState::Resizing(ResizeGesture {
            handle,
            origin: self.viewport.screen_to_plane(screen),
            start_box,
            start,
        });
        true
    }

    /// Start rotating the primary selected module.
    ///
    /// The pivot is the module center, fixed for the whole gesture;
    /// pointer moves then set the rotation directly, so no start
    /// position is needed.
    pub fn begin_rotate(&mut self) -> bool {
        if !self.interaction.is_idle() {
            return false;
        }
        let Some(module) = self.selection.primary().and_then(|id| self.store.module(id)) else {
            return false;
        };
        if module.locked {
            return false;
        }
        self.interaction = InteractionState::Rotating(RotateGesture {
            id: module.id,
            center: module.rect().center(),
            start: CapturedModule::of(module),
        });
        true
    }

    /// Abort the active gesture, restoring pre-gesture geometry.
    ///
    /// Returns false when no gesture was active. Nothing is pushed to
    /// history.
    pub fn cancel_gesture(&mut self) -> bool {
        let state = std::mem::take(&mut self.interaction);
        match state {
            InteractionState::Idle => false,
            InteractionState::Panning { .. } => true,
            InteractionState::Dragging(gesture) => {
                for captured in &gesture.start {
                    captured.restore(&mut self.store);
                }
                true
            }
            InteractionState::Resizing(gesture) => {
                for captured in &gesture.start {
                    captured.restore(&mut self.store);
                }
                true
            }
            InteractionState::Rotating(gesture) => {
                gesture.start.restore(&mut self.store);
                true
            }
        }
    }

    /// Escape: cancel the active gesture, else clear the selection.
    pub fn escape(&mut self) {
        if !self.cancel_gesture() {
            self.selection.clear();
        }
    }

    // -- semantic edits --

    /// Undo the most recent command.
    pub fn undo_last(&mut self) -> bool {
        let undone = self.history.undo(&mut self.store);
        if undone {
            self.selection.prune(&self.store);
        }
        undone
    }

    /// Re-apply the most recently undone command.
    pub fn redo_last(&mut self) -> bool {
        let redone = self.history.redo(&mut self.store);
        if redone {
            self.selection.prune(&self.store);
        }
        redone
    }

    /// Copy the selection to the clipboard. Returns the copied count.
    pub fn copy_selection(&mut self) -> usize {
        // Field-disjoint borrows: store/selection stay immutable while
        // the clipboard is borrowed mutably.
        let modules: Vec<&Module> = self
            .store
            .modules()
            .iter()
            .filter(|m| self.selection.is_selected(m.id))
            .collect();
        if modules.is_empty() {
            return 0;
        }
        self.clipboard.copy(&modules)
    }

    /// Copy the selection, then remove it with one undoable command.
    ///
    /// Only the modules that made it onto the clipboard are removed, so
    /// a malformed module is never lost to a cut.
    pub fn cut_selection(&mut self) -> usize {
        let copied = self.copy_selection();
        if copied == 0 {
            return 0;
        }
        let ids: Vec<Uuid> = self
            .selected_in_store_order()
            .into_iter()
            .filter(|m| validation::is_well_formed(m))
            .map(|m| m.id)
            .collect();
        let Some(command) = RemoveModules::capture(&self.store, &ids) else {
            return 0;
        };
        if self
            .history
            .execute(EditorCommand::Remove(command), &mut self.store)
            .is_err()
        {
            return 0;
        }
        self.selection.prune(&self.store);
        copied
    }

    /// Paste the clipboard as new modules and select them.
    ///
    /// Returns the new ids; empty when the clipboard is empty (logged,
    /// not an error).
    pub fn paste_clipboard(&mut self) -> Vec<Uuid> {
        match self.clipboard.paste(None) {
            Ok(modules) => self.insert_copies(modules),
            Err(err) => {
                tracing::info!(error = %err, "Paste skipped");
                Vec::new()
            }
        }
    }

    /// Duplicate the selection in place (clipboard untouched).
    pub fn duplicate_selection(&mut self) -> Vec<Uuid> {
        let modules = self.selected_in_store_order();
        if modules.is_empty() {
            return Vec::new();
        }
        match Clipboard::duplicate(&modules, None) {
            Ok(copies) => self.insert_copies(copies),
            Err(err) => {
                tracing::warn!(error = %err, "Duplicate produced no modules");
                Vec::new()
            }
        }
    }

    fn insert_copies(&mut self, mut modules: Vec<Module>) -> Vec<Uuid> {
        let bounds = self.store.bounds();
        for module in &mut modules {
            module.position = clamp_to_bounds(module.position, module.size, bounds);
        }
        let ids: Vec<Uuid> = modules.iter().map(|m| m.id).collect();
        if self
            .history
            .execute(EditorCommand::Add(AddModules::new(modules)), &mut self.store)
            .is_err()
        {
            return Vec::new();
        }
        self.selection.select(&ids, false);
        ids
    }

    /// Delete the selection with one undoable command.
    pub fn delete_selection(&mut self) -> usize {
        let ids: Vec<Uuid> = self
            .selected_in_store_order()
            .into_iter()
            .map(|m| m.id)
            .collect();
        let Some(command) = RemoveModules::capture(&self.store, &ids) else {
            return 0;
        };
        let removed = command.entries.len();
        if self
            .history
            .execute(EditorCommand::Remove(command), &mut self.store)
            .is_err()
        {
            return 0;
        }
        self.selection.prune(&self.store);
        removed
    }

    pub fn select_all(&mut self) {
        self.selection.select_all(&self.store);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Replace or extend the selection from the renderer's hit test.
    pub fn select_modules(&mut self, ids: &[Uuid], additive: bool) {
        self.selection.select(ids, additive);
        self.selection.prune(&self.store);
    }

    pub fn set_hovered(&mut self, id: Option<Uuid>) {
        self.selection.set_hovered(id);
    }

    /// Move the selection by a delta in plan units (arrow keys).
    ///
    /// Skips locked modules; positions clamp to the bounds; no grid
    /// snapping. One command per nudge.
    pub fn nudge_selection(&mut self, dx: f64, dy: f64) -> bool {
        let bounds = self.store.bounds();
        let targets: Vec<(Uuid, Point)> = self
            .selected_in_store_order()
            .into_iter()
            .filter(|m| !m.locked)
            .map(|m| {
                let candidate = m.position.offset(dx, dy);
                (m.id, clamp_to_bounds(candidate, m.size, bounds))
            })
            .collect();
        let Some(command) = MoveModules::capture(&self.store, &targets) else {
            return false;
        };
        self.history
            .execute(EditorCommand::Move(command), &mut self.store)
            .is_ok()
    }

    /// Place a new module of the given kind at a plane point.
    ///
    /// The position snaps to the grid when snapping is on and clamps to
    /// the bounds; the module lands on top of the z order and becomes
    /// the selection.
    pub fn place_module(&mut self, kind: ModuleKind, plane: Point) -> Option<Uuid> {
        let mut module = Module::new(kind, plane);
        if let Some(grid) = self.settings.snap_grid() {
            module.position = snap_to_grid(module.position, grid);
        }
        module.position = clamp_to_bounds(module.position, module.size, self.store.bounds());
        module.z_index = self.store.next_z_index();
        let id = module.id;
        if self
            .history
            .execute(EditorCommand::Add(AddModules::new(vec![module])), &mut self.store)
            .is_err()
        {
            return None;
        }
        self.selection.select(&[id], false);
        Some(id)
    }

    /// Rename a module / replace its metadata (undoable).
    pub fn set_module_metadata(&mut self, id: Uuid, metadata: ModuleMetadata) -> bool {
        self.update_module_fields(
            id,
            ModuleChanges {
                metadata: Some(metadata),
                ..Default::default()
            },
        )
    }

    /// Lock or unlock a module against geometry gestures (undoable).
    pub fn set_module_locked(&mut self, id: Uuid, locked: bool) -> bool {
        self.update_module_fields(
            id,
            ModuleChanges {
                locked: Some(locked),
                ..Default::default()
            },
        )
    }

    /// Show or hide a module (undoable).
    pub fn set_module_visible(&mut self, id: Uuid, visible: bool) -> bool {
        self.update_module_fields(
            id,
            ModuleChanges {
                visible: Some(visible),
                ..Default::default()
            },
        )
    }

    /// Paint a module above everything else (undoable).
    pub fn bring_to_front(&mut self, id: Uuid) -> bool {
        let Some(top) = self.topmost_other_z(id) else {
            return false;
        };
        let Some(module) = self.store.module(id) else {
            return false;
        };
        if module.z_index > top {
            return false;
        }
        self.update_module_fields(
            id,
            ModuleChanges {
                z_index: Some((top + 1).min(MAX_Z_INDEX)),
                ..Default::default()
            },
        )
    }

    /// Paint a module below everything else (undoable).
    pub fn send_to_back(&mut self, id: Uuid) -> bool {
        let Some(bottom) = self.bottommost_other_z(id) else {
            return false;
        };
        let Some(module) = self.store.module(id) else {
            return false;
        };
        if module.z_index < bottom {
            return false;
        }
        self.update_module_fields(
            id,
            ModuleChanges {
                z_index: Some(bottom.saturating_sub(1)),
                ..Default::default()
            },
        )
    }

    fn topmost_other_z(&self, id: Uuid) -> Option<u32> {
        self.store
            .modules()
            .iter()
            .filter(|m| m.id != id)
            .map(|m| m.z_index)
            .max()
    }

    fn bottommost_other_z(&self, id: Uuid) -> Option<u32> {
        self.store
            .modules()
            .iter()
            .filter(|m| m.id != id)
            .map(|m| m.z_index)
            .min()
    }

    fn update_module_fields(&mut self, id: Uuid, changes: ModuleChanges) -> bool {
        let Some(command) = UpdateModule::capture(&self.store, id, changes) else {
            return false;
        };
        self.history
            .execute(EditorCommand::Update(command), &mut self.store)
            .is_ok()
    }

    /// Align the selected modules to a shared edge or center line.
    ///
    /// Targets come from the rotated bounding boxes so a tilted module
    /// aligns by what is visible. Locked modules are skipped. One Move
    /// command for the whole batch; returns false when nothing moves.
    pub fn align_selection(&mut self, alignment: Alignment) -> bool {
        let members: Vec<&Module> = self
            .selected_in_store_order()
            .into_iter()
            .filter(|m| !m.locked)
            .collect();
        let boxes: Vec<_> = members.iter().map(|m| m.bounding_box()).collect();
        let Some(target) = Self::alignment_target(alignment, &boxes) else {
            return false;
        };

        let bounds = self.store.bounds();
        let mut targets: Vec<(Uuid, Point)> = Vec::new();
        for (module, bb) in members.iter().zip(&boxes) {
            let (dx, dy) = match alignment {
                Alignment::Left => (target - bb.min_x(), 0.0),
                Alignment::Right => (target - bb.max_x(), 0.0),
                Alignment::CenterHorizontal => (target - bb.center().x, 0.0),
                Alignment::Top => (0.0, target - bb.min_y()),
                Alignment::Bottom => (0.0, target - bb.max_y()),
                Alignment::CenterVertical => (0.0, target - bb.center().y),
            };
            if dx.abs() <= f64::EPSILON && dy.abs() <= f64::EPSILON {
                continue;
            }
            let candidate = module.position.offset(dx, dy);
            targets.push((module.id, clamp_to_bounds(candidate, module.size, bounds)));
        }

        let Some(command) = MoveModules::capture(&self.store, &targets) else {
            return false;
        };
        self.history
            .execute(EditorCommand::Move(command), &mut self.store)
            .is_ok()
    }

    fn alignment_target(alignment: Alignment, boxes: &[Rect]) -> Option<f64> {
        if boxes.is_empty() {
            return None;
        }
        let min_x = boxes.iter().map(|b| b.min_x()).fold(f64::INFINITY, f64::min);
        let max_x = boxes
            .iter()
            .map(|b| b.max_x())
            .fold(f64::NEG_INFINITY, f64::max);
        let min_y = boxes.iter().map(|b| b.min_y()).fold(f64::INFINITY, f64::min);
        let max_y = boxes
            .iter()
            .map(|b| b.max_y())
            .fold(f64::NEG_INFINITY, f64::max);

        let target = match alignment {
            Alignment::Left => min_x,
            Alignment::Right => max_x,
            Alignment::CenterHorizontal => (min_x + max_x) / 2.0,
            Alignment::Top => min_y,
            Alignment::Bottom => max_y,
            Alignment::CenterVertical => (min_y + max_y) / 2.0,
        };
        target.is_finite().then_some(target)
    }

    /// Toggle background grid visibility.
    pub fn toggle_grid(&mut self) {
        self.settings.show_grid = !self.settings.show_grid;
    }

    /// Toggle grid snapping for gestures and placement.
    pub fn toggle_snap(&mut self) {
        self.settings.snap_to_grid = !self.settings.snap_to_grid;
    }

    /// Fit the whole plan into the given screen size.
    pub fn fit_to_screen(&mut self, screen_size: Size) {
        let bounds = self.store.bounds();
        self.viewport
            .fit_to_screen(Size::new(bounds.width(), bounds.height()), screen_size);
    }

    /// Dispatch a resolved keyboard action.
    pub fn handle_action(&mut self, action: EditorAction) {
        match action {
            EditorAction::Undo => {
                self.undo_last();
            }
            EditorAction::Redo => {
                self.redo_last();
            }
            EditorAction::Copy => {
                self.copy_selection();
            }
            EditorAction::Cut => {
                self.cut_selection();
            }
            EditorAction::Paste => {
                self.paste_clipboard();
            }
            EditorAction::Duplicate => {
                self.duplicate_selection();
            }
            EditorAction::SelectAll => self.select_all(),
            EditorAction::DeleteSelection => {
                self.delete_selection();
            }
            EditorAction::Escape => self.escape(),
            EditorAction::ToggleGrid => self.toggle_grid(),
            EditorAction::ToggleSnap => self.toggle_snap(),
            EditorAction::Nudge { dx, dy } => {
                self.nudge_selection(dx, dy);
            }
            EditorAction::ZoomIn => self.viewport.zoom_in(),
            EditorAction::ZoomOut => self.viewport.zoom_out(),
            EditorAction::SwitchTool(tool) => self.set_tool(tool),
        }
    }

    /// Selected modules in store order, for stable command batches.
    fn selected_in_store_order(&self) -> Vec<&Module> {
        self.store
            .modules()
            .iter()
            .filter(|m| self.selection.is_selected(m.id))
            .collect()
    }
}

impl Default for MapEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_with(modules: Vec<Module>) -> MapEditor {
        let mut doc = MapDocument::new("Test");
        doc.modules = modules;
        MapEditor::from_document(doc)
    }

    fn module_at(x: f64, y: f64) -> Module {
        Module::new(ModuleKind::Campsite, Point::new(x, y))
    }

    #[test]
    fn test_drag_collapses_to_one_undo_step() {
        let module = module_at(100.0, 100.0);
        let id = module.id;
        let mut editor = editor_with(vec![module]);
        editor.settings.snap_to_grid = false;

        editor.pointer_down(Some(id), Point::new(100.0, 100.0), PointerModifiers::default());
        for step in 1..=10 {
            editor.pointer_move(Point::new(100.0 + step as f64 * 5.0, 100.0));
        }
        editor.pointer_up(Point::new(150.0, 100.0));

        assert_eq!(
            editor.store().module(id).unwrap().position,
            Point::new(150.0, 100.0)
        );
        assert!(editor.can_undo());
        assert!(editor.undo_last());
        assert_eq!(
            editor.store().module(id).unwrap().position,
            Point::new(100.0, 100.0)
        );
        // The whole drag was one step.
        assert!(!editor.can_undo());
    }

    #[test]
    fn test_click_without_drag_pushes_nothing() {
        let module = module_at(100.0, 100.0);
        let id = module.id;
        let mut editor = editor_with(vec![module]);

        editor.pointer_down(Some(id), Point::new(110.0, 110.0), PointerModifiers::default());
        editor.pointer_up(Point::new(110.0, 110.0));

        assert!(editor.selection().is_selected(id));
        assert!(!editor.can_undo());
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_escape_cancels_gesture_and_restores_geometry() {
        let module = module_at(100.0, 100.0);
        let id = module.id;
        let mut editor = editor_with(vec![module]);

        editor.pointer_down(Some(id), Point::new(100.0, 100.0), PointerModifiers::default());
        editor.pointer_move(Point::new(300.0, 300.0));
        editor.escape();

        assert_eq!(
            editor.store().module(id).unwrap().position,
            Point::new(100.0, 100.0)
        );
        assert!(!editor.can_undo());
        // Escape consumed the gesture; selection survives.
        assert!(editor.selection().is_selected(id));
        editor.escape();
        assert!(editor.selection().is_empty());
    }

    #[test]
    fn test_locked_module_never_enters_a_gesture() {
        let mut module = module_at(100.0, 100.0);
        module.locked = true;
        let id = module.id;
        let mut editor = editor_with(vec![module]);

        editor.pointer_down(Some(id), Point::new(100.0, 100.0), PointerModifiers::default());
        assert!(editor.in_progress_ids().is_empty());
        editor.pointer_move(Point::new(200.0, 200.0));
        editor.pointer_up(Point::new(200.0, 200.0));

        assert_eq!(
            editor.store().module(id).unwrap().position,
            Point::new(100.0, 100.0)
        );
        assert!(editor.selection().is_selected(id));
    }

    #[test]
    fn test_group_drag_moves_unlocked_members_only() {
        let free = module_at(100.0, 100.0);
        let mut pinned = module_at(300.0, 300.0);
        pinned.locked = true;
        let (free_id, pinned_id) = (free.id, pinned.id);
        let mut editor = editor_with(vec![free, pinned]);
        editor.settings.snap_to_grid = false;

        editor.select_modules(&[free_id, pinned_id], false);
        editor.pointer_down(Some(free_id), Point::new(100.0, 100.0), PointerModifiers::default());
        editor.pointer_up(Point::new(140.0, 100.0));

        assert_eq!(
            editor.store().module(free_id).unwrap().position,
            Point::new(140.0, 100.0)
        );
        assert_eq!(
            editor.store().module(pinned_id).unwrap().position,
            Point::new(300.0, 300.0)
        );
    }

    #[test]
    fn test_shift_click_toggles_selection_without_gesture() {
        let a = module_at(10.0, 10.0);
        let b = module_at(200.0, 200.0);
        let (ia, ib) = (a.id, b.id);
        let mut editor = editor_with(vec![a, b]);

        let shift = PointerModifiers {
            shift: true,
            command: false,
        };
        editor.pointer_down(Some(ia), Point::new(10.0, 10.0), shift);
        editor.pointer_up(Point::new(10.0, 10.0));
        editor.pointer_down(Some(ib), Point::new(200.0, 200.0), shift);
        editor.pointer_up(Point::new(200.0, 200.0));
        assert_eq!(editor.selection().len(), 2);

        editor.pointer_down(Some(ia), Point::new(10.0, 10.0), shift);
        editor.pointer_up(Point::new(10.0, 10.0));
        assert!(!editor.selection().is_selected(ia));
        assert!(editor.selection().is_selected(ib));
    }

    #[test]
    fn test_pan_tool_moves_viewport_not_modules() {
        let module = module_at(100.0, 100.0);
        let id = module.id;
        let mut editor = editor_with(vec![module]);

        editor.set_tool(Tool::Pan);
        editor.pointer_down(Some(id), Point::new(50.0, 50.0), PointerModifiers::default());
        editor.pointer_move(Point::new(80.0, 40.0));
        editor.pointer_up(Point::new(80.0, 40.0));

        assert_eq!(editor.viewport().pan(), Point::new(30.0, -10.0));
        assert_eq!(
            editor.store().module(id).unwrap().position,
            Point::new(100.0, 100.0)
        );
        assert!(!editor.can_undo());
    }

    #[test]
    fn test_place_tool_snaps_and_selects() {
        let mut editor = editor_with(vec![]);
        editor.set_tool(Tool::Place(ModuleKind::Toilet));

        editor.pointer_down(None, Point::new(93.0, 47.0), PointerModifiers::default());

        let modules = editor.store().modules();
        assert_eq!(modules.len(), 1);
        let placed = &modules[0];
        // Default 20-unit grid snapping applies to placement.
        assert_eq!(placed.position, Point::new(100.0, 40.0));
        assert_eq!(placed.kind, ModuleKind::Toilet);
        assert!(editor.selection().is_selected(placed.id));
        assert!(editor.can_undo());
    }

    #[test]
    fn test_cut_paste_round_trip() {
        let module = module_at(100.0, 100.0);
        let id = module.id;
        let mut editor = editor_with(vec![module]);

        editor.select_modules(&[id], false);
        assert_eq!(editor.cut_selection(), 1);
        assert!(editor.store().is_empty());

        let pasted = editor.paste_clipboard();
        assert_eq!(pasted.len(), 1);
        let copy = editor.store().module(pasted[0]).unwrap();
        assert_ne!(copy.id, id);
        assert_eq!(copy.position, Point::new(120.0, 120.0));
        assert!(editor.selection().is_selected(pasted[0]));

        // Cut then paste are two separate undo steps.
        assert!(editor.undo_last());
        assert!(editor.store().is_empty());
        assert!(editor.undo_last());
        assert_eq!(editor.store().module(id).unwrap().position, Point::new(100.0, 100.0));
    }

    #[test]
    fn test_paste_empty_clipboard_is_a_noop() {
        let mut editor = editor_with(vec![]);
        assert!(editor.paste_clipboard().is_empty());
        assert!(!editor.can_undo());
    }

    #[test]
    fn test_nudge_selection() {
        let module = module_at(100.0, 100.0);
        let id = module.id;
        let mut editor = editor_with(vec![module]);

        editor.select_modules(&[id], false);
        assert!(editor.nudge_selection(1.0, 0.0));
        assert!(editor.nudge_selection(0.0, -10.0));
        assert_eq!(
            editor.store().module(id).unwrap().position,
            Point::new(101.0, 90.0)
        );
        assert_eq!(editor.history.undo_depth(), 2);
    }

    #[test]
    fn test_align_left_batches_one_command() {
        let a = module_at(100.0, 0.0);
        let b = module_at(40.0, 200.0);
        let c = module_at(160.0, 400.0);
        let ids = [a.id, b.id, c.id];
        let mut editor = editor_with(vec![a, b, c]);

        editor.select_modules(&ids, false);
        assert!(editor.align_selection(Alignment::Left));

        for id in ids {
            assert_eq!(editor.store().module(id).unwrap().position.x, 40.0);
        }
        assert_eq!(editor.history.undo_depth(), 1);
        editor.undo_last();
        assert_eq!(editor.store().module(ids[0]).unwrap().position.x, 100.0);
    }

    #[test]
    fn test_align_rotated_module_uses_bounding_box() {
        // 80x60 module rotated 90 degrees: its visible box is 60 wide,
        // centered where the stored rect is, so its left visible edge
        // sits 10 units right of position.x.
        let mut tilted = module_at(100.0, 0.0);
        tilted.rotation = 90.0;
        let straight = module_at(0.0, 200.0);
        let (it, is_) = (tilted.id, straight.id);
        let mut editor = editor_with(vec![tilted, straight]);

        editor.select_modules(&[it, is_], false);
        assert!(editor.align_selection(Alignment::Left));

        // Tilted module's bounding box left edge lands on 0, so its
        // position.x becomes -10... which clamps to 0.
        let tilted_x = editor.store().module(it).unwrap().position.x;
        assert_eq!(tilted_x, 0.0);
        assert_eq!(editor.store().module(is_).unwrap().position.x, 0.0);
    }

    #[test]
    fn test_bring_to_front_and_send_to_back() {
        let mut low = module_at(0.0, 0.0);
        low.z_index = 1;
        let mut high = module_at(50.0, 50.0);
        high.z_index = 8;
        let (low_id, high_id) = (low.id, high.id);
        let mut editor = editor_with(vec![low, high]);

        assert!(editor.bring_to_front(low_id));
        assert_eq!(editor.store().module(low_id).unwrap().z_index, 9);
        // Already on top: no command.
        assert!(!editor.bring_to_front(low_id));

        assert!(editor.send_to_back(low_id));
        assert_eq!(editor.store().module(low_id).unwrap().z_index, 7);
        assert!(!editor.send_to_back(low_id));
        let _ = high_id;
    }

    #[test]
    fn test_set_map_resets_session_but_keeps_clipboard() {
        let module = module_at(100.0, 100.0);
        let id = module.id;
        let mut editor = editor_with(vec![module]);
        editor.select_modules(&[id], false);
        editor.copy_selection();
        editor.delete_selection();
        assert!(editor.can_undo());

        editor.set_map(MapDocument::new("Second"));
        assert!(!editor.can_undo());
        assert!(editor.selection().is_empty());
        assert!(!editor.is_dirty());

        // Clipboard content pastes into the new map.
        let pasted = editor.paste_clipboard();
        assert_eq!(pasted.len(), 1);
    }

    #[test]
    fn test_resize_gesture_through_facade() {
        let mut module = module_at(0.0, 0.0);
        module.size = Size::new(100.0, 100.0);
        let id = module.id;
        let mut editor = editor_with(vec![module]);
        editor.settings.snap_to_grid = false;

        editor.select_modules(&[id], false);
        assert!(editor.begin_resize(ResizeHandle::BottomRight, Point::new(100.0, 100.0)));
        editor.pointer_move(Point::new(150.0, 100.0));
        editor.pointer_up(Point::new(150.0, 100.0));

        let resized = editor.store().module(id).unwrap();
        assert_eq!(resized.size, Size::new(150.0, 100.0));
        assert_eq!(editor.history.undo_depth(), 1);

        editor.undo_last();
        assert_eq!(editor.store().module(id).unwrap().size, Size::new(100.0, 100.0));
    }

    #[test]
    fn test_rotate_gesture_through_facade() {
        let mut module = module_at(0.0, 0.0);
        module.size = Size::new(100.0, 100.0);
        let id = module.id;
        let mut editor = editor_with(vec![module]);

        editor.select_modules(&[id], false);
        assert!(editor.begin_rotate());
        // Pointer right of center: 90 degrees, snapped to 15.
        editor.pointer_move(Point::new(200.0, 50.0));
        editor.pointer_up(Point::new(200.0, 50.0));

        assert_eq!(editor.store().module(id).unwrap().rotation, 90.0);
        editor.undo_last();
        assert_eq!(editor.store().module(id).unwrap().rotation, 0.0);
    }

    #[test]
    fn test_handle_action_dispatch() {
        let module = module_at(100.0, 100.0);
        let id = module.id;
        let mut editor = editor_with(vec![module]);

        editor.handle_action(EditorAction::SelectAll);
        assert!(editor.selection().is_selected(id));

        editor.handle_action(EditorAction::Nudge { dx: 10.0, dy: 0.0 });
        assert_eq!(
            editor.store().module(id).unwrap().position,
            Point::new(110.0, 100.0)
        );

        editor.handle_action(EditorAction::Undo);
        assert_eq!(
            editor.store().module(id).unwrap().position,
            Point::new(100.0, 100.0)
        );

        editor.handle_action(EditorAction::ToggleGrid);
        assert!(!editor.settings().show_grid);

        editor.handle_action(EditorAction::SwitchTool(Tool::Pan));
        assert_eq!(editor.tool(), Tool::Pan);
    }

    #[test]
    fn test_wheel_zooms_around_cursor() {
        let mut editor = editor_with(vec![]);
        let cursor = Point::new(400.0, 300.0);
        let before = editor.viewport().screen_to_plane(cursor);

        editor.wheel(1.0, cursor);
        assert!(editor.viewport().zoom() > 1.0);
        let after = editor.viewport().screen_to_plane(cursor);
        assert!((after.x - before.x).abs() < 1e-9);
        assert!((after.y - before.y).abs() < 1e-9);

        editor.wheel(-1.0, cursor);
        assert!((editor.viewport().zoom() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_selection_pruned_after_undo_of_add() {
        let mut editor = editor_with(vec![]);
        let id = editor.place_module(ModuleKind::Campsite, Point::new(100.0, 100.0));
        let id = id.unwrap();
        assert!(editor.selection().is_selected(id));

        editor.undo_last();
        assert!(editor.store().is_empty());
        assert!(editor.selection().is_empty());

        editor.redo_last();
        assert!(editor.store().contains(id));
    }
}
