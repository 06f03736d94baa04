//! Selection state for the map editor

use std::collections::HashSet;
use uuid::Uuid;

use crate::store::MapStore;

/// Manages module selection state and selection operations.
///
/// `SelectionManager` is responsible for:
/// - Tracking the set of selected module ids
/// - Tracking which module is the "primary" selection (transform pivot)
/// - Tracking the hovered module for highlight rendering
/// - Multi-select operations (Shift+click toggling)
///
/// # Selection Model
///
/// Selection lives entirely in this manager as a set of ids; modules
/// carry no selection flag. Every id must reference a live module, so
/// the editor prunes the set after any operation that can remove
/// modules (delete, undo, redo, map switch).
#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    /// Ids of all selected modules
    selected: HashSet<Uuid>,
    /// The primary selection, always a member of `selected`
    primary: Option<Uuid>,
    /// Module currently under the pointer, selected or not
    hovered: Option<Uuid>,
}

impl SelectionManager {
    /// Creates a new `SelectionManager` with no selection.
    ///
    /// # Examples
    ///
    /// ```
    /// use campkit_editor::selection::SelectionManager;
    ///
    /// let manager = SelectionManager::new();
    /// assert!(manager.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace or extend the selection.
    ///
    /// With `additive` false the given ids become the whole selection;
    /// with `additive` true they are added to it. The last id becomes
    /// the primary selection.
    pub fn select(&mut self, ids: &[Uuid], additive: bool) {
        if !additive {
            self.selected.clear();
            self.primary = None;
        }
        for &id in ids {
            self.selected.insert(id);
        }
        if let Some(&last) = ids.last() {
            self.primary = Some(last);
        } else if self.primary.is_none() {
            self.primary = self.selected.iter().next().copied();
        }
    }

    /// Toggle one id in or out of the selection (Shift+click).
    pub fn toggle(&mut self, id: Uuid) {
        if self.selected.remove(&id) {
            if self.primary == Some(id) {
                self.primary = self.selected.iter().next().copied();
            }
        } else {
            self.selected.insert(id);
            self.primary = Some(id);
        }
    }

    /// Clear the selection (primary included; hover is untouched).
    pub fn clear(&mut self) {
        self.selected.clear();
        self.primary = None;
    }

    /// Select every module in the store.
    ///
    /// The primary becomes the topmost module in paint order.
    pub fn select_all(&mut self, store: &MapStore) {
        self.selected = store.modules().iter().map(|m| m.id).collect();
        self.primary = store.modules_by_paint_order().last().map(|m| m.id);
    }

    pub fn is_selected(&self, id: Uuid) -> bool {
        self.selected.contains(&id)
    }

    /// Ids of all selected modules, in no particular order.
    ///
    /// Callers that need a stable order (command batches) should walk
    /// the store and filter with `is_selected`.
    pub fn ids(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.selected.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// The primary selected module, if any.
    pub fn primary(&self) -> Option<Uuid> {
        self.primary
    }

    /// The module currently under the pointer.
    pub fn hovered(&self) -> Option<Uuid> {
        self.hovered
    }

    pub fn set_hovered(&mut self, id: Option<Uuid>) {
        self.hovered = id;
    }

    /// Drop ids that no longer reference a live module.
    ///
    /// Called after deletes, undo/redo, and map switches so the
    /// invariant "every selected id is live" always holds.
    pub fn prune(&mut self, store: &MapStore) {
        self.selected.retain(|&id| store.contains(id));
        if let Some(primary) = self.primary {
            if !self.selected.contains(&primary) {
                self.primary = self.selected.iter().next().copied();
            }
        }
        if let Some(hovered) = self.hovered {
            if !store.contains(hovered) {
                self.hovered = None;
            }
        }
    }
}
