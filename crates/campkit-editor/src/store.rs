//! Entity store for the open map document
//!
//! Owns the `MapDocument` and is the only place module data changes.
//! Every committed mutation refreshes the affected module's
//! `updated_at`, the document's `updated_at`, and sets the dirty flag;
//! the save collaborator polls `is_dirty` and calls `mark_clean` after
//! a successful save. There are no subscriptions.
//!
//! Command apply/undo and live gesture steps use the crate-internal
//! accessors, which write exact values without clamping or stamping,
//! so undo can restore state bit-for-bit.

use campkit_core::constants::MAX_Z_INDEX;
use campkit_core::error::MapError;
use campkit_core::geometry::MapBounds;
use chrono::Utc;
use uuid::Uuid;

use crate::document::MapDocument;
use crate::model::{Module, ModuleChanges};
use crate::validation;

/// Holds the open map and tracks unsaved changes.
#[derive(Debug, Clone)]
pub struct MapStore {
    document: MapDocument,
    dirty: bool,
}

impl MapStore {
    pub fn new() -> Self {
        Self::from_document(MapDocument::default())
    }

    /// Wrap an existing document. The store starts clean.
    ///
    /// Callers loading untrusted data should go through
    /// `serialization::from_json`, which sanitizes modules first; the
    /// store only guards the bounds it clamps against.
    pub fn from_document(document: MapDocument) -> Self {
        let mut store = Self {
            document,
            dirty: false,
        };
        store.guard_bounds();
        store
    }

    /// Replace the open document. Clears the dirty flag.
    pub fn set_map(&mut self, document: MapDocument) {
        self.document = document;
        self.dirty = false;
        self.guard_bounds();
    }

    fn guard_bounds(&mut self) {
        if !self.document.bounds.is_valid() {
            let fallback = MapBounds::default();
            tracing::warn!(
                attempted = ?self.document.bounds,
                corrected = ?fallback,
                "Invalid map bounds, falling back to default"
            );
            self.document.bounds = fallback;
        }
    }

    pub fn document(&self) -> &MapDocument {
        &self.document
    }

    pub fn bounds(&self) -> MapBounds {
        self.document.bounds
    }

    pub fn module(&self, id: Uuid) -> Option<&Module> {
        self.document.modules.iter().find(|m| m.id == id)
    }

    /// All modules in insertion order.
    pub fn modules(&self) -> &[Module] {
        &self.document.modules
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.module(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.document.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.document.modules.is_empty()
    }

    /// Modules sorted for painting: ascending z-index, insertion order
    /// breaking ties.
    pub fn modules_by_paint_order(&self) -> Vec<&Module> {
        let mut ordered: Vec<&Module> = self.document.modules.iter().collect();
        ordered.sort_by_key(|m| m.z_index);
        ordered
    }

    /// z-index that places a new module above everything else.
    pub fn next_z_index(&self) -> u32 {
        self.document
            .modules
            .iter()
            .map(|m| m.z_index)
            .max()
            .map(|z| (z + 1).min(MAX_Z_INDEX))
            .unwrap_or(0)
    }

    /// Insert a module, clamping its geometry into range.
    ///
    /// Rejects duplicate ids; everything else is corrected with a
    /// warning rather than refused.
    pub fn add_module(&mut self, mut module: Module) -> Result<Uuid, MapError> {
        if self.contains(module.id) {
            return Err(MapError::DuplicateModuleId { id: module.id });
        }
        validation::clamp_geometry(&mut module, self.document.bounds);
        module.updated_at = Utc::now();
        let id = module.id;
        self.document.modules.push(module);
        self.finish_mutation();
        Ok(id)
    }

    /// Apply a sparse patch to a module.
    ///
    /// Out-of-range geometry in the patch is clamped with a warning.
    /// Returns false (and changes nothing) when the id is unknown;
    /// referencing a missing module is a no-op, not an error.
    pub fn update_module(&mut self, id: Uuid, changes: &ModuleChanges) -> bool {
        if changes.is_empty() {
            return self.contains(id);
        }
        let bounds = self.document.bounds;
        let Some(module) = self.module_mut(id) else {
            tracing::debug!(module = %id, "update_module on missing module, ignoring");
            return false;
        };
        changes.apply_to(module);
        validation::clamp_geometry(module, bounds);
        module.updated_at = Utc::now();
        self.finish_mutation();
        true
    }

    /// Clamp and set a module's z-index.
    pub fn reorder_module(&mut self, id: Uuid, z_index: u32) -> bool {
        self.update_module(
            id,
            &ModuleChanges {
                z_index: Some(z_index.min(MAX_Z_INDEX)),
                ..Default::default()
            },
        )
    }

    /// Remove a module, returning it. Missing ids are a no-op.
    pub fn remove_module(&mut self, id: Uuid) -> Option<Module> {
        let index = self.module_index(id)?;
        let removed = self.document.modules.remove(index);
        self.finish_mutation();
        Some(removed)
    }

    /// Remove several modules, returning the ones that existed.
    pub fn remove_modules(&mut self, ids: &[Uuid]) -> Vec<Module> {
        let mut removed = Vec::with_capacity(ids.len());
        for &id in ids {
            if let Some(index) = self.module_index(id) {
                removed.push(self.document.modules.remove(index));
            }
        }
        if !removed.is_empty() {
            self.finish_mutation();
        }
        removed
    }

    /// Replace the whole module list (bulk import).
    ///
    /// Malformed entries are dropped and the rest clamped, so the store
    /// invariants hold regardless of input.
    pub fn set_modules(&mut self, modules: Vec<Module>) {
        let (mut kept, dropped) = validation::sanitize_batch(modules);
        if dropped > 0 {
            tracing::warn!(dropped, "set_modules dropped malformed entries");
        }
        let bounds = self.document.bounds;
        for module in &mut kept {
            validation::clamp_geometry(module, bounds);
        }
        self.document.modules = kept;
        self.finish_mutation();
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Reset the dirty flag after a successful save.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn finish_mutation(&mut self) {
        self.document.updated_at = Utc::now();
        self.dirty = true;
    }

    // -- crate-internal surface for commands and gestures --

    /// Exact mutable access. No clamping, no stamping.
    pub(crate) fn module_mut(&mut self, id: Uuid) -> Option<&mut Module> {
        self.document.modules.iter_mut().find(|m| m.id == id)
    }

    pub(crate) fn module_index(&self, id: Uuid) -> Option<usize> {
        self.document.modules.iter().position(|m| m.id == id)
    }

    /// Append a module verbatim (command apply/redo path).
    pub(crate) fn push_module(&mut self, module: Module) {
        self.document.modules.push(module);
    }

    /// Reinsert a module at its original index (undo of a removal).
    pub(crate) fn insert_module_at(&mut self, index: usize, module: Module) {
        let index = index.min(self.document.modules.len());
        self.document.modules.insert(index, module);
    }

    /// Remove by id without stamping (command apply/redo path).
    pub(crate) fn take_module(&mut self, id: Uuid) -> Option<Module> {
        let index = self.module_index(id)?;
        Some(self.document.modules.remove(index))
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn touch_document(&mut self) {
        self.document.updated_at = Utc::now();
    }
}

impl Default for MapStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModuleKind;
    use campkit_core::geometry::{Point, Size};

    fn store_with(modules: Vec<Module>) -> MapStore {
        let mut doc = MapDocument::new("Test");
        doc.modules = modules;
        MapStore::from_document(doc)
    }

    #[test]
    fn test_add_and_lookup() {
        let mut store = MapStore::new();
        let module = Module::new(ModuleKind::Campsite, Point::new(10.0, 10.0));
        let id = store.add_module(module).unwrap();
        assert!(store.contains(id));
        assert_eq!(store.len(), 1);
        assert!(store.is_dirty());
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let mut store = MapStore::new();
        let module = Module::new(ModuleKind::Toilet, Point::ZERO);
        let copy = module.clone();
        store.add_module(module).unwrap();
        assert!(matches!(
            store.add_module(copy),
            Err(MapError::DuplicateModuleId { .. })
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_clamps_geometry() {
        let mut store = MapStore::new();
        let mut module = Module::new(ModuleKind::Campsite, Point::new(-100.0, 50.0));
        module.size = Size::new(5.0, 40.0);
        let id = store.add_module(module).unwrap();
        let stored = store.module(id).unwrap();
        assert_eq!(stored.size.width, 20.0);
        assert_eq!(stored.position.x, 0.0);
    }

    #[test]
    fn test_update_missing_module_is_noop() {
        let mut store = MapStore::new();
        let changes = ModuleChanges {
            position: Some(Point::new(1.0, 1.0)),
            ..Default::default()
        };
        assert!(!store.update_module(Uuid::new_v4(), &changes));
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_update_stamps_module_and_document() {
        let module = Module::new(ModuleKind::Storage, Point::new(10.0, 10.0));
        let id = module.id;
        let created = module.created_at;
        let mut store = store_with(vec![module]);

        let moved = ModuleChanges {
            position: Some(Point::new(40.0, 40.0)),
            ..Default::default()
        };
        assert!(store.update_module(id, &moved));

        let stored = store.module(id).unwrap();
        assert_eq!(stored.position, Point::new(40.0, 40.0));
        assert_eq!(stored.created_at, created);
        assert!(stored.updated_at >= created);
        assert!(store.is_dirty());
        assert!(store.document().updated_at >= created);
    }

    #[test]
    fn test_paint_order_sorts_by_z_with_stable_ties() {
        let mut a = Module::new(ModuleKind::Campsite, Point::ZERO);
        a.z_index = 5;
        let mut b = Module::new(ModuleKind::Toilet, Point::ZERO);
        b.z_index = 1;
        let mut c = Module::new(ModuleKind::Road, Point::ZERO);
        c.z_index = 5;
        let (ia, ib, ic) = (a.id, b.id, c.id);
        let store = store_with(vec![a, b, c]);

        let order: Vec<Uuid> = store.modules_by_paint_order().iter().map(|m| m.id).collect();
        assert_eq!(order, vec![ib, ia, ic]);
    }

    #[test]
    fn test_next_z_index() {
        let mut store = MapStore::new();
        assert_eq!(store.next_z_index(), 0);
        let mut module = Module::new(ModuleKind::Campsite, Point::ZERO);
        module.z_index = 7;
        store.add_module(module).unwrap();
        assert_eq!(store.next_z_index(), 8);
    }

    #[test]
    fn test_reorder_module_clamps_z() {
        let module = Module::new(ModuleKind::Campsite, Point::ZERO);
        let id = module.id;
        let mut store = store_with(vec![module]);

        assert!(store.reorder_module(id, 4_000));
        assert_eq!(store.module(id).unwrap().z_index, MAX_Z_INDEX);
        assert!(!store.reorder_module(Uuid::new_v4(), 3));
    }

    #[test]
    fn test_mark_clean_clears_dirty() {
        let mut store = MapStore::new();
        store
            .add_module(Module::new(ModuleKind::Campsite, Point::ZERO))
            .unwrap();
        assert!(store.is_dirty());
        store.mark_clean();
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_set_map_clears_dirty_and_guards_bounds() {
        let mut store = MapStore::new();
        store
            .add_module(Module::new(ModuleKind::Campsite, Point::ZERO))
            .unwrap();

        let mut doc = MapDocument::new("Broken bounds");
        doc.bounds = MapBounds::new(10.0, 0.0, 10.0, 5.0);
        store.set_map(doc);
        assert!(!store.is_dirty());
        assert!(store.bounds().is_valid());
    }

    #[test]
    fn test_remove_modules_returns_existing_only() {
        let a = Module::new(ModuleKind::Campsite, Point::ZERO);
        let b = Module::new(ModuleKind::Toilet, Point::ZERO);
        let (ia, ib) = (a.id, b.id);
        let mut store = store_with(vec![a, b]);

        let removed = store.remove_modules(&[ia, Uuid::new_v4(), ib]);
        assert_eq!(removed.len(), 2);
        assert!(store.is_empty());
    }

    #[test]
    fn test_set_modules_sanitizes() {
        let good = Module::new(ModuleKind::Campsite, Point::new(10.0, 10.0));
        let mut bad = Module::new(ModuleKind::Toilet, Point::ZERO);
        bad.size = Size::new(f64::NAN, 40.0);
        bad.position = Point::new(f64::NAN, 0.0);
        let good_id = good.id;

        let mut store = MapStore::new();
        store.set_modules(vec![good, bad]);
        // The NaN position is malformed, the module is dropped.
        assert_eq!(store.len(), 1);
        assert!(store.contains(good_id));
    }
}
