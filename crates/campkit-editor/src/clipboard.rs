//! Module clipboard with value semantics
//!
//! The clipboard stores deep copies: later edits or deletion of the
//! source modules never change what a paste produces. Paste hands back
//! fresh modules and inserts nothing; the editor wraps them in an Add
//! command so the insertion is undoable.

use campkit_core::constants::PASTE_OFFSET;
use campkit_core::error::MapError;
use campkit_core::geometry::Point;
use chrono::Utc;
use uuid::Uuid;

use crate::model::Module;
use crate::validation;

/// Deep-copied module snapshots awaiting paste.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    snapshots: Vec<Module>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    /// Copy modules onto the clipboard, replacing its contents.
    ///
    /// Malformed candidates are dropped (sanitize-and-continue) and the
    /// survivor count returned. When nothing survives the clipboard is
    /// left untouched and the failure logged as an error.
    pub fn copy(&mut self, modules: &[&Module]) -> usize {
        let candidates: Vec<Module> = modules.iter().map(|m| (*m).clone()).collect();
        let (kept, dropped) = validation::sanitize_batch(candidates);
        if kept.is_empty() {
            if dropped > 0 {
                tracing::error!(dropped, "Copy rejected: no valid modules in selection");
            }
            return 0;
        }
        if dropped > 0 {
            tracing::warn!(dropped, copied = kept.len(), "Copy dropped malformed modules");
        }
        self.snapshots = kept;
        self.snapshots.len()
    }

    /// Produce paste-ready modules from the clipboard.
    ///
    /// Each result gets a freshly generated id, its position offset by
    /// `offset` (default 20,20), and refreshed timestamps; every other
    /// field is preserved. The clipboard itself never changes, so
    /// pasting twice yields two independent batches.
    pub fn paste(&self, offset: Option<Point>) -> Result<Vec<Module>, MapError> {
        if self.snapshots.is_empty() {
            return Err(MapError::EmptyClipboard);
        }
        Self::materialize(self.snapshots.iter(), offset)
    }

    /// Clipboard-free copy+paste of live modules in one step.
    pub fn duplicate(modules: &[&Module], offset: Option<Point>) -> Result<Vec<Module>, MapError> {
        if modules.is_empty() {
            return Err(MapError::EmptyClipboard);
        }
        Self::materialize(modules.iter().copied(), offset)
    }

    fn materialize<'a, I>(modules: I, offset: Option<Point>) -> Result<Vec<Module>, MapError>
    where
        I: Iterator<Item = &'a Module>,
    {
        let offset = offset.unwrap_or(Point::new(PASTE_OFFSET, PASTE_OFFSET));
        let candidates: Vec<Module> = modules.cloned().collect();
        let (kept, dropped) = validation::sanitize_batch(candidates);
        if kept.is_empty() {
            tracing::error!(dropped, "Paste rejected: no valid modules");
            return Err(MapError::NoValidModules { dropped });
        }
        let now = Utc::now();
        Ok(kept
            .into_iter()
            .map(|mut module| {
                module.id = Uuid::new_v4();
                module.position = module.position.offset(offset.x, offset.y);
                module.created_at = now;
                module.updated_at = now;
                module
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModuleKind;
    use campkit_core::geometry::Size;

    fn campsite_at(x: f64, y: f64) -> Module {
        Module::new(ModuleKind::Campsite, Point::new(x, y))
    }

    #[test]
    fn test_copy_then_mutate_source_keeps_snapshot() {
        let mut source = campsite_at(100.0, 100.0);
        let mut clipboard = Clipboard::new();
        assert_eq!(clipboard.copy(&[&source]), 1);

        // Later edits to the source must not leak into the clipboard.
        source.position = Point::new(999.0, 999.0);
        let pasted = clipboard.paste(None).unwrap();
        assert_eq!(pasted[0].position, Point::new(120.0, 120.0));
    }

    #[test]
    fn test_paste_regenerates_identity() {
        let source = campsite_at(50.0, 60.0);
        let mut clipboard = Clipboard::new();
        clipboard.copy(&[&source]);

        let pasted = clipboard.paste(None).unwrap();
        assert_eq!(pasted.len(), 1);
        let copy = &pasted[0];
        assert_ne!(copy.id, source.id);
        assert_eq!(copy.position, Point::new(70.0, 80.0));
        assert_eq!(copy.size, source.size);
        assert_eq!(copy.kind, source.kind);
        assert!(copy.created_at >= source.created_at);
    }

    #[test]
    fn test_paste_twice_yields_distinct_ids() {
        let source = campsite_at(0.0, 0.0);
        let mut clipboard = Clipboard::new();
        clipboard.copy(&[&source]);

        let first = clipboard.paste(None).unwrap();
        let second = clipboard.paste(None).unwrap();
        assert_ne!(first[0].id, second[0].id);
        // Fixed offset from the snapshot, not cumulative.
        assert_eq!(first[0].position, second[0].position);
    }

    #[test]
    fn test_paste_empty_clipboard_fails() {
        let clipboard = Clipboard::new();
        assert!(matches!(
            clipboard.paste(None),
            Err(MapError::EmptyClipboard)
        ));
    }

    #[test]
    fn test_copy_gate_drops_malformed_and_keeps_old_content() {
        let good = campsite_at(10.0, 10.0);
        let mut clipboard = Clipboard::new();
        clipboard.copy(&[&good]);

        let mut bad = campsite_at(0.0, 0.0);
        bad.size = Size::new(f64::NAN, 10.0);
        assert_eq!(clipboard.copy(&[&bad]), 0);
        // Failed copy leaves the previous snapshot in place.
        assert_eq!(clipboard.len(), 1);
        assert_eq!(
            clipboard.paste(None).unwrap()[0].position,
            Point::new(30.0, 30.0)
        );
    }

    #[test]
    fn test_duplicate_without_clipboard() {
        let source = campsite_at(5.0, 5.0);
        let duplicated =
            Clipboard::duplicate(&[&source], Some(Point::new(40.0, 0.0))).unwrap();
        assert_eq!(duplicated[0].position, Point::new(45.0, 5.0));
        assert_ne!(duplicated[0].id, source.id);
    }
}
