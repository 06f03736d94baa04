//! Reversible editing commands
//!
//! A command stores both sides of an edit (old and new values), so
//! apply and undo are plain writes with no recomputation. Constructors
//! capture the old side from the store at build time and return `None`
//! when the edit would change nothing, which is how a click-without-
//! drag ends up producing no history entry.
//!
//! Geometry-mutating commands also capture each module's pre-edit
//! `updated_at` plus one `stamp` taken at build time: apply writes the
//! stamp, undo restores the captured value, so undo and redo reproduce
//! module state bit-for-bit.
//!
//! Apply and undo are atomic: targets are verified up front and the
//! store is only touched when the whole batch can succeed.

use campkit_core::error::CommandError;
use campkit_core::geometry::{Point, Size};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::model::{Module, ModuleChanges};
use crate::store::MapStore;

/// A reversible edit applied to the map store.
#[derive(Debug, Clone)]
pub enum EditorCommand {
    Move(MoveModules),
    Resize(ResizeModules),
    Rotate(RotateModule),
    Add(AddModules),
    Remove(RemoveModules),
    Update(UpdateModule),
}

/// One module's position change within a move command.
#[derive(Debug, Clone)]
pub struct MoveEntry {
    pub id: Uuid,
    pub old_position: Point,
    pub new_position: Point,
    pub old_updated_at: DateTime<Utc>,
}

/// Batched move; one drag of a multi-selection is one undo step.
#[derive(Debug, Clone)]
pub struct MoveModules {
    pub entries: Vec<MoveEntry>,
    pub stamp: DateTime<Utc>,
}

/// One module's rectangle change within a resize command.
#[derive(Debug, Clone)]
pub struct ResizeEntry {
    pub id: Uuid,
    pub old_position: Point,
    pub old_size: Size,
    pub new_position: Point,
    pub new_size: Size,
    pub old_updated_at: DateTime<Utc>,
}

/// Batched resize; a group resize is one undo step.
#[derive(Debug, Clone)]
pub struct ResizeModules {
    pub entries: Vec<ResizeEntry>,
    pub stamp: DateTime<Utc>,
}

/// Rotation change of a single module.
#[derive(Debug, Clone)]
pub struct RotateModule {
    pub id: Uuid,
    pub old_rotation: f64,
    pub new_rotation: f64,
    pub old_updated_at: DateTime<Utc>,
    pub stamp: DateTime<Utc>,
}

/// Insertion of fully formed modules (placement, paste, duplicate).
///
/// The modules are stored verbatim, ids included, so redo after undo
/// recreates exactly the same entities.
#[derive(Debug, Clone)]
pub struct AddModules {
    pub modules: Vec<Module>,
}

/// Removal of modules, remembering where they sat in insertion order.
#[derive(Debug, Clone)]
pub struct RemoveModules {
    /// Snapshots with their original index, ascending.
    pub entries: Vec<(usize, Module)>,
}

/// Field-level patch of one module (metadata, flags, z-index).
#[derive(Debug, Clone)]
pub struct UpdateModule {
    pub id: Uuid,
    pub old: ModuleChanges,
    pub new: ModuleChanges,
    pub old_updated_at: DateTime<Utc>,
    pub stamp: DateTime<Utc>,
}

impl MoveModules {
    /// Capture a move to the given target positions.
    ///
    /// Ids missing from the store and entries that would not move are
    /// skipped; returns `None` when nothing would change.
    pub fn capture(store: &MapStore, targets: &[(Uuid, Point)]) -> Option<MoveModules> {
        let entries: Vec<MoveEntry> = targets
            .iter()
            .filter_map(|&(id, new_position)| {
                let module = store.module(id)?;
                if module.position == new_position {
                    return None;
                }
                Some(MoveEntry {
                    id,
                    old_position: module.position,
                    new_position,
                    old_updated_at: module.updated_at,
                })
            })
            .collect();
        if entries.is_empty() {
            return None;
        }
        Some(MoveModules {
            entries,
            stamp: Utc::now(),
        })
    }
}

impl ResizeModules {
    /// Capture a resize to the given target rectangles.
    pub fn capture(store: &MapStore, targets: &[(Uuid, Point, Size)]) -> Option<ResizeModules> {
        let entries: Vec<ResizeEntry> = targets
            .iter()
            .filter_map(|&(id, new_position, new_size)| {
                let module = store.module(id)?;
                if module.position == new_position && module.size == new_size {
                    return None;
                }
                Some(ResizeEntry {
                    id,
                    old_position: module.position,
                    old_size: module.size,
                    new_position,
                    new_size,
                    old_updated_at: module.updated_at,
                })
            })
            .collect();
        if entries.is_empty() {
            return None;
        }
        Some(ResizeModules {
            entries,
            stamp: Utc::now(),
        })
    }
}

impl RotateModule {
    /// Capture a rotation change; `None` when it would not change.
    pub fn capture(store: &MapStore, id: Uuid, new_rotation: f64) -> Option<RotateModule> {
        let module = store.module(id)?;
        if module.rotation == new_rotation {
            return None;
        }
        Some(RotateModule {
            id,
            old_rotation: module.rotation,
            new_rotation,
            old_updated_at: module.updated_at,
            stamp: Utc::now(),
        })
    }
}

impl AddModules {
    pub fn new(modules: Vec<Module>) -> AddModules {
        AddModules { modules }
    }
}

impl RemoveModules {
    /// Snapshot the given modules for removal; `None` when none exist.
    pub fn capture(store: &MapStore, ids: &[Uuid]) -> Option<RemoveModules> {
        let mut entries: Vec<(usize, Module)> = ids
            .iter()
            .filter_map(|&id| {
                let index = store.module_index(id)?;
                Some((index, store.modules()[index].clone()))
            })
            .collect();
        if entries.is_empty() {
            return None;
        }
        entries.sort_by_key(|(index, _)| *index);
        Some(RemoveModules { entries })
    }
}

impl UpdateModule {
    /// Capture a field patch; `None` when empty, target missing, or the
    /// patch matches the module's current values.
    pub fn capture(store: &MapStore, id: Uuid, new: ModuleChanges) -> Option<UpdateModule> {
        if new.is_empty() {
            return None;
        }
        let module = store.module(id)?;
        let old = new.capture_from(module);
        if old == new {
            return None;
        }
        Some(UpdateModule {
            id,
            old,
            new,
            old_updated_at: module.updated_at,
            stamp: Utc::now(),
        })
    }
}

fn verify_present<'a, I>(store: &MapStore, ids: I) -> Result<(), CommandError>
where
    I: IntoIterator<Item = &'a Uuid>,
{
    for &id in ids {
        if !store.contains(id) {
            return Err(CommandError::TargetMissing { id });
        }
    }
    Ok(())
}

fn verify_absent<'a, I>(store: &MapStore, ids: I) -> Result<(), CommandError>
where
    I: IntoIterator<Item = &'a Uuid>,
{
    for &id in ids {
        if store.contains(id) {
            return Err(CommandError::TargetExists { id });
        }
    }
    Ok(())
}

impl EditorCommand {
    /// Display name for menus and logs.
    pub fn name(&self) -> &'static str {
        match self {
            EditorCommand::Move(_) => "Move Modules",
            EditorCommand::Resize(_) => "Resize Modules",
            EditorCommand::Rotate(_) => "Rotate Module",
            EditorCommand::Add(_) => "Add Modules",
            EditorCommand::Remove(_) => "Remove Modules",
            EditorCommand::Update(_) => "Update Module",
        }
    }

    /// Ids of the modules this command touches.
    pub fn target_ids(&self) -> Vec<Uuid> {
        match self {
            EditorCommand::Move(cmd) => cmd.entries.iter().map(|e| e.id).collect(),
            EditorCommand::Resize(cmd) => cmd.entries.iter().map(|e| e.id).collect(),
            EditorCommand::Rotate(cmd) => vec![cmd.id],
            EditorCommand::Add(cmd) => cmd.modules.iter().map(|m| m.id).collect(),
            EditorCommand::Remove(cmd) => cmd.entries.iter().map(|(_, m)| m.id).collect(),
            EditorCommand::Update(cmd) => vec![cmd.id],
        }
    }

    /// Apply the edit. The store is untouched on error.
    pub fn apply(&self, store: &mut MapStore) -> Result<(), CommandError> {
        match self {
            EditorCommand::Move(cmd) => {
                verify_present(store, cmd.entries.iter().map(|e| &e.id))?;
                for entry in &cmd.entries {
                    if let Some(module) = store.module_mut(entry.id) {
                        module.position = entry.new_position;
                        module.updated_at = cmd.stamp;
                    }
                }
                Ok(())
            }
            EditorCommand::Resize(cmd) => {
                verify_present(store, cmd.entries.iter().map(|e| &e.id))?;
                for entry in &cmd.entries {
                    if let Some(module) = store.module_mut(entry.id) {
                        module.position = entry.new_position;
                        module.size = entry.new_size;
                        module.updated_at = cmd.stamp;
                    }
                }
                Ok(())
            }
            EditorCommand::Rotate(cmd) => {
                let Some(module) = store.module_mut(cmd.id) else {
                    return Err(CommandError::TargetMissing { id: cmd.id });
                };
                module.rotation = cmd.new_rotation;
                module.updated_at = cmd.stamp;
                Ok(())
            }
            EditorCommand::Add(cmd) => {
                if cmd.modules.is_empty() {
                    return Err(CommandError::Empty {
                        name: self.name().to_string(),
                    });
                }
                verify_absent(store, cmd.modules.iter().map(|m| &m.id))?;
                for module in &cmd.modules {
                    store.push_module(module.clone());
                }
                Ok(())
            }
            EditorCommand::Remove(cmd) => {
                verify_present(store, cmd.entries.iter().map(|(_, m)| &m.id))?;
                for (_, module) in &cmd.entries {
                    store.take_module(module.id);
                }
                Ok(())
            }
            EditorCommand::Update(cmd) => {
                let Some(module) = store.module_mut(cmd.id) else {
                    return Err(CommandError::TargetMissing { id: cmd.id });
                };
                cmd.new.apply_to(module);
                module.updated_at = cmd.stamp;
                Ok(())
            }
        }
    }

    /// Revert the edit. The store is untouched on error.
    pub fn undo(&self, store: &mut MapStore) -> Result<(), CommandError> {
        match self {
            EditorCommand::Move(cmd) => {
                verify_present(store, cmd.entries.iter().map(|e| &e.id))?;
                for entry in &cmd.entries {
                    if let Some(module) = store.module_mut(entry.id) {
                        module.position = entry.old_position;
                        module.updated_at = entry.old_updated_at;
                    }
                }
                Ok(())
            }
            EditorCommand::Resize(cmd) => {
                verify_present(store, cmd.entries.iter().map(|e| &e.id))?;
                for entry in &cmd.entries {
                    if let Some(module) = store.module_mut(entry.id) {
                        module.position = entry.old_position;
                        module.size = entry.old_size;
                        module.updated_at = entry.old_updated_at;
                    }
                }
                Ok(())
            }
            EditorCommand::Rotate(cmd) => {
                let Some(module) = store.module_mut(cmd.id) else {
                    return Err(CommandError::TargetMissing { id: cmd.id });
                };
                module.rotation = cmd.old_rotation;
                module.updated_at = cmd.old_updated_at;
                Ok(())
            }
            EditorCommand::Add(cmd) => {
                verify_present(store, cmd.modules.iter().map(|m| &m.id))?;
                for module in &cmd.modules {
                    store.take_module(module.id);
                }
                Ok(())
            }
            EditorCommand::Remove(cmd) => {
                verify_absent(store, cmd.entries.iter().map(|(_, m)| &m.id))?;
                // Ascending index order restores the original layout.
                for (index, module) in &cmd.entries {
                    store.insert_module_at(*index, module.clone());
                }
                Ok(())
            }
            EditorCommand::Update(cmd) => {
                let Some(module) = store.module_mut(cmd.id) else {
                    return Err(CommandError::TargetMissing { id: cmd.id });
                };
                cmd.old.apply_to(module);
                module.updated_at = cmd.old_updated_at;
                Ok(())
            }
        }
    }
}
