//! Bounded undo/redo stacks
//!
//! Owns two in-memory stacks of `EditorCommand`. Executing through the
//! history is the only way an edit becomes undoable; live gesture
//! writes bypass it on purpose and are committed as one command when
//! the gesture ends. History is per-session and never persisted.

use campkit_core::constants::HISTORY_LIMIT;
use campkit_core::error::CommandError;

use crate::commands::EditorCommand;
use crate::store::MapStore;

/// Undo/redo stacks with a drop-oldest size bound.
#[derive(Debug, Clone)]
pub struct CommandHistory {
    undo_stack: Vec<EditorCommand>,
    redo_stack: Vec<EditorCommand>,
    limit: usize,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::with_limit(HISTORY_LIMIT)
    }

    /// A history bounded to `limit` undo entries (at least 1).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Apply a command and push it onto the undo stack.
    ///
    /// On success the redo stack is cleared in the same step, so a
    /// caller can never observe the new command alongside stale redo
    /// entries. A failed apply leaves both stacks and the store
    /// untouched.
    pub fn execute(
        &mut self,
        command: EditorCommand,
        store: &mut MapStore,
    ) -> Result<(), CommandError> {
        if let Err(err) = command.apply(store) {
            tracing::error!(command = command.name(), error = %err, "Command apply failed");
            return Err(err);
        }
        tracing::debug!(command = command.name(), "Executed command");
        self.undo_stack.push(command);
        if self.undo_stack.len() > self.limit {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
        store.mark_dirty();
        store.touch_document();
        Ok(())
    }

    /// Revert the most recent command. Returns false when there is
    /// nothing to undo or the revert failed (the stacks are then left
    /// as they were).
    pub fn undo(&mut self, store: &mut MapStore) -> bool {
        let Some(command) = self.undo_stack.pop() else {
            return false;
        };
        match command.undo(store) {
            Ok(()) => {
                tracing::debug!(command = command.name(), "Undid command");
                self.redo_stack.push(command);
                store.mark_dirty();
                store.touch_document();
                true
            }
            Err(err) => {
                tracing::error!(command = command.name(), error = %err, "Undo failed");
                self.undo_stack.push(command);
                false
            }
        }
    }

    /// Re-apply the most recently undone command. Returns false when
    /// there is nothing to redo or the apply failed.
    pub fn redo(&mut self, store: &mut MapStore) -> bool {
        let Some(command) = self.redo_stack.pop() else {
            return false;
        };
        match command.apply(store) {
            Ok(()) => {
                tracing::debug!(command = command.name(), "Redid command");
                self.undo_stack.push(command);
                store.mark_dirty();
                store.touch_document();
                true
            }
            Err(err) => {
                tracing::error!(command = command.name(), error = %err, "Redo failed");
                self.redo_stack.push(command);
                false
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Change the undo bound, dropping oldest entries if over it.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit.max(1);
        while self.undo_stack.len() > self.limit {
            self.undo_stack.remove(0);
        }
    }

    /// Drop both stacks (map switch or explicit reset).
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new()
    }
}
