//! Error handling for Campkit
//!
//! Provides error types for the two layers of the engine:
//! - Map errors (document/module level)
//! - Command errors (reversible edit execution)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;
use uuid::Uuid;

/// Map document error type
///
/// Represents errors related to the map document and its modules,
/// including missing entities, invalid geometry, and clipboard issues.
#[derive(Error, Debug, Clone)]
pub enum MapError {
    /// Module does not exist in the document
    #[error("Module not found: {id}")]
    ModuleNotFound {
        /// The id of the missing module.
        id: Uuid,
    },

    /// A module with this id is already present
    #[error("Duplicate module id: {id}")]
    DuplicateModuleId {
        /// The id that is already in use.
        id: Uuid,
    },

    /// Map boundaries are degenerate or inverted
    #[error("Invalid map bounds: {reason}")]
    InvalidBounds {
        /// The reason the bounds are invalid.
        reason: String,
    },

    /// Clipboard operation on an empty clipboard
    #[error("Clipboard is empty")]
    EmptyClipboard,

    /// Every module in a batch was rejected by sanitization
    #[error("No valid modules in batch: {dropped} dropped by sanitization")]
    NoValidModules {
        /// How many modules were dropped.
        dropped: usize,
    },

    /// Generic map error
    #[error("Map error: {message}")]
    Other {
        /// The error message.
        message: String,
    },
}

/// Command error type
///
/// Represents failures while applying or reverting a reversible edit.
/// A failed command leaves the undo/redo stacks untouched.
#[derive(Error, Debug, Clone)]
pub enum CommandError {
    /// A module the command targets is missing from the store
    #[error("Command target missing: {id}")]
    TargetMissing {
        /// The id of the missing target module.
        id: Uuid,
    },

    /// Applying the command would insert an id that already exists
    #[error("Command target already exists: {id}")]
    TargetExists {
        /// The id that is already present.
        id: Uuid,
    },

    /// Command carries no entries to apply
    #[error("Command is empty: {name}")]
    Empty {
        /// The display name of the command.
        name: String,
    },

    /// Generic command error
    #[error("Command error: {message}")]
    Other {
        /// The error message.
        message: String,
    },
}

/// Main error type for Campkit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Map document error
    #[error(transparent)]
    Map(#[from] MapError),

    /// Command execution error
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a map error
    pub fn is_map_error(&self) -> bool {
        matches!(self, Error::Map(_))
    }

    /// Check if this is a command error
    pub fn is_command_error(&self) -> bool {
        matches!(self, Error::Command(_))
    }

    /// Check if this error means a referenced module is gone
    pub fn is_missing_module(&self) -> bool {
        matches!(
            self,
            Error::Map(MapError::ModuleNotFound { .. })
                | Error::Command(CommandError::TargetMissing { .. })
        )
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

// Conversions between error types are automatic via `from` implementations
