//! Module entity model for campsite plans

mod kind;
mod metadata;
mod module;

pub use kind::ModuleKind;
pub use metadata::ModuleMetadata;
pub use module::{Module, ModuleChanges};
