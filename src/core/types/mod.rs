//! Type definitions for the decoded parts of a module.
pub mod import;
pub use import::{ImportDescriptor, ImportEntry, ImportKind};

pub mod limits;
pub use limits::Limits;
