pub mod types;

mod module;
pub use module::{ModuleScan, Section, SectionKind};
