use crate::core::types::limits::Limits;

/// The imports component of a module defines a set of imports that are required for
/// instantiation. Each import is labeled by a two-level name space, consisting of a module
/// name and a name for an entity within that module. Importable definitions are functions,
/// tables, memories, and globals.
///
/// Entries own their names; nothing borrows from the decoded buffer.
///
/// <https://www.w3.org/TR/wasm-core-2/#imports>
/// <https://www.w3.org/TR/wasm-core-2/#import-section>
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ImportEntry {
    pub module: String,
    pub name: String,
    pub desc: ImportDescriptor,
}

impl ImportEntry {
    /// Whether the entry is imported from the `module` namespace, e.g. `env`.
    pub fn is_from(&self, module: &str) -> bool {
        self.module == module
    }
}

/// What an import expects the host to provide.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum ImportDescriptor {
    Function { type_index: u32 },

    /// `reference_type` is the raw type byte (0x70 funcref, 0x6F externref).
    Table { reference_type: u8, limits: Limits },

    Memory { limits: Limits },

    /// `value_type` is the raw type byte, e.g. 0x7F for i32.
    Global { value_type: u8, mutable: bool },
}

impl ImportDescriptor {
    pub fn kind(&self) -> ImportKind {
        match self {
            Self::Function { .. } => ImportKind::Function,
            Self::Table { .. } => ImportKind::Table,
            Self::Memory { .. } => ImportKind::Memory,
            Self::Global { .. } => ImportKind::Global,
        }
    }
}

/// The marker byte that selects an [`ImportDescriptor`] variant.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ImportKind {
    Function,
    Table,
    Memory,
    Global,
}
