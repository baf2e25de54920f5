use crate::core::types::import::ImportEntry;
use crate::decode::FromMarkerByte;

/// The result of scanning a module: its version, the framing of every section
/// in file order, and the entries of its import section.
///
/// <https://www.w3.org/TR/wasm-core-2/#binary-module>
#[derive(Debug, PartialEq, Eq, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ModuleScan {
    pub version: u32,
    pub sections: Vec<Section>,
    pub imports: Vec<ImportEntry>,
}

impl ModuleScan {
    /// Imports whose module name equals `module`, in file order.
    pub fn imports_from<'a>(&'a self, module: &'a str) -> impl Iterator<Item = &'a ImportEntry> {
        self.imports.iter().filter(move |import| import.is_from(module))
    }

    pub fn into_imports(self) -> Vec<ImportEntry> {
        self.imports
    }
}

/// Each section consists of a one-byte section id, the u32 size of the contents
/// (in bytes), and the actual contents, whose structure is dependent on the section id.
///
/// `payload_start..payload_end` is the byte range of the contents in the
/// scanned buffer, so `payload_end - payload_start` is the declared size.
///
/// <https://www.w3.org/TR/wasm-core-2/#sections>
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Section {
    pub id: u8,
    pub payload_start: usize,
    pub payload_end: usize,
}

impl Section {
    /// The standard kind for this id, or `None` for ids outside 0..=12.
    pub fn kind(&self) -> Option<SectionKind> {
        SectionKind::from_marker(self.id).ok()
    }

    pub fn len(&self) -> usize {
        self.payload_end - self.payload_start
    }

    pub fn is_empty(&self) -> bool {
        self.payload_end == self.payload_start
    }
}

#[derive(PartialEq, Eq, PartialOrd, Debug, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SectionKind {
    Custom,
    Type,
    Import,
    Function,
    Table,
    Memory,
    Global,
    Export,
    Start,
    Element,
    DataCount,
    Code,
    Data,
}
