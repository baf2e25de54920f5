//! Helpers for walking a module's sections and decoding its imports.
pub mod cursor;
mod error;
pub mod integer;
pub(crate) mod module;
pub mod sections;
pub(crate) mod types;

pub use cursor::Cursor;
pub use error::DecodeError;
pub use module::{
    DecodeModuleError, MAGIC_NUMBER, PREAMBLE_LEN, SUPPORTED_VERSION, SectionWalker,
    decode_imports, parse_preamble, scan_module,
};

/// A byte that does not appear in a [`FromMarkerByte`] table.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct InvalidMarkerByte(pub u8);

impl From<u8> for InvalidMarkerByte {
    fn from(b: u8) -> Self {
        Self(b)
    }
}

pub(crate) trait FromMarkerByte
where
    Self: Sized + Copy + std::fmt::Debug + 'static,
{
    type Error: From<u8>;

    // defines the mapping between expected bytes and the corresponding variant
    fn markers() -> &'static phf::OrderedMap<u8, Self>;

    fn markers_formatted() -> String {
        Self::markers()
            .entries()
            .map(|(marker, variant)| format!("{marker:#04X} ({variant:?})"))
            .collect::<Vec<String>>()
            .join(", ")
    }

    fn from_marker(b: u8) -> Result<Self, Self::Error> {
        match Self::markers().get(&b) {
            Some(n) => Ok(*n),
            None => Err(b.into()),
        }
    }
}
