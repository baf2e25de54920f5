use crate::core::types::import::ImportKind;
use crate::decode::FromMarkerByte;
use crate::decode::module::{MAGIC_NUMBER, SUPPORTED_VERSION};
use std::str::Utf8Error;
use thiserror::Error;

/// Every way a scan can fail below the module level.
///
/// All offsets are absolute positions in the input buffer, except for
/// [`DecodeError::UnknownImportKind`], whose offset is relative to the start
/// of the import section payload.
#[derive(Debug, Error, PartialEq, Clone)]
pub enum DecodeError {
    #[error(
        "unexpected magic number at offset {offset:#x}: expected {expected:02X?}; got {got:02X?}",
        expected = MAGIC_NUMBER
    )]
    MagicMismatch { offset: usize, got: Vec<u8> },

    #[error(
        "unsupported version {version} at offset {offset:#x}: expected {expected}",
        expected = SUPPORTED_VERSION
    )]
    UnsupportedVersion { offset: usize, version: u32 },

    #[error(
        "unexpected end of input at offset {offset:#x}: needed {needed} byte(s), {available} available"
    )]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("LEB128 integer at offset {offset:#x} does not fit in {bits} bits")]
    VarintOverflow { offset: usize, bits: u32 },

    #[error("invalid UTF-8 in name at offset {offset:#x}")]
    Utf8DecodeError {
        offset: usize,
        #[source]
        source: Utf8Error,
    },

    #[error(
        "section declared at offset {offset:#x} ends at {end:#x}, past the end of the {len}-byte input"
    )]
    SectionOverflow { offset: usize, end: usize, len: usize },

    #[error(
        "invalid import kind {byte:#04X} at section offset {offset:#x}: expected one of {markers}",
        markers = ImportKind::markers_formatted()
    )]
    UnknownImportKind { byte: u8, offset: usize },
}

impl DecodeError {
    /// The offset carried by the error.
    pub fn offset(&self) -> usize {
        match self {
            Self::MagicMismatch { offset, .. }
            | Self::UnsupportedVersion { offset, .. }
            | Self::UnexpectedEof { offset, .. }
            | Self::VarintOverflow { offset, .. }
            | Self::Utf8DecodeError { offset, .. }
            | Self::SectionOverflow { offset, .. }
            | Self::UnknownImportKind { offset, .. } => *offset,
        }
    }
}
