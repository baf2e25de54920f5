use crate::core::Section;
use crate::core::types::import::{ImportDescriptor, ImportEntry, ImportKind};
use crate::core::types::limits::Limits;
use crate::decode::cursor::Cursor;
use crate::decode::integer::decode_u32;
use crate::decode::{DecodeError, FromMarkerByte, InvalidMarkerByte};
use log::trace;
use phf::phf_ordered_map;

// smallest possible entry: two empty names, a kind byte and a one-byte payload
const MIN_ENTRY_LEN: usize = 4;

/// Decodes the payload of `section` (which must lie within `input`) as an
/// import section.
///
/// Reading never goes past `section.payload_end`, but the payload does not
/// have to be fully consumed.
pub fn decode_import_section(
    input: &[u8],
    section: &Section,
) -> Result<Vec<ImportEntry>, DecodeError> {
    let mut cursor = Cursor::bounded(input, section.payload_start, section.payload_end)?;

    let count = decode_u32(&mut cursor)?;
    let capacity = usize::try_from(count)
        .unwrap_or(usize::MAX)
        .min(cursor.remaining() / MIN_ENTRY_LEN);

    let mut imports = Vec::with_capacity(capacity);
    for _ in 0..count {
        let import = parse_import(&mut cursor, section.payload_start)?;
        trace!("import {}.{}: {:?}", import.module, import.name, import.desc);
        imports.push(import);
    }

    Ok(imports)
}

fn parse_import(cursor: &mut Cursor<'_>, payload_start: usize) -> Result<ImportEntry, DecodeError> {
    let module = decode_name(cursor)?;
    let name = decode_name(cursor)?;

    let kind_offset = cursor.position();
    let kind = ImportKind::from_marker(cursor.read_u8()?).map_err(|InvalidMarkerByte(byte)| {
        DecodeError::UnknownImportKind {
            byte,
            offset: kind_offset - payload_start,
        }
    })?;

    let desc = match kind {
        ImportKind::Function => ImportDescriptor::Function {
            type_index: decode_u32(cursor)?,
        },
        ImportKind::Table => {
            let reference_type = cursor.read_u8()?;
            let limits = Limits::decode(cursor)?;
            ImportDescriptor::Table {
                reference_type,
                limits,
            }
        }
        ImportKind::Memory => ImportDescriptor::Memory {
            limits: Limits::decode(cursor)?,
        },
        ImportKind::Global => {
            // value type and mutability, one byte each
            let value_type = cursor.read_u8()?;
            let mutable = cursor.read_u8()? != 0;
            ImportDescriptor::Global {
                value_type,
                mutable,
            }
        }
    };

    Ok(ImportEntry { module, name, desc })
}

/// Decodes a length-prefixed UTF-8 name and copies it out of the buffer.
fn decode_name(cursor: &mut Cursor<'_>) -> Result<String, DecodeError> {
    let len = decode_u32(cursor)?;
    let offset = cursor.position();
    let bytes = cursor.read_exact(usize::try_from(len).unwrap_or(usize::MAX))?;

    match std::str::from_utf8(bytes) {
        Ok(name) => Ok(name.to_owned()),
        Err(source) => Err(DecodeError::Utf8DecodeError {
            offset: offset + source.valid_up_to(),
            source,
        }),
    }
}

// Valid marker bytes for [ImportKind].
#[expect(non_upper_case_globals)]
static ImportKind_MARKERS: phf::OrderedMap<u8, ImportKind> = phf_ordered_map! {
    0x00u8 => ImportKind::Function,
    0x01u8 => ImportKind::Table,
    0x02u8 => ImportKind::Memory,
    0x03u8 => ImportKind::Global,
};

impl FromMarkerByte for ImportKind {
    type Error = InvalidMarkerByte;

    fn markers() -> &'static phf::OrderedMap<u8, Self> {
        &ImportKind_MARKERS
    }
}
