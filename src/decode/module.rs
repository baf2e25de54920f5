use crate::core::types::import::ImportEntry;
use crate::core::{ModuleScan, Section, SectionKind};
use crate::decode::cursor::Cursor;
use crate::decode::integer::decode_u32;
use crate::decode::sections::decode_import_section;
use crate::decode::{DecodeError, FromMarkerByte, InvalidMarkerByte};
use log::debug;
use phf::phf_ordered_map;
use std::iter::FusedIterator;
use thiserror::Error;

pub const MAGIC_NUMBER: [u8; 4] = [0x00, 0x61, 0x73, 0x6D];
pub const SUPPORTED_VERSION: u32 = 1;

/// Size of the magic number plus the version field.
pub const PREAMBLE_LEN: usize = 8;

// Valid marker bytes for [SectionKind].
#[expect(non_upper_case_globals)]
static SectionId_MARKERS: phf::OrderedMap<u8, SectionKind> = phf_ordered_map! {
            0u8 => SectionKind::Custom,
            1u8 => SectionKind::Type,
            2u8 => SectionKind::Import,
            3u8 => SectionKind::Function,
            4u8 => SectionKind::Table,
            5u8 => SectionKind::Memory,
            6u8 => SectionKind::Global,
            7u8 => SectionKind::Export,
            8u8 => SectionKind::Start,
            9u8 => SectionKind::Element,
            10u8 => SectionKind::Code,
            11u8 => SectionKind::Data,
            12u8 => SectionKind::DataCount,
};

impl FromMarkerByte for SectionKind {
    type Error = InvalidMarkerByte;

    fn markers() -> &'static phf::OrderedMap<u8, Self> {
        &SectionId_MARKERS
    }
}

/// The top-level error that may occur when scanning a module.
#[derive(Debug, Error, PartialEq, Clone)]
pub enum DecodeModuleError {
    /// The header or the framing of a section is malformed.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The payload of a section could not be decoded.
    #[error(
        "failed decoding {} section (id {id}) starting at offset {payload_start:#x}",
        section_name(.id)
    )]
    Section {
        id: u8,
        payload_start: usize,
        #[source]
        source: DecodeError,
    },
}

impl DecodeModuleError {
    /// Absolute offset in the input at which the scan stopped.
    pub fn offset(&self) -> usize {
        match self {
            Self::Decode(err) => err.offset(),
            Self::Section {
                payload_start,
                source: source @ DecodeError::UnknownImportKind { .. },
                ..
            } => payload_start + source.offset(),
            Self::Section { source, .. } => source.offset(),
        }
    }

    /// Id of the section being decoded when the error occurred, if any.
    pub fn section_id(&self) -> Option<u8> {
        match self {
            Self::Section { id, .. } => Some(*id),
            _ => None,
        }
    }

    /// The underlying decode error.
    pub fn decode_error(&self) -> &DecodeError {
        match self {
            Self::Decode(err) | Self::Section { source: err, .. } => err,
        }
    }
}

fn section_name(id: &u8) -> String {
    match SectionKind::from_marker(*id) {
        Ok(kind) => format!("{kind:?}"),
        Err(_) => "unknown".to_owned(),
    }
}

/// Validates the magic number and version, returning the version.
///
/// On success the cursor sits right after the preamble.
pub fn parse_preamble(cursor: &mut Cursor<'_>) -> Result<u32, DecodeError> {
    let offset = cursor.position();

    // a short input only gets UnexpectedEof if what is there is a prefix of
    // the magic number
    let present = cursor.peek(MAGIC_NUMBER.len());
    if present.is_empty() || !MAGIC_NUMBER.starts_with(present) {
        return Err(DecodeError::MagicMismatch {
            offset,
            got: present.to_vec(),
        });
    }
    cursor.read_array::<4>()?;

    let offset = cursor.position();
    let version = u32::from_le_bytes(cursor.read_array()?);
    if version != SUPPORTED_VERSION {
        return Err(DecodeError::UnsupportedVersion { offset, version });
    }

    Ok(version)
}

/// Iterates over the sections following the preamble.
///
/// Every step first moves the cursor to the end of the previously yielded
/// section, whatever the caller did with its payload, so a section never has
/// to be understood to be skipped. The walk ends when the cursor reaches the
/// end of the input; after the first error it yields nothing more.
#[derive(Debug)]
pub struct SectionWalker<'a> {
    cursor: Cursor<'a>,
    next_section: usize,
    done: bool,
}

impl<'a> SectionWalker<'a> {
    pub fn new(cursor: Cursor<'a>) -> Self {
        let next_section = cursor.position();
        SectionWalker {
            cursor,
            next_section,
            done: false,
        }
    }

    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    fn step(&mut self) -> Result<Option<Section>, DecodeError> {
        self.cursor.skip_to(self.next_section)?;
        if self.cursor.is_at_end() {
            return Ok(None);
        }

        let offset = self.cursor.position();
        let id = self.cursor.read_u8()?;
        let size = decode_u32(&mut self.cursor)?;

        let payload_start = self.cursor.position();
        let payload_end = payload_start.saturating_add(usize::try_from(size).unwrap_or(usize::MAX));
        if payload_end > self.cursor.end() {
            return Err(DecodeError::SectionOverflow {
                offset,
                end: payload_end,
                len: self.cursor.end(),
            });
        }

        self.next_section = payload_end;
        Ok(Some(Section {
            id,
            payload_start,
            payload_end,
        }))
    }
}

impl Iterator for SectionWalker<'_> {
    type Item = Result<Section, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.step() {
            Ok(Some(section)) => Some(Ok(section)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl FusedIterator for SectionWalker<'_> {}

/// Scans `input` as a complete module: validates the preamble, walks every
/// section and decodes the import section.
///
/// The first error aborts the scan; no partial result is returned.
pub fn scan_module(input: &[u8]) -> Result<ModuleScan, DecodeModuleError> {
    let mut cursor = Cursor::new(input);
    let version = parse_preamble(&mut cursor)?;
    debug!("accepted preamble, version {version}, {} bytes total", input.len());

    let mut scan = ModuleScan {
        version,
        ..Default::default()
    };

    let mut walker = SectionWalker::new(cursor);
    for section in walker.by_ref() {
        let section = section?;
        debug!(
            "section id {} ({}) at {:#x}..{:#x}",
            section.id,
            section_name(&section.id),
            section.payload_start,
            section.payload_end
        );

        if section.kind() == Some(SectionKind::Import) {
            let imports = decode_import_section(input, &section).map_err(|source| {
                DecodeModuleError::Section {
                    id: section.id,
                    payload_start: section.payload_start,
                    source,
                }
            })?;
            debug!("decoded {} import(s)", imports.len());
            scan.imports.extend(imports);
        }

        scan.sections.push(section);
    }

    // the walker only stops cleanly once it has reached the end of the input
    debug_assert_eq!(walker.position(), input.len());

    Ok(scan)
}

/// Decode the imports declared by the module in `input`.
pub fn decode_imports(input: &[u8]) -> Result<Vec<ImportEntry>, DecodeModuleError> {
    Ok(scan_module(input)?.into_imports())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREAMBLE: [u8; 8] = [0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00];

    fn module(sections: &[u8]) -> Vec<u8> {
        let mut bytes = PREAMBLE.to_vec();
        bytes.extend_from_slice(sections);
        bytes
    }

    #[test]
    fn preamble_leaves_cursor_at_eight() {
        let bytes = module(&[]);
        let mut cursor = Cursor::new(&bytes);
        assert_eq!(parse_preamble(&mut cursor), Ok(1));
        assert_eq!(cursor.position(), PREAMBLE_LEN);
    }

    #[test]
    fn preamble_rejects_bad_magic_and_version() {
        let mut cursor = Cursor::new(&[0x00, 0x61, 0x73, 0x6E, 0x01, 0x00, 0x00, 0x00]);
        assert_eq!(
            parse_preamble(&mut cursor),
            Err(DecodeError::MagicMismatch {
                offset: 0,
                got: vec![0x00, 0x61, 0x73, 0x6E]
            })
        );

        let mut cursor = Cursor::new(b"ELF");
        assert_eq!(
            parse_preamble(&mut cursor),
            Err(DecodeError::MagicMismatch {
                offset: 0,
                got: b"ELF".to_vec()
            })
        );
        assert_eq!(cursor.position(), 0);

        let mut cursor = Cursor::new(&[0x00, 0x61]);
        assert!(matches!(
            parse_preamble(&mut cursor),
            Err(DecodeError::UnexpectedEof {
                offset: 0,
                needed: 4,
                available: 2
            })
        ));

        let mut cursor = Cursor::new(&[0x00, 0x61, 0x73, 0x6D, 0x01]);
        assert!(matches!(
            parse_preamble(&mut cursor),
            Err(DecodeError::UnexpectedEof { offset: 4, .. })
        ));

        let mut cursor = Cursor::new(&[0x00, 0x61, 0x73, 0x6D, 0x02, 0x00, 0x00, 0x00]);
        assert_eq!(
            parse_preamble(&mut cursor),
            Err(DecodeError::UnsupportedVersion {
                offset: 4,
                version: 2
            })
        );
    }

    #[test]
    fn walker_yields_sections_and_skips_payloads() {
        let bytes = module(&[0x63, 0x02, 0xAA, 0xBB, 0x00, 0x00, 0x01, 0x01, 0x00]);
        let mut cursor = Cursor::new(&bytes);
        parse_preamble(&mut cursor).unwrap();

        let sections: Vec<_> = SectionWalker::new(cursor)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(
            sections,
            vec![
                Section {
                    id: 99,
                    payload_start: 10,
                    payload_end: 12
                },
                Section {
                    id: 0,
                    payload_start: 14,
                    payload_end: 14
                },
                Section {
                    id: 1,
                    payload_start: 16,
                    payload_end: 17
                },
            ]
        );
        assert_eq!(sections[0].kind(), None);
        assert_eq!(sections[2].kind(), Some(SectionKind::Type));
    }

    #[test]
    fn walker_rejects_overflowing_section_then_stops() {
        let bytes = module(&[0x01, 0x05, 0x00]);
        let mut cursor = Cursor::new(&bytes);
        parse_preamble(&mut cursor).unwrap();

        let mut walker = SectionWalker::new(cursor);
        assert_eq!(
            walker.next(),
            Some(Err(DecodeError::SectionOverflow {
                offset: 8,
                end: 15,
                len: 11
            }))
        );
        assert_eq!(walker.next(), None);
    }

    #[test]
    fn exhausted_walker_sits_at_end_of_input() {
        // trailing section with an empty payload, then nothing
        let bytes = module(&[0x63, 0x02, 0xAA, 0xBB, 0x00, 0x00]);
        let mut cursor = Cursor::new(&bytes);
        parse_preamble(&mut cursor).unwrap();

        let mut walker = SectionWalker::new(cursor);
        assert_eq!(walker.by_ref().count(), 2);
        assert_eq!(walker.position(), bytes.len());

        // a section that would end past the input is an overflow, not a
        // short walk
        let bytes = module(&[0x00, 0x03, 0xAA]);
        assert!(matches!(
            scan_module(&bytes),
            Err(DecodeModuleError::Decode(DecodeError::SectionOverflow { .. }))
        ));
    }

    #[test]
    fn error_offsets_are_absolute() {
        // import section whose single entry has kind 0x09
        let bytes = module(&[0x02, 0x06, 0x01, 0x01, b'a', 0x01, b'b', 0x09]);
        let err = scan_module(&bytes).unwrap_err();
        assert_eq!(err.section_id(), Some(2));
        assert_eq!(err.offset(), 15);
        assert_eq!(
            err.decode_error(),
            &DecodeError::UnknownImportKind {
                byte: 0x09,
                offset: 5
            }
        );
    }

    #[test]
    fn section_error_message_names_the_section() {
        let bytes = module(&[0x02, 0x01, 0x01]);
        let err = scan_module(&bytes).unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed decoding Import section (id 2) starting at offset 0xa"
        );
    }
}
