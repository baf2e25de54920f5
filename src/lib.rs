//! Walks the sections of a WebAssembly module and decodes its imports.
//!
//! The preamble is validated, every section is framed by its id and declared
//! size, and the import section (id 2) is decoded into [`ImportEntry`]
//! values. All other sections are skipped by their declared size, so modules
//! using sections this crate knows nothing about still scan fine.
//!
//! The main entry points are [`scan_module()`] and [`decode_imports()`].
//!
//! ```
//! use impdec::{ImportDescriptor, decode_imports};
//!
//! let module = [
//!     0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00, // preamble
//!     0x02, 0x0B, 0x01, // import section, one entry
//!     0x03, b'e', b'n', b'v', 0x03, b'f', b'o', b'o', 0x00, 0x03,
//! ];
//!
//! let imports = decode_imports(&module).unwrap();
//! assert_eq!(imports[0].desc, ImportDescriptor::Function { type_index: 3 });
//! ```
//!
//! <https://www.w3.org/TR/wasm-core-2/#binary-format>
#![forbid(unsafe_code)]

pub mod core;
pub mod decode;
pub mod decode_errors;

pub use crate::core::types::{ImportDescriptor, ImportEntry, ImportKind, Limits};
pub use crate::core::{ModuleScan, Section, SectionKind};
pub use crate::decode::{DecodeError, DecodeModuleError, decode_imports, scan_module};
