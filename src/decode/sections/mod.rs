pub mod import;

pub use import::decode_import_section;
