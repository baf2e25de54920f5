//! Convenience re-exports for decode-related error types.

pub use crate::decode::InvalidMarkerByte;
pub use crate::decode::{DecodeError, DecodeModuleError};
