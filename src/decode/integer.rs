//! Helpers for decoding unsigned LEB128-encoded integers.
//!
//! <https://en.wikipedia.org/wiki/LEB128>
use crate::decode::DecodeError;
use crate::decode::cursor::Cursor;

pub fn decode_u32(cursor: &mut Cursor<'_>) -> Result<u32, DecodeError> {
    let start = cursor.position();
    let mut result: u32 = 0;
    let mut shift: u32 = 0;

    // 5 == ceil(32/7)
    for i in 1..=5 {
        let byte = cursor.read_u8()?;

        result |= u32::from(byte & 0b0111_1111 /* 0x7F */) << shift;

        let continuation_bit = byte & 0b1000_0000 /* 0x80 */;
        if continuation_bit == 0 {
            if i == 5 && (byte & 0b0111_0000/* 0x70 */) != 0 {
                // 4*7=28 bits have been consumed at this point, so only the
                // low 4 bits of the last byte may carry payload.
                return Err(DecodeError::VarintOverflow {
                    offset: start,
                    bits: 32,
                });
            }
            return Ok(result);
        }

        shift += 7;
    }

    Err(DecodeError::VarintOverflow {
        offset: start,
        bits: 32,
    })
}

pub fn decode_u64(cursor: &mut Cursor<'_>) -> Result<u64, DecodeError> {
    let start = cursor.position();
    let mut result: u64 = 0;
    let mut shift: u32 = 0;

    // 10 == ceil(64/7)
    for i in 1..=10 {
        let byte = cursor.read_u8()?;

        result |= u64::from(byte & 0b0111_1111 /* 0x7F */) << shift;

        let continuation_bit = byte & 0b1000_0000 /* 0x80 */;
        if continuation_bit == 0 {
            if i == 10 && (byte & 0b0111_1110/* 0x7E */) != 0 {
                // 9*7=63 bits consumed; a single payload bit remains.
                return Err(DecodeError::VarintOverflow {
                    offset: start,
                    bits: 64,
                });
            }
            return Ok(result);
        }

        shift += 7;
    }

    Err(DecodeError::VarintOverflow {
        offset: start,
        bits: 64,
    })
}
