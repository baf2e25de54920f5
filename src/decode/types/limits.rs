use crate::core::types::limits::Limits;
use crate::decode::DecodeError;
use crate::decode::cursor::Cursor;
use crate::decode::integer::decode_u32;

const HAS_MAX_FLAG: u32 = 0x01;

impl Limits {
    /// Decodes a flags varint, the minimum and, when bit 0 of the flags is
    /// set, the maximum. Other flag bits are ignored.
    pub(crate) fn decode(cursor: &mut Cursor<'_>) -> Result<Self, DecodeError> {
        let flags = decode_u32(cursor)?;
        let min = decode_u32(cursor)?;
        let max = if flags & HAS_MAX_FLAG != 0 {
            Some(decode_u32(cursor)?)
        } else {
            None
        };

        Ok(Limits { min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_min_only() {
        let mut cursor = Cursor::new(&[0x00, 0x01, 0xFF]);
        assert_eq!(
            Limits::decode(&mut cursor),
            Ok(Limits { min: 1, max: None })
        );
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn decodes_min_and_max() {
        let mut cursor = Cursor::new(&[0x01, 0x80, 0x01, 0x90, 0x03]);
        assert_eq!(
            Limits::decode(&mut cursor),
            Ok(Limits {
                min: 128,
                max: Some(400)
            })
        );
        assert!(cursor.is_at_end());
    }

    #[test]
    fn reports_truncated_maximum() {
        let mut cursor = Cursor::new(&[0x01, 0x02]);
        assert!(matches!(
            Limits::decode(&mut cursor),
            Err(DecodeError::UnexpectedEof { offset: 2, .. })
        ));
    }
}
