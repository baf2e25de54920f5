//! A bounds-checked reader over an in-memory module.
use crate::decode::DecodeError;

/// Sequential reader over an immutable byte buffer.
///
/// The cursor is the only thing that tracks a position in the input. Every
/// decoder takes it by `&mut` and asks it for bytes; nothing else stores an
/// offset it later writes back. On error the position is left where the
/// failing read started.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Cursor { buf, pos: 0 }
    }

    /// A cursor over `buf[..end]`, positioned at `start`.
    ///
    /// Offsets reported by the returned cursor are still absolute positions
    /// in `buf`, but it refuses to read at or past `end`.
    pub fn bounded(buf: &'a [u8], start: usize, end: usize) -> Result<Self, DecodeError> {
        if end > buf.len() || start > end {
            return Err(DecodeError::SectionOverflow {
                offset: start,
                end,
                len: buf.len(),
            });
        }

        Ok(Cursor {
            buf: &buf[..end],
            pos: start,
        })
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// One past the last readable offset.
    pub fn end(&self) -> usize {
        self.buf.len()
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos == self.buf.len()
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let byte = *self.buf.get(self.pos).ok_or(DecodeError::UnexpectedEof {
            offset: self.pos,
            needed: 1,
            available: 0,
        })?;
        self.pos += 1;
        Ok(byte)
    }

    pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        let available = self.remaining();
        if n > available {
            return Err(DecodeError::UnexpectedEof {
                offset: self.pos,
                needed: n,
                available,
            });
        }

        let bytes = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Up to `n` bytes from the current position, without advancing.
    pub fn peek(&self, n: usize) -> &'a [u8] {
        let end = self.pos + n.min(self.remaining());
        &self.buf[self.pos..end]
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_exact(N)?);
        Ok(out)
    }

    /// Moves the position forward to `offset`.
    ///
    /// The position is monotonic: an `offset` behind the current position
    /// leaves it untouched.
    pub fn skip_to(&mut self, offset: usize) -> Result<(), DecodeError> {
        if offset > self.buf.len() {
            return Err(DecodeError::SectionOverflow {
                offset: self.pos,
                end: offset,
                len: self.buf.len(),
            });
        }

        self.pos = self.pos.max(offset);
        Ok(())
    }
}
