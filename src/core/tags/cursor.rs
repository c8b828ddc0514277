//! core/tags/cursor.rs
//! Read-only cursor over a tag buffer with a hard upper bound.
//!
//! Every read checks `pos + n <= limit` first, and `limit` never exceeds the
//! buffer length, so the scan can't walk off either end.

pub(crate) struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
    limit: usize,
}

impl<'a> Cursor<'a> {
    /// Cursor at `start`, bounded by `end` (clamped to the buffer).
    pub(crate) fn bounded(buf: &'a [u8], start: usize, end: usize) -> Self {
        let limit = end.min(buf.len());
        Self {
            buf,
            pos: start.min(limit),
            limit,
        }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn remaining(&self) -> usize {
        self.limit - self.pos
    }

    /// Borrow the next `n` bytes and advance past them.
    pub(crate) fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        if n > self.remaining() {
            return None;
        }
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Some(out)
    }

    pub(crate) fn take_array<const N: usize>(&mut self) -> Option<[u8; N]> {
        self.take(N)?.try_into().ok()
    }

    pub(crate) fn read_u32_be(&mut self) -> Option<u32> {
        self.take_array::<4>().map(u32::from_be_bytes)
    }

    pub(crate) fn read_u16_be(&mut self) -> Option<u16> {
        self.take_array::<2>().map(u16::from_be_bytes)
    }
}
