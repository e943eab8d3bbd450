//! `handshake.io`: the dual-purpose buffer used to emit a handshake message
//! before fragmentation and to reassemble one inbound message from record
//! fragments (spec.md §3, Design Notes §9).

use zeroize::Zeroize;

/// A growable byte buffer with independent append and drain cursors.
///
/// On the write path: `reserve_header` stakes out the 4-byte TLS handshake
/// header, the per-state encoder `append`s the body, `patch_header` fills in
/// the now-known length, then `drain` pulls out fragments for the record
/// layer. On the read path: `append` accumulates incoming fragments,
/// `rewind_read` backs out a partial parse attempt, and `wipe` is called once
/// a full message has been consumed.
#[derive(Default)]
pub struct IoBuffer {
    data: Vec<u8>,
    read_pos: usize,
}

impl IoBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Reserves 4 zero bytes at the head of the buffer for the handshake
    /// header, to be filled in later by `patch_header`.
    pub fn reserve_header(&mut self) {
        debug_assert!(self.data.is_empty());
        self.data.extend_from_slice(&[0u8; 4]);
    }

    /// Writes `message_type` and the big-endian 24-bit length of everything
    /// appended after `reserve_header` into the reserved header bytes.
    pub fn patch_header(&mut self, message_type: u8) {
        let body_len = self.data.len() - 4;
        self.data[0] = message_type;
        self.data[1] = (body_len >> 16) as u8;
        self.data[2] = (body_len >> 8) as u8;
        self.data[3] = body_len as u8;
    }

    /// Bytes available to read, counting from the read cursor.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.read_pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Borrows the unread tail of the buffer without advancing the cursor.
    pub fn peek(&self) -> &[u8] {
        &self.data[self.read_pos..]
    }

    /// Drains up to `max` unread bytes, advancing the read cursor, and
    /// returns them as an owned chunk ready to hand to the record layer.
    pub fn drain(&mut self, max: usize) -> Vec<u8> {
        let take = max.min(self.remaining());
        let chunk = self.data[self.read_pos..self.read_pos + take].to_vec();
        self.read_pos += take;
        chunk
    }

    /// Rewinds the read cursor to the start, as if nothing had been drained.
    /// Used by the fragmented reader when a parse attempt comes up short.
    pub fn rewind_read(&mut self) {
        self.read_pos = 0;
    }

    /// Clears the buffer entirely. Spec.md §3 invariant 4: `handshake.io`
    /// is empty whenever `state` changes.
    pub fn wipe(&mut self) {
        self.data.zeroize();
        self.data.clear();
        self.read_pos = 0;
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Borrows the buffer from its absolute start, ignoring the read
    /// cursor. Used by the reassembler, which treats `IoBuffer` purely as
    /// an append-only accumulator for the message currently in flight.
    pub(crate) fn peek_from_start(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserve_and_patch_header_roundtrip() {
        let mut io = IoBuffer::new();
        io.reserve_header();
        io.append(b"hello");
        io.patch_header(2);
        assert_eq!(io.peek(), &[2, 0, 0, 5, b'h', b'e', b'l', b'l', b'o']);
    }

    #[test]
    fn drain_advances_cursor_and_wipe_resets() {
        let mut io = IoBuffer::new();
        io.append(b"0123456789");
        assert_eq!(io.drain(4), b"0123");
        assert_eq!(io.remaining(), 6);
        assert_eq!(io.drain(100), b"456789");
        assert_eq!(io.remaining(), 0);
        io.wipe();
        assert_eq!(io.len(), 0);
    }

    #[test]
    fn rewind_read_restores_full_buffer() {
        let mut io = IoBuffer::new();
        io.append(b"abcdef");
        io.drain(3);
        io.rewind_read();
        assert_eq!(io.remaining(), 6);
    }
}
