//! The fragmentation-aware handshake message reassembler (spec.md §4.3).
//! Delivers exactly one complete handshake message to the caller, across
//! arbitrarily many record fragments, or multiple messages concatenated in
//! a single record.

use crate::core::errors::{TlsError, TlsResult};
use crate::core::io_buffer::IoBuffer;
use crate::core::transcript::TranscriptHashes;

pub struct ReadyMessage {
    pub message_type: u8,
    pub body: Vec<u8>,
}

pub enum FeedOutcome {
    /// A complete message was assembled and transcript-hashed; `consumed`
    /// bytes of the input were used, which may be fewer than the whole
    /// input when a record carries more than one concatenated message.
    Ready { consumed: usize, message: ReadyMessage },
    /// More fragments are needed; `consumed` bytes of the input were used.
    NeedMore { consumed: usize },
}

pub struct HandshakeReader {
    io: IoBuffer,
    max_len: usize,
}

impl HandshakeReader {
    pub fn new(max_len: usize) -> Self {
        Self { io: IoBuffer::new(), max_len }
    }

    /// Feeds as many bytes of `input` as are needed to make progress on the
    /// current message. Returns how many bytes were consumed and, if the
    /// message is now complete, the assembled `(message_type, body)`.
    pub fn feed(
        &mut self,
        input: &[u8],
        transcripts: &mut TranscriptHashes,
    ) -> TlsResult<FeedOutcome> {
        let mut consumed = 0usize;

        // Step 1: complete the 4-byte header if we don't have it yet.
        if self.io.len() < 4 {
            let need = 4 - self.io.len();
            let take = need.min(input.len());
            self.io.append(&input[..take]);
            consumed += take;
            if self.io.len() < 4 {
                return Ok(FeedOutcome::NeedMore { consumed });
            }
        }

        // Step 2: parse the header (cheap to redo; `io` holds it verbatim).
        let header = self.io.peek_header();
        let message_type = header[0];
        let message_length =
            ((header[1] as u32) << 16) | ((header[2] as u32) << 8) | header[3] as u32;
        if message_length as usize > self.max_len {
            return Err(TlsError::bad_message(
                "handshake message length exceeds configured maximum",
            ));
        }

        // Step 3: copy min(remaining_needed, available) bytes of body.
        let total_needed = 4 + message_length as usize;
        let have = self.io.len();
        let remaining_input = &input[consumed..];
        if have < total_needed {
            let body_need = total_needed - have;
            let take = body_need.min(remaining_input.len());
            self.io.append(&remaining_input[..take]);
            consumed += take;
        }

        // Step 4/5: ready, or rewind and ask for more.
        if self.io.len() == total_needed {
            let message = self.io.take_message();
            transcripts.update_all(&message);
            self.io.wipe();
            Ok(FeedOutcome::Ready {
                consumed,
                message: ReadyMessage { message_type, body: message[4..].to_vec() },
            })
        } else {
            Ok(FeedOutcome::NeedMore { consumed })
        }
    }
}

impl IoBuffer {
    fn peek_header(&self) -> [u8; 4] {
        let s = self.peek_from_start();
        [s[0], s[1], s[2], s[3]]
    }

    fn take_message(&self) -> Vec<u8> {
        self.peek_from_start().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(message_type: u8, len: usize) -> [u8; 4] {
        [message_type, (len >> 16) as u8, (len >> 8) as u8, len as u8]
    }

    #[test]
    fn assembles_message_delivered_whole() {
        let mut reader = HandshakeReader::new(1 << 16);
        let mut t = TranscriptHashes::new();
        let mut msg = header(2, 5).to_vec();
        msg.extend_from_slice(b"hello");

        match reader.feed(&msg, &mut t).unwrap() {
            FeedOutcome::Ready { consumed, message } => {
                assert_eq!(consumed, msg.len());
                assert_eq!(message.message_type, 2);
                assert_eq!(message.body, b"hello");
            }
            _ => panic!("expected Ready"),
        }
    }

    #[test]
    fn reassembles_across_byte_level_fragments() {
        // Property 3: arbitrary re-fragmentation yields the same result.
        let mut msg = header(2, 5).to_vec();
        msg.extend_from_slice(b"hello");

        for split in [1usize, 2, 4, 5, 9] {
            let mut reader = HandshakeReader::new(1 << 16);
            let mut t = TranscriptHashes::new();
            let (first, second) = msg.split_at(split);

            let outcome1 = reader.feed(first, &mut t).unwrap();
            let ready = match outcome1 {
                FeedOutcome::Ready { message, .. } => Some(message),
                FeedOutcome::NeedMore { consumed } => {
                    assert_eq!(consumed, first.len());
                    None
                }
            };
            let ready = match ready {
                Some(m) => m,
                None => match reader.feed(second, &mut t).unwrap() {
                    FeedOutcome::Ready { message, .. } => message,
                    FeedOutcome::NeedMore { .. } => panic!("expected completion at split {split}"),
                },
            };
            assert_eq!(ready.message_type, 2);
            assert_eq!(ready.body, b"hello");
        }
    }

    #[test]
    fn rejects_length_above_configured_maximum() {
        let mut reader = HandshakeReader::new(4);
        let mut t = TranscriptHashes::new();
        let msg = header(2, 5);
        let err = reader.feed(&msg, &mut t).unwrap_err();
        assert!(matches!(err, TlsError::BadMessage { .. }));
    }

    #[test]
    fn partial_header_alone_needs_more() {
        let mut reader = HandshakeReader::new(1 << 16);
        let mut t = TranscriptHashes::new();
        match reader.feed(&[1, 0, 0], &mut t).unwrap() {
            FeedOutcome::NeedMore { consumed } => assert_eq!(consumed, 3),
            FeedOutcome::Ready { .. } => panic!("expected NeedMore"),
        }
    }

    #[test]
    fn zero_length_message_completes_on_header_alone() {
        let mut reader = HandshakeReader::new(1 << 16);
        let mut t = TranscriptHashes::new();
        let msg = header(14, 0);
        match reader.feed(&msg, &mut t).unwrap() {
            FeedOutcome::Ready { consumed, message } => {
                assert_eq!(consumed, 4);
                assert_eq!(message.message_type, 14);
                assert!(message.body.is_empty());
            }
            _ => panic!("expected Ready"),
        }
    }
}
