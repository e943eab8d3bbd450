//! Record-layer content types and the `RecordLayer` capability (spec.md §6).
//! Record cryptography, fragmentation of the wire stream into TLS records,
//! and socket I/O are all external collaborators; the driver only consumes
//! them through this trait.

use crate::core::errors::TlsResult;

/// TLS record content type, RFC 5246 §6.2.1 numbering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ContentType {
    ChangeCipherSpec = 20,
    Alert = 21,
    Handshake = 22,
    ApplicationData = 23,
}

impl ContentType {
    pub fn from_wire(byte: u8) -> Option<Self> {
        match byte {
            20 => Some(ContentType::ChangeCipherSpec),
            21 => Some(ContentType::Alert),
            22 => Some(ContentType::Handshake),
            23 => Some(ContentType::ApplicationData),
            _ => None,
        }
    }
}

/// One record delivered by the record layer, fully read and (if
/// applicable) decrypted; record-layer crypto is out of scope here.
pub struct InboundRecord {
    pub content_type: ContentType,
    pub payload: Vec<u8>,
    /// Set when the record layer detected an SSLv2-framed ClientHello.
    /// Only legal when the handshake state is `ClientHello` (spec.md §4.3).
    pub is_sslv2: bool,
    /// The 3 bytes s2n calls `header_in[2..]` for an SSLv2 record: message
    /// type followed by the 2-byte version. Only meaningful when
    /// `is_sslv2` is set.
    pub sslv2_header: [u8; 3],
}

pub enum ReadOutcome {
    Record(InboundRecord),
    Closed,
    WouldBlock,
}

pub enum FlushOutcome {
    Flushed,
    WouldBlock,
}

/// Capabilities consumed from the record layer (spec.md §6). An
/// implementation owns the `in`/`header_in`/`out` buffers and the
/// transport; the driver never touches them directly.
pub trait RecordLayer {
    fn read_record(&mut self) -> TlsResult<ReadOutcome>;
    fn write_record(&mut self, content_type: ContentType, payload: &[u8]) -> TlsResult<()>;
    fn max_write_payload_size(&self) -> usize;
    fn flush(&mut self) -> TlsResult<FlushOutcome>;
}
