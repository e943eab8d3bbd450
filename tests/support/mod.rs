//! Scripted collaborators for the end-to-end scenarios in spec.md §8. These
//! stand in for the external capabilities the driver consumes (§6): a
//! record layer backed by an in-memory queue, and a `HandshakeCallbacks`
//! implementation that drives a single fixed happy-path transition per
//! state rather than any real cryptography.

use std::collections::VecDeque;

use tls_handshake_driver::core::connection::HandshakeFields;
use tls_handshake_driver::core::errors::TlsResult;
use tls_handshake_driver::core::handshake::callbacks::{Encoded, HandshakeCallbacks};
use tls_handshake_driver::core::state::HandshakeState;
use tls_handshake_driver::{ContentType, FlushOutcome, InboundRecord, ReadOutcome, RecordLayer};

/// Builds a complete wire handshake message: 4-byte header then body.
pub fn handshake_message(message_type: u8, body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + body.len());
    let len = body.len();
    out.push(message_type);
    out.push((len >> 16) as u8);
    out.push((len >> 8) as u8);
    out.push(len as u8);
    out.extend_from_slice(body);
    out
}

struct QueuedRecord {
    content_type: ContentType,
    payload: Vec<u8>,
    is_sslv2: bool,
}

/// A `RecordLayer` whose inbound side is a pre-loaded queue and whose
/// outbound side is a captured `Vec` of written `(content_type, payload)`
/// pairs. Never actually suspends: `flush` always succeeds immediately and
/// `read_record` reports `WouldBlock` only once the queue is drained.
pub struct ScriptedRecordLayer {
    inbound: VecDeque<QueuedRecord>,
    pub outbound: Vec<(ContentType, Vec<u8>)>,
    max_payload_size: usize,
}

impl ScriptedRecordLayer {
    pub fn new(max_payload_size: usize) -> Self {
        Self { inbound: VecDeque::new(), outbound: Vec::new(), max_payload_size }
    }

    /// Queues one raw record exactly as given, with no header wrapping.
    /// Used to hand-fragment a logical message across several records.
    pub fn queue_raw(&mut self, content_type: ContentType, payload: Vec<u8>) {
        self.inbound.push_back(QueuedRecord { content_type, payload, is_sslv2: false });
    }

    /// Queues one full handshake message (header + body) as a single record.
    pub fn queue_handshake_message(&mut self, message_type: u8, body: &[u8]) {
        self.queue_raw(ContentType::Handshake, handshake_message(message_type, body));
    }

    pub fn queue_ccs(&mut self) {
        self.queue_raw(ContentType::ChangeCipherSpec, vec![0x01]);
    }

    pub fn queue_alert(&mut self, payload: Vec<u8>) {
        self.queue_raw(ContentType::Alert, payload);
    }
}

impl RecordLayer for ScriptedRecordLayer {
    fn read_record(&mut self) -> TlsResult<ReadOutcome> {
        match self.inbound.pop_front() {
            None => Ok(ReadOutcome::WouldBlock),
            Some(q) => Ok(ReadOutcome::Record(InboundRecord {
                content_type: q.content_type,
                payload: q.payload,
                is_sslv2: q.is_sslv2,
                sslv2_header: [0u8; 3],
            })),
        }
    }

    fn write_record(&mut self, content_type: ContentType, payload: &[u8]) -> TlsResult<()> {
        self.outbound.push((content_type, payload.to_vec()));
        Ok(())
    }

    fn max_write_payload_size(&self) -> usize {
        self.max_payload_size
    }

    fn flush(&mut self) -> TlsResult<FlushOutcome> {
        Ok(FlushOutcome::Flushed)
    }
}

/// A `HandshakeCallbacks` implementation that drives one fixed happy path
/// through the non-ServerHello states, ignoring message contents. Good
/// enough to exercise the driver's state machine, framing, and transcript
/// plumbing without any real certificate or key-exchange logic.
#[derive(Default)]
pub struct ScriptedCallbacks {
    pub alerts_seen: Vec<Vec<u8>>,
    pub sleep_delay_calls: u32,
}

impl HandshakeCallbacks for ScriptedCallbacks {
    fn client_hello_send(&mut self, _fields: &mut HandshakeFields) -> TlsResult<Encoded> {
        Ok(Encoded::new(Vec::new(), HandshakeState::ServerHello))
    }
    fn client_hello_recv(
        &mut self,
        _body: &[u8],
        _fields: &mut HandshakeFields,
    ) -> TlsResult<HandshakeState> {
        Ok(HandshakeState::ServerHello)
    }

    fn server_cert_send(&mut self, _fields: &mut HandshakeFields) -> TlsResult<Encoded> {
        Ok(Encoded::new(vec![0xCC; 39_996], HandshakeState::ServerHelloDone))
    }
    fn server_cert_recv(
        &mut self,
        _body: &[u8],
        _fields: &mut HandshakeFields,
    ) -> TlsResult<HandshakeState> {
        Ok(HandshakeState::ServerHelloDone)
    }

    fn server_cert_status_send(&mut self, _fields: &mut HandshakeFields) -> TlsResult<Encoded> {
        Ok(Encoded::new(Vec::new(), HandshakeState::ServerHelloDone))
    }
    fn server_cert_status_recv(
        &mut self,
        _body: &[u8],
        _fields: &mut HandshakeFields,
    ) -> TlsResult<HandshakeState> {
        Ok(HandshakeState::ServerHelloDone)
    }

    fn server_key_send(&mut self, _fields: &mut HandshakeFields) -> TlsResult<Encoded> {
        Ok(Encoded::new(Vec::new(), HandshakeState::ServerHelloDone))
    }
    fn server_key_recv(
        &mut self,
        _body: &[u8],
        _fields: &mut HandshakeFields,
    ) -> TlsResult<HandshakeState> {
        Ok(HandshakeState::ServerHelloDone)
    }

    fn server_cert_request_send(&mut self, _fields: &mut HandshakeFields) -> TlsResult<Encoded> {
        Ok(Encoded::new(Vec::new(), HandshakeState::ServerHelloDone))
    }
    fn server_cert_request_recv(
        &mut self,
        _body: &[u8],
        _fields: &mut HandshakeFields,
    ) -> TlsResult<HandshakeState> {
        Ok(HandshakeState::ServerHelloDone)
    }

    fn server_hello_done_send(&mut self, _fields: &mut HandshakeFields) -> TlsResult<Encoded> {
        Ok(Encoded::new(Vec::new(), HandshakeState::ClientKey))
    }
    fn server_hello_done_recv(
        &mut self,
        _body: &[u8],
        _fields: &mut HandshakeFields,
    ) -> TlsResult<HandshakeState> {
        Ok(HandshakeState::ClientKey)
    }

    fn client_cert_send(&mut self, _fields: &mut HandshakeFields) -> TlsResult<Encoded> {
        Ok(Encoded::new(Vec::new(), HandshakeState::ClientKey))
    }
    fn client_cert_recv(
        &mut self,
        _body: &[u8],
        _fields: &mut HandshakeFields,
    ) -> TlsResult<HandshakeState> {
        Ok(HandshakeState::ClientKey)
    }

    fn client_key_send(&mut self, _fields: &mut HandshakeFields) -> TlsResult<Encoded> {
        Ok(Encoded::new(Vec::new(), HandshakeState::ClientChangeCipherSpec))
    }
    fn client_key_recv(
        &mut self,
        _body: &[u8],
        _fields: &mut HandshakeFields,
    ) -> TlsResult<HandshakeState> {
        Ok(HandshakeState::ClientChangeCipherSpec)
    }

    fn client_cert_verify_send(&mut self, _fields: &mut HandshakeFields) -> TlsResult<Encoded> {
        Ok(Encoded::new(Vec::new(), HandshakeState::ClientChangeCipherSpec))
    }
    fn client_cert_verify_recv(
        &mut self,
        _body: &[u8],
        _fields: &mut HandshakeFields,
    ) -> TlsResult<HandshakeState> {
        Ok(HandshakeState::ClientChangeCipherSpec)
    }

    fn client_ccs_send(&mut self, _fields: &mut HandshakeFields) -> TlsResult<HandshakeState> {
        Ok(HandshakeState::ClientFinished)
    }
    fn client_ccs_recv(&mut self, _fields: &mut HandshakeFields) -> TlsResult<HandshakeState> {
        Ok(HandshakeState::ClientFinished)
    }
    fn server_ccs_send(&mut self, _fields: &mut HandshakeFields) -> TlsResult<HandshakeState> {
        Ok(HandshakeState::ServerFinished)
    }
    fn server_ccs_recv(&mut self, _fields: &mut HandshakeFields) -> TlsResult<HandshakeState> {
        Ok(HandshakeState::ServerFinished)
    }

    fn client_finished_send(&mut self, _fields: &mut HandshakeFields) -> TlsResult<Encoded> {
        Ok(Encoded::new(Vec::new(), HandshakeState::ServerChangeCipherSpec))
    }
    fn client_finished_recv(
        &mut self,
        _body: &[u8],
        _fields: &mut HandshakeFields,
    ) -> TlsResult<HandshakeState> {
        Ok(HandshakeState::ServerChangeCipherSpec)
    }

    fn server_finished_send(&mut self, _fields: &mut HandshakeFields) -> TlsResult<Encoded> {
        Ok(Encoded::new(Vec::new(), HandshakeState::HandshakeOver))
    }
    fn server_finished_recv(
        &mut self,
        _body: &[u8],
        _fields: &mut HandshakeFields,
    ) -> TlsResult<HandshakeState> {
        Ok(HandshakeState::HandshakeOver)
    }

    fn server_extensions_send(
        &mut self,
        _out: &mut Vec<u8>,
        _fields: &mut HandshakeFields,
    ) -> TlsResult<()> {
        Ok(())
    }
    fn server_extensions_recv(
        &mut self,
        _extensions: &[u8],
        _fields: &mut HandshakeFields,
    ) -> TlsResult<()> {
        Ok(())
    }

    fn set_cipher_as_client(&mut self, _wire: u16, _fields: &mut HandshakeFields) -> TlsResult<()> {
        Ok(())
    }

    fn sslv2_client_hello_recv(
        &mut self,
        _body: &[u8],
        _fields: &mut HandshakeFields,
    ) -> TlsResult<HandshakeState> {
        Ok(HandshakeState::ServerHello)
    }

    fn process_alert_fragment(&mut self, payload: &[u8]) -> TlsResult<()> {
        self.alerts_seen.push(payload.to_vec());
        Ok(())
    }

    fn sleep_delay(&mut self) {
        self.sleep_delay_calls += 1;
    }
}
