//! External per-message codecs and policy hooks (spec.md §6). Every
//! handshake message other than ServerHello, cipher-suite selection,
//! alert generation, and the uniform error-path delay are named only by
//! their position in the state table; this crate consumes them as an
//! injected capability rather than implementing them.

use crate::core::connection::HandshakeFields;
use crate::core::errors::TlsResult;
use crate::core::state::HandshakeState;

/// One outbound message: the encoded body (header-less; the driver
/// prepends the 4-byte handshake header) and the state to advance to.
pub struct Encoded {
    pub body: Vec<u8>,
    pub next_state: HandshakeState,
}

impl Encoded {
    pub fn new(body: Vec<u8>, next_state: HandshakeState) -> Self {
        Self { body, next_state }
    }
}

/// The full set of capabilities the driver consumes from the embedder:
/// per-message codec bodies, cipher-suite selection, alert processing, and
/// the read-path timing-uniform delay. ServerHello is handled directly by
/// the driver (spec.md §4.2) and is not part of this trait.
pub trait HandshakeCallbacks {
    fn client_hello_send(&mut self, fields: &mut HandshakeFields) -> TlsResult<Encoded>;
    fn client_hello_recv(&mut self, body: &[u8], fields: &mut HandshakeFields) -> TlsResult<HandshakeState>;

    fn server_cert_send(&mut self, fields: &mut HandshakeFields) -> TlsResult<Encoded>;
    fn server_cert_recv(&mut self, body: &[u8], fields: &mut HandshakeFields) -> TlsResult<HandshakeState>;

    fn server_cert_status_send(&mut self, fields: &mut HandshakeFields) -> TlsResult<Encoded>;
    fn server_cert_status_recv(&mut self, body: &[u8], fields: &mut HandshakeFields) -> TlsResult<HandshakeState>;

    fn server_key_send(&mut self, fields: &mut HandshakeFields) -> TlsResult<Encoded>;
    fn server_key_recv(&mut self, body: &[u8], fields: &mut HandshakeFields) -> TlsResult<HandshakeState>;

    fn server_cert_request_send(&mut self, fields: &mut HandshakeFields) -> TlsResult<Encoded>;
    fn server_cert_request_recv(&mut self, body: &[u8], fields: &mut HandshakeFields) -> TlsResult<HandshakeState>;

    fn server_hello_done_send(&mut self, fields: &mut HandshakeFields) -> TlsResult<Encoded>;
    fn server_hello_done_recv(&mut self, body: &[u8], fields: &mut HandshakeFields) -> TlsResult<HandshakeState>;

    fn client_cert_send(&mut self, fields: &mut HandshakeFields) -> TlsResult<Encoded>;
    fn client_cert_recv(&mut self, body: &[u8], fields: &mut HandshakeFields) -> TlsResult<HandshakeState>;

    fn client_key_send(&mut self, fields: &mut HandshakeFields) -> TlsResult<Encoded>;
    fn client_key_recv(&mut self, body: &[u8], fields: &mut HandshakeFields) -> TlsResult<HandshakeState>;

    fn client_cert_verify_send(&mut self, fields: &mut HandshakeFields) -> TlsResult<Encoded>;
    fn client_cert_verify_recv(&mut self, body: &[u8], fields: &mut HandshakeFields) -> TlsResult<HandshakeState>;

    /// ChangeCipherSpec has no handshake header; the body is always the
    /// single byte `0x01`.
    fn client_ccs_send(&mut self, fields: &mut HandshakeFields) -> TlsResult<HandshakeState>;
    fn client_ccs_recv(&mut self, fields: &mut HandshakeFields) -> TlsResult<HandshakeState>;
    fn server_ccs_send(&mut self, fields: &mut HandshakeFields) -> TlsResult<HandshakeState>;
    fn server_ccs_recv(&mut self, fields: &mut HandshakeFields) -> TlsResult<HandshakeState>;

    fn client_finished_send(&mut self, fields: &mut HandshakeFields) -> TlsResult<Encoded>;
    fn client_finished_recv(&mut self, body: &[u8], fields: &mut HandshakeFields) -> TlsResult<HandshakeState>;

    fn server_finished_send(&mut self, fields: &mut HandshakeFields) -> TlsResult<Encoded>;
    fn server_finished_recv(&mut self, body: &[u8], fields: &mut HandshakeFields) -> TlsResult<HandshakeState>;

    /// ServerHello extension block, delegated to from `server_hello.rs`.
    fn server_extensions_send(&mut self, out: &mut Vec<u8>, fields: &mut HandshakeFields) -> TlsResult<()>;
    fn server_extensions_recv(&mut self, extensions: &[u8], fields: &mut HandshakeFields) -> TlsResult<()>;

    /// Cipher-suite selection policy: on the client, verifies the server's
    /// chosen suite was offered and is supported.
    fn set_cipher_as_client(&mut self, wire: u16, fields: &mut HandshakeFields) -> TlsResult<()>;

    /// Only legal at `HandshakeState::ClientHello` (spec.md §4.3).
    fn sslv2_client_hello_recv(&mut self, body: &[u8], fields: &mut HandshakeFields) -> TlsResult<HandshakeState>;

    /// Processes one alert fragment; does not change handshake state.
    fn process_alert_fragment(&mut self, payload: &[u8]) -> TlsResult<()>;

    /// Timing-uniform delay applied after a read-path handler failure, to
    /// dampen error-oracle side channels (spec.md §4.5, §7).
    fn sleep_delay(&mut self);
}
