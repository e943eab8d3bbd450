//! The `Connection`: the single owner of handshake state, the two framing
//! buffers, the six transcript hashers, and pending cryptographic
//! parameters (spec.md §3).

use zeroize::Zeroize;

use crate::core::config::DriverConfig;
use crate::core::io_buffer::IoBuffer;
use crate::core::record::types::{ContentType, RecordLayer};
use crate::core::record::reader::HandshakeReader;
use crate::core::random::RandomSource;
use crate::core::state::{HandshakeState, Role};
use crate::core::transcript::TranscriptHashes;
use crate::core::handshake::callbacks::HandshakeCallbacks;

/// Signature/digest algorithm selected for use during the handshake,
/// per spec.md §4.2: SHA-1 for TLS 1.2, MD5+SHA-1 concatenated otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignatureDigestAlg {
    Sha1,
    Md5Sha1,
}

/// Cryptographic state negotiated but not yet activated; becomes "active"
/// at ChangeCipherSpec. Anything beyond these fields (actual key
/// derivation, MAC/cipher setup) is out of scope for this driver.
#[derive(Clone)]
pub struct PendingParams {
    pub server_random: [u8; 32],
    pub cipher_suite: u16,
    pub signature_digest_alg: SignatureDigestAlg,
}

impl Default for PendingParams {
    fn default() -> Self {
        Self {
            server_random: [0u8; 32],
            cipher_suite: 0,
            signature_digest_alg: SignatureDigestAlg::Sha1,
        }
    }
}

impl Drop for PendingParams {
    fn drop(&mut self) {
        self.server_random.zeroize();
    }
}

/// The version/role/pending-parameter slice of `Connection` that external
/// per-message codecs are allowed to see and mutate, passed to
/// `HandshakeCallbacks` methods. Kept separate from `Connection` itself so
/// the callbacks trait isn't parameterized over `Connection`'s own generics.
pub struct HandshakeFields {
    pub mode: Role,
    pub pending: PendingParams,
    pub client_protocol_version: u8,
    pub server_protocol_version: u8,
    pub actual_protocol_version: u8,
    pub actual_protocol_version_established: bool,
}

impl HandshakeFields {
    fn new(mode: Role) -> Self {
        Self {
            mode,
            pending: PendingParams::default(),
            client_protocol_version: 0,
            server_protocol_version: 0,
            actual_protocol_version: 0,
            actual_protocol_version_established: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InStatus {
    Plaintext,
    Encrypted,
}

/// One record fetched from the record layer but not yet fully consumed:
/// a record may carry multiple concatenated handshake messages, or a
/// single fragment of one. `cursor` tracks how much of `payload` the
/// reassembler has already folded into `handshake.io`.
pub(crate) struct PendingRecord {
    pub content_type: ContentType,
    pub payload: Vec<u8>,
    pub cursor: usize,
    pub is_sslv2: bool,
    pub sslv2_header: [u8; 3],
}

impl PendingRecord {
    pub fn remaining(&self) -> &[u8] {
        &self.payload[self.cursor..]
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.payload.len()
    }
}

/// Aggregates everything spec.md §3 assigns to a handshake connection.
pub struct Connection<R: RecordLayer, CB: HandshakeCallbacks, Rnd: RandomSource> {
    pub fields: HandshakeFields,
    pub state: HandshakeState,
    next_state: HandshakeState,
    pub io: IoBuffer,
    pub transcripts: TranscriptHashes,
    pub record_layer: R,
    pub callbacks: CB,
    pub random: Rnd,
    pub closed: bool,
    pub in_status: InStatus,
    pub config: DriverConfig,
    pub(crate) reader: HandshakeReader,
    pub(crate) pending_record: Option<PendingRecord>,
}

impl<R: RecordLayer, CB: HandshakeCallbacks, Rnd: RandomSource> Connection<R, CB, Rnd> {
    /// Spec.md §6 `new_connection`: initial state is always `ClientHello`.
    pub fn new(mode: Role, record_layer: R, callbacks: CB, random: Rnd) -> Self {
        let config = DriverConfig::default();
        Self {
            fields: HandshakeFields::new(mode),
            state: HandshakeState::ClientHello,
            next_state: HandshakeState::ClientHello,
            io: IoBuffer::new(),
            transcripts: TranscriptHashes::new(),
            record_layer,
            callbacks,
            random,
            closed: false,
            in_status: InStatus::Plaintext,
            reader: HandshakeReader::new(config.max_handshake_message_len),
            config,
            pending_record: None,
        }
    }

    pub fn mode(&self) -> Role {
        self.fields.mode
    }

    pub(crate) fn set_next_state(&mut self, next: HandshakeState) {
        self.next_state = next;
    }

    pub(crate) fn next_state(&self) -> HandshakeState {
        self.next_state
    }

    /// Validates `state -> next_state` and, on success, advances `state`
    /// and wipes `handshake.io` (spec.md §3 invariants 1 and 4).
    pub(crate) fn commit_transition(&mut self) -> crate::core::errors::TlsResult<()> {
        let next = self.state.validate_transition(self.next_state)?;
        self.state = next;
        self.io.wipe();
        Ok(())
    }
}
