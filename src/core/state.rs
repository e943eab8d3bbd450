//! The handshake finite-state machine: states, legal transitions, and the
//! per-state action table (record type, message type, writer role).

use crate::core::errors::{TlsError, TlsResult};
use crate::core::record::ContentType;

/// One TLS 1.0/1.1/1.2 handshake state. Order matches the wire sequence of
/// a full handshake; `ClientHello` is the initial state, `HandshakeOver` the
/// terminal one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum HandshakeState {
    ClientHello = 0,
    ServerHello = 1,
    ServerCert = 2,
    ServerCertStatus = 3,
    ServerKey = 4,
    ServerCertReq = 5,
    ServerHelloDone = 6,
    ClientCert = 7,
    ClientKey = 8,
    ClientCertVerify = 9,
    ClientChangeCipherSpec = 10,
    ClientFinished = 11,
    ServerChangeCipherSpec = 12,
    ServerFinished = 13,
    HandshakeOver = 14,
}

pub const STATE_COUNT: usize = 15;

impl HandshakeState {
    pub const ALL: [HandshakeState; STATE_COUNT] = [
        HandshakeState::ClientHello,
        HandshakeState::ServerHello,
        HandshakeState::ServerCert,
        HandshakeState::ServerCertStatus,
        HandshakeState::ServerKey,
        HandshakeState::ServerCertReq,
        HandshakeState::ServerHelloDone,
        HandshakeState::ClientCert,
        HandshakeState::ClientKey,
        HandshakeState::ClientCertVerify,
        HandshakeState::ClientChangeCipherSpec,
        HandshakeState::ClientFinished,
        HandshakeState::ServerChangeCipherSpec,
        HandshakeState::ServerFinished,
        HandshakeState::HandshakeOver,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn action(self) -> &'static HandshakeAction {
        &ACTION_TABLE[self.index()]
    }

    /// Validates `self -> next` against the transition table and returns
    /// `next` on success. Any edge not present in the table is a fatal
    /// programming error (spec.md §3 invariant 1), not a recoverable one,
    /// but we surface it as `TlsError::IllegalTransition` rather than
    /// panicking so embedders can tear the connection down cleanly.
    pub fn validate_transition(self, next: HandshakeState) -> TlsResult<HandshakeState> {
        if self.action().legal_next.contains(&next) {
            Ok(next)
        } else {
            Err(TlsError::IllegalTransition { from: self, to: next })
        }
    }
}

/// The role a connection plays. `'B'`-writer states (terminal/both) are not
/// represented here; see `Writer::Both`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Client,
    Server,
}

/// Writer of a given state, per spec.md §3/§4.1: the role that transmits,
/// or `Both` at the terminal state where neither side writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Writer {
    Client,
    Server,
    Both,
}

impl Writer {
    pub fn is_mine(self, role: Role) -> bool {
        matches!(
            (self, role),
            (Writer::Client, Role::Client) | (Writer::Server, Role::Server)
        )
    }
}

/// One row of the state-machine table: the record type this state's message
/// travels in, the handshake message type byte (ignored for non-HANDSHAKE
/// record types), the writer, and the set of legal successor states.
pub struct HandshakeAction {
    pub record_type: ContentType,
    pub message_type: u8,
    pub writer: Writer,
    pub legal_next: &'static [HandshakeState],
}

// Handshake message type bytes, RFC 5246 §7.4.
pub mod msg_type {
    pub const CLIENT_HELLO: u8 = 1;
    pub const SERVER_HELLO: u8 = 2;
    pub const CERTIFICATE: u8 = 11;
    pub const SERVER_KEY_EXCHANGE: u8 = 12;
    pub const CERTIFICATE_REQUEST: u8 = 13;
    pub const SERVER_HELLO_DONE: u8 = 14;
    pub const CERTIFICATE_VERIFY: u8 = 15;
    pub const CLIENT_KEY_EXCHANGE: u8 = 16;
    pub const FINISHED: u8 = 20;
    /// Not a real RFC 5246 type byte: CertificateStatus is RFC 6066 §8, type 22.
    pub const CERTIFICATE_STATUS: u8 = 22;
}

use HandshakeState::*;
use Writer::*;

static ACTION_TABLE: [HandshakeAction; STATE_COUNT] = [
    // ClientHello
    HandshakeAction {
        record_type: ContentType::Handshake,
        message_type: msg_type::CLIENT_HELLO,
        writer: Client,
        legal_next: &[ServerHello],
    },
    // ServerHello
    //
    // `ServerCertStatus` is included per the Open Question resolution in
    // SPEC_FULL.md §6: RFC 6066 allows CertificateStatus immediately after
    // ServerHello.
    HandshakeAction {
        record_type: ContentType::Handshake,
        message_type: msg_type::SERVER_HELLO,
        writer: Server,
        legal_next: &[ServerCert, ServerCertStatus, ServerKey, ServerCertReq, ServerHelloDone],
    },
    // ServerCert
    HandshakeAction {
        record_type: ContentType::Handshake,
        message_type: msg_type::CERTIFICATE,
        writer: Server,
        legal_next: &[ServerKey, ServerCertReq, ServerHelloDone, ServerCertStatus],
    },
    // ServerCertStatus
    HandshakeAction {
        record_type: ContentType::Handshake,
        message_type: msg_type::CERTIFICATE_STATUS,
        writer: Server,
        legal_next: &[ServerKey, ServerHelloDone],
    },
    // ServerKey
    HandshakeAction {
        record_type: ContentType::Handshake,
        message_type: msg_type::SERVER_KEY_EXCHANGE,
        writer: Server,
        legal_next: &[ServerCertReq, ServerHelloDone],
    },
    // ServerCertReq
    HandshakeAction {
        record_type: ContentType::Handshake,
        message_type: msg_type::CERTIFICATE_REQUEST,
        writer: Server,
        legal_next: &[ServerHelloDone],
    },
    // ServerHelloDone
    HandshakeAction {
        record_type: ContentType::Handshake,
        message_type: msg_type::SERVER_HELLO_DONE,
        writer: Server,
        legal_next: &[ClientCert, ClientKey],
    },
    // ClientCert
    HandshakeAction {
        record_type: ContentType::Handshake,
        message_type: msg_type::CERTIFICATE,
        writer: Client,
        legal_next: &[ClientKey],
    },
    // ClientKey
    HandshakeAction {
        record_type: ContentType::Handshake,
        message_type: msg_type::CLIENT_KEY_EXCHANGE,
        writer: Client,
        legal_next: &[ClientCertVerify, ClientChangeCipherSpec],
    },
    // ClientCertVerify
    HandshakeAction {
        record_type: ContentType::Handshake,
        message_type: msg_type::CERTIFICATE_VERIFY,
        writer: Client,
        legal_next: &[ClientChangeCipherSpec],
    },
    // ClientChangeCipherSpec
    HandshakeAction {
        record_type: ContentType::ChangeCipherSpec,
        message_type: 0,
        writer: Client,
        legal_next: &[ClientFinished],
    },
    // ClientFinished
    HandshakeAction {
        record_type: ContentType::Handshake,
        message_type: msg_type::FINISHED,
        writer: Client,
        legal_next: &[ServerChangeCipherSpec],
    },
    // ServerChangeCipherSpec
    HandshakeAction {
        record_type: ContentType::ChangeCipherSpec,
        message_type: 0,
        writer: Server,
        legal_next: &[ServerFinished],
    },
    // ServerFinished
    HandshakeAction {
        record_type: ContentType::Handshake,
        message_type: msg_type::FINISHED,
        writer: Server,
        legal_next: &[HandshakeOver],
    },
    // HandshakeOver
    HandshakeAction {
        record_type: ContentType::ApplicationData,
        message_type: 0,
        writer: Both,
        legal_next: &[],
    },
];
