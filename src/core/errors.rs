use thiserror::Error;

use crate::core::state::HandshakeState;

/// Failure modes surfaced by the handshake driver.
///
/// `Blocked` is deliberately not a variant here: it is a cooperative
/// suspension status, not a failure, so it travels on `NegotiateOutcome`
/// instead (see `core::driver`).
#[derive(Debug, Error)]
pub enum TlsError {
    #[error("malformed handshake message: {reason}")]
    BadMessage { reason: &'static str },

    #[error("handshake message type {found} does not match expected {expected} at state {state:?}")]
    UnexpectedMessageType {
        state: HandshakeState,
        expected: u8,
        found: u8,
    },

    #[error("illegal handshake transition: {from:?} -> {to:?}")]
    IllegalTransition {
        from: HandshakeState,
        to: HandshakeState,
    },

    #[error("peer closed the connection")]
    Closed,

    #[error("internal invariant violation: {0}")]
    Internal(&'static str),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TlsError {
    pub fn bad_message(reason: &'static str) -> Self {
        TlsError::BadMessage { reason }
    }
}

pub type TlsResult<T> = Result<T, TlsError>;
