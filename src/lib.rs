//! A TLS 1.0/1.1/1.2 handshake driver: the finite-state machine, the
//! ServerHello codec, the fragmentation-aware reader/writer, and the
//! top-level drive loop.
//!
//! Record-layer cryptography, the per-message codecs other than
//! ServerHello, cipher-suite selection, randomness, and socket I/O are all
//! external collaborators, consumed as capabilities through the traits in
//! [`core::record::types`] and [`core::handshake::callbacks`]. This crate
//! owns only the state machine and the framing around it.

pub mod core;

pub use crate::core::connection::{Connection, HandshakeFields};
pub use crate::core::driver::{negotiate, Blocked};
pub use crate::core::errors::{TlsError, TlsResult};
pub use crate::core::handshake::callbacks::{Encoded, HandshakeCallbacks};
pub use crate::core::random::{OsRandomSource, RandomSource};
pub use crate::core::record::types::{
    ContentType, FlushOutcome, InboundRecord, ReadOutcome, RecordLayer,
};
pub use crate::core::state::{HandshakeState, Role};
pub use crate::core::DriverConfig;

#[cfg(any(test, feature = "test-support"))]
pub use crate::core::random::FixedRandomSource;
