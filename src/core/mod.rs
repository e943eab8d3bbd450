pub mod config;
pub mod connection;
pub mod driver;
pub mod errors;
pub mod handshake;
pub mod io_buffer;
pub mod random;
pub mod record;
pub mod state;
pub mod transcript;
pub mod version;
pub mod wire;

pub use config::DriverConfig;
pub use connection::{Connection, HandshakeFields, InStatus, PendingParams, SignatureDigestAlg};
pub use driver::{negotiate, Blocked};
pub use errors::{TlsError, TlsResult};
pub use handshake::callbacks::{Encoded, HandshakeCallbacks};
pub use random::{OsRandomSource, RandomSource};
pub use record::types::{ContentType, FlushOutcome, InboundRecord, ReadOutcome, RecordLayer};
pub use state::{HandshakeAction, HandshakeState, Role, Writer};
