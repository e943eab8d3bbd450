pub mod reader;
pub mod types;
pub mod writer;

pub use reader::{FeedOutcome, HandshakeReader, ReadyMessage};
pub use types::{ContentType, FlushOutcome, InboundRecord, ReadOutcome, RecordLayer};
pub use writer::{write_io, WriteOutcome};
