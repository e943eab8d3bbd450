pub mod callbacks;
pub mod server_hello;

pub use callbacks::{Encoded, HandshakeCallbacks};
