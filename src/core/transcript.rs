//! Rolling handshake transcript hashes (spec.md §3 invariant 3).
//!
//! Every byte of every handshake message, including its 4-byte header, is
//! fed to all six hashers exactly once, in wire order. Later stages
//! (Finished, CertificateVerify — both out of scope here) consume a
//! snapshot of these digests; this module only accumulates them.

use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256};

#[derive(Clone)]
pub struct TranscriptHashes {
    pub client_md5: Md5,
    pub client_sha1: Sha1,
    pub client_sha256: Sha256,
    pub server_md5: Md5,
    pub server_sha1: Sha1,
    pub server_sha256: Sha256,
}

/// Finalized digests, taken without consuming the running hashers.
pub struct TranscriptDigests {
    pub client_md5: [u8; 16],
    pub client_sha1: [u8; 20],
    pub client_sha256: [u8; 32],
    pub server_md5: [u8; 16],
    pub server_sha1: [u8; 20],
    pub server_sha256: [u8; 32],
}

impl Default for TranscriptHashes {
    fn default() -> Self {
        Self {
            client_md5: Md5::new(),
            client_sha1: Sha1::new(),
            client_sha256: Sha256::new(),
            server_md5: Md5::new(),
            server_sha1: Sha1::new(),
            server_sha256: Sha256::new(),
        }
    }
}

impl TranscriptHashes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds `bytes` to all six hashers. Called once per handshake message
    /// (header + body), in wire order, from both the reader and the writer.
    pub fn update_all(&mut self, bytes: &[u8]) {
        self.client_md5.update(bytes);
        self.client_sha1.update(bytes);
        self.client_sha256.update(bytes);
        self.server_md5.update(bytes);
        self.server_sha1.update(bytes);
        self.server_sha256.update(bytes);
    }

    pub fn digests(&self) -> TranscriptDigests {
        TranscriptDigests {
            client_md5: self.client_md5.clone().finalize().into(),
            client_sha1: self.client_sha1.clone().finalize().into(),
            client_sha256: self.client_sha256.clone().finalize().into(),
            server_md5: self.server_md5.clone().finalize().into(),
            server_sha1: self.server_sha1.clone().finalize().into(),
            server_sha256: self.server_sha256.clone().finalize().into(),
        }
    }
}
