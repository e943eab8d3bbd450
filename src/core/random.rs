//! The randomness capability (spec.md §6 `random.fill`). Injected into the
//! connection rather than kept as a module-level global, per Design Notes
//! §9, so tests can substitute a deterministic source.

use rand::RngCore;

use crate::core::errors::TlsResult;

pub trait RandomSource {
    fn fill(&mut self, buf: &mut [u8]) -> TlsResult<()>;
}

/// Default source backed by the OS CSPRNG via the `rand` crate.
pub struct OsRandomSource {
    rng: rand::rngs::ThreadRng,
}

impl OsRandomSource {
    pub fn new() -> Self {
        Self { rng: rand::thread_rng() }
    }
}

impl Default for OsRandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for OsRandomSource {
    fn fill(&mut self, buf: &mut [u8]) -> TlsResult<()> {
        self.rng.fill_bytes(buf);
        Ok(())
    }
}

/// A fixed-byte source for deterministic tests.
#[cfg(any(test, feature = "test-support"))]
pub struct FixedRandomSource {
    pub byte: u8,
}

#[cfg(any(test, feature = "test-support"))]
impl RandomSource for FixedRandomSource {
    fn fill(&mut self, buf: &mut [u8]) -> TlsResult<()> {
        buf.fill(self.byte);
        Ok(())
    }
}
