//! Random index sources for the session engine.
//!
//! Every random decision the engine makes (id characters, queue draws,
//! candidate picks) is a uniform index into a non-empty range, so the seam
//! is a single fallible `index` call. Production uses [`OsRandom`]; tests
//! use [`SeededRandom`] for reproducible draws.

use parking_lot::Mutex;
use rand::distr::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::errors::domain::{DomainError, InfraErrorKind};

/// Source of uniformly distributed indices.
pub trait RandomSource: Send + Sync {
    /// Return an index in `0..upper`, unbiased over `upper`.
    ///
    /// `upper` must be non-zero.
    fn index(&self, upper: usize) -> Result<usize, DomainError>;
}

/// Cryptographically secure source backed by the operating system.
///
/// Each call seeds a fresh ChaCha20 stream from OS entropy, so an entropy
/// failure surfaces as a `RandomSource` error on the call that hit it.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn index(&self, upper: usize) -> Result<usize, DomainError> {
        let mut rng = ChaCha20Rng::try_from_os_rng()
            .map_err(|e| DomainError::random_source(format!("OS entropy unavailable: {e}")))?;
        sample_index(&mut rng, upper)
    }
}

/// Deterministic source for tests and simulations.
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn index(&self, upper: usize) -> Result<usize, DomainError> {
        let mut rng = self.rng.lock();
        sample_index(&mut *rng, upper)
    }
}

fn sample_index<R: Rng + ?Sized>(rng: &mut R, upper: usize) -> Result<usize, DomainError> {
    let dist = Uniform::new(0, upper).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::Other("empty range".to_string()),
            format!("cannot sample from 0..{upper}: {e}"),
        )
    })?;
    Ok(dist.sample(rng))
}
