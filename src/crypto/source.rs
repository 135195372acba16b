//! Sources of fresh keypairs.

use rand::rngs::{StdRng, ThreadRng};
use rand::{RngCore, SeedableRng};
use secp256k1::{Secp256k1, SignOnly};

use super::Keypair;

/// Attempts before giving up on an RNG that keeps producing invalid scalars.
const MAX_ATTEMPTS: usize = 8;

/// Errors raised while producing a keypair.
#[derive(Debug, thiserror::Error)]
pub enum KeyGenError {
    #[error("random number generator failed: {0}")]
    Rng(#[from] rand::Error),
    #[error("no valid secret key after {0} attempts")]
    ExhaustedAttempts(usize),
}

/// Something that hands out fresh, independent keypairs.
pub trait KeySource {
    fn generate(&mut self) -> Result<Keypair, KeyGenError>;
}

impl<K: KeySource + ?Sized> KeySource for &mut K {
    fn generate(&mut self) -> Result<Keypair, KeyGenError> {
        (**self).generate()
    }
}

/// Generates keypairs from 32 random bytes, rejecting scalars outside the curve order.
pub struct RngKeySource<R> {
    rng: R,
    secp: Secp256k1<SignOnly>,
}

impl<R: RngCore> RngKeySource<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            secp: Secp256k1::signing_only(),
        }
    }
}

impl RngKeySource<ThreadRng> {
    /// Key source backed by the thread-local CSPRNG.
    pub fn thread() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl RngKeySource<StdRng> {
    /// Reproducible key source. Only meant for fixtures and test networks.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> KeySource for RngKeySource<R> {
    fn generate(&mut self) -> Result<Keypair, KeyGenError> {
        let mut secret = [0u8; 32];

        for _ in 0..MAX_ATTEMPTS {
            self.rng.try_fill_bytes(&mut secret)?;

            // Zero or >= n; draw again
            if let Ok(keypair) = Keypair::from_secret_key(&self.secp, secret) {
                return Ok(keypair);
            }
        }

        Err(KeyGenError::ExhaustedAttempts(MAX_ATTEMPTS))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    struct ZeroRng;

    impl RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    struct BrokenRng;

    impl RngCore for BrokenRng {
        fn next_u32(&mut self) -> u32 {
            unreachable!()
        }

        fn next_u64(&mut self) -> u64 {
            unreachable!()
        }

        fn fill_bytes(&mut self, _dest: &mut [u8]) {
            unreachable!()
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            Err(rand::Error::new("entropy source unavailable"))
        }
    }

    #[test]
    fn test_thread_source_produces_distinct_keys() {
        let mut source = RngKeySource::thread();
        let keys: HashSet<[u8; 32]> = (0..64)
            .map(|_| *source.generate().unwrap().private_key_bytes())
            .collect();
        assert_eq!(keys.len(), 64);
    }

    #[test]
    fn test_seeded_source_is_reproducible() {
        let mut a = RngKeySource::seeded(7);
        let mut b = RngKeySource::seeded(7);
        for _ in 0..4 {
            assert_eq!(
                a.generate().unwrap().private_key_bytes(),
                b.generate().unwrap().private_key_bytes()
            );
        }
    }

    #[test]
    fn test_invalid_scalars_exhaust_attempts() {
        let mut source = RngKeySource::new(ZeroRng);
        assert!(matches!(
            source.generate(),
            Err(KeyGenError::ExhaustedAttempts(MAX_ATTEMPTS))
        ));
    }

    #[test]
    fn test_rng_failure_surfaces() {
        let mut source = RngKeySource::new(BrokenRng);
        let err = source.generate().unwrap_err();
        assert!(matches!(err, KeyGenError::Rng(_)));
        assert!(err.to_string().contains("entropy source unavailable"));
    }
}
