//! Seed-word driven random number generation
//!
//! The seed word is hashed with SHA-256 and the 32-byte digest, read as a
//! big-endian 256-bit integer, becomes the full seed of the generator. Both
//! supported generators take exactly 32 bytes of seed, so no bits of the
//! digest are folded or dropped.

use crate::{DeckGenError, Result};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Pseudo-random algorithm fed by the seed digest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RngAlgorithm {
    #[default]
    ChaCha8,
    Xoshiro256PlusPlus,
}

impl FromStr for RngAlgorithm {
    type Err = DeckGenError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "chacha8" | "chacha" => Ok(RngAlgorithm::ChaCha8),
            "xoshiro256plusplus" | "xoshiro256pp" | "xoshiro" => {
                Ok(RngAlgorithm::Xoshiro256PlusPlus)
            }
            _ => Err(DeckGenError::InvalidConfig(format!(
                "unknown rng '{s}' (expected: chacha8, xoshiro)"
            ))),
        }
    }
}

impl fmt::Display for RngAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RngAlgorithm::ChaCha8 => write!(f, "chacha8"),
            RngAlgorithm::Xoshiro256PlusPlus => write!(f, "xoshiro256++"),
        }
    }
}

/// SHA-256 digest of the UTF-8 seed word
pub fn seed_digest(seed_word: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(seed_word.as_bytes());
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest[..]);
    out
}

/// Generator seeded from a seed word
pub struct DeckRng {
    inner: Box<dyn RngCore>,
    digest: [u8; 32],
    algorithm: RngAlgorithm,
}

impl DeckRng {
    pub fn from_seed_word(seed_word: &str, algorithm: RngAlgorithm) -> Self {
        let digest = seed_digest(seed_word);
        let inner: Box<dyn RngCore> = match algorithm {
            RngAlgorithm::ChaCha8 => Box::new(ChaCha8Rng::from_seed(digest)),
            RngAlgorithm::Xoshiro256PlusPlus => Box::new(Xoshiro256PlusPlus::from_seed(digest)),
        };
        DeckRng {
            inner,
            digest,
            algorithm,
        }
    }

    pub fn algorithm(&self) -> RngAlgorithm {
        self.algorithm
    }

    /// Seed digest as lowercase hex (the seed integer in base 16)
    pub fn seed_hex(&self) -> String {
        self.digest.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl RngCore for DeckRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}

impl fmt::Debug for DeckRng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeckRng")
            .field("algorithm", &self.algorithm)
            .field("seed", &self.seed_hex())
            .finish()
    }
}
