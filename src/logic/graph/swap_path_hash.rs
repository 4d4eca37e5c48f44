use alloy_primitives::B256;
use serde::{Deserialize, Serialize};
use sha2::digest::Update;
use sha2::{Digest, Sha256};
use std::fmt::{Debug, Display};

/// Stable SHA-256 identity of a route. Serializes as `0x`-prefixed hex.
#[derive(Clone, Copy, Default, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SwapPathHash(B256);

impl SwapPathHash {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0.0
    }
}

impl Display for SwapPathHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Debug for SwapPathHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SwapPathHash({})", self.0)
    }
}

impl From<[u8; 32]> for SwapPathHash {
    fn from(hash: [u8; 32]) -> Self {
        SwapPathHash(B256::from(hash))
    }
}

/// Incremental route hasher. Every item is length-prefixed so neighbouring ids can never run
/// into each other.
#[derive(Clone, Default)]
pub struct SwapPathHasher {
    hasher: Sha256,
}

impl SwapPathHasher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item(mut self, bytes: &[u8]) -> Self {
        Update::update(&mut self.hasher, &(bytes.len() as u64).to_be_bytes());
        Update::update(&mut self.hasher, bytes);
        self
    }

    pub fn finish(self) -> SwapPathHash {
        let hash: [u8; 32] = self.hasher.finalize().into();
        SwapPathHash::from(hash)
    }
}
