//! Synthetic user identities for populating the simulation.
//!
//! Nothing here is security-relevant: the fixture only exists so that
//! captured traffic carries realistic-looking (name, address) pairs.

use std::net::Ipv4Addr;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// What a co-located network observer can attribute to a single device:
/// a display name and the source IPv4 address its uploads came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub display_name: String,
    pub network_address: String,
}

impl UserIdentity {
    pub fn new(display_name: impl Into<String>, network_address: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            network_address: network_address.into(),
        }
    }
}

const DISPLAY_NAMES: &[&str] = &[
    "Alice", "Bob", "Charlie", "David", "Emma", "Frank", "Grace", "Henry", "Ivy", "Jack", "Edgar",
    "Yasmin", "Ronin", "Reece", "Dulce", "Isaac", "Peter", "Lawson", "Daxton",
];

/// Produces pseudo-random identities from a small fixed name pool and
/// uniformly drawn IPv4 octets. No uniqueness guarantee.
pub struct IdentityFixture<R: RngCore = ChaCha8Rng> {
    rng: R,
}

impl IdentityFixture<ChaCha8Rng> {
    /// Seeded constructor so test fixtures are reproducible.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: RngCore> IdentityFixture<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    pub fn next_identity(&mut self) -> UserIdentity {
        let name = DISPLAY_NAMES[(self.rng.next_u32() as usize) % DISPLAY_NAMES.len()];
        let address = Ipv4Addr::from(self.rng.next_u32());
        UserIdentity::new(name, address.to_string())
    }
}
