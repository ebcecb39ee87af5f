//! Temporary exposure keys and their published diagnosis-key form.

use std::fmt;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Length of a temporary exposure key in bytes.
pub const KEY_LEN: usize = 16;

/// Short-lived ephemeral identifier a device stores locally and uploads
/// once per day. Unlinkable on its own: 16 bytes of CSPRNG output, so two
/// independently generated keys collide with probability ~n^2 / 2^129.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemporaryExposureKey([u8; KEY_LEN]);

impl TemporaryExposureKey {
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for TemporaryExposureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TemporaryExposureKey(")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}

/// Key released to the public feed after a positive diagnosis. Intended to
/// be unlinkable to the originating device; structurally identical to a
/// [`TemporaryExposureKey`] in the current model.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiagnosisKey([u8; KEY_LEN]);

impl DiagnosisKey {
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for DiagnosisKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DiagnosisKey(")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}

#[derive(Debug, Error)]
pub enum KeyError {
    /// The OS entropy source could not be read. Fatal: the simulation has
    /// no fallback randomness.
    #[error("entropy source unavailable: {0}")]
    EntropyUnavailable(rand::Error),
}

/// Generates temporary exposure keys from a cryptographically secure
/// randomness source.
pub struct KeyGenerator<R: RngCore + CryptoRng = OsRng> {
    rng: R,
}

impl KeyGenerator<OsRng> {
    pub fn new() -> Self {
        Self::with_rng(OsRng)
    }
}

impl Default for KeyGenerator<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore + CryptoRng> KeyGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Draws a fresh 16-byte key. Successive keys are distinct with
    /// overwhelming probability; the only failure mode is an unreadable
    /// entropy source.
    pub fn generate(&mut self) -> Result<TemporaryExposureKey, KeyError> {
        let mut bytes = [0u8; KEY_LEN];
        self.rng
            .try_fill_bytes(&mut bytes)
            .map_err(KeyError::EntropyUnavailable)?;
        Ok(TemporaryExposureKey(bytes))
    }
}
