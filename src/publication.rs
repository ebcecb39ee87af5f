//! Diagnosis-key release: the step that is supposed to break linkage.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::keys::{DiagnosisKey, TemporaryExposureKey};

/// Shape of one day's published diagnosis-key feed, as a client would
/// download it from the backend. Shape only; nothing is fetched here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyKeyBatch {
    pub keys: Vec<DiagnosisKey>,
}

/// Simulates the later, asynchronous release of a diagnosis key derived
/// from an uploaded exposure key.
///
/// A real release would batch and shuffle keys contributed by many users
/// inside a time window before publishing, so that no single published key
/// can be paired with one earlier upload. This model publishes each key
/// as-is, byte for byte. That missing mixing step is the vulnerability the
/// rest of the pipeline demonstrates.
pub struct KeyPublicationService;

impl KeyPublicationService {
    pub fn new() -> Self {
        Self
    }

    /// Identity transform: the released key carries exactly the bytes of
    /// the uploaded key.
    pub fn publish_as_diagnosis_key(&self, key: TemporaryExposureKey) -> DiagnosisKey {
        let diagnosis_key = DiagnosisKey::from_bytes(*key.as_bytes());
        debug!(?diagnosis_key, "released diagnosis key");
        diagnosis_key
    }

    /// Wraps released keys in the daily feed shape, unshuffled.
    pub fn daily_batch(&self, keys: Vec<DiagnosisKey>) -> DailyKeyBatch {
        DailyKeyBatch { keys }
    }
}

impl Default for KeyPublicationService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::KEY_LEN;

    #[test]
    fn published_key_preserves_bytes_exactly() {
        let key = TemporaryExposureKey::from_bytes([0x42; KEY_LEN]);
        let service = KeyPublicationService::new();
        let diagnosis_key = service.publish_as_diagnosis_key(key);
        assert_eq!(diagnosis_key.as_bytes(), key.as_bytes());
    }

    #[test]
    fn daily_batch_keeps_release_order() {
        let service = KeyPublicationService::new();
        let keys: Vec<DiagnosisKey> = (0u8..4)
            .map(|i| {
                service.publish_as_diagnosis_key(TemporaryExposureKey::from_bytes([i; KEY_LEN]))
            })
            .collect();
        let batch = service.daily_batch(keys.clone());
        assert_eq!(batch.keys, keys);
    }
}
