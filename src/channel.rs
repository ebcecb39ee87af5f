//! Publication channel: the client-side upload of one day's keys.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::identity::UserIdentity;
use crate::keys::TemporaryExposureKey;

/// One key upload as observable on the wire by anyone sharing the local
/// network segment: the payload plus the source identity it left from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyTransmission {
    pub key: TemporaryExposureKey,
    pub sender: UserIdentity,
}

impl KeyTransmission {
    pub fn new(key: TemporaryExposureKey, sender: UserIdentity) -> Self {
        Self { key, sender }
    }
}

/// Body shape of the backend upload call. Shape only; no live endpoint is
/// contacted in this model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyUploadRequest {
    pub transmissions: Vec<KeyTransmission>,
}

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("backend unreachable")]
    NetworkUnreachable,
    #[error("upload authentication rejected")]
    AuthenticationRejected,
}

/// Capability for uploading keys to the backend. The error taxonomy is
/// part of the contract so a real authenticated client can replace the
/// stub without changing anything downstream of the channel.
#[async_trait]
pub trait PublicationChannel {
    async fn send(&mut self, batch: &[KeyTransmission]) -> Result<(), ChannelError>;
}

/// Always-succeeding upload. Stands in for the real PostKeysRequest call;
/// the backend this would talk to is not part of the model.
pub struct StubBackendChannel;

#[async_trait]
impl PublicationChannel for StubBackendChannel {
    async fn send(&mut self, batch: &[KeyTransmission]) -> Result<(), ChannelError> {
        debug!(batch_len = batch.len(), "accepted key upload batch");
        Ok(())
    }
}

/// Test-only channel that rejects every upload.
pub struct UnreachableBackendChannel;

#[async_trait]
impl PublicationChannel for UnreachableBackendChannel {
    async fn send(&mut self, _batch: &[KeyTransmission]) -> Result<(), ChannelError> {
        Err(ChannelError::NetworkUnreachable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::KeyGenerator;

    #[tokio::test]
    async fn stub_backend_accepts_any_batch() {
        let mut generator = KeyGenerator::new();
        let key = generator.generate().unwrap();
        let batch = vec![KeyTransmission::new(
            key,
            UserIdentity::new("Alice", "203.0.113.7"),
        )];

        let mut channel = StubBackendChannel;
        assert!(channel.send(&batch).await.is_ok());
        assert!(channel.send(&[]).await.is_ok());
    }

    #[tokio::test]
    async fn unreachable_backend_reports_network_error() {
        let mut channel = UnreachableBackendChannel;
        let result = channel.send(&[]).await;
        assert!(matches!(result, Err(ChannelError::NetworkUnreachable)));
    }
}
