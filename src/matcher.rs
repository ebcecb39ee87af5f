//! The adversary's final step: pairing a published key with a captured
//! identity.

use tracing::info;

use crate::identity::UserIdentity;
use crate::interceptor::SharedTable;
use crate::keys::DiagnosisKey;

/// Looks up published diagnosis keys in the interception log. Because the
/// release step preserves key bytes, any key that was ever observed on the
/// local network resolves straight back to its sender.
pub struct Matcher {
    table: SharedTable,
}

impl Matcher {
    pub fn new(table: SharedTable) -> Self {
        Self { table }
    }

    /// `Some(identity)` if the key was captured during the observation
    /// window, `None` otherwise.
    pub fn resolve(&self, diagnosis_key: &DiagnosisKey) -> Option<UserIdentity> {
        let table = self.table.lock().expect("interception table poisoned");
        let matched = table.lookup(diagnosis_key);
        if let Some(identity) = &matched {
            info!(
                name = %identity.display_name,
                address = %identity.network_address,
                "published key linked back to sender"
            );
        }
        matched
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::channel::KeyTransmission;
    use crate::interceptor::{shared_table, Interceptor};
    use crate::keys::KeyGenerator;
    use crate::publication::KeyPublicationService;

    #[test]
    fn captured_key_round_trips_to_its_identity() {
        let table = shared_table();
        let interceptor = Interceptor::new(Arc::clone(&table));
        let matcher = Matcher::new(Arc::clone(&table));
        let service = KeyPublicationService::new();

        let key = KeyGenerator::new().generate().unwrap();
        let identity = UserIdentity::new("Grace", "198.51.100.23");
        interceptor.capture(&[KeyTransmission::new(key, identity.clone())]);

        let resolved = matcher.resolve(&service.publish_as_diagnosis_key(key));
        assert_eq!(resolved, Some(identity));
    }

    #[test]
    fn uncaptured_key_resolves_to_none() {
        let table = shared_table();
        let matcher = Matcher::new(table);
        let service = KeyPublicationService::new();

        let key = KeyGenerator::new().generate().unwrap();
        assert_eq!(matcher.resolve(&service.publish_as_diagnosis_key(key)), None);
    }
}
