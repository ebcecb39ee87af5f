//! The passive adversary: capture of key uploads on the local network.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::channel::KeyTransmission;
use crate::identity::UserIdentity;
use crate::keys::{DiagnosisKey, TemporaryExposureKey, KEY_LEN};

/// The adversary's durable log: raw key bytes mapped to the identity the
/// key was observed leaving from. Grows for the lifetime of the
/// observation window; nothing is ever evicted.
#[derive(Debug, Default)]
pub struct InterceptionTable {
    entries: HashMap<[u8; KEY_LEN], UserIdentity>,
}

impl InterceptionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert keyed on exact key bytes; a later capture of the same bytes
    /// overwrites the earlier identity.
    pub fn record(&mut self, key: TemporaryExposureKey, identity: UserIdentity) {
        self.entries.insert(*key.as_bytes(), identity);
    }

    pub fn lookup(&self, key: &DiagnosisKey) -> Option<UserIdentity> {
        self.entries.get(key.as_bytes()).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Handle for sharing one table between the capture side and the lookup
/// side. The mutex is the locking discipline should simulated users ever
/// run in parallel; it is held only per upsert or lookup.
pub type SharedTable = Arc<Mutex<InterceptionTable>>;

pub fn shared_table() -> SharedTable {
    Arc::new(Mutex::new(InterceptionTable::new()))
}

/// Observer co-located with the uploading clients, with full passive read
/// access to the publication channel. An assumed capability of the threat
/// model, not an exploit in itself.
pub struct Interceptor {
    table: SharedTable,
}

impl Interceptor {
    pub fn new(table: SharedTable) -> Self {
        Self { table }
    }

    /// Records every (key, sender) pair seen in one observed upload.
    pub fn capture(&self, batch: &[KeyTransmission]) {
        let mut table = self.table.lock().expect("interception table poisoned");
        for transmission in batch {
            table.record(transmission.key, transmission.sender.clone());
        }
        debug!(
            captured = batch.len(),
            table_size = table.len(),
            "captured upload batch"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::KeyGenerator;

    #[test]
    fn capture_grows_the_table() {
        let table = shared_table();
        let interceptor = Interceptor::new(Arc::clone(&table));
        let mut generator = KeyGenerator::new();

        let batch: Vec<KeyTransmission> = (0..5)
            .map(|i| {
                KeyTransmission::new(
                    generator.generate().unwrap(),
                    UserIdentity::new(format!("user-{i}"), "192.0.2.1"),
                )
            })
            .collect();
        interceptor.capture(&batch);

        assert_eq!(table.lock().unwrap().len(), 5);
    }

    #[test]
    fn later_capture_overwrites_earlier_identity() {
        let table = shared_table();
        let interceptor = Interceptor::new(Arc::clone(&table));
        let key = TemporaryExposureKey::from_bytes([0x11; KEY_LEN]);

        interceptor.capture(&[KeyTransmission::new(
            key,
            UserIdentity::new("First", "192.0.2.10"),
        )]);
        interceptor.capture(&[KeyTransmission::new(
            key,
            UserIdentity::new("Second", "192.0.2.20"),
        )]);

        let table = table.lock().unwrap();
        assert_eq!(table.len(), 1);
        let resolved = table
            .lookup(&DiagnosisKey::from_bytes([0x11; KEY_LEN]))
            .unwrap();
        assert_eq!(resolved, UserIdentity::new("Second", "192.0.2.20"));
    }
}
