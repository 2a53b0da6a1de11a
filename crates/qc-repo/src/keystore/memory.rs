use std::collections::BTreeMap;

use parking_lot::RwLock;
use shared_crypto::PeerKeyPair;

use super::{validate_name, Keystore};
use crate::errors::KeystoreError;

/// In-memory key store.
#[derive(Default)]
pub struct MemKeystore {
    keys: RwLock<BTreeMap<String, PeerKeyPair>>,
}

impl MemKeystore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Keystore for MemKeystore {
    fn has(&self, name: &str) -> Result<bool, KeystoreError> {
        validate_name(name)?;
        Ok(self.keys.read().contains_key(name))
    }

    fn put(&self, name: &str, key: &PeerKeyPair) -> Result<(), KeystoreError> {
        validate_name(name)?;
        self.keys.write().insert(name.to_string(), key.clone());
        Ok(())
    }

    fn get(&self, name: &str) -> Result<PeerKeyPair, KeystoreError> {
        validate_name(name)?;
        self.keys
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| KeystoreError::NotFound(name.to_string()))
    }

    fn delete(&self, name: &str) -> Result<(), KeystoreError> {
        validate_name(name)?;
        self.keys
            .write()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| KeystoreError::NotFound(name.to_string()))
    }

    fn list(&self) -> Result<Vec<String>, KeystoreError> {
        Ok(self.keys.read().keys().cloned().collect())
    }
}
