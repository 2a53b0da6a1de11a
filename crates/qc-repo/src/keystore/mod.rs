//! # Key Store
//!
//! Named storage for network identity keys. Writes overwrite: `put` under an
//! existing name replaces the previous key without complaint.

mod fs;
mod memory;

pub use fs::FsKeystore;
pub use memory::MemKeystore;

use shared_crypto::PeerKeyPair;

use crate::errors::KeystoreError;

/// Named key storage.
pub trait Keystore: Send + Sync {
    /// Whether a key is stored under `name`.
    fn has(&self, name: &str) -> Result<bool, KeystoreError>;

    /// Store `key` under `name`, replacing any existing key.
    fn put(&self, name: &str, key: &PeerKeyPair) -> Result<(), KeystoreError>;

    /// Load the key stored under `name`.
    fn get(&self, name: &str) -> Result<PeerKeyPair, KeystoreError>;

    /// Remove the key stored under `name`.
    fn delete(&self, name: &str) -> Result<(), KeystoreError>;

    /// Names of all stored keys, sorted.
    fn list(&self) -> Result<Vec<String>, KeystoreError>;
}

/// Key names must be usable as plain file names.
pub(crate) fn validate_name(name: &str) -> Result<(), KeystoreError> {
    let valid = !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(KeystoreError::InvalidName(name.to_string()))
    }
}
