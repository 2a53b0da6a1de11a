//! # Blockstore
//!
//! Block-level view over a raw datastore: opaque byte blocks keyed by the
//! BLAKE3 digest of their content.

use shared_crypto::blake3_hash;
use shared_types::Cid;

use crate::domain::errors::StorageError;
use crate::ports::outbound::SharedStore;

/// Key prefix for all blocks in the datastore.
pub const BLOCK_PREFIX: &[u8] = b"/blocks/";

/// Content id of a byte block.
pub fn cid_of(data: &[u8]) -> Cid {
    Cid::new(blake3_hash(data))
}

/// Content-addressed block view over a shared datastore.
#[derive(Clone)]
pub struct Blockstore {
    store: SharedStore,
}

impl Blockstore {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    fn key(cid: &Cid) -> Vec<u8> {
        let mut key = Vec::with_capacity(BLOCK_PREFIX.len() + 64);
        key.extend_from_slice(BLOCK_PREFIX);
        key.extend_from_slice(cid.to_string().as_bytes());
        key
    }

    /// Store a block and return its content id. Re-putting identical bytes is a no-op.
    pub fn put(&self, data: &[u8]) -> Result<Cid, StorageError> {
        let cid = cid_of(data);
        let key = Self::key(&cid);

        let mut store = self.store.write();
        if !store.exists(&key)? {
            store.put(&key, data)?;
        }
        Ok(cid)
    }

    /// Store a block under a caller-computed id, verifying it first (INVARIANT-1).
    pub fn put_with_cid(&self, cid: &Cid, data: &[u8]) -> Result<(), StorageError> {
        let actual = cid_of(data);
        if actual != *cid {
            return Err(StorageError::CidMismatch {
                expected: *cid,
                actual,
            });
        }
        self.put(data).map(|_| ())
    }

    /// Read a block, re-verifying its digest (INVARIANT-2).
    pub fn get(&self, cid: &Cid) -> Result<Option<Vec<u8>>, StorageError> {
        let data = self.store.read().get(&Self::key(cid))?;
        match data {
            Some(bytes) => {
                let actual = cid_of(&bytes);
                if actual != *cid {
                    return Err(StorageError::DataCorruption { cid: *cid, actual });
                }
                Ok(Some(bytes))
            }
            None => Ok(None),
        }
    }

    pub fn has(&self, cid: &Cid) -> Result<bool, StorageError> {
        Ok(self.store.read().exists(&Self::key(cid))?)
    }

    /// The datastore this view writes through to.
    pub fn datastore(&self) -> &SharedStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryKVStore;
    use crate::ports::outbound::shared;

    #[test]
    fn test_put_get() {
        let bs = Blockstore::new(shared(InMemoryKVStore::new()));

        let cid = bs.put(b"genesis").unwrap();
        assert_eq!(cid, cid_of(b"genesis"));
        assert!(bs.has(&cid).unwrap());
        assert_eq!(bs.get(&cid).unwrap(), Some(b"genesis".to_vec()));
    }

    #[test]
    fn test_missing_block() {
        let bs = Blockstore::new(shared(InMemoryKVStore::new()));
        let cid = cid_of(b"never stored");

        assert!(!bs.has(&cid).unwrap());
        assert_eq!(bs.get(&cid).unwrap(), None);
    }

    #[test]
    fn test_put_with_wrong_cid_rejected() {
        let bs = Blockstore::new(shared(InMemoryKVStore::new()));
        let wrong = cid_of(b"other");

        let err = bs.put_with_cid(&wrong, b"data").unwrap_err();
        assert!(matches!(err, StorageError::CidMismatch { .. }));
        assert!(!bs.has(&cid_of(b"data")).unwrap());
    }

    #[test]
    fn test_tampered_block_detected() {
        let store = shared(InMemoryKVStore::new());
        let bs = Blockstore::new(store.clone());
        let cid = bs.put(b"original").unwrap();

        store
            .write()
            .put(&Blockstore::key(&cid), b"tampered")
            .unwrap();

        assert!(matches!(
            bs.get(&cid),
            Err(StorageError::DataCorruption { .. })
        ));
    }
}
