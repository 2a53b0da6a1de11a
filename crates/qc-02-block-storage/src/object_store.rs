//! # Object Store
//!
//! Typed objects over a `Blockstore`. Objects are encoded with bincode, so
//! the content id of an object is the BLAKE3 digest of its bincode encoding.

use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::Cid;

use crate::blockstore::Blockstore;
use crate::domain::errors::StorageError;

/// Content-addressed object store.
#[derive(Clone)]
pub struct ObjectStore {
    blocks: Blockstore,
}

impl ObjectStore {
    pub fn new(blocks: Blockstore) -> Self {
        Self { blocks }
    }

    /// Encode and store an object, returning its content id.
    pub fn put<T: Serialize + ?Sized>(&self, object: &T) -> Result<Cid, StorageError> {
        let bytes = bincode::serialize(object)?;
        self.blocks.put(&bytes)
    }

    /// Load and decode an object.
    pub fn get<T: DeserializeOwned>(&self, cid: &Cid) -> Result<T, StorageError> {
        let bytes = self
            .blocks
            .get(cid)?
            .ok_or(StorageError::BlockNotFound { cid: *cid })?;
        Ok(bincode::deserialize(&bytes)?)
    }

    pub fn has(&self, cid: &Cid) -> Result<bool, StorageError> {
        self.blocks.has(cid)
    }

    /// The block view underneath.
    pub fn blockstore(&self) -> &Blockstore {
        &self.blocks
    }
}
