//! # Domain Errors
//!
//! Two layers: `KVStoreError` for the raw datastore, `StorageError` for the
//! content-addressed views on top of it. Datastore failures surface through
//! the views as `StorageError::DatabaseError`.

use shared_types::Cid;
use std::fmt;

/// Errors from the content-addressed storage views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// No block is stored under this content id.
    BlockNotFound { cid: Cid },

    /// Stored bytes no longer hash to their content id (INVARIANT-2 violation).
    DataCorruption { cid: Cid, actual: Cid },

    /// Caller-supplied content id does not match the bytes (INVARIANT-1 violation).
    CidMismatch { expected: Cid, actual: Cid },

    /// The underlying datastore failed.
    DatabaseError { message: String },

    /// An object could not be encoded or decoded.
    SerializationError { message: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::BlockNotFound { cid } => write!(f, "Block not found: {}", cid),
            StorageError::DataCorruption { cid, actual } => write!(
                f,
                "Block {} is corrupt: content hashes to {} (INVARIANT-2)",
                cid, actual
            ),
            StorageError::CidMismatch { expected, actual } => write!(
                f,
                "Content id mismatch: expected {}, content hashes to {} (INVARIANT-1)",
                expected, actual
            ),
            StorageError::DatabaseError { message } => write!(f, "Datastore error: {}", message),
            StorageError::SerializationError { message } => {
                write!(f, "Object encoding error: {}", message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

/// Raw datastore errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KVStoreError {
    /// Reading or writing the backing medium failed.
    IOError { message: String },
    /// Persisted data could not be parsed.
    CorruptionError { message: String },
}

impl fmt::Display for KVStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KVStoreError::IOError { message } => write!(f, "datastore I/O: {}", message),
            KVStoreError::CorruptionError { message } => {
                write!(f, "datastore file corrupt: {}", message)
            }
        }
    }
}

impl std::error::Error for KVStoreError {}

impl From<KVStoreError> for StorageError {
    fn from(err: KVStoreError) -> Self {
        StorageError::DatabaseError {
            message: err.to_string(),
        }
    }
}

impl From<bincode::Error> for StorageError {
    fn from(err: bincode::Error) -> Self {
        StorageError::SerializationError {
            message: err.to_string(),
        }
    }
}
