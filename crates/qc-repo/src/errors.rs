//! Repository, key store and lock errors.

use std::io;
use std::path::PathBuf;

use qc_02_block_storage::KVStoreError;
use shared_crypto::CryptoError;
use thiserror::Error;

/// Key store errors.
#[derive(Debug, Error)]
pub enum KeystoreError {
    /// Alias is empty or not a safe file name.
    #[error("invalid key name: {0:?}")]
    InvalidName(String),

    /// No key stored under this alias.
    #[error("no key named {0:?}")]
    NotFound(String),

    /// Stored key could not be encoded or decoded.
    #[error("key encoding: {0}")]
    Crypto(#[from] CryptoError),

    #[error("key store I/O: {0}")]
    Io(#[from] io::Error),
}

/// Process lock errors.
#[derive(Debug, Error)]
pub enum LockError {
    /// Lock file could not be created or written.
    #[error("failed to create lock file: {0}")]
    CreateFailed(#[source] io::Error),

    /// Another process holds the repository.
    #[error("repository already in use (lock {}, holder pid {pid:?})", .path.display())]
    AlreadyLocked { pid: Option<u32>, path: PathBuf },
}

/// Repository errors.
#[derive(Debug, Error)]
pub enum RepoError {
    /// `init` was pointed at a directory that already holds a repository.
    #[error("repository already initialized at {0}")]
    AlreadyInitialized(PathBuf),

    /// `open` was pointed at a directory without a repository.
    #[error("no repository at {0}")]
    NotInitialized(PathBuf),

    /// On-disk layout version is not the one this build understands.
    #[error("unsupported repository version {found} (expected {expected})")]
    VersionMismatch { found: String, expected: u32 },

    #[error("config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("datastore: {0}")]
    Datastore(#[from] KVStoreError),

    #[error(transparent)]
    Keystore(#[from] KeystoreError),

    #[error(transparent)]
    Locked(#[from] LockError),

    #[error("repository I/O: {0}")]
    Io(#[from] io::Error),
}
