//! Bootstrap errors.
//!
//! Each `InitError` variant names the stage that failed; the cause is kept as
//! the error source.

use qc_repo::{KeystoreError, RepoError};
use qc_wallet::WalletError;
use shared_crypto::CryptoError;
use thiserror::Error;

use crate::genesis::GenesisError;

/// First failure of a bootstrap run.
#[derive(Debug, Error)]
pub enum InitError {
    /// Genesis installation failed. Nothing else was touched.
    #[error("failed to initialize genesis")]
    Genesis(#[source] GenesisError),

    /// Peer identity key could not be generated or stored.
    #[error("failed to provision peer identity")]
    Identity(#[source] IdentityError),

    /// The wallet backend could not be opened.
    #[error("failed to open wallet")]
    WalletOpen(#[source] WalletError),

    /// The default wallet key could not be generated or imported.
    #[error("failed to provision default wallet key")]
    KeyProvision(#[source] WalletError),

    /// Additional key at position `index` of the import list failed.
    #[error("failed to import key {index}")]
    KeyImport {
        index: usize,
        #[source]
        source: WalletError,
    },

    /// The default key's address could not be derived.
    #[error("failed to derive default wallet address")]
    AddressDerivation(#[source] WalletError),

    /// The final configuration write failed.
    #[error("failed to persist config")]
    ConfigPersist(#[source] RepoError),
}

/// Peer identity provisioning errors.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("failed to generate peer key")]
    Generate(#[source] CryptoError),

    #[error("failed to store peer key")]
    Store(#[source] KeystoreError),
}
