use qc_02_block_storage::KVStoreError;
use shared_crypto::CryptoError;
use shared_types::Address;
use thiserror::Error;

/// Wallet errors.
#[derive(Debug, Error)]
pub enum WalletError {
    /// Key material does not form a valid key of its declared type.
    #[error("invalid key material: {0}")]
    InvalidKey(#[from] CryptoError),

    /// A key with this address is already in the wallet.
    #[error("address {0} already in wallet")]
    DuplicateAddress(Address),

    /// No key with this address in the wallet.
    #[error("address {0} not in wallet")]
    UnknownAddress(Address),

    /// A persisted record could not be loaded.
    #[error("corrupt wallet record {key}: {reason}")]
    CorruptRecord { key: String, reason: String },

    #[error("wallet record encoding: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("wallet datastore: {0}")]
    Datastore(#[from] KVStoreError),
}
