//! # Genesis
//!
//! Genesis block creation and installation into chain storage.
//!
//! - `builder` - `GenesisBuilder`, a deterministic default genesis computation
//! - `installer` - Runs any `GenesisInitFn`, stores its block and records it
//!   as the chain head

pub mod builder;
pub mod installer;

pub use builder::{GenesisBlock, GenesisBuilder, GenesisConfig, GenesisHeader, ValidatorInfo};
pub use installer::{install_genesis, load_head, DefaultGenesis, GenesisInitFn, CHAIN_HEAD_KEY};

use qc_02_block_storage::StorageError;
use thiserror::Error;

/// Genesis creation and installation errors.
#[derive(Debug, Error)]
pub enum GenesisError {
    /// Invalid genesis configuration.
    #[error("Invalid genesis configuration: {0}")]
    InvalidConfig(String),

    /// The genesis computation itself failed.
    #[error("Genesis computation failed: {0}")]
    Computation(String),

    /// Failed to store the genesis block or chain head.
    #[error("Failed to store genesis block")]
    Storage(#[from] StorageError),

    /// The caller cancelled before the block was stored.
    #[error("Genesis installation cancelled")]
    Cancelled,
}
