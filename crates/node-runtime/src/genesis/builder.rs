//! # Genesis Block Builder
//!
//! Creates the genesis block from a `GenesisConfig`. Output is a pure function
//! of the configuration once `timestamp` is fixed.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use sha3::{Digest, Keccak256};
use shared_crypto::address_from_public_key;

use super::GenesisError;

/// Maximum length of `extra_data`.
pub const MAX_EXTRA_DATA: usize = 32;

/// Genesis block configuration.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisConfig {
    /// Chain ID (e.g., 1 for mainnet, 5 for testnet).
    pub chain_id: u64,

    /// Genesis timestamp (Unix seconds).
    /// If None, uses current time.
    pub timestamp: Option<u64>,

    /// Initial validator set (compressed secp256k1 public keys).
    #[serde_as(as = "Vec<Bytes>")]
    pub initial_validators: Vec<[u8; 33]>,

    /// Initial validator stakes (in wei).
    pub initial_stakes: Vec<u128>,

    /// Protocol version.
    pub protocol_version: u32,

    /// Extra data (max 32 bytes).
    pub extra_data: Vec<u8>,
}

impl Default for GenesisConfig {
    fn default() -> Self {
        Self {
            chain_id: 1,
            timestamp: None,
            initial_validators: Vec::new(),
            initial_stakes: Vec::new(),
            protocol_version: 1,
            extra_data: b"Quantum-Chain Genesis".to_vec(),
        }
    }
}

impl GenesisConfig {
    /// Devnet configuration with a single validator and a fixed timestamp.
    pub fn devnet(validator_pubkey: [u8; 33]) -> Self {
        Self {
            chain_id: 31337,
            timestamp: Some(0),
            initial_validators: vec![validator_pubkey],
            initial_stakes: vec![32_000_000_000_000_000_000],
            extra_data: b"Quantum-Chain Devnet".to_vec(),
            ..Default::default()
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), GenesisError> {
        if self.initial_validators.len() != self.initial_stakes.len() {
            return Err(GenesisError::InvalidConfig(
                "Validator count must match stake count".to_string(),
            ));
        }

        if self.extra_data.len() > MAX_EXTRA_DATA {
            return Err(GenesisError::InvalidConfig(format!(
                "Extra data exceeds {} bytes",
                MAX_EXTRA_DATA
            )));
        }

        Ok(())
    }
}

/// The genesis block structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisBlock {
    /// Block header.
    pub header: GenesisHeader,

    /// Initial validator set.
    pub validators: Vec<ValidatorInfo>,
}

/// Genesis block header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisHeader {
    /// Always 0 for genesis.
    pub height: u64,

    /// Always 32 zero bytes for genesis.
    pub parent_hash: [u8; 32],

    /// Keccak-256 over the other header fields.
    pub block_hash: [u8; 32],

    /// Merkle root of transactions (empty for genesis).
    pub merkle_root: [u8; 32],

    /// State root after genesis allocations.
    pub state_root: [u8; 32],

    /// Genesis timestamp.
    pub timestamp: u64,

    /// Chain ID.
    pub chain_id: u64,

    /// Protocol version.
    pub protocol_version: u32,

    /// Extra data.
    pub extra_data: Vec<u8>,
}

/// Validator information in genesis.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorInfo {
    /// Compressed public key (33 bytes).
    #[serde_as(as = "Bytes")]
    pub pubkey: [u8; 33],

    /// Initial stake in wei.
    pub stake: u128,

    /// Derived address (20 bytes).
    pub address: [u8; 20],
}

/// Keccak-256 of empty input: root of an empty tree or trie.
pub const EMPTY_ROOT: [u8; 32] = [
    0xc5, 0xd2, 0x46, 0x01, 0x86, 0xf7, 0x23, 0x3c,
    0x92, 0x7e, 0x7d, 0xb2, 0xdc, 0xc7, 0x03, 0xc0,
    0xe5, 0x00, 0xb6, 0x53, 0xca, 0x82, 0x27, 0x3b,
    0x7b, 0xfa, 0xd8, 0x04, 0x5d, 0x85, 0xa4, 0x70,
];

/// Builder for creating genesis blocks.
pub struct GenesisBuilder {
    config: GenesisConfig,
}

impl GenesisBuilder {
    /// Create a new genesis builder with configuration.
    pub fn new(config: GenesisConfig) -> Self {
        Self { config }
    }

    /// Build the genesis block.
    pub fn build(self) -> Result<GenesisBlock, GenesisError> {
        self.config.validate()?;

        let timestamp = self.config.timestamp.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });

        let validators: Vec<ValidatorInfo> = self
            .config
            .initial_validators
            .iter()
            .zip(self.config.initial_stakes.iter())
            .map(|(pubkey, stake)| ValidatorInfo {
                pubkey: *pubkey,
                stake: *stake,
                address: address_from_public_key(pubkey),
            })
            .collect();

        let state_root = if validators.is_empty() {
            EMPTY_ROOT
        } else {
            compute_state_root(&validators)
        };

        let mut header = GenesisHeader {
            height: 0,
            parent_hash: [0u8; 32],
            block_hash: [0u8; 32],
            merkle_root: EMPTY_ROOT,
            state_root,
            timestamp,
            chain_id: self.config.chain_id,
            protocol_version: self.config.protocol_version,
            extra_data: self.config.extra_data,
        };
        header.block_hash = compute_block_hash(&header);

        Ok(GenesisBlock { header, validators })
    }
}

/// Flat commitment over validator allocations, in configuration order.
fn compute_state_root(validators: &[ValidatorInfo]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    for validator in validators {
        hasher.update(validator.address);
        hasher.update(validator.stake.to_be_bytes());
    }
    hasher.finalize().into()
}

fn compute_block_hash(header: &GenesisHeader) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(header.height.to_be_bytes());
    hasher.update(header.parent_hash);
    hasher.update(header.merkle_root);
    hasher.update(header.state_root);
    hasher.update(header.timestamp.to_be_bytes());
    hasher.update(header.chain_id.to_be_bytes());
    hasher.update(header.protocol_version.to_be_bytes());
    hasher.update(&header.extra_data);
    hasher.finalize().into()
}
