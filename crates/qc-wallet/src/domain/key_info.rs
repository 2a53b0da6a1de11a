//! Wallet key records.
//!
//! A `KeyInfo` is raw private key material tagged with its scheme. It is
//! never validated on construction: malformed material is only detected when
//! the key is used (`public_key`, `address`, `sign`), which lets callers load
//! untrusted key files and get a precise error at the point of use.

use std::fmt;

use serde::{Deserialize, Serialize};
use shared_crypto::{BlsKeyPair, Secp256k1KeyPair};
use shared_types::Address;
use zeroize::Zeroize;

use super::errors::WalletError;

/// Signature scheme of a wallet key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    /// ECDSA over secp256k1. Generated keys use this scheme.
    Secp256k1,
    /// BLS12-381 (min-pk).
    Bls,
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyType::Secp256k1 => f.write_str("secp256k1"),
            KeyType::Bls => f.write_str("bls"),
        }
    }
}

/// Private key material plus its scheme.
///
/// Serializes as `{"key_type": "secp256k1", "private_key": "<hex>"}`. The
/// material is zeroized on drop and redacted from `Debug`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInfo {
    key_type: KeyType,
    #[serde(with = "hex::serde")]
    private_key: Vec<u8>,
}

impl KeyInfo {
    /// Wrap existing key material. Not validated here.
    pub fn new(key_type: KeyType, private_key: Vec<u8>) -> Self {
        Self {
            key_type,
            private_key,
        }
    }

    /// Generate a fresh key of `key_type`.
    pub fn generate(key_type: KeyType) -> Result<Self, WalletError> {
        let private_key = match key_type {
            KeyType::Secp256k1 => Secp256k1KeyPair::generate().to_bytes().to_vec(),
            KeyType::Bls => BlsKeyPair::generate()?.secret_bytes().to_vec(),
        };
        Ok(Self::new(key_type, private_key))
    }

    /// Key scheme.
    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    /// Raw private key material.
    pub fn private_key(&self) -> &[u8] {
        &self.private_key
    }

    /// Public key encoding: compressed SEC1 for secp256k1, 48-byte G1 for BLS.
    pub fn public_key(&self) -> Result<Vec<u8>, WalletError> {
        Ok(match self.key_type {
            KeyType::Secp256k1 => Secp256k1KeyPair::from_slice(&self.private_key)?
                .public_key()
                .as_bytes()
                .to_vec(),
            KeyType::Bls => BlsKeyPair::from_secret_bytes(&self.private_key)?
                .public_key()
                .to_bytes()
                .to_vec(),
        })
    }

    /// Address of this key: last 20 bytes of Keccak-256 over the public key.
    pub fn address(&self) -> Result<Address, WalletError> {
        let address = match self.key_type {
            KeyType::Secp256k1 => Secp256k1KeyPair::from_slice(&self.private_key)?
                .public_key()
                .to_address(),
            KeyType::Bls => BlsKeyPair::from_secret_bytes(&self.private_key)?
                .public_key()
                .to_address(),
        };
        Ok(Address::new(address))
    }

    /// Sign `data` with this key.
    pub fn sign(&self, data: &[u8]) -> Result<Vec<u8>, WalletError> {
        Ok(match self.key_type {
            KeyType::Secp256k1 => Secp256k1KeyPair::from_slice(&self.private_key)?
                .sign(data)
                .as_bytes()
                .to_vec(),
            KeyType::Bls => BlsKeyPair::from_secret_bytes(&self.private_key)?
                .sign(data)
                .to_bytes()
                .to_vec(),
        })
    }
}

impl Drop for KeyInfo {
    fn drop(&mut self) {
        self.private_key.zeroize();
    }
}

impl fmt::Debug for KeyInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyInfo")
            .field("key_type", &self.key_type)
            .field("private_key", &"<redacted>")
            .finish()
    }
}
