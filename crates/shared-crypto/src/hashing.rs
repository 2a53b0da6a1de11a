//! # Hashing
//!
//! - BLAKE3 for content ids
//! - Keccak-256 for account address derivation

use sha3::{Digest, Keccak256};

/// 256-bit hash output.
pub type Hash = [u8; 32];

/// Hash data with BLAKE3 (one-shot).
pub fn blake3_hash(data: &[u8]) -> Hash {
    *blake3::hash(data).as_bytes()
}

/// Keccak-256 digest.
pub fn keccak256(data: &[u8]) -> Hash {
    Keccak256::digest(data).into()
}

/// Derive a 20-byte account address from serialized public key bytes.
///
/// Keccak-256 of the public key, last 20 bytes.
pub fn address_from_public_key(public_key: &[u8]) -> [u8; 20] {
    let hash = keccak256(public_key);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..32]);
    address
}
