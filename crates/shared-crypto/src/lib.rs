//! # Shared Crypto - Key Material & Hashing
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | BLAKE3, Keccak-256 | Content ids, address derivation |
//! | `ecdsa` | secp256k1 | Wallet keys (default key type) |
//! | `bls` | BLS12-381 | Wallet keys (imported) |
//! | `peer` | RSA | Node network identity |
//!
//! ## Security Properties
//!
//! - **secp256k1**: RFC 6979 deterministic, low-S normalization (EIP-2)
//! - **BLAKE3**: SIMD-accelerated, 5-10x faster than SHA-256
//! - **Secret material**: zeroized on drop where the type owns raw bytes

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bls;
pub mod ecdsa;
pub mod errors;
pub mod hashing;
pub mod peer;

// Re-exports
pub use bls::{BlsKeyPair, BlsPublicKey, BlsSignature};
pub use ecdsa::{Secp256k1KeyPair, Secp256k1PublicKey, Secp256k1Signature};
pub use errors::CryptoError;
pub use hashing::{address_from_public_key, blake3_hash, keccak256};
pub use peer::{KeyAlgorithm, PeerKeyPair};
