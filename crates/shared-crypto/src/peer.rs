//! # Peer Identity Keys
//!
//! The node's network identity is an asymmetric keypair. Only RSA is
//! supported; the key size is chosen by the caller.
//!
//! ## Encoding
//!
//! Keys are exchanged as PKCS#1 DER. Two keypairs are the same identity if and
//! only if their encodings are byte-identical.

use std::fmt;

use rsa::pkcs1::{DecodeRsaPrivateKey, EncodeRsaPrivateKey, EncodeRsaPublicKey};
use rsa::traits::PublicKeyParts;
use rsa::RsaPrivateKey;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::CryptoError;

/// Smallest RSA modulus accepted for a peer identity.
pub const MIN_RSA_BITS: usize = 1024;

/// Asymmetric scheme of a peer identity key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAlgorithm {
    /// RSA with a caller-selected modulus size.
    Rsa,
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyAlgorithm::Rsa => f.write_str("RSA"),
        }
    }
}

/// Private keypair identifying a node on the network layer.
#[derive(Clone, PartialEq, Eq)]
pub struct PeerKeyPair {
    secret: RsaPrivateKey,
}

impl PeerKeyPair {
    /// Generate a fresh keypair. CPU cost grows steeply with `bits`.
    pub fn generate(algorithm: KeyAlgorithm, bits: usize) -> Result<Self, CryptoError> {
        match algorithm {
            KeyAlgorithm::Rsa => {
                if bits < MIN_RSA_BITS {
                    return Err(CryptoError::UnsupportedKeySize {
                        bits,
                        min: MIN_RSA_BITS,
                    });
                }
                let secret = RsaPrivateKey::new(&mut rand::thread_rng(), bits)
                    .map_err(|e| CryptoError::KeyGenerationFailed(e.to_string()))?;
                Ok(Self { secret })
            }
        }
    }

    /// Decode a PKCS#1 DER private key.
    pub fn from_bytes(der: &[u8]) -> Result<Self, CryptoError> {
        let secret = RsaPrivateKey::from_pkcs1_der(der)
            .map_err(|e| CryptoError::KeyEncoding(e.to_string()))?;
        secret
            .validate()
            .map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self { secret })
    }

    /// Encode as PKCS#1 DER. The buffer is zeroized when dropped.
    pub fn to_bytes(&self) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
        let document = self
            .secret
            .to_pkcs1_der()
            .map_err(|e| CryptoError::KeyEncoding(e.to_string()))?;
        Ok(document.to_bytes())
    }

    /// Encode the public half as PKCS#1 DER.
    pub fn public_key_bytes(&self) -> Result<Vec<u8>, CryptoError> {
        self.secret
            .to_public_key()
            .to_pkcs1_der()
            .map(|doc| doc.as_bytes().to_vec())
            .map_err(|e| CryptoError::KeyEncoding(e.to_string()))
    }

    /// Peer id: SHA-256 of the public key encoding.
    pub fn peer_id(&self) -> Result<[u8; 32], CryptoError> {
        let public = self.public_key_bytes()?;
        Ok(Sha256::digest(&public).into())
    }

    /// Key scheme.
    pub fn algorithm(&self) -> KeyAlgorithm {
        KeyAlgorithm::Rsa
    }

    /// Modulus size in bits.
    pub fn bits(&self) -> usize {
        self.secret.size() * 8
    }
}

impl fmt::Debug for PeerKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PeerKeyPair")
            .field("algorithm", &self.algorithm())
            .field("bits", &self.bits())
            .finish_non_exhaustive()
    }
}
