//! # Driven Port
//!
//! Where wallet keys live. The `Wallet` facade only talks to this trait.

use shared_types::Address;

use crate::domain::errors::WalletError;
use crate::domain::key_info::KeyInfo;

/// Persistent key storage behind a `Wallet`.
pub trait WalletBackend: Send + Sync {
    /// Addresses held, in insertion order.
    fn addresses(&self) -> Vec<Address>;

    /// Whether `address` is held.
    fn has_address(&self, address: &Address) -> bool;

    /// Generate and persist a key of the backend's default scheme.
    fn new_key_info(&mut self) -> Result<KeyInfo, WalletError>;

    /// Validate and persist `key`, returning its address.
    fn import(&mut self, key: &KeyInfo) -> Result<Address, WalletError>;

    /// The key held for `address`.
    fn key_info(&self, address: &Address) -> Result<KeyInfo, WalletError>;
}
