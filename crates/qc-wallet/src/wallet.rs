//! # Wallet Facade
//!
//! The node-facing wallet API. Wraps one `WalletBackend`.

use shared_types::Address;
use tracing::info;

use crate::domain::errors::WalletError;
use crate::domain::key_info::KeyInfo;
use crate::ports::WalletBackend;

/// A node's collection of spending keys.
pub struct Wallet {
    backend: Box<dyn WalletBackend>,
}

impl Wallet {
    pub fn new(backend: impl WalletBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// Generate, store and return a new key.
    pub fn new_key_info(&mut self) -> Result<KeyInfo, WalletError> {
        let key = self.backend.new_key_info()?;
        info!("[wallet] Generated {} key", key.key_type());
        Ok(key)
    }

    /// Generate and store a new key, returning only its address.
    pub fn new_address(&mut self) -> Result<Address, WalletError> {
        self.new_key_info()?.address()
    }

    /// Validate and store `key`, returning its address.
    pub fn import(&mut self, key: &KeyInfo) -> Result<Address, WalletError> {
        let address = self.backend.import(key)?;
        info!("[wallet] Imported {} key {}", key.key_type(), address);
        Ok(address)
    }

    /// The stored key for `address`.
    pub fn export(&self, address: &Address) -> Result<KeyInfo, WalletError> {
        self.backend.key_info(address)
    }

    pub fn has_address(&self, address: &Address) -> bool {
        self.backend.has_address(address)
    }

    /// Addresses held, in insertion order.
    pub fn addresses(&self) -> Vec<Address> {
        self.backend.addresses()
    }

    /// Sign `data` with the key held for `address`.
    pub fn sign_bytes(&self, data: &[u8], address: &Address) -> Result<Vec<u8>, WalletError> {
        self.backend.key_info(address)?.sign(data)
    }
}
